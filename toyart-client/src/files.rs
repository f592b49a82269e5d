//! Loading local files as upload attachments

use std::path::Path;

use shared::Attachment;

use crate::{ClientError, ClientResult};

/// Read a file into an [`Attachment`], guessing its MIME type from the extension
pub async fn read_attachment(path: impl AsRef<Path>) -> ClientResult<Attachment> {
    let path = path.as_ref();
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| ClientError::Validation(format!("Not a file path: {}", path.display())))?
        .to_string();
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| ClientError::Attachment {
            path: path.to_path_buf(),
            source,
        })?;
    let mime_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string();
    tracing::debug!(file = %file_name, %mime_type, size = bytes.len(), "Attachment loaded");
    Ok(Attachment::new(file_name, mime_type, bytes))
}

/// Whether a file matches a picker accept hint such as `image/*` or `.pdf`
pub fn accepts(hint: &str, attachment: &Attachment) -> bool {
    hint.split(',').map(str::trim).any(|pattern| {
        if let Some(ext) = pattern.strip_prefix('.') {
            attachment
                .file_name
                .rsplit_once('.')
                .is_some_and(|(_, e)| e.eq_ignore_ascii_case(ext))
        } else if let Some(kind) = pattern.strip_suffix("/*") {
            attachment
                .mime_type
                .split_once('/')
                .is_some_and(|(k, _)| k.eq_ignore_ascii_case(kind))
        } else {
            attachment.mime_type.eq_ignore_ascii_case(pattern)
        }
    })
}
