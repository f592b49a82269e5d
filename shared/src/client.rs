//! Session and account DTOs
//!
//! Request/response types for `/auth/*` and `/email-config`.

use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, ValidationResult};

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub senha: String,
}

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub senha: String,
}

impl RegisterRequest {
    /// Build a request, checking the password confirmation locally
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        senha: impl Into<String>,
        confirm: &str,
    ) -> ValidationResult<Self> {
        let senha = senha.into();
        if senha != confirm {
            return Err(ValidationError::PasswordMismatch);
        }
        let email = email.into();
        if email.trim().is_empty() {
            return Err(ValidationError::MissingField("email"));
        }
        Ok(Self {
            name: name.into(),
            email,
            senha,
        })
    }
}

/// Login response body; the session token may also come as a cookie
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default, alias = "accessToken")]
    pub token: Option<String>,
    #[serde(default, alias = "usuario")]
    pub user: Option<UserInfo>,
}

/// Logged-in staff member (`GET /auth/me`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserInfo {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, alias = "nome")]
    pub name: String,
    pub email: String,
}

// =============================================================================
// Sender e-mail configuration
// =============================================================================

/// Current notification sender (`GET /email-config`)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmailConfig {
    #[serde(default)]
    pub email: String,
    #[serde(rename = "hasPassword", default)]
    pub has_password: bool,
}

/// New sender settings (`POST /email-config`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmailConfigUpdate {
    pub email: String,
    /// App password; may be left empty to keep the stored one
    pub password: String,
}

impl EmailConfigUpdate {
    /// The e-mail is required; the password only when none is stored yet
    pub fn validate(&self, current: &EmailConfig) -> ValidationResult<()> {
        if self.email.trim().is_empty() {
            return Err(ValidationError::MissingField("email"));
        }
        if !current.has_password && self.password.is_empty() {
            return Err(ValidationError::MissingField("password"));
        }
        Ok(())
    }
}
