// toyart-client/src/http.rs
// HTTP client for the order backend

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, SET_COOKIE};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, multipart};
use serde::de::DeserializeOwned;
use shared::client::{
    EmailConfig, EmailConfigUpdate, LoginRequest, LoginResponse, RegisterRequest, UserInfo,
};
use shared::models::{MessageTemplate, OrderStatusPatch, OrderUpdate, PainterCount, ShipOrder};
use shared::order::{OrderDraft, PdfExtraction};
use shared::report::DateRange;
use shared::{Attachment, Feedback, FeedbackSubmission, Order, OrderStatus};

use crate::api::{BackofficeApi, Notification, OrderApi};
use crate::{ClientConfig, ClientError, ClientResult};

/// Error body returned by the backend; `message` is a string or a list of strings
#[derive(serde::Deserialize)]
struct ApiErrorResponse {
    #[serde(default)]
    message: serde_json::Value,
}

impl ApiErrorResponse {
    fn into_message(self) -> Option<String> {
        match self.message {
            serde_json::Value::String(message) => Some(message),
            serde_json::Value::Array(items) => Some(
                items
                    .iter()
                    .map(|item| match item.as_str() {
                        Some(s) => s.to_string(),
                        None => item.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join("; "),
            ),
            _ => None,
        }
    }
}

/// Network HTTP client
///
/// Holds the session token explicitly and sends it as
/// `Authorization: Bearer` on every request.
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl NetworkHttpClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        config.validate()?;
        let client = Client::builder()
            .timeout(config.timeout_duration())
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    /// Base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%method, %url, "Sending request");
        let mut req = self.client.request(method, url);
        if let Some(auth) = self.auth_header() {
            req = req.header(AUTHORIZATION, auth);
        }
        req
    }

    async fn check_status(response: Response) -> ClientResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::UNAUTHORIZED {
            return Err(ClientError::Unauthorized);
        }
        let text = response.text().await?;
        let message = serde_json::from_str::<ApiErrorResponse>(&text)
            .ok()
            .and_then(ApiErrorResponse::into_message)
            .unwrap_or_else(|| match text.trim() {
                "" => status.canonical_reason().unwrap_or("Unknown").to_string(),
                body => body.to_string(),
            });
        tracing::debug!(status = status.as_u16(), %message, "Backend refused request");
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn handle_response<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        let response = Self::check_status(response).await?;
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// For calls whose response body the console does not use
    async fn handle_empty(response: Response) -> ClientResult<()> {
        Self::check_status(response).await?;
        Ok(())
    }

    // ========== Session ==========

    /// `POST /auth/login`; keeps the returned token for later calls
    pub async fn login(&mut self, email: &str, senha: &str) -> ClientResult<LoginResponse> {
        let req = LoginRequest {
            email: email.to_string(),
            senha: senha.to_string(),
        };
        let response = self
            .request(Method::POST, "/auth/login")
            .json(&req)
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        let cookie_token = token_from_cookies(response.headers());
        let text = response.text().await?;
        let mut body: LoginResponse = if text.trim().is_empty() {
            LoginResponse::default()
        } else {
            serde_json::from_str(&text)?
        };
        if body.token.is_none() {
            body.token = cookie_token;
        }
        let token = body
            .token
            .clone()
            .ok_or_else(|| ClientError::InvalidResponse("Missing session token".into()))?;
        self.token = Some(token);
        tracing::info!(email, "Logged in");
        Ok(body)
    }

    /// `POST /auth/register`
    pub async fn register(&self, req: &RegisterRequest) -> ClientResult<()> {
        let response = self
            .request(Method::POST, "/auth/register")
            .json(req)
            .send()
            .await?;
        Self::handle_empty(response).await
    }

    /// `GET /auth/me`
    pub async fn me(&self) -> ClientResult<UserInfo> {
        let response = self.request(Method::GET, "/auth/me").send().await?;
        Self::handle_response(response).await
    }

    /// `POST /auth/logout`; the local token is dropped even if the call fails
    pub async fn logout(&mut self) -> ClientResult<()> {
        let result = match self.request(Method::POST, "/auth/logout").send().await {
            Ok(response) => Self::handle_empty(response).await,
            Err(e) => Err(e.into()),
        };
        self.token = None;
        result
    }
}

fn token_from_cookies(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|cookie| {
            let pair = cookie.split(';').next()?;
            let (name, value) = pair.split_once('=')?;
            let value = value.trim();
            (name.trim() == "token" && !value.is_empty()).then(|| value.to_string())
        })
}

fn file_part(attachment: &Attachment) -> ClientResult<multipart::Part> {
    Ok(multipart::Part::bytes(attachment.bytes.clone())
        .file_name(attachment.file_name.clone())
        .mime_str(&attachment.mime_type)?)
}

#[async_trait]
impl OrderApi for NetworkHttpClient {
    async fn list_orders(&self, range: &DateRange) -> ClientResult<Vec<Order>> {
        let response = self
            .request(Method::GET, "/orders")
            .query(&range.query_params())
            .send()
            .await?;
        Self::handle_response(response).await
    }

    async fn default_message(&self, status: OrderStatus) -> ClientResult<MessageTemplate> {
        let path = format!("/orders/mensagens/{}", status.as_wire());
        let response = self.request(Method::GET, &path).send().await?;
        Self::handle_response(response).await
    }

    async fn notify(&self, order_id: &str, notification: &Notification) -> ClientResult<()> {
        let mut form = multipart::Form::new();
        for (name, value) in notification.form_fields() {
            form = form.text(name, value);
        }
        for attachment in &notification.attachments {
            form = form.part("arquivos", file_part(attachment)?);
        }
        let path = format!("/orders/{}/enviar-email", order_id);
        let response = self
            .request(Method::POST, &path)
            .multipart(form)
            .send()
            .await?;
        Self::handle_empty(response).await
    }

    async fn patch_status(&self, order_id: &str, status: OrderStatus) -> ClientResult<()> {
        let path = format!("/orders/{}", order_id);
        let response = self
            .request(Method::PATCH, &path)
            .json(&OrderStatusPatch { status })
            .send()
            .await?;
        Self::handle_empty(response).await
    }

    async fn mark_shipped(&self, order_id: &str, tracking_code: &str) -> ClientResult<()> {
        let path = format!("/orders/{}/enviar", order_id);
        let body = ShipOrder {
            tracking_code: tracking_code.to_string(),
        };
        let response = self
            .request(Method::PATCH, &path)
            .json(&body)
            .send()
            .await?;
        Self::handle_empty(response).await
    }
}

#[async_trait]
impl BackofficeApi for NetworkHttpClient {
    async fn extract_pdf(&self, pdf: &Attachment) -> ClientResult<PdfExtraction> {
        let form = multipart::Form::new().part("file", file_part(pdf)?);
        let response = self
            .request(Method::POST, "/orders/pdf")
            .multipart(form)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    async fn create_order(&self, draft: &OrderDraft, images: &[Attachment]) -> ClientResult<()> {
        draft.validate()?;
        let mut form = multipart::Form::new();
        for (name, value) in draft.form_fields() {
            form = form.text(name, value);
        }
        for image in images {
            form = form.part("imagens", file_part(image)?);
        }
        let response = self
            .request(Method::POST, "/orders/com-imagem")
            .multipart(form)
            .send()
            .await?;
        Self::handle_empty(response).await?;
        tracing::info!(customer = %draft.customer, "Order created");
        Ok(())
    }

    async fn update_order(&self, order_id: &str, update: &OrderUpdate) -> ClientResult<Order> {
        let path = format!("/orders/{}", order_id);
        let response = self
            .request(Method::PATCH, &path)
            .json(update)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    async fn delete_order(&self, order_id: &str) -> ClientResult<()> {
        let path = format!("/orders/{}", order_id);
        let response = self.request(Method::DELETE, &path).send().await?;
        Self::handle_empty(response).await?;
        tracing::info!(order_id, "Order deleted");
        Ok(())
    }

    async fn painter_counts(&self, range: &DateRange) -> ClientResult<Vec<PainterCount>> {
        let response = self
            .request(Method::GET, "/orders/count-all-pintores")
            .query(&range.query_params())
            .send()
            .await?;
        Self::handle_response(response).await
    }

    async fn list_feedback(&self) -> ClientResult<Vec<Feedback>> {
        let response = self.request(Method::GET, "/avaliacao").send().await?;
        Self::handle_response(response).await
    }

    async fn submit_feedback(&self, submission: &FeedbackSubmission) -> ClientResult<()> {
        let response = self
            .request(Method::POST, "/avaliacao")
            .json(submission)
            .send()
            .await?;
        Self::handle_empty(response).await
    }

    async fn email_config(&self) -> ClientResult<EmailConfig> {
        let response = self.request(Method::GET, "/email-config").send().await?;
        Self::handle_response(response).await
    }

    async fn save_email_config(&self, update: &EmailConfigUpdate) -> ClientResult<()> {
        let response = self
            .request(Method::POST, "/email-config")
            .json(update)
            .send()
            .await?;
        Self::handle_empty(response).await
    }
}
