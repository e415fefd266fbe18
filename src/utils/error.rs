use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// 上游錯誤內容在回應中最多保留的字元數
pub const BODY_PREVIEW_CHARS: usize = 200;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("❌ Bad Request: {body}")]
    UpstreamBadRequest { body: String },

    #[error("❌ Unauthorized: API key is invalid or missing")]
    UpstreamUnauthorized,

    #[error("❌ Rate limit exceeded. Please try again later.")]
    UpstreamRateLimited { body: String },

    #[error("⚠ Unexpected Error: {}", preview(.body))]
    UpstreamUnexpected { status: u16, body: String },

    #[error("❌ Connection Error: {0}")]
    ConnectionError(#[from] reqwest::Error),

    #[error("❌ Invalid upstream response: {0}")]
    InvalidUpstreamBody(#[from] serde_json::Error),

    #[error("Not Found")]
    NotFound,

    #[error("Method Not Allowed")]
    MethodNotAllowed,

    #[error("Invalid request parameters: {message}")]
    InvalidRequest { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GatewayError>;

/// 截取上游回應前 200 個字元
pub fn preview(body: &str) -> String {
    body.chars().take(BODY_PREVIEW_CHARS).collect()
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::UpstreamBadRequest { .. } => StatusCode::BAD_REQUEST,
            GatewayError::UpstreamUnauthorized => StatusCode::UNAUTHORIZED,
            GatewayError::UpstreamRateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            GatewayError::UpstreamUnexpected { status, .. } => StatusCode::from_u16(*status)
                .ok()
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::BAD_GATEWAY),
            GatewayError::InvalidUpstreamBody(_) => StatusCode::BAD_GATEWAY,
            GatewayError::NotFound => StatusCode::NOT_FOUND,
            GatewayError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            GatewayError::InvalidRequest { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            GatewayError::ConnectionError(_)
            | GatewayError::ConfigError { .. }
            | GatewayError::MissingConfigError { .. }
            | GatewayError::InvalidConfigValueError { .. }
            | GatewayError::IoError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            GatewayError::ConfigError { .. }
                | GatewayError::MissingConfigError { .. }
                | GatewayError::InvalidConfigValueError { .. }
        )
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            GatewayError::MissingConfigError { field } if field == "upstream.api_key" => {
                "Set BIRDEYE_API_KEY in the environment or a .env file".to_string()
            }
            GatewayError::MissingConfigError { field } => {
                format!("Provide a value for '{}' via flag, environment or config file", field)
            }
            GatewayError::InvalidConfigValueError { field, .. } => {
                format!("Check the value of '{}'", field)
            }
            GatewayError::ConfigError { .. } => {
                "Check the config file syntax and referenced environment variables".to_string()
            }
            GatewayError::IoError(_) => {
                "Check that the config file exists and the port is free".to_string()
            }
            GatewayError::UpstreamUnauthorized => "Verify the Birdeye API key".to_string(),
            GatewayError::UpstreamRateLimited { .. } => "Retry later".to_string(),
            GatewayError::ConnectionError(_) => {
                "Check network access to the Birdeye API base URL".to_string()
            }
            _ => "Check the request and try again".to_string(),
        }
    }
}

impl From<QueryRejection> for GatewayError {
    fn from(rejection: QueryRejection) -> Self {
        GatewayError::InvalidRequest {
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(serde_json::json!({ "detail": self.to_string() }));
        (status, body).into_response()
    }
}
