use std::fmt;

use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse
};
use serde::Serialize;
use serde_json::json;
use validator::ValidationErrors;

/// Terminal outcomes of the intake pipeline that map to a client response.
/// `Display` is the server-side (log) rendering and may carry internal
/// detail; `error_response` only ever emits the client-safe message.
#[derive(Debug)]
pub enum AppError {
    TooManyAttempts { retry_after: Option<u64> },
    RecaptchaRejected,
    ValidationError(Vec<FieldError>),
    DeliveryError(String),
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::TooManyAttempts { retry_after } => {
                write!(f, "rate limit exceeded (retry after {:?}s)", retry_after)
            }
            AppError::RecaptchaRejected => write!(f, "recaptcha verification rejected"),
            AppError::ValidationError(errors) => {
                let messages = errors.iter()
                    .map(|e| format!("{}:{}", e.field, e.message))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "validation error: {}", messages)
            }
            AppError::DeliveryError(msg) => write!(f, "mail delivery failed: {}", msg),
            AppError::InternalError(msg) => write!(f, "internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        builder.insert_header(ContentType::json());

        let body = match self {
            AppError::TooManyAttempts { retry_after } => {
                if let Some(secs) = retry_after {
                    builder.insert_header(("Retry-After", secs.to_string()));
                }
                json!({ "error": "Çok fazla deneme yaptınız. Lütfen bir süre bekleyin." })
            }
            AppError::RecaptchaRejected => {
                json!({ "error": "reCAPTCHA doğrulaması başarısız" })
            }
            AppError::ValidationError(errors) => {
                json!({
                    "error": "Form verileri geçersiz",
                    "details": field_map(errors)
                })
            }
            // Internal detail stays in the logs, never in the body.
            AppError::DeliveryError(_) | AppError::InternalError(_) => {
                json!({ "error": "Form gönderilirken bir hata oluştu" })
            }
        };

        builder.json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::TooManyAttempts { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::RecaptchaRejected => StatusCode::BAD_REQUEST,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::DeliveryError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Group field errors into a `{ field: [messages...] }` map for the client.
fn field_map(errors: &[FieldError]) -> serde_json::Value {
    let mut map = std::collections::BTreeMap::<&str, Vec<&str>>::new();
    for e in errors {
        map.entry(e.field.as_str()).or_default().push(e.message.as_str());
    }
    json!(map)
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let field_errors = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(|e| FieldError {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| "Geçersiz değer".to_string()),
                })
            })
            .collect();

        AppError::ValidationError(field_errors)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalError(err.to_string())
    }
}

impl AppError {
    pub fn to_http_response(&self) -> HttpResponse {
        self.error_response()
    }

    pub fn field(field: &str, message: &str) -> Self {
        AppError::ValidationError(vec![FieldError {
            field: field.to_string(),
            message: message.to_string(),
        }])
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}
