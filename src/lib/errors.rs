//! Error taxonomy shared by both transports. HTTP failures are classified from
//! the status code and the backend's `{"error": ...}` envelope so forms can show
//! field-level messages verbatim while bootstrap treats everything as "signed out".

use serde_json::Value;
use std::fmt;

/// Maximum number of error body characters surfaced to the UI.
pub const MAX_ERROR_CHARS: usize = 200;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppError {
    Config(String),
    Network(String),
    Timeout(String),
    Validation {
        field: Option<String>,
        message: String,
    },
    Auth {
        code: u16,
    },
    Http {
        status: u16,
        message: String,
    },
    Parse(String),
    Serialization(String),
}

impl AppError {
    /// Classifies a non-2xx response. 401/403 become `Auth`, other 4xx become
    /// `Validation` and everything else stays a sanitized `Http` error.
    pub fn from_response(status: u16, body: &str) -> Self {
        if status == 401 || status == 403 {
            return AppError::Auth { code: status };
        }

        if (400..500).contains(&status) {
            if let Some((field, message)) = error_detail(body) {
                return AppError::Validation { field, message };
            }
            return AppError::Validation {
                field: None,
                message: sanitize_body(body),
            };
        }

        AppError::Http {
            status,
            message: sanitize_body(body),
        }
    }

    /// True when no response reached the client.
    pub fn is_network(&self) -> bool {
        matches!(self, AppError::Network(_) | AppError::Timeout(_))
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(message) => write!(formatter, "Config error: {message}"),
            AppError::Network(message) => write!(formatter, "Network error: {message}"),
            AppError::Timeout(message) => write!(formatter, "Timeout: {message}"),
            AppError::Validation {
                field: Some(field),
                message,
            } => write!(formatter, "{field} {message}"),
            AppError::Validation {
                field: None,
                message,
            } => write!(formatter, "{message}"),
            AppError::Auth { code } => {
                write!(formatter, "Not signed in or session expired ({code})")
            }
            AppError::Http { status, message } => {
                write!(formatter, "Request failed ({status}): {message}")
            }
            AppError::Parse(message) => write!(formatter, "Response error: {message}"),
            AppError::Serialization(message) => {
                write!(formatter, "Request error: {message}")
            }
        }
    }
}

impl std::error::Error for AppError {}

/// Extracts the first field-level message (or a plain message) from an error envelope.
fn error_detail(body: &str) -> Option<(Option<String>, String)> {
    let value: Value = serde_json::from_str(body.trim()).ok()?;
    match value.get("error")? {
        Value::String(message) => Some((None, message.trim().to_string())),
        Value::Object(fields) => {
            let (field, message) = fields.iter().min_by(|left, right| left.0.cmp(right.0))?;
            let message = match message {
                Value::String(text) => text.trim().to_string(),
                other => other.to_string(),
            };
            Some((Some(field.clone()), message))
        }
        _ => None,
    }
}

/// Sanitizes HTTP error bodies for user-facing messages by trimming and truncating.
pub fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}
