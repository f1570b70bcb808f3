use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use shared_types::ErrorResponse;
use std::fmt;

use crate::database::StoreError;

/// Errors returned by the route handlers.
///
/// Malformed requests map to 400; every store failure, including a missing
/// record, maps to 500 with a generic message.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Store {
        message: String,
        details: Option<String>,
    },
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    /// Logs the underlying cause and hides it behind `message`.
    pub fn store(message: &str, err: anyhow::Error) -> Self {
        log_store_error(message, &err);
        ApiError::Store {
            message: message.to_string(),
            details: None,
        }
    }

    /// Same as [`ApiError::store`] but also reports the cause in `details`.
    pub fn store_with_details(message: &str, err: anyhow::Error) -> Self {
        log_store_error(message, &err);
        ApiError::Store {
            message: message.to_string(),
            details: Some(err.to_string()),
        }
    }
}

fn log_store_error(message: &str, err: &anyhow::Error) {
    match err.downcast_ref::<StoreError>() {
        Some(StoreError::NotFound { entity, id }) => {
            tracing::warn!("{}: {} {} does not exist", message, entity, id)
        }
        None => tracing::error!("{}: {:#}", message, err),
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "{}", msg),
            ApiError::Store { message, .. } => write!(f, "{}", message),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ApiError::BadRequest(msg) => ErrorResponse {
                error: msg.clone(),
                details: None,
            },
            ApiError::Store { message, details } => ErrorResponse {
                error: message.clone(),
                details: details.clone(),
            },
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

/// Parses a path id, rejecting anything that is not an integer.
pub fn parse_id(raw: &str, entity: &str) -> Result<i64, ApiError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ApiError::bad_request(format!("{} ID is required", capitalize(entity))));
    }
    raw.parse::<i64>()
        .map_err(|_| ApiError::bad_request(format!("Invalid {} ID", entity)))
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
