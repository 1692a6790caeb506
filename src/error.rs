use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

/// Everything a handler can fail with. Each variant maps to exactly one HTTP
/// status; bodies are a uniform `{"error": ...}` envelope.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request body is not valid JSON")]
    MalformedBody,
    #[error("Invalid format")]
    InvalidFormat,
    #[error("item {0} does not exist")]
    ItemNotFound(i64),
    #[error("method not accepted on this endpoint")]
    MethodNotAccepted,
    #[error("storage failure")]
    Storage(#[from] rusqlite::Error),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            // Wrong method is 400 here, not 405; the endpoint contract
            // treats anything but the creation method as a bad request.
            ApiError::MalformedBody
            | ApiError::InvalidFormat
            | ApiError::MethodNotAccepted => StatusCode::BAD_REQUEST,
            ApiError::ItemNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ApiError::Storage(err) = self {
            tracing::error!("storage failure: {err}");
        }
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_contract() {
        assert_eq!(ApiError::MalformedBody.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::InvalidFormat.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::MethodNotAccepted.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::ItemNotFound(7).status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn not_found_names_the_item() {
        assert_eq!(ApiError::ItemNotFound(999).to_string(), "item 999 does not exist");
    }
}
