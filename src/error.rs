// src/error.rs
use crate::models::contact::FieldErrors;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::de::DeserializeOwned;
use serde_json::json;

pub const INVALID_BODY: &str = "Invalid request body";

/// Errors as the browser sees them. Downstream causes are logged where they
/// happen and never carried in here.
#[derive(Debug, PartialEq)]
pub enum ApiError {
    InvalidBody,
    Validation(FieldErrors),
    BadRequest(&'static str),
    Internal(&'static str),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InvalidBody => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": INVALID_BODY }))).into_response()
            }
            ApiError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "errors": errors }))).into_response()
            }
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            ApiError::Internal(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": message }))).into_response()
            }
        }
    }
}

/// Decodes a JSON request body. Empty, malformed or mistyped bodies all map to
/// the same generic 400.
pub fn parse_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!("Rejected request body: {}", e);
        ApiError::InvalidBody
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::contact::ContactPayload;

    #[test]
    fn test_parse_json_rejects_bad_bodies() {
        let bodies: [&[u8]; 5] = [b"", b"{", b"[]", b"null", b"{\"name\": 5}"];
        for body in bodies {
            assert_eq!(parse_json::<ContactPayload>(body).unwrap_err(), ApiError::InvalidBody);
        }
        assert!(parse_json::<ContactPayload>(b"{}").is_ok());
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::InvalidBody.into_response().status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::Validation(FieldErrors::new()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Internal("boom").into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
