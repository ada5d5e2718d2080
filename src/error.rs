use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use foodgram_shared::Error;
use serde_json::{Map, Value, json};
use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

/// Everything a handler can fail with, rendered as a JSON body.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] Error),

    #[error(transparent)]
    Json(#[from] JsonRejection),
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;

fn detail(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "detail": message.into() }))).into_response()
}

/// Flattens validator output into `{"field": ["message", ...]}`. Nested
/// struct and list errors are reported against their parent field.
fn field_errors(errors: &ValidationErrors) -> Map<String, Value> {
    let mut body = Map::new();

    for (field, kind) in errors.errors() {
        let messages = match kind {
            ValidationErrorsKind::Field(errors) => errors
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value ({}).", e.code))
                })
                .collect(),
            ValidationErrorsKind::Struct(_) | ValidationErrorsKind::List(_) => {
                vec!["Invalid value.".to_owned()]
            }
        };

        body.insert(field.to_string(), json!(messages));
    }

    body
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error = match self {
            AppError::Json(rejection) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "non_field_errors": [rejection.body_text()] })),
                )
                    .into_response();
            }
            AppError::Domain(error) => error,
        };

        match error {
            Error::Validate(errors) => {
                (StatusCode::BAD_REQUEST, Json(Value::Object(field_errors(&errors)))).into_response()
            }
            Error::Field { field, message } => {
                (StatusCode::BAD_REQUEST, Json(json!({ field: [message] }))).into_response()
            }
            Error::Duplicate(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "errors": message }))).into_response()
            }
            Error::Missing(message) => {
                (StatusCode::NOT_FOUND, Json(json!({ "errors": message }))).into_response()
            }
            Error::NotFound(message) => detail(StatusCode::NOT_FOUND, message),
            Error::Unauthorized(message) => detail(StatusCode::UNAUTHORIZED, message),
            Error::Forbidden => detail(StatusCode::FORBIDDEN, Error::Forbidden.to_string()),
            Error::Unknown(e) => {
                tracing::error!("Internal error: {e:?}");
                detail(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred. Please try again later.",
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn respond(error: Error) -> (StatusCode, Value) {
        let response = AppError::from(error).into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();

        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_field_error_is_a_list() {
        let (status, body) = respond(Error::field("tags", "This list may not be empty.")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "tags": ["This list may not be empty."] }));
    }

    #[tokio::test]
    async fn test_relation_errors() {
        let (status, body) = respond(Error::Duplicate("already".to_owned())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "errors": "already" }));

        let (status, body) = respond(Error::Missing("gone".to_owned())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "errors": "gone" }));
    }

    #[tokio::test]
    async fn test_internal_error_hides_details() {
        let (status, body) = respond(Error::Unknown(anyhow::anyhow!("disk on fire"))).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body["detail"].as_str().unwrap().contains("disk"));
    }
}
