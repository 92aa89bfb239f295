//! Server error types

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pricer_core::types::PricingError;
use pricer_models::instruments::InstrumentError;
use serde_json::json;
use thiserror::Error;

/// Server-specific errors
#[derive(Error, Debug)]
pub enum ServerError {
    /// Request failed boundary validation
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Pricing produced an unusable result
    #[error("Pricing error: {0}")]
    Pricing(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServerError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Pricing(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<PricingError> for ServerError {
    fn from(err: PricingError) -> Self {
        match err {
            PricingError::InvalidInput(msg) => ServerError::InvalidRequest(msg),
            PricingError::NumericalInstability(msg) => ServerError::Pricing(msg),
        }
    }
}

impl From<InstrumentError> for ServerError {
    fn from(err: InstrumentError) -> Self {
        ServerError::InvalidRequest(err.to_string())
    }
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        ServerError::InvalidRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ServerError {
    fn from(rejection: QueryRejection) -> Self {
        ServerError::InvalidRequest(rejection.body_text())
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ServerError::InvalidRequest(msg)
            | ServerError::Pricing(msg)
            | ServerError::Internal(msg) => msg.clone(),
        };

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %message, "Request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %message, "Request rejected");
        }

        let body = Json(json!({
            "error": message,
            "code": status.as_u16()
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ServerError::InvalidRequest("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServerError::Pricing("x".into()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ServerError::Internal("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_from_pricing_error() {
        let err: ServerError = PricingError::InvalidInput("bad spot".into()).into();
        assert!(matches!(err, ServerError::InvalidRequest(ref m) if m == "bad spot"));

        let err: ServerError = PricingError::NumericalInstability("nan".into()).into();
        assert!(matches!(err, ServerError::Pricing(_)));
    }

    #[test]
    fn test_from_instrument_error() {
        let err: ServerError = InstrumentError::UnknownOptionType("FOO".into()).into();
        match err {
            ServerError::InvalidRequest(msg) => assert!(msg.contains("FOO")),
            other => panic!("Expected InvalidRequest, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_into_response_body() {
        let response = ServerError::Pricing("non-finite price".into()).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "non-finite price");
        assert_eq!(json["code"], 422);
    }
}
