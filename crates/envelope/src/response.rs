use crate::envelope::ResultEnvelope;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::warn;

/// Responds with the envelope as the JSON body. Codes that are not
/// representable as an HTTP status are sent as 500; the body keeps the
/// original code.
impl<T: Serialize> IntoResponse for ResultEnvelope<T> {
    fn into_response(self) -> Response {
        let status = self.status().unwrap_or_else(|| {
            warn!(id = %self.id(), code = self.code(), "Envelope code is not an HTTP status");
            StatusCode::INTERNAL_SERVER_ERROR
        });
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn test_envelope_code_becomes_response_status() {
        let envelope: ResultEnvelope<()> = ResultEnvelope::from_status(404);
        let response = envelope.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_out_of_range_code_is_sent_as_500() {
        let envelope = ResultEnvelope::from_success_with_code("x", 42);
        let id = envelope.id();
        let response = envelope.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let parsed: ResultEnvelope<String> = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed.code(), 42);
        assert_eq!(parsed.id(), id);
    }
}
