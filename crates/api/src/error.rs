use axum::{response::IntoResponse, Json};
use serde::Serialize;
use settle_core::SubmissionError;
use tracing::{error, warn};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: String,
}

#[derive(Debug)]
pub struct ApiError {
    pub error: SubmissionError,
    pub request_id: String,
}

pub trait WithRequestId {
    fn with_request_id(self, request_id: &str) -> ApiError;
}

impl WithRequestId for SubmissionError {
    fn with_request_id(self, request_id: &str) -> ApiError {
        ApiError {
            error: self,
            request_id: request_id.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.error.status_code();
        let message = self.error.to_string();

        match &self.error {
            SubmissionError::InvalidInput(_) => {}
            SubmissionError::Upstream { status: upstream, .. } => {
                warn!(request_id = %self.request_id, upstream = *upstream, "upstream rejected submission");
            }
            SubmissionError::Configuration(_) | SubmissionError::Internal(_) => {
                error!(request_id = %self.request_id, error = %message, "submission failed");
            }
        }

        (
            status,
            Json(ErrorResponse {
                ok: false,
                error: message,
            }),
        )
            .into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::http::StatusCode;

    fn rt() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
    }

    async fn body_json(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let body = to_bytes(response.into_body(), 4096).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[test]
    fn test_with_request_id() {
        let err = SubmissionError::internal("boom").with_request_id("req_123");
        assert_eq!(err.request_id, "req_123");
    }

    #[test]
    fn test_invalid_input_response() {
        rt().block_on(async {
            let (status, json) =
                body_json(SubmissionError::invalid_month().with_request_id("req_001")).await;

            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(json["ok"], false);
            assert_eq!(json["error"], "invalid month");
        });
    }

    #[test]
    fn test_configuration_response() {
        rt().block_on(async {
            let err = SubmissionError::Configuration("SETTLE_WEBHOOK_URL is not configured".into());
            let (status, json) = body_json(err.with_request_id("req_002")).await;

            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(json["ok"], false);
            assert_eq!(json["error"], "SETTLE_WEBHOOK_URL is not configured");
        });
    }

    #[test]
    fn test_upstream_response() {
        rt().block_on(async {
            let err = SubmissionError::Upstream {
                status: 503,
                body: "maintenance".to_string(),
            };
            let (status, json) = body_json(err.with_request_id("req_003")).await;

            assert_eq!(status, StatusCode::BAD_GATEWAY);
            assert_eq!(json["error"], "webhook responded 503. maintenance");
        });
    }

    #[test]
    fn test_internal_response_generic_fallback() {
        rt().block_on(async {
            let (status, json) =
                body_json(SubmissionError::internal("").with_request_id("req_004")).await;

            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(json["error"], "unknown error");
        });
    }
}
