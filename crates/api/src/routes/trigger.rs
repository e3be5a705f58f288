use axum::{
    body::Bytes,
    extract::State,
    http::HeaderMap,
    routing::post,
    Extension, Json, Router,
};
use settle_core::types::SubmissionReceipt;
use tracing::info;

use crate::{
    error::{ApiResult, WithRequestId},
    state::{AppState, RequestId},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/trigger", post(trigger))
        .with_state(state)
}

/// Takes the raw body so malformed JSON surfaces as an internal error with
/// the parser message instead of axum's rejection.
pub async fn trigger(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Json<SubmissionReceipt>> {
    let receipt = settle_core::submit(&state.settings, &state.webhook, &headers, &body)
        .await
        .map_err(|err| err.with_request_id(&request_id.0))?;

    info!(
        request_id = %request_id.0,
        month = receipt.month,
        year = receipt.year,
        "submission forwarded"
    );

    Ok(Json(receipt))
}
