use axum::{extract::State, routing::post, Json, Router};
use tracing::{error, info, instrument, warn};

use super::dto::{CheckResultRequest, CheckResultResponse};
use super::error::RedeemError;
use super::service;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/results/check", post(check_result))
}

/// POST /results/check
///
/// Always answers 200: the outcome travels in the envelope, which is the
/// contract the result-checker frontend was built against. The payload is
/// skipped from the span so the PIN never reaches the logs.
#[instrument(skip(state, payload))]
pub async fn check_result(
    State(state): State<AppState>,
    Json(payload): Json<CheckResultRequest>,
) -> Json<CheckResultResponse> {
    match service::redeem(state.store.as_ref(), &payload.student_id, &payload.pin).await {
        Ok(()) => {
            info!(student_id = %payload.student_id, "result access granted");
            Json(CheckResultResponse {
                success: true,
                student_id: payload.student_id,
                error: None,
            })
        }
        Err(e) => {
            match &e {
                RedeemError::Store(cause) => {
                    error!(error = %cause, "result check failed in the store")
                }
                _ => warn!(student_id = %payload.student_id, reason = %e, "result access denied"),
            }
            Json(CheckResultResponse {
                success: false,
                student_id: payload.student_id,
                error: Some(e.to_string()),
            })
        }
    }
}
