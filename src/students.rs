use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tracing::{error, instrument};

use crate::state::AppState;

/// Public part of a student record returned to clients.
#[derive(Debug, Serialize)]
pub struct PublicStudent {
    pub id: String,
    pub name: String,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/students/:id", get(get_student))
}

#[instrument(skip(state))]
pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PublicStudent>, (StatusCode, String)> {
    match state.store.find_student(&id).await {
        Ok(Some(student)) => Ok(Json(PublicStudent {
            id: student.id,
            name: student.name,
        })),
        Ok(None) => Err((StatusCode::NOT_FOUND, "Student not found".into())),
        Err(e) => {
            error!(error = %e, student_id = %id, "find_student failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Student lookup failed".into(),
            ))
        }
    }
}
