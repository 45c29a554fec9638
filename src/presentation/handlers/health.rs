use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::application::ports::{Classifier, LabelDecoder};
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub model_loaded: bool,
}

pub async fn health_handler<C, D>(State(state): State<AppState<C, D>>) -> impl IntoResponse
where
    C: Classifier,
    D: LabelDecoder,
{
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            model_loaded: state.categorization_service.is_ready(),
        }),
    )
}
