use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{Classifier, LabelDecoder};
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    data_categorizer_handler, health_handler, menu_handler, name_assign_handler, upload_handler,
};
use crate::presentation::state::AppState;

pub fn create_router<C, D>(state: AppState<C, D>) -> Router
where
    C: Classifier + 'static,
    D: LabelDecoder + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/", get(menu_handler))
        .route("/data-categorizer", get(data_categorizer_handler))
        .route("/name-assign", get(name_assign_handler))
        .route("/health", get(health_handler::<C, D>))
        .route("/upload", post(upload_handler::<C, D>))
        .layer(DefaultBodyLimit::max(state.settings.upload.max_upload_bytes))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
