use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{LlmClient, TripPlanner};
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    health_handler, plan_by_voice_handler, transcribe_voice_handler,
};
use crate::presentation::state::AppState;

// Roughly eight minutes of 16 kHz mono 16-bit audio.
const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

pub fn create_router<L, P>(state: AppState<L, P>) -> Router
where
    L: LlmClient + 'static,
    P: TripPlanner + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/api/v1/voice/transcribe",
            post(transcribe_voice_handler::<L, P>),
        )
        .route("/api/v1/voice/plan", post(plan_by_voice_handler::<L, P>))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
