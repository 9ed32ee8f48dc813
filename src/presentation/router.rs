use std::any::Any;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::Request;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{FileLoader, LlmClient};
use crate::infrastructure::observability::{
    propagate_request_id_layer, request_id_of, set_request_id_layer,
};
use crate::presentation::handlers::{ApiError, analyze_handler, health_handler};
use crate::presentation::state::AppState;

pub fn create_router<F, L>(state: AppState<F, L>) -> Router
where
    F: FileLoader + ?Sized + 'static,
    L: LlmClient + ?Sized + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods(AnyOrigin)
        .allow_headers(AnyOrigin);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<_>| {
            tracing::info_span!(
                "request",
                request_id = %request_id_of(request),
                method = %request.method(),
                uri = %request.uri().path(),
            )
        })
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let max_upload_bytes = state.max_upload_bytes;

    // Layers run bottom-up: the request id must exist before the trace span is made.
    Router::new()
        .route("/analyze", post(analyze_handler::<F, L>))
        .route("/health", get(health_handler::<F, L>))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(propagate_request_id_layer())
        .layer(trace_layer)
        .layer(set_request_id_layer())
        .layer(cors)
        .with_state(state)
}

fn panic_response(_panic: Box<dyn Any + Send + 'static>) -> Response {
    ApiError::Internal.into_response()
}
