// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use axum::{
    body::{Body, Bytes},
    extract::{Query, State},
    http::{header, Request, StatusCode},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::engine::Engine;
use crate::errors::EngineError;

pub const WIDTH: usize = pixelcrush_kernel::config::WIDTH;
pub const HEIGHT: usize = pixelcrush_kernel::config::HEIGHT;

pub type ConcreteEngine = Engine<WIDTH, HEIGHT>;
pub type SharedEngine<const W: usize, const H: usize> = Arc<Engine<W, H>>;

pub fn build_router<const W: usize, const H: usize>(state: SharedEngine<W, H>, homepage: String) -> Router {
    Router::new()
        .route("/", get(move || async move { Redirect::to(&homepage) }))
        .route("/place.png", get(place_png::<W, H>))
        .route("/heatmap.png", get(heatmap_png::<W, H>))
        .route("/row_hardness", post(row_hardness::<W, H>))
        .route("/post", post(post_pixels::<W, H>))
        // Admin
        .route("/save", post(save::<W, H>))
        .route("/overwrite_pixel", post(overwrite_pixel::<W, H>))
        // Observability
        .route("/metrics", get(metrics_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
}

/// Span per request. Only the path is recorded: admin routes carry their
/// secret in the query string.
fn request_span(request: &Request<Body>) -> tracing::Span {
    tracing::debug_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
    )
}

#[derive(Deserialize)]
struct AdminParams {
    secret: Option<String>,
}

/// Unparseable or missing secrets authenticate as the empty string.
fn require_admin<const W: usize, const H: usize>(
    engine: &Engine<W, H>,
    params: Option<Query<AdminParams>>,
) -> Result<(), EngineError> {
    let secret = params.and_then(|Query(p)| p.secret).unwrap_or_default();
    if engine.is_admin(&secret) {
        Ok(())
    } else {
        tracing::warn!("Rejected admin request");
        Err(EngineError::NotFound)
    }
}

async fn row_hardness<const W: usize, const H: usize>(
    State(state): State<SharedEngine<W, H>>,
    body: Bytes,
) -> Result<Vec<u8>, EngineError> {
    state.row_hardness(&body)
}

async fn post_pixels<const W: usize, const H: usize>(
    State(state): State<SharedEngine<W, H>>,
    body: Bytes,
) -> Result<Response, EngineError> {
    let outcome = state.submit(&body)?;
    match outcome.conflict_body() {
        None => Ok(StatusCode::OK.into_response()),
        Some(digests) => Ok((StatusCode::CONFLICT, digests).into_response()),
    }
}

async fn save<const W: usize, const H: usize>(
    State(state): State<SharedEngine<W, H>>,
    params: Option<Query<AdminParams>>,
) -> Result<String, EngineError> {
    require_admin(state.as_ref(), params)?;
    let path = tokio::task::spawn_blocking(move || state.save_snapshot())
        .await
        .map_err(|_| EngineError::Internal)??;
    Ok(path.to_string_lossy().to_string())
}

async fn overwrite_pixel<const W: usize, const H: usize>(
    State(state): State<SharedEngine<W, H>>,
    params: Option<Query<AdminParams>>,
    body: Bytes,
) -> Result<StatusCode, EngineError> {
    require_admin(state.as_ref(), params)?;
    state.overwrite_pixel(&body)?;
    Ok(StatusCode::OK)
}

async fn place_png<const W: usize, const H: usize>(
    State(state): State<SharedEngine<W, H>>,
) -> Result<Response, EngineError> {
    let png = tokio::task::spawn_blocking(move || state.place_png())
        .await
        .map_err(|_| EngineError::Internal)??;
    Ok(png_response(png))
}

async fn heatmap_png<const W: usize, const H: usize>(
    State(state): State<SharedEngine<W, H>>,
) -> Result<Response, EngineError> {
    let png = tokio::task::spawn_blocking(move || state.heatmap_png())
        .await
        .map_err(|_| EngineError::Internal)??;
    Ok(png_response(png))
}

fn png_response(png: Arc<[u8]>) -> Response {
    ([(header::CONTENT_TYPE, "image/png")], Bytes::from(png.to_vec())).into_response()
}

async fn metrics_handler() -> String {
    crate::telemetry::get_metrics()
}
