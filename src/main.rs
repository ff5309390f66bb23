// Main entry point - dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::application::pipeline::TelemetryPipeline;
use crate::application::render_sink::RenderSink;
use crate::application::session::DashboardSession;
use crate::application::theme::ThemeController;
use crate::application::viewport::ViewportController;
use crate::domain::series::{DEFAULT_WINDOW_CAPACITY, SampleCounter};
use crate::infrastructure::config::{HttpConnectionSource, load_settings};
use crate::infrastructure::mqtt::MqttFeed;
use crate::infrastructure::sse::SseRenderSink;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{health_check, report_viewport, stream_events, toggle_theme};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load configuration
    let settings = load_settings()?;
    let capacity = settings.window.capacity.unwrap_or(DEFAULT_WINDOW_CAPACITY);

    // Render sink shared by the pipeline, controllers and HTTP layer
    let sink = Arc::new(SseRenderSink::new());
    let render_sink: Arc<dyn RenderSink> = sink.clone();

    // Telemetry session (application layer)
    let pipeline = TelemetryPipeline::new(capacity, SampleCounter::new(), render_sink.clone());
    let session = DashboardSession::new(pipeline, render_sink.clone());
    let source = Arc::new(HttpConnectionSource::new(
        settings.connection.details_url.clone(),
    ));
    let feed = Arc::new(MqttFeed::new());
    tokio::spawn(async move {
        if let Err(e) = session.run(source, feed).await {
            tracing::error!("dashboard session ended with error: {:#}", e);
        }
    });

    // Application state for the HTTP layer
    let state = Arc::new(AppState {
        sink,
        theme: tokio::sync::Mutex::new(ThemeController::new(render_sink.clone())),
        viewport: ViewportController::new(render_sink),
    });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/events", get(stream_events))
        .route("/theme/toggle", post(toggle_theme))
        .route("/viewport", post(report_viewport))
        .with_state(state)
        .fallback_service(ServeDir::new("static"))
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr: SocketAddr = settings
        .http
        .bind
        .parse()
        .context("invalid http bind address")?;
    tracing::info!("Starting sensor-dashboard on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
