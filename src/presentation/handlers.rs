// HTTP request handlers
use crate::domain::render::RenderInstruction;
use crate::presentation::app_state::AppState;
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::Stream;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Stream render instructions to an attaching projector: the retained
/// startup plots first, then everything live.
pub async fn stream_events(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let (baseline, mut rx) = state.sink.subscribe();

    let stream = async_stream::stream! {
        for instruction in baseline {
            yield Ok::<_, Infallible>(render_event(&instruction));
        }
        loop {
            match rx.recv().await {
                Ok(instruction) => yield Ok(render_event(&instruction)),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!("projector lagged, skipped {} instructions", skipped);
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}

fn render_event(instruction: &RenderInstruction) -> Event {
    match Event::default().event("render").json_data(instruction) {
        Ok(event) => event,
        Err(e) => {
            tracing::error!("failed to serialize render instruction: {}", e);
            Event::default().event("render")
        }
    }
}

#[derive(Serialize)]
pub struct ThemeResponse {
    pub mode: &'static str,
}

/// Flip the display theme and restyle every chart surface
pub async fn toggle_theme(State(state): State<Arc<AppState>>) -> Json<ThemeResponse> {
    let mode = state.theme.lock().await.toggle();
    Json(ThemeResponse { mode: mode.name() })
}

#[derive(Deserialize)]
pub struct ViewportReport {
    pub width: u32,
}

/// Browser-reported viewport width; the breakpoint is applied server-side
pub async fn report_viewport(
    State(state): State<Arc<AppState>>,
    Json(report): Json<ViewportReport>,
) -> StatusCode {
    state.viewport.on_width(report.width);
    StatusCode::NO_CONTENT
}
