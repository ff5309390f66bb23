// Application state for HTTP handlers
use crate::application::theme::ThemeController;
use crate::application::viewport::ViewportController;
use crate::infrastructure::sse::SseRenderSink;
use std::sync::Arc;
use tokio::sync::Mutex;

pub struct AppState {
    pub sink: Arc<SseRenderSink>,
    pub theme: Mutex<ThemeController>,
    pub viewport: ViewportController,
}
