// Theme controller - style-only restyling of every chart surface
use crate::application::render_sink::RenderSink;
use crate::domain::metric::ALL_METRICS;
use crate::domain::render::{RenderInstruction, palette_relayout};
use crate::domain::theme::ThemeMode;
use std::sync::Arc;

/// Flips the display mode and pushes the active palette to all eight
/// surfaces. Orthogonal to the data pipeline: never touches trace data.
pub struct ThemeController {
    mode: ThemeMode,
    sink: Arc<dyn RenderSink>,
}

impl ThemeController {
    pub fn new(sink: Arc<dyn RenderSink>) -> Self {
        Self {
            mode: ThemeMode::default(),
            sink,
        }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn toggle(&mut self) -> ThemeMode {
        self.mode = self.mode.toggled();
        let palette = self.mode.palette();
        tracing::debug!("theme toggled to {}", self.mode.name());

        for metric in ALL_METRICS {
            self.sink.submit(RenderInstruction::Relayout {
                surface: metric.history_surface(),
                layout: palette_relayout(&palette),
            });
        }
        for metric in ALL_METRICS {
            self.sink.submit(RenderInstruction::Relayout {
                surface: metric.gauge_surface(),
                layout: palette_relayout(&palette),
            });
        }

        self.mode
    }
}
