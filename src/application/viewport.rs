// Viewport controller - resizes history charts across the width breakpoint
use crate::application::render_sink::RenderSink;
use crate::domain::metric::ALL_METRICS;
use crate::domain::render::{RenderInstruction, viewport_relayout};
use std::sync::Arc;

/// Width threshold separating narrow and wide layouts.
pub const NARROW_BREAKPOINT: u32 = 600;

const NARROW_SIZE: (u32, u32) = (323, 250);
const WIDE_SIZE: (u32, u32) = (550, 260);

/// Pushes the fixed size pair for the active breakpoint to the four
/// history surfaces. Gauges keep their own fixed layout.
#[derive(Clone)]
pub struct ViewportController {
    sink: Arc<dyn RenderSink>,
}

impl ViewportController {
    pub fn new(sink: Arc<dyn RenderSink>) -> Self {
        Self { sink }
    }

    pub fn on_width(&self, width: u32) {
        self.on_breakpoint_change(width <= NARROW_BREAKPOINT);
    }

    pub fn on_breakpoint_change(&self, is_narrow: bool) {
        let (width, height) = if is_narrow { NARROW_SIZE } else { WIDE_SIZE };
        tracing::debug!("viewport breakpoint change, narrow={}", is_narrow);
        for metric in ALL_METRICS {
            self.sink.submit(RenderInstruction::Relayout {
                surface: metric.history_surface(),
                layout: viewport_relayout(width, height),
            });
        }
    }
}
