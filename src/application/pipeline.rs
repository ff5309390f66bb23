// Telemetry pipeline - decode, format, window, render
use crate::application::render_sink::RenderSink;
use crate::domain::metric::{ALL_METRICS, Metric};
use crate::domain::render::{
    RenderInstruction, display_config, gauge_layout, gauge_trace, gauge_value_update,
    history_data_update, history_layout, history_trace,
};
use crate::domain::series::{SampleCounter, SeriesBuffer, Window};
use crate::domain::telemetry::{DecodeError, TelemetryRecord};
use crate::domain::theme::ChartPalette;
use std::sync::Arc;

/// Turns each inbound message into display-box text, gauge updates and
/// history-chart patches. Owns the four series buffers; all four metrics
/// update together or, on a decode failure, none do.
pub struct TelemetryPipeline {
    buffers: [SeriesBuffer; 4],
    sink: Arc<dyn RenderSink>,
}

impl TelemetryPipeline {
    pub fn new(capacity: usize, counter: SampleCounter, sink: Arc<dyn RenderSink>) -> Self {
        let buffers = [
            SeriesBuffer::new(capacity, counter.clone()),
            SeriesBuffer::new(capacity, counter.clone()),
            SeriesBuffer::new(capacity, counter.clone()),
            SeriesBuffer::new(capacity, counter),
        ];
        Self { buffers, sink }
    }

    /// Startup full-replace of all eight surfaces with empty/zero data.
    pub fn initial_plots(&self, palette: &ChartPalette) {
        for metric in ALL_METRICS {
            self.sink.submit(RenderInstruction::NewPlot {
                surface: metric.history_surface(),
                traces: history_trace(metric),
                layout: history_layout(metric, palette),
                config: display_config(),
            });
        }
        for metric in ALL_METRICS {
            self.sink.submit(RenderInstruction::NewPlot {
                surface: metric.gauge_surface(),
                traces: gauge_trace(metric),
                layout: gauge_layout(),
                config: display_config(),
            });
        }
    }

    /// Process one raw transport payload. The record is decoded in full
    /// before any side effect, so a malformed message touches nothing.
    pub fn on_message(&mut self, raw: &[u8]) -> Result<(), DecodeError> {
        let record = TelemetryRecord::decode(raw)?;

        for metric in ALL_METRICS {
            self.sink.submit(RenderInstruction::SetText {
                element: metric.key(),
                text: record.formatted(metric),
            });
        }

        for metric in ALL_METRICS {
            self.sink.submit(RenderInstruction::Update {
                surface: metric.gauge_surface(),
                data: gauge_value_update(record.rounded(metric)),
            });
        }

        for metric in ALL_METRICS {
            let window = self.buffers[metric.index()].push(record.rounded(metric));
            self.sink.submit(RenderInstruction::Update {
                surface: metric.history_surface(),
                data: history_data_update(&window),
            });
        }

        Ok(())
    }

    pub fn window(&self, metric: Metric) -> Window {
        self.buffers[metric.index()].window()
    }
}
