// SSE render sink - fans render instructions out to attached projectors
use crate::application::render_sink::RenderSink;
use crate::domain::render::RenderInstruction;
use std::sync::Mutex;
use tokio::sync::broadcast;

/// Fan-out depth per subscriber. A projector that lags this far behind is
/// skipped forward rather than stalling the pipeline.
pub const RENDER_CHANNEL_CAPACITY: usize = 256;

/// Broadcasts every instruction to all subscribed projectors and retains
/// the startup full-replace set so a browser attaching mid-session gets
/// valid surfaces before live patches apply.
pub struct SseRenderSink {
    tx: broadcast::Sender<RenderInstruction>,
    baseline: Mutex<Vec<RenderInstruction>>,
}

impl SseRenderSink {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(RENDER_CHANNEL_CAPACITY);
        Self {
            tx,
            baseline: Mutex::new(Vec::new()),
        }
    }

    /// Baseline replay plus a live receiver. The receiver is taken before
    /// the baseline snapshot so no instruction falls between the two.
    pub fn subscribe(
        &self,
    ) -> (
        Vec<RenderInstruction>,
        broadcast::Receiver<RenderInstruction>,
    ) {
        let rx = self.tx.subscribe();
        let baseline = self.baseline.lock().unwrap().clone();
        (baseline, rx)
    }
}

impl Default for SseRenderSink {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderSink for SseRenderSink {
    fn submit(&self, instruction: RenderInstruction) {
        if matches!(instruction, RenderInstruction::NewPlot { .. }) {
            self.baseline.lock().unwrap().push(instruction.clone());
        }
        // No subscribers yet is fine; instructions before the first
        // projector attaches are only observable through the baseline.
        let _ = self.tx.send(instruction);
    }
}
