// Render sink seam - where instructions leave the application layer
use crate::domain::render::RenderInstruction;

/// Fire-and-forget submission of a render instruction to whatever
/// projector is attached. Implementations must not block: the pipeline
/// calls this from the transport event loop.
pub trait RenderSink: Send + Sync {
    fn submit(&self, instruction: RenderInstruction);
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::sync::Mutex;

    /// Test double that records every submitted instruction.
    #[derive(Default)]
    pub struct RecordingSink {
        instructions: Mutex<Vec<RenderInstruction>>,
    }

    impl RecordingSink {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn recorded(&self) -> Vec<RenderInstruction> {
            self.instructions.lock().unwrap().clone()
        }

        pub fn take(&self) -> Vec<RenderInstruction> {
            std::mem::take(&mut *self.instructions.lock().unwrap())
        }
    }

    impl RenderSink for RecordingSink {
        fn submit(&self, instruction: RenderInstruction) {
            self.instructions.lock().unwrap().push(instruction);
        }
    }
}
