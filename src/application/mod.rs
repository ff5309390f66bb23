// Application layer - dashboard use cases and seams
pub mod pipeline;
pub mod render_sink;
pub mod session;
pub mod theme;
pub mod viewport;
