// Presentation layer - HTTP surface for the browser projector
pub mod app_state;
pub mod handlers;
