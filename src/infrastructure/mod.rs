// Infrastructure layer - external collaborators and adapters
pub mod config;
pub mod mqtt;
pub mod sse;
