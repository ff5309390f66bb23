// Domain layer - pure dashboard data and logic
pub mod metric;
pub mod render;
pub mod series;
pub mod telemetry;
pub mod theme;
