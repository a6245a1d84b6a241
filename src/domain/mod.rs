// Domain layer - Metrics, events, series and their validation rules
pub mod clock;
pub mod event;
pub mod metric;
pub mod series;
