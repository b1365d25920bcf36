//! Core types: event views, event times, tracing setup

pub mod event;
pub mod time;
pub mod tracing;

pub use event::{EventView, EventViewError, NO_TITLE};
pub use time::EventTime;
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
