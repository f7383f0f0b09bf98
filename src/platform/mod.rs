//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (wall clock for elapsed-time summaries)
//! - Tick sources (interval timers owned by the engine)
//! - The JS-facing game wrapper (web only)

pub mod scheduler;
pub mod time;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use scheduler::{ManualScheduler, TickHandle, TickSchedule, TickScheduler};
pub use time::{Clock, ManualClock, SystemClock};
