//! Logical time for the dashboard simulation.
//!
//! Stores never sleep. They schedule completions on a [`timer::TimerQueue`]
//! and the caller advances a [`time::Tick`] to fire them.

pub mod jitter;
pub mod time;
pub mod timer;

pub use jitter::{FixedJitter, HashJitter, Jitter};
pub use time::{ticks_for, Tick, TICK_MS};
pub use timer::{TimerId, TimerQueue};
