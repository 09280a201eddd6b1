//! Topic-based event bus for runtime events.
//!
//! Combat narration and session lifecycle are published to separate topics so
//! a host that only persists snapshots never has to filter out log lines.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{SessionEvent, SessionSnapshot, SessionStatus};
