//! Worker tasks that back the runtime orchestration.
//!
//! The session worker owns the battle session and its timer. Hosts never see
//! it directly; they talk to it through [`crate::RuntimeHandle`].

mod session;

pub use session::{Command, SessionWorker};
