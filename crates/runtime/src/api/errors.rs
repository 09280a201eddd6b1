//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, repositories and rejected state
//! so clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use idle_core::StateError;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("session worker command channel closed")]
    CommandChannelClosed,

    #[error("session worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("session worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("invalid session state: {0}")]
    InvalidState(#[from] StateError),

    #[error("malformed host command")]
    MalformedCommand(#[source] serde_json::Error),
}
