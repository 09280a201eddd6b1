//! Repository layer for host-owned player data
//!
//! Player snapshots are the only data that outlives a session. The worker
//! never calls a repository; hosts load before `start` and save on `Update`,
//! `Dead` and shutdown.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FilePlayerRepository;
pub use memory::InMemoryPlayerRepo;
pub use traits::PlayerRepository;
