//! Runtime orchestration for the idle battle simulation.
//!
//! This crate wires a single session worker, its timer, the event bus and the
//! player repositories into a cohesive runtime API. Hosts embed [`Runtime`]
//! to start and stop sessions, subscribe to events, and persist snapshots
//! through [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`workers`] keeps background tasks internal to the crate
//! - [`repository`] provides player persistence adapters for hosts
pub mod api;
pub mod events;
pub mod repository;
pub mod runtime;

mod workers;

pub use api::{HostCommand, Result, RuntimeError, RuntimeHandle};
pub use events::{Event, EventBus, SessionEvent, SessionSnapshot, SessionStatus, Topic};
pub use repository::{FilePlayerRepository, InMemoryPlayerRepo, PlayerRepository, RepositoryError};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
