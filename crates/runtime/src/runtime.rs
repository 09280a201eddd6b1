//! High-level runtime orchestrator.
//!
//! The runtime owns the session worker, wires up command/event channels, and
//! exposes a builder-based API for hosts to drive the simulation.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use idle_core::{GameConfig, RandomSource, StdRandom};

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::events::EventBus;
use crate::workers::{Command, SessionWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    /// Period between ticks of a running session.
    pub tick_interval: Duration,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Seed for the worker's RNG; `None` seeds from OS entropy.
    pub rng_seed: Option<u64>,
}

impl RuntimeConfig {
    pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            tick_interval: Self::DEFAULT_TICK_INTERVAL,
            event_buffer_size: 100,
            command_buffer_size: 32,
            rng_seed: None,
        }
    }
}

/// Main runtime that orchestrates the battle simulation
///
/// Design: Runtime owns the worker task.
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Build a runtime with the given configuration and default randomness.
    pub fn start(config: RuntimeConfig) -> Runtime {
        Self::builder().config(config).build()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Shutdown the runtime gracefully
    ///
    /// The worker exits once every handle is dropped, so clones still held
    /// elsewhere keep this waiting.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;

        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    rng: Option<Box<dyn RandomSource>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            rng: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Override the tick period
    pub fn tick_interval(mut self, tick_interval: Duration) -> Self {
        self.config.tick_interval = tick_interval;
        self
    }

    /// Inject a random source, taking precedence over `rng_seed`.
    ///
    /// Tests use this to replay exact exchanges with a scripted source.
    pub fn rng(mut self, rng: impl RandomSource + 'static) -> Self {
        self.rng = Some(Box::new(rng));
        self
    }

    /// Build the runtime and spawn its worker.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn build(self) -> Runtime {
        let rng: Box<dyn RandomSource> = match (self.rng, self.config.rng_seed) {
            (Some(rng), _) => rng,
            (None, Some(seed)) => Box::new(StdRandom::seeded(seed)),
            (None, None) => Box::new(StdRandom::from_entropy()),
        };

        let (command_tx, command_rx) =
            mpsc::channel::<Command>(self.config.command_buffer_size.max(1));
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let handle = RuntimeHandle::new(command_tx, event_bus.clone());

        let worker = SessionWorker::new(
            self.config.game_config,
            self.config.tick_interval,
            rng,
            command_rx,
            event_bus,
        );

        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Runtime {
            handle,
            worker_handle,
        }
    }
}
