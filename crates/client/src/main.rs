//! Idle dungeon host binary.
//!
//! Composition root for a headless battle: it reads configuration from the
//! environment, loads (or creates) the player from the save directory, runs
//! one session on the runtime, prints the narration to stdout, and saves the
//! snapshot periodically, on death, and on Ctrl-C.
//!
//! # Examples
//!
//! ```bash
//! IDLE_STAGE=5 IDLE_SEED=7 cargo run -p idle-client
//! RUST_LOG=runtime::session=debug IDLE_MAX_TICKS=20 cargo run -p idle-client
//! ```

mod config;
mod host;

use anyhow::Result;

use config::ClientConfig;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    setup_logging();

    let config = ClientConfig::from_env();
    tracing::info!(
        user = %config.user_id,
        stage = config.stage,
        tick_ms = config.tick_interval.as_millis() as u64,
        stat_mode = config.stat_resolution.as_str(),
        "Starting idle dungeon host"
    );

    host::run(config).await?;

    tracing::info!("Host shutdown complete");
    Ok(())
}

fn setup_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
