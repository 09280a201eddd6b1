//! Host configuration structures and loaders.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use idle_core::{GameConfig, StatResolution};
use idle_runtime::RuntimeConfig;

/// Configuration for one headless battle host.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Player id, also the save file key.
    pub user_id: String,
    pub stage: u32,
    pub tick_interval: Duration,
    pub rng_seed: Option<u64>,
    pub stat_resolution: StatResolution,
    pub save_dir: PathBuf,
    /// Save every N ticks; `None` saves only on death and shutdown.
    pub autosave_ticks: Option<u64>,
    /// Stop after N ticks; `None` runs until interrupted or dead.
    pub max_ticks: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_id: "local-player".to_string(),
            stage: 1,
            tick_interval: RuntimeConfig::DEFAULT_TICK_INTERVAL,
            rng_seed: None,
            stat_resolution: StatResolution::default(),
            save_dir: default_save_dir(),
            autosave_ticks: Some(10),
            max_ticks: None,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `IDLE_USER_ID` - Player id / save key (default: local-player)
    /// - `IDLE_STAGE` - Dungeon stage, at least 1 (default: 1)
    /// - `IDLE_TICK_MS` - Milliseconds between ticks (default: 1000)
    /// - `IDLE_SEED` - RNG seed for reproducible runs (default: entropy)
    /// - `IDLE_STAT_MODE` - `equipment` or `raw` (default: equipment)
    /// - `IDLE_SAVE_DIR` - Directory for save data (default: platform-specific)
    /// - `IDLE_AUTOSAVE_TICKS` - Ticks between saves, 0 disables (default: 10)
    /// - `IDLE_MAX_TICKS` - Stop after this many ticks (default: unlimited)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Self::from_env`] over an arbitrary key lookup.
    ///
    /// Unparsable values fall back to the default for that key.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).map(|value| value.trim().to_string());
        let parse = |key: &str| read(key).and_then(|value| value.parse::<u64>().ok());

        let mut config = Self::default();

        if let Some(user_id) = read("IDLE_USER_ID").filter(|id| !id.is_empty()) {
            config.user_id = user_id;
        }

        if let Some(stage) = read("IDLE_STAGE").and_then(|value| value.parse::<u32>().ok()) {
            config.stage = stage.max(1);
        }

        if let Some(ms) = parse("IDLE_TICK_MS") {
            config.tick_interval = Duration::from_millis(ms.max(1));
        }

        config.rng_seed = parse("IDLE_SEED");

        if let Some(mode) = read("IDLE_STAT_MODE") {
            match mode.parse() {
                Ok(resolution) => config.stat_resolution = resolution,
                Err(error) => tracing::warn!("Ignoring IDLE_STAT_MODE: {error}"),
            }
        }

        if let Some(dir) = read("IDLE_SAVE_DIR").filter(|dir| !dir.is_empty()) {
            config.save_dir = PathBuf::from(dir);
        }

        if let Some(ticks) = parse("IDLE_AUTOSAVE_TICKS") {
            config.autosave_ticks = (ticks > 0).then_some(ticks);
        }

        config.max_ticks = parse("IDLE_MAX_TICKS").filter(|ticks| *ticks > 0);

        config
    }

    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            game_config: GameConfig::with_stat_resolution(self.stat_resolution),
            tick_interval: self.tick_interval,
            rng_seed: self.rng_seed,
            ..RuntimeConfig::default()
        }
    }
}

/// Platform data directory for save files.
///
/// - macOS: `~/Library/Application Support/idle-dungeon/players`
/// - Linux: `~/.local/share/idle-dungeon/players`
/// - Fallback: `./save_data/players`
pub fn default_save_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "idle-dungeon")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./save_data"))
        .join("players")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> ClientConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ClientConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = config_from(&[]);

        assert_eq!(config.user_id, "local-player");
        assert_eq!(config.stage, 1);
        assert_eq!(config.tick_interval, Duration::from_secs(1));
        assert_eq!(config.autosave_ticks, Some(10));
        assert_eq!(config.max_ticks, None);
        assert_eq!(config.rng_seed, None);
        assert!(config.save_dir.ends_with("players"));
    }

    #[test]
    fn variables_override_defaults() {
        let config = config_from(&[
            ("IDLE_USER_ID", "alice"),
            ("IDLE_STAGE", "12"),
            ("IDLE_TICK_MS", "250"),
            ("IDLE_SEED", "42"),
            ("IDLE_STAT_MODE", "raw"),
            ("IDLE_SAVE_DIR", "/tmp/idle"),
            ("IDLE_AUTOSAVE_TICKS", "0"),
            ("IDLE_MAX_TICKS", "30"),
        ]);

        assert_eq!(config.user_id, "alice");
        assert_eq!(config.stage, 12);
        assert_eq!(config.tick_interval, Duration::from_millis(250));
        assert_eq!(config.rng_seed, Some(42));
        assert_eq!(config.stat_resolution, StatResolution::Raw);
        assert_eq!(config.save_dir, PathBuf::from("/tmp/idle"));
        assert_eq!(config.autosave_ticks, None);
        assert_eq!(config.max_ticks, Some(30));

        let runtime = config.runtime_config();
        assert_eq!(runtime.game_config.stat_resolution, StatResolution::Raw);
        assert_eq!(runtime.rng_seed, Some(42));
        assert_eq!(runtime.event_buffer_size, 100);
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = config_from(&[
            ("IDLE_STAGE", "0"),
            ("IDLE_TICK_MS", "fast"),
            ("IDLE_STAT_MODE", "sideways"),
        ]);

        assert_eq!(config.stage, 1);
        assert_eq!(config.tick_interval, Duration::from_secs(1));
        assert_eq!(config.stat_resolution, StatResolution::Equipment);
    }
}
