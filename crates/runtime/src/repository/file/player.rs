//! File-based PlayerRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use idle_core::PlayerState;

use crate::repository::{PlayerRepository, RepositoryError, Result};

const FILE_PREFIX: &str = "player_";
const FILE_SUFFIX: &str = ".json";

/// File-based implementation of PlayerRepository.
///
/// # File Format
///
/// Each player is stored as `player_{id}.json` (pretty-printed JSON, the same
/// shape hosts exchange over the wire). Writes go to a temp file first and
/// are renamed into place, so a crash mid-save never leaves a torn snapshot.
pub struct FilePlayerRepository {
    base_dir: PathBuf,
}

impl FilePlayerRepository {
    /// Create a new file-based player repository, creating `base_dir` if needed.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to a player file.
    ///
    /// Ids end up in file names, so anything but ASCII alphanumerics, `-`
    /// and `_` is rejected.
    fn player_path(&self, id: &str) -> Result<PathBuf> {
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(RepositoryError::InvalidId(id.to_string()));
        }

        Ok(self.base_dir.join(format!("{FILE_PREFIX}{id}{FILE_SUFFIX}")))
    }
}

impl PlayerRepository for FilePlayerRepository {
    fn save(&self, player: &PlayerState) -> Result<()> {
        let path = self.player_path(&player.id)?;
        let temp_path = path.with_extension("json.tmp");

        let bytes = serde_json::to_vec_pretty(player)?;

        // Write to temp file
        fs::write(&temp_path, bytes)?;

        // Atomic rename
        fs::rename(&temp_path, &path)?;

        tracing::debug!(
            target: "runtime::repository",
            player = %player.id,
            "Saved player to {}",
            path.display()
        );

        Ok(())
    }

    fn load(&self, id: &str) -> Result<Option<PlayerState>> {
        let path = self.player_path(id)?;

        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path)?;
        let player: PlayerState = serde_json::from_slice(&bytes)?;

        tracing::debug!(
            target: "runtime::repository",
            player = %id,
            "Loaded player from {}",
            path.display()
        );

        Ok(Some(player))
    }

    fn exists(&self, id: &str) -> bool {
        self.player_path(id)
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    fn delete(&self, id: &str) -> Result<()> {
        let path = self.player_path(id)?;

        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!(target: "runtime::repository", player = %id, "Deleted player");
        }

        Ok(())
    }

    fn list_ids(&self) -> Result<Vec<String>> {
        let mut ids = Vec::new();

        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();

            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(id) = filename
                    .strip_prefix(FILE_PREFIX)
                    .and_then(|s| s.strip_suffix(FILE_SUFFIX))
                && !id.is_empty()
            {
                ids.push(id.to_string());
            }
        }

        ids.sort_unstable();
        Ok(ids)
    }
}
