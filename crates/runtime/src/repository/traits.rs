//! Repository contract for host-side player persistence.

use idle_core::PlayerState;

use super::error::Result;

/// Repository for player snapshots keyed by the opaque player id.
///
/// The simulation never touches a repository: the host loads a snapshot
/// before `start` and saves whatever the session reports back. Saving is
/// last-writer-wins.
pub trait PlayerRepository: Send + Sync {
    /// Save (or overwrite) a player snapshot
    fn save(&self, player: &PlayerState) -> Result<()>;

    /// Load a player snapshot by id
    fn load(&self, id: &str) -> Result<Option<PlayerState>>;

    /// Check if a snapshot exists
    fn exists(&self, id: &str) -> bool;

    /// Delete a snapshot. Deleting a missing id is not an error.
    fn delete(&self, id: &str) -> Result<()>;

    /// List all stored player ids, sorted
    fn list_ids(&self) -> Result<Vec<String>> {
        Ok(vec![])
    }

    /// Load the snapshot for `id`, or create and save a fresh character.
    fn load_or_create(&self, id: &str) -> Result<PlayerState> {
        if let Some(player) = self.load(id)? {
            return Ok(player);
        }

        let player = PlayerState::new_character(id);
        self.save(&player)?;
        Ok(player)
    }
}
