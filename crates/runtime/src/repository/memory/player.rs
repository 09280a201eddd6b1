//! In-memory PlayerRepository implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use idle_core::PlayerState;

use crate::repository::{PlayerRepository, RepositoryError, Result};

/// In-memory implementation of PlayerRepository.
pub struct InMemoryPlayerRepo {
    players: RwLock<HashMap<String, PlayerState>>,
}

impl InMemoryPlayerRepo {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            players: RwLock::new(HashMap::new()),
        }
    }

    /// Create pre-populated with the given snapshots.
    pub fn with_players(players: impl IntoIterator<Item = PlayerState>) -> Self {
        let players = players
            .into_iter()
            .map(|player| (player.id.clone(), player))
            .collect();
        Self {
            players: RwLock::new(players),
        }
    }
}

impl Default for InMemoryPlayerRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerRepository for InMemoryPlayerRepo {
    fn save(&self, player: &PlayerState) -> Result<()> {
        let mut players = self
            .players
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        players.insert(player.id.clone(), player.clone());
        Ok(())
    }

    fn load(&self, id: &str) -> Result<Option<PlayerState>> {
        let players = self
            .players
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(players.get(id).cloned())
    }

    fn exists(&self, id: &str) -> bool {
        self.players
            .read()
            .map(|players| players.contains_key(id))
            .unwrap_or(false)
    }

    fn delete(&self, id: &str) -> Result<()> {
        let mut players = self
            .players
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        players.remove(id);
        Ok(())
    }

    fn list_ids(&self) -> Result<Vec<String>> {
        let players = self
            .players
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let mut ids: Vec<String> = players.keys().cloned().collect();
        ids.sort_unstable();
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_overwrites_by_id() {
        let repo = InMemoryPlayerRepo::new();
        let mut player = PlayerState::new_character("alice");

        repo.save(&player).unwrap();
        player.gold = 500;
        repo.save(&player).unwrap();

        assert_eq!(repo.load("alice").unwrap().map(|p| p.gold), Some(500));
        assert_eq!(repo.list_ids().unwrap(), vec!["alice".to_string()]);
    }

    #[test]
    fn load_or_create_seeds_new_character() {
        let repo = InMemoryPlayerRepo::with_players([PlayerState::new_character("bob")]);

        let created = repo.load_or_create("carol").unwrap();

        assert_eq!(created, PlayerState::new_character("carol"));
        assert!(repo.exists("carol"));
        assert_eq!(
            repo.list_ids().unwrap(),
            vec!["bob".to_string(), "carol".to_string()]
        );

        repo.delete("bob").unwrap();
        repo.delete("bob").unwrap();
        assert!(!repo.exists("bob"));
    }
}
