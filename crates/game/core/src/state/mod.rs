//! Player-side state handed to the simulation by the host.
mod player;
mod potion;

pub use player::PlayerState;
pub use potion::{PotionInventory, PotionTier};
