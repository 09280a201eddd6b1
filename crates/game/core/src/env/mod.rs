//! Environment collaborators the engine consumes but does not own.
//!
//! Currently this is only the randomness source; keeping it behind a trait
//! lets the runtime pick a seeded generator and lets tests script every roll.
mod rng;

pub use rng::{RandomSource, ScriptedRandom, StdRandom};
