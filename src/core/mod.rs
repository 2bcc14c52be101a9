//! Core module - game rules, state management, and session logic
//!
//! Everything here is deterministic and terminal-free: the engine is driven
//! by explicit `tick(elapsed_ms)` calls and persists through the injected
//! store, so the whole module is testable without I/O or real time.

pub mod catalog;
pub mod deck;
pub mod engine;
pub mod rng;
pub mod session;
pub mod snapshot;

pub use catalog::{difficulty_config, DifficultyConfig, MAX_TOTAL_PAIRS};
pub use deck::build_deck;
pub use engine::{GameEngine, GameEvent};
pub use rng::SimpleRng;
pub use session::{PersistedSession, SessionSummary};
pub use snapshot::GameSnapshot;
