//! Terminal memory-matching card game.
//!
//! A player flips pairs of face-down cards, scores for matches, loses points
//! for mismatches, and races an optional countdown. The interesting part is
//! the game-session engine in [`core`]: deck construction with thematic
//! fallback, the timed flip-resolution protocol, the countdown clock, hints,
//! and save/resume of in-progress rounds.
//!
//! # Module Structure
//!
//! - [`core`]: deck builder, catalogs, RNG, and the session engine
//! - [`storage`]: key-value persistence capability and typed preferences
//! - [`input`]: keyboard → UI action mapping
//! - [`term`]: crossterm screen handling and the pure snapshot view
//! - [`types`]: shared data types and gameplay constants

pub mod core;
pub mod input;
pub mod storage;
pub mod term;
pub mod types;
