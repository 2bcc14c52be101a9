//! Terminal frontend
//!
//! A small, game-oriented rendering layer: `view` maps an engine snapshot
//! into styled text lines (pure, unit-testable), `screen` flushes those lines
//! to a raw-mode terminal. The memory grid is small, so every frame is a full
//! redraw; no diffing.

pub mod screen;
pub mod view;

pub use screen::Screen;
pub use view::{render, Line, Overlay, Span, TextStyle, UiState, GRID_COLS};
