//! th-tui: Terminal UI layer using ratatui
//!
//! Provides the terminal interface for the game.

pub mod app;
pub mod widgets;

pub use app::{App, UiMode};
