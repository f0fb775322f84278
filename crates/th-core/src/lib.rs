//! th-core: Core game logic for the treasure hunt board game
//!
//! This crate contains all game logic with no I/O dependencies.
//! It is designed to be pure and testable: the frontend feeds it parsed
//! commands and renders the snapshots it returns.

pub mod board;
pub mod command;
pub mod game;
pub mod treasure;

mod rng;

pub use board::{Board, BoardError, Cell, CellKind};
pub use command::{Command, CommandError, Direction};
pub use game::{
    DirectionLocks, GameConfig, GameMode, GameState, GameStatus, Session, TreasureCheck,
    TurnReport,
};
pub use rng::GameRng;
pub use treasure::NoCandidates;
