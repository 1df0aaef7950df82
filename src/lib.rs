//! # Delve
//!
//! A text dungeon crawler built on a lazily generated graph of rooms.
//!
//! ## Architecture Overview
//!
//! The dungeon starts as a single room and grows as the player opens doors.
//! Each room has between two and eight doors; door 0 always leads back the way
//! the player came. Most rooms are guarded by a task (a short text or an
//! arithmetic question). Solving it lets the player in and may pay out a
//! reward, failing it sends them back.
//!
//! - **Game**: rooms, tasks, rewards, the bounded inventory, crafting and the
//!   player's turn state machine
//! - **Generation**: the room graph, its seeded random source and the default
//!   task and reward factories
//! - **Persistence**: the binary save format
//! - **Input**: console command parsing
//!
//! The player's side of a turn (picking doors, answering questions, receiving
//! rewards) goes through the [`Controller`] capabilities, so the same engine
//! runs under the console, a simulated player or a test script.

pub mod game;
pub mod generation;
pub mod input;
pub mod persistence;
pub mod utils;

// Core module re-exports
pub use game::*;
pub use generation::*;
pub use input::*;
pub use persistence::{load_from_bytes, load_game, save_game, save_to_bytes};
pub use utils::{GameRng, SeededRng};

/// Core error type for Delve.
#[derive(thiserror::Error, Debug)]
pub enum DelveError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),

    /// Action cannot be performed
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    /// The room limit is reached and there is no other room to link to
    #[error("No rooms available")]
    NoRoomsAvailable,

    #[error("Unknown item: {0}")]
    UnknownItem(String),

    #[error("Unknown task kind: {0}")]
    UnknownTaskKind(String),

    #[error("Unknown reward kind: {0}")]
    UnknownRewardKind(String),

    #[error("Unknown upgrade: {0}")]
    UnknownUpgrade(String),

    /// The save ended in the middle of a record
    #[error("Save file is truncated")]
    TruncatedSave,

    /// The save is well framed but describes an impossible game
    #[error("Corrupt save file: {0}")]
    CorruptSave(String),
}

/// Result type used throughout the Delve codebase.
pub type DelveResult<T> = Result<T, DelveError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Fewest doors a room can have
    pub const MIN_DOORS: i32 = 2;

    /// Most doors a room can have
    pub const MAX_DOORS: i32 = 8;

    /// Stacks a new inventory can hold
    pub const DEFAULT_INVENTORY_CAPACITY: usize = 8;

    /// Units per stack in a new inventory
    pub const DEFAULT_STACK_CAPACITY: u32 = 10;

    /// Chance that a door leads to a room that already exists
    pub const LOOP_BACK_CHANCE: f64 = 1.0 / std::f64::consts::E;
}
