//! # Game Module
//!
//! Core game state: rooms, tasks, rewards, the player and their belongings.
//!
//! This module contains the fundamental building blocks of Delve:
//! - Entities the player can carry or collect, and the bounded inventory
//! - Rooms of the dungeon graph and the tasks guarding them
//! - The player's turn state machine and its controller capabilities
//! - Crafting and the session object tying everything together

pub mod crafting;
pub mod entities;
pub mod inventory;
pub mod player;
pub mod reward;
pub mod room;
pub mod state;
pub mod task;

pub use crafting::*;
pub use entities::*;
pub use inventory::*;
pub use player::*;
pub use reward::*;
pub use room::*;
pub use state::*;
pub use task::*;

/// Identifier of a room. Rooms are numbered densely from [`START_ID`].
pub type RoomId = i32;

/// Id of the Exit, the singleton room outside the numbered graph.
pub const EXIT_ID: RoomId = -1;

/// Id of the Start room.
pub const START_ID: RoomId = 0;

/// Presents tasks to whoever is playing.
pub trait TaskPresenter {
    /// Shows an information text. Information needs no reply.
    fn present_information(&mut self, text: &str);

    /// Asks a question and returns the raw answer.
    fn present_question(&mut self, prompt: &str) -> String;
}
