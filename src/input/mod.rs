//! # Input Module
//!
//! Console input parsing for player interactions.
//!
//! Lines typed by the player are turned into [`PlayerInput`] values, and the
//! inputs that move the player are then checked against the room they stand
//! in.

pub mod commands;

pub use commands::*;

use crate::{DelveError, DelveResult, DoorChoice, Room, EXIT_ID};

/// Input handler for processing player commands.
///
/// Converts console lines into player inputs and door choices.
#[derive(Debug, Clone)]
pub struct InputHandler {
    /// Whether picking the door that leads outside asks for confirmation
    pub confirm_leaving: bool,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    /// Creates a new input handler.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{InputHandler, PlayerInput};
    ///
    /// let input_handler = InputHandler::new();
    /// assert_eq!(input_handler.parse_line(" 3 "), Some(PlayerInput::Door(3)));
    /// assert_eq!(input_handler.parse_line("INV"), Some(PlayerInput::ShowInventory));
    /// ```
    pub fn new() -> Self {
        Self {
            confirm_leaving: true,
        }
    }

    /// Parses one console line.
    ///
    /// Returns `None` for blank lines and anything not understood.
    pub fn parse_line(&self, line: &str) -> Option<PlayerInput> {
        let word = line.trim().to_lowercase();
        if word.is_empty() {
            return None;
        }
        if let Some(command) = find_command(&word) {
            return Some(command.input);
        }
        word.parse::<usize>().ok().map(PlayerInput::Door)
    }

    /// Parses the answer to a yes/no prompt.
    pub fn parse_confirmation(&self, line: &str) -> Option<bool> {
        match line.trim().to_lowercase().as_str() {
            "y" | "yes" => Some(true),
            "n" | "no" => Some(false),
            _ => None,
        }
    }

    /// Converts player input to a door choice in `room`.
    ///
    /// Inputs that do not move the player give `Ok(None)`.
    pub fn input_to_choice(&self, input: PlayerInput, room: &Room) -> DelveResult<Option<DoorChoice>> {
        match input {
            PlayerInput::Door(index) => {
                if room.door_target(index).is_some() {
                    Ok(Some(DoorChoice::Door(index)))
                } else if room.is_filled() {
                    Err(DelveError::InvalidAction(format!(
                        "pick a door between 0 and {}",
                        room.door_count - 1
                    )))
                } else {
                    Err(DelveError::InvalidState(format!(
                        "the doors of room {} are not open yet",
                        room.id
                    )))
                }
            }
            PlayerInput::Leave => Ok(Some(DoorChoice::Leave)),
            _ => Ok(None),
        }
    }

    /// Whether a choice ends the game and should be confirmed first.
    pub fn needs_confirmation(&self, choice: DoorChoice, room: &Room) -> bool {
        self.confirm_leaving
            && match choice {
                DoorChoice::Leave => true,
                DoorChoice::Door(index) => room.door_target(index) == Some(EXIT_ID),
            }
    }
}

/// Player input types that can be processed by the input handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerInput {
    /// Walk through the door with this index
    Door(usize),
    /// Leave the dungeon
    Leave,
    /// Stop playing; the game can be continued from a save
    Quit,
    /// Show help information
    Help,
    /// Show inventory
    ShowInventory,
    /// Show collected creatures
    ShowMenagerie,
    /// Show progress
    ShowStatus,
    /// Combine two items
    Craft,
    /// Save the game
    Save,
}
