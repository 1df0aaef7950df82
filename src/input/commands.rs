//! # Command Definitions
//!
//! The words the console understands between turns.

use super::PlayerInput;

/// A console command and the words that trigger it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    pub keywords: &'static [&'static str],
    pub usage: &'static str,
    pub help: &'static str,
    pub input: PlayerInput,
}

/// Every command except door numbers, which are parsed separately.
pub const COMMANDS: &[Command] = &[
    Command {
        keywords: &["inventory", "inv", "i"],
        usage: "inventory",
        help: "Show your inventory",
        input: PlayerInput::ShowInventory,
    },
    Command {
        keywords: &["menagerie", "pets", "m"],
        usage: "menagerie",
        help: "Show the creatures you have collected",
        input: PlayerInput::ShowMenagerie,
    },
    Command {
        keywords: &["craft", "c"],
        usage: "craft",
        help: "Combine two items from your inventory",
        input: PlayerInput::Craft,
    },
    Command {
        keywords: &["status", "stats"],
        usage: "status",
        help: "Show your progress",
        input: PlayerInput::ShowStatus,
    },
    Command {
        keywords: &["save", "s"],
        usage: "save",
        help: "Save the game",
        input: PlayerInput::Save,
    },
    Command {
        keywords: &["leave", "exit", "no", "-1"],
        usage: "leave",
        help: "Leave the dungeon for good",
        input: PlayerInput::Leave,
    },
    Command {
        keywords: &["quit", "q"],
        usage: "quit",
        help: "Stop playing without leaving the dungeon",
        input: PlayerInput::Quit,
    },
    Command {
        keywords: &["help", "h", "?"],
        usage: "help",
        help: "Show this help",
        input: PlayerInput::Help,
    },
];

/// Finds the command triggered by a lowercase word.
pub fn find_command(word: &str) -> Option<&'static Command> {
    COMMANDS
        .iter()
        .find(|command| command.keywords.contains(&word))
}

/// Help text listing every command.
pub fn help_text() -> String {
    let mut lines = vec![format!("{:<10} {}", "<number>", "Walk through that door")];
    lines.extend(
        COMMANDS
            .iter()
            .map(|command| format!("{:<10} {}", command.usage, command.help)),
    );
    lines.join("\n")
}
