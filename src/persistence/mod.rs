//! # Persistence Module
//!
//! Binary save files. A save is the dungeon record followed by the player
//! record, framed with the primitives in [`codec`]. Encoding is
//! deterministic: the same game state always produces the same bytes.
//!
//! Loading either yields a complete session or an error. A truncated or
//! inconsistent file never produces a partially restored game.

pub mod codec;

pub use codec::*;

use crate::{DelveResult, DungeonConfig, GameSession};
use log::info;
use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor};
use std::path::Path;

/// Encodes a session into bytes.
pub fn save_to_bytes(session: &GameSession) -> DelveResult<Vec<u8>> {
    let mut writer = SaveWriter::new(Vec::new());
    session.encode(&mut writer)?;
    Ok(writer.into_inner())
}

/// Decodes a session from bytes.
pub fn load_from_bytes(bytes: &[u8], config: DungeonConfig) -> DelveResult<GameSession> {
    GameSession::decode(&mut SaveReader::new(Cursor::new(bytes)), config)
}

/// Writes a session to a file, replacing it if it exists.
pub fn save_game(session: &GameSession, path: impl AsRef<Path>) -> DelveResult<()> {
    let path = path.as_ref();
    let mut writer = SaveWriter::new(BufWriter::new(File::create(path)?));
    session.encode(&mut writer)?;
    writer.flush()?;
    info!(
        "Saved game with {} rooms to {}",
        session.dungeon.room_count(),
        path.display()
    );
    Ok(())
}

/// Reads a session from a file.
pub fn load_game(path: impl AsRef<Path>, config: DungeonConfig) -> DelveResult<GameSession> {
    let path = path.as_ref();
    let mut reader = SaveReader::new(BufReader::new(File::open(path)?));
    let session = GameSession::decode(&mut reader, config)?;
    info!(
        "Loaded game with {} rooms from {}",
        session.dungeon.room_count(),
        path.display()
    );
    Ok(session)
}
