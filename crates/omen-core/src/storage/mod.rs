pub mod database;
pub mod journal;
pub mod kv;
pub mod migrations;

pub use database::Database;
pub use journal::{DrawMode, DrawRecord, ListDrawsOptions};
pub use kv::{KvStore, MemoryKv};

use std::path::PathBuf;

use crate::error::Result;

/// Returns `~/.config/omen[-dev]/` based on OMEN_ENV.
///
/// Set OMEN_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("OMEN_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("omen-dev")
    } else {
        base_dir.join("omen")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
