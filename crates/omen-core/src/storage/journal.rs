//! Journal of draw events and the favorites relation.
//!
//! Draws are append-only; only the note and the favorite mark change after
//! the fact. Card and pack id sequences are stored as JSON text and decode
//! to empty sequences when malformed rather than failing the read.

use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::database::Database;
use crate::error::Result;

/// Default page size for listings.
pub const DEFAULT_LIST_LIMIT: usize = 50;

const DRAW_COLUMNS: &str =
    "id, created_at, mode, card_ids, pack_ids, question, note, is_daily, card_text";

/// How a draw was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawMode {
    Daily,
    Ritual,
    Spread1,
    Spread3,
}

impl DrawMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DrawMode::Daily => "daily",
            DrawMode::Ritual => "ritual",
            DrawMode::Spread1 => "spread1",
            DrawMode::Spread3 => "spread3",
        }
    }
}

/// Parse a draw mode from its database string.
fn parse_draw_mode(value: &str) -> DrawMode {
    match value {
        "daily" => DrawMode::Daily,
        "spread1" => DrawMode::Spread1,
        "spread3" => DrawMode::Spread3,
        _ => DrawMode::Ritual,
    }
}

/// One persisted draw event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawRecord {
    pub id: String,
    /// Epoch milliseconds.
    pub created_at: i64,
    pub mode: DrawMode,
    pub card_ids: Vec<String>,
    pub pack_ids: Vec<String>,
    #[serde(default)]
    pub card_text: Option<String>,
    pub question: Option<String>,
    pub note: Option<String>,
    pub is_daily: bool,
}

/// Listing options; `limit` defaults to [`DEFAULT_LIST_LIMIT`].
#[derive(Debug, Clone, Default)]
pub struct ListDrawsOptions {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    /// Substring match against question and note.
    pub search_text: Option<String>,
}

/// Fresh identifier for a draw record.
pub fn generate_draw_id() -> String {
    format!("draw_{}", Uuid::new_v4().simple())
}

fn generate_favorite_id() -> String {
    format!("fav_{}", Uuid::new_v4().simple())
}

/// Current time in epoch milliseconds.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

fn serialize_ids(values: &[String]) -> Result<String> {
    Ok(serde_json::to_string(values)?)
}

/// Malformed stored sequences decode to empty rather than failing.
fn parse_ids(value: &str) -> Vec<String> {
    serde_json::from_str(value).unwrap_or_default()
}

fn map_draw_row(row: &Row<'_>) -> rusqlite::Result<DrawRecord> {
    Ok(DrawRecord {
        id: row.get(0)?,
        created_at: row.get(1)?,
        mode: parse_draw_mode(&row.get::<_, String>(2)?),
        card_ids: parse_ids(&row.get::<_, String>(3)?),
        pack_ids: parse_ids(&row.get::<_, String>(4)?),
        question: row.get(5)?,
        note: row.get(6)?,
        is_daily: row.get::<_, i64>(7)? != 0,
        card_text: row.get(8)?,
    })
}

impl Database {
    /// Append a draw to the journal.
    pub fn add_draw(&self, draw: &DrawRecord) -> Result<()> {
        debug!(id = %draw.id, mode = draw.mode.as_str(), "recording draw");
        self.conn().execute(
            "INSERT INTO draws (id, created_at, mode, card_ids, pack_ids, question, note, is_daily, card_text)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                draw.id,
                draw.created_at,
                draw.mode.as_str(),
                serialize_ids(&draw.card_ids)?,
                serialize_ids(&draw.pack_ids)?,
                draw.question,
                draw.note,
                draw.is_daily as i64,
                draw.card_text,
            ],
        )?;
        Ok(())
    }

    /// List draws newest-first, optionally filtered by a substring match
    /// against question and note.
    pub fn list_draws(&self, options: &ListDrawsOptions) -> Result<Vec<DrawRecord>> {
        let limit = options.limit.unwrap_or(DEFAULT_LIST_LIMIT) as i64;
        let offset = options.offset.unwrap_or(0) as i64;
        let search = options
            .search_text
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty());

        let records = if let Some(text) = search {
            let pattern = format!("%{text}%");
            let mut stmt = self.conn().prepare(&format!(
                "SELECT {DRAW_COLUMNS} FROM draws
                 WHERE question LIKE ?1 OR note LIKE ?1
                 ORDER BY created_at DESC
                 LIMIT ?2 OFFSET ?3"
            ))?;
            let rows = stmt.query_map(params![pattern, limit, offset], |row| map_draw_row(row))?;
            rows.collect::<rusqlite::Result<Vec<_>>>()?
        } else {
            let mut stmt = self.conn().prepare(&format!(
                "SELECT {DRAW_COLUMNS} FROM draws
                 ORDER BY created_at DESC
                 LIMIT ?1 OFFSET ?2"
            ))?;
            let rows = stmt.query_map(params![limit, offset], |row| map_draw_row(row))?;
            rows.collect::<rusqlite::Result<Vec<_>>>()?
        };
        Ok(records)
    }

    /// Point lookup; absent ids are `None`, not an error.
    pub fn get_draw(&self, id: &str) -> Result<Option<DrawRecord>> {
        let record = self
            .conn()
            .query_row(
                &format!("SELECT {DRAW_COLUMNS} FROM draws WHERE id = ?1"),
                params![id],
                |row| map_draw_row(row),
            )
            .optional()?;
        Ok(record)
    }

    /// Overwrite the note on a draw; `None` clears it.
    pub fn update_draw_note(&self, id: &str, note: Option<&str>) -> Result<()> {
        self.conn().execute(
            "UPDATE draws SET note = ?1 WHERE id = ?2",
            params![note, id],
        )?;
        Ok(())
    }

    /// Flip the favorite mark for a draw; returns the new state.
    ///
    /// The existence check and the write happen in one transaction so the
    /// relation never holds duplicate rows for a draw.
    pub fn toggle_favorite(&self, draw_id: &str) -> Result<bool> {
        let tx = self.conn().unchecked_transaction()?;
        let existing: Option<String> = tx
            .query_row(
                "SELECT id FROM favorites WHERE draw_id = ?1",
                params![draw_id],
                |row| row.get(0),
            )
            .optional()?;

        let favorited = if existing.is_some() {
            tx.execute("DELETE FROM favorites WHERE draw_id = ?1", params![draw_id])?;
            false
        } else {
            tx.execute(
                "INSERT INTO favorites (id, draw_id, created_at) VALUES (?1, ?2, ?3)",
                params![generate_favorite_id(), draw_id, now_millis()],
            )?;
            true
        };
        tx.commit()?;
        debug!(draw_id, favorited, "toggled favorite");
        Ok(favorited)
    }

    /// Whether a favorite mark exists for the draw.
    pub fn is_favorite(&self, draw_id: &str) -> Result<bool> {
        let exists: i64 = self.conn().query_row(
            "SELECT EXISTS(SELECT 1 FROM favorites WHERE draw_id = ?1)",
            params![draw_id],
            |row| row.get(0),
        )?;
        Ok(exists != 0)
    }

    /// Favorited draws, newest favorite first.
    pub fn list_favorites(&self) -> Result<Vec<DrawRecord>> {
        let mut stmt = self.conn().prepare(
            "SELECT draws.id, draws.created_at, draws.mode, draws.card_ids, draws.pack_ids,
                    draws.question, draws.note, draws.is_daily, draws.card_text
             FROM draws
             INNER JOIN favorites ON favorites.draw_id = draws.id
             ORDER BY favorites.created_at DESC",
        )?;
        let rows = stmt.query_map([], |row| map_draw_row(row))?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }
}
