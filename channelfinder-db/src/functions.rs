//! SQL functions installed on every catalog connection.

use crate::error::DbResult;
use rusqlite::functions::FunctionFlags;
use rusqlite::types::{Value, ValueRef};
use rusqlite::Connection;

/// Replaces SQLite's ASCII-only `lower()` with one that folds all of Unicode,
/// so property and tag names compare case-insensitively beyond ASCII.
/// Non-text arguments pass through unchanged.
pub fn register_functions(conn: &Connection) -> DbResult<()> {
    conn.create_scalar_function(
        "lower",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            Ok(match ctx.get_raw(0) {
                ValueRef::Text(text) => Value::Text(String::from_utf8_lossy(text).to_lowercase()),
                other => Value::from(other),
            })
        },
    )?;
    Ok(())
}
