use crate::error::DbResult;
use rusqlite::Connection;

/// Tables read by the search compiler.
///
/// Tags are `property` rows with a NULL `value`. A channel holds at most one
/// row per property name.
pub const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS channel (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        owner TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS property (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        channel_id INTEGER NOT NULL REFERENCES channel (id) ON DELETE CASCADE,
        property TEXT NOT NULL,
        value TEXT,
        owner TEXT,
        UNIQUE (channel_id, property)
    );

    CREATE INDEX IF NOT EXISTS idx_property_channel ON property (channel_id);
    CREATE INDEX IF NOT EXISTS idx_property_name ON property (property);
";

/// Creates the catalog tables if they do not exist yet.
pub fn init_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

/// Whether both catalog tables are present.
pub fn has_schema(conn: &Connection) -> DbResult<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('channel', 'property')",
        [],
        |row| row.get(0),
    )?;
    Ok(count == 2)
}
