//! SQLite connection management for the channel catalog.
//!
//! Opens catalog databases for the search compiler:
//! - [`DbConfig`] describes the file, access mode and busy timeout, and loads
//!   from JSON
//! - [`open`] applies the config; writable opens install the reference schema
//! - [`init_schema`] creates the `channel` and `property` tables the compiler
//!   reads from
//! - [`register_functions`] installs a Unicode-aware `lower()`; [`open`] does
//!   this for every connection
//!
//! Writing channels is the service's job; this crate offers no write path.

mod config;
mod error;
mod functions;
mod schema;

pub use config::{DbConfig, MEMORY_PATH};
pub use error::{DbError, DbResult};
pub use functions::register_functions;
pub use schema::{has_schema, init_schema, SCHEMA};

use rusqlite::{Connection, OpenFlags};
use tracing::{debug, info};

/// Opens a catalog connection as described by `config`.
///
/// Read-only opens fail if the file does not exist. Writable and in-memory
/// opens create the reference schema when it is missing.
pub fn open(config: &DbConfig) -> DbResult<Connection> {
    let conn = if config.is_in_memory() {
        Connection::open_in_memory()?
    } else if config.read_only {
        Connection::open_with_flags(
            &config.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?
    } else {
        Connection::open(&config.path)?
    };

    conn.busy_timeout(config.busy_timeout_duration())?;
    conn.pragma_update(None, "foreign_keys", true)?;
    register_functions(&conn)?;

    if config.is_in_memory() || !config.read_only {
        init_schema(&conn)?;
        debug!("Catalog schema ensured");
    }

    info!(
        "Opened catalog {} ({})",
        config.path.display(),
        if config.read_only && !config.is_in_memory() { "read-only" } else { "read-write" }
    );
    Ok(conn)
}

/// Opens an in-memory catalog with the reference schema installed.
pub fn open_in_memory() -> DbResult<Connection> {
    open(&DbConfig::in_memory())
}
