//! [`Executor`] implementation for SQLite connections.
//!
//! Works for a plain `rusqlite::Connection` and, through deref, for a
//! `rusqlite::Transaction` owned by the caller. Id sets are bound through the
//! `rarray` table-valued function, which is registered on the connection
//! before a statement that needs it is prepared.

use crate::executor::Executor;
use crate::statement::{Dialect, RenderedQuery, SqlParam};
use channelfinder_types::{ChannelId, ChannelRow};
use rusqlite::types::{ToSqlOutput, Value, ValueRef};
use rusqlite::vtab::array;
use rusqlite::{params_from_iter, Connection, Statement, ToSql};
use std::rc::Rc;

impl ToSql for SqlParam {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Self::Int(v) => ToSqlOutput::from(*v),
            Self::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            Self::IntList(ids) => {
                ToSqlOutput::Array(Rc::new(ids.iter().copied().map(Value::from).collect()))
            }
        })
    }
}

fn prepare<'c>(conn: &'c Connection, query: &RenderedQuery) -> rusqlite::Result<Statement<'c>> {
    if query.params.iter().any(|p| matches!(p, SqlParam::IntList(_))) {
        array::load_module(conn)?;
    }
    conn.prepare(&query.sql)
}

impl Executor for Connection {
    type Error = rusqlite::Error;

    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }

    fn fetch_ids(&self, query: &RenderedQuery) -> Result<Vec<ChannelId>, Self::Error> {
        let mut stmt = prepare(self, query)?;
        let ids = stmt.query_map(params_from_iter(query.params.iter()), |row| {
            let id: i64 = row.get(0)?;
            Ok(ChannelId::new(id))
        })?;
        ids.collect()
    }

    fn fetch_rows(&self, query: &RenderedQuery) -> Result<Vec<ChannelRow>, Self::Error> {
        let mut stmt = prepare(self, query)?;
        let rows = stmt.query_map(params_from_iter(query.params.iter()), |row| {
            Ok(ChannelRow {
                channel_name: row.get(0)?,
                channel_owner: row.get(1)?,
                property_name: row.get(2)?,
                property_value: row.get(3)?,
                property_owner: row.get(4)?,
            })
        })?;
        rows.collect()
    }
}
