//! Shared catalog fixtures for search tests.

#![allow(dead_code)]

use channelfinder_query::{Dialect, Executor, RenderedQuery, SearchOutcome};
use channelfinder_types::{ChannelId, ChannelRow};
use rusqlite::{params, Connection};
use std::cell::RefCell;

pub const CHANNEL_OWNER: &str = "testc";
pub const PROPERTY_OWNER: &str = "testp";
pub const TAG_OWNER: &str = "testt";

/// Channel fixture: name, properties (name, value), tags.
pub struct Seed<'a> {
    pub name: &'a str,
    pub properties: &'a [(&'a str, &'a str)],
    pub tags: &'a [&'a str],
}

pub fn seed<'a>(name: &'a str, properties: &'a [(&'a str, &'a str)], tags: &'a [&'a str]) -> Seed<'a> {
    Seed {
        name,
        properties,
        tags,
    }
}

/// Installs log output for a test run; repeated calls are harmless.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}

/// Opens an in-memory catalog holding `channels`.
pub fn catalog(channels: &[Seed<'_>]) -> Connection {
    init_tracing();
    let conn = channelfinder_db::open_in_memory().unwrap();
    for channel in channels {
        insert(&conn, channel);
    }
    conn
}

pub fn insert(conn: &Connection, channel: &Seed<'_>) -> i64 {
    conn.execute(
        "INSERT INTO channel (name, owner) VALUES (?1, ?2)",
        params![channel.name, CHANNEL_OWNER],
    )
    .unwrap();
    let id = conn.last_insert_rowid();
    for (name, value) in channel.properties {
        conn.execute(
            "INSERT INTO property (channel_id, property, value, owner) VALUES (?1, ?2, ?3, ?4)",
            params![id, name, value, PROPERTY_OWNER],
        )
        .unwrap();
    }
    for tag in channel.tags {
        conn.execute(
            "INSERT INTO property (channel_id, property, value, owner) VALUES (?1, ?2, NULL, ?3)",
            params![id, tag, TAG_OWNER],
        )
        .unwrap();
    }
    id
}

/// The four-channel directory used throughout the service tests.
pub fn directory() -> Connection {
    catalog(&[
        seed("C1", &[("P1", "prop1"), ("P2", "prop2")], &["T1", "T2"]),
        seed("C2", &[("P3", "prop3"), ("P4", "prop4")], &["T33", "T44"]),
        seed("C3", &[("P3", "prop1"), ("P2", "prop2")], &["T33", "T2"]),
        seed("C4", &[("P1", "prop1"), ("P4", "prop4")], &["T1", "T44"]),
    ])
}

/// Distinct channel names in row order.
pub fn names(outcome: &SearchOutcome) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for row in outcome.rows() {
        if names.last() != Some(&row.channel_name) {
            names.push(row.channel_name.clone());
        }
    }
    names
}

/// Executor that delegates to a connection and records every statement.
pub struct Recorder<'a> {
    inner: &'a Connection,
    pub log: RefCell<Vec<RenderedQuery>>,
}

impl<'a> Recorder<'a> {
    pub fn new(inner: &'a Connection) -> Self {
        Self {
            inner,
            log: RefCell::new(Vec::new()),
        }
    }

    pub fn statements(&self) -> usize {
        self.log.borrow().len()
    }

    pub fn sql(&self) -> Vec<String> {
        self.log.borrow().iter().map(|q| q.sql.clone()).collect()
    }
}

impl Executor for Recorder<'_> {
    type Error = rusqlite::Error;

    fn dialect(&self) -> Dialect {
        self.inner.dialect()
    }

    fn fetch_ids(&self, query: &RenderedQuery) -> Result<Vec<ChannelId>, Self::Error> {
        self.log.borrow_mut().push(query.clone());
        self.inner.fetch_ids(query)
    }

    fn fetch_rows(&self, query: &RenderedQuery) -> Result<Vec<ChannelRow>, Self::Error> {
        self.log.borrow_mut().push(query.clone());
        self.inner.fetch_rows(query)
    }
}
