//! Command-line channel search.
//!
//! Builds a [`MatchRequest`] from `--name`, `--tag` and `KEY=GLOB` arguments,
//! opens the catalog described by `--db` or `--config`, and prints the
//! matching rows either tab-separated or as grouped JSON channels.

use anyhow::{bail, Context, Result};
use channelfinder_db::DbConfig;
use channelfinder_query::{ChannelQuery, SearchOutcome};
use channelfinder_types::{ChannelRow, MatchRequest, NAME_KEY, TAG_KEY};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "cf-find")]
#[command(about = "Search a channel catalog by name, tag and property")]
pub struct Args {
    /// Catalog database file
    #[arg(long, env = "CF_DB", value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// JSON catalog config; takes precedence over --db
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Open the catalog with write access
    #[arg(long)]
    pub read_write: bool,

    /// Print grouped channels as JSON instead of tab-separated rows
    #[arg(long)]
    pub json: bool,

    /// Enable verbose debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Channel-name glob (repeatable, any may match)
    #[arg(short, long = "name", value_name = "GLOB")]
    pub names: Vec<String>,

    /// Tag name or glob (repeatable, all must match)
    #[arg(short, long = "tag", value_name = "GLOB")]
    pub tags: Vec<String>,

    /// Property criterion; a bare KEY matches any value
    #[arg(value_name = "KEY=GLOB", value_parser = parse_criterion)]
    pub criteria: Vec<Criterion>,
}

/// One positional `KEY=GLOB` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Criterion {
    pub key: String,
    /// `None` for a bare `KEY`.
    pub value: Option<String>,
}

/// Parses `KEY=GLOB` (split at the first `=`) or a bare `KEY`.
pub fn parse_criterion(arg: &str) -> Result<Criterion, String> {
    let (key, value) = match arg.split_once('=') {
        Some((key, value)) => (key, Some(value.to_owned())),
        None => (arg, None),
    };
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing property name in {arg:?}"));
    }
    Ok(Criterion {
        key: key.to_owned(),
        value,
    })
}

impl Args {
    /// The search request described by the arguments.
    pub fn request(&self) -> MatchRequest {
        let mut request = MatchRequest::new();
        if !self.names.is_empty() {
            request.extend_key(NAME_KEY, self.names.iter().cloned());
        }
        if !self.tags.is_empty() {
            request.extend_key(TAG_KEY, self.tags.iter().cloned());
        }
        for criterion in &self.criteria {
            match &criterion.value {
                Some(value) => request.add(&criterion.key, value),
                None => request.extend_key(&criterion.key, std::iter::empty::<String>()),
            };
        }
        request
    }

    /// The catalog to open.
    pub fn db_config(&self) -> Result<DbConfig> {
        let config = match (&self.config, &self.db) {
            (Some(file), _) => DbConfig::from_json_file(file)
                .with_context(|| format!("Failed to load config {}", file.display()))?,
            (None, Some(path)) => DbConfig::new(path),
            (None, None) => bail!("no catalog given: pass --db PATH, --config FILE or set CF_DB"),
        };
        Ok(if self.read_write {
            config.read_only(false)
        } else {
            config
        })
    }
}

/// Writes one tab-separated line per row: channel name, channel owner,
/// property name, value and owner. Missing fields are empty.
pub fn write_rows<W: Write>(out: &mut W, rows: &[ChannelRow]) -> std::io::Result<()> {
    for row in rows {
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}",
            row.channel_name,
            row.channel_owner,
            row.property_name.as_deref().unwrap_or(""),
            row.property_value.as_deref().unwrap_or(""),
            row.property_owner.as_deref().unwrap_or(""),
        )?;
    }
    Ok(())
}

/// Writes the outcome grouped into channels as a pretty JSON array.
pub fn write_json<W: Write>(out: &mut W, outcome: SearchOutcome) -> Result<()> {
    let channels = outcome.into_channels();
    serde_json::to_writer_pretty(&mut *out, &channels).context("Failed to encode channels")?;
    writeln!(out)?;
    Ok(())
}

/// Opens the catalog, runs the search and prints the result to `out`.
///
/// Returns the number of rows found. A search matching nothing prints
/// nothing and still succeeds.
pub fn run<W: Write>(args: &Args, out: &mut W) -> Result<usize> {
    let config = args.db_config()?;
    let conn = channelfinder_db::open(&config)
        .with_context(|| format!("Failed to open catalog {}", config.path.display()))?;

    let request = args.request();
    debug!("Search request: {:?}", request);
    let outcome = ChannelQuery::multi_match(&request)
        .execute(&conn)
        .context("Channel search failed")?;

    if outcome.is_empty() {
        info!("no channels matched");
        return Ok(0);
    }

    let count = outcome.rows().len();
    if args.json {
        write_json(out, outcome)?;
    } else {
        write_rows(out, outcome.rows()).context("Failed to write rows")?;
    }
    info!("{} row(s) matched", count);
    Ok(count)
}
