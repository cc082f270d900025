//! # NDJSON Event Source
//!
//! One JSON object per line, tagged by `"event"`:
//!
//! ```text
//! {"event":"Transfer","from":"0x..","to":"0x..","value":"100","asset":"0x..","tx_hash":"0x..","block_number":1,"timestamp":1700000000,"log_index":0}
//! {"event":"Reorg","from_block":18000000}
//! ```
//!
//! `Reorg` is a control line, not a ledger event. Blank lines are skipped.
//! A malformed line stops the source: skipping it would break ordering.

use serde_json::Value;
use shared_types::LedgerEvent;
use std::path::Path;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Something the pipeline must process, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceItem {
    Event(LedgerEvent),
    /// Blocks from `from_block` onward were orphaned.
    Reorg { from_block: u64 },
}

/// A source item with its 1-based input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequenced {
    pub line: u64,
    pub item: SourceItem,
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error reading events: {0}")]
    Io(#[from] std::io::Error),

    #[error("Line {line}: {message}")]
    Malformed { line: u64, message: String },
}

/// Parse one non-empty NDJSON line.
pub fn parse_line(line_no: u64, line: &str) -> Result<SourceItem, SourceError> {
    let malformed = |message: String| SourceError::Malformed {
        line: line_no,
        message,
    };

    let value: Value = serde_json::from_str(line).map_err(|e| malformed(e.to_string()))?;
    if value.get("event").and_then(Value::as_str) == Some("Reorg") {
        let from_block = value
            .get("from_block")
            .and_then(Value::as_u64)
            .ok_or_else(|| malformed("Reorg line needs a numeric from_block".into()))?;
        return Ok(SourceItem::Reorg { from_block });
    }

    serde_json::from_value::<LedgerEvent>(value)
        .map(SourceItem::Event)
        .map_err(|e| malformed(e.to_string()))
}

/// Read `reader` line by line into `tx`.
///
/// Returns the number of items sent. Stops early, without error, when the
/// receiving side is gone.
pub async fn pump<R>(reader: R, tx: mpsc::Sender<Sequenced>) -> Result<u64, SourceError>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut line_no = 0u64;
    let mut sent = 0u64;

    while let Some(line) = lines.next_line().await? {
        line_no += 1;
        if line.trim().is_empty() {
            continue;
        }
        let item = parse_line(line_no, &line)?;
        if tx.send(Sequenced { line: line_no, item }).await.is_err() {
            debug!(line = line_no, "Pipeline closed, source stopping");
            break;
        }
        sent += 1;
    }

    info!(lines = line_no, sent, "Event source finished");
    Ok(sent)
}

/// Pump a file, or stdin when `path` is `None`.
pub async fn pump_from(path: Option<&Path>, tx: mpsc::Sender<Sequenced>) -> Result<u64, SourceError> {
    match path {
        Some(path) => {
            info!(path = %path.display(), "Reading events from file");
            let file = tokio::fs::File::open(path).await?;
            pump(BufReader::new(file), tx).await
        }
        None => {
            info!("Reading events from stdin");
            pump(BufReader::new(tokio::io::stdin()), tx).await
        }
    }
}
