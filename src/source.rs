use crate::models::{RawSalesRecord, RecordError, SalesRecord};
use std::{env, path::Path, path::PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::{debug, warn};

pub const SOURCE_PATH_VAR: &str = "SALES_DATA_PATH";
pub const DEFAULT_SOURCE_PATH: &str = "data/DB_SALEACHV.json";

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} is not a JSON array of records: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub fn resolve_source_path() -> PathBuf {
    match env::var(SOURCE_PATH_VAR) {
        Ok(path) if !path.trim().is_empty() => PathBuf::from(path.trim()),
        _ => PathBuf::from(DEFAULT_SOURCE_PATH),
    }
}

/// Reads the record file from disk. Called once per view request; nothing is
/// cached between calls.
pub async fn load_records(path: &Path) -> Result<Vec<SalesRecord>, SourceError> {
    let bytes = fs::read(path).await.map_err(|source| SourceError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let records = parse_records(&bytes).map_err(|source| SourceError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), count = records.len(), "loaded sales records");
    Ok(records)
}

/// Parses the document as an array. Entries that do not form a valid record
/// are logged and skipped; only a document that is not an array fails.
pub fn parse_records(bytes: &[u8]) -> Result<Vec<SalesRecord>, serde_json::Error> {
    let entries: Vec<serde_json::Value> = serde_json::from_slice(bytes)?;

    let mut records = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        match parse_entry(entry) {
            Ok(record) => records.push(record),
            Err(err) => warn!(index, "skipping malformed sales record: {err}"),
        }
    }
    Ok(records)
}

fn parse_entry(entry: serde_json::Value) -> Result<SalesRecord, RecordError> {
    let raw: RawSalesRecord = serde_json::from_value(entry)?;
    SalesRecord::try_from(raw)
}
