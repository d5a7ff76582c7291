//! Snapshot persistence for the athlete aggregate.
//!
//! The whole aggregate is written as one bincode snapshot. The format is an
//! implementation detail; the contract is that every attribute round-trips
//! exactly, including absent optional fields and kind identity. A failed
//! load must leave the caller's in-memory state untouched, which falls out
//! naturally from returning a fresh value only on success.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use thiserror::Error;

use super::Athlete;

/// Errors from snapshot save/load.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Snapshot file could not be opened or created
    #[error("cannot open snapshot {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot could not be written
    #[error("failed to write snapshot {path}: {source}")]
    Encode {
        path: String,
        #[source]
        source: bincode::Error,
    },

    /// Snapshot file exists but could not be decoded
    #[error("corrupt snapshot {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: bincode::Error,
    },
}

/// Write the athlete to a snapshot file, replacing any previous snapshot.
pub fn save(athlete: &Athlete, path: &Path) -> Result<(), StoreError> {
    let path_display = path.display().to_string();
    let file = File::create(path).map_err(|source| StoreError::Io {
        path: path_display.clone(),
        source,
    })?;

    bincode::serialize_into(BufWriter::new(file), athlete).map_err(|source| {
        StoreError::Encode {
            path: path_display.clone(),
            source,
        }
    })?;

    tracing::info!(
        path = %path_display,
        activities = athlete.activity_count(),
        goals = athlete.goal_count(),
        "saved snapshot"
    );
    Ok(())
}

/// Read an athlete back from a snapshot file.
pub fn load(path: &Path) -> Result<Athlete, StoreError> {
    let path_display = path.display().to_string();
    let file = File::open(path).map_err(|source| StoreError::Io {
        path: path_display.clone(),
        source,
    })?;

    let athlete: Athlete =
        bincode::deserialize_from(BufReader::new(file)).map_err(|source| StoreError::Decode {
            path: path_display.clone(),
            source,
        })?;

    tracing::info!(
        path = %path_display,
        activities = athlete.activity_count(),
        goals = athlete.goal_count(),
        "loaded snapshot"
    );
    Ok(athlete)
}
