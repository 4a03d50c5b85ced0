//! Catalog error types.

use std::path::PathBuf;

use crate::domain::StationCode;

/// Errors from loading or querying the catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// No train with this id exists
    #[error("train {0} not found")]
    TrainNotFound(String),

    /// Catalog file could not be read
    #[error("failed to read catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Catalog JSON is malformed or a field failed to parse
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Two stations share a code
    #[error("duplicate station code {0}")]
    DuplicateStation(StationCode),

    /// Two trains share an id
    #[error("duplicate train id {0}")]
    DuplicateTrain(String),

    /// A train refers to a station that is not in the directory
    #[error("train {train} refers to unknown station {code}")]
    UnknownStation { train: String, code: StationCode },

    /// A train has no operating days
    #[error("train {0} has no days of operation")]
    NoOperatingDays(String),

    /// A profile booking refers to a train that is not in the catalog
    #[error("booking {booking} refers to unknown train {train}")]
    UnknownBookingTrain { booking: String, train: String },
}
