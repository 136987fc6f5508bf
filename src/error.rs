use thiserror::Error;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the library
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Missing {dataset} dataset: {path}. Did you download the data for this year?")]
    MissingDataset { dataset: String, path: String },

    #[error("Data directory does not exist: {0}. Did you download the data for this year?")]
    MissingDataDir(String),

    #[error("Invalid {dataset} dataset {path}: {reason}")]
    InvalidDataset {
        dataset: String,
        path: String,
        reason: String,
    },

    #[error("Invalid {dataset} row for bill '{bill_number}': {reason}")]
    InvalidRow {
        dataset: String,
        bill_number: String,
        reason: String,
    },

    #[error("State '{0}' is not implemented yet (supported: NY)")]
    UnsupportedState(String),

    #[error("Malformed bill number: '{0}'")]
    MalformedIdentifier(String),

    #[error("Unknown progress event {event} on bill {bill_number}")]
    UnknownProgressEvent { bill_number: String, event: i64 },

    #[error("Senate sponsor for {0} has no member and no budget/rules/redistricting flag")]
    UnmappedSponsorRole(String),
}
