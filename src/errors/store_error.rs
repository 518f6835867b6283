use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage is not available")]
    Unavailable,
    #[error("Storage rejected the write to {key}: {reason}")]
    Rejected { key: String, reason: String },
    #[error("Stored value under {key} is not valid JSON: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Could not encode value for {key}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Storage file error: {0}")]
    Io(#[from] std::io::Error),
}
