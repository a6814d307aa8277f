use std::path::PathBuf;

/// Failure to turn JSON into a type tree or an option bag.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("at JSON path {path} → {source}")]
    Shape {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("JSON pointer {0} does not resolve to a value")]
    Pointer(String),
}

#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
    #[error("failed to read options file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed options file {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },
}
