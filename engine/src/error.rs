use std::path::PathBuf;

/// Errors surfaced by the ranking engine and its batch driver
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A file or directory could not be opened, created or read
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Run configuration is structurally valid JSON but unusable
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Run configuration is not valid JSON for `RunConfig`
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// Topic file is malformed
    #[error("malformed topics: {0}")]
    Topics(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
