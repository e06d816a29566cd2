use metadata::MetadataError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read config '{}': {}", .path.display(), .source)]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file '{}': {}", .path.display(), .source)]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Refusing to overwrite input '{}'", .path.display())]
    OutputIsInput { path: PathBuf },

    #[error(transparent)]
    Metadata(#[from] MetadataError),
}

pub type CliResult<T> = Result<T, CliError>;
