use crate::types::Module;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("IO error on '{}': {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed module image '{}': {}", .path.display(), .source)]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid module image: {message}")]
    InvalidImage { message: String },

    #[error("Unresolved module reference '{reference}' (searched: {searched})")]
    UnresolvedReference { reference: String, searched: String },

    #[error("Unknown type id: #{0}")]
    UnknownType(usize),
}

pub type MetadataResult<T> = Result<T, MetadataError>;

/// Loads a module image from storage into a fully resolved [`Module`]
pub trait MetadataSource {
    fn load(&self, path: &Path) -> MetadataResult<Module>;

    fn format_name(&self) -> &'static str;
}

/// Writes a (possibly mutated) [`Module`] back out as an image
pub trait MetadataSink {
    fn save(&self, module: &Module, path: &Path) -> MetadataResult<()>;

    fn format_name(&self) -> &'static str;
}
