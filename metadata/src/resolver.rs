use crate::json::IMAGE_EXTENSION;
use crate::source::{MetadataError, MetadataResult};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Locates referenced module images on an ordered list of directories
#[derive(Debug, Clone, Default)]
pub struct ModuleResolver {
    search_paths: Vec<PathBuf>,
}

impl ModuleResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.add_search_path(path);
        self
    }

    /// Append a directory to the search list. Duplicates are ignored.
    pub fn add_search_path(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        if !self.search_paths.contains(&path) {
            self.search_paths.push(path);
        }
    }

    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Path of the first `<dir>/<reference>.json` that exists
    pub fn resolve(&self, reference: &str) -> MetadataResult<PathBuf> {
        let file_name = format!("{reference}.{IMAGE_EXTENSION}");
        for dir in &self.search_paths {
            let candidate = dir.join(&file_name);
            if candidate.is_file() {
                debug!(reference, path = %candidate.display(), "Resolved module reference");
                return Ok(candidate);
            }
        }

        Err(MetadataError::UnresolvedReference {
            reference: reference.to_string(),
            searched: self
                .search_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", "),
        })
    }

    pub fn can_resolve(&self, reference: &str) -> bool {
        self.resolve(reference).is_ok()
    }
}

impl<P: AsRef<Path>> FromIterator<P> for ModuleResolver {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        let mut resolver = ModuleResolver::new();
        for path in iter {
            resolver.add_search_path(path.as_ref());
        }
        resolver
    }
}
