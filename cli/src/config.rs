use crate::error::{CliError, CliResult};
use metadata::{JsonModuleSink, JsonModuleSource, ModuleResolver};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT_DIR_NAME: &str = "publicized_assemblies";
pub const DEFAULT_OUTPUT_SUFFIX: &str = "_publicized";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublicizerConfig {
    /// Extra directories searched for referenced modules, after the input's own directory
    pub search_paths: Vec<PathBuf>,
    pub output_dir_name: String,
    pub output_suffix: String,
    pub pretty: bool,
    pub require_references: bool,
}

impl Default for PublicizerConfig {
    fn default() -> Self {
        Self {
            search_paths: Vec::new(),
            output_dir_name: DEFAULT_OUTPUT_DIR_NAME.to_string(),
            output_suffix: DEFAULT_OUTPUT_SUFFIX.to_string(),
            pretty: true,
            require_references: true,
        }
    }
}

impl PublicizerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a TOML config file; keys that are absent keep their defaults
    pub fn from_file(path: impl AsRef<Path>) -> CliResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| CliError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&text).map_err(|source| CliError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(config)
    }

    pub fn with_search_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.search_paths.push(path.into());
        self
    }

    pub fn with_output_dir_name(mut self, name: impl Into<String>) -> Self {
        self.output_dir_name = name.into();
        self
    }

    pub fn with_output_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.output_suffix = suffix.into();
        self
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn with_require_references(mut self, require: bool) -> Self {
        self.require_references = require;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.output_dir_name.is_empty() {
            return Err("Output directory name cannot be empty".to_string());
        }

        if contains_separator(&self.output_dir_name) {
            return Err("Output directory name must be a single path component".to_string());
        }

        if contains_separator(&self.output_suffix) {
            return Err("Output suffix cannot contain a path separator".to_string());
        }

        Ok(())
    }

    /// Resolver searching the input's directory first, then `search_paths`
    pub fn resolver_for(&self, input: &Path) -> ModuleResolver {
        let mut resolver = ModuleResolver::new();
        resolver.add_search_path(input_dir(input));
        for path in &self.search_paths {
            resolver.add_search_path(path.clone());
        }
        resolver
    }

    pub fn source_for(&self, input: &Path) -> JsonModuleSource {
        JsonModuleSource::new(self.resolver_for(input))
            .with_require_references(self.require_references)
    }

    pub fn sink(&self) -> JsonModuleSink {
        JsonModuleSink::new().with_pretty(self.pretty)
    }

    /// `<input dir>/<output_dir_name>/<stem><output_suffix>.<ext>`
    pub fn default_output_path(&self, input: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mut file_name = format!("{stem}{}", self.output_suffix);
        if let Some(ext) = input.extension() {
            file_name.push('.');
            file_name.push_str(&ext.to_string_lossy());
        }
        input_dir(input).join(&self.output_dir_name).join(file_name)
    }
}

fn contains_separator(value: &str) -> bool {
    value.contains('/') || value.contains('\\')
}

fn input_dir(input: &Path) -> PathBuf {
    match input.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
