use crate::image::ModuleImage;
use crate::resolver::ModuleResolver;
use crate::source::{MetadataError, MetadataResult, MetadataSink, MetadataSource};
use crate::types::Module;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// File extension of module images
pub const IMAGE_EXTENSION: &str = "json";

/// Reads JSON module images and checks their references can be located
#[derive(Debug, Clone)]
pub struct JsonModuleSource {
    resolver: ModuleResolver,
    require_references: bool,
}

impl JsonModuleSource {
    pub fn new(resolver: ModuleResolver) -> Self {
        Self {
            resolver,
            require_references: true,
        }
    }

    /// When false, unresolved references are logged instead of failing the load
    pub fn with_require_references(mut self, require: bool) -> Self {
        self.require_references = require;
        self
    }

    pub fn resolver(&self) -> &ModuleResolver {
        &self.resolver
    }

    fn resolve_references(&self, module: &Module) -> MetadataResult<()> {
        for reference in &module.references {
            match self.resolver.resolve(reference) {
                Ok(_) => {}
                Err(err) if !self.require_references => {
                    warn!(module = %module.name, "{}", err);
                }
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }
}

impl Default for JsonModuleSource {
    fn default() -> Self {
        Self::new(ModuleResolver::default())
    }
}

impl MetadataSource for JsonModuleSource {
    fn load(&self, path: &Path) -> MetadataResult<Module> {
        debug!(path = %path.display(), "Reading module image");
        let bytes = fs::read(path).map_err(|source| MetadataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let image: ModuleImage =
            serde_json::from_slice(&bytes).map_err(|source| MetadataError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let module = Module::from_image(image)?;
        self.resolve_references(&module)?;

        info!(
            module = %module.name,
            types = module.type_count(),
            references = module.references.len(),
            "Loaded module image"
        );
        Ok(module)
    }

    fn format_name(&self) -> &'static str {
        "json"
    }
}

/// Writes modules as JSON images, creating parent directories as needed
#[derive(Debug, Clone)]
pub struct JsonModuleSink {
    pretty: bool,
}

impl JsonModuleSink {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn render(&self, module: &Module) -> MetadataResult<String> {
        let image = module.to_image();
        let text = if self.pretty {
            serde_json::to_string_pretty(&image)?
        } else {
            serde_json::to_string(&image)?
        };
        Ok(text)
    }
}

impl Default for JsonModuleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataSink for JsonModuleSink {
    fn save(&self, module: &Module, path: &Path) -> MetadataResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| MetadataError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let text = self.render(module)?;
        fs::write(path, text).map_err(|source| MetadataError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        info!(module = %module.name, path = %path.display(), "Wrote module image");
        Ok(())
    }

    fn format_name(&self) -> &'static str {
        "json"
    }
}
