//! Module metadata entity model plus the loading and saving collaborators
//! used around the visibility rewrite.

pub mod image;
pub mod json;
pub mod resolver;
pub mod source;
pub mod types;

pub use image::{ModuleImage, TypeImage};
pub use json::{JsonModuleSink, JsonModuleSource, IMAGE_EXTENSION};
pub use resolver::ModuleResolver;
pub use source::{MetadataError, MetadataResult, MetadataSink, MetadataSource};
pub use types::{
    EventDef, FieldDef, MemberAccess, MethodDef, Module, TypeDef, TypeId, TypeVisibility,
};
