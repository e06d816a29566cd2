//! Serialized form of a module.
//!
//! An image lists every type in one flat array. A nested type names its
//! declaring type by position in that array, and declaring types always come
//! first. Keeping the document flat means nesting depth never turns into JSON
//! depth, so any module the sink writes can be read back.

use crate::source::{MetadataError, MetadataResult};
use crate::types::{EventDef, FieldDef, MethodDef, Module, TypeDef, TypeId, TypeVisibility};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleImage {
    pub name: String,
    #[serde(default)]
    pub references: Vec<String>,
    #[serde(default)]
    pub types: Vec<TypeImage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeImage {
    #[serde(default)]
    pub namespace: String,
    pub name: String,
    /// Position of the declaring type in [`ModuleImage::types`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declaring: Option<usize>,
    #[serde(default)]
    pub visibility: TypeVisibility,
    #[serde(default)]
    pub methods: Vec<MethodDef>,
    #[serde(default)]
    pub fields: Vec<FieldDef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<EventDef>,
}

impl TypeImage {
    fn full_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }
}

impl Module {
    /// Build a module from its image, rejecting forward or dangling
    /// `declaring` indices and visibilities that do not fit the type's
    /// position in the nesting tree
    pub fn from_image(image: ModuleImage) -> MetadataResult<Module> {
        let mut module = Module::new(image.name);
        module.references = image.references;

        for (index, ty) in image.types.into_iter().enumerate() {
            let parent = match ty.declaring {
                Some(declaring) if declaring >= index => {
                    return Err(MetadataError::InvalidImage {
                        message: format!(
                            "type '{}' at position {} names declaring type {} which is not listed before it",
                            ty.full_name(),
                            index,
                            declaring
                        ),
                    });
                }
                Some(declaring) => Some(TypeId(declaring)),
                None => None,
            };

            let nested_kind = ty.visibility.is_nested_kind();
            if parent.is_none() && nested_kind {
                return Err(MetadataError::InvalidImage {
                    message: format!(
                        "top-level type '{}' has nested visibility {:?}",
                        ty.full_name(),
                        ty.visibility
                    ),
                });
            }
            if parent.is_some() && !nested_kind {
                return Err(MetadataError::InvalidImage {
                    message: format!(
                        "nested type '{}' has top-level visibility {:?}",
                        ty.full_name(),
                        ty.visibility
                    ),
                });
            }

            let TypeImage {
                namespace,
                name,
                visibility,
                methods,
                fields,
                events,
                ..
            } = ty;
            let mut def = TypeDef::new(namespace, name).with_visibility(visibility);
            def.methods = methods;
            def.fields = fields;
            def.events = events;

            module.push_raw(parent, def);
        }

        Ok(module)
    }

    /// Flatten the module into an image in type table order
    pub fn to_image(&self) -> ModuleImage {
        // Every insertion path adds a declaring type before its nested types,
        // so table order already satisfies the image's ordering rule.
        let types = self
            .types()
            .map(|(_, ty)| TypeImage {
                namespace: ty.namespace.clone(),
                name: ty.name.clone(),
                declaring: ty.declaring_type().map(TypeId::index),
                visibility: ty.visibility(),
                methods: ty.methods.clone(),
                fields: ty.fields.clone(),
                events: ty.events.clone(),
            })
            .collect();

        ModuleImage {
            name: self.name.clone(),
            references: self.references.clone(),
            types,
        }
    }
}
