//! Entity model for module metadata.
//!
//! Types live in a flat arena owned by [`Module`] and are addressed by
//! [`TypeId`]. Nesting is recorded on both ends: a nested type knows its
//! declaring type and every type keeps the ordered list of its nested types.
//! Methods, fields and events are owned by their declaring [`TypeDef`], so the
//! `TypeId` of that slot doubles as the member's back-reference.

use crate::source::{MetadataError, MetadataResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

/// Index of a type inside its module's type table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeId(pub(crate) usize);

impl TypeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Visibility of a type, mirroring the CLI `TypeAttributes` visibility mask
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeVisibility {
    /// Top-level type visible only inside its module
    #[default]
    NotPublic,
    /// Top-level type visible outside its module
    Public,
    NestedPublic,
    NestedPrivate,
    NestedFamily,
    NestedAssembly,
    NestedFamAndAssem,
    NestedFamOrAssem,
}

impl TypeVisibility {
    /// Whether this value is only meaningful on a nested type
    pub fn is_nested_kind(self) -> bool {
        !matches!(self, TypeVisibility::NotPublic | TypeVisibility::Public)
    }

    /// Map a visibility onto the closest value a nested type can carry
    pub fn as_nested(self) -> Self {
        match self {
            TypeVisibility::NotPublic => TypeVisibility::NestedPrivate,
            TypeVisibility::Public => TypeVisibility::NestedPublic,
            nested => nested,
        }
    }

    /// Map a visibility onto the closest value a top-level type can carry
    pub fn as_top_level(self) -> Self {
        match self {
            TypeVisibility::Public | TypeVisibility::NestedPublic => TypeVisibility::Public,
            _ => TypeVisibility::NotPublic,
        }
    }
}

/// Accessibility of a method or field, mirroring the CLI member access mask
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemberAccess {
    CompilerControlled,
    #[default]
    Private,
    FamAndAssem,
    Assembly,
    Family,
    FamOrAssem,
    Public,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDef {
    pub name: String,
    #[serde(default)]
    pub access: MemberAccess,
}

impl MethodDef {
    pub fn new(name: impl Into<String>, access: MemberAccess) -> Self {
        Self {
            name: name.into(),
            access,
        }
    }

    pub fn is_public(&self) -> bool {
        self.access == MemberAccess::Public
    }

    pub fn set_public(&mut self) {
        self.access = MemberAccess::Public;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    #[serde(default)]
    pub access: MemberAccess,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, access: MemberAccess) -> Self {
        Self {
            name: name.into(),
            access,
        }
    }

    pub fn is_public(&self) -> bool {
        self.access == MemberAccess::Public
    }

    pub fn set_public(&mut self) {
        self.access = MemberAccess::Public;
    }
}

/// An event declaration. Only its name is modelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDef {
    pub name: String,
}

impl EventDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A declared type and the members it owns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDef {
    pub namespace: String,
    pub name: String,
    pub methods: Vec<MethodDef>,
    pub fields: Vec<FieldDef>,
    pub events: Vec<EventDef>,
    visibility: TypeVisibility,
    declaring: Option<TypeId>,
    nested: Vec<TypeId>,
}

impl TypeDef {
    /// Create a detached, non-public type with no members
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            methods: Vec::new(),
            fields: Vec::new(),
            events: Vec::new(),
            visibility: TypeVisibility::NotPublic,
            declaring: None,
            nested: Vec::new(),
        }
    }

    pub fn with_visibility(mut self, visibility: TypeVisibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_method(mut self, method: MethodDef) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_event(mut self, event: EventDef) -> Self {
        self.events.push(event);
        self
    }

    /// `Namespace.Name`, or just the name for types without a namespace
    pub fn full_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }

    pub fn visibility(&self) -> TypeVisibility {
        self.visibility
    }

    pub fn is_public(&self) -> bool {
        self.visibility == TypeVisibility::Public
    }

    pub fn is_nested_public(&self) -> bool {
        self.visibility == TypeVisibility::NestedPublic
    }

    pub fn is_nested(&self) -> bool {
        self.declaring.is_some()
    }

    pub fn set_public(&mut self) {
        self.visibility = TypeVisibility::Public;
    }

    pub fn set_nested_public(&mut self) {
        self.visibility = TypeVisibility::NestedPublic;
    }

    pub fn declaring_type(&self) -> Option<TypeId> {
        self.declaring
    }

    pub fn nested_types(&self) -> &[TypeId] {
        &self.nested
    }

    /// Whether any event on this type is named exactly `name`
    pub fn has_event(&self, name: &str) -> bool {
        self.events.iter().any(|event| event.name == name)
    }
}

/// A loaded module: its references and its type table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Module {
    pub name: String,
    /// Names of other modules this one refers to
    pub references: Vec<String>,
    types: Vec<TypeDef>,
    roots: Vec<TypeId>,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.references.push(reference.into());
        self
    }

    /// Add a top-level type. Nested-only visibilities are mapped onto their
    /// top-level counterparts.
    pub fn add_type(&mut self, mut ty: TypeDef) -> TypeId {
        ty.visibility = ty.visibility.as_top_level();
        ty.declaring = None;
        ty.nested.clear();
        let id = TypeId(self.types.len());
        self.types.push(ty);
        self.roots.push(id);
        id
    }

    /// Add a type nested inside `parent`. Top-level visibilities are mapped
    /// onto their nested counterparts.
    pub fn add_nested_type(&mut self, parent: TypeId, mut ty: TypeDef) -> MetadataResult<TypeId> {
        if parent.0 >= self.types.len() {
            return Err(MetadataError::UnknownType(parent.0));
        }
        ty.visibility = ty.visibility.as_nested();
        ty.declaring = Some(parent);
        ty.nested.clear();
        let id = TypeId(self.types.len());
        self.types.push(ty);
        self.types[parent.0].nested.push(id);
        Ok(id)
    }

    /// Insert a type exactly as described, used when rebuilding from an image
    pub(crate) fn push_raw(&mut self, parent: Option<TypeId>, mut ty: TypeDef) -> TypeId {
        let id = TypeId(self.types.len());
        ty.declaring = parent;
        ty.nested.clear();
        self.types.push(ty);
        match parent {
            Some(parent) => self.types[parent.0].nested.push(id),
            None => self.roots.push(id),
        }
        id
    }

    /// Top-level types in declaration order
    pub fn roots(&self) -> &[TypeId] {
        &self.roots
    }

    pub fn get(&self, id: TypeId) -> Option<&TypeDef> {
        self.types.get(id.0)
    }

    pub fn get_mut(&mut self, id: TypeId) -> Option<&mut TypeDef> {
        self.types.get_mut(id.0)
    }

    /// Every type in table order, paired with its id
    pub fn types(&self) -> impl Iterator<Item = (TypeId, &TypeDef)> {
        self.types
            .iter()
            .enumerate()
            .map(|(index, ty)| (TypeId(index), ty))
    }

    /// Look a type up by its full name, nested types included
    pub fn find_type(&self, full_name: &str) -> Option<TypeId> {
        self.types()
            .find(|(_, ty)| ty.full_name() == full_name)
            .map(|(id, _)| id)
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Index<TypeId> for Module {
    type Output = TypeDef;

    fn index(&self, id: TypeId) -> &TypeDef {
        &self.types[id.0]
    }
}

impl IndexMut<TypeId> for Module {
    fn index_mut(&mut self, id: TypeId) -> &mut TypeDef {
        &mut self.types[id.0]
    }
}
