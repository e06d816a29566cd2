use crate::accessor::AccessorKind;
use crate::enumerate::all_types;
use metadata::{Module, TypeId};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// How many declarations a [`publicize`] run changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicizeReport {
    pub types: usize,
    /// All promoted methods, accessors included
    pub methods: usize,
    pub getters: usize,
    pub setters: usize,
    pub fields: usize,
}

impl PublicizeReport {
    pub fn plain_methods(&self) -> usize {
        self.methods
            .saturating_sub(self.getters)
            .saturating_sub(self.setters)
    }

    pub fn total(&self) -> usize {
        self.types + self.methods + self.fields
    }

    /// True when nothing was changed
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

impl fmt::Display for PublicizeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Changed {} types to public", self.types)?;
        writeln!(
            f,
            "Changed {} methods to public ({} getters, {} setters)",
            self.methods, self.getters, self.setters
        )?;
        write!(f, "Changed {} fields to public", self.fields)
    }
}

/// Promote every non-public type, method and field in `module` to public.
///
/// Nested types get nested-public visibility, top-level types get public.
/// A field is skipped when an event on its declaring type has the same name.
pub fn publicize(module: &mut Module) -> PublicizeReport {
    let ids = all_types(module);

    let types = publicize_types(module, &ids);
    let (methods, getters, setters) = publicize_methods(module, &ids);
    let fields = publicize_fields(module, &ids);

    let report = PublicizeReport {
        types,
        methods,
        getters,
        setters,
        fields,
    };
    debug!(module = %module.name, ?report, "Publicized module");
    report
}

/// Returns the number of types promoted
pub fn publicize_types(module: &mut Module, ids: &[TypeId]) -> usize {
    let mut changed = 0;
    for &id in ids {
        let ty = &mut module[id];
        if ty.is_public() || ty.is_nested_public() {
            continue;
        }
        if ty.is_nested() {
            ty.set_nested_public();
        } else {
            ty.set_public();
        }
        changed += 1;
    }
    debug!(changed, "Type pass finished");
    changed
}

/// Returns `(methods, getters, setters)` promoted
pub fn publicize_methods(module: &mut Module, ids: &[TypeId]) -> (usize, usize, usize) {
    let (mut methods, mut getters, mut setters) = (0, 0, 0);
    for &id in ids {
        for method in module[id].methods.iter_mut().filter(|m| !m.is_public()) {
            match AccessorKind::classify(&method.name) {
                AccessorKind::Getter => getters += 1,
                AccessorKind::Setter => setters += 1,
                AccessorKind::Plain => {}
            }
            method.set_public();
            methods += 1;
        }
    }
    debug!(methods, getters, setters, "Method pass finished");
    (methods, getters, setters)
}

/// Returns the number of fields promoted. Fields named like an event on the
/// same type are never touched.
pub fn publicize_fields(module: &mut Module, ids: &[TypeId]) -> usize {
    let mut changed = 0;
    for &id in ids {
        let ty = &module[id];
        let eligible: Vec<usize> = ty
            .fields
            .iter()
            .enumerate()
            .filter(|(_, field)| !field.is_public() && !ty.has_event(&field.name))
            .map(|(index, _)| index)
            .collect();

        let ty = &mut module[id];
        for index in eligible {
            ty.fields[index].set_public();
            changed += 1;
        }
    }
    debug!(changed, "Field pass finished");
    changed
}
