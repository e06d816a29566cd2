/// How a method name reads under the property accessor naming convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessorKind {
    Getter,
    Setter,
    Plain,
}

impl AccessorKind {
    /// Classify by prefix only; `get_` and `set_` are case sensitive.
    pub fn classify(name: &str) -> Self {
        if name.starts_with("get_") {
            AccessorKind::Getter
        } else if name.starts_with("set_") {
            AccessorKind::Setter
        } else {
            AccessorKind::Plain
        }
    }
}
