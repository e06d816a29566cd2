//! Visibility rewrite for module metadata.
//!
//! [`publicize`] walks every type in a [`metadata::Module`], including nested
//! types at any depth, and promotes non-public types, methods and fields to
//! public. Fields that share their name with an event on the same type are
//! left alone so event backing storage stays hidden. The pass never demotes
//! anything, so running it twice is harmless: the second run reports zero.

pub mod accessor;
pub mod enumerate;
pub mod rewrite;

pub use accessor::AccessorKind;
pub use enumerate::all_types;
pub use rewrite::{
    publicize, publicize_fields, publicize_methods, publicize_types, PublicizeReport,
};
