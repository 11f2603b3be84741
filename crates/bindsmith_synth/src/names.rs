//! Generated symbol names.
//!
//! Every symbol is a function of the owner prefix, the bound name and the
//! overload index, so unchanged input always yields the same identifiers.

use bindsmith_model::{ClassId, Model, NamespaceId};
use bindsmith_symbol::DottedId;
use serde::Serialize;

/// Prefix of symbols bound in the global namespace.
pub const GLOBAL_PREFIX: &str = "global";

/// Host table receiving the global namespace's functions.
pub const GLOBAL_TABLE: &str = "_G";

/// Scope whose registration table receives a binding.
///
/// Inherited methods are owned by the subclass binding them, not by the
/// class declaring them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Owner {
    Namespace(NamespaceId),
    Class(ClassId),
}

impl Owner {
    /// `Mat` for a class, `cv_ml` for a namespace.
    pub fn prefix(self, model: &Model) -> String {
        match self {
            Owner::Class(id) => model.class(id).name().to_string(),
            Owner::Namespace(id) => {
                let namespace = model.namespace(id);
                if namespace.path.is_empty() {
                    GLOBAL_PREFIX.to_string()
                } else {
                    namespace.id_name().underscored()
                }
            }
        }
    }

    pub fn id(self, model: &Model) -> DottedId {
        match self {
            Owner::Class(id) => model.class(id).id_name(),
            Owner::Namespace(id) => model.namespace(id).id_name(),
        }
    }
}

/// `Mat_copyTo`, or `Mat_copyTo2` for the second overload.
pub fn member_symbol(prefix: &str, name: &str, index: Option<usize>) -> String {
    match index {
        Some(index) => format!("{prefix}_{name}{index}"),
        None => format!("{prefix}_{name}"),
    }
}

/// Key a member is registered under in its owner's tables. Static methods
/// live in the class-level table next to the constructor, so they carry the
/// class prefix (`Mat_zeros`).
pub fn registration_name(owner: Owner, prefix: &str, name: &str, is_static: bool) -> String {
    match owner {
        Owner::Class(_) if is_static => member_symbol(prefix, name, None),
        _ => name.to_string(),
    }
}

pub fn opener_symbol(lib_name: &str) -> String {
    format!("luaopen_{lib_name}")
}
