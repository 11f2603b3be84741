use serde::Serialize;

/// Index of a [`Namespace`](crate::Namespace) in the model arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct NamespaceId(pub(crate) usize);

/// Index of a [`Class`](crate::Class) in the model arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ClassId(pub(crate) usize);

/// A scope that owns functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ScopeRef {
    Namespace(NamespaceId),
    Class(ClassId),
}

/// Stable handle on a function: its owning scope and its slot in that
/// scope's function list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct FunctionRef {
    pub scope: ScopeRef,
    pub index: usize,
}

impl FunctionRef {
    pub fn new(scope: ScopeRef, index: usize) -> Self {
        Self { scope, index }
    }

    pub fn class(&self) -> Option<ClassId> {
        match self.scope {
            ScopeRef::Class(id) => Some(id),
            ScopeRef::Namespace(_) => None,
        }
    }
}
