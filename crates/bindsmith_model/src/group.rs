use serde::Serialize;

use crate::scope::FunctionRef;

/// Same-named functions of one scope, in discovery order.
///
/// The overload index of a member is its position plus one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverloadGroup {
    pub name: String,
    pub members: Vec<FunctionRef>,
}

impl OverloadGroup {
    pub fn new(name: impl Into<String>, members: Vec<FunctionRef>) -> Self {
        Self {
            name: name.into(),
            members,
        }
    }

    /// Members paired with their 1-based overload index.
    pub fn indexed(&self) -> impl Iterator<Item = (usize, FunctionRef)> + '_ {
        self.members
            .iter()
            .enumerate()
            .map(|(pos, member)| (pos + 1, *member))
    }

    /// Member with the given 1-based overload index.
    pub fn get(&self, index: usize) -> Option<FunctionRef> {
        index
            .checked_sub(1)
            .and_then(|pos| self.members.get(pos))
            .copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// A named entry of a scope: one function, or several sharing the name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Member {
    Function { function: FunctionRef },
    Group { group: OverloadGroup },
}

impl Member {
    pub fn function(function: FunctionRef) -> Self {
        Member::Function { function }
    }

    pub fn group(group: OverloadGroup) -> Self {
        Member::Group { group }
    }

    /// Wraps `members`, collapsing a single function out of its group.
    pub fn from_functions(name: &str, mut members: Vec<FunctionRef>) -> Option<Self> {
        match members.len() {
            0 => None,
            1 => members.pop().map(Member::function),
            _ => Some(Member::group(OverloadGroup::new(name, members))),
        }
    }

    pub fn functions(&self) -> Vec<FunctionRef> {
        match self {
            Member::Function { function } => vec![*function],
            Member::Group { group } => group.members.clone(),
        }
    }

    pub fn as_group(&self) -> Option<&OverloadGroup> {
        match self {
            Member::Group { group } => Some(group),
            Member::Function { .. } => None,
        }
    }
}
