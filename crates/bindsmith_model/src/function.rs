use bindsmith_symbol::DottedId;
use serde::Serialize;

use crate::argument::{Argument, ListRole};
use crate::scope::ScopeRef;
use crate::tree::{SourceLocation, Visibility};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Function {
    pub name: String,
    pub scope: ScopeRef,
    pub id: DottedId,
    pub arguments: Vec<Argument>,
    pub return_value: Option<Argument>,
    pub is_static: bool,
    pub is_constructor: bool,
    pub is_template: bool,
    pub is_const: bool,
    pub visibility: Visibility,
    pub is_variadic: bool,
    /// Declaration text as found in the source.
    pub declaration: String,
    pub location: Option<SourceLocation>,
}

impl Function {
    #[inline]
    pub fn is_member_method(&self) -> bool {
        matches!(self.scope, ScopeRef::Class(_))
    }

    #[inline]
    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    #[inline]
    pub fn is_destructor(&self) -> bool {
        self.name.starts_with('~')
    }

    pub fn is_operator(&self) -> bool {
        self.name.strip_prefix("operator").is_some_and(|rest| {
            !rest.starts_with(|c: char| c.is_alphanumeric() || c == '_')
        })
    }

    pub fn has_default_arguments(&self) -> bool {
        self.arguments.iter().any(Argument::has_default)
    }

    /// Called on an object: the receiver sits at host stack position 1.
    #[inline]
    pub fn has_receiver(&self) -> bool {
        self.is_member_method() && !self.is_static && !self.is_constructor
    }

    /// Host stack slots taken before the first argument.
    #[inline]
    pub fn dispatch_offset(&self) -> usize {
        usize::from(self.has_receiver())
    }

    /// Arguments the host passes explicitly (list counts are computed).
    pub fn host_arguments(&self) -> impl Iterator<Item = &Argument> {
        self.arguments
            .iter()
            .filter(|arg| arg.list_role != ListRole::Count)
    }

    /// `file:line` of the declaration, when known.
    pub fn source(&self) -> Option<String> {
        self.location.as_ref().map(ToString::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::{ClassId, NamespaceId};

    fn function(name: &str, scope: ScopeRef) -> Function {
        Function {
            name: name.to_string(),
            scope,
            id: DottedId::new(name),
            arguments: Vec::new(),
            return_value: None,
            is_static: false,
            is_constructor: false,
            is_template: false,
            is_const: false,
            visibility: Visibility::Public,
            is_variadic: false,
            declaration: String::new(),
            location: None,
        }
    }

    #[test]
    fn test_operator_detection() {
        let ns = ScopeRef::Namespace(NamespaceId(0));
        assert!(function("operator+", ns).is_operator());
        assert!(function("operator()", ns).is_operator());
        assert!(function("operator double", ns).is_operator());
        assert!(!function("operatorName", ns).is_operator());
        assert!(!function("resize", ns).is_operator());
    }

    #[test]
    fn test_dispatch_offset() {
        let class = ScopeRef::Class(ClassId(0));
        assert_eq!(function("rows", class).dispatch_offset(), 1);

        let mut ctor = function("Mat", class);
        ctor.is_constructor = true;
        assert_eq!(ctor.dispatch_offset(), 0);

        let mut stat = function("zeros", class);
        stat.is_static = true;
        assert_eq!(stat.dispatch_offset(), 0);

        assert_eq!(function("abs", ScopeRef::Namespace(NamespaceId(0))).dispatch_offset(), 0);
        assert!(function("~Mat", class).is_destructor());
    }
}
