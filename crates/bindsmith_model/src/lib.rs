//! Declaration model for the binding generator.
//!
//! Builds namespaces, classes, functions and arguments from a declaration
//! tree, resolves typedef aliases and explicit template instantiations, and
//! exposes the bindable view of each scope after eligibility filtering and
//! inheritance flattening.

pub mod argument;
pub mod class;
pub mod directives;
pub mod eligibility;
pub mod error;
pub mod function;
pub mod group;
pub mod members;
pub mod model;
pub mod namespace;
pub mod overrides;
pub mod scope;
pub mod template;
pub mod tree;

pub use argument::{Argument, ListRole};
pub use class::Class;
pub use directives::{BindingDirectives, DestructorPolicy};
pub use eligibility::Exclusion;
pub use error::{Diagnostic, ModelError, Severity};
pub use function::Function;
pub use group::{Member, OverloadGroup};
pub use members::ScopeMembers;
pub use model::{Entry, Model};
pub use namespace::Namespace;
pub use overrides::OverrideTable;
pub use scope::{ClassId, FunctionRef, NamespaceId, ScopeRef};
pub use tree::{DeclNode, ListPair, NodeKind, SourceLocation, Visibility};
