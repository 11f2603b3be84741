use std::collections::BTreeMap;

use bindsmith_symbol::{DottedId, Symbol};
use once_cell::unsync::OnceCell;

use crate::directives::{BindingDirectives, DestructorPolicy};
use crate::error::ModelError;
use crate::group::Member;
use crate::members::ScopeMembers;
use crate::overrides::OverrideTable;
use crate::scope::{ClassId, NamespaceId};
use crate::tree::{DeclNode, NodeKind, SourceLocation};

/// A C++ class, concrete or template.
#[derive(Debug)]
pub struct Class {
    pub id: ClassId,
    name: String,
    aliases: Vec<String>,
    /// Name used in the declaration, which is what constructors are called.
    source_name: String,
    pub namespace: NamespaceId,
    scope: Vec<String>,
    pub(crate) node: DeclNode,
    pub template_params: Vec<String>,
    /// Concrete classes discovered for argument lists of this template.
    pub instantiations: BTreeMap<Vec<String>, ClassId>,
    pub enums: Vec<String>,
    pub superclasses: Vec<String>,
    pub directives: BindingDirectives,
    /// Set when the directive block failed to parse; the class is not bound.
    pub directive_error: Option<ModelError>,
    pub(crate) members: OnceCell<ScopeMembers>,
    pub(crate) bindable: OnceCell<Vec<Member>>,
    pub(crate) overrides: OnceCell<OverrideTable>,
}

impl Class {
    pub(crate) fn new(
        id: ClassId,
        namespace: NamespaceId,
        scope: Vec<String>,
        name: &str,
        node: DeclNode,
    ) -> Self {
        let (directives, directive_error) = match node.directive.as_deref() {
            Some(text) => match BindingDirectives::parse(name, text) {
                Ok(directives) => (directives, None),
                Err(err) => (BindingDirectives::default(), Some(err)),
            },
            None => (BindingDirectives::default(), None),
        };
        let enums = node
            .children_of(NodeKind::Enum)
            .flat_map(|e| e.children_of(NodeKind::EnumValue))
            .map(|value| value.name.clone())
            .collect();
        let superclasses = directives
            .superclasses
            .clone()
            .unwrap_or_else(|| node.superclasses.clone());
        let template_params = node
            .template_params
            .iter()
            .map(|param| strip_template_keyword(param))
            .collect();

        Self {
            id,
            name: name.to_string(),
            aliases: Vec::new(),
            source_name: node.name.clone(),
            namespace,
            scope,
            node,
            template_params,
            instantiations: BTreeMap::new(),
            enums,
            superclasses,
            directives,
            directive_error,
            members: OnceCell::new(),
            bindable: OnceCell::new(),
            overrides: OnceCell::new(),
        }
    }

    /// Canonical name: the shortest of the declared name and its aliases.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Canonical name followed by every alias.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Registers an alias, promoting it to canonical when it is shorter.
    pub(crate) fn add_alias(&mut self, alias: &str) {
        if alias == self.name || self.aliases.iter().any(|a| a == alias) {
            return;
        }
        if alias.len() < self.name.len() {
            let previous = std::mem::replace(&mut self.name, alias.to_string());
            self.aliases.push(previous);
        } else {
            self.aliases.push(alias.to_string());
        }
    }

    #[inline]
    pub fn is_template(&self) -> bool {
        !self.template_params.is_empty()
    }

    /// Scope-qualified C++ name (`cv::Size`).
    pub fn full_type(&self) -> Symbol {
        Symbol::scoped(&self.scope, &self.name)
    }

    /// Host tag (`cv.Size`).
    pub fn id_name(&self) -> DottedId {
        self.full_type().dotted()
    }

    pub fn scope_path(&self) -> &[String] {
        &self.scope
    }

    pub fn location(&self) -> Option<&SourceLocation> {
        self.node.location.as_ref()
    }

    /// Header to include for the class.
    pub fn header(&self) -> Option<String> {
        self.directives
            .header
            .clone()
            .or_else(|| self.location().map(|loc| loc.header().to_string()))
    }

    /// Library name used for the opener symbol.
    pub fn lib_name(&self) -> String {
        self.directives
            .lib_name
            .clone()
            .unwrap_or_else(|| self.id_name().underscored())
    }

    pub fn destructor(&self) -> &DestructorPolicy {
        &self.directives.destructor
    }

    pub fn is_bindable(&self) -> bool {
        self.directive_error.is_none() && !self.is_template()
    }
}

/// `typename T` and `class T` name the parameter `T`.
pub(crate) fn strip_template_keyword(param: &str) -> String {
    let param = param.trim();
    for keyword in ["typename ", "class "] {
        if let Some(rest) = param.strip_prefix(keyword) {
            return rest.trim().to_string();
        }
    }
    param.to_string()
}
