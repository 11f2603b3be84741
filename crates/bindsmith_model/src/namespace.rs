use std::collections::BTreeMap;

use bindsmith_symbol::{DottedId, Symbol};
use once_cell::unsync::OnceCell;

use crate::members::ScopeMembers;
use crate::scope::{ClassId, NamespaceId};
use crate::tree::DeclNode;

#[derive(Debug)]
pub struct Namespace {
    pub id: NamespaceId,
    pub name: String,
    /// Scope segments from the root (`["cv", "ml"]`).
    pub path: Vec<String>,
    pub parent: Option<NamespaceId>,
    pub children: Vec<NamespaceId>,
    /// Every concrete class name, aliases included.
    pub(crate) classes: BTreeMap<String, ClassId>,
    /// Concrete classes in declaration order.
    pub(crate) class_order: Vec<ClassId>,
    pub(crate) template_classes: BTreeMap<String, ClassId>,
    /// Typedefs of native types (`typedef unsigned char uchar`).
    pub(crate) native_aliases: BTreeMap<String, String>,
    pub enums: Vec<String>,
    pub defines: Vec<String>,
    pub(crate) function_nodes: Vec<DeclNode>,
    pub(crate) members: OnceCell<ScopeMembers>,
}

impl Namespace {
    pub(crate) fn new(
        id: NamespaceId,
        name: &str,
        path: Vec<String>,
        parent: Option<NamespaceId>,
    ) -> Self {
        Self {
            id,
            name: name.to_string(),
            path,
            parent,
            children: Vec::new(),
            classes: BTreeMap::new(),
            class_order: Vec::new(),
            template_classes: BTreeMap::new(),
            native_aliases: BTreeMap::new(),
            enums: Vec::new(),
            defines: Vec::new(),
            function_nodes: Vec::new(),
            members: OnceCell::new(),
        }
    }

    /// `::` separated path (`cv::ml`).
    pub fn full_name(&self) -> String {
        self.path.join("::")
    }

    pub fn id_name(&self) -> DottedId {
        DottedId::new(self.path.join("."))
    }

    /// Qualifies `name` with this namespace (`cv::name`).
    pub fn qualify(&self, name: &str) -> Symbol {
        Symbol::scoped(&self.path, name)
    }

    pub fn class_id(&self, name: &str) -> Option<ClassId> {
        self.classes.get(name).copied()
    }

    pub fn template_class_id(&self, name: &str) -> Option<ClassId> {
        self.template_classes.get(name).copied()
    }

    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    pub fn class_order(&self) -> &[ClassId] {
        &self.class_order
    }

    pub(crate) fn register_class(&mut self, name: &str, id: ClassId) {
        if self.classes.insert(name.to_string(), id).is_none() && !self.class_order.contains(&id) {
            self.class_order.push(id);
        }
    }
}
