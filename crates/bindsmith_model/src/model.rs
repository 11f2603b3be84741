//! Arena holding every namespace and class of one declaration tree.
//!
//! Classes and namespaces are registered eagerly; their functions are
//! materialized on first access and cached.

use std::cell::RefCell;
use std::collections::BTreeMap;

use bindsmith_config::GeneratorConfig;
use bindsmith_symbol::{DottedId, Symbol};
use bindsmith_ty::{TypeDescriptor, native, parse_declarator};
use tracing::{debug, warn};

use crate::argument::{Argument, ListRole};
use crate::class::Class;
use crate::directives::BindingDirectives;
use crate::eligibility;
use crate::error::{Diagnostic, ModelError};
use crate::function::Function;
use crate::group::Member;
use crate::members::ScopeMembers;
use crate::namespace::Namespace;
use crate::overrides::OverrideTable;
use crate::scope::{ClassId, FunctionRef, NamespaceId, ScopeRef};
use crate::template;
use crate::tree::{DeclNode, NodeKind};

/// Result of a by-name lookup in a namespace.
#[derive(Debug, Clone, Copy)]
pub enum Entry<'a> {
    Class(&'a Class),
    Member(&'a Member),
}

/// A type reference resolved against the model.
struct ResolvedType {
    ty: TypeDescriptor,
    full_type: Symbol,
    id: DottedId,
    complex: bool,
}

pub struct Model {
    config: GeneratorConfig,
    namespaces: Vec<Namespace>,
    namespace_index: BTreeMap<String, NamespaceId>,
    classes: Vec<Class>,
    diagnostics: RefCell<Vec<Diagnostic>>,
}

struct Flattened {
    members: Vec<Member>,
    cyclic: bool,
}

impl Model {
    /// Registers the namespaces, classes and typedefs found in `roots`.
    ///
    /// Nodes outside any namespace land in the global namespace, whose
    /// path is empty.
    pub fn build(roots: &[DeclNode], config: GeneratorConfig) -> Self {
        let mut model = Self {
            config,
            namespaces: Vec::new(),
            namespace_index: BTreeMap::new(),
            classes: Vec::new(),
            diagnostics: RefCell::new(Vec::new()),
        };
        let global = model.namespace_for(Vec::new(), None);
        let mut typedefs = Vec::new();
        model.collect(global, roots, &mut typedefs);
        // Typedefs may name classes declared after them.
        for (ns, node) in typedefs {
            model.apply_typedef(ns, &node);
        }
        debug!(
            namespaces = model.namespaces.len(),
            classes = model.classes.len(),
            "declaration model built"
        );
        model
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    fn namespace_for(&mut self, path: Vec<String>, parent: Option<NamespaceId>) -> NamespaceId {
        let key = path.join("::");
        if let Some(&id) = self.namespace_index.get(&key) {
            return id;
        }
        let id = NamespaceId(self.namespaces.len());
        let name = path.last().cloned().unwrap_or_default();
        self.namespaces.push(Namespace::new(id, &name, path, parent));
        self.namespace_index.insert(key, id);
        if let Some(parent) = parent {
            self.namespaces[parent.0].children.push(id);
        }
        id
    }

    fn collect(&mut self, ns: NamespaceId, nodes: &[DeclNode], typedefs: &mut Vec<(NamespaceId, DeclNode)>) {
        for node in nodes {
            match node.kind {
                NodeKind::Namespace => {
                    // `outer::inner` opens both levels.
                    let mut child = ns;
                    for segment in node.name.split("::").map(str::trim).filter(|s| !s.is_empty()) {
                        let mut path = self.namespaces[child.0].path.clone();
                        path.push(segment.to_string());
                        child = self.namespace_for(path, Some(child));
                    }
                    self.collect(child, &node.children, typedefs);
                }
                NodeKind::Class => {
                    self.add_class(ns, node.clone());
                }
                NodeKind::Function => self.namespaces[ns.0].function_nodes.push(node.clone()),
                NodeKind::Enum => {
                    let values = node.children_of(NodeKind::EnumValue).map(|v| v.name.clone());
                    self.namespaces[ns.0].enums.extend(values);
                }
                NodeKind::Define => self.namespaces[ns.0].defines.push(node.name.clone()),
                NodeKind::Typedef => typedefs.push((ns, node.clone())),
                NodeKind::Parameter | NodeKind::EnumValue | NodeKind::Variable | NodeKind::Slot => {}
            }
        }
    }

    fn add_class(&mut self, ns: NamespaceId, node: DeclNode) -> ClassId {
        let id = ClassId(self.classes.len());
        let scope = self.namespaces[ns.0].path.clone();
        let name = node.name.clone();
        let aliases = node.aliases.clone();
        let class = Class::new(id, ns, scope, &name, node);
        if let Some(err) = &class.directive_error {
            self.record(Diagnostic::error(class.id_name().to_string(), err.to_string()));
        }
        let is_template = class.is_template();
        self.classes.push(class);

        let namespace = &mut self.namespaces[ns.0];
        if is_template {
            namespace.template_classes.insert(name, id);
        } else {
            namespace.register_class(&name, id);
            for alias in aliases {
                self.alias_class(ns, id, &alias);
            }
        }
        id
    }

    fn alias_class(&mut self, ns: NamespaceId, id: ClassId, alias: &str) {
        self.classes[id.0].add_alias(alias);
        let home = self.classes[id.0].namespace;
        self.namespaces[home.0].register_class(alias, id);
        if ns != home {
            self.namespaces[ns.0].register_class(alias, id);
        }
    }

    fn apply_typedef(&mut self, ns: NamespaceId, node: &DeclNode) {
        let entity = self.namespaces[ns.0].id_name().child(&node.name).to_string();
        let underlying = node.type_text.as_deref().unwrap_or("");
        let desc = match parse_declarator(underlying) {
            Ok(desc) => desc,
            Err(err) => {
                self.record(Diagnostic::warning(entity, err.to_string()));
                return;
            }
        };

        if desc.is_templated() {
            let Some(template_id) = self.find_template_class(ns, desc.base_name()) else {
                self.unresolved(&entity, &desc.spelled_base(), "template instantiation");
                return;
            };
            match self.classes[template_id.0]
                .instantiations
                .get(&desc.template_args)
                .copied()
            {
                Some(existing) => self.alias_class(ns, existing, &node.name),
                None => self.instantiate(ns, template_id, desc.template_args, &node.name),
            }
            return;
        }

        if desc.indirection == bindsmith_ty::Indirection::Value && native::is_native(desc.base_name()) {
            self.namespaces[ns.0]
                .native_aliases
                .insert(node.name.clone(), desc.base_name().to_string());
            return;
        }

        match self.find_class(ns, desc.base_name()) {
            Some(id) if desc.indirection == bindsmith_ty::Indirection::Value => {
                self.alias_class(ns, id, &node.name);
            }
            Some(_) => debug!(typedef = %entity, "pointer typedef left unbound"),
            None => self.unresolved(&entity, desc.base_name(), "aliased type"),
        }
    }

    fn instantiate(&mut self, ns: NamespaceId, template_id: ClassId, args: Vec<String>, name: &str) {
        let template = &self.classes[template_id.0];
        let home = template.namespace;
        let node = template::instantiate(&template.node, &template.template_params, &args, name);
        debug!(
            template = %template.id_name(),
            instance = name,
            args = ?args,
            "instantiating template"
        );
        let id = self.add_class(home, node);
        if ns != home {
            self.namespaces[ns.0].register_class(name, id);
        }
        self.classes[template_id.0].instantiations.insert(args, id);
    }

    // ----- lookup -----

    pub fn namespace(&self, id: NamespaceId) -> &Namespace {
        &self.namespaces[id.0]
    }

    pub fn namespaces(&self) -> impl Iterator<Item = &Namespace> {
        self.namespaces.iter()
    }

    /// Finds a namespace by `::` or `.` separated path; `""` is the global one.
    pub fn namespace_id(&self, path: &str) -> Result<NamespaceId, ModelError> {
        let key = path
            .split(['.', ':'])
            .filter(|seg| !seg.is_empty())
            .collect::<Vec<_>>()
            .join("::");
        self.namespace_index
            .get(&key)
            .copied()
            .ok_or_else(|| ModelError::UnknownNamespace(path.to_string()))
    }

    pub fn class(&self, id: ClassId) -> &Class {
        &self.classes[id.0]
    }

    /// Concrete classes of `ns` in declaration order.
    pub fn classes(&self, ns: NamespaceId) -> impl Iterator<Item = &Class> {
        self.namespaces[ns.0]
            .class_order
            .iter()
            .map(|id| &self.classes[id.0])
    }

    /// Concrete class registered in `ns` under `name` (canonical or alias).
    pub fn namespace_class(&self, ns: NamespaceId, name: &str) -> Option<&Class> {
        self.namespaces[ns.0].class_id(name).map(|id| self.class(id))
    }

    /// Class or function entry named `name` directly in `ns`.
    pub fn lookup(&self, ns: NamespaceId, name: &str) -> Option<Entry<'_>> {
        if let Some(class) = self.namespace_class(ns, name) {
            return Some(Entry::Class(class));
        }
        self.get(ScopeRef::Namespace(ns), name).map(Entry::Member)
    }

    /// Resolves `name` (qualified, relative or unqualified) as seen from
    /// `from`, searching enclosing namespaces outward.
    pub fn find_class(&self, from: NamespaceId, name: &str) -> Option<ClassId> {
        self.find_in_scopes(from, name, Namespace::class_id)
    }

    /// Concrete class spelled `full_type` (`cv::Mat`) from the global scope.
    pub fn class_named(&self, full_type: &str) -> Option<&Class> {
        let global = self.namespace_index.get("").copied()?;
        self.find_class(global, full_type).map(|id| self.class(id))
    }

    pub fn find_template_class(&self, from: NamespaceId, name: &str) -> Option<ClassId> {
        self.find_in_scopes(from, name, Namespace::template_class_id)
    }

    fn find_in_scopes(
        &self,
        from: NamespaceId,
        name: &str,
        pick: impl Fn(&Namespace, &str) -> Option<ClassId>,
    ) -> Option<ClassId> {
        let name = name.trim().trim_start_matches("::");
        let (scope, last) = match name.rfind("::") {
            Some(idx) => (Some(&name[..idx]), &name[idx + 2..]),
            None => (None, name),
        };
        let mut current = Some(from);
        while let Some(ns_id) = current {
            let ns = &self.namespaces[ns_id.0];
            let target = match scope {
                None => Some(ns_id),
                Some(scope) => {
                    let base = ns.full_name();
                    let key = if base.is_empty() {
                        scope.to_string()
                    } else {
                        format!("{base}::{scope}")
                    };
                    self.namespace_index.get(&key).copied()
                }
            };
            if let Some(found) = target.and_then(|t| pick(&self.namespaces[t.0], last)) {
                return Some(found);
            }
            current = ns.parent;
        }
        None
    }

    fn native_alias(&self, from: NamespaceId, name: &str) -> Option<&str> {
        let mut current = Some(from);
        while let Some(ns_id) = current {
            let ns = &self.namespaces[ns_id.0];
            if let Some(target) = ns.native_aliases.get(name) {
                return Some(target);
            }
            current = ns.parent;
        }
        None
    }

    // ----- members -----

    /// Every function of `scope`, materializing them on first use.
    pub fn members(&self, scope: ScopeRef) -> &ScopeMembers {
        match scope {
            ScopeRef::Namespace(id) => self.namespaces[id.0]
                .members
                .get_or_init(|| self.materialize(scope, id, None, &self.namespaces[id.0].function_nodes)),
            ScopeRef::Class(id) => {
                let class = &self.classes[id.0];
                class.members.get_or_init(|| {
                    let nodes: Vec<DeclNode> = class.node.children_of(NodeKind::Function).cloned().collect();
                    self.materialize(scope, class.namespace, Some(class), &nodes)
                })
            }
        }
    }

    pub fn function(&self, fref: FunctionRef) -> Option<&Function> {
        self.members(fref.scope).function(fref.index)
    }

    /// Raw lookup, before eligibility filtering. In a class, the class name
    /// or any of its aliases finds the constructor.
    pub fn get(&self, scope: ScopeRef, name: &str) -> Option<&Member> {
        let members = self.members(scope);
        members.get(name).or_else(|| match scope {
            ScopeRef::Class(id) if self.classes[id.0].names().any(|n| n == name) => {
                members.constructor.as_ref()
            }
            _ => None,
        })
    }

    /// Member of an overload group by 1-based overload index.
    pub fn get_overload(&self, scope: ScopeRef, name: &str, index: usize) -> Option<&Function> {
        match self.get(scope, name)? {
            Member::Group { group } => group.get(index).and_then(|f| self.function(f)),
            Member::Function { function } if index == 1 => self.function(*function),
            Member::Function { .. } => None,
        }
    }

    /// Constructor of `class` before filtering.
    pub fn constructor(&self, class: ClassId) -> Option<&Member> {
        self.members(ScopeRef::Class(class)).constructor.as_ref()
    }

    pub fn member_name<'a>(&'a self, member: &'a Member) -> &'a str {
        match member {
            Member::Group { group } => &group.name,
            Member::Function { function } => self.function(*function).map_or("", |f| f.name.as_str()),
        }
    }

    fn materialize(
        &self,
        scope: ScopeRef,
        ns: NamespaceId,
        class: Option<&Class>,
        nodes: &[DeclNode],
    ) -> ScopeMembers {
        let functions = nodes
            .iter()
            .filter_map(|node| match self.build_function(scope, ns, class, node) {
                Ok(function) => Some(function),
                Err(err) => {
                    let owner = match class {
                        Some(class) => class.id_name(),
                        None => self.namespaces[ns.0].id_name(),
                    };
                    self.record(Diagnostic::warning(owner.child(&node.name).to_string(), err.to_string()));
                    None
                }
            })
            .collect();
        ScopeMembers::assemble(scope, functions)
    }

    fn build_function(
        &self,
        scope: ScopeRef,
        ns: NamespaceId,
        class: Option<&Class>,
        node: &DeclNode,
    ) -> Result<Function, ModelError> {
        let is_constructor = class.is_some_and(|c| node.name == c.source_name() || node.name == c.name());
        let name = match class {
            Some(c) if is_constructor => c.name().to_string(),
            _ => node.name.clone(),
        };
        let owner_id = match class {
            Some(c) => c.id_name(),
            None => self.namespaces[ns.0].id_name(),
        };
        let id = owner_id.child(&name);
        let malformed = |source| ModelError::MalformedDeclarator {
            function: node.declaration(),
            source,
        };

        let mut arguments = Vec::new();
        for (position, param) in node.children_of(NodeKind::Parameter).enumerate() {
            let mut desc = parse_declarator(param.type_text.as_deref().unwrap_or("")).map_err(malformed)?;
            if param.array.is_some() {
                desc.array_suffix = param.array.clone();
            }
            let arg_name = if param.name.is_empty() {
                format!("arg{}", position + 1)
            } else if param.name == node.name {
                format!("arg_{}", param.name)
            } else {
                param.name.clone()
            };
            let resolved = self.resolve_type(ns, desc, &id);
            let mut arg = Argument::new(arg_name, position, resolved.ty, resolved.full_type, resolved.id);
            arg.complex = resolved.complex;
            arg.default = param
                .default_text
                .as_deref()
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .map(|text| self.qualify_default(text, ns, class));
            arguments.push(arg);
        }
        for pair in &node.list_args {
            if let Some(arg) = arguments.get_mut(pair.list) {
                arg.list_role = ListRole::List;
            }
            if let Some(arg) = arguments.get_mut(pair.count) {
                arg.list_role = ListRole::Count;
            }
        }

        let return_value = match class {
            Some(c) if is_constructor => {
                let full = c.full_type();
                Some(Argument::return_value(
                    TypeDescriptor::pointer_to(full.clone()),
                    full,
                    c.id_name(),
                ))
            }
            _ => match node.type_text.as_deref().map(str::trim) {
                None | Some("") => None,
                Some(text) => {
                    let desc = parse_declarator(text).map_err(malformed)?;
                    let is_void = desc.base_name() == native::VOID_TYPE
                        && desc.indirection == bindsmith_ty::Indirection::Value;
                    if is_void {
                        None
                    } else {
                        let resolved = self.resolve_type(ns, desc, &id);
                        let mut ret = Argument::return_value(resolved.ty, resolved.full_type, resolved.id);
                        ret.complex = resolved.complex;
                        Some(ret)
                    }
                }
            },
        };

        let is_variadic = node.is_variadic || arguments.iter().any(Argument::is_vararg);
        Ok(Function {
            name,
            scope,
            id,
            arguments,
            return_value,
            is_static: node.is_static,
            is_constructor,
            is_template: !node.template_params.is_empty(),
            is_const: node.is_const,
            visibility: node.visibility,
            is_variadic,
            declaration: node.declaration(),
            location: node.location.clone(),
        })
    }

    fn resolve_type(&self, ns: NamespaceId, desc: TypeDescriptor, entity: &DottedId) -> ResolvedType {
        if desc.variadic {
            return ResolvedType {
                full_type: desc.base.clone(),
                id: desc.base.dotted(),
                ty: desc,
                complex: false,
            };
        }

        let mut desc = desc;
        if desc.is_templated() {
            let instance = self
                .find_template_class(ns, desc.base_name())
                .and_then(|t| self.classes[t.0].instantiations.get(&desc.template_args).copied());
            match instance {
                Some(instance) => desc = desc.resolved_to(self.classes[instance.0].full_type()),
                None => {
                    let spelled = desc.spelled_base();
                    self.unresolved(entity.as_str(), &spelled, "templated type");
                    let full_type = Symbol::from(spelled);
                    return ResolvedType {
                        id: full_type.dotted(),
                        full_type,
                        ty: desc,
                        complex: true,
                    };
                }
            }
        } else if !desc.base.is_qualified()
            && let Some(target) = self.native_alias(ns, desc.base_name())
        {
            desc = desc.resolved_to(target);
        }

        // Builtins are never qualified into a namespace.
        if !desc.base.is_qualified()
            && let Some(builtin) = native::canonical_builtin(desc.base_name())
            && builtin != desc.base_name()
        {
            desc = desc.resolved_to(builtin);
        }

        if native::is_native(desc.base_name()) {
            return ResolvedType {
                full_type: desc.base.clone(),
                id: desc.base.dotted(),
                ty: desc,
                complex: false,
            };
        }

        match self.find_class(ns, desc.base_name()) {
            Some(class_id) => {
                let class = &self.classes[class_id.0];
                let full_type = class.full_type();
                ResolvedType {
                    id: class.id_name(),
                    ty: desc.resolved_to(full_type.clone()),
                    full_type,
                    complex: false,
                }
            }
            None => {
                let full_type = if desc.base.is_qualified() {
                    desc.base.clone()
                } else {
                    self.namespaces[ns.0].qualify(desc.base_name())
                };
                ResolvedType {
                    id: full_type.dotted(),
                    ty: desc.resolved_to(full_type.clone()),
                    full_type,
                    complex: false,
                }
            }
        }
    }

    /// Qualifies an enum constant used as a default (`AUTO_STEP` becomes
    /// `cv::Mat::AUTO_STEP`).
    fn qualify_default(&self, default: &str, ns: NamespaceId, class: Option<&Class>) -> String {
        if let Some(class) = class
            && class.enums.iter().any(|value| value == default)
        {
            return format!("{}::{default}", class.full_type());
        }
        let namespace = &self.namespaces[ns.0];
        if !namespace.path.is_empty() && namespace.enums.iter().any(|value| value == default) {
            return namespace.qualify(default).to_string();
        }
        default.to_string()
    }

    // ----- bindable view -----

    /// Drops ineligible functions from `member`, renumbering survivors.
    pub fn filter_member(&self, member: &Member, directives: Option<&BindingDirectives>) -> Option<Member> {
        let name = self.member_name(member).to_string();
        let survivors = member
            .functions()
            .into_iter()
            .filter(|fref| match self.function(*fref) {
                Some(function) => match eligibility::exclusion(function, &self.config, directives) {
                    None => true,
                    Some(reason) => {
                        debug!(function = %function.id, %reason, "not bound");
                        false
                    }
                },
                None => false,
            })
            .collect();
        Member::from_functions(&name, survivors)
    }

    /// Free functions of `ns` that can be bound, in discovery order.
    pub fn bindable_functions(&self, ns: NamespaceId) -> Vec<Member> {
        self.members(ScopeRef::Namespace(ns))
            .members
            .iter()
            .filter_map(|member| self.filter_member(member, None))
            .collect()
    }

    /// Bindable constructor of `class`.
    pub fn bindable_constructor(&self, class: ClassId) -> Option<Member> {
        let directives = &self.classes[class.0].directives;
        self.constructor(class)
            .and_then(|ctor| self.filter_member(ctor, Some(directives)))
    }

    /// Own bindable members merged with inherited ones, ordered by name.
    /// Own members hide inherited members of the same name.
    pub fn bindable_members(&self, class: ClassId) -> &[Member] {
        self.classes[class.0].bindable.get_or_init(|| {
            let mut open = Vec::new();
            self.flatten(class, &mut open).members
        })
    }

    /// Own filtered members of `id` plus those inherited from every
    /// superclass not already in `open`.
    ///
    /// A superclass result is cached only when its walk met no cycle: inside
    /// a cycle the result depends on where the walk entered it, so those
    /// classes are recomputed from their own entry point.
    fn flatten(&self, id: ClassId, open: &mut Vec<ClassId>) -> Flattened {
        let class = &self.classes[id.0];
        let mut by_name: BTreeMap<String, Member> = BTreeMap::new();
        for member in &self.members(ScopeRef::Class(id)).members {
            if let Some(member) = self.filter_member(member, Some(&class.directives)) {
                by_name.insert(self.member_name(&member).to_string(), member);
            }
        }

        let mut cyclic = false;
        open.push(id);
        for superclass in class.superclasses.iter().flat_map(|s| s.split(',')) {
            let superclass = strip_access(superclass);
            if superclass.is_empty() {
                continue;
            }
            let Some(super_id) = self.resolve_superclass(class.namespace, superclass) else {
                self.unresolved(class.id_name().as_str(), superclass, "superclass");
                continue;
            };
            if open.contains(&super_id) {
                self.record(Diagnostic::warning(
                    class.id_name().to_string(),
                    format!("inheritance cycle through `{superclass}`"),
                ));
                cyclic = true;
                continue;
            }
            let cell = &self.classes[super_id.0].bindable;
            let inherited = match cell.get() {
                Some(members) => members.clone(),
                None => {
                    let flattened = self.flatten(super_id, open);
                    cyclic |= flattened.cyclic;
                    if !flattened.cyclic {
                        let _ = cell.set(flattened.members.clone());
                    }
                    flattened.members
                }
            };
            for member in inherited {
                let name = self.member_name(&member).to_string();
                if class.directives.ignores(&name) {
                    continue;
                }
                by_name.entry(name).or_insert(member);
            }
        }
        open.pop();

        Flattened {
            members: by_name.into_values().collect(),
            cyclic,
        }
    }

    fn resolve_superclass(&self, ns: NamespaceId, name: &str) -> Option<ClassId> {
        let desc = parse_declarator(name).ok()?;
        if desc.is_templated() {
            self.find_template_class(ns, desc.base_name())
                .and_then(|t| self.classes[t.0].instantiations.get(&desc.template_args).copied())
        } else {
            self.find_class(ns, desc.base_name())
        }
    }

    /// Hand-written bodies for `class`, loaded on first use.
    pub fn overrides(&self, class: ClassId) -> &OverrideTable {
        let class = &self.classes[class.0];
        class.overrides.get_or_init(|| {
            let Some(file) = class.directives.overrides.as_deref() else {
                return OverrideTable::default();
            };
            let path = self.config.resolve_override_path(file);
            match OverrideTable::load(class.name(), &path, &self.config.host_language) {
                Ok(table) => table,
                Err(err) => {
                    self.record(Diagnostic::warning(class.id_name().to_string(), err.to_string()));
                    OverrideTable::default()
                }
            }
        })
    }

    // ----- diagnostics -----

    /// Keeps `diagnostic` unless the same one was already recorded.
    pub fn record(&self, diagnostic: Diagnostic) {
        let mut diagnostics = self.diagnostics.borrow_mut();
        if diagnostics.contains(&diagnostic) {
            return;
        }
        warn!(entity = %diagnostic.entity, "{}", diagnostic.message);
        diagnostics.push(diagnostic);
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }

    fn unresolved(&self, entity: &str, reference: &str, what: &'static str) {
        let err = ModelError::UnresolvedReference {
            entity: entity.to_string(),
            reference: reference.to_string(),
            what,
        };
        self.record(Diagnostic::warning(entity, err.to_string()));
    }
}

/// `public cv::Algorithm` names `cv::Algorithm`.
fn strip_access(superclass: &str) -> &str {
    let mut name = superclass.trim();
    loop {
        let stripped = ["public ", "protected ", "private ", "virtual "]
            .iter()
            .find_map(|keyword| name.strip_prefix(keyword));
        match stripped {
            Some(rest) => name = rest.trim_start(),
            None => return name,
        }
    }
}
