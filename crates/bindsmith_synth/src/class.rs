//! Class fragments: constructor, methods, lifetime hooks, registration
//! tables and the library opener.

use std::collections::BTreeSet;

use bindsmith_model::{Class, ClassId, DestructorPolicy, Member, ScopeRef};
use bindsmith_symbol::{SymbolKind, SymbolTable};
use tracing::debug;

use crate::code::{CodeWriter, c_string};
use crate::error::SynthError;
use crate::fragment::{
    BodyFragment, ClassFragment, ConstantEntry, MemberFragment, RegistrationEntry, Table, signature,
};
use crate::names::{Owner, member_symbol, opener_symbol, registration_name};
use crate::synthesizer::{Synthesizer, register_bodies};

impl Synthesizer<'_> {
    /// Emits every binding of `id`.
    ///
    /// Fails when the class directives are malformed or name an unusable
    /// custom constructor. Individual methods that cannot be generated are
    /// left out with a diagnostic.
    pub fn class(&self, id: ClassId) -> Result<ClassFragment, SynthError> {
        let model = self.model();
        let class = model.class(id);
        if let Some(err) = &class.directive_error {
            return Err(err.clone().into());
        }
        let owner = Owner::Class(id);
        let prefix = class.name().to_string();
        let custom_constructor = class.directives.constructor.as_deref();

        let constructor = match custom_constructor {
            Some(name) => Some(self.custom_constructor(class, name)?),
            None => model
                .bindable_constructor(id)
                .and_then(|ctor| self.member_or_omit(owner, &ctor, true)),
        };

        let mut members = Vec::new();
        let mut statics = Vec::new();
        for member in model.bindable_members(id) {
            let name = model.member_name(member);
            if Some(name) == custom_constructor {
                continue;
            }
            let is_static = self.is_static_member(member);
            let Some(fragment) = self.member_or_omit(owner, member, false) else {
                continue;
            };
            if is_static {
                statics.push(fragment);
            } else {
                members.push(fragment);
            }
        }

        let destructor = match class.destructor() {
            DestructorPolicy::Generic => Some(generic_destructor(class)),
            DestructorPolicy::Custom(method) => Some(custom_destructor(class, method)),
            DestructorPolicy::None => None,
        };
        let deleted = class.destructor().is_custom().then(|| deleted(class));
        let tostring = tostring(class);

        let mut member_entries: Vec<RegistrationEntry> = members
            .iter()
            .map(|m| RegistrationEntry::new(m.name(), m.entry_symbol()))
            .collect();
        member_entries.push(RegistrationEntry::new("__tostring", &tostring.symbol));
        if let Some(destructor) = &destructor {
            member_entries.push(RegistrationEntry::new("__gc", &destructor.symbol));
        }
        if let Some(deleted) = &deleted {
            member_entries.push(RegistrationEntry::new("deleted", &deleted.symbol));
        }
        let member_methods = Table::functions(format!("{prefix}_member_methods"), member_entries);

        let mut class_entries = Vec::new();
        if let Some(ctor) = &constructor {
            class_entries.extend(class.names().map(|name| RegistrationEntry::new(name, ctor.entry_symbol())));
        }
        class_entries.extend(
            statics
                .iter()
                .map(|s| RegistrationEntry::new(registration_name(owner, &prefix, s.name(), true), s.entry_symbol())),
        );
        let class_methods = Table::functions(format!("{prefix}_namespace_methods"), class_entries);

        let full = class.full_type();
        let constants = Table::constants(
            format!("{prefix}_const"),
            class
                .enums
                .iter()
                .map(|value| ConstantEntry {
                    name: value.clone(),
                    value: format!("{full}::{value}"),
                })
                .collect(),
        );

        let lib_name = class.lib_name();
        let opener = opener(class, &lib_name, &member_methods, &class_methods, &constants);

        let mut headers = BTreeSet::new();
        headers.insert(self.config().helper_header.clone());
        let ctor = model.bindable_constructor(id);
        if self.needs_arg_pointer(model.bindable_members(id).iter().chain(ctor.as_ref())) {
            headers.insert(self.config().arg_pointer_header.clone());
        }
        headers.extend(class.header());

        let fragment = ClassFragment {
            id: class.id_name().to_string(),
            name: prefix,
            names: class.names().map(str::to_string).collect(),
            lib_name,
            headers: headers.into_iter().collect(),
            constructor,
            members,
            statics,
            destructor,
            deleted,
            tostring,
            member_methods,
            class_methods,
            constants,
            opener,
        };
        let mut symbols = SymbolTable::new();
        register_bodies(&mut symbols, &class.id_name(), fragment.bodies())?;
        debug!(
            class = %fragment.id,
            symbols = symbols.len(),
            "class bindings generated"
        );
        Ok(fragment)
    }

    /// A `constructor` directive names a static factory of the class.
    fn custom_constructor(&self, class: &Class, name: &str) -> Result<MemberFragment, SynthError> {
        let model = self.model();
        let missing = || SynthError::MissingConstructor {
            class: class.id_name().to_string(),
            constructor: name.to_string(),
        };
        let raw = model.get(ScopeRef::Class(class.id), name).ok_or_else(missing)?;
        let all_static = raw
            .functions()
            .into_iter()
            .filter_map(|f| model.function(f))
            .all(|f| f.is_static);
        if !all_static {
            return Err(SynthError::InvalidCustomConstructor {
                class: class.id_name().to_string(),
                constructor: name.to_string(),
            });
        }
        let member: Member = model
            .filter_member(raw, Some(&class.directives))
            .ok_or_else(missing)?;
        self.member(Owner::Class(class.id), &member, true)
    }
}

fn userdata_check(class: &Class) -> String {
    format!(
        "DubUserdata *userdata = ((DubUserdata *)dub_checksdata_n(L, 1, {}));",
        c_string(class.id_name().as_str())
    )
}

fn handle_check(class: &Class) -> String {
    let full = class.full_type();
    format!(
        "{full} **self = (({full} **)dub_checksdata_n(L, 1, {}));",
        c_string(class.id_name().as_str())
    )
}

/// Deletes objects the host owns, then clears the handle.
fn generic_destructor(class: &Class) -> BodyFragment {
    let symbol = member_symbol(class.name(), "_gc", None);
    let mut code = CodeWriter::new();
    code.open(format!("{} {{", signature(&symbol)));
    code.line(userdata_check(class));
    code.line(format!("if (userdata->gc) delete (({} *)userdata->ptr);", class.full_type()));
    code.line("userdata->ptr = NULL;");
    code.line("return 0;");
    code.close("}");
    BodyFragment::new(symbol, SymbolKind::Destructor, code.finish())
}

fn custom_destructor(class: &Class, method: &str) -> BodyFragment {
    let symbol = member_symbol(class.name(), "_gc", None);
    let mut code = CodeWriter::new();
    code.open(format!("{} {{", signature(&symbol)));
    code.line(handle_check(class));
    code.line(format!("if (*self) (*self)->{method}();"));
    code.line("*self = NULL;");
    code.line("return 0;");
    code.close("}");
    BodyFragment::new(symbol, SymbolKind::Destructor, code.finish())
}

fn deleted(class: &Class) -> BodyFragment {
    let symbol = member_symbol(class.name(), "deleted", None);
    let mut code = CodeWriter::new();
    code.open(format!("{} {{", signature(&symbol)));
    code.line(handle_check(class));
    code.line("lua_pushboolean(L, *self == NULL);");
    code.line("return 1;");
    code.close("}");
    BodyFragment::new(symbol, SymbolKind::Liveness, code.finish())
}

fn tostring(class: &Class) -> BodyFragment {
    let symbol = member_symbol(class.name(), "__tostring", None);
    let mut code = CodeWriter::new();
    code.open(format!("{} {{", signature(&symbol)));
    code.line(handle_check(class));
    code.line(format!(
        "lua_pushfstring(L, \"{}: %p\", *self);",
        class.id_name()
    ));
    code.line("return 1;");
    code.close("}");
    BodyFragment::new(symbol, SymbolKind::ToString, code.finish())
}

fn opener(
    class: &Class,
    lib_name: &str,
    member_methods: &Table<RegistrationEntry>,
    class_methods: &Table<RegistrationEntry>,
    constants: &Table<ConstantEntry>,
) -> BodyFragment {
    let symbol = opener_symbol(lib_name);
    let id = class.id_name();
    let scope = match id.as_str().rsplit_once('.') {
        Some((scope, _)) => scope.to_string(),
        None => crate::names::GLOBAL_TABLE.to_string(),
    };
    let mut code = CodeWriter::new();
    code.open(format!("extern \"C\" int {symbol}(lua_State *L) {{"));
    code.line("// metatable shared by every instance");
    code.line(format!("luaL_newmetatable(L, {});", c_string(id.as_str())));
    code.line(format!("luaL_register(L, NULL, {});", member_methods.name));
    code.line(format!("luaL_register(L, NULL, {});", class_methods.name));
    if !constants.is_empty() {
        code.line(format!("dub_register_const(L, {});", constants.name));
    }
    code.line(format!(
        "dub_register(L, {}, {});",
        c_string(&scope),
        c_string(class.name())
    ));
    code.line("return 1;");
    code.close("}");
    BodyFragment::opener(symbol, code.finish())
}
