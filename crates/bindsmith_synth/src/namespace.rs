//! Namespace fragments: free functions, constants and the classes the
//! namespace owns.

use std::collections::BTreeSet;

use bindsmith_model::NamespaceId;
use bindsmith_symbol::{SymbolEntry, SymbolTable};
use tracing::{debug, info};

use crate::code::{CodeWriter, c_string};
use crate::error::SynthError;
use crate::fragment::{
    BodyFragment, ClassFragment, ConstantEntry, NamespaceFragment, RegistrationEntry, Table,
};
use crate::names::{GLOBAL_TABLE, Owner, opener_symbol};
use crate::synthesizer::{Synthesizer, register_bodies};

impl Synthesizer<'_> {
    /// Emits every binding of `ns`, classes included. Classes and functions
    /// that cannot be generated are left out with a diagnostic.
    pub fn namespace(&self, ns: NamespaceId) -> Result<NamespaceFragment, SynthError> {
        let model = self.model();
        let namespace = model.namespace(ns);
        let owner = Owner::Namespace(ns);
        let prefix = owner.prefix(model);
        let id = namespace.id_name();
        let table_name = if namespace.path.is_empty() {
            GLOBAL_TABLE.to_string()
        } else {
            id.to_string()
        };

        let functions: Vec<_> = model
            .bindable_functions(ns)
            .iter()
            .filter_map(|member| self.member_or_omit(owner, member, false))
            .collect();
        let function_table = Table::functions(
            format!("{prefix}_functions"),
            functions
                .iter()
                .map(|f| RegistrationEntry::new(f.name(), f.entry_symbol()))
                .collect(),
        );

        let constants = Table::constants(
            format!("{prefix}_const"),
            namespace
                .enums
                .iter()
                .map(|value| ConstantEntry {
                    name: value.clone(),
                    value: namespace.qualify(value).to_string(),
                })
                .chain(namespace.defines.iter().map(|define| ConstantEntry {
                    name: define.clone(),
                    value: define.clone(),
                }))
                .collect(),
        );

        let mut symbols = SymbolTable::new();
        register_bodies(&mut symbols, &id, functions.iter().flat_map(|f| f.bodies()))?;

        let mut headers = BTreeSet::new();
        headers.insert(self.config().helper_header.clone());
        let bindable = model.bindable_functions(ns);
        if self.needs_arg_pointer(&bindable) {
            headers.insert(self.config().arg_pointer_header.clone());
        }
        for member in &bindable {
            let header = member
                .functions()
                .into_iter()
                .filter_map(|f| model.function(f))
                .find_map(|f| f.location.as_ref().map(|loc| loc.header().to_string()));
            headers.extend(header);
        }

        let mut classes = Vec::new();
        for class in model.classes(ns) {
            if !class.is_bindable() {
                // Malformed directives were reported when the model was built.
                continue;
            }
            let class_id = class.id_name();
            let fragment = match self.class(class.id) {
                Ok(fragment) => fragment,
                Err(err) => {
                    self.omit(&class_id, &err);
                    continue;
                }
            };
            if let Err(err) = register_bodies(&mut symbols, &class_id, fragment.bodies()) {
                self.omit(&class_id, &err);
                continue;
            }
            headers.extend(fragment.headers.iter().cloned());
            classes.push(fragment);
        }

        let lib_name = prefix.clone();
        let opener = opener(&lib_name, &table_name, &function_table, &constants, &classes);
        symbols.register(SymbolEntry {
            symbol: opener.symbol.clone(),
            owner: id.clone(),
            kind: opener.kind,
        })?;

        info!(
            namespace = %table_name,
            functions = functions.len(),
            classes = classes.len(),
            "namespace bindings generated"
        );
        debug!(symbols = symbols.len(), "symbols registered");
        Ok(NamespaceFragment {
            id: id.to_string(),
            name: namespace.name.clone(),
            lib_name,
            headers: headers.into_iter().collect(),
            functions,
            function_table,
            constants,
            opener,
            classes,
        })
    }
}

fn opener(
    lib_name: &str,
    table_name: &str,
    functions: &Table<RegistrationEntry>,
    constants: &Table<ConstantEntry>,
    classes: &[ClassFragment],
) -> BodyFragment {
    let symbol = opener_symbol(lib_name);
    let mut code = CodeWriter::new();
    code.open(format!("extern \"C\" int {symbol}(lua_State *L) {{"));
    for class in classes {
        code.line(format!("{}(L);", class.opener.symbol));
        code.line("lua_pop(L, 1);");
    }
    code.line(format!("luaL_register(L, {}, {});", c_string(table_name), functions.name));
    if !constants.is_empty() {
        code.line(format!("dub_register_const(L, {});", constants.name));
    }
    code.line("return 1;");
    code.close("}");
    BodyFragment::opener(symbol, code.finish())
}
