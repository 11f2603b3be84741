//! Code fragments handed to the rendering layer.

use bindsmith_symbol::SymbolKind;
use serde::Serialize;

use crate::code::{CodeWriter, c_string};

/// One generated C function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BodyFragment {
    pub symbol: String,
    pub kind: SymbolKind,
    /// `static int Mat_rows(lua_State *L)`
    pub signature: String,
    /// Complete definition, including the signature line and any
    /// leading comment.
    pub body: String,
}

impl BodyFragment {
    pub fn new(symbol: impl Into<String>, kind: SymbolKind, body: impl Into<String>) -> Self {
        let symbol = symbol.into();
        Self {
            signature: signature(&symbol),
            symbol,
            kind,
            body: body.into(),
        }
    }

    /// Library entry point with C linkage.
    pub fn opener(symbol: impl Into<String>, body: impl Into<String>) -> Self {
        let symbol = symbol.into();
        Self {
            signature: format!("extern \"C\" int {symbol}(lua_State *L)"),
            symbol,
            kind: SymbolKind::Opener,
            body: body.into(),
        }
    }
}

pub fn signature(symbol: &str) -> String {
    format!("static int {symbol}(lua_State *L)")
}

/// Overloads of one name: a body per member plus the chooser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupFragment {
    pub name: String,
    pub chooser: BodyFragment,
    pub overloads: Vec<BodyFragment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MemberFragment {
    Function { name: String, fragment: BodyFragment },
    Group(GroupFragment),
}

impl MemberFragment {
    pub fn name(&self) -> &str {
        match self {
            MemberFragment::Function { name, .. } => name,
            MemberFragment::Group(group) => &group.name,
        }
    }

    /// Symbol the host calls for this name.
    pub fn entry_symbol(&self) -> &str {
        match self {
            MemberFragment::Function { fragment, .. } => &fragment.symbol,
            MemberFragment::Group(group) => &group.chooser.symbol,
        }
    }

    pub fn bodies(&self) -> Vec<&BodyFragment> {
        match self {
            MemberFragment::Function { fragment, .. } => vec![fragment],
            MemberFragment::Group(group) => group
                .overloads
                .iter()
                .chain(std::iter::once(&group.chooser))
                .collect(),
        }
    }
}

/// Host-visible name mapped to a generated symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationEntry {
    pub name: String,
    pub symbol: String,
}

impl RegistrationEntry {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
        }
    }
}

/// Constant name mapped to the C++ expression holding its value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstantEntry {
    pub name: String,
    pub value: String,
}

/// A named registration table and its rendered definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table<T> {
    pub name: String,
    pub entries: Vec<T>,
    pub text: String,
}

impl Table<RegistrationEntry> {
    pub fn functions(name: impl Into<String>, entries: Vec<RegistrationEntry>) -> Self {
        let name = name.into();
        let mut code = CodeWriter::new();
        code.open(format!("static const struct luaL_Reg {name}[] = {{"));
        for entry in &entries {
            code.line(format!("{{{:<20}, {}}},", c_string(&entry.name), entry.symbol));
        }
        code.line("{NULL, NULL},");
        code.close("};");
        Self {
            name,
            entries,
            text: code.finish(),
        }
    }

    pub fn symbol_for(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.symbol.as_str())
    }
}

impl Table<ConstantEntry> {
    pub fn constants(name: impl Into<String>, entries: Vec<ConstantEntry>) -> Self {
        let name = name.into();
        let mut code = CodeWriter::new();
        code.open(format!("static const struct dub_const_Reg {name}[] = {{"));
        for entry in &entries {
            code.line(format!("{{{:<20}, {}}},", c_string(&entry.name), entry.value));
        }
        code.line("{NULL, 0},");
        code.close("};");
        Self {
            name,
            entries,
            text: code.finish(),
        }
    }
}

impl<T> Table<T> {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassFragment {
    pub id: String,
    pub name: String,
    /// Canonical name and aliases.
    pub names: Vec<String>,
    pub lib_name: String,
    pub headers: Vec<String>,
    pub constructor: Option<MemberFragment>,
    pub members: Vec<MemberFragment>,
    /// Static methods other than a custom constructor.
    pub statics: Vec<MemberFragment>,
    /// `__gc` hook, absent when the host never owns instances.
    pub destructor: Option<BodyFragment>,
    /// Liveness check, present with a custom destructor.
    pub deleted: Option<BodyFragment>,
    pub tostring: BodyFragment,
    pub member_methods: Table<RegistrationEntry>,
    pub class_methods: Table<RegistrationEntry>,
    pub constants: Table<ConstantEntry>,
    pub opener: BodyFragment,
}

impl ClassFragment {
    /// Every generated function definition, in emission order. The opener
    /// comes last.
    pub fn bodies(&self) -> Vec<&BodyFragment> {
        let mut out = Vec::new();
        if let Some(ctor) = &self.constructor {
            out.extend(ctor.bodies());
        }
        for member in self.members.iter().chain(&self.statics) {
            out.extend(member.bodies());
        }
        out.extend(self.destructor.iter());
        out.extend(self.deleted.iter());
        out.push(&self.tostring);
        out.push(&self.opener);
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamespaceFragment {
    pub id: String,
    pub name: String,
    pub lib_name: String,
    pub headers: Vec<String>,
    pub functions: Vec<MemberFragment>,
    pub function_table: Table<RegistrationEntry>,
    pub constants: Table<ConstantEntry>,
    pub opener: BodyFragment,
    pub classes: Vec<ClassFragment>,
}

impl NamespaceFragment {
    /// Free function bodies followed by the opener; class bodies live in
    /// their own fragments.
    pub fn bodies(&self) -> Vec<&BodyFragment> {
        let mut out: Vec<&BodyFragment> = self.functions.iter().flat_map(MemberFragment::bodies).collect();
        out.push(&self.opener);
        out
    }
}

/// Output of emitting one [`Bindable`](crate::Bindable).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Fragment {
    Function(BodyFragment),
    Group(GroupFragment),
    Class(Box<ClassFragment>),
    Namespace(Box<NamespaceFragment>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_function_table_text() {
        let table = Table::functions(
            "Mat_member_methods",
            vec![RegistrationEntry::new("rows", "Mat_rows")],
        );
        assert_eq!(
            table.text,
            "static const struct luaL_Reg Mat_member_methods[] = {\n  {\"rows\"              , Mat_rows},\n  {NULL, NULL},\n};\n"
        );
        assert_eq!(table.symbol_for("rows"), Some("Mat_rows"));
    }

    #[test]
    fn test_signature() {
        assert_eq!(signature("cv_abs"), "static int cv_abs(lua_State *L)");
        let opener = BodyFragment::opener("luaopen_cv", "");
        assert_eq!(opener.signature, "extern \"C\" int luaopen_cv(lua_State *L)");
        assert_eq!(opener.kind, SymbolKind::Opener);
    }
}
