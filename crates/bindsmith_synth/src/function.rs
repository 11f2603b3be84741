//! Body of one bound function: receiver check, argument extraction,
//! arity-guarded call sites and return marshalling.

use bindsmith_model::{Argument, Function, ListRole, ScopeRef};
use bindsmith_symbol::SymbolKind;
use bindsmith_ty::Marshal;

use crate::code::{CodeWriter, c_string, comment_safe};
use crate::error::SynthError;
use crate::fragment::{BodyFragment, signature};
use crate::names::Owner;
use crate::synthesizer::Synthesizer;

impl Synthesizer<'_> {
    /// Emits `function` as `symbol`. Constructor kinds hand ownership of
    /// the returned object to the host.
    pub(crate) fn function_body(
        &self,
        owner: Owner,
        function: &Function,
        symbol: &str,
        kind: SymbolKind,
    ) -> Result<BodyFragment, SynthError> {
        let constructs = kind == SymbolKind::Constructor;
        let mut code = CodeWriter::new();
        self.source_comment(&mut code, function);
        code.open(format!("{} {{", signature(symbol)));
        code.open("try {");
        if function.has_receiver() {
            self.receiver(&mut code, owner, function);
        }
        self.arguments_and_calls(&mut code, function, constructs)?;
        let context = c_string(&function.name);
        code.reopen("} catch (std::exception &e) {");
        code.line(format!("lua_pushfstring(L, \"%s: %s\", {context}, e.what());"));
        code.reopen("} catch (...) {");
        code.line(format!("lua_pushfstring(L, \"%s: Unknown exception\", {context});"));
        code.close("}");
        code.line("return lua_error(L);");
        code.close("}");
        Ok(BodyFragment::new(symbol, kind, code.finish()))
    }

    /// Replaces a generated body with a hand-written one.
    pub(crate) fn override_body(
        &self,
        function: Option<&Function>,
        symbol: &str,
        kind: SymbolKind,
        body: &str,
    ) -> BodyFragment {
        let mut code = CodeWriter::new();
        if let Some(function) = function {
            self.source_comment(&mut code, function);
        }
        code.open(format!("{} {{", signature(symbol)));
        code.lines(body);
        code.close("}");
        BodyFragment::new(symbol, kind, code.finish())
    }

    pub(crate) fn source_comment(&self, code: &mut CodeWriter, function: &Function) {
        if !self.config().source_comments {
            return;
        }
        code.line(format!("/** {}", comment_safe(&function.declaration)));
        if let Some(source) = function.source() {
            code.line(format!(" * {}", comment_safe(&source)));
        }
        code.line(" */");
    }

    fn receiver(&self, code: &mut CodeWriter, owner: Owner, function: &Function) {
        let Owner::Class(class_id) = owner else {
            return;
        };
        let class = self.model().class(class_id);
        let full = class.full_type();
        let id = class.id_name();
        code.line(format!(
            "{full} *self__ = *(({full} **)dub_checksdata(L, 1, {}));",
            c_string(id.as_str())
        ));
        if class.destructor().is_custom() {
            code.line(format!(
                "if (!self__) throw dub::Exception(\"Using deleted {} in {}.\");",
                id,
                function.name
            ));
        }
    }

    /// Extracts host arguments in order. Each defaulted argument opens an
    /// arity branch holding the call with the arguments seen so far.
    fn arguments_and_calls(
        &self,
        code: &mut CodeWriter,
        function: &Function,
        constructs: bool,
    ) -> Result<(), SynthError> {
        let offset = function.dispatch_offset();
        let host: Vec<&Argument> = function.host_arguments().collect();
        if host.iter().any(|arg| arg.has_default()) {
            code.line("int top__ = lua_gettop(L);");
        }

        let mut open_branches = 0;
        for (slot, arg) in host.iter().enumerate() {
            let position = offset + slot + 1;
            if arg.has_default() {
                code.open(format!("if (top__ < {position}) {{"));
                self.call_site(code, function, arg.position, constructs)?;
                code.reopen("} else {");
                open_branches += 1;
            }
            extract(code, function, arg, position)?;
            if arg.list_role == ListRole::List {
                for count in function
                    .arguments
                    .iter()
                    .filter(|a| a.list_role == ListRole::Count)
                {
                    code.line(format!("{} = lua_objlen(L, {position});", count.declaration()));
                }
            }
        }
        self.call_site(code, function, function.arguments.len(), constructs)?;
        for _ in 0..open_branches {
            code.close("}");
        }
        Ok(())
    }

    /// Calls `function` with its first `arity` arguments and pushes the
    /// result.
    fn call_site(
        &self,
        code: &mut CodeWriter,
        function: &Function,
        arity: usize,
        constructs: bool,
    ) -> Result<(), SynthError> {
        let call = self.call_expression(function, arity);
        let Some(ret) = &function.return_value else {
            code.line(format!("{call};"));
            code.line("return 0;");
            return Ok(());
        };
        let push = match ret.marshal() {
            Some(Marshal::Boolean) => "lua_pushboolean",
            Some(Marshal::Integer | Marshal::Float) => "lua_pushnumber",
            Some(Marshal::String) => "lua_pushstring",
            Some(Marshal::Opaque) => {
                self.push_object(code, function, ret, &call, constructs);
                return Ok(());
            }
            Some(Marshal::NumberPointer) | None => return Err(unsupported(function, ret)),
        };
        code.line(format!("{}retval__ = {call};", ret.create_type()));
        code.line(format!("{push}(L, retval__);"));
        code.line("return 1;");
        Ok(())
    }

    fn call_expression(&self, function: &Function, arity: usize) -> String {
        let args = function
            .arguments
            .iter()
            .take(arity)
            .map(Argument::in_call_type)
            .collect::<Vec<_>>()
            .join(", ");
        match function.scope {
            ScopeRef::Class(declaring) => {
                let class = self.model().class(declaring).full_type();
                if function.is_constructor {
                    format!("new {class}({args})")
                } else if function.is_static {
                    format!("{class}::{}({args})", function.name)
                } else {
                    format!("self__->{}({args})", function.name)
                }
            }
            ScopeRef::Namespace(ns) => {
                format!("{}({args})", self.model().namespace(ns).qualify(&function.name))
            }
        }
    }

    /// Pushes a class instance as a tagged handle. Values returned by copy
    /// and constructed objects belong to the host.
    fn push_object(
        &self,
        code: &mut CodeWriter,
        function: &Function,
        ret: &Argument,
        call: &str,
        constructs: bool,
    ) {
        let full = &ret.full_type;
        let id = c_string(ret.id.as_str());
        let by_value = !ret.is_pointer() && !ret.ty.is_reference() && !constructs;
        let owned = constructs || by_value;

        if ret.ty.is_reference() {
            let constness = if ret.ty.is_const { "const " } else { "" };
            code.line(format!("{constness}{full} *retval__ = &{call};"));
        } else {
            code.line(format!("{}retval__ = {call};", ret.create_type()));
            if ret.is_pointer() && !function.is_constructor {
                code.line("if (!retval__) return 0;");
            }
        }

        let handle = if by_value {
            format!("new {full}(retval__)")
        } else if ret.ty.is_const {
            format!("const_cast<{full} *>(retval__)")
        } else {
            "retval__".to_string()
        };

        let class = self.model().class_named(full.as_str());
        let self_push = class.and_then(|c| c.directives.push.as_deref());
        let custom_destructor = class.is_some_and(|c| c.destructor().is_custom());
        if let Some(method) = self_push {
            code.line(format!("({handle})->{method}(L, {id}, {owned});"));
        } else if owned && custom_destructor {
            code.line(format!("dub_pushclass2(L, {handle}, {id});"));
        } else {
            code.line(format!("dub_pushudata(L, {handle}, {id}, {owned});"));
        }
        code.line("return 1;");
    }
}

fn unsupported(function: &Function, arg: &Argument) -> SynthError {
    SynthError::UnsupportedArgumentType {
        function: function.declaration.clone(),
        argument: arg.signature(),
    }
}

fn extract(
    code: &mut CodeWriter,
    function: &Function,
    arg: &Argument,
    position: usize,
) -> Result<(), SynthError> {
    let declaration = arg.declaration();
    match arg.marshal() {
        Some(Marshal::Boolean) => {
            code.line(format!("{declaration} = dub_checkboolean(L, {position});"));
        }
        Some(Marshal::Integer) => {
            code.line(format!("{declaration} = dub_checkinteger(L, {position});"));
        }
        Some(Marshal::Float) => {
            code.line(format!("{declaration} = dub_checknumber(L, {position});"));
        }
        Some(Marshal::String) => {
            let declaration = if arg.ty.is_const {
                declaration
            } else {
                format!("const {declaration}")
            };
            code.line(format!("{declaration} = dub_checkstring(L, {position});"));
        }
        Some(Marshal::NumberPointer) => {
            code.line(format!("DubArgPointer<{}> ptr_{};", arg.full_type, arg.name));
            code.line(format!("{declaration} = ptr_{}(L, {position});", arg.name));
        }
        Some(Marshal::Opaque) => {
            code.line(format!(
                "{declaration} = *(({}*)dub_checksdata(L, {position}, {}));",
                arg.create_type(),
                c_string(arg.id.as_str())
            ));
        }
        None => return Err(unsupported(function, arg)),
    }
    Ok(())
}
