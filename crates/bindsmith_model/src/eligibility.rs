//! Decides which declarations get a binding.
//!
//! Applied when the bindable member list is built. Raw lookups through
//! [`Model::get`](crate::Model::get) still see every declaration.

use std::fmt;

use bindsmith_config::GeneratorConfig;
use bindsmith_ty::native;
use serde::Serialize;

use crate::argument::Argument;
use crate::directives::BindingDirectives;
use crate::function::Function;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Exclusion {
    NotPublic,
    Template,
    Destructor,
    Operator,
    Variadic,
    Ignored,
    ArrayArgument { argument: String },
    Complex { argument: String },
    NativePointerReturn,
    HostHandle { argument: String },
    VoidPointerParam { argument: String },
    Unmarshallable { argument: String },
}

impl fmt::Display for Exclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exclusion::NotPublic => write!(f, "not public"),
            Exclusion::Template => write!(f, "template member"),
            Exclusion::Destructor => write!(f, "destructor"),
            Exclusion::Operator => write!(f, "operator overload"),
            Exclusion::Variadic => write!(f, "variadic"),
            Exclusion::Ignored => write!(f, "ignored by directive"),
            Exclusion::ArrayArgument { argument } => write!(f, "array argument `{argument}`"),
            Exclusion::Complex { argument } => {
                write!(f, "unresolved template type in `{argument}`")
            }
            Exclusion::NativePointerReturn => write!(f, "returns a native pointer"),
            Exclusion::HostHandle { argument } => write!(f, "host handle in `{argument}`"),
            Exclusion::VoidPointerParam { argument } => write!(f, "untyped pointer `{argument}`"),
            Exclusion::Unmarshallable { argument } => {
                write!(f, "no marshalling rule for `{argument}`")
            }
        }
    }
}

/// Reason `function` cannot be bound, or `None` when it can.
pub fn exclusion(
    function: &Function,
    config: &GeneratorConfig,
    directives: Option<&BindingDirectives>,
) -> Option<Exclusion> {
    if !function.is_public() {
        return Some(Exclusion::NotPublic);
    }
    if function.is_template {
        return Some(Exclusion::Template);
    }
    if function.is_destructor() {
        return Some(Exclusion::Destructor);
    }
    if function.is_operator() {
        return Some(Exclusion::Operator);
    }
    if function.is_variadic || function.arguments.iter().any(Argument::is_vararg) {
        return Some(Exclusion::Variadic);
    }
    if directives.is_some_and(|d| d.ignores(&function.name)) {
        return Some(Exclusion::Ignored);
    }

    for arg in &function.arguments {
        if arg.array_suffix().is_some() {
            return Some(Exclusion::ArrayArgument {
                argument: arg.name.clone(),
            });
        }
        if let Some(reason) = argument_exclusion(arg, config) {
            return Some(reason);
        }
        if arg.ty.base_name() == native::VOID_TYPE && arg.is_pointer() {
            return Some(Exclusion::VoidPointerParam {
                argument: arg.name.clone(),
            });
        }
        if arg.marshal().is_none() {
            return Some(Exclusion::Unmarshallable {
                argument: arg.signature(),
            });
        }
    }

    if let Some(ret) = &function.return_value {
        if let Some(reason) = argument_exclusion(ret, config) {
            return Some(reason);
        }
        if ret.is_native() && ret.is_pointer() && !is_const_string(ret) {
            return Some(Exclusion::NativePointerReturn);
        }
        if ret.marshal().is_none() {
            return Some(Exclusion::Unmarshallable {
                argument: ret.signature(),
            });
        }
    }
    None
}

fn argument_exclusion(arg: &Argument, config: &GeneratorConfig) -> Option<Exclusion> {
    let label = || {
        if arg.is_return_value {
            "return value".to_string()
        } else {
            arg.name.clone()
        }
    };
    if arg.complex {
        return Some(Exclusion::Complex { argument: label() });
    }
    if config.is_host_handle(arg.ty.base_name()) || config.is_host_handle(arg.full_type.as_str()) {
        return Some(Exclusion::HostHandle { argument: label() });
    }
    None
}

/// `const char *`, which the host receives as a string.
fn is_const_string(arg: &Argument) -> bool {
    arg.ty.is_const && native::is_char(arg.ty.base_name()) && arg.ty.pointer_depth() == 1
}
