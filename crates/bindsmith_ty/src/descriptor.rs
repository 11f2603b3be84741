use std::fmt;

use bindsmith_symbol::Symbol;
use serde::{Deserialize, Serialize};

/// How the declarator reaches its base type. Exactly one holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Indirection {
    #[default]
    Value,
    Pointer {
        depth: u8,
    },
    Reference,
}

/// Canonical form of a C++ declarator such as `const Foo<Bar, Baz> &`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeDescriptor {
    /// Base type name as written, `::` qualified (`cv::Mat`, `unsigned int`).
    pub base: Symbol,
    pub is_const: bool,
    pub indirection: Indirection,
    /// Template arguments as written. Non-empty means the descriptor still
    /// refers to a template and must be resolved against a concrete
    /// instantiation before code is generated for it.
    pub template_args: Vec<String>,
    /// Fixed-size array suffix (`[7]`), which C++ attaches to the name.
    pub array_suffix: Option<String>,
    pub variadic: bool,
}

impl TypeDescriptor {
    pub fn new(base: impl Into<Symbol>) -> Self {
        Self {
            base: base.into(),
            is_const: false,
            indirection: Indirection::Value,
            template_args: Vec::new(),
            array_suffix: None,
            variadic: false,
        }
    }

    pub fn variadic() -> Self {
        Self {
            variadic: true,
            ..Self::new("...")
        }
    }

    pub fn pointer_to(base: impl Into<Symbol>) -> Self {
        Self {
            indirection: Indirection::Pointer { depth: 1 },
            ..Self::new(base)
        }
    }

    #[inline]
    pub fn is_pointer(&self) -> bool {
        matches!(self.indirection, Indirection::Pointer { .. })
    }

    #[inline]
    pub fn pointer_depth(&self) -> u8 {
        match self.indirection {
            Indirection::Pointer { depth } => depth,
            _ => 0,
        }
    }

    #[inline]
    pub fn is_reference(&self) -> bool {
        matches!(self.indirection, Indirection::Reference)
    }

    #[inline]
    pub fn is_templated(&self) -> bool {
        !self.template_args.is_empty()
    }

    #[inline]
    pub fn has_array_suffix(&self) -> bool {
        self.array_suffix.is_some()
    }

    #[inline]
    pub fn base_name(&self) -> &str {
        self.base.as_str()
    }

    /// Replaces the base with a concrete instantiation, dropping the
    /// template arguments it stood for.
    pub fn resolved_to(&self, base: impl Into<Symbol>) -> Self {
        Self {
            base: base.into(),
            template_args: Vec::new(),
            ..self.clone()
        }
    }

    /// Base plus template arguments, without qualifiers (`Size_<int>`).
    pub fn spelled_base(&self) -> String {
        if self.template_args.is_empty() {
            self.base.to_string()
        } else {
            format!("{}<{}>", self.base, self.template_args.join(", "))
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.variadic {
            return write!(f, "...");
        }
        if self.is_const {
            write!(f, "const ")?;
        }
        write!(f, "{}", self.spelled_base())?;
        match self.indirection {
            Indirection::Value => Ok(()),
            Indirection::Pointer { depth } => {
                write!(f, " {}", "*".repeat(usize::from(depth)))
            }
            Indirection::Reference => write!(f, "&"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_forms() {
        let mut desc = TypeDescriptor::new("Mat");
        desc.is_const = true;
        desc.indirection = Indirection::Reference;
        assert_eq!(desc.to_string(), "const Mat&");

        let ptr = TypeDescriptor::pointer_to("char");
        assert_eq!(ptr.to_string(), "char *");
        assert_eq!(TypeDescriptor::variadic().to_string(), "...");
    }

    #[test]
    fn test_resolved_to_clears_template_args() {
        let mut desc = TypeDescriptor::new("TVect");
        desc.template_args = vec!["float".to_string()];
        assert_eq!(desc.spelled_base(), "TVect<float>");
        let resolved = desc.resolved_to("Vectf");
        assert!(!resolved.is_templated());
        assert_eq!(resolved.base_name(), "Vectf");
    }
}
