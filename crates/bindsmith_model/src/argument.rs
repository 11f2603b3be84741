use bindsmith_symbol::{DottedId, Symbol};
use bindsmith_ty::{Marshal, TypeCategory, TypeDescriptor, marshal, native};
use serde::Serialize;

/// Role of an argument in the paired array+length convention.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ListRole {
    #[default]
    None,
    /// Filled from a host table.
    List,
    /// Length of the list argument, computed rather than passed.
    Count,
}

/// One parameter or the return value of a [`Function`](crate::Function).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Argument {
    pub name: String,
    /// 0-based position in the parameter list.
    pub position: usize,
    /// Resolved descriptor: template arguments are gone unless `complex`.
    pub ty: TypeDescriptor,
    /// Scope-qualified type name used in emitted C++ (`cv::Mat`, `double`).
    pub full_type: Symbol,
    /// Host tag of the type (`cv.Mat`).
    pub id: DottedId,
    pub default: Option<String>,
    pub is_return_value: bool,
    pub list_role: ListRole,
    /// Mentions a template that has no known instantiation.
    pub complex: bool,
    pub category: TypeCategory,
}

impl Argument {
    pub fn new(
        name: impl Into<String>,
        position: usize,
        ty: TypeDescriptor,
        full_type: Symbol,
        id: DottedId,
    ) -> Self {
        let category = TypeCategory::of(&ty, || id.clone());
        Self {
            name: name.into(),
            position,
            ty,
            full_type,
            id,
            default: None,
            is_return_value: false,
            list_role: ListRole::None,
            complex: false,
            category,
        }
    }

    /// Return slot of `function`.
    pub fn return_value(ty: TypeDescriptor, full_type: Symbol, id: DottedId) -> Self {
        Self {
            is_return_value: true,
            ..Self::new("retval__", 0, ty, full_type, id)
        }
    }

    #[inline]
    pub fn is_native(&self) -> bool {
        native::is_native(self.ty.base_name())
    }

    #[inline]
    pub fn is_pointer(&self) -> bool {
        self.ty.is_pointer()
    }

    #[inline]
    pub fn is_vararg(&self) -> bool {
        self.ty.variadic
    }

    #[inline]
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    pub fn array_suffix(&self) -> Option<&str> {
        self.ty.array_suffix.as_deref()
    }

    /// Marshalling rule shared by eligibility filtering and synthesis.
    pub fn marshal(&self) -> Option<Marshal> {
        marshal(&self.ty)
    }

    /// Type of the local variable holding this argument (`const cv::Mat *`).
    ///
    /// Native values and returned values are held by value, everything else
    /// through a pointer.
    pub fn create_type(&self) -> String {
        let constness = if self.ty.is_const { "const " } else { "" };
        let by_value =
            (self.is_return_value && !self.is_pointer()) || (self.is_native() && !self.is_pointer());
        if by_value {
            format!("{constness}{} ", self.full_type)
        } else {
            format!("{constness}{} *", self.full_type)
        }
    }

    /// Local declaration with any array suffix kept on the name
    /// (`double moments[7]`).
    pub fn declaration(&self) -> String {
        format!(
            "{}{}{}",
            self.create_type(),
            self.name,
            self.array_suffix().unwrap_or("")
        )
    }

    /// How the local is passed to the bound call.
    pub fn in_call_type(&self) -> String {
        if self.is_native() || self.is_pointer() {
            self.name.clone()
        } else {
            format!("*{}", self.name)
        }
    }

    /// Short form for diagnostics (`const Mat&`).
    pub fn signature(&self) -> String {
        self.ty.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bindsmith_ty::parse_declarator;
    use pretty_assertions::assert_eq;

    fn arg(name: &str, text: &str, full: &str) -> Argument {
        let ty = parse_declarator(text).unwrap();
        let full = Symbol::from(full);
        let id = full.dotted();
        Argument::new(name, 0, ty, full, id)
    }

    #[test]
    fn test_array_suffix_on_name() {
        let moments = arg("moments", "double [7]", "double");
        assert_eq!(moments.create_type(), "double ");
        assert_eq!(moments.declaration(), "double moments[7]");
    }

    #[test]
    fn test_opaque_reference_held_by_pointer() {
        let src = arg("src", "const Mat &", "cv::Mat");
        assert_eq!(src.create_type(), "const cv::Mat *");
        assert_eq!(src.declaration(), "const cv::Mat *src");
        assert_eq!(src.in_call_type(), "*src");
        assert_eq!(src.category, TypeCategory::Opaque(DottedId::new("cv.Mat")));
    }

    #[test]
    fn test_native_values() {
        let x = arg("x", "int", "int");
        assert!(x.is_native());
        assert_eq!(x.declaration(), "int x");
        assert_eq!(x.in_call_type(), "x");

        let name = arg("name", "const char *", "char");
        assert_eq!(name.declaration(), "const char *name");
        assert_eq!(name.category, TypeCategory::String);
    }

    #[test]
    fn test_return_value_by_value() {
        let ty = parse_declarator("Size").unwrap();
        let ret = Argument::return_value(ty, Symbol::from("cv::Size"), DottedId::new("cv.Size"));
        assert_eq!(ret.create_type(), "cv::Size ");
        assert!(ret.is_return_value);
    }
}
