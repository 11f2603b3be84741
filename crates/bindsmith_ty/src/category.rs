use std::fmt;

use bindsmith_symbol::DottedId;
use serde::{Deserialize, Serialize};

use crate::descriptor::TypeDescriptor;
use crate::native;

/// Dynamic type tag an argument is recognised by at host call time.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeCategory {
    Boolean,
    String,
    Number,
    NumberPointer,
    /// Tagged host object of the class with this id.
    Opaque(DottedId),
    /// No argument at this position.
    Absent,
}

impl TypeCategory {
    /// Classifies a descriptor. `opaque_id` supplies the fully-qualified id
    /// for class types and is only called for them.
    pub fn of(desc: &TypeDescriptor, opaque_id: impl FnOnce() -> DottedId) -> Self {
        let base = desc.base_name();
        if native::is_bool(base) {
            TypeCategory::Boolean
        } else if native::is_char(base) && desc.is_pointer() {
            TypeCategory::String
        } else if native::is_native(base) {
            if desc.is_pointer() {
                TypeCategory::NumberPointer
            } else {
                TypeCategory::Number
            }
        } else {
            TypeCategory::Opaque(opaque_id())
        }
    }

    #[inline]
    pub fn is_absent(&self) -> bool {
        matches!(self, TypeCategory::Absent)
    }
}

impl fmt::Display for TypeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeCategory::Boolean => write!(f, "boolean"),
            TypeCategory::String => write!(f, "string"),
            TypeCategory::Number => write!(f, "number"),
            TypeCategory::NumberPointer => write!(f, "number_pointer"),
            TypeCategory::Opaque(id) => write!(f, "{id}"),
            TypeCategory::Absent => write!(f, "absent"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_declarator;

    fn category(text: &str) -> TypeCategory {
        let desc = parse_declarator(text).unwrap();
        TypeCategory::of(&desc, || desc.base.dotted())
    }

    #[test]
    fn test_category_priority() {
        assert_eq!(category("bool"), TypeCategory::Boolean);
        assert_eq!(category("const char *"), TypeCategory::String);
        assert_eq!(category("char"), TypeCategory::Number);
        assert_eq!(category("float"), TypeCategory::Number);
        assert_eq!(category("int *"), TypeCategory::NumberPointer);
        assert_eq!(
            category("const cv::Mat &"),
            TypeCategory::Opaque(DottedId::new("cv.Mat"))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(TypeCategory::NumberPointer.to_string(), "number_pointer");
        assert_eq!(TypeCategory::Absent.to_string(), "absent");
        assert_eq!(
            TypeCategory::Opaque(DottedId::new("cv.Mat")).to_string(),
            "cv.Mat"
        );
    }
}
