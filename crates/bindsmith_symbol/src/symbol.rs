//! Scope-qualified C++ names and their dotted host-side form.

use core::fmt::{Display, Formatter, Result};

use serde::{Deserialize, Serialize};

/// A C++ name, possibly qualified with `::` separators.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Symbol(String);

impl Symbol {
    /// Joins a scope path and a name (`["cv"]` + `"Mat"` gives `cv::Mat`).
    pub fn scoped<S: AsRef<str>>(scope: &[S], name: &str) -> Self {
        let mut parts: Vec<&str> = scope
            .iter()
            .map(AsRef::as_ref)
            .filter(|part| !part.is_empty())
            .collect();
        parts.push(name);
        Self(parts.join("::"))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn is_qualified(&self) -> bool {
        self.0.contains("::")
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split("::").filter(|seg| !seg.is_empty())
    }

    /// The unqualified trailing segment.
    pub fn last(&self) -> &str {
        self.segments().last().unwrap_or("")
    }

    /// Everything before the trailing segment, still `::` separated.
    pub fn scope(&self) -> Option<&str> {
        self.0.rfind("::").map(|idx| &self.0[..idx])
    }

    pub fn dotted(&self) -> DottedId {
        DottedId(self.segments().collect::<Vec<_>>().join("."))
    }
}

impl Display for Symbol {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Symbol {
    #[inline]
    fn from(val: &str) -> Self {
        Self(val.trim().to_owned())
    }
}

impl From<String> for Symbol {
    #[inline]
    fn from(val: String) -> Self {
        Self(val.trim().to_owned())
    }
}

/// Fully-qualified, dot-joined scope path (`cv.Mat`, `cv.Mat.rows`).
///
/// Used verbatim as the runtime type tag of opaque host objects, so two
/// entities with the same id are the same entity.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DottedId(String);

impl DottedId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn child(&self, name: &str) -> Self {
        if self.0.is_empty() {
            Self(name.to_owned())
        } else {
            Self(format!("{}.{name}", self.0))
        }
    }

    /// C identifier form (`cv_Mat`), used for generated symbol prefixes.
    pub fn underscored(&self) -> String {
        self.0.replace('.', "_")
    }
}

impl Display for DottedId {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scoped_symbol() {
        let sym = Symbol::scoped(&["cv", "ml"], "Boost");
        assert_eq!(sym.as_str(), "cv::ml::Boost");
        assert_eq!(sym.last(), "Boost");
        assert_eq!(sym.scope(), Some("cv::ml"));
        assert_eq!(sym.dotted().as_str(), "cv.ml.Boost");
    }

    #[test]
    fn test_unqualified_symbol() {
        let sym = Symbol::from(" Mat ");
        assert!(!sym.is_qualified());
        assert_eq!(sym.scope(), None);
        assert_eq!(sym.dotted().as_str(), "Mat");
    }

    #[test]
    fn test_dotted_child() {
        let id = DottedId::new("cv").child("Mat");
        assert_eq!(id.as_str(), "cv.Mat");
        assert_eq!(id.underscored(), "cv_Mat");
        assert_eq!(DottedId::new("").child("f").as_str(), "f");
    }
}
