use std::collections::BTreeMap;
use std::path::Path;

use crate::error::ModelError;

/// Hand-written function bodies for one class and one host language.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideTable {
    bodies: BTreeMap<String, String>,
}

impl OverrideTable {
    /// Reads `host language -> function name -> body` from a YAML file and
    /// keeps the entries for `host_language`.
    pub fn load(class: &str, path: &Path, host_language: &str) -> Result<Self, ModelError> {
        let missing = |reason: String| ModelError::MissingBindingDirectiveFile {
            class: class.to_string(),
            path: path.display().to_string(),
            reason,
        };
        let text = std::fs::read_to_string(path).map_err(|err| missing(err.to_string()))?;
        Self::from_yaml(&text, host_language).map_err(|err| missing(err.to_string()))
    }

    pub fn from_yaml(text: &str, host_language: &str) -> Result<Self, serde_yaml::Error> {
        let mut by_host: BTreeMap<String, BTreeMap<String, String>> =
            serde_yaml::from_str::<Option<_>>(text)?.unwrap_or_default();
        Ok(Self {
            bodies: by_host.remove(host_language).unwrap_or_default(),
        })
    }

    pub fn body(&self, function: &str) -> Option<&str> {
        self.bodies.get(function).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}
