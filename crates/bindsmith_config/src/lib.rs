//! Generator configuration
//!
//! Settings that apply to a whole generation run, layered as defaults, then
//! an optional TOML file, then `BINDSMITH_*` environment variables.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ENV_HOST: &str = "BINDSMITH_HOST";
pub const ENV_HELPER_HEADER: &str = "BINDSMITH_HELPER_HEADER";
pub const ENV_ARG_POINTER_HEADER: &str = "BINDSMITH_ARG_POINTER_HEADER";
pub const ENV_HANDLE_PATTERNS: &str = "BINDSMITH_HANDLE_PATTERNS";
pub const ENV_OVERRIDE_DIR: &str = "BINDSMITH_OVERRIDE_DIR";
pub const ENV_SOURCE_COMMENTS: &str = "BINDSMITH_SOURCE_COMMENTS";

/// Complete generator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Key used to pick hand-written bodies out of override files
    pub host_language: String,

    /// Header declaring the host helper runtime (push/check helpers)
    pub helper_header: String,

    /// Header declaring `DubArgPointer`, included by fragments that read
    /// numeric pointers from host tables
    pub arg_pointer_header: String,

    /// Type names that mark manual host-object threading (`lua_State`).
    /// Functions mentioning them are never bound.
    pub host_handle_patterns: Vec<String>,

    /// Directory override files are resolved against
    pub override_base_dir: Option<PathBuf>,

    /// Precede each generated body with its declaration and source location
    pub source_comments: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            host_language: "lua".to_string(),
            helper_header: "dub/dub.h".to_string(),
            arg_pointer_header: "dub/lua_dub_helper.h".to_string(),
            host_handle_patterns: vec!["lua_State".to_string()],
            override_base_dir: None,
            source_comments: true,
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::default().merge_with_env()
    }

    /// Load configuration from TOML file
    #[cfg(feature = "toml-config")]
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        use anyhow::Context;

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: GeneratorConfig = toml::from_str(&contents)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        Ok(config)
    }

    /// Load configuration from TOML file (stub when toml feature is disabled)
    #[cfg(not(feature = "toml-config"))]
    pub fn from_file(_path: &Path) -> anyhow::Result<Self> {
        anyhow::bail!("TOML support not enabled. Enable the 'toml-config' feature.")
    }

    /// Merge with environment variables (env vars take precedence)
    pub fn merge_with_env(mut self) -> Self {
        if let Ok(val) = std::env::var(ENV_HOST) {
            self.host_language = val;
        }

        if let Ok(val) = std::env::var(ENV_HELPER_HEADER) {
            self.helper_header = val;
        }

        if let Ok(val) = std::env::var(ENV_ARG_POINTER_HEADER) {
            self.arg_pointer_header = val;
        }

        if let Ok(val) = std::env::var(ENV_HANDLE_PATTERNS) {
            self.host_handle_patterns = parse_list(&val);
        }

        if let Ok(val) = std::env::var(ENV_OVERRIDE_DIR) {
            self.override_base_dir = Some(PathBuf::from(val));
        }

        if let Ok(val) = std::env::var(ENV_SOURCE_COMMENTS) {
            self.source_comments = val.parse().unwrap_or(true);
        }

        self
    }

    /// Defaults, then `path` if given, then the environment.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(config.merge_with_env())
    }

    /// Resolves an override file path named by a binding directive.
    pub fn resolve_override_path(&self, path: &str) -> PathBuf {
        let candidate = PathBuf::from(path);
        match &self.override_base_dir {
            Some(base) if candidate.is_relative() => base.join(candidate),
            _ => candidate,
        }
    }

    /// Whether `type_name` is one of the manual host-handle types.
    pub fn is_host_handle(&self, type_name: &str) -> bool {
        self.host_handle_patterns
            .iter()
            .any(|pattern| type_name == pattern || type_name.ends_with(&format!("::{pattern}")))
    }
}

fn parse_list(val: &str) -> Vec<String> {
    val.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeneratorConfig::default();
        assert_eq!(config.host_language, "lua");
        assert_eq!(config.arg_pointer_header, "dub/lua_dub_helper.h");
        assert!(config.is_host_handle("lua_State"));
        assert!(config.is_host_handle("ns::lua_State"));
        assert!(!config.is_host_handle("State"));
    }

    #[test]
    fn test_parse_list() {
        assert_eq!(
            parse_list(" lua_State, ,LuaStackSize "),
            vec!["lua_State".to_string(), "LuaStackSize".to_string()]
        );
    }

    #[test]
    fn test_override_path_resolution() {
        let config = GeneratorConfig {
            override_base_dir: Some(PathBuf::from("/tmp/bindings")),
            ..GeneratorConfig::default()
        };
        assert_eq!(
            config.resolve_override_path("mat.yml"),
            PathBuf::from("/tmp/bindings/mat.yml")
        );
        assert_eq!(
            config.resolve_override_path("/abs/mat.yml"),
            PathBuf::from("/abs/mat.yml")
        );
    }

    #[test]
    #[cfg(feature = "toml-config")]
    fn test_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bindsmith.toml");
        std::fs::write(
            &path,
            "helper_header = \"lub/lub.h\"\nhost_handle_patterns = [\"lua_State\", \"Worker\"]\n",
        )
        .unwrap();
        let config = GeneratorConfig::from_file(&path).unwrap();
        assert_eq!(config.helper_header, "lub/lub.h");
        assert!(config.is_host_handle("Worker"));
        assert_eq!(config.host_language, "lua");
    }

    #[test]
    #[cfg(not(feature = "toml-config"))]
    fn test_config_from_file_requires_feature() {
        assert!(GeneratorConfig::from_file(Path::new("bindsmith.toml")).is_err());
    }
}
