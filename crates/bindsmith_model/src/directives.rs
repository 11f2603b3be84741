//! Per-class binding directives.
//!
//! A class may carry a directive block in its documentation:
//!
//! ```yaml
//! ignore: 'rows, cols'
//! constructor: 'make'
//! destructor: 'release'
//! lib_name: 'mat'
//! ```

use serde::{Deserialize, Deserializer};

use crate::error::ModelError;

/// What happens when the host collects an object of the class.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DestructorPolicy {
    /// `delete` the object and clear the handle.
    #[default]
    Generic,
    /// Call this method instead of `delete`. Objects may die outside the
    /// host, so handles carry a liveness flag.
    Custom(String),
    /// The host never owns the object: no collection hook at all.
    None,
}

impl DestructorPolicy {
    #[inline]
    pub fn is_custom(&self) -> bool {
        matches!(self, DestructorPolicy::Custom(_))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BindingDirectives {
    /// Member names left out of the bindings.
    #[serde(default, deserialize_with = "name_list")]
    pub ignore: Vec<String>,
    /// Header to include instead of the declaring file.
    #[serde(default)]
    pub header: Option<String>,
    /// Name of the generated library (`luaopen_<lib_name>`).
    #[serde(default)]
    pub lib_name: Option<String>,
    /// Static method used in place of `new`.
    #[serde(default)]
    pub constructor: Option<String>,
    #[serde(default, deserialize_with = "destructor_policy")]
    pub destructor: DestructorPolicy,
    /// Replaces the superclass list found in the declaration.
    #[serde(default, rename = "super", deserialize_with = "optional_name_list")]
    pub superclasses: Option<Vec<String>>,
    /// Method the object uses to push itself onto the host stack.
    #[serde(default)]
    pub push: Option<String>,
    /// YAML file with hand-written function bodies.
    #[serde(default)]
    pub overrides: Option<String>,
}

impl BindingDirectives {
    /// Parses a directive block. An empty block yields the defaults.
    pub fn parse(class: &str, text: &str) -> Result<Self, ModelError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let parsed: Option<Self> =
            serde_yaml::from_str(text).map_err(|err| ModelError::MalformedDirective {
                class: class.to_string(),
                reason: err.to_string(),
            })?;
        Ok(parsed.unwrap_or_default())
    }

    pub fn ignores(&self, name: &str) -> bool {
        self.ignore.iter().any(|ignored| ignored == name)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NameList {
    Joined(String),
    Items(Vec<String>),
}

impl NameList {
    fn into_names(self) -> Vec<String> {
        let items = match self {
            NameList::Joined(joined) => joined.split(',').map(str::to_string).collect(),
            NameList::Items(items) => items,
        };
        items
            .into_iter()
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect()
    }
}

fn name_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(NameList::deserialize(deserializer)?.into_names())
}

fn optional_name_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<NameList>::deserialize(deserializer)?.map(NameList::into_names))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDestructor {
    Flag(bool),
    Name(String),
}

fn destructor_policy<'de, D>(deserializer: D) -> Result<DestructorPolicy, D::Error>
where
    D: Deserializer<'de>,
{
    let policy = match Option::<RawDestructor>::deserialize(deserializer)? {
        None | Some(RawDestructor::Flag(false)) => DestructorPolicy::None,
        Some(RawDestructor::Flag(true)) => DestructorPolicy::Generic,
        Some(RawDestructor::Name(name)) => match name.trim() {
            "" | "false" | "none" => DestructorPolicy::None,
            other => DestructorPolicy::Custom(other.to_string()),
        },
    };
    Ok(policy)
}
