//! Declaration tree handed over by the API extractor.
//!
//! The model never sees documentation markup: every node already carries its
//! kind, qualifiers, declared type text and source location.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Namespace,
    Class,
    Function,
    Parameter,
    Enum,
    EnumValue,
    Typedef,
    Define,
    Variable,
    Slot,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: String,
    pub line: u32,
}

impl SourceLocation {
    /// Basename of the declaring file (`matrix.h`).
    pub fn header(&self) -> &str {
        self.file.rsplit(['/', '\\']).next().unwrap_or(&self.file)
    }
}

impl fmt::Display for SourceLocation {
    /// Shows at most the last three path components (`app/include/matrix.h:14`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<&str> = self.file.split('/').filter(|p| !p.is_empty()).collect();
        let start = parts.len().saturating_sub(3);
        write!(f, "{}:{}", parts[start..].join("/"), self.line)
    }
}

/// Marks parameter `list` as an array whose length is passed in `count`
/// (0-based positions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListPair {
    pub list: usize,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclNode {
    pub kind: NodeKind,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_const: bool,
    #[serde(default)]
    pub is_variadic: bool,
    /// Declared type text (return type for functions).
    #[serde(default, rename = "type")]
    pub type_text: Option<String>,
    #[serde(default, rename = "default")]
    pub default_text: Option<String>,
    /// Array suffix reported on the parameter name (`[7]`).
    #[serde(default)]
    pub array: Option<String>,
    #[serde(default)]
    pub location: Option<SourceLocation>,
    /// Full declaration text, used in diagnostics and generated comments.
    #[serde(default)]
    pub signature: Option<String>,
    #[serde(default)]
    pub superclasses: Vec<String>,
    #[serde(default)]
    pub template_params: Vec<String>,
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Free-form binding directive block attached to a class.
    #[serde(default)]
    pub directive: Option<String>,
    #[serde(default)]
    pub list_args: Vec<ListPair>,
    #[serde(default)]
    pub children: Vec<DeclNode>,
}

impl DeclNode {
    pub fn new(kind: NodeKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            visibility: Visibility::Public,
            is_static: false,
            is_const: false,
            is_variadic: false,
            type_text: None,
            default_text: None,
            array: None,
            location: None,
            signature: None,
            superclasses: Vec::new(),
            template_params: Vec::new(),
            aliases: Vec::new(),
            directive: None,
            list_args: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn namespace(name: impl Into<String>) -> Self {
        Self::new(NodeKind::Namespace, name)
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::new(NodeKind::Class, name)
    }

    pub fn function(name: impl Into<String>) -> Self {
        Self::new(NodeKind::Function, name)
    }

    pub fn typedef(name: impl Into<String>, underlying: impl Into<String>) -> Self {
        Self::new(NodeKind::Typedef, name).with_type(underlying)
    }

    pub fn enumeration(name: impl Into<String>, values: &[&str]) -> Self {
        let mut node = Self::new(NodeKind::Enum, name);
        node.children = values
            .iter()
            .map(|value| Self::new(NodeKind::EnumValue, *value))
            .collect();
        node
    }

    pub fn define(name: impl Into<String>) -> Self {
        Self::new(NodeKind::Define, name)
    }

    #[must_use]
    pub fn with_type(mut self, type_text: impl Into<String>) -> Self {
        self.type_text = Some(type_text.into());
        self
    }

    #[must_use]
    pub fn param(self, name: impl Into<String>, type_text: impl Into<String>) -> Self {
        self.child(Self::new(NodeKind::Parameter, name).with_type(type_text))
    }

    #[must_use]
    pub fn param_with_default(
        self,
        name: impl Into<String>,
        type_text: impl Into<String>,
        default: impl Into<String>,
    ) -> Self {
        let mut param = Self::new(NodeKind::Parameter, name).with_type(type_text);
        param.default_text = Some(default.into());
        self.child(param)
    }

    #[must_use]
    pub fn child(mut self, child: DeclNode) -> Self {
        self.children.push(child);
        self
    }

    #[must_use]
    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    #[must_use]
    pub fn static_member(mut self) -> Self {
        self.is_static = true;
        self
    }

    #[must_use]
    pub fn located(mut self, file: impl Into<String>, line: u32) -> Self {
        self.location = Some(SourceLocation {
            file: file.into(),
            line,
        });
        self
    }

    #[must_use]
    pub fn with_directive(mut self, directive: impl Into<String>) -> Self {
        self.directive = Some(directive.into());
        self
    }

    #[must_use]
    pub fn with_template_params(mut self, params: &[&str]) -> Self {
        self.template_params = params.iter().map(|p| (*p).to_string()).collect();
        self
    }

    #[must_use]
    pub fn with_superclasses(mut self, supers: &[&str]) -> Self {
        self.superclasses = supers.iter().map(|s| (*s).to_string()).collect();
        self
    }

    pub fn children_of(&self, kind: NodeKind) -> impl Iterator<Item = &DeclNode> {
        self.children.iter().filter(move |child| child.kind == kind)
    }

    /// Declaration text for diagnostics, reconstructed when the extractor
    /// did not supply one.
    pub fn declaration(&self) -> String {
        if let Some(signature) = &self.signature {
            return signature.clone();
        }
        let params = self
            .children_of(NodeKind::Parameter)
            .map(|p| {
                let ty = p.type_text.as_deref().unwrap_or("");
                let mut text = if p.name.is_empty() {
                    ty.to_string()
                } else {
                    format!("{ty} {}", p.name)
                };
                if let Some(array) = &p.array {
                    text.push_str(array);
                }
                if let Some(default) = &p.default_text {
                    text.push_str(&format!("={default}"));
                }
                text
            })
            .collect::<Vec<_>>()
            .join(", ");
        match &self.type_text {
            Some(ty) if !ty.trim().is_empty() => format!("{ty} {}({params})", self.name),
            _ => format!("{}({params})", self.name),
        }
    }
}

/// Parses a declaration tree serialized as JSON (a list of root nodes).
pub fn from_json(text: &str) -> Result<Vec<DeclNode>, serde_json::Error> {
    serde_json::from_str(text)
}

/// Parses a declaration tree serialized as YAML (a list of root nodes).
pub fn from_yaml(text: &str) -> Result<Vec<DeclNode>, serde_yaml::Error> {
    serde_yaml::from_str(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_display() {
        let loc = SourceLocation {
            file: "/home/dev/app/include/matrix.h".to_string(),
            line: 33,
        };
        assert_eq!(loc.to_string(), "app/include/matrix.h:33");
        assert_eq!(loc.header(), "matrix.h");
    }

    #[test]
    fn test_reconstructed_declaration() {
        let node = DeclNode::function("resize")
            .with_type("void")
            .param("src", "const Mat &")
            .param_with_default("fx", "double", "0");
        assert_eq!(node.declaration(), "void resize(const Mat & src, double fx=0)");
    }

    #[test]
    fn test_json_tree() {
        let tree = from_json(
            r#"[{"kind": "namespace", "name": "cv", "children": [
                {"kind": "function", "name": "abs", "type": "double",
                 "children": [{"kind": "parameter", "name": "x", "type": "double"}]}
            ]}]"#,
        )
        .unwrap();
        assert_eq!(tree.len(), 1);
        let func = &tree[0].children[0];
        assert_eq!(func.kind, NodeKind::Function);
        assert_eq!(func.type_text.as_deref(), Some("double"));
        assert_eq!(func.visibility, Visibility::Public);
    }
}
