//! Explicit template instantiation by textual substitution.

use crate::tree::{DeclNode, Visibility};

/// Derives a concrete class body from a template class node.
///
/// Template parameter names are replaced by `args` in every type, default
/// and signature text, `Template<...>` spellings become `new_name`, and
/// non-public members are dropped.
pub fn instantiate(template: &DeclNode, params: &[String], args: &[String], new_name: &str) -> DeclNode {
    let subst = Substitution {
        template: &template.name,
        params,
        args,
        new_name,
    };

    let mut node = template.clone();
    node.name = new_name.to_string();
    node.template_params.clear();
    node.aliases.clear();
    node.children = template
        .children
        .iter()
        .filter(|child| child.visibility == Visibility::Public)
        .map(|child| subst.member(child))
        .collect();
    node
}

struct Substitution<'a> {
    template: &'a str,
    params: &'a [String],
    args: &'a [String],
    new_name: &'a str,
}

impl Substitution<'_> {
    fn member(&self, node: &DeclNode) -> DeclNode {
        let mut out = node.clone();
        if out.name == self.template {
            out.name = self.new_name.to_string();
        } else if out.name.strip_prefix('~') == Some(self.template) {
            out.name = format!("~{}", self.new_name);
        }
        out.type_text = node.type_text.as_deref().map(|text| self.text(text));
        out.default_text = node.default_text.as_deref().map(|text| self.text(text));
        out.signature = node.signature.as_deref().map(|text| self.text(text));
        out.children = node.children.iter().map(|child| self.member(child)).collect();
        out
    }

    fn text(&self, text: &str) -> String {
        let chars: Vec<char> = text.chars().collect();
        let mut out = String::with_capacity(text.len());
        let mut pos = 0;
        while pos < chars.len() {
            let c = chars[pos];
            if !(c.is_alphanumeric() || c == '_') {
                out.push(c);
                pos += 1;
                continue;
            }
            let start = pos;
            while pos < chars.len() && (chars[pos].is_alphanumeric() || chars[pos] == '_') {
                pos += 1;
            }
            let ident: String = chars[start..pos].iter().collect();
            if ident == self.template {
                out.push_str(self.new_name);
                pos = skip_template_args(&chars, pos);
            } else if let Some(arg) = self
                .params
                .iter()
                .position(|param| *param == ident)
                .and_then(|idx| self.args.get(idx))
            {
                out.push_str(arg);
            } else {
                out.push_str(&ident);
            }
        }
        out
    }
}

/// Position after a balanced `<...>` following `pos`, or `pos` itself.
fn skip_template_args(chars: &[char], pos: usize) -> usize {
    let mut look = pos;
    while look < chars.len() && chars[look].is_whitespace() {
        look += 1;
    }
    if chars.get(look) != Some(&'<') {
        return pos;
    }
    let mut depth = 0usize;
    for (offset, c) in chars[look..].iter().enumerate() {
        match c {
            '<' => depth += 1,
            '>' => {
                depth -= 1;
                if depth == 0 {
                    return look + offset + 1;
                }
            }
            _ => {}
        }
    }
    pos
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::NodeKind;
    use pretty_assertions::assert_eq;

    fn size_template() -> DeclNode {
        DeclNode::class("Size_")
            .with_template_params(&["typename _Tp"])
            .child(DeclNode::function("Size_"))
            .child(
                DeclNode::function("Size_")
                    .param("width", "_Tp")
                    .param("height", "_Tp"),
            )
            .child(DeclNode::function("~Size_"))
            .child(DeclNode::function("area").with_type("_Tp"))
            .child(
                DeclNode::function("copy")
                    .with_type("Size_<_Tp>")
                    .param("other", "const Size_< _Tp > &"),
            )
            .child(
                DeclNode::function("secret")
                    .with_type("_Tp")
                    .visibility(Visibility::Private),
            )
    }

    #[test]
    fn test_instantiation_substitutes_types() {
        let params = vec!["_Tp".to_string()];
        let args = vec!["int".to_string()];
        let node = instantiate(&size_template(), &params, &args, "Size");

        assert_eq!(node.name, "Size");
        assert!(node.template_params.is_empty());
        let names: Vec<&str> = node.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Size", "Size", "~Size", "area", "copy"]);

        let ctor = &node.children[1];
        let types: Vec<&str> = ctor
            .children_of(NodeKind::Parameter)
            .filter_map(|p| p.type_text.as_deref())
            .collect();
        assert_eq!(types, vec!["int", "int"]);

        let copy = &node.children[4];
        assert_eq!(copy.type_text.as_deref(), Some("Size"));
        assert_eq!(copy.children[0].type_text.as_deref(), Some("const Size &"));
    }

    #[test]
    fn test_identifier_boundaries_respected() {
        let params = vec!["T".to_string()];
        let args = vec!["float".to_string()];
        let subst = Substitution {
            template: "Vec",
            params: &params,
            args: &args,
            new_name: "Vecf",
        };
        assert_eq!(subst.text("const T *"), "const float *");
        assert_eq!(subst.text("Tvalue"), "Tvalue");
        assert_eq!(subst.text("std::vector<T>"), "std::vector<float>");
    }
}
