//! Overload groups: one numbered body per overload plus a chooser that
//! walks the dispatch tree with host type checks.

use bindsmith_dispatch::{DecisionNode, DecisionTree, plan_group};
use bindsmith_model::{Member, OverloadGroup};
use bindsmith_symbol::SymbolKind;
use bindsmith_ty::TypeCategory;
use tracing::debug;

use crate::code::{CodeWriter, c_string};
use crate::error::SynthError;
use crate::fragment::{BodyFragment, GroupFragment, MemberFragment, signature};
use crate::names::{Owner, member_symbol};
use crate::synthesizer::Synthesizer;

impl Synthesizer<'_> {
    /// Emits a function or an overload group registered under its name.
    pub(crate) fn member(
        &self,
        owner: Owner,
        member: &Member,
        constructs: bool,
    ) -> Result<MemberFragment, SynthError> {
        let model = self.model();
        let name = model.member_name(member).to_string();
        let prefix = owner.prefix(model);
        let kind = if constructs {
            SymbolKind::Constructor
        } else {
            SymbolKind::Function
        };

        if let Owner::Class(class) = owner
            && let Some(body) = model.overrides(class).body(&name)
        {
            debug!(owner = %owner.id(model), name = %name, "using override body");
            let first = member.functions().first().and_then(|f| model.function(*f));
            let fragment = self.override_body(first, &member_symbol(&prefix, &name, None), kind, body);
            return Ok(MemberFragment::Function { name, fragment });
        }

        match member {
            Member::Function { function } => {
                let function = model.function(*function).ok_or_else(|| SynthError::MissingFunction {
                    owner: owner.id(model).to_string(),
                    name: name.clone(),
                })?;
                let fragment = self.function_body(owner, function, &member_symbol(&prefix, &name, None), kind)?;
                Ok(MemberFragment::Function { name, fragment })
            }
            Member::Group { group } => Ok(MemberFragment::Group(self.group(owner, group, constructs)?)),
        }
    }

    pub(crate) fn group(
        &self,
        owner: Owner,
        group: &OverloadGroup,
        constructs: bool,
    ) -> Result<GroupFragment, SynthError> {
        let model = self.model();
        let prefix = owner.prefix(model);
        let tree = plan_group(model, group).map_err(|source| SynthError::Dispatch {
            owner: owner.id(model).to_string(),
            name: group.name.clone(),
            source,
        })?;
        debug!(
            owner = %owner.id(model),
            name = %group.name,
            depth = tree.depth(),
            "planned overload dispatch"
        );

        let kind = if constructs {
            SymbolKind::Constructor
        } else {
            SymbolKind::Overload
        };
        let mut symbols = Vec::with_capacity(group.len());
        let mut overloads = Vec::with_capacity(group.len());
        for (index, fref) in group.indexed() {
            let Some(function) = model.function(fref) else {
                continue;
            };
            let symbol = member_symbol(&prefix, &group.name, Some(index));
            overloads.push(self.function_body(owner, function, &symbol, kind)?);
            symbols.push(symbol);
        }

        let chooser = chooser(&member_symbol(&prefix, &group.name, None), &tree, &symbols);
        Ok(GroupFragment {
            name: group.name.clone(),
            chooser,
            overloads,
        })
    }
}

/// Chooser body for `tree`; leaf `n` calls `symbols[n]`.
pub fn chooser(symbol: &str, tree: &DecisionTree, symbols: &[String]) -> BodyFragment {
    let mut code = CodeWriter::new();
    code.open(format!("{} {{", signature(symbol)));
    if tree.has_absent {
        code.line("int top__ = lua_gettop(L);");
    }
    match &tree.root {
        DecisionNode::Leaf(leaf) => code.line(call_leaf(symbols, *leaf)),
        DecisionNode::Branch(entries) => branch(&mut code, tree, entries, 0, symbols),
    }
    code.close("}");
    BodyFragment::new(symbol, SymbolKind::Chooser, code.finish())
}

fn branch(
    code: &mut CodeWriter,
    tree: &DecisionTree,
    entries: &[(TypeCategory, DecisionNode)],
    depth: usize,
    symbols: &[String],
) {
    let position = tree.stack_position(depth);
    if entries.iter().any(|(category, _)| !category.is_absent()) {
        code.line(format!("int type__ = lua_type(L, {position});"));
    }
    for (i, (category, node)) in entries.iter().enumerate() {
        let test = type_test(category, position);
        if i == 0 {
            code.open(format!("if ({test}) {{"));
        } else {
            code.reopen(format!("}} else if ({test}) {{"));
        }
        match node {
            DecisionNode::Leaf(leaf) => code.line(call_leaf(symbols, *leaf)),
            DecisionNode::Branch(nested) => branch(code, tree, nested, depth + 1, symbols),
        }
    }
    code.reopen("} else {");
    code.line("// No match: the last overload raises the type error.");
    let fallback = entries.last().map_or(0, |(_, node)| node.last_leaf());
    code.line(call_leaf(symbols, fallback));
    code.close("}");
}

fn type_test(category: &TypeCategory, position: usize) -> String {
    match category {
        TypeCategory::Boolean => "type__ == LUA_TBOOLEAN".to_string(),
        TypeCategory::String => "type__ == LUA_TSTRING".to_string(),
        TypeCategory::Number => "type__ == LUA_TNUMBER".to_string(),
        TypeCategory::NumberPointer => "type__ == LUA_TTABLE".to_string(),
        TypeCategory::Opaque(id) => {
            format!("dub_issdata(L, {position}, {}, type__)", c_string(id.as_str()))
        }
        TypeCategory::Absent => format!("top__ < {position}"),
    }
}

fn call_leaf(symbols: &[String], leaf: usize) -> String {
    match symbols.get(leaf) {
        Some(symbol) => format!("return {symbol}(L);"),
        None => "return 0;".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bindsmith_symbol::DottedId;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_chooser_with_arity_branch() {
        let tree = DecisionTree {
            root: DecisionNode::Branch(vec![
                (TypeCategory::Absent, DecisionNode::Leaf(0)),
                (
                    TypeCategory::Opaque(DottedId::new("cv.Mat")),
                    DecisionNode::Leaf(1),
                ),
            ]),
            has_absent: true,
            offset: 1,
        };
        let symbols = vec!["Mat_copyTo1".to_string(), "Mat_copyTo2".to_string()];
        let body = chooser("Mat_copyTo", &tree, &symbols);
        assert_eq!(
            body.body,
            indoc::indoc! {r#"
                static int Mat_copyTo(lua_State *L) {
                  int top__ = lua_gettop(L);
                  int type__ = lua_type(L, 2);
                  if (top__ < 2) {
                    return Mat_copyTo1(L);
                  } else if (dub_issdata(L, 2, "cv.Mat", type__)) {
                    return Mat_copyTo2(L);
                  } else {
                    // No match: the last overload raises the type error.
                    return Mat_copyTo2(L);
                  }
                }
            "#}
        );
        assert_eq!(body.kind, SymbolKind::Chooser);
    }
}
