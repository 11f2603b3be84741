use std::fmt;

use bindsmith_ty::TypeCategory;
use serde::Serialize;

/// Node of a dispatch decision tree. Leaves hold the position of an
/// overload in the planned candidate list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionNode {
    Leaf(usize),
    /// Entries keyed by the category of the argument at this depth, in
    /// insertion order.
    Branch(Vec<(TypeCategory, DecisionNode)>),
}

impl DecisionNode {
    /// The leaf reached by always taking the last entry. Dispatch falls
    /// through to it so the host reports a type error for that overload.
    pub fn last_leaf(&self) -> usize {
        match self {
            DecisionNode::Leaf(leaf) => *leaf,
            DecisionNode::Branch(entries) => entries
                .last()
                .map_or(0, |(_, node)| node.last_leaf()),
        }
    }

    /// Levels of branching on the longest path.
    pub fn depth(&self) -> usize {
        match self {
            DecisionNode::Leaf(_) => 0,
            DecisionNode::Branch(entries) => {
                1 + entries.iter().map(|(_, node)| node.depth()).max().unwrap_or(0)
            }
        }
    }

    pub fn has_absent(&self) -> bool {
        match self {
            DecisionNode::Leaf(_) => false,
            DecisionNode::Branch(entries) => entries
                .iter()
                .any(|(category, node)| category.is_absent() || node.has_absent()),
        }
    }

    /// Every leaf, left to right.
    pub fn leaves(&self) -> Vec<usize> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves(&self, out: &mut Vec<usize>) {
        match self {
            DecisionNode::Leaf(leaf) => out.push(*leaf),
            DecisionNode::Branch(entries) => {
                for (_, node) in entries {
                    node.collect_leaves(out);
                }
            }
        }
    }

    fn write_indented(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        match self {
            DecisionNode::Leaf(leaf) => writeln!(f, "{:indent$}#{}", "", leaf + 1),
            DecisionNode::Branch(entries) => {
                for (category, node) in entries {
                    match node {
                        DecisionNode::Leaf(leaf) => {
                            writeln!(f, "{:indent$}{category} -> #{}", "", leaf + 1)?;
                        }
                        DecisionNode::Branch(_) => {
                            writeln!(f, "{:indent$}{category}", "")?;
                            node.write_indented(f, indent + 2)?;
                        }
                    }
                }
                Ok(())
            }
        }
    }
}

/// Dispatch plan for one overload set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecisionTree {
    pub root: DecisionNode,
    /// Some branch tests for a missing argument, so the chooser must probe
    /// the host stack height.
    pub has_absent: bool,
    /// Host stack position of the first dispatched argument, minus one.
    pub offset: usize,
}

impl DecisionTree {
    /// Host stack position (1-based) inspected at `depth`.
    #[inline]
    pub fn stack_position(&self, depth: usize) -> usize {
        self.offset + depth + 1
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    #[inline]
    pub fn last_leaf(&self) -> usize {
        self.root.last_leaf()
    }
}

impl fmt::Display for DecisionTree {
    /// One line per entry, overloads shown by 1-based index.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.root.write_indented(f, 0)
    }
}
