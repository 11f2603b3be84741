use bindsmith_ty::TypeCategory;
use tracing::debug;

use crate::candidate::Candidate;
use crate::error::DispatchError;
use crate::tree::{DecisionNode, DecisionTree};

/// Builds the decision tree for `candidates`.
///
/// Each candidate is inserted by the category of its argument at the
/// current depth. Meeting another leaf under the same category pushes both
/// one level down. Two candidates that are still together once both have
/// run out of arguments cannot be distinguished and the set is rejected.
pub fn plan(candidates: &[Candidate]) -> Result<DecisionTree, DispatchError> {
    let Some(first) = candidates.first() else {
        return Err(DispatchError::Empty);
    };
    if let Some(other) = candidates.iter().find(|c| c.offset != first.offset) {
        return Err(DispatchError::MixedReceivers {
            first: first.declaration.clone(),
            second: other.declaration.clone(),
        });
    }

    let mut root = Vec::new();
    for index in 0..candidates.len() {
        insert(&mut root, candidates, index, 0)?;
    }
    let root = DecisionNode::Branch(root);
    let tree = DecisionTree {
        has_absent: root.has_absent(),
        root,
        offset: first.offset,
    };
    debug!(
        overloads = candidates.len(),
        depth = tree.depth(),
        has_absent = tree.has_absent,
        "dispatch planned"
    );
    Ok(tree)
}

fn insert(
    entries: &mut Vec<(TypeCategory, DecisionNode)>,
    candidates: &[Candidate],
    index: usize,
    depth: usize,
) -> Result<(), DispatchError> {
    let category = candidates[index].category_at(depth);
    let Some(slot) = entries.iter_mut().position(|(existing, _)| *existing == category) else {
        entries.push((category, DecisionNode::Leaf(index)));
        return Ok(());
    };

    match &mut entries[slot].1 {
        DecisionNode::Branch(sub) => insert(sub, candidates, index, depth + 1),
        DecisionNode::Leaf(existing) => {
            let existing = *existing;
            if category.is_absent() {
                return Err(DispatchError::Ambiguous {
                    first: candidates[existing].declaration.clone(),
                    second: candidates[index].declaration.clone(),
                });
            }
            let mut sub = Vec::new();
            insert(&mut sub, candidates, existing, depth + 1)?;
            insert(&mut sub, candidates, index, depth + 1)?;
            entries[slot].1 = DecisionNode::Branch(sub);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bindsmith_symbol::DottedId;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn opaque(id: &str) -> TypeCategory {
        TypeCategory::Opaque(DottedId::new(id))
    }

    fn candidate(categories: Vec<TypeCategory>) -> Candidate {
        let declaration = format!("f({})", categories.len());
        Candidate::new(categories, 0, declaration)
    }

    #[test]
    fn test_split_on_first_argument() {
        let tree = plan(&[
            candidate(vec![TypeCategory::Number]),
            candidate(vec![TypeCategory::String]),
            candidate(vec![opaque("cv.Mat")]),
        ])
        .unwrap();
        assert_eq!(
            tree.root,
            DecisionNode::Branch(vec![
                (TypeCategory::Number, DecisionNode::Leaf(0)),
                (TypeCategory::String, DecisionNode::Leaf(1)),
                (opaque("cv.Mat"), DecisionNode::Leaf(2)),
            ])
        );
        assert!(!tree.has_absent);
        assert_eq!(tree.last_leaf(), 2);
    }

    #[test]
    fn test_collision_pushes_both_down() {
        let tree = plan(&[
            candidate(vec![opaque("cv.Mat")]),
            candidate(vec![opaque("cv.Mat"), TypeCategory::Number]),
            candidate(vec![opaque("cv.Mat"), TypeCategory::Boolean]),
        ])
        .unwrap();
        assert_eq!(
            tree.root,
            DecisionNode::Branch(vec![(
                opaque("cv.Mat"),
                DecisionNode::Branch(vec![
                    (TypeCategory::Absent, DecisionNode::Leaf(0)),
                    (TypeCategory::Number, DecisionNode::Leaf(1)),
                    (TypeCategory::Boolean, DecisionNode::Leaf(2)),
                ])
            )])
        );
        assert!(tree.has_absent);
        assert_eq!(tree.depth(), 2);
        assert_eq!(tree.to_string(), "cv.Mat\n  absent -> #1\n  number -> #2\n  boolean -> #3\n");
    }

    #[test]
    fn test_identical_signatures_rejected() {
        let err = plan(&[
            Candidate::new(vec![TypeCategory::Number], 0, "int f(int)"),
            Candidate::new(vec![TypeCategory::Number], 0, "int f(double)"),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            DispatchError::Ambiguous {
                first: "int f(int)".to_string(),
                second: "int f(double)".to_string(),
            }
        );
    }

    #[test]
    fn test_receiver_offset_recorded() {
        let tree = plan(&[
            Candidate::new(vec![TypeCategory::Number], 1, "a"),
            Candidate::new(Vec::new(), 1, "b"),
        ])
        .unwrap();
        assert_eq!(tree.stack_position(0), 2);
        assert!(matches!(
            plan(&[Candidate::new(Vec::new(), 1, "a"), Candidate::new(vec![TypeCategory::Number], 0, "b")]),
            Err(DispatchError::MixedReceivers { .. })
        ));
        assert_eq!(plan(&[]), Err(DispatchError::Empty));
    }

    fn category() -> impl Strategy<Value = TypeCategory> {
        prop_oneof![
            Just(TypeCategory::Boolean),
            Just(TypeCategory::String),
            Just(TypeCategory::Number),
            Just(TypeCategory::NumberPointer),
            Just(opaque("cv.Mat")),
            Just(opaque("cv.Size")),
        ]
    }

    proptest! {
        #[test]
        fn distinct_first_arguments_give_one_branch_each(
            firsts in proptest::sample::subsequence(
                vec![
                    TypeCategory::Boolean,
                    TypeCategory::String,
                    TypeCategory::Number,
                    TypeCategory::NumberPointer,
                    opaque("cv.Mat"),
                ],
                1..=5,
            ),
            tails in proptest::collection::vec(proptest::collection::vec(category(), 0..3), 5),
        ) {
            let candidates: Vec<Candidate> = firsts
                .iter()
                .zip(&tails)
                .map(|(first, tail)| {
                    let mut categories = vec![first.clone()];
                    categories.extend(tail.iter().cloned());
                    candidate(categories)
                })
                .collect();
            let tree = plan(&candidates).unwrap();
            let DecisionNode::Branch(entries) = &tree.root else {
                panic!("root is always a branch");
            };
            prop_assert_eq!(entries.len(), candidates.len());
            for (entry, first) in entries.iter().zip(&firsts) {
                prop_assert_eq!(&entry.0, first);
            }
        }

        #[test]
        fn depth_bounded_by_longest_signature(
            signatures in proptest::collection::vec(proptest::collection::vec(category(), 0..4), 1..6),
        ) {
            let candidates: Vec<Candidate> = signatures.into_iter().map(candidate).collect();
            let longest = candidates.iter().map(Candidate::arity).max().unwrap_or(0);
            match plan(&candidates) {
                Ok(tree) => {
                    prop_assert!(tree.depth() <= longest.max(1));
                    let mut leaves = tree.root.leaves();
                    leaves.sort_unstable();
                    prop_assert_eq!(leaves, (0..candidates.len()).collect::<Vec<_>>());
                }
                Err(DispatchError::Ambiguous { .. }) => {
                    let mut seen = candidates.iter().map(|c| &c.categories).collect::<Vec<_>>();
                    seen.sort();
                    seen.dedup();
                    prop_assert!(seen.len() < candidates.len());
                }
                Err(other) => prop_assert!(false, "unexpected error {other}"),
            }
        }
    }
}
