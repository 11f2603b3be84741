//! Overload dispatch planning.
//!
//! A set of same-named overloads becomes a decision tree keyed by the
//! dynamic type category of each argument, which the synthesizer turns
//! into nested host type checks.

pub mod candidate;
pub mod error;
pub mod planner;
pub mod tree;

pub use candidate::Candidate;
pub use error::DispatchError;
pub use planner::plan;
pub use tree::{DecisionNode, DecisionTree};

use bindsmith_model::{Model, OverloadGroup};

/// Plans dispatch for `group`; leaves index `group.members`.
pub fn plan_group(model: &Model, group: &OverloadGroup) -> Result<DecisionTree, DispatchError> {
    let candidates: Vec<Candidate> = group
        .members
        .iter()
        .filter_map(|fref| model.function(*fref))
        .map(Candidate::from_function)
        .collect();
    plan(&candidates)
}
