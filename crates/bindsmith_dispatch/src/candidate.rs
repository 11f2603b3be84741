use bindsmith_model::Function;
use bindsmith_ty::TypeCategory;

/// What the planner needs to know about one overload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Category of each argument the host passes, in order.
    pub categories: Vec<TypeCategory>,
    /// Host stack slots before the first argument (1 when a receiver is passed).
    pub offset: usize,
    /// Declaration text, for ambiguity reports.
    pub declaration: String,
}

impl Candidate {
    pub fn new(categories: Vec<TypeCategory>, offset: usize, declaration: impl Into<String>) -> Self {
        Self {
            categories,
            offset,
            declaration: declaration.into(),
        }
    }

    pub fn from_function(function: &Function) -> Self {
        Self {
            categories: function
                .host_arguments()
                .map(|arg| arg.category.clone())
                .collect(),
            offset: function.dispatch_offset(),
            declaration: function.declaration.clone(),
        }
    }

    /// Category at `depth`, or [`TypeCategory::Absent`] past the last argument.
    pub fn category_at(&self, depth: usize) -> TypeCategory {
        self.categories
            .get(depth)
            .cloned()
            .unwrap_or(TypeCategory::Absent)
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.categories.len()
    }
}
