use ahash::AHashMap;

use crate::function::Function;
use crate::group::Member;
use crate::scope::{FunctionRef, ScopeRef};

/// Materialized functions of one scope.
#[derive(Debug, Default)]
pub struct ScopeMembers {
    /// Every function declared in the scope, addressed by [`FunctionRef::index`].
    pub functions: Vec<Function>,
    /// Named entries in discovery order. Excludes constructors and templates.
    pub members: Vec<Member>,
    index: AHashMap<String, usize>,
    /// Functions with their own template parameter list.
    pub template_members: Vec<usize>,
    pub constructor: Option<Member>,
}

impl ScopeMembers {
    pub fn get(&self, name: &str) -> Option<&Member> {
        self.index.get(name).map(|&idx| &self.members[idx])
    }

    pub fn function(&self, index: usize) -> Option<&Function> {
        self.functions.get(index)
    }

    /// Groups `functions` by name in discovery order.
    pub(crate) fn assemble(scope: ScopeRef, functions: Vec<Function>) -> Self {
        let mut names: Vec<String> = Vec::new();
        let mut by_name: AHashMap<String, Vec<FunctionRef>> = AHashMap::new();
        let mut constructors = Vec::new();
        let mut template_members = Vec::new();

        for (index, function) in functions.iter().enumerate() {
            let fref = FunctionRef::new(scope, index);
            if function.is_template {
                template_members.push(index);
            } else if function.is_constructor {
                constructors.push(fref);
            } else {
                by_name
                    .entry(function.name.clone())
                    .or_insert_with(|| {
                        names.push(function.name.clone());
                        Vec::new()
                    })
                    .push(fref);
            }
        }

        let constructor = functions
            .iter()
            .find(|f| f.is_constructor)
            .and_then(|ctor| Member::from_functions(&ctor.name, constructors));

        let mut members = Vec::with_capacity(names.len());
        let mut index = AHashMap::with_capacity(names.len());
        for name in names {
            if let Some(member) = by_name
                .remove(&name)
                .and_then(|refs| Member::from_functions(&name, refs))
            {
                index.insert(name, members.len());
                members.push(member);
            }
        }

        Self {
            functions,
            members,
            index,
            template_members,
            constructor,
        }
    }
}
