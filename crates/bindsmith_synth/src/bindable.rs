use bindsmith_model::{ClassId, FunctionRef, Member, NamespaceId, OverloadGroup};

use crate::error::SynthError;
use crate::fragment::{Fragment, MemberFragment, RegistrationEntry};
use crate::names::{Owner, member_symbol, registration_name};
use crate::synthesizer::Synthesizer;

/// Anything that produces bindings.
#[derive(Debug, Clone, Copy)]
pub enum Bindable<'a> {
    Function { owner: Owner, function: FunctionRef },
    OverloadGroup { owner: Owner, group: &'a OverloadGroup },
    Class(ClassId),
    Namespace(NamespaceId),
}

impl<'a> Bindable<'a> {
    /// Wraps a bindable member of `owner`.
    pub fn member(owner: Owner, member: &'a Member) -> Self {
        match member {
            Member::Function { function } => Bindable::Function {
                owner,
                function: *function,
            },
            Member::Group { group } => Bindable::OverloadGroup { owner, group },
        }
    }

    /// Generated definitions.
    pub fn emit_body(&self, synth: &Synthesizer<'_>) -> Result<Fragment, SynthError> {
        match *self {
            Bindable::Function { owner, function } => {
                let constructs = synth.model().function(function).is_some_and(|f| f.is_constructor);
                emit_member(synth, owner, &Member::function(function), constructs)
            }
            Bindable::OverloadGroup { owner, group } => {
                let constructs = group
                    .members
                    .iter()
                    .filter_map(|f| synth.model().function(*f))
                    .any(|f| f.is_constructor);
                emit_member(synth, owner, &Member::group(group.clone()), constructs)
            }
            Bindable::Class(id) => Ok(Fragment::Class(Box::new(synth.class(id)?))),
            Bindable::Namespace(id) => Ok(Fragment::Namespace(Box::new(synth.namespace(id)?))),
        }
    }

    /// Host names this bindable contributes to its owner's tables.
    ///
    /// A class contributes its constructor names and static methods first,
    /// then its instance methods.
    pub fn emit_registration(&self, synth: &Synthesizer<'_>) -> Result<Vec<RegistrationEntry>, SynthError> {
        match *self {
            Bindable::Function { owner, function } => {
                let model = synth.model();
                let Some(f) = model.function(function) else {
                    return Ok(Vec::new());
                };
                let prefix = owner.prefix(model);
                let symbol = member_symbol(&prefix, &f.name, None);
                if f.is_constructor
                    && let Owner::Class(class) = owner
                {
                    return Ok(model
                        .class(class)
                        .names()
                        .map(|name| RegistrationEntry::new(name, &symbol))
                        .collect());
                }
                let name = registration_name(owner, &prefix, &f.name, f.is_static);
                Ok(vec![RegistrationEntry::new(name, symbol)])
            }
            Bindable::OverloadGroup { owner, group } => {
                let model = synth.model();
                let prefix = owner.prefix(model);
                let symbol = member_symbol(&prefix, &group.name, None);
                let constructs = group
                    .members
                    .iter()
                    .filter_map(|f| model.function(*f))
                    .any(|f| f.is_constructor);
                if constructs && let Owner::Class(class) = owner {
                    return Ok(model
                        .class(class)
                        .names()
                        .map(|name| RegistrationEntry::new(name, &symbol))
                        .collect());
                }
                let is_static = synth.is_static_member(&Member::group(group.clone()));
                Ok(vec![RegistrationEntry::new(
                    registration_name(owner, &prefix, &group.name, is_static),
                    symbol,
                )])
            }
            Bindable::Class(id) => {
                let fragment = synth.class(id)?;
                Ok(fragment
                    .class_methods
                    .entries
                    .into_iter()
                    .chain(fragment.member_methods.entries)
                    .collect())
            }
            Bindable::Namespace(id) => Ok(synth.namespace(id)?.function_table.entries),
        }
    }
}

fn emit_member(
    synth: &Synthesizer<'_>,
    owner: Owner,
    member: &Member,
    constructs: bool,
) -> Result<Fragment, SynthError> {
    Ok(match synth.member(owner, member, constructs)? {
        MemberFragment::Function { fragment, .. } => Fragment::Function(fragment),
        MemberFragment::Group(group) => Fragment::Group(group),
    })
}
