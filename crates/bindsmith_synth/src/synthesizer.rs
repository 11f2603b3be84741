use bindsmith_config::GeneratorConfig;
use bindsmith_model::{Diagnostic, Member, Model};
use bindsmith_ty::Marshal;
use bindsmith_symbol::{DottedId, SymbolEntry, SymbolTable};

use crate::error::SynthError;
use crate::fragment::{BodyFragment, MemberFragment};
use crate::names::Owner;

/// Turns the bindable view of a [`Model`] into code fragments.
///
/// Entities that cannot be generated are left out and reported through
/// [`Model::record`]; the fragments handed back are always complete.
pub struct Synthesizer<'m> {
    model: &'m Model,
}

impl<'m> Synthesizer<'m> {
    pub fn new(model: &'m Model) -> Self {
        Self { model }
    }

    #[inline]
    pub fn model(&self) -> &'m Model {
        self.model
    }

    #[inline]
    pub fn config(&self) -> &'m GeneratorConfig {
        self.model.config()
    }

    /// Emits `member`, or records why it was left out.
    pub(crate) fn member_or_omit(
        &self,
        owner: Owner,
        member: &Member,
        constructs: bool,
    ) -> Option<MemberFragment> {
        match self.member(owner, member, constructs) {
            Ok(fragment) => Some(fragment),
            Err(err) => {
                let entity = owner.id(self.model).child(self.model.member_name(member));
                self.omit(&entity, &err);
                None
            }
        }
    }

    /// A member is static when every overload it groups is.
    pub(crate) fn is_static_member(&self, member: &Member) -> bool {
        member
            .functions()
            .into_iter()
            .filter_map(|f| self.model.function(f))
            .all(|f| f.is_static)
    }

    /// Whether any argument of `members` is read through `DubArgPointer`.
    pub(crate) fn needs_arg_pointer<'a>(&self, members: impl IntoIterator<Item = &'a Member>) -> bool {
        members
            .into_iter()
            .flat_map(Member::functions)
            .filter_map(|f| self.model.function(f))
            .flat_map(|f| &f.arguments)
            .any(|arg| arg.marshal() == Some(Marshal::NumberPointer))
    }

    pub(crate) fn omit(&self, entity: &DottedId, err: &SynthError) {
        self.model
            .record(Diagnostic::warning(entity.to_string(), format!("not generated: {err}")));
    }
}

/// Registers every body in `table`, failing on the first collision.
pub(crate) fn register_bodies<'a>(
    table: &mut SymbolTable,
    owner: &DottedId,
    bodies: impl IntoIterator<Item = &'a BodyFragment>,
) -> Result<(), SynthError> {
    table.register_many(bodies.into_iter().map(|body| SymbolEntry {
        symbol: body.symbol.clone(),
        owner: owner.clone(),
        kind: body.kind,
    }))?;
    Ok(())
}
