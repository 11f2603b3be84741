//! Binding synthesizer.
//!
//! Emits Lua C API glue for the bindable view of a declaration model: one
//! body per function, a chooser per overload group, lifetime hooks and
//! registration tables per class, and an opener per class and namespace.
//! The generated code relies on the helpers declared in `dub/dub.h`.

pub mod bindable;
pub mod class;
pub mod code;
pub mod error;
pub mod fragment;
pub mod function;
pub mod group;
pub mod names;
pub mod namespace;
pub mod synthesizer;

pub use bindable::Bindable;
pub use error::SynthError;
pub use fragment::{
    BodyFragment, ClassFragment, ConstantEntry, Fragment, GroupFragment, MemberFragment,
    NamespaceFragment, RegistrationEntry, Table,
};
pub use group::chooser;
pub use names::Owner;
pub use synthesizer::Synthesizer;
