//! C++ declarator types for the binding generator.
//!
//! Turns raw declarator text into a [`TypeDescriptor`], classifies it into
//! the dynamic [`TypeCategory`] used for overload dispatch, and decides how
//! a value of that type crosses the host boundary ([`Marshal`]).

pub mod category;
pub mod descriptor;
pub mod error;
pub mod native;
pub mod parser;

pub use category::TypeCategory;
pub use descriptor::{Indirection, TypeDescriptor};
pub use error::TypeError;
pub use native::{Marshal, canonical_builtin, marshal};
pub use parser::{parse_declarator, parse_template_args};
