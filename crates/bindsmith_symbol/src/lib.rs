//! Identifiers shared by every stage of the binding generator.

pub mod registry;
pub mod symbol;

pub use registry::{DuplicateSymbol, SymbolEntry, SymbolKind, SymbolTable};
pub use symbol::{DottedId, Symbol};
