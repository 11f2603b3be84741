//! bindsmith: generates Lua C API bindings from C++ declaration trees.
//!
//! The heavy lifting lives in the workspace crates; this crate wires them
//! into the command line pipeline.

pub mod cli;
pub mod pipeline;

pub use bindsmith_config::GeneratorConfig;
pub use bindsmith_model::{DeclNode, Model};
pub use bindsmith_synth::Synthesizer;
