use bindsmith_dispatch::DispatchError;
use bindsmith_model::ModelError;
use bindsmith_symbol::DuplicateSymbol;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SynthError {
    #[error("`{function}`: no marshalling rule for `{argument}`")]
    UnsupportedArgumentType { function: String, argument: String },

    #[error("class {class} has no bindable constructor `{constructor}`")]
    MissingConstructor { class: String, constructor: String },

    #[error("class {class}: custom constructor `{constructor}` is not a static method")]
    InvalidCustomConstructor { class: String, constructor: String },

    #[error("{owner}.{name} has no declaration")]
    MissingFunction { owner: String, name: String },

    #[error("{owner}.{name}: {source}")]
    Dispatch {
        owner: String,
        name: String,
        #[source]
        source: DispatchError,
    },

    #[error(transparent)]
    Symbol(#[from] DuplicateSymbol),

    #[error(transparent)]
    Model(#[from] ModelError),
}
