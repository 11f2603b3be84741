use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("no overloads to dispatch")]
    Empty,

    #[error("overloads `{first}` and `{second}` cannot be told apart by argument types")]
    Ambiguous { first: String, second: String },

    #[error("overloads `{first}` and `{second}` disagree on passing a receiver")]
    MixedReceivers { first: String, second: String },
}
