use mirror_loader::LookupError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SynthesisError {
    #[error("no types requested")]
    NoTypes,
    #[error(transparent)]
    Lookup(#[from] LookupError),
    #[error("unsupported {kind} type in {type_name}")]
    Unsupported { type_name: String, kind: String },
    #[error("{type_name} references undeclared type {reference}")]
    UnknownReference { type_name: String, reference: String },
    #[error("type parameter {param} is not in scope in {type_name}")]
    UnboundTypeParam { type_name: String, param: String },
    #[error("variadic signature in {type_name} does not end in a slice parameter")]
    InvalidVariadic { type_name: String },
    #[error("{reference} takes {expected} type arguments, found {found}")]
    TypeArgCount {
        reference: String,
        expected: usize,
        found: usize,
    },
    #[error("{first} and {second} both flatten to {flat}")]
    NameCollision {
        flat: String,
        first: String,
        second: String,
    },
}
