use crate::decl::DeclId;
use thiserror::Error;

/// Host contract violations raised while building or querying the model.
///
/// These are programming errors in the caller, not user diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("unknown declaration {0:?}")]
    UnknownDeclaration(DeclId),

    #[error("{name} does not accept {found} type arguments (expected {expected})")]
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("{name} cannot be applied to type arguments")]
    NotGeneric { name: String },

    #[error("{name} is not a type parameter")]
    NotATypeParameter { name: String },

    #[error("{name} cannot have supertypes")]
    NoSupertypes { name: String },
}
