//! Error types for the type algebra.

use crate::types::{Constructor, Type};
use thiserror::Error;

/// Errors raised while normalizing, relating or substituting types.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid flexible type: upper bound `{to}` is not a supertype of lower bound `{from}`")]
    InvalidFlexibleBounds { from: Type, to: Type },

    #[error("no declaration registered for `{constructor}`")]
    UnresolvedDeclaration { constructor: Constructor },

    #[error("`{supertype}` is not a declared supertype of `{subtype}`")]
    UnresolvedSupertype {
        subtype: Constructor,
        supertype: Constructor,
    },

    #[error("`{constructor}` declares {expected} type parameter(s) but was applied to {found}")]
    ArityMismatch {
        constructor: Constructor,
        expected: usize,
        found: usize,
    },

    #[error("`{supertype}` cannot be declared as a supertype of `{constructor}`")]
    InvalidSupertype {
        constructor: Constructor,
        supertype: Type,
    },

    #[error("normalization of `{ty}` did not settle within its recursion limits")]
    NormalizationLimitExceeded { ty: Type },

    #[error("relating `{left}` to `{right}` exceeded the relation recursion limits")]
    RelationLimitExceeded { left: Type, right: Type },

    #[error("unexpected type shape: {detail}")]
    UnreachableTypeShape { detail: String },
}

pub type TypeResult<T> = std::result::Result<T, TypeError>;
