//! Declaration-site variance.
//!
//! A generic declaration fixes, per type parameter, how subtyping of the
//! argument relates to subtyping of the application:
//!
//! - **Covariant** (`out E`): `List<Dog>` <: `List<Animal>` if `Dog` <: `Animal`
//! - **Contravariant** (`in E`): `Sink<Animal>` <: `Sink<Dog>` if `Dog` <: `Animal`
//! - **Invariant** (`E`): `MutableList<Dog>` and `MutableList<Animal>` are unrelated
//!
//! Use-site variance is carried by [`Projection`](crate::Projection) instead;
//! the checker combines both through [`Projection::with_declsite_variance`](crate::Projection::with_declsite_variance).

use std::fmt;

/// Variance of one type-parameter position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Variance {
    Covariant,
    Contravariant,
    #[default]
    Invariant,
}

impl Variance {
    /// Variance obtained by composing an outer position with an inner one.
    ///
    /// Two contravariant flips cancel out; anything invariant stays invariant.
    pub const fn compose(self, inner: Self) -> Self {
        match (self, inner) {
            (Self::Invariant, _) | (_, Self::Invariant) => Self::Invariant,
            (Self::Covariant, other) => other,
            (Self::Contravariant, Self::Covariant) => Self::Contravariant,
            (Self::Contravariant, Self::Contravariant) => Self::Covariant,
        }
    }

    /// The keyword used when rendering a declaration (`out`, `in`, or nothing).
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Covariant => "out",
            Self::Contravariant => "in",
            Self::Invariant => "",
        }
    }
}

impl fmt::Display for Variance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
