//! The four-valued subtyping relation.
//!
//! Every relation query in the solver answers with a [`SubtypingRelation`]
//! rather than a boolean, so evidence gathered from several members of a
//! union or intersection can be combined without losing direction:
//!
//! - [`or`](SubtypingRelation::or) joins possibilities (least upper bound)
//! - [`and`](SubtypingRelation::and) requires both (greatest lower bound)
//! - [`contains`](SubtypingRelation::contains) asks whether a relation implies
//!   a particular directional fact
//!
//! ```text
//!             Equivalent
//!            /          \
//!       Subtype       Supertype
//!            \          /
//!             Unrelated
//! ```

use std::fmt;

/// Result of comparing two types, read as "left is ... of right".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubtypingRelation {
    /// Left is a subtype of right.
    Subtype,
    /// Left is a supertype of right.
    Supertype,
    /// Left and right are mutual subtypes.
    Equivalent,
    /// Neither direction holds.
    Unrelated,
}

impl SubtypingRelation {
    /// The relation seen from the other operand.
    #[inline]
    pub const fn invert(self) -> Self {
        match self {
            Self::Subtype => Self::Supertype,
            Self::Supertype => Self::Subtype,
            other => other,
        }
    }

    /// Least upper bound: the relation holds if either operand says so.
    ///
    /// `Unrelated` is the identity, `Equivalent` is absorbing, and
    /// `Subtype or Supertype` is `Equivalent`.
    pub const fn or(self, that: Self) -> Self {
        match (self, that) {
            (Self::Equivalent, _) | (_, Self::Equivalent) => Self::Equivalent,
            (Self::Unrelated, other) | (other, Self::Unrelated) => other,
            (Self::Subtype, Self::Subtype) => Self::Subtype,
            (Self::Supertype, Self::Supertype) => Self::Supertype,
            (Self::Subtype, Self::Supertype) | (Self::Supertype, Self::Subtype) => {
                Self::Equivalent
            }
        }
    }

    /// Greatest lower bound: the relation holds only if both operands say so.
    ///
    /// `Equivalent` is the identity, `Unrelated` is absorbing, and
    /// `Subtype and Supertype` is `Unrelated`.
    pub const fn and(self, that: Self) -> Self {
        match (self, that) {
            (Self::Unrelated, _) | (_, Self::Unrelated) => Self::Unrelated,
            (Self::Equivalent, other) | (other, Self::Equivalent) => other,
            (Self::Subtype, Self::Subtype) => Self::Subtype,
            (Self::Supertype, Self::Supertype) => Self::Supertype,
            (Self::Subtype, Self::Supertype) | (Self::Supertype, Self::Subtype) => {
                Self::Unrelated
            }
        }
    }

    /// Whether this relation implies `that`.
    ///
    /// `Equivalent` implies every relation and every relation implies
    /// `Unrelated` (which states nothing).
    #[inline]
    pub const fn contains(self, that: Self) -> bool {
        matches!(
            (self, that),
            (Self::Equivalent, _)
                | (_, Self::Unrelated)
                | (Self::Subtype, Self::Subtype)
                | (Self::Supertype, Self::Supertype)
        )
    }

    /// Shorthand for `contains(Subtype)`.
    #[inline]
    pub const fn is_subtype(self) -> bool {
        self.contains(Self::Subtype)
    }

    /// Shorthand for `contains(Supertype)`.
    #[inline]
    pub const fn is_supertype(self) -> bool {
        self.contains(Self::Supertype)
    }

    /// Build a relation from the two directional facts.
    pub const fn from_directions(is_subtype: bool, is_supertype: bool) -> Self {
        match (is_subtype, is_supertype) {
            (true, true) => Self::Equivalent,
            (true, false) => Self::Subtype,
            (false, true) => Self::Supertype,
            (false, false) => Self::Unrelated,
        }
    }
}

impl fmt::Display for SubtypingRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Subtype => "Subtype",
            Self::Supertype => "Supertype",
            Self::Equivalent => "Equivalent",
            Self::Unrelated => "Unrelated",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
#[path = "../tests/relation_tests.rs"]
mod tests;
