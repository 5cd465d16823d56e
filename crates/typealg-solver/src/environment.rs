//! Typing environments.
//!
//! The solver never inspects a class hierarchy directly. Everything nominal
//! (which constructor is a subtype of which, how a subtype's arguments map
//! onto a supertype's, and the declared variance of each parameter) is asked
//! of a [`TypingEnvironment`].
//!
//! Two environments ship with the crate:
//! - [`EmptyEnvironment`]: only the `Any`/`Nothing` extremes are related.
//! - [`DeclEnvironment`](crate::DeclEnvironment): backed by registered
//!   [`TypeDeclaration`](crate::TypeDeclaration)s.

use crate::error::{TypeError, TypeResult};
use crate::relation::SubtypingRelation;
use crate::types::{Constructor, Type, TypeApplication};
use crate::variance::Variance;

/// Nominal capabilities the relation and normalization engines need.
pub trait TypingEnvironment {
    /// Relation between two constructors, read as "`this` is ... of `that`".
    fn nominal_relation(&self, this: &Constructor, that: &Constructor) -> SubtypingRelation;

    /// The supertype of `this` whose head constructor is `that`, expressed in
    /// terms of `this`'s own type parameters.
    fn effective_supertype(&self, this: &Constructor, that: &Constructor) -> TypeResult<Type>;

    /// Rewrite `supertype` (as returned by
    /// [`effective_supertype`](Self::effective_supertype) for
    /// `subtype.constructor`) with `subtype`'s actual arguments in place of
    /// the declared parameters.
    fn remap_type_arguments(&self, supertype: &Type, subtype: &TypeApplication)
    -> TypeResult<Type>;

    /// Declaration-site variance of parameter `index` of `constructor`.
    fn declsite_variance(&self, constructor: &Constructor, index: usize) -> Variance;
}

/// Relation every environment agrees on: identity and the `Any`/`Nothing`
/// extremes. Anything else is `Unrelated` here.
pub fn default_relation(from: &Constructor, to: &Constructor) -> SubtypingRelation {
    if from == to {
        SubtypingRelation::Equivalent
    } else if from.is_any() {
        SubtypingRelation::Supertype
    } else if from.is_nothing() {
        SubtypingRelation::Subtype
    } else if to.is_any() {
        SubtypingRelation::Subtype
    } else if to.is_nothing() {
        SubtypingRelation::Supertype
    } else {
        SubtypingRelation::Unrelated
    }
}

/// Environment without declarations.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyEnvironment;

impl TypingEnvironment for EmptyEnvironment {
    fn nominal_relation(&self, this: &Constructor, that: &Constructor) -> SubtypingRelation {
        default_relation(this, that)
    }

    fn effective_supertype(&self, this: &Constructor, that: &Constructor) -> TypeResult<Type> {
        if that.is_any() {
            return Ok(Type::any());
        }
        Err(TypeError::UnresolvedSupertype {
            subtype: this.clone(),
            supertype: that.clone(),
        })
    }

    fn remap_type_arguments(
        &self,
        supertype: &Type,
        _subtype: &TypeApplication,
    ) -> TypeResult<Type> {
        Ok(supertype.clone())
    }

    fn declsite_variance(&self, _constructor: &Constructor, _index: usize) -> Variance {
        Variance::Invariant
    }
}

#[cfg(test)]
#[path = "../tests/environment_tests.rs"]
mod tests;
