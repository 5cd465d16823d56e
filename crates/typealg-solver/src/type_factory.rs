//! Normalizing constructors and queries, available on every environment.
//!
//! `TypeAlgebra` is implemented for every [`TypingEnvironment`], so client
//! code reads as algebra over the environment it works in:
//!
//! ```ignore
//! let env = EmptyEnvironment;
//! let t = Type::constructor("T");
//! let a_out_t = env.apply("A", [Projection::covariant(t.clone())])?;
//! let joined = env.union2(t.clone(), a_out_t)?;
//! assert_eq!(env.relation(&t, &joined)?, SubtypingRelation::Subtype);
//! ```
//!
//! Every constructor here returns the normalized form. The raw constructors
//! on [`Type`] are available when an exact shape is needed.

use crate::environment::TypingEnvironment;
use crate::error::TypeResult;
use crate::instantiate;
use crate::normalize::TypeNormalizer;
use crate::relation::SubtypingRelation;
use crate::subtype::SubtypeChecker;
use crate::types::{Constructor, Projection, Type};

pub trait TypeAlgebra: TypingEnvironment {
    fn normalize(&self, ty: &Type) -> TypeResult<Type> {
        TypeNormalizer::new(self).normalize(ty)
    }

    fn union(&self, members: Vec<Type>) -> TypeResult<Type> {
        self.normalize(&Type::union_of(members))
    }

    fn union2(&self, left: Type, right: Type) -> TypeResult<Type> {
        self.union(vec![left, right])
    }

    fn intersection(&self, members: Vec<Type>) -> TypeResult<Type> {
        self.normalize(&Type::intersection_of(members))
    }

    fn intersection2(&self, left: Type, right: Type) -> TypeResult<Type> {
        self.intersection(vec![left, right])
    }

    /// `ty?`
    fn nullable(&self, ty: Type) -> TypeResult<Type> {
        self.normalize(&Type::nullable_of(ty))
    }

    /// `from..to`; fails with `InvalidFlexibleBounds` unless `to :> from`.
    fn flexible(&self, from: Type, to: Type) -> TypeResult<Type> {
        self.normalize(&Type::flexible_of(from, to))
    }

    fn apply(
        &self,
        constructor: impl Into<Constructor>,
        args: impl IntoIterator<Item = Projection>,
    ) -> TypeResult<Type>
    where
        Self: Sized,
    {
        self.normalize(&Type::application(constructor, args))
    }

    fn relation(&self, left: &Type, right: &Type) -> TypeResult<SubtypingRelation> {
        SubtypeChecker::new(self).relation(left, right)
    }

    fn is_subtype_of(&self, left: &Type, right: &Type) -> TypeResult<bool> {
        Ok(self.relation(left, right)?.is_subtype())
    }

    fn is_supertype_of(&self, left: &Type, right: &Type) -> TypeResult<bool> {
        Ok(self.relation(left, right)?.is_supertype())
    }

    fn replace(&self, ty: &Type, what: &Constructor, with: Projection) -> TypeResult<Type> {
        instantiate::replace(self, ty, what, with)
    }

    fn replace_with_type(&self, ty: &Type, what: &Constructor, with: Type) -> TypeResult<Type> {
        instantiate::replace_with_type(self, ty, what, with)
    }
}

impl<E: TypingEnvironment + ?Sized> TypeAlgebra for E {}

#[cfg(test)]
#[path = "../tests/type_factory_tests.rs"]
mod tests;
