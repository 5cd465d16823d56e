//! Nominal rules for constructors and generic applications.
//!
//! Constructors are compared through the environment first. For
//! applications of the same constructor the arguments are compared
//! position-wise; for applications of related constructors the subtype is
//! first rewritten in terms of the supertype's constructor
//! (`MutableList<T>` seen as `List<out T>`) and then compared.

use crate::environment::TypingEnvironment;
use crate::error::TypeResult;
use crate::relation::SubtypingRelation;
use crate::types::{Constructor, Projection, Type, TypeApplication};
use tracing::trace;

use super::super::SubtypeChecker;

impl<'a, E: TypingEnvironment + ?Sized> SubtypeChecker<'a, E> {
    pub(crate) fn relate_constructor_to_application(
        &mut self,
        this: &Constructor,
        app: &TypeApplication,
    ) -> TypeResult<SubtypingRelation> {
        if this.is_nothing() {
            return Ok(SubtypingRelation::Subtype);
        }

        match self.env.nominal_relation(this, &app.constructor) {
            nominal @ (SubtypingRelation::Supertype | SubtypingRelation::Unrelated) => Ok(nominal),
            SubtypingRelation::Subtype => {
                let supertype = self.env.effective_supertype(this, &app.constructor)?;
                let relation = self.relate_remapped(&supertype, &Type::Application(app.clone()))?;
                Ok(relation.and(SubtypingRelation::Subtype))
            }
            // A raw use of a generic constructor stands for its star projection.
            SubtypingRelation::Equivalent => {
                let raw = TypeApplication::new(
                    app.constructor.clone(),
                    (0..app.arity()).map(|_| Projection::star()),
                );
                self.relate_remapped(&Type::Application(raw), &Type::Application(app.clone()))
            }
        }
    }

    pub(crate) fn relate_applications(
        &mut self,
        this: &TypeApplication,
        that: &TypeApplication,
    ) -> TypeResult<SubtypingRelation> {
        match self.env.nominal_relation(&this.constructor, &that.constructor) {
            SubtypingRelation::Equivalent => self.relate_arguments(this, that),
            SubtypingRelation::Supertype => {
                let supertype = self
                    .env
                    .effective_supertype(&that.constructor, &this.constructor)?;
                let remapped = self.env.remap_type_arguments(&supertype, that)?;
                trace!(
                    subtype = %that,
                    remapped = %remapped,
                    "SubtypeChecker: remapped subtype onto supertype constructor"
                );
                let relation = self.relate_remapped(&Type::Application(this.clone()), &remapped)?;
                Ok(relation.and(SubtypingRelation::Supertype))
            }
            SubtypingRelation::Subtype => self.flipped(
                &Type::Application(this.clone()),
                &Type::Application(that.clone()),
            ),
            SubtypingRelation::Unrelated => Ok(SubtypingRelation::Unrelated),
        }
    }

    /// Position-wise comparison of two applications of the same constructor.
    ///
    /// Each projection is first narrowed by the declared variance of its
    /// position. `in` bounds compare inverted, `out` bounds directly.
    fn relate_arguments(
        &mut self,
        this: &TypeApplication,
        that: &TypeApplication,
    ) -> TypeResult<SubtypingRelation> {
        if this.arity() != that.arity() {
            return Ok(SubtypingRelation::Unrelated);
        }

        let mut accumulated = SubtypingRelation::Equivalent;
        for (index, (left, right)) in this.args.iter().zip(that.args.iter()).enumerate() {
            let variance = self.env.declsite_variance(&this.constructor, index);
            let left = left.with_declsite_variance(variance);
            let right = right.with_declsite_variance(variance);

            let in_relation = self.relation(&left.in_bound, &right.in_bound)?.invert();
            let out_relation = self.relation(&left.out_bound, &right.out_bound)?;
            accumulated = accumulated.and(in_relation.and(out_relation));

            if accumulated == SubtypingRelation::Unrelated {
                trace!(
                    constructor = %this.constructor,
                    index,
                    "SubtypeChecker: arguments unrelated"
                );
                break;
            }
        }
        Ok(accumulated)
    }
}
