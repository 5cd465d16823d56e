//! Four-valued subtyping relation between arbitrary types.
//!
//! [`SubtypeChecker::relation`] answers "`left` is ... of `right`" with a
//! [`SubtypingRelation`]. Mixed comparisons are resolved with a fixed
//! precedence:
//!
//! 1. `Flexible` (either side)
//! 2. `Nullable`
//! 3. `Union`
//! 4. `Intersection`
//! 5. base types (`Constructor` / `Application`)
//!
//! When the higher-precedence shape sits on the right, the comparison is
//! flipped and the result inverted, so every rule in
//! `subtype_rules` only handles its shape on the left.
//!
//! Nominal questions (which constructor inherits from which, how arguments
//! are remapped onto a supertype, declared variance) are delegated to the
//! [`TypingEnvironment`].

use crate::environment::TypingEnvironment;
use crate::error::{TypeError, TypeResult};
use crate::recursion::{DepthCounter, RecursionGuard, RecursionProfile, RecursionResult};
use crate::relation::SubtypingRelation;
use crate::types::Type;
use tracing::{debug, trace};

/// Computes subtyping relations against one environment.
///
/// A checker carries a recursion guard keyed by operand pairs. Re-entering a
/// pair that is already being compared answers `Unrelated`. Exceeding the
/// profile's limits is `TypeError::RelationLimitExceeded`: the iteration
/// budget applies to each top-level query, and the depth only counts nested
/// nominal remappings.
pub struct SubtypeChecker<'a, E: TypingEnvironment + ?Sized> {
    pub(crate) env: &'a E,
    guard: RecursionGuard<(Type, Type)>,
    remaps: DepthCounter,
}

impl<'a, E: TypingEnvironment + ?Sized> SubtypeChecker<'a, E> {
    pub fn new(env: &'a E) -> Self {
        Self::with_profile(env, RecursionProfile::SubtypeCheck)
    }

    pub fn with_profile(env: &'a E, profile: RecursionProfile) -> Self {
        Self {
            env,
            guard: RecursionGuard::unbounded_depth(profile.max_iterations()),
            remaps: DepthCounter::with_profile(profile),
        }
    }

    /// Relation of `left` to `right`.
    pub fn relation(&mut self, left: &Type, right: &Type) -> TypeResult<SubtypingRelation> {
        if left == right {
            return Ok(SubtypingRelation::Equivalent);
        }

        if !self.guard.is_active() {
            self.guard.reset();
        }

        let key = (left.clone(), right.clone());
        match self.guard.enter(key.clone()) {
            RecursionResult::Entered => {
                let result = self.relation_inner(left, right);
                self.guard.leave(&key);
                result
            }
            RecursionResult::Cycle => {
                trace!(left = %left, right = %right, "SubtypeChecker: cycle, answering Unrelated");
                Ok(SubtypingRelation::Unrelated)
            }
            denied => {
                debug!(
                    left = %left,
                    right = %right,
                    reason = ?denied,
                    iterations = self.guard.iterations(),
                    "SubtypeChecker: guard denied comparison"
                );
                Err(TypeError::RelationLimitExceeded {
                    left: left.clone(),
                    right: right.clone(),
                })
            }
        }
    }

    /// Relation of a type a nominal rule has just rewritten.
    pub(crate) fn relate_remapped(
        &mut self,
        left: &Type,
        right: &Type,
    ) -> TypeResult<SubtypingRelation> {
        if !self.remaps.enter() {
            debug!(
                left = %left,
                right = %right,
                depth = self.remaps.depth(),
                "SubtypeChecker: remapping depth limit reached"
            );
            return Err(TypeError::RelationLimitExceeded {
                left: left.clone(),
                right: right.clone(),
            });
        }
        let result = self.relation(left, right);
        self.remaps.leave();
        result
    }

    pub fn is_subtype_of(&mut self, left: &Type, right: &Type) -> TypeResult<bool> {
        Ok(self.relation(left, right)?.is_subtype())
    }

    pub fn is_supertype_of(&mut self, left: &Type, right: &Type) -> TypeResult<bool> {
        Ok(self.relation(left, right)?.is_supertype())
    }

    /// Relation with `right` on the left, inverted back.
    pub(crate) fn flipped(&mut self, left: &Type, right: &Type) -> TypeResult<SubtypingRelation> {
        Ok(self.relation(right, left)?.invert())
    }

    fn relation_inner(&mut self, left: &Type, right: &Type) -> TypeResult<SubtypingRelation> {
        match (left, right) {
            (Type::Flexible(flexible), _) => self.relate_flexible(flexible, right),
            (_, Type::Flexible(_)) => self.flipped(left, right),

            (Type::Nullable(base), _) => self.relate_nullable(base, right),
            (_, Type::Nullable(_)) => self.flipped(left, right),

            (Type::Union(members), Type::Union(others)) => self.relate_unions(members, others),
            (Type::Union(members), _) => self.relate_union_to(members, right),
            (_, Type::Union(_)) => self.flipped(left, right),

            (Type::Intersection(members), Type::Intersection(others)) => {
                self.relate_intersections(members, others)
            }
            (Type::Intersection(members), _) => self.relate_intersection_to(members, right),
            (_, Type::Intersection(_)) => self.flipped(left, right),

            (Type::Constructor(this), Type::Constructor(that)) => {
                Ok(self.env.nominal_relation(this, that))
            }
            (Type::Constructor(this), Type::Application(app)) => {
                self.relate_constructor_to_application(this, app)
            }
            (Type::Application(_), Type::Constructor(_)) => self.flipped(left, right),
            (Type::Application(this), Type::Application(that)) => {
                self.relate_applications(this, that)
            }
        }
    }
}

/// Relation of `left` to `right` under `env` with a fresh checker.
pub fn subtyping_relation<E: TypingEnvironment + ?Sized>(
    env: &E,
    left: &Type,
    right: &Type,
) -> TypeResult<SubtypingRelation> {
    SubtypeChecker::new(env).relation(left, right)
}

/// Whether `left` is a subtype-or-equal of `right` under `env`.
pub fn is_subtype_of<E: TypingEnvironment + ?Sized>(
    env: &E,
    left: &Type,
    right: &Type,
) -> TypeResult<bool> {
    Ok(subtyping_relation(env, left, right)?.is_subtype())
}

#[cfg(test)]
#[path = "../tests/subtype_tests.rs"]
mod tests;
