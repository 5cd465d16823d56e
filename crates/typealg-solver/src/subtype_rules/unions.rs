//! Flexible, nullable, union and intersection rules.
//!
//! - `a..b` vs X: related however either bound is related (disjunctive)
//! - `a?` vs `b?`: nullability cancels
//! - `a?` vs X: a supertype of X when `a` is; never a subtype of a
//!   non-nullable type
//! - `S` (union) vs X: supertype if *some* member is, subtype if *all* are
//! - `S` (intersection) vs X: subtype if *some* member is, supertype if *all* are

use crate::environment::TypingEnvironment;
use crate::error::TypeResult;
use crate::relation::SubtypingRelation;
use crate::types::{FlexibleType, Type, TypeList};

use super::super::SubtypeChecker;

impl<'a, E: TypingEnvironment + ?Sized> SubtypeChecker<'a, E> {
    pub(crate) fn relate_flexible(
        &mut self,
        flexible: &FlexibleType,
        other: &Type,
    ) -> TypeResult<SubtypingRelation> {
        let lower = self.relation(&flexible.from, other)?;
        let upper = self.relation(&flexible.to, other)?;
        Ok(lower.or(upper))
    }

    pub(crate) fn relate_nullable(
        &mut self,
        base: &Type,
        other: &Type,
    ) -> TypeResult<SubtypingRelation> {
        if let Type::Nullable(other_base) = other {
            return self.relation(base, other_base);
        }
        if self.relation(base, other)?.is_supertype() {
            Ok(SubtypingRelation::Supertype)
        } else {
            Ok(SubtypingRelation::Unrelated)
        }
    }

    /// `S` vs `T`: supertype if every member of `T` is covered by a
    /// supertype in `S`; subtype if every member of `S` has a supertype in `T`.
    pub(crate) fn relate_unions(
        &mut self,
        members: &TypeList,
        others: &TypeList,
    ) -> TypeResult<SubtypingRelation> {
        let mut is_supertype = true;
        for other in others {
            if !self.any_member(members, other, SubtypingRelation::Supertype)? {
                is_supertype = false;
                break;
            }
        }

        let mut is_subtype = true;
        for member in members {
            if !self.any_other(member, others, SubtypingRelation::Subtype)? {
                is_subtype = false;
                break;
            }
        }

        Ok(SubtypingRelation::from_directions(is_subtype, is_supertype))
    }

    pub(crate) fn relate_union_to(
        &mut self,
        members: &TypeList,
        other: &Type,
    ) -> TypeResult<SubtypingRelation> {
        let mut any_supertype = false;
        let mut all_subtypes = true;
        for member in members {
            let relation = self.relation(member, other)?;
            any_supertype |= relation.is_supertype();
            all_subtypes &= relation.is_subtype();
        }
        Ok(SubtypingRelation::from_directions(all_subtypes, any_supertype))
    }

    /// Dual of [`relate_unions`](Self::relate_unions).
    pub(crate) fn relate_intersections(
        &mut self,
        members: &TypeList,
        others: &TypeList,
    ) -> TypeResult<SubtypingRelation> {
        let mut is_subtype = true;
        for other in others {
            if !self.any_member(members, other, SubtypingRelation::Subtype)? {
                is_subtype = false;
                break;
            }
        }

        let mut is_supertype = true;
        for member in members {
            if !self.any_other(member, others, SubtypingRelation::Supertype)? {
                is_supertype = false;
                break;
            }
        }

        Ok(SubtypingRelation::from_directions(is_subtype, is_supertype))
    }

    pub(crate) fn relate_intersection_to(
        &mut self,
        members: &TypeList,
        other: &Type,
    ) -> TypeResult<SubtypingRelation> {
        let mut any_subtype = false;
        let mut all_supertypes = true;
        for member in members {
            let relation = self.relation(member, other)?;
            any_subtype |= relation.is_subtype();
            all_supertypes &= relation.is_supertype();
        }
        Ok(SubtypingRelation::from_directions(any_subtype, all_supertypes))
    }

    /// Whether some `member` relates to `other` as `wanted`.
    fn any_member(
        &mut self,
        members: &TypeList,
        other: &Type,
        wanted: SubtypingRelation,
    ) -> TypeResult<bool> {
        for member in members {
            if self.relation(member, other)?.contains(wanted) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Whether `member` relates to some `other` as `wanted`.
    fn any_other(
        &mut self,
        member: &Type,
        others: &TypeList,
        wanted: SubtypingRelation,
    ) -> TypeResult<bool> {
        for other in others {
            if self.relation(member, other)?.contains(wanted) {
                return Ok(true);
            }
        }
        Ok(false)
    }
}
