//! Normalization of types to canonical form.
//!
//! Normalization runs in two passes that are repeated until the type stops
//! changing:
//!
//! 1. **Structural step**: rules that need no hierarchy. Flattening, collapsing
//!    singletons, pulling `?` and `..` out of unions/intersections,
//!    distributing intersections over unions, and merging applications of the
//!    same constructor.
//! 2. **Subtyping step**: rules that ask the [`TypingEnvironment`]. Dropping
//!    union members implied by other members (and dually for intersections)
//!    and validating flexible bounds.
//!
//! Children are normalized before their parent, and every compound a rule
//! builds is normalized on the spot, so each step only ever looks at the top
//! level of a type whose children are canonical.
//!
//! Termination is enforced explicitly: compounds built by a rule are
//! normalized through a [`DepthCounter`] and each fixpoint loop is capped at
//! [`MAX_FIXPOINT_ROUNDS`]. Descending into the children of the input is not
//! counted, so arbitrarily deep well-formed types normalize.

use crate::environment::TypingEnvironment;
use crate::error::{TypeError, TypeResult};
use crate::recursion::{DepthCounter, MAX_FIXPOINT_ROUNDS, RecursionProfile};
use crate::relation::SubtypingRelation;
use crate::subtype::SubtypeChecker;
use crate::types::{
    Constructor, FlexibleType, Projection, Type, TypeApplication, TypeList, TypeListBuffer,
};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::{debug, trace};

/// Which lattice operation a member list belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combine {
    Union,
    Intersection,
}

impl Combine {
    fn build(self, members: TypeList) -> Type {
        match self {
            Combine::Union => Type::Union(members),
            Combine::Intersection => Type::Intersection(members),
        }
    }

    /// The operation used for the other bound when merging projections.
    fn dual(self) -> Self {
        match self {
            Combine::Union => Combine::Intersection,
            Combine::Intersection => Combine::Union,
        }
    }

    /// Relation that marks a member as implied by another member.
    fn dominated(self) -> SubtypingRelation {
        match self {
            // `a | b` with `a <: b` is just `b`.
            Combine::Union => SubtypingRelation::Subtype,
            // `a & b` with `a :> b` is just `b`.
            Combine::Intersection => SubtypingRelation::Supertype,
        }
    }
}

/// Normalizes types against a typing environment.
pub struct TypeNormalizer<'a, E: TypingEnvironment + ?Sized> {
    env: &'a E,
    depth: DepthCounter,
}

impl<'a, E: TypingEnvironment + ?Sized> TypeNormalizer<'a, E> {
    pub fn new(env: &'a E) -> Self {
        Self {
            env,
            depth: DepthCounter::with_profile(RecursionProfile::Normalization),
        }
    }

    pub fn with_profile(env: &'a E, profile: RecursionProfile) -> Self {
        Self {
            env,
            depth: DepthCounter::with_profile(profile),
        }
    }

    /// Normalize `ty` to its canonical form.
    pub fn normalize(&mut self, ty: &Type) -> TypeResult<Type> {
        let mut current = self.normalize_children(ty)?;

        for round in 0..MAX_FIXPOINT_ROUNDS {
            let structural = self.structural_step(&current)?;
            let next = self.subtyping_step(&structural)?;
            if next == current {
                return Ok(current);
            }
            trace!(round, from = %current, to = %next, "TypeNormalizer: fixpoint round");
            current = next;
        }

        debug!(ty = %ty, rounds = MAX_FIXPOINT_ROUNDS, "TypeNormalizer: fixpoint did not settle");
        Err(TypeError::NormalizationLimitExceeded { ty: ty.clone() })
    }

    fn normalize_children(&mut self, ty: &Type) -> TypeResult<Type> {
        Ok(match ty {
            Type::Constructor(_) => ty.clone(),
            Type::Application(app) => {
                let args = app
                    .args
                    .iter()
                    .map(|arg| self.normalize_projection(arg))
                    .collect::<TypeResult<Vec<_>>>()?;
                Type::Application(TypeApplication::new(app.constructor.clone(), args))
            }
            Type::Union(members) => Type::Union(self.normalize_members(members)?),
            Type::Intersection(members) => Type::Intersection(self.normalize_members(members)?),
            Type::Nullable(base) => Type::nullable_of(self.normalize(base)?),
            Type::Flexible(flexible) => {
                Type::flexible_of(self.normalize(&flexible.from)?, self.normalize(&flexible.to)?)
            }
        })
    }

    fn normalize_projection(&mut self, projection: &Projection) -> TypeResult<Projection> {
        Ok(Projection::new(
            self.normalize(&projection.out_bound)?,
            self.normalize(&projection.in_bound)?,
        ))
    }

    fn normalize_members(&mut self, members: &TypeList) -> TypeResult<TypeList> {
        let mut buffer = TypeListBuffer::with_capacity(members.len());
        for member in members {
            buffer.push(self.normalize(member)?);
        }
        Ok(TypeList::from_buffer(&mut buffer))
    }

    /// Normalize a compound a rule has just built.
    fn rebuild(&mut self, raw: &Type) -> TypeResult<Type> {
        if !self.depth.enter() {
            debug!(
                ty = %raw,
                depth = self.depth.depth(),
                "TypeNormalizer: rebuild depth limit reached"
            );
            return Err(TypeError::NormalizationLimitExceeded { ty: raw.clone() });
        }
        let result = self.normalize(raw);
        self.depth.leave();
        result
    }

    fn normalize_combined(
        &mut self,
        combine: Combine,
        mut members: TypeListBuffer,
    ) -> TypeResult<Type> {
        let raw = combine.build(TypeList::from_buffer(&mut members));
        self.rebuild(&raw)
    }

    // =========================================================================
    // Structural step
    // =========================================================================

    fn structural_step(&mut self, ty: &Type) -> TypeResult<Type> {
        match ty {
            Type::Constructor(_) => Ok(ty.clone()),
            Type::Application(app) if app.args.is_empty() => {
                Ok(Type::Constructor(app.constructor.clone()))
            }
            Type::Application(_) => Ok(ty.clone()),
            Type::Nullable(base) => self.structural_nullable(ty, base),
            Type::Flexible(flexible) => Ok(structural_flexible(ty, flexible)),
            Type::Union(members) => self.structural_combined(Combine::Union, members),
            Type::Intersection(members) => self.structural_combined(Combine::Intersection, members),
        }
    }

    fn structural_nullable(&mut self, ty: &Type, base: &Type) -> TypeResult<Type> {
        match base {
            Type::Nullable(_) => Ok(base.clone()),
            Type::Flexible(flexible) => {
                let from = self.rebuild(&Type::nullable_of(flexible.from.clone()))?;
                let to = self.rebuild(&Type::nullable_of(flexible.to.clone()))?;
                Ok(Type::flexible_of(from, to))
            }
            _ => Ok(ty.clone()),
        }
    }

    fn structural_combined(&mut self, combine: Combine, members: &TypeList) -> TypeResult<Type> {
        let flat = flatten(combine, members);
        match flat.len() {
            0 => return Ok(Type::any()),
            1 => return Ok(flat[0].clone()),
            _ => {}
        }

        if flat.iter().any(Type::is_flexible) {
            return self.extract_flexible(combine, &flat);
        }
        if flat.iter().any(Type::is_nullable) {
            return self.extract_nullable(combine, &flat);
        }
        if combine == Combine::Intersection
            && flat.iter().any(|member| matches!(member, Type::Union(_)))
        {
            return self.distribute(&flat);
        }
        if let Some(merged) = self.merge_applications(combine, &flat)? {
            return Ok(combine.build(merged));
        }

        Ok(combine.build(TypeList::new(flat)))
    }

    /// `A | (B..C)` becomes `(A | B)..(A | C)`; likewise for `&`.
    fn extract_flexible(&mut self, combine: Combine, members: &[Type]) -> TypeResult<Type> {
        let mut lower = TypeListBuffer::new();
        let mut upper = TypeListBuffer::new();
        for member in members {
            match member {
                Type::Flexible(flexible) => {
                    lower.push(flexible.from.clone());
                    upper.push(flexible.to.clone());
                }
                other => {
                    lower.push(other.clone());
                    upper.push(other.clone());
                }
            }
        }
        let from = self.normalize_combined(combine, lower)?;
        let to = self.normalize_combined(combine, upper)?;
        Ok(Type::flexible_of(from, to))
    }

    /// A union is nullable if any member is; an intersection only if every
    /// member is. Otherwise the `?` of intersection members is dropped since
    /// a non-nullable member already excludes null.
    fn extract_nullable(&mut self, combine: Combine, members: &[Type]) -> TypeResult<Type> {
        let all_nullable = members.iter().all(Type::is_nullable);
        let bases: TypeListBuffer = members
            .iter()
            .map(|member| match member {
                Type::Nullable(base) => (**base).clone(),
                other => other.clone(),
            })
            .collect();

        match combine {
            Combine::Union => Ok(Type::nullable_of(
                self.normalize_combined(Combine::Union, bases)?,
            )),
            Combine::Intersection if all_nullable => Ok(Type::nullable_of(
                self.normalize_combined(Combine::Intersection, bases)?,
            )),
            Combine::Intersection => Ok(Type::Intersection(TypeList::new(bases))),
        }
    }

    /// `(A | B) & C` becomes `(A & C) | (B & C)`.
    fn distribute(&mut self, members: &[Type]) -> TypeResult<Type> {
        let mut unions: SmallVec<[&TypeList; 4]> = SmallVec::new();
        let mut rest = TypeListBuffer::new();
        for member in members {
            match member {
                Type::Union(union_members) => unions.push(union_members),
                other => rest.push(other.clone()),
            }
        }

        let mut combinations: Vec<TypeListBuffer> = vec![rest];
        for union_members in unions {
            let mut next = Vec::with_capacity(combinations.len() * union_members.len());
            for combination in &combinations {
                for alternative in union_members {
                    let mut extended = combination.clone();
                    extended.push(alternative.clone());
                    next.push(extended);
                }
            }
            combinations = next;
        }

        let mut alternatives = TypeListBuffer::with_capacity(combinations.len());
        for combination in combinations {
            alternatives.push(self.normalize_combined(Combine::Intersection, combination)?);
        }
        trace!(alternatives = alternatives.len(), "TypeNormalizer: distributed intersection");
        Ok(Type::Union(TypeList::from_buffer(&mut alternatives)))
    }

    /// Merge applications sharing a constructor (and arity) position-wise.
    ///
    /// For a union the `out` bounds are unioned and the `in` bounds
    /// intersected; for an intersection the other way around.
    fn merge_applications(
        &mut self,
        combine: Combine,
        members: &[Type],
    ) -> TypeResult<Option<TypeList>> {
        let mut groups: Vec<SmallVec<[&TypeApplication; 4]>> = Vec::new();
        let mut index: FxHashMap<(&Constructor, usize), usize> = FxHashMap::default();
        let mut others = TypeListBuffer::new();

        for member in members {
            match member {
                Type::Application(app) => {
                    let key = (&app.constructor, app.arity());
                    let slot = *index.entry(key).or_insert_with(|| {
                        groups.push(SmallVec::new());
                        groups.len() - 1
                    });
                    groups[slot].push(app);
                }
                other => others.push(other.clone()),
            }
        }

        if groups.iter().all(|group| group.len() < 2) {
            return Ok(None);
        }

        for group in groups {
            if let [single] = group.as_slice() {
                others.push(Type::Application((*single).clone()));
                continue;
            }
            others.push(self.merge_group(combine, &group)?);
        }
        Ok(Some(TypeList::from_buffer(&mut others)))
    }

    fn merge_group(&mut self, combine: Combine, group: &[&TypeApplication]) -> TypeResult<Type> {
        let constructor = group[0].constructor.clone();
        let arity = group[0].arity();
        let mut args = Vec::with_capacity(arity);

        for position in 0..arity {
            let outs: TypeListBuffer = group
                .iter()
                .map(|app| app.args[position].out_bound.clone())
                .collect();
            let ins: TypeListBuffer = group
                .iter()
                .map(|app| app.args[position].in_bound.clone())
                .collect();
            let out_bound = self.normalize_combined(combine, outs)?;
            let in_bound = self.normalize_combined(combine.dual(), ins)?;
            args.push(Projection::new(out_bound, in_bound));
        }

        trace!(constructor = %constructor, members = group.len(), "TypeNormalizer: merged applications");
        Ok(Type::Application(TypeApplication::new(constructor, args)))
    }

    // =========================================================================
    // Subtyping step
    // =========================================================================

    fn subtyping_step(&mut self, ty: &Type) -> TypeResult<Type> {
        match ty {
            Type::Union(members) => self.prune(Combine::Union, ty, members),
            Type::Intersection(members) => self.prune(Combine::Intersection, ty, members),
            Type::Flexible(flexible) => {
                let relation = SubtypeChecker::new(self.env).relation(&flexible.to, &flexible.from)?;
                if !relation.is_supertype() {
                    return Err(TypeError::InvalidFlexibleBounds {
                        from: flexible.from.clone(),
                        to: flexible.to.clone(),
                    });
                }
                Ok(ty.clone())
            }
            _ => Ok(ty.clone()),
        }
    }

    /// Drop members implied by another member. Among equivalent members only
    /// the first in canonical order survives.
    fn prune(&mut self, combine: Combine, ty: &Type, members: &TypeList) -> TypeResult<Type> {
        let dominated = combine.dominated();
        let mut checker = SubtypeChecker::new(self.env);
        let mut kept = TypeListBuffer::with_capacity(members.len());

        'members: for (i, member) in members.iter().enumerate() {
            for (j, other) in members.iter().enumerate() {
                if i == j {
                    continue;
                }
                let relation = checker.relation(member, other)?;
                if relation == dominated || (relation == SubtypingRelation::Equivalent && j < i) {
                    trace!(dropped = %member, by = %other, %relation, "TypeNormalizer: pruned member");
                    continue 'members;
                }
            }
            kept.push(member.clone());
        }

        if kept.is_empty() || kept.len() == members.len() {
            return Ok(ty.clone());
        }
        Ok(combine.build(TypeList::from_buffer(&mut kept)))
    }
}

/// Splice members of nested unions (or intersections) into their parent.
fn flatten(combine: Combine, members: &TypeList) -> TypeListBuffer {
    let mut flat = TypeListBuffer::with_capacity(members.len());
    for member in members {
        match (combine, member) {
            (Combine::Union, Type::Union(nested))
            | (Combine::Intersection, Type::Intersection(nested)) => {
                flat.extend(nested.iter().cloned());
            }
            _ => flat.push(member.clone()),
        }
    }
    flat.sort();
    flat.dedup();
    flat
}

fn structural_flexible(ty: &Type, flexible: &FlexibleType) -> Type {
    if flexible.from == flexible.to {
        return flexible.from.clone();
    }
    let from = match &flexible.from {
        Type::Flexible(nested) => &nested.from,
        other => other,
    };
    let to = match &flexible.to {
        Type::Flexible(nested) => &nested.to,
        other => other,
    };
    if from == &flexible.from && to == &flexible.to {
        ty.clone()
    } else {
        Type::flexible_of(from.clone(), to.clone())
    }
}

#[cfg(test)]
#[path = "../tests/normalize_tests.rs"]
mod tests;
