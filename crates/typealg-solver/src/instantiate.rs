//! Polarity-aware substitution of constructors by projections.
//!
//! Replacing a constructor `E` by a projection `{in I, out O}` puts `O`
//! wherever `E` is read (positive positions) and `I` wherever it is written
//! (negative positions). The `in` bound of an application argument flips the
//! polarity; everything else keeps it:
//!
//! ```text
//! replace(List<E>, E, out Dog)    = List<out Dog>
//! replace(Sink<in E>, E, out Dog)  = Sink<*>
//! ```
//!
//! Star projections are left untouched, and the result is renormalized.

use crate::environment::TypingEnvironment;
use crate::error::TypeResult;
use crate::normalize::TypeNormalizer;
use crate::types::{Constructor, Projection, Type, TypeApplication, TypeList, TypeListBuffer};
use crate::variance::Variance;
use rustc_hash::FxHashMap;
use tracing::trace;

/// A set of simultaneous replacements `constructor -> projection`.
///
/// All replacements happen in one pass, so a replacement that mentions
/// another replaced constructor is not substituted again.
#[derive(Clone, Debug, Default)]
pub struct TypeSubstitution {
    map: FxHashMap<Constructor, Projection>,
}

impl TypeSubstitution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(what: Constructor, with: Projection) -> Self {
        let mut substitution = Self::new();
        substitution.insert(what, with);
        substitution
    }

    pub fn insert(&mut self, what: Constructor, with: Projection) {
        self.map.insert(what, with);
    }

    pub fn get(&self, what: &Constructor) -> Option<&Projection> {
        self.map.get(what)
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }
}

/// Applies a [`TypeSubstitution`] and renormalizes the result.
pub struct TypeInstantiator<'a, E: TypingEnvironment + ?Sized> {
    env: &'a E,
    substitution: &'a TypeSubstitution,
}

impl<'a, E: TypingEnvironment + ?Sized> TypeInstantiator<'a, E> {
    pub fn new(env: &'a E, substitution: &'a TypeSubstitution) -> Self {
        Self { env, substitution }
    }

    /// Substitute inside `ty` (a positive position) and normalize.
    pub fn instantiate(&mut self, ty: &Type) -> TypeResult<Type> {
        if self.substitution.is_empty() {
            return TypeNormalizer::new(self.env).normalize(ty);
        }
        let substituted = self.substitute(ty, Variance::Covariant)?;
        trace!(from = %ty, to = %substituted, "TypeInstantiator: substituted");
        TypeNormalizer::new(self.env).normalize(&substituted)
    }

    /// One structural pass; the substituted projections are not revisited.
    fn substitute(&mut self, ty: &Type, polarity: Variance) -> TypeResult<Type> {
        Ok(match ty {
            Type::Constructor(constructor) => match self.substitution.get(constructor) {
                Some(with) if polarity == Variance::Contravariant => with.in_bound.clone(),
                Some(with) => with.out_bound.clone(),
                None => ty.clone(),
            },
            Type::Application(app) => {
                let mut args = Vec::with_capacity(app.arity());
                for arg in app.args.iter() {
                    if arg.is_star() {
                        args.push(arg.clone());
                        continue;
                    }
                    let out_bound = self.substitute(&arg.out_bound, polarity)?;
                    let in_bound =
                        self.substitute(&arg.in_bound, polarity.compose(Variance::Contravariant))?;
                    args.push(Projection::new(out_bound, in_bound));
                }
                Type::Application(TypeApplication::new(app.constructor.clone(), args))
            }
            Type::Union(members) => Type::Union(self.substitute_members(members, polarity)?),
            Type::Intersection(members) => {
                Type::Intersection(self.substitute_members(members, polarity)?)
            }
            Type::Nullable(base) => Type::nullable_of(self.substitute(base, polarity)?),
            Type::Flexible(flexible) => Type::flexible_of(
                self.substitute(&flexible.from, polarity)?,
                self.substitute(&flexible.to, polarity)?,
            ),
        })
    }

    fn substitute_members(&mut self, members: &TypeList, polarity: Variance) -> TypeResult<TypeList> {
        let mut buffer = TypeListBuffer::with_capacity(members.len());
        for member in members {
            buffer.push(self.substitute(member, polarity)?);
        }
        Ok(TypeList::from_buffer(&mut buffer))
    }
}

/// Replace every occurrence of `what` in `ty` by `with`, respecting polarity.
pub fn replace<E: TypingEnvironment + ?Sized>(
    env: &E,
    ty: &Type,
    what: &Constructor,
    with: Projection,
) -> TypeResult<Type> {
    let substitution = TypeSubstitution::single(what.clone(), with);
    TypeInstantiator::new(env, &substitution).instantiate(ty)
}

/// [`replace`] with a plain type, used as an invariant projection.
pub fn replace_with_type<E: TypingEnvironment + ?Sized>(
    env: &E,
    ty: &Type,
    what: &Constructor,
    with: Type,
) -> TypeResult<Type> {
    replace(env, ty, what, Projection::invariant(with))
}

#[cfg(test)]
#[path = "../tests/instantiate_tests.rs"]
mod tests;
