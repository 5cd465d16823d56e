//! Type representation for the solver.
//!
//! [`Type`] is a closed sum over six shapes. Values are immutable and share
//! their children through `Arc`, so cloning is cheap and structural
//! equality/hashing/ordering are derived. Member sets of unions and
//! intersections are stored sorted and de-duplicated ([`TypeList`]), which
//! makes equality independent of insertion order.
//!
//! The constructors on [`Type`] build *raw* values: they do not flatten,
//! merge or simplify anything. Canonical forms are produced by
//! [`TypeNormalizer`](crate::TypeNormalizer), usually through the
//! [`TypeAlgebra`](crate::TypeAlgebra) facade.

use crate::variance::Variance;
use smallvec::SmallVec;
use std::sync::Arc;

/// Name of the universal top constructor.
pub const ANY_NAME: &str = "Any";
/// Name of the universal bottom constructor.
pub const NOTHING_NAME: &str = "Nothing";

const TYPE_LIST_INLINE: usize = 8;

pub(crate) type TypeListBuffer = SmallVec<[Type; TYPE_LIST_INLINE]>;

// =============================================================================
// Constructor
// =============================================================================

/// A nominal type symbol. Two constructors are the same type iff their names match.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Constructor(Arc<str>);

impl Constructor {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self(name.into())
    }

    pub fn any() -> Self {
        Self::new(ANY_NAME)
    }

    pub fn nothing() -> Self {
        Self::new(NOTHING_NAME)
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn is_any(&self) -> bool {
        &*self.0 == ANY_NAME
    }

    #[inline]
    pub fn is_nothing(&self) -> bool {
        &*self.0 == NOTHING_NAME
    }
}

impl From<&str> for Constructor {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

// =============================================================================
// Projection
// =============================================================================

/// Use-site bounds of one type-application argument.
///
/// | shape | `out_bound` | `in_bound` | renders as |
/// |-------|-------------|------------|------------|
/// | invariant | `T` | `T` | `T` |
/// | covariant | `T` | `Nothing` | `out T` |
/// | contravariant | `Any?` | `T` | `in T` |
/// | star | `Any?` | `Nothing` | `*` |
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Projection {
    pub out_bound: Type,
    pub in_bound: Type,
}

impl Projection {
    pub fn new(out_bound: Type, in_bound: Type) -> Self {
        Self {
            out_bound,
            in_bound,
        }
    }

    /// `T`
    pub fn invariant(ty: Type) -> Self {
        Self::new(ty.clone(), ty)
    }

    /// `out T`
    pub fn covariant(ty: Type) -> Self {
        Self::new(ty, Type::bottom())
    }

    /// `in T`
    pub fn contravariant(ty: Type) -> Self {
        Self::new(Type::top(), ty)
    }

    /// `*`
    pub fn star() -> Self {
        Self::new(Type::top(), Type::bottom())
    }

    pub fn is_invariant(&self) -> bool {
        self.out_bound == self.in_bound
    }

    pub fn is_star(&self) -> bool {
        self.out_bound.is_top() && self.in_bound.is_bottom()
    }

    pub fn is_covariant(&self) -> bool {
        self.in_bound.is_bottom()
    }

    pub fn is_contravariant(&self) -> bool {
        self.out_bound.is_top()
    }

    /// Apply declaration-site variance: a covariant position only reads, so its
    /// `in` bound is irrelevant; a contravariant one only writes, so its `out`
    /// bound is irrelevant.
    pub fn with_declsite_variance(&self, variance: Variance) -> Self {
        match variance {
            Variance::Invariant => self.clone(),
            Variance::Covariant => Self::new(self.out_bound.clone(), Type::bottom()),
            Variance::Contravariant => Self::new(Type::top(), self.in_bound.clone()),
        }
    }
}

// =============================================================================
// Compound payloads
// =============================================================================

/// A generic instantiation `constructor<args...>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeApplication {
    pub constructor: Constructor,
    pub args: Arc<[Projection]>,
}

impl TypeApplication {
    pub fn new(constructor: Constructor, args: impl IntoIterator<Item = Projection>) -> Self {
        Self {
            constructor,
            args: args.into_iter().collect(),
        }
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.args.len()
    }
}

/// A range type `from..to`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FlexibleType {
    pub from: Type,
    pub to: Type,
}

/// Canonical member set of a union or intersection: sorted, without duplicates.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeList(Arc<[Type]>);

impl TypeList {
    pub fn new(members: impl IntoIterator<Item = Type>) -> Self {
        let mut buffer: TypeListBuffer = members.into_iter().collect();
        Self::from_buffer(&mut buffer)
    }

    pub(crate) fn from_buffer(buffer: &mut TypeListBuffer) -> Self {
        buffer.sort();
        buffer.dedup();
        Self(buffer.iter().cloned().collect())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Type> {
        self.0.iter()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Type] {
        &self.0
    }

    pub fn contains(&self, ty: &Type) -> bool {
        self.0.binary_search(ty).is_ok()
    }
}

impl<'a> IntoIterator for &'a TypeList {
    type Item = &'a Type;
    type IntoIter = std::slice::Iter<'a, Type>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// =============================================================================
// Type
// =============================================================================

/// A type of the algebra.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Type {
    /// Nominal leaf.
    Constructor(Constructor),
    /// Generic instantiation.
    Application(TypeApplication),
    /// `a | b | ...`
    Union(TypeList),
    /// `a & b & ...`
    Intersection(TypeList),
    /// `base?`
    Nullable(Arc<Type>),
    /// `from..to`
    Flexible(Arc<FlexibleType>),
}

impl Type {
    pub fn constructor(name: impl Into<Arc<str>>) -> Self {
        Self::Constructor(Constructor::new(name))
    }

    pub fn any() -> Self {
        Self::Constructor(Constructor::any())
    }

    pub fn nothing() -> Self {
        Self::Constructor(Constructor::nothing())
    }

    /// `Any?`, the top of the lattice.
    pub fn top() -> Self {
        Self::nullable_of(Self::any())
    }

    /// `Nothing`, the bottom of the lattice.
    pub fn bottom() -> Self {
        Self::nothing()
    }

    pub fn application(
        constructor: impl Into<Constructor>,
        args: impl IntoIterator<Item = Projection>,
    ) -> Self {
        Self::Application(TypeApplication::new(constructor.into(), args))
    }

    pub fn union_of(members: impl IntoIterator<Item = Type>) -> Self {
        Self::Union(TypeList::new(members))
    }

    pub fn intersection_of(members: impl IntoIterator<Item = Type>) -> Self {
        Self::Intersection(TypeList::new(members))
    }

    pub fn nullable_of(base: Type) -> Self {
        Self::Nullable(Arc::new(base))
    }

    pub fn flexible_of(from: Type, to: Type) -> Self {
        Self::Flexible(Arc::new(FlexibleType { from, to }))
    }

    pub fn as_constructor(&self) -> Option<&Constructor> {
        match self {
            Self::Constructor(constructor) => Some(constructor),
            _ => None,
        }
    }

    /// The nominal head of a constructor or application.
    pub fn head_constructor(&self) -> Option<&Constructor> {
        match self {
            Self::Constructor(constructor) => Some(constructor),
            Self::Application(app) => Some(&app.constructor),
            _ => None,
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Self::Constructor(c) if c.is_any())
    }

    pub fn is_bottom(&self) -> bool {
        matches!(self, Self::Constructor(c) if c.is_nothing())
    }

    pub fn is_top(&self) -> bool {
        matches!(self, Self::Nullable(base) if base.is_any())
    }

    pub fn is_nullable(&self) -> bool {
        matches!(self, Self::Nullable(_))
    }

    pub fn is_flexible(&self) -> bool {
        matches!(self, Self::Flexible(_))
    }

    /// Constructors and applications; the leaves of nominal subtyping.
    pub fn is_base(&self) -> bool {
        matches!(self, Self::Constructor(_) | Self::Application(_))
    }

    /// Whether `constructor` occurs anywhere inside this type.
    pub fn mentions(&self, constructor: &Constructor) -> bool {
        match self {
            Self::Constructor(c) => c == constructor,
            Self::Application(app) => {
                app.constructor == *constructor
                    || app.args.iter().any(|arg| {
                        arg.out_bound.mentions(constructor) || arg.in_bound.mentions(constructor)
                    })
            }
            Self::Union(members) | Self::Intersection(members) => {
                members.iter().any(|member| member.mentions(constructor))
            }
            Self::Nullable(base) => base.mentions(constructor),
            Self::Flexible(flexible) => {
                flexible.from.mentions(constructor) || flexible.to.mentions(constructor)
            }
        }
    }
}

impl From<Constructor> for Type {
    fn from(constructor: Constructor) -> Self {
        Self::Constructor(constructor)
    }
}

impl From<TypeApplication> for Type {
    fn from(app: TypeApplication) -> Self {
        Self::Application(app)
    }
}

#[cfg(test)]
#[path = "../tests/types_tests.rs"]
mod tests;
