//! Type algebra with unions, intersections, nullability and flexible types.
//!
//! This crate models a structural/nominal type system with:
//!
//! - **Unions and intersections** kept as canonical member sets
//! - **Nullable** types (`T?`) and **flexible** ranges (`A..B?`) for
//!   platform types
//! - **Generic applications** with use-site projections (`in`/`out`/`*`)
//!   and declaration-site variance
//!
//! Everything nominal is answered by a pluggable [`TypingEnvironment`]:
//! [`EmptyEnvironment`] knows only `Any` and `Nothing`, [`DeclEnvironment`]
//! holds registered [`TypeDeclaration`]s.
//!
//! Key entry points:
//! - [`TypeAlgebra`]: normalizing constructors (`union2`, `nullable`, ...)
//!   and relation queries on any environment
//! - [`SubtypeChecker`]: four-valued [`SubtypingRelation`] between types
//! - [`TypeNormalizer`]: canonical forms, structural and subtyping-aware
//! - [`replace`]: polarity-aware substitution
pub mod declarations;
pub mod environment;
mod error;
mod format;
pub mod instantiate;
mod normalize;
pub mod recursion;
pub mod relation;
mod subtype;
mod subtype_rules;
mod type_factory;
pub mod types;
pub mod variance;

pub use declarations::{DeclEnvironment, NominalClosure, TypeDeclaration, TypeParameter};
pub use environment::{EmptyEnvironment, TypingEnvironment, default_relation};
pub use error::{TypeError, TypeResult};
pub use instantiate::{TypeInstantiator, TypeSubstitution, replace, replace_with_type};
pub use normalize::TypeNormalizer;
pub use recursion::{MAX_FIXPOINT_ROUNDS, RecursionProfile};
pub use relation::SubtypingRelation;
pub use subtype::{SubtypeChecker, is_subtype_of, subtyping_relation};
pub use type_factory::TypeAlgebra;
pub use types::{
    ANY_NAME, Constructor, FlexibleType, NOTHING_NAME, Projection, Type, TypeApplication,
    TypeList,
};
pub use variance::Variance;

// Test modules are loaded by their source files via #[path = "../tests/..."].
// Only cross-module suites live here.
#[cfg(test)]
#[path = "../tests/scenario_tests.rs"]
mod scenario_tests;
#[cfg(test)]
#[path = "../tests/type_law_tests.rs"]
mod type_law_tests;
