//! Reference scenarios exercised end to end.

use std::fmt::Display;

use anyhow::Result;
use typealg_solver::{
    EmptyEnvironment, NominalClosure, Projection, Type, TypeAlgebra, TypeList,
};

use crate::hierarchy::collection_hierarchy;

/// One scenario: what was computed and what it should be.
#[derive(Debug)]
pub struct Outcome {
    pub title: &'static str,
    pub actual: String,
    pub expected: String,
}

impl Outcome {
    fn new(title: &'static str, actual: impl Display, expected: impl Display) -> Self {
        Self {
            title,
            actual: actual.to_string(),
            expected: expected.to_string(),
        }
    }

    pub fn passed(&self) -> bool {
        self.actual == self.expected
    }
}

pub fn run() -> Result<Vec<Outcome>> {
    let env = EmptyEnvironment;
    let t = Type::constructor("T");
    let tt = Type::constructor("TT");
    let a = |arg: Projection| Type::application("A", [arg]);

    let mut outcomes = Vec::new();

    let a_out_t = a(Projection::covariant(t.clone()));
    let joined = env.union2(t.clone(), a_out_t.clone())?;
    let expected = Type::Union(TypeList::new([t.clone(), a_out_t]));
    outcomes.push(Outcome::new("T | A<out T>", &joined, &expected));

    let with_nullable = env.union2(joined, env.nullable(t.clone())?)?;
    outcomes.push(Outcome::new(
        "T | A<out T> | T?",
        with_nullable,
        Type::nullable_of(expected),
    ));

    let star = a(Projection::star());
    let exact = a(Projection::invariant(t.clone()));
    outcomes.push(Outcome::new(
        "A<*> | A<T>",
        env.union2(star.clone(), exact.clone())?,
        &star,
    ));
    outcomes.push(Outcome::new(
        "A<*> & A<T>",
        env.intersection2(star, exact.clone())?,
        &exact,
    ));

    let or_nothing = env.union2(t.clone(), env.nullable(Type::nothing())?)?;
    outcomes.push(Outcome::new(
        "T rel T | Nothing?",
        env.relation(&t, &or_nothing)?,
        "Subtype",
    ));
    outcomes.push(Outcome::new(
        "T | Nothing? rel T?",
        env.relation(&or_nothing, &env.nullable(t.clone())?)?,
        "Equivalent",
    ));

    let decls = collection_hierarchy(NominalClosure::Transitive)?;
    let list = Type::application("List", [Projection::invariant(tt.clone())]);
    let mutable = Type::application("MutableList", [Projection::invariant(tt)]);
    outcomes.push(Outcome::new(
        "List<TT> rel MutableList<TT>",
        decls.relation(&list, &mutable)?,
        "Supertype",
    ));
    outcomes.push(Outcome::new(
        "List<TT> | MutableList<TT>",
        decls.union2(list.clone(), mutable)?,
        &list,
    ));

    Ok(outcomes)
}

#[cfg(test)]
#[path = "../tests/scenarios_tests.rs"]
mod tests;
