use super::*;
use crate::{EmptyEnvironment, Projection, RecursionProfile, TypeAlgebra};

fn t() -> Type {
    Type::constructor("T")
}

fn tt() -> Type {
    Type::constructor("TT")
}

fn q(ty: Type) -> Type {
    Type::nullable_of(ty)
}

fn a(arg: Projection) -> Type {
    Type::application("A", [arg])
}

fn rel(left: &Type, right: &Type) -> SubtypingRelation {
    SubtypeChecker::new(&EmptyEnvironment)
        .relation(left, right)
        .unwrap()
}

#[test]
fn test_leaf_relations_follow_environment() {
    assert_eq!(rel(&t(), &t()), SubtypingRelation::Equivalent);
    assert_eq!(rel(&t(), &tt()), SubtypingRelation::Unrelated);
    assert_eq!(rel(&t(), &Type::any()), SubtypingRelation::Subtype);
    assert_eq!(rel(&Type::nothing(), &t()), SubtypingRelation::Subtype);
}

#[test]
fn test_joining_nullable_nothing() {
    let env = EmptyEnvironment;
    let joined = env.union2(t(), q(Type::nothing())).unwrap();

    assert_eq!(env.relation(&t(), &joined), Ok(SubtypingRelation::Subtype));
    assert_eq!(env.relation(&joined, &q(t())), Ok(SubtypingRelation::Equivalent));
}

#[test]
fn test_nullable_is_never_a_subtype_of_non_nullable() {
    assert_eq!(rel(&q(t()), &t()), SubtypingRelation::Supertype);
    assert_eq!(rel(&q(t()), &Type::any()), SubtypingRelation::Unrelated);
    assert_eq!(rel(&Type::top(), &t()), SubtypingRelation::Supertype);
    assert_eq!(rel(&t(), &Type::top()), SubtypingRelation::Subtype);
    assert_eq!(rel(&q(t()), &q(Type::any())), SubtypingRelation::Subtype);
}

#[test]
fn test_union_relations() {
    let union = Type::union_of([t(), tt()]);
    assert_eq!(rel(&union, &t()), SubtypingRelation::Supertype);
    assert_eq!(rel(&t(), &union), SubtypingRelation::Subtype);
    assert_eq!(rel(&union, &Type::any()), SubtypingRelation::Subtype);

    let wider = Type::union_of([t(), tt(), Type::constructor("B")]);
    assert_eq!(rel(&union, &wider), SubtypingRelation::Subtype);
    assert_eq!(rel(&wider, &union), SubtypingRelation::Supertype);

    let disjoint = Type::union_of([Type::constructor("B"), Type::constructor("C")]);
    assert_eq!(rel(&union, &disjoint), SubtypingRelation::Unrelated);
}

#[test]
fn test_intersection_relations() {
    let intersection = Type::intersection_of([t(), tt()]);
    assert_eq!(rel(&intersection, &t()), SubtypingRelation::Subtype);
    assert_eq!(rel(&t(), &intersection), SubtypingRelation::Supertype);
    assert_eq!(rel(&intersection, &Type::nothing()), SubtypingRelation::Supertype);

    let narrower = Type::intersection_of([t(), tt(), Type::constructor("B")]);
    assert_eq!(rel(&narrower, &intersection), SubtypingRelation::Subtype);
    assert_eq!(rel(&intersection, &narrower), SubtypingRelation::Supertype);
}

#[test]
fn test_intersection_is_subtype_of_union() {
    let meet = Type::intersection_of([t(), tt()]);
    let join = Type::union_of([t(), tt()]);
    assert_eq!(rel(&meet, &join), SubtypingRelation::Subtype);
    assert_eq!(rel(&join, &meet), SubtypingRelation::Supertype);
}

#[test]
fn test_flexible_relates_through_either_bound() {
    let flexible = Type::flexible_of(t(), q(t()));
    assert_eq!(rel(&flexible, &t()), SubtypingRelation::Equivalent);
    assert_eq!(rel(&flexible, &q(t())), SubtypingRelation::Equivalent);
    assert_eq!(rel(&tt(), &flexible), SubtypingRelation::Unrelated);
    assert_eq!(rel(&Type::nothing(), &flexible), SubtypingRelation::Subtype);
}

#[test]
fn test_application_arguments() {
    let star = a(Projection::star());
    let out_t = a(Projection::covariant(t()));
    let in_t = a(Projection::contravariant(t()));
    let exact = a(Projection::invariant(t()));

    assert_eq!(rel(&out_t, &star), SubtypingRelation::Subtype);
    assert_eq!(rel(&star, &exact), SubtypingRelation::Supertype);
    assert_eq!(rel(&in_t, &exact), SubtypingRelation::Supertype);
    assert_eq!(rel(&out_t, &exact), SubtypingRelation::Supertype);
    assert_eq!(rel(&exact, &a(Projection::invariant(tt()))), SubtypingRelation::Unrelated);
    assert_eq!(
        rel(&exact, &Type::application("B", [Projection::invariant(t())])),
        SubtypingRelation::Unrelated
    );
}

#[test]
fn test_applications_with_different_arity_are_unrelated() {
    let unary = a(Projection::invariant(t()));
    let binary = Type::application("A", [Projection::invariant(t()), Projection::star()]);
    assert_eq!(rel(&unary, &binary), SubtypingRelation::Unrelated);
}

#[test]
fn test_constructor_against_application() {
    let exact = a(Projection::invariant(t()));
    assert_eq!(rel(&Type::nothing(), &exact), SubtypingRelation::Subtype);
    assert_eq!(rel(&Type::any(), &exact), SubtypingRelation::Supertype);
    assert_eq!(rel(&exact, &Type::any()), SubtypingRelation::Subtype);
    assert_eq!(rel(&t(), &exact), SubtypingRelation::Unrelated);
    // A raw `A` reads as `A<*>`.
    assert_eq!(rel(&Type::constructor("A"), &exact), SubtypingRelation::Supertype);
}

#[test]
fn test_iteration_limit_is_an_error() {
    let env = EmptyEnvironment;
    let mut checker = SubtypeChecker::with_profile(
        &env,
        RecursionProfile::Custom {
            max_depth: 8,
            max_iterations: 2,
        },
    );
    let union = Type::union_of([t(), tt()]);

    assert!(matches!(
        checker.relation(&union, &Type::any()),
        Err(TypeError::RelationLimitExceeded { .. })
    ));
    // The next query starts with a fresh budget.
    assert_eq!(
        checker.relation(&t(), &Type::any()),
        Ok(SubtypingRelation::Subtype)
    );
}

#[test]
fn test_iteration_budget_is_per_query() {
    let env = EmptyEnvironment;
    let mut checker = SubtypeChecker::with_profile(
        &env,
        RecursionProfile::Custom {
            max_depth: 8,
            max_iterations: 3,
        },
    );
    let union = Type::union_of([t(), tt()]);
    for _ in 0..10 {
        assert_eq!(
            checker.relation(&union, &Type::any()),
            Ok(SubtypingRelation::Subtype)
        );
    }
}

#[test]
fn test_deep_applications_relate() {
    let mut lower = t();
    let mut upper = Type::any();
    for _ in 0..110 {
        lower = Type::application("Box", [Projection::covariant(lower)]);
        upper = Type::application("Box", [Projection::covariant(upper)]);
    }
    assert_eq!(rel(&lower, &upper), SubtypingRelation::Subtype);
    assert_eq!(rel(&upper, &lower), SubtypingRelation::Supertype);
}

#[test]
fn test_free_functions() {
    let env = EmptyEnvironment;
    assert_eq!(
        subtyping_relation(&env, &t(), &q(t())),
        Ok(SubtypingRelation::Subtype)
    );
    assert_eq!(is_subtype_of(&env, &q(t()), &t()), Ok(false));

    let mut checker = SubtypeChecker::new(&env);
    assert_eq!(checker.is_supertype_of(&q(t()), &t()), Ok(true));
    assert_eq!(checker.is_subtype_of(&t(), &tt()), Ok(false));
}
