//! Algebraic laws checked over generated types.

use super::*;
use proptest::prelude::*;

const LEAF_POOL: &[&str] = &["T", "TT", "A", "Any", "Nothing"];

fn arb_leaf() -> impl Strategy<Value = Type> {
    prop::sample::select(LEAF_POOL).prop_map(Type::constructor)
}

fn arb_projection() -> impl Strategy<Value = Projection> {
    prop_oneof![
        Just(Projection::star()),
        arb_leaf().prop_map(Projection::invariant),
        arb_leaf().prop_map(Projection::covariant),
        arb_leaf().prop_map(Projection::contravariant),
    ]
}

fn arb_base() -> impl Strategy<Value = Type> {
    prop_oneof![
        3 => arb_leaf(),
        1 => arb_projection().prop_map(|arg| Type::application("Box", [arg])),
    ]
}

/// Types of bounded depth built from leaves with `|`, `&` and `?`.
fn arb_type(depth: u32) -> BoxedStrategy<Type> {
    if depth == 0 {
        return arb_base().boxed();
    }
    let inner = arb_type(depth - 1);
    prop_oneof![
        3 => arb_base(),
        1 => inner.clone().prop_map(Type::nullable_of),
        1 => prop::collection::vec(inner.clone(), 1..=3).prop_map(Type::union_of),
        1 => prop::collection::vec(inner, 1..=3).prop_map(Type::intersection_of),
    ]
    .boxed()
}

/// Flexible ranges with valid bounds: `lo..lo?` and `Nothing..hi`.
fn arb_flexible() -> impl Strategy<Value = Type> {
    prop_oneof![
        arb_base().prop_map(|lo| Type::flexible_of(lo.clone(), Type::nullable_of(lo))),
        arb_base().prop_map(|hi| Type::flexible_of(Type::nothing(), hi)),
    ]
}

/// One level of `|`, `&` or `?` over bases and flexible ranges.
fn arb_flexible_type() -> BoxedStrategy<Type> {
    let member = prop_oneof![
        2 => arb_base(),
        1 => arb_flexible(),
    ]
    .boxed();
    prop_oneof![
        2 => member.clone(),
        1 => member.clone().prop_map(Type::nullable_of),
        1 => prop::collection::vec(member.clone(), 1..=3).prop_map(Type::union_of),
        1 => prop::collection::vec(member, 1..=3).prop_map(Type::intersection_of),
    ]
    .boxed()
}

fn normalized(ty: &Type) -> Type {
    EmptyEnvironment.normalize(ty).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_normalize_is_idempotent(ty in arb_type(2)) {
        let once = normalized(&ty);
        let twice = normalized(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn test_union_and_intersection_are_idempotent(ty in arb_type(2)) {
        let env = EmptyEnvironment;
        let ty = normalized(&ty);
        prop_assert_eq!(env.union2(ty.clone(), ty.clone()).unwrap(), ty.clone());
        prop_assert_eq!(env.intersection2(ty.clone(), ty.clone()).unwrap(), ty);
    }

    #[test]
    fn test_union_and_intersection_commute(left in arb_type(2), right in arb_type(2)) {
        let env = EmptyEnvironment;
        prop_assert_eq!(
            env.union2(left.clone(), right.clone()).unwrap(),
            env.union2(right.clone(), left.clone()).unwrap()
        );
        prop_assert_eq!(
            env.intersection2(left.clone(), right.clone()).unwrap(),
            env.intersection2(right, left).unwrap()
        );
    }

    #[test]
    fn test_normalize_is_idempotent_with_flexible(ty in arb_flexible_type()) {
        let once = normalized(&ty);
        let twice = normalized(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn test_union_and_intersection_commute_with_flexible(
        left in arb_flexible_type(),
        right in arb_flexible_type(),
    ) {
        let env = EmptyEnvironment;
        prop_assert_eq!(
            env.union2(left.clone(), right.clone()).unwrap(),
            env.union2(right.clone(), left.clone()).unwrap()
        );
        prop_assert_eq!(
            env.intersection2(left.clone(), right.clone()).unwrap(),
            env.intersection2(right, left).unwrap()
        );
    }

    #[test]
    fn test_nullable_absorbs_itself(ty in arb_type(2)) {
        let env = EmptyEnvironment;
        let once = env.nullable(ty).unwrap();
        let twice = env.nullable(once.clone()).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn test_intersection_is_below_union(left in arb_type(1), right in arb_type(1)) {
        let env = EmptyEnvironment;
        let meet = env.intersection2(left.clone(), right.clone()).unwrap();
        let join = env.union2(left, right).unwrap();
        prop_assert!(env.is_subtype_of(&meet, &join).unwrap());
    }

    #[test]
    fn test_relation_is_reflexive(ty in arb_type(2)) {
        let ty = normalized(&ty);
        prop_assert_eq!(
            EmptyEnvironment.relation(&ty, &ty).unwrap(),
            SubtypingRelation::Equivalent
        );
    }

    #[test]
    fn test_equivalence_is_transitive(
        first in arb_type(1),
        second in arb_type(1),
        third in arb_type(1),
    ) {
        let env = EmptyEnvironment;
        let ab = env.relation(&first, &second).unwrap();
        let bc = env.relation(&second, &third).unwrap();
        if ab == SubtypingRelation::Equivalent && bc == SubtypingRelation::Equivalent {
            prop_assert_eq!(
                env.relation(&first, &third).unwrap(),
                SubtypingRelation::Equivalent
            );
        }
    }

    #[test]
    fn test_relation_inverts_when_flipped(left in arb_type(1), right in arb_type(1)) {
        let env = EmptyEnvironment;
        let left = normalized(&left);
        let right = normalized(&right);
        prop_assert_eq!(
            env.relation(&left, &right).unwrap(),
            env.relation(&right, &left).unwrap().invert()
        );
    }
}
