use super::*;
use crate::EmptyEnvironment;

fn ctor(name: &str) -> Type {
    Type::constructor(name)
}

fn e() -> Constructor {
    Constructor::new("E")
}

fn dog() -> Type {
    ctor("Dog")
}

#[test]
fn test_substitution_basics() {
    let mut substitution = TypeSubstitution::new();
    assert!(substitution.is_empty());

    substitution.insert(e(), Projection::covariant(dog()));
    substitution.insert(Constructor::new("F"), Projection::star());
    assert_eq!(substitution.len(), 2);
    assert_eq!(
        substitution.get(&e()),
        Some(&Projection::covariant(dog()))
    );
    assert_eq!(substitution.get(&Constructor::new("G")), None);

    substitution.insert(e(), Projection::invariant(dog()));
    assert_eq!(substitution.len(), 2);
    assert_eq!(substitution.get(&e()), Some(&Projection::invariant(dog())));
}

#[test]
fn test_replace_bare_constructor() {
    let env = EmptyEnvironment;
    let replaced = replace(&env, &ctor("E"), &e(), Projection::covariant(dog())).unwrap();
    assert_eq!(replaced, dog());

    let untouched = replace(&env, &ctor("T"), &e(), Projection::covariant(dog())).unwrap();
    assert_eq!(untouched, ctor("T"));
}

#[test]
fn test_invariant_argument_splits_by_polarity() {
    let env = EmptyEnvironment;
    let list_e = Type::application("List", [Projection::invariant(ctor("E"))]);

    let replaced = replace(&env, &list_e, &e(), Projection::covariant(dog())).unwrap();
    assert_eq!(
        replaced,
        Type::application("List", [Projection::covariant(dog())])
    );
}

#[test]
fn test_contravariant_argument_flips_polarity() {
    let env = EmptyEnvironment;
    let sink = Type::application("Sink", [Projection::contravariant(ctor("E"))]);

    let with_out = replace(&env, &sink, &e(), Projection::covariant(dog())).unwrap();
    assert_eq!(with_out, Type::application("Sink", [Projection::star()]));

    let with_in = replace(&env, &sink, &e(), Projection::contravariant(dog())).unwrap();
    assert_eq!(
        with_in,
        Type::application("Sink", [Projection::contravariant(dog())])
    );
}

#[test]
fn test_star_arguments_pass_through() {
    let env = EmptyEnvironment;
    let ty = Type::application("Pair", [Projection::star(), Projection::invariant(ctor("E"))]);

    let replaced = replace_with_type(&env, &ty, &e(), dog()).unwrap();
    assert_eq!(
        replaced,
        Type::application("Pair", [Projection::star(), Projection::invariant(dog())])
    );
}

#[test]
fn test_nested_applications() {
    let env = EmptyEnvironment;
    // Box<in Box<in E>>: two flips put E back in a positive position.
    let inner = Type::application("Box", [Projection::contravariant(ctor("E"))]);
    let outer = Type::application("Box", [Projection::contravariant(inner)]);

    let replaced = replace(&env, &outer, &e(), Projection::covariant(dog())).unwrap();
    let expected_inner = Type::application("Box", [Projection::contravariant(dog())]);
    assert_eq!(
        replaced,
        Type::application("Box", [Projection::contravariant(expected_inner)])
    );
}

#[test]
fn test_result_is_renormalized() {
    let env = EmptyEnvironment;
    let ty = Type::union_of([ctor("E"), ctor("T")]);

    let with_nothing = replace_with_type(&env, &ty, &e(), Type::nothing()).unwrap();
    assert_eq!(with_nothing, ctor("T"));

    let with_nullable = replace_with_type(&env, &ty, &e(), Type::nullable_of(ctor("T"))).unwrap();
    assert_eq!(with_nullable, Type::nullable_of(ctor("T")));

    let nested = Type::nullable_of(Type::nullable_of(ctor("E")));
    let flattened = replace_with_type(&env, &nested, &e(), dog()).unwrap();
    assert_eq!(flattened, Type::nullable_of(dog()));
}

#[test]
fn test_simultaneous_substitution_does_not_chain() {
    let env = EmptyEnvironment;
    let mut substitution = TypeSubstitution::new();
    substitution.insert(Constructor::new("A"), Projection::invariant(ctor("B")));
    substitution.insert(Constructor::new("B"), Projection::invariant(ctor("C")));

    let ty = Type::union_of([ctor("A"), ctor("B")]);
    let instantiated = TypeInstantiator::new(&env, &substitution)
        .instantiate(&ty)
        .unwrap();
    assert_eq!(instantiated, Type::union_of([ctor("B"), ctor("C")]));
}

#[test]
fn test_empty_substitution_only_normalizes() {
    let env = EmptyEnvironment;
    let substitution = TypeSubstitution::new();
    let ty = Type::union_of([ctor("T"), Type::nothing()]);

    let instantiated = TypeInstantiator::new(&env, &substitution)
        .instantiate(&ty)
        .unwrap();
    assert_eq!(instantiated, ctor("T"));
}

#[test]
fn test_flexible_bounds_are_substituted() {
    let env = EmptyEnvironment;
    let ty = Type::flexible_of(ctor("E"), Type::nullable_of(ctor("E")));

    let replaced = replace_with_type(&env, &ty, &e(), dog()).unwrap();
    assert_eq!(
        replaced,
        Type::flexible_of(dog(), Type::nullable_of(dog()))
    );
}

#[test]
fn test_deep_substitution() {
    let mut ty = Type::Constructor(e());
    let mut expected = dog();
    for _ in 0..80 {
        ty = Type::application("Box", [Projection::covariant(ty)]);
        expected = Type::application("Box", [Projection::covariant(expected)]);
    }
    assert_eq!(
        replace(&EmptyEnvironment, &ty, &e(), Projection::covariant(dog())),
        Ok(expected)
    );
}
