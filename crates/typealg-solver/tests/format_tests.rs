use super::*;

fn t() -> Type {
    Type::constructor("T")
}

fn tt() -> Type {
    Type::constructor("TT")
}

#[test]
fn test_format_leaves_and_applications() {
    assert_eq!(t().to_string(), "T");
    assert_eq!(Type::any().to_string(), "Any");
    assert_eq!(
        Type::application("A", [Projection::covariant(t())]).to_string(),
        "A<out T>"
    );
    assert_eq!(
        Type::application(
            "Map",
            [Projection::invariant(t()), Projection::contravariant(tt())]
        )
        .to_string(),
        "Map<T, in TT>"
    );
    assert_eq!(
        Type::application("A", [Projection::star()]).to_string(),
        "A<*>"
    );
}

#[test]
fn test_format_projection_with_both_bounds() {
    let projection = Projection::new(tt(), t());
    assert_eq!(projection.to_string(), "{in T, out TT}");
}

#[test]
fn test_format_invariant_projection_of_extreme_is_bare() {
    // `in == out` wins over the covariant reading of `Nothing`.
    assert_eq!(Projection::invariant(Type::nothing()).to_string(), "Nothing");
}

#[test]
fn test_format_nullable() {
    assert_eq!(Type::nullable_of(t()).to_string(), "T?");
    assert_eq!(Type::top().to_string(), "Any?");
    assert_eq!(
        Type::nullable_of(Type::application("A", [Projection::star()])).to_string(),
        "A<*>?"
    );
    assert_eq!(
        Type::nullable_of(Type::union_of([t(), tt()])).to_string(),
        "(T | TT)?"
    );
}

#[test]
fn test_format_compounds() {
    assert_eq!(Type::union_of([tt(), t()]).to_string(), "T | TT");
    assert_eq!(Type::intersection_of([tt(), t()]).to_string(), "T & TT");
    assert_eq!(
        Type::intersection_of([Type::union_of([t(), tt()]), Type::constructor("A")]).to_string(),
        "A & (T | TT)"
    );
}

#[test]
fn test_format_flexible() {
    assert_eq!(
        Type::flexible_of(tt(), Type::nullable_of(tt())).to_string(),
        "TT..TT?"
    );
    assert_eq!(
        Type::flexible_of(Type::intersection_of([t(), tt()]), Type::nullable_of(t())).to_string(),
        "(T & TT)..T?"
    );
}
