use super::*;

const ALL: [SubtypingRelation; 4] = [
    SubtypingRelation::Subtype,
    SubtypingRelation::Supertype,
    SubtypingRelation::Equivalent,
    SubtypingRelation::Unrelated,
];

#[test]
fn test_invert_swaps_directions() {
    assert_eq!(SubtypingRelation::Subtype.invert(), SubtypingRelation::Supertype);
    assert_eq!(SubtypingRelation::Supertype.invert(), SubtypingRelation::Subtype);
    assert_eq!(SubtypingRelation::Equivalent.invert(), SubtypingRelation::Equivalent);
    assert_eq!(SubtypingRelation::Unrelated.invert(), SubtypingRelation::Unrelated);
}

#[test]
fn test_or_joins_directions() {
    use SubtypingRelation::*;

    assert_eq!(Subtype.or(Supertype), Equivalent);
    assert_eq!(Subtype.or(Subtype), Subtype);
    assert_eq!(Unrelated.or(Supertype), Supertype);
    for r in ALL {
        // Unrelated is the identity, Equivalent absorbs.
        assert_eq!(r.or(Unrelated), r);
        assert_eq!(r.or(Equivalent), Equivalent);
    }
}

#[test]
fn test_and_meets_directions() {
    use SubtypingRelation::*;

    assert_eq!(Subtype.and(Supertype), Unrelated);
    assert_eq!(Supertype.and(Supertype), Supertype);
    assert_eq!(Equivalent.and(Subtype), Subtype);
    for r in ALL {
        // Equivalent is the identity, Unrelated absorbs.
        assert_eq!(r.and(Equivalent), r);
        assert_eq!(r.and(Unrelated), Unrelated);
    }
}

#[test]
fn test_or_and_are_commutative_and_associative() {
    for a in ALL {
        for b in ALL {
            assert_eq!(a.or(b), b.or(a), "{a} or {b}");
            assert_eq!(a.and(b), b.and(a), "{a} and {b}");
            for c in ALL {
                assert_eq!(a.or(b).or(c), a.or(b.or(c)));
                assert_eq!(a.and(b).and(c), a.and(b.and(c)));
            }
        }
    }
}

#[test]
fn test_contains() {
    use SubtypingRelation::*;

    for r in ALL {
        assert!(Equivalent.contains(r));
        assert!(r.contains(Unrelated));
        assert!(r.contains(r));
    }
    assert!(!Subtype.contains(Supertype));
    assert!(!Supertype.contains(Subtype));
    assert!(!Subtype.contains(Equivalent));
    assert!(!Unrelated.contains(Subtype));
}

#[test]
fn test_from_directions_matches_shorthands() {
    for r in ALL {
        assert_eq!(
            SubtypingRelation::from_directions(r.is_subtype(), r.is_supertype()),
            r
        );
    }
}

#[test]
fn test_display() {
    assert_eq!(SubtypingRelation::Equivalent.to_string(), "Equivalent");
    assert_eq!(SubtypingRelation::Unrelated.to_string(), "Unrelated");
}
