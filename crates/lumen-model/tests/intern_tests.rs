use super::*;
use crate::decl::DeclId;

fn applied(interner: &TypeInterner, decl: u32) -> TypeId {
    interner.intern(TypeData::Applied {
        decl: DeclId(decl),
        args: TypeList::new(),
    })
}

#[test]
fn test_nothing_is_preregistered() {
    let interner = TypeInterner::new();
    assert_eq!(interner.len(), 1);
    assert_eq!(interner.lookup(TypeId::NOTHING), Some(TypeData::Nothing));
    assert_eq!(interner.intern(TypeData::Nothing), TypeId::NOTHING);
}

#[test]
fn test_structurally_equal_types_share_an_id() {
    let interner = TypeInterner::new();
    let a = applied(&interner, 1);
    let b = applied(&interner, 1);
    let c = applied(&interner, 2);
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(interner.len(), 3);
}

#[test]
fn test_union_flattens_and_deduplicates() {
    let interner = TypeInterner::new();
    let a = applied(&interner, 1);
    let b = applied(&interner, 2);
    let c = applied(&interner, 3);

    let ab = interner.union([a, b]);
    let nested = interner.union([ab, c, a]);
    let flat = interner.union([a, b, c]);
    assert_eq!(nested, flat);

    match interner.lookup(flat) {
        Some(TypeData::Union(members)) => assert_eq!(members.as_slice(), &[a, b, c]),
        other => panic!("expected union, got {other:?}"),
    }
}

#[test]
fn test_union_collapses_trivial_cases() {
    let interner = TypeInterner::new();
    let a = applied(&interner, 1);
    assert_eq!(interner.union([]), TypeId::NOTHING);
    assert_eq!(interner.union([a]), a);
    assert_eq!(interner.union([a, a]), a);
    assert_eq!(interner.union([a, TypeId::NOTHING]), a);
}

#[test]
fn test_intersection_with_nothing_is_nothing() {
    let interner = TypeInterner::new();
    let a = applied(&interner, 1);
    let b = applied(&interner, 2);
    assert_eq!(interner.intersection([a, TypeId::NOTHING]), TypeId::NOTHING);

    let ab = interner.intersection([a, b]);
    assert_ne!(ab, interner.union([a, b]));
    assert_eq!(interner.intersection([ab, a]), ab);
}

#[test]
fn test_unknown_id_lookup_is_none() {
    let interner = TypeInterner::new();
    assert_eq!(interner.lookup(TypeId(99)), None);
}
