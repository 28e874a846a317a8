//! Decidability of supertypes that nest contravariant type constructors.

use lumen_model::{DeclId, PackageId, TypeId, TypeModel, Variance};

struct Fixture {
    model: TypeModel,
    pkg: PackageId,
    /// `interface Comparable<in Other>`
    comparable: DeclId,
    /// `interface Producer<out Item>`
    producer: DeclId,
    /// `interface Box<Content>`
    boxed: DeclId,
    /// `interface I`
    i: DeclId,
}

fn fixture() -> Fixture {
    let mut model = TypeModel::new("lumen.lang");
    let pkg = model.add_package("app");
    let comparable = model.add_interface(pkg, "Comparable");
    model
        .add_type_parameter(comparable, "Other", Variance::Contravariant)
        .unwrap();
    let producer = model.add_interface(pkg, "Producer");
    model
        .add_type_parameter(producer, "Item", Variance::Covariant)
        .unwrap();
    let boxed = model.add_interface(pkg, "Box");
    model
        .add_type_parameter(boxed, "Content", Variance::Invariant)
        .unwrap();
    let i = model.add_interface(pkg, "I");
    Fixture {
        model,
        pkg,
        comparable,
        producer,
        boxed,
        i,
    }
}

impl Fixture {
    fn apply(&self, decl: DeclId, arg: TypeId) -> TypeId {
        self.model.apply(decl, &[arg]).unwrap()
    }

    fn i_type(&self) -> TypeId {
        self.model.type_of(self.i)
    }
}

#[test]
fn test_single_contravariant_application_is_decidable() {
    let f = fixture();
    let comparable_i = f.apply(f.comparable, f.i_type());
    assert!(f.model.check_decidability(comparable_i).is_empty());
}

#[test]
fn test_nested_contravariant_application_is_reported() {
    let f = fixture();
    let inner = f.apply(f.comparable, f.i_type());
    let outer = f.apply(f.comparable, inner);
    assert_eq!(f.model.check_decidability(outer), vec![f.comparable]);
}

#[test]
fn test_covariant_wrapper_preserves_contravariant_position() {
    let f = fixture();
    let inner = f.apply(f.comparable, f.i_type());
    let produced = f.apply(f.producer, inner);
    let outer = f.apply(f.comparable, produced);
    assert_eq!(f.model.check_decidability(outer), vec![f.comparable]);

    // Producer<Comparable<I>> alone has no contravariant context.
    assert!(f.model.check_decidability(produced).is_empty());
}

#[test]
fn test_invariant_position_is_not_reported() {
    let f = fixture();
    let inner = f.apply(f.comparable, f.i_type());
    let middle = f.apply(f.comparable, inner);
    let boxed = f.apply(f.boxed, middle);
    assert!(f.model.check_decidability(boxed).is_empty());
}

#[test]
fn test_each_offending_declaration_is_reported_once() {
    let mut f = fixture();
    let pair = f.model.add_interface(f.pkg, "Pair");
    f.model
        .add_type_parameter(pair, "First", Variance::Covariant)
        .unwrap();
    f.model
        .add_type_parameter(pair, "Second", Variance::Covariant)
        .unwrap();
    let nested = f.apply(f.comparable, f.apply(f.comparable, f.i_type()));
    let pair_type = f.model.apply(pair, &[nested, nested]).unwrap();
    assert_eq!(f.model.check_decidability(pair_type), vec![f.comparable]);
}

#[test]
fn test_union_members_are_scanned() {
    let f = fixture();
    let nested = f.apply(f.comparable, f.apply(f.comparable, f.i_type()));
    let union = f.model.union(&[f.i_type(), nested]);
    assert_eq!(f.model.check_decidability(union), vec![f.comparable]);
}

#[test]
fn test_alias_must_be_resolved_before_the_check() {
    let mut f = fixture();
    // alias Cmp<T> => Comparable<T>
    let cmp = f.model.add_type_alias(f.pkg, "Cmp");
    let t = f
        .model
        .add_type_parameter(cmp, "T", Variance::Invariant)
        .unwrap();
    let target = f.apply(f.comparable, f.model.param_type(t).unwrap());
    f.model.set_alias_target(cmp, target).unwrap();

    let cmp_i = f.apply(cmp, f.i_type());
    let outer = f.apply(f.comparable, cmp_i);
    assert!(f.model.check_decidability(outer).is_empty());

    let resolved = f.model.resolve_aliases(outer);
    assert_eq!(f.model.check_decidability(resolved), vec![f.comparable]);
}
