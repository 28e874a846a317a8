use super::*;
use crate::decl::Variance;

#[test]
fn test_english_list() {
    assert_eq!(english_list(&[]), "");
    assert_eq!(english_list(&["A"]), "A");
    assert_eq!(english_list(&["A", "B"]), "A and B");
    assert_eq!(english_list(&["A", "B", "C"]), "A, B and C");
}

#[test]
fn test_type_name_renders_applied_and_compound_types() {
    let mut model = TypeModel::new("lumen.lang");
    let pkg = model.add_package("app");
    let map = model.add_class(pkg, "Map");
    let k = model.add_type_parameter(map, "K", Variance::Invariant).unwrap();
    model.add_type_parameter(map, "V", Variance::Covariant).unwrap();
    let string = model.add_class(pkg, "String");
    let string_type = model.type_of(string);
    let k_type = model.param_type(k).unwrap();

    let applied = model.apply(map, &[string_type, k_type]).unwrap();
    assert_eq!(model.type_name(applied), "Map<String,K>");
    assert_eq!(model.type_name(model.type_of(map)), "Map<K,V>");

    let union = model.union(&[string_type, k_type]);
    assert_eq!(model.type_name(union), "String|K");
    let intersection = model.intersection(&[string_type, k_type]);
    assert_eq!(model.type_name(intersection), "String&K");
    assert_eq!(model.type_name(model.nothing()), "Nothing");
}

#[test]
fn test_type_list_uses_declaration_names() {
    let mut model = TypeModel::new("lumen.lang");
    let pkg = model.add_package("app");
    let a = model.add_interface(pkg, "A");
    let b = model.add_interface(pkg, "B");
    let c = model.add_interface(pkg, "C");
    assert_eq!(model.type_list(&[a, b, c]), "A, B and C");
    assert_eq!(model.type_list(&[DeclId(500)]), "<unknown>");
}
