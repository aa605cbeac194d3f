use super::*;
use crate::test_db::TestDatabase;
use tyre_binder::{SignatureKind, SymbolFlags, TypeId};

// =============================================================================
// Primitives and special types
// =============================================================================

#[test]
fn every_type_is_related_to_itself() {
    let mut db = TestDatabase::new();
    let point = db.interface("Point", &[("x", TypeId::NUMBER)]);
    let numbers = db.symbols.array_of(TypeId::NUMBER);
    for ty in [TypeId::NUMBER, TypeId::STRING, TypeId::VOID, point, numbers] {
        assert!(is_identical(&mut db, ty, ty));
        assert!(is_subtype(&mut db, ty, ty));
        assert!(is_assignable(&mut db, ty, ty));
    }
}

#[test]
fn any_is_top_in_both_modes_but_only_assignable_from() {
    let mut db = TestDatabase::new();
    let point = db.interface("Point", &[("x", TypeId::NUMBER)]);

    assert!(is_subtype(&mut db, TypeId::NUMBER, TypeId::ANY));
    assert!(is_subtype(&mut db, point, TypeId::ANY));
    assert!(is_assignable(&mut db, TypeId::ANY, point));
    assert!(is_assignable(&mut db, TypeId::ANY, TypeId::NUMBER));
    assert!(!is_subtype(&mut db, TypeId::ANY, point));
    assert!(!is_subtype(&mut db, TypeId::ANY, TypeId::NUMBER));
}

#[test]
fn null_and_undefined_rules() {
    let mut db = TestDatabase::new();
    let point = db.interface("Point", &[("x", TypeId::NUMBER)]);

    assert!(is_subtype(&mut db, TypeId::NULL, TypeId::NUMBER));
    assert!(is_subtype(&mut db, TypeId::NULL, point));
    assert!(!is_assignable(&mut db, TypeId::NULL, TypeId::UNDEFINED));
    assert!(!is_assignable(&mut db, TypeId::NULL, TypeId::VOID));

    assert!(is_subtype(&mut db, TypeId::UNDEFINED, TypeId::VOID));
    assert!(!is_subtype(&mut db, TypeId::UNDEFINED, TypeId::NUMBER));
    assert!(is_assignable(&mut db, TypeId::UNDEFINED, TypeId::NUMBER));

    assert!(!is_assignable(&mut db, TypeId::NUMBER, TypeId::NULL));
    assert!(!is_assignable(&mut db, TypeId::NUMBER, TypeId::VOID));
    assert!(!is_assignable(&mut db, TypeId::VOID, TypeId::NUMBER));
}

#[test]
fn distinct_primitives_are_unrelated() {
    let mut db = TestDatabase::new();
    assert!(!is_assignable(&mut db, TypeId::NUMBER, TypeId::STRING));
    assert!(!is_assignable(&mut db, TypeId::BOOLEAN, TypeId::NUMBER));
    let point = db.interface("Point", &[("x", TypeId::NUMBER)]);
    assert!(!is_assignable(&mut db, point, TypeId::NUMBER));
}

#[test]
fn error_types_relate_to_everything() {
    let mut db = TestDatabase::new();
    let missing = db.atom("Missing");
    let error = db.symbols.error_type(missing);
    let point = db.interface("Point", &[("x", TypeId::NUMBER)]);

    assert!(is_subtype(&mut db, error, point));
    assert!(is_subtype(&mut db, TypeId::STRING, error));
    assert!(is_identical(&mut db, error, TypeId::NUMBER));
    assert!(is_assignable(&mut db, TypeId::ERROR, TypeId::VOID));
}

#[test]
fn enum_rules() {
    let mut db = TestDatabase::new();
    let color = db.enum_type("Color");
    let size = db.enum_type("Size");

    assert!(is_subtype(&mut db, color, TypeId::NUMBER));
    assert!(!is_subtype(&mut db, TypeId::NUMBER, color));
    assert!(is_assignable(&mut db, TypeId::NUMBER, color));
    assert!(!is_assignable(&mut db, color, size));
    assert!(!is_assignable(&mut db, TypeId::STRING, color));
    assert!(!is_identical(&mut db, color, TypeId::NUMBER));
}

#[test]
fn aliases_are_transparent() {
    let mut db = TestDatabase::new();
    let point = db.interface("Point", &[("x", TypeId::NUMBER)]);
    let alias = db.alias("P", point);
    assert!(is_identical(&mut db, alias, point));
    assert!(is_assignable(&mut db, point, alias));
    let num = db.alias("N", TypeId::NUMBER);
    assert!(!is_assignable(&mut db, num, TypeId::STRING));
}

// =============================================================================
// Objects
// =============================================================================

#[test]
fn structural_subtype_with_extra_members() {
    let mut db = TestDatabase::new();
    let point = db.interface("Point", &[("x", TypeId::NUMBER)]);
    let point3 = db.interface("Point3", &[("x", TypeId::NUMBER), ("z", TypeId::NUMBER)]);

    assert!(is_subtype(&mut db, point3, point));
    assert!(!is_subtype(&mut db, point, point3));
    assert!(!is_identical(&mut db, point3, point));
}

#[test]
fn missing_property_is_explained() {
    let mut db = TestDatabase::new();
    let point = db.interface("Point", &[("x", TypeId::NUMBER)]);
    let point3 = db.interface("Point3", &[("x", TypeId::NUMBER), ("z", TypeId::NUMBER)]);

    let mut info = TypeComparisonInfo::new();
    assert!(!is_assignable_with_info(&mut db, point, point3, &mut info));
    assert!(info.flags.contains(ComparisonFlags::MISSING_PROPERTY));
    assert_eq!(info.message(), "  Property 'z' is missing in type 'Point'.");
}

#[test]
fn optional_target_members_may_be_absent() {
    let mut db = TestDatabase::new();
    let empty = db.interface("Empty", &[]);
    let options = db.interface("Options", &[]);
    db.add_property(options, "verbose", TypeId::BOOLEAN, SymbolFlags::OPTIONAL);
    assert!(is_assignable(&mut db, empty, options));
}

#[test]
fn incompatible_property_chain_is_nested() {
    let mut db = TestDatabase::new();
    let a = db.interface("A", &[("x", TypeId::NUMBER)]);
    let b = db.interface("B", &[("x", TypeId::STRING)]);

    let mut info = TypeComparisonInfo::new();
    assert!(!is_assignable_with_info(&mut db, a, b, &mut info));
    assert!(info.flags.contains(ComparisonFlags::INCOMPATIBLE_PROPERTY_TYPES));
    assert_eq!(
        info.message(),
        "  Types of property 'x' of types 'A' and 'B' are incompatible."
    );
}

#[test]
fn recursive_structures_terminate_and_relate() {
    let mut db = TestDatabase::new();
    let a = db.interface("NodeA", &[]);
    db.add_property(a, "next", a, SymbolFlags::empty());
    let b = db.interface("NodeB", &[]);
    db.add_property(b, "next", b, SymbolFlags::empty());

    assert!(is_subtype(&mut db, a, b));
    assert!(is_identical(&mut db, a, b));
    assert!(db.caches.relations.is_proven(RelationKind::Subtype, a, b));
}

#[test]
fn failed_pairs_are_not_cached() {
    let mut db = TestDatabase::new();
    let a = db.interface("A", &[("x", TypeId::NUMBER)]);
    let b = db.interface("B", &[("y", TypeId::NUMBER)]);
    assert!(!is_assignable(&mut db, a, b));
    assert_eq!(db.caches.relations.lookup(RelationKind::Assignable, a, b), None);
    assert!(!is_assignable(&mut db, a, b));
}

#[test]
fn private_members_need_the_same_declaration() {
    let mut db = TestDatabase::new();
    let a = db.class("A", &[]);
    db.add_property(a, "secret", TypeId::NUMBER, SymbolFlags::PRIVATE);
    let b = db.class("B", &[]);
    db.add_property(b, "secret", TypeId::NUMBER, SymbolFlags::PRIVATE);
    let derived = db.class("Derived", &[("extra", TypeId::STRING)]);
    db.share_member(derived, a, "secret");

    let mut info = TypeComparisonInfo::new();
    assert!(!is_assignable_with_info(&mut db, b, a, &mut info));
    assert!(info.flags.contains(ComparisonFlags::INCONSISTENT_PRIVACY));
    assert!(is_assignable(&mut db, derived, a));

    let public = db.interface("Public", &[("secret", TypeId::NUMBER)]);
    assert!(!is_assignable(&mut db, public, a));
    assert!(!is_assignable(&mut db, a, public));
}

#[test]
fn heritage_shortcut_and_bypass() {
    let mut db = TestDatabase::new();
    let base = db.class("Base", &[("x", TypeId::NUMBER)]);
    let derived = db.class("Derived", &[("x", TypeId::STRING)]);
    db.symbols.ty_mut(derived).extends.push(base);

    assert!(is_assignable(&mut db, derived, base));
    let mut info = TypeComparisonInfo::new();
    let related = RelationChecker::new(&mut db, RelationKind::Assignable)
        .bypass_nominal()
        .relate(derived, base, Some(&mut info));
    assert!(!related);
    assert!(info.flags.contains(ComparisonFlags::INCOMPATIBLE_PROPERTY_TYPES));
}

#[test]
fn type_parameters_relate_through_their_constraint() {
    let mut db = TestDatabase::new();
    let point = db.interface("Point", &[("x", TypeId::NUMBER)]);
    let t = db.type_param("T", Some(point));
    let u = db.type_param("U", None);

    assert!(is_assignable(&mut db, t, point));
    assert!(!is_assignable(&mut db, point, t));
    assert!(!is_assignable(&mut db, u, point));
    assert!(!is_assignable(&mut db, t, u));
    assert!(is_assignable(&mut db, u, TypeId::EMPTY_OBJECT));
}

// =============================================================================
// Arrays
// =============================================================================

#[test]
fn arrays_relate_element_wise() {
    let mut db = TestDatabase::new();
    let point = db.interface("Point", &[("x", TypeId::NUMBER)]);
    let point3 = db.interface("Point3", &[("x", TypeId::NUMBER), ("z", TypeId::NUMBER)]);
    let points = db.symbols.array_of(point);
    let points3 = db.symbols.array_of(point3);
    let numbers = db.symbols.array_of(TypeId::NUMBER);

    assert!(is_subtype(&mut db, points3, points));
    assert!(!is_subtype(&mut db, points, points3));
    assert!(!is_assignable(&mut db, numbers, TypeId::NUMBER));
    assert!(!is_assignable(&mut db, point, points));
}

#[test]
fn arrays_use_the_global_array_interface() {
    let mut db = TestDatabase::new();
    let (array, params) = db.generic_interface("Array", &["T"]);
    db.add_property(array, "length", TypeId::NUMBER, SymbolFlags::empty());
    let element_array = db.symbols.array_of(params[0]);
    db.add_property(array, "concat", element_array, SymbolFlags::empty());
    db.globals.insert(GlobalType::Array, array);

    let numbers = db.symbols.array_of(TypeId::NUMBER);
    let lengthy = db.interface("Lengthy", &[("length", TypeId::NUMBER)]);
    assert!(is_assignable(&mut db, numbers, lengthy));

    let wants_concat = db.interface("Concat", &[("concat", numbers)]);
    assert!(is_assignable(&mut db, numbers, wants_concat));
    let strings = db.symbols.array_of(TypeId::STRING);
    assert!(!is_assignable(&mut db, strings, wants_concat));
}

// =============================================================================
// Signatures
// =============================================================================

#[test]
fn parameters_are_bivariant() {
    let mut db = TestDatabase::new();
    let point = db.interface("Point", &[("x", TypeId::NUMBER)]);
    let point3 = db.interface("Point3", &[("x", TypeId::NUMBER), ("z", TypeId::NUMBER)]);
    let takes_point = db.function_type(&[("p", point)], TypeId::VOID);
    let takes_point3 = db.function_type(&[("p", point3)], TypeId::VOID);
    let takes_string = db.function_type(&[("p", TypeId::STRING)], TypeId::VOID);

    assert!(is_assignable(&mut db, takes_point, takes_point3));
    assert!(is_assignable(&mut db, takes_point3, takes_point));

    let mut info = TypeComparisonInfo::new();
    assert!(!is_assignable_with_info(&mut db, takes_string, takes_point, &mut info));
    assert!(info.flags.contains(ComparisonFlags::INCOMPATIBLE_PARAMETERS));
    assert!(info.flags.contains(ComparisonFlags::INCOMPATIBLE_SIGNATURES));
}

#[test]
fn source_may_not_require_more_parameters() {
    let mut db = TestDatabase::new();
    let none = db.function_type(&[], TypeId::VOID);
    let one = db.function_type(&[("a", TypeId::NUMBER)], TypeId::VOID);
    let two = db.function_type(&[("a", TypeId::NUMBER), ("b", TypeId::NUMBER)], TypeId::VOID);

    assert!(is_assignable(&mut db, none, two));
    assert!(is_assignable(&mut db, one, two));
    let mut info = TypeComparisonInfo::new();
    assert!(!is_assignable_with_info(&mut db, two, one, &mut info));
    assert!(info.flags.contains(ComparisonFlags::ARITY_MISMATCH));
}

#[test]
fn rest_parameters_absorb_extra_arity() {
    let mut db = TestDatabase::new();
    let numbers = db.symbols.array_of(TypeId::NUMBER);
    let rest = db.parameter("rest", numbers, SymbolFlags::VARARG);
    let sig = db.signature_with(SignatureKind::Call, vec![rest], TypeId::VOID);
    let variadic = db.callable(sig);
    let two = db.function_type(&[("a", TypeId::NUMBER), ("b", TypeId::NUMBER)], TypeId::VOID);
    let two_strings = db.function_type(&[("a", TypeId::STRING), ("b", TypeId::STRING)], TypeId::VOID);

    assert!(is_assignable(&mut db, two, variadic));
    assert!(is_assignable(&mut db, variadic, two));
    assert!(!is_assignable(&mut db, two_strings, variadic));
}

#[test]
fn void_target_return_is_ignored() {
    let mut db = TestDatabase::new();
    let returns_number = db.function_type(&[], TypeId::NUMBER);
    let returns_void = db.function_type(&[], TypeId::VOID);
    let returns_string = db.function_type(&[], TypeId::STRING);

    assert!(is_assignable(&mut db, returns_number, returns_void));
    let mut info = TypeComparisonInfo::new();
    assert!(!is_assignable_with_info(&mut db, returns_string, returns_number, &mut info));
    assert!(info.flags.contains(ComparisonFlags::INCOMPATIBLE_RETURN_TYPES));
}

#[test]
fn missing_call_signature_is_explained() {
    let mut db = TestDatabase::new();
    let point = db.interface("Point", &[("x", TypeId::NUMBER)]);
    let callable = db.function_type(&[], TypeId::VOID);
    let mut info = TypeComparisonInfo::new();
    assert!(!is_assignable_with_info(&mut db, point, callable, &mut info));
    assert!(info.flags.contains(ComparisonFlags::MISSING_SIGNATURE));
    assert_eq!(
        info.message(),
        "  Type '() => void' requires a call signature, but type 'Point' lacks one."
    );
}

#[test]
fn index_signatures() {
    let mut db = TestDatabase::new();
    let dictionary = db.interface("Dictionary", &[]);
    db.add_index_signature(dictionary, TypeId::STRING, TypeId::NUMBER);
    let list = db.interface("List", &[]);
    db.add_index_signature(list, TypeId::NUMBER, TypeId::NUMBER);
    let plain = db.interface("Plain", &[]);

    assert!(is_assignable(&mut db, dictionary, list));
    assert!(!is_assignable(&mut db, list, dictionary));
    let mut info = TypeComparisonInfo::new();
    assert!(!is_assignable_with_info(&mut db, plain, dictionary, &mut info));
    assert!(info.flags.contains(ComparisonFlags::MISSING_INDEX_SIGNATURE));

    let strings = db.interface("Strings", &[]);
    db.add_index_signature(strings, TypeId::STRING, TypeId::STRING);
    assert!(!is_assignable(&mut db, strings, dictionary));
}

#[test]
fn identity_requires_matching_optionality() {
    let mut db = TestDatabase::new();
    let a = db.interface("A", &[]);
    db.add_property(a, "x", TypeId::NUMBER, SymbolFlags::OPTIONAL);
    let b = db.interface("B", &[("x", TypeId::NUMBER)]);
    let c = db.interface("C", &[("x", TypeId::NUMBER)]);

    assert!(!is_identical(&mut db, a, b));
    assert!(is_identical(&mut db, b, c));
    assert!(is_assignable(&mut db, b, a));
}
