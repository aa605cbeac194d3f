use super::*;
use crate::test_db::TestDatabase;
use tyre_binder::{SignatureKind, SymbolFlags, TypeId};

#[test]
fn direct_parameter_collects_the_argument() {
    let mut db = TestDatabase::new();
    let t = db.type_param("T", None);
    let mut ctx = InferenceContext::new(&[t]);

    relate_type_to_type_parameters(&mut db, TypeId::NUMBER, t, &mut ctx);
    relate_type_to_type_parameters(&mut db, TypeId::NUMBER, t, &mut ctx);
    assert_eq!(ctx.candidates(t), &[TypeId::NUMBER]);
    assert_eq!(ctx.inferred_arguments(&mut db), vec![TypeId::NUMBER]);
}

#[test]
fn unconstrained_parameters_default_to_any() {
    let mut db = TestDatabase::new();
    let t = db.type_param("T", None);
    let u = db.type_param("U", None);
    let mut ctx = InferenceContext::new(&[t, u]);
    relate_type_to_type_parameters(&mut db, TypeId::STRING, u, &mut ctx);
    assert_eq!(ctx.inferred_arguments(&mut db), vec![TypeId::ANY, TypeId::STRING]);
}

#[test]
fn array_elements_are_walked() {
    let mut db = TestDatabase::new();
    let t = db.type_param("T", None);
    let array_of_t = db.symbols.array_of(t);
    let strings = db.symbols.array_of(TypeId::STRING);
    let mut ctx = InferenceContext::new(&[t]);

    relate_type_to_type_parameters(&mut db, strings, array_of_t, &mut ctx);
    assert_eq!(ctx.candidates(t), &[TypeId::STRING]);
}

#[test]
fn specializations_of_one_root_pair_their_arguments() {
    let mut db = TestDatabase::new();
    let (boxed, params) = db.generic_interface("Box", &["V"]);
    db.add_property(boxed, "value", params[0], SymbolFlags::empty());
    let t = db.type_param("T", None);
    let box_of_t = specialize_type(&mut db, boxed, &[t]);
    let box_of_number = specialize_type(&mut db, boxed, &[TypeId::NUMBER]);

    let mut ctx = InferenceContext::new(&[t]);
    relate_type_to_type_parameters(&mut db, box_of_number, box_of_t, &mut ctx);
    assert_eq!(ctx.candidates(t), &[TypeId::NUMBER]);
}

#[test]
fn object_members_and_signatures_are_walked() {
    let mut db = TestDatabase::new();
    let t = db.type_param("T", None);
    let u = db.type_param("U", None);
    let target = db.object(&[("key", t)]);
    let callback = db.function_type(&[("item", t)], u);
    db.add_property(target, "map", callback, SymbolFlags::empty());

    let source_callback = db.function_type(&[("item", TypeId::NUMBER)], TypeId::STRING);
    let source = db.object(&[("key", TypeId::NUMBER), ("map", source_callback)]);

    let mut ctx = InferenceContext::new(&[t, u]);
    relate_type_to_type_parameters(&mut db, source, target, &mut ctx);
    assert_eq!(ctx.candidates(t), &[TypeId::NUMBER]);
    assert_eq!(ctx.candidates(u), &[TypeId::STRING]);
}

#[test]
fn multiple_candidates_reduce_to_the_best_common_type() {
    let mut db = TestDatabase::new();
    let point = db.interface("Point", &[("x", TypeId::NUMBER)]);
    let point3 = db.interface("Point3", &[("x", TypeId::NUMBER), ("z", TypeId::NUMBER)]);
    let t = db.type_param("T", None);
    let mut ctx = InferenceContext::new(&[t]);

    relate_type_to_type_parameters(&mut db, point3, t, &mut ctx);
    relate_type_to_type_parameters(&mut db, point, t, &mut ctx);
    relate_type_to_type_parameters(&mut db, TypeId::NULL, t, &mut ctx);
    assert_eq!(ctx.inferred_arguments(&mut db), vec![point]);
}

#[test]
fn recursive_parameter_types_terminate() {
    let mut db = TestDatabase::new();
    let t = db.type_param("T", None);
    let target = db.object(&[("value", t)]);
    db.add_property(target, "self", target, SymbolFlags::empty());
    let source = db.object(&[("value", TypeId::BOOLEAN)]);
    db.add_property(source, "self", source, SymbolFlags::empty());

    let mut ctx = InferenceContext::new(&[t]);
    relate_type_to_type_parameters(&mut db, source, target, &mut ctx);
    assert_eq!(ctx.candidates(t), &[TypeId::BOOLEAN]);

    let sig = db.signature(SignatureKind::Call, &[("x", t)], t);
    let generic = db.callable(sig);
    assert!(mentions_type_parameters(&mut db, generic, &[t]));
}
