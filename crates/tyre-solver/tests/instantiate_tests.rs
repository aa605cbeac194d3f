use super::*;
use crate::test_db::TestDatabase;
use tyre_binder::{ResolutionState, SignatureKind, SymbolFlags, TypeId};

#[test]
fn substitution_pairs_missing_arguments_with_any() {
    let mut db = TestDatabase::new();
    let t = db.type_param("T", None);
    let u = db.type_param("U", None);
    let substitution = TypeSubstitution::from_pairs(&[t, u], &[TypeId::NUMBER]);
    assert_eq!(substitution.len(), 2);
    assert_eq!(substitution.get(t), Some(TypeId::NUMBER));
    assert_eq!(substitution.get(u), Some(TypeId::ANY));
    assert!(!substitution.is_identity());
    assert!(TypeSubstitution::from_pairs(&[t], &[t]).is_identity());
}

#[test]
fn specialization_is_memoized_per_argument_list() {
    let mut db = TestDatabase::new();
    let (boxed, params) = db.generic_interface("Box", &["T"]);
    db.add_property(boxed, "value", params[0], SymbolFlags::empty());

    let first = specialize_type(&mut db, boxed, &[TypeId::NUMBER]);
    let second = specialize_type(&mut db, boxed, &[TypeId::NUMBER]);
    let strings = specialize_type(&mut db, boxed, &[TypeId::STRING]);
    assert_eq!(first, second);
    assert_ne!(first, strings);
    assert_eq!(db.caches.specializations.type_count(), 2);
    assert_eq!(specialize_type(&mut db, boxed, &[params[0]]), boxed);
}

#[test]
fn specializations_populate_lazily() {
    let mut db = TestDatabase::new();
    let (boxed, params) = db.generic_interface("Box", &["T"]);
    db.add_property(boxed, "value", params[0], SymbolFlags::empty());
    db.add_property(boxed, "count", TypeId::NUMBER, SymbolFlags::empty());

    let numbers = specialize_type(&mut db, boxed, &[TypeId::NUMBER]);
    assert_eq!(db.symbols.ty(numbers).state, ResolutionState::Unresolved);
    assert!(db.symbols.ty(numbers).members.is_empty());

    db.resolve_type(numbers);
    let symbol = db.symbols.ty(numbers);
    assert!(symbol.state.is_resolved());
    let value = db.atom("value");
    let count = db.atom("count");
    let symbol = db.symbols.ty(numbers);
    let value_member = symbol.members.get(value).expect("value member");
    let count_member = symbol.members.get(count).expect("count member");
    assert_eq!(db.symbols.value(value_member).ty, Some(TypeId::NUMBER));
    assert_eq!(
        count_member,
        db.symbols.ty(boxed).members.get(count).expect("root count"),
        "unchanged members are shared with the root"
    );
    assert_eq!(db.format(numbers), "Box<number>");
}

#[test]
fn self_referential_generic_stays_finite() {
    let mut db = TestDatabase::new();
    let (list, params) = db.generic_interface("List", &["T"]);
    db.add_property(list, "head", params[0], SymbolFlags::empty());
    db.add_property(list, "next", list, SymbolFlags::empty());

    let numbers = specialize_type(&mut db, list, &[TypeId::NUMBER]);
    db.resolve_type(numbers);
    let next = db.atom("next");
    let next_member = db.symbols.ty(numbers).members.get(next).expect("next");
    assert_eq!(db.symbols.value(next_member).ty, Some(numbers));

    let strings = specialize_type(&mut db, list, &[TypeId::STRING]);
    assert!(!is_assignable(&mut db, numbers, strings));
    assert!(is_assignable(&mut db, numbers, numbers));
}

#[test]
fn instantiate_walks_arrays_and_named_arguments() {
    let mut db = TestDatabase::new();
    let (boxed, box_params) = db.generic_interface("Box", &["T"]);
    db.add_property(boxed, "value", box_params[0], SymbolFlags::empty());
    let u = db.type_param("U", None);
    let box_of_u = specialize_type(&mut db, boxed, &[u]);
    let array_of_u = db.symbols.array_of(u);

    let mut substitution = TypeSubstitution::new();
    substitution.insert(u, TypeId::STRING);

    let strings = db.symbols.array_of(TypeId::STRING);
    assert_eq!(instantiate_type(&mut db, array_of_u, &substitution), strings);
    let box_of_string = specialize_type(&mut db, boxed, &[TypeId::STRING]);
    assert_eq!(instantiate_type(&mut db, box_of_u, &substitution), box_of_string);
    assert_eq!(instantiate_type(&mut db, TypeId::NUMBER, &substitution), TypeId::NUMBER);
}

#[test]
fn anonymous_types_are_specialized_only_when_they_mention_a_parameter() {
    let mut db = TestDatabase::new();
    let t = db.type_param("T", None);
    let mentions = db.object(&[("item", t)]);
    let plain = db.object(&[("item", TypeId::NUMBER)]);

    let substitution = TypeSubstitution::from_pairs(&[t], &[TypeId::BOOLEAN]);
    assert!(mentions_type_parameters(&mut db, mentions, &[t]));
    assert!(!mentions_type_parameters(&mut db, plain, &[t]));
    assert_eq!(instantiate_type(&mut db, plain, &substitution), plain);

    let specialized = instantiate_type(&mut db, mentions, &substitution);
    assert_ne!(specialized, mentions);
    assert_eq!(instantiate_type(&mut db, mentions, &substitution), specialized);
    db.resolve_type(specialized);
    assert_eq!(db.format(specialized), "{ item: boolean; }");
}

#[test]
fn nested_anonymous_instantiation_composes_mappings() {
    let mut db = TestDatabase::new();
    let t = db.type_param("T", None);
    let u = db.type_param("U", None);
    let pair = db.object(&[("first", t)]);

    let to_u = TypeSubstitution::from_pairs(&[t], &[u]);
    let pair_of_u = instantiate_type(&mut db, pair, &to_u);
    let to_number = TypeSubstitution::from_pairs(&[u], &[TypeId::NUMBER]);
    let pair_of_number = instantiate_type(&mut db, pair_of_u, &to_number);

    let direct = instantiate_type(&mut db, pair, &TypeSubstitution::from_pairs(&[t], &[TypeId::NUMBER]));
    assert_eq!(pair_of_number, direct);
}

#[test]
fn signature_instantiation_substitutes_and_keeps_unbound_parameters() {
    let mut db = TestDatabase::new();
    let t = db.type_param("T", None);
    let u = db.type_param("U", None);
    let sig = db.signature(SignatureKind::Call, &[("a", t), ("b", u)], t);
    db.symbols.signature_mut(sig).type_parameters = vec![t, u];

    let substitution = TypeSubstitution::from_pairs(&[t], &[TypeId::NUMBER]);
    let instantiated = instantiate_signature(&mut db, sig, &substitution);
    assert_ne!(instantiated, sig);
    assert_eq!(instantiate_signature(&mut db, sig, &substitution), instantiated);

    let symbol = db.symbols.signature(instantiated).clone();
    assert_eq!(symbol.type_parameters, vec![u]);
    assert_eq!(symbol.return_type, Some(TypeId::NUMBER));
    assert_eq!(db.value_type(symbol.parameters[0]), TypeId::NUMBER);
    assert_eq!(symbol.parameters[1], db.symbols.signature(sig).parameters[1]);
    assert_eq!(symbol.specialization.map(|spec| spec.root), Some(sig));

    let specialized = specialize_signature(&mut db, sig, &[TypeId::STRING]);
    let symbol = db.symbols.signature(specialized);
    assert!(symbol.type_parameters.is_empty());
    assert_eq!(symbol.return_type, Some(TypeId::STRING));
    let second = symbol.parameters[1];
    assert_eq!(db.value_type(second), TypeId::ANY);
}
