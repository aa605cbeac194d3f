use super::*;
use crate::test_db::TestDatabase;
use tyre_binder::TypeId;

#[test]
fn best_common_type_picks_the_widest_related_candidate() {
    let mut db = TestDatabase::new();
    let point = db.interface("Point", &[("x", TypeId::NUMBER)]);
    let point3 = db.interface("Point3", &[("x", TypeId::NUMBER), ("z", TypeId::NUMBER)]);

    let best = best_common_type(&mut db, &[point3, point, point3]);
    assert_eq!(best, BestCommonType { ty: point, converged: true });
}

#[test]
fn null_and_undefined_are_absorbed() {
    let mut db = TestDatabase::new();
    let best = best_common_type(&mut db, &[TypeId::NULL, TypeId::NUMBER, TypeId::UNDEFINED]);
    assert_eq!(best.ty, TypeId::NUMBER);
    assert!(best.converged);

    let only_null = best_common_type(&mut db, &[TypeId::UNDEFINED, TypeId::NULL]);
    assert_eq!(only_null.ty, TypeId::NULL);
}

#[test]
fn any_candidate_wins() {
    let mut db = TestDatabase::new();
    let best = best_common_type(&mut db, &[TypeId::STRING, TypeId::ANY, TypeId::NUMBER]);
    assert_eq!(best.ty, TypeId::ANY);
}

#[test]
fn unrelated_candidates_fall_back_to_empty_object() {
    let mut db = TestDatabase::new();
    let best = best_common_type(&mut db, &[TypeId::NUMBER, TypeId::STRING]);
    assert_eq!(
        best,
        BestCommonType {
            ty: TypeId::EMPTY_OBJECT,
            converged: false
        }
    );
}

#[test]
fn empty_candidate_list_is_undefined() {
    let mut db = TestDatabase::new();
    let best = best_common_type(&mut db, &[]);
    assert_eq!(best.ty, TypeId::UNDEFINED);
    assert_eq!(widen(&mut db, best.ty), TypeId::ANY);
}

#[test]
fn widening_rewrites_null_and_undefined() {
    let mut db = TestDatabase::new();
    assert_eq!(widen(&mut db, TypeId::NULL), TypeId::ANY);
    assert_eq!(widen(&mut db, TypeId::UNDEFINED), TypeId::ANY);
    assert_eq!(widen(&mut db, TypeId::NUMBER), TypeId::NUMBER);

    let nulls = db.symbols.array_of(TypeId::NULL);
    let anys = db.symbols.array_of(TypeId::ANY);
    assert_eq!(widen(&mut db, nulls), anys);
    let nested = db.symbols.array_of(nulls);
    let nested_anys = db.symbols.array_of(anys);
    assert_eq!(widen(&mut db, nested), nested_anys);
    let numbers = db.symbols.array_of(TypeId::NUMBER);
    assert_eq!(widen(&mut db, numbers), numbers);
}
