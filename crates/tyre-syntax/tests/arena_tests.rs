use super::*;
use tyre_common::{Interner, Span};

#[test]
fn test_add_links_children_to_parent() {
    let mut interner = Interner::new();
    let mut b = AstBuilder::new(&mut interner);
    let left = b.num(1.0);
    let right = b.num(2.0);
    let sum = b.binary(left, BinaryOperator::Add, right);
    let arena = b.finish();

    assert_eq!(arena.parent(left), sum);
    assert_eq!(arena.parent(right), sum);
    assert!(arena.parent(sum).is_none());
    assert_eq!(arena.children(sum), vec![left, right]);
}

#[test]
fn test_get_none_index_returns_none() {
    let arena = NodeArena::new();
    assert!(arena.get(NodeIndex::NONE).is_none());
    assert!(arena.data(NodeIndex(0)).is_none());
    assert_eq!(arena.span(NodeIndex::NONE), Span::default());
}

#[test]
fn test_ancestors_walk_to_root() {
    let mut interner = Interner::new();
    let mut b = AstBuilder::new(&mut interner);
    let value = b.num(1.0);
    let ret = b.return_stmt(value);
    let body = b.block(vec![ret]);
    let func = b.function("f", vec![], vec![], NodeIndex::NONE, body);
    let root = b.source_file(vec![func]);
    let arena = b.finish();

    let chain: Vec<NodeIndex> = arena.ancestors(value).collect();
    assert_eq!(chain, vec![ret, body, func, root]);
}

#[test]
fn test_children_skip_absent_optional_nodes() {
    let mut interner = Interner::new();
    let mut b = AstBuilder::new(&mut interner);
    let var = b.var("x", NodeIndex::NONE, NodeIndex::NONE);
    let arena = b.finish();
    assert!(arena.children(var).is_empty());
}

#[test]
fn test_binary_operator_classification() {
    assert!(BinaryOperator::AddAssign.is_assignment());
    assert_eq!(
        BinaryOperator::AddAssign.compound_base(),
        Some(BinaryOperator::Add)
    );
    assert!(BinaryOperator::Assign.is_assignment());
    assert!(!BinaryOperator::Add.is_assignment());
    assert!(BinaryOperator::Subtract.is_numeric_arithmetic());
    assert!(!BinaryOperator::Add.is_numeric_arithmetic());
    assert!(BinaryOperator::StrictEquals.is_comparison());
    assert_eq!(BinaryOperator::UnsignedRightShiftAssign.text(), ">>>=");
}
