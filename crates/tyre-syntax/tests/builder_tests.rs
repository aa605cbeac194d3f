use super::*;

#[test]
fn test_builder_assigns_distinct_spans() {
    let mut program = Program::new();
    let unit = program.add_unit("a.ts", |b| {
        let one = b.num(1.0);
        let two = b.num(2.0);
        let s1 = b.expr_stmt(one);
        let s2 = b.expr_stmt(two);
        b.source_file(vec![s1, s2])
    });
    let arena = program.unit(unit).arena();
    let spans: Vec<_> = (0..arena.len() as u32)
        .map(|i| arena.span(NodeIndex(i)).start)
        .collect();
    let mut deduped = spans.clone();
    deduped.dedup();
    assert_eq!(spans, deduped, "every node should get its own span");
}

#[test]
fn test_qualified_type_reference_is_split() {
    let mut program = Program::new();
    let mut type_ref = NodeIndex::NONE;
    let unit = program.add_unit("a.ts", |b| {
        type_ref = b.type_ref("M.N.A", vec![]);
        let var = b.var("x", type_ref, NodeIndex::NONE);
        b.source_file(vec![var])
    });
    let arena = program.unit(unit).arena();
    let Some(NodeData::TypeReference(data)) = arena.data(type_ref) else {
        panic!("expected a type reference");
    };
    let parts: Vec<&str> = data
        .name
        .iter()
        .map(|atom| program.interner().resolve(*atom))
        .collect();
    assert_eq!(parts, vec!["M", "N", "A"]);
}

#[test]
fn test_export_sets_modifier() {
    let mut program = Program::new();
    let mut class = NodeIndex::NONE;
    let unit = program.add_unit("a.ts", |b| {
        let c = b.class("C", vec![], NodeIndex::NONE, vec![], vec![]);
        class = b.export(c);
        b.source_file(vec![class])
    });
    let data = program.unit(unit).arena().data(class).expect("class node");
    assert!(data.modifiers().contains(Modifiers::EXPORT));
}

#[test]
fn test_program_units_lookup_by_path() {
    let mut program = Program::new();
    let a = program.add_unit("a.ts", |b| b.source_file(vec![]));
    let b_unit = program.add_unit("b.ts", |b| b.source_file(vec![]));
    assert_eq!(program.unit_by_path("a.ts"), Some(a));
    assert_eq!(program.unit_by_path("b.ts"), Some(b_unit));
    assert_eq!(program.unit_by_path("c.ts"), None);
    assert_eq!(program.unit_count(), 2);
    assert_eq!(program.unit(b_unit).path(), "b.ts");
}

#[test]
fn test_context_sensitive_expressions() {
    let mut program = Program::new();
    let mut nodes = Vec::new();
    let unit = program.add_unit("a.ts", |b| {
        let body = b.num(1.0);
        nodes.push(b.arrow(vec![], NodeIndex::NONE, body));
        nodes.push(b.object(vec![]));
        nodes.push(b.array(vec![]));
        nodes.push(b.num(2.0));
        b.source_file(vec![])
    });
    let arena = program.unit(unit).arena();
    let flags: Vec<bool> = nodes
        .iter()
        .map(|idx| arena.data(*idx).is_some_and(NodeData::is_context_sensitive))
        .collect();
    assert_eq!(flags, vec![true, true, true, false]);
}
