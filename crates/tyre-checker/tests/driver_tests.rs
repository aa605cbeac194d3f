//! The resolution driver: modes, memo policy, epochs and entry points.

use crate::context::{ContextFlags, ContextFrame};
use crate::test_utils::*;
use tyre_binder::TypeId;
use tyre_common::CompilationSettings;
use tyre_syntax::{NodeIndex, Program};

/// `var x: number = 1; missing;` in `a.ts`, returning the initializer and
/// the unknown identifier.
fn program_with_unknown_name() -> (Program, NodeIndex, NodeIndex) {
    let (mut init, mut unknown) = (NodeIndex::NONE, NodeIndex::NONE);
    let mut program = Program::new();
    program.add_unit("a.ts", |b| {
        let number = b.number_type();
        init = b.num(1.0);
        let x = b.var("x", number, init);
        unknown = b.ident("missing");
        let stmt = b.expr_stmt(unknown);
        b.source_file(vec![x, stmt])
    });
    (program, init, unknown)
}

#[test]
fn test_check_program_records_node_types() {
    let (program, init, unknown) = program_with_unknown_name();
    let unit = program.unit_by_path("a.ts").expect("unit");

    with_checker(&program, CompilationSettings::default(), |checker| {
        assert_eq!(checker.type_of_node(unit, init), None);
        checker.check_program();

        assert_eq!(checker.type_of_node(unit, init), Some(TypeId::NUMBER));
        let unknown_type = checker.type_of_node(unit, unknown).expect("memoized");
        assert!(checker.symbols.is_error(unknown_type));
        assert_eq!(codes(checker.diagnostics()), vec![2304]);

        let info = checker.chain.node_info((unit, init)).expect("memo entry");
        assert_eq!(info.checked_epoch, Some(0));
        assert_eq!(checker.chain.epoch(), 1);
    });
}

#[test]
fn test_recheck_in_new_epoch_does_not_duplicate_diagnostics() {
    let (program, init, _) = program_with_unknown_name();
    let unit = program.unit_by_path("a.ts").expect("unit");

    with_checker(&program, CompilationSettings::default(), |checker| {
        checker.check_program();
        assert!(!checker.chain.is_checked((unit, init)));
        checker.check_program();
        assert_eq!(checker.chain.epoch(), 2);
        assert!(checker.chain.node_info((unit, init)).is_some_and(|info| info.checked_epoch == Some(1)));
        assert_eq!(codes(checker.diagnostics()), vec![2304]);
    });
}

#[test]
fn test_unit_is_checked_once_per_epoch() {
    let (program, _, _) = program_with_unknown_name();

    with_checker(&program, CompilationSettings::default(), |checker| {
        assert!(checker.type_check("a.ts"));
        let unit = program.unit_by_path("a.ts").expect("unit");
        assert!(checker.chain.is_unit_checked(unit));
        assert!(checker.type_check("a.ts"));
        assert_eq!(checker.diagnostics().len(), 1);
        assert!(!checker.type_check("missing.ts"));
    });
}

#[test]
fn test_resolve_mode_reports_nothing() {
    let (program, _, unknown) = program_with_unknown_name();
    let unit = program.unit_by_path("a.ts").expect("unit");

    with_checker(&program, CompilationSettings::default(), |checker| {
        let ty = checker.resolve(unit, unknown);
        assert!(checker.symbols.is_error(ty));
        assert!(checker.diagnostics().is_empty());
        assert_eq!(checker.type_of_node(unit, unknown), Some(ty));

        // A later check pass still walks the node and reports.
        checker.check_program();
        assert_eq!(codes(checker.diagnostics()), vec![2304]);
    });
}

#[test]
fn test_provisional_frame_isolates_diagnostics_and_memo() {
    let (program, _, unknown) = program_with_unknown_name();
    let unit = program.unit_by_path("a.ts").expect("unit");

    with_checker(&program, CompilationSettings::default(), |checker| {
        let root = checker.declarations.unit_root(unit);
        let ty = {
            let mut scope = checker.scope();
            scope.ctx.unit = unit;
            scope.ctx.enclosing = root;
            scope.ctx.flags = ContextFlags::TYPE_CHECK;
            scope.ctx.push_frame(ContextFrame::provisional(None));
            assert!(scope.ctx.is_provisional());
            scope.resolve_ast(unknown, true)
        };
        assert!(checker.symbols.is_error(ty));
        assert!(!checker.ctx.is_provisional());
        assert_eq!(checker.ctx.frame_depth(), 0);

        assert!(checker.diagnostics().is_empty());
        assert_eq!(codes(&checker.ctx.provisional_errors), vec![2304]);
        assert_eq!(checker.type_of_node(unit, unknown), None);
    });
}

#[test]
fn test_frames_pushed_inside_provisional_frames_are_provisional() {
    let program = single_unit(|b| b.source_file(vec![]));

    with_checker(&program, CompilationSettings::default(), |checker| {
        let mut outer = checker.scope();
        outer.ctx.push_frame(ContextFrame::provisional(Some(TypeId::NUMBER)));
        {
            let mut inner = outer.scope();
            inner.ctx.push_frame(ContextFrame::new(Some(TypeId::STRING)));
            assert!(inner.ctx.is_provisional());
            assert_eq!(inner.ctx.top_frame().and_then(|frame| frame.ty), Some(TypeId::STRING));
        }
        assert_eq!(outer.ctx.frame_depth(), 1);
        assert_eq!(outer.ctx.top_frame().and_then(|frame| frame.ty), Some(TypeId::NUMBER));
    });
}

#[test]
fn test_diagnostics_carry_their_unit() {
    // a.ts: var x: number = 1;   b.ts: var y: string = x;
    let mut program = Program::new();
    program.add_unit("a.ts", |b| {
        let number = b.number_type();
        let one = b.num(1.0);
        let x = b.var("x", number, one);
        b.source_file(vec![x])
    });
    program.add_unit("b.ts", |b| {
        let string = b.string_type();
        let x = b.ident("x");
        let y = b.var("y", string, x);
        b.source_file(vec![y])
    });

    let diagnostics = check(&program, CompilationSettings::default());
    assert_eq!(codes(&diagnostics), vec![2322]);
    assert_eq!(diagnostics[0].file, "b.ts");
}

#[test]
fn test_declaration_type_does_not_depend_on_first_requester() {
    // The initializer of `f` is first reached from inside a provisional
    // overload trial; its declared type must still be the committed one.
    let program = single_unit(|b| {
        let number = b.number_type();
        let p = b.param("x", number);
        let ret = b.number_type();
        let x = b.ident("x");
        let ret_stmt = b.return_stmt(x);
        let body = b.block(vec![ret_stmt]);
        let g = b.function("g", vec![], vec![p], ret, body);

        let callee = b.ident("g");
        let f_ref = b.ident("f");
        let call = b.call(callee, vec![f_ref]);
        let stmt = b.expr_stmt(call);

        let one = b.num(1.0);
        let f = b.var("f", NodeIndex::NONE, one);
        b.source_file(vec![g, stmt, f])
    });

    with_checker(&program, CompilationSettings::default(), |checker| {
        checker.check_program();
        assert!(checker.diagnostics().is_empty(), "{:?}", checker.diagnostics());
        assert_eq!(global_value_type(checker, "f"), TypeId::NUMBER);
    });
}

#[test]
fn test_type_check_program_returns_all_diagnostics() {
    let (program, _, _) = program_with_unknown_name();
    let diagnostics = check(&program, strict());
    assert_eq!(codes(&diagnostics), vec![2304]);
    assert_eq!(diagnostics[0].file, "a.ts");
}
