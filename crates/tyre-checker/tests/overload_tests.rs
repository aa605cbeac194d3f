//! Overload resolution and generic inference through call expressions.

use crate::test_utils::*;
use tyre_binder::TypeId;
use tyre_common::CompilationSettings;
use tyre_solver::TypeDatabase;
use tyre_syntax::{NodeIndex, Program};

/// `function f(x: number): number; function f(x: string): string;
///  function f(x: any): any { return x; }`
fn overloaded_f(b: &mut tyre_syntax::AstBuilder<'_>) -> Vec<NodeIndex> {
    let number = b.number_type();
    let p = b.param("x", number);
    let ret = b.number_type();
    let by_number = b.function("f", vec![], vec![p], ret, NodeIndex::NONE);

    let string = b.string_type();
    let p = b.param("x", string);
    let ret = b.string_type();
    let by_string = b.function("f", vec![], vec![p], ret, NodeIndex::NONE);

    let any = b.any_type();
    let p = b.param("x", any);
    let ret = b.any_type();
    let x = b.ident("x");
    let ret_stmt = b.return_stmt(x);
    let body = b.block(vec![ret_stmt]);
    let implementation = b.function("f", vec![], vec![p], ret, body);
    vec![by_number, by_string, implementation]
}

/// `function id<T>(x: T): T { return x; }`
fn identity(b: &mut tyre_syntax::AstBuilder<'_>) -> NodeIndex {
    let t = b.type_param("T", NodeIndex::NONE);
    let t_ref = b.type_ref("T", vec![]);
    let p = b.param("x", t_ref);
    let ret = b.type_ref("T", vec![]);
    let x = b.ident("x");
    let ret_stmt = b.return_stmt(x);
    let body = b.block(vec![ret_stmt]);
    b.function("id", vec![t], vec![p], ret, body)
}

// =============================================================================
// Overload choice
// =============================================================================

#[test]
fn test_overload_picks_matching_signature() {
    let mut call = NodeIndex::NONE;
    let mut program = Program::new();
    let unit = program.add_unit("a.ts", |b| {
        let mut statements = overloaded_f(b);
        let f = b.ident("f");
        let arg = b.string("a");
        call = b.call(f, vec![arg]);
        statements.push(b.var("r", NodeIndex::NONE, call));
        b.source_file(statements)
    });

    with_checker(&program, CompilationSettings::default(), |checker| {
        checker.check_program();
        assert!(checker.diagnostics().is_empty(), "{:?}", checker.diagnostics());
        assert_eq!(global_value_type(checker, "r"), TypeId::STRING);

        let signature = checker
            .call_signature_of(unit, call)
            .expect("call should record its signature");
        assert_eq!(checker.return_type(signature), TypeId::STRING);
    });
}

#[test]
fn test_overload_number_argument_picks_first_signature() {
    let program = single_unit(|b| {
        let mut statements = overloaded_f(b);
        let f = b.ident("f");
        let arg = b.num(1.0);
        let call = b.call(f, vec![arg]);
        statements.push(b.var("r", NodeIndex::NONE, call));
        b.source_file(statements)
    });

    with_checker(&program, CompilationSettings::default(), |checker| {
        checker.check_program();
        assert!(checker.diagnostics().is_empty());
        assert_eq!(global_value_type(checker, "r"), TypeId::NUMBER);
    });
}

#[test]
fn test_identical_parameters_beat_any_parameters() {
    // declare function g(x: any): number; declare function g(x: string): string;
    let program = single_unit(|b| {
        let any = b.any_type();
        let p = b.param("x", any);
        let ret = b.number_type();
        let loose = b.function("g", vec![], vec![p], ret, NodeIndex::NONE);
        let loose = b.declare(loose);

        let string = b.string_type();
        let p = b.param("x", string);
        let ret = b.string_type();
        let exact = b.function("g", vec![], vec![p], ret, NodeIndex::NONE);
        let exact = b.declare(exact);

        let g = b.ident("g");
        let arg = b.string("a");
        let call = b.call(g, vec![arg]);
        let r = b.var("r", NodeIndex::NONE, call);
        b.source_file(vec![loose, exact, r])
    });

    with_checker(&program, CompilationSettings::default(), |checker| {
        checker.check_program();
        assert!(checker.diagnostics().is_empty(), "{:?}", checker.diagnostics());
        assert_eq!(global_value_type(checker, "r"), TypeId::STRING);
    });
}

#[test]
fn test_no_applicable_overload() {
    let program = single_unit(|b| {
        let mut statements = overloaded_f(b);
        let f = b.ident("f");
        let arg = b.boolean(true);
        let call = b.call(f, vec![arg]);
        statements.push(b.expr_stmt(call));
        b.source_file(statements)
    });

    // f(x: any) is the implementation and not a candidate.
    assert_eq!(check_codes(&program), vec![2346]);
}

#[test]
fn test_single_signature_reports_the_argument() {
    let program = single_unit(|b| {
        let number = b.number_type();
        let p = b.param("x", number);
        let ret = b.void_type();
        let body = b.block(vec![]);
        let takes_number = b.function("n", vec![], vec![p], ret, body);
        let callee = b.ident("n");
        let arg = b.string("s");
        let call = b.call(callee, vec![arg]);
        let stmt = b.expr_stmt(call);
        b.source_file(vec![takes_number, stmt])
    });

    let diagnostics = check(&program, CompilationSettings::default());
    assert_eq!(codes(&diagnostics), vec![2345]);
    assert!(diagnostics[0].message_text.contains("string"));
}

#[test]
fn test_argument_count_mismatch_reports_no_match() {
    let program = single_unit(|b| {
        let mut statements = overloaded_f(b);
        let f = b.ident("f");
        let call = b.call(f, vec![]);
        statements.push(b.expr_stmt(call));
        b.source_file(statements)
    });

    assert_eq!(check_codes(&program), vec![2346]);
}

// =============================================================================
// Generic calls
// =============================================================================

#[test]
fn test_type_argument_inferred_from_argument() {
    let program = single_unit(|b| {
        let id = identity(b);
        let callee = b.ident("id");
        let arg = b.num(1.0);
        let call = b.call(callee, vec![arg]);
        let r = b.var("r", NodeIndex::NONE, call);
        b.source_file(vec![id, r])
    });

    with_checker(&program, CompilationSettings::default(), |checker| {
        checker.check_program();
        assert!(checker.diagnostics().is_empty(), "{:?}", checker.diagnostics());
        assert_eq!(global_value_type(checker, "r"), TypeId::NUMBER);
    });
}

#[test]
fn test_explicit_type_argument_checks_arguments() {
    let program = single_unit(|b| {
        let id = identity(b);
        let callee = b.ident("id");
        let string = b.string_type();
        let arg = b.num(1.0);
        let call = b.call_generic(callee, vec![string], vec![arg]);
        let stmt = b.expr_stmt(call);
        b.source_file(vec![id, stmt])
    });

    assert_eq!(check_codes(&program), vec![2345]);
}

#[test]
fn test_wrong_type_argument_count() {
    let program = single_unit(|b| {
        let id = identity(b);
        let callee = b.ident("id");
        let string = b.string_type();
        let number = b.number_type();
        let arg = b.num(1.0);
        let call = b.call_generic(callee, vec![string, number], vec![arg]);
        let stmt = b.expr_stmt(call);
        b.source_file(vec![id, stmt])
    });

    assert_eq!(check_codes(&program), vec![2558]);
}

#[test]
fn test_callback_parameter_sees_inferred_element_type() {
    // function map<T, U>(xs: T[], f: (x: T) => U): U[] { return null; }
    // var r = map([1, 2], x => "s");
    let program = single_unit(|b| {
        let t = b.type_param("T", NodeIndex::NONE);
        let u = b.type_param("U", NodeIndex::NONE);
        let t_ref = b.type_ref("T", vec![]);
        let xs_ty = b.array_type(t_ref);
        let xs = b.param("xs", xs_ty);
        let t_ref = b.type_ref("T", vec![]);
        let cb_param = b.param("x", t_ref);
        let u_ref = b.type_ref("U", vec![]);
        let cb_ty = b.function_type(vec![], vec![cb_param], u_ref);
        let f = b.param("f", cb_ty);
        let u_ref = b.type_ref("U", vec![]);
        let ret = b.array_type(u_ref);
        let null = b.null();
        let ret_stmt = b.return_stmt(null);
        let body = b.block(vec![ret_stmt]);
        let map = b.function("map", vec![t, u], vec![xs, f], ret, body);

        let callee = b.ident("map");
        let one = b.num(1.0);
        let two = b.num(2.0);
        let array = b.array(vec![one, two]);
        let x = b.param("x", NodeIndex::NONE);
        let s = b.string("s");
        let callback = b.arrow(vec![x], NodeIndex::NONE, s);
        let call = b.call(callee, vec![array, callback]);
        let r = b.var("r", NodeIndex::NONE, call);
        b.source_file(vec![map, r])
    });

    with_checker(&program, strict(), |checker| {
        checker.check_program();
        assert!(checker.diagnostics().is_empty(), "{:?}", checker.diagnostics());
        let r = global_value_type(checker, "r");
        assert_eq!(checker.symbols.array_element(r), Some(TypeId::STRING));
    });
}

#[test]
fn test_inferred_argument_violating_constraint() {
    // function g<T extends string>(x: T): T { return x; }  g(1);
    let program = single_unit(|b| {
        let constraint = b.string_type();
        let t = b.type_param("T", constraint);
        let t_ref = b.type_ref("T", vec![]);
        let p = b.param("x", t_ref);
        let ret = b.type_ref("T", vec![]);
        let x = b.ident("x");
        let ret_stmt = b.return_stmt(x);
        let body = b.block(vec![ret_stmt]);
        let g = b.function("g", vec![t], vec![p], ret, body);

        let callee = b.ident("g");
        let arg = b.num(1.0);
        let call = b.call(callee, vec![arg]);
        let stmt = b.expr_stmt(call);
        b.source_file(vec![g, stmt])
    });

    assert_eq!(check_codes(&program), vec![2344]);
}

#[test]
fn test_generic_class_construction_infers_from_constructor() {
    // class Box<T> { constructor(public value: T) {} }  var v = new Box("s").value;
    let program = single_unit(|b| {
        let t = b.type_param("T", NodeIndex::NONE);
        let t_ref = b.type_ref("T", vec![]);
        let value = b.property_param("value", tyre_syntax::Modifiers::PUBLIC, t_ref);
        let body = b.block(vec![]);
        let ctor = b.constructor(vec![value], body);
        let class = b.class("Box", vec![t], NodeIndex::NONE, vec![], vec![ctor]);

        let callee = b.ident("Box");
        let arg = b.string("s");
        let new = b.new_expr(callee, vec![], vec![arg]);
        let access = b.prop(new, "value");
        let v = b.var("v", NodeIndex::NONE, access);
        b.source_file(vec![class, v])
    });

    with_checker(&program, CompilationSettings::default(), |checker| {
        checker.check_program();
        assert!(checker.diagnostics().is_empty(), "{:?}", checker.diagnostics());
        assert_eq!(global_value_type(checker, "v"), TypeId::STRING);
    });
}

// =============================================================================
// Provisional callback typing
// =============================================================================

/// `declare function g(cb: (x: number) => string): string;
///  declare function g(cb: (x: string) => string): number;
///  var r = g(x => { var y = x; return y; });`
fn callback_overloads_with_local(b: &mut tyre_syntax::AstBuilder<'_>) -> Vec<NodeIndex> {
    let mut statements = Vec::new();
    for takes_number in [true, false] {
        let param_type = if takes_number { b.number_type() } else { b.string_type() };
        let x = b.param("x", param_type);
        let cb_ret = b.string_type();
        let cb_type = b.function_type(vec![], vec![x], cb_ret);
        let cb = b.param("cb", cb_type);
        let ret = if takes_number { b.string_type() } else { b.number_type() };
        let g = b.function("g", vec![], vec![cb], ret, NodeIndex::NONE);
        statements.push(b.declare(g));
    }

    let x_param = b.param("x", NodeIndex::NONE);
    let x = b.ident("x");
    let y_decl = b.var("y", NodeIndex::NONE, x);
    let y = b.ident("y");
    let ret = b.return_stmt(y);
    let body = b.block(vec![y_decl, ret]);
    let callback = b.arrow(vec![x_param], NodeIndex::NONE, body);
    let g = b.ident("g");
    let call = b.call(g, vec![callback]);
    statements.push(b.var("r", NodeIndex::NONE, call));
    statements
}

#[test]
fn test_callback_locals_are_retyped_for_each_candidate() {
    let program = single_unit(|b| {
        let statements = callback_overloads_with_local(b);
        b.source_file(statements)
    });

    with_checker(&program, CompilationSettings::default(), |checker| {
        checker.check_program();
        assert!(checker.diagnostics().is_empty(), "{:?}", checker.diagnostics());
        assert_eq!(global_value_type(checker, "r"), TypeId::NUMBER);
    });
}

#[test]
fn test_callback_local_takes_type_from_chosen_signature() {
    let program = single_unit(|b| {
        let statements = callback_overloads_with_local(b);
        b.source_file(statements)
    });

    with_checker(&program, CompilationSettings::default(), |checker| {
        // Resolve mode first: the call commits outside of any check pass.
        assert_eq!(global_value_type(checker, "r"), TypeId::NUMBER);
        checker.check_program();
        assert!(checker.diagnostics().is_empty(), "{:?}", checker.diagnostics());

        let y = checker.program.interner().lookup("y").expect("interned");
        let y_decl = (0..checker.declarations.len() as u32)
            .map(tyre_binder::DeclId)
            .find(|&id| checker.declarations.get(id).name == y)
            .expect("y is declared");
        let value = checker.value_of_declaration(y_decl).expect("y is a value");
        assert_eq!(checker.value_type(value), TypeId::STRING);
    });
}

#[test]
fn test_repeated_resolution_selects_the_same_overload() {
    let mut call = NodeIndex::NONE;
    let mut program = Program::new();
    let unit = program.add_unit("a.ts", |b| {
        let mut statements = overloaded_f(b);
        let f = b.ident("f");
        let arg = b.string("a");
        call = b.call(f, vec![arg]);
        statements.push(b.expr_stmt(call));
        b.source_file(statements)
    });

    with_checker(&program, CompilationSettings::default(), |checker| {
        let first = checker.resolve(unit, call);
        let signature = checker.call_signature_of(unit, call).expect("signature recorded");
        assert_eq!(first, TypeId::STRING);

        for _ in 0..2 {
            checker.check_program();
            assert_eq!(checker.type_of_node(unit, call), Some(first));
            assert_eq!(checker.call_signature_of(unit, call), Some(signature));
        }
        assert!(checker.diagnostics().is_empty(), "{:?}", checker.diagnostics());
    });
}
