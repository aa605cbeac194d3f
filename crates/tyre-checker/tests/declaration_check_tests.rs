//! Declaration-level diagnostics: variables, functions, overload lists,
//! classes, interfaces, index signatures and aliases.

use crate::test_utils::*;
use tyre_common::CompilationSettings;
use tyre_syntax::{AstBuilder, Modifiers, NodeIndex};

fn script_codes(settings: CompilationSettings, build: impl FnOnce(&mut AstBuilder<'_>) -> Vec<NodeIndex>) -> Vec<u32> {
    let program = single_unit(|b| {
        let statements = build(b);
        b.source_file(statements)
    });
    codes(&check(&program, settings))
}

fn default_codes(build: impl FnOnce(&mut AstBuilder<'_>) -> Vec<NodeIndex>) -> Vec<u32> {
    script_codes(CompilationSettings::default(), build)
}

fn strict_codes(build: impl FnOnce(&mut AstBuilder<'_>) -> Vec<NodeIndex>) -> Vec<u32> {
    script_codes(strict(), build)
}

/// `{ x: <ty> }` as an interface member list.
fn x_member(b: &mut AstBuilder<'_>, ty: NodeIndex) -> NodeIndex {
    b.property_signature("x", ty)
}

// =============================================================================
// Variables
// =============================================================================

#[test]
fn test_redeclared_variable_with_different_type() {
    let codes = default_codes(|b| {
        let number = b.number_type();
        let first = b.var("x", number, NodeIndex::NONE);
        let string = b.string_type();
        let second = b.var("x", string, NodeIndex::NONE);
        vec![first, second]
    });
    assert_eq!(codes, vec![2403]);
}

#[test]
fn test_redeclared_variable_points_at_first_declaration() {
    let (mut first, mut second) = (NodeIndex::NONE, NodeIndex::NONE);
    let program = single_unit(|b| {
        let number = b.number_type();
        first = b.var("x", number, NodeIndex::NONE);
        let string = b.string_type();
        second = b.var("x", string, NodeIndex::NONE);
        b.source_file(vec![first, second])
    });
    let unit = program.unit_by_path("a.ts").expect("unit");
    let arena = program.unit(unit).arena();

    let diagnostics = check(&program, CompilationSettings::default());
    assert_eq!(codes(&diagnostics), vec![2403]);
    let diagnostic = &diagnostics[0];
    assert_eq!(diagnostic.start, arena.span(second).start);
    assert_eq!(diagnostic.related_information.len(), 1);

    let related = &diagnostic.related_information[0];
    assert_eq!(related.code, 6203);
    assert_eq!(related.file, "a.ts");
    assert_eq!(related.start, arena.span(first).start);
    assert_eq!(related.message_text, "'x' was also declared here.");
}

#[test]
fn test_redeclared_variable_with_same_type() {
    let codes = default_codes(|b| {
        let number = b.number_type();
        let first = b.var("x", number, NodeIndex::NONE);
        let one = b.num(1.0);
        let second = b.var("x", NodeIndex::NONE, one);
        vec![first, second]
    });
    assert!(codes.is_empty());
}

#[test]
fn test_initializer_not_assignable_to_annotation() {
    let codes = default_codes(|b| {
        let number = b.number_type();
        let s = b.string("s");
        vec![b.var("x", number, s)]
    });
    assert_eq!(codes, vec![2322]);
}

#[test]
fn test_variable_without_type_or_initializer() {
    let codes = strict_codes(|b| vec![b.var("x", NodeIndex::NONE, NodeIndex::NONE)]);
    assert_eq!(codes, vec![7005]);

    let codes = strict_codes(|b| {
        let null = b.null();
        vec![b.var("x", NodeIndex::NONE, null)]
    });
    assert_eq!(codes, vec![7005]);

    let codes = default_codes(|b| vec![b.var("x", NodeIndex::NONE, NodeIndex::NONE)]);
    assert!(codes.is_empty());
}

// =============================================================================
// Functions and overload lists
// =============================================================================

#[test]
fn test_overload_without_implementation() {
    let codes = default_codes(|b| {
        let number = b.number_type();
        let p = b.param("x", number);
        let ret = b.void_type();
        vec![b.function("f", vec![], vec![p], ret, NodeIndex::NONE)]
    });
    assert_eq!(codes, vec![2391]);
}

#[test]
fn test_ambient_overload_needs_no_implementation() {
    let codes = default_codes(|b| {
        let number = b.number_type();
        let p = b.param("x", number);
        let ret = b.void_type();
        let f = b.function("f", vec![], vec![p], ret, NodeIndex::NONE);
        vec![b.declare(f)]
    });
    assert!(codes.is_empty());
}

#[test]
fn test_overload_incompatible_with_implementation() {
    // function f(x: string): void;  function f(x: number) {}
    let codes = default_codes(|b| {
        let string = b.string_type();
        let p = b.param("x", string);
        let ret = b.void_type();
        let overload = b.function("f", vec![], vec![p], ret, NodeIndex::NONE);
        let number = b.number_type();
        let p = b.param("x", number);
        let body = b.block(vec![]);
        let implementation = b.function("f", vec![], vec![p], NodeIndex::NONE, body);
        vec![overload, implementation]
    });
    assert_eq!(codes, vec![2394]);
}

#[test]
fn test_compatible_overload_list() {
    let codes = default_codes(|b| {
        let string = b.string_type();
        let p = b.param("x", string);
        let ret = b.void_type();
        let overload = b.function("f", vec![], vec![p], ret, NodeIndex::NONE);
        let any = b.any_type();
        let p = b.param("x", any);
        let body = b.block(vec![]);
        let implementation = b.function("f", vec![], vec![p], NodeIndex::NONE, body);
        vec![overload, implementation]
    });
    assert!(codes.is_empty());
}

#[test]
fn test_function_with_return_type_but_no_return() {
    let codes = default_codes(|b| {
        let number = b.number_type();
        let body = b.block(vec![]);
        vec![b.function("f", vec![], vec![], number, body)]
    });
    assert_eq!(codes, vec![2355]);
}

#[test]
fn test_return_not_assignable_to_annotation() {
    let codes = default_codes(|b| {
        let number = b.number_type();
        let s = b.string("s");
        let ret = b.return_stmt(s);
        let body = b.block(vec![ret]);
        vec![b.function("f", vec![], vec![], number, body)]
    });
    assert_eq!(codes, vec![2322]);
}

#[test]
fn test_implicit_any_return_type() {
    let codes = strict_codes(|b| {
        let null = b.null();
        let ret = b.return_stmt(null);
        let body = b.block(vec![ret]);
        vec![b.function("f", vec![], vec![], NodeIndex::NONE, body)]
    });
    assert_eq!(codes, vec![7010]);
}

#[test]
fn test_rest_parameter_must_be_array() {
    let codes = default_codes(|b| {
        let number = b.number_type();
        let rest = b.rest_param("xs", number);
        let body = b.block(vec![]);
        vec![b.function("f", vec![], vec![rest], NodeIndex::NONE, body)]
    });
    assert_eq!(codes, vec![2370]);
}

#[test]
fn test_unannotated_parameter_is_implicit_any() {
    let codes = strict_codes(|b| {
        let x = b.param("x", NodeIndex::NONE);
        let body = b.block(vec![]);
        vec![b.function("f", vec![], vec![x], NodeIndex::NONE, body)]
    });
    assert_eq!(codes, vec![7006]);
}

#[test]
fn test_super_call_outside_constructor() {
    let codes = default_codes(|b| {
        let sup = b.super_();
        let call = b.call(sup, vec![]);
        let stmt = b.expr_stmt(call);
        let body = b.block(vec![stmt]);
        vec![b.function("f", vec![], vec![], NodeIndex::NONE, body)]
    });
    assert_eq!(codes, vec![2337]);
}

// =============================================================================
// Classes
// =============================================================================

/// `class A { x: number; }`
fn base_class(b: &mut AstBuilder<'_>) -> NodeIndex {
    let number = b.number_type();
    let x = b.property("x", Modifiers::empty(), number, NodeIndex::NONE);
    b.class("A", vec![], NodeIndex::NONE, vec![], vec![x])
}

#[test]
fn test_derived_constructor_must_call_super() {
    let codes = default_codes(|b| {
        let a = base_class(b);
        let body = b.block(vec![]);
        let ctor = b.constructor(vec![], body);
        let base = b.type_ref("A", vec![]);
        let derived = b.class("B", vec![], base, vec![], vec![ctor]);
        vec![a, derived]
    });
    assert_eq!(codes, vec![2377]);
}

#[test]
fn test_derived_constructor_calling_super() {
    let codes = default_codes(|b| {
        let a = base_class(b);
        let sup = b.super_();
        let call = b.call(sup, vec![]);
        let stmt = b.expr_stmt(call);
        let body = b.block(vec![stmt]);
        let ctor = b.constructor(vec![], body);
        let base = b.type_ref("A", vec![]);
        let derived = b.class("B", vec![], base, vec![], vec![ctor]);
        vec![a, derived]
    });
    assert!(codes.is_empty());
}

#[test]
fn test_class_extending_an_interface() {
    let codes = default_codes(|b| {
        let i = b.interface("I", vec![], vec![], vec![]);
        let base = b.type_ref("I", vec![]);
        let c = b.class("C", vec![], base, vec![], vec![]);
        vec![i, c]
    });
    assert_eq!(codes, vec![2311]);
}

#[test]
fn test_interface_extending_a_non_object_type() {
    // type Numbers = number[];  interface I extends Numbers {}
    let codes = default_codes(|b| {
        let number = b.number_type();
        let array = b.array_type(number);
        let alias = b.type_alias("Numbers", array);
        let base = b.type_ref("Numbers", vec![]);
        let i = b.interface("I", vec![], vec![base], vec![]);
        vec![alias, i]
    });
    assert_eq!(codes, vec![2312]);
}

#[test]
fn test_class_implementing_a_non_object_type() {
    // type Numbers = number[];  class C implements Numbers {}
    let codes = default_codes(|b| {
        let number = b.number_type();
        let array = b.array_type(number);
        let alias = b.type_alias("Numbers", array);
        let implemented = b.type_ref("Numbers", vec![]);
        let c = b.class("C", vec![], NodeIndex::NONE, vec![implemented], vec![]);
        vec![alias, c]
    });
    assert_eq!(codes, vec![2422]);
}

#[test]
fn test_class_extending_itself_through_an_alias() {
    // class C extends Self {}  type Self = C;
    let codes = default_codes(|b| {
        let base = b.type_ref("Self", vec![]);
        let c = b.class("C", vec![], base, vec![], vec![]);
        let target = b.type_ref("C", vec![]);
        let alias = b.type_alias("Self", target);
        vec![c, alias]
    });
    assert_eq!(codes, vec![2310]);
}

#[test]
fn test_class_incorrectly_extends_base() {
    // class B extends A { x: string; }
    let codes = default_codes(|b| {
        let a = base_class(b);
        let string = b.string_type();
        let x = b.property("x", Modifiers::empty(), string, NodeIndex::NONE);
        let base = b.type_ref("A", vec![]);
        let derived = b.class("B", vec![], base, vec![], vec![x]);
        vec![a, derived]
    });
    assert_eq!(codes, vec![2415]);
}

#[test]
fn test_class_incorrectly_implements_interface() {
    let codes = default_codes(|b| {
        let number = b.number_type();
        let member = x_member(b, number);
        let i = b.interface("I", vec![], vec![], vec![member]);
        let implemented = b.type_ref("I", vec![]);
        let c = b.class("C", vec![], NodeIndex::NONE, vec![implemented], vec![]);
        vec![i, c]
    });
    assert_eq!(codes, vec![2420]);
}

#[test]
fn test_class_implementing_interface_structurally() {
    let codes = default_codes(|b| {
        let number = b.number_type();
        let member = x_member(b, number);
        let i = b.interface("I", vec![], vec![], vec![member]);
        let number = b.number_type();
        let x = b.property("x", Modifiers::empty(), number, NodeIndex::NONE);
        let implemented = b.type_ref("I", vec![]);
        let c = b.class("C", vec![], NodeIndex::NONE, vec![implemented], vec![x]);
        vec![i, c]
    });
    assert!(codes.is_empty());
}

#[test]
fn test_untyped_property_is_implicit_any() {
    let codes = strict_codes(|b| {
        let x = b.property("x", Modifiers::empty(), NodeIndex::NONE, NodeIndex::NONE);
        vec![b.class("C", vec![], NodeIndex::NONE, vec![], vec![x])]
    });
    assert_eq!(codes, vec![7008]);
}

#[test]
fn test_method_overload_without_implementation() {
    let codes = default_codes(|b| {
        let ret = b.void_type();
        let m = b.method("m", Modifiers::empty(), vec![], vec![], ret, NodeIndex::NONE);
        vec![b.class("C", vec![], NodeIndex::NONE, vec![], vec![m])]
    });
    assert_eq!(codes, vec![2391]);
}

// =============================================================================
// Interfaces and index signatures
// =============================================================================

#[test]
fn test_interface_incorrectly_extends_interface() {
    let codes = default_codes(|b| {
        let number = b.number_type();
        let member = x_member(b, number);
        let base = b.interface("A", vec![], vec![], vec![member]);
        let string = b.string_type();
        let member = x_member(b, string);
        let a_ref = b.type_ref("A", vec![]);
        let derived = b.interface("B", vec![], vec![a_ref], vec![member]);
        vec![base, derived]
    });
    assert_eq!(codes, vec![2430]);
}

#[test]
fn test_self_referential_base_reported_once() {
    // interface I extends I {} declared twice merges into one cyclic type.
    let codes = default_codes(|b| {
        let own = b.type_ref("I", vec![]);
        let first = b.interface("I", vec![], vec![own], vec![]);
        let own = b.type_ref("I", vec![]);
        let second = b.interface("I", vec![], vec![own], vec![]);
        vec![first, second]
    });
    assert_eq!(codes, vec![2310]);
}

#[test]
fn test_property_not_assignable_to_string_index() {
    // interface I { [k: string]: number; x: string; }
    let codes = default_codes(|b| {
        let key = b.string_type();
        let value = b.number_type();
        let index = b.index_signature("k", key, value);
        let string = b.string_type();
        let member = x_member(b, string);
        vec![b.interface("I", vec![], vec![], vec![index, member])]
    });
    assert_eq!(codes, vec![2411]);
}

#[test]
fn test_numeric_index_not_assignable_to_string_index() {
    let codes = default_codes(|b| {
        let key = b.string_type();
        let value = b.number_type();
        let by_string = b.index_signature("k", key, value);
        let key = b.number_type();
        let value = b.string_type();
        let by_number = b.index_signature("n", key, value);
        vec![b.interface("I", vec![], vec![], vec![by_string, by_number])]
    });
    assert_eq!(codes, vec![2413]);
}

// =============================================================================
// Type references and aliases
// =============================================================================

#[test]
fn test_circular_aliases() {
    let codes = default_codes(|b| {
        let b_ref = b.type_ref("B", vec![]);
        let a = b.type_alias("A", b_ref);
        let a_ref = b.type_ref("A", vec![]);
        let alias_b = b.type_alias("B", a_ref);
        vec![a, alias_b]
    });
    assert_eq!(codes, vec![2456, 2456]);
}

#[test]
fn test_alias_to_interface_is_transparent() {
    let codes = default_codes(|b| {
        let number = b.number_type();
        let member = x_member(b, number);
        let i = b.interface("I", vec![], vec![], vec![member]);
        let i_ref = b.type_ref("I", vec![]);
        let alias = b.type_alias("J", i_ref);
        let j_ref = b.type_ref("J", vec![]);
        let one = b.num(1.0);
        let object = b.object(vec![("x", one)]);
        let v = b.var("v", j_ref, object);
        vec![i, alias, v]
    });
    assert!(codes.is_empty());
}

#[test]
fn test_generic_type_reference_arity() {
    // interface G<T> { x: T; }  var a: G;  var b: G<number, string>;
    let codes = default_codes(|b| {
        let t = b.type_param("T", NodeIndex::NONE);
        let t_ref = b.type_ref("T", vec![]);
        let member = x_member(b, t_ref);
        let g = b.interface("G", vec![t], vec![], vec![member]);
        let bare = b.type_ref("G", vec![]);
        let a = b.var("a", bare, NodeIndex::NONE);
        let number = b.number_type();
        let string = b.string_type();
        let too_many = b.type_ref("G", vec![number, string]);
        let c = b.var("c", too_many, NodeIndex::NONE);
        vec![g, a, c]
    });
    assert_eq!(codes, vec![2314, 2558]);
}

#[test]
fn test_type_arguments_on_non_generic_type() {
    let codes = default_codes(|b| {
        let i = b.interface("I", vec![], vec![], vec![]);
        let number = b.number_type();
        let reference = b.type_ref("I", vec![number]);
        let v = b.var("v", reference, NodeIndex::NONE);
        vec![i, v]
    });
    assert_eq!(codes, vec![2315]);
}

#[test]
fn test_type_argument_violating_constraint() {
    // interface G<T extends string> {}  var g: G<number>;
    let codes = default_codes(|b| {
        let constraint = b.string_type();
        let t = b.type_param("T", constraint);
        let g = b.interface("G", vec![t], vec![], vec![]);
        let number = b.number_type();
        let reference = b.type_ref("G", vec![number]);
        let v = b.var("v", reference, NodeIndex::NONE);
        vec![g, v]
    });
    assert_eq!(codes, vec![2344]);
}

#[test]
fn test_unknown_type_name() {
    let codes = default_codes(|b| {
        let reference = b.type_ref("Missing", vec![]);
        vec![b.var("v", reference, NodeIndex::NONE)]
    });
    assert_eq!(codes, vec![2304]);
}
