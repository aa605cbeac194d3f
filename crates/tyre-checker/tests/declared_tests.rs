//! Lazy declaration resolution: members, heritage, inheritance, aliases,
//! modules, enums and generic specialization.

use crate::test_utils::*;
use tyre_binder::{SymbolFlags, TypeId, TypeKind};
use tyre_common::CompilationSettings;
use tyre_solver::{TypeDatabase, find_member, is_subtype};
use tyre_syntax::{Modifiers, NodeIndex, Program};

fn member_type(checker: &mut crate::state::CheckerState<'_>, ty: TypeId, name: &str) -> Option<TypeId> {
    let atom = checker.program.interner().lookup(name)?;
    let member = find_member(checker, ty, atom)?;
    Some(checker.value_type(member))
}

// =============================================================================
// Classes and interfaces
// =============================================================================

#[test]
fn test_class_members_resolve_on_demand() {
    // class C { x: number; y = "s"; m() { return 1; } }
    let program = single_unit(|b| {
        let number = b.number_type();
        let x = b.property("x", Modifiers::empty(), number, NodeIndex::NONE);
        let s = b.string("s");
        let y = b.property("y", Modifiers::empty(), NodeIndex::NONE, s);
        let one = b.num(1.0);
        let ret = b.return_stmt(one);
        let body = b.block(vec![ret]);
        let m = b.method("m", Modifiers::empty(), vec![], vec![], NodeIndex::NONE, body);
        let class = b.class("C", vec![], NodeIndex::NONE, vec![], vec![x, y, m]);
        b.source_file(vec![class])
    });

    with_checker(&program, CompilationSettings::default(), |checker| {
        let c = global_type(checker, "C");
        assert_eq!(member_type(checker, c, "x"), Some(TypeId::NUMBER));
        assert_eq!(member_type(checker, c, "y"), Some(TypeId::STRING));

        let m = member_type(checker, c, "m").expect("method member");
        let signatures = checker.symbols.ty(m).call_signatures.clone();
        assert_eq!(signatures.len(), 1);
        assert_eq!(checker.return_type(signatures[0]), TypeId::NUMBER);
        // Nothing was checked.
        assert!(checker.diagnostics().is_empty());
    });
}

#[test]
fn test_static_members_live_on_the_constructor_type() {
    // class C { static s: number; }  var v = C.s;
    let program = single_unit(|b| {
        let number = b.number_type();
        let s = b.property("s", Modifiers::STATIC, number, NodeIndex::NONE);
        let class = b.class("C", vec![], NodeIndex::NONE, vec![], vec![s]);
        let c = b.ident("C");
        let access = b.prop(c, "s");
        let v = b.var("v", NodeIndex::NONE, access);
        b.source_file(vec![class, v])
    });

    with_checker(&program, CompilationSettings::default(), |checker| {
        checker.check_program();
        assert!(checker.diagnostics().is_empty(), "{:?}", checker.diagnostics());
        assert_eq!(global_value_type(checker, "v"), TypeId::NUMBER);
        let instance = global_type(checker, "C");
        assert_eq!(member_type(checker, instance, "s"), None);
    });
}

#[test]
fn test_derived_class_inherits_base_members() {
    // class A { x: number; y: number; }  class B extends A { y: number; z: string; }
    let program = single_unit(|b| {
        let number = b.number_type();
        let x = b.property("x", Modifiers::empty(), number, NodeIndex::NONE);
        let number = b.number_type();
        let y = b.property("y", Modifiers::empty(), number, NodeIndex::NONE);
        let a = b.class("A", vec![], NodeIndex::NONE, vec![], vec![x, y]);

        let number = b.number_type();
        let y = b.property("y", Modifiers::empty(), number, NodeIndex::NONE);
        let string = b.string_type();
        let z = b.property("z", Modifiers::empty(), string, NodeIndex::NONE);
        let base = b.type_ref("A", vec![]);
        let derived = b.class("B", vec![], base, vec![], vec![y, z]);
        b.source_file(vec![a, derived])
    });

    with_checker(&program, CompilationSettings::default(), |checker| {
        let a = global_type(checker, "A");
        let derived = global_type(checker, "B");
        checker.resolve_type(derived);
        assert_eq!(checker.symbols.ty(derived).extends, vec![a]);
        assert_eq!(member_type(checker, derived, "x"), Some(TypeId::NUMBER));
        assert_eq!(member_type(checker, derived, "z"), Some(TypeId::STRING));

        // The derived declaration of `y` wins.
        let y = checker.program.interner().lookup("y").expect("interned");
        let own = find_member(checker, derived, y).expect("y");
        assert_eq!(checker.symbols.value(own).container, Some(derived));
    });
}

#[test]
fn test_inheritance_deferred_while_base_resolves() {
    // class A { x: number = 1; y = new B().x; }  class B extends A {}
    let program = single_unit(|b| {
        let number = b.number_type();
        let one = b.num(1.0);
        let x = b.property("x", Modifiers::empty(), number, one);
        let callee = b.ident("B");
        let new = b.new_expr(callee, vec![], vec![]);
        let access = b.prop(new, "x");
        let y = b.property("y", Modifiers::empty(), NodeIndex::NONE, access);
        let a = b.class("A", vec![], NodeIndex::NONE, vec![], vec![x, y]);
        let base = b.type_ref("A", vec![]);
        let derived = b.class("B", vec![], base, vec![], vec![]);
        b.source_file(vec![a, derived])
    });

    with_checker(&program, CompilationSettings::default(), |checker| {
        checker.check_program();
        assert!(checker.deferred.is_empty());
        let derived = global_type(checker, "B");
        assert!(
            !checker
                .symbols
                .ty(derived)
                .flags
                .contains(SymbolFlags::INHERITANCE_PENDING)
        );
        assert_eq!(member_type(checker, derived, "x"), Some(TypeId::NUMBER));
    });
}

#[test]
fn test_interface_declarations_merge() {
    // interface I { a: number; }  interface I { b: string; }
    let program = single_unit(|b| {
        let number = b.number_type();
        let a = b.property_signature("a", number);
        let first = b.interface("I", vec![], vec![], vec![a]);
        let string = b.string_type();
        let member = b.property_signature("b", string);
        let second = b.interface("I", vec![], vec![], vec![member]);
        b.source_file(vec![first, second])
    });

    with_checker(&program, CompilationSettings::default(), |checker| {
        let i = global_type(checker, "I");
        assert_eq!(checker.symbols.ty(i).declarations.len(), 2);
        assert_eq!(member_type(checker, i, "a"), Some(TypeId::NUMBER));
        assert_eq!(member_type(checker, i, "b"), Some(TypeId::STRING));
    });
}

#[test]
fn test_interface_inherits_call_signatures() {
    // interface F { (x: number): string; }  interface G extends F {}
    let program = single_unit(|b| {
        let number = b.number_type();
        let p = b.param("x", number);
        let ret = b.string_type();
        let call = b.call_signature(vec![], vec![p], ret);
        let f = b.interface("F", vec![], vec![], vec![call]);
        let base = b.type_ref("F", vec![]);
        let g = b.interface("G", vec![], vec![base], vec![]);
        b.source_file(vec![f, g])
    });

    with_checker(&program, CompilationSettings::default(), |checker| {
        let f = global_type(checker, "F");
        let g = global_type(checker, "G");
        checker.resolve_type(f);
        checker.resolve_type(g);
        assert_eq!(checker.symbols.ty(g).call_signatures, checker.symbols.ty(f).call_signatures);
    });
}

#[test]
fn test_class_base_cycle_is_flagged() {
    // class A extends B {}  class B extends A {}
    let program = single_unit(|b| {
        let b_ref = b.type_ref("B", vec![]);
        let a = b.class("A", vec![], b_ref, vec![], vec![]);
        let a_ref = b.type_ref("A", vec![]);
        let class_b = b.class("B", vec![], a_ref, vec![], vec![]);
        b.source_file(vec![a, class_b])
    });

    with_checker(&program, CompilationSettings::default(), |checker| {
        let a = global_type(checker, "A");
        let class_b = global_type(checker, "B");
        checker.resolve_type(a);
        checker.resolve_type(class_b);
        assert!(checker.symbols.ty(a).flags.contains(SymbolFlags::BASE_CYCLE));
        assert!(checker.symbols.ty(class_b).flags.contains(SymbolFlags::BASE_CYCLE));

        checker.check_program();
        assert_eq!(codes(checker.diagnostics()), vec![2310, 2310]);
    });
}

#[test]
fn test_class_extending_a_specialized_generic_base() {
    // class A<T> { v: T }  class B extends A<number> {}
    // var an: A<number>;  var as: A<string>;
    let program = single_unit(|b| {
        let t = b.type_param("T", NodeIndex::NONE);
        let t_ref = b.type_ref("T", vec![]);
        let v = b.property("v", Modifiers::empty(), t_ref, NodeIndex::NONE);
        let a = b.class("A", vec![t], NodeIndex::NONE, vec![], vec![v]);
        let number = b.number_type();
        let base = b.type_ref("A", vec![number]);
        let derived = b.class("B", vec![], base, vec![], vec![]);
        let number = b.number_type();
        let by_number = b.type_ref("A", vec![number]);
        let an = b.var("an", by_number, NodeIndex::NONE);
        let string = b.string_type();
        let by_string = b.type_ref("A", vec![string]);
        let as_ = b.var("as", by_string, NodeIndex::NONE);
        b.source_file(vec![a, derived, an, as_])
    });

    with_checker(&program, CompilationSettings::default(), |checker| {
        let derived = global_type(checker, "B");
        checker.resolve_type(derived);
        assert_eq!(member_type(checker, derived, "v"), Some(TypeId::NUMBER));

        let a_number = global_value_type(checker, "an");
        let a_string = global_value_type(checker, "as");
        assert!(is_subtype(checker, derived, a_number));
        assert!(!is_subtype(checker, derived, a_string));

        checker.check_program();
        assert!(checker.diagnostics().is_empty(), "{:?}", checker.diagnostics());
    });
}

// =============================================================================
// Aliases
// =============================================================================

#[test]
fn test_alias_resolves_to_target() {
    let program = single_unit(|b| {
        let number = b.number_type();
        let array = b.array_type(number);
        let alias = b.type_alias("Numbers", array);
        b.source_file(vec![alias])
    });

    with_checker(&program, CompilationSettings::default(), |checker| {
        let alias = global_type(checker, "Numbers");
        assert!(matches!(checker.symbols.kind(alias), TypeKind::Alias));
        let target = checker.resolve_type(alias);
        assert_eq!(checker.symbols.array_element(target), Some(TypeId::NUMBER));
    });
}

#[test]
fn test_alias_cycle_resolves_to_error() {
    let program = single_unit(|b| {
        let b_ref = b.type_ref("B", vec![]);
        let a = b.type_alias("A", b_ref);
        let a_ref = b.type_ref("A", vec![]);
        let alias_b = b.type_alias("B", a_ref);
        b.source_file(vec![a, alias_b])
    });

    with_checker(&program, CompilationSettings::default(), |checker| {
        let a = global_type(checker, "A");
        let alias_b = global_type(checker, "B");
        assert_eq!(checker.resolve_type(a), TypeId::ERROR);
        assert_eq!(checker.resolve_type(alias_b), TypeId::ERROR);
        assert!(checker.symbols.ty(a).flags.contains(SymbolFlags::ALIAS_CYCLE));
        assert!(checker.symbols.ty(alias_b).flags.contains(SymbolFlags::ALIAS_CYCLE));
    });
}

// =============================================================================
// Modules and enums
// =============================================================================

#[test]
fn test_module_exports_are_reachable_by_qualified_name() {
    // module M { export class C { x: number; } export var v = 1; }
    // var c: M.C;  var n = M.v;
    let program = single_unit(|b| {
        let number = b.number_type();
        let x = b.property("x", Modifiers::empty(), number, NodeIndex::NONE);
        let class = b.class("C", vec![], NodeIndex::NONE, vec![], vec![x]);
        let class = b.export(class);
        let one = b.num(1.0);
        let v = b.var("v", NodeIndex::NONE, one);
        let v = b.export(v);
        let module = b.module("M", vec![class, v]);

        let qualified = b.type_ref("M.C", vec![]);
        let c = b.var("c", qualified, NodeIndex::NONE);
        let m = b.ident("M");
        let access = b.prop(m, "v");
        let n = b.var("n", NodeIndex::NONE, access);
        b.source_file(vec![module, c, n])
    });

    with_checker(&program, CompilationSettings::default(), |checker| {
        checker.check_program();
        assert!(checker.diagnostics().is_empty(), "{:?}", checker.diagnostics());
        assert_eq!(global_value_type(checker, "n"), TypeId::NUMBER);
        let c = global_value_type(checker, "c");
        assert_eq!(member_type(checker, c, "x"), Some(TypeId::NUMBER));
    });
}

#[test]
fn test_unexported_module_member_is_hidden() {
    let program = single_unit(|b| {
        let class = b.class("C", vec![], NodeIndex::NONE, vec![], vec![]);
        let module = b.module("M", vec![class]);
        let qualified = b.type_ref("M.C", vec![]);
        let c = b.var("c", qualified, NodeIndex::NONE);
        b.source_file(vec![module, c])
    });

    assert_eq!(check_codes(&program), vec![2305]);
}

#[test]
fn test_enum_members_have_the_enum_type() {
    // enum E { A, B }  var e = E.A;  var n = E.B + 1;
    let program = single_unit(|b| {
        let e = b.enum_decl("E", &["A", "B"]);
        let e_ref = b.ident("E");
        let access = b.prop(e_ref, "A");
        let v = b.var("e", NodeIndex::NONE, access);
        let e_ref = b.ident("E");
        let access = b.prop(e_ref, "B");
        let one = b.num(1.0);
        let sum = b.binary(access, tyre_syntax::BinaryOperator::Add, one);
        let n = b.var("n", NodeIndex::NONE, sum);
        b.source_file(vec![e, v, n])
    });

    with_checker(&program, CompilationSettings::default(), |checker| {
        checker.check_program();
        assert!(checker.diagnostics().is_empty(), "{:?}", checker.diagnostics());
        let enum_type = global_type(checker, "E");
        assert_eq!(global_value_type(checker, "e"), enum_type);
        assert_eq!(global_value_type(checker, "n"), TypeId::NUMBER);
    });
}

// =============================================================================
// Generic specialization
// =============================================================================

#[test]
fn test_specialized_interface_members() {
    // interface G<T> { x: T; xs: T[]; }  var g: G<string>;
    let program = single_unit(|b| {
        let t = b.type_param("T", NodeIndex::NONE);
        let t_ref = b.type_ref("T", vec![]);
        let x = b.property_signature("x", t_ref);
        let t_ref = b.type_ref("T", vec![]);
        let array = b.array_type(t_ref);
        let xs = b.property_signature("xs", array);
        let g = b.interface("G", vec![t], vec![], vec![x, xs]);
        let string = b.string_type();
        let reference = b.type_ref("G", vec![string]);
        let v = b.var("g", reference, NodeIndex::NONE);
        b.source_file(vec![g, v])
    });

    with_checker(&program, CompilationSettings::default(), |checker| {
        let specialized = global_value_type(checker, "g");
        let generic = global_type(checker, "G");
        assert_ne!(specialized, generic);
        assert_eq!(checker.symbols.ty(specialized).root(specialized), generic);
        assert_eq!(member_type(checker, specialized, "x"), Some(TypeId::STRING));
        let xs = member_type(checker, specialized, "xs").expect("xs");
        assert_eq!(checker.symbols.array_element(xs), Some(TypeId::STRING));
    });
}

#[test]
fn test_same_specialization_is_shared() {
    let mut program = Program::new();
    program.add_unit("a.ts", |b| {
        let t = b.type_param("T", NodeIndex::NONE);
        let t_ref = b.type_ref("T", vec![]);
        let x = b.property_signature("x", t_ref);
        let g = b.interface("G", vec![t], vec![], vec![x]);
        let number = b.number_type();
        let first = b.type_ref("G", vec![number]);
        let a = b.var("a", first, NodeIndex::NONE);
        let number = b.number_type();
        let second = b.type_ref("G", vec![number]);
        let c = b.var("c", second, NodeIndex::NONE);
        b.source_file(vec![g, a, c])
    });

    with_checker(&program, CompilationSettings::default(), |checker| {
        let a = global_value_type(checker, "a");
        let c = global_value_type(checker, "c");
        assert_eq!(a, c);
    });
}
