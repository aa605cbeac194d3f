//! Class and interface declarations.
//!
//! Heritage clauses are checked here rather than during resolution: the
//! resolver silently drops bases that are not classes or interfaces, and the
//! member-wise comparison against each base runs with the nominal shortcut
//! disabled so a class that names its base is still checked structurally.

use crate::context::ContextFrame;
use crate::state::CheckerState;
use tracing::debug;
use tyre_binder::{SymbolFlags, TypeId, ValueId};
use tyre_common::diagnostics::diagnostic_codes;
use tyre_solver::{
    IndexKind, RelationChecker, RelationKind, TypeComparisonInfo, TypeDatabase, index_signature_of,
    is_assignable,
};
use tyre_syntax::{ClassData, FunctionKind, InterfaceData, NodeIndex, PropertyData};

impl<'a> CheckerState<'a> {
    pub(crate) fn check_class(&mut self, node: NodeIndex, class: &'a ClassData) -> TypeId {
        let Some(instance) = self
            .declaration_of(node)
            .and_then(|decl| self.type_of_declaration(decl))
        else {
            return TypeId::ANY;
        };
        self.resolve_type(instance);
        for parameter in class.type_parameters.iter() {
            self.resolve_ast(parameter, false);
        }

        if class.extends.is_some() {
            let base = self.resolve_ast(class.extends, false);
            if !self.symbols.is_error(base) && !self.is_class_type(base) {
                self.error_at_node(class.extends, diagnostic_codes::A_CLASS_MAY_ONLY_EXTEND_ANOTHER_CLASS, &[]);
            }
        }
        for implemented in class.implements.iter() {
            let ty = self.resolve_ast(implemented, false);
            if !self.symbols.is_error(ty) && !self.is_class_or_interface_type(ty) {
                self.error_at_node(
                    implemented,
                    diagnostic_codes::A_CLASS_MAY_ONLY_IMPLEMENT_ANOTHER_CLASS_OR_INTERFACE,
                    &[],
                );
            }
        }

        if !self.report_base_cycle(node, instance) {
            let (extends, implements) = {
                let symbol = self.symbols.ty(instance);
                (symbol.extends.clone(), symbol.implements.clone())
            };
            for base in extends {
                self.check_heritage_relation(
                    node,
                    instance,
                    base,
                    diagnostic_codes::CLASS_INCORRECTLY_EXTENDS_BASE_CLASS,
                );
            }
            for implemented in implements {
                self.check_heritage_relation(
                    node,
                    instance,
                    implemented,
                    diagnostic_codes::CLASS_INCORRECTLY_IMPLEMENTS_INTERFACE,
                );
            }
        }

        for member in class.members.iter() {
            self.resolve_ast(member, false);
        }
        self.check_implementations_follow(&class.members, |kind| {
            matches!(kind, FunctionKind::Method | FunctionKind::Constructor)
        });
        self.check_index_consistency(node, instance);
        instance
    }

    pub(crate) fn check_interface(&mut self, node: NodeIndex, interface: &'a InterfaceData) -> TypeId {
        let Some(ty) = self
            .declaration_of(node)
            .and_then(|decl| self.type_of_declaration(decl))
        else {
            return TypeId::ANY;
        };
        self.resolve_type(ty);
        for parameter in interface.type_parameters.iter() {
            self.resolve_ast(parameter, false);
        }
        for base in interface.extends.iter() {
            let base_type = self.resolve_ast(base, false);
            if !self.symbols.is_error(base_type) && !self.is_class_or_interface_type(base_type) {
                self.error_at_node(
                    base,
                    diagnostic_codes::AN_INTERFACE_MAY_ONLY_EXTEND_A_CLASS_OR_ANOTHER_INTERFACE,
                    &[],
                );
            }
        }

        if !self.report_base_cycle(node, ty) {
            let extends = self.symbols.ty(ty).extends.clone();
            for base in extends {
                self.check_heritage_relation(
                    node,
                    ty,
                    base,
                    diagnostic_codes::INTERFACE_INCORRECTLY_EXTENDS_INTERFACE,
                );
            }
        }

        for member in interface.members.iter() {
            self.resolve_ast(member, false);
        }
        self.check_index_consistency(node, ty);
        ty
    }

    /// Reports a base-type cycle once, at the first declaration of the
    /// type. Returns true when `ty` is part of a cycle.
    fn report_base_cycle(&mut self, node: NodeIndex, ty: TypeId) -> bool {
        let symbol = self.symbols.ty(ty);
        if !symbol.flags.contains(SymbolFlags::BASE_CYCLE) {
            return false;
        }
        let first = symbol.declarations.first().copied();
        if first.is_some_and(|decl| self.decl(decl).node == node && self.decl(decl).unit == self.ctx.unit) {
            let name = self.atom_text(symbol.name);
            debug!(ty = ty.0, "reporting base type cycle");
            self.error_at_node(
                node,
                diagnostic_codes::TYPE_RECURSIVELY_REFERENCES_ITSELF_AS_A_BASE_TYPE,
                &[&name],
            );
        }
        true
    }

    /// `derived` must be assignable to `base` member by member.
    fn check_heritage_relation(&mut self, node: NodeIndex, derived: TypeId, base: TypeId, code: u32) {
        let mut info = TypeComparisonInfo::new();
        let related = RelationChecker::new(self, RelationKind::Assignable)
            .bypass_nominal()
            .relate(derived, base, Some(&mut info));
        if !related {
            let (derived_text, base_text) = (self.format_type(derived), self.format_type(base));
            self.error_at_node_with_chain(node, code, &[&derived_text, &base_text], &info.message());
        }
    }

    /// Every property must fit the string index type, and the number index
    /// type must fit the string index type. Only members declared by `ty`
    /// itself are checked; inherited ones were checked on their own type.
    fn check_index_consistency(&mut self, node: NodeIndex, ty: TypeId) {
        let Some(string_index) = index_signature_of(self, ty, IndexKind::String) else {
            return;
        };
        let string_type = self.return_type(string_index);
        if let Some(number_index) = index_signature_of(self, ty, IndexKind::Number) {
            let number_type = self.return_type(number_index);
            if !is_assignable(self, number_type, string_type) {
                let (number_text, string_text) =
                    (self.format_type(number_type), self.format_type(string_type));
                self.error_at_node(
                    node,
                    diagnostic_codes::NUMERIC_INDEX_TYPE_IS_NOT_ASSIGNABLE_TO_STRING_INDEX_TYPE,
                    &[&number_text, &string_text],
                );
            }
        }

        let members: Vec<ValueId> = self.symbols.ty(ty).members.values().collect();
        for member in members {
            if self.symbols.value(member).container != Some(ty) {
                continue;
            }
            let member_type = self.value_type(member);
            if is_assignable(self, member_type, string_type) {
                continue;
            }
            let at = self
                .symbols
                .value(member)
                .first_declaration()
                .map(|decl| self.decl(decl))
                .filter(|decl| decl.unit == self.ctx.unit)
                .map_or(node, |decl| decl.node);
            let (name, member_text, string_text) = (
                self.atom_text(self.symbols.value(member).name),
                self.format_type(member_type),
                self.format_type(string_type),
            );
            self.error_at_node(
                at,
                diagnostic_codes::PROPERTY_OF_TYPE_IS_NOT_ASSIGNABLE_TO_STRING_INDEX_TYPE,
                &[&name, &member_text, &string_text],
            );
        }
    }

    pub(crate) fn check_property(&mut self, node: NodeIndex, property: &'a PropertyData) -> TypeId {
        let Some(value) = self
            .declaration_of(node)
            .and_then(|decl| self.value_of_declaration(decl))
        else {
            return TypeId::ANY;
        };
        let annotated = self.resolve_type_annotation(property.type_annotation);
        let ty = self.value_type(value);
        if property.initializer.is_some() {
            let initializer = {
                let mut scope = self.scope();
                scope.ctx.push_frame(ContextFrame::new(annotated));
                scope.resolve_ast(property.initializer, true)
            };
            self.check_assignable_to(property.initializer, initializer, ty);
        }
        if self.settings.no_implicit_any
            && ty == TypeId::ANY
            && self.symbols.value(value).flags.contains(SymbolFlags::INFERRED)
        {
            let (name, text) = (self.atom_text(property.name), self.format_type(ty));
            self.error_at_node(node, diagnostic_codes::MEMBER_IMPLICITLY_HAS_AN_TYPE, &[&name, &text]);
        }
        ty
    }
}
