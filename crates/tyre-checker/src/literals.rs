//! Contextually typed expressions.
//!
//! Array literals, object literals and function expressions read the
//! innermost contextual frame to decide their shape. Under a provisional
//! frame nothing is committed: a function expression gets a throwaway
//! signature and its parameters are typed through overrides, so the same
//! expression can be tried against every overload candidate.

use crate::context::{ContextFrame, ContextScope};
use crate::state::CheckerState;
use rustc_hash::FxHashSet;
use tracing::trace;
use tyre_binder::{
    DeclId, ResolutionState, SignatureId, SignatureKind, SignatureSymbol, SymbolFlags, TypeId,
    TypeKind, TypeSymbol, ValueId, ValueKind, ValueSymbol,
};
use tyre_common::Atom;
use tyre_common::diagnostics::diagnostic_codes;
use tyre_solver::{
    TypeDatabase, best_common_type, find_member, instantiate_type, is_assignable, signatures_of,
    widen,
};
use tyre_syntax::{ArrayLiteralData, FunctionData, NodeData, NodeIndex, ObjectLiteralData, ParameterData};

impl<'a> CheckerState<'a> {
    /// The type of the innermost contextual frame, with its substitution
    /// applied.
    pub(crate) fn contextual_type(&mut self) -> Option<TypeId> {
        let frame = self.ctx.top_frame()?;
        let ty = frame.ty?;
        match frame.substitution.clone() {
            Some(substitution) => Some(instantiate_type(self, ty, &substitution)),
            None => Some(ty),
        }
    }

    /// The single call signature of the contextual type, if it has exactly
    /// one.
    fn contextual_signature(&mut self) -> Option<SignatureId> {
        let contextual = self.contextual_type().filter(|&ty| ty != TypeId::ANY)?;
        let signatures = signatures_of(self, contextual, SignatureKind::Call);
        match signatures.as_slice() {
            [signature] => {
                self.resolve_signature(*signature);
                Some(*signature)
            }
            _ => None,
        }
    }

    // =========================================================================
    // Array literals
    // =========================================================================

    pub(crate) fn resolve_array_literal(&mut self, node: NodeIndex, literal: &ArrayLiteralData) -> TypeId {
        let context_element = self
            .contextual_type()
            .and_then(|ty| self.symbols.array_element(ty))
            .filter(|&element| !matches!(self.symbols.kind(element), TypeKind::TypeParameter));

        let mut elements = Vec::with_capacity(literal.elements.len());
        for element in literal.elements.iter() {
            let mut scope = self.scope();
            scope.ctx.push_frame(ContextFrame::new(context_element));
            elements.push(scope.resolve_ast(element, true));
        }

        if let Some(element) = context_element
            && elements.iter().all(|&ty| is_assignable(self, ty, element))
        {
            return self.symbols.array_of(element);
        }
        if elements.is_empty() {
            return self.symbols.array_of(TypeId::UNDEFINED);
        }
        let best = best_common_type(self, &elements);
        if best.converged {
            return self.symbols.array_of(best.ty);
        }
        if self.settings.no_implicit_any {
            self.error_at_node(
                node,
                diagnostic_codes::ARRAY_LITERAL_IMPLICITLY_HAS_AN_ANY_TYPE_FROM_WIDENING,
                &[],
            );
        }
        self.symbols.array_of(TypeId::ANY)
    }

    // =========================================================================
    // Object literals
    // =========================================================================

    /// A fresh anonymous object type per literal. Committed walks reuse the
    /// type created by the first one.
    pub(crate) fn resolve_object_literal(&mut self, node: NodeIndex, literal: &ObjectLiteralData) -> TypeId {
        let key = (self.ctx.unit, node);
        let provisional = self.ctx.is_provisional();
        if !provisional && let Some(existing) = self.chain.literal_type(key) {
            if self.ctx.is_checking() {
                self.object_literal_members(literal, None);
            }
            return existing;
        }

        let mut symbol = TypeSymbol::new(TypeKind::ObjectType, Atom::NONE);
        symbol.state = ResolutionState::Resolved;
        symbol.base_state = ResolutionState::Resolved;
        let ty = self.symbols.add_type(symbol);
        self.object_literal_members(literal, Some(ty));
        if !provisional {
            self.chain.set_literal_type(key, ty);
        }
        ty
    }

    /// Type every property initializer against the contextual member of the
    /// same name. With `target`, the properties are added to it.
    fn object_literal_members(&mut self, literal: &ObjectLiteralData, target: Option<TypeId>) {
        let contextual = self.contextual_type().filter(|&ty| ty != TypeId::ANY);
        let mut seen = FxHashSet::default();
        for property in literal.properties.iter() {
            let Some(NodeData::PropertyAssignment(assignment)) = self.node_data(property) else {
                continue;
            };
            let member_context = match contextual {
                Some(contextual) => {
                    find_member(self, contextual, assignment.name).map(|member| self.value_type(member))
                }
                None => None,
            };
            let initializer = {
                let mut scope = self.scope();
                scope.ctx.push_frame(ContextFrame::new(member_context));
                scope.resolve_ast(assignment.initializer, true)
            };
            let ty = if member_context.is_some() {
                initializer
            } else {
                widen(self, initializer)
            };

            if !seen.insert(assignment.name) {
                let name = self.atom_text(assignment.name);
                self.error_at_node(property, diagnostic_codes::DUPLICATE_IDENTIFIER, &[&name]);
                continue;
            }
            let Some(target) = target else {
                continue;
            };
            let mut value = ValueSymbol::new(ValueKind::Property, assignment.name);
            value.ty = Some(ty);
            value.state = ResolutionState::Resolved;
            value.container = Some(target);
            let value = self.symbols.add_value(value);
            self.symbols.ty_mut(target).members.insert(assignment.name, value);
        }
    }

    // =========================================================================
    // Function expressions
    // =========================================================================

    pub(crate) fn resolve_function_expression(&mut self, node: NodeIndex, function: &'a FunctionData) -> TypeId {
        let Some(decl) = self.declaration_of(node) else {
            return TypeId::ANY;
        };
        let Some(object) = self.type_of_declaration(decl) else {
            return TypeId::ANY;
        };
        let Some(signature) = self.decl(decl).signature else {
            return object;
        };
        let contextual = self.contextual_signature();

        if self.ctx.is_provisional() {
            return self.provisional_function_type(decl, function, signature, contextual);
        }
        self.commit_function_signature(decl, function, signature, contextual);
        if self.ctx.is_checking() {
            self.check_function_expression_body(decl, function, signature, contextual.is_some());
        }
        self.resolve_type(object)
    }

    /// Contextual type for the parameter at `index`. A rest parameter is only
    /// typed by a rest parameter at the same position.
    fn contextual_parameter_type(&mut self, signature: SignatureId, index: usize, rest: bool) -> Option<TypeId> {
        if rest {
            let &parameter = self.symbols.signature(signature).parameters.get(index)?;
            if !self.symbols.value(parameter).flags.contains(SymbolFlags::VARARG) {
                return None;
            }
            return Some(self.value_type(parameter));
        }
        self.parameter_type_at(signature, index)
    }

    fn parameter_data(&self, parameter: ValueId) -> Option<&'a ParameterData> {
        let decl = self.symbols.value(parameter).first_declaration()?;
        match self.decl_data(decl)? {
            NodeData::Parameter(data) => Some(data),
            _ => None,
        }
    }

    /// A disposable object type for `function` under the current provisional
    /// frame. Unannotated parameters take the contextual parameter types
    /// through overrides; the declared signature and the locals of the body
    /// are left untouched.
    fn provisional_function_type(
        &mut self,
        decl: DeclId,
        function: &'a FunctionData,
        signature: SignatureId,
        contextual: Option<SignatureId>,
    ) -> TypeId {
        let parameters = self.symbols.signature(signature).parameters.clone();
        let type_parameters = self.symbols.signature(signature).type_parameters.clone();
        let mut scope = ContextScope::speculative(self);
        scope.ctx.enclosing = Some(decl);

        let mut copies = Vec::with_capacity(parameters.len());
        for (i, &parameter) in parameters.iter().enumerate() {
            let data = scope.parameter_data(parameter);
            let annotated = data.is_some_and(|data| data.type_annotation.is_some());
            let rest = data.is_some_and(|data| data.rest);
            let contextual_type = if annotated {
                None
            } else {
                contextual.and_then(|sig| scope.contextual_parameter_type(sig, i, rest))
            };
            let ty = match (annotated, contextual_type, data) {
                (true, _, _) => scope.value_type(parameter),
                (false, Some(ty), _) => ty,
                (false, None, Some(data)) if data.initializer.is_some() => {
                    let ty = scope.resolve_ast(data.initializer, false);
                    widen(&mut *scope, ty)
                }
                (false, None, _) if rest => scope.symbols.array_of(TypeId::ANY),
                (false, None, _) => TypeId::ANY,
            };
            scope.ctx.push_override(parameter, ty);
            let mut copy = scope.symbols.value(parameter).clone();
            copy.ty = Some(ty);
            copy.state = ResolutionState::Resolved;
            copies.push(scope.symbols.add_value(copy));
        }

        let return_type = if function.return_type.is_some() {
            scope.resolve_ast(function.return_type, false)
        } else {
            let contextual_return = contextual.map(|sig| scope.return_type(sig));
            scope.infer_return_type(decl, function.body, contextual_return)
        };

        let mut trial = SignatureSymbol::new(SignatureKind::Call);
        trial.declarations.push(decl);
        trial.parameters = copies;
        trial.type_parameters = type_parameters;
        trial.return_type = Some(return_type);
        trial.is_definition = true;
        trial.state = ResolutionState::Resolved;
        let trial = scope.symbols.add_signature(trial);

        let mut object = TypeSymbol::new(TypeKind::ObjectType, Atom::NONE);
        object.call_signatures.push(trial);
        object.state = ResolutionState::Resolved;
        object.base_state = ResolutionState::Resolved;
        trace!(decl = decl.0, "provisional function expression type");
        scope.symbols.add_type(object)
    }

    /// Resolve the declared signature of `function`, typing unannotated
    /// parameters and the return type from `contextual`. Only the first
    /// committed walk has any effect.
    fn commit_function_signature(
        &mut self,
        decl: DeclId,
        function: &'a FunctionData,
        signature: SignatureId,
        contextual: Option<SignatureId>,
    ) {
        if self.symbols.signature(signature).state != ResolutionState::Unresolved {
            return;
        }
        let parameters = self.symbols.signature(signature).parameters.clone();
        if let Some(contextual) = contextual {
            for (i, &parameter) in parameters.iter().enumerate() {
                let Some(data) = self.parameter_data(parameter) else {
                    continue;
                };
                if data.type_annotation.is_some()
                    || self.symbols.value(parameter).state != ResolutionState::Unresolved
                {
                    continue;
                }
                if let Some(ty) = self.contextual_parameter_type(contextual, i, data.rest) {
                    let value = self.symbols.value_mut(parameter);
                    value.ty = Some(ty);
                    value.state = ResolutionState::Resolved;
                    value.flags |= SymbolFlags::INFERRED;
                }
            }
        }
        for &parameter in &parameters {
            self.value_type(parameter);
        }

        self.symbols.signature_mut(signature).state = ResolutionState::InResolution;
        let return_type = if function.return_type.is_some() {
            self.declaration_scope(decl).resolve_ast(function.return_type, false)
        } else {
            let contextual_return = contextual.map(|sig| self.return_type(sig));
            self.infer_return_type(decl, function.body, contextual_return)
        };
        let symbol = self.symbols.signature_mut(signature);
        if symbol.return_type.is_none() {
            symbol.return_type = Some(return_type);
        }
        symbol.state = ResolutionState::Resolved;
    }

    fn check_function_expression_body(
        &mut self,
        decl: DeclId,
        function: &'a FunctionData,
        signature: SignatureId,
        contextually_typed: bool,
    ) {
        let mut scope = self.scope();
        scope.ctx.enclosing = Some(decl);
        for parameter in function.type_parameters.iter() {
            scope.resolve_ast(parameter, false);
        }
        for parameter in function.parameters.iter() {
            if let Some(NodeData::Parameter(data)) = scope.node_data(parameter) {
                scope.check_parameter(parameter, data, contextually_typed);
            }
        }
        scope.resolve_ast(function.return_type, false);

        match scope.node_data(function.body) {
            Some(NodeData::Block(_)) => {
                scope.resolve_ast(function.body, false);
            }
            Some(_) => {
                let return_type = scope.return_type(signature);
                let body = {
                    let mut inner = scope.scope();
                    inner.ctx.push_frame(ContextFrame::new(Some(return_type)));
                    inner.resolve_ast(function.body, true)
                };
                if function.return_type.is_some() {
                    scope.check_assignable_to(function.body, body, return_type);
                }
            }
            None => {}
        }
    }
}
