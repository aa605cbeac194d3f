//! Call, `new` and `super(...)` expressions.
//!
//! The callee is typed first. Its call (or construct) signatures go to the
//! overload resolver, which tries them provisionally. Once a signature is
//! chosen the arguments are walked a final time against its parameter types
//! in the caller's mode, so their memo entries and diagnostics reflect the
//! chosen overload.

use crate::context::{ContextFlags, ContextFrame};
use crate::overload::{OverloadFailure, OverloadResolution};
use crate::state::CheckerState;
use tracing::{debug, trace};
use tyre_binder::{DeclKind, SignatureId, SignatureKind, TypeId};
use tyre_common::diagnostics::diagnostic_codes;
use tyre_solver::{TypeDatabase, instantiate_signature, signatures_of};
use tyre_syntax::{CallData, NodeData, NodeIndex};

impl<'a> CheckerState<'a> {
    pub(crate) fn resolve_call(&mut self, node: NodeIndex, call: &'a CallData, is_new: bool) -> TypeId {
        if !is_new && matches!(self.node_data(call.callee), Some(NodeData::Super)) {
            return self.resolve_super_call(node, call);
        }

        let callee = self.resolve_ast(call.callee, false);
        let type_arguments: Vec<TypeId> = call
            .type_arguments
            .iter()
            .map(|argument| self.resolve_ast(argument, false))
            .collect();

        if callee == TypeId::ANY || self.symbols.is_error(callee) {
            if callee == TypeId::ANY && !type_arguments.is_empty() {
                self.error_at_node(node, diagnostic_codes::UNTYPED_FUNCTION_CALLS_MAY_NOT_ACCEPT_TYPE_ARGUMENTS, &[]);
            }
            self.resolve_arguments_plainly(call);
            return callee;
        }

        let kind = if is_new {
            SignatureKind::Construct
        } else {
            SignatureKind::Call
        };
        let candidates = signatures_of(self, callee, kind);
        if candidates.is_empty() {
            let ty = self.report_missing_signatures(node, callee, is_new);
            self.resolve_arguments_plainly(call);
            return ty;
        }

        match self.resolve_overload(node, &candidates, call, &type_arguments) {
            Ok(resolution) => self.commit_call(node, call, resolution),
            Err(failure) => {
                self.report_overload_failure(node, call, failure);
                self.resolve_arguments_plainly(call);
                TypeId::ERROR
            }
        }
    }

    /// `super(...)` inside a derived class constructor. The base class's
    /// construct signatures are instantiated with the type arguments given
    /// in the `extends` clause.
    fn resolve_super_call(&mut self, node: NodeIndex, call: &'a CallData) -> TypeId {
        let in_constructor = self
            .ctx
            .enclosing
            .and_then(|decl| {
                self.declarations.enclosing(decl, |kind| {
                    matches!(
                        kind,
                        DeclKind::Function
                            | DeclKind::Method
                            | DeclKind::Constructor
                            | DeclKind::FunctionExpression
                    )
                })
            })
            .is_some_and(|decl| self.decl(decl).kind == DeclKind::Constructor);
        if !in_constructor {
            self.error_at_node(node, diagnostic_codes::SUPER_CALLS_ARE_NOT_PERMITTED_OUTSIDE_CONSTRUCTORS, &[]);
            self.resolve_arguments_plainly(call);
            return TypeId::VOID;
        }
        let Some(base) = self.enclosing_base_type() else {
            self.error_at_node(
                node,
                diagnostic_codes::SUPER_CAN_ONLY_BE_REFERENCED_IN_A_DERIVED_CLASS,
                &[],
            );
            self.resolve_arguments_plainly(call);
            return TypeId::VOID;
        };

        let root = self.symbols.ty(base).root(base);
        let Some(constructor) = self.symbols.ty(root).associated else {
            self.resolve_arguments_plainly(call);
            return TypeId::VOID;
        };
        let substitution = self.specialization_substitution(base);
        let candidates: Vec<SignatureId> = signatures_of(self, constructor, SignatureKind::Construct)
            .into_iter()
            .map(|signature| instantiate_signature(self, signature, &substitution))
            .collect();
        if candidates.is_empty() {
            self.resolve_arguments_plainly(call);
            return TypeId::VOID;
        }

        let outcome = {
            let mut scope = self.scope();
            scope.ctx.flags |= ContextFlags::RESOLVING_SUPER_CALL_ARGS;
            match scope.resolve_overload(node, &candidates, call, &[]) {
                Ok(resolution) => {
                    scope.commit_call(node, call, resolution);
                    true
                }
                Err(failure) => {
                    scope.report_overload_failure(node, call, failure);
                    scope.resolve_arguments_plainly(call);
                    false
                }
            }
        };
        trace!(node = node.0, resolved = outcome, "super call");
        TypeId::VOID
    }

    /// Record the chosen signature, walk the arguments against it and
    /// report constraint violations. Returns the signature's return type.
    fn commit_call(&mut self, node: NodeIndex, call: &'a CallData, resolution: OverloadResolution) -> TypeId {
        let OverloadResolution {
            signature,
            violations,
        } = resolution;
        if !self.ctx.is_provisional() {
            self.chain.set_call_signature((self.ctx.unit, node), signature);
        }
        debug!(node = node.0, signature = signature.0, "call resolved");

        for (i, argument) in call.arguments.iter().enumerate() {
            let parameter = self.parameter_type_at(signature, i);
            let mut scope = self.scope();
            scope.ctx.push_frame(ContextFrame::new(parameter));
            scope.resolve_ast(argument, true);
        }
        for violation in violations {
            let (argument, constraint) =
                (self.format_type(violation.argument), self.format_type(violation.constraint));
            self.error_at_node(
                violation.at,
                diagnostic_codes::TYPE_DOES_NOT_SATISFY_THE_CONSTRAINT,
                &[&argument, &constraint],
            );
        }
        self.return_type(signature)
    }

    fn resolve_arguments_plainly(&mut self, call: &CallData) {
        for argument in call.arguments.iter() {
            self.resolve_ast(argument, false);
        }
    }

    /// `new f()` on a function is allowed and yields `any`; every other
    /// signature-less callee is an error.
    fn report_missing_signatures(&mut self, node: NodeIndex, callee: TypeId, is_new: bool) -> TypeId {
        if is_new {
            if !signatures_of(self, callee, SignatureKind::Call).is_empty() {
                return TypeId::ANY;
            }
            self.error_at_node(
                node,
                diagnostic_codes::CANNOT_USE_NEW_WITH_AN_EXPRESSION_WHOSE_TYPE_LACKS_A_CONSTRUCT_SIGNATURE,
                &[],
            );
            return TypeId::ERROR;
        }
        if signatures_of(self, callee, SignatureKind::Construct).is_empty() {
            self.error_at_node(
                node,
                diagnostic_codes::CANNOT_INVOKE_AN_EXPRESSION_WHOSE_TYPE_LACKS_A_CALL_SIGNATURE,
                &[],
            );
        } else {
            let text = self.format_type(callee);
            self.error_at_node(
                node,
                diagnostic_codes::VALUE_OF_TYPE_IS_NOT_CALLABLE_DID_YOU_MEAN_TO_INCLUDE_NEW,
                &[&text],
            );
        }
        TypeId::ERROR
    }

    fn report_overload_failure(&mut self, node: NodeIndex, call: &CallData, failure: OverloadFailure) {
        match failure {
            OverloadFailure::TypeArgumentCount { expected, got } => {
                self.error_at_node(
                    node,
                    diagnostic_codes::EXPECTED_TYPE_ARGUMENTS_BUT_GOT,
                    &[&expected.to_string(), &got.to_string()],
                );
            }
            OverloadFailure::Argument {
                index,
                argument,
                parameter,
                chain,
            } => {
                let at = call.arguments.get(index).unwrap_or(node);
                let (argument, parameter) = (self.format_type(argument), self.format_type(parameter));
                self.error_at_node_with_chain(
                    at,
                    diagnostic_codes::ARGUMENT_OF_TYPE_IS_NOT_ASSIGNABLE_TO_PARAMETER_OF_TYPE,
                    &[&argument, &parameter],
                    &chain,
                );
            }
            OverloadFailure::NoMatch { chain } => {
                self.error_at_node_with_chain(
                    node,
                    diagnostic_codes::SUPPLIED_PARAMETERS_DO_NOT_MATCH_ANY_SIGNATURE_OF_CALL_TARGET,
                    &[],
                    &chain,
                );
            }
        }
    }
}
