//! Type argument inference for generic calls.
//!
//! Two rounds over the arguments. Arguments that do not depend on their
//! contextual type are typed first and related to their parameter types.
//! Function expressions and literals are typed second, against parameter
//! types instantiated with what the first round inferred, so a callback's
//! parameters see the element type inferred from the array beside it.

use crate::context::ContextFrame;
use crate::overload::ConstraintViolation;
use crate::state::CheckerState;
use tracing::trace;
use tyre_binder::SignatureId;
use tyre_solver::{
    InferenceContext, TypeSubstitution, is_assignable, relate_type_to_type_parameters,
    specialize_signature,
};
use tyre_syntax::{CallData, NodeIndex};

#[derive(Clone, Debug)]
pub(crate) struct InferenceResult {
    /// `signature` specialized with the inferred arguments.
    pub signature: SignatureId,
    pub violations: Vec<ConstraintViolation>,
}

impl<'a> CheckerState<'a> {
    pub(crate) fn infer_signature(
        &mut self,
        node: NodeIndex,
        signature: SignatureId,
        call: &CallData,
    ) -> InferenceResult {
        let type_parameters = self.symbols.signature(signature).type_parameters.clone();
        let mut inference = InferenceContext::new(&type_parameters);

        let (deferred, immediate): (Vec<_>, Vec<_>) = call
            .arguments
            .iter()
            .enumerate()
            .partition(|&(_, argument)| self.is_context_sensitive(argument));

        for (i, argument) in immediate {
            let Some(parameter) = self.parameter_type_at(signature, i) else {
                continue;
            };
            let ty = {
                let mut scope = self.scope();
                scope.ctx.push_frame(ContextFrame::provisional(None));
                scope.resolve_ast(argument, true)
            };
            relate_type_to_type_parameters(self, ty, parameter, &mut inference);
        }

        if !deferred.is_empty() {
            let partial = inference.inferred_arguments(self);
            let substitution = TypeSubstitution::from_pairs(&type_parameters, &partial);
            for (i, argument) in deferred {
                let Some(parameter) = self.parameter_type_at(signature, i) else {
                    continue;
                };
                let ty = {
                    let mut scope = self.scope();
                    scope.ctx.push_frame(
                        ContextFrame::provisional(Some(parameter)).with_substitution(substitution.clone()),
                    );
                    scope.resolve_ast(argument, true)
                };
                relate_type_to_type_parameters(self, ty, parameter, &mut inference);
            }
        }

        let inferred = inference.inferred_arguments(self);
        trace!(signature = signature.0, inferred = ?inferred, "inferred type arguments");
        let substitution = TypeSubstitution::from_pairs(&type_parameters, &inferred);
        let mut violations = Vec::new();
        for (&parameter, &argument) in type_parameters.iter().zip(&inferred) {
            if let Some(constraint) = self.instantiated_constraint(parameter, &substitution)
                && !is_assignable(self, argument, constraint)
            {
                violations.push(ConstraintViolation {
                    argument,
                    constraint,
                    at: node,
                });
            }
        }
        InferenceResult {
            signature: specialize_signature(self, signature, &inferred),
            violations,
        }
    }
}
