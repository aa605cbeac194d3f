//! Overload resolution.
//!
//! Candidates are filtered by arity and type-argument count, then every
//! remaining signature is tried against the arguments under a provisional
//! frame. Diagnostics raised while trying a candidate are counted and
//! thrown away. Among the applicable candidates the best one is picked
//! pairwise: more parameters identical to the argument's own type, then
//! more specific parameters, then fewer provisional errors. Ties keep the earlier
//! declaration.

use crate::context::ContextFrame;
use crate::state::CheckerState;
use tracing::{debug, trace};
use tyre_binder::{SignatureId, TypeId};
use tyre_solver::{
    TypeComparisonInfo, TypeDatabase, TypeSubstitution, is_assignable, is_assignable_with_info,
    is_identical, is_subtype, specialize_signature,
};
use tyre_syntax::{CallData, NodeIndex};

/// A type argument that does not satisfy its parameter's constraint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ConstraintViolation {
    pub argument: TypeId,
    pub constraint: TypeId,
    /// Where to report it: the explicit type argument, or the call.
    pub at: NodeIndex,
}

#[derive(Clone, Debug)]
pub(crate) struct OverloadResolution {
    /// The chosen signature, instantiated when it was generic.
    pub signature: SignatureId,
    pub violations: Vec<ConstraintViolation>,
}

#[derive(Clone, Debug)]
pub(crate) enum OverloadFailure {
    TypeArgumentCount { expected: usize, got: usize },
    /// The only candidate rejected the argument at `index`.
    Argument {
        index: usize,
        argument: TypeId,
        parameter: TypeId,
        chain: String,
    },
    NoMatch { chain: String },
}

/// Outcome of trying one candidate.
#[derive(Debug)]
struct Candidate {
    signature: SignatureId,
    violations: Vec<ConstraintViolation>,
    /// Index, argument type, parameter type and comparison chain of the
    /// first argument that did not fit.
    rejected: Option<(usize, TypeId, TypeId, String)>,
    identical_parameters: usize,
    /// Provisional diagnostics plus constraint violations.
    errors: usize,
}

impl<'a> CheckerState<'a> {
    /// Declared type of the parameter receiving argument `index`. Arguments
    /// past a rest parameter receive its element type.
    pub(crate) fn parameter_type_at(&mut self, signature: SignatureId, index: usize) -> Option<TypeId> {
        self.resolve_signature(signature);
        let parameters = self.symbols.signature(signature).parameters.clone();
        let last = parameters.len().checked_sub(1)?;
        if self.symbols.has_varargs(signature) && index >= last {
            let rest = self.value_type(parameters[last]);
            return Some(self.symbols.array_element(rest).unwrap_or(TypeId::ANY));
        }
        let &parameter = parameters.get(index)?;
        Some(self.value_type(parameter))
    }

    pub(crate) fn resolve_overload(
        &mut self,
        node: NodeIndex,
        candidates: &[SignatureId],
        call: &CallData,
        type_arguments: &[TypeId],
    ) -> Result<OverloadResolution, OverloadFailure> {
        for &signature in candidates {
            self.resolve_signature(signature);
        }
        let has_overloads = candidates
            .iter()
            .any(|&signature| !self.symbols.signature(signature).is_definition);
        let argument_count = call.arguments.len();
        let by_arity: Vec<SignatureId> = candidates
            .iter()
            .copied()
            .filter(|&signature| !has_overloads || !self.symbols.signature(signature).is_definition)
            .filter(|&signature| self.symbols.accepts_argument_count(signature, argument_count))
            .collect();
        if by_arity.is_empty() {
            debug!(node = node.0, "no candidate accepts the argument count");
            return Err(OverloadFailure::NoMatch {
                chain: String::new(),
            });
        }

        let filtered: Vec<SignatureId> = if type_arguments.is_empty() {
            by_arity
        } else {
            let matching: Vec<SignatureId> = by_arity
                .iter()
                .copied()
                .filter(|&signature| {
                    self.symbols.signature(signature).type_parameters.len() == type_arguments.len()
                })
                .collect();
            if matching.is_empty() {
                let expected = by_arity
                    .first()
                    .map_or(0, |&signature| self.symbols.signature(signature).type_parameters.len());
                return Err(OverloadFailure::TypeArgumentCount {
                    expected,
                    got: type_arguments.len(),
                });
            }
            matching
        };

        let plain_types = self.plain_argument_types(call);
        let mut tried = Vec::with_capacity(filtered.len());
        for &signature in &filtered {
            let candidate = self.try_candidate(node, signature, call, type_arguments, &plain_types);
            trace!(
                signature = signature.0,
                applicable = candidate.rejected.is_none(),
                identical = candidate.identical_parameters,
                errors = candidate.errors,
                "overload candidate"
            );
            tried.push(candidate);
        }

        let mut best: Option<usize> = None;
        for i in 0..tried.len() {
            if tried[i].rejected.is_some() {
                continue;
            }
            best = match best {
                Some(current) if !self.is_better_candidate(&tried[i], &tried[current], argument_count) => {
                    Some(current)
                }
                _ => Some(i),
            };
        }

        if let Some(best) = best {
            let chosen = tried.swap_remove(best);
            debug!(node = node.0, signature = chosen.signature.0, "overload chosen");
            return Ok(OverloadResolution {
                signature: chosen.signature,
                violations: chosen.violations,
            });
        }

        if let [only] = tried.as_slice()
            && let Some((index, argument, parameter, chain)) = only.rejected.clone()
        {
            return Err(OverloadFailure::Argument {
                index,
                argument,
                parameter,
                chain,
            });
        }
        let chain = tried
            .iter()
            .find_map(|candidate| candidate.rejected.as_ref().map(|rejected| rejected.3.clone()))
            .unwrap_or_default();
        Err(OverloadFailure::NoMatch { chain })
    }

    /// Argument types without any contextual type, used to rank candidates.
    fn plain_argument_types(&mut self, call: &CallData) -> Vec<TypeId> {
        let checkpoint = self.ctx.provisional_errors.len();
        let types = call
            .arguments
            .iter()
            .map(|argument| {
                let mut scope = self.scope();
                scope.ctx.push_frame(ContextFrame::provisional(None));
                scope.resolve_ast(argument, true)
            })
            .collect();
        self.ctx.provisional_errors.truncate(checkpoint);
        types
    }

    fn try_candidate(
        &mut self,
        node: NodeIndex,
        candidate: SignatureId,
        call: &CallData,
        type_arguments: &[TypeId],
        plain_types: &[TypeId],
    ) -> Candidate {
        let checkpoint = self.ctx.provisional_errors.len();
        let type_parameters = self.symbols.signature(candidate).type_parameters.clone();

        let (signature, violations) = if !type_arguments.is_empty() {
            let substitution = TypeSubstitution::from_pairs(&type_parameters, type_arguments);
            let mut violations = Vec::new();
            for (i, (&parameter, &argument)) in type_parameters.iter().zip(type_arguments).enumerate() {
                if let Some(constraint) = self.instantiated_constraint(parameter, &substitution)
                    && !is_assignable(self, argument, constraint)
                {
                    violations.push(ConstraintViolation {
                        argument,
                        constraint,
                        at: call.type_arguments.get(i).unwrap_or(node),
                    });
                }
            }
            (specialize_signature(self, candidate, type_arguments), violations)
        } else if !type_parameters.is_empty() {
            let inferred = self.infer_signature(node, candidate, call);
            (inferred.signature, inferred.violations)
        } else {
            (candidate, Vec::new())
        };

        let mut rejected = None;
        let mut identical_parameters = 0;
        for (i, argument) in call.arguments.iter().enumerate() {
            let Some(parameter) = self.parameter_type_at(signature, i) else {
                break;
            };
            let argument_type = {
                let mut scope = self.scope();
                scope.ctx.push_frame(ContextFrame::provisional(Some(parameter)));
                scope.resolve_ast(argument, true)
            };
            let mut info = TypeComparisonInfo::new();
            if !is_assignable_with_info(self, argument_type, parameter, &mut info) {
                rejected = Some((i, argument_type, parameter, info.message()));
                break;
            }
            if let Some(&plain) = plain_types.get(i)
                && is_identical(self, plain, parameter)
            {
                identical_parameters += 1;
            }
        }

        let errors = self.ctx.provisional_errors.len().saturating_sub(checkpoint) + violations.len();
        self.ctx.provisional_errors.truncate(checkpoint);
        Candidate {
            signature,
            violations,
            rejected,
            identical_parameters,
            errors,
        }
    }

    fn is_better_candidate(&mut self, a: &Candidate, b: &Candidate, argument_count: usize) -> bool {
        if a.identical_parameters != b.identical_parameters {
            return a.identical_parameters > b.identical_parameters;
        }
        if self.is_more_specific(a.signature, b.signature, argument_count) {
            return true;
        }
        if self.is_more_specific(b.signature, a.signature, argument_count) {
            return false;
        }
        a.errors < b.errors
    }

    /// Every parameter of `a` is a subtype of the one in `b` and at least one
    /// is strictly narrower.
    fn is_more_specific(&mut self, a: SignatureId, b: SignatureId, argument_count: usize) -> bool {
        let mut strictly = false;
        for i in 0..argument_count {
            let (Some(pa), Some(pb)) = (self.parameter_type_at(a, i), self.parameter_type_at(b, i)) else {
                break;
            };
            if !is_subtype(self, pa, pb) {
                return false;
            }
            if !is_subtype(self, pb, pa) {
                strictly = true;
            }
        }
        strictly
    }
}
