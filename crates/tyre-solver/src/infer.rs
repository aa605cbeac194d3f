//! Type-argument inference.
//!
//! Inference walks an argument type and a parameter type side by side and
//! records, for every type parameter under inference met on the parameter
//! side, the type found at the same position on the argument side. The
//! candidates for one parameter are then reduced with the best common type.

use crate::apparent::{find_member, signatures_of};
use crate::db::TypeDatabase;
use crate::instantiate::mentions_type_parameters;
use crate::recursion::{RecursionGuard, RecursionProfile};
use crate::widening::{best_common_type, widen};
use smallvec::SmallVec;
use tracing::trace;
use tyre_binder::{SignatureId, SignatureKind, TypeId, TypeKind};
use tyre_common::Atom;

/// Candidates collected for the type parameters of one generic call.
#[derive(Clone, Debug, Default)]
pub struct InferenceContext {
    type_parameters: SmallVec<[TypeId; 4]>,
    candidates: Vec<Vec<TypeId>>,
}

impl InferenceContext {
    #[must_use]
    pub fn new(type_parameters: &[TypeId]) -> Self {
        Self {
            type_parameters: type_parameters.iter().copied().collect(),
            candidates: vec![Vec::new(); type_parameters.len()],
        }
    }

    #[must_use]
    pub fn type_parameters(&self) -> &[TypeId] {
        &self.type_parameters
    }

    fn index_of(&self, ty: TypeId) -> Option<usize> {
        self.type_parameters.iter().position(|&param| param == ty)
    }

    #[must_use]
    pub fn is_inferring(&self, ty: TypeId) -> bool {
        self.index_of(ty).is_some()
    }

    pub fn add_candidate(&mut self, param: TypeId, candidate: TypeId) {
        if let Some(index) = self.index_of(param) {
            let list = &mut self.candidates[index];
            if !list.contains(&candidate) {
                trace!(param = ?param, candidate = ?candidate, "inference candidate");
                list.push(candidate);
            }
        }
    }

    #[must_use]
    pub fn candidates(&self, param: TypeId) -> &[TypeId] {
        self.index_of(param)
            .map_or(&[][..], |index| self.candidates[index].as_slice())
    }

    /// One argument per type parameter: `any` when nothing constrained it,
    /// otherwise the widened best common type of its candidates.
    pub fn inferred_arguments<D: TypeDatabase + ?Sized>(&self, db: &mut D) -> Vec<TypeId> {
        self.candidates
            .iter()
            .map(|candidates| {
                if candidates.is_empty() {
                    TypeId::ANY
                } else {
                    let best = best_common_type(db, candidates);
                    widen(db, best.ty)
                }
            })
            .collect()
    }
}

/// Collect candidates from `source` (an argument type) for the parameters of
/// `ctx` appearing in `param_type`.
pub fn relate_type_to_type_parameters<D: TypeDatabase + ?Sized>(
    db: &mut D,
    source: TypeId,
    param_type: TypeId,
    ctx: &mut InferenceContext,
) {
    let mut guard = RecursionGuard::with_profile(RecursionProfile::Inference);
    walk(db, source, param_type, ctx, &mut guard);
}

fn walk<D: TypeDatabase + ?Sized>(
    db: &mut D,
    source: TypeId,
    target: TypeId,
    ctx: &mut InferenceContext,
    guard: &mut RecursionGuard<(TypeId, TypeId)>,
) {
    if ctx.is_inferring(target) {
        ctx.add_candidate(target, source);
        return;
    }
    if db.symbols().is_error(source) {
        return;
    }
    if !guard.enter((source, target)).is_entered() {
        return;
    }

    let source_kind = db.symbols().kind(source);
    let target_kind = db.symbols().kind(target);
    match (source_kind, target_kind) {
        (TypeKind::Array { element: se }, TypeKind::Array { element: te }) => {
            walk(db, se, te, ctx, guard);
        }
        (_, TypeKind::Array { .. }) => {}
        _ if target_kind.is_object_like() && source_kind.is_object_like() => {
            let params = ctx.type_parameters.clone();
            if mentions_type_parameters(db, target, &params) {
                walk_object(db, source, target, ctx, guard);
            }
        }
        _ => {}
    }
    guard.leave((source, target));
}

fn walk_object<D: TypeDatabase + ?Sized>(
    db: &mut D,
    source: TypeId,
    target: TypeId,
    ctx: &mut InferenceContext,
    guard: &mut RecursionGuard<(TypeId, TypeId)>,
) {
    let symbols = db.symbols();
    let source_spec = symbols.ty(source).specialization.as_ref();
    let target_spec = symbols.ty(target).specialization.as_ref();
    let source_root = symbols.ty(source).root(source);
    let target_root = symbols.ty(target).root(target);

    // Two instances of one generic: pair up their arguments.
    if source_root == target_root {
        let source_args = source_spec.map(|spec| spec.arguments.clone()).unwrap_or_default();
        let target_args = target_spec.map_or_else(
            || symbols.ty(target).type_parameters.clone(),
            |spec| spec.arguments.clone(),
        );
        if !source_args.is_empty() && source_args.len() == target_args.len() {
            for (s, t) in source_args.into_iter().zip(target_args) {
                walk(db, s, t, ctx, guard);
            }
            return;
        }
    }

    let target = db.resolve_type(target);
    let members: Vec<(Atom, _)> = db.symbols().ty(target).members.iter().collect();
    for (name, target_member) in members {
        let Some(source_member) = find_member(db, source, name) else {
            continue;
        };
        let source_type = db.value_type(source_member);
        let target_type = db.value_type(target_member);
        walk(db, source_type, target_type, ctx, guard);
    }

    for kind in [SignatureKind::Call, SignatureKind::Construct] {
        let source_signatures = signatures_of(db, source, kind);
        let target_signatures = signatures_of(db, target, kind);
        for (s, t) in source_signatures.into_iter().zip(target_signatures) {
            walk_signatures(db, s, t, ctx, guard);
        }
    }
}

fn walk_signatures<D: TypeDatabase + ?Sized>(
    db: &mut D,
    source: SignatureId,
    target: SignatureId,
    ctx: &mut InferenceContext,
    guard: &mut RecursionGuard<(TypeId, TypeId)>,
) {
    db.resolve_signature(source);
    db.resolve_signature(target);
    let source_params = db.symbols().signature(source).parameters.clone();
    let target_params = db.symbols().signature(target).parameters.clone();
    for (s, t) in source_params.into_iter().zip(target_params) {
        let s = db.value_type(s);
        let t = db.value_type(t);
        walk(db, s, t, ctx, guard);
    }
    let source_return = db.return_type(source);
    let target_return = db.return_type(target);
    walk(db, source_return, target_return, ctx, guard);
}
