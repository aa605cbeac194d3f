//! The shared relation worker.

use super::cache::CacheEntry;
use super::{RelationKind, TypeComparisonInfo};
use crate::apparent::apparent_type;
use crate::db::TypeDatabase;
use crate::format::TypeFormatter;
use crate::recursion::{RecursionGuard, RecursionProfile};
use tracing::trace;
use tyre_binder::{TypeId, TypeKind};
use tyre_common::limits::{STACK_GROWTH_SIZE, STACK_RED_ZONE};

/// Relates pairs of types under one [`RelationKind`].
///
/// `depth` is the nesting level used to indent elaboration messages; it has no
/// role in termination.
pub struct RelationChecker<'a, D: TypeDatabase + ?Sized> {
    pub(super) db: &'a mut D,
    pub(super) kind: RelationKind,
    pub(super) depth: u32,
    bypass_nominal_once: bool,
}

impl<'a, D: TypeDatabase + ?Sized> RelationChecker<'a, D> {
    pub fn new(db: &'a mut D, kind: RelationKind) -> Self {
        Self {
            db,
            kind,
            depth: 0,
            bypass_nominal_once: false,
        }
    }

    /// Skip the `extends`/`implements` shortcut for the first object
    /// comparison, forcing a member-wise check. Used when verifying that a
    /// class actually satisfies the base it names.
    #[must_use]
    pub fn bypass_nominal(mut self) -> Self {
        self.bypass_nominal_once = true;
        self
    }

    #[must_use]
    pub fn kind(&self) -> RelationKind {
        self.kind
    }

    pub fn relate(
        &mut self,
        source: TypeId,
        target: TypeId,
        info: Option<&mut TypeComparisonInfo>,
    ) -> bool {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROWTH_SIZE, || {
            self.relate_inner(source, target, info)
        })
    }

    pub(super) fn type_name(&self, ty: TypeId) -> String {
        TypeFormatter::new(self.db.symbols(), self.db.interner()).format(ty)
    }

    /// Aliases are transparent.
    fn normalize(&mut self, ty: TypeId) -> TypeId {
        if matches!(self.db.symbols().kind(ty), TypeKind::Alias) {
            self.db.resolve_type(ty)
        } else {
            ty
        }
    }

    fn relate_inner(
        &mut self,
        source: TypeId,
        target: TypeId,
        info: Option<&mut TypeComparisonInfo>,
    ) -> bool {
        let source = self.normalize(source);
        let target = self.normalize(target);

        if source == target {
            return true;
        }
        if self.db.symbols().is_error(source) || self.db.symbols().is_error(target) {
            return true;
        }
        if self.kind == RelationKind::Identical {
            return self.identical(source, target);
        }

        let assignable = self.kind.is_assignable();
        if target == TypeId::ANY {
            return true;
        }
        if source == TypeId::ANY {
            return assignable;
        }
        if source == TypeId::UNDEFINED {
            return target == TypeId::VOID || assignable;
        }
        if source == TypeId::NULL {
            return target != TypeId::UNDEFINED && target != TypeId::VOID;
        }
        if target == TypeId::UNDEFINED || target == TypeId::NULL {
            return false;
        }
        if source == TypeId::VOID || target == TypeId::VOID {
            return false;
        }

        let source_kind = self.db.symbols().kind(source);
        let target_kind = self.db.symbols().kind(target);

        match (source_kind, target_kind) {
            (TypeKind::Enum, TypeKind::Enum) => return false,
            (_, TypeKind::Enum) => return source == TypeId::NUMBER && assignable,
            (TypeKind::Enum, _) => return self.relate_inner(TypeId::NUMBER, target, info),
            _ => {}
        }

        if matches!(target_kind, TypeKind::Primitive(_)) {
            return false;
        }

        if matches!(target_kind, TypeKind::TypeParameter) {
            return false;
        }
        if matches!(source_kind, TypeKind::TypeParameter) {
            let constraint = self
                .db
                .symbols()
                .ty(source)
                .constraint
                .unwrap_or(TypeId::EMPTY_OBJECT);
            return self.cached(source, target, |this| {
                this.relate_inner(constraint, target, info)
            });
        }

        let source = match (source_kind, target_kind) {
            (TypeKind::Array { element: se }, TypeKind::Array { element: te }) => {
                return self.cached(source, target, |this| this.relate_inner(se, te, info));
            }
            (_, TypeKind::Array { .. }) => return false,
            (TypeKind::Array { .. } | TypeKind::Primitive(_), _) => apparent_type(self.db, source),
            _ => source,
        };
        if source == target {
            return true;
        }

        if !self.db.symbols().kind(source).is_object_like() || !target_kind.is_object_like() {
            return false;
        }

        let bypass = std::mem::take(&mut self.bypass_nominal_once);
        if !bypass && self.derives_from(source, target) {
            trace!(source = ?source, target = ?target, "related through heritage");
            return true;
        }

        self.cached(source, target, |this| this.structural(source, target, info))
    }

    /// Memoized computation of `(source, target)` under the current kind.
    pub(super) fn cached(
        &mut self,
        source: TypeId,
        target: TypeId,
        compute: impl FnOnce(&mut Self) -> bool,
    ) -> bool {
        let kind = self.kind;
        match self.db.caches().relations.lookup(kind, source, target) {
            Some(CacheEntry::Proven) => return true,
            Some(CacheEntry::InProgress) => {
                trace!(source = ?source, target = ?target, ?kind, "assuming related on cycle");
                return true;
            }
            None => {}
        }
        self.db.caches().relations.begin(kind, source, target);
        let related = compute(self);
        self.db
            .caches()
            .relations
            .complete(kind, source, target, related);
        if !related {
            trace!(source = ?source, target = ?target, ?kind, "not related");
        }
        related
    }

    /// Whether `target` appears in the `extends`/`implements` closure of
    /// `source`.
    fn derives_from(&mut self, source: TypeId, target: TypeId) -> bool {
        let mut guard = RecursionGuard::with_profile(RecursionProfile::BaseChain);
        let found = self.derives_from_walk(source, target, &mut guard);
        debug_assert_eq!(guard.depth(), 0);
        found
    }

    fn derives_from_walk(
        &mut self,
        ty: TypeId,
        target: TypeId,
        guard: &mut RecursionGuard<TypeId>,
    ) -> bool {
        if !guard.enter(ty).is_entered() {
            return false;
        }
        self.db.resolve_type(ty);
        let symbol = self.db.symbols().ty(ty);
        let bases: Vec<TypeId> = symbol
            .extends
            .iter()
            .chain(symbol.implements.iter())
            .copied()
            .collect();
        let mut found = bases.contains(&target);
        if !found {
            for base in bases {
                if self.derives_from_walk(base, target, guard) {
                    found = true;
                    break;
                }
            }
        }
        guard.leave(ty);
        found
    }

    // =========================================================================
    // Identity
    // =========================================================================

    fn identical(&mut self, source: TypeId, target: TypeId) -> bool {
        let source_kind = self.db.symbols().kind(source);
        let target_kind = self.db.symbols().kind(target);
        match (source_kind, target_kind) {
            (TypeKind::Array { element: se }, TypeKind::Array { element: te }) => {
                self.cached(source, target, |this| this.relate_inner(se, te, None))
            }
            _ if source_kind.is_object_like() && target_kind.is_object_like() => {
                self.cached(source, target, |this| this.identical_structure(source, target))
            }
            _ => false,
        }
    }
}
