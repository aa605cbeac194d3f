//! Relation memo tables.
//!
//! One table per relation kind, keyed by `(source, target)`. An entry is
//! either `true` (proven) or `false` (being computed). A `false` hit means the
//! pair is on the current relation stack and is assumed related, which is
//! what terminates recursive structures. Failed pairs are removed again, so
//! a negative answer is always recomputed.

use super::RelationKind;
use rustc_hash::FxHashMap;
use tyre_binder::TypeId;

/// Tri-state memo lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CacheEntry {
    Proven,
    InProgress,
}

#[derive(Debug, Default)]
pub struct RelationCaches {
    identical: FxHashMap<(TypeId, TypeId), bool>,
    subtype: FxHashMap<(TypeId, TypeId), bool>,
    assignable: FxHashMap<(TypeId, TypeId), bool>,
}

impl RelationCaches {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self, kind: RelationKind) -> &FxHashMap<(TypeId, TypeId), bool> {
        match kind {
            RelationKind::Identical => &self.identical,
            RelationKind::Subtype => &self.subtype,
            RelationKind::Assignable => &self.assignable,
        }
    }

    fn table_mut(&mut self, kind: RelationKind) -> &mut FxHashMap<(TypeId, TypeId), bool> {
        match kind {
            RelationKind::Identical => &mut self.identical,
            RelationKind::Subtype => &mut self.subtype,
            RelationKind::Assignable => &mut self.assignable,
        }
    }

    #[must_use]
    pub fn lookup(&self, kind: RelationKind, source: TypeId, target: TypeId) -> Option<CacheEntry> {
        self.table(kind)
            .get(&(source, target))
            .map(|&proven| if proven { CacheEntry::Proven } else { CacheEntry::InProgress })
    }

    /// Record that `(source, target)` is being computed.
    pub fn begin(&mut self, kind: RelationKind, source: TypeId, target: TypeId) {
        self.table_mut(kind).insert((source, target), false);
    }

    /// Settle a pair opened with `begin`.
    pub fn complete(&mut self, kind: RelationKind, source: TypeId, target: TypeId, related: bool) {
        let table = self.table_mut(kind);
        if related {
            table.insert((source, target), true);
        } else {
            table.remove(&(source, target));
        }
    }

    #[must_use]
    pub fn len(&self, kind: RelationKind) -> usize {
        self.table(kind).len()
    }

    #[must_use]
    pub fn is_proven(&self, kind: RelationKind, source: TypeId, target: TypeId) -> bool {
        self.lookup(kind, source, target) == Some(CacheEntry::Proven)
    }

    pub fn clear(&mut self) {
        self.identical.clear();
        self.subtype.clear();
        self.assignable.clear();
    }
}
