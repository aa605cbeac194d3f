//! Per-node semantic memo.
//!
//! Keyed by `(unit, node)`. An entry records the type a node resolved to and
//! the epoch in which it was last walked with reporting on, so the check
//! pass visits each node once per epoch while resolve-mode queries reuse the
//! type as soon as it exists.

use rustc_hash::{FxHashMap, FxHashSet};
use tyre_binder::{SignatureId, TypeId};
use tyre_syntax::{NodeIndex, UnitId};

pub type NodeKey = (UnitId, NodeIndex);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeInfo {
    pub ty: TypeId,
    /// Epoch of the last type-check walk over this node.
    pub checked_epoch: Option<u32>,
}

#[derive(Debug, Default)]
pub struct SemanticInfoChain {
    nodes: FxHashMap<NodeKey, NodeInfo>,
    /// Signature chosen by overload resolution, per call or `new` node.
    call_signatures: FxHashMap<NodeKey, SignatureId>,
    /// Object types created for object literals, reused by later walks.
    literal_types: FxHashMap<NodeKey, TypeId>,
    checked_units: FxHashSet<UnitId>,
    epoch: u32,
}

impl SemanticInfoChain {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    /// Start a new epoch: every node and unit may be checked again.
    pub fn advance_epoch(&mut self) {
        self.epoch += 1;
        self.checked_units.clear();
    }

    #[must_use]
    pub fn node_info(&self, key: NodeKey) -> Option<NodeInfo> {
        self.nodes.get(&key).copied()
    }

    #[must_use]
    pub fn node_type(&self, key: NodeKey) -> Option<TypeId> {
        self.nodes.get(&key).map(|info| info.ty)
    }

    #[must_use]
    pub fn is_checked(&self, key: NodeKey) -> bool {
        self.nodes
            .get(&key)
            .is_some_and(|info| info.checked_epoch == Some(self.epoch))
    }

    /// Record a resolve-mode result. A check stamp already present is kept.
    pub fn set_node_type(&mut self, key: NodeKey, ty: TypeId) {
        self.nodes
            .entry(key)
            .and_modify(|info| info.ty = ty)
            .or_insert(NodeInfo {
                ty,
                checked_epoch: None,
            });
    }

    /// Record a check-mode result stamped with the current epoch.
    pub fn set_checked(&mut self, key: NodeKey, ty: TypeId) {
        self.nodes.insert(
            key,
            NodeInfo {
                ty,
                checked_epoch: Some(self.epoch),
            },
        );
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn set_call_signature(&mut self, key: NodeKey, signature: SignatureId) {
        self.call_signatures.insert(key, signature);
    }

    #[must_use]
    pub fn call_signature(&self, key: NodeKey) -> Option<SignatureId> {
        self.call_signatures.get(&key).copied()
    }

    pub(crate) fn set_literal_type(&mut self, key: NodeKey, ty: TypeId) {
        self.literal_types.insert(key, ty);
    }

    pub(crate) fn literal_type(&self, key: NodeKey) -> Option<TypeId> {
        self.literal_types.get(&key).copied()
    }

    #[must_use]
    pub fn is_unit_checked(&self, unit: UnitId) -> bool {
        self.checked_units.contains(&unit)
    }

    /// Returns false when the unit was already marked in this epoch.
    pub fn mark_unit_checked(&mut self, unit: UnitId) -> bool {
        self.checked_units.insert(unit)
    }
}
