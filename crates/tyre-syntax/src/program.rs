//! A program: the set of source units and the interner they share.

use crate::arena::NodeArena;
use crate::base::NodeIndex;
use crate::builder::AstBuilder;
use rustc_hash::FxHashMap;
use serde::Serialize;
use tyre_common::Interner;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct UnitId(pub u32);

/// One compilation unit.
#[derive(Debug)]
pub struct SourceUnit {
    path: String,
    arena: NodeArena,
    root: NodeIndex,
}

impl SourceUnit {
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    /// The `SourceFile` node.
    #[must_use]
    pub fn root(&self) -> NodeIndex {
        self.root
    }
}

#[derive(Debug, Default)]
pub struct Program {
    interner: Interner,
    units: Vec<SourceUnit>,
    by_path: FxHashMap<String, UnitId>,
}

impl Program {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a unit with `build`, which must return the `SourceFile` node.
    ///
    /// Adding a second unit with an existing path replaces the lookup entry;
    /// both units stay in the program.
    pub fn add_unit(
        &mut self,
        path: impl Into<String>,
        build: impl FnOnce(&mut AstBuilder<'_>) -> NodeIndex,
    ) -> UnitId {
        let path = path.into();
        let mut builder = AstBuilder::new(&mut self.interner);
        let root = build(&mut builder);
        let arena = builder.finish();
        let id = UnitId(self.units.len() as u32);
        self.by_path.insert(path.clone(), id);
        self.units.push(SourceUnit { path, arena, root });
        id
    }

    #[must_use]
    pub fn interner(&self) -> &Interner {
        &self.interner
    }

    /// Mutable access for callers that need to intern names after building.
    pub fn interner_mut(&mut self) -> &mut Interner {
        &mut self.interner
    }

    /// # Panics
    ///
    /// Panics if `id` was not produced by this program.
    #[must_use]
    pub fn unit(&self, id: UnitId) -> &SourceUnit {
        &self.units[id.0 as usize]
    }

    #[must_use]
    pub fn unit_by_path(&self, path: &str) -> Option<UnitId> {
        self.by_path.get(path).copied()
    }

    #[must_use]
    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    pub fn unit_ids(&self) -> impl Iterator<Item = UnitId> + '_ {
        (0..self.units.len()).map(|i| UnitId(i as u32))
    }
}
