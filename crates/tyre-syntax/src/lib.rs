//! Syntax trees consumed by the tyre semantic core.
//!
//! Parsing is not part of this workspace. Trees are built through
//! [`AstBuilder`], stored in a [`NodeArena`] per source unit and grouped into a
//! [`Program`]. The core never mutates syntax.
//!
//! - `base`: `NodeIndex` / `NodeList` handles
//! - `node`: the closed `NodeData` tagged union and per-kind payloads
//! - `arena`: storage with parent links and child enumeration
//! - `builder`: programmatic construction with synthetic spans
//! - `program`: source units and the shared interner

pub mod base;
pub use base::{NodeIndex, NodeList};

pub mod node;
pub use node::*;

pub mod arena;
pub use arena::NodeArena;

pub mod builder;
pub use builder::AstBuilder;

pub mod program;
pub use program::{Program, SourceUnit, UnitId};

#[cfg(test)]
#[path = "../tests/arena_tests.rs"]
mod arena_tests;

#[cfg(test)]
#[path = "../tests/builder_tests.rs"]
mod builder_tests;
