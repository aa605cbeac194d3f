//! Declaration collection and the symbol model.
//!
//! The binder runs before the semantic core and hands it two stable
//! structures:
//! - [`DeclarationTree`]: every named (or anonymous but scoped) position in the
//!   syntax tree, with parent/child links and node lookup
//! - [`SymbolArena`]: skeleton type, value and signature symbols with merged
//!   declarations, member tables and signature lists; types and resolution
//!   states are filled in later by the checker
//!
//! Symbols are never removed or reallocated; ids stay valid for the life of the
//! arena.

pub mod symbols;
pub use symbols::{
    FxIndexMap, MemberTable, PrimitiveKind, ResolutionState, SignatureId, SignatureKind,
    SignatureSpecialization, SignatureSymbol, Specialization, SymbolArena, SymbolFlags, SymbolRef,
    TypeId, TypeKind, TypeSymbol, ValueId, ValueKind, ValueSymbol,
};

pub mod declarations;
pub use declarations::{DeclFilter, DeclFlags, DeclId, DeclKind, Declaration, DeclarationTree};

mod binder;
pub use binder::{BinderState, BoundProgram};

#[cfg(test)]
#[path = "../tests/symbols_tests.rs"]
mod symbols_tests;

#[cfg(test)]
#[path = "../tests/binder_tests.rs"]
mod binder_tests;
