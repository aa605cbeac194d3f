//! The tyre semantic core.
//!
//! Resolution is lazy and demand-driven: every type, value and signature
//! symbol starts `Unresolved` and is brought to `Resolved` the first time
//! anything asks for it. Checking a source unit is a second walk over the
//! same machinery with diagnostic reporting switched on.
//!
//! - `state`: `CheckerState`, the resolver instance and its `TypeDatabase`
//!   implementation
//! - `context`: the resolution context (contextual-type frames, mode flags)
//!   and its scoped save/restore guard
//! - `chain`: the per-node memo
//! - `dispatch`: the resolution driver (`resolve_ast`)
//! - `declared`: lazy declaration resolution, heritage and inheritance
//! - `name_resolution`, `type_node`: names and type annotations
//! - `expr`, `literals`: expression typing and contextual typing
//! - `call_checker`, `overload`, `generic_inference`: calls
//! - `statements`, `class_checker`: declaration-level checks

pub mod chain;
pub mod context;
pub mod diagnostics;
pub mod state;

mod call_checker;
mod class_checker;
mod declared;
mod dispatch;
mod expr;
mod generic_inference;
mod literals;
mod name_resolution;
mod overload;
mod statements;
mod type_node;

pub use chain::{NodeInfo, SemanticInfoChain};
pub use context::{ContextFlags, ContextFrame, ContextScope, ResolutionContext};
pub use declared::{DeferredKind, DeferredWork};
pub use diagnostics::{DiagnosticCollector, DiagnosticSink};
pub use state::{CheckerState, type_check_program};

// Relation queries over a checker, re-exported for hosts.
pub use tyre_solver::{is_assignable, is_identical, is_subtype, widen};

#[cfg(test)]
#[path = "../tests/test_utils.rs"]
mod test_utils;

#[cfg(test)]
#[path = "../tests/driver_tests.rs"]
mod driver_tests;

#[cfg(test)]
#[path = "../tests/declared_tests.rs"]
mod declared_tests;

#[cfg(test)]
#[path = "../tests/expr_tests.rs"]
mod expr_tests;

#[cfg(test)]
#[path = "../tests/literal_tests.rs"]
mod literal_tests;

#[cfg(test)]
#[path = "../tests/overload_tests.rs"]
mod overload_tests;

#[cfg(test)]
#[path = "../tests/declaration_check_tests.rs"]
mod declaration_check_tests;
