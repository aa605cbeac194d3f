//! Structural type solver.
//!
//! Everything here is written against the [`TypeDatabase`] trait, which the
//! checker implements on top of its lazily resolved symbol arena:
//!
//! - **Relations** (`relations`): identity, subtype and assignability with
//!   tri-state memoization and optimistic cycle resolution
//! - **Instantiation** (`instantiate`): memoized specialization of generic
//!   types and signatures, substitution through anonymous types
//! - **Inference** (`infer`): candidate collection for type parameters
//! - **Best common type / widening** (`widening`)
//! - **Apparent types and member lookup** (`apparent`)
//! - **Formatting** (`format`) for diagnostics

mod apparent;
pub use apparent::{
    apparent_type, find_member, index_signature_of, signatures_of, IndexKind,
};

mod db;
pub use db::{GlobalType, SolverCaches, TypeDatabase};

pub mod format;
pub use format::TypeFormatter;

mod infer;
pub use infer::{InferenceContext, relate_type_to_type_parameters};

mod instantiate;
pub use instantiate::{
    SpecializationCache, TypeSubstitution, instantiate_signature, instantiate_type,
    mentions_type_parameters, populate_specialization, specialize_signature, specialize_type,
};

pub mod recursion;

pub mod relations;
pub use relations::{
    ComparisonFlags, RelationCaches, RelationChecker, RelationKind, TypeComparisonInfo,
    is_assignable, is_assignable_with_info, is_identical, is_subtype, is_subtype_with_info,
};

mod widening;
pub use widening::{BestCommonType, best_common_type, widen};

#[cfg(test)]
#[path = "../tests/test_db.rs"]
mod test_db;

#[cfg(test)]
#[path = "../tests/relation_tests.rs"]
mod relation_tests;

#[cfg(test)]
#[path = "../tests/instantiate_tests.rs"]
mod instantiate_tests;

#[cfg(test)]
#[path = "../tests/infer_tests.rs"]
mod infer_tests;

#[cfg(test)]
#[path = "../tests/widening_tests.rs"]
mod widening_tests;

#[cfg(test)]
#[path = "../tests/format_tests.rs"]
mod format_tests;
