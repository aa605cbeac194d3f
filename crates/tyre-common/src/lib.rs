//! Common types and utilities for the tyre semantic core.
//!
//! This crate provides foundational types used across all tyre crates:
//! - String interning (`Atom`, `Interner`)
//! - Source spans (`Span`)
//! - Compiler limits and thresholds
//! - Compilation settings (`CompilationSettings`)
//! - Diagnostics data model and message table

// String interning for identifier deduplication
pub mod interner;
pub use interner::{Atom, Interner};

// Span - Source location tracking (byte offsets)
pub mod span;
pub use span::Span;

// Centralized limits and thresholds
pub mod limits;

// Settings consumed by the type-check entry point
pub mod settings;
pub use settings::CompilationSettings;

// Diagnostics - Error reporting types and the message table
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory, format_message};

#[cfg(test)]
#[path = "../tests/interner_tests.rs"]
mod interner_tests;

#[cfg(test)]
#[path = "../tests/diagnostics_tests.rs"]
mod diagnostics_tests;

#[cfg(test)]
#[path = "../tests/settings_tests.rs"]
mod settings_tests;
