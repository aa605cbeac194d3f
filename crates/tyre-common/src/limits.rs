//! Centralized limits and thresholds for the semantic core.
//!
//! Termination of cyclic type graphs comes from the provisional relation-cache
//! entries and the per-symbol resolution states, not from these counters. The
//! limits here are the backstops:
//! - **Stack growth**: red zone and segment size for `stacker::maybe_grow`
//! - **Recursion guards**: caps for the solver's non-memoized walks
//! - **Work queues**: bounds on deferred-work draining
//!
//! # Solver recursion limits
//!
//! Per-walk depth/iteration caps are centralized in
//! `tyre_solver::recursion::RecursionProfile`; the values below are the raw
//! numbers those profiles are built from.

// =============================================================================
// Stack Growth
// =============================================================================

/// Remaining stack below which the resolution driver allocates a new segment.
///
/// Deeply nested expressions (`f(f(f(...)))`, long `a.b.c...` chains) recurse
/// once per node through the driver.
pub const STACK_RED_ZONE: usize = 128 * 1024;

/// Size of each stack segment allocated by `stacker` when the red zone is hit.
pub const STACK_GROWTH_SIZE: usize = 4 * 1024 * 1024;

// =============================================================================
// Recursion Depth Limits (Solver walks)
// =============================================================================

/// Maximum depth for walks that are not protected by the relation memo:
/// type-parameter mention checks, inference walks and type formatting.
///
/// ```typescript
/// interface Chain<T> { next: Chain<Chain<T>> }
/// declare function take<T>(c: Chain<T>): T;
/// take(chain); // inference walks `next` repeatedly
/// ```
pub const MAX_TYPE_WALK_DEPTH: u32 = 64;

/// Maximum depth for base-type chain walks (nominal short-circuit, cycle
/// detection). Cycles are cut by visited sets; this bounds pathological chains.
pub const MAX_BASE_CHAIN_DEPTH: u32 = 256;

/// Maximum number of distinct entries a single guarded walk may visit.
pub const MAX_VISITING_SET_SIZE: u32 = 10_000;

/// Maximum total iterations a single guarded walk may perform.
pub const MAX_WALK_ITERATIONS: u32 = 100_000;

// =============================================================================
// Formatting
// =============================================================================

/// Object types nested deeper than this render as `{ ... }` in messages.
pub const MAX_FORMAT_DEPTH: u32 = 4;

// =============================================================================
// Work Queues
// =============================================================================

/// Maximum number of deferred work items processed for one compilation unit.
///
/// Each item may enqueue more work (member inheritance that discovers another
/// in-flight base). A well-formed program drains long before this.
pub const MAX_DEFERRED_WORK_ITEMS: usize = 100_000;
