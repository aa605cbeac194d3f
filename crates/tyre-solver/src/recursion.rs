//! Recursion guard for walks over the type graph.
//!
//! Relations terminate through their provisional memo entries; the walks in
//! this crate that have no memo (type-parameter mention checks, inference
//! candidate collection, base-chain searches) use `RecursionGuard` instead.
//! It combines:
//! 1. **Cycle detection** via a visiting set
//! 2. **Depth limiting** against native stack exhaustion
//! 3. **Iteration bounding** against runaway work
//!
//! ```ignore
//! let mut guard = RecursionGuard::with_profile(RecursionProfile::TypeWalk);
//! match guard.enter(ty) {
//!     RecursionResult::Entered => {
//!         let result = walk(ty);
//!         guard.leave(ty);
//!         result
//!     }
//!     RecursionResult::Cycle => false,
//!     _ => false,
//! }
//! ```

use rustc_hash::FxHashSet;
use std::hash::Hash;
use tyre_common::limits::{
    MAX_BASE_CHAIN_DEPTH, MAX_TYPE_WALK_DEPTH, MAX_VISITING_SET_SIZE, MAX_WALK_ITERATIONS,
};

// ---------------------------------------------------------------------------
// RecursionProfile
// ---------------------------------------------------------------------------

/// Named limit presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecursionProfile {
    /// Structural walks: mention checks and substitution.
    TypeWalk,
    /// Pairwise walks collecting inference candidates.
    Inference,
    /// `extends`/`implements` chain searches.
    BaseChain,
}

impl RecursionProfile {
    pub const fn max_depth(self) -> u32 {
        match self {
            Self::TypeWalk | Self::Inference => MAX_TYPE_WALK_DEPTH,
            Self::BaseChain => MAX_BASE_CHAIN_DEPTH,
        }
    }

    pub const fn max_iterations(self) -> u32 {
        MAX_WALK_ITERATIONS
    }
}

// ---------------------------------------------------------------------------
// RecursionResult
// ---------------------------------------------------------------------------

/// Result of attempting to enter a recursive computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecursionResult {
    Entered,
    /// This key is already being visited.
    Cycle,
    DepthExceeded,
    IterationExceeded,
}

impl RecursionResult {
    #[inline]
    pub fn is_entered(self) -> bool {
        matches!(self, Self::Entered)
    }
}

// ---------------------------------------------------------------------------
// RecursionGuard
// ---------------------------------------------------------------------------

/// Tracks recursion state for cycle detection, depth limiting and iteration
/// bounding.
///
/// In debug builds, dropping a guard with keys still in the visiting set
/// panics, as does leaving a key that was never entered.
pub struct RecursionGuard<K: Hash + Eq + Copy> {
    visiting: FxHashSet<K>,
    depth: u32,
    iterations: u32,
    max_depth: u32,
    max_iterations: u32,
}

impl<K: Hash + Eq + Copy> RecursionGuard<K> {
    pub fn with_profile(profile: RecursionProfile) -> Self {
        Self {
            visiting: FxHashSet::default(),
            depth: 0,
            iterations: 0,
            max_depth: profile.max_depth(),
            max_iterations: profile.max_iterations(),
        }
    }

    /// Try to enter `key`. On `Entered` the caller must `leave(key)`.
    pub fn enter(&mut self, key: K) -> RecursionResult {
        self.iterations = self.iterations.saturating_add(1);

        if self.iterations > self.max_iterations {
            return RecursionResult::IterationExceeded;
        }
        if self.depth >= self.max_depth {
            return RecursionResult::DepthExceeded;
        }
        if self.visiting.contains(&key) {
            return RecursionResult::Cycle;
        }
        if self.visiting.len() as u32 >= MAX_VISITING_SET_SIZE {
            return RecursionResult::DepthExceeded;
        }

        self.visiting.insert(key);
        self.depth += 1;
        RecursionResult::Entered
    }

    pub fn leave(&mut self, key: K) {
        let was_present = self.visiting.remove(&key);
        debug_assert!(
            was_present,
            "RecursionGuard::leave() called with a key that is not in the visiting set"
        );
        self.depth = self.depth.saturating_sub(1);
    }

    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }
}

#[cfg(debug_assertions)]
impl<K: Hash + Eq + Copy> Drop for RecursionGuard<K> {
    fn drop(&mut self) {
        if !std::thread::panicking() && !self.visiting.is_empty() {
            panic!(
                "RecursionGuard dropped with {} active entries still in the visiting set",
                self.visiting.len(),
            );
        }
    }
}
