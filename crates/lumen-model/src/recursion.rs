//! Recursion guard for type-graph walks.
//!
//! Every walk over supertype edges or alias targets goes through a
//! [`RecursionGuard`], which combines:
//! 1. **Cycle detection** via a visiting set
//! 2. **Depth limiting** to keep the native stack bounded
//! 3. **Iteration bounding** so pathological models cannot stall a query
//!
//! Limits are named by [`RecursionProfile`] so call sites read as intent
//! rather than magic numbers.

use lumen_common::limits::{
    MAX_ALIAS_RESOLUTION_DEPTH, MAX_SUPERTYPE_WALK_DEPTH, MAX_TYPE_ARGUMENT_DEPTH,
    MAX_TYPE_WALK_ITERATIONS, MAX_VISITING_SET_SIZE,
};
use rustc_hash::FxHashSet;
use std::hash::Hash;

// ---------------------------------------------------------------------------
// RecursionProfile
// ---------------------------------------------------------------------------

/// Named recursion limit presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecursionProfile {
    /// Following substituted supertypes in the type-argument-sensitive
    /// recursion check.
    SupertypeWalk,

    /// Expanding aliases, possibly through other aliases.
    AliasResolution,

    /// Descending into nested type arguments (variance and self-type scans).
    TypeArgumentScan,

    /// Custom limits for one-off or test scenarios.
    Custom { max_depth: u32, max_iterations: u32 },
}

impl RecursionProfile {
    pub const fn max_depth(self) -> u32 {
        match self {
            Self::SupertypeWalk => MAX_SUPERTYPE_WALK_DEPTH,
            Self::AliasResolution => MAX_ALIAS_RESOLUTION_DEPTH,
            Self::TypeArgumentScan => MAX_TYPE_ARGUMENT_DEPTH,
            Self::Custom { max_depth, .. } => max_depth,
        }
    }

    pub const fn max_iterations(self) -> u32 {
        match self {
            Self::SupertypeWalk | Self::AliasResolution | Self::TypeArgumentScan => {
                MAX_TYPE_WALK_ITERATIONS
            }
            Self::Custom { max_iterations, .. } => max_iterations,
        }
    }
}

// ---------------------------------------------------------------------------
// RecursionResult
// ---------------------------------------------------------------------------

/// Result of attempting to enter a recursive computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecursionResult {
    /// Proceed with the computation.
    Entered,
    /// This key is already being visited.
    Cycle,
    /// Maximum recursion depth exceeded.
    DepthExceeded,
    /// Maximum iteration count exceeded.
    IterationExceeded,
}

impl RecursionResult {
    #[inline]
    pub fn is_entered(self) -> bool {
        matches!(self, Self::Entered)
    }

    #[inline]
    pub fn is_cycle(self) -> bool {
        matches!(self, Self::Cycle)
    }

    #[inline]
    pub fn is_exceeded(self) -> bool {
        matches!(self, Self::DepthExceeded | Self::IterationExceeded)
    }
}

// ---------------------------------------------------------------------------
// RecursionGuard
// ---------------------------------------------------------------------------

/// Tracks recursion state for cycle detection, depth limiting and iteration
/// bounding.
///
/// ```ignore
/// let mut guard = RecursionGuard::with_profile(RecursionProfile::SupertypeWalk);
/// match guard.enter(decl) {
///     RecursionResult::Entered => {
///         let result = walk_supertypes(decl);
///         guard.leave(decl);
///         result
///     }
///     RecursionResult::Cycle => on_cycle(),
///     _ => give_up(),
/// }
/// ```
///
/// In debug builds, dropping a guard with entries still in the visiting set
/// panics, which catches a forgotten `leave()`.
pub struct RecursionGuard<K: Hash + Eq + Copy> {
    visiting: FxHashSet<K>,
    depth: u32,
    iterations: u32,
    max_depth: u32,
    max_iterations: u32,
    max_visiting: u32,
    exceeded: bool,
}

impl<K: Hash + Eq + Copy> RecursionGuard<K> {
    pub fn new(max_depth: u32, max_iterations: u32) -> Self {
        Self {
            visiting: FxHashSet::default(),
            depth: 0,
            iterations: 0,
            max_depth,
            max_iterations,
            max_visiting: MAX_VISITING_SET_SIZE,
            exceeded: false,
        }
    }

    pub fn with_profile(profile: RecursionProfile) -> Self {
        Self::new(profile.max_depth(), profile.max_iterations())
    }

    /// Try to enter a recursive computation for `key`.
    ///
    /// On [`RecursionResult::Entered`] the caller must call
    /// [`leave`](Self::leave) with the same key when done.
    pub fn enter(&mut self, key: K) -> RecursionResult {
        self.iterations = self.iterations.saturating_add(1);

        if self.iterations > self.max_iterations {
            self.exceeded = true;
            return RecursionResult::IterationExceeded;
        }
        if self.depth >= self.max_depth {
            self.exceeded = true;
            return RecursionResult::DepthExceeded;
        }
        if self.visiting.contains(&key) {
            return RecursionResult::Cycle;
        }
        if self.visiting.len() as u32 >= self.max_visiting {
            self.exceeded = true;
            return RecursionResult::DepthExceeded;
        }

        self.visiting.insert(key);
        self.depth += 1;
        RecursionResult::Entered
    }

    /// Leave a recursive computation for `key`.
    pub fn leave(&mut self, key: K) {
        let was_present = self.visiting.remove(&key);
        debug_assert!(
            was_present,
            "RecursionGuard::leave() called with a key that is not in the visiting set"
        );
        self.depth = self.depth.saturating_sub(1);
    }

    /// Run `f` inside a guarded scope for `key`.
    ///
    /// Returns `Err(reason)` without running `f` if entry was denied.
    pub fn scope<T>(
        &mut self,
        key: K,
        f: impl FnOnce(&mut Self) -> T,
    ) -> Result<T, RecursionResult> {
        match self.enter(key) {
            RecursionResult::Entered => {
                let result = f(self);
                self.leave(key);
                Ok(result)
            }
            denied => Err(denied),
        }
    }

    #[inline]
    pub fn is_visiting(&self, key: &K) -> bool {
        self.visiting.contains(key)
    }

    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    #[inline]
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    #[inline]
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Sticky: stays `true` once any limit was hit, until [`reset`](Self::reset).
    #[inline]
    pub fn is_exceeded(&self) -> bool {
        self.exceeded
    }

    pub fn reset(&mut self) {
        self.visiting.clear();
        self.depth = 0;
        self.iterations = 0;
        self.exceeded = false;
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

#[cfg(test)]
#[path = "../tests/recursion_tests.rs"]
mod tests;
