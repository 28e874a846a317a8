//! Centralized limits and thresholds for the semantic checkers.
//!
//! Shared constants for recursion depths, operation counts and inline
//! capacities. Type-graph walks in `lumen-model` read their limits through
//! `RecursionProfile`, which refers back to the constants defined here.

// =============================================================================
// Recursion Depth Limits
// =============================================================================

/// Maximum depth of the type-argument-sensitive supertype walk.
///
/// Substituting arguments can produce a new type at every step, so this walk
/// has no finite visited set. Reaching the limit is treated as recursion:
///
/// ```text
/// interface Grow<T> satisfies Grow<Grow<T>> {}
/// ```
///
/// The raw walk follows declarations only and needs no limit.
pub const MAX_SUPERTYPE_WALK_DEPTH: u32 = 100;

/// Maximum depth for type alias resolution.
///
/// Alias targets are expanded with their arguments substituted. A circular
/// alias (`alias Loop => Loop`) stops expanding here and is left as written.
pub const MAX_ALIAS_RESOLUTION_DEPTH: u32 = 128;

/// Maximum nesting of type arguments inspected by the variance and self-type
/// scans (`List<List<List<...>>>`).
pub const MAX_TYPE_ARGUMENT_DEPTH: u32 = 50;

// =============================================================================
// Operation Count Limits
// =============================================================================

/// Total enter attempts allowed for a single type-graph query.
pub const MAX_TYPE_WALK_ITERATIONS: u32 = 100_000;

/// Maximum number of declarations a single walk may hold in its visiting set.
pub const MAX_VISITING_SET_SIZE: u32 = 10_000;

// =============================================================================
// Stack Growth
// =============================================================================

/// Remaining stack below which the AST walk switches to a fresh segment.
pub const STACK_RED_ZONE: usize = 64 * 1024;

/// Size of each additional stack segment allocated for deep AST walks.
pub const STACK_GROWTH_SIZE: usize = 1024 * 1024;

// =============================================================================
// Capacity Limits
// =============================================================================

/// Inline capacity for type argument / union member lists before spilling to
/// the heap.
pub const TYPE_LIST_INLINE: usize = 4;
