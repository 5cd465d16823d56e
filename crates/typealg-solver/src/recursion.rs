//! Recursion guards for cycle detection, depth limiting and iteration
//! bounding in the solver's recursive computations.
//!
//! Normalization and subtype checking recurse over the structure of a
//! [`Type`](crate::Type), and both re-enter themselves on values a rule has
//! just built. Instead of ad hoc `visited` sets
//! in every component, each one owns a guard configured by a
//! [`RecursionProfile`]:
//!
//! ```ignore
//! let guard = RecursionGuard::<(Type, Type)>::with_profile(RecursionProfile::SubtypeCheck);
//! let depth = DepthCounter::with_profile(RecursionProfile::Normalization);
//! ```
//!
//! In debug builds dropping a guard with entries still active panics, which
//! catches a forgotten `leave()` on an early-return path.

use rustc_hash::FxHashSet;
use std::hash::Hash;

/// Upper bound on `structural step -> subtyping step` rounds for one type.
///
/// Real inputs settle in a handful of rounds; hitting the bound is reported
/// as `NormalizationLimitExceeded`.
pub const MAX_FIXPOINT_ROUNDS: u32 = 64;

// ---------------------------------------------------------------------------
// RecursionProfile
// ---------------------------------------------------------------------------

/// Named recursion limit presets.
///
/// Each profile encodes a `(max_depth, max_iterations)` pair for one kind of
/// recursive computation, so limits live in one place instead of as magic
/// numbers at call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecursionProfile {
    /// Relation queries between two types.
    ///
    /// Used by `SubtypeChecker`. The depth bounds nested nominal remappings
    /// (`MutableList<T>` rewritten as `List<out T>` and compared again);
    /// plain structural descent is not counted. The iteration budget is per
    /// top-level query.
    ///
    /// depth = 100, iterations = 100,000
    SubtypeCheck,

    /// Nested rule rebuilds during normalization.
    ///
    /// Used by `TypeNormalizer`. Only compounds built by a rewrite rule and
    /// normalized on the spot count against the depth; normalizing the
    /// children of the input does not.
    ///
    /// depth = 64, iterations = 100,000
    Normalization,

    /// Walks over the declared supertype graph.
    ///
    /// Used by `DeclEnvironment` when composing effective supertypes.
    ///
    /// depth = 32, iterations = 10,000
    NominalWalk,

    /// Custom limits for one-off or test scenarios.
    Custom { max_depth: u32, max_iterations: u32 },
}

impl RecursionProfile {
    /// Maximum recursion depth for this profile.
    pub const fn max_depth(self) -> u32 {
        match self {
            Self::SubtypeCheck => 100,
            Self::Normalization => 64,
            Self::NominalWalk => 32,
            Self::Custom { max_depth, .. } => max_depth,
        }
    }

    /// Maximum iteration count for this profile.
    pub const fn max_iterations(self) -> u32 {
        match self {
            Self::SubtypeCheck => 100_000,
            Self::Normalization => 100_000,
            Self::NominalWalk => 10_000,
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
}

// ---------------------------------------------------------------------------
// RecursionGuard
// ---------------------------------------------------------------------------

/// Tracks the keys currently being computed plus depth and total work.
///
/// Keys are owned values (`(Type, Type)` pairs for the subtype checker), so
/// `leave` takes the key by reference.
///
/// ```ignore
/// match guard.enter(key.clone()) {
///     RecursionResult::Entered => {
///         let result = do_work();
///         guard.leave(&key);
///         result
///     }
///     RecursionResult::Cycle => on_cycle(),
///     RecursionResult::DepthExceeded | RecursionResult::IterationExceeded => on_limit(),
/// }
/// ```
pub struct RecursionGuard<K: Hash + Eq + Clone> {
    visiting: FxHashSet<K>,
    depth: u32,
    iterations: u32,
    max_depth: u32,
    max_iterations: u32,
}

impl<K: Hash + Eq + Clone> RecursionGuard<K> {
    /// Create a guard with explicit limits.
    ///
    /// Prefer [`with_profile`](Self::with_profile) for standard use cases.
    pub fn new(max_depth: u32, max_iterations: u32) -> Self {
        Self {
            visiting: FxHashSet::default(),
            depth: 0,
            iterations: 0,
            max_depth,
            max_iterations,
        }
    }

    /// A guard that detects cycles and bounds total work but never limits
    /// depth.
    pub fn unbounded_depth(max_iterations: u32) -> Self {
        Self::new(u32::MAX, max_iterations)
    }

    pub fn with_profile(profile: RecursionProfile) -> Self {
        Self::new(profile.max_depth(), profile.max_iterations())
    }

    /// Try to enter a recursive computation for `key`.
    ///
    /// On [`RecursionResult::Entered`] the caller **must** call
    /// [`leave`](Self::leave) with the same key when done. Limits are checked
    /// before cycles: iterations, then depth, then the visiting set.
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

        self.visiting.insert(key);
        self.depth += 1;
        RecursionResult::Entered
    }

    /// Leave a computation previously entered with `key`.
    pub fn leave(&mut self, key: &K) {
        let was_present = self.visiting.remove(key);

        debug_assert!(
            was_present,
            "RecursionGuard::leave() called with a key that is not in the visiting set"
        );

        self.depth = self.depth.saturating_sub(1);
    }

    #[inline]
    pub fn is_visiting(&self, key: &K) -> bool {
        self.visiting.contains(key)
    }

    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Total enter attempts so far (successful or not).
    #[inline]
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.depth > 0
    }

    #[inline]
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    #[inline]
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    /// Reset all state while preserving configured limits.
    pub fn reset(&mut self) {
        self.visiting.clear();
        self.depth = 0;
        self.iterations = 0;
    }
}

#[cfg(debug_assertions)]
impl<K: Hash + Eq + Clone> Drop for RecursionGuard<K> {
    fn drop(&mut self) {
        if !std::thread::panicking() && !self.visiting.is_empty() {
            panic!(
                "RecursionGuard dropped with {} active entries still in the visiting set",
                self.visiting.len(),
            );
        }
    }
}

// ---------------------------------------------------------------------------
// DepthCounter
// ---------------------------------------------------------------------------

/// Depth-only guard for computations that may legitimately revisit the same
/// input, such as normalizing a member that also appears in a sibling.
pub struct DepthCounter {
    depth: u32,
    max_depth: u32,
}

impl DepthCounter {
    pub fn new(max_depth: u32) -> Self {
        Self { depth: 0, max_depth }
    }

    /// Only the profile's `max_depth` is used.
    pub fn with_profile(profile: RecursionProfile) -> Self {
        Self::new(profile.max_depth())
    }

    /// Try to enter a deeper level.
    ///
    /// Returns `false` when the limit has been reached; the depth is then
    /// **not** incremented and `leave()` must not be called.
    #[inline]
    pub fn enter(&mut self) -> bool {
        if self.depth >= self.max_depth {
            return false;
        }
        self.depth += 1;
        true
    }

    #[inline]
    pub fn leave(&mut self) {
        debug_assert!(self.depth > 0, "DepthCounter::leave() called at depth 0");
        self.depth = self.depth.saturating_sub(1);
    }

    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    #[inline]
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }
}

#[cfg(debug_assertions)]
impl Drop for DepthCounter {
    fn drop(&mut self) {
        if !std::thread::panicking() && self.depth > 0 {
            panic!("DepthCounter dropped with depth {}", self.depth);
        }
    }
}
