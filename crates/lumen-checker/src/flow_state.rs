//! Flow state of one watched declaration.
//!
//! `FlowState` is a `Copy` record threaded through the statement walk. All
//! merges are pure functions over states, so each control-flow construct
//! reads as "compute branch states, then combine".
//!
//! Assignment forms a three-point lattice per path:
//! unassigned < possibly assigned < definitely assigned, and
//! `definite => possible` holds on every reachable state. A state whose path
//! left the construct (`return`, `throw`, `break`, `continue`) is *vacuous*:
//! it is marked `exited` and counts as definitely assigned.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlowState {
    /// The declaration has been passed.
    pub declared: bool,
    /// Assigned on every path reaching this point.
    pub definite: bool,
    /// Assigned on some path reaching this point.
    pub possible: bool,
    /// Inside a region where assignment is not allowed: a loop, a nested
    /// declaration body, or the declaration itself.
    pub barrier: bool,
    /// Every path to this point has already left the enclosing construct.
    pub exited: bool,
}

impl Default for FlowState {
    fn default() -> Self {
        Self::initial()
    }
}

impl FlowState {
    /// State at the start of the scope, before the declaration.
    pub const fn initial() -> Self {
        Self {
            declared: false,
            definite: false,
            possible: false,
            barrier: true,
            exited: false,
        }
    }

    #[must_use]
    pub const fn assigned(self) -> Self {
        Self {
            definite: true,
            possible: true,
            ..self
        }
    }

    #[must_use]
    pub const fn declared(self) -> Self {
        Self {
            declared: true,
            barrier: false,
            ..self
        }
    }

    #[must_use]
    pub const fn with_barrier(self) -> Self {
        Self {
            barrier: true,
            ..self
        }
    }

    /// The state after a jump: vacuously assigned, `possible` unchanged.
    #[must_use]
    pub const fn exit(self) -> Self {
        Self {
            definite: true,
            exited: true,
            ..self
        }
    }

    /// Merge the states at the end of alternative branches that all started
    /// from `entry`. An empty `arms` slice yields `entry`.
    ///
    /// `declared` and `barrier` come from `entry`. An exited arm is
    /// vacuously definite but still counts towards `possible`.
    #[must_use]
    pub fn join(entry: FlowState, arms: &[FlowState]) -> FlowState {
        if arms.is_empty() {
            return entry;
        }
        if arms.iter().all(|a| a.exited) {
            return entry.exit();
        }
        let definite = entry.definite || arms.iter().all(|a| a.definite);
        let possible = entry.possible || arms.iter().any(|a| a.possible);
        FlowState {
            declared: entry.declared,
            definite,
            possible,
            barrier: entry.barrier,
            exited: false,
        }
    }

    /// State after a loop whose body ended in `body`. The body may run zero
    /// times, so only `possible` survives.
    #[must_use]
    pub const fn after_loop(entry: FlowState, body: FlowState) -> FlowState {
        FlowState {
            possible: entry.possible || body.possible,
            ..entry
        }
    }

    /// Undo what a clause that may not complete must not leak: definiteness,
    /// the declaration itself, and having exited.
    #[must_use]
    pub const fn restore_partial(self, entry: FlowState) -> FlowState {
        FlowState {
            definite: entry.definite,
            declared: entry.declared,
            exited: entry.exited,
            ..self
        }
    }

    /// Whether the analysis may rely on the state: at least one path reaches
    /// this point.
    #[inline]
    pub const fn is_reachable(self) -> bool {
        !self.exited
    }
}

#[cfg(test)]
#[path = "../tests/flow_state_tests.rs"]
mod tests;
