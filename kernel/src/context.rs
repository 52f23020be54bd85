//! Evaluation context contract and its scoped state guard.
//!
//! The context is the single shared mutable resource of a search: action
//! logic reads it to decide whether an edge fires. The search writes exactly
//! one thing into it, the state set of the position being expanded, and only
//! through [`ScopedStates`]:
//!
//! ```text
//! ScopedStates::apply(ctx, p, states)   // ctx[p] = states, prior saved
//!   ... actions read ctx through the guard (shared borrow only) ...
//! drop(guard)                           // ctx[p] = prior (possibly unset)
//! ```
//!
//! The guard holds the only mutable borrow of the context and hands out
//! shared borrows, so collaborators cannot observe a half-applied context and
//! scopes cannot nest.

use std::ops::Deref;

use crate::carrier::position::Position;
use crate::carrier::state_set::StateSet;

/// A mutable evaluation context that holds per-position state sets.
pub trait EvaluationContext {
    /// Identity of the rule graph this context was built for.
    ///
    /// A session refuses to run against a context with a different identity.
    fn graph_id(&self) -> &str;

    /// The state set currently visible for `position`, if any.
    fn position_states(&self, position: Position) -> Option<&StateSet>;

    /// Replace the state set for `position` (`None` unsets it) and return
    /// the previous value.
    fn replace_position_states(
        &mut self,
        position: Position,
        states: Option<StateSet>,
    ) -> Option<StateSet>;
}

/// RAII guard: applies a position's states on construction and restores the
/// prior value on drop, on every exit path including unwinding.
pub struct ScopedStates<'a, C: EvaluationContext + ?Sized> {
    ctx: &'a mut C,
    position: Position,
    prior: Option<StateSet>,
}

impl<'a, C: EvaluationContext + ?Sized> ScopedStates<'a, C> {
    /// Make `states` visible for `position` until the guard is dropped.
    pub fn apply(ctx: &'a mut C, position: Position, states: StateSet) -> Self {
        let prior = ctx.replace_position_states(position, Some(states));
        Self {
            ctx,
            position,
            prior,
        }
    }

    /// The position whose states this guard applied.
    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }
}

impl<C: EvaluationContext + ?Sized> Deref for ScopedStates<'_, C> {
    type Target = C;

    fn deref(&self) -> &C {
        self.ctx
    }
}

impl<C: EvaluationContext + ?Sized> Drop for ScopedStates<'_, C> {
    fn drop(&mut self) {
        let prior = self.prior.take();
        self.ctx.replace_position_states(self.position, prior);
    }
}
