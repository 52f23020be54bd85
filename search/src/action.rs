//! Actions: directed, costed, possibly conditional edges between positions.
//!
//! An action is evaluated against an evaluation context and the state set of
//! the node being expanded. Three kinds of logic exist:
//!
//! - **Gate**: a stateless predicate over the context. Passes the input
//!   states through unchanged, or does not fire.
//! - **Transform**: state-producing logic. Maps the input set to an output
//!   set, or does not fire. Carries a separate stateless predicate used when
//!   the search runs without state tracking.
//! - **Link**: unconditional. Always passes the input states through.
//!
//! An action whose source is [`ActionSource::Any`] is a *jump*: it may be
//! offered from any position.

use std::fmt;
use std::sync::Arc;

use lodestar_kernel::carrier::position::{Position, PositionTable};
use lodestar_kernel::carrier::state_set::StateSet;

/// Stateless edge condition.
pub trait GateLogic<C>: Send + Sync {
    /// Whether the edge may be taken given the context as currently scoped.
    fn can_pass(&self, ctx: &C) -> bool;
}

impl<C, F> GateLogic<C> for F
where
    F: Fn(&C) -> bool + Send + Sync,
{
    fn can_pass(&self, ctx: &C) -> bool {
        self(ctx)
    }
}

/// State-producing edge logic.
pub trait StateLogic<C>: Send + Sync {
    /// Map `input` (the states at `source`) to the states reached at the
    /// target, or `None` if the edge cannot be taken from any of them.
    ///
    /// Returning `Some(StateSet::indeterminate())` means "reached, state not
    /// tracked".
    fn evaluate(&self, ctx: &C, source: Position, input: &StateSet) -> Option<StateSet>;

    /// Whether the edge could be taken from `source` without tracking state.
    fn evaluate_stateless(&self, ctx: &C, source: Position) -> bool;
}

/// The logic attached to an action.
pub enum ActionLogic<C> {
    Gate(Arc<dyn GateLogic<C>>),
    Transform(Arc<dyn StateLogic<C>>),
    Link,
}

impl<C> Clone for ActionLogic<C> {
    fn clone(&self) -> Self {
        match self {
            Self::Gate(logic) => Self::Gate(Arc::clone(logic)),
            Self::Transform(logic) => Self::Transform(Arc::clone(logic)),
            Self::Link => Self::Link,
        }
    }
}

impl<C> fmt::Debug for ActionLogic<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Gate(_) => "Gate",
            Self::Transform(_) => "Transform",
            Self::Link => "Link",
        })
    }
}

/// Where an action may be taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionSource {
    Fixed(Position),
    /// A jump: offered from any position.
    Any,
}

impl ActionSource {
    /// Whether a node at `position` may take an action with this source.
    #[must_use]
    pub fn admits(self, position: Position) -> bool {
        match self {
            Self::Fixed(source) => source == position,
            Self::Any => true,
        }
    }
}

impl From<Position> for ActionSource {
    fn from(position: Position) -> Self {
        Self::Fixed(position)
    }
}

/// A directed, costed edge.
///
/// Immutable once built; shared between search nodes as `Arc<Action<C>>`.
pub struct Action<C> {
    name: String,
    source: ActionSource,
    target: Position,
    cost: f64,
    logic: ActionLogic<C>,
}

impl<C> Action<C> {
    /// Build an action from its parts.
    ///
    /// # Panics
    ///
    /// Panics if `cost` is negative, NaN or infinite. Non-negative edge
    /// costs are required for the first hit at a destination to be optimal.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        source: impl Into<ActionSource>,
        target: Position,
        cost: f64,
        logic: ActionLogic<C>,
    ) -> Self {
        assert!(
            cost.is_finite() && cost >= 0.0,
            "action cost must be finite and non-negative, got {cost}"
        );
        Self {
            name: name.into(),
            source: source.into(),
            target,
            cost,
            logic,
        }
    }

    /// A stateless, conditional edge.
    #[must_use]
    pub fn gate(
        name: impl Into<String>,
        source: impl Into<ActionSource>,
        target: Position,
        cost: f64,
        logic: impl GateLogic<C> + 'static,
    ) -> Self {
        Self::new(name, source, target, cost, ActionLogic::Gate(Arc::new(logic)))
    }

    /// A state-producing edge.
    #[must_use]
    pub fn transform(
        name: impl Into<String>,
        source: impl Into<ActionSource>,
        target: Position,
        cost: f64,
        logic: impl StateLogic<C> + 'static,
    ) -> Self {
        Self::new(
            name,
            source,
            target,
            cost,
            ActionLogic::Transform(Arc::new(logic)),
        )
    }

    /// An unconditional edge.
    #[must_use]
    pub fn link(
        name: impl Into<String>,
        source: impl Into<ActionSource>,
        target: Position,
        cost: f64,
    ) -> Self {
        Self::new(name, source, target, cost, ActionLogic::Link)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn source(&self) -> ActionSource {
        self.source
    }

    #[must_use]
    pub fn target(&self) -> Position {
        self.target
    }

    #[must_use]
    pub fn cost(&self) -> f64 {
        self.cost
    }

    #[must_use]
    pub fn logic(&self) -> &ActionLogic<C> {
        &self.logic
    }

    #[must_use]
    pub fn is_jump(&self) -> bool {
        self.source == ActionSource::Any
    }

    /// Whether evaluation passes states through unchanged.
    #[must_use]
    pub fn is_stateless(&self) -> bool {
        !matches!(self.logic, ActionLogic::Transform(_))
    }

    /// Short kind tag used in path renderings.
    #[must_use]
    pub fn prefix(&self) -> &'static str {
        if self.is_jump() {
            return "jump";
        }
        match self.logic {
            ActionLogic::Gate(_) => "gate",
            ActionLogic::Transform(_) => "xfrm",
            ActionLogic::Link => "link",
        }
    }

    /// Evaluate with state tracking.
    ///
    /// `None` means the action cannot fire from `input`.
    pub fn evaluate(&self, ctx: &C, source: Position, input: &StateSet) -> Option<StateSet> {
        match &self.logic {
            ActionLogic::Gate(gate) => gate.can_pass(ctx).then(|| input.clone()),
            ActionLogic::Transform(logic) => logic.evaluate(ctx, source, input),
            ActionLogic::Link => Some(input.clone()),
        }
    }

    /// Evaluate without state tracking.
    ///
    /// A transform degrades to its stateless predicate and reports success
    /// with the indeterminate marker. Gates and links behave as in
    /// [`Action::evaluate`].
    pub fn evaluate_stateless(
        &self,
        ctx: &C,
        source: Position,
        input: &StateSet,
    ) -> Option<StateSet> {
        match &self.logic {
            ActionLogic::Transform(logic) => logic
                .evaluate_stateless(ctx, source)
                .then(StateSet::indeterminate),
            _ => self.evaluate(ctx, source, input),
        }
    }

    /// `prefix: source -> cost -> target`, resolving position names through
    /// `table`. Jumps omit the source.
    #[must_use]
    pub fn describe(&self, table: &PositionTable) -> String {
        let target = table.display(self.target);
        match self.source {
            ActionSource::Fixed(source) => format!(
                "{}: {} -> {} -> {}",
                self.prefix(),
                table.display(source),
                self.cost,
                target
            ),
            ActionSource::Any => format!("{}: {} -> {}", self.prefix(), self.cost, target),
        }
    }
}

impl<C> fmt::Debug for Action<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("name", &self.name)
            .field("source", &self.source)
            .field("target", &self.target)
            .field("cost", &self.cost)
            .field("logic", &self.logic)
            .finish()
    }
}

impl<C> fmt::Display for Action<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.source {
            ActionSource::Fixed(source) => write!(
                f,
                "{}: {} -> {} -> {}",
                self.prefix(),
                source,
                self.cost,
                self.target
            ),
            ActionSource::Any => write!(f, "{}: {} -> {}", self.prefix(), self.cost, self.target),
        }
    }
}
