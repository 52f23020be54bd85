//! `lattice`: a grid with a spendable resource, for frontier pressure.
//!
//! Cells are named `r{row}c{col}`. From every cell:
//!
//! - `right` and `down` walk to the neighbour for cost 1;
//! - `dash` jumps diagonally for cost 1 but spends one `SOUL`, and only
//!   while the `DASH` term is set.
//!
//! Dashing reaches a cell cheaper, walking reaches it with more soul left.
//! Neither arrival dominates the other, so cells accumulate several
//! incomparable states and the frontier has real work to do.

use std::sync::Arc;

use lodestar_kernel::carrier::position::Position;
use lodestar_kernel::carrier::schema::{Preference, StateBuilder, StateSchema};
use lodestar_kernel::carrier::state_set::StateSet;
use lodestar_kernel::error::KernelError;
use lodestar_search::action::StateLogic;
use lodestar_search::policy::{SearchParams, StartPosition};

use crate::context::ProgressContext;
use crate::graph::{GraphError, RuleGraph};

pub const WORLD_ID: &str = "lattice";

/// Name of the spent-resource field.
pub const SOUL: &str = "SOUL";

/// Context term that enables dashing.
pub const DASH: &str = "DASH";

/// Lattice construction failure.
#[derive(Debug, thiserror::Error)]
pub enum LatticeError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Schema(#[from] KernelError),
}

/// Spends one soul per use; unavailable once the budget is exhausted.
struct Dash {
    schema: Arc<StateSchema>,
}

impl StateLogic<ProgressContext> for Dash {
    fn evaluate(
        &self,
        ctx: &ProgressContext,
        _source: Position,
        input: &StateSet,
    ) -> Option<StateSet> {
        if ctx.term(DASH) == 0 {
            return None;
        }
        input.filter_map(|state| {
            self.schema
                .modify(state)
                .add_int(SOUL, 1)
                .ok()
                .map(StateBuilder::build)
        })
    }

    fn evaluate_stateless(&self, ctx: &ProgressContext, _source: Position) -> bool {
        ctx.term(DASH) != 0
    }
}

/// A lattice graph together with the schema of its states.
#[derive(Debug)]
pub struct Lattice {
    pub graph: RuleGraph<ProgressContext>,
    pub schema: Arc<StateSchema>,
    pub width: u32,
    pub height: u32,
}

impl Lattice {
    /// Build a `width × height` lattice where at most `max_soul` dashes fit
    /// on one path.
    ///
    /// # Errors
    ///
    /// Returns [`LatticeError`] if `max_soul` is negative.
    pub fn new(width: u32, height: u32, max_soul: i32) -> Result<Self, LatticeError> {
        let schema = Arc::new(StateSchema::new().with_int(
            SOUL,
            0,
            max_soul,
            Preference::LowerIsBetter,
        )?);

        let mut b = RuleGraph::builder(WORLD_ID);
        for row in 0..height {
            for col in 0..width {
                let here = cell(row, col);
                b.position(&here);
                if col + 1 < width {
                    b.link(&format!("{here}>right"), &here, &cell(row, col + 1), 1.0)?;
                }
                if row + 1 < height {
                    b.link(&format!("{here}>down"), &here, &cell(row + 1, col), 1.0)?;
                }
                if row + 1 < height && col + 1 < width {
                    b.transform(
                        &format!("{here}>dash"),
                        &here,
                        &cell(row + 1, col + 1),
                        1.0,
                        Dash {
                            schema: Arc::clone(&schema),
                        },
                    )?;
                }
            }
        }

        Ok(Self {
            graph: b.build(),
            schema,
            width,
            height,
        })
    }

    /// Initial states: nothing spent.
    #[must_use]
    pub fn initial_states(&self) -> StateSet {
        StateSet::single(self.schema.default_state())
    }

    /// From the top-left to the bottom-right corner.
    #[must_use]
    pub fn corner_params(&self) -> Option<SearchParams> {
        let start = self.graph.position(&cell(0, 0))?;
        let goal = self
            .graph
            .position(&cell(self.height.checked_sub(1)?, self.width.checked_sub(1)?))?;
        Some(SearchParams::new(
            vec![StartPosition::new(start, self.initial_states())],
            vec![goal],
        ))
    }

    /// A context for this lattice, with dashing enabled or not.
    #[must_use]
    pub fn context(&self, dash: bool) -> ProgressContext {
        self.graph.new_context().with_term(DASH, i32::from(dash))
    }
}

/// Name of the cell at `row`, `col`.
#[must_use]
pub fn cell(row: u32, col: u32) -> String {
    format!("r{row}c{col}")
}
