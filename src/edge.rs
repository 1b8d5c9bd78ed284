//! The atomic directed edge of a flow network.
//!
//! An [`Edge`] is owned by the arena in [`crate::graph::Graph`] and referred
//! to everywhere else by its stable [`EdgeId`]. There is exactly one `Edge`
//! record per directed `(start, end)` pair; traversing it backward (current
//! vertex equals `end`) is the "residual edge" — there is no separate
//! reverse-edge record.

use log::trace;

use crate::graph::VertexId;

/// Stable index into `Graph`'s edge arena.
pub type EdgeId = u32;

/// Outcome of a single push across an edge, reported back to the caller
/// (`Graph::push_relabel_step`) so it can apply the cross-vertex bookkeeping
/// (clearing `dead_end`, rewinding the cursor, and enqueuing newly active
/// vertices) that does not belong on `Edge` itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PushOutcome {
    /// Flow actually moved across the edge.
    pub delta: i64,
    /// `true` iff the edge was left with spare residual capacity on the
    /// traversed side, i.e. this was *not* a saturating push and the cursor
    /// should be rewound so the edge can be retried once the vertex is
    /// active again.
    pub non_saturating: bool,
    /// `true` iff the vertex receiving flow transitioned from zero excess to
    /// positive excess and should be (re-)activated.
    pub activated: bool,
}

/// A directed edge `start -> end` with an integer capacity and a current
/// flow assignment, `0 <= flow <= capacity`.
#[derive(Debug, Clone, Copy)]
pub struct Edge {
    pub start: VertexId,
    pub end: VertexId,
    pub capacity: i64,
    pub flow: i64,
    /// Set by `Graph::build_layered_network` / `Graph::update_min_flow_increment`
    /// to mark an edge as excluded from the current layered network.
    pub blocked: bool,
}

impl Edge {
    pub fn new(start: VertexId, end: VertexId, capacity: i64) -> Self {
        Self {
            start,
            end,
            capacity,
            flow: 0,
            blocked: false,
        }
    }

    pub fn residual_capacity_forward(&self) -> i64 {
        self.capacity - self.flow
    }

    pub fn residual_capacity_backward(&self) -> i64 {
        self.flow
    }

    /// Sets `flow` directly, rejecting values outside `[0, capacity]`.
    pub fn set_flow(&mut self, flow: i64) -> Result<(), ()> {
        if flow < 0 || flow > self.capacity {
            return Err(());
        }
        self.flow = flow;
        Ok(())
    }

    /// Push-relabel push in the edge's natural direction. `start_excess` is
    /// the sentinel `-1` iff `self.start` is the current source of the
    /// push-relabel run (infinite supply, never decremented).
    pub fn push_forward(&mut self, start_excess: &mut i64, end_excess: &mut i64) -> PushOutcome {
        let is_source = *start_excess == -1;
        let remaining = self.residual_capacity_forward();
        let delta = if is_source {
            remaining
        } else {
            remaining.min(*start_excess)
        };

        self.flow += delta;
        if !is_source {
            *start_excess -= delta;
        }
        let was_zero = *end_excess == 0;
        *end_excess += delta;

        trace!(
            "push_forward {}->{}: delta={}, flow={}/{}",
            self.start, self.end, delta, self.flow, self.capacity
        );

        PushOutcome {
            delta,
            non_saturating: !is_source && delta < remaining,
            activated: was_zero && delta > 0,
        }
    }

    /// Push-relabel push across the residual (reverse) direction: the
    /// current vertex is `self.end`, flow is being sent back toward
    /// `self.start`.
    pub fn push_backward(&mut self, start_excess: &mut i64, end_excess: &mut i64) -> PushOutcome {
        let start_is_source = *start_excess == -1;
        let remaining = self.residual_capacity_backward();
        let delta = remaining.min(*end_excess);

        self.flow -= delta;
        if !start_is_source {
            *start_excess += delta;
        }
        let was_zero = *start_excess == 0;
        *end_excess -= delta;

        trace!(
            "push_backward {}<-{}: delta={}, flow={}/{}",
            self.start, self.end, delta, self.flow, self.capacity
        );

        PushOutcome {
            delta,
            non_saturating: delta < remaining,
            activated: !start_is_source && was_zero && delta > 0,
        }
    }
}
