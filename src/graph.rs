//! The graph engine: vertex/edge arenas and the algorithmic primitives both
//! `FlowNetwork::dinic` and `FlowNetwork::goldberg_tarjan` are built from.
//!
//! Vertices are keyed by caller-supplied [`VertexId`]; edges live in a single
//! tombstoned arena shared by every vertex's adjacency lists, so a forward
//! traversal and its residual counterpart are always the same `Edge` record
//! viewed from either end (see `edge.rs`).

use std::collections::VecDeque;

use bitvec::vec::BitVec;
use log::{debug, trace};
use rustc_hash::FxHashMap;

use crate::edge::{Edge, EdgeId};
use crate::vertex::Vertex;

/// Caller-supplied, non-negative vertex identifier. `-1` is reserved by
/// `FlowNetwork` as the "source/sink unset" sentinel.
pub type VertexId = i64;

/// Directed graph with push-relabel and Dinic scratch state attached to each
/// vertex, plus the arena both algorithms share.
#[derive(Debug, Default)]
pub struct Graph {
    vertices: FxHashMap<VertexId, Vertex>,
    /// Insertion order, independent of `vertices`' hash order, so iteration
    /// and `reachable_from`'s bit indices are deterministic.
    order: Vec<VertexId>,
    edges: Vec<Option<Edge>>,
    free_edge_slots: Vec<EdgeId>,
    /// Edges of the current augmenting path, set by `search_augmenting_path`
    /// and consumed by `update_min_flow_increment`.
    pub augmenting_path: Vec<EdgeId>,
    /// FIFO active-vertex queue for push-relabel.
    pub queue: VecDeque<VertexId>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    // ---- vertex/edge lookup (trusted: caller guarantees the id exists) ----

    fn vertex(&self, id: VertexId) -> &Vertex {
        self.vertices.get(&id).expect("vertex id is valid")
    }

    fn vertex_mut(&mut self, id: VertexId) -> &mut Vertex {
        self.vertices.get_mut(&id).expect("vertex id is valid")
    }

    fn edge(&self, id: EdgeId) -> &Edge {
        self.edges[id as usize].as_ref().expect("edge slot is occupied")
    }

    fn edge_mut(&mut self, id: EdgeId) -> &mut Edge {
        self.edges[id as usize].as_mut().expect("edge slot is occupied")
    }

    pub fn get_vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(&id)
    }

    pub fn get_edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id as usize).and_then(|slot| slot.as_ref())
    }

    pub fn get_edge_mut(&mut self, id: EdgeId) -> Option<&mut Edge> {
        self.edges.get_mut(id as usize).and_then(|slot| slot.as_mut())
    }

    pub fn contains_vertex(&self, id: VertexId) -> bool {
        self.vertices.contains_key(&id)
    }

    pub fn vertex_count(&self) -> usize {
        self.order.len()
    }

    pub fn vertex_ids(&self) -> &[VertexId] {
        &self.order
    }

    pub fn find_edge(&self, start: VertexId, end: VertexId) -> Option<EdgeId> {
        self.vertices.get(&start).and_then(|v| {
            v.neighbors
                .iter()
                .copied()
                .find(|&id| self.edge(id).end == end)
        })
    }

    // ---------------------------- vertex CRUD ---------------------------

    /// Inserts a fresh, isolated vertex. Returns `false` if `id` already
    /// exists.
    pub fn add_vertex(&mut self, id: VertexId) -> bool {
        if self.vertices.contains_key(&id) {
            return false;
        }
        self.vertices.insert(id, Vertex::new(id));
        self.order.push(id);
        true
    }

    /// Removes a vertex and every edge touching it. Returns `false` if `id`
    /// does not exist.
    pub fn remove_vertex(&mut self, id: VertexId) -> bool {
        let Some(vertex) = self.vertices.get(&id) else {
            return false;
        };
        let outgoing = vertex.neighbors.clone();
        let incoming = vertex.res_neighbors.clone();

        for edge_id in outgoing {
            let end = self.edge(edge_id).end;
            self.vertex_mut(end).res_neighbors.retain(|&e| e != edge_id);
            self.free_edge_slot(edge_id);
        }
        for edge_id in incoming {
            let start = self.edge(edge_id).start;
            self.vertex_mut(start).neighbors.retain(|&e| e != edge_id);
            self.free_edge_slot(edge_id);
        }

        self.vertices.remove(&id);
        self.order.retain(|&v| v != id);
        true
    }

    fn free_edge_slot(&mut self, id: EdgeId) {
        self.edges[id as usize] = None;
        self.free_edge_slots.push(id);
    }

    // ----------------------------- edge CRUD -----------------------------

    /// Inserts a directed edge `start -> end`. Trusts the caller to have
    /// already validated distinctness, existence, and non-duplication;
    /// `flow_network.rs` is responsible for turning violations into
    /// `FlowError::Validation` before reaching here.
    pub fn add_edge(&mut self, start: VertexId, end: VertexId, capacity: i64) -> EdgeId {
        debug_assert!(start != end, "self-loops are rejected by the facade");
        debug_assert!(self.vertices.contains_key(&start) && self.vertices.contains_key(&end));
        debug_assert!(self.find_edge(start, end).is_none(), "duplicate edge");

        let edge = Edge::new(start, end, capacity);
        let id = if let Some(slot) = self.free_edge_slots.pop() {
            self.edges[slot as usize] = Some(edge);
            slot
        } else {
            self.edges.push(Some(edge));
            (self.edges.len() - 1) as EdgeId
        };

        self.vertex_mut(start).neighbors.push(id);
        self.vertex_mut(end).res_neighbors.push(id);
        id
    }

    /// Removes the edge `start -> end` if present. Returns `false` otherwise.
    pub fn remove_edge(&mut self, start: VertexId, end: VertexId) -> bool {
        let Some(edge_id) = self.find_edge(start, end) else {
            return false;
        };
        self.vertex_mut(start).neighbors.retain(|&e| e != edge_id);
        self.vertex_mut(end).res_neighbors.retain(|&e| e != edge_id);
        self.free_edge_slot(edge_id);
        true
    }

    // ---------------------- algorithmic primitives -----------------------

    /// Zeroes every edge's flow and clears the `blocked` flag.
    pub fn reset_flow(&mut self) {
        for edge in self.edges.iter_mut().flatten() {
            edge.flow = 0;
            edge.blocked = false;
        }
    }

    /// Rebuilds every vertex's `res_neighbors` from the edge arena, resets
    /// cursors, and clears `dead_end`. Called once at the start of each
    /// algorithm run.
    pub fn build_residual_graph(&mut self) {
        for vertex in self.vertices.values_mut() {
            vertex.clear_res_neighbors();
            vertex.dead_end = false;
            vertex.reset_cursor();
        }
        for (id, edge) in self.edges.iter().enumerate() {
            if let Some(edge) = edge {
                self.vertices
                    .get_mut(&edge.end)
                    .expect("edge endpoint exists")
                    .res_neighbors
                    .push(id as EdgeId);
            }
        }
    }

    /// Zeroes every vertex's excess, then marks `source` with the `-1`
    /// infinite-supply sentinel.
    pub fn reset_excess(&mut self, source: VertexId) {
        for vertex in self.vertices.values_mut() {
            vertex.excess = 0;
        }
        self.vertex_mut(source).excess = -1;
    }

    /// Zeroes every vertex's label, then sets `source`'s label to the vertex
    /// count (the standard push-relabel initial height).
    pub fn initialize_labels(&mut self, source: VertexId) {
        let n = self.vertex_count() as i64;
        for vertex in self.vertices.values_mut() {
            vertex.label = 0;
        }
        self.vertex_mut(source).label = n;
    }

    /// Breadth-first layering of the residual graph from `source`. Returns
    /// the sink's layer (>= 1) or `-1` if the sink is unreachable.
    ///
    /// Vertices discovered in the same BFS round as the sink, other than the
    /// sink itself, have their layer reset to `-1`: once the sink's distance
    /// is known, nothing past it can appear on a shortest augmenting path,
    /// so the layered network never extends beyond the sink's depth.
    pub fn build_layered_network(&mut self, source: VertexId, sink: VertexId) -> i32 {
        for vertex in self.vertices.values_mut() {
            vertex.layer = -1;
            vertex.dead_end = false;
            vertex.reset_cursor();
        }
        for edge in self.edges.iter_mut().flatten() {
            edge.blocked = true;
        }

        self.vertex_mut(source).layer = 0;
        let mut frontier = vec![source];
        let mut depth = 0;

        loop {
            if frontier.is_empty() {
                debug!("build_layered_network: sink unreachable");
                return -1;
            }
            let next_depth = depth + 1;
            let mut next_frontier = Vec::new();
            let mut sink_found = false;

            for &u in &frontier {
                let forward = self.vertex(u).neighbors.clone();
                for edge_id in forward {
                    let (v, usable) = {
                        let e = self.edge(edge_id);
                        (e.end, e.residual_capacity_forward() > 0)
                    };
                    if usable && self.vertex(v).layer == -1 {
                        self.vertex_mut(v).layer = next_depth;
                        self.edge_mut(edge_id).blocked = false;
                        if v == sink {
                            sink_found = true;
                        }
                        next_frontier.push(v);
                    }
                }
                let residual = self.vertex(u).res_neighbors.clone();
                for edge_id in residual {
                    let (w, usable) = {
                        let e = self.edge(edge_id);
                        (e.start, e.residual_capacity_backward() > 0)
                    };
                    if usable && self.vertex(w).layer == -1 {
                        self.vertex_mut(w).layer = next_depth;
                        self.edge_mut(edge_id).blocked = false;
                        if w == sink {
                            sink_found = true;
                        }
                        next_frontier.push(w);
                    }
                }
            }

            if sink_found {
                for &v in &next_frontier {
                    if v != sink {
                        self.vertex_mut(v).layer = -1;
                    }
                }
                self.vertex_mut(sink).layer = next_depth;
                debug!("build_layered_network: sink layer {next_depth}");
                return next_depth;
            }
            if next_frontier.is_empty() {
                debug!("build_layered_network: sink unreachable");
                return -1;
            }
            frontier = next_frontier;
            depth = next_depth;
        }
    }

    /// Cursor-driven DFS for a single layered augmenting path from `source`
    /// to `sink`. Only considers edges with `blocked == false` — the ones
    /// `build_layered_network` left open plus any this phase hasn't
    /// saturated or backtracked off of yet. On success, `self.augmenting_path`
    /// holds the edges in traversal order; on failure it is left empty.
    pub fn search_augmenting_path(&mut self, source: VertexId, sink: VertexId) -> bool {
        self.augmenting_path.clear();
        let mut vertex_stack = vec![source];
        let mut current = source;

        loop {
            if current == sink {
                trace!("search_augmenting_path: reached sink, path len {}", self.augmenting_path.len());
                return true;
            }
            if self.vertex(current).dead_end {
                if current == source {
                    return false;
                }
                vertex_stack.pop();
                let last_edge = self
                    .augmenting_path
                    .pop()
                    .expect("non-empty path when backtracking past source");
                self.edge_mut(last_edge).blocked = true;
                current = *vertex_stack.last().expect("source remains on the stack");
                continue;
            }

            let current_layer = self.vertex(current).layer;
            let Some((edge_id, is_residual)) = self.vertex_mut(current).get_next_edge() else {
                continue;
            };
            let edge = *self.edge(edge_id);
            let (next_vertex, usable) = if !is_residual {
                (
                    edge.end,
                    !edge.blocked
                        && self.vertex(edge.end).layer == current_layer + 1
                        && edge.residual_capacity_forward() > 0,
                )
            } else {
                (
                    edge.start,
                    !edge.blocked
                        && self.vertex(edge.start).layer == current_layer + 1
                        && edge.residual_capacity_backward() > 0,
                )
            };
            if usable {
                self.augmenting_path.push(edge_id);
                vertex_stack.push(next_vertex);
                current = next_vertex;
            }
        }
    }

    /// Applies the bottleneck increment along `self.augmenting_path`,
    /// rewinding the originating vertex's cursor for every non-saturating
    /// step, and clears the path. Returns the increment (0 if the path is
    /// empty).
    pub fn update_min_flow_increment(&mut self, source: VertexId) -> i64 {
        if self.augmenting_path.is_empty() {
            return 0;
        }

        let mut current = source;
        let mut steps = Vec::with_capacity(self.augmenting_path.len());
        for &edge_id in &self.augmenting_path {
            let edge = *self.edge(edge_id);
            if edge.start == current {
                steps.push((edge_id, true));
                current = edge.end;
            } else {
                debug_assert_eq!(edge.end, current, "augmenting path is a contiguous walk");
                steps.push((edge_id, false));
                current = edge.start;
            }
        }

        let delta = steps
            .iter()
            .map(|&(id, forward)| {
                let e = self.edge(id);
                if forward {
                    e.residual_capacity_forward()
                } else {
                    e.residual_capacity_backward()
                }
            })
            .min()
            .expect("path has at least one step");

        for &(edge_id, forward) in &steps {
            let (non_saturating, originator) = if forward {
                let e = self.edge_mut(edge_id);
                e.flow += delta;
                let non_saturating = e.flow != e.capacity;
                if !non_saturating {
                    e.blocked = true;
                }
                (non_saturating, e.start)
            } else {
                let e = self.edge_mut(edge_id);
                e.flow -= delta;
                let non_saturating = e.flow != 0;
                if !non_saturating {
                    e.blocked = true;
                }
                (non_saturating, e.end)
            };
            if non_saturating {
                self.vertex_mut(originator).set_previous_edge();
            }
        }

        debug!("update_min_flow_increment: delta={delta}");
        self.augmenting_path.clear();
        delta
    }

    /// Saturates every edge out of `source`, enqueuing every vertex whose
    /// excess transitions from zero. Returns the resulting queue length.
    pub fn initial_push(&mut self, source: VertexId, sink: VertexId) -> usize {
        let outgoing = self.vertex(source).neighbors.clone();
        for edge_id in outgoing {
            let end = self.edge(edge_id).end;
            let mut source_excess = self.vertex(source).excess;
            let mut end_excess = self.vertex(end).excess;
            let outcome = self.edge_mut(edge_id).push_forward(&mut source_excess, &mut end_excess);
            self.vertex_mut(end).excess = end_excess;
            if outcome.activated {
                self.vertex_mut(end).dead_end = false;
                if end != source && end != sink {
                    self.queue.push_back(end);
                }
            }
        }
        self.queue.len()
    }

    /// One round of discharging the head of the active-vertex queue: resets
    /// its cursor, then repeatedly pushes/relabels until its excess is gone
    /// or a relabel raised its label, re-enqueuing it if excess remains.
    /// Returns the resulting queue length.
    pub fn discharge_queue(&mut self, source: VertexId, sink: VertexId) -> usize {
        if let Some(h) = self.queue.pop_front() {
            self.vertex_mut(h).reset_cursor();
            loop {
                if let Some(activated) = self.push_relabel_step(h, source, sink) {
                    self.queue.push_back(activated);
                }
                let excess_zero = self.vertex(h).excess == 0;
                let increased = self.vertex(h).increased_label;
                if excess_zero || increased {
                    break;
                }
            }
            if self.vertex(h).excess > 0 {
                self.vertex_mut(h).increased_label = false;
                self.queue.push_back(h);
            }
        }
        self.queue.len()
    }

    /// A single push-relabel step for `id`: fetch the next edge via the
    /// cursor, push across it if admissible, relabel if the cursor is
    /// exhausted. Returns the far endpoint iff it newly became active (and
    /// is neither `source` nor `sink`).
    fn push_relabel_step(&mut self, id: VertexId, source: VertexId, sink: VertexId) -> Option<VertexId> {
        let Some((edge_id, is_residual)) = self.vertex_mut(id).get_next_edge() else {
            self.relabel_vertex(id);
            self.vertex_mut(id).dead_end = false;
            return None;
        };

        let edge = *self.edge(edge_id);
        let current_label = self.vertex(id).label;
        let (target, admissible) = if !is_residual {
            let target = edge.end;
            let admissible =
                self.vertex(target).label == current_label - 1 && edge.residual_capacity_forward() > 0;
            (target, admissible)
        } else {
            let target = edge.start;
            let admissible =
                self.vertex(target).label == current_label - 1 && edge.residual_capacity_backward() > 0;
            (target, admissible)
        };

        if !admissible {
            if self.vertex(id).dead_end {
                self.relabel_vertex(id);
                self.vertex_mut(id).dead_end = false;
            }
            return None;
        }

        let mut current_excess = self.vertex(id).excess;
        let mut target_excess = self.vertex(target).excess;
        let outcome = if !is_residual {
            self.edge_mut(edge_id).push_forward(&mut current_excess, &mut target_excess)
        } else {
            self.edge_mut(edge_id).push_backward(&mut target_excess, &mut current_excess)
        };
        self.vertex_mut(id).excess = current_excess;
        self.vertex_mut(target).excess = target_excess;

        if outcome.non_saturating {
            self.vertex_mut(id).set_previous_edge();
        }
        if outcome.activated {
            self.vertex_mut(target).dead_end = false;
            if target != source && target != sink {
                return Some(target);
            }
        }
        None
    }

    /// Recomputes `id`'s label as `1 + min(label(v))` over every residual
    /// successor `v` with positive residual capacity. Leaves the label (and
    /// `increased_label`) untouched if there is no such successor, rather
    /// than writing a sentinel maximum.
    fn relabel_vertex(&mut self, id: VertexId) {
        let mut min_label: Option<i64> = None;

        for &edge_id in &self.vertex(id).neighbors.clone() {
            let e = self.edge(edge_id);
            if e.residual_capacity_forward() > 0 {
                let l = self.vertex(e.end).label;
                min_label = Some(min_label.map_or(l, |m| m.min(l)));
            }
        }
        for &edge_id in &self.vertex(id).res_neighbors.clone() {
            let e = self.edge(edge_id);
            if e.residual_capacity_backward() > 0 {
                let l = self.vertex(e.start).label;
                min_label = Some(min_label.map_or(l, |m| m.min(l)));
            }
        }

        if let Some(min_label) = min_label {
            let old_label = self.vertex(id).label;
            let new_label = min_label + 1;
            self.vertex_mut(id).label = new_label;
            self.vertex_mut(id).increased_label = new_label > old_label;
            trace!("relabel_vertex {id}: {old_label} -> {new_label}");
        }
    }

    /// Set of vertices reachable from `source` in the current residual
    /// graph, indexed by position in `vertex_ids()` — the s-side of a
    /// minimum cut once flow is maximum.
    pub fn reachable_from(&self, source: VertexId) -> BitVec {
        let index_of: FxHashMap<VertexId, usize> =
            self.order.iter().enumerate().map(|(i, &id)| (id, i)).collect();
        let mut visited = BitVec::new();
        visited.resize(self.order.len(), false);
        let mut queue = VecDeque::new();
        visited.set(index_of[&source], true);
        queue.push_back(source);

        while let Some(u) = queue.pop_front() {
            for &edge_id in &self.vertex(u).neighbors {
                let e = self.edge(edge_id);
                if e.residual_capacity_forward() > 0 {
                    let idx = index_of[&e.end];
                    let reached = *visited.get(idx).expect("index within bounds");
                    if !reached {
                        visited.set(idx, true);
                        queue.push_back(e.end);
                    }
                }
            }
            for &edge_id in &self.vertex(u).res_neighbors {
                let e = self.edge(edge_id);
                if e.residual_capacity_backward() > 0 {
                    let idx = index_of[&e.start];
                    let reached = *visited.get(idx).expect("index within bounds");
                    if !reached {
                        visited.set(idx, true);
                        queue.push_back(e.start);
                    }
                }
            }
        }
        visited
    }
}
