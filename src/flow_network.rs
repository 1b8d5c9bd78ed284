//! The public facade: owns a [`Graph`], a source/sink pair, and the last
//! computed maximum flow, and exposes the two algorithm entry points plus
//! mutation/query/persistence operations.

use std::io::Read as _;
use std::io::Write as _;
use std::path::Path;

use log::info;
use rkyv::rancor;

use crate::error::{FlowError, FlowResult};
use crate::events::{ChangeEvent, SubscriptionId, Subscribers};
use crate::graph::{Graph, VertexId};

/// The `-1` sentinel meaning "source/sink not yet chosen".
const UNSET: VertexId = -1;

/// On-disk representation for `rkyv`. Flat rather than mirroring `Graph`'s
/// arena directly, so the archive format doesn't leak tombstone slots.
#[derive(Debug, Clone, rkyv::Archive, rkyv::Serialize, rkyv::Deserialize)]
struct ArchivedNetwork {
    vertices: Vec<VertexId>,
    edges: Vec<(VertexId, VertexId, i64, i64)>, // start, end, capacity, flow
    source_id: VertexId,
    sink_id: VertexId,
    max_flow: i64,
}

/// Owns the graph engine plus the facade's own bookkeeping: source/sink
/// selection, the last computed maximum flow, the human-readable `prompt`,
/// dirty flags, and subscribers.
pub struct FlowNetwork {
    graph: Graph,
    source_id: VertexId,
    sink_id: VertexId,
    max_flow: i64,
    prompt: String,
    update_graph: bool,
    draw_graph: bool,
    subscribers: Subscribers,
}

impl Default for FlowNetwork {
    fn default() -> Self {
        Self::new()
    }
}

impl FlowNetwork {
    pub fn new() -> Self {
        Self {
            graph: Graph::new(),
            source_id: UNSET,
            sink_id: UNSET,
            max_flow: 0,
            prompt: String::new(),
            update_graph: false,
            draw_graph: false,
            subscribers: Subscribers::new(),
        }
    }

    // --------------------------- notification ---------------------------

    fn emit(&mut self, update_graph: bool, draw_graph: bool) {
        self.update_graph = update_graph;
        self.draw_graph = draw_graph;
        self.subscribers.notify(ChangeEvent { update_graph, draw_graph });
    }

    pub fn subscribe(&mut self, callback: impl Fn(ChangeEvent) + 'static) -> SubscriptionId {
        self.subscribers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    /// Marks the textual/graph-data view dirty and notifies subscribers.
    pub fn update_graph(&mut self) {
        self.emit(true, self.draw_graph);
    }

    /// Marks the drawn-layout view dirty and notifies subscribers.
    pub fn draw_graph(&mut self) {
        self.emit(self.update_graph, true);
    }

    // ------------------------------ mutation -----------------------------

    pub fn add_vertex(&mut self, id: VertexId) -> FlowResult<()> {
        if id < 0 {
            return self.fail(FlowError::Validation(format!("vertex id must be non-negative, got {id}")));
        }
        if !self.graph.add_vertex(id) {
            return self.fail(FlowError::Validation(format!("vertex {id} already exists")));
        }
        self.prompt = format!("added vertex {id}");
        self.emit(true, true);
        Ok(())
    }

    pub fn remove_vertex(&mut self, id: VertexId) -> FlowResult<()> {
        if !self.graph.remove_vertex(id) {
            return self.fail(FlowError::Validation(format!("vertex {id} does not exist")));
        }
        if self.source_id == id {
            self.source_id = UNSET;
        }
        if self.sink_id == id {
            self.sink_id = UNSET;
        }
        self.prompt = format!("removed vertex {id}");
        self.emit(true, true);
        Ok(())
    }

    pub fn add_edge(&mut self, start: VertexId, end: VertexId, capacity: i64) -> FlowResult<()> {
        if start == end {
            return self.fail(FlowError::Validation("self-loops are not allowed".into()));
        }
        if !self.graph.contains_vertex(start) || !self.graph.contains_vertex(end) {
            return self.fail(FlowError::Validation(format!(
                "both endpoints must exist: {start}, {end}"
            )));
        }
        if capacity <= 0 {
            return self.fail(FlowError::Validation(format!(
                "capacity must be positive, got {capacity}"
            )));
        }
        if self.graph.find_edge(start, end).is_some() {
            return self.fail(FlowError::Validation(format!(
                "edge {start} -> {end} already exists"
            )));
        }
        self.graph.add_edge(start, end, capacity);
        self.prompt = format!("added edge {start} -> {end} (capacity {capacity})");
        self.emit(true, true);
        Ok(())
    }

    pub fn remove_edge(&mut self, start: VertexId, end: VertexId) -> FlowResult<()> {
        if !self.graph.remove_edge(start, end) {
            return self.fail(FlowError::Validation(format!(
                "edge {start} -> {end} does not exist"
            )));
        }
        self.prompt = format!("removed edge {start} -> {end}");
        self.emit(true, true);
        Ok(())
    }

    /// Sets the source to `id`. If `id` is the current sink, the sink is
    /// cleared to `-1` rather than rejecting the call — `sourceId != sinkId`
    /// is maintained by demoting the other designation, not by refusing the
    /// mutation.
    pub fn set_source(&mut self, id: VertexId) -> FlowResult<()> {
        if !self.graph.contains_vertex(id) {
            return self.fail(FlowError::Validation(format!("vertex {id} does not exist")));
        }
        if self.sink_id == id {
            self.sink_id = UNSET;
        }
        self.source_id = id;
        self.prompt = format!("source set to {id}");
        self.emit(true, true);
        Ok(())
    }

    /// Sets the sink to `id`, symmetrically clearing the source if `id` was
    /// the current source. See `set_source`.
    pub fn set_sink(&mut self, id: VertexId) -> FlowResult<()> {
        if !self.graph.contains_vertex(id) {
            return self.fail(FlowError::Validation(format!("vertex {id} does not exist")));
        }
        if self.source_id == id {
            self.source_id = UNSET;
        }
        self.sink_id = id;
        self.prompt = format!("sink set to {id}");
        self.emit(true, true);
        Ok(())
    }

    /// Discards the entire network: every vertex, every edge, source, sink,
    /// and `max_flow`, matching a freshly constructed `FlowNetwork`.
    pub fn reset_network(&mut self) {
        self.graph = Graph::new();
        self.source_id = UNSET;
        self.sink_id = UNSET;
        self.max_flow = 0;
        self.prompt = "network reset".to_string();
        self.emit(true, true);
    }

    fn fail(&mut self, error: FlowError) -> FlowResult<()> {
        self.prompt = error.to_string();
        Err(error)
    }

    // ---------------------------- algorithms -----------------------------

    fn require_endpoints(&mut self) -> Result<(VertexId, VertexId), ()> {
        if self.source_id == UNSET || self.sink_id == UNSET {
            self.prompt = "source and sink must both be set before running an algorithm".to_string();
            self.max_flow = 0;
            return Err(());
        }
        Ok((self.source_id, self.sink_id))
    }

    /// Dinic's blocking-flow algorithm. Always succeeds; if source/sink are
    /// unset, leaves `max_flow` at zero and records the reason in `prompt`.
    /// Returns the computed maximum flow value (zero on the unset-endpoint
    /// path).
    pub fn dinic(&mut self) -> i64 {
        let Ok((source, sink)) = self.require_endpoints() else {
            self.emit(false, false);
            return 0;
        };
        info!("dinic: starting run, source={source} sink={sink}");

        self.graph.reset_flow();
        self.graph.build_residual_graph();
        let mut total = 0i64;

        while self.graph.build_layered_network(source, sink) != -1 {
            while self.graph.search_augmenting_path(source, sink) {
                total += self.graph.update_min_flow_increment(source);
            }
        }

        self.max_flow = total;
        self.prompt = format!("dinic: max flow = {total}");
        info!("dinic: finished, max flow = {total}");
        self.emit(true, false);
        total
    }

    /// Goldberg-Tarjan push-relabel with a FIFO active-vertex queue. Always
    /// succeeds; if source/sink are unset, leaves `max_flow` at zero. Returns
    /// the computed maximum flow value (zero on the unset-endpoint path).
    pub fn goldberg_tarjan(&mut self) -> i64 {
        let Ok((source, sink)) = self.require_endpoints() else {
            self.emit(false, false);
            return 0;
        };
        info!("goldberg_tarjan: starting run, source={source} sink={sink}");

        self.graph.reset_flow();
        self.graph.build_residual_graph();
        self.graph.reset_excess(source);
        self.graph.initialize_labels(source);
        self.graph.queue.clear();

        self.graph.initial_push(source, sink);
        while !self.graph.queue.is_empty() {
            self.graph.discharge_queue(source, sink);
        }

        let total = self
            .graph
            .get_vertex(sink)
            .map(|v| v.excess.max(0))
            .unwrap_or(0);
        self.max_flow = total;
        self.prompt = format!("goldberg_tarjan: max flow = {total}");
        info!("goldberg_tarjan: finished, max flow = {total}");
        self.emit(true, false);
        total
    }

    // ------------------------------ queries -------------------------------

    pub fn get_source(&self) -> Option<VertexId> {
        (self.source_id != UNSET).then_some(self.source_id)
    }

    pub fn get_sink(&self) -> Option<VertexId> {
        (self.sink_id != UNSET).then_some(self.sink_id)
    }

    pub fn max_flow(&self) -> i64 {
        self.max_flow
    }

    pub fn get_prompt(&self) -> &str {
        &self.prompt
    }

    pub fn is_update_graph(&self) -> bool {
        self.update_graph
    }

    pub fn is_draw_graph(&self) -> bool {
        self.draw_graph
    }

    pub fn get_vertex_indices(&self) -> &[VertexId] {
        self.graph.vertex_ids()
    }

    /// `(start, end, capacity, flow)` for every edge, in each vertex's
    /// insertion order.
    pub fn get_graph_data(&self) -> Vec<(VertexId, VertexId, i64, i64)> {
        let mut data = Vec::new();
        for &id in self.graph.vertex_ids() {
            let Some(vertex) = self.graph.get_vertex(id) else {
                continue;
            };
            for &edge_id in &vertex.neighbors {
                let Some(edge) = self.graph.get_edge(edge_id) else {
                    continue;
                };
                data.push((edge.start, edge.end, edge.capacity, edge.flow));
            }
        }
        data
    }

    /// Vertices on the source side of a minimum cut, valid once `max_flow`
    /// has been computed against the current topology.
    pub fn min_cut_source_side(&self) -> FlowResult<Vec<VertexId>> {
        if self.source_id == UNSET {
            return Err(FlowError::State("source must be set".into()));
        }
        let reachable = self.graph.reachable_from(self.source_id);
        Ok(self
            .graph
            .vertex_ids()
            .iter()
            .enumerate()
            .filter_map(|(idx, &id)| {
                let reached = reachable.get(idx).map_or(false, |bit| *bit);
                reached.then_some(id)
            })
            .collect())
    }

    /// Stable text dump: a header giving source/sink/max-flow, then one line
    /// per vertex (insertion order) listing its outgoing edges (insertion
    /// order) as `(start,end,c:capacity,f:flow)`.
    pub fn display_flow_network(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Source: {:?}\n", self.get_source()));
        out.push_str(&format!("Sink: {:?}\n", self.get_sink()));
        out.push_str(&format!("Max flow: {}\n", self.max_flow));
        for &id in self.graph.vertex_ids() {
            let Some(vertex) = self.graph.get_vertex(id) else {
                continue;
            };
            out.push_str(&format!("Vertex {id} (label {}):  ", vertex.label));
            for &edge_id in &vertex.neighbors {
                let Some(edge) = self.graph.get_edge(edge_id) else {
                    continue;
                };
                out.push_str(&format!(
                    "({},{},c:{},f:{})  ",
                    edge.start, edge.end, edge.capacity, edge.flow
                ));
            }
            out.push('\n');
        }
        out
    }

    // --------------------------- persistence ------------------------------

    /// Failure (I/O or serialization) is non-fatal: `prompt` records the
    /// error and the network is left untouched.
    pub fn save_network(&mut self, path: impl AsRef<Path>) -> FlowResult<()> {
        let archive = ArchivedNetwork {
            vertices: self.graph.vertex_ids().to_vec(),
            edges: self.get_graph_data(),
            source_id: self.source_id,
            sink_id: self.sink_id,
            max_flow: self.max_flow,
        };
        let result = (|| {
            let bytes = rkyv::to_bytes::<rancor::Error>(&archive)
                .map_err(|e| FlowError::Serialization(e.to_string()))?;
            let mut file = std::fs::File::create(path)?;
            file.write_all(&bytes)?;
            Ok(())
        })();
        match result {
            Ok(()) => {
                self.prompt = "saved network".to_string();
                self.emit(false, false);
                Ok(())
            }
            Err(error) => self.fail(error),
        }
    }

    /// Failure (I/O, deserialization, or an out-of-range archived flow) is
    /// non-fatal: `prompt` records the error and the network is left
    /// untouched.
    pub fn load_network(&mut self, path: impl AsRef<Path>) -> FlowResult<()> {
        match self.try_load_network(path) {
            Ok(loaded) => {
                self.graph = loaded.0;
                self.source_id = loaded.1;
                self.sink_id = loaded.2;
                self.max_flow = loaded.3;
                self.prompt = "loaded network".to_string();
                self.emit(true, true);
                Ok(())
            }
            Err(error) => self.fail(error),
        }
    }

    fn try_load_network(
        &self,
        path: impl AsRef<Path>,
    ) -> FlowResult<(Graph, VertexId, VertexId, i64)> {
        let mut file = std::fs::File::open(path)?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;
        let archive = rkyv::from_bytes::<ArchivedNetwork, rancor::Error>(&bytes)
            .map_err(|e| FlowError::Serialization(e.to_string()))?;

        let mut graph = Graph::new();
        for id in &archive.vertices {
            graph.add_vertex(*id);
        }
        for (start, end, capacity, flow) in &archive.edges {
            let edge_id = graph.add_edge(*start, *end, *capacity);
            if graph.get_edge_mut(edge_id).unwrap().set_flow(*flow).is_err() {
                return Err(FlowError::Serialization(format!(
                    "archived flow {flow} out of bounds for edge {start} -> {end}"
                )));
            }
        }

        Ok((graph, archive.source_id, archive.sink_id, archive.max_flow))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Once-per-process test log init; there is no bin target in this crate
    /// to call `env_logger::init()` from `main`.
    fn init_test_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    /// Classic textbook graph, max flow 23, used by several Cormen-style
    /// references (scenario A: straight-line diamond with a crossing edge).
    fn textbook_network() -> FlowNetwork {
        let mut net = FlowNetwork::new();
        for v in 0..6 {
            net.add_vertex(v).unwrap();
        }
        net.add_edge(0, 1, 16).unwrap();
        net.add_edge(0, 2, 13).unwrap();
        net.add_edge(1, 2, 10).unwrap();
        net.add_edge(2, 1, 4).unwrap();
        net.add_edge(1, 3, 12).unwrap();
        net.add_edge(2, 4, 14).unwrap();
        net.add_edge(3, 2, 9).unwrap();
        net.add_edge(4, 3, 7).unwrap();
        net.add_edge(3, 5, 20).unwrap();
        net.add_edge(4, 5, 4).unwrap();
        net.set_source(0).unwrap();
        net.set_sink(5).unwrap();
        net
    }

    #[test]
    fn dinic_and_goldberg_tarjan_agree_on_textbook_graph() {
        init_test_logging();
        let mut net = textbook_network();
        net.dinic();
        assert_eq!(net.max_flow(), 23);

        let mut net2 = textbook_network();
        net2.goldberg_tarjan();
        assert_eq!(net2.max_flow(), 23);
    }

    #[test]
    fn running_without_source_and_sink_leaves_flow_zero() {
        let mut net = FlowNetwork::new();
        net.add_vertex(0).unwrap();
        net.add_vertex(1).unwrap();
        net.dinic();
        assert_eq!(net.max_flow(), 0);
        assert!(net.get_prompt().contains("source and sink"));
    }

    #[test]
    fn self_loop_is_rejected() {
        let mut net = FlowNetwork::new();
        net.add_vertex(0).unwrap();
        assert!(net.add_edge(0, 0, 1).is_err());
    }

    #[test]
    fn duplicate_edge_is_rejected() {
        let mut net = FlowNetwork::new();
        net.add_vertex(0).unwrap();
        net.add_vertex(1).unwrap();
        net.add_edge(0, 1, 5).unwrap();
        assert!(net.add_edge(0, 1, 3).is_err());
    }

    #[test]
    fn set_sink_to_current_source_clears_source() {
        let mut net = FlowNetwork::new();
        net.add_vertex(0).unwrap();
        net.add_vertex(1).unwrap();
        net.set_source(0).unwrap();
        net.set_sink(0).unwrap();
        assert_eq!(net.get_source(), None);
        assert_eq!(net.get_sink(), Some(0));
    }

    #[test]
    fn set_source_to_current_sink_clears_sink() {
        let mut net = FlowNetwork::new();
        net.add_vertex(0).unwrap();
        net.add_vertex(1).unwrap();
        net.set_sink(1).unwrap();
        net.set_source(1).unwrap();
        assert_eq!(net.get_sink(), None);
        assert_eq!(net.get_source(), Some(1));
    }

    #[test]
    fn removing_source_unsets_it() {
        let mut net = textbook_network();
        net.remove_vertex(0).unwrap();
        assert_eq!(net.get_source(), None);
    }

    #[test]
    fn reset_network_discards_topology_and_endpoints() {
        let mut net = textbook_network();
        net.dinic();
        assert_eq!(net.max_flow(), 23);
        net.reset_network();
        assert_eq!(net.max_flow(), 0);
        assert_eq!(net.get_source(), None);
        assert_eq!(net.get_sink(), None);
        assert!(net.get_graph_data().is_empty());
        assert!(net.get_vertex_indices().is_empty());
    }

    #[test]
    fn idempotent_rerun_matches_first_run() {
        let mut net = textbook_network();
        net.dinic();
        let first = net.max_flow();
        net.dinic();
        assert_eq!(net.max_flow(), first);
    }

    #[test]
    fn min_cut_matches_max_flow_value() {
        let mut net = textbook_network();
        net.dinic();
        let s_side = net.min_cut_source_side().unwrap();
        let crossing: i64 = net
            .get_graph_data()
            .iter()
            .filter(|&&(start, end, _, _)| {
                s_side.contains(&start) && !s_side.contains(&end)
            })
            .map(|&(_, _, capacity, _)| capacity)
            .sum();
        assert_eq!(crossing, net.max_flow());
    }

    #[test]
    fn save_and_load_round_trip_preserves_flow() {
        let mut net = textbook_network();
        net.dinic();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("network.bin");
        net.save_network(&path).unwrap();

        let mut restored = FlowNetwork::new();
        restored.load_network(&path).unwrap();
        assert_eq!(restored.max_flow(), net.max_flow());
        assert_eq!(restored.get_graph_data(), net.get_graph_data());
        assert_eq!(restored.get_source(), net.get_source());
        assert_eq!(restored.get_sink(), net.get_sink());
    }

    #[test]
    fn load_network_failure_records_prompt_and_leaves_network_unchanged() {
        let mut net = textbook_network();
        net.dinic();
        let before = net.get_graph_data();

        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist.bin");
        let err = net.load_network(&missing).unwrap_err();
        assert!(matches!(err, FlowError::Io(_)));
        assert_eq!(net.get_prompt(), err.to_string());
        assert_eq!(net.get_graph_data(), before);
    }

    #[test]
    fn subscriber_is_notified_on_mutation() {
        let mut net = FlowNetwork::new();
        let seen = std::rc::Rc::new(std::cell::Cell::new(false));
        let seen_clone = seen.clone();
        net.subscribe(move |e| {
            if e.update_graph {
                seen_clone.set(true);
            }
        });
        net.add_vertex(0).unwrap();
        assert!(seen.get());
    }

    #[test]
    fn disconnected_sink_yields_zero_flow() {
        let mut net = FlowNetwork::new();
        net.add_vertex(0).unwrap();
        net.add_vertex(1).unwrap();
        net.set_source(0).unwrap();
        net.set_sink(1).unwrap();
        net.dinic();
        assert_eq!(net.max_flow(), 0);
    }

    // -------- lettered end-to-end scenarios, one fresh network each --------

    fn build(vertices: &[i64], edges: &[(i64, i64, i64)], source: i64, sink: i64) -> FlowNetwork {
        let mut net = FlowNetwork::new();
        for &v in vertices {
            net.add_vertex(v).unwrap();
        }
        for &(u, v, c) in edges {
            net.add_edge(u, v, c).unwrap();
        }
        net.set_source(source).unwrap();
        net.set_sink(sink).unwrap();
        net
    }

    fn assert_both_algorithms_agree(net_factory: impl Fn() -> FlowNetwork, expected: i64) {
        let mut dinic_net = net_factory();
        assert_eq!(dinic_net.dinic(), expected);
        let mut gt_net = net_factory();
        assert_eq!(gt_net.goldberg_tarjan(), expected);
    }

    #[test]
    fn display_flow_network_has_stable_header_and_per_vertex_edge_lines() {
        let mut net = build(&[0, 1], &[(0, 1, 5)], 0, 1);
        net.dinic();
        let dump = net.display_flow_network();
        let mut lines = dump.lines();
        assert_eq!(lines.next().unwrap(), "Source: Some(0)");
        assert_eq!(lines.next().unwrap(), "Sink: Some(1)");
        assert_eq!(lines.next().unwrap(), "Max flow: 5");
        assert!(lines.next().unwrap().starts_with("Vertex 0 (label"));
        assert!(dump.contains("(0,1,c:5,f:5)"));
    }

    #[test]
    fn scenario_a_thesis_example() {
        assert_both_algorithms_agree(
            || {
                build(
                    &[0, 1, 2, 3, 4, 5],
                    &[
                        (0, 1, 7),
                        (0, 2, 4),
                        (1, 3, 5),
                        (1, 4, 3),
                        (2, 4, 2),
                        (2, 5, 4),
                        (3, 5, 8),
                        (4, 5, 3),
                    ],
                    0,
                    5,
                )
            },
            7,
        );
    }

    #[test]
    fn scenario_b_trivial_parallel_paths() {
        assert_both_algorithms_agree(
            || build(&[0, 1, 2, 3], &[(0, 1, 10), (0, 2, 10), (1, 3, 10), (2, 3, 10)], 0, 3),
            20,
        );
    }

    #[test]
    fn scenario_c_bottleneck() {
        assert_both_algorithms_agree(
            || build(&[0, 1, 2, 3], &[(0, 1, 100), (1, 2, 1), (2, 3, 100)], 0, 3),
            1,
        );
    }

    #[test]
    fn scenario_d_antiparallel_capacity_forces_residual_use() {
        assert_both_algorithms_agree(
            || {
                build(
                    &[0, 1, 2, 3],
                    &[(0, 1, 3), (0, 2, 3), (1, 2, 2), (1, 3, 3), (2, 3, 3)],
                    0,
                    3,
                )
            },
            6,
        );
    }

    #[test]
    fn scenario_e_source_and_sink_unset() {
        let mut net = FlowNetwork::new();
        net.add_vertex(0).unwrap();
        net.add_vertex(1).unwrap();
        net.add_edge(0, 1, 5).unwrap();
        assert_eq!(net.dinic(), 0);
        assert!(net.get_graph_data().iter().all(|&(_, _, _, flow)| flow == 0));

        let mut net2 = FlowNetwork::new();
        net2.add_vertex(0).unwrap();
        net2.add_vertex(1).unwrap();
        net2.add_edge(0, 1, 5).unwrap();
        assert_eq!(net2.goldberg_tarjan(), 0);
        assert!(net2.get_graph_data().iter().all(|&(_, _, _, flow)| flow == 0));
    }

    #[test]
    fn scenario_f_self_loop_rejection_leaves_vertex_without_edges() {
        let mut net = FlowNetwork::new();
        net.add_vertex(0).unwrap();
        let err = net.add_edge(0, 0, 5).unwrap_err();
        assert!(matches!(err, FlowError::Validation(_)));
        assert!(net.get_graph_data().is_empty());
        assert_eq!(net.get_vertex_indices(), &[0]);
    }

    #[test]
    fn scenario_g_remove_source_vertex_clears_incident_edges() {
        let mut net = build(&[0, 1], &[(0, 1, 5)], 0, 1);
        assert!(net.remove_vertex(0).is_ok());
        assert_eq!(net.get_source(), None);
        assert!(net.get_graph_data().is_empty());
    }

    // ---------------- change-notification dirty-flag table (§6) -----------

    #[test]
    fn dirty_flags_match_the_mutation_table() {
        let mut net = FlowNetwork::new();
        net.add_vertex(0).unwrap();
        net.add_vertex(1).unwrap();
        assert!(net.is_update_graph() && net.is_draw_graph());

        net.add_edge(0, 1, 5).unwrap();
        assert!(net.is_update_graph() && net.is_draw_graph());

        net.set_source(0).unwrap();
        assert!(net.is_update_graph() && net.is_draw_graph());
        net.set_sink(1).unwrap();
        assert!(net.is_update_graph() && net.is_draw_graph());

        net.dinic();
        assert!(net.is_update_graph() && !net.is_draw_graph());

        net.reset_network();
        assert!(net.is_update_graph() && net.is_draw_graph());

        // source/sink unset: dinic() touches neither flag.
        let mut unset_net = FlowNetwork::new();
        unset_net.add_vertex(0).unwrap();
        unset_net.dinic();
        assert!(!unset_net.is_update_graph() && !unset_net.is_draw_graph());

        // saveNetwork clears both flags even after a prior mutation left
        // them stale-true.
        let mut saved_net = textbook_network();
        saved_net.dinic();
        assert!(saved_net.is_update_graph());
        let dir = tempfile::tempdir().unwrap();
        saved_net.save_network(dir.path().join("network.bin")).unwrap();
        assert!(!saved_net.is_update_graph() && !saved_net.is_draw_graph());
    }
}
