//! Maximum-flow computation: Dinic's blocking-flow algorithm and
//! Goldberg-Tarjan push-relabel with a FIFO active-vertex queue, over a
//! directed, integer-capacitated graph.
//!
//! [`flow_network::FlowNetwork`] is the entry point: build a graph by id,
//! pick a source and sink, then call [`flow_network::FlowNetwork::dinic`] or
//! [`flow_network::FlowNetwork::goldberg_tarjan`].

pub mod edge;
pub mod error;
pub mod events;
pub mod flow_network;
pub mod graph;
pub mod vertex;
