//! Connectivity graph of a netlist.

use std::collections::{HashMap, HashSet};

use log::trace;
use petgraph::{
    graph::{NodeIndex, UnGraph},
    visit::{Bfs, Walker},
};

use super::Circuit;

/// A node of the connectivity graph: either a component or a net.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphNode<'a> {
    Component(&'a str),
    Net(&'a str),
}

/// Bipartite view of a circuit.
///
/// Components and nets are both nodes; every connection becomes an edge
/// between its component and its net, weighted with the pin name. Connections
/// to components that do not exist are left out.
#[derive(Debug)]
pub struct CircuitGraph<'a> {
    graph: UnGraph<GraphNode<'a>, &'a str>,
    components: HashMap<&'a str, NodeIndex>,
    nets: HashMap<&'a str, NodeIndex>,
}

impl<'a> CircuitGraph<'a> {
    /// Builds the graph for the given circuit.
    ///
    /// When ids are duplicated the first declaration wins.
    pub fn new(circuit: &'a Circuit) -> Self {
        let mut graph = UnGraph::new_undirected();
        let mut components = HashMap::new();
        let mut nets = HashMap::new();

        for component in circuit.components() {
            components
                .entry(component.id())
                .or_insert_with(|| graph.add_node(GraphNode::Component(component.id())));
        }

        for net in circuit.nets() {
            if nets.contains_key(net.id()) {
                continue;
            }
            let net_idx = graph.add_node(GraphNode::Net(net.id()));
            nets.insert(net.id(), net_idx);

            for connection in net.connections() {
                if let Some(&component_idx) = components.get(connection.component()) {
                    graph.add_edge(component_idx, net_idx, connection.pin());
                }
            }
        }

        trace!(
            nodes = graph.node_count(),
            edges = graph.edge_count();
            "Built circuit graph"
        );

        Self {
            graph,
            components,
            nets,
        }
    }

    /// Returns the number of component and net nodes
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of connections in the graph
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns how many nets the component is connected to.
    pub fn degree(&self, component_id: &str) -> usize {
        self.components
            .get(component_id)
            .map_or(0, |&idx| self.graph.neighbors(idx).count())
    }

    /// Returns the ids of every component reachable from the given net.
    pub fn components_reachable_from_net(&self, net_id: &str) -> HashSet<&'a str> {
        let Some(&start) = self.nets.get(net_id) else {
            return HashSet::new();
        };

        Bfs::new(&self.graph, start)
            .iter(&self.graph)
            .filter_map(|idx| match self.graph[idx] {
                GraphNode::Component(id) => Some(id),
                GraphNode::Net(_) => None,
            })
            .collect()
    }

    /// Returns the ids of every component reachable from the given component,
    /// the component itself included.
    pub fn components_reachable_from(&self, component_id: &str) -> HashSet<&'a str> {
        let Some(&start) = self.components.get(component_id) else {
            return HashSet::new();
        };

        Bfs::new(&self.graph, start)
            .iter(&self.graph)
            .filter_map(|idx| match self.graph[idx] {
                GraphNode::Component(id) => Some(id),
                GraphNode::Net(_) => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::netlist::{Component, ComponentKind, Connection, Net};

    fn circuit() -> Circuit {
        Circuit::new(
            vec![
                Component::new("V1", ComponentKind::VoltageSource).with_pins(["+", "-"]),
                Component::new("R1", ComponentKind::Resistor).with_pins(["a", "b"]),
                Component::new("R2", ComponentKind::Resistor).with_pins(["a", "b"]),
                Component::new("R9", ComponentKind::Resistor).with_pins(["a", "b"]),
            ],
            vec![
                Net::new("N1", [Connection::new("V1", "+"), Connection::new("R1", "a")]),
                Net::new("N2", [Connection::new("R1", "b"), Connection::new("R2", "a")]),
                Net::new("N3", [Connection::new("R2", "b"), Connection::new("X1", "a")]),
            ],
        )
    }

    #[test]
    fn test_graph_counts_skip_dangling_connections() {
        let circuit = circuit();
        let graph = CircuitGraph::new(&circuit);

        assert_eq!(graph.node_count(), 7);
        assert_eq!(graph.edge_count(), 5);
        assert_eq!(graph.degree("R1"), 2);
        assert_eq!(graph.degree("R9"), 0);
        assert_eq!(graph.degree("missing"), 0);
    }

    #[test]
    fn test_reachability_from_net() {
        let circuit = circuit();
        let graph = CircuitGraph::new(&circuit);

        let reachable = graph.components_reachable_from_net("N1");
        assert_eq!(reachable, HashSet::from(["V1", "R1", "R2"]));
        assert!(graph.components_reachable_from_net("N9").is_empty());
    }

    #[test]
    fn test_reachability_from_component() {
        let circuit = circuit();
        let graph = CircuitGraph::new(&circuit);

        assert_eq!(graph.components_reachable_from("R9"), HashSet::from(["R9"]));
        assert_eq!(graph.components_reachable_from("R2").len(), 3);
    }
}
