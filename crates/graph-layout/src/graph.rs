use petgraph::graphmap::{DiGraphMap, NodeTrait};
use petgraph::Direction;

/// Directed multigraph used as layout input
///
/// Parallel edges are folded into a single `DiGraphMap` edge whose weight
/// lists where each of them sits in the input edge list. Nodes keep
/// insertion order, which is the tie-break order of every layout.
pub type LayoutGraph<N> = DiGraphMap<N, Vec<usize>>;

/// Build a layout graph from node ids and `(source, target)` pairs
///
/// Edges referencing a node that was not listed are dropped.
pub fn build_graph<N, I, E>(nodes: I, edges: E) -> LayoutGraph<N>
where
    N: NodeTrait,
    I: IntoIterator<Item = N>,
    E: IntoIterator<Item = (N, N)>,
{
    let mut graph: LayoutGraph<N> = DiGraphMap::new();
    for node in nodes {
        graph.add_node(node);
    }

    for (order, (source, target)) in edges.into_iter().enumerate() {
        if !graph.contains_node(source) || !graph.contains_node(target) {
            continue;
        }
        match graph.edge_weight_mut(source, target) {
            Some(run) => run.push(order),
            None => {
                graph.add_edge(source, target, vec![order]);
            }
        }
    }

    graph
}

/// Edges entering or leaving `node` as `(input position, other end)`, in
/// input edge order
///
/// A self loop is listed once, with `node` as its other end.
pub fn incident_edges<N: NodeTrait>(graph: &LayoutGraph<N>, node: N) -> Vec<(usize, N)> {
    let outgoing = graph
        .neighbors_directed(node, Direction::Outgoing)
        .filter_map(|target| Some((target, graph.edge_weight(node, target)?)));
    let incoming = graph
        .neighbors_directed(node, Direction::Incoming)
        .filter(|&source| source != node)
        .filter_map(|source| Some((source, graph.edge_weight(source, node)?)));

    let mut incident: Vec<(usize, N)> = outgoing
        .chain(incoming)
        .flat_map(|(other, run)| run.iter().map(move |&order| (order, other)))
        .collect();
    incident.sort_unstable_by_key(|&(order, _)| order);
    incident
}

/// Number of edges entering or leaving `node`, parallel edges included
///
/// A self loop counts once.
pub fn total_degree<N: NodeTrait>(graph: &LayoutGraph<N>, node: N) -> usize {
    let outgoing: usize = graph
        .neighbors_directed(node, Direction::Outgoing)
        .filter_map(|target| graph.edge_weight(node, target))
        .map(Vec::len)
        .sum();
    let incoming: usize = graph
        .neighbors_directed(node, Direction::Incoming)
        .filter(|&source| source != node)
        .filter_map(|source| graph.edge_weight(source, node))
        .map(Vec::len)
        .sum();
    outgoing + incoming
}

/// Neighbors of `node` ignoring edge direction, in the order of the edges
/// linking them
///
/// A neighbor linked by several edges is listed once per edge.
pub fn undirected_neighbors<N: NodeTrait>(
    graph: &LayoutGraph<N>,
    node: N,
) -> impl Iterator<Item = N> {
    incident_edges(graph, node)
        .into_iter()
        .map(|(_, other)| other)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dangling_edges_are_dropped() {
        let graph = build_graph([1, 2], [(1, 2), (2, 3), (4, 1)]);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn parallel_edges_count_towards_degree() {
        let graph = build_graph([1, 2, 3], [(1, 2), (1, 2), (3, 1)]);
        assert_eq!(total_degree(&graph, 1), 3);
        assert_eq!(total_degree(&graph, 2), 2);
        assert_eq!(total_degree(&graph, 3), 1);
    }

    #[test]
    fn self_loop_counts_once() {
        let graph = build_graph([1], [(1, 1)]);
        assert_eq!(total_degree(&graph, 1), 1);
    }

    #[test]
    fn undirected_neighbors_follow_edge_order() {
        let graph = build_graph([1, 2, 3], [(3, 1), (1, 2)]);
        let neighbors: Vec<_> = undirected_neighbors(&graph, 1).collect();
        assert_eq!(neighbors, vec![3, 2]);
    }

    #[test]
    fn incident_edges_interleave_directions() {
        let graph = build_graph([1, 2, 3], [(1, 2), (3, 1), (1, 2), (1, 1), (2, 3)]);
        assert_eq!(incident_edges(&graph, 1), vec![(0, 2), (1, 3), (2, 2), (3, 1)]);
        assert_eq!(incident_edges(&graph, 3), vec![(1, 1), (4, 2)]);
    }
}
