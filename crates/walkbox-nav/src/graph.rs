use std::collections::{BTreeMap, BTreeSet};

use crate::{NodeKey, Polygon, Result, Vec2};

/// Index of a node in the graph arena.
///
/// Mesh node ids are dense (`0..mesh_node_count`) and stable until the next rebuild. Query node
/// ids are only valid inside the query scope that created them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Generated from polygon geometry (vertex, edge midpoint, or centroid).
    Mesh,
    /// Transient endpoint of a single path query.
    Query,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    position: Vec2,
    kind: NodeKind,
    neighbors: BTreeSet<NodeId>,
}

impl GraphNode {
    fn new(position: Vec2, kind: NodeKind) -> Self {
        Self {
            position,
            kind,
            neighbors: BTreeSet::new(),
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Adjacent nodes in ascending id order.
    pub fn neighbors(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.neighbors.iter().copied()
    }

    pub fn degree(&self) -> usize {
        self.neighbors.len()
    }
}

/// Walk-box navigation graph.
///
/// Owns the polygon list and the node/edge set derived from it. Every polygon contributes
/// nodes at its vertices, at the midpoint of each edge, and at its centroid; all nodes of one
/// polygon form a complete subgraph. Nodes at the same [`NodeKey`] are shared, so polygons
/// that share an edge are connected through it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavGraph {
    polygons: Vec<Polygon>,
    nodes: Vec<Option<GraphNode>>,
    polygon_nodes: Vec<Vec<NodeId>>,
    index: BTreeMap<NodeKey, NodeId>,
    mesh_node_count: usize,
}

impl NavGraph {
    /// Build a graph from `polygons`.
    pub fn new(polygons: Vec<Polygon>) -> Result<Self> {
        let mut graph = Self::default();
        graph.set_polygons(polygons)?;
        Ok(graph)
    }

    /// Replace the polygon list and rebuild the mesh.
    ///
    /// Every polygon is validated before anything is discarded: on error the graph keeps its
    /// previous polygons and nodes.
    pub fn set_polygons(&mut self, polygons: Vec<Polygon>) -> Result<()> {
        for (index, polygon) in polygons.iter().enumerate() {
            if let Err(err) = polygon.validate(index) {
                tracing::warn!(%err, "rejecting walk-box polygon set");
                return Err(err);
            }
        }

        self.polygons = polygons;
        self.rebuild();
        Ok(())
    }

    /// Discard every node and regenerate the mesh from the current polygon list.
    pub fn rebuild(&mut self) {
        self.nodes.clear();
        self.polygon_nodes.clear();
        self.index.clear();
        self.mesh_node_count = 0;

        for poly_idx in 0..self.polygons.len() {
            let points = self.polygons[poly_idx].points().to_vec();
            let n = points.len();
            let mut recorded = Vec::with_capacity(n * 2 + 1);

            for i in 0..n {
                let vertex = self.obtain_mesh_node(points[i]);
                self.record(&mut recorded, vertex);

                let prev = points[(i + n - 1) % n];
                let midpoint = self.obtain_mesh_node(prev.midpoint(points[i]));
                self.record(&mut recorded, midpoint);
            }

            let centroid = self.polygons[poly_idx].centroid();
            let centroid = self.obtain_mesh_node(centroid);
            self.record(&mut recorded, centroid);

            self.polygon_nodes.push(recorded);
        }

        self.mesh_node_count = self.nodes.len();
        tracing::debug!(
            polygons = self.polygons.len(),
            nodes = self.mesh_node_count,
            edges = self.edge_count(),
            "rebuilt walk-box graph"
        );
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    /// Mesh nodes generated for the polygon at `poly_idx`, in creation order.
    pub fn polygon_nodes(&self, poly_idx: usize) -> &[NodeId] {
        self.polygon_nodes
            .get(poly_idx)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
        self.nodes.get(id.index()).and_then(Option::as_ref)
    }

    /// Live nodes in ascending id order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &GraphNode)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, n)| n.as_ref().map(|n| (NodeId(i as u32), n)))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.iter().flatten().count()
    }

    pub fn mesh_node_count(&self) -> usize {
        self.mesh_node_count
    }

    /// Mesh node at `p`, using the same coordinate key as deduplication.
    pub fn node_at(&self, p: Vec2) -> Option<NodeId> {
        self.index.get(&p.key()).copied()
    }

    /// Undirected edges, each reported once as `(lower id, higher id)`.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.nodes().flat_map(|(id, node)| {
            node.neighbors()
                .filter(move |&other| other > id)
                .map(move |other| (id, other))
        })
    }

    /// Edge segments in world space, for debug drawing.
    pub fn edge_segments(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        self.edges().filter_map(|(a, b)| {
            Some((self.node(a)?.position(), self.node(b)?.position()))
        })
    }

    pub fn edge_count(&self) -> usize {
        self.edges().count()
    }

    /// First polygon (in list order) that contains `p`.
    pub fn polygon_at(&self, p: Vec2) -> Option<usize> {
        self.polygons.iter().position(|poly| poly.contains(p))
    }

    /// First polygon (in list order) that contains both points.
    pub fn shared_polygon(&self, a: Vec2, b: Vec2) -> Option<usize> {
        self.polygons
            .iter()
            .position(|poly| poly.contains(a) && poly.contains(b))
    }

    pub(crate) fn position_of(&self, id: NodeId) -> Option<Vec2> {
        self.node(id).map(GraphNode::position)
    }

    pub(crate) fn slot_count(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn insert_query_node(&mut self, position: Vec2, links: &[NodeId]) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Some(GraphNode::new(position, NodeKind::Query)));
        for &other in links {
            self.connect(id, other);
        }
        id
    }

    /// Remove a query node and all of its edges.
    pub(crate) fn remove_query_node(&mut self, id: NodeId) {
        let Some(slot) = self.nodes.get_mut(id.index()) else {
            return;
        };
        let node = match slot.take() {
            Some(node) if node.kind == NodeKind::Query => node,
            other => {
                // Mesh nodes are never removed outside a rebuild.
                *slot = other;
                return;
            }
        };

        for other in node.neighbors {
            if let Some(Some(n)) = self.nodes.get_mut(other.index()) {
                n.neighbors.remove(&id);
            }
        }

        while self.nodes.len() > self.mesh_node_count && matches!(self.nodes.last(), Some(None)) {
            self.nodes.pop();
        }
    }

    fn obtain_mesh_node(&mut self, p: Vec2) -> NodeId {
        let key = p.key();
        if let Some(&id) = self.index.get(&key) {
            return id;
        }
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Some(GraphNode::new(p, NodeKind::Mesh)));
        self.index.insert(key, id);
        id
    }

    fn record(&mut self, recorded: &mut Vec<NodeId>, id: NodeId) {
        if recorded.contains(&id) {
            return;
        }
        for &other in recorded.iter() {
            self.connect(id, other);
        }
        recorded.push(id);
    }

    fn connect(&mut self, a: NodeId, b: NodeId) {
        if a == b {
            return;
        }
        if let Some(Some(node)) = self.nodes.get_mut(a.index()) {
            node.neighbors.insert(b);
        }
        if let Some(Some(node)) = self.nodes.get_mut(b.index()) {
            node.neighbors.insert(a);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x0: f32, y0: f32, size: f32) -> Polygon {
        Polygon::new(vec![
            Vec2::new(x0, y0),
            Vec2::new(x0 + size, y0),
            Vec2::new(x0 + size, y0 + size),
            Vec2::new(x0, y0 + size),
        ])
    }

    #[test]
    fn square_yields_complete_subgraph_of_nine_nodes() {
        let graph = NavGraph::new(vec![square(0.0, 0.0, 10.0)]).expect("graph");
        // 4 vertices + 4 midpoints + centroid.
        assert_eq!(graph.mesh_node_count(), 9);
        assert_eq!(graph.edge_count(), 9 * 8 / 2);
        for (_, node) in graph.nodes() {
            assert_eq!(node.degree(), 8);
            assert_eq!(node.kind(), NodeKind::Mesh);
        }
        assert!(graph.node_at(Vec2::new(5.0, 0.0)).is_some());
        assert!(graph.node_at(Vec2::new(5.0, 5.0)).is_some());
    }

    #[test]
    fn shared_edge_nodes_are_deduplicated() {
        let graph = NavGraph::new(vec![square(0.0, 0.0, 10.0), square(10.0, 0.0, 10.0)])
            .expect("graph");
        // Two vertices and one midpoint are shared.
        assert_eq!(graph.mesh_node_count(), 9 + 9 - 3);

        let shared = graph.node_at(Vec2::new(10.0, 5.0)).expect("shared midpoint");
        assert!(graph.polygon_nodes(0).contains(&shared));
        assert!(graph.polygon_nodes(1).contains(&shared));
        // Connected to every other node of both squares; the two shared corners count once.
        assert_eq!(graph.node(shared).expect("node").degree(), 8 + 8 - 2);
    }

    #[test]
    fn rejected_polygon_set_keeps_previous_mesh() {
        let mut graph = NavGraph::new(vec![square(0.0, 0.0, 10.0)]).expect("graph");
        let before = graph.clone();

        let err = graph
            .set_polygons(vec![
                square(0.0, 0.0, 4.0),
                Polygon::new(vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0)]),
            ])
            .expect_err("two-point polygon must be rejected");
        assert_eq!(
            err,
            crate::NavError::MalformedPolygon {
                index: 1,
                points: 2
            }
        );
        assert_eq!(graph, before);
    }

    #[test]
    fn query_node_removal_restores_arena() {
        let mut graph = NavGraph::new(vec![square(0.0, 0.0, 10.0)]).expect("graph");
        let before = graph.clone();
        let links = graph.polygon_nodes(0).to_vec();

        let a = graph.insert_query_node(Vec2::new(1.0, 1.0), &links);
        let b = graph.insert_query_node(Vec2::new(2.0, 2.0), &links);
        assert_eq!(graph.node_count(), 11);

        // Out-of-order removal still compacts the tail.
        graph.remove_query_node(a);
        assert_eq!(graph.slot_count(), 11);
        graph.remove_query_node(b);
        assert_eq!(graph, before);

        // Mesh nodes cannot be removed this way.
        graph.remove_query_node(NodeId(0));
        assert_eq!(graph, before);
    }
}
