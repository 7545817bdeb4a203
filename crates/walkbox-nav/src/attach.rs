use crate::{project_onto_segment, NavGraph, NodeId, Vec2};

/// How an arbitrary point joins the mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Attachment {
    /// The point lies inside `polygon`; the query node sits on the point itself.
    Inside { polygon: usize, position: Vec2 },
    /// The point lies outside every polygon and was projected onto the nearest edge of
    /// `polygon`.
    Projected {
        polygon: usize,
        position: Vec2,
        distance_squared: f32,
    },
}

impl Attachment {
    pub fn polygon(&self) -> usize {
        match *self {
            Attachment::Inside { polygon, .. } | Attachment::Projected { polygon, .. } => polygon,
        }
    }

    pub fn position(&self) -> Vec2 {
        match *self {
            Attachment::Inside { position, .. } | Attachment::Projected { position, .. } => {
                position
            }
        }
    }
}

impl NavGraph {
    /// Decide where `p` would attach to the mesh, without touching the graph.
    ///
    /// Containment wins over projection: the first polygon in list order that contains `p` is
    /// used. Otherwise every edge of every polygon is considered; edges whose perpendicular foot
    /// falls outside the segment are skipped, and the nearest remaining foot wins (the earlier
    /// edge on exact ties). Returns `None` when neither step finds a placement.
    pub fn locate(&self, p: Vec2) -> Option<Attachment> {
        if let Some(polygon) = self.polygon_at(p) {
            return Some(Attachment::Inside {
                polygon,
                position: p,
            });
        }

        let mut best: Option<Attachment> = None;
        let mut best_d2 = f32::INFINITY;
        for (polygon, poly) in self.polygons().iter().enumerate() {
            for (a, b) in poly.edges() {
                let Some(proj) = project_onto_segment(p, a, b) else {
                    continue;
                };
                if proj.distance_squared < best_d2 {
                    best_d2 = proj.distance_squared;
                    best = Some(Attachment::Projected {
                        polygon,
                        position: proj.point,
                        distance_squared: proj.distance_squared,
                    });
                }
            }
        }
        best
    }

    /// Closest point on the mesh that a query at `p` would attach to.
    pub fn nearest_point(&self, p: Vec2) -> Option<Vec2> {
        self.locate(p).map(|a| a.position())
    }

    /// Open a query scope. Every node attached through the scope is detached when it drops.
    pub fn scope(&mut self) -> QueryScope<'_> {
        QueryScope {
            graph: self,
            attached: Vec::new(),
        }
    }
}

/// Proof of a live query node. Consumed by [`QueryScope::detach`].
#[derive(Debug, PartialEq)]
#[must_use = "query nodes are detached when their scope drops; keep the handle to route through them"]
pub struct QueryHandle {
    id: NodeId,
    attachment: Attachment,
}

impl QueryHandle {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn position(&self) -> Vec2 {
        self.attachment.position()
    }

    pub fn attachment(&self) -> Attachment {
        self.attachment
    }
}

/// Exclusive access to a [`NavGraph`] for one path request.
///
/// The scope mutably borrows the graph, so no rebuild and no second query can start while
/// query nodes are attached. Dropping the scope retracts every node it still holds, on every
/// exit path.
#[derive(Debug)]
pub struct QueryScope<'g> {
    graph: &'g mut NavGraph,
    attached: Vec<NodeId>,
}

impl QueryScope<'_> {
    pub fn graph(&self) -> &NavGraph {
        &*self.graph
    }

    /// Splice a query node for `p` into the mesh.
    ///
    /// The node is linked to every mesh node of the polygon chosen by [`NavGraph::locate`].
    /// Returns `None` if `p` cannot be attached.
    pub fn attach(&mut self, p: Vec2) -> Option<QueryHandle> {
        let Some(attachment) = self.graph.locate(p) else {
            tracing::trace!(x = p.x, y = p.y, "point cannot be attached to any walk box");
            return None;
        };

        let links = self.graph.polygon_nodes(attachment.polygon()).to_vec();
        let id = self
            .graph
            .insert_query_node(attachment.position(), &links);
        self.attached.push(id);
        tracing::trace!(
            x = p.x,
            y = p.y,
            polygon = attachment.polygon(),
            node = id.0,
            "attached query node"
        );
        Some(QueryHandle { id, attachment })
    }

    /// Detach a query node before the scope ends.
    pub fn detach(&mut self, handle: QueryHandle) {
        if let Some(pos) = self.attached.iter().position(|&id| id == handle.id) {
            self.attached.remove(pos);
            self.graph.remove_query_node(handle.id);
        }
    }

    pub fn attached_count(&self) -> usize {
        self.attached.len()
    }
}

impl Drop for QueryScope<'_> {
    fn drop(&mut self) {
        while let Some(id) = self.attached.pop() {
            self.graph.remove_query_node(id);
        }
    }
}
