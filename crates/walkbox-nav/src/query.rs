use core::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::{NavGraph, NavPath, NodeId, Vec2};

#[derive(Debug, Clone, Copy)]
struct OpenNode {
    f: f32,
    g: f32,
    node: NodeId,
    tie: u64,
}

impl OpenNode {
    fn key_cmp(&self, other: &Self) -> Ordering {
        self.f
            .total_cmp(&other.f)
            .then_with(|| self.g.total_cmp(&other.g))
            .then_with(|| self.node.cmp(&other.node))
            .then_with(|| self.tie.cmp(&other.tie))
    }
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.key_cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenNode {}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap behave like a min-heap.
        other.key_cmp(self)
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Reusable scratch buffers for `NavGraph` searches.
///
/// This avoids per-query allocations when paths are requested often.
#[derive(Debug, Default)]
pub struct NavGraphQuery {
    open: BinaryHeap<OpenNode>,
    g_score: Vec<f32>,
    came_from: Vec<Option<NodeId>>,
    node_path: Vec<NodeId>,
}

impl NavGraph {
    /// Route between two world points.
    ///
    /// Returns `[start, goal]` when one walk box contains both points. Otherwise both points are
    /// attached to the mesh for the duration of the call and the shortest node path is returned
    /// as positions. `None` means "do not move": an endpoint could not be attached, or the
    /// endpoints sit on disconnected parts of the mesh.
    pub fn find_path(&mut self, start: Vec2, goal: Vec2) -> Option<NavPath> {
        let mut query = NavGraphQuery::default();
        let mut out = NavPath::new(Vec::new());
        self.find_path_into(start, goal, &mut query, &mut out)?;
        Some(out)
    }

    pub fn find_path_into(
        &mut self,
        start: Vec2,
        goal: Vec2,
        query: &mut NavGraphQuery,
        out: &mut NavPath,
    ) -> Option<()> {
        out.points.clear();

        if let Some(polygon) = self.shared_polygon(start, goal) {
            tracing::debug!(polygon, "direct path inside a single walk box");
            out.points.push(start);
            out.points.push(goal);
            return Some(());
        }

        let mut scope = self.scope();
        let Some(from) = scope.attach(start) else {
            tracing::debug!(x = start.x, y = start.y, "no path: start is off the mesh");
            return None;
        };
        let Some(to) = scope.attach(goal) else {
            tracing::debug!(x = goal.x, y = goal.y, "no path: goal is off the mesh");
            return None;
        };

        let graph = scope.graph();
        if graph
            .find_node_path_into(from.id(), to.id(), query)
            .is_none()
        {
            tracing::debug!("no path: endpoints are on disconnected walk boxes");
            return None;
        }

        out.points.extend(
            query
                .node_path
                .iter()
                .filter_map(|&id| graph.position_of(id)),
        );
        // A query node may sit exactly on a mesh node.
        out.points.dedup();
        tracing::debug!(waypoints = out.points.len(), "found walk-box path");
        Some(())
    }

    /// A* over the node graph with Euclidean edge weights and heuristic.
    pub fn find_node_path(&self, start: NodeId, goal: NodeId) -> Option<Vec<NodeId>> {
        let mut query = NavGraphQuery::default();
        self.find_node_path_into(start, goal, &mut query)?;
        Some(query.node_path)
    }

    fn find_node_path_into(
        &self,
        start: NodeId,
        goal: NodeId,
        query: &mut NavGraphQuery,
    ) -> Option<()> {
        let NavGraphQuery {
            open,
            g_score,
            came_from,
            node_path,
        } = query;
        node_path.clear();

        let goal_pos = self.position_of(goal)?;
        self.node(start)?;
        if start == goal {
            node_path.push(start);
            return Some(());
        }

        let heuristic = |id: NodeId| -> f32 {
            self.position_of(id)
                .map(|p| p.distance(goal_pos))
                .unwrap_or(f32::INFINITY)
        };

        let n = self.slot_count();
        open.clear();
        g_score.resize(n, f32::INFINITY);
        g_score.fill(f32::INFINITY);
        came_from.resize(n, None);
        came_from.fill(None);

        g_score[start.index()] = 0.0;
        open.push(OpenNode {
            f: heuristic(start),
            g: 0.0,
            node: start,
            tie: 0,
        });
        let mut tie: u64 = 1;

        while let Some(current) = open.pop() {
            if current.node == goal {
                node_path.push(goal);
                let mut at = goal;
                while let Some(prev) = came_from[at.index()] {
                    at = prev;
                    node_path.push(at);
                }
                node_path.reverse();
                return Some(());
            }

            if current.g > g_score[current.node.index()] {
                // Stale heap entry.
                continue;
            }

            let Some(node) = self.node(current.node) else {
                continue;
            };
            let here = node.position();
            for next in node.neighbors() {
                let Some(there) = self.position_of(next) else {
                    continue;
                };
                let tentative_g = current.g + here.distance(there);
                if tentative_g >= g_score[next.index()] {
                    continue;
                }

                came_from[next.index()] = Some(current.node);
                g_score[next.index()] = tentative_g;
                open.push(OpenNode {
                    f: tentative_g + heuristic(next),
                    g: tentative_g,
                    node: next,
                    tie,
                });
                tie += 1;
            }
        }

        None
    }
}
