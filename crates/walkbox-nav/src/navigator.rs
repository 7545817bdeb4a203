use crate::{NavGraph, Vec2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Ordered waypoints from start to goal, both inclusive.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NavPath {
    pub points: Vec<Vec2>,
}

impl NavPath {
    pub fn new(points: Vec<Vec2>) -> Self {
        Self { points }
    }

    /// Total polyline length.
    pub fn length(&self) -> f32 {
        self.points.windows(2).map(|w| w[0].distance(w[1])).sum()
    }
}

pub trait Navigator {
    /// Route between two world points. `None` means the caller should not move.
    ///
    /// Takes `&mut self` because backends may splice temporary nodes into their graph for the
    /// duration of the query.
    fn find_path(&mut self, start: Vec2, goal: Vec2) -> Option<NavPath>;

    /// Project a point onto the nearest navigable surface.
    ///
    /// Backends that don't support projection may return `None`.
    fn nearest_point(&self, _point: Vec2) -> Option<Vec2> {
        None
    }
}

impl Navigator for NavGraph {
    fn find_path(&mut self, start: Vec2, goal: Vec2) -> Option<NavPath> {
        NavGraph::find_path(self, start, goal)
    }

    fn nearest_point(&self, point: Vec2) -> Option<Vec2> {
        NavGraph::nearest_point(self, point)
    }
}
