use crate::{NavError, Vec2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A walk box: a simple polygon, implicitly closed (the last point connects back to the first).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Polygon {
    points: Vec<Vec2>,
}

impl Polygon {
    pub fn new(points: Vec<Vec2>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Check that the polygon can take part in containment and edge math.
    ///
    /// `index` is the polygon's position in its list and is only used for error reporting.
    pub fn validate(&self, index: usize) -> Result<(), NavError> {
        if self.points.len() < 3 {
            return Err(NavError::MalformedPolygon {
                index,
                points: self.points.len(),
            });
        }
        if let Some(vertex) = self.points.iter().copied().find(|p| !p.is_finite()) {
            return Err(NavError::NonFiniteVertex { index, vertex });
        }
        Ok(())
    }

    /// Edges as `(previous, current)` vertex pairs, starting with `(last, first)`.
    pub fn edges(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[(i + n - 1) % n], self.points[i]))
    }

    /// Arithmetic mean of the vertices.
    pub fn centroid(&self) -> Vec2 {
        if self.points.is_empty() {
            return Vec2::ZERO;
        }
        let sum = self.points.iter().copied().fold(Vec2::ZERO, |acc, p| acc + p);
        sum / self.points.len() as f32
    }

    /// Crossing-number (ray casting) point-in-polygon test.
    ///
    /// A ray is cast towards `+x`. An edge counts as crossed when exactly one endpoint lies
    /// strictly above `p.y` and the edge's intersection with the ray is strictly right of `p.x`.
    /// Boundary points therefore follow a half-open rule: points on a bottom or left edge are
    /// inside, points on a top or right edge are outside.
    ///
    /// Polygons with fewer than 3 points contain nothing.
    pub fn contains(&self, p: Vec2) -> bool {
        if self.points.len() < 3 {
            return false;
        }

        let mut inside = false;
        for (pj, pi) in self.edges() {
            if (pi.y > p.y) != (pj.y > p.y) {
                let x_cross = (pj.x - pi.x) * (p.y - pi.y) / (pj.y - pi.y) + pi.x;
                if p.x < x_cross {
                    inside = !inside;
                }
            }
        }
        inside
    }
}

impl From<Vec<Vec2>> for Polygon {
    fn from(points: Vec<Vec2>) -> Self {
        Self::new(points)
    }
}
