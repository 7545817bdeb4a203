use core::ops::{Add, Div, Mul, Neg, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// World-space 2D point / vector.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    pub fn distance_squared(self, other: Self) -> f32 {
        (other - self).length_squared()
    }

    pub fn distance(self, other: Self) -> f32 {
        self.distance_squared(other).sqrt()
    }

    /// Linear interpolation: `t = 0` yields `self`, `t = 1` yields `other`.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }

    /// Midpoint of `self` and `other`; bit-identical for either argument order.
    pub fn midpoint(self, other: Self) -> Self {
        (self + other) * 0.5
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Canonical dedup key for this position.
    pub fn key(self) -> NodeKey {
        NodeKey::from_vec2(self)
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f32> for Vec2 {
    type Output = Self;

    fn div(self, rhs: f32) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vec2 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl From<(f32, f32)> for Vec2 {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

/// Exact coordinate key.
///
/// Two positions with bit-identical coordinates (treating `-0.0` as `0.0`) are the same graph
/// node. This is how polygons that share an edge end up sharing nodes. No rounding is applied,
/// so distinct vertices never merge regardless of the mesh's scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeKey(pub u32, pub u32);

impl NodeKey {
    pub fn from_vec2(p: Vec2) -> Self {
        let bits = |v: f32| -> u32 {
            if v == 0.0 {
                0
            } else {
                v.to_bits()
            }
        };
        Self(bits(p.x), bits(p.y))
    }
}

/// Result of projecting a point onto a segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentProjection {
    /// Parametric position along the segment (`0` at the start, `1` at the end).
    pub u: f32,
    /// Projected point on the segment's supporting line.
    pub point: Vec2,
    /// Squared distance from the query point to `point`.
    pub distance_squared: f32,
}

/// Project `p` onto segment `a`-`b`.
///
/// Returns `None` for zero-length segments and when the projection falls outside the segment
/// (`u` outside `[0, 1]`). The result is never clamped to an endpoint.
pub fn project_onto_segment(p: Vec2, a: Vec2, b: Vec2) -> Option<SegmentProjection> {
    let ab = b - a;
    let denom = ab.length_squared();
    if denom == 0.0 || !denom.is_finite() {
        return None;
    }
    let u = (p - a).dot(ab) / denom;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let point = a.lerp(b, u);
    Some(SegmentProjection {
        u,
        point,
        distance_squared: p.distance_squared(point),
    })
}
