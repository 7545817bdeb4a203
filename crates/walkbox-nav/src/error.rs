use thiserror::Error;

use crate::Vec2;

/// Errors raised while building the navigation graph.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NavError {
    #[error("polygon {index} has {points} point(s); a walk box needs at least 3")]
    MalformedPolygon { index: usize, points: usize },

    #[error("polygon {index} has a non-finite vertex {vertex:?}")]
    NonFiniteVertex { index: usize, vertex: Vec2 },
}

pub type Result<T> = std::result::Result<T, NavError>;
