//! Walk-box navigation for point-and-click movement.
//!
//! A set of simple polygons ("walk boxes") is turned into a node graph. Arbitrary points are
//! spliced into that graph for the duration of a single path query and removed again before
//! the query returns.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod attach;
pub mod error;
pub mod follow;
pub mod graph;
pub mod math;
pub mod navigator;
pub mod polygon;
pub mod query;

pub use attach::{Attachment, QueryHandle, QueryScope};
pub use error::{NavError, Result};
pub use follow::{FollowStep, PathFollower};
pub use graph::{GraphNode, NavGraph, NodeId, NodeKind};
pub use math::{project_onto_segment, NodeKey, SegmentProjection, Vec2};
pub use navigator::{NavPath, Navigator};
pub use polygon::Polygon;
pub use query::NavGraphQuery;
