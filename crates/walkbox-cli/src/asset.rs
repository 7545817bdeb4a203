//! Walk-box asset loading.
//!
//! Assets are physics-editor JSON documents: a list of rigid bodies, each carrying polygons
//! as point lists in a normalized coordinate space.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use walkbox_nav::{Polygon, Vec2};

use crate::config::AssetConfig;

#[derive(Debug, Deserialize)]
struct WalkBoxAsset {
    #[serde(rename = "rigidBodies")]
    rigid_bodies: Vec<RigidBody>,
}

#[derive(Debug, Deserialize)]
struct RigidBody {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    polygons: Vec<Vec<AssetPoint>>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct AssetPoint {
    x: f32,
    y: f32,
}

/// Read an asset file and return its walk boxes in world coordinates.
pub fn load_polygons(path: &Path, config: &AssetConfig) -> Result<Vec<Polygon>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read walk-box asset {}", path.display()))?;
    parse_polygons(&content, config)
        .with_context(|| format!("Failed to load walk-box asset {}", path.display()))
}

/// Parse an asset document; each point maps to `normalized * scale + offset`.
pub fn parse_polygons(json: &str, config: &AssetConfig) -> Result<Vec<Polygon>> {
    let asset: WalkBoxAsset = serde_json::from_str(json).context("Invalid asset JSON")?;

    let body = match &config.body_name {
        Some(name) => asset
            .rigid_bodies
            .iter()
            .find(|b| b.name.as_deref() == Some(name.as_str()))
            .ok_or_else(|| anyhow!("No rigid body named {name:?}"))?,
        None => asset.rigid_bodies.get(config.body).ok_or_else(|| {
            anyhow!(
                "Rigid body {} requested but the asset has {}",
                config.body,
                asset.rigid_bodies.len()
            )
        })?,
    };

    let offset = Vec2::new(config.offset[0], config.offset[1]);
    let polygons: Vec<Polygon> = body
        .polygons
        .iter()
        .map(|points| {
            Polygon::new(
                points
                    .iter()
                    .map(|p| Vec2::new(p.x, p.y) * config.scale + offset)
                    .collect(),
            )
        })
        .collect();

    tracing::debug!(
        body = body.name.as_deref().unwrap_or("<unnamed>"),
        polygons = polygons.len(),
        "loaded walk-box asset"
    );
    Ok(polygons)
}
