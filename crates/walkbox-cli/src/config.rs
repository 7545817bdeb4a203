//! CLI configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// File name looked up in the working directory when no `--config` is given.
pub const CONFIG_FILE: &str = "walkbox.yaml";

/// Main CLI configuration, loaded from walkbox.yaml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkboxConfig {
    /// Walk-box asset (relative to the config file's directory)
    pub mesh: Option<PathBuf>,

    /// How asset coordinates map into world space
    pub asset: AssetConfig,

    /// Simulated agent movement
    pub walk: WalkConfig,
}

/// Selection and placement of the polygons inside a walk-box asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetConfig {
    /// Index of the rigid body holding the walk boxes
    #[serde(default)]
    pub body: usize,

    /// Select the rigid body by name instead of index
    #[serde(default)]
    pub body_name: Option<String>,

    /// Multiplier applied to normalized asset coordinates
    ///
    /// Polygons share a node only where their coordinates are bit-identical after scaling, so
    /// shared vertices must come from the same source values in the asset.
    #[serde(default = "default_scale")]
    pub scale: f32,

    /// World-space translation applied after scaling
    #[serde(default)]
    pub offset: [f32; 2],
}

fn default_scale() -> f32 {
    1.0
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            body: 0,
            body_name: None,
            scale: default_scale(),
            offset: [0.0, 0.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalkConfig {
    /// World units per second
    #[serde(default = "default_speed")]
    pub speed: f32,

    /// Seconds per simulated frame
    #[serde(default = "default_frame_dt")]
    pub frame_dt: f32,

    /// Stop the simulation after this many frames
    #[serde(default = "default_max_frames")]
    pub max_frames: usize,
}

fn default_speed() -> f32 {
    200.0
}
fn default_frame_dt() -> f32 {
    1.0 / 60.0
}
fn default_max_frames() -> usize {
    10_000
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            speed: default_speed(),
            frame_dt: default_frame_dt(),
            max_frames: default_max_frames(),
        }
    }
}

impl WalkboxConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let mut config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        if let Some(dir) = path.parent() {
            config.resolve_paths(dir);
        }
        Ok(config)
    }

    /// Load from a directory (looks for walkbox.yaml), falling back to defaults
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            Self::load(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Resolve paths relative to the config directory
    pub fn resolve_paths(&mut self, base: &Path) {
        if let Some(mesh) = &self.mesh {
            self.mesh = Some(base.join(mesh));
        }
    }
}
