//! Viewer configuration loading and validation

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::pose::CameraPose;
use crate::transition::TransitionConfig;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Top-level configuration for the facility viewer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FacilityConfig {
    pub assets: AssetPaths,
    pub exterior: ExteriorConfig,
    pub interior: InteriorConfig,
    pub camera: CameraConfig,
    pub transition: TransitionConfig,
}

/// Well-known asset paths, resolved through the asset server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetPaths {
    pub farm: String,
    pub tree: String,
    pub pine: String,
    pub pool: String,
    pub fish: String,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            farm: "models/farm.glb".to_string(),
            tree: "models/tree.glb".to_string(),
            pine: "models/pine.glb".to_string(),
            pool: "models/pool.glb".to_string(),
            fish: "models/fish.glb".to_string(),
        }
    }
}

/// Exterior scene layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExteriorConfig {
    /// Buildings per grid side (grid is square).
    pub building_grid: usize,
    pub building_spacing: f32,
    pub building_scale: f32,
    /// Pickable bounds of one building, as half extents.
    pub building_half_extents: [f32; 3],
    /// Side length of the open area the tree rings enclose.
    pub tree_area_size: f32,
    pub tree_ring_gap: f32,
    pub tree_rings: usize,
    pub tree_spacing: f32,
    pub cloud_count: usize,
    /// Clouds wrap around at +/- this X extent.
    pub cloud_half_extent: f32,
    pub ground_size: [f32; 2],
}

impl Default for ExteriorConfig {
    fn default() -> Self {
        Self {
            building_grid: 3,
            building_spacing: 2.5,
            building_scale: 2.0,
            building_half_extents: [3.0, 2.0, 3.0],
            tree_area_size: 6.0,
            tree_ring_gap: 1.6,
            tree_rings: 4,
            tree_spacing: 0.8,
            cloud_count: 14,
            cloud_half_extent: 80.0,
            ground_size: [100.0, 80.0],
        }
    }
}

/// Interior scene layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InteriorConfig {
    pub tank_rows: usize,
    pub tank_cols: usize,
    pub tank_spacing: f32,
    pub tank_scale: f32,
    /// Room floor footprint (width, depth).
    pub room_size: [f32; 2],
    pub wall_height: f32,
    /// Fish per tank, inclusive range.
    pub fish_per_tank: [usize; 2],
    /// Global animation time scale for swimming and easing.
    pub animation_speed: f32,
}

impl Default for InteriorConfig {
    fn default() -> Self {
        Self {
            tank_rows: 3,
            tank_cols: 4,
            tank_spacing: 3.0,
            tank_scale: 1.5,
            room_size: [16.0, 12.0],
            wall_height: 6.0,
            fish_per_tank: [3, 5],
            animation_speed: 0.6,
        }
    }
}

/// A camera preset: a pose plus the orbit limits that apply while it is
/// active.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewPreset {
    pub pose: CameraPose,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Elevation above the horizon, radians.
    pub min_elevation: f32,
    pub max_elevation: f32,
}

/// Orbit camera tuning and the three view presets.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub normal: ViewPreset,
    pub aerial: ViewPreset,
    pub interior: ViewPreset,
    pub sensitivity: f32,
    pub zoom_speed: f32,
    pub smooth_factor: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        use std::f32::consts::PI;
        Self {
            normal: ViewPreset {
                pose: CameraPose::new(Vec3::new(5.0, 1.75, 5.0), Vec3::new(0.0, 1.0, 0.0)),
                min_distance: 8.0,
                max_distance: 60.0,
                // Keep the camera between 30 degrees up and just above the
                // ground plane.
                min_elevation: PI / 2.0 - PI / 2.2,
                max_elevation: PI / 2.0 - PI / 6.0,
            },
            aerial: ViewPreset {
                pose: CameraPose::new(Vec3::new(0.0, 30.0, 0.0), Vec3::ZERO),
                min_distance: 15.0,
                max_distance: 60.0,
                min_elevation: PI / 2.0 - PI / 2.1,
                max_elevation: PI / 2.0,
            },
            interior: ViewPreset {
                pose: CameraPose::new(Vec3::new(0.0, 2.0, 3.0), Vec3::ZERO),
                min_distance: 2.0,
                max_distance: 12.0,
                min_elevation: 0.1,
                max_elevation: PI / 2.0 - PI / 6.0,
            },
            sensitivity: 0.005,
            zoom_speed: 0.1,
            smooth_factor: 0.15,
        }
    }
}

/// Load configuration from a TOML file, falling back to defaults when the
/// file does not exist.
pub fn load_config(path: &Path) -> Result<FacilityConfig, ConfigError> {
    if !path.exists() {
        info!("No config file at {}, using defaults", path.display());
        return Ok(FacilityConfig::default());
    }

    let content = std::fs::read_to_string(path)?;
    let config: FacilityConfig = toml::from_str(&content)?;
    info!("Loaded config from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_consistent() {
        let config = FacilityConfig::default();
        assert_eq!(config.exterior.building_grid, 3);
        assert_eq!(config.interior.tank_rows * config.interior.tank_cols, 12);
        assert!(config.camera.normal.min_distance < config.camera.normal.max_distance);
        assert!(config.camera.normal.min_elevation < config.camera.normal.max_elevation);
        assert_eq!(config.transition.duration_ms, 2000.0);
    }

    #[test]
    fn test_partial_toml_overrides_defaults() {
        let config: FacilityConfig = toml::from_str(
            r#"
            [exterior]
            building_grid = 4

            [interior]
            tank_spacing = 4.5

            [transition]
            duration_ms = 1500.0
            "#,
        )
        .unwrap();

        assert_eq!(config.exterior.building_grid, 4);
        assert_eq!(config.interior.tank_spacing, 4.5);
        assert_eq!(config.transition.duration_ms, 1500.0);
        // Untouched sections keep their defaults.
        assert_eq!(config.assets.farm, "models/farm.glb");
        assert_eq!(config.interior.tank_rows, 3);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = load_config(Path::new("/nonexistent/aquafarm.toml")).unwrap();
        assert_eq!(config.assets.pool, "models/pool.glb");
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aquafarm.toml");

        let mut config = FacilityConfig::default();
        config.exterior.cloud_count = 20;
        std::fs::write(&path, toml::to_string(&config).unwrap()).unwrap();

        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded.exterior.cloud_count, 20);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aquafarm.toml");
        std::fs::write(&path, "not [valid toml").unwrap();
        assert!(load_config(&path).is_err());
    }
}
