//! AquaFarm Core - Camera paths, placement math, and interaction state
//!
//! This crate provides the engine-independent logic for the AquaFarm
//! facility viewer:
//! - Camera pose representation and the exterior-to-interior transition path
//! - Hinged panel (door/window) state and easing
//! - Time-parameterized motion for swimming and drifting entities
//! - Deterministic placement algorithms for grids, tree rings, and walkways
//! - Ray/AABB intersection used by the pointer-picking pipeline
//! - Configuration types and TOML loading

pub mod config;
pub mod layout;
pub mod motion;
pub mod panel;
pub mod pose;
pub mod ray;
pub mod transition;

pub use config::{ConfigError, FacilityConfig};
pub use panel::{HingeSide, HingedPanel, PanelKind};
pub use pose::CameraPose;
pub use ray::{Aabb, Ray};
pub use transition::{TransitionConfig, TransitionController, TransitionFrame};
