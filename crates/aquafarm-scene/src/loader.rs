//! glTF model loading and caching
//!
//! Models are fetched asynchronously through the asset server; the cache
//! tracks each path through loading into either a reusable scene template
//! or a recorded failure. Builders poll [`ModelCache::batch_status`] and
//! fall back to procedural geometry when any model in their batch fails —
//! there is no partial-success policy.

use bevy::asset::LoadState;
use bevy::gltf::Gltf;
use bevy::prelude::*;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{error, info};

#[derive(Error, Debug, Clone)]
pub enum AssetLoadError {
    #[error("model asset failed to load: {0}")]
    Failed(String),
    #[error("model asset has no scenes: {0}")]
    Empty(String),
}

/// Load state of a single asset path.
#[derive(Debug, Clone)]
pub enum LoadStatus {
    Pending,
    Ready(Handle<Scene>),
    Failed,
}

/// Combined state of a batch of asset paths: all-or-fail.
#[derive(Debug, Clone)]
pub enum BatchStatus {
    Pending,
    Ready(Vec<Handle<Scene>>),
    Failed,
}

/// Cache of loaded model templates keyed by asset path.
///
/// Requesting a path already known (loading, loaded, or failed) is a no-op,
/// so concurrent first loads of the same path cost one parse.
#[derive(Resource, Default)]
pub struct ModelCache {
    pub models: HashMap<String, Handle<Scene>>,
    pub loading: HashMap<String, Handle<Gltf>>,
    pub failed: HashMap<String, AssetLoadError>,
}

impl ModelCache {
    /// Begin loading `path` unless it is already known.
    pub fn request(&mut self, asset_server: &AssetServer, path: &str) {
        if self.models.contains_key(path)
            || self.loading.contains_key(path)
            || self.failed.contains_key(path)
        {
            return;
        }
        info!("Loading model: {path}");
        let handle: Handle<Gltf> = asset_server.load(path.to_string());
        self.loading.insert(path.to_string(), handle);
    }

    pub fn request_many(&mut self, asset_server: &AssetServer, paths: &[&str]) {
        for path in paths {
            self.request(asset_server, path);
        }
    }

    pub fn status(&self, path: &str) -> LoadStatus {
        if let Some(handle) = self.models.get(path) {
            LoadStatus::Ready(handle.clone())
        } else if self.failed.contains_key(path) {
            LoadStatus::Failed
        } else {
            LoadStatus::Pending
        }
    }

    /// All-or-fail combinator over a batch of paths: `Failed` as soon as any
    /// path has failed, `Ready` once every path has loaded, `Pending`
    /// otherwise.
    pub fn batch_status(&self, paths: &[&str]) -> BatchStatus {
        if paths.iter().any(|p| self.failed.contains_key(*p)) {
            return BatchStatus::Failed;
        }
        let mut handles = Vec::with_capacity(paths.len());
        for path in paths {
            match self.models.get(*path) {
                Some(handle) => handles.push(handle.clone()),
                None => return BatchStatus::Pending,
            }
        }
        BatchStatus::Ready(handles)
    }

    /// Drop every cached template and recorded failure.
    pub fn clear(&mut self) {
        let total = self.models.len() + self.loading.len() + self.failed.len();
        self.models.clear();
        self.loading.clear();
        self.failed.clear();
        if total > 0 {
            info!("Model cache cleared ({total} entries)");
        }
    }
}

pub struct LoaderPlugin;

impl Plugin for LoaderPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ModelCache>()
            .add_systems(Update, poll_loaded_models);
    }
}

/// Check loading state and extract scene templates from loaded glTFs.
fn poll_loaded_models(
    mut cache: ResMut<ModelCache>,
    asset_server: Res<AssetServer>,
    gltf_assets: Res<Assets<Gltf>>,
) {
    let loading_keys: Vec<String> = cache.loading.keys().cloned().collect();
    for key in loading_keys {
        let Some(handle) = cache.loading.get(&key).cloned() else {
            continue;
        };

        match asset_server.get_load_state(handle.id()) {
            Some(LoadState::Loaded) => {
                let Some(gltf) = gltf_assets.get(&handle) else {
                    continue;
                };
                let scene = gltf
                    .default_scene
                    .clone()
                    .or_else(|| gltf.scenes.first().cloned());
                match scene {
                    Some(scene_handle) => {
                        info!("Model loaded: {key}");
                        cache.models.insert(key.clone(), scene_handle);
                    }
                    None => {
                        error!("Model has no scenes: {key}");
                        cache
                            .failed
                            .insert(key.clone(), AssetLoadError::Empty(key.clone()));
                    }
                }
                cache.loading.remove(&key);
            }
            Some(LoadState::Failed(_)) => {
                error!("Failed to load model: {key}");
                cache.loading.remove(&key);
                cache
                    .failed
                    .insert(key.clone(), AssetLoadError::Failed(key.clone()));
            }
            _ => {
                // Still loading.
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_is_all_or_fail() {
        let mut cache = ModelCache::default();
        cache.models.insert("a.glb".to_string(), Handle::default());

        // One path still unknown: the batch is pending.
        assert!(matches!(
            cache.batch_status(&["a.glb", "b.glb"]),
            BatchStatus::Pending
        ));

        // Any failure fails the whole batch, even with one model ready.
        cache.failed.insert(
            "b.glb".to_string(),
            AssetLoadError::Failed("b.glb".to_string()),
        );
        assert!(matches!(
            cache.batch_status(&["a.glb", "b.glb"]),
            BatchStatus::Failed
        ));

        // All loaded: ready with one handle per path.
        cache.failed.clear();
        cache.models.insert("b.glb".to_string(), Handle::default());
        match cache.batch_status(&["a.glb", "b.glb"]) {
            BatchStatus::Ready(handles) => assert_eq!(handles.len(), 2),
            other => panic!("expected Ready, got {other:?}"),
        }
    }

    #[test]
    fn test_status_reflects_failure() {
        let mut cache = ModelCache::default();
        assert!(matches!(cache.status("x.glb"), LoadStatus::Pending));

        cache.failed.insert(
            "x.glb".to_string(),
            AssetLoadError::Failed("x.glb".to_string()),
        );
        assert!(matches!(cache.status("x.glb"), LoadStatus::Failed));
    }

    #[test]
    fn test_clear_drops_everything() {
        let mut cache = ModelCache::default();
        cache.models.insert("a.glb".to_string(), Handle::default());
        cache.failed.insert(
            "b.glb".to_string(),
            AssetLoadError::Failed("b.glb".to_string()),
        );

        cache.clear();
        assert!(cache.models.is_empty());
        assert!(cache.failed.is_empty());
        assert!(matches!(cache.status("a.glb"), LoadStatus::Pending));
    }
}
