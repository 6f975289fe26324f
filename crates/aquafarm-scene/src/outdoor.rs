//! Outdoor environment builder
//!
//! Builds the exterior scene: ground, sky dome, fog, drifting clouds, the
//! stone footpath network, the building grid, and the perimeter tree rings.
//! Buildings and trees are model-based when their glTFs load and fall back
//! to primitive shapes of equivalent footprint when loading fails, so the
//! exterior always renders something.

use bevy::math::Affine2;
use bevy::light::NotShadowCaster;
use bevy::pbr::{DistanceFog, FogFalloff};
use bevy::prelude::*;
use rand::Rng;
use tracing::{info, warn};

use aquafarm_core::config::ExteriorConfig;
use aquafarm_core::layout::{grid_positions, path_segments, ring_positions};
use aquafarm_core::motion::DriftPath;

use crate::animate::Cloud;
use crate::camera::{MainCamera, OrbitCamera};
use crate::lifecycle::{ExteriorObject, FacilitySettings, SceneMode};
use crate::lighting::LightRig;
use crate::loader::{BatchStatus, ModelCache};
use crate::picking::{Structure, StructureRegistry};
use crate::textures;
use crate::ModeEntrySet;

/// Which model-backed parts of the exterior have been spawned so far.
#[derive(Resource, Default)]
struct OutdoorPopulation {
    buildings: bool,
    trees: bool,
}

pub struct OutdoorPlugin;

impl Plugin for OutdoorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OutdoorPopulation>()
            .add_systems(
                OnEnter(SceneMode::Exterior),
                setup_exterior.in_set(ModeEntrySet::Build),
            )
            .add_systems(
                Update,
                populate_exterior.run_if(in_state(SceneMode::Exterior)),
            );
    }
}

/// Spawn the static exterior environment and kick off model loads.
#[allow(clippy::too_many_arguments)]
fn setup_exterior(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut images: ResMut<Assets<Image>>,
    settings: Res<FacilitySettings>,
    asset_server: Res<AssetServer>,
    mut cache: ResMut<ModelCache>,
    mut orbit: ResMut<OrbitCamera>,
    mut population: ResMut<OutdoorPopulation>,
    mut registry: ResMut<StructureRegistry>,
    camera_query: Query<Entity, With<MainCamera>>,
) {
    let config = &settings.0;
    let mut rng = rand::rng();
    *population = OutdoorPopulation::default();
    registry.0.clear();

    orbit.apply_preset(&config.camera.normal);

    // Outdoor fog blends the distant ground into the sky.
    if let Ok(camera) = camera_query.single() {
        commands.entity(camera).insert(DistanceFog {
            color: Color::srgb_u8(135, 206, 235),
            falloff: FogFalloff::Linear {
                start: 30.0,
                end: 120.0,
            },
            ..default()
        });
    }

    LightRig::exterior().spawn(&mut commands, ExteriorObject);

    // Ground plane.
    let [ground_w, ground_d] = config.exterior.ground_size;
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(ground_w, ground_d))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb_u8(42, 77, 58),
            perceptual_roughness: 1.0,
            ..default()
        })),
        Transform::IDENTITY,
        ExteriorObject,
    ));

    spawn_sky_dome_with_marker(
        &mut commands,
        &mut meshes,
        &mut materials,
        &mut images,
        ExteriorObject,
    );
    spawn_clouds(
        &mut commands,
        &mut meshes,
        &mut materials,
        &mut images,
        &config.exterior,
        &mut rng,
    );
    spawn_footpaths(
        &mut commands,
        &mut meshes,
        &mut materials,
        &mut images,
        &config.exterior,
        &mut rng,
    );

    cache.request_many(
        &asset_server,
        &[
            config.assets.farm.as_str(),
            config.assets.tree.as_str(),
            config.assets.pine.as_str(),
        ],
    );

    info!("Exterior environment built");
}

/// Gradient sky dome seen from the inside. Shared with the indoor builder,
/// which shows the same sky through the wall openings.
pub(crate) fn spawn_sky_dome_with_marker<M: Component>(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    images: &mut Assets<Image>,
    marker: M,
) {
    let sky = images.add(textures::sky_gradient([142, 197, 255], [238, 248, 255]));
    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(500.0).mesh().uv(32, 18))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color_texture: Some(sky),
            unlit: true,
            cull_mode: None,
            ..default()
        })),
        Transform::IDENTITY,
        NotShadowCaster,
        marker,
    ));
}

/// Drifting cloud billboards, each with its own synthesized sprite.
fn spawn_clouds(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    images: &mut Assets<Image>,
    config: &ExteriorConfig,
    rng: &mut impl Rng,
) {
    let cloud_mesh = meshes.add(Rectangle::new(1.0, 0.5));

    for _ in 0..config.cloud_count {
        let sprite = images.add(textures::cloud_sprite(rng));
        let scale = rng.random_range(6.0..12.0);
        let origin = Vec3::new(
            rng.random_range(-60.0..60.0),
            rng.random_range(9.0..15.0),
            rng.random_range(-40.0..40.0),
        );
        let direction = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let speed = direction * rng.random_range(1.2..3.0);

        commands.spawn((
            Mesh3d(cloud_mesh.clone()),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color_texture: Some(sprite),
                base_color: Color::srgba(1.0, 1.0, 1.0, 0.85),
                alpha_mode: AlphaMode::Blend,
                unlit: true,
                cull_mode: None,
                ..default()
            })),
            Transform::from_translation(origin).with_scale(Vec3::new(scale, scale, 1.0)),
            Cloud(DriftPath {
                origin,
                speed,
                half_extent: config.cloud_half_extent,
                sway_amplitude: 0.12,
            }),
            NotShadowCaster,
            ExteriorObject,
        ));
    }
}

/// Stone path segments between the building rows and columns, four access
/// paths from the cardinal directions, and a few stray stepping stones.
fn spawn_footpaths(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    images: &mut Assets<Image>,
    config: &ExteriorConfig,
    rng: &mut impl Rng,
) {
    let stone = images.add(textures::stone_path(rng));
    let material = materials.add(StandardMaterial {
        base_color_texture: Some(stone),
        perceptual_roughness: 1.0,
        uv_transform: Affine2::from_scale(Vec2::splat(6.0)),
        ..default()
    });

    const PATH_WIDTH: f32 = 0.8;
    const PATH_HEIGHT: f32 = 0.01;

    let mut spawn_piece = |size: (f32, f32), x: f32, z: f32, yaw: f32| {
        commands.spawn((
            Mesh3d(meshes.add(Plane3d::default().mesh().size(size.0, size.1))),
            MeshMaterial3d(material.clone()),
            Transform::from_xyz(x, PATH_HEIGHT, z).with_rotation(Quat::from_rotation_y(yaw)),
            NotShadowCaster,
            ExteriorObject,
        ));
    };

    // Lane midlines fall halfway between building rows/columns.
    let mid = config.building_spacing / 2.0;

    for z in [-mid, mid] {
        let mut x = -6.0;
        while x <= 6.0 {
            let length = 1.2 + rng.random_range(0.0..0.3);
            spawn_piece(
                (length, PATH_WIDTH),
                x + rng.random_range(-0.05..0.05),
                z + rng.random_range(-0.025..0.025),
                0.0,
            );
            x += 1.5;
        }
    }

    for x in [-mid, mid] {
        let mut z = -5.0;
        while z <= 5.0 {
            let length = 1.2 + rng.random_range(0.0..0.3);
            spawn_piece(
                (PATH_WIDTH, length),
                x + rng.random_range(-0.025..0.025),
                z + rng.random_range(-0.05..0.05),
                0.0,
            );
            z += 1.5;
        }
    }

    // Access paths from the cardinal directions toward the center.
    let access = [
        ((-8.0, 0.0), (-3.5, 0.0)),
        ((8.0, 0.0), (3.5, 0.0)),
        ((0.0, -7.0), (0.0, -3.5)),
        ((0.0, 7.0), (0.0, 3.5)),
    ];
    for (from, to) in access {
        for segment in path_segments(from, to, 8) {
            let length = 1.0 + rng.random_range(0.0..0.4);
            spawn_piece((length, PATH_WIDTH), segment.x, segment.z, -segment.angle);
        }
    }

    // Decorative stepping stones, kept clear of the buildings.
    let building_cells = grid_positions(
        config.building_grid,
        config.building_grid,
        config.building_spacing,
    );
    for _ in 0..12 {
        let x = rng.random_range(-6.0..6.0);
        let z = rng.random_range(-5.0..5.0);
        let too_close = building_cells
            .iter()
            .any(|&(bx, bz)| ((x - bx).powi(2) + (z - bz).powi(2)).sqrt() < 1.5);
        if too_close {
            continue;
        }
        let size = 0.3 + rng.random_range(0.0..0.2);
        spawn_piece((size, size), x, z, rng.random_range(0.0..std::f32::consts::TAU));
    }
}

/// Spawn model-backed buildings and trees once their batches resolve, or
/// the procedural fallbacks when loading fails.
fn populate_exterior(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    settings: Res<FacilitySettings>,
    cache: Res<ModelCache>,
    mut population: ResMut<OutdoorPopulation>,
    mut registry: ResMut<StructureRegistry>,
) {
    let config = &settings.0;

    if !population.buildings {
        match cache.batch_status(&[config.assets.farm.as_str()]) {
            BatchStatus::Pending => {}
            BatchStatus::Ready(handles) => {
                spawn_building_models(
                    &mut commands,
                    &config.exterior,
                    &handles[0],
                    &mut registry,
                );
                population.buildings = true;
            }
            BatchStatus::Failed => {
                warn!("Farm model unavailable, using fallback buildings");
                spawn_fallback_buildings(
                    &mut commands,
                    &mut meshes,
                    &mut materials,
                    &config.exterior,
                    &mut registry,
                );
                population.buildings = true;
            }
        }
    }

    if !population.trees {
        match cache.batch_status(&[config.assets.tree.as_str(), config.assets.pine.as_str()]) {
            BatchStatus::Pending => {}
            BatchStatus::Ready(handles) => {
                spawn_tree_models(&mut commands, &config.exterior, &handles[0], &handles[1]);
                population.trees = true;
            }
            BatchStatus::Failed => {
                warn!("Tree models unavailable, using fallback trees");
                spawn_fallback_trees(
                    &mut commands,
                    &mut meshes,
                    &mut materials,
                    &config.exterior,
                );
                population.trees = true;
            }
        }
    }
}

/// Clickable bounds for a building spawned with its base at ground level.
fn building_structure(config: &ExteriorConfig) -> Structure {
    let half_extents = Vec3::from(config.building_half_extents);
    Structure {
        half_extents,
        center_offset: Vec3::new(0.0, half_extents.y, 0.0),
    }
}

fn spawn_building_models(
    commands: &mut Commands,
    config: &ExteriorConfig,
    farm: &Handle<Scene>,
    registry: &mut StructureRegistry,
) {
    let mut rng = rand::rng();
    let cells = grid_positions(config.building_grid, config.building_grid, config.building_spacing);

    for (x, z) in cells {
        // Slight yaw variation keeps the grid from looking stamped.
        let yaw = rng.random_range(-0.1..0.1);
        let entity = commands
            .spawn((
                SceneRoot(farm.clone()),
                Transform::from_xyz(x, 0.0, z)
                    .with_scale(Vec3::splat(config.building_scale))
                    .with_rotation(Quat::from_rotation_y(yaw)),
                building_structure(config),
                ExteriorObject,
            ))
            .id();
        registry.0.push(entity);
    }
    info!("Buildings placed ({} clickable)", registry.0.len());
}

pub(crate) fn spawn_fallback_buildings(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    config: &ExteriorConfig,
    registry: &mut StructureRegistry,
) {
    let half = Vec3::from(config.building_half_extents);
    let mesh = meshes.add(Cuboid::new(half.x * 2.0, half.y * 2.0, half.z * 2.0));
    let material = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(139, 69, 19),
        ..default()
    });

    let cells = grid_positions(config.building_grid, config.building_grid, config.building_spacing);
    let center = cells.len() / 2;

    for (i, (x, z)) in cells.into_iter().enumerate() {
        let mut entity = commands.spawn((
            Mesh3d(mesh.clone()),
            MeshMaterial3d(material.clone()),
            Transform::from_xyz(x, half.y, z),
            Structure {
                half_extents: half,
                center_offset: Vec3::ZERO,
            },
            ExteriorObject,
        ));
        // Shadow budget: only the center building casts shadows.
        if i != center {
            entity.insert(NotShadowCaster);
        }
        registry.0.push(entity.id());
    }
}

fn spawn_tree_models(
    commands: &mut Commands,
    config: &ExteriorConfig,
    tree: &Handle<Scene>,
    pine: &Handle<Scene>,
) {
    let mut rng = rand::rng();
    let mut count = 0;

    for ring in 0..config.tree_rings {
        // Successive rings grow outward by one ring gap each.
        let inner = config.tree_area_size + ring as f32 * config.tree_ring_gap;
        for (x, z) in ring_positions(inner, config.tree_ring_gap, 1, config.tree_spacing) {
            let handle = if rng.random_bool(0.5) { tree } else { pine };
            let scale = rng.random_range(0.3..0.5);
            let mut entity = commands.spawn((
                SceneRoot(handle.clone()),
                Transform::from_xyz(
                    x + rng.random_range(-0.2..0.2),
                    0.0,
                    z + rng.random_range(-0.15..0.15),
                )
                .with_scale(Vec3::splat(scale))
                .with_rotation(Quat::from_rotation_y(
                    rng.random_range(0.0..std::f32::consts::TAU),
                )),
                ExteriorObject,
            ));
            // Only the inner two rings are close enough to justify shadows.
            if ring >= 2 {
                entity.insert(NotShadowCaster);
            }
            count += 1;
        }
    }
    info!("Trees placed ({count})");
}

pub(crate) fn spawn_fallback_trees(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    config: &ExteriorConfig,
) {
    let mut rng = rand::rng();
    let mesh = meshes.add(Cone::new(0.3, 1.5));
    let material = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(45, 93, 45),
        ..default()
    });

    for (x, z) in ring_positions(
        config.tree_area_size,
        config.tree_ring_gap,
        config.tree_rings,
        config.tree_spacing,
    ) {
        commands.spawn((
            Mesh3d(mesh.clone()),
            MeshMaterial3d(material.clone()),
            Transform::from_xyz(
                x + rng.random_range(-0.2..0.2),
                0.75,
                z + rng.random_range(-0.15..0.15),
            ),
            NotShadowCaster,
            ExteriorObject,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::SystemState;

    fn test_world() -> World {
        let mut world = World::new();
        world.insert_resource(Assets::<Mesh>::default());
        world.insert_resource(Assets::<StandardMaterial>::default());
        world
    }

    #[test]
    fn test_fallback_buildings_fill_grid_and_registry() {
        let mut world = test_world();
        let config = ExteriorConfig::default();
        let mut registry = StructureRegistry::default();

        let mut state: SystemState<(
            Commands,
            ResMut<Assets<Mesh>>,
            ResMut<Assets<StandardMaterial>>,
        )> = SystemState::new(&mut world);
        {
            let (mut commands, mut meshes, mut materials) = state.get_mut(&mut world);
            spawn_fallback_buildings(
                &mut commands,
                &mut meshes,
                &mut materials,
                &config,
                &mut registry,
            );
        }
        state.apply(&mut world);

        let mut query = world.query::<&Structure>();
        let structures = query.iter(&world).count();
        assert_eq!(structures, config.building_grid * config.building_grid);
        assert_eq!(registry.0.len(), structures);
    }

    #[test]
    fn test_fallback_trees_are_non_empty() {
        let mut world = test_world();
        let config = ExteriorConfig::default();

        let mut state: SystemState<(
            Commands,
            ResMut<Assets<Mesh>>,
            ResMut<Assets<StandardMaterial>>,
        )> = SystemState::new(&mut world);
        {
            let (mut commands, mut meshes, mut materials) = state.get_mut(&mut world);
            spawn_fallback_trees(&mut commands, &mut meshes, &mut materials, &config);
        }
        state.apply(&mut world);

        let mut query = world.query::<&Mesh3d>();
        let trees = query.iter(&world).count();
        assert!(trees > 0, "fallback must produce a non-empty scene");
    }
}
