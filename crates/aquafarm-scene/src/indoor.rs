//! Indoor environment builder
//!
//! Builds the hall interior: concrete floor, block walls with cut openings,
//! hinged doors and windows lined up with those openings, roof structure,
//! ceiling fixtures, grated walkways, and the tank grid with swimming
//! occupants. Tanks and fish are model-based when their glTFs load and fall
//! back to primitive shapes when loading fails.

use bevy::math::Affine2;
use bevy::light::NotShadowCaster;
use bevy::pbr::DistanceFog;
use bevy::prelude::*;
use rand::Rng;
use tracing::{info, warn};

use aquafarm_core::config::InteriorConfig;
use aquafarm_core::layout::{grid_positions, walkway_runs, WalkwayAxis};
use aquafarm_core::motion::SwimPath;
use aquafarm_core::{HingeSide, HingedPanel, PanelKind};

use crate::animate::Swimmer;
use crate::camera::MainCamera;
use crate::lifecycle::{FacilitySettings, InteriorObject, SceneMode};
use crate::lighting::LightRig;
use crate::loader::{BatchStatus, ModelCache};
use crate::outdoor::spawn_sky_dome_with_marker;
use crate::picking::{PanelBody, PanelPivot};
use crate::textures::{self, Opening};
use crate::ModeEntrySet;

const DOOR_WIDTH: f32 = 2.2;
const DOOR_HEIGHT: f32 = 3.2;
const WINDOW_WIDTH: f32 = 2.0;
const WINDOW_HEIGHT: f32 = 1.2;
const WINDOW_Y: f32 = 3.0;
/// Panels sit just inside their wall plane to avoid z-fighting.
const WALL_OFFSET: f32 = 0.015;

const FRONT_DOOR_XS: [f32; 3] = [-5.0, 0.0, 5.0];
const BACK_DOOR_XS: [f32; 1] = [0.0];
const BACK_WINDOW_XS: [f32; 2] = [-4.5, 4.5];
const SIDE_WINDOW_ZS: [f32; 2] = [-3.5, 3.5];

/// Which axis a panel is offset along from its pivot.
enum PanelAxis {
    X,
    Z,
}

/// Whether the tank grid has been spawned yet.
#[derive(Resource, Default)]
struct IndoorPopulation {
    tanks: bool,
}

pub struct IndoorPlugin;

impl Plugin for IndoorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<IndoorPopulation>()
            .add_systems(
                OnEnter(SceneMode::Interior),
                setup_interior.in_set(ModeEntrySet::Build),
            )
            .add_systems(
                Update,
                populate_interior.run_if(in_state(SceneMode::Interior)),
            );
    }
}

/// Spawn the static hall interior and kick off model loads.
#[allow(clippy::too_many_arguments)]
fn setup_interior(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut images: ResMut<Assets<Image>>,
    settings: Res<FacilitySettings>,
    asset_server: Res<AssetServer>,
    mut cache: ResMut<ModelCache>,
    mut population: ResMut<IndoorPopulation>,
    camera_query: Query<Entity, With<MainCamera>>,
) {
    let config = &settings.0;
    let mut rng = rand::rng();
    population.tanks = false;

    // The exterior fog would wash out the hall.
    if let Ok(camera) = camera_query.single() {
        commands.entity(camera).remove::<DistanceFog>();
    }

    let wall_height = config.interior.wall_height;
    LightRig::interior(wall_height).spawn(&mut commands, InteriorObject);

    spawn_floor(&mut commands, &mut meshes, &mut materials, &mut images, config.interior.room_size, &mut rng);
    spawn_backdrop(&mut commands, &mut meshes, &mut materials, &mut images);
    spawn_walls(&mut commands, &mut meshes, &mut materials, &mut images, &config.interior, &mut rng);
    spawn_panels(&mut commands, &mut meshes, &mut materials, config.interior.room_size);
    spawn_roof_structure(&mut commands, &mut meshes, &mut materials, &config.interior);
    spawn_walkways(&mut commands, &mut meshes, &mut materials, &mut images, &config.interior, &mut rng);

    cache.request_many(
        &asset_server,
        &[config.assets.pool.as_str(), config.assets.fish.as_str()],
    );

    info!("Interior environment built");
}

fn spawn_floor(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    images: &mut Assets<Image>,
    room_size: [f32; 2],
    rng: &mut impl Rng,
) {
    let concrete = images.add(textures::concrete(rng));
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(room_size[0], room_size[1]))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb_u8(170, 170, 170),
            base_color_texture: Some(concrete),
            perceptual_roughness: 1.0,
            uv_transform: Affine2::from_scale(Vec2::new(2.0, 1.5)),
            ..default()
        })),
        Transform::IDENTITY,
        InteriorObject,
    ));
}

/// Sky and outer ground, visible through the wall openings.
fn spawn_backdrop(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    images: &mut Assets<Image>,
) {
    spawn_sky_dome_with_marker(commands, meshes, materials, images, InteriorObject);

    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(300.0, 240.0))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb_u8(42, 77, 58),
            perceptual_roughness: 1.0,
            ..default()
        })),
        // Slightly below the hall floor to avoid z-fighting.
        Transform::from_xyz(0.0, -0.002, 0.0),
        NotShadowCaster,
        InteriorObject,
    ));
}

/// Four walls with openings cut through both the texture and the picking
/// geometry (the hinged panels spawned over them).
fn spawn_walls(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    images: &mut Assets<Image>,
    config: &InteriorConfig,
    rng: &mut impl Rng,
) {
    let [room_w, room_d] = config.room_size;
    let height = config.wall_height;

    let door_opening = |x: f32| Opening {
        x,
        y: DOOR_HEIGHT / 2.0,
        width: DOOR_WIDTH,
        height: DOOR_HEIGHT,
    };
    let window_opening = |x: f32| Opening {
        x,
        y: WINDOW_Y,
        width: WINDOW_WIDTH,
        height: WINDOW_HEIGHT,
    };

    let front_openings: Vec<Opening> = FRONT_DOOR_XS.iter().copied().map(door_opening).collect();
    let back_openings: Vec<Opening> = BACK_DOOR_XS
        .iter()
        .copied()
        .map(door_opening)
        .chain(BACK_WINDOW_XS.iter().copied().map(window_opening))
        .collect();
    // On the side walls, wall-local X runs along world Z.
    let side_openings: Vec<Opening> = SIDE_WINDOW_ZS.iter().copied().map(window_opening).collect();

    let walls: [(f32, f32, Vec3, f32, &[Opening]); 4] = [
        (room_w, height, Vec3::new(0.0, height / 2.0, -room_d / 2.0), 0.0, &front_openings),
        (
            room_w,
            height,
            Vec3::new(0.0, height / 2.0, room_d / 2.0),
            std::f32::consts::PI,
            &back_openings,
        ),
        (
            room_d,
            height,
            Vec3::new(-room_w / 2.0, height / 2.0, 0.0),
            std::f32::consts::FRAC_PI_2,
            &side_openings,
        ),
        (
            room_d,
            height,
            Vec3::new(room_w / 2.0, height / 2.0, 0.0),
            -std::f32::consts::FRAC_PI_2,
            &side_openings,
        ),
    ];

    for (width, wall_height, position, yaw, openings) in walls {
        let texture = images.add(textures::wall_blocks(rng, width, wall_height, openings));
        commands.spawn((
            Mesh3d(meshes.add(Rectangle::new(width, wall_height))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::srgb_u8(170, 170, 170),
                base_color_texture: Some(texture),
                alpha_mode: AlphaMode::Blend,
                cull_mode: None,
                double_sided: true,
                perceptual_roughness: 1.0,
                ..default()
            })),
            Transform::from_translation(position).with_rotation(Quat::from_rotation_y(yaw)),
            NotShadowCaster,
            InteriorObject,
        ));
    }
}

/// Hinged door and window panels over every wall opening.
fn spawn_panels(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    room_size: [f32; 2],
) {
    use std::f32::consts::{FRAC_PI_2, PI};

    let door_material = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(68, 68, 68),
        cull_mode: None,
        double_sided: true,
        ..default()
    });
    let window_material = materials.add(StandardMaterial {
        base_color: Color::srgba(0.53, 0.8, 1.0, 0.45),
        alpha_mode: AlphaMode::Blend,
        cull_mode: None,
        double_sided: true,
        ..default()
    });

    let half_width = room_size[0] / 2.0 - WALL_OFFSET;
    let half_depth = room_size[1] / 2.0 - WALL_OFFSET;

    // Front doors, hinge on the left edge.
    for x in FRONT_DOOR_XS {
        spawn_hinged_panel(
            commands,
            meshes,
            door_material.clone(),
            Vec3::new(x - DOOR_WIDTH / 2.0, DOOR_HEIGHT / 2.0, -half_depth),
            0.0,
            PanelAxis::X,
            HingedPanel::new(PanelKind::Door, HingeSide::Left, DOOR_WIDTH, DOOR_HEIGHT, PI * 0.6),
        );
    }

    // Back door, hinge on the right edge.
    for x in BACK_DOOR_XS {
        spawn_hinged_panel(
            commands,
            meshes,
            door_material.clone(),
            Vec3::new(x + DOOR_WIDTH / 2.0, DOOR_HEIGHT / 2.0, half_depth),
            PI,
            PanelAxis::X,
            HingedPanel::new(PanelKind::Door, HingeSide::Right, DOOR_WIDTH, DOOR_HEIGHT, PI * 0.6),
        );
    }

    // Back windows.
    for x in BACK_WINDOW_XS {
        spawn_hinged_panel(
            commands,
            meshes,
            window_material.clone(),
            Vec3::new(x - WINDOW_WIDTH / 2.0, WINDOW_Y, half_depth),
            PI,
            PanelAxis::X,
            HingedPanel::new(
                PanelKind::Window,
                HingeSide::Left,
                WINDOW_WIDTH,
                WINDOW_HEIGHT,
                PI * 0.5,
            ),
        );
    }

    // Side windows face across the hall; their panels extend along Z.
    for z in SIDE_WINDOW_ZS {
        spawn_hinged_panel(
            commands,
            meshes,
            window_material.clone(),
            Vec3::new(-half_width, WINDOW_Y, z - WINDOW_WIDTH / 2.0),
            FRAC_PI_2,
            PanelAxis::Z,
            HingedPanel::new(
                PanelKind::Window,
                HingeSide::Left,
                WINDOW_WIDTH,
                WINDOW_HEIGHT,
                PI * 0.5,
            ),
        );
        spawn_hinged_panel(
            commands,
            meshes,
            window_material.clone(),
            Vec3::new(half_width, WINDOW_Y, z + WINDOW_WIDTH / 2.0),
            -FRAC_PI_2,
            PanelAxis::Z,
            HingedPanel::new(
                PanelKind::Window,
                HingeSide::Right,
                WINDOW_WIDTH,
                WINDOW_HEIGHT,
                PI * 0.5,
            ),
        );
    }
}

/// Pivot entity carrying the panel state, with the visible panel mesh as a
/// child offset to the hinge edge. Opening rotates the pivot.
fn spawn_hinged_panel(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    material: Handle<StandardMaterial>,
    pivot_position: Vec3,
    panel_yaw: f32,
    axis: PanelAxis,
    panel: HingedPanel,
) {
    let offset = panel.hinge.sign() * panel.width / 2.0;
    let translation = match axis {
        PanelAxis::X => Vec3::new(offset, 0.0, 0.0),
        PanelAxis::Z => Vec3::new(0.0, 0.0, offset),
    };
    let size = (panel.width, panel.height);

    let pivot = commands
        .spawn((
            Transform::from_translation(pivot_position),
            Visibility::default(),
            PanelPivot(panel),
            InteriorObject,
        ))
        .id();

    let body = commands
        .spawn((
            Mesh3d(meshes.add(Rectangle::new(size.0, size.1))),
            MeshMaterial3d(material),
            Transform::from_translation(translation)
                .with_rotation(Quat::from_rotation_y(panel_yaw)),
            PanelBody { pivot },
            NotShadowCaster,
            InteriorObject,
        ))
        .id();

    commands.entity(pivot).add_child(body);
}

/// Roof plane, trusses, cross beams, and ventilation ducts.
fn spawn_roof_structure(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    config: &InteriorConfig,
) {
    let [room_w, room_d] = config.room_size;
    let height = config.wall_height;

    let roof_material = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(119, 119, 119),
        ..default()
    });
    let steel_material = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(85, 85, 85),
        metallic: 0.4,
        ..default()
    });
    let duct_material = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(102, 102, 102),
        metallic: 0.3,
        ..default()
    });
    let fixture_material = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(255, 255, 170),
        emissive: LinearRgba::rgb(0.8, 0.8, 0.4),
        ..default()
    });

    // Roof plane faces down into the hall.
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(room_w, room_d))),
        MeshMaterial3d(roof_material),
        Transform::from_xyz(0.0, height, 0.0)
            .with_rotation(Quat::from_rotation_x(std::f32::consts::PI)),
        NotShadowCaster,
        InteriorObject,
    ));

    // Main trusses along the hall depth.
    let truss_mesh = meshes.add(Cuboid::new(0.2, 0.4, room_d));
    for i in -3..=3 {
        commands.spawn((
            Mesh3d(truss_mesh.clone()),
            MeshMaterial3d(steel_material.clone()),
            Transform::from_xyz(i as f32 * 2.5, height - 0.2, 0.0),
            NotShadowCaster,
            InteriorObject,
        ));
    }

    // Cross beams.
    let beam_mesh = meshes.add(Cuboid::new(room_w, 0.2, 0.2));
    for i in -2..=2 {
        commands.spawn((
            Mesh3d(beam_mesh.clone()),
            MeshMaterial3d(steel_material.clone()),
            Transform::from_xyz(0.0, height - 0.1, i as f32 * 2.5),
            NotShadowCaster,
            InteriorObject,
        ));
    }

    // Ventilation ducts along both sides.
    let duct_mesh = meshes.add(Cylinder::new(0.3, 10.0));
    for x in [-6.0, 6.0] {
        commands.spawn((
            Mesh3d(duct_mesh.clone()),
            MeshMaterial3d(duct_material.clone()),
            Transform::from_xyz(x, height - 1.0, 0.0)
                .with_rotation(Quat::from_rotation_z(std::f32::consts::FRAC_PI_2)),
            NotShadowCaster,
            InteriorObject,
        ));
    }

    // Ceiling fixture housings under the point lights.
    let fixture_mesh = meshes.add(Cylinder::new(0.5, 0.2));
    for x in [-4.0_f32, 0.0, 4.0] {
        for z in [-3.0_f32, 0.0, 3.0] {
            commands.spawn((
                Mesh3d(fixture_mesh.clone()),
                MeshMaterial3d(fixture_material.clone()),
                Transform::from_xyz(x, height - 0.3, z),
                NotShadowCaster,
                InteriorObject,
            ));
        }
    }
}

/// Grated walkways at the midpoints between tank rows and columns.
fn spawn_walkways(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    images: &mut Assets<Image>,
    config: &InteriorConfig,
    rng: &mut impl Rng,
) {
    const WALKWAY_WIDTH: f32 = 0.9;
    const WALKWAY_HEIGHT: f32 = 0.021;

    let grating = images.add(textures::grating(rng));
    let material = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(106, 112, 117),
        base_color_texture: Some(grating),
        perceptual_roughness: 0.9,
        uv_transform: Affine2::from_scale(Vec2::splat(2.0)),
        ..default()
    });

    for run in walkway_runs(config.tank_rows, config.tank_cols, config.tank_spacing, 4.0, 6.0) {
        let size = match run.axis {
            WalkwayAxis::AlongZ => (WALKWAY_WIDTH, run.length),
            WalkwayAxis::AlongX => (run.length, WALKWAY_WIDTH),
        };
        commands.spawn((
            Mesh3d(meshes.add(Plane3d::default().mesh().size(size.0, size.1))),
            MeshMaterial3d(material.clone()),
            Transform::from_xyz(run.x, WALKWAY_HEIGHT, run.z),
            NotShadowCaster,
            InteriorObject,
        ));
    }
}

/// Spawn the tank grid once both models resolve, or the fallback when
/// either fails.
fn populate_interior(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    settings: Res<FacilitySettings>,
    cache: Res<ModelCache>,
    mut population: ResMut<IndoorPopulation>,
) {
    if population.tanks {
        return;
    }
    let config = &settings.0;

    match cache.batch_status(&[config.assets.pool.as_str(), config.assets.fish.as_str()]) {
        BatchStatus::Pending => {}
        BatchStatus::Ready(handles) => {
            spawn_tank_models(
                &mut commands,
                &mut meshes,
                &mut materials,
                &config.interior,
                &handles[0],
                &handles[1],
            );
            population.tanks = true;
        }
        BatchStatus::Failed => {
            warn!("Tank models unavailable, using fallback tanks");
            spawn_fallback_tanks(&mut commands, &mut meshes, &mut materials, &config.interior);
            population.tanks = true;
        }
    }
}

fn water_material(materials: &mut Assets<StandardMaterial>) -> Handle<StandardMaterial> {
    materials.add(StandardMaterial {
        base_color: Color::srgba(0.27, 0.53, 1.0, 0.7),
        alpha_mode: AlphaMode::Blend,
        cull_mode: None,
        double_sided: true,
        ..default()
    })
}

fn spawn_tank_models(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    config: &InteriorConfig,
    pool: &Handle<Scene>,
    fish: &Handle<Scene>,
) {
    let mut rng = rand::rng();
    const WATER_RADIUS: f32 = 1.65;

    let water_mesh = meshes.add(Circle::new(WATER_RADIUS));
    let water = water_material(materials);

    let mut fish_index = 0usize;
    for (x, z) in grid_positions(config.tank_rows, config.tank_cols, config.tank_spacing) {
        commands.spawn((
            SceneRoot(pool.clone()),
            Transform::from_xyz(x, 0.0, z).with_scale(Vec3::splat(config.tank_scale)),
            InteriorObject,
        ));

        commands.spawn((
            Mesh3d(water_mesh.clone()),
            MeshMaterial3d(water.clone()),
            Transform::from_xyz(x, 0.2, z)
                .with_rotation(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2)),
            NotShadowCaster,
            InteriorObject,
        ));

        let swim_radius = WATER_RADIUS * 0.7;
        let count = rng.random_range(config.fish_per_tank[0]..=config.fish_per_tank[1]);
        for _ in 0..count {
            let angle = rng.random_range(0.0..std::f32::consts::TAU);
            let distance = rng.random_range(0.0..swim_radius);
            let center = Vec3::new(
                x + angle.cos() * distance,
                0.1,
                z + angle.sin() * distance,
            );
            commands.spawn((
                SceneRoot(fish.clone()),
                Transform::from_translation(center).with_scale(Vec3::splat(0.3)),
                Swimmer(SwimPath {
                    center,
                    radius: (swim_radius * 0.4).min(0.3),
                    speed: 0.5 + fish_index as f32 * 0.1,
                    phase: fish_index as f32,
                    bob_amplitude: 0.05,
                }),
                InteriorObject,
            ));
            fish_index += 1;
        }
    }
    info!("Tanks stocked ({fish_index} fish)");
}

pub(crate) fn spawn_fallback_tanks(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    config: &InteriorConfig,
) {
    let mut rng = rand::rng();

    let tank_mesh = meshes.add(Cylinder::new(3.0, 1.0));
    let tank_material = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(139, 69, 19),
        ..default()
    });
    let water_mesh = meshes.add(Circle::new(2.75));
    let water = water_material(materials);
    let fish_mesh = meshes.add(Cuboid::new(0.9, 0.3, 0.3));
    let fish_material = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(255, 102, 0),
        ..default()
    });

    let mut fish_index = 0usize;
    for (x, z) in grid_positions(config.tank_rows, config.tank_cols, config.tank_spacing) {
        commands.spawn((
            Mesh3d(tank_mesh.clone()),
            MeshMaterial3d(tank_material.clone()),
            Transform::from_xyz(x, 0.5, z),
            InteriorObject,
        ));
        commands.spawn((
            Mesh3d(water_mesh.clone()),
            MeshMaterial3d(water.clone()),
            Transform::from_xyz(x, 1.0, z)
                .with_rotation(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2)),
            NotShadowCaster,
            InteriorObject,
        ));

        let swim_radius = 2.0;
        for _ in 0..4 {
            let angle = rng.random_range(0.0..std::f32::consts::TAU);
            let distance = rng.random_range(0.0..swim_radius);
            let center = Vec3::new(
                x + angle.cos() * distance,
                0.8,
                z + angle.sin() * distance,
            );
            commands.spawn((
                Mesh3d(fish_mesh.clone()),
                MeshMaterial3d(fish_material.clone()),
                Transform::from_translation(center),
                Swimmer(SwimPath {
                    center,
                    radius: (swim_radius * 0.4).min(0.3),
                    speed: 0.5 + fish_index as f32 * 0.1,
                    phase: fish_index as f32,
                    bob_amplitude: 0.05,
                }),
                NotShadowCaster,
                InteriorObject,
            ));
            fish_index += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::SystemState;

    #[test]
    fn test_fallback_tanks_are_non_empty() {
        let mut world = World::new();
        world.insert_resource(Assets::<Mesh>::default());
        world.insert_resource(Assets::<StandardMaterial>::default());
        let config = InteriorConfig::default();

        let mut state: SystemState<(
            Commands,
            ResMut<Assets<Mesh>>,
            ResMut<Assets<StandardMaterial>>,
        )> = SystemState::new(&mut world);
        {
            let (mut commands, mut meshes, mut materials) = state.get_mut(&mut world);
            spawn_fallback_tanks(&mut commands, &mut meshes, &mut materials, &config);
        }
        state.apply(&mut world);

        let mut swimmers = world.query::<&Swimmer>();
        let fish = swimmers.iter(&world).count();
        assert_eq!(fish, 4 * config.tank_rows * config.tank_cols);

        let mut tanks = world.query::<&Mesh3d>();
        assert!(tanks.iter(&world).count() > fish);
    }

    #[test]
    fn test_panels_cover_every_opening() {
        let mut world = World::new();
        world.insert_resource(Assets::<Mesh>::default());
        world.insert_resource(Assets::<StandardMaterial>::default());

        let mut state: SystemState<(
            Commands,
            ResMut<Assets<Mesh>>,
            ResMut<Assets<StandardMaterial>>,
        )> = SystemState::new(&mut world);
        {
            let (mut commands, mut meshes, mut materials) = state.get_mut(&mut world);
            spawn_panels(
                &mut commands,
                &mut meshes,
                &mut materials,
                InteriorConfig::default().room_size,
            );
        }
        state.apply(&mut world);

        let mut pivots = world.query::<&PanelPivot>();
        let panels: Vec<_> = pivots.iter(&world).collect();
        // 3 front doors + 1 back door + 2 back windows + 4 side windows.
        assert_eq!(panels.len(), 10);

        let doors = panels
            .iter()
            .filter(|p| p.0.kind == PanelKind::Door)
            .count();
        assert_eq!(doors, 4);

        // Every panel starts closed.
        assert!(panels
            .iter()
            .all(|p| p.0.current_angle == 0.0 && p.0.target_angle == 0.0));
    }
}
