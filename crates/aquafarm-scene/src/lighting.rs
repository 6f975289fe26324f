//! Parameterized lighting rigs per scene mode

use bevy::prelude::*;

/// A light setup: ambient level, one directional key light, and an optional
/// array of point lights (interior ceiling fixtures).
pub struct LightRig {
    pub ambient_color: Color,
    pub ambient_brightness: f32,
    pub key_illuminance: f32,
    pub key_position: Vec3,
    pub key_shadows: bool,
    pub fixture_positions: Vec<Vec3>,
    pub fixture_color: Color,
    pub fixture_intensity: f32,
    pub fixture_range: f32,
}

impl LightRig {
    /// Daylight rig: sky ambient plus a sun with shadows.
    pub fn exterior() -> Self {
        Self {
            ambient_color: Color::srgb(0.8, 0.85, 0.9),
            ambient_brightness: 300.0,
            key_illuminance: 10_000.0,
            key_position: Vec3::new(30.0, 40.0, 20.0),
            key_shadows: true,
            fixture_positions: Vec::new(),
            fixture_color: Color::WHITE,
            fixture_intensity: 0.0,
            fixture_range: 0.0,
        }
    }

    /// Hall rig: dimmer ambient, an overhead key light, and a grid of warm
    /// ceiling fixtures.
    pub fn interior(wall_height: f32) -> Self {
        let mut fixture_positions = Vec::new();
        for x in [-4.0_f32, 0.0, 4.0] {
            for z in [-3.0_f32, 0.0, 3.0] {
                fixture_positions.push(Vec3::new(x, wall_height - 0.5, z));
            }
        }
        Self {
            ambient_color: Color::srgb(0.7, 0.7, 0.75),
            ambient_brightness: 150.0,
            key_illuminance: 3_000.0,
            key_position: Vec3::new(0.0, wall_height - 1.0, 0.0),
            key_shadows: true,
            fixture_positions,
            fixture_color: Color::srgb(1.0, 1.0, 0.8),
            fixture_intensity: 60_000.0,
            fixture_range: 8.0,
        }
    }

    /// Spawn the rig. Lights are tagged with `marker` so they are torn down
    /// with the rest of their scene.
    pub fn spawn<M: Component + Clone>(&self, commands: &mut Commands, marker: M) {
        commands.insert_resource(AmbientLight {
            color: self.ambient_color,
            brightness: self.ambient_brightness,
            ..default()
        });

        commands.spawn((
            DirectionalLight {
                illuminance: self.key_illuminance,
                shadows_enabled: self.key_shadows,
                ..default()
            },
            Transform::from_translation(self.key_position).looking_at(Vec3::ZERO, Vec3::Y),
            marker.clone(),
        ));

        for &position in &self.fixture_positions {
            commands.spawn((
                PointLight {
                    color: self.fixture_color,
                    intensity: self.fixture_intensity,
                    range: self.fixture_range,
                    shadows_enabled: false,
                    ..default()
                },
                Transform::from_translation(position),
                marker.clone(),
            ));
        }
    }
}
