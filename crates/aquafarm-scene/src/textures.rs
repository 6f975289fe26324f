//! Procedural surface texture synthesis
//!
//! All surfaces are generated at runtime from pixel-level noise and shape
//! composition: concrete floor, wall block with cut openings, path stone,
//! walkway grating, cloud sprites, and the sky gradient. No image files are
//! shipped.

use bevy::asset::RenderAssetUsages;
use bevy::image::{ImageAddressMode, ImageSampler, ImageSamplerDescriptor};
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use rand::Rng;

/// A rectangular cut in a wall, in wall-local coordinates: `x` measured from
/// the wall center, `y` from the floor up to the opening center.
#[derive(Debug, Clone, Copy)]
pub struct Opening {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// CPU-side RGBA canvas the synthesizers draw into.
struct Canvas {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Canvas {
    fn new(width: u32, height: u32, base: [u8; 4]) -> Self {
        let mut data = Vec::with_capacity((width * height * 4) as usize);
        for _ in 0..width * height {
            data.extend_from_slice(&base);
        }
        Self {
            width,
            height,
            data,
        }
    }

    fn idx(&self, x: u32, y: u32) -> usize {
        ((y * self.width + x) * 4) as usize
    }

    fn put(&mut self, x: i64, y: i64, color: [u8; 4]) {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return;
        }
        let i = self.idx(x as u32, y as u32);
        self.data[i..i + 4].copy_from_slice(&color);
    }

    /// Alpha-blend `color` over the existing RGB, leaving alpha untouched.
    fn blend(&mut self, x: i64, y: i64, color: [u8; 3], alpha: f32) {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return;
        }
        let i = self.idx(x as u32, y as u32);
        for c in 0..3 {
            let old = f32::from(self.data[i + c]);
            let new = f32::from(color[c]);
            self.data[i + c] = (old + (new - old) * alpha) as u8;
        }
    }

    fn fill_rect(&mut self, x: i64, y: i64, w: i64, h: i64, color: [u8; 4]) {
        for py in y..y + h {
            for px in x..x + w {
                self.put(px, py, color);
            }
        }
    }

    fn blend_rect(&mut self, x: i64, y: i64, w: i64, h: i64, color: [u8; 3], alpha: f32) {
        for py in y..y + h {
            for px in x..x + w {
                self.blend(px, py, color, alpha);
            }
        }
    }

    fn disc(&mut self, cx: f32, cy: f32, radius: f32, color: [u8; 3], alpha: f32) {
        let r = radius.ceil() as i64;
        for dy in -r..=r {
            for dx in -r..=r {
                let d = ((dx * dx + dy * dy) as f32).sqrt();
                if d <= radius {
                    self.blend(cx as i64 + dx, cy as i64 + dy, color, alpha);
                }
            }
        }
    }

    /// Soft white puff with a radial falloff, accumulated into the alpha
    /// channel. Used to compose cloud sprites.
    fn puff(&mut self, cx: f32, cy: f32, radius: f32) {
        let r = radius.ceil() as i64;
        let core = radius * 0.2;
        for dy in -r..=r {
            for dx in -r..=r {
                let px = cx as i64 + dx;
                let py = cy as i64 + dy;
                if px < 0 || py < 0 || px >= i64::from(self.width) || py >= i64::from(self.height)
                {
                    continue;
                }
                let d = ((dx * dx + dy * dy) as f32).sqrt();
                if d > radius {
                    continue;
                }
                let falloff = if d <= core {
                    1.0
                } else {
                    1.0 - (d - core) / (radius - core)
                };
                let strength = (falloff * 0.9 * 0.7).clamp(0.0, 1.0);
                let i = self.idx(px as u32, py as u32);
                self.data[i] = 255;
                self.data[i + 1] = 255;
                self.data[i + 2] = 255;
                let added = (strength * 255.0) as u16;
                self.data[i + 3] = (u16::from(self.data[i + 3]) + added).min(255) as u8;
            }
        }
    }

    /// Per-pixel brightness jitter on the RGB channels.
    fn speckle(&mut self, rng: &mut impl Rng, amount: i32) {
        for i in (0..self.data.len()).step_by(4) {
            let noise = rng.random_range(-amount..=amount);
            for c in 0..3 {
                let v = i32::from(self.data[i + c]) + noise;
                self.data[i + c] = v.clamp(0, 255) as u8;
            }
        }
    }

    /// Blend a thick polyline through the given points.
    fn polyline(&mut self, points: &[(f32, f32)], thickness: f32, color: [u8; 3], alpha: f32) {
        for pair in points.windows(2) {
            let (x0, y0) = pair[0];
            let (x1, y1) = pair[1];
            let length = ((x1 - x0).powi(2) + (y1 - y0).powi(2)).sqrt().max(1.0);
            let steps = (length * 2.0) as usize;
            for step in 0..=steps {
                let t = step as f32 / steps as f32;
                self.disc(
                    x0 + (x1 - x0) * t,
                    y0 + (y1 - y0) * t,
                    thickness / 2.0,
                    color,
                    alpha,
                );
            }
        }
    }

    fn into_image(self, repeat: bool) -> Image {
        let mut image = Image::new(
            Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
            TextureDimension::D2,
            self.data,
            TextureFormat::Rgba8UnormSrgb,
            RenderAssetUsages::default(),
        );
        if repeat {
            image.sampler = ImageSampler::Descriptor(ImageSamplerDescriptor {
                address_mode_u: ImageAddressMode::Repeat,
                address_mode_v: ImageAddressMode::Repeat,
                ..ImageSamplerDescriptor::default()
            });
        }
        image
    }
}

/// Vertical sky gradient mapped onto the inside of the sky dome.
pub fn sky_gradient(top: [u8; 3], bottom: [u8; 3]) -> Image {
    let mut canvas = Canvas::new(4, 256, [0, 0, 0, 255]);
    for y in 0..256u32 {
        let v = y as f32 / 255.0;
        // Height above the horizon, remapped like the original dome shader.
        let h = 1.0 - 2.0 * v;
        let t = (h + 0.033).max(0.0).powf(0.6).min(1.0);
        let color = [
            (bottom[0] as f32 + (top[0] as f32 - bottom[0] as f32) * t) as u8,
            (bottom[1] as f32 + (top[1] as f32 - bottom[1] as f32) * t) as u8,
            (bottom[2] as f32 + (top[2] as f32 - bottom[2] as f32) * t) as u8,
            255,
        ];
        for x in 0..4 {
            let i = canvas.idx(x, y);
            canvas.data[i..i + 4].copy_from_slice(&color);
        }
    }
    canvas.into_image(false)
}

/// Worn concrete: noisy gray base, two meandering cracks, tire tracks, and
/// a few stains.
pub fn concrete(rng: &mut impl Rng) -> Image {
    let mut canvas = Canvas::new(512, 512, [138, 138, 138, 255]);
    canvas.speckle(rng, 30);

    canvas.polyline(
        &[(50.0, 100.0), (150.0, 120.0), (300.0, 140.0), (480.0, 180.0)],
        2.0,
        [85, 85, 85],
        0.7,
    );
    canvas.polyline(
        &[(100.0, 300.0), (200.0, 320.0), (350.0, 340.0), (500.0, 380.0)],
        2.0,
        [85, 85, 85],
        0.7,
    );

    // Tire tracks.
    canvas.polyline(&[(0.0, 200.0), (512.0, 220.0)], 8.0, [68, 68, 68], 0.4);
    canvas.polyline(&[(0.0, 230.0), (512.0, 250.0)], 8.0, [68, 68, 68], 0.4);

    canvas.disc(150.0, 150.0, 20.0, [102, 102, 102], 0.3);
    canvas.disc(350.0, 300.0, 15.0, [102, 102, 102], 0.3);

    canvas.into_image(true)
}

/// Concrete-block wall with mortar lines, weathering, and fully transparent
/// pixels where openings are cut. The picking panels and the visible holes
/// share the same opening list, so doors line up with their cutouts.
pub fn wall_blocks(rng: &mut impl Rng, wall_w: f32, wall_h: f32, openings: &[Opening]) -> Image {
    let width = 1024u32;
    let height = 512u32;
    let mut canvas = Canvas::new(width, height, [160, 160, 160, 255]);

    // Mortar lines between block courses.
    for y in (0..height as i64).step_by(32) {
        canvas.fill_rect(0, y, width as i64, 2, [136, 136, 136, 255]);
    }
    for x in (0..width as i64).step_by(64) {
        canvas.fill_rect(x, 0, 1, height as i64, [136, 136, 136, 255]);
    }

    // Weathering stains.
    for _ in 0..10 {
        let x = rng.random_range(0.0..width as f32);
        let y = rng.random_range(0.0..height as f32);
        let r = rng.random_range(5.0..20.0);
        canvas.disc(x, y, r, [144, 144, 144], 0.3);
    }

    // Cut the openings: x in [-wall_w/2, wall_w/2], y in [0, wall_h] from
    // the floor, flipped for image space.
    for opening in openings {
        let u = (opening.x + wall_w / 2.0) / wall_w;
        let v = 1.0 - opening.y / wall_h;
        let du = opening.width / wall_w;
        let dv = opening.height / wall_h;
        let px = ((u - du / 2.0) * width as f32).floor() as i64;
        let py = ((v - dv / 2.0) * height as f32).floor() as i64;
        let pw = (du * width as f32).ceil() as i64;
        let ph = (dv * height as f32).ceil() as i64;
        canvas.fill_rect(px, py, pw, ph, [0, 0, 0, 0]);
    }

    canvas.into_image(false)
}

/// Earth path with scattered flat stones and moss.
pub fn stone_path(rng: &mut impl Rng) -> Image {
    let mut canvas = Canvas::new(256, 256, [139, 115, 85, 255]);
    canvas.speckle(rng, 25);

    const STONE_COLORS: [[u8; 4]; 5] = [
        [165, 150, 125, 255],
        [154, 139, 114, 255],
        [143, 128, 103, 255],
        [176, 161, 142, 255],
        [149, 134, 109, 255],
    ];

    for _ in 0..80 {
        let x = rng.random_range(0..256) as i64;
        let y = rng.random_range(0..256) as i64;
        let w = rng.random_range(8..20) as i64;
        let h = rng.random_range(6..16) as i64;
        let color = STONE_COLORS[rng.random_range(0..STONE_COLORS.len())];

        canvas.fill_rect(x, y, w, h, color);
        // Lit top/left edge, shadowed bottom/right edge.
        canvas.blend_rect(x, y, w, 1, [255, 255, 255], 0.2);
        canvas.blend_rect(x, y, 1, h, [255, 255, 255], 0.2);
        canvas.blend_rect(x, y + h - 1, w, 1, [0, 0, 0], 0.3);
        canvas.blend_rect(x + w - 1, y, 1, h, [0, 0, 0], 0.3);
    }

    // Moss patches.
    for _ in 0..20 {
        if rng.random_bool(0.4) {
            let x = rng.random_range(0.0..256.0);
            let y = rng.random_range(0.0..256.0);
            let r = rng.random_range(4.0..10.0);
            canvas.disc(x, y, r, [70, 90, 50], 0.25);
        }
    }

    canvas.into_image(true)
}

/// Steel walkway grating: slotted plate with worn edges.
pub fn grating(rng: &mut impl Rng) -> Image {
    let mut canvas = Canvas::new(256, 256, [90, 95, 99, 255]);

    for y in (12..256).step_by(20) {
        for x in (8..256).step_by(24) {
            canvas.fill_rect(x as i64, y as i64, 14, 4, [60, 64, 67, 255]);
        }
    }

    for y in (0..=256).step_by(20) {
        canvas.blend_rect(0, y as i64, 256, 1, [255, 255, 255], 0.08);
    }

    for _ in 0..30 {
        let x = rng.random_range(0.0..256.0);
        let y = rng.random_range(0.0..256.0);
        let r = rng.random_range(1.0..3.0);
        canvas.disc(x, y, r, [0, 0, 0], 0.08);
    }

    canvas.into_image(true)
}

/// One fluffy cloud sprite on a transparent background. Each call yields a
/// slightly different cloud.
pub fn cloud_sprite(rng: &mut impl Rng) -> Image {
    let mut canvas = Canvas::new(256, 128, [255, 255, 255, 0]);

    let base_x = 90.0 + rng.random_range(0.0..40.0);
    let base_y = 60.0 + rng.random_range(0.0..10.0);
    canvas.puff(base_x, base_y, 50.0);
    canvas.puff(base_x - 35.0, base_y + 5.0, 35.0);
    canvas.puff(base_x + 35.0, base_y + 10.0, 40.0);
    canvas.puff(base_x, base_y + 15.0, 30.0);

    canvas.into_image(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(image: &Image, x: u32, y: u32) -> [u8; 4] {
        let width = image.texture_descriptor.size.width;
        let data = image.data.as_ref().unwrap();
        let i = ((y * width + x) * 4) as usize;
        [data[i], data[i + 1], data[i + 2], data[i + 3]]
    }

    #[test]
    fn test_wall_openings_are_transparent() {
        let mut rng = rand::rng();
        let opening = Opening {
            x: 0.0,
            y: 1.6,
            width: 2.2,
            height: 3.2,
        };
        let image = wall_blocks(&mut rng, 16.0, 6.0, &[opening]);

        // Center of the opening: u = 0.5, v = 1 - 1.6/6.
        let cx = 512;
        let cy = (512.0 * (1.0 - 1.6 / 6.0)) as u32;
        assert_eq!(pixel(&image, cx, cy)[3], 0);

        // A corner far from the opening stays opaque.
        assert_eq!(pixel(&image, 10, 10)[3], 255);
    }

    #[test]
    fn test_sky_gradient_endpoints() {
        let image = sky_gradient([142, 197, 255], [238, 248, 255]);
        assert_eq!(pixel(&image, 0, 0), [142, 197, 255, 255]);
        assert_eq!(pixel(&image, 0, 255), [238, 248, 255, 255]);
    }

    #[test]
    fn test_cloud_sprite_alpha_profile() {
        let mut rng = rand::rng();
        let image = cloud_sprite(&mut rng);
        // Corners are fully transparent, the puff cluster is not.
        assert_eq!(pixel(&image, 0, 0)[3], 0);
        assert_eq!(pixel(&image, 255, 127)[3], 0);
        assert!(pixel(&image, 110, 65)[3] > 0);
    }

    #[test]
    fn test_grating_slots_are_darker_than_plate() {
        let mut rng = rand::rng();
        let image = grating(&mut rng);
        let slot = pixel(&image, 10, 13);
        let plate = pixel(&image, 4, 4);
        assert!(slot[0] < plate[0]);
    }

    #[test]
    fn test_concrete_dimensions() {
        let mut rng = rand::rng();
        let image = concrete(&mut rng);
        assert_eq!(image.texture_descriptor.size.width, 512);
        assert_eq!(image.texture_descriptor.size.height, 512);
    }
}
