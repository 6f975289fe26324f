//! Ray casting against axis-aligned boxes for pointer picking

use glam::Vec3;

/// A picking ray in world space. The direction must be normalized.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Smallest box containing all points. Panics on an empty slice.
    pub fn from_points(points: &[Vec3]) -> Self {
        let mut min = points[0];
        let mut max = points[0];
        for &p in &points[1..] {
            min = min.min(p);
            max = max.max(p);
        }
        Self { min, max }
    }

    /// Grow the box by `amount` on every side.
    pub fn inflated(&self, amount: f32) -> Self {
        Self {
            min: self.min - Vec3::splat(amount),
            max: self.max + Vec3::splat(amount),
        }
    }
}

/// Slab-test ray/AABB intersection.
///
/// Returns the distance along the ray to the entry point, or `None` if the
/// ray misses or the box lies entirely behind the origin. A ray starting
/// inside the box hits at distance zero.
pub fn ray_aabb(ray: &Ray, aabb: &Aabb) -> Option<f32> {
    let mut t_near = f32::NEG_INFINITY;
    let mut t_far = f32::INFINITY;

    for axis in 0..3 {
        let origin = ray.origin[axis];
        let dir = ray.direction[axis];
        let min = aabb.min[axis];
        let max = aabb.max[axis];

        if dir.abs() < 1e-8 {
            if origin < min || origin > max {
                return None;
            }
        } else {
            let inv = 1.0 / dir;
            let mut t0 = (min - origin) * inv;
            let mut t1 = (max - origin) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_near = t_near.max(t0);
            t_far = t_far.min(t1);
            if t_near > t_far {
                return None;
            }
        }
    }

    if t_far < 0.0 {
        return None;
    }
    Some(t_near.max(0.0))
}

/// First intersection along the ray among candidate boxes.
pub fn nearest_hit<K>(ray: &Ray, candidates: impl IntoIterator<Item = (K, Aabb)>) -> Option<(K, f32)> {
    let mut best: Option<(K, f32)> = None;
    for (key, aabb) in candidates {
        if let Some(t) = ray_aabb(ray, &aabb) {
            match &best {
                Some((_, best_t)) if *best_t <= t => {}
                _ => best = Some((key, t)),
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box_at(center: Vec3) -> Aabb {
        Aabb::from_center_half_extents(center, Vec3::splat(0.5))
    }

    #[test]
    fn test_hit_straight_on() {
        let ray = Ray {
            origin: Vec3::new(0.0, 0.0, 5.0),
            direction: Vec3::new(0.0, 0.0, -1.0),
        };
        let t = ray_aabb(&ray, &unit_box_at(Vec3::ZERO)).unwrap();
        assert!((t - 4.5).abs() < 1e-5);
    }

    #[test]
    fn test_miss_to_the_side() {
        let ray = Ray {
            origin: Vec3::new(2.0, 0.0, 5.0),
            direction: Vec3::new(0.0, 0.0, -1.0),
        };
        assert!(ray_aabb(&ray, &unit_box_at(Vec3::ZERO)).is_none());
    }

    #[test]
    fn test_box_behind_origin() {
        let ray = Ray {
            origin: Vec3::new(0.0, 0.0, 5.0),
            direction: Vec3::new(0.0, 0.0, 1.0),
        };
        assert!(ray_aabb(&ray, &unit_box_at(Vec3::ZERO)).is_none());
    }

    #[test]
    fn test_origin_inside_box() {
        let ray = Ray {
            origin: Vec3::ZERO,
            direction: Vec3::new(1.0, 0.0, 0.0),
        };
        assert_eq!(ray_aabb(&ray, &unit_box_at(Vec3::ZERO)), Some(0.0));
    }

    #[test]
    fn test_nearest_hit_picks_closest() {
        let ray = Ray {
            origin: Vec3::new(0.0, 0.0, 10.0),
            direction: Vec3::new(0.0, 0.0, -1.0),
        };
        let candidates = vec![
            ("far", unit_box_at(Vec3::new(0.0, 0.0, -5.0))),
            ("near", unit_box_at(Vec3::new(0.0, 0.0, 5.0))),
            ("miss", unit_box_at(Vec3::new(8.0, 0.0, 0.0))),
        ];
        let (key, _) = nearest_hit(&ray, candidates).unwrap();
        assert_eq!(key, "near");
    }

    #[test]
    fn test_nearest_hit_empty_candidates() {
        let ray = Ray {
            origin: Vec3::ZERO,
            direction: Vec3::Z,
        };
        assert!(nearest_hit::<u32>(&ray, Vec::new()).is_none());
    }

    #[test]
    fn test_from_points_bounds() {
        let aabb = Aabb::from_points(&[
            Vec3::new(1.0, -2.0, 3.0),
            Vec3::new(-1.0, 4.0, 0.0),
            Vec3::new(0.0, 0.0, -3.0),
        ]);
        assert_eq!(aabb.min, Vec3::new(-1.0, -2.0, -3.0));
        assert_eq!(aabb.max, Vec3::new(1.0, 4.0, 3.0));
    }
}
