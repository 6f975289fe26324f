//! Deterministic placement for grids, tree rings, walkways, and paths
//!
//! Builders add cosmetic jitter on top of these positions; the positions
//! themselves are exact so grid spacing and opening locations never drift.

/// Ground-plane coordinates (x, z).
pub type GroundPos = (f32, f32);

/// Centered rows x cols grid positions, row-major.
pub fn grid_positions(rows: usize, cols: usize, spacing: f32) -> Vec<GroundPos> {
    let start_x = -((cols as f32 - 1.0) * spacing) / 2.0;
    let start_z = -((rows as f32 - 1.0) * spacing) / 2.0;

    let mut positions = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        for col in 0..cols {
            positions.push((
                start_x + col as f32 * spacing,
                start_z + row as f32 * spacing,
            ));
        }
    }
    positions
}

/// Perimeter positions of concentric square rings around the origin.
///
/// Ring `i` is a square of side `inner_size + (i + 1) * ring_gap`; points
/// are spaced `spacing` apart along each edge, corners included once.
pub fn ring_positions(
    inner_size: f32,
    ring_gap: f32,
    rings: usize,
    spacing: f32,
) -> Vec<GroundPos> {
    let mut positions = Vec::new();
    for ring in 0..rings {
        let half = (inner_size + (ring as f32 + 1.0) * ring_gap) / 2.0;

        // Top and bottom edges, corners included.
        let mut x = -half;
        while x <= half + 1e-4 {
            positions.push((x, half));
            positions.push((x, -half));
            x += spacing;
        }

        // Left and right edges, corners excluded.
        let mut z = -half + spacing;
        while z < half - 1e-4 {
            positions.push((-half, z));
            positions.push((half, z));
            z += spacing;
        }
    }
    positions
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkwayAxis {
    /// Runs along Z between tank columns.
    AlongZ,
    /// Runs along X between tank rows.
    AlongX,
}

/// One straight walkway strip centered on a grid midline.
#[derive(Debug, Clone, Copy)]
pub struct WalkwayRun {
    pub x: f32,
    pub z: f32,
    pub length: f32,
    pub axis: WalkwayAxis,
}

/// Walkway strips at the midpoints between grid rows and columns.
///
/// Margins extend the strips past the outermost tanks toward the doors.
pub fn walkway_runs(
    rows: usize,
    cols: usize,
    spacing: f32,
    margin_along_z: f32,
    margin_along_x: f32,
) -> Vec<WalkwayRun> {
    let mut runs = Vec::new();

    for c in 0..cols.saturating_sub(1) {
        runs.push(WalkwayRun {
            x: ((c as f32 + 0.5) - (cols as f32 - 1.0) / 2.0) * spacing,
            z: 0.0,
            length: (rows as f32 - 1.0) * spacing + margin_along_z,
            axis: WalkwayAxis::AlongZ,
        });
    }

    for r in 0..rows.saturating_sub(1) {
        runs.push(WalkwayRun {
            x: 0.0,
            z: ((r as f32 + 0.5) - (rows as f32 - 1.0) / 2.0) * spacing,
            length: (cols as f32 - 1.0) * spacing + margin_along_x,
            axis: WalkwayAxis::AlongX,
        });
    }

    runs
}

/// A flat path piece: center position plus ground-plane heading.
#[derive(Debug, Clone, Copy)]
pub struct PathSegment {
    pub x: f32,
    pub z: f32,
    pub angle: f32,
}

/// Evenly spaced segments along a straight run between two ground points.
pub fn path_segments(from: GroundPos, to: GroundPos, count: usize) -> Vec<PathSegment> {
    let angle = (to.1 - from.1).atan2(to.0 - from.0);
    (0..count)
        .map(|i| {
            let t = if count > 1 {
                i as f32 / (count as f32 - 1.0)
            } else {
                0.0
            };
            PathSegment {
                x: from.0 + (to.0 - from.0) * t,
                z: from.1 + (to.1 - from.1) * t,
                angle,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_is_centered_and_spaced() {
        let grid = grid_positions(3, 4, 3.0);
        assert_eq!(grid.len(), 12);

        // Corners are symmetric about the origin.
        assert_eq!(grid[0], (-4.5, -3.0));
        assert_eq!(grid[11], (4.5, 3.0));

        // Neighbors in a row are exactly one spacing apart.
        assert_eq!(grid[1].0 - grid[0].0, 3.0);
        assert_eq!(grid[1].1, grid[0].1);
    }

    #[test]
    fn test_single_cell_grid_sits_at_origin() {
        assert_eq!(grid_positions(1, 1, 2.5), vec![(0.0, 0.0)]);
    }

    #[test]
    fn test_rings_lie_on_ring_perimeters() {
        let rings = ring_positions(6.0, 1.6, 4, 0.8);
        assert!(!rings.is_empty());

        for &(x, z) in &rings {
            let half = x.abs().max(z.abs());
            // Each point sits on the edge of one of the four ring squares.
            let on_some_ring = (0..4).any(|ring| {
                let expected = (6.0 + (ring as f32 + 1.0) * 1.6) / 2.0;
                (half - expected).abs() < 1e-3
            });
            assert!(on_some_ring, "({x}, {z}) is not on a ring edge");
        }
    }

    #[test]
    fn test_rings_have_no_duplicate_corners() {
        let rings = ring_positions(4.0, 2.0, 1, 1.0);
        let mut seen = std::collections::HashSet::new();
        for &(x, z) in &rings {
            let key = ((x * 1000.0).round() as i64, (z * 1000.0).round() as i64);
            assert!(seen.insert(key), "duplicate ring position ({x}, {z})");
        }
    }

    #[test]
    fn test_walkways_at_grid_midpoints() {
        let runs = walkway_runs(3, 4, 3.0, 4.0, 6.0);
        assert_eq!(runs.len(), 3 + 2);

        let along_z: Vec<_> = runs
            .iter()
            .filter(|r| r.axis == WalkwayAxis::AlongZ)
            .collect();
        assert_eq!(along_z.len(), 3);
        // Column midpoints for 4 columns at spacing 3: -3, 0, 3.
        assert_eq!(along_z[0].x, -3.0);
        assert_eq!(along_z[1].x, 0.0);
        assert_eq!(along_z[2].x, 3.0);
        assert_eq!(along_z[0].length, 2.0 * 3.0 + 4.0);

        let along_x: Vec<_> = runs
            .iter()
            .filter(|r| r.axis == WalkwayAxis::AlongX)
            .collect();
        assert_eq!(along_x.len(), 2);
        assert_eq!(along_x[0].z, -1.5);
        assert_eq!(along_x[1].z, 1.5);
    }

    #[test]
    fn test_path_segments_span_the_run() {
        let segments = path_segments((-8.0, 0.0), (-3.5, 0.0), 8);
        assert_eq!(segments.len(), 8);
        assert_eq!(segments[0].x, -8.0);
        assert_eq!(segments[7].x, -3.5);
        assert_eq!(segments[0].angle, 0.0);

        let diagonal = path_segments((0.0, 0.0), (1.0, 1.0), 2);
        assert!((diagonal[0].angle - std::f32::consts::FRAC_PI_4).abs() < 1e-6);
    }
}
