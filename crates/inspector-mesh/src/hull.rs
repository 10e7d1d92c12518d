//! # Coarse Hull
//!
//! Tetrahedral approximation of the scanned object's hull.
//!
//! ## Algorithm
//!
//! 1. Pick the minimum and maximum point along X, Y and Z (first hit wins ties)
//! 2. Drop exact duplicates among those six picks, keeping first-seen order
//! 3. Take the first 4 distinct picks, or the first 4 input points if fewer remain
//! 4. Emit the 4 faces of the tetrahedron over those vertices
//!
//! This is an overlay approximation, not an enclosing hull: input points may
//! lie outside the emitted tetrahedron. Face winding is not consistent, so
//! consumers render it double-sided.

use glam::Vec3;

use crate::error::MeshError;

/// Vertices per emitted tetrahedron.
pub const TETRAHEDRON_VERTEX_COUNT: usize = 4;

/// Triangle list over the 4 tetrahedron vertices.
pub const TETRAHEDRON_INDICES: [u32; 12] = [
    0, 1, 2, //
    0, 1, 3, //
    0, 2, 3, //
    1, 2, 3,
];

/// Output of hull reconstruction: positions plus a triangle index list.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvexHullResult {
    pub vertices: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl ConvexHullResult {
    /// Number of triangles described by `indices`
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// True when too few points were supplied to form a tetrahedron and the
    /// input was passed through without faces.
    pub fn is_passthrough(&self) -> bool {
        self.indices.is_empty()
    }

    /// Corner positions of each triangle. Triangles with an out-of-range
    /// index are skipped; [`validate`](Self::validate) reports them.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).filter_map(move |tri| {
            let corner = |i: u32| self.vertices.get(i as usize).copied();
            Some([corner(tri[0])?, corner(tri[1])?, corner(tri[2])?])
        })
    }

    /// Check that the index list describes whole triangles over `vertices`.
    pub fn validate(&self) -> Result<(), MeshError> {
        if self.indices.len() % 3 != 0 {
            return Err(MeshError::InvalidHull(format!(
                "index count {} is not a multiple of 3",
                self.indices.len()
            )));
        }
        if let Some(&bad) = self
            .indices
            .iter()
            .find(|&&i| i as usize >= self.vertices.len())
        {
            return Err(MeshError::InvalidHull(format!(
                "index {} out of range for {} vertices",
                bad,
                self.vertices.len()
            )));
        }
        Ok(())
    }
}

/// Stateless hull reconstruction step.
#[derive(Debug, Clone, Copy, Default)]
pub struct HullReconstructor;

impl HullReconstructor {
    /// See [`compute_hull`].
    pub fn compute_hull(&self, points: &[Vec3]) -> Option<ConvexHullResult> {
        compute_hull(points)
    }
}

/// Build the coarse tetrahedral hull of `points`.
///
/// Returns `None` for an empty input. Fewer than 4 points come back
/// unchanged as vertices with no indices.
pub fn compute_hull(points: &[Vec3]) -> Option<ConvexHullResult> {
    if points.is_empty() {
        return None;
    }

    if points.len() < TETRAHEDRON_VERTEX_COUNT {
        return Some(ConvexHullResult {
            vertices: points.to_vec(),
            indices: Vec::new(),
        });
    }

    let distinct = distinct_extremes(points);
    let vertices = if distinct.len() < TETRAHEDRON_VERTEX_COUNT {
        points[..TETRAHEDRON_VERTEX_COUNT].to_vec()
    } else {
        distinct[..TETRAHEDRON_VERTEX_COUNT].to_vec()
    };

    Some(ConvexHullResult {
        vertices,
        indices: TETRAHEDRON_INDICES.to_vec(),
    })
}

/// Axis-extremal points in the order minX, maxX, minY, maxY, minZ, maxZ.
///
/// Comparisons are strict so the first point reaching an extreme keeps it.
fn extreme_points(points: &[Vec3]) -> [Vec3; 6] {
    let mut min_x = 0;
    let mut max_x = 0;
    let mut min_y = 0;
    let mut max_y = 0;
    let mut min_z = 0;
    let mut max_z = 0;

    for (i, p) in points.iter().enumerate() {
        if p.x < points[min_x].x {
            min_x = i;
        }
        if p.x > points[max_x].x {
            max_x = i;
        }
        if p.y < points[min_y].y {
            min_y = i;
        }
        if p.y > points[max_y].y {
            max_y = i;
        }
        if p.z < points[min_z].z {
            min_z = i;
        }
        if p.z > points[max_z].z {
            max_z = i;
        }
    }

    [min_x, max_x, min_y, max_y, min_z, max_z].map(|i| points[i])
}

/// Extremal picks with exact duplicates removed, first occurrence kept.
fn distinct_extremes(points: &[Vec3]) -> Vec<Vec3> {
    let mut distinct: Vec<Vec3> = Vec::with_capacity(6);
    for p in extreme_points(points) {
        if !distinct.contains(&p) {
            distinct.push(p);
        }
    }
    distinct
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn cube_corners(half: f32) -> Vec<Vec3> {
        let mut corners = Vec::new();
        for &x in &[-half, half] {
            for &y in &[-half, half] {
                for &z in &[-half, half] {
                    corners.push(Vec3::new(x, y, z));
                }
            }
        }
        corners
    }

    #[test]
    fn empty_input_has_no_hull() {
        assert!(compute_hull(&[]).is_none());
    }

    #[test]
    fn three_points_pass_through() {
        let points = vec![Vec3::ZERO, Vec3::X, Vec3::Y];
        let hull = compute_hull(&points).unwrap();
        assert_eq!(hull.vertices, points);
        assert!(hull.indices.is_empty());
        assert!(hull.is_passthrough());
        assert_eq!(hull.triangle_count(), 0);
    }

    #[test]
    fn single_point_passes_through() {
        let hull = compute_hull(&[Vec3::ONE]).unwrap();
        assert_eq!(hull.vertices, vec![Vec3::ONE]);
        assert!(hull.indices.is_empty());
    }

    #[test]
    fn cube_corners_form_tetrahedron() {
        let hull = compute_hull(&cube_corners(2.0)).unwrap();
        assert_eq!(hull.vertices.len(), 4);
        assert_eq!(hull.indices.len(), 12);
        assert!(hull.indices.iter().all(|&i| i < 4));
        hull.validate().unwrap();
        assert_eq!(hull.triangles().count(), 4);
    }

    #[test]
    fn cube_corner_selection_is_deterministic() {
        // Corners are generated x-major: corner 0 is the min along every axis,
        // and the first corner reaching each max is picked.
        let hull = compute_hull(&cube_corners(2.0)).unwrap();
        assert_eq!(
            hull.vertices,
            vec![
                Vec3::new(-2.0, -2.0, -2.0),
                Vec3::new(2.0, -2.0, -2.0),
                Vec3::new(-2.0, 2.0, -2.0),
                Vec3::new(-2.0, -2.0, 2.0),
            ]
        );
        assert_eq!(compute_hull(&cube_corners(2.0)).unwrap(), hull);
    }

    #[test]
    fn extremes_keep_first_on_ties() {
        let points = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 5.0, 0.0),
            Vec3::new(3.0, 0.0, 0.0),
            Vec3::new(3.0, 0.0, 7.0),
        ];
        let extremes = extreme_points(&points);
        assert_eq!(extremes[0], points[0]); // minX: 0 and 1 tie
        assert_eq!(extremes[1], points[2]); // maxX: 2 and 3 tie
        assert_eq!(extremes[2], points[0]); // minY
        assert_eq!(extremes[3], points[1]); // maxY
        assert_eq!(extremes[4], points[0]); // minZ
        assert_eq!(extremes[5], points[3]); // maxZ
    }

    #[test]
    fn distinct_extremes_in_axis_order() {
        let points = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 5.0, 0.0),
            Vec3::new(3.0, 0.0, 0.0),
            Vec3::new(3.0, 0.0, 7.0),
        ];
        let hull = compute_hull(&points).unwrap();
        assert_eq!(hull.vertices, vec![points[0], points[2], points[1], points[3]]);
    }

    #[test]
    fn collapsed_extremes_fall_back_to_first_four() {
        // Every point lies on a line, so only 2 distinct extremes exist.
        let points: Vec<Vec3> = (0..6).map(|i| Vec3::splat(i as f32)).collect();
        let hull = compute_hull(&points).unwrap();
        assert_eq!(hull.vertices, points[..4].to_vec());
        assert_eq!(hull.indices, TETRAHEDRON_INDICES.to_vec());
    }

    #[test]
    fn coincident_points_fall_back_to_first_four() {
        let points = vec![Vec3::ONE; 5];
        let hull = compute_hull(&points).unwrap();
        assert_eq!(hull.vertices, vec![Vec3::ONE; 4]);
        assert_eq!(hull.indices.len(), 12);
    }

    #[test]
    fn random_clouds_satisfy_index_invariants() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let count = rng.gen_range(1..64);
            let points: Vec<Vec3> = (0..count)
                .map(|_| {
                    Vec3::new(
                        rng.gen_range(-2.0..2.0),
                        rng.gen_range(-2.0..2.0),
                        rng.gen_range(-2.0..2.0),
                    )
                })
                .collect();

            let hull = compute_hull(&points).unwrap();
            hull.validate().unwrap();
            if count >= 4 {
                assert_eq!(hull.vertices.len(), 4);
                assert_eq!(hull.indices.len(), 12);
                assert!(hull.vertices.iter().all(|v| points.contains(v)));
            } else {
                assert_eq!(hull.vertices, points);
            }
        }
    }

    #[test]
    fn validate_rejects_bad_indices() {
        let partial = ConvexHullResult {
            vertices: vec![Vec3::ZERO; 3],
            indices: vec![0, 1],
        };
        assert!(partial.validate().is_err());

        let out_of_range = ConvexHullResult {
            vertices: vec![Vec3::ZERO; 3],
            indices: vec![0, 1, 3],
        };
        assert!(matches!(out_of_range.validate(), Err(MeshError::InvalidHull(_))));
    }

    #[test]
    fn triangles_skip_out_of_range_indices() {
        let hull = ConvexHullResult {
            vertices: vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            indices: vec![0, 1, 2, 0, 1, 7],
        };
        let triangles: Vec<[Vec3; 3]> = hull.triangles().collect();
        assert_eq!(triangles, vec![[Vec3::ZERO, Vec3::X, Vec3::Y]]);
    }
}
