use super::Mesh;

/// Face order of [`generate_box`] output; face `f` owns vertices `4f..4f + 4`
/// and indices `6f..6f + 6`.
pub const BOX_FACES: [&str; 6] = ["top", "left", "right", "front", "back", "bottom"];

/// Per-face corner colors used by [`BoxGeometry::into_mesh`].
pub const BOX_FACE_PALETTE: [[f32; 3]; 4] = [
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
    [0.0, 1.0, 0.0],
];

/// Axis-aligned cube as flat vertex/index arrays.
///
/// Corners are duplicated per face (24 vertices) so each face can be colored
/// independently.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxGeometry {
    /// `x, y, z` triples, 72 floats.
    pub vertices: Vec<f32>,
    /// Triangle list, 36 indices.
    pub indices: Vec<u16>,
}

// Unit corners (scaled by half the edge length), grouped by face.
#[rustfmt::skip]
const CORNERS: [[f32; 3]; 24] = [
    // top
    [-1.0,  1.0, -1.0], [-1.0,  1.0,  1.0], [ 1.0,  1.0,  1.0], [ 1.0,  1.0, -1.0],
    // left
    [-1.0,  1.0,  1.0], [-1.0, -1.0,  1.0], [-1.0, -1.0, -1.0], [-1.0,  1.0, -1.0],
    // right
    [ 1.0,  1.0,  1.0], [ 1.0, -1.0,  1.0], [ 1.0, -1.0, -1.0], [ 1.0,  1.0, -1.0],
    // front
    [ 1.0,  1.0,  1.0], [ 1.0, -1.0,  1.0], [-1.0, -1.0,  1.0], [-1.0,  1.0,  1.0],
    // back
    [ 1.0,  1.0, -1.0], [ 1.0, -1.0, -1.0], [-1.0, -1.0, -1.0], [-1.0,  1.0, -1.0],
    // bottom
    [-1.0, -1.0, -1.0], [-1.0, -1.0,  1.0], [ 1.0, -1.0,  1.0], [ 1.0, -1.0, -1.0],
];

// Left, front and bottom start from the second corner; all triangles still
// wind counter-clockwise seen from outside.
#[rustfmt::skip]
const INDICES: [u16; 36] = [
     0,  1,  2,   0,  2,  3,
     5,  4,  6,   6,  4,  7,
     8,  9, 10,   8, 10, 11,
    13, 12, 14,  15, 14, 12,
    16, 17, 18,  16, 18, 19,
    21, 20, 22,  22, 20, 23,
];

/// Builds a cube of edge length `size` centered on `center`.
pub fn generate_box(center: [f32; 3], size: f32) -> BoxGeometry {
    let half = size / 2.0;

    let vertices = CORNERS
        .iter()
        .flat_map(|c| {
            [
                c[0] * half + center[0],
                c[1] * half + center[1],
                c[2] * half + center[2],
            ]
        })
        .collect();

    BoxGeometry {
        vertices,
        indices: INDICES.to_vec(),
    }
}

impl BoxGeometry {
    /// Converts into an indexed mesh colored with [`BOX_FACE_PALETTE`].
    pub fn into_mesh(self) -> Mesh {
        let positions: Vec<[f32; 3]> = self
            .vertices
            .chunks_exact(3)
            .map(|v| [v[0], v[1], v[2]])
            .collect();

        let colors = BOX_FACE_PALETTE
            .iter()
            .copied()
            .cycle()
            .take(positions.len())
            .collect();

        Mesh::new(positions, colors).with_indices(self.indices)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    const CENTER: [f32; 3] = [1.0, 2.0, 3.0];
    const EPS: f32 = 1e-5;

    impl BoxGeometry {
        fn vertex_count(&self) -> usize {
            self.vertices.len() / 3
        }

        fn position(&self, i: usize) -> [f32; 3] {
            [
                self.vertices[i * 3],
                self.vertices[i * 3 + 1],
                self.vertices[i * 3 + 2],
            ]
        }
    }

    fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
        [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
    }

    fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
        [
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ]
    }

    fn face_triangles(geo: &BoxGeometry, face: usize) -> [[usize; 3]; 2] {
        let ix = &geo.indices[face * 6..face * 6 + 6];
        let t = |k: usize| [ix[k] as usize, ix[k + 1] as usize, ix[k + 2] as usize];
        [t(0), t(3)]
    }

    // ── shape ─────────────────────────────────────────────────────────────

    #[test]
    fn counts() {
        let geo = generate_box(CENTER, 2.0);
        assert_eq!(geo.vertices.len(), 72);
        assert_eq!(geo.vertex_count(), 24);
        assert_eq!(geo.indices.len(), 36);
    }

    #[test]
    fn vertices_within_bounds() {
        let geo = generate_box(CENTER, 2.0);
        for i in 0..geo.vertex_count() {
            let p = geo.position(i);
            for axis in 0..3 {
                assert!(p[axis] >= CENTER[axis] - 1.0 - EPS, "vertex {i}: {p:?}");
                assert!(p[axis] <= CENTER[axis] + 1.0 + EPS, "vertex {i}: {p:?}");
            }
        }
    }

    #[test]
    fn vertices_sit_on_corners() {
        let geo = generate_box(CENTER, 2.0);
        for i in 0..geo.vertex_count() {
            let d = sub(geo.position(i), CENTER);
            for axis in 0..3 {
                assert!((d[axis].abs() - 1.0).abs() < EPS, "vertex {i}: {d:?}");
            }
        }
    }

    #[test]
    fn indices_in_range() {
        let geo = generate_box(CENTER, 2.0);
        assert!(geo.indices.iter().all(|&i| i <= 23));
    }

    #[test]
    fn deterministic() {
        assert_eq!(generate_box(CENTER, 2.0), generate_box(CENTER, 2.0));
    }

    // ── faces ─────────────────────────────────────────────────────────────

    #[test]
    fn face_vertices_are_coplanar_on_one_side() {
        let geo = generate_box(CENTER, 2.0);
        for face in 0..6 {
            let pts: Vec<_> = (face * 4..face * 4 + 4)
                .map(|i| sub(geo.position(i), CENTER))
                .collect();
            let shared_axes = (0..3)
                .filter(|&a| pts.iter().all(|p| (p[a] - pts[0][a]).abs() < EPS))
                .count();
            assert_eq!(shared_axes, 1, "{} face is not planar", BOX_FACES[face]);
        }
    }

    #[test]
    fn each_face_is_two_right_triangles_covering_its_corners() {
        let geo = generate_box(CENTER, 2.0);

        for face in 0..6 {
            let name = BOX_FACES[face];
            let [a, b] = face_triangles(&geo, face);

            let owned: BTreeSet<usize> = (face * 4..face * 4 + 4).collect();
            let used: BTreeSet<usize> = a.iter().chain(b.iter()).copied().collect();
            assert_eq!(used, owned, "{name}: triangles must cover exactly the face corners");

            for t in [a, b] {
                let distinct: BTreeSet<_> = t.iter().collect();
                assert_eq!(distinct.len(), 3, "{name}: degenerate triangle {t:?}");
            }

            // The two triangles share exactly one edge, the diagonal.
            let sa: BTreeSet<usize> = a.iter().copied().collect();
            let sb: BTreeSet<usize> = b.iter().copied().collect();
            let shared: Vec<usize> = sa.intersection(&sb).copied().collect();
            assert_eq!(shared.len(), 2, "{name}: triangles must share one edge");

            let diag = sub(geo.position(shared[0]), geo.position(shared[1]));
            assert!((dot(diag, diag) - 8.0).abs() < EPS, "{name}: shared edge is not the diagonal");

            // The corner opposite the diagonal is a right angle.
            for t in [a, b] {
                let apex = *t.iter().find(|i| !shared.contains(i)).unwrap();
                let p = geo.position(apex);
                let u = sub(geo.position(shared[0]), p);
                let v = sub(geo.position(shared[1]), p);
                assert!(dot(u, v).abs() < EPS, "{name}: triangle {t:?} is not right-angled");
            }
        }
    }

    #[test]
    fn triangles_wind_outward() {
        let geo = generate_box(CENTER, 2.0);
        for (t, tri) in geo.indices.chunks_exact(3).enumerate() {
            let p0 = geo.position(tri[0] as usize);
            let p1 = geo.position(tri[1] as usize);
            let p2 = geo.position(tri[2] as usize);
            let normal = cross(sub(p1, p0), sub(p2, p0));
            let centroid = [
                (p0[0] + p1[0] + p2[0]) / 3.0,
                (p0[1] + p1[1] + p2[1]) / 3.0,
                (p0[2] + p1[2] + p2[2]) / 3.0,
            ];
            let outward = sub(centroid, CENTER);
            assert!(dot(normal, outward) > 0.0, "triangle {t} ({tri:?}) faces inward");
        }
    }

    #[test]
    fn size_scales_about_center() {
        let geo = generate_box([0.0, 0.0, 0.0], 0.5);
        assert!(geo.vertices.iter().all(|v| (v.abs() - 0.25).abs() < EPS));
    }

    // ── mesh ──────────────────────────────────────────────────────────────

    #[test]
    fn into_mesh_is_valid_and_face_colored() {
        let mesh = generate_box(CENTER, 2.0).into_mesh();
        assert_eq!(mesh.validate(), Ok(()));
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.element_count(), 36);
        for face in 0..6 {
            assert_eq!(&mesh.colors[face * 4..face * 4 + 4], &BOX_FACE_PALETTE);
        }
    }
}
