use super::{fan_indices, Mesh};

/// Flat hexagon fan in the XY plane: hub, six rim points, then the first rim
/// point again to close the fan.
#[rustfmt::skip]
pub const HEXAGON_POSITIONS: [[f32; 3]; 8] = [
    [ 0.0,   0.0,  0.0],
    [ 0.5,   0.0,  0.0],
    [ 0.25,  0.43, 0.0],
    [-0.25,  0.43, 0.0],
    [-0.5,   0.0,  0.0],
    [-0.25, -0.43, 0.0],
    [ 0.25, -0.43, 0.0],
    [ 0.5,   0.0,  0.0],
];

pub const HEXAGON_COLORS: [[f32; 3]; 8] = [
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
    [1.0, 1.0, 0.0],
    [0.0, 1.0, 1.0],
    [1.0, 0.0, 1.0],
    [0.5, 0.5, 0.5],
    [1.0, 0.0, 0.0],
];

/// Hexagon as an indexed triangle list (six triangles around the hub).
pub fn hexagon() -> Mesh {
    Mesh::new(HEXAGON_POSITIONS.to_vec(), HEXAGON_COLORS.to_vec())
        .with_indices(fan_indices(HEXAGON_POSITIONS.len() as u16))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hexagon_is_valid() {
        let mesh = hexagon();
        assert_eq!(mesh.validate(), Ok(()));
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.triangles().count(), 6);
    }

    #[test]
    fn fan_closes_on_first_rim_point() {
        assert_eq!(HEXAGON_POSITIONS[1], HEXAGON_POSITIONS[7]);
    }

    #[test]
    fn every_triangle_touches_the_hub() {
        assert!(hexagon().triangles().all(|t| t[0] == 0));
    }

    #[test]
    fn triangles_are_counter_clockwise_in_xy() {
        let mesh = hexagon();
        for [a, b, c] in mesh.triangles() {
            let (pa, pb, pc) = (mesh.positions[a], mesh.positions[b], mesh.positions[c]);
            let z = (pb[0] - pa[0]) * (pc[1] - pa[1]) - (pb[1] - pa[1]) * (pc[0] - pa[0]);
            assert!(z > 0.0, "triangle {a},{b},{c} is clockwise");
        }
    }
}
