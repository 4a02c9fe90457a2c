/// Cube face orientation and per-pixel viewing directions.
use crate::error::ConvertError;
use constants::coordinate_system::{FACE_TRANSFORMS, transform_face_coordinates};
use constants::face::{FACE_COUNT, get_face_name};
use serde::Serialize;

/// One face of the output cube, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Face {
    Back = 0,
    Left = 1,
    Front = 2,
    Right = 3,
    Top = 4,
    Bottom = 5,
}

impl Face {
    pub const ALL: [Face; FACE_COUNT] = [
        Face::Back,
        Face::Left,
        Face::Front,
        Face::Right,
        Face::Top,
        Face::Bottom,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> String {
        get_face_name(self as u8)
    }

    /// Outward direction through pixel (i, j) of this face.
    /// `i` is the column and `j` the row, both in [0, edge).
    pub fn direction(self, i: u32, j: u32, edge: u32) -> Direction {
        let edge = edge as f64;
        let a = 2.0 * i as f64 / edge - 1.0;
        let b = 2.0 * j as f64 / edge - 1.0;

        let (x, y, z) = transform_face_coordinates(&FACE_TRANSFORMS[self.index()], a, b);
        Direction { x, y, z }
    }
}

impl TryFrom<usize> for Face {
    type Error = ConvertError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Face::ALL.get(index).copied().ok_or_else(|| {
            ConvertError::InvalidArgument(format!(
                "face index {} outside 0..{}",
                index, FACE_COUNT
            ))
        })
    }
}

/// Viewing direction from the cube centre. Not normalised; only its angle matters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Direction {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Direction {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Map pixel (i, j) of the face at `face_index` to its viewing direction.
/// Fails when the face index is outside [0, 6) or the edge is zero.
pub fn map_to_direction(
    i: u32,
    j: u32,
    face_index: usize,
    edge: u32,
) -> Result<Direction, ConvertError> {
    if edge == 0 {
        return Err(ConvertError::InvalidArgument(
            "edge must be positive".to_string(),
        ));
    }
    let face = Face::try_from(face_index)?;
    Ok(face.direction(i, j, edge))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn centre_pixel_points_along_face_axis() {
        let edge = 64;
        let expected = [
            (Face::Back, (-1.0, 0.0, 0.0)),
            (Face::Left, (0.0, -1.0, 0.0)),
            (Face::Front, (1.0, 0.0, 0.0)),
            (Face::Right, (0.0, 1.0, 0.0)),
            (Face::Top, (0.0, 0.0, 1.0)),
            (Face::Bottom, (0.0, 0.0, -1.0)),
        ];

        for (face, (x, y, z)) in expected {
            let dir = map_to_direction(edge / 2, edge / 2, face.index(), edge).unwrap();
            assert_eq!(dir, Direction::new(x, y, z), "{:?}", face);
        }
    }

    #[test]
    fn corner_pixel_follows_orientation_table() {
        // a = b = -1 at the top-left pixel
        let edge = 8;
        let cases = [
            (Face::Back, (-1.0, 1.0, 1.0)),
            (Face::Left, (-1.0, -1.0, 1.0)),
            (Face::Front, (1.0, -1.0, 1.0)),
            (Face::Right, (1.0, 1.0, 1.0)),
            (Face::Top, (-1.0, -1.0, 1.0)),
            (Face::Bottom, (1.0, -1.0, -1.0)),
        ];

        for (face, (x, y, z)) in cases {
            assert_eq!(
                face.direction(0, 0, edge),
                Direction::new(x, y, z),
                "{:?}",
                face
            );
        }
    }

    #[test]
    fn column_moves_a_and_row_moves_b() {
        let edge = 4;
        // i = 3 -> a = 0.5, j = 1 -> b = -0.5
        let dir = Face::Front.direction(3, 1, edge);
        assert_eq!(dir, Direction::new(1.0, 0.5, 0.5));

        let dir = Face::Right.direction(3, 1, edge);
        assert_eq!(dir, Direction::new(-0.5, 1.0, 0.5));
    }

    #[test]
    fn rejects_face_index_out_of_range() {
        let err = map_to_direction(0, 0, 6, 16).unwrap_err();
        assert!(matches!(err, ConvertError::InvalidArgument(_)));
        assert!(Face::try_from(usize::MAX).is_err());
    }

    #[test]
    fn rejects_zero_edge() {
        let err = map_to_direction(0, 0, 0, 0).unwrap_err();
        assert!(matches!(err, ConvertError::InvalidArgument(_)));
    }

    #[test]
    fn face_names_follow_output_order() {
        let names: Vec<String> = Face::ALL.iter().map(|f| f.name()).collect();
        assert_eq!(names, ["back", "left", "front", "right", "top", "bottom"]);
    }
}
