/// Per-face direction matrices (row-major: [x, y, z]) applied to the column [1, a, b],
/// where a and b are the face-local pixel coordinates normalised to [-1, 1).
/// Indexed in face order: back, left, front, right, top, bottom.
pub const FACE_TRANSFORMS: [[[f64; 3]; 3]; 6] = [
    // Back
    [
        [-1.0, 0.0, 0.0], // X = -1
        [0.0, -1.0, 0.0], // Y = -a
        [0.0, 0.0, -1.0], // Z = -b
    ],
    // Left
    [
        [0.0, 1.0, 0.0],  // X = a
        [-1.0, 0.0, 0.0], // Y = -1
        [0.0, 0.0, -1.0], // Z = -b
    ],
    // Front
    [
        [1.0, 0.0, 0.0],  // X = 1
        [0.0, 1.0, 0.0],  // Y = a
        [0.0, 0.0, -1.0], // Z = -b
    ],
    // Right
    [
        [0.0, -1.0, 0.0], // X = -a
        [1.0, 0.0, 0.0],  // Y = 1
        [0.0, 0.0, -1.0], // Z = -b
    ],
    // Top
    [
        [0.0, 0.0, 1.0], // X = b
        [0.0, 1.0, 0.0], // Y = a
        [1.0, 0.0, 0.0], // Z = 1
    ],
    // Bottom
    [
        [0.0, 0.0, -1.0], // X = -b
        [0.0, 1.0, 0.0],  // Y = a
        [-1.0, 0.0, 0.0], // Z = -1
    ],
];

/// Apply a face transform to normalised face coordinates.
/// Returns the outward direction (x, y, z) for that face position, not unit length.
pub fn transform_face_coordinates(transform: &[[f64; 3]; 3], a: f64, b: f64) -> (f64, f64, f64) {
    let input = [1.0, a, b];
    let mut output = [0.0; 3];

    for i in 0..3 {
        for j in 0..3 {
            output[i] += transform[i][j] * input[j];
        }
    }

    (output[0], output[1], output[2])
}
