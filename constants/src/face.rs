pub struct FaceInfo {
    pub id: u8,
    pub name: &'static str,
}

/// Cube faces in output order; `id` doubles as the file suffix (`_0`..`_5`).
pub const FACE_MAP: &[FaceInfo] = &[
    FaceInfo { id: 0, name: "back" },
    FaceInfo { id: 1, name: "left" },
    FaceInfo { id: 2, name: "front" },
    FaceInfo { id: 3, name: "right" },
    FaceInfo { id: 4, name: "top" },
    FaceInfo {
        id: 5,
        name: "bottom",
    },
];

pub const FACE_COUNT: usize = 6;

pub fn get_face_name(id: u8) -> String {
    FACE_MAP
        .iter()
        .find(|f| f.id == id)
        .map_or("unknown", |f| f.name)
        .to_string()
}
