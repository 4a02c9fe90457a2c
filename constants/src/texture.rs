/// Default cube face edge length in pixels
pub const DEFAULT_FACE_EDGE: u32 = 1024;

/// Fill colour for freshly allocated faces (opaque white)
pub const BACKGROUND_COLOUR: [u8; 3] = [255, 255, 255];

/// JPEG quality used when encoding the six faces
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

