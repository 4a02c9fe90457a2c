/// Shared tables and tunables for equirectangular to cube face conversion
pub mod coordinate_system;
pub mod face;
pub mod texture;
