/// Equirectangular panorama to cube face conversion
pub mod cancel;
pub mod config;
pub mod converter;
pub mod error;
pub mod face;
pub mod partition;
pub mod sampler;
pub mod source;

pub use cancel::CancellationToken;
pub use config::ConversionConfig;
pub use converter::{CubeFaces, CubemapConverter};
pub use error::ConvertError;
pub use face::{Direction, Face, map_to_direction};
pub use partition::{Block, Blocks, partition};
pub use sampler::{ResamplingPolicy, SourceCoords, sample};
pub use source::EquirectSource;
