/// Spherical sampling of an equirectangular source along a viewing direction.
use crate::error::ConvertError;
use crate::face::Direction;
use crate::source::EquirectSource;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};
use std::str::FromStr;

/// How a colour is reconstructed from the source grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResamplingPolicy {
    /// Colour of the base pixel, no interpolation.
    Nearest,
    /// Weighted blend of the four surrounding pixels.
    #[default]
    Bilinear,
}

impl FromStr for ResamplingPolicy {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nearest" | "nearest-neighbor" | "nearest_neighbor" => Ok(ResamplingPolicy::Nearest),
            "bilinear" => Ok(ResamplingPolicy::Bilinear),
            other => Err(ConvertError::InvalidArgument(format!(
                "unknown resampling policy '{}'",
                other
            ))),
        }
    }
}

/// Source pixel neighbourhood for one direction.
/// All indices are clamped into the source; the ±180° seam and the poles reuse
/// edge pixels instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceCoords {
    pub ui: u32,
    pub vi: u32,
    pub u2: u32,
    pub v2: u32,
    /// Horizontal weight of the right-hand neighbour, in [0, 1].
    pub mu: f64,
    /// Vertical weight of the lower neighbour, in [0, 1].
    pub nu: f64,
}

impl SourceCoords {
    /// Locate `direction` on a `width` x `height` source.
    /// Fails when either dimension is zero.
    pub fn locate(direction: Direction, width: u32, height: u32) -> Result<Self, ConvertError> {
        if width == 0 || height == 0 {
            return Err(ConvertError::InvalidArgument(format!(
                "cannot sample an empty {}x{} source",
                width, height
            )));
        }
        let Direction { x, y, z } = direction;

        let theta = y.atan2(x);
        let r = (x * x + y * y).sqrt();
        let phi = z.atan2(r);

        // Horizontal scale uses the height, which relies on width == 2 * height
        let h = height as f64;
        let uf = (theta + PI) / PI * h;
        let vf = (FRAC_PI_2 - phi) / PI * h;

        let ui = clamp_index(uf.floor(), width);
        let vi = clamp_index(vf.floor(), height);
        let u2 = (ui + 1).min(width - 1);
        let v2 = (vi + 1).min(height - 1);

        Ok(Self {
            ui,
            vi,
            u2,
            v2,
            mu: weight(uf - ui as f64),
            nu: weight(vf - vi as f64),
        })
    }
}

/// Sample the source colour seen along `direction`.
pub fn sample<S>(
    direction: Direction,
    source: &S,
    policy: ResamplingPolicy,
) -> Result<[u8; 3], ConvertError>
where
    S: EquirectSource + ?Sized,
{
    let coords = SourceCoords::locate(direction, source.width(), source.height())?;

    let colour = match policy {
        ResamplingPolicy::Nearest => source.rgb(coords.ui, coords.vi),
        ResamplingPolicy::Bilinear => {
            let a = source.rgb(coords.ui, coords.vi);
            let b = source.rgb(coords.u2, coords.vi);
            let c = source.rgb(coords.ui, coords.v2);
            let d = source.rgb(coords.u2, coords.v2);

            let mut out = [0u8; 3];
            for ch in 0..3 {
                let top = lerp(a[ch] as f64, b[ch] as f64, coords.mu);
                let bottom = lerp(c[ch] as f64, d[ch] as f64, coords.mu);
                out[ch] = lerp(top, bottom, coords.nu).clamp(0.0, 255.0) as u8;
            }
            out
        }
    };
    Ok(colour)
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Saturating float to index conversion; NaN lands on 0.
fn clamp_index(value: f64, len: u32) -> u32 {
    (value.max(0.0) as u64).min(len.saturating_sub(1) as u64) as u32
}

fn weight(offset: f64) -> f64 {
    if offset.is_nan() {
        0.0
    } else {
        offset.clamp(0.0, 1.0)
    }
}
