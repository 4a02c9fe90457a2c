/// Conversion settings consumed by the converter.
use crate::error::ConvertError;
use crate::sampler::ResamplingPolicy;
use constants::texture::DEFAULT_FACE_EDGE;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConversionConfig {
    /// Output face resolution (edge x edge pixels).
    pub edge: u32,
    /// Resampling used for every output pixel.
    pub policy: ResamplingPolicy,
    /// Worker threads and block count. `None` uses the global rayon pool size.
    pub parallelism: Option<usize>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            edge: DEFAULT_FACE_EDGE,
            policy: ResamplingPolicy::default(),
            parallelism: None,
        }
    }
}

impl ConversionConfig {
    /// Build a config from an unchecked signed edge length.
    pub fn with_edge(edge: i64) -> Result<Self, ConvertError> {
        if edge <= 0 {
            return Err(ConvertError::InvalidArgument(format!(
                "edge must be positive, got {}",
                edge
            )));
        }
        let edge = u32::try_from(edge).map_err(|_| {
            ConvertError::InvalidArgument(format!("edge {} exceeds {}", edge, u32::MAX))
        })?;

        Ok(Self {
            edge,
            ..Self::default()
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConvertError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ConvertError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConvertError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConvertError> {
        if self.edge == 0 {
            return Err(ConvertError::InvalidArgument(
                "edge must be positive".to_string(),
            ));
        }
        if self.parallelism == Some(0) {
            return Err(ConvertError::InvalidArgument(
                "parallelism must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Number of blocks (and threads) a conversion will use.
    pub fn effective_parallelism(&self) -> usize {
        self.parallelism
            .unwrap_or_else(rayon::current_num_threads)
            .max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn rejects_non_positive_edge() {
        for edge in [0, -1, -4096, i64::MIN] {
            let err = ConversionConfig::with_edge(edge).unwrap_err();
            assert!(matches!(err, ConvertError::InvalidArgument(_)), "{}", edge);
        }
        assert!(ConversionConfig::with_edge(i64::from(u32::MAX) + 1).is_err());
    }

    #[test]
    fn accepts_positive_edge_with_defaults() {
        let config = ConversionConfig::with_edge(256).unwrap();
        assert_eq!(config.edge, 256);
        assert_eq!(config.policy, ResamplingPolicy::Bilinear);
        assert_eq!(config.parallelism, None);
        assert!(config.effective_parallelism() >= 1);
    }

    #[test]
    fn parses_json_with_partial_fields() {
        let config =
            ConversionConfig::from_json_str(r#"{"edge": 64, "policy": "nearest"}"#).unwrap();
        assert_eq!(config.edge, 64);
        assert_eq!(config.policy, ResamplingPolicy::Nearest);
        assert_eq!(config.parallelism, None);

        let config = ConversionConfig::from_json_str(r#"{"parallelism": 3}"#).unwrap();
        assert_eq!(config.edge, DEFAULT_FACE_EDGE);
        assert_eq!(config.effective_parallelism(), 3);
    }

    #[test]
    fn rejects_bad_json() {
        assert!(matches!(
            ConversionConfig::from_json_str(r#"{"edge": 0}"#),
            Err(ConvertError::InvalidArgument(_))
        ));
        assert!(matches!(
            ConversionConfig::from_json_str(r#"{"parallelism": 0}"#),
            Err(ConvertError::InvalidArgument(_))
        ));
        assert!(matches!(
            ConversionConfig::from_json_str(r#"{"edge": -5}"#),
            Err(ConvertError::Config(_))
        ));
        assert!(matches!(
            ConversionConfig::from_json_str(r#"{"policy": "cubic"}"#),
            Err(ConvertError::Config(_))
        ));
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let err = ConversionConfig::from_json_file(Path::new("/nonexistent/cubemap.json"))
            .unwrap_err();
        assert!(matches!(err, ConvertError::Config(_)));
    }
}
