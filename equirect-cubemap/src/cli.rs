/// Command-line argument handling for the converter binary.
use constants::texture::DEFAULT_JPEG_QUALITY;
use equirect_cubemap::{ConversionConfig, ConvertError, ResamplingPolicy};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub struct CliArgs {
    pub input: PathBuf,
    pub edge: Option<i64>,
    pub policy: Option<ResamplingPolicy>,
    pub threads: Option<usize>,
    pub quality: u8,
    pub config_file: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}

pub fn usage(program: &str) -> String {
    format!(
        "Usage: {} <input> [edge] [--nearest|--bilinear] [--threads N] [--quality Q] \
         [--config file.json] [--out DIR]",
        program
    )
}

impl CliArgs {
    /// Parse arguments (without the program name).
    pub fn parse(args: &[String]) -> Result<Self, String> {
        let mut input = None;
        let mut edge = None;
        let mut policy = None;
        let mut threads = None;
        let mut quality = DEFAULT_JPEG_QUALITY;
        let mut config_file = None;
        let mut output_dir = None;

        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--nearest" => policy = Some(ResamplingPolicy::Nearest),
                "--bilinear" => policy = Some(ResamplingPolicy::Bilinear),
                "--threads" => {
                    let value = flag_value(&mut iter, arg)?;
                    threads = Some(
                        value
                            .parse::<usize>()
                            .map_err(|_| format!("Invalid thread count: {}", value))?,
                    );
                }
                "--quality" => {
                    let value = flag_value(&mut iter, arg)?;
                    quality = value
                        .parse::<u8>()
                        .ok()
                        .filter(|q| (1..=100).contains(q))
                        .ok_or_else(|| format!("Quality must be 1-100, got {}", value))?;
                }
                "--config" => config_file = Some(PathBuf::from(flag_value(&mut iter, arg)?)),
                "--out" => output_dir = Some(PathBuf::from(flag_value(&mut iter, arg)?)),
                other if other.starts_with("--") => {
                    return Err(format!("Unknown option: {}", other));
                }
                other if input.is_none() => input = Some(PathBuf::from(other)),
                other if edge.is_none() => {
                    edge = Some(
                        other
                            .parse::<i64>()
                            .map_err(|_| format!("Invalid edge: {}", other))?,
                    );
                }
                other => return Err(format!("Unexpected argument: {}", other)),
            }
        }

        Ok(Self {
            input: input.ok_or("Missing input image")?,
            edge,
            policy,
            threads,
            quality,
            config_file,
            output_dir,
        })
    }

    /// Config file first, then command-line overrides.
    pub fn conversion_config(&self) -> Result<ConversionConfig, ConvertError> {
        let mut config = match &self.config_file {
            Some(path) => ConversionConfig::from_json_file(path)?,
            None => ConversionConfig::default(),
        };
        if let Some(edge) = self.edge {
            config.edge = ConversionConfig::with_edge(edge)?.edge;
        }

        if let Some(policy) = self.policy {
            config.policy = policy;
        }
        if let Some(threads) = self.threads {
            config.parallelism = Some(threads);
        }

        config.validate()?;
        Ok(config)
    }

    /// Directory the faces are written to; defaults to the input's directory.
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| {
            self.input
                .parent()
                .unwrap_or(Path::new("."))
                .to_path_buf()
        })
    }

    /// Base name of the output files, taken from the input file name.
    pub fn output_stem(&self) -> String {
        self.input
            .file_stem()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string()
    }
}

fn flag_value<'a>(
    iter: &mut impl Iterator<Item = &'a String>,
    flag: &str,
) -> Result<&'a String, String> {
    iter.next()
        .ok_or_else(|| format!("Missing value for {}", flag))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_input_and_edge() {
        let cli = CliArgs::parse(&args(&["pano/street.jpg", "512"])).unwrap();
        assert_eq!(cli.input, PathBuf::from("pano/street.jpg"));
        assert_eq!(cli.edge, Some(512));
        assert_eq!(cli.quality, DEFAULT_JPEG_QUALITY);
        assert_eq!(cli.output_dir(), PathBuf::from("pano"));
        assert_eq!(cli.output_stem(), "street");

        let config = cli.conversion_config().unwrap();
        assert_eq!(config.edge, 512);
        assert_eq!(config.policy, ResamplingPolicy::Bilinear);
    }

    #[test]
    fn flags_override_defaults() {
        let cli = CliArgs::parse(&args(&[
            "in.png",
            "--nearest",
            "--threads",
            "3",
            "--quality",
            "75",
            "--out",
            "/tmp/faces",
            "64",
        ]))
        .unwrap();

        assert_eq!(cli.quality, 75);
        assert_eq!(cli.output_dir(), PathBuf::from("/tmp/faces"));
        let config = cli.conversion_config().unwrap();
        assert_eq!(config.edge, 64);
        assert_eq!(config.policy, ResamplingPolicy::Nearest);
        assert_eq!(config.parallelism, Some(3));
    }

    #[test]
    fn non_positive_edge_is_invalid_argument() {
        for edge in ["0", "-16"] {
            let cli = CliArgs::parse(&args(&["in.jpg", edge])).unwrap();
            let err = cli.conversion_config().unwrap_err();
            assert!(matches!(err, ConvertError::InvalidArgument(_)), "{}", edge);
        }
    }

    #[test]
    fn rejects_malformed_arguments() {
        assert!(CliArgs::parse(&args(&[])).is_err());
        assert!(CliArgs::parse(&args(&["in.jpg", "big"])).is_err());
        assert!(CliArgs::parse(&args(&["in.jpg", "--threads"])).is_err());
        assert!(CliArgs::parse(&args(&["in.jpg", "--quality", "0"])).is_err());
        assert!(CliArgs::parse(&args(&["in.jpg", "--cubic"])).is_err());
        assert!(CliArgs::parse(&args(&["in.jpg", "8", "extra"])).is_err());
    }

    #[test]
    fn zero_threads_fails_validation() {
        let cli = CliArgs::parse(&args(&["in.jpg", "--threads", "0"])).unwrap();
        assert!(matches!(
            cli.conversion_config(),
            Err(ConvertError::InvalidArgument(_))
        ));
    }
}
