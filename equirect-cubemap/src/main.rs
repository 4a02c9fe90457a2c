/// Equirectangular panorama to cube face converter main entry point
mod cli;
mod output;

use cli::{CliArgs, usage};
use equirect_cubemap::CubemapConverter;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use output::{ConversionReport, FaceWriter};
use std::env;
use std::time::Instant;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("equirect-cubemap");
    let cli = match CliArgs::parse(args.get(1..).unwrap_or_default()) {
        Ok(cli) => cli,
        Err(msg) => {
            eprintln!("{}", msg);
            eprintln!("{}", usage(program));
            std::process::exit(1);
        }
    };
    let config = cli.conversion_config()?;

    let started = Instant::now();
    let source = image::open(&cli.input)?.to_rgb8();
    info!(
        "Decoded {} ({}x{}) in {:.2?}",
        cli.input.display(),
        source.width(),
        source.height(),
        started.elapsed()
    );

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{bar:40.green/blue}] {pos}/{len} rows ({percent}%) {msg}")?
            .progress_chars("▉▊▋▌▍▎▏ "),
    );
    pb.set_message("Projecting faces");

    let converter = CubemapConverter::new(config)?.with_progress(pb.clone());
    let started = Instant::now();
    let faces = converter.convert(&source)?;
    let convert_elapsed = started.elapsed();
    pb.finish_with_message("Faces projected");

    let started = Instant::now();
    let writer = FaceWriter::new(&cli.output_dir(), &cli.output_stem(), cli.quality);
    let files = writer.write_faces(&faces)?;
    info!("Encoded faces in {:.2?}", started.elapsed());

    writer.write_report(&ConversionReport {
        source: cli.input.display().to_string(),
        source_width: source.width(),
        source_height: source.height(),
        edge: faces.edge(),
        policy: converter.config().policy,
        parallelism: converter.config().effective_parallelism(),
        jpeg_quality: cli.quality,
        convert_ms: convert_elapsed.as_millis() as u64,
        faces: files,
    })?;

    println!("Conversion complete!");
    Ok(())
}
