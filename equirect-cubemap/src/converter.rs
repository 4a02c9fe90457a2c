/// Cube face converter orchestrating parallel projection of an equirectangular source.
use crate::cancel::CancellationToken;
use crate::config::ConversionConfig;
use crate::error::ConvertError;
use crate::face::Face;
use crate::partition::{Block, partition};
use crate::sampler::{ResamplingPolicy, sample};
use crate::source::EquirectSource;
use constants::face::FACE_COUNT;
use constants::texture::BACKGROUND_COLOUR;
use image::RgbImage;
use indicatif::ProgressBar;
use log::{debug, info, warn};
use rayon::prelude::*;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

const CHANNELS: usize = 3;

/// The six finished faces, indexed in `Face` order.
#[derive(Debug, Clone)]
pub struct CubeFaces {
    edge: u32,
    faces: Vec<RgbImage>,
}

impl CubeFaces {
    pub fn edge(&self) -> u32 {
        self.edge
    }

    pub fn face(&self, face: Face) -> &RgbImage {
        &self.faces[face.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Face, &RgbImage)> {
        Face::ALL.into_iter().zip(self.faces.iter())
    }

    /// Hand the buffers over to an encoder.
    pub fn into_images(self) -> Vec<RgbImage> {
        self.faces
    }
}

/// Equirectangular to cube face converter.
/// Splits the (face, row) space into blocks and fills each block on its own rayon task.
pub struct CubemapConverter {
    config: ConversionConfig,
    cancel: Option<CancellationToken>,
    /// Advanced once per finished output row.
    progress: ProgressBar,
}

impl CubemapConverter {
    /// Create a converter after validating the configuration.
    pub fn new(config: ConversionConfig) -> Result<Self, ConvertError> {
        config.validate()?;

        Ok(Self {
            config,
            cancel: None,
            progress: ProgressBar::hidden(),
        })
    }

    /// Observe `token` between rows; a cancelled token aborts the conversion.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Report row progress on `progress`. Its length is set when conversion starts.
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// Project `source` onto the six cube faces.
    /// Blocks until every block has finished; nothing partial is ever returned.
    pub fn convert<S>(&self, source: &S) -> Result<CubeFaces, ConvertError>
    where
        S: EquirectSource + Sync + ?Sized,
    {
        self.validate_source(source)?;
        self.check_cancelled()?;

        let parallelism = self.config.effective_parallelism();
        info!(
            "Converting {}x{} panorama to six {}x{} faces ({:?}, {} blocks)",
            source.width(),
            source.height(),
            self.config.edge,
            self.config.edge,
            self.config.policy,
            parallelism
        );
        let started = Instant::now();

        let faces = match self.config.parallelism {
            Some(threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .thread_name(|idx| format!("cubemap-worker-{}", idx))
                    .build()?;
                pool.install(|| self.fill_faces(source, parallelism))?
            }
            None => self.fill_faces(source, parallelism)?,
        };

        info!("Conversion finished in {:.2?}", started.elapsed());
        Ok(faces)
    }

    /// Reject unusable sources; warn about ones that will come out skewed.
    fn validate_source<S>(&self, source: &S) -> Result<(), ConvertError>
    where
        S: EquirectSource + ?Sized,
    {
        let (width, height) = (source.width(), source.height());
        if width == 0 || height == 0 {
            return Err(ConvertError::InvalidArgument(format!(
                "source image is empty ({}x{})",
                width, height
            )));
        }
        if !source.has_equirect_aspect() {
            warn!(
                "Source is {}x{}, not 2:1; faces will be geometrically distorted",
                width, height
            );
        }
        Ok(())
    }

    fn check_cancelled(&self) -> Result<(), ConvertError> {
        match &self.cancel {
            Some(token) if token.is_cancelled() => Err(ConvertError::Cancelled),
            _ => Ok(()),
        }
    }

    /// Allocate the faces, give each block exclusive ownership of its rows and fill them.
    fn fill_faces<S>(&self, source: &S, parallelism: usize) -> Result<CubeFaces, ConvertError>
    where
        S: EquirectSource + Sync + ?Sized,
    {
        let edge = self.config.edge;
        let edge_px = edge as usize;
        let row_len = edge_px * CHANNELS;
        let total_rows = FACE_COUNT * edge_px;

        let mut planes = allocate_planes(edge_px)?;

        let blocks: Vec<Block> = partition(total_rows, parallelism).collect();
        debug!(
            "Split {} rows into {} blocks (first {:?}, last {:?})",
            total_rows,
            blocks.len(),
            blocks.first(),
            blocks.last()
        );

        self.progress.set_length(total_rows as u64);

        {
            let mut rows = planes
                .iter_mut()
                .flat_map(|plane| plane.chunks_exact_mut(row_len));
            let jobs: Vec<(Block, Vec<&mut [u8]>)> = blocks
                .iter()
                .map(|&block| (block, rows.by_ref().take(block.len()).collect()))
                .collect();

            jobs.into_par_iter().try_for_each(|(block, block_rows)| {
                self.fill_block(source, block, block_rows)
            })?;
        }

        let faces = planes
            .into_iter()
            .map(|plane| {
                RgbImage::from_raw(edge, edge, plane).ok_or_else(|| {
                    ConvertError::InvalidArgument(format!(
                        "face buffer does not fit {}x{}",
                        edge, edge
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CubeFaces { edge, faces })
    }

    /// Fill every row of one block. Cancellation is checked before each row.
    fn fill_block<S>(
        &self,
        source: &S,
        block: Block,
        rows: Vec<&mut [u8]>,
    ) -> Result<(), ConvertError>
    where
        S: EquirectSource + ?Sized,
    {
        let edge = self.config.edge;
        let edge_px = edge as usize;
        let policy = self.config.policy;

        for (k, row) in block.indices().zip(rows) {
            self.check_cancelled()?;

            let face = Face::ALL[k / edge_px];
            let j = (k % edge_px) as u32;

            panic::catch_unwind(AssertUnwindSafe(|| {
                fill_row(source, face, j, edge, policy, row)
            }))
            .map_err(|payload| ConvertError::WorkerFailed {
                block,
                face,
                message: panic_message(payload.as_ref()),
            })??;

            self.progress.inc(1);
        }

        Ok(())
    }
}

/// Sample one output row of `face` into `row` (RGB triples).
fn fill_row<S>(
    source: &S,
    face: Face,
    j: u32,
    edge: u32,
    policy: ResamplingPolicy,
    row: &mut [u8],
) -> Result<(), ConvertError>
where
    S: EquirectSource + ?Sized,
{
    for (i, pixel) in row.chunks_exact_mut(CHANNELS).enumerate() {
        let direction = face.direction(i as u32, j, edge);
        pixel.copy_from_slice(&sample(direction, source, policy)?);
    }
    Ok(())
}

/// Six background-filled edge x edge RGB planes.
/// Sizes that overflow or cannot be reserved are reported instead of aborting.
fn allocate_planes(edge_px: usize) -> Result<Vec<Vec<u8>>, ConvertError> {
    let plane_len = edge_px
        .checked_mul(edge_px)
        .and_then(|n| n.checked_mul(CHANNELS))
        .ok_or_else(|| {
            ConvertError::InvalidArgument(format!(
                "{}x{} face does not fit in memory addressing",
                edge_px, edge_px
            ))
        })?;

    let mut planes = Vec::new();
    planes.try_reserve_exact(FACE_COUNT).map_err(|e| {
        ConvertError::ResourceExhausted(format!("face list: {}", e))
    })?;

    for face in Face::ALL {
        let mut plane: Vec<u8> = Vec::new();
        plane.try_reserve_exact(plane_len).map_err(|e| {
            ConvertError::ResourceExhausted(format!(
                "{} face needs {} bytes: {}",
                face.name(),
                plane_len,
                e
            ))
        })?;
        for _ in 0..edge_px * edge_px {
            plane.extend_from_slice(&BACKGROUND_COLOUR);
        }
        planes.push(plane);
    }

    Ok(planes)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "worker panicked".to_string()
    }
}
