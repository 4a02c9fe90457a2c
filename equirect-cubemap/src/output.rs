/// JPEG encoding of finished faces and the JSON conversion report.
use equirect_cubemap::{CubeFaces, Face, ResamplingPolicy};
use image::ColorType;
use image::codecs::jpeg::JpegEncoder;
use serde::Serialize;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize)]
pub struct FaceFile {
    pub face: Face,
    pub index: usize,
    pub file: String,
}

/// Summary written next to the faces after a successful conversion.
#[derive(Debug, Serialize)]
pub struct ConversionReport {
    pub source: String,
    pub source_width: u32,
    pub source_height: u32,
    pub edge: u32,
    pub policy: ResamplingPolicy,
    pub parallelism: usize,
    pub jpeg_quality: u8,
    pub convert_ms: u64,
    pub faces: Vec<FaceFile>,
}

pub struct FaceWriter {
    output_dir: PathBuf,
    output_name: String,
    quality: u8,
}

impl FaceWriter {
    pub fn new(output_dir: &Path, output_name: &str, quality: u8) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
            output_name: output_name.to_string(),
            quality,
        }
    }

    /// Path of the file holding `face`: `<name>_<index>.jpg`.
    pub fn face_path(&self, face: Face) -> PathBuf {
        self.output_dir
            .join(format!("{}_{}.jpg", self.output_name, face.index()))
    }

    pub fn report_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("{}_cubemap.json", self.output_name))
    }

    /// Encode all six faces. Returns the written files in face order.
    pub fn write_faces(
        &self,
        faces: &CubeFaces,
    ) -> Result<Vec<FaceFile>, Box<dyn std::error::Error>> {
        fs::create_dir_all(&self.output_dir)?;

        let mut written = Vec::with_capacity(Face::ALL.len());
        for (face, img) in faces.iter() {
            let path = self.face_path(face);
            let mut writer = BufWriter::new(File::create(&path)?);
            let mut encoder = JpegEncoder::new_with_quality(&mut writer, self.quality);
            encoder.encode(img.as_raw(), img.width(), img.height(), ColorType::Rgb8)?;

            println!("Saved {} ({} face)", path.display(), face.name());
            written.push(FaceFile {
                face,
                index: face.index(),
                file: path
                    .file_name()
                    .unwrap_or_default()
                    .to_string_lossy()
                    .to_string(),
            });
        }

        Ok(written)
    }

    pub fn write_report(
        &self,
        report: &ConversionReport,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let path = self.report_path();
        fs::write(&path, serde_json::to_string_pretty(report)?)?;
        println!("Saved {}", path.display());
        Ok(())
    }
}
