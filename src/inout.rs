use crate::cli_app::Args;
use crate::error::{Error, Result};
use crate::geometry::Point;
use crate::imagery::Raster;
use crate::optimum::Chord;
use crate::serde::Serialize;
use crate::synthesis::{Checkpoint, StopReason, Synthesis};
use image::codecs::pnm::{PnmEncoder, PnmSubtype, SampleEncoding};
use image::io::Reader as ImageReader;
use image::{ColorType, ImageEncoder};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Everything worth keeping about a finished run.
#[derive(Debug, Serialize)]
pub struct Data {
    pub args: Args,
    pub image_width: u32,
    pub image_height: u32,
    pub initial_error: u64,
    pub final_error: u64,
    pub elapsed_seconds: f64,
    pub stop_reason: StopReason,
    pub rounds: usize,
    pub pin_count: usize,
    pub chord_count: usize,
    pub pin_locations: Vec<Point>,
    pub chords: Vec<Chord>,
    pub checkpoints: Vec<Checkpoint>,
}

impl Data {
    pub fn new(
        args: Args,
        pin_locations: Vec<Point>,
        synthesis: &Synthesis,
        elapsed_seconds: f64,
    ) -> Self {
        Self {
            args,
            image_width: synthesis.render.width(),
            image_height: synthesis.render.height(),
            initial_error: synthesis.initial_error,
            final_error: synthesis.final_error,
            elapsed_seconds,
            stop_reason: synthesis.stop_reason,
            rounds: synthesis.rounds,
            pin_count: pin_locations.len(),
            chord_count: synthesis.chords.len(),
            pin_locations,
            chords: synthesis.chords.clone(),
            checkpoints: synthesis.checkpoints.clone(),
        }
    }
}

/// Decodes any format `image` understands into 8-bit luma.
pub fn read_target<P: AsRef<Path>>(path: P) -> Result<Raster> {
    let image = ImageReader::open(path)?.decode()?.to_luma8();
    if image.width() < 2 || image.height() < 2 {
        return Err(Error::ImageTooSmall {
            width: image.width(),
            height: image.height(),
        });
    }
    Raster::from_pixels(image.width(), image.height(), image.into_raw())
}

fn is_pgm(path: &Path) -> bool {
    path.extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("pgm"))
}

/// Saves `raster` as ASCII PGM for `.pgm` paths, otherwise in whatever format
/// the extension names.
pub fn write_raster<P: AsRef<Path>>(raster: &Raster, path: P) -> Result<()> {
    let path = path.as_ref();
    if is_pgm(path) {
        let file = BufWriter::new(File::create(path)?);
        PnmEncoder::new(file)
            .with_subtype(PnmSubtype::Graymap(SampleEncoding::Ascii))
            .write_image(raster.pixels(), raster.width(), raster.height(), ColorType::L8)?;
    } else {
        raster.grayscale().save(path)?;
    }
    Ok(())
}

pub fn write_data<P: AsRef<Path>>(data: &Data, path: P) -> Result<()> {
    std::fs::write(path, serde_json::to_string(data)?)?;
    Ok(())
}
