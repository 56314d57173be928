use crate::error;
use crate::error::{Error, Result};
use crate::geometry::{Cell, Line, Point};
use crate::image::GrayImage;

pub const BLANK: u8 = u8::MAX;

/// Row-major grid of 8-bit intensities. 0 is dark, 255 is light.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

/// Reserves exactly `len` samples, reporting failure instead of aborting.
fn allocate(len: usize, fill: u8, purpose: &'static str) -> Result<Vec<u8>> {
    let mut pixels = error::reserve(len, purpose)?;
    pixels.resize(len, fill);
    Ok(pixels)
}

impl Raster {
    /// An all-white canvas.
    pub fn blank(width: u32, height: u32) -> Result<Self> {
        let pixels = allocate(width as usize * height as usize, BLANK, "render buffer")?;
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn from_pixels(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(Error::PixelCount {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    fn offset(&self, cell: Cell) -> Option<usize> {
        if cell.x < 0 || cell.y < 0 || cell.x as u32 >= self.width || cell.y as u32 >= self.height {
            None
        } else {
            Some(cell.y as usize * self.width as usize + cell.x as usize)
        }
    }

    /// The sample at `cell`, or `None` when it falls outside the image.
    pub fn get(&self, cell: Cell) -> Option<u8> {
        self.offset(cell).map(|i| self.pixels[i])
    }

    /// Writes `value` at `cell`. Returns false when the cell is outside the image.
    pub fn set(&mut self, cell: Cell, value: u8) -> bool {
        match self.offset(cell) {
            Some(i) => {
                self.pixels[i] = value;
                true
            }
            None => false,
        }
    }

    /// Lowers the sample at `cell` by `amount`, stopping at 0.
    /// Returns the old and new values for in-bounds cells.
    pub fn darken(&mut self, cell: Cell, amount: u8) -> Option<(u8, u8)> {
        let i = self.offset(cell)?;
        let old = self.pixels[i];
        let new = old.saturating_sub(amount);
        self.pixels[i] = new;
        Some((old, new))
    }

    /// Cells of the line between two pins, clipped to the image.
    pub fn line_cells(&self, a: Point, b: Point) -> impl Iterator<Item = Cell> + '_ {
        Line::from((a, b))
            .iter(self.width, self.height)
            .filter(move |cell| self.offset(*cell).is_some())
    }

    /// Sum of squared per-pixel differences against `other`.
    pub fn squared_error(&self, other: &Self) -> u64 {
        debug_assert_eq!((self.width, self.height), (other.width, other.height));
        self.pixels
            .iter()
            .zip(other.pixels.iter())
            .map(|(a, b)| pixel_error(*a, *b))
            .sum()
    }

    pub fn grayscale(&self) -> GrayImage {
        let mut img = GrayImage::new(self.width, self.height);
        img.copy_from_slice(&self.pixels);
        img
    }
}

pub fn pixel_error(a: u8, b: u8) -> u64 {
    let diff = a as i64 - b as i64;
    (diff * diff) as u64
}

impl std::ops::Index<(u32, u32)> for Raster {
    type Output = u8;
    fn index(&self, (x, y): (u32, u32)) -> &Self::Output {
        &self.pixels[y as usize * self.width as usize + x as usize]
    }
}

impl std::ops::IndexMut<(u32, u32)> for Raster {
    fn index_mut(&mut self, (x, y): (u32, u32)) -> &mut Self::Output {
        &mut self.pixels[y as usize * self.width as usize + x as usize]
    }
}

/// White image with a small black crosshair on every pin.
pub fn pin_crosshairs(width: u32, height: u32, pins: &[Point]) -> Result<Raster> {
    let side_length = 3;
    let mut raster = Raster::blank(width, height)?;
    for pin in pins {
        let center = Cell::from(*pin);
        for d in -side_length..=side_length {
            raster.set(Cell::new(center.x + d, center.y), 0);
            raster.set(Cell::new(center.x, center.y + d), 0);
        }
    }
    Ok(raster)
}
