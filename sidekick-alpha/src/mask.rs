//! Colour ranges and per-pixel masks

use image::{Rgba, RgbaImage};

use crate::AlphaError;

/// Inclusive per-channel RGBA bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorRange {
    pub lower: [u8; 4],
    pub upper: [u8; 4],
}

impl ColorRange {
    /// Opaque pixels whose RGB channels are all 240 or brighter.
    pub const NEAR_WHITE: ColorRange = ColorRange {
        lower: [240, 240, 240, 255],
        upper: [255, 255, 255, 255],
    };

    pub fn contains(&self, pixel: &Rgba<u8>) -> bool {
        pixel
            .0
            .iter()
            .zip(self.lower.iter().zip(self.upper.iter()))
            .all(|(v, (lo, hi))| lo <= v && v <= hi)
    }
}

/// A boolean mask with the same layout as an image (row-major).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl Mask {
    /// Mark every pixel of `img` that falls inside `range`.
    pub fn in_range(img: &RgbaImage, range: &ColorRange) -> Self {
        let (width, height) = img.dimensions();
        let cells = img.pixels().map(|p| range.contains(p)).collect();
        Self { width, height, cells }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn get(&self, x: u32, y: u32) -> Option<bool> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get((y * self.width + x) as usize).copied()
    }

    /// Number of set cells.
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|c| **c).count()
    }

    /// Flip every cell.
    pub fn invert(mut self) -> Self {
        for cell in &mut self.cells {
            *cell = !*cell;
        }
        self
    }

    /// Keep alpha where the mask is set, zero it elsewhere.
    ///
    /// Returns how many pixels had non-zero alpha cleared.
    pub fn apply_to_alpha(&self, img: &mut RgbaImage) -> Result<usize, AlphaError> {
        if img.dimensions() != self.dimensions() {
            return Err(AlphaError::DimensionMismatch {
                image: img.dimensions(),
                mask: self.dimensions(),
            });
        }

        let mut cleared = 0;
        for (pixel, keep) in img.pixels_mut().zip(self.cells.iter()) {
            if !keep && pixel.0[3] != 0 {
                pixel.0[3] = 0;
                cleared += 1;
            }
        }
        Ok(cleared)
    }
}
