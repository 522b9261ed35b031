//! Image load, background removal and save

use std::path::{Path, PathBuf};

use image::{DynamicImage, RgbaImage};

use crate::mask::{ColorRange, Mask};
use crate::AlphaError;

/// Summary of one conversion.
#[derive(Debug, Clone)]
pub struct ConvertReport {
    pub width: u32,
    pub height: u32,
    /// The source had no alpha channel and one was added
    pub alpha_added: bool,
    /// Pixels made fully transparent
    pub cleared: usize,
    pub output: PathBuf,
}

/// Convert any decoded image to 8-bit RGBA.
///
/// The flag is true when the source carried no alpha channel.
pub fn ensure_alpha(img: DynamicImage) -> (RgbaImage, bool) {
    let had_alpha = img.color().has_alpha();
    if !had_alpha {
        log::debug!("Adding alpha channel to {:?} image", img.color());
    }
    (img.into_rgba8(), !had_alpha)
}

/// Zero the alpha of every near-white pixel.
pub fn remove_background(mut img: RgbaImage) -> Result<(RgbaImage, usize), AlphaError> {
    let keep = Mask::in_range(&img, &ColorRange::NEAR_WHITE).invert();
    let cleared = keep.apply_to_alpha(&mut img)?;
    Ok((img, cleared))
}

/// Load `input`, make its white background transparent and write `output`.
///
/// The output format follows the extension of `output`.
pub fn convert_file(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<ConvertReport, AlphaError> {
    let input = input.as_ref();
    let output = output.as_ref();

    let img = image::open(input)?;
    let (rgba, alpha_added) = ensure_alpha(img);
    let (width, height) = rgba.dimensions();
    let (rgba, cleared) = remove_background(rgba)?;

    rgba.save(output)?;
    log::info!(
        "{} -> {} ({}x{}, {} pixels cleared)",
        input.display(),
        output.display(),
        width,
        height,
        cleared
    );

    Ok(ConvertReport {
        width,
        height,
        alpha_added,
        cleared,
        output: output.to_path_buf(),
    })
}
