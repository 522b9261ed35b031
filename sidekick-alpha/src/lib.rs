//! # sidekick-alpha
//!
//! Makes the near-white background of an image transparent.
//!
//! A pixel is background when its RGB channels are all in `240..=255` and it
//! is fully opaque. Background pixels get alpha 0, everything else is left
//! alone. Images without an alpha channel gain one.
//!
//! ```no_run
//! let report = sidekick_alpha::convert_file("logo.png", "logo_transparent.png").unwrap();
//! println!("cleared {} pixels", report.cleared);
//! ```

mod convert;
mod mask;

use thiserror::Error;

pub use convert::{convert_file, ensure_alpha, remove_background, ConvertReport};
pub use mask::{ColorRange, Mask};

#[derive(Error, Debug)]
pub enum AlphaError {
    #[error("Failed to process image: {0}")]
    Image(#[from] image::ImageError),
    #[error("Mask is {mask:?} but image is {image:?}")]
    DimensionMismatch { image: (u32, u32), mask: (u32, u32) },
}
