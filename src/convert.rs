use crate::config::AppError;
use crate::constants::{LUMA_WEIGHT_B, LUMA_WEIGHT_G, LUMA_WEIGHT_R};
use crate::tiers::TierTable;

use std::sync::{Arc, Mutex};

use image::{DynamicImage, GenericImageView, ImageBuffer, RgbImage, Rgba};
use indicatif::ProgressBar;
use rayon::prelude::*;

/// Relative luminance of a pixel as a percentage of full intensity.
///
/// Alpha is ignored.
pub fn luminance(pixel: Rgba<u8>) -> f64 {
    let r = pixel[0] as f64 / 255.0 * 100.0;
    let g = pixel[1] as f64 / 255.0 * 100.0;
    let b = pixel[2] as f64 / 255.0 * 100.0;

    r * LUMA_WEIGHT_R + g * LUMA_WEIGHT_G + b * LUMA_WEIGHT_B
}

/// Maps every pixel of `img` through the tier table, producing an opaque RGB
/// image with the same bounds. Rows are converted in parallel; each output
/// pixel depends only on its own input pixel and the shared read-only table.
pub fn convert_image(
    img: &DynamicImage,
    tiers: &TierTable,
    pb: &ProgressBar,
) -> Result<RgbImage, AppError> {
    let (width, height) = img.dimensions();
    let output: Arc<Mutex<RgbImage>> = Arc::new(Mutex::new(ImageBuffer::new(width, height)));

    (0..height)
        .into_par_iter()
        .try_for_each(|y| -> Result<(), AppError> {
            for x in 0..width {
                let converted = tiers.color_for_luminance(luminance(img.get_pixel(x, y)))?;
                output.lock().unwrap().put_pixel(x, y, converted);

                if (y * width + x) % 100 == 0 {
                    pb.inc(100);
                }
            }

            Ok(())
        })?;

    Ok(Arc::try_unwrap(output).unwrap().into_inner().unwrap())
}
