mod config;
mod constants;
mod convert;
mod presets;
mod tiers;
mod types;
mod utils;

use crate::config::{init, AppError};
use crate::convert::convert_image;
use crate::types::AppConfig;

use image::GenericImageView;
use indicatif::{ProgressBar, ProgressStyle};

fn main() -> Result<(), AppError> {
    let config = init()?;

    process_image(&config)
}

fn process_image(config: &AppConfig) -> Result<(), AppError> {
    let img = image::open(&config.input_path).map_err(|source| AppError::ImageRead {
        path: config.input_path.clone(),
        source,
    })?;

    let (width, height) = img.dimensions();
    let pb = ProgressBar::new(width as u64 * height as u64);
    pb.set_style(ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {percent_precise}% ({eta}) {msg}")
        .unwrap()
        .progress_chars("#>-"));
    pb.set_message(format!("Processing: {}", config.input_path));

    let converted = convert_image(&img, &config.tiers, &pb)?;

    converted
        .save(&config.output_path)
        .map_err(|source| AppError::ImageWrite {
            path: config.output_path.clone(),
            source,
        })?;

    pb.finish_with_message(format!(
        "Finished: {} (Saved to: {})",
        config.input_path, config.output_path
    ));

    Ok(())
}
