use image::Rgb;

use crate::config::AppError;

/// Parses a 6-digit hex token like "DCD7BA" into an RGB color.
pub fn parse_hex_color(token: &str) -> Result<Rgb<u8>, AppError> {
    let hex = u32::from_str_radix(token, 16).map_err(|_| AppError::InvalidColor(token.to_string()))?;

    if hex > 0xFFFFFF {
        return Err(AppError::InvalidColor(token.to_string()));
    }

    Ok(hex_to_rgb(hex))
}

pub fn hex_to_rgb(hex: u32) -> Rgb<u8> {
    let r = ((hex & 0xFF0000) >> 16) as u8;
    let g = ((hex & 0x00FF00) >> 8) as u8;
    let b = (hex & 0x0000FF) as u8;

    Rgb([r, g, b])
}
