use crate::constants::{DEFAULT_COLORS, DEFAULT_THRESHOLDS, VERSION};
use crate::presets::BUILTIN_PRESETS;
use crate::tiers::TierTable;
use crate::types::AppConfig;

use clap::{App, Arg};
use config::builder::DefaultState;
use config::{ConfigBuilder, File};
use serde_derive::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid luminance threshold \"{0}\"")]
    InvalidThreshold(String),

    #[error("invalid tier color \"{0}\"")]
    InvalidColor(String),

    #[error("{thresholds} thresholds and {colors} colors; every tier needs one of each")]
    TierCountMismatch { thresholds: usize, colors: usize },

    #[error("luminance {luminance} is over all thresholds {thresholds:?}")]
    LuminanceOutOfRange { luminance: f64, thresholds: Vec<f64> },

    #[error("preset \"{0}\" not found")]
    PresetNotFound(String),

    #[error("error reading preset \"{path}\": {source}")]
    PresetRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("error parsing preset \"{path}\": {source}")]
    PresetParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("error reading image \"{path}\": {source}")]
    ImageRead {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("error writing image \"{path}\": {source}")]
    ImageWrite {
        path: String,
        #[source]
        source: image::ImageError,
    },
}

#[derive(Debug, Deserialize)]
struct SerializedAppConfig {
    thresholds: String,
    colors: String,
}

#[derive(Debug, Deserialize)]
struct TierPreset {
    thresholds: String,
    colors: String,
}

fn load_config(config_path: Option<&str>) -> Result<SerializedAppConfig, config::ConfigError> {
    let mut builder = ConfigBuilder::default();

    builder = builder
        .set_default("thresholds", DEFAULT_THRESHOLDS)?
        .set_default("colors", DEFAULT_COLORS)?;

    let default_config_path = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from(""))
        .join(".config/luminizer/config.toml");

    if default_config_path.exists() {
        builder = ConfigBuilder::<DefaultState>::add_source(
            builder,
            File::from(default_config_path).required(false),
        );
    }

    if let Some(path) = config_path {
        builder = builder.add_source(File::with_name(path).required(true));
    }

    let config = builder.build()?;

    config.try_deserialize()
}

fn load_preset(name: &str, config_dir: &Path) -> Result<(String, String), AppError> {
    let preset_path = config_dir.join(format!("{}.toml", name));
    if preset_path.exists() {
        let path = preset_path.display().to_string();
        let preset_str = fs::read_to_string(&preset_path).map_err(|source| AppError::PresetRead {
            path: path.clone(),
            source,
        })?;
        let preset: TierPreset =
            toml::from_str(&preset_str).map_err(|source| AppError::PresetParse { path, source })?;
        Ok((preset.thresholds, preset.colors))
    } else if let Some(&(_, thresholds, colors)) =
        BUILTIN_PRESETS.iter().find(|&&(preset, _, _)| preset == name)
    {
        Ok((thresholds.to_string(), colors.to_string()))
    } else {
        Err(AppError::PresetNotFound(name.to_string()))
    }
}

pub fn init() -> Result<AppConfig, AppError> {
    let matches = App::new("Image Luminizer")
        .version(VERSION)
        .author("Taylor Beeston")
        .about("Recolors an image's pixels by their luminance")
        .after_help("Thresholds is a comma-separated list of [0.0-100.0] luminance percentages, each the upper bound of one tier. Colors is a comma-separated list of 6-digit hex values, one per tier; a pixel whose luminance lands in a tier is replaced by that tier's color. A final tier up to 100 is appended automatically and reuses the last color.\n\nConfig should be a TOML file containing 'thresholds' and 'colors' strings. Presets are TOML files of the same shape in ~/.config/luminizer, looked up by name (minus the extension). 'mono' and 'kanagawa' are built in.")
        .arg(
            Arg::with_name("Thresholds")
                .short('t')
                .long("thresholds")
                .value_name("T1,T2,...")
                .help("[0.0-100.0] Comma-separated upper bounds, one per luminance tier")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("Colors")
                .short('c')
                .long("colors")
                .value_name("RRGGBB,RRGGBB,...")
                .help("Comma-separated hex values each luminance tier is converted to")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("Preset")
                .short('p')
                .long("preset")
                .value_name("NAME")
                .help("Loads a named tier preset from the config directory")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("config")
                .long("config")
                .value_name("/path/to/config.toml")
                .help("Sets a custom config file")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("Output Path")
                .short('o')
                .long("out")
                .value_name("/path/to/out.png")
                .help("Path to write the converted image to")
                .required(true)
                .takes_value(true),
        )
        .arg(
            Arg::with_name("Image Path")
                .help("Path to the image you'd like to convert")
                .required(true)
                .index(1),
        )
        .get_matches();

    let config = load_config(matches.value_of("config"))?;

    let config_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from(""))
        .join(".config/luminizer");

    let (mut thresholds, mut colors) = (config.thresholds, config.colors);

    if let Some(name) = matches.value_of("Preset") {
        let (preset_thresholds, preset_colors) = load_preset(name, &config_dir)?;
        thresholds = preset_thresholds;
        colors = preset_colors;
    }

    let thresholds = matches.value_of("Thresholds").unwrap_or(&thresholds);
    let colors = matches.value_of("Colors").unwrap_or(&colors);

    let tiers = TierTable::parse(thresholds, colors)?;

    Ok(AppConfig {
        input_path: matches.value_of("Image Path").unwrap().to_string(),
        output_path: matches.value_of("Output Path").unwrap().to_string(),
        tiers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_preset_when_no_file_exists() {
        let dir = tempfile::tempdir().unwrap();

        let (thresholds, colors) = load_preset("mono", dir.path()).unwrap();

        assert_eq!(thresholds, DEFAULT_THRESHOLDS);
        assert_eq!(colors, DEFAULT_COLORS);
    }

    #[test]
    fn preset_file_overrides_builtin() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("mono.toml"),
            "thresholds = \"0,25\"\ncolors = \"111111,EEEEEE\"\n",
        )
        .unwrap();

        let (thresholds, colors) = load_preset("mono", dir.path()).unwrap();

        assert_eq!(thresholds, "0,25");
        assert_eq!(colors, "111111,EEEEEE");
    }

    #[test]
    fn unknown_preset_is_an_error() {
        let dir = tempfile::tempdir().unwrap();

        let err = load_preset("does-not-exist", dir.path()).unwrap_err();

        assert!(matches!(err, AppError::PresetNotFound(name) if name == "does-not-exist"));
    }

    #[test]
    fn malformed_preset_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("broken.toml"), "thresholds = [1, 2]\n").unwrap();

        let err = load_preset("broken", dir.path()).unwrap_err();

        assert!(matches!(err, AppError::PresetParse { .. }));
    }
}
