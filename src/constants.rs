pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Tier configuration used when no config file, preset, or flag says otherwise.
pub const DEFAULT_THRESHOLDS: &str = "0,50";
pub const DEFAULT_COLORS: &str = "000000,FFFFFF";

/// Upper bound of the sentinel tier appended to every table.
pub const MAX_LUMINANCE: f64 = 100.0;

/// Rec. 709 relative-luminance weights.
pub const LUMA_WEIGHT_R: f64 = 0.2126;
pub const LUMA_WEIGHT_G: f64 = 0.7152;
pub const LUMA_WEIGHT_B: f64 = 0.0722;
