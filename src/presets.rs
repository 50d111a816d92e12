/// Built-in tier presets, consulted when no matching preset file exists in
/// the config directory. Each entry is (name, thresholds, colors).
pub const BUILTIN_PRESETS: &[(&str, &str, &str)] = &[
    ("mono", "0,50", "000000,FFFFFF"),
    ("kanagawa", "0,25,50,75", "1F1F28,223249,54546D,DCD7BA"),
];
