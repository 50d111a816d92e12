use crate::tiers::TierTable;

#[derive(Debug)]
pub struct AppConfig {
    pub input_path: String,
    pub output_path: String,
    pub tiers: TierTable,
}
