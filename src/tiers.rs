use image::Rgb;

use crate::config::AppError;
use crate::constants::MAX_LUMINANCE;
use crate::utils::parse_hex_color;

/// An ordered set of luminance tiers. `thresholds[i]` is the exclusive lower
/// bound of tier `i` and `thresholds[i + 1]` its inclusive upper bound; the
/// final threshold is always the appended sentinel 100.0, whose tier reuses
/// the last configured color.
#[derive(Debug, Clone)]
pub struct TierTable {
    thresholds: Vec<f64>,
    colors: Vec<Rgb<u8>>,
}

impl TierTable {
    /// Parses comma-separated threshold and color strings into a table.
    ///
    /// Fails on the first bad token; no partially-built table escapes.
    pub fn parse(thresholds: &str, colors: &str) -> Result<Self, AppError> {
        let threshold_tokens: Vec<&str> = thresholds.split(',').collect();
        let color_tokens: Vec<&str> = colors.split(',').collect();

        if threshold_tokens.len() != color_tokens.len() {
            return Err(AppError::TierCountMismatch {
                thresholds: threshold_tokens.len(),
                colors: color_tokens.len(),
            });
        }

        let mut parsed_thresholds = Vec::with_capacity(threshold_tokens.len() + 1);
        for token in threshold_tokens {
            let threshold: f64 = token
                .parse()
                .map_err(|_| AppError::InvalidThreshold(token.to_string()))?;

            if !(0.0..=MAX_LUMINANCE).contains(&threshold) {
                return Err(AppError::InvalidThreshold(token.to_string()));
            }

            parsed_thresholds.push(threshold);
        }

        let mut parsed_colors = Vec::with_capacity(color_tokens.len() + 1);
        for token in color_tokens {
            parsed_colors.push(parse_hex_color(token)?);
        }

        parsed_thresholds.push(MAX_LUMINANCE);
        parsed_colors.push(*parsed_colors.last().unwrap());

        Ok(TierTable {
            thresholds: parsed_thresholds,
            colors: parsed_colors,
        })
    }

    /// Finds the replacement color for a luminance value in [0, 100].
    ///
    /// Tier `i` covers `(thresholds[i], thresholds[i + 1]]`; a luminance of
    /// exactly zero always lands in the first tier.
    pub fn color_for_luminance(&self, luminance: f64) -> Result<Rgb<u8>, AppError> {
        for i in 0..self.thresholds.len() - 1 {
            if (luminance > self.thresholds[i] && luminance <= self.thresholds[i + 1])
                || luminance == 0.0
            {
                return Ok(self.colors[i]);
            }
        }

        Err(AppError::LuminanceOutOfRange {
            luminance,
            thresholds: self.thresholds.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_table() -> TierTable {
        TierTable::parse("0,50", "000000,FFFFFF").unwrap()
    }

    #[test]
    fn default_tiers_split_at_fifty_percent() {
        let table = default_table();

        assert_eq!(table.color_for_luminance(0.0).unwrap(), Rgb([0, 0, 0]));
        assert_eq!(table.color_for_luminance(50.0).unwrap(), Rgb([0, 0, 0]));
        assert_eq!(table.color_for_luminance(50.01).unwrap(), Rgb([255, 255, 255]));
        assert_eq!(table.color_for_luminance(100.0).unwrap(), Rgb([255, 255, 255]));
    }

    #[test]
    fn zero_luminance_takes_the_first_tier() {
        // The first tier's stated lower bound excludes zero, which is why
        // exact zero is special-cased into it.
        let table = TierTable::parse("10,60", "FF0000,00FF00").unwrap();

        assert_eq!(table.color_for_luminance(0.0).unwrap(), Rgb([255, 0, 0]));
    }

    #[test]
    fn upper_bound_is_inclusive() {
        let table = TierTable::parse("0,25,75", "111111,555555,DDDDDD").unwrap();

        assert_eq!(table.color_for_luminance(25.0).unwrap(), Rgb([0x11, 0x11, 0x11]));
        assert_eq!(table.color_for_luminance(25.01).unwrap(), Rgb([0x55, 0x55, 0x55]));
        assert_eq!(table.color_for_luminance(75.0).unwrap(), Rgb([0x55, 0x55, 0x55]));
    }

    #[test]
    fn every_luminance_maps_to_a_tier() {
        let table = TierTable::parse("0,25,50,75", "111111,333333,999999,EEEEEE").unwrap();

        let mut luminance = 0.0;
        while luminance <= 100.0 {
            assert!(
                table.color_for_luminance(luminance).is_ok(),
                "no tier for luminance {luminance}"
            );
            luminance += 0.5;
        }
    }

    #[test]
    fn sentinel_tier_reuses_the_last_color() {
        let table = TierTable::parse("0,40", "112233,445566").unwrap();

        assert_eq!(table.color_for_luminance(70.0).unwrap(), Rgb([0x44, 0x55, 0x66]));
        assert_eq!(table.color_for_luminance(100.0).unwrap(), Rgb([0x44, 0x55, 0x66]));
    }

    #[test]
    fn luminance_over_every_threshold_is_an_error() {
        let err = default_table().color_for_luminance(150.0).unwrap_err();

        assert!(matches!(err, AppError::LuminanceOutOfRange { luminance, .. } if luminance == 150.0));
    }

    #[test]
    fn rejects_thresholds_outside_the_percent_range() {
        assert!(matches!(
            TierTable::parse("0,150", "000000,FFFFFF"),
            Err(AppError::InvalidThreshold(token)) if token == "150"
        ));
        assert!(matches!(
            TierTable::parse("-1,50", "000000,FFFFFF"),
            Err(AppError::InvalidThreshold(token)) if token == "-1"
        ));
    }

    #[test]
    fn rejects_non_numeric_thresholds() {
        assert!(matches!(
            TierTable::parse("0,abc", "000000,FFFFFF"),
            Err(AppError::InvalidThreshold(token)) if token == "abc"
        ));
    }

    #[test]
    fn rejects_invalid_color_tokens() {
        assert!(matches!(
            TierTable::parse("0,50", "000000,GGGGGG"),
            Err(AppError::InvalidColor(token)) if token == "GGGGGG"
        ));
    }

    #[test]
    fn rejects_mismatched_list_lengths() {
        assert!(matches!(
            TierTable::parse("0,50,75", "000000,FFFFFF"),
            Err(AppError::TierCountMismatch { thresholds: 3, colors: 2 })
        ));
    }
}
