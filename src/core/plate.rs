use crate::domain::model::LicensePlate;
use crate::utils::error::{ParkingError, Result};
use regex::Regex;
use std::sync::OnceLock;

fn plate_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Z0-9]{1,12}$").expect("plate regex is valid"))
}

pub struct PlateNormalizer;

impl PlateNormalizer {
    /// Strips dashes, underscores and whitespace, then uppercases.
    pub fn normalize(raw: &str) -> String {
        raw.chars()
            .filter(|c| *c != '-' && *c != '_' && !c.is_whitespace())
            .flat_map(char::to_uppercase)
            .collect()
    }

    /// `^[A-Z0-9]{1,12}$`
    pub fn is_valid(normalized: &str) -> bool {
        plate_pattern().is_match(normalized)
    }

    pub fn validate(raw: &str) -> Result<LicensePlate> {
        let normalized = Self::normalize(raw);
        if !Self::is_valid(&normalized) {
            tracing::debug!("License plate '{}' rejected (normalized '{}')", raw, normalized);
            return Err(ParkingError::InvalidPlate {
                value: raw.to_string(),
            });
        }
        tracing::debug!("License plate '{}' normalized to '{}'", raw, normalized);
        Ok(LicensePlate::from_normalized(normalized))
    }
}
