use std::fmt;

use serde::Serialize;

use crate::models::food::FoodCategory;
use crate::models::recipient::Gender;

/// Canonical identifier of a standard group, e.g. `early-primary` or `middle_F`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StandardGroupId(String);

impl StandardGroupId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Gender encoded in the id suffix, if any.
    pub fn gender(&self) -> Option<Gender> {
        if self.0.ends_with("_M") {
            Some(Gender::Male)
        } else if self.0.ends_with("_F") {
            Some(Gender::Female)
        } else {
            None
        }
    }

    pub fn is_gendered(&self) -> bool {
        self.gender().is_some()
    }
}

impl fmt::Display for StandardGroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StandardGroupId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Nutrient thresholds and category coverage for one standard group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThresholdRecord {
    pub group_id: StandardGroupId,
    pub min_energy_kcal: f64,
    /// `None` means no upper energy bound.
    pub max_energy_kcal: Option<f64>,
    pub min_protein_g: f64,
    pub min_animal_protein_g: f64,
    pub min_fiber_g: f64,
    pub min_carbohydrate_g: f64,
    pub required_categories: Vec<FoodCategory>,
}

impl ThresholdRecord {
    /// Whether the energy band is well formed (min <= max).
    pub fn has_valid_energy_band(&self) -> bool {
        self.max_energy_kcal
            .map(|max| self.min_energy_kcal <= max)
            .unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_gender_suffix() {
        assert_eq!(StandardGroupId::from("middle_M").gender(), Some(Gender::Male));
        assert_eq!(StandardGroupId::from("secondary_F").gender(), Some(Gender::Female));
        assert!(!StandardGroupId::from("early-primary").is_gendered());
    }

    #[test]
    fn test_energy_band_validity() {
        let mut record = ThresholdRecord {
            group_id: "early-primary".into(),
            min_energy_kcal: 450.0,
            max_energy_kcal: Some(650.0),
            min_protein_g: 12.0,
            min_animal_protein_g: 6.0,
            min_fiber_g: 3.5,
            min_carbohydrate_g: 60.0,
            required_categories: vec![FoodCategory::Fruit],
        };
        assert!(record.has_valid_energy_band());

        record.max_energy_kcal = Some(400.0);
        assert!(!record.has_valid_energy_band());

        record.max_energy_kcal = None;
        assert!(record.has_valid_energy_band());
    }
}
