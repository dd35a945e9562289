use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MbgError;

/// The four menu categories a school meal is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FoodCategory {
    Staple,
    ProteinSource,
    Vegetable,
    Fruit,
}

impl FoodCategory {
    /// All categories in menu order.
    pub const ALL: [FoodCategory; 4] = [
        FoodCategory::Staple,
        FoodCategory::ProteinSource,
        FoodCategory::Vegetable,
        FoodCategory::Fruit,
    ];

    /// Canonical key used in reference tables.
    pub fn key(&self) -> &'static str {
        match self {
            FoodCategory::Staple => "staple",
            FoodCategory::ProteinSource => "protein-source",
            FoodCategory::Vegetable => "vegetable",
            FoodCategory::Fruit => "fruit",
        }
    }

    /// Label shown on the menu form.
    pub fn label(&self) -> &'static str {
        match self {
            FoodCategory::Staple => "Makanan Pokok",
            FoodCategory::ProteinSource => "Lauk Pauk",
            FoodCategory::Vegetable => "Sayuran",
            FoodCategory::Fruit => "Buah",
        }
    }
}

impl fmt::Display for FoodCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FoodCategory {
    type Err = MbgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "staple" | "makanan pokok" => Ok(FoodCategory::Staple),
            "protein-source" | "protein source" | "protein" | "lauk pauk" | "lauk" => {
                Ok(FoodCategory::ProteinSource)
            }
            "vegetable" | "sayuran" | "sayur" => Ok(FoodCategory::Vegetable),
            "fruit" | "buah" => Ok(FoodCategory::Fruit),
            other => Err(MbgError::Config(format!("unknown food category '{}'", other))),
        }
    }
}

/// Nutrient facts for one food, per 100 g.
#[derive(Debug, Clone, Serialize)]
pub struct FoodFact {
    pub name: String,
    pub category: FoodCategory,
    pub energy_kcal: f64,
    pub protein_g: f64,
    pub carbohydrate_g: f64,
    pub fiber_g: f64,
    pub is_animal_protein: bool,
}

impl FoodFact {
    /// Canonical key for lookups (lowercase, trimmed name).
    pub fn key(&self) -> String {
        normalize_key(&self.name)
    }

    /// Factor applied to per-100 g values for a portion.
    #[inline]
    pub fn portion_factor(portion_grams: u32) -> f64 {
        portion_grams as f64 / 100.0
    }
}

impl PartialEq for FoodFact {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for FoodFact {}

impl std::hash::Hash for FoodFact {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

/// Lowercase, trimmed form of a food name.
pub fn normalize_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Food facts keyed by lowercase name.
#[derive(Debug, Clone, Default)]
pub struct FoodFactTable {
    facts: HashMap<String, FoodFact>,
}

impl FoodFactTable {
    pub fn new(facts: Vec<FoodFact>) -> Self {
        let mut map = HashMap::new();
        for fact in facts {
            map.insert(fact.key(), fact);
        }
        Self { facts: map }
    }

    /// Exact lookup by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&FoodFact> {
        self.facts.get(&normalize_key(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Facts in one category, sorted by name.
    pub fn in_category(&self, category: FoodCategory) -> Vec<&FoodFact> {
        let mut foods: Vec<&FoodFact> = self
            .facts
            .values()
            .filter(|f| f.category == category)
            .collect();
        foods.sort_by(|a, b| a.name.cmp(&b.name));
        foods
    }

    pub fn all(&self) -> Vec<&FoodFact> {
        let mut foods: Vec<&FoodFact> = self.facts.values().collect();
        foods.sort_by(|a, b| a.category.cmp(&b.category).then(a.name.cmp(&b.name)));
        foods
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}
