use std::fmt;

use serde::Serialize;

use crate::error::Warning;
use crate::models::food::FoodCategory;
use crate::models::standard::StandardGroupId;

/// Nutrients checked against a standard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Nutrient {
    Energy,
    Protein,
    AnimalProtein,
    Carbohydrate,
    Fiber,
}

impl Nutrient {
    pub fn unit(&self) -> &'static str {
        match self {
            Nutrient::Energy => "kcal",
            _ => "g",
        }
    }

    /// Category whose foods are the natural source for this nutrient.
    pub fn source_category(&self) -> FoodCategory {
        match self {
            Nutrient::Energy | Nutrient::Carbohydrate => FoodCategory::Staple,
            Nutrient::Protein | Nutrient::AnimalProtein => FoodCategory::ProteinSource,
            Nutrient::Fiber => FoodCategory::Vegetable,
        }
    }
}

impl fmt::Display for Nutrient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Nutrient::Energy => "energy",
            Nutrient::Protein => "protein",
            Nutrient::AnimalProtein => "animal protein",
            Nutrient::Carbohydrate => "carbohydrate",
            Nutrient::Fiber => "fiber",
        };
        f.write_str(s)
    }
}

/// Aggregated nutrients for a menu.
///
/// `animal_protein_g` is the share of `protein_g` from animal sources.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct NutrientTotals {
    pub energy_kcal: f64,
    pub protein_g: f64,
    pub animal_protein_g: f64,
    pub carbohydrate_g: f64,
    pub fiber_g: f64,
}

impl NutrientTotals {
    pub fn get(&self, nutrient: Nutrient) -> f64 {
        match nutrient {
            Nutrient::Energy => self.energy_kcal,
            Nutrient::Protein => self.protein_g,
            Nutrient::AnimalProtein => self.animal_protein_g,
            Nutrient::Carbohydrate => self.carbohydrate_g,
            Nutrient::Fiber => self.fiber_g,
        }
    }
}

/// Energy verdict: below, within or above the band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EnergyStatus {
    Low,
    Ok,
    High,
}

impl fmt::Display for EnergyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EnergyStatus::Low => "LOW",
            EnergyStatus::Ok => "OK",
            EnergyStatus::High => "HIGH",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryCheck {
    pub category: FoodCategory,
    pub present: bool,
}

/// Per-nutrient and overall compliance of a menu.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplianceVerdict {
    pub energy: EnergyStatus,
    pub protein_ok: bool,
    pub animal_protein_ok: bool,
    pub carbohydrate_ok: bool,
    pub fiber_ok: bool,
    /// One entry per required category, empty when none are required.
    pub coverage: Vec<CategoryCheck>,
    pub compliant: bool,
}

impl ComplianceVerdict {
    /// Minimum-threshold nutrients that fell short.
    pub fn failing_minimums(&self) -> Vec<Nutrient> {
        let mut failing = Vec::new();
        if self.energy == EnergyStatus::Low {
            failing.push(Nutrient::Energy);
        }
        if !self.protein_ok {
            failing.push(Nutrient::Protein);
        }
        if !self.animal_protein_ok {
            failing.push(Nutrient::AnimalProtein);
        }
        if !self.carbohydrate_ok {
            failing.push(Nutrient::Carbohydrate);
        }
        if !self.fiber_ok {
            failing.push(Nutrient::Fiber);
        }
        failing
    }

    pub fn missing_categories(&self) -> Vec<FoodCategory> {
        self.coverage
            .iter()
            .filter(|c| !c.present)
            .map(|c| c.category)
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Increase,
    Decrease,
}

/// What a recommendation is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "value")]
pub enum Target {
    Nutrient(Nutrient),
    Category(FoodCategory),
}

/// Advisory adjustment towards compliance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub target: Target,
    pub action: Action,
    /// Category the adjustment applies to.
    pub category: Option<FoodCategory>,
    /// Specific menu line to adjust, if any.
    pub food_name: Option<String>,
    /// Suggested change in grams, when computable.
    pub grams: Option<u32>,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.target, self.action) {
            (Target::Category(category), _) => {
                write!(f, "Add a {} item ({})", category, category.label())
            }
            (Target::Nutrient(nutrient), Action::Decrease) => match &self.food_name {
                Some(food) => write!(f, "Reduce the portion of {} to lower {}", food, nutrient),
                None => write!(f, "Reduce high-{} items", nutrient),
            },
            (Target::Nutrient(nutrient), Action::Increase) => {
                let category = self.category.unwrap_or(nutrient.source_category());
                match self.grams {
                    Some(grams) => write!(
                        f,
                        "Add about {} g of {} foods to raise {}",
                        grams, category, nutrient
                    ),
                    None => write!(f, "Add a source of {} ({})", nutrient, category),
                }
            }
        }
    }
}

/// Everything the presentation layer needs from one evaluation.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationResult {
    pub group_id: StandardGroupId,
    pub totals: NutrientTotals,
    pub verdict: ComplianceVerdict,
    /// Empty when no adjustment is needed.
    pub recommendations: Vec<Recommendation>,
    pub warnings: Vec<Warning>,
    /// Version of the menu that was evaluated.
    pub menu_version: u64,
}

impl EvaluationResult {
    pub fn is_compliant(&self) -> bool {
        self.verdict.compliant
    }
}
