use tracing::{debug, warn};

use crate::error::Warning;
use crate::models::{FoodFact, FoodFactTable, MenuSelection, NutrientTotals};

/// Totals for a menu plus the lines that could not be counted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregation {
    pub totals: NutrientTotals,
    pub warnings: Vec<Warning>,
}

/// Nutrient contribution of one food at a portion.
pub fn contribution(fact: &FoodFact, portion_grams: u32) -> NutrientTotals {
    let factor = FoodFact::portion_factor(portion_grams);
    let protein = fact.protein_g * factor;
    NutrientTotals {
        energy_kcal: fact.energy_kcal * factor,
        protein_g: protein,
        animal_protein_g: if fact.is_animal_protein { protein } else { 0.0 },
        carbohydrate_g: fact.carbohydrate_g * factor,
        fiber_g: fact.fiber_g * factor,
    }
}

/// Sum nutrient contributions of every menu line.
///
/// Lines are matched to facts by exact (case-insensitive) name. A line with
/// no fact is left out of the totals and reported as a lookup warning.
pub fn aggregate(selection: &MenuSelection, facts: &FoodFactTable) -> Aggregation {
    let mut totals = NutrientTotals::default();
    let mut warnings = Vec::new();

    for line in selection.lines() {
        let Some(fact) = facts.get(&line.food_name) else {
            let warning = Warning::Lookup {
                food: line.food_name.clone(),
            };
            warn!("{}", warning);
            warnings.push(warning);
            continue;
        };

        let part = contribution(fact, line.portion_grams);
        totals.energy_kcal += part.energy_kcal;
        totals.protein_g += part.protein_g;
        totals.animal_protein_g += part.animal_protein_g;
        totals.carbohydrate_g += part.carbohydrate_g;
        totals.fiber_g += part.fiber_g;
    }

    debug!(
        lines = selection.len(),
        skipped = warnings.len(),
        energy = totals.energy_kcal,
        "aggregated menu"
    );

    Aggregation { totals, warnings }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FoodCategory;

    fn sample_fact(name: &str, cal: f64, p: f64, c: f64, fib: f64, animal: bool) -> FoodFact {
        FoodFact {
            name: name.to_string(),
            category: FoodCategory::Staple,
            energy_kcal: cal,
            protein_g: p,
            carbohydrate_g: c,
            fiber_g: fib,
            is_animal_protein: animal,
        }
    }

    fn table() -> FoodFactTable {
        FoodFactTable::new(vec![
            sample_fact("Rice", 180.0, 4.0, 40.0, 1.0, false),
            sample_fact("Fried Chicken", 250.0, 20.0, 0.0, 0.0, true),
        ])
    }

    #[test]
    fn test_contribution_scales_per_100g() {
        let fact = sample_fact("Rice", 180.0, 4.0, 40.0, 1.0, false);
        let part = contribution(&fact, 50);
        assert!((part.energy_kcal - 90.0).abs() < 1e-9);
        assert!((part.carbohydrate_g - 20.0).abs() < 1e-9);
        assert_eq!(part.animal_protein_g, 0.0);
    }

    #[test]
    fn test_animal_protein_is_subset() {
        let menu = MenuSelection::from_pairs(&[("rice", 100), ("FRIED CHICKEN", 100)]);
        let result = aggregate(&menu, &table());
        assert!((result.totals.protein_g - 24.0).abs() < 1e-9);
        assert!((result.totals.animal_protein_g - 20.0).abs() < 1e-9);
        assert!(result.totals.animal_protein_g <= result.totals.protein_g);
    }

    #[test]
    fn test_missing_food_skipped_with_warning() {
        let menu = MenuSelection::from_pairs(&[("Rice", 100), ("Dragon Fruit", 100)]);
        let result = aggregate(&menu, &table());
        assert!((result.totals.energy_kcal - 180.0).abs() < 1e-9);
        assert_eq!(
            result.warnings,
            vec![Warning::Lookup {
                food: "Dragon Fruit".to_string()
            }]
        );
    }

    #[test]
    fn test_substring_not_matched() {
        let menu = MenuSelection::from_pairs(&[("Chicken", 100)]);
        let result = aggregate(&menu, &table());
        assert_eq!(result.totals, NutrientTotals::default());
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_empty_selection() {
        let result = aggregate(&MenuSelection::new(), &table());
        assert_eq!(result, Aggregation::default());
    }
}
