use crate::models::{
    Action, ComplianceVerdict, EnergyStatus, FoodCategory, FoodFact, FoodFactTable, MenuSelection,
    Nutrient, NutrientTotals, Recommendation, Target, ThresholdRecord,
};

/// Per-100 g value of a nutrient for one food.
///
/// Animal protein is the protein value of animal-flagged foods only.
pub fn per_100g(fact: &FoodFact, nutrient: Nutrient) -> f64 {
    match nutrient {
        Nutrient::Energy => fact.energy_kcal,
        Nutrient::Protein => fact.protein_g,
        Nutrient::AnimalProtein if fact.is_animal_protein => fact.protein_g,
        Nutrient::AnimalProtein => 0.0,
        Nutrient::Carbohydrate => fact.carbohydrate_g,
        Nutrient::Fiber => fact.fiber_g,
    }
}

/// Minimum a nutrient must reach under a threshold record.
pub fn minimum(threshold: &ThresholdRecord, nutrient: Nutrient) -> f64 {
    match nutrient {
        Nutrient::Energy => threshold.min_energy_kcal,
        Nutrient::Protein => threshold.min_protein_g,
        Nutrient::AnimalProtein => threshold.min_animal_protein_g,
        Nutrient::Carbohydrate => threshold.min_carbohydrate_g,
        Nutrient::Fiber => threshold.min_fiber_g,
    }
}

fn selected_facts<'a>(selection: &MenuSelection, facts: &'a FoodFactTable) -> Vec<&'a FoodFact> {
    selection
        .lines()
        .iter()
        .filter_map(|line| facts.get(&line.food_name))
        .collect()
}

/// Mean per-100 g value of `nutrient` across selected foods in `category`.
///
/// For animal protein only animal-flagged foods count. Returns `None` when
/// no food qualifies or the mean is zero.
pub fn category_average(
    selection: &MenuSelection,
    facts: &FoodFactTable,
    nutrient: Nutrient,
    category: FoodCategory,
) -> Option<f64> {
    let values: Vec<f64> = selected_facts(selection, facts)
        .into_iter()
        .filter(|f| f.category == category)
        .filter(|f| nutrient != Nutrient::AnimalProtein || f.is_animal_protein)
        .map(|f| per_100g(f, nutrient))
        .collect();

    if values.is_empty() {
        return None;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    (mean > 0.0).then_some(mean)
}

/// Grams of an average category food needed to close a deficit.
pub fn grams_to_close(deficit: f64, average_per_100g: f64) -> u32 {
    (deficit / average_per_100g * 100.0).ceil().max(0.0) as u32
}

fn increase(nutrient: Nutrient, grams: Option<u32>) -> Recommendation {
    Recommendation {
        target: Target::Nutrient(nutrient),
        action: Action::Increase,
        category: Some(nutrient.source_category()),
        food_name: None,
        grams,
    }
}

/// Lines whose energy density is at or above the menu mean, densest first.
fn energy_dense_lines<'a>(selection: &'a MenuSelection, facts: &'a FoodFactTable) -> Vec<&'a FoodFact> {
    let mut eaten: Vec<&FoodFact> = selection
        .lines()
        .iter()
        .filter(|line| line.portion_grams > 0)
        .filter_map(|line| facts.get(&line.food_name))
        .collect();

    if eaten.is_empty() {
        return eaten;
    }

    let mean = eaten.iter().map(|f| f.energy_kcal).sum::<f64>() / eaten.len() as f64;
    eaten.retain(|f| f.energy_kcal >= mean);
    eaten.sort_by(|a, b| {
        b.energy_kcal
            .partial_cmp(&a.energy_kcal)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    eaten
}

/// Corrective suggestions for a failing verdict.
///
/// Returns an empty list when the menu is compliant. Never changes the menu.
pub fn recommend(
    totals: &NutrientTotals,
    threshold: &ThresholdRecord,
    verdict: &ComplianceVerdict,
    selection: &MenuSelection,
    facts: &FoodFactTable,
) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    for nutrient in verdict.failing_minimums() {
        let deficit = minimum(threshold, nutrient) - totals.get(nutrient);
        let grams = category_average(selection, facts, nutrient, nutrient.source_category())
            .map(|avg| grams_to_close(deficit, avg));
        recommendations.push(increase(nutrient, grams));
    }

    if verdict.energy == EnergyStatus::High {
        let dense = energy_dense_lines(selection, facts);
        if dense.is_empty() {
            recommendations.push(Recommendation {
                target: Target::Nutrient(Nutrient::Energy),
                action: Action::Decrease,
                category: None,
                food_name: None,
                grams: None,
            });
        }
        for fact in dense {
            recommendations.push(Recommendation {
                target: Target::Nutrient(Nutrient::Energy),
                action: Action::Decrease,
                category: Some(fact.category),
                food_name: Some(fact.name.clone()),
                grams: None,
            });
        }
    }

    for category in verdict.missing_categories() {
        recommendations.push(Recommendation {
            target: Target::Category(category),
            action: Action::Increase,
            category: Some(category),
            food_name: None,
            grams: None,
        });
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::evaluator::evaluate;

    fn fact(name: &str, category: FoodCategory, cal: f64, p: f64, c: f64, fib: f64, animal: bool) -> FoodFact {
        FoodFact {
            name: name.to_string(),
            category,
            energy_kcal: cal,
            protein_g: p,
            carbohydrate_g: c,
            fiber_g: fib,
            is_animal_protein: animal,
        }
    }

    fn facts() -> FoodFactTable {
        FoodFactTable::new(vec![
            fact("Nasi Putih", FoodCategory::Staple, 180.0, 3.0, 40.0, 0.3, false),
            fact("Ayam Goreng", FoodCategory::ProteinSource, 250.0, 20.0, 8.0, 0.0, true),
            fact("Tempe Goreng", FoodCategory::ProteinSource, 225.0, 14.0, 10.0, 1.4, false),
            fact("Sayur Sop", FoodCategory::Vegetable, 45.0, 1.8, 6.5, 2.0, false),
            fact("Apel", FoodCategory::Fruit, 58.0, 0.3, 14.9, 2.6, false),
        ])
    }

    fn threshold() -> ThresholdRecord {
        ThresholdRecord {
            group_id: "early-primary".into(),
            min_energy_kcal: 450.0,
            max_energy_kcal: Some(650.0),
            min_protein_g: 12.0,
            min_animal_protein_g: 6.0,
            min_fiber_g: 3.5,
            min_carbohydrate_g: 60.0,
            required_categories: FoodCategory::ALL.to_vec(),
        }
    }

    fn run(menu: &MenuSelection, totals: NutrientTotals) -> Vec<Recommendation> {
        let t = threshold();
        let verdict = evaluate(&totals, &t, menu, &facts());
        recommend(&totals, &t, &verdict, menu, &facts())
    }

    #[test]
    fn test_grams_to_close_rounds_up() {
        assert_eq!(grams_to_close(1.0, 2.0), 50);
        assert_eq!(grams_to_close(1.01, 2.0), 51);
    }

    #[test]
    fn test_fiber_delta_from_vegetable_average() {
        let menu = MenuSelection::from_pairs(&[
            ("Nasi Putih", 150),
            ("Ayam Goreng", 80),
            ("Sayur Sop", 50),
            ("Apel", 50),
        ]);
        let totals = NutrientTotals {
            energy_kcal: 500.0,
            protein_g: 20.0,
            animal_protein_g: 16.0,
            carbohydrate_g: 80.0,
            fiber_g: 2.5,
        };
        let recs = run(&menu, totals);

        // (3.5 - 2.5) / 2.0 * 100 = 50 g of vegetables
        assert_eq!(recs, vec![increase(Nutrient::Fiber, Some(50))]);
    }

    #[test]
    fn test_animal_protein_average_ignores_plant_protein() {
        let menu = MenuSelection::from_pairs(&[("Ayam Goreng", 10), ("Tempe Goreng", 100)]);
        let avg = category_average(&menu, &facts(), Nutrient::AnimalProtein, FoodCategory::ProteinSource);
        assert_eq!(avg, Some(20.0));

        let plant_only = MenuSelection::from_pairs(&[("Tempe Goreng", 100)]);
        let avg = category_average(&plant_only, &facts(), Nutrient::AnimalProtein, FoodCategory::ProteinSource);
        assert_eq!(avg, None);
    }

    #[test]
    fn test_qualitative_when_category_empty() {
        let menu = MenuSelection::from_pairs(&[("Nasi Putih", 300), ("Sayur Sop", 100), ("Apel", 100)]);
        let totals = NutrientTotals {
            energy_kcal: 640.0,
            protein_g: 11.0,
            animal_protein_g: 0.0,
            carbohydrate_g: 140.0,
            fiber_g: 5.5,
        };
        let recs = run(&menu, totals);

        assert!(recs.contains(&increase(Nutrient::Protein, None)));
        assert!(recs.contains(&increase(Nutrient::AnimalProtein, None)));
        assert!(recs.iter().any(|r| r.target == Target::Category(FoodCategory::ProteinSource)));
    }

    #[test]
    fn test_energy_high_reduces_dense_lines() {
        let menu = MenuSelection::from_pairs(&[
            ("Nasi Putih", 300),
            ("Ayam Goreng", 200),
            ("Sayur Sop", 100),
            ("Apel", 100),
        ]);
        let totals = NutrientTotals {
            energy_kcal: 1143.0,
            protein_g: 50.0,
            animal_protein_g: 40.0,
            carbohydrate_g: 160.0,
            fiber_g: 5.5,
        };
        let recs = run(&menu, totals);

        let reduced: Vec<&str> = recs
            .iter()
            .filter(|r| r.action == Action::Decrease)
            .filter_map(|r| r.food_name.as_deref())
            .collect();
        assert_eq!(reduced, vec!["Ayam Goreng", "Nasi Putih"]);
        assert!(recs.iter().all(|r| r.grams.is_none()));
    }

    #[test]
    fn test_compliant_menu_has_no_recommendations() {
        let menu = MenuSelection::from_pairs(&[
            ("Nasi Putih", 150),
            ("Ayam Goreng", 80),
            ("Sayur Sop", 100),
            ("Apel", 100),
        ]);
        let totals = NutrientTotals {
            energy_kcal: 600.0,
            protein_g: 25.0,
            animal_protein_g: 16.0,
            carbohydrate_g: 90.0,
            fiber_g: 4.0,
        };
        assert!(run(&menu, totals).is_empty());
    }
}
