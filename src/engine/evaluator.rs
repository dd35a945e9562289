use crate::models::{
    CategoryCheck, ComplianceVerdict, EnergyStatus, FoodCategory, FoodFactTable, MenuSelection,
    NutrientTotals, ThresholdRecord,
};

/// Three-valued energy verdict. Values on a bound are `Ok`.
pub fn energy_status(energy_kcal: f64, threshold: &ThresholdRecord) -> EnergyStatus {
    if energy_kcal < threshold.min_energy_kcal {
        EnergyStatus::Low
    } else if threshold.max_energy_kcal.is_some_and(|max| energy_kcal > max) {
        EnergyStatus::High
    } else {
        EnergyStatus::Ok
    }
}

/// Whether some line with a positive portion belongs to `category`.
pub fn has_category(selection: &MenuSelection, facts: &FoodFactTable, category: FoodCategory) -> bool {
    selection.lines().iter().any(|line| {
        line.portion_grams > 0
            && facts
                .get(&line.food_name)
                .is_some_and(|fact| fact.category == category)
    })
}

/// Compare totals against a threshold record.
///
/// Overall compliance requires energy within the band, every minimum met
/// and every required category present.
pub fn evaluate(
    totals: &NutrientTotals,
    threshold: &ThresholdRecord,
    selection: &MenuSelection,
    facts: &FoodFactTable,
) -> ComplianceVerdict {
    let energy = energy_status(totals.energy_kcal, threshold);
    let protein_ok = totals.protein_g >= threshold.min_protein_g;
    let animal_protein_ok = totals.animal_protein_g >= threshold.min_animal_protein_g;
    let carbohydrate_ok = totals.carbohydrate_g >= threshold.min_carbohydrate_g;
    let fiber_ok = totals.fiber_g >= threshold.min_fiber_g;

    let coverage: Vec<CategoryCheck> = threshold
        .required_categories
        .iter()
        .map(|&category| CategoryCheck {
            category,
            present: has_category(selection, facts, category),
        })
        .collect();

    let compliant = energy == EnergyStatus::Ok
        && protein_ok
        && animal_protein_ok
        && carbohydrate_ok
        && fiber_ok
        && coverage.iter().all(|c| c.present);

    ComplianceVerdict {
        energy,
        protein_ok,
        animal_protein_ok,
        carbohydrate_ok,
        fiber_ok,
        coverage,
        compliant,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FoodFact;

    fn threshold() -> ThresholdRecord {
        ThresholdRecord {
            group_id: "early-primary".into(),
            min_energy_kcal: 450.0,
            max_energy_kcal: Some(650.0),
            min_protein_g: 12.0,
            min_animal_protein_g: 6.0,
            min_fiber_g: 3.5,
            min_carbohydrate_g: 60.0,
            required_categories: vec![FoodCategory::Staple, FoodCategory::Fruit],
        }
    }

    fn fact(name: &str, category: FoodCategory) -> FoodFact {
        FoodFact {
            name: name.to_string(),
            category,
            energy_kcal: 100.0,
            protein_g: 1.0,
            carbohydrate_g: 10.0,
            fiber_g: 1.0,
            is_animal_protein: false,
        }
    }

    fn passing_totals() -> NutrientTotals {
        NutrientTotals {
            energy_kcal: 500.0,
            protein_g: 20.0,
            animal_protein_g: 10.0,
            carbohydrate_g: 70.0,
            fiber_g: 4.0,
        }
    }

    #[test]
    fn test_energy_bounds_are_inclusive() {
        let t = threshold();
        assert_eq!(energy_status(450.0, &t), EnergyStatus::Ok);
        assert_eq!(energy_status(650.0, &t), EnergyStatus::Ok);
        assert_eq!(energy_status(449.9, &t), EnergyStatus::Low);
        assert_eq!(energy_status(650.1, &t), EnergyStatus::High);
    }

    #[test]
    fn test_no_upper_bound() {
        let mut t = threshold();
        t.max_energy_kcal = None;
        assert_eq!(energy_status(10_000.0, &t), EnergyStatus::Ok);
    }

    #[test]
    fn test_minimum_equal_passes() {
        let totals = NutrientTotals {
            protein_g: 12.0,
            animal_protein_g: 6.0,
            fiber_g: 3.5,
            carbohydrate_g: 60.0,
            energy_kcal: 450.0,
        };
        let facts = FoodFactTable::new(vec![
            fact("Nasi", FoodCategory::Staple),
            fact("Apel", FoodCategory::Fruit),
        ]);
        let menu = MenuSelection::from_pairs(&[("Nasi", 100), ("Apel", 100)]);
        let verdict = evaluate(&totals, &threshold(), &menu, &facts);
        assert!(verdict.compliant);
    }

    #[test]
    fn test_missing_category_fails_overall() {
        let facts = FoodFactTable::new(vec![fact("Nasi", FoodCategory::Staple)]);
        let menu = MenuSelection::from_pairs(&[("Nasi", 100)]);
        let verdict = evaluate(&passing_totals(), &threshold(), &menu, &facts);

        assert_eq!(verdict.energy, EnergyStatus::Ok);
        assert!(verdict.protein_ok && verdict.fiber_ok);
        assert_eq!(verdict.missing_categories(), vec![FoodCategory::Fruit]);
        assert!(!verdict.compliant);
    }

    #[test]
    fn test_zero_portion_does_not_cover_category() {
        let facts = FoodFactTable::new(vec![fact("Apel", FoodCategory::Fruit)]);
        let menu = MenuSelection::from_pairs(&[("Apel", 0)]);
        assert!(!has_category(&menu, &facts, FoodCategory::Fruit));
    }

    #[test]
    fn test_no_required_categories() {
        let mut t = threshold();
        t.required_categories.clear();
        let verdict = evaluate(&passing_totals(), &t, &MenuSelection::new(), &FoodFactTable::default());
        assert!(verdict.coverage.is_empty());
        assert!(verdict.compliant);
    }
}
