use crate::models::{
    EnergyStatus, EvaluationResult, FoodCategory, FoodFact, MenuSelection, Nutrient, ThresholdRecord,
};
use crate::reference::ReferenceData;
use crate::session::Logbook;

fn mark(ok: bool) -> &'static str {
    if ok { "OK" } else { "LOW" }
}

/// Display the current menu lines.
pub fn display_menu(menu: &MenuSelection) {
    if menu.is_empty() {
        println!("Menu: (empty)");
        return;
    }

    let max_name_len = menu.lines().iter().map(|l| l.food_name.len()).max().unwrap_or(10);

    println!();
    println!("=== Menu ({} items) ===", menu.len());
    for (i, line) in menu.lines().iter().enumerate() {
        println!(
            "{:>3}. {:<width$}  {:>4} g",
            i + 1,
            line.food_name,
            line.portion_grams,
            width = max_name_len
        );
    }
    println!();
}

/// Display an evaluation result against its threshold record.
pub fn display_evaluation(result: &EvaluationResult, threshold: Option<&ThresholdRecord>) {
    let totals = &result.totals;

    println!();
    println!("=== Nutrition Report ({}) ===", result.group_id);
    println!();

    let energy_band = threshold
        .map(|t| match t.max_energy_kcal {
            Some(max) => format!("{:.0}-{:.0}", t.min_energy_kcal, max),
            None => format!(">= {:.0}", t.min_energy_kcal),
        })
        .unwrap_or_default();
    println!(
        "  {:<15} {:>8.1} kcal  [{}]  {}",
        "Energy", totals.energy_kcal, energy_band, result.verdict.energy
    );

    let rows = [
        (Nutrient::Protein, result.verdict.protein_ok, threshold.map(|t| t.min_protein_g)),
        (
            Nutrient::AnimalProtein,
            result.verdict.animal_protein_ok,
            threshold.map(|t| t.min_animal_protein_g),
        ),
        (
            Nutrient::Carbohydrate,
            result.verdict.carbohydrate_ok,
            threshold.map(|t| t.min_carbohydrate_g),
        ),
        (Nutrient::Fiber, result.verdict.fiber_ok, threshold.map(|t| t.min_fiber_g)),
    ];
    for (nutrient, ok, min) in rows {
        let min = min.map(|m| format!(">= {:.1}", m)).unwrap_or_default();
        let name = nutrient.to_string();
        println!(
            "  {:<15} {:>8.1} {:<4}  [{}]  {}",
            capitalize(&name),
            totals.get(nutrient),
            nutrient.unit(),
            min,
            mark(ok)
        );
    }

    if !result.verdict.coverage.is_empty() {
        println!();
        println!("--- Category coverage ---");
        for check in &result.verdict.coverage {
            println!(
                "  {:<15} {}",
                check.category.label(),
                if check.present { "present" } else { "MISSING" }
            );
        }
    }

    println!();
    if result.is_compliant() {
        println!("Menu meets the MBG standard.");
    } else if result.verdict.energy == EnergyStatus::Low {
        println!("Menu does not meet the MBG standard: energy is not sufficient.");
    } else {
        println!("Menu does not meet the MBG standard.");
    }

    if !result.recommendations.is_empty() {
        println!();
        println!("--- Recommendations ---");
        for rec in &result.recommendations {
            println!("  - {}", rec);
        }
    }

    if !result.warnings.is_empty() {
        println!();
        println!("--- Warnings ---");
        for warning in &result.warnings {
            println!("  ! {}", warning);
        }
    }
    println!();
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// One line of the food list: per-100 g protein, carbohydrate and fiber.
fn food_row(food: &FoodFact) -> String {
    format!(
        "  {:<16} {:>5.0} kcal  P:{:<5.1} C:{:<5.1} Fib:{:<4.1}{}",
        food.name,
        food.energy_kcal,
        food.protein_g,
        food.carbohydrate_g,
        food.fiber_g,
        if food.is_animal_protein { "  [animal]" } else { "" }
    )
}

/// Display all foods grouped by category.
pub fn display_food_list(data: &ReferenceData) {
    for category in FoodCategory::ALL {
        let foods = data.foods().in_category(category);
        println!();
        println!("=== {} ({} items) ===", category.label(), foods.len());
        for food in foods {
            println!("{}", food_row(food));
        }
    }
    println!();
}

/// Display every standard group with its thresholds.
pub fn display_standards(data: &ReferenceData) {
    println!();
    println!("=== Standard groups ===");
    println!();
    for record in data.standards() {
        let max = record
            .max_energy_kcal
            .map(|m| format!("{:.0}", m))
            .unwrap_or_else(|| "-".to_string());
        let required: Vec<&str> = record.required_categories.iter().map(|c| c.key()).collect();
        println!(
            "  {:<14} energy {:>4.0}-{:<5} protein >= {:<4.1} animal >= {:<4.1} carb >= {:<5.1} fiber >= {:<4.1} {}",
            record.group_id,
            record.min_energy_kcal,
            max,
            record.min_protein_g,
            record.min_animal_protein_g,
            record.min_carbohydrate_g,
            record.min_fiber_g,
            required.join(", ")
        );
    }
    println!();
}

/// Display the session logbook.
pub fn display_logbook(logbook: &Logbook) {
    if logbook.is_empty() {
        println!("Logbook: (no compliant menus yet)");
        return;
    }

    println!();
    println!("=== Logbook ===");
    for entry in logbook.entries() {
        println!(
            "{:>3}. {} | main: {} | {} | {} kcal | {}",
            entry.id,
            entry.menu_name,
            entry.main_ingredient,
            entry.group_id,
            entry.energy_kcal,
            entry.status
        );
    }
    println!();
}
