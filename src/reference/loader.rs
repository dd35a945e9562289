use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::error::{MbgError, Result, Warning};
use crate::models::{
    normalize_key, ClassLabel, EducationLevel, FoodCategory, FoodFact, Gender, StandardGroupId,
    ThresholdRecord,
};
use crate::reference::tables::{AgeBand, EducationGroup, ReferenceData};

pub const FOOD_NUTRITION_FILE: &str = "food_nutrition.csv";
pub const FOOD_CATEGORY_FILE: &str = "food_category.csv";
pub const PROTEIN_SOURCE_FILE: &str = "protein_source.csv";
pub const AGE_GROUP_FILE: &str = "age_group.csv";
pub const EDUCATION_LEVEL_FILE: &str = "education_level.csv";
pub const CLASS_GROUP_FILE: &str = "class_group.csv";
pub const STANDARDS_FILE: &str = "standards.csv";

/// Raw CSV text of every reference table.
#[derive(Debug, Clone, Copy)]
pub struct TableSources<'a> {
    pub food_nutrition: &'a str,
    pub food_category: &'a str,
    pub protein_source: &'a str,
    pub age_group: &'a str,
    pub education_level: &'a str,
    pub class_group: &'a str,
    pub standards: &'a str,
}

#[derive(Debug, Deserialize)]
struct NutrientRow {
    name: String,
    energy_kcal: String,
    protein_g: String,
    carbohydrate_g: String,
    fiber_g: String,
}

#[derive(Debug, Deserialize)]
struct CategoryRow {
    name: String,
    category: String,
}

#[derive(Debug, Deserialize)]
struct ProteinSourceRow {
    name: String,
    is_animal: String,
}

#[derive(Debug, Deserialize)]
struct AgeRow {
    age_min: u8,
    age_max: u8,
    education_level: String,
    grade: u8,
    default_gender: String,
}

#[derive(Debug, Deserialize)]
struct EducationRow {
    level: String,
    class_min: u8,
    class_max: u8,
    group_id: String,
}

#[derive(Debug, Deserialize)]
struct ClassGroupRow {
    class_label: String,
    group_id: String,
}

#[derive(Debug, Deserialize)]
struct StandardRow {
    group_id: String,
    min_energy_kcal: String,
    max_energy_kcal: String,
    min_protein_g: String,
    min_animal_protein_g: String,
    min_fiber_g: String,
    min_carbohydrate_g: String,
    #[serde(default)]
    required_categories: String,
}

/// Parse a reference number, accepting a comma decimal separator.
///
/// Returns `None` for anything that is not a finite, non-negative number.
pub fn coerce_number(raw: &str) -> Option<f64> {
    let value: f64 = raw.trim().replace(',', ".").parse().ok()?;
    (value.is_finite() && value >= 0.0).then_some(value)
}

/// Parse a yes/no style flag.
pub fn coerce_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" | "ya" => Some(true),
        "false" | "0" | "no" | "n" | "tidak" | "" => Some(false),
        _ => None,
    }
}

/// Collects parse warnings while reading one table.
struct CellReader<'w> {
    table: &'static str,
    warnings: &'w mut Vec<Warning>,
}

impl CellReader<'_> {
    fn number(&mut self, row: usize, column: &str, raw: &str) -> f64 {
        coerce_number(raw).unwrap_or_else(|| {
            self.warn(row, column, raw);
            0.0
        })
    }

    /// An optional bound: empty means none, and an unreadable value is
    /// dropped with a warning instead of becoming 0.
    fn bound(&mut self, row: usize, column: &str, raw: &str) -> Option<f64> {
        if raw.trim().is_empty() {
            return None;
        }
        let value = coerce_number(raw);
        if value.is_none() {
            self.warn(row, column, raw);
        }
        value
    }

    fn flag(&mut self, row: usize, column: &str, raw: &str) -> bool {
        coerce_flag(raw).unwrap_or_else(|| {
            self.warn(row, column, raw);
            false
        })
    }

    fn warn(&mut self, row: usize, column: &str, raw: &str) {
        let warning = Warning::Parse {
            table: self.table.to_string(),
            row,
            column: column.to_string(),
            raw: raw.to_string(),
        };
        warn!("{}", warning);
        self.warnings.push(warning);
    }
}

fn read_rows<T: DeserializeOwned>(text: &str) -> Result<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.deserialize() {
        rows.push(record?);
    }
    Ok(rows)
}

/// Parse every table and join the three food tables into food facts.
pub fn parse_tables(sources: &TableSources<'_>) -> Result<ReferenceData> {
    let mut warnings = Vec::new();

    let categories: Vec<CategoryRow> = read_rows(sources.food_category)?;
    let mut category_by_name: HashMap<String, FoodCategory> = HashMap::new();
    let mut category_order = Vec::with_capacity(categories.len());
    for row in &categories {
        let category: FoodCategory = row.category.parse()?;
        category_by_name.insert(normalize_key(&row.name), category);
        category_order.push(row.name.clone());
    }

    let mut animal_by_name: HashMap<String, bool> = HashMap::new();
    {
        let mut cells = CellReader {
            table: PROTEIN_SOURCE_FILE,
            warnings: &mut warnings,
        };
        let rows: Vec<ProteinSourceRow> = read_rows(sources.protein_source)?;
        for (i, row) in rows.iter().enumerate() {
            let flag = cells.flag(i + 1, "is_animal", &row.is_animal);
            animal_by_name.insert(normalize_key(&row.name), flag);
        }
    }

    let mut facts = Vec::new();
    {
        let mut cells = CellReader {
            table: FOOD_NUTRITION_FILE,
            warnings: &mut warnings,
        };
        let rows: Vec<NutrientRow> = read_rows(sources.food_nutrition)?;
        for (i, row) in rows.iter().enumerate() {
            let n = i + 1;
            let key = normalize_key(&row.name);
            let category = *category_by_name.get(&key).ok_or_else(|| {
                MbgError::Config(format!("food '{}' has no category", row.name))
            })?;
            facts.push(FoodFact {
                name: row.name.clone(),
                category,
                energy_kcal: cells.number(n, "energy_kcal", &row.energy_kcal),
                protein_g: cells.number(n, "protein_g", &row.protein_g),
                carbohydrate_g: cells.number(n, "carbohydrate_g", &row.carbohydrate_g),
                fiber_g: cells.number(n, "fiber_g", &row.fiber_g),
                is_animal_protein: animal_by_name.get(&key).copied().unwrap_or(false),
            });
        }
    }

    let age_rows: Vec<AgeRow> = read_rows(sources.age_group)?;
    let mut age_bands = Vec::with_capacity(age_rows.len());
    for row in age_rows {
        if row.age_min > row.age_max {
            return Err(MbgError::Config(format!(
                "age band {}-{} is inverted",
                row.age_min, row.age_max
            )));
        }
        age_bands.push(AgeBand {
            age_min: row.age_min,
            age_max: row.age_max,
            level: row.education_level.parse()?,
            grade: row.grade,
            default_gender: row.default_gender.parse::<Gender>().map_err(|_| {
                MbgError::Config(format!("bad default gender '{}'", row.default_gender))
            })?,
        });
    }

    let education_rows: Vec<EducationRow> = read_rows(sources.education_level)?;
    let mut education_groups = Vec::with_capacity(education_rows.len());
    for row in education_rows {
        education_groups.push(EducationGroup {
            level: row.level.parse::<EducationLevel>()?,
            class_min: row.class_min,
            class_max: row.class_max,
            group_id: StandardGroupId::new(row.group_id),
        });
    }

    let class_rows: Vec<ClassGroupRow> = read_rows(sources.class_group)?;
    let mut class_groups = Vec::with_capacity(class_rows.len());
    for row in class_rows {
        let class: ClassLabel = row
            .class_label
            .parse()
            .map_err(|_| MbgError::Config(format!("bad class label '{}'", row.class_label)))?;
        class_groups.push((class, StandardGroupId::new(row.group_id)));
    }

    let mut standards = Vec::new();
    {
        let mut cells = CellReader {
            table: STANDARDS_FILE,
            warnings: &mut warnings,
        };
        let rows: Vec<StandardRow> = read_rows(sources.standards)?;
        for (i, row) in rows.iter().enumerate() {
            let n = i + 1;
            let max_energy_kcal = cells.bound(n, "max_energy_kcal", &row.max_energy_kcal);
            let required_categories = row
                .required_categories
                .split(';')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::parse::<FoodCategory>)
                .collect::<Result<Vec<_>>>()?;

            standards.push(ThresholdRecord {
                group_id: StandardGroupId::new(row.group_id.as_str()),
                min_energy_kcal: cells.number(n, "min_energy_kcal", &row.min_energy_kcal),
                max_energy_kcal,
                min_protein_g: cells.number(n, "min_protein_g", &row.min_protein_g),
                min_animal_protein_g: cells.number(n, "min_animal_protein_g", &row.min_animal_protein_g),
                min_fiber_g: cells.number(n, "min_fiber_g", &row.min_fiber_g),
                min_carbohydrate_g: cells.number(n, "min_carbohydrate_g", &row.min_carbohydrate_g),
                required_categories,
            });
        }
    }

    let data = ReferenceData::new(facts, age_bands, education_groups, class_groups, standards)?
        .with_category_order(category_order)
        .with_warnings(warnings);

    info!(
        foods = data.foods().len(),
        standards = data.standards().len(),
        warnings = data.load_warnings().len(),
        "reference tables loaded"
    );

    Ok(data)
}

/// Load all reference tables from CSV files in a directory.
pub fn load_from_dir<P: AsRef<Path>>(dir: P) -> Result<ReferenceData> {
    let dir = dir.as_ref();
    let read = |file: &str| fs::read_to_string(dir.join(file));

    let food_nutrition = read(FOOD_NUTRITION_FILE)?;
    let food_category = read(FOOD_CATEGORY_FILE)?;
    let protein_source = read(PROTEIN_SOURCE_FILE)?;
    let age_group = read(AGE_GROUP_FILE)?;
    let education_level = read(EDUCATION_LEVEL_FILE)?;
    let class_group = read(CLASS_GROUP_FILE)?;
    let standards = read(STANDARDS_FILE)?;

    parse_tables(&TableSources {
        food_nutrition: &food_nutrition,
        food_category: &food_category,
        protein_source: &protein_source,
        age_group: &age_group,
        education_level: &education_level,
        class_group: &class_group,
        standards: &standards,
    })
}
