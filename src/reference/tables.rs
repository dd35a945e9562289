use std::collections::HashMap;

use serde::Serialize;

use crate::error::{MbgError, Result, Warning};
use crate::models::{
    normalize_key, ClassLabel, EducationLevel, FoodFact, FoodFactTable, Gender, StandardGroupId,
    ThresholdRecord,
};

/// Age range mapped to a school level and grade.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeBand {
    pub age_min: u8,
    pub age_max: u8,
    pub level: EducationLevel,
    pub grade: u8,
    pub default_gender: Gender,
}

impl AgeBand {
    pub fn contains(&self, age: u8) -> bool {
        self.age_min <= age && age <= self.age_max
    }
}

/// Grade range of a level mapped to a standard group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EducationGroup {
    pub level: EducationLevel,
    pub class_min: u8,
    pub class_max: u8,
    pub group_id: StandardGroupId,
}

impl EducationGroup {
    pub fn covers(&self, level: EducationLevel, grade: u8) -> bool {
        self.level == level && self.class_min <= grade && grade <= self.class_max
    }
}

/// Read-only reference tables shared by every evaluation in a session.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    foods: FoodFactTable,
    /// Lowercase food names in category-table order.
    category_names: Vec<String>,
    age_bands: Vec<AgeBand>,
    education_groups: Vec<EducationGroup>,
    class_groups: HashMap<ClassLabel, Vec<StandardGroupId>>,
    standards: HashMap<StandardGroupId, ThresholdRecord>,
    warnings: Vec<Warning>,
}

impl ReferenceData {
    /// Build the lookup maps from parsed rows.
    ///
    /// `facts` order is taken as the category-table order used by name
    /// normalization. Fails when a standard has min energy above max energy.
    pub fn new(
        facts: Vec<FoodFact>,
        age_bands: Vec<AgeBand>,
        education_groups: Vec<EducationGroup>,
        class_groups: Vec<(ClassLabel, StandardGroupId)>,
        standards: Vec<ThresholdRecord>,
    ) -> Result<Self> {
        let category_names = facts.iter().map(|f| f.key()).collect();

        let mut class_map: HashMap<ClassLabel, Vec<StandardGroupId>> = HashMap::new();
        for (class, group_id) in class_groups {
            class_map.entry(class).or_default().push(group_id);
        }

        let mut standard_map = HashMap::new();
        for record in standards {
            if !record.has_valid_energy_band() {
                return Err(MbgError::Config(format!(
                    "standard {} has min energy above max energy",
                    record.group_id
                )));
            }
            standard_map.insert(record.group_id.clone(), record);
        }

        Ok(Self {
            foods: FoodFactTable::new(facts),
            category_names,
            age_bands,
            education_groups,
            class_groups: class_map,
            standards: standard_map,
            warnings: Vec::new(),
        })
    }

    /// Replace the category-table order used for name normalization.
    pub fn with_category_order(mut self, names: Vec<String>) -> Self {
        self.category_names = names.iter().map(|n| normalize_key(n)).collect();
        self
    }

    /// Attach warnings raised while loading the tables.
    pub fn with_warnings(mut self, warnings: Vec<Warning>) -> Self {
        self.warnings = warnings;
        self
    }

    pub fn foods(&self) -> &FoodFactTable {
        &self.foods
    }

    pub fn category_names(&self) -> &[String] {
        &self.category_names
    }

    pub fn age_bands(&self) -> &[AgeBand] {
        &self.age_bands
    }

    pub fn education_groups(&self) -> &[EducationGroup] {
        &self.education_groups
    }

    /// Group ids listed for a class label, in table order.
    pub fn class_groups(&self, class: ClassLabel) -> &[StandardGroupId] {
        self.class_groups
            .get(&class)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn standard(&self, group_id: &StandardGroupId) -> Option<&ThresholdRecord> {
        self.standards.get(group_id)
    }

    /// All standards sorted by group id.
    pub fn standards(&self) -> Vec<&ThresholdRecord> {
        let mut records: Vec<&ThresholdRecord> = self.standards.values().collect();
        records.sort_by(|a, b| a.group_id.cmp(&b.group_id));
        records
    }

    pub fn load_warnings(&self) -> &[Warning] {
        &self.warnings
    }
}
