use crate::error::Result;
use crate::reference::loader::{parse_tables, TableSources};
use crate::reference::tables::ReferenceData;

/// MBG reference tables compiled into the binary.
pub const BUILTIN_SOURCES: TableSources<'static> = TableSources {
    food_nutrition: include_str!("../../data/food_nutrition.csv"),
    food_category: include_str!("../../data/food_category.csv"),
    protein_source: include_str!("../../data/protein_source.csv"),
    age_group: include_str!("../../data/age_group.csv"),
    education_level: include_str!("../../data/education_level.csv"),
    class_group: include_str!("../../data/class_group.csv"),
    standards: include_str!("../../data/standards.csv"),
};

/// Parse the built-in tables.
pub fn load_builtin() -> Result<ReferenceData> {
    parse_tables(&BUILTIN_SOURCES)
}
