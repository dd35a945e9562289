pub mod evaluation;
pub mod food;
pub mod menu;
pub mod recipient;
pub mod standard;

pub use evaluation::{
    Action, CategoryCheck, ComplianceVerdict, EnergyStatus, EvaluationResult, Nutrient,
    NutrientTotals, Recommendation, Target,
};
pub use food::{normalize_key, FoodCategory, FoodFact, FoodFactTable};
pub use menu::{MenuLine, MenuSelection, DEFAULT_PORTION_GRAMS};
pub use recipient::{ClassLabel, EducationLevel, Gender, Recipient, RecipientProfile};
pub use standard::{StandardGroupId, ThresholdRecord};
