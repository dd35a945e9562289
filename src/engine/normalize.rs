use crate::models::{normalize_key, MenuSelection};
use crate::reference::ReferenceData;

/// Reconcile free-text input with a known food name.
///
/// Returns the first category-table name contained in the lowercased input,
/// or the input unchanged when nothing matches. This is a best-effort step;
/// aggregation still requires an exact name afterwards.
pub fn normalize(raw_name: &str, category_names: &[String]) -> String {
    let lowered = raw_name.to_lowercase();
    category_names
        .iter()
        .find(|name| !name.is_empty() && lowered.contains(name.as_str()))
        .cloned()
        .unwrap_or_else(|| raw_name.to_string())
}

/// Whether `raw_name` normalizes to a known name.
pub fn is_known(raw_name: &str, category_names: &[String]) -> bool {
    let normalized = normalize_key(&normalize(raw_name, category_names));
    category_names.iter().any(|name| *name == normalized)
}

/// Name to store on a menu line for free-text input.
///
/// The food's own spelling when the table knows it, otherwise the
/// normalized text so aggregation can report it as unknown.
pub fn canonical_name(raw_name: &str, data: &ReferenceData) -> String {
    let normalized = normalize(raw_name, data.category_names());
    data.foods()
        .get(&normalized)
        .map(|f| f.name.clone())
        .unwrap_or(normalized)
}

/// Build a menu from free-text items, normalizing every name first.
///
/// Items that normalize to a food already on the menu are skipped.
pub fn normalized_selection(items: &[(String, u32)], data: &ReferenceData) -> MenuSelection {
    let mut menu = MenuSelection::new();
    for (raw_name, grams) in items {
        menu.add_with_portion(&canonical_name(raw_name, data), *grams);
    }
    menu
}
