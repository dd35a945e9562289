use serde::Serialize;

use crate::error::{MbgError, Result};
use crate::models::food::normalize_key;

/// Portion assigned to a newly selected food, in grams.
pub const DEFAULT_PORTION_GRAMS: u32 = 100;

/// A single selected food and its portion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuLine {
    /// Name of the food as selected.
    pub food_name: String,

    /// Portion in grams.
    pub portion_grams: u32,
}

impl MenuLine {
    pub fn new(food_name: impl Into<String>, portion_grams: u32) -> Self {
        Self {
            food_name: food_name.into(),
            portion_grams,
        }
    }

    pub fn key(&self) -> String {
        normalize_key(&self.food_name)
    }
}

/// Ordered menu lines with unique food names.
///
/// Every effective mutation bumps `version`, so a caller holding an
/// evaluation can tell whether the menu changed since.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MenuSelection {
    lines: Vec<MenuLine>,
    version: u64,
}

impl MenuSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a selection from (name, grams) pairs, ignoring duplicates.
    pub fn from_pairs<S: AsRef<str>>(pairs: &[(S, u32)]) -> Self {
        let mut selection = Self::new();
        for (name, grams) in pairs {
            selection.add_with_portion(name.as_ref(), *grams);
        }
        selection
    }

    /// Append a line with the default portion.
    ///
    /// Returns false when the food is already selected (no-op).
    pub fn add(&mut self, food_name: &str) -> bool {
        self.add_with_portion(food_name, DEFAULT_PORTION_GRAMS)
    }

    pub fn add_with_portion(&mut self, food_name: &str, portion_grams: u32) -> bool {
        let name = food_name.trim();
        if name.is_empty() || self.contains(name) {
            return false;
        }
        self.lines.push(MenuLine::new(name, portion_grams));
        self.version += 1;
        true
    }

    /// Change the portion of an already selected food.
    pub fn set_portion(&mut self, food_name: &str, portion_grams: u32) -> Result<()> {
        let key = normalize_key(food_name);
        let line = self
            .lines
            .iter_mut()
            .find(|l| l.key() == key)
            .ok_or_else(|| {
                MbgError::InvalidInput(format!("{} is not on the menu", food_name.trim()))
            })?;

        if line.portion_grams != portion_grams {
            line.portion_grams = portion_grams;
            self.version += 1;
        }
        Ok(())
    }

    /// Remove a line. Returns false when the food was not selected.
    pub fn remove(&mut self, food_name: &str) -> bool {
        let key = normalize_key(food_name);
        let before = self.lines.len();
        self.lines.retain(|l| l.key() != key);
        let removed = self.lines.len() != before;
        if removed {
            self.version += 1;
        }
        removed
    }

    pub fn clear(&mut self) {
        if !self.lines.is_empty() {
            self.lines.clear();
            self.version += 1;
        }
    }

    pub fn contains(&self, food_name: &str) -> bool {
        let key = normalize_key(food_name);
        self.lines.iter().any(|l| l.key() == key)
    }

    pub fn get(&self, food_name: &str) -> Option<&MenuLine> {
        let key = normalize_key(food_name);
        self.lines.iter().find(|l| l.key() == key)
    }

    pub fn lines(&self) -> &[MenuLine] {
        &self.lines
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Food names joined for display, in selection order.
    pub fn display_name(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.food_name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_uses_default_portion() {
        let mut menu = MenuSelection::new();
        assert!(menu.add("Nasi Putih"));
        assert_eq!(menu.lines()[0].portion_grams, DEFAULT_PORTION_GRAMS);
        assert_eq!(menu.version(), 1);
    }

    #[test]
    fn test_duplicate_is_noop() {
        let mut menu = MenuSelection::new();
        menu.add_with_portion("Pisang", 80);
        assert!(!menu.add("PISANG"));
        assert!(!menu.add_with_portion(" pisang ", 200));

        assert_eq!(menu.len(), 1);
        assert_eq!(menu.lines()[0].portion_grams, 80);
        assert_eq!(menu.version(), 1);
    }

    #[test]
    fn test_set_portion() {
        let mut menu = MenuSelection::new();
        menu.add("Apel");
        menu.set_portion("apel", 150).unwrap();
        assert_eq!(menu.get("Apel").unwrap().portion_grams, 150);
        assert_eq!(menu.version(), 2);

        // Same value is not a mutation
        menu.set_portion("Apel", 150).unwrap();
        assert_eq!(menu.version(), 2);

        assert!(matches!(
            menu.set_portion("Jeruk", 100),
            Err(MbgError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_remove_and_clear() {
        let mut menu = MenuSelection::from_pairs(&[("Apel", 100), ("Jeruk", 50)]);
        assert!(menu.remove("APEL"));
        assert!(!menu.remove("Apel"));
        assert_eq!(menu.display_name(), "Jeruk");

        menu.clear();
        assert!(menu.is_empty());
        let version = menu.version();
        menu.clear();
        assert_eq!(menu.version(), version);
    }

    #[test]
    fn test_order_preserved() {
        let menu = MenuSelection::from_pairs(&[("Nasi Putih", 150), ("Ayam Goreng", 80), ("Apel", 100)]);
        assert_eq!(menu.display_name(), "Nasi Putih, Ayam Goreng, Apel");
    }
}
