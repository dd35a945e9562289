use crate::engine::{canonical_name, evaluate_menu};
use crate::error::{MbgError, Result};
use crate::models::{EvaluationResult, MenuSelection, RecipientProfile};
use crate::reference::ReferenceData;
use crate::session::logbook::{LogEntry, Logbook};

/// State of one validation session: who the menu is for, the menu being
/// built, the latest result and the logbook of compliant menus.
pub struct Session<'a> {
    data: &'a ReferenceData,
    profile: Option<RecipientProfile>,
    menu: MenuSelection,
    last_result: Option<EvaluationResult>,
    logbook: Logbook,
}

impl<'a> Session<'a> {
    pub fn new(data: &'a ReferenceData) -> Self {
        Self {
            data,
            profile: None,
            menu: MenuSelection::new(),
            last_result: None,
            logbook: Logbook::default(),
        }
    }

    pub fn data(&self) -> &ReferenceData {
        self.data
    }

    pub fn set_profile(&mut self, profile: RecipientProfile) {
        self.profile = Some(profile);
    }

    pub fn profile(&self) -> Option<&RecipientProfile> {
        self.profile.as_ref()
    }

    /// Normalize free text to a known food name and add it to the menu.
    ///
    /// Returns the name stored on the menu line, or `None` when the food was
    /// already selected.
    pub fn select_food(&mut self, raw_name: &str) -> Option<String> {
        let name = canonical_name(raw_name, self.data);
        self.menu.add(&name).then_some(name)
    }

    pub fn set_portion(&mut self, food_name: &str, portion_grams: u32) -> Result<()> {
        self.menu.set_portion(food_name, portion_grams)
    }

    pub fn remove_food(&mut self, food_name: &str) -> bool {
        self.menu.remove(food_name)
    }

    pub fn menu(&self) -> &MenuSelection {
        &self.menu
    }

    /// Whether a profile is set and the menu has at least one line.
    pub fn can_evaluate(&self) -> bool {
        self.profile.is_some() && !self.menu.is_empty()
    }

    /// Evaluate the current menu, logging it when compliant.
    pub fn evaluate(&mut self) -> Result<&EvaluationResult> {
        let profile = self
            .profile
            .ok_or_else(|| MbgError::InvalidInput("no recipient selected".to_string()))?;
        if self.menu.is_empty() {
            return Err(MbgError::InvalidInput("the menu is empty".to_string()));
        }

        let result = evaluate_menu(self.data, &profile, &self.menu)?;
        if result.is_compliant() {
            self.logbook.record(LogEntry::from_evaluation(&self.menu, &result));
        }

        Ok(&*self.last_result.insert(result))
    }

    /// Latest result, if the menu has not changed since it was computed.
    pub fn current_result(&self) -> Option<&EvaluationResult> {
        self.last_result
            .as_ref()
            .filter(|r| r.menu_version == self.menu.version())
    }

    /// Clear the menu and the last result. The logbook is kept.
    pub fn reset(&mut self) {
        self.menu.clear();
        self.last_result = None;
    }

    pub fn logbook(&self) -> &Logbook {
        &self.logbook
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClassLabel, Gender};
    use crate::reference::load_builtin;

    fn compliant_menu(session: &mut Session<'_>) {
        session.select_food("Nasi Putih");
        session.select_food("Ayam Goreng");
        session.select_food("Sayur Sop");
        session.select_food("Pisang");
        session.set_portion("Nasi Putih", 150).unwrap();
        session.set_portion("Ayam Goreng", 80).unwrap();
    }

    #[test]
    fn test_select_food_normalizes_free_text() {
        let data = load_builtin().unwrap();
        let mut session = Session::new(&data);

        assert_eq!(session.select_food("nasi putih hangat"), Some("Nasi Putih".to_string()));
        assert_eq!(session.select_food("NASI PUTIH"), None);
        assert_eq!(session.select_food("Rendang"), Some("Rendang".to_string()));
        assert_eq!(session.menu().len(), 2);
    }

    #[test]
    fn test_evaluate_requires_profile_and_menu() {
        let data = load_builtin().unwrap();
        let mut session = Session::new(&data);
        assert!(!session.can_evaluate());
        assert!(matches!(session.evaluate(), Err(MbgError::InvalidInput(_))));

        session.set_profile(RecipientProfile::by_age(7, Gender::All));
        assert!(matches!(session.evaluate(), Err(MbgError::InvalidInput(_))));
    }

    #[test]
    fn test_compliant_menu_is_logged() {
        let data = load_builtin().unwrap();
        let mut session = Session::new(&data);
        session.set_profile(RecipientProfile::by_class(ClassLabel::new(2).unwrap(), Gender::All));
        compliant_menu(&mut session);

        let result = session.evaluate().unwrap();
        assert!(result.is_compliant(), "{:?}", result.verdict);
        assert_eq!(session.logbook().len(), 1);

        let entry = &session.logbook().entries()[0];
        assert_eq!(entry.main_ingredient, "Nasi Putih");
        assert_eq!(entry.group_id.as_str(), "early-primary");
    }

    #[test]
    fn test_result_goes_stale_after_menu_change() {
        let data = load_builtin().unwrap();
        let mut session = Session::new(&data);
        session.set_profile(RecipientProfile::by_age(7, Gender::All));
        compliant_menu(&mut session);

        session.evaluate().unwrap();
        assert!(session.current_result().is_some());

        session.set_portion("Pisang", 50).unwrap();
        assert!(session.current_result().is_none());

        session.reset();
        assert!(session.menu().is_empty());
        assert_eq!(session.logbook().len(), 1);
    }

    #[test]
    fn test_non_compliant_menu_not_logged() {
        let data = load_builtin().unwrap();
        let mut session = Session::new(&data);
        session.set_profile(RecipientProfile::by_age(7, Gender::All));
        session.select_food("Nasi Putih");

        let result = session.evaluate().unwrap();
        assert!(!result.is_compliant());
        assert!(session.logbook().is_empty());
    }
}
