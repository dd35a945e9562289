use serde::Serialize;

use crate::models::{EvaluationResult, MenuSelection, StandardGroupId};

/// Status label recorded for compliant menus.
pub const COMPLIANT_STATUS: &str = "Sesuai SOP";

/// A compliant menu recorded during the session.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub id: usize,
    pub menu_name: String,
    pub main_ingredient: String,
    pub group_id: StandardGroupId,
    pub energy_kcal: u32,
    pub status: String,
}

impl LogEntry {
    /// Entry for an evaluated menu. The id is assigned by the logbook.
    pub fn from_evaluation(menu: &MenuSelection, result: &EvaluationResult) -> Self {
        Self {
            id: 0,
            menu_name: menu.display_name(),
            main_ingredient: menu
                .lines()
                .first()
                .map(|l| l.food_name.clone())
                .unwrap_or_default(),
            group_id: result.group_id.clone(),
            energy_kcal: result.totals.energy_kcal.round() as u32,
            status: COMPLIANT_STATUS.to_string(),
        }
    }
}

/// In-memory log of compliant menus; lives only as long as the session.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Logbook {
    entries: Vec<LogEntry>,
}

impl Logbook {
    /// Append an entry with the next sequential id.
    pub fn record(&mut self, mut entry: LogEntry) -> usize {
        entry.id = self.entries.len() + 1;
        let id = entry.id;
        self.entries.push(entry);
        id
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
