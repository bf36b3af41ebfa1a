use chrono::Utc;

use crate::model::{Category, DecisionStatus, OptionDecision};

/// Per-option decisions for the active trip.
///
/// Invariant: at most one `Selected` decision per category.
#[derive(Debug, Clone, Default)]
pub struct DecisionLedger {
    decisions: Vec<OptionDecision>,
}

impl DecisionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> &[OptionDecision] {
        &self.decisions
    }

    pub fn get(&self, option_id: &str) -> Option<&OptionDecision> {
        self.decisions.iter().find(|d| d.option_id == option_id)
    }

    pub fn selected(&self, category: Category) -> Option<&str> {
        self.decisions
            .iter()
            .find(|d| d.category == category && d.status == DecisionStatus::Selected)
            .map(|d| d.option_id.as_str())
    }

    /// Selects `option_id`, displacing any earlier selection in the category.
    pub fn select(&mut self, option_id: &str, category: Category) {
        self.decisions.retain(|d| {
            !(d.category == category && d.status == DecisionStatus::Selected)
                && d.option_id != option_id
        });
        self.decisions.push(OptionDecision {
            option_id: option_id.to_string(),
            category,
            status: DecisionStatus::Selected,
            reject_reason: None,
            monitor_price: false,
            timestamp: Utc::now(),
        });
    }

    /// Marks an option as being swapped out. Any previous decision on it,
    /// including a selection, is dropped.
    pub fn mark_replacing(&mut self, option_id: &str, category: Category, reason: Option<&str>) {
        self.decisions.retain(|d| d.option_id != option_id);
        self.decisions.push(OptionDecision {
            option_id: option_id.to_string(),
            category,
            status: DecisionStatus::Replacing,
            reject_reason: reason.map(str::to_string),
            monitor_price: false,
            timestamp: Utc::now(),
        });
    }

    pub fn remove(&mut self, option_id: &str) -> Option<OptionDecision> {
        let idx = self.decisions.iter().position(|d| d.option_id == option_id)?;
        Some(self.decisions.remove(idx))
    }

    pub fn remove_all(&mut self, option_ids: &[String]) {
        self.decisions.retain(|d| !option_ids.contains(&d.option_id));
    }

    /// Flips price monitoring on an existing decision. Returns the new value,
    /// or `None` when the option has no decision.
    pub fn toggle_monitor(&mut self, option_id: &str) -> Option<bool> {
        let decision = self.decisions.iter_mut().find(|d| d.option_id == option_id)?;
        decision.monitor_price = !decision.monitor_price;
        Some(decision.monitor_price)
    }

    pub fn retain(&mut self, keep: impl FnMut(&OptionDecision) -> bool) {
        self.decisions.retain(keep);
    }

    pub fn clear(&mut self) {
        self.decisions.clear();
    }

    pub fn len(&self) -> usize {
        self.decisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }
}
