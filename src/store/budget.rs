use serde::Serialize;

use super::{ActivityStore, TripStore};

/// Budget panel figures: spend per category against the active trip budget.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSummary {
    pub budget: f64,
    pub flight_spend: f64,
    pub lodging_spend: f64,
    pub activity_spend: f64,
    pub total_spent: f64,
    pub remaining: f64,
    /// Share of the budget spent, capped at 100.
    pub spent_percent: f64,
}

impl BudgetSummary {
    pub fn compute(budget: f64, flight_spend: f64, lodging_spend: f64, activity_spend: f64) -> Self {
        let total_spent = flight_spend + lodging_spend + activity_spend;
        let spent_percent = if budget > 0.0 {
            (total_spent / budget * 100.0).min(100.0)
        } else {
            0.0
        };
        Self {
            budget,
            flight_spend,
            lodging_spend,
            activity_spend,
            total_spent,
            remaining: budget - total_spent,
            spent_percent,
        }
    }

    /// Summary for the active trip's selections and planned activities.
    /// Zero budget when no trip is active.
    pub fn for_stores(trips: &TripStore, activities: &ActivityStore) -> Self {
        Self::compute(
            trips.active_trip().map(|t| t.budget).unwrap_or(0.0),
            trips.selected_flight().map(|f| f.price).unwrap_or(0.0),
            trips.selected_lodging().map(|l| l.price).unwrap_or(0.0),
            activities.planned_spend(),
        )
    }

    pub fn is_over_budget(&self) -> bool {
        self.remaining < 0.0
    }
}
