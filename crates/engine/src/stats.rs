//! Monthly spending per tag, compared against the budget targets.

use std::{collections::BTreeMap, fmt};

use crate::{Money, MoneyEvent, Target};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BudgetStatus {
    OverBudget { target: Money },
    OnTrack { target: Money },
    Unbudgeted,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagSummary {
    pub tag: String,
    pub spent: Money,
    pub status: BudgetStatus,
}

impl fmt::Display for TagSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            BudgetStatus::OverBudget { target } => {
                write!(f, "{}: {} > {target} !Warning!", self.tag, self.spent)
            }
            BudgetStatus::OnTrack { target } => {
                write!(f, "{}: {} <= {target} OK", self.tag, self.spent)
            }
            BudgetStatus::Unbudgeted => write!(f, "{}: {}", self.tag, self.spent),
        }
    }
}

/// Sums events and targets by tag. Only tags with at least one event are
/// reported, sorted by tag.
#[must_use]
pub fn summarize(events: &[MoneyEvent], targets: &[Target]) -> Vec<TagSummary> {
    let mut spent: BTreeMap<&str, Money> = BTreeMap::new();
    for event in events {
        *spent.entry(event.tag.as_str()).or_default() += event.amount;
    }

    let mut budget: BTreeMap<&str, Money> = BTreeMap::new();
    for target in targets {
        *budget.entry(target.tag.as_str()).or_default() += target.amount;
    }

    spent
        .into_iter()
        .map(|(tag, spent)| {
            let status = match budget.get(tag) {
                Some(&target) if spent > target => BudgetStatus::OverBudget { target },
                Some(&target) => BudgetStatus::OnTrack { target },
                None => BudgetStatus::Unbudgeted,
            };
            TagSummary {
                tag: tag.to_string(),
                spent,
                status,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use crate::{Currency, Period};

    use super::*;

    fn event(tag: &str, units: i64) -> MoneyEvent {
        MoneyEvent {
            amount: Money::new(units * 100),
            currency: Currency::Ars,
            comment: String::new(),
            tag: tag.to_string(),
            created: Utc::now(),
        }
    }

    fn target(tag: &str, units: i64) -> Target {
        Target {
            tag: tag.to_string(),
            amount: Money::new(units * 100),
            period: Period {
                start: Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
                end: Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap(),
            },
        }
    }

    #[test]
    fn flags_over_budget_and_reports_raw_sums() {
        let events = [event("Food", 10), event("Food", 5), event("Bar", 3)];
        let targets = [target("Food", 12)];

        let lines: Vec<String> = summarize(&events, &targets)
            .iter()
            .map(ToString::to_string)
            .collect();

        assert_eq!(lines, ["Bar: 3.00", "Food: 15.00 > 12.00 !Warning!"]);
    }

    #[test]
    fn spending_equal_to_target_is_on_track() {
        let summary = summarize(&[event("Cafe", 12)], &[target("Cafe", 12)]);
        assert_eq!(
            summary[0].status,
            BudgetStatus::OnTrack {
                target: Money::new(1200)
            }
        );
        assert_eq!(summary[0].to_string(), "Cafe: 12.00 <= 12.00 OK");
    }

    #[test]
    fn targets_without_spending_are_omitted() {
        let summary = summarize(&[event("Bar", 1)], &[target("Travel", 500)]);
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].tag, "Bar");
    }

    #[test]
    fn nothing_spent_means_nothing_reported() {
        assert!(summarize(&[], &[target("Food", 10)]).is_empty());
    }
}
