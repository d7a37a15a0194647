use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::db::{Storage, StorageKey};
use crate::features::collection::Collection;
use crate::features::error::{FeatureError, required};
use crate::models::{EntryKind, FinanceEntry, id};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FinanceSummary {
    pub total_income: f64,
    pub total_expenses: f64,
    pub balance: f64,
}

pub struct FinanceLedger {
    entries: Collection<FinanceEntry>,
}

impl FinanceLedger {
    pub fn load(storage: &Storage) -> Self {
        Self {
            entries: Collection::open(storage, StorageKey::FinanceEntries, Vec::new()),
        }
    }

    pub fn entries(&self) -> &[FinanceEntry] {
        self.entries.items()
    }

    /// Entries sorted by date, newest first.
    pub fn by_date(&self) -> Vec<&FinanceEntry> {
        let mut entries: Vec<&FinanceEntry> = self.entries.items().iter().collect();
        entries.sort_by(|a, b| b.date.cmp(&a.date));
        entries
    }

    pub fn add(
        &mut self,
        kind: EntryKind,
        amount: f64,
        description: &str,
        category: &str,
        date: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<&FinanceEntry, FeatureError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(FeatureError::InvalidAmount(amount));
        }
        let category = required(category, "a category")?;
        let entry = FinanceEntry {
            id: id::next_id(now),
            kind,
            amount,
            description: description.trim().to_string(),
            category,
            date,
            created_at: now,
        };
        Ok(self.entries.push(entry))
    }

    pub fn delete(&mut self, id: &str) -> Result<FinanceEntry, FeatureError> {
        self.entries
            .remove(id)
            .ok_or_else(|| FeatureError::not_found("finance entry", id))
    }

    pub fn summary(&self) -> FinanceSummary {
        summarize(self.entries.items())
    }

    /// Per-category totals for one kind, largest first.
    pub fn by_category(&self, kind: EntryKind) -> Vec<(String, f64)> {
        let mut totals: HashMap<&str, f64> = HashMap::new();
        for entry in self.entries.items().iter().filter(|e| e.kind == kind) {
            *totals.entry(entry.category.as_str()).or_default() += entry.amount;
        }
        let mut out: Vec<(String, f64)> = totals
            .into_iter()
            .map(|(category, total)| (category.to_string(), total))
            .collect();
        out.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        out
    }
}

pub fn summarize(entries: &[FinanceEntry]) -> FinanceSummary {
    let total_of = |kind: EntryKind| -> f64 {
        entries
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| e.amount)
            .sum()
    };
    let total_income = total_of(EntryKind::Income);
    let total_expenses = total_of(EntryKind::Expense);
    FinanceSummary {
        total_income,
        total_expenses,
        balance: total_income - total_expenses,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    fn ledger() -> FinanceLedger {
        FinanceLedger::load(&Storage::new(MemoryStore::new()))
    }

    #[test]
    fn empty_ledger_balances_to_zero() {
        assert_eq!(ledger().summary(), FinanceSummary::default());
    }

    #[test]
    fn balance_is_income_minus_expenses() {
        let mut ledger = ledger();
        let now = Utc::now();
        ledger.add(EntryKind::Income, 2500.0, "salary", "work", now, now).unwrap();
        ledger.add(EntryKind::Income, 150.0, "", "gifts", now, now).unwrap();
        ledger.add(EntryKind::Expense, 900.0, "rent", "housing", now, now).unwrap();
        ledger.add(EntryKind::Expense, 42.5, "groceries", "food", now, now).unwrap();
        ledger.add(EntryKind::Expense, 7.5, "coffee", "food", now, now).unwrap();

        let s = ledger.summary();
        assert_eq!(s.total_income, 2650.0);
        assert_eq!(s.total_expenses, 950.0);
        assert_eq!(s.balance, s.total_income - s.total_expenses);

        let food = ledger.by_category(EntryKind::Expense);
        assert_eq!(food[0], ("housing".to_string(), 900.0));
        assert_eq!(food[1], ("food".to_string(), 50.0));
    }

    #[test]
    fn rejects_negative_or_non_finite_amounts() {
        let mut ledger = ledger();
        let now = Utc::now();
        assert_eq!(
            ledger.add(EntryKind::Expense, -1.0, "", "misc", now, now).unwrap_err(),
            FeatureError::InvalidAmount(-1.0)
        );
        assert!(ledger.add(EntryKind::Income, f64::NAN, "", "misc", now, now).is_err());
        assert!(ledger.add(EntryKind::Income, 1.0, "", " ", now, now).is_err());
        assert!(ledger.entries().is_empty());

        let zero = ledger.add(EntryKind::Income, 0.0, "", "misc", now, now).unwrap().id.clone();
        assert!(ledger.delete(&zero).is_ok());
        assert_eq!(ledger.summary().balance, 0.0);
    }
}
