//! Unified "recent movements" view over the three record collections.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{common::*, record::*};

/// One line of the merged movement list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movement {
    pub kind: RecordKind,
    pub id: RecordId,
    pub date: NaiveDate,
    pub amount: f64,
    pub label: String,
}

impl Movement {
    pub fn from_stored<T: FinanceRecord>(stored: &Stored<T>) -> Self {
        Self {
            kind: T::KIND,
            id: stored.id(),
            date: stored.date(),
            amount: stored.amount(),
            label: stored.record().label().to_string(),
        }
    }

    /// Amount as it affects available cash: expenses negative, everything else positive.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            RecordKind::Expense => -self.amount,
            RecordKind::Income | RecordKind::Savings => self.amount,
        }
    }
}

impl Identifiable for Movement {
    fn id(&self) -> RecordId {
        self.id
    }
}

impl Dated for Movement {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Amounted for Movement {
    fn amount(&self) -> f64 {
        self.amount
    }
}

impl Displayable for Movement {
    fn display_label(&self) -> String {
        format!("{} {} {}", self.date, self.kind, self.label)
    }
}

/// Newest first: date descending, then id descending.
pub fn newest_first<T: Dated + Identifiable>(a: &T, b: &T) -> Ordering {
    b.date().cmp(&a.date()).then_with(|| b.id().cmp(&a.id()))
}

/// Sorts a single collection newest first.
pub fn sort_newest_first<T: Dated + Identifiable>(items: &mut [T]) {
    items.sort_by(newest_first);
}

/// Merges the three lists into one movement sequence, newest first.
///
/// Ids are only unique within a collection, so equal date and id fall back to
/// the record kind to keep the order total.
pub fn merge_movements(
    income: &[StoredIncome],
    expenses: &[StoredExpense],
    savings: &[StoredSavings],
) -> Vec<Movement> {
    let mut movements: Vec<Movement> = income
        .iter()
        .map(Movement::from_stored)
        .chain(expenses.iter().map(Movement::from_stored))
        .chain(savings.iter().map(Movement::from_stored))
        .collect();
    movements.sort_by(|a, b| newest_first(a, b).then_with(|| a.kind.cmp(&b.kind)));
    movements
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, d).unwrap()
    }

    fn income(id: u64, d: u32, amount: f64) -> StoredIncome {
        Stored::new(
            RecordId(id),
            IncomeDraft::new(amount).on(day(d)).validate(day(d)).unwrap(),
        )
    }

    fn expense(id: u64, d: u32, amount: f64) -> StoredExpense {
        Stored::new(
            RecordId(id),
            ExpenseDraft::new("Groceries", amount)
                .on(day(d))
                .validate(day(d))
                .unwrap(),
        )
    }

    fn savings(id: u64, d: u32, amount: f64) -> StoredSavings {
        Stored::new(
            RecordId(id),
            SavingsDraft::new(amount).on(day(d)).validate(day(d)).unwrap(),
        )
    }

    #[test]
    fn same_date_places_later_id_first() {
        let merged = merge_movements(&[income(5, 10, 1.0), income(7, 10, 2.0)], &[], &[]);
        let ids: Vec<_> = merged.iter().map(|m| m.id.value()).collect();
        assert_eq!(ids, vec![7, 5]);
    }

    #[test]
    fn merge_orders_by_date_across_kinds() {
        let merged = merge_movements(
            &[income(1, 3, 100.0)],
            &[expense(1, 10, 50.0)],
            &[savings(1, 20, 30.0)],
        );
        let kinds: Vec<_> = merged.iter().map(|m| m.kind).collect();
        assert_eq!(
            kinds,
            vec![RecordKind::Savings, RecordKind::Expense, RecordKind::Income]
        );
    }

    #[test]
    fn order_does_not_depend_on_input_order() {
        let forward = [income(2, 4, 1.0), income(9, 4, 1.0), income(3, 8, 1.0)];
        let backward = [income(3, 8, 1.0), income(9, 4, 1.0), income(2, 4, 1.0)];
        let a = merge_movements(&forward, &[], &[]);
        let b = merge_movements(&backward, &[], &[]);
        assert_eq!(a, b);
    }

    #[test]
    fn signed_amount_negates_expenses_only() {
        let merged = merge_movements(
            &[income(1, 1, 10.0)],
            &[expense(1, 2, 4.0)],
            &[savings(1, 3, 2.0)],
        );
        let signed: Vec<_> = merged.iter().map(Movement::signed_amount).collect();
        assert_eq!(signed, vec![2.0, -4.0, 10.0]);
    }
}
