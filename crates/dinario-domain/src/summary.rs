//! Aggregated figures shown on the dashboard.

use serde::{Deserialize, Serialize};

use crate::{movement::Movement, period::MonthRange, record::*, settings::Configuration};

/// Flat result of the metrics aggregation for one month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DerivedMetrics {
    pub range: MonthRange,
    /// Stored for display; not deducted from `net_income`.
    pub tax_rate: f64,
    pub gross_income: f64,
    pub total_expenses: f64,
    pub month_savings: f64,
    /// Available cash: gross income minus expenses minus savings of the month.
    pub net_income: f64,
    pub total_savings_all_time: f64,
    pub income_count: usize,
    pub expense_count: usize,
    pub savings_count: usize,
}

/// Everything a presentation layer needs to render the current month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FinanceSnapshot {
    pub configuration: Option<Configuration>,
    /// Current-month income, newest first.
    pub income: Vec<StoredIncome>,
    /// Current-month expenses, newest first.
    pub expenses: Vec<StoredExpense>,
    /// Complete savings history, newest first.
    pub savings: Vec<StoredSavings>,
    pub movements: Vec<Movement>,
    pub metrics: DerivedMetrics,
}
