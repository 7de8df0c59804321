//! Derived figures for the current month, recomputed from fresh reads.

use tracing::debug;

use dinario_domain::{
    effective_tax_rate, merge_movements, sort_newest_first, Amounted, Configuration, Dated,
    DerivedMetrics, FinanceSnapshot, MonthRange, StoredExpense, StoredIncome, StoredSavings,
};

use crate::{storage::FinanceStorage, time::Clock, CoreError};

/// Read side of the tracker: month-scoped queries and the metrics aggregation.
pub struct MetricsService;

impl MetricsService {
    /// Aggregates the already-filtered month lists together with the full savings history.
    ///
    /// `month_income` and `month_expenses` must only contain records inside
    /// `range`; `all_savings` is the complete history and is filtered here.
    pub fn derive(
        month_income: &[StoredIncome],
        month_expenses: &[StoredExpense],
        all_savings: &[StoredSavings],
        configuration: Option<&Configuration>,
        range: MonthRange,
    ) -> DerivedMetrics {
        let gross_income = sum(month_income);
        let total_expenses = sum(month_expenses);
        let month_savings: f64 = all_savings
            .iter()
            .filter(|entry| range.contains(entry.date()))
            .map(Amounted::amount)
            .sum();

        DerivedMetrics {
            range,
            tax_rate: effective_tax_rate(configuration),
            gross_income,
            total_expenses,
            month_savings,
            net_income: gross_income - total_expenses - month_savings,
            total_savings_all_time: sum(all_savings),
            income_count: month_income.len(),
            expense_count: month_expenses.len(),
            savings_count: all_savings.len(),
        }
    }

    pub fn configuration(storage: &dyn FinanceStorage) -> Result<Option<Configuration>, CoreError> {
        storage.configuration().get()
    }

    /// Income dated inside `range`, newest first.
    pub fn income_in(
        storage: &dyn FinanceStorage,
        range: MonthRange,
    ) -> Result<Vec<StoredIncome>, CoreError> {
        let mut income = storage.income().list_in(range)?;
        sort_newest_first(&mut income);
        Ok(income)
    }

    /// Expenses dated inside `range`, newest first.
    pub fn expenses_in(
        storage: &dyn FinanceStorage,
        range: MonthRange,
    ) -> Result<Vec<StoredExpense>, CoreError> {
        let mut expenses = storage.expenses().list_in(range)?;
        sort_newest_first(&mut expenses);
        Ok(expenses)
    }

    /// Every savings contribution ever recorded, newest first.
    pub fn all_savings(storage: &dyn FinanceStorage) -> Result<Vec<StoredSavings>, CoreError> {
        let mut savings = storage.savings().list()?;
        sort_newest_first(&mut savings);
        Ok(savings)
    }

    pub fn current_month_income(
        storage: &dyn FinanceStorage,
        clock: &dyn Clock,
    ) -> Result<Vec<StoredIncome>, CoreError> {
        Self::income_in(storage, clock.current_month_range())
    }

    pub fn current_month_expenses(
        storage: &dyn FinanceStorage,
        clock: &dyn Clock,
    ) -> Result<Vec<StoredExpense>, CoreError> {
        Self::expenses_in(storage, clock.current_month_range())
    }

    pub fn derived_metrics(
        storage: &dyn FinanceStorage,
        clock: &dyn Clock,
    ) -> Result<DerivedMetrics, CoreError> {
        Ok(Self::snapshot(storage, clock)?.metrics)
    }

    /// Reads every collection once and assembles the full dashboard view.
    pub fn snapshot(
        storage: &dyn FinanceStorage,
        clock: &dyn Clock,
    ) -> Result<FinanceSnapshot, CoreError> {
        let range = clock.current_month_range();
        let configuration = Self::configuration(storage)?;
        let income = Self::income_in(storage, range)?;
        let expenses = Self::expenses_in(storage, range)?;
        let savings = Self::all_savings(storage)?;

        let metrics = Self::derive(&income, &expenses, &savings, configuration.as_ref(), range);
        let movements = merge_movements(&income, &expenses, &savings);
        debug!(
            month = %range.label(),
            gross = metrics.gross_income,
            expenses = metrics.total_expenses,
            savings = metrics.month_savings,
            net = metrics.net_income,
            "recomputed finance snapshot"
        );

        Ok(FinanceSnapshot {
            configuration,
            income,
            expenses,
            savings,
            movements,
            metrics,
        })
    }
}

fn sum<T: Amounted>(items: &[T]) -> f64 {
    items.iter().map(Amounted::amount).sum()
}
