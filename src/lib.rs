#![doc(test(attr(deny(warnings))))]

//! Dinario tracks monthly income, expenses, and savings, and derives the
//! figures a dashboard shows: gross income, spending, savings, and the cash
//! left over for the current month.

pub mod errors;
pub mod tracker;
pub mod utils;

use std::sync::Once;

pub use dinario_config::{AppConfig, ConfigManager};
pub use dinario_core::{
    parse_amount, parse_date, parse_optional_date, tax_rate_from_percent, Clock,
    CurrencyFormatter, DateFormatter, FixedClock, MediumDateFormatter, StandardFormatter,
    SystemClock,
};
pub use dinario_domain::{
    Amounted, Configuration, Dated, DerivedMetrics, Expense, ExpenseDraft, FinanceSnapshot,
    Identifiable, Income, IncomeDraft, MonthRange, Movement, RecordId, RecordKind, Savings,
    SavingsDraft, StoredExpense, StoredIncome, StoredSavings,
};
pub use errors::{DinarioError, Result};
pub use tracker::{FinanceTracker, SubscriptionId};

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    init_with_config(&AppConfig::default());
}

/// Like [`init`], using the preference's `log_filter` directive.
pub fn init_with_config(config: &AppConfig) {
    INIT_TRACING.call_once(|| {
        utils::init_tracing(&config.log_filter);
        tracing::info!("Dinario tracing initialized.");
    });
}
