//! The finance tracker facade: queries, validated mutations, and change subscriptions.

use std::{
    fmt,
    path::Path,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex,
    },
};

use tracing::{debug, warn};

use dinario_config::{AppConfig, ConfigManager};
use dinario_core::{
    Clock, CurrencyFormatter, FinanceStorage, MemoryStorage, MetricsService, MutationService,
    StandardFormatter, SystemClock,
};
use dinario_domain::{
    Configuration, DerivedMetrics, ExpenseDraft, FinanceSnapshot, IncomeDraft, MonthRange,
    Movement, RecordId, RecordKind, SavingsDraft, StoredExpense, StoredIncome, StoredSavings,
};
use dinario_storage_json::JsonStorage;

use crate::{errors::Result, utils};

type Subscriber = Arc<dyn Fn(&FinanceSnapshot) + Send + Sync>;

/// Handle returned by [`FinanceTracker::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Entry point for presentation layers.
///
/// Every query reads the stores afresh. After each mutation that changed
/// something, subscribers receive a snapshot recomputed from new reads.
pub struct FinanceTracker {
    storage: Box<dyn FinanceStorage>,
    clock: Box<dyn Clock>,
    formatter: StandardFormatter,
    subscribers: Mutex<Vec<(SubscriptionId, Subscriber)>>,
    next_subscription: AtomicU64,
}

impl fmt::Debug for FinanceTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FinanceTracker")
            .field("formatter", &self.formatter)
            .field("subscribers", &self.subscriber_count())
            .finish_non_exhaustive()
    }
}

impl FinanceTracker {
    pub fn new(storage: Box<dyn FinanceStorage>, clock: Box<dyn Clock>) -> Self {
        Self {
            storage,
            clock,
            formatter: StandardFormatter::default(),
            subscribers: Mutex::new(Vec::new()),
            next_subscription: AtomicU64::new(1),
        }
    }

    /// Volatile tracker on the system clock.
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStorage::new()), Box::new(SystemClock))
    }

    /// Tracker persisting to the JSON documents under `dir`.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let storage = JsonStorage::open(dir.as_ref())?;
        Ok(Self::new(Box::new(storage), Box::new(SystemClock)))
    }

    /// Tracker built from saved preferences: data location and currency display.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let tracker = Self::open(utils::resolve_data_dir(config))?;
        let formatter =
            StandardFormatter::new(&config.currency, config.show_cents).with_locale(&config.locale);
        Ok(tracker.with_formatter(formatter))
    }

    /// Loads preferences from the application directory and opens the tracker they describe.
    pub fn open_default() -> Result<Self> {
        let manager = ConfigManager::with_base_dir(utils::app_data_dir())?;
        let config = manager.load()?;
        Self::from_config(&config)
    }

    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_formatter(mut self, formatter: StandardFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn formatter(&self) -> &StandardFormatter {
        &self.formatter
    }

    /// Renders an amount with the tracker's currency settings, e.g. `$1,500`.
    pub fn format_amount(&self, amount: f64) -> String {
        self.formatter.format_amount(amount)
    }

    pub fn current_month_range(&self) -> MonthRange {
        self.clock.current_month_range()
    }

    // Queries

    pub fn get_configuration(&self) -> Result<Option<Configuration>> {
        Ok(MetricsService::configuration(self.storage.as_ref())?)
    }

    pub fn get_current_month_income(&self) -> Result<Vec<StoredIncome>> {
        Ok(MetricsService::current_month_income(
            self.storage.as_ref(),
            self.clock.as_ref(),
        )?)
    }

    pub fn get_current_month_expenses(&self) -> Result<Vec<StoredExpense>> {
        Ok(MetricsService::current_month_expenses(
            self.storage.as_ref(),
            self.clock.as_ref(),
        )?)
    }

    pub fn get_all_savings(&self) -> Result<Vec<StoredSavings>> {
        Ok(MetricsService::all_savings(self.storage.as_ref())?)
    }

    pub fn get_derived_metrics(&self) -> Result<DerivedMetrics> {
        Ok(MetricsService::derived_metrics(
            self.storage.as_ref(),
            self.clock.as_ref(),
        )?)
    }

    /// Current-month income and expenses plus all savings, newest first.
    pub fn movements(&self) -> Result<Vec<Movement>> {
        Ok(self.snapshot()?.movements)
    }

    pub fn snapshot(&self) -> Result<FinanceSnapshot> {
        Ok(MetricsService::snapshot(
            self.storage.as_ref(),
            self.clock.as_ref(),
        )?)
    }

    /// The snapshot as pretty-printed JSON.
    pub fn snapshot_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.snapshot()?)?)
    }

    // Mutations

    pub fn add_income(&self, draft: IncomeDraft) -> Result<RecordId> {
        let id = MutationService::add_income(self.storage.as_ref(), self.clock.as_ref(), draft)?;
        self.notify();
        Ok(id)
    }

    pub fn add_expense(&self, draft: ExpenseDraft) -> Result<RecordId> {
        let id = MutationService::add_expense(self.storage.as_ref(), self.clock.as_ref(), draft)?;
        self.notify();
        Ok(id)
    }

    pub fn add_savings(&self, draft: SavingsDraft) -> Result<RecordId> {
        let id = MutationService::add_savings(self.storage.as_ref(), self.clock.as_ref(), draft)?;
        self.notify();
        Ok(id)
    }

    pub fn delete_income(&self, id: RecordId) -> Result<bool> {
        self.delete(RecordKind::Income, id)
    }

    pub fn delete_expense(&self, id: RecordId) -> Result<bool> {
        self.delete(RecordKind::Expense, id)
    }

    pub fn delete_savings(&self, id: RecordId) -> Result<bool> {
        self.delete(RecordKind::Savings, id)
    }

    /// Deletes a record of any kind. Unknown ids are a no-op and return `false`.
    pub fn delete(&self, kind: RecordKind, id: RecordId) -> Result<bool> {
        let removed = MutationService::delete(self.storage.as_ref(), kind, id)?;
        if removed {
            self.notify();
        }
        Ok(removed)
    }

    /// Creates or updates the single configuration; `tax_rate` must be within `0..=1`.
    pub fn save_configuration(&self, tax_rate: f64) -> Result<Configuration> {
        let configuration = MutationService::save_configuration(self.storage.as_ref(), tax_rate)?;
        self.notify();
        Ok(configuration)
    }

    /// Removes the configuration and every record.
    pub fn reset_all(&self) -> Result<()> {
        let outcome = MutationService::reset_all(self.storage.as_ref());
        // Collections cleared before a failure are already gone.
        self.notify();
        Ok(outcome?)
    }

    // Subscriptions

    /// Registers a callback invoked with a fresh snapshot after every successful change.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&FinanceSnapshot) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::Relaxed));
        match self.subscribers.lock() {
            Ok(mut subscribers) => subscribers.push((id, Arc::new(callback))),
            Err(poisoned) => poisoned.into_inner().push((id, Arc::new(callback))),
        }
        debug!(subscription = id.0, "subscriber added");
        id
    }

    /// Removes a subscriber. Returns `false` when `id` was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = match self.subscribers.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let before = subscribers.len();
        subscribers.retain(|(existing, _)| *existing != id);
        before != subscribers.len()
    }

    pub fn subscriber_count(&self) -> usize {
        match self.subscribers.lock() {
            Ok(guard) => guard.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    fn notify(&self) {
        let subscribers: Vec<Subscriber> = match self.subscribers.lock() {
            Ok(guard) => guard.iter().map(|(_, callback)| Arc::clone(callback)).collect(),
            Err(poisoned) => poisoned
                .into_inner()
                .iter()
                .map(|(_, callback)| Arc::clone(callback))
                .collect(),
        };
        if subscribers.is_empty() {
            return;
        }
        match self.snapshot() {
            Ok(snapshot) => {
                for callback in subscribers {
                    callback(&snapshot);
                }
            }
            Err(err) => warn!(error = %err, "failed to recompute snapshot for subscribers"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use chrono::NaiveDate;
    use dinario_core::FixedClock;

    use super::*;

    fn tracker() -> FinanceTracker {
        FinanceTracker::in_memory().with_clock(Box::new(FixedClock(
            NaiveDate::from_ymd_opt(2026, 2, 6).unwrap(),
        )))
    }

    #[test]
    fn subscribers_see_each_successful_change() {
        let tracker = tracker();
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let id = tracker.subscribe(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        let income = tracker.add_income(IncomeDraft::new(100.0)).unwrap();
        assert!(tracker.add_income(IncomeDraft::new(0.0)).is_err());
        assert!(tracker.delete_income(income).unwrap());
        assert!(!tracker.delete_income(income).unwrap());
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        assert!(tracker.unsubscribe(id));
        assert!(!tracker.unsubscribe(id));
        tracker.add_income(IncomeDraft::new(5.0)).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn formats_with_configured_currency() {
        let tracker = tracker().with_formatter(StandardFormatter::new("GBP", true));
        assert_eq!(tracker.format_amount(1500.5), "£1,500.50");
    }
}
