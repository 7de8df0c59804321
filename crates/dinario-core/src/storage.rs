use std::sync::{Mutex, MutexGuard};

use dinario_domain::{
    Configuration, Dated, Expense, FinanceRecord, Income, MonthRange, RecordId, RecordKind,
    Savings, Stored,
};

use crate::CoreError;

/// Persistent keyed collection of one record kind.
///
/// Implementations serialize their own operations; each call is atomic and
/// durable once it returns `Ok`.
pub trait RecordStore<T: FinanceRecord>: Send + Sync {
    /// Persists a validated record and returns it with its freshly assigned id.
    fn insert(&self, record: T) -> Result<Stored<T>, CoreError>;

    /// Removes the record with `id`. Returns `false` when nothing was removed.
    fn remove(&self, id: RecordId) -> Result<bool, CoreError>;

    /// Returns every record in the collection, in no particular order.
    fn list(&self) -> Result<Vec<Stored<T>>, CoreError>;

    /// Empties the collection. Identifiers already handed out stay retired.
    fn clear(&self) -> Result<(), CoreError>;

    /// Returns the records dated inside `range` (inclusive on both ends).
    fn list_in(&self, range: MonthRange) -> Result<Vec<Stored<T>>, CoreError> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|record| range.contains(record.date()))
            .collect())
    }

    fn len(&self) -> Result<usize, CoreError> {
        Ok(self.list()?.len())
    }
}

/// Holder of the singleton [`Configuration`].
pub trait ConfigurationStore: Send + Sync {
    fn get(&self) -> Result<Option<Configuration>, CoreError>;

    /// Updates the existing configuration or creates the first one.
    fn save(&self, tax_rate: f64) -> Result<Configuration, CoreError>;

    fn clear(&self) -> Result<(), CoreError>;
}

/// The four independent collections a finance tracker reads and writes.
pub trait FinanceStorage: Send + Sync {
    fn income(&self) -> &dyn RecordStore<Income>;
    fn expenses(&self) -> &dyn RecordStore<Expense>;
    fn savings(&self) -> &dyn RecordStore<Savings>;
    fn configuration(&self) -> &dyn ConfigurationStore;

    /// Number of records in the collection for `kind`.
    fn count(&self, kind: RecordKind) -> Result<usize, CoreError> {
        match kind {
            RecordKind::Income => self.income().len(),
            RecordKind::Expense => self.expenses().len(),
            RecordKind::Savings => self.savings().len(),
        }
    }
}

/// Locks a storage mutex, turning poisoning into a storage error.
pub fn lock_state<'a, T>(
    mutex: &'a Mutex<T>,
    collection: &str,
) -> Result<MutexGuard<'a, T>, CoreError> {
    mutex
        .lock()
        .map_err(|_| CoreError::Storage(format!("{collection} store lock poisoned")))
}
