use std::sync::Mutex;

use dinario_domain::{
    Collection, Configuration, ConfigurationSlot, Expense, FinanceRecord, Income, RecordId,
    Savings, Stored,
};

use crate::{
    storage::{lock_state, ConfigurationStore, FinanceStorage, RecordStore},
    CoreError,
};

/// One record collection guarded by its own lock.
#[derive(Debug)]
pub struct MemoryCollection<T> {
    state: Mutex<Collection<T>>,
}

impl<T> Default for MemoryCollection<T> {
    fn default() -> Self {
        Self {
            state: Mutex::new(Collection::default()),
        }
    }
}

impl<T: FinanceRecord> RecordStore<T> for MemoryCollection<T> {
    fn insert(&self, record: T) -> Result<Stored<T>, CoreError> {
        let mut state = lock_state(&self.state, T::KIND.collection())?;
        Ok(state.insert(record)?)
    }

    fn remove(&self, id: RecordId) -> Result<bool, CoreError> {
        let mut state = lock_state(&self.state, T::KIND.collection())?;
        Ok(state.remove(id).is_some())
    }

    fn list(&self) -> Result<Vec<Stored<T>>, CoreError> {
        let state = lock_state(&self.state, T::KIND.collection())?;
        Ok(state.records().to_vec())
    }

    fn clear(&self) -> Result<(), CoreError> {
        lock_state(&self.state, T::KIND.collection())?.clear();
        Ok(())
    }

    fn len(&self) -> Result<usize, CoreError> {
        Ok(lock_state(&self.state, T::KIND.collection())?.len())
    }
}

#[derive(Debug, Default)]
pub struct MemoryConfiguration {
    slot: Mutex<ConfigurationSlot>,
}

impl ConfigurationStore for MemoryConfiguration {
    fn get(&self) -> Result<Option<Configuration>, CoreError> {
        Ok(lock_state(&self.slot, "configuration")?.get())
    }

    fn save(&self, tax_rate: f64) -> Result<Configuration, CoreError> {
        Ok(lock_state(&self.slot, "configuration")?.upsert(tax_rate)?)
    }

    fn clear(&self) -> Result<(), CoreError> {
        lock_state(&self.slot, "configuration")?.clear();
        Ok(())
    }
}

/// Volatile storage used by tests, benchmarks, and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    income: MemoryCollection<Income>,
    expenses: MemoryCollection<Expense>,
    savings: MemoryCollection<Savings>,
    configuration: MemoryConfiguration,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FinanceStorage for MemoryStorage {
    fn income(&self) -> &dyn RecordStore<Income> {
        &self.income
    }

    fn expenses(&self) -> &dyn RecordStore<Expense> {
        &self.expenses
    }

    fn savings(&self) -> &dyn RecordStore<Savings> {
        &self.savings
    }

    fn configuration(&self) -> &dyn ConfigurationStore {
        &self.configuration
    }
}
