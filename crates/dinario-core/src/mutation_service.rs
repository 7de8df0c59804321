//! Validated writes against the record and configuration stores.

use tracing::{info, warn};

use dinario_domain::{
    validate_tax_rate, Configuration, Expense, ExpenseDraft, FinanceRecord, Identifiable, Income,
    IncomeDraft, RecordId, RecordKind, Savings, SavingsDraft, ValidationError,
};

use crate::{
    storage::{FinanceStorage, RecordStore},
    time::Clock,
    CoreError,
};

/// Write side of the tracker. Every operation either persists fully or returns an error.
pub struct MutationService;

impl MutationService {
    pub fn add_income(
        storage: &dyn FinanceStorage,
        clock: &dyn Clock,
        draft: IncomeDraft,
    ) -> Result<RecordId, CoreError> {
        let record = draft.validate(clock.today()).map_err(rejected::<Income>)?;
        insert(storage.income(), record)
    }

    pub fn add_expense(
        storage: &dyn FinanceStorage,
        clock: &dyn Clock,
        draft: ExpenseDraft,
    ) -> Result<RecordId, CoreError> {
        let record = draft.validate(clock.today()).map_err(rejected::<Expense>)?;
        insert(storage.expenses(), record)
    }

    pub fn add_savings(
        storage: &dyn FinanceStorage,
        clock: &dyn Clock,
        draft: SavingsDraft,
    ) -> Result<RecordId, CoreError> {
        let record = draft.validate(clock.today()).map_err(rejected::<Savings>)?;
        insert(storage.savings(), record)
    }

    /// Removes one record. Deleting an id that does not exist is a no-op reported as `false`.
    pub fn delete(
        storage: &dyn FinanceStorage,
        kind: RecordKind,
        id: RecordId,
    ) -> Result<bool, CoreError> {
        let removed = match kind {
            RecordKind::Income => storage.income().remove(id)?,
            RecordKind::Expense => storage.expenses().remove(id)?,
            RecordKind::Savings => storage.savings().remove(id)?,
        };
        if removed {
            info!(%kind, %id, "deleted record");
        } else {
            warn!(%kind, %id, "delete ignored: record not found");
        }
        Ok(removed)
    }

    /// Like [`MutationService::delete`] but reports a missing record as [`CoreError::NotFound`].
    pub fn delete_existing(
        storage: &dyn FinanceStorage,
        kind: RecordKind,
        id: RecordId,
    ) -> Result<(), CoreError> {
        if Self::delete(storage, kind, id)? {
            Ok(())
        } else {
            Err(CoreError::NotFound { kind, id })
        }
    }

    /// Updates the singleton configuration, creating it on first save.
    pub fn save_configuration(
        storage: &dyn FinanceStorage,
        tax_rate: f64,
    ) -> Result<Configuration, CoreError> {
        let tax_rate = validate_tax_rate(tax_rate).map_err(|err| {
            warn!(error = %err, "configuration rejected");
            CoreError::from(err)
        })?;
        let configuration = storage.configuration().save(tax_rate)?;
        info!(id = %configuration.id, tax_rate, "saved configuration");
        Ok(configuration)
    }

    /// Deletes the configuration and every record, in that order.
    ///
    /// Collections are cleared one at a time; a failure part-way leaves the
    /// earlier collections empty and reports the error.
    pub fn reset_all(storage: &dyn FinanceStorage) -> Result<(), CoreError> {
        storage.configuration().clear()?;
        storage.income().clear()?;
        storage.expenses().clear()?;
        storage.savings().clear()?;
        info!("reset all finance data");
        Ok(())
    }
}

fn insert<T: FinanceRecord>(store: &dyn RecordStore<T>, record: T) -> Result<RecordId, CoreError> {
    let stored = store.insert(record)?;
    info!(kind = %T::KIND, id = %stored.id(), "added record");
    Ok(stored.id())
}

fn rejected<T: FinanceRecord>(err: ValidationError) -> CoreError {
    warn!(kind = %T::KIND, error = %err, "record rejected");
    CoreError::from(err)
}
