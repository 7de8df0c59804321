//! Filesystem-backed JSON persistence for the finance collections.
//!
//! Each collection lives in its own document under the storage directory
//! (`income.json`, `expenses.json`, `savings.json`, `configuration.json`).
//! Documents carry the identifier high-water mark next to the records, so ids
//! stay retired across deletes and restarts. Every write goes to a sibling
//! `.tmp` file that is renamed over the original.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    sync::Mutex,
};

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use dinario_core::{lock_state, ConfigurationStore, CoreError, FinanceStorage, RecordStore};
use dinario_domain::{
    Collection, Configuration, ConfigurationSlot, Expense, FinanceRecord, Identifiable, Income,
    RecordId, Savings, Stored,
};

const DOCUMENT_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";
const CONFIGURATION_DOCUMENT: &str = "configuration";

/// One collection document plus its in-memory copy.
///
/// The lock is held across the disk write so that concurrent writers are
/// serialized and the cached state only changes after the write succeeded.
#[derive(Debug)]
pub struct JsonCollection<T> {
    path: PathBuf,
    state: Mutex<Collection<T>>,
}

impl<T: FinanceRecord> JsonCollection<T> {
    fn open(dir: &Path) -> Result<Self, CoreError> {
        let path = document_path(dir, T::KIND.collection());
        let mut collection: Collection<T> = load_document(&path)?.unwrap_or_default();
        collection
            .normalize()
            .map_err(|err| CoreError::Storage(format!("{}: {}", path.display(), err)))?;
        debug!(
            collection = T::KIND.collection(),
            records = collection.len(),
            next_id = %collection.next_id(),
            "loaded collection"
        );
        Ok(Self {
            path,
            state: Mutex::new(collection),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn update<R>(
        &self,
        change: impl FnOnce(&mut Collection<T>) -> Result<R, CoreError>,
    ) -> Result<R, CoreError> {
        let mut state = lock_state(&self.state, T::KIND.collection())?;
        let mut next = state.clone();
        let result = change(&mut next)?;
        save_document(&self.path, &next)?;
        *state = next;
        Ok(result)
    }
}

impl<T: FinanceRecord> RecordStore<T> for JsonCollection<T> {
    fn insert(&self, record: T) -> Result<Stored<T>, CoreError> {
        self.update(|collection| Ok(collection.insert(record)?))
    }

    fn remove(&self, id: RecordId) -> Result<bool, CoreError> {
        {
            let state = lock_state(&self.state, T::KIND.collection())?;
            if state.get(id).is_none() {
                return Ok(false);
            }
        }
        self.update(|collection| Ok(collection.remove(id).is_some()))
    }

    fn list(&self) -> Result<Vec<Stored<T>>, CoreError> {
        let state = lock_state(&self.state, T::KIND.collection())?;
        Ok(state.records().to_vec())
    }

    fn clear(&self) -> Result<(), CoreError> {
        self.update(|collection| {
            collection.clear();
            Ok(())
        })
    }

    fn len(&self) -> Result<usize, CoreError> {
        Ok(lock_state(&self.state, T::KIND.collection())?.len())
    }
}

/// The configuration document.
#[derive(Debug)]
pub struct JsonConfiguration {
    path: PathBuf,
    slot: Mutex<ConfigurationSlot>,
}

impl JsonConfiguration {
    fn open(dir: &Path) -> Result<Self, CoreError> {
        let path = document_path(dir, CONFIGURATION_DOCUMENT);
        let slot: ConfigurationSlot = load_document(&path)?.unwrap_or_default();
        Ok(Self {
            path,
            slot: Mutex::new(slot),
        })
    }
}

impl ConfigurationStore for JsonConfiguration {
    fn get(&self) -> Result<Option<Configuration>, CoreError> {
        Ok(lock_state(&self.slot, CONFIGURATION_DOCUMENT)?.get())
    }

    fn save(&self, tax_rate: f64) -> Result<Configuration, CoreError> {
        let mut slot = lock_state(&self.slot, CONFIGURATION_DOCUMENT)?;
        let mut next = *slot;
        let configuration = next.upsert(tax_rate)?;
        save_document(&self.path, &next)?;
        *slot = next;
        Ok(configuration)
    }

    fn clear(&self) -> Result<(), CoreError> {
        let mut slot = lock_state(&self.slot, CONFIGURATION_DOCUMENT)?;
        let mut next = *slot;
        next.clear();
        save_document(&self.path, &next)?;
        *slot = next;
        Ok(())
    }
}

/// Finance storage rooted at a directory of JSON documents.
#[derive(Debug)]
pub struct JsonStorage {
    root: PathBuf,
    income: JsonCollection<Income>,
    expenses: JsonCollection<Expense>,
    savings: JsonCollection<Savings>,
    configuration: JsonConfiguration,
}

impl JsonStorage {
    /// Opens (or creates) the storage directory and loads every document.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        let storage = Self {
            income: JsonCollection::open(&root)?,
            expenses: JsonCollection::open(&root)?,
            savings: JsonCollection::open(&root)?,
            configuration: JsonConfiguration::open(&root)?,
            root,
        };
        debug!(root = %storage.root.display(), "opened json storage");
        Ok(storage)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the document backing `collection` (e.g. `"income"`).
    pub fn document_path(&self, collection: &str) -> PathBuf {
        document_path(&self.root, collection)
    }
}

impl FinanceStorage for JsonStorage {
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

/// Exports every record of a collection document at `path`, e.g. for inspection tools.
pub fn load_records_from_path<T: FinanceRecord>(path: &Path) -> Result<Vec<Stored<T>>, CoreError> {
    let collection: Collection<T> = load_document(path)?.unwrap_or_default();
    let mut records = collection.records().to_vec();
    records.sort_by_key(|record| record.id());
    Ok(records)
}

fn document_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.{}", name, DOCUMENT_EXTENSION))
}

fn load_document<D: DeserializeOwned>(path: &Path) -> Result<Option<D>, CoreError> {
    if !path.exists() {
        return Ok(None);
    }
    let data = fs::read_to_string(path)?;
    if data.trim().is_empty() {
        warn!(path = %path.display(), "empty document treated as new");
        return Ok(None);
    }
    serde_json::from_str(&data)
        .map(Some)
        .map_err(|err| CoreError::Serde(format!("{}: {}", path.display(), err)))
}

fn save_document<D: Serialize>(path: &Path, document: &D) -> Result<(), CoreError> {
    let data =
        serde_json::to_string_pretty(document).map_err(|err| CoreError::Serde(err.to_string()))?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &data)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tmp_path_keeps_original_extension() {
        let tmp = tmp_path(Path::new("/data/income.json"));
        assert_eq!(tmp, PathBuf::from("/data/income.json.tmp"));
    }

    #[test]
    fn document_names_follow_collection() {
        assert_eq!(
            document_path(Path::new("store"), "expenses"),
            Path::new("store").join("expenses.json")
        );
    }
}
