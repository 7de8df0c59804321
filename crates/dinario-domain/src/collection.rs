//! Keyed in-memory collections that assign identifiers.
//!
//! Storage backends hold one [`Collection`] per record kind and one
//! [`ConfigurationSlot`]; persistence is their concern, id assignment is not.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{common::*, record::Stored, settings::Configuration};

/// Raised when a collection has handed out every representable identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdsExhausted {
    pub last: RecordId,
}

impl fmt::Display for IdsExhausted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no identifier left after {}", self.last)
    }
}

impl std::error::Error for IdsExhausted {}

fn successor(id: RecordId) -> Result<RecordId, IdsExhausted> {
    id.next().ok_or(IdsExhausted { last: id })
}

/// Records of one kind plus the next identifier to hand out.
///
/// `next_id` only ever grows: deleting or clearing records never makes an
/// identifier available again.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Collection<T> {
    next_id: RecordId,
    records: Vec<Stored<T>>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            next_id: RecordId(1),
            records: Vec::new(),
        }
    }
}

impl<T: Clone> Collection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> RecordId {
        self.next_id
    }

    /// Assigns the next identifier to `record` and keeps it.
    pub fn insert(&mut self, record: T) -> Result<Stored<T>, IdsExhausted> {
        let following = successor(self.next_id)?;
        let stored = Stored::new(self.next_id, record);
        self.next_id = following;
        self.records.push(stored.clone());
        Ok(stored)
    }

    /// Removes the record with `id`, returning it when it existed.
    pub fn remove(&mut self, id: RecordId) -> Option<Stored<T>> {
        let position = self.records.iter().position(|record| record.id() == id)?;
        Some(self.records.remove(position))
    }

    pub fn get(&self, id: RecordId) -> Option<&Stored<T>> {
        self.records.iter().find(|record| record.id() == id)
    }

    pub fn records(&self) -> &[Stored<T>] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drops every record but keeps the identifier high-water mark.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Repairs a high-water mark that lags behind the stored ids, e.g. after a
    /// hand-edited data file.
    pub fn normalize(&mut self) -> Result<(), IdsExhausted> {
        if let Some(max) = self.records.iter().map(|record| record.id()).max() {
            if max >= self.next_id {
                self.next_id = successor(max)?;
            }
        }
        Ok(())
    }
}

/// Holder for the singleton [`Configuration`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ConfigurationSlot {
    next_id: RecordId,
    current: Option<Configuration>,
}

impl Default for ConfigurationSlot {
    fn default() -> Self {
        Self {
            next_id: RecordId(1),
            current: None,
        }
    }
}

impl ConfigurationSlot {
    pub fn get(&self) -> Option<Configuration> {
        self.current
    }

    /// Updates the existing configuration in place, or creates it.
    pub fn upsert(&mut self, tax_rate: f64) -> Result<Configuration, IdsExhausted> {
        let configuration = match self.current {
            Some(existing) => Configuration::new(existing.id, tax_rate),
            None => {
                let following = successor(self.next_id)?;
                let created = Configuration::new(self.next_id, tax_rate);
                self.next_id = following;
                created
            }
        };
        self.current = Some(configuration);
        Ok(configuration)
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}
