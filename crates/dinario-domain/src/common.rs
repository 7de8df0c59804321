//! Shared traits, identifiers, and enums for finance records.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Store-assigned identifier for a persisted record.
///
/// Identifiers grow monotonically within a collection and are never reused,
/// so a larger id always means a later insertion.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl RecordId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }

    /// Returns the identifier that follows this one, or `None` at `u64::MAX`.
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for RecordId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Exposes the stable identifier of a persisted entity.
pub trait Identifiable {
    fn id(&self) -> RecordId;
}

/// Provides the calendar day an entry belongs to.
pub trait Dated {
    fn date(&self) -> NaiveDate;
}

/// Supplies a common contract for retrieving currency amounts.
pub trait Amounted {
    fn amount(&self) -> f64;
}

/// Converts an entity into a user-facing display label.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Enumerates the three independent record collections.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Income,
    Expense,
    Savings,
}

impl RecordKind {
    pub const ALL: [RecordKind; 3] = [RecordKind::Income, RecordKind::Expense, RecordKind::Savings];

    /// Collection name used by storage backends.
    pub fn collection(self) -> &'static str {
        match self {
            RecordKind::Income => "income",
            RecordKind::Expense => "expenses",
            RecordKind::Savings => "savings",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RecordKind::Income => "Income",
            RecordKind::Expense => "Expense",
            RecordKind::Savings => "Savings",
        };
        f.write_str(label)
    }
}
