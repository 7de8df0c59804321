//! Income, expense, and savings records in their draft, validated, and stored states.
//!
//! A draft carries raw user input and no identifier. Validation turns it into
//! an id-less record whose amount is known to be positive; only a storage
//! backend can wrap that record into a [`Stored`] value with an identifier.

use std::fmt;

use chrono::NaiveDate;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::common::*;

/// Description used for income entries submitted without one.
pub const DEFAULT_INCOME_DESCRIPTION: &str = "Income";
/// Description used for savings entries submitted without one.
pub const DEFAULT_SAVINGS_DESCRIPTION: &str = "Savings";

/// Reasons a draft or configuration value is refused before persistence.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    InvalidAmount(String),
    InvalidDate(String),
    AmountNotFinite,
    AmountNotPositive(f64),
    EmptyName,
    TaxRateOutOfRange(f64),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidAmount(raw) => write!(f, "`{raw}` is not a valid amount"),
            ValidationError::InvalidDate(raw) => {
                write!(f, "`{raw}` is not a valid date (expected YYYY-MM-DD)")
            }
            ValidationError::AmountNotFinite => f.write_str("amount must be a number"),
            ValidationError::AmountNotPositive(value) => {
                write!(f, "amount must be greater than zero (got {value})")
            }
            ValidationError::EmptyName => f.write_str("expense name must not be empty"),
            ValidationError::TaxRateOutOfRange(value) => {
                write!(f, "tax rate must be between 0 and 1 (got {value})")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Checks that an amount is a finite number strictly above zero.
pub fn validate_amount(amount: f64) -> Result<f64, ValidationError> {
    if !amount.is_finite() {
        return Err(ValidationError::AmountNotFinite);
    }
    if amount <= 0.0 {
        return Err(ValidationError::AmountNotPositive(amount));
    }
    Ok(amount)
}

fn text_or_default(text: &str, fallback: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Common contract for the validated payload of every collection.
pub trait FinanceRecord:
    Dated + Amounted + Clone + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    const KIND: RecordKind;

    /// Free text shown next to the amount (description or expense name).
    fn label(&self) -> &str;
}

/// Unvalidated income input.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IncomeDraft {
    pub date: Option<NaiveDate>,
    pub amount: f64,
    pub description: String,
}

impl IncomeDraft {
    pub fn new(amount: f64) -> Self {
        Self {
            amount,
            ..Self::default()
        }
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Validates the draft; a missing date falls back to `today`.
    pub fn validate(self, today: NaiveDate) -> Result<Income, ValidationError> {
        let amount = validate_amount(self.amount)?;
        Ok(Income {
            date: self.date.unwrap_or(today),
            amount,
            description: text_or_default(&self.description, DEFAULT_INCOME_DESCRIPTION),
        })
    }
}

/// Unvalidated expense (debt) input.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExpenseDraft {
    pub name: String,
    pub amount: f64,
    pub date: Option<NaiveDate>,
}

impl ExpenseDraft {
    pub fn new(name: impl Into<String>, amount: f64) -> Self {
        Self {
            name: name.into(),
            amount,
            date: None,
        }
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn validate(self, today: NaiveDate) -> Result<Expense, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        let amount = validate_amount(self.amount)?;
        Ok(Expense {
            name: name.to_string(),
            amount,
            date: self.date.unwrap_or(today),
        })
    }
}

/// Unvalidated savings contribution input.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SavingsDraft {
    pub date: Option<NaiveDate>,
    pub amount: f64,
    pub description: String,
}

impl SavingsDraft {
    pub fn new(amount: f64) -> Self {
        Self {
            amount,
            ..Self::default()
        }
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn validate(self, today: NaiveDate) -> Result<Savings, ValidationError> {
        let amount = validate_amount(self.amount)?;
        Ok(Savings {
            date: self.date.unwrap_or(today),
            amount,
            description: text_or_default(&self.description, DEFAULT_SAVINGS_DESCRIPTION),
        })
    }
}

/// Validated income entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Income {
    date: NaiveDate,
    amount: f64,
    description: String,
}

impl Income {
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Validated expense or debt entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    name: String,
    amount: f64,
    date: NaiveDate,
}

impl Expense {
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Validated savings contribution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Savings {
    date: NaiveDate,
    amount: f64,
    description: String,
}

impl Savings {
    pub fn description(&self) -> &str {
        &self.description
    }
}

macro_rules! impl_finance_record {
    ($ty:ty, $kind:expr, $label:ident) => {
        impl Dated for $ty {
            fn date(&self) -> NaiveDate {
                self.date
            }
        }

        impl Amounted for $ty {
            fn amount(&self) -> f64 {
                self.amount
            }
        }

        impl FinanceRecord for $ty {
            const KIND: RecordKind = $kind;

            fn label(&self) -> &str {
                &self.$label
            }
        }
    };
}

impl_finance_record!(Income, RecordKind::Income, description);
impl_finance_record!(Expense, RecordKind::Expense, name);
impl_finance_record!(Savings, RecordKind::Savings, description);

/// A record that has been persisted and received its identifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Stored<T> {
    id: RecordId,
    #[serde(flatten)]
    record: T,
}

impl<T> Stored<T> {
    /// Wraps a validated record. Only storage backends assign identifiers.
    pub fn new(id: RecordId, record: T) -> Self {
        Self { id, record }
    }

    pub fn record(&self) -> &T {
        &self.record
    }
}

impl<T> Identifiable for Stored<T> {
    fn id(&self) -> RecordId {
        self.id
    }
}

impl<T: Dated> Dated for Stored<T> {
    fn date(&self) -> NaiveDate {
        self.record.date()
    }
}

impl<T: Amounted> Amounted for Stored<T> {
    fn amount(&self) -> f64 {
        self.record.amount()
    }
}

impl<T: FinanceRecord> Displayable for Stored<T> {
    fn display_label(&self) -> String {
        format!(
            "{} #{} {} {} ({})",
            T::KIND,
            self.id,
            self.record.date(),
            self.record.amount(),
            self.record.label()
        )
    }
}

pub type StoredIncome = Stored<Income>;
pub type StoredExpense = Stored<Expense>;
pub type StoredSavings = Stored<Savings>;
