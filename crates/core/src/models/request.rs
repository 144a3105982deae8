use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::errors::ValidationError;
use crate::services::request_builder::normalize_ticker_input;

/// Largest integer an IEEE-754 double represents exactly (2^53 - 1).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Cadence at which the fixed contribution is simulated as being invested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    pub const ALL: [Frequency; 3] = [Frequency::Daily, Frequency::Weekly, Frequency::Monthly];

    /// Wire form (`"daily"`, `"weekly"`, `"monthly"`).
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Only the exact wire names are accepted.
impl FromStr for Frequency {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            _ => Err(ValidationError::InvalidFrequency(format!(
                "'{s}' is not one of daily, weekly, monthly"
            ))),
        }
    }
}

/// The canonical outbound payload for `POST /api/submit-dates`.
///
/// Only [`RequestBuilder`](crate::services::request_builder::RequestBuilder)
/// produces these, so a value of this type always holds an uppercase ticker,
/// a positive finite amount and `start_date <= end_date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentRequest {
    pub ticker: String,

    /// Periodic contribution.
    #[serde(serialize_with = "serialize_amount")]
    pub amount: f64,

    pub frequency: Frequency,

    pub start_date: NaiveDate,

    pub end_date: NaiveDate,
}

impl InvestmentRequest {
    /// Serialize to the JSON body sent to the backend.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Integral amounts go out as JSON integers (`10`, not `10.0`), matching what
/// a browser's `JSON.stringify` produces for the same number.
fn serialize_amount<S: Serializer>(amount: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if amount.fract() == 0.0 && amount.abs() <= MAX_SAFE_INTEGER {
        serializer.serialize_i64(*amount as i64)
    } else {
        serializer.serialize_f64(*amount)
    }
}

/// Stable identifiers of the input elements of the calculator form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Ticker,
    Amount,
    Frequency,
    StartDate,
    EndDate,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::Ticker,
        FormField::Amount,
        FormField::Frequency,
        FormField::StartDate,
        FormField::EndDate,
    ];

    /// Element id of the field in the page.
    #[must_use]
    pub fn id(&self) -> &'static str {
        match self {
            FormField::Ticker => "ticker",
            FormField::Amount => "amount",
            FormField::Frequency => "frequency",
            FormField::StartDate => "start-date",
            FormField::EndDate => "end-date",
        }
    }

    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        FormField::ALL.into_iter().find(|f| f.id() == id)
    }
}

/// Raw, unvalidated contents of the calculator form.
///
/// This is the state a page adapter mirrors from its input elements. Nothing
/// here is checked until it goes through the request builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    pub ticker: String,
    pub amount: String,
    pub frequency: String,
    pub start_date: String,
    pub end_date: String,
}

impl FormState {
    pub const DEFAULT_TICKER: &'static str = "AAPL";
    pub const DEFAULT_AMOUNT: &'static str = "10";
    pub const DEFAULT_FREQUENCY: Frequency = Frequency::Daily;

    /// First day of the default simulation window.
    #[must_use]
    pub fn default_start_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default()
    }

    /// Form contents on initial load. `today` comes from the caller's clock
    /// and becomes the end date.
    pub fn with_defaults(today: NaiveDate) -> Self {
        Self {
            ticker: Self::DEFAULT_TICKER.to_string(),
            amount: Self::DEFAULT_AMOUNT.to_string(),
            frequency: Self::DEFAULT_FREQUENCY.as_str().to_string(),
            start_date: Self::default_start_date().format("%Y-%m-%d").to_string(),
            end_date: today.format("%Y-%m-%d").to_string(),
        }
    }

    /// Apply an input event to one field.
    ///
    /// The ticker is uppercased on every keystroke, so the value held (and
    /// shown back in the input) is never lowercase.
    pub fn set(&mut self, field: FormField, value: &str) {
        match field {
            FormField::Ticker => self.ticker = normalize_ticker_input(value),
            FormField::Amount => self.amount = value.to_string(),
            FormField::Frequency => self.frequency = value.to_string(),
            FormField::StartDate => self.start_date = value.to_string(),
            FormField::EndDate => self.end_date = value.to_string(),
        }
    }

    #[must_use]
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Ticker => &self.ticker,
            FormField::Amount => &self.amount,
            FormField::Frequency => &self.frequency,
            FormField::StartDate => &self.start_date,
            FormField::EndDate => &self.end_date,
        }
    }
}
