use chrono::NaiveDate;

use crate::errors::ValidationError;
use crate::models::request::{FormState, Frequency, InvestmentRequest};

/// Longest ticker accepted, in characters.
pub const MAX_TICKER_LEN: usize = 15;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Live normalization applied to the ticker input on every keystroke.
#[must_use]
pub fn normalize_ticker_input(raw: &str) -> String {
    raw.to_uppercase()
}

/// Turns raw form contents into a canonical [`InvestmentRequest`].
///
/// Fields are checked in form order (ticker, amount, frequency, dates) and
/// the first failure is returned. Nothing that fails here is ever sent.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestBuilder;

impl RequestBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn build(&self, form: &FormState) -> Result<InvestmentRequest, ValidationError> {
        let ticker = parse_ticker(&form.ticker)?;
        let amount = parse_amount(&form.amount)?;
        let frequency: Frequency = form.frequency.parse()?;
        let (start_date, end_date) = parse_date_range(&form.start_date, &form.end_date)?;

        Ok(InvestmentRequest {
            ticker,
            amount,
            frequency,
            start_date,
            end_date,
        })
    }
}

/// Uppercase and check a security symbol.
///
/// Accepted: 1 to [`MAX_TICKER_LEN`] characters, starting with a letter or
/// `^` (index symbols), then letters, digits, `.`, `-`, `=` or `^`.
pub fn parse_ticker(raw: &str) -> Result<String, ValidationError> {
    let ticker = normalize_ticker_input(raw.trim());
    if ticker.is_empty() {
        return Err(ValidationError::InvalidTicker("ticker is empty".into()));
    }

    let len = ticker.chars().count();
    if len > MAX_TICKER_LEN {
        return Err(ValidationError::InvalidTicker(format!(
            "'{ticker}' is {len} characters, max is {MAX_TICKER_LEN}"
        )));
    }

    if let Some(first) = ticker.chars().next() {
        if !(first.is_ascii_alphabetic() || first == '^') {
            return Err(ValidationError::InvalidTicker(format!(
                "'{ticker}' must start with a letter"
            )));
        }
    }

    for (index, ch) in ticker.chars().enumerate() {
        let valid = ch.is_ascii_alphanumeric() || matches!(ch, '.' | '-' | '=' | '^');
        if !valid {
            return Err(ValidationError::InvalidTicker(format!(
                "'{ticker}' has invalid character '{ch}' at position {index}"
            )));
        }
    }

    Ok(ticker)
}

/// Parse the periodic contribution. Must be a positive finite number.
pub fn parse_amount(raw: &str) -> Result<f64, ValidationError> {
    let trimmed = raw.trim();
    let amount = trimmed
        .parse::<f64>()
        .map_err(|_| ValidationError::InvalidAmount(format!("'{trimmed}' is not a number")))?;

    if !amount.is_finite() {
        return Err(ValidationError::InvalidAmount(format!("'{trimmed}' is not finite")));
    }
    if amount <= 0.0 {
        return Err(ValidationError::InvalidAmount(format!("{amount} must be greater than zero")));
    }

    Ok(amount)
}

/// Parse `YYYY-MM-DD` start and end dates and require `start <= end`.
pub fn parse_date_range(
    raw_start: &str,
    raw_end: &str,
) -> Result<(NaiveDate, NaiveDate), ValidationError> {
    let start = parse_date("start", raw_start)?;
    let end = parse_date("end", raw_end)?;

    if start > end {
        return Err(ValidationError::InvalidDateRange(format!(
            "start date ({start}) must not be after end date ({end})"
        )));
    }

    Ok((start, end))
}

fn parse_date(which: &str, raw: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| {
        ValidationError::InvalidDateRange(format!("{which} date '{trimmed}' is not a YYYY-MM-DD date"))
    })
}

