use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::errors::CoreError;

/// One of the three contribution cadences the backend compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Daily,
    Weekly,
    Monthly,
}

impl Strategy {
    /// Display order, used for both table sections and chart categories.
    pub const ALL: [Strategy; 3] = [Strategy::Daily, Strategy::Weekly, Strategy::Monthly];

    /// Key in the response's `results` object.
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            Strategy::Daily => "daily",
            Strategy::Weekly => "weekly",
            Strategy::Monthly => "monthly",
        }
    }

    /// Human-readable category label (`"Daily"`, ...).
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Strategy::Daily => "Daily",
            Strategy::Weekly => "Weekly",
            Strategy::Monthly => "Monthly",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Simulated outcome of a single strategy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrategyOutcome {
    /// Cumulative sum of all simulated contributions.
    pub total_invested: f64,

    /// Holdings value minus total invested. May be negative.
    pub profit_loss: f64,
}

impl StrategyOutcome {
    pub fn new(total_invested: f64, profit_loss: f64) -> Self {
        Self {
            total_invested,
            profit_loss,
        }
    }

    /// Break-even counts as favorable.
    #[must_use]
    pub fn is_favorable(&self) -> bool {
        self.profit_loss >= 0.0
    }
}

/// The `results` object: one outcome per strategy, all three required.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrategyResults {
    pub daily: StrategyOutcome,
    pub weekly: StrategyOutcome,
    pub monthly: StrategyOutcome,
}

impl StrategyResults {
    #[must_use]
    pub fn get(&self, strategy: Strategy) -> &StrategyOutcome {
        match strategy {
            Strategy::Daily => &self.daily,
            Strategy::Weekly => &self.weekly,
            Strategy::Monthly => &self.monthly,
        }
    }

    /// Outcomes in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Strategy, &StrategyOutcome)> {
        Strategy::ALL.into_iter().map(move |s| (s, self.get(s)))
    }
}

/// Response body of `POST /api/submit-dates`.
///
/// The echoed request parameters are optional: they are shown when the
/// backend sends them and skipped otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentResult {
    pub symbol: String,

    #[serde(default, deserialize_with = "deserialize_amount_echo", skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,

    pub results: StrategyResults,
}

impl InvestmentResult {
    /// Parse and check a response body. Anything that does not match the
    /// expected shape is a [`CoreError::MalformedResponse`].
    pub fn from_json(body: &str) -> Result<Self, CoreError> {
        let result: InvestmentResult = serde_json::from_str(body)?;
        result.validate()?;
        Ok(result)
    }

    /// Reject values the renderer cannot present meaningfully.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.symbol.trim().is_empty() {
            return Err(CoreError::MalformedResponse("empty symbol".into()));
        }
        for (strategy, outcome) in self.results.iter() {
            if !outcome.total_invested.is_finite() || outcome.total_invested < 0.0 {
                return Err(CoreError::MalformedResponse(format!(
                    "{} total_invested must be a non-negative number, got {}",
                    strategy.key(),
                    outcome.total_invested
                )));
            }
            if !outcome.profit_loss.is_finite() {
                return Err(CoreError::MalformedResponse(format!(
                    "{} profit_loss must be a finite number",
                    strategy.key()
                )));
            }
        }
        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

/// The backend echoes `amount` as it received it; accept `10`, `10.5` or `"10"`.
fn deserialize_amount_echo<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrText>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrText::Number(n)) => Ok(Some(n)),
        Some(NumberOrText::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("amount '{s}' is not a number"))),
    }
}
