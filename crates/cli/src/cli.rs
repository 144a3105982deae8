//! Command-line arguments for `dca-calc`.
//!
//! Every form field has a flag; unset flags keep the form's load-time
//! defaults (AAPL, 10, daily, 2024-01-01, today).
//!
//! ```bash
//! dca-calc --ticker msft --amount 25 --frequency weekly --start-date 2023-01-01
//! dca-calc --base-url http://localhost:8017 --format json --output results.json
//! ```

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use dca_calculator_core::models::request::{FormField, FormState};
use dca_calculator_core::models::settings::{Locale, Settings};

use crate::error::CliError;

#[derive(Debug, Parser)]
#[command(
    name = "dca-calc",
    version,
    about = "Compare daily, weekly and monthly dollar-cost averaging for a ticker"
)]
pub struct Cli {
    /// Ticker symbol (uppercased automatically).
    #[arg(long)]
    pub ticker: Option<String>,

    /// Contribution per period.
    #[arg(long)]
    pub amount: Option<String>,

    /// Contribution frequency: daily, weekly or monthly (any case).
    #[arg(long)]
    pub frequency: Option<String>,

    /// First day of the simulation (YYYY-MM-DD).
    #[arg(long)]
    pub start_date: Option<String>,

    /// Last day of the simulation (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub end_date: Option<String>,

    /// Backend origin. Overrides DCA_BASE_URL.
    #[arg(long)]
    pub base_url: Option<String>,

    /// Locale for chart labels (en-US, de-DE, fr-FR). Overrides DCA_LOCALE.
    #[arg(long)]
    pub locale: Option<String>,

    /// Request timeout in seconds. Overrides DCA_TIMEOUT_SECS. No timeout by default.
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// JSON settings file; environment and flags are applied on top.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Html)]
    pub format: OutputFormat,

    /// Write output to this file instead of stdout.
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Standalone HTML page with the table and the chart.
    Html,
    /// `{"table": ..., "chart": ...}`
    Json,
}

impl Cli {
    /// Settings from the config file (if any), then environment, then flags.
    pub fn settings(&self) -> Result<Settings, CliError> {
        let mut settings = match &self.config {
            Some(path) => Settings::from_json(&std::fs::read_to_string(path)?)?,
            None => Settings::default(),
        };

        settings.apply_env()?;

        if let Some(url) = &self.base_url {
            settings.base_url = url.clone();
        }
        if let Some(locale) = &self.locale {
            settings.locale = locale.parse::<Locale>()?;
        }
        if let Some(secs) = self.timeout_secs {
            settings.request_timeout_secs = Some(secs);
        }

        Ok(settings)
    }

    /// Type the flag values into the form, field by field.
    pub fn fill_form(&self, form: &mut FormState) {
        let frequency = self.frequency.as_deref().map(normalize_frequency_flag);
        let fields = [
            (FormField::Ticker, self.ticker.clone()),
            (FormField::Amount, self.amount.clone()),
            (FormField::Frequency, frequency),
            (FormField::StartDate, self.start_date.clone()),
            (FormField::EndDate, self.end_date.clone()),
        ];
        for (field, value) in fields {
            if let Some(value) = value {
                form.set(field, &value);
            }
        }
    }
}

/// The form only takes the lowercase wire names; a flag is typed by hand.
fn normalize_frequency_flag(raw: &str) -> String {
    raw.trim().to_ascii_lowercase()
}
