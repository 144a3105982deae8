use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

/// Locale used for tooltip and axis currency labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "de-DE")]
    DeDe,
    #[serde(rename = "fr-FR")]
    FrFr,
}

impl Locale {
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Locale::EnUs => "en-US",
            Locale::DeDe => "de-DE",
            Locale::FrFr => "fr-FR",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Locale {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().replace('_', "-").to_ascii_lowercase().as_str() {
            "en-us" | "en" => Ok(Locale::EnUs),
            "de-de" | "de" => Ok(Locale::DeDe),
            "fr-fr" | "fr" => Ok(Locale::FrFr),
            _ => Err(CoreError::Config(format!("Unsupported locale: {s}"))),
        }
    }
}

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Origin of the simulation backend, e.g. `http://127.0.0.1:8017`.
    pub base_url: String,

    pub locale: Locale,

    /// No timeout unless set; the transport default applies.
    pub request_timeout_secs: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            locale: Locale::default(),
            request_timeout_secs: None,
        }
    }
}

impl Settings {
    pub const DEFAULT_BASE_URL: &'static str = "http://127.0.0.1:8017";
    pub const SUBMIT_PATH: &'static str = "/api/submit-dates";

    pub const ENV_BASE_URL: &'static str = "DCA_BASE_URL";
    pub const ENV_LOCALE: &'static str = "DCA_LOCALE";
    pub const ENV_TIMEOUT_SECS: &'static str = "DCA_TIMEOUT_SECS";

    /// Defaults overridden by `DCA_BASE_URL`, `DCA_LOCALE` and `DCA_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`Settings::from_env`], reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();
        settings.apply_lookup(lookup)?;
        Ok(settings)
    }

    /// Override fields that are set in the environment.
    pub fn apply_env(&mut self) -> Result<(), CoreError> {
        self.apply_lookup(|key| std::env::var(key).ok())
    }

    /// Override fields whose variable `lookup` returns a non-blank value for.
    pub fn apply_lookup<F>(&mut self, lookup: F) -> Result<(), CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(Self::ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            self.base_url = url.trim().to_string();
        }
        if let Some(locale) = lookup(Self::ENV_LOCALE).filter(|v| !v.trim().is_empty()) {
            self.locale = locale.parse()?;
        }
        if let Some(secs) = lookup(Self::ENV_TIMEOUT_SECS).filter(|v| !v.trim().is_empty()) {
            let secs = secs.trim().parse::<u64>().map_err(|e| {
                CoreError::Config(format!("{} must be a whole number of seconds: {e}", Self::ENV_TIMEOUT_SECS))
            })?;
            self.request_timeout_secs = Some(secs);
        }
        Ok(())
    }

    /// Parse a JSON config file. Missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        serde_json::from_str(json).map_err(|e| CoreError::Config(format!("Invalid settings JSON: {e}")))
    }

    /// Full URL of the submission endpoint.
    pub fn submit_url(&self) -> Result<reqwest::Url, CoreError> {
        let base = self.base_url.trim().trim_end_matches('/');
        if base.is_empty() {
            return Err(CoreError::Config("base_url is empty".into()));
        }
        let url = reqwest::Url::parse(&format!("{base}{}", Self::SUBMIT_PATH))
            .map_err(|e| CoreError::Config(format!("Invalid base_url '{}': {e}", self.base_url)))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(CoreError::Config(format!("Unsupported URL scheme: {other}"))),
        }
    }
}
