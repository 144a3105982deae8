use crate::models::settings::Locale;

/// Table cells: `$` then the value to two decimals, sign after the symbol
/// (`$100.00`, `$-5.00`).
#[must_use]
pub fn format_table_currency(value: f64) -> String {
    format!("${value:.2}")
}

/// Locale-aware USD formatting for chart labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CurrencyFormatter {
    locale: Locale,
}

impl CurrencyFormatter {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    #[must_use]
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Two decimals with thousands separators (`$1,234.56` in en-US).
    #[must_use]
    pub fn format(&self, value: f64) -> String {
        self.format_with_decimals(value, 2)
    }

    /// Axis ticks: whole values drop the cents, fractional ones keep two decimals.
    #[must_use]
    pub fn format_tick(&self, value: f64) -> String {
        let cents = (value.fract() * 100.0).round().abs();
        if cents == 0.0 || cents == 100.0 {
            self.format_with_decimals(value, 0)
        } else {
            self.format_with_decimals(value, 2)
        }
    }

    fn format_with_decimals(&self, value: f64, decimals: u32) -> String {
        if !value.is_finite() {
            return value.to_string();
        }

        // Split before scaling: the fractional part is exact, so cents stay
        // right even where `value * 100` no longer fits the mantissa.
        let abs = value.abs();
        let mut whole = abs.trunc();
        let scale = 10u64.pow(decimals);
        let mut units = ((abs - whole) * scale as f64).round() as u64;
        if units >= scale {
            whole += 1.0;
            units -= scale;
        }
        let negative = value < 0.0 && (whole > 0.0 || units > 0);

        let whole_digits = if whole < 2f64.powi(127) {
            (whole as u128).to_string()
        } else {
            format!("{whole:.0}")
        };
        let fraction = format!("{units:0width$}", width = decimals as usize);

        let (group, decimal) = self.separators();
        let mut number = group_digits(&whole_digits, group);
        if decimals > 0 {
            number.push(decimal);
            number.push_str(&fraction);
        }

        let sign = if negative { "-" } else { "" };
        match self.locale {
            Locale::EnUs => format!("{sign}${number}"),
            Locale::DeDe | Locale::FrFr => format!("{sign}{number}\u{a0}$"),
        }
    }

    fn separators(&self) -> (char, char) {
        match self.locale {
            Locale::EnUs => (',', '.'),
            Locale::DeDe => ('.', ','),
            Locale::FrFr => ('\u{202f}', ','),
        }
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}
