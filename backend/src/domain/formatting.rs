//! Progress percentages and currency display.
//!
//! Currency strings use zero fraction digits. Digit grouping comes from the
//! CLDR data shipped with `num-format`: en-US for dollars, es-CO for pesos.

use num_format::{Locale, ToFormattedString};
use shared::CurrencyCode;

/// Clamp a percentage into [0, 100]. NaN clamps to 0.
pub fn clamp_percentage(value: f64) -> f64 {
    // f64::max returns the non-NaN operand
    value.max(0.0).min(100.0)
}

/// `part` as a clamped percentage of `whole`; 0 when `whole` is not positive
pub fn ratio_percentage(part: f64, whole: f64) -> f64 {
    if !whole.is_finite() || whole <= 0.0 {
        return 0.0;
    }
    clamp_percentage(part / whole * 100.0)
}

/// Share of the target already saved, clamped into [0, 100]
pub fn completion_percentage(saved_amount: f64, target_amount: f64) -> f64 {
    ratio_percentage(saved_amount, target_amount)
}

struct CurrencyStyle {
    locale: Locale,
    symbol: &'static str,
    /// Between the symbol and the digits
    spacing: &'static str,
}

fn currency_style(currency: CurrencyCode) -> CurrencyStyle {
    match currency {
        CurrencyCode::Usd => CurrencyStyle {
            locale: Locale::en,
            symbol: "$",
            spacing: "",
        },
        CurrencyCode::Cop => CurrencyStyle {
            locale: Locale::es_CO,
            symbol: "$",
            spacing: "\u{a0}",
        },
    }
}

/// Format an amount as whole units of `currency`, e.g. `$1,235` or `$ 2.800.000`.
/// Non-finite amounts render as zero.
pub fn format_currency(amount: f64, currency: CurrencyCode) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let rounded = amount.round();
    let style = currency_style(currency);

    // Saturates for amounts beyond u64
    let units = rounded.abs() as u64;
    let digits = units.to_formatted_string(&style.locale);
    let sign = if rounded < 0.0 { "-" } else { "" };

    format!("{}{}{}{}", sign, style.symbol, style.spacing, digits)
}

/// Currency formatting bound to the configured currency
#[derive(Debug, Clone, Copy, Default)]
pub struct CurrencyFormatter {
    currency: CurrencyCode,
}

impl CurrencyFormatter {
    pub fn new(currency: CurrencyCode) -> Self {
        Self { currency }
    }

    pub fn currency(&self) -> CurrencyCode {
        self.currency
    }

    pub fn format(&self, amount: f64) -> String {
        format_currency(amount, self.currency)
    }

    /// Amount with an explicit plus sign, as shown on contribution buttons
    pub fn format_signed(&self, amount: f64) -> String {
        let formatted = self.format(amount);
        if formatted.starts_with('-') {
            formatted
        } else {
            format!("+{}", formatted)
        }
    }
}
