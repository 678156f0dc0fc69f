//! Rate Tables, Currency Symbols and Conversion Arithmetic
//!
//! This library holds the IO-free half of the converter: the [`RateTable`]
//! returned by a rate provider, the static table of currency symbols, and the
//! rounding arithmetic used to convert between two rates.
//!
//! Symbols are defined declaratively using a macro that generates the
//! [`CurrencySymbol`] enum and its lookups.
//!
//! # Adding a New Symbol
//! Add a line to the `define_symbols!` macro invocation:
//! ```ignore
//! define_symbols! {
//!     // ... existing symbols ...
//!     INR => ("INR", "₹"),
//! }
//! ```
//!
//! # Example
//! ```
//! use exchange_rates::{RateTable, compute_conversion, resolve_symbol};
//!
//! let rates = RateTable::from_pairs([("USD", 0.87), ("EUR", 1.0)]).unwrap();
//!
//! let code = resolve_symbol("$");
//! assert_eq!(code, "USD");
//!
//! let source = rates.get(code).unwrap();
//! let dest = rates.get("EUR").unwrap();
//! assert_eq!(compute_conversion(10.0, source, dest), 8.7);
//! ```

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Rate Table
// ─────────────────────────────────────────────────────────────────────────────

/// Error raised when a rate table cannot be built from provider data.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RateTableError {
    #[error("Invalid rate for {code}: {rate}")]
    InvalidRate { code: String, rate: f64 },
}

/// Rates for every known currency, relative to one provider-chosen base.
///
/// Only ratios between entries are meaningful; the base currency itself is
/// never exposed. Entries keep the order in which the provider listed them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "IndexMap<String, f64>",
    into = "IndexMap<String, f64>"
)]
pub struct RateTable {
    rates: IndexMap<String, f64>,
}

impl RateTable {
    /// Builds a table, rejecting rates that are not finite and positive.
    pub fn new(rates: IndexMap<String, f64>) -> Result<Self, RateTableError> {
        if let Some((code, rate)) = rates
            .iter()
            .find(|(_, rate)| !(rate.is_finite() && **rate > 0.0))
        {
            return Err(RateTableError::InvalidRate {
                code: code.clone(),
                rate: *rate,
            });
        }
        Ok(Self { rates })
    }

    pub fn from_pairs<I, K>(pairs: I) -> Result<Self, RateTableError>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        Self::new(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn get(&self, code: &str) -> Option<f64> {
        self.rates.get(code).copied()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.rates.contains_key(code)
    }

    /// Iterates `(code, rate)` pairs in provider order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.rates.iter().map(|(code, rate)| (code.as_str(), *rate))
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl TryFrom<IndexMap<String, f64>> for RateTable {
    type Error = RateTableError;

    fn try_from(rates: IndexMap<String, f64>) -> Result<Self, Self::Error> {
        Self::new(rates)
    }
}

impl From<RateTable> for IndexMap<String, f64> {
    fn from(table: RateTable) -> Self {
        table.rates
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Conversion Arithmetic
// ─────────────────────────────────────────────────────────────────────────────

/// Converts `amount` from the currency quoted at `source_rate` into the one
/// quoted at `dest_rate`, rounded to 2 decimal places.
///
/// The value is scaled by 100 and then rounded half away from zero:
/// `0.125 -> 0.13`, `-0.125 -> -0.13`. The scaling is itself rounded, which
/// lands decimal ties such as `2.675` (stored as `2.67499...`) exactly on
/// `267.5`, so they round up too: `2.675 -> 2.68`, `1.115 -> 1.12`.
pub fn compute_conversion(amount: f64, source_rate: f64, dest_rate: f64) -> f64 {
    round_to_cents(amount * source_rate / dest_rate)
}

/// Rounds to 2 decimal places: scale by 100, then round half away from zero.
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ─────────────────────────────────────────────────────────────────────────────
// THE MACRO: Defines all symbols, the CurrencySymbol enum, and glyph lookup
// ─────────────────────────────────────────────────────────────────────────────

/// Macro to define currency symbols with an auto-generated enum and lookups.
///
/// # Syntax
/// ```ignore
/// define_symbols! {
///     Name => ("CODE", "GLYPH"),
/// }
/// ```
#[macro_export]
macro_rules! define_symbols {
    (
        $(
            $name:ident => ($code:literal, $glyph:literal)
        ),* $(,)?
    ) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
        #[serde(rename_all = "UPPERCASE")]
        pub enum CurrencySymbol {
            $($name),*
        }

        impl CurrencySymbol {
            pub fn code(&self) -> &'static str {
                match self {
                    $(CurrencySymbol::$name => $code),*
                }
            }

            pub fn glyph(&self) -> &'static str {
                match self {
                    $(CurrencySymbol::$name => $glyph),*
                }
            }

            /// Looks up a symbol by its exact glyph.
            pub fn from_glyph(glyph: &str) -> Option<Self> {
                match glyph {
                    $($glyph => Some(CurrencySymbol::$name),)*
                    _ => None,
                }
            }

            pub fn all() -> &'static [CurrencySymbol] {
                &[$(CurrencySymbol::$name),*]
            }
        }
    };
}

// ─────────────────────────────────────────────────────────────────────────────
// SYMBOL DEFINITIONS - Add new symbols here!
// ─────────────────────────────────────────────────────────────────────────────

define_symbols! {
    EUR => ("EUR", "€"),
    USD => ("USD", "$"),
    CZK => ("CZK", "Kč"),
    GBP => ("GBP", "£"),
    CNY => ("CNY", "¥"),
    RUB => ("RUB", "₽"),
}

impl fmt::Display for CurrencySymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

/// Resolves a currency symbol to its code.
///
/// Anything that is not a known glyph is returned unchanged and treated as a
/// code by the caller.
pub fn resolve_symbol(token: &str) -> &str {
    match CurrencySymbol::from_glyph(token) {
        Some(symbol) => symbol.code(),
        None => token,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
