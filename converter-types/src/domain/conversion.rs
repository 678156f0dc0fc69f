//! Conversion request and result.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A single conversion to perform.
///
/// Currencies may be given as codes (`"USD"`) or symbols (`"$"`). Without an
/// output currency the amount is converted into every known currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRequest {
    pub amount: f64,
    pub input_currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_currency: Option<String>,
}

impl ConversionRequest {
    /// Converts `amount` of `input_currency` into all known currencies.
    pub fn new(amount: f64, input_currency: impl Into<String>) -> Self {
        Self {
            amount,
            input_currency: input_currency.into(),
            output_currency: None,
        }
    }

    /// Restricts the conversion to a single target currency.
    pub fn to(mut self, output_currency: impl Into<String>) -> Self {
        self.output_currency = Some(output_currency.into());
        self
    }
}

/// The converted amount and the resolved input currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ConversionInput {
    /// Amount as requested
    #[schema(example = 1.0)]
    pub amount: f64,
    /// Input currency code, after symbol resolution
    #[schema(example = "USD")]
    pub currency: String,
}

/// Result of a conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ConversionResult {
    pub input: ConversionInput,
    /// Converted amounts keyed by currency code, rounded to 2 decimals.
    /// Entries follow the order of the rate table.
    #[schema(value_type = std::collections::HashMap<String, f64>, example = json!({"EUR": 0.87}))]
    pub output: IndexMap<String, f64>,
}
