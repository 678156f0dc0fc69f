//! Conversion Application Service
//!
//! Resolves currency symbols, applies the rate arithmetic and assembles the
//! result over one rate-table fetch. Contains NO infrastructure logic.

use indexmap::IndexMap;
use tracing::instrument;

use converter_types::{
    ConversionInput, ConversionRequest, ConversionResult, ConvertError, RateProvider, RateTable,
};

use crate::RateStore;

pub use exchange_rates::{compute_conversion, resolve_symbol};

/// Application service for currency conversion.
///
/// Generic over `P: RateProvider` - the upstream adapter is injected at
/// compile time, which keeps tests free of network access.
pub struct ConversionService<P: RateProvider> {
    rates: RateStore<P>,
}

impl<P: RateProvider> ConversionService<P> {
    /// Creates a conversion service on top of the given rate store.
    pub fn new(rates: RateStore<P>) -> Self {
        Self { rates }
    }

    /// Converts `amount` of `input_currency` into `output_currency`, or into
    /// every currency of the rate table when no output is given.
    #[instrument(skip(self))]
    pub async fn convert(
        &self,
        amount: f64,
        input_currency: &str,
        output_currency: Option<&str>,
    ) -> Result<ConversionResult, ConvertError> {
        let rates = self.rates.get_rates().await?;

        let input = resolve_symbol(input_currency);
        let source_rate = rate_of(&rates, input)?;

        let output: IndexMap<String, f64> = match output_currency {
            None => rates
                .iter()
                .map(|(code, rate)| {
                    (
                        code.to_string(),
                        compute_conversion(amount, source_rate, rate),
                    )
                })
                .collect(),
            Some(token) => {
                let code = resolve_symbol(token);
                let dest_rate = rate_of(&rates, code)?;
                IndexMap::from([(
                    code.to_string(),
                    compute_conversion(amount, source_rate, dest_rate),
                )])
            }
        };

        Ok(ConversionResult {
            input: ConversionInput {
                amount,
                currency: input.to_string(),
            },
            output,
        })
    }

    /// Runs a [`ConversionRequest`].
    pub async fn convert_request(
        &self,
        req: &ConversionRequest,
    ) -> Result<ConversionResult, ConvertError> {
        self.convert(
            req.amount,
            &req.input_currency,
            req.output_currency.as_deref(),
        )
        .await
    }
}

fn rate_of(rates: &RateTable, code: &str) -> Result<f64, ConvertError> {
    rates
        .get(code)
        .ok_or_else(|| ConvertError::UnknownCurrency(code.to_string()))
}
