//! Data Transfer Objects (DTOs) for the HTTP boundary.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ConversionRequest;
use crate::error::AppError;

/// Query string of `GET /currency_converter`.
///
/// Every field is optional at the extractor level so that missing or
/// malformed values produce our own 400 body instead of the framework's.
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ConversionQuery {
    /// Amount to convert
    #[param(example = "10.5")]
    pub amount: Option<String>,
    /// 3-letter code or symbol of the source currency
    #[param(example = "USD")]
    pub input_currency: Option<String>,
    /// 3-letter code or symbol of the target currency (all currencies if omitted)
    #[param(example = "€")]
    pub output_currency: Option<String>,
}

impl TryFrom<ConversionQuery> for ConversionRequest {
    type Error = AppError;

    fn try_from(query: ConversionQuery) -> Result<Self, Self::Error> {
        let (Some(amount), Some(input_currency)) = (query.amount, query.input_currency) else {
            return Err(AppError::BadRequest(
                "amount and input_currency are required".into(),
            ));
        };

        let amount: f64 = amount
            .trim()
            .parse()
            .map_err(|_| AppError::BadRequest(format!("Invalid amount: {}", amount)))?;
        if !amount.is_finite() {
            return Err(AppError::BadRequest(format!("Invalid amount: {}", amount)));
        }

        Ok(ConversionRequest {
            amount,
            input_currency,
            output_currency: query.output_currency,
        })
    }
}

/// JSON error body returned by the HTTP adapter.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "XXX is not a valid currency code.")]
    pub error: String,
    #[schema(example = 400)]
    pub code: u16,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(amount: Option<&str>, input: Option<&str>, output: Option<&str>) -> ConversionQuery {
        ConversionQuery {
            amount: amount.map(String::from),
            input_currency: input.map(String::from),
            output_currency: output.map(String::from),
        }
    }

    #[test]
    fn test_query_to_request() {
        let req = ConversionRequest::try_from(query(Some(" 10.5 "), Some("$"), Some("EUR"))).unwrap();
        assert_eq!(req.amount, 10.5);
        assert_eq!(req.input_currency, "$");
        assert_eq!(req.output_currency.as_deref(), Some("EUR"));
    }

    #[test]
    fn test_query_missing_fields() {
        let result = ConversionRequest::try_from(query(None, Some("USD"), None));
        assert!(matches!(result, Err(AppError::BadRequest(_))));

        let result = ConversionRequest::try_from(query(Some("1"), None, None));
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_query_bad_amount() {
        for amount in ["abc", "1,5", "", "inf", "NaN"] {
            let result = ConversionRequest::try_from(query(Some(amount), Some("USD"), None));
            assert!(
                matches!(result, Err(AppError::BadRequest(_))),
                "{amount:?} should be rejected"
            );
        }
    }
}
