//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use converter_types::dto::{ConversionQuery, ErrorResponse};
use converter_types::{ConversionInput, ConversionResult, CurrencySymbol};
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// Convert an amount into one currency, or into every known currency
///
/// Currencies may be given as 3-letter codes or as one of the supported
/// symbols (€ $ Kč £ ¥ ₽).
#[utoipa::path(
    get,
    path = "/currency_converter",
    tag = "conversion",
    params(ConversionQuery),
    responses(
        (status = 200, description = "Converted amounts, rounded to 2 decimals", body = ConversionResult),
        (status = 400, description = "Missing or invalid parameter, or unknown currency", body = ErrorResponse,
            example = json!({"error": "XXX is not a valid currency code.", "code": 400})),
        (status = 503, description = "Rate provider unavailable", body = ErrorResponse,
            example = json!({"error": "Currency API is not available at this time.", "code": 503}))
    )
)]
async fn currency_converter() {}

/// OpenAPI documentation for the currency converter API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Currency Converter API",
        version = "1.0.0",
        description = "Converts amounts between currencies using rates from an upstream provider.\n\nRates are cached for a configurable TTL when a cache backend is available.",
        license(name = "MIT"),
    ),
    paths(health, currency_converter),
    components(schemas(ConversionResult, ConversionInput, ErrorResponse, CurrencySymbol)),
    tags(
        (name = "health", description = "Service health"),
        (name = "conversion", description = "Currency conversion")
    )
)]
pub struct ApiDoc;
