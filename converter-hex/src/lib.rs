//! # Converter Hex
//!
//! Application layer and HTTP adapter for the currency converter.
//!
//! ## Architecture
//!
//! - `rate_store/` - Rate acquisition with optional cache (`RateStore`)
//! - `service/` - Conversion service (symbol resolution, arithmetic, assembly)
//! - `inbound/` - HTTP adapter (Axum server)
//! - `openapi/` - OpenAPI document served by the HTTP adapter
//!
//! Both the store and the service are generic over `P: RateProvider`, so the
//! upstream adapter is injected at compile time.

pub mod inbound;
pub mod openapi;
pub mod rate_store;
pub mod service;

#[cfg(test)]
mod service_tests;

pub use rate_store::RateStore;
pub use service::ConversionService;
