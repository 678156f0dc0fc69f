//! # Converter Types
//!
//! Domain types and port traits for the currency converter.
//! This crate has ZERO external IO dependencies - only data structures,
//! error types, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Conversion request/result types and cache placement
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for the HTTP boundary
//! - `error/` - Provider, cache, conversion and application errors

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{CacheSettings, ConversionInput, ConversionRequest, ConversionResult};
pub use dto::*;
pub use error::{AppError, CacheError, ConvertError, ProviderError};
pub use exchange_rates::{CurrencySymbol, RateTable, RateTableError};
pub use ports::{CacheStore, RateProvider};
