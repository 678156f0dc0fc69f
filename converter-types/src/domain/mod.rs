//! Domain models for the currency converter.

pub mod cache;
pub mod conversion;

pub use cache::{CacheSettings, DEFAULT_CACHE_KEY, DEFAULT_CACHE_TTL};
pub use conversion::{ConversionInput, ConversionRequest, ConversionResult};
