//! Currency Converter CLI
//!
//! Converts an amount once and prints the result as JSON.

use std::io;

use anyhow::Result;
use clap::Parser;
use serde::Serialize;

use converter_hex::{ConversionService, RateStore};
use converter_repo::{CacheConfig, HttpRateProvider, ProviderConfig, connect_cache};
use converter_types::{ConversionResult, ConvertError};

#[derive(Debug, Parser)]
#[command(name = "currency-converter")]
#[command(author, version, about = "Convert an amount between currencies", long_about = None)]
struct Cli {
    /// Amount to convert
    #[arg(long, value_parser = parse_amount, allow_negative_numbers = true)]
    amount: f64,

    /// 3-letter code or symbol of the currency to convert from
    #[arg(long = "input_currency")]
    input_currency: String,

    /// 3-letter code or symbol of the currency to convert to
    /// (all available currencies if omitted)
    #[arg(long = "output_currency")]
    output_currency: Option<String>,

    /// Rate provider endpoint
    #[arg(long = "rates-url", env = "RATES_API_URL")]
    rates_url: Option<String>,
}

fn parse_amount(s: &str) -> Result<f64, String> {
    let amount: f64 = s.parse().map_err(|_| format!("`{s}` is not a number"))?;
    if !amount.is_finite() {
        return Err(format!("`{s}` is not a finite number"));
    }
    Ok(amount)
}

/// `serde_json` formatter printing `", "` and `": "` separators.
struct SpacedFormatter;

impl serde_json::ser::Formatter for SpacedFormatter {
    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }
}

fn to_line<T: Serialize>(value: &T) -> Result<String> {
    let mut out = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut out, SpacedFormatter);
    value.serialize(&mut ser)?;
    Ok(String::from_utf8(out)?)
}

/// JSON line for stdout, and whether the conversion succeeded.
fn render(outcome: Result<ConversionResult, ConvertError>) -> Result<(String, bool)> {
    match outcome {
        Ok(result) => Ok((to_line(&result)?, true)),
        Err(e) => Ok((
            to_line(&serde_json::json!({ "error": e.to_string() }))?,
            false,
        )),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Diagnostics go to stderr so stdout stays a single JSON document
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut provider_config = ProviderConfig::from_env()?;
    if let Some(url) = cli.rates_url {
        provider_config.url = url;
    }
    let cache_config = CacheConfig::from_env()?;

    let provider = HttpRateProvider::from_config(&provider_config)?;
    let cache = connect_cache(cache_config.backend.as_ref()).await;
    let service = ConversionService::new(RateStore::from_parts(
        provider,
        cache,
        cache_config.settings,
    ));

    let outcome = service
        .convert(
            cli.amount,
            &cli.input_currency,
            cli.output_currency.as_deref(),
        )
        .await;

    let (line, ok) = render(outcome)?;
    println!("{}", line);
    if !ok {
        std::process::exit(1);
    }
    Ok(())
}
