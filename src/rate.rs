use std::collections::HashMap;
use std::fmt;

use anyhow::{bail, Context, Result};
use reqwest::blocking::Client;
use serde::Deserialize;

/// Used whenever the live rate cannot be obtained.
pub const FALLBACK_RATE: f64 = 5.44;

// ---------------------------------------------------------------------------
// Rate sources
// ---------------------------------------------------------------------------

/// Something that can produce a base→target conversion factor.
pub trait RateSource {
    fn fetch_rate(&self) -> Result<f64>;
}

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    rates: HashMap<String, f64>,
}

/// Extract the `target` rate from a `{"rates": {...}}` body.
pub fn parse_rate(body: &str, target: &str) -> Result<f64> {
    let parsed: LatestRatesResponse =
        serde_json::from_str(body).context("parsing exchange rate response")?;
    let rate = *parsed
        .rates
        .get(target)
        .with_context(|| format!("no rate for {target} in response"))?;
    validate(rate)
}

fn validate(rate: f64) -> Result<f64> {
    if !rate.is_finite() || rate <= 0.0 {
        bail!("rate {rate} is not a positive number");
    }
    Ok(rate)
}

/// `GET {endpoint}/{base}` against an exchangerate-api style service.
pub struct ExchangeRateApi {
    client: Client,
    url: String,
    target: String,
}

impl ExchangeRateApi {
    pub fn new(endpoint: &str, base: &str, target: &str) -> Self {
        Self {
            client: Client::new(),
            url: format!("{}/{base}", endpoint.trim_end_matches('/')),
            target: target.to_string(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl RateSource for ExchangeRateApi {
    fn fetch_rate(&self) -> Result<f64> {
        log::info!("Fetching exchange rate from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .with_context(|| format!("requesting {}", self.url))?;

        if !response.status().is_success() {
            bail!("rate service returned status {}", response.status());
        }

        let body = response.text().context("reading rate response body")?;
        parse_rate(&body, &self.target)
    }
}

// ---------------------------------------------------------------------------
// Resolution with fallback
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum RateOrigin {
    Live,
    /// The source failed; `reason` is shown to the user as an advisory.
    Fallback { reason: String },
}

/// The session's conversion rate and where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRate {
    pub value: f64,
    pub origin: RateOrigin,
}

impl ResolvedRate {
    pub fn is_fallback(&self) -> bool {
        matches!(self.origin, RateOrigin::Fallback { .. })
    }

    /// Advisory text for the UI, if the fallback was used.
    pub fn advisory(&self) -> Option<String> {
        match &self.origin {
            RateOrigin::Live => None,
            RateOrigin::Fallback { reason } => Some(format!(
                "Could not fetch the exchange rate online, using fixed rate {:.2}. Error: {reason}",
                self.value
            )),
        }
    }
}

impl fmt::Display for ResolvedRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.value)?;
        if self.is_fallback() {
            write!(f, " (fixed)")?;
        }
        Ok(())
    }
}

/// Wraps a [`RateSource`] with the fallback contract: a single attempt, and
/// any failure yields the fixed fallback rate instead of an error.
pub struct RateProvider<S> {
    source: S,
    fallback: f64,
}

impl<S: RateSource> RateProvider<S> {
    pub fn new(source: S) -> Self {
        Self::with_fallback(source, FALLBACK_RATE)
    }

    pub fn with_fallback(source: S, fallback: f64) -> Self {
        Self { source, fallback }
    }

    /// Query the source once, falling back on any error.
    pub fn resolve(&self) -> ResolvedRate {
        match self.source.fetch_rate().and_then(validate) {
            Ok(value) => {
                log::info!("Using live exchange rate {value:.4}");
                ResolvedRate {
                    value,
                    origin: RateOrigin::Live,
                }
            }
            Err(e) => {
                log::warn!(
                    "Exchange rate lookup failed, using fixed rate {}: {e:#}",
                    self.fallback
                );
                ResolvedRate {
                    value: self.fallback,
                    origin: RateOrigin::Fallback {
                        reason: format!("{e:#}"),
                    },
                }
            }
        }
    }

    pub fn get_rate(&self) -> f64 {
        self.resolve().value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(f64);

    impl RateSource for Fixed {
        fn fetch_rate(&self) -> Result<f64> {
            Ok(self.0)
        }
    }

    struct Unreachable;

    impl RateSource for Unreachable {
        fn fetch_rate(&self) -> Result<f64> {
            bail!("simulated network failure")
        }
    }

    #[test]
    fn parses_nested_rate() {
        let body = r#"{"base":"USD","rates":{"USD":1,"BRL":5.12,"EUR":0.92}}"#;
        assert_eq!(parse_rate(body, "BRL").unwrap(), 5.12);
        assert_eq!(parse_rate(body, "USD").unwrap(), 1.0);
    }

    #[test]
    fn malformed_bodies_are_errors() {
        assert!(parse_rate("not json", "BRL").is_err());
        assert!(parse_rate(r#"{"rates":{"EUR":0.9}}"#, "BRL").is_err());
        assert!(parse_rate(r#"{"rates":{"BRL":-1.0}}"#, "BRL").is_err());
        assert!(parse_rate(r#"{"result":"error"}"#, "BRL").is_err());
    }

    #[test]
    fn live_rate_is_used_when_available() {
        let resolved = RateProvider::new(Fixed(5.0)).resolve();
        assert_eq!(resolved.value, 5.0);
        assert_eq!(resolved.origin, RateOrigin::Live);
        assert!(resolved.advisory().is_none());
    }

    #[test]
    fn failure_falls_back_to_fixed_rate() {
        let provider = RateProvider::new(Unreachable);
        assert_eq!(provider.get_rate(), 5.44);

        let resolved = provider.resolve();
        assert!(resolved.is_fallback());
        let advisory = resolved.advisory().unwrap();
        assert!(advisory.contains("simulated network failure"));
        assert!(advisory.contains("5.44"));
    }

    #[test]
    fn non_positive_live_rate_falls_back() {
        assert_eq!(RateProvider::new(Fixed(0.0)).get_rate(), FALLBACK_RATE);
        assert_eq!(RateProvider::new(Fixed(f64::NAN)).get_rate(), FALLBACK_RATE);
    }

    #[test]
    fn refused_connection_falls_back() {
        let api = ExchangeRateApi::new("http://127.0.0.1:9/v4/latest/", "USD", "BRL");
        assert_eq!(api.url(), "http://127.0.0.1:9/v4/latest/USD");
        assert_eq!(RateProvider::new(api).get_rate(), FALLBACK_RATE);
    }
}
