use crate::domain::values::price_map::PriceMap;
use async_trait::async_trait;
use serde::Serialize;

/// A coin as listed by the price collaborator's search endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct CoinInfo {
    pub id: String,
    pub symbol: String,
    pub name: String,
    /// Zero when the listing endpoint carries no quote.
    pub current_price: f64,
}

/// Pluggable source of live quotes. Implementations may poll CoinGecko,
/// an exchange API, or serve a fixed map for tests.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Human-readable name of this source.
    fn name(&self) -> &str;

    /// Fetch current USD prices for the given coin ids. Ids with no
    /// available quote are simply absent from the result.
    async fn fetch(&self, coin_ids: &[String]) -> Result<PriceMap, PriceError>;

    /// Search coins by name or symbol.
    async fn search(&self, query: &str) -> Result<Vec<CoinInfo>, PriceError>;
}

#[derive(Debug)]
pub enum PriceError {
    /// HTTP or network error
    Network(String),
    /// Response parsing error
    Parse(String),
    /// Configuration error (bad base URL, etc.)
    Config(String),
}

impl std::fmt::Display for PriceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PriceError::Network(msg) => write!(f, "Network error: {msg}"),
            PriceError::Parse(msg) => write!(f, "Parse error: {msg}"),
            PriceError::Config(msg) => write!(f, "Config error: {msg}"),
        }
    }
}

impl std::error::Error for PriceError {}
