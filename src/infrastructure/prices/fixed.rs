use crate::domain::ports::price_source::{CoinInfo, PriceError, PriceSource};
use crate::domain::values::price_map::PriceMap;
use async_trait::async_trait;

/// Deterministic price source serving a fixed in-memory map.
/// Used by tests and for offline runs.
pub struct FixedPrices {
    prices: PriceMap,
}

impl FixedPrices {
    pub fn new(prices: PriceMap) -> Self {
        Self { prices }
    }

    pub fn from_pairs(pairs: &[(&str, f64)]) -> Self {
        Self::new(
            pairs
                .iter()
                .map(|(id, price)| (id.to_string(), *price))
                .collect(),
        )
    }

    /// An empty source: every lookup misses, so the engine falls back
    /// to entry prices.
    pub fn empty() -> Self {
        Self::new(PriceMap::new())
    }
}

#[async_trait]
impl PriceSource for FixedPrices {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn fetch(&self, coin_ids: &[String]) -> Result<PriceMap, PriceError> {
        Ok(coin_ids
            .iter()
            .filter_map(|id| self.prices.get(id).map(|p| (id.clone(), p)))
            .collect())
    }

    async fn search(&self, query: &str) -> Result<Vec<CoinInfo>, PriceError> {
        let q = query.to_lowercase();
        Ok(self
            .prices
            .iter()
            .filter(|(id, _)| id.to_lowercase().contains(&q))
            .map(|(id, price)| CoinInfo {
                id: id.clone(),
                symbol: id.clone(),
                name: id.clone(),
                current_price: *price,
            })
            .collect())
    }
}
