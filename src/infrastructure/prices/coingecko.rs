use crate::domain::ports::price_source::{CoinInfo, PriceError, PriceSource};
use crate::domain::values::price_map::PriceMap;
use async_trait::async_trait;
use std::collections::HashMap;

pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// CoinGecko quote source using the public simple-price and search
/// endpoints (no auth required; a pro API key may be supplied).
pub struct CoinGeckoSource {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl CoinGeckoSource {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.filter(|k| !k.is_empty()),
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), endpoint)
    }

    fn apply_key(&self, params: &mut Vec<(&'static str, String)>) {
        if let Some(key) = &self.api_key {
            params.push(("x_cg_pro_api_key", key.clone()));
        }
    }
}

#[derive(Debug, serde::Deserialize)]
struct SearchResponse {
    coins: Vec<SearchCoin>,
}

#[derive(Debug, serde::Deserialize)]
struct SearchCoin {
    id: String,
    symbol: String,
    name: String,
}

#[async_trait]
impl PriceSource for CoinGeckoSource {
    fn name(&self) -> &str {
        "coingecko"
    }

    async fn fetch(&self, coin_ids: &[String]) -> Result<PriceMap, PriceError> {
        if coin_ids.is_empty() {
            return Ok(PriceMap::new());
        }

        let mut params = vec![
            ("ids", coin_ids.join(",")),
            ("vs_currencies", "usd".to_string()),
        ];
        self.apply_key(&mut params);
        let resp = self
            .client
            .get(self.url("/simple/price"))
            .query(&params)
            .send()
            .await
            .map_err(|e| PriceError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(PriceError::Network(format!(
                "CoinGecko API returned {}",
                resp.status()
            )));
        }

        // Response shape: {"bitcoin": {"usd": 45000.0}, ...}
        let data: HashMap<String, HashMap<String, f64>> = resp
            .json()
            .await
            .map_err(|e| PriceError::Parse(e.to_string()))?;

        Ok(data
            .into_iter()
            .filter_map(|(id, quotes)| quotes.get("usd").map(|usd| (id, *usd)))
            .collect())
    }

    async fn search(&self, query: &str) -> Result<Vec<CoinInfo>, PriceError> {
        if query.len() < 2 {
            return Ok(vec![]);
        }

        let mut params = vec![("query", query.to_string())];
        self.apply_key(&mut params);
        let resp = self
            .client
            .get(self.url("/search"))
            .query(&params)
            .send()
            .await
            .map_err(|e| PriceError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(PriceError::Network(format!(
                "CoinGecko API returned {}",
                resp.status()
            )));
        }

        let data: SearchResponse = resp
            .json()
            .await
            .map_err(|e| PriceError::Parse(e.to_string()))?;

        // The search endpoint carries no quotes.
        Ok(data
            .coins
            .into_iter()
            .take(10)
            .map(|c| CoinInfo {
                id: c.id,
                symbol: c.symbol,
                name: c.name,
                current_price: 0.0,
            })
            .collect())
    }
}
