use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Point-in-time snapshot of quoted USD prices keyed by coin id
/// (e.g. "bitcoin" → 45000.0). The valuation engine only reads it;
/// entries may be missing for unknown or delisted assets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceMap(HashMap<String, f64>);

impl PriceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, coin_id: &str) -> Option<f64> {
        self.0.get(coin_id).copied()
    }

    pub fn insert(&mut self, coin_id: impl Into<String>, price: f64) {
        self.0.insert(coin_id.into(), price);
    }

    /// Overlay `other` onto this snapshot, keeping the newer quotes.
    pub fn merge(&mut self, other: PriceMap) {
        self.0.extend(other.0);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &f64)> {
        self.0.iter()
    }
}

impl FromIterator<(String, f64)> for PriceMap {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        PriceMap(iter.into_iter().collect())
    }
}
