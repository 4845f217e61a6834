use crate::domain::values::price_map::PriceMap;
use crate::domain::values::trade_side::TradeSide;
use crate::domain::values::trade_status::TradeStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A position opened by an admin on behalf of a client.
///
/// Invariant: `exit_price` and `closed_at` are set if and only if
/// `status == Closed`. `entry_price > 0` and `quantity > 0` are enforced
/// at the open boundary, never re-checked by the valuation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    pub id: String,
    pub client_id: String,
    pub coin_id: String,
    pub coin_symbol: String,
    pub side: TradeSide,
    pub entry_price: f64,
    pub exit_price: Option<f64>,
    pub quantity: f64,
    pub take_profit: Option<f64>,
    pub stop_loss: Option<f64>,
    pub notes: Option<String>,
    pub status: TradeStatus,
    pub created_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
}

impl Trade {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        client_id: String,
        coin_id: String,
        coin_symbol: String,
        side: TradeSide,
        entry_price: f64,
        quantity: f64,
        take_profit: Option<f64>,
        stop_loss: Option<f64>,
        notes: Option<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            client_id,
            coin_id,
            coin_symbol,
            side,
            entry_price,
            exit_price: None,
            quantity,
            take_profit,
            stop_loss,
            notes,
            status: TradeStatus::Open,
            created_at: Utc::now(),
            closed_at: None,
        }
    }

    pub fn close(&mut self, exit_price: f64) {
        self.status = TradeStatus::Closed;
        self.exit_price = Some(exit_price);
        self.closed_at = Some(Utc::now());
    }

    pub fn is_open(&self) -> bool {
        self.status == TradeStatus::Open
    }

    /// The price a trade is valued at: exit price once closed, otherwise
    /// the live quote, falling back to the entry price when no quote is
    /// available (a missing quote reads as no movement, not as an error).
    pub fn reference_price(&self, prices: &PriceMap) -> f64 {
        match self.status {
            TradeStatus::Closed => self.exit_price.unwrap_or(self.entry_price),
            TradeStatus::Open => prices.get(&self.coin_id).unwrap_or(self.entry_price),
        }
    }
}
