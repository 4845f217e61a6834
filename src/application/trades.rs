use crate::application::{load_actor, require_admin};
use crate::domain::entities::trade::Trade;
use crate::domain::error::DomainError;
use crate::domain::ports::trade_repository::{TradeFilter, TradeRepository};
use crate::domain::ports::user_repository::UserRepository;
use crate::domain::values::trade_side::TradeSide;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct OpenTrade {
    pub client_id: String,
    pub coin_id: String,
    pub coin_symbol: String,
    pub side: TradeSide,
    pub entry_price: f64,
    pub quantity: f64,
    pub take_profit: Option<f64>,
    pub stop_loss: Option<f64>,
    pub notes: Option<String>,
}

pub struct TradeUseCase {
    trades: Arc<dyn TradeRepository>,
    users: Arc<dyn UserRepository>,
}

impl TradeUseCase {
    pub fn new(trades: Arc<dyn TradeRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { trades, users }
    }

    /// Open a position for a client (admin only). This is the boundary
    /// where trade invariants are enforced; the valuation engine assumes
    /// positive entry price and quantity and never re-validates.
    pub fn open(&self, actor_id: &str, req: OpenTrade) -> Result<Trade, DomainError> {
        require_admin(&self.users, actor_id)?;

        if self.users.get(&req.client_id)?.is_none() {
            return Err(DomainError::NotFound(format!(
                "Client not found: {}",
                req.client_id
            )));
        }
        if !req.entry_price.is_finite() || req.entry_price <= 0.0 {
            return Err(DomainError::InvalidInput(format!(
                "Entry price must be positive, got {}",
                req.entry_price
            )));
        }
        if !req.quantity.is_finite() || req.quantity <= 0.0 {
            return Err(DomainError::InvalidInput(format!(
                "Quantity must be positive, got {}",
                req.quantity
            )));
        }
        for (label, level) in [("Take profit", req.take_profit), ("Stop loss", req.stop_loss)] {
            if let Some(v) = level {
                if !v.is_finite() || v <= 0.0 {
                    return Err(DomainError::InvalidInput(format!(
                        "{label} must be positive, got {v}"
                    )));
                }
            }
        }

        let trade = Trade::new(
            req.client_id,
            req.coin_id,
            req.coin_symbol,
            req.side,
            req.entry_price,
            req.quantity,
            req.take_profit,
            req.stop_loss,
            req.notes,
        );
        self.trades.add(&trade)?;
        Ok(trade)
    }

    /// Close an open position at the given exit price (admin only).
    /// CLOSED is terminal; closing twice is rejected.
    pub fn close(&self, actor_id: &str, id: &str, exit_price: f64) -> Result<Trade, DomainError> {
        require_admin(&self.users, actor_id)?;

        let mut trade = self
            .trades
            .get(id)?
            .ok_or_else(|| DomainError::NotFound(format!("Trade not found: {id}")))?;
        if !trade.is_open() {
            return Err(DomainError::InvalidInput("Trade is already closed".into()));
        }
        if !exit_price.is_finite() || exit_price <= 0.0 {
            return Err(DomainError::InvalidInput(format!(
                "Exit price must be positive, got {exit_price}"
            )));
        }

        trade.close(exit_price);
        self.trades.close(&trade)?;
        Ok(trade)
    }

    pub fn remove(&self, actor_id: &str, id: &str) -> Result<(), DomainError> {
        require_admin(&self.users, actor_id)?;
        self.trades.remove(id)
    }

    /// List trades, newest first. Clients are pinned to their own trades
    /// regardless of the requested filter; admins may filter by client.
    pub fn list(&self, actor_id: &str, mut filter: TradeFilter) -> Result<Vec<Trade>, DomainError> {
        let actor = load_actor(&self.users, actor_id)?;
        if !actor.role.is_admin() {
            filter.client_id = Some(actor.id);
        }
        self.trades.list(&filter)
    }

    pub fn get(&self, actor_id: &str, id: &str) -> Result<Trade, DomainError> {
        let actor = load_actor(&self.users, actor_id)?;
        let trade = self
            .trades
            .get(id)?
            .ok_or_else(|| DomainError::NotFound(format!("Trade not found: {id}")))?;
        if !actor.role.is_admin() && trade.client_id != actor.id {
            return Err(DomainError::Forbidden(
                "clients may only view their own trades".into(),
            ));
        }
        Ok(trade)
    }
}
