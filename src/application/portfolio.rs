use crate::application::load_actor;
use crate::domain::entities::trade::Trade;
use crate::domain::entities::user::User;
use crate::domain::error::DomainError;
use crate::domain::ports::price_source::PriceSource;
use crate::domain::ports::trade_repository::{TradeFilter, TradeRepository};
use crate::domain::ports::user_repository::UserRepository;
use crate::domain::values::portfolio::{per_trade_pnl, summarize, PortfolioSummary, TradePnl};
use crate::domain::values::price_map::PriceMap;
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;

/// A trade paired with its current P&L, for the positions table.
#[derive(Debug, Clone, Serialize)]
pub struct Position {
    pub trade: Trade,
    pub pnl: TradePnl,
}

pub struct PortfolioUseCase {
    trades: Arc<dyn TradeRepository>,
    users: Arc<dyn UserRepository>,
    prices: Arc<dyn PriceSource>,
}

impl PortfolioUseCase {
    pub fn new(
        trades: Arc<dyn TradeRepository>,
        users: Arc<dyn UserRepository>,
        prices: Arc<dyn PriceSource>,
    ) -> Self {
        Self {
            trades,
            users,
            prices,
        }
    }

    /// Fetch a fresh snapshot and compute the user's summary.
    pub async fn summary(
        &self,
        actor_id: &str,
        user_id: &str,
    ) -> Result<PortfolioSummary, DomainError> {
        let user = self.authorize(actor_id, user_id)?;
        let trades = self.trades_of(user_id)?;
        let snapshot = self.snapshot_for(&trades).await;
        Ok(summarize(&trades, user.initial_deposit, &snapshot))
    }

    /// Compute the summary against a caller-supplied snapshot, the
    /// synchronous path used when a refresher already owns the quotes.
    pub fn summary_with(
        &self,
        actor_id: &str,
        user_id: &str,
        snapshot: &PriceMap,
    ) -> Result<PortfolioSummary, DomainError> {
        let user = self.authorize(actor_id, user_id)?;
        let trades = self.trades_of(user_id)?;
        Ok(summarize(&trades, user.initial_deposit, snapshot))
    }

    /// The user's trades each paired with their current P&L, newest first.
    pub async fn positions(
        &self,
        actor_id: &str,
        user_id: &str,
    ) -> Result<Vec<Position>, DomainError> {
        self.authorize(actor_id, user_id)?;
        let trades = self.trades_of(user_id)?;
        let snapshot = self.snapshot_for(&trades).await;
        Ok(trades
            .into_iter()
            .map(|trade| {
                let pnl = per_trade_pnl(&trade, &snapshot);
                Position { trade, pnl }
            })
            .collect())
    }

    /// Coin ids carried by the user's open trades, the only quotes a
    /// summary can consume.
    pub fn open_coin_ids(&self, actor_id: &str, user_id: &str) -> Result<Vec<String>, DomainError> {
        self.authorize(actor_id, user_id)?;
        let trades = self.trades_of(user_id)?;
        Ok(coin_ids_of(&trades))
    }

    fn authorize(&self, actor_id: &str, user_id: &str) -> Result<User, DomainError> {
        let actor = load_actor(&self.users, actor_id)?;
        if !actor.role.is_admin() && actor.id != user_id {
            return Err(DomainError::Forbidden(
                "clients may only view their own portfolio".into(),
            ));
        }
        self.users
            .get(user_id)?
            .ok_or_else(|| DomainError::NotFound(format!("User not found: {user_id}")))
    }

    fn trades_of(&self, user_id: &str) -> Result<Vec<Trade>, DomainError> {
        self.trades.list(&TradeFilter {
            client_id: Some(user_id.to_string()),
            ..TradeFilter::default()
        })
    }

    /// Best-effort snapshot: a failed fetch degrades to an empty map so the
    /// engine values open positions at entry, matching the documented
    /// missing-quote fallback.
    async fn snapshot_for(&self, trades: &[Trade]) -> PriceMap {
        let ids = coin_ids_of(trades);
        if ids.is_empty() {
            return PriceMap::new();
        }
        match self.prices.fetch(&ids).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                eprintln!("Warning: price fetch failed ({e}); valuing open positions at entry");
                PriceMap::new()
            }
        }
    }
}

fn coin_ids_of(trades: &[Trade]) -> Vec<String> {
    trades
        .iter()
        .filter(|t| t.is_open())
        .map(|t| t.coin_id.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
