pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;

use crate::application::accounts::{AccountUseCase, NewUser, UserPatch};
use crate::application::announcements::AnnouncementUseCase;
use crate::application::portfolio::{PortfolioUseCase, Position};
use crate::application::trades::{OpenTrade, TradeUseCase};
use crate::domain::entities::announcement::{Announcement, Reply};
use crate::domain::entities::trade::Trade;
use crate::domain::entities::user::User;
use crate::domain::error::DomainError;
use crate::domain::ports::announcement_repository::AnnouncementRepository;
use crate::domain::ports::price_source::{CoinInfo, PriceSource};
use crate::domain::ports::trade_repository::{TradeFilter, TradeRepository};
use crate::domain::ports::user_repository::UserRepository;
use crate::domain::values::portfolio::PortfolioSummary;
use crate::domain::values::price_map::PriceMap;
use crate::infrastructure::prices::coingecko::{CoinGeckoSource, DEFAULT_BASE_URL};
use crate::infrastructure::prices::fixed::FixedPrices;
use crate::infrastructure::sqlite::announcement_repo::SqliteAnnouncementRepo;
use crate::infrastructure::sqlite::migrations::run_migrations;
use crate::infrastructure::sqlite::trade_repo::SqliteTradeRepo;
use crate::infrastructure::sqlite::user_repo::SqliteUserRepo;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

pub struct Clearfolio {
    accounts_uc: AccountUseCase,
    trades_uc: TradeUseCase,
    portfolio_uc: PortfolioUseCase,
    announcements_uc: AnnouncementUseCase,
    prices: Arc<dyn PriceSource>,
}

impl Clearfolio {
    pub fn new(db_path: &str) -> Result<Self, DomainError> {
        let provider =
            std::env::var("CLEARFOLIO_PRICE_PROVIDER").unwrap_or_else(|_| "coingecko".into());
        let base_url = std::env::var("CLEARFOLIO_COINGECKO_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let api_key = std::env::var("CLEARFOLIO_COINGECKO_API_KEY").ok();

        let prices: Arc<dyn PriceSource> = match provider.as_str() {
            "fixed" => Arc::new(FixedPrices::empty()),
            _ => Arc::new(CoinGeckoSource::new(base_url, api_key)),
        };

        Self::with_providers(db_path, prices)
    }

    pub fn with_providers(
        db_path: &str,
        prices: Arc<dyn PriceSource>,
    ) -> Result<Self, DomainError> {
        let conn = Connection::open(db_path)
            .map_err(|e| DomainError::Database(format!("DB error: {e}")))?;
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| DomainError::Database(format!("WAL error: {e}")))?;
        conn.pragma_update(None, "foreign_keys", "ON")
            .map_err(|e| DomainError::Database(format!("FK error: {e}")))?;

        run_migrations(&conn)?;

        let conn = Arc::new(Mutex::new(conn));
        let users: Arc<dyn UserRepository> = Arc::new(SqliteUserRepo::new(conn.clone()));
        let trades: Arc<dyn TradeRepository> = Arc::new(SqliteTradeRepo::new(conn.clone()));
        let announcements: Arc<dyn AnnouncementRepository> =
            Arc::new(SqliteAnnouncementRepo::new(conn));

        Ok(Self {
            accounts_uc: AccountUseCase::new(users.clone()),
            trades_uc: TradeUseCase::new(trades.clone(), users.clone()),
            portfolio_uc: PortfolioUseCase::new(trades, users.clone(), prices.clone()),
            announcements_uc: AnnouncementUseCase::new(announcements, users),
            prices,
        })
    }

    /// The configured quote source, for callers that run their own
    /// refresh loop.
    pub fn price_source(&self) -> Arc<dyn PriceSource> {
        self.prices.clone()
    }

    // Accounts

    pub fn bootstrap_admin(
        &self,
        email: String,
        name: String,
        password: String,
    ) -> Result<User, DomainError> {
        self.accounts_uc.bootstrap(email, name, password)
    }

    pub fn login(&self, email: &str, password: &str) -> Result<User, DomainError> {
        self.accounts_uc.authenticate(email, password)
    }

    pub fn user_add(&self, actor_id: &str, new: NewUser) -> Result<User, DomainError> {
        self.accounts_uc.add(actor_id, new)
    }

    pub fn user_update(
        &self,
        actor_id: &str,
        id: &str,
        patch: UserPatch,
    ) -> Result<User, DomainError> {
        self.accounts_uc.update(actor_id, id, patch)
    }

    pub fn user_get(&self, actor_id: &str, id: &str) -> Result<User, DomainError> {
        self.accounts_uc.get(actor_id, id)
    }

    pub fn user_list(&self, actor_id: &str) -> Result<Vec<User>, DomainError> {
        self.accounts_uc.list(actor_id)
    }

    pub fn user_remove(&self, actor_id: &str, id: &str) -> Result<(), DomainError> {
        self.accounts_uc.remove(actor_id, id)
    }

    // Trades

    pub fn trade_open(&self, actor_id: &str, req: OpenTrade) -> Result<Trade, DomainError> {
        self.trades_uc.open(actor_id, req)
    }

    pub fn trade_close(
        &self,
        actor_id: &str,
        id: &str,
        exit_price: f64,
    ) -> Result<Trade, DomainError> {
        self.trades_uc.close(actor_id, id, exit_price)
    }

    pub fn trade_remove(&self, actor_id: &str, id: &str) -> Result<(), DomainError> {
        self.trades_uc.remove(actor_id, id)
    }

    pub fn trade_list(
        &self,
        actor_id: &str,
        filter: TradeFilter,
    ) -> Result<Vec<Trade>, DomainError> {
        self.trades_uc.list(actor_id, filter)
    }

    pub fn trade_get(&self, actor_id: &str, id: &str) -> Result<Trade, DomainError> {
        self.trades_uc.get(actor_id, id)
    }

    // Portfolio

    pub async fn portfolio_summary(
        &self,
        actor_id: &str,
        user_id: &str,
    ) -> Result<PortfolioSummary, DomainError> {
        self.portfolio_uc.summary(actor_id, user_id).await
    }

    pub fn portfolio_summary_with(
        &self,
        actor_id: &str,
        user_id: &str,
        snapshot: &PriceMap,
    ) -> Result<PortfolioSummary, DomainError> {
        self.portfolio_uc.summary_with(actor_id, user_id, snapshot)
    }

    pub async fn positions(
        &self,
        actor_id: &str,
        user_id: &str,
    ) -> Result<Vec<Position>, DomainError> {
        self.portfolio_uc.positions(actor_id, user_id).await
    }

    pub fn open_coin_ids(&self, actor_id: &str, user_id: &str) -> Result<Vec<String>, DomainError> {
        self.portfolio_uc.open_coin_ids(actor_id, user_id)
    }

    // Announcements

    pub fn announce(
        &self,
        actor_id: &str,
        title: String,
        content: String,
    ) -> Result<Announcement, DomainError> {
        self.announcements_uc.post(actor_id, title, content)
    }

    pub fn announcement_list(&self, actor_id: &str) -> Result<Vec<Announcement>, DomainError> {
        self.announcements_uc.list(actor_id)
    }

    pub fn announcement_remove(&self, actor_id: &str, id: &str) -> Result<(), DomainError> {
        self.announcements_uc.remove(actor_id, id)
    }

    pub fn reply_add(
        &self,
        actor_id: &str,
        announcement_id: &str,
        content: String,
    ) -> Result<Reply, DomainError> {
        self.announcements_uc.reply(actor_id, announcement_id, content)
    }

    pub fn reply_list(
        &self,
        actor_id: &str,
        announcement_id: &str,
    ) -> Result<Vec<Reply>, DomainError> {
        self.announcements_uc.replies(actor_id, announcement_id)
    }

    pub fn reply_remove(&self, actor_id: &str, reply_id: &str) -> Result<(), DomainError> {
        self.announcements_uc.remove_reply(actor_id, reply_id)
    }

    // Prices

    pub async fn coin_search(&self, query: &str) -> Result<Vec<CoinInfo>, DomainError> {
        self.prices
            .search(query)
            .await
            .map_err(|e| DomainError::Price(e.to_string()))
    }

    pub async fn prices_for(&self, coin_ids: &[String]) -> Result<PriceMap, DomainError> {
        self.prices
            .fetch(coin_ids)
            .await
            .map_err(|e| DomainError::Price(e.to_string()))
    }
}
