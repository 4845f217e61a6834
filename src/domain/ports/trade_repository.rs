use crate::domain::entities::trade::Trade;
use crate::domain::error::DomainError;
use crate::domain::values::trade_status::TradeStatus;

#[derive(Debug, Clone, Default)]
pub struct TradeFilter {
    pub client_id: Option<String>,
    pub status: Option<TradeStatus>,
    pub limit: Option<usize>,
}

pub trait TradeRepository: Send + Sync {
    fn add(&self, trade: &Trade) -> Result<(), DomainError>;
    fn close(&self, trade: &Trade) -> Result<(), DomainError>;
    fn remove(&self, id: &str) -> Result<(), DomainError>;
    fn list(&self, filter: &TradeFilter) -> Result<Vec<Trade>, DomainError>;
    fn get(&self, id: &str) -> Result<Option<Trade>, DomainError>;
}
