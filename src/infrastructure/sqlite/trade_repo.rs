use crate::domain::entities::trade::Trade;
use crate::domain::error::DomainError;
use crate::domain::ports::trade_repository::{TradeFilter, TradeRepository};
use crate::domain::values::trade_side::TradeSide;
use crate::domain::values::trade_status::TradeStatus;
use chrono::DateTime;
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};

const TRADE_COLUMNS: &str = "id, client_id, coin_id, coin_symbol, side, entry_price, exit_price, \
     quantity, take_profit, stop_loss, notes, status, created_at, closed_at";

pub struct SqliteTradeRepo {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteTradeRepo {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn row_to_trade(row: &rusqlite::Row) -> Result<Trade, rusqlite::Error> {
        let side_str: String = row.get(4)?;
        let status_str: String = row.get(11)?;
        let created_str: String = row.get(12)?;
        let closed_str: Option<String> = row.get(13)?;

        Ok(Trade {
            id: row.get(0)?,
            client_id: row.get(1)?,
            coin_id: row.get(2)?,
            coin_symbol: row.get(3)?,
            side: side_str.parse().unwrap_or_else(|_| {
                eprintln!("Warning: invalid side '{side_str}' in trade, defaulting to LONG");
                TradeSide::Long
            }),
            entry_price: row.get(5)?,
            exit_price: row.get(6)?,
            quantity: row.get(7)?,
            take_profit: row.get(8)?,
            stop_loss: row.get(9)?,
            notes: row.get(10)?,
            status: status_str.parse().unwrap_or_else(|_| {
                eprintln!("Warning: invalid status '{status_str}' in trade, defaulting to OPEN");
                TradeStatus::Open
            }),
            created_at: DateTime::parse_from_rfc3339(&created_str)
                .map(|dt| dt.with_timezone(&chrono::Utc))
                .unwrap_or_else(|_| chrono::Utc::now()),
            closed_at: closed_str.and_then(|s| {
                DateTime::parse_from_rfc3339(&s)
                    .ok()
                    .map(|dt| dt.with_timezone(&chrono::Utc))
            }),
        })
    }
}

impl TradeRepository for SqliteTradeRepo {
    fn add(&self, trade: &Trade) -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        conn.execute(
            "INSERT INTO trades (id, client_id, coin_id, coin_symbol, side, entry_price, exit_price, quantity, take_profit, stop_loss, notes, status, created_at, closed_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
            params![
                trade.id,
                trade.client_id,
                trade.coin_id,
                trade.coin_symbol,
                trade.side.to_string(),
                trade.entry_price,
                trade.exit_price,
                trade.quantity,
                trade.take_profit,
                trade.stop_loss,
                trade.notes,
                trade.status.to_string(),
                trade.created_at.to_rfc3339(),
                trade.closed_at.map(|dt| dt.to_rfc3339()),
            ],
        )
        .map_err(|e| DomainError::Database(format!("Failed to add trade: {e}")))?;
        Ok(())
    }

    fn close(&self, trade: &Trade) -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let rows = conn
            .execute(
                "UPDATE trades SET status = ?1, exit_price = ?2, closed_at = ?3 WHERE id = ?4",
                params![
                    trade.status.to_string(),
                    trade.exit_price,
                    trade.closed_at.map(|dt| dt.to_rfc3339()),
                    trade.id,
                ],
            )
            .map_err(|e| DomainError::Database(format!("Failed to close trade: {e}")))?;
        if rows == 0 {
            return Err(DomainError::NotFound(format!(
                "Trade not found: {}",
                trade.id
            )));
        }
        Ok(())
    }

    fn remove(&self, id: &str) -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let rows = conn
            .execute("DELETE FROM trades WHERE id = ?1", params![id])
            .map_err(|e| DomainError::Database(format!("Failed to delete trade: {e}")))?;
        if rows == 0 {
            return Err(DomainError::NotFound(format!("Trade not found: {id}")));
        }
        Ok(())
    }

    fn list(&self, filter: &TradeFilter) -> Result<Vec<Trade>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut sql = format!("SELECT {TRADE_COLUMNS} FROM trades WHERE 1=1");
        let mut param_values: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();

        if let Some(client_id) = &filter.client_id {
            sql.push_str(&format!(" AND client_id = ?{}", param_values.len() + 1));
            param_values.push(Box::new(client_id.clone()));
        }
        if let Some(status) = filter.status {
            sql.push_str(&format!(" AND status = ?{}", param_values.len() + 1));
            param_values.push(Box::new(status.to_string()));
        }
        sql.push_str(" ORDER BY created_at DESC");
        if let Some(limit) = filter.limit {
            sql.push_str(&format!(" LIMIT ?{}", param_values.len() + 1));
            param_values.push(Box::new(limit as i64));
        }

        let params_refs: Vec<&dyn rusqlite::types::ToSql> =
            param_values.iter().map(|p| p.as_ref()).collect();
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let trades = stmt
            .query_map(params_refs.as_slice(), Self::row_to_trade)
            .map_err(|e| DomainError::Database(e.to_string()))?
            .filter_map(|r| r.ok())
            .collect();
        Ok(trades)
    }

    fn get(&self, id: &str) -> Result<Option<Trade>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut stmt = conn
            .prepare(&format!("SELECT {TRADE_COLUMNS} FROM trades WHERE id = ?1"))
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut rows = stmt
            .query_map(params![id], Self::row_to_trade)
            .map_err(|e| DomainError::Database(e.to_string()))?;
        Ok(rows.next().and_then(|r| r.ok()))
    }
}
