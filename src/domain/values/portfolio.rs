//! Portfolio valuation engine.
//!
//! Pure functions turning a client's trades, their initial deposit, and a
//! price snapshot into portfolio metrics and per-trade P&L. No side effects
//! and no shared state, so calls are safe to run concurrently.

use crate::domain::entities::trade::Trade;
use crate::domain::values::price_map::PriceMap;
use crate::domain::values::trade_side::TradeSide;
use serde::Serialize;

/// Signed P&L for a single trade.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TradePnl {
    /// Monetary gain/loss (positive = profit).
    pub value: f64,
    /// Gain/loss relative to the entry price, in percent.
    pub percent: f64,
}

/// Aggregate portfolio metrics, recomputed on demand and never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct PortfolioSummary {
    pub current_balance: f64,
    pub total_invested: f64,
    pub total_pnl: f64,
    pub roi: f64,
    pub win_rate: f64,
    pub open_trades_count: usize,
}

/// P&L of one trade against a price snapshot.
///
/// Closed trades are valued at their exit price; open trades at the live
/// quote, falling back to the entry price when the snapshot has no quote
/// (missing quote reads as no movement). The sign of the move follows the
/// trade side.
pub fn per_trade_pnl(trade: &Trade, prices: &PriceMap) -> TradePnl {
    let reference = trade.reference_price(prices);
    let diff = match trade.side {
        TradeSide::Long => reference - trade.entry_price,
        TradeSide::Short => trade.entry_price - reference,
    };
    TradePnl {
        value: diff * trade.quantity,
        percent: diff / trade.entry_price * 100.0,
    }
}

/// Aggregate a client's trades into a portfolio summary.
///
/// Every trade lands in exactly one bucket: closed trades accumulate
/// realized P&L and the win counter, open trades accumulate unrealized P&L
/// and deployed capital. Capital counts as invested only while a position
/// is open. ROI is 0 when no principal was supplied and the win rate is 0
/// when nothing has closed; a breakeven close is not a win.
pub fn summarize(trades: &[Trade], initial_deposit: f64, prices: &PriceMap) -> PortfolioSummary {
    let mut realized_pnl = 0.0;
    let mut unrealized_pnl = 0.0;
    let mut total_invested = 0.0;
    let mut win_count: usize = 0;
    let mut closed_count: usize = 0;
    let mut open_count: usize = 0;

    for trade in trades {
        let pnl = per_trade_pnl(trade, prices);
        if trade.is_open() {
            unrealized_pnl += pnl.value;
            total_invested += trade.entry_price * trade.quantity;
            open_count += 1;
        } else {
            realized_pnl += pnl.value;
            closed_count += 1;
            if pnl.value > 0.0 {
                win_count += 1;
            }
        }
    }

    let total_pnl = realized_pnl + unrealized_pnl;
    let roi = if initial_deposit > 0.0 {
        total_pnl / initial_deposit * 100.0
    } else {
        0.0
    };
    let win_rate = if closed_count > 0 {
        win_count as f64 / closed_count as f64 * 100.0
    } else {
        0.0
    };

    PortfolioSummary {
        current_balance: initial_deposit + total_pnl,
        total_invested,
        total_pnl,
        roi,
        win_rate,
        open_trades_count: open_count,
    }
}
