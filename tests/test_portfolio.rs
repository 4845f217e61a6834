mod common;

use async_trait::async_trait;
use clearfolio::domain::error::DomainError;
use clearfolio::domain::ports::price_source::{CoinInfo, PriceError, PriceSource};
use clearfolio::domain::values::price_map::PriceMap;
use clearfolio::Clearfolio;
use common::{open_trade, seed_admin, seed_client, setup, setup_with_prices};
use std::sync::Arc;

const EPS: f64 = 1e-9;

#[tokio::test]
async fn test_summary_single_open_trade() {
    let folio = setup_with_prices(&[("bitcoin", 45000.0)]);
    let admin = seed_admin(&folio);
    let client = seed_client(&folio, &admin, "john@test.com", "John Doe", 10000.0);
    open_trade(&folio, &admin, &client, "bitcoin", 42000.0, 0.1);

    let s = folio.portfolio_summary(&admin.id, &client.id).await.unwrap();
    assert!((s.total_pnl - 300.0).abs() < EPS);
    assert!((s.total_invested - 4200.0).abs() < EPS);
    assert!((s.current_balance - 10300.0).abs() < EPS);
    assert!((s.roi - 3.0).abs() < EPS);
    assert_eq!(s.open_trades_count, 1);
    assert_eq!(s.win_rate, 0.0);
}

#[tokio::test]
async fn test_summary_single_closed_trade() {
    let folio = setup();
    let admin = seed_admin(&folio);
    let client = seed_client(&folio, &admin, "john@test.com", "John Doe", 10000.0);
    let trade = open_trade(&folio, &admin, &client, "ethereum", 2200.0, 2.0);
    folio.trade_close(&admin.id, &trade.id, 2500.0).unwrap();

    let s = folio.portfolio_summary(&admin.id, &client.id).await.unwrap();
    assert!((s.total_pnl - 600.0).abs() < EPS);
    assert_eq!(s.total_invested, 0.0);
    assert!((s.current_balance - 10600.0).abs() < EPS);
    assert!((s.win_rate - 100.0).abs() < EPS);
    assert_eq!(s.open_trades_count, 0);
}

#[tokio::test]
async fn test_missing_quote_values_at_entry() {
    // The fixed source is empty, so every lookup misses.
    let folio = setup();
    let admin = seed_admin(&folio);
    let client = seed_client(&folio, &admin, "john@test.com", "John Doe", 10000.0);
    open_trade(&folio, &admin, &client, "bitcoin", 42000.0, 0.1);

    let s = folio.portfolio_summary(&admin.id, &client.id).await.unwrap();
    assert_eq!(s.total_pnl, 0.0);
    assert!((s.current_balance - 10000.0).abs() < EPS);

    let positions = folio.positions(&admin.id, &client.id).await.unwrap();
    assert_eq!(positions.len(), 1);
    assert_eq!(positions[0].pnl.value, 0.0);
    assert_eq!(positions[0].pnl.percent, 0.0);
}

#[tokio::test]
async fn test_zero_deposit_roi_is_zero() {
    let folio = setup();
    let admin = seed_admin(&folio);
    let client = seed_client(&folio, &admin, "john@test.com", "John Doe", 0.0);
    let trade = open_trade(&folio, &admin, &client, "ethereum", 2200.0, 2.0);
    folio.trade_close(&admin.id, &trade.id, 2500.0).unwrap();

    let s = folio.portfolio_summary(&admin.id, &client.id).await.unwrap();
    assert_eq!(s.roi, 0.0);
    assert!((s.total_pnl - 600.0).abs() < EPS);
}

#[tokio::test]
async fn test_mixed_portfolio_totals() {
    let folio = setup_with_prices(&[("bitcoin", 45000.0), ("solana", 140.0)]);
    let admin = seed_admin(&folio);
    let client = seed_client(&folio, &admin, "john@test.com", "John Doe", 10000.0);
    open_trade(&folio, &admin, &client, "bitcoin", 42000.0, 0.1); // +300 unrealized
    open_trade(&folio, &admin, &client, "solana", 150.0, 10.0); // -100 unrealized
    let winner = open_trade(&folio, &admin, &client, "ethereum", 2200.0, 2.0);
    folio.trade_close(&admin.id, &winner.id, 2500.0).unwrap(); // +600 realized
    let loser = open_trade(&folio, &admin, &client, "cardano", 0.6, 500.0);
    folio.trade_close(&admin.id, &loser.id, 0.5).unwrap(); // -50 realized

    let s = folio.portfolio_summary(&admin.id, &client.id).await.unwrap();
    assert!((s.total_pnl - 750.0).abs() < EPS);
    assert!((s.total_invested - (4200.0 + 1500.0)).abs() < EPS);
    assert!((s.current_balance - 10750.0).abs() < EPS);
    assert!((s.win_rate - 50.0).abs() < EPS);
    assert_eq!(s.open_trades_count, 2);
}

#[tokio::test]
async fn test_summaries_are_per_client() {
    let folio = setup_with_prices(&[("bitcoin", 45000.0)]);
    let admin = seed_admin(&folio);
    let john = seed_client(&folio, &admin, "john@test.com", "John Doe", 10000.0);
    let jane = seed_client(&folio, &admin, "jane@test.com", "Jane Roe", 50000.0);
    open_trade(&folio, &admin, &john, "bitcoin", 42000.0, 0.1);

    let s = folio.portfolio_summary(&admin.id, &jane.id).await.unwrap();
    assert_eq!(s.total_pnl, 0.0);
    assert_eq!(s.open_trades_count, 0);
    assert!((s.current_balance - 50000.0).abs() < EPS);
}

#[tokio::test]
async fn test_client_cannot_view_other_portfolio() {
    let folio = setup();
    let admin = seed_admin(&folio);
    let john = seed_client(&folio, &admin, "john@test.com", "John Doe", 10000.0);
    let jane = seed_client(&folio, &admin, "jane@test.com", "Jane Roe", 50000.0);

    let err = folio
        .portfolio_summary(&john.id, &jane.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Forbidden(_)));

    // Their own portfolio is fine.
    assert!(folio.portfolio_summary(&john.id, &john.id).await.is_ok());
}

#[tokio::test]
async fn test_positions_pair_trades_with_pnl() {
    let folio = setup_with_prices(&[("bitcoin", 45000.0)]);
    let admin = seed_admin(&folio);
    let client = seed_client(&folio, &admin, "john@test.com", "John Doe", 10000.0);
    open_trade(&folio, &admin, &client, "bitcoin", 42000.0, 0.1);
    let closed = open_trade(&folio, &admin, &client, "ethereum", 2200.0, 2.0);
    folio.trade_close(&admin.id, &closed.id, 2500.0).unwrap();

    let positions = folio.positions(&client.id, &client.id).await.unwrap();
    assert_eq!(positions.len(), 2);
    for p in &positions {
        match p.trade.coin_id.as_str() {
            "bitcoin" => assert!((p.pnl.value - 300.0).abs() < EPS),
            "ethereum" => assert!((p.pnl.value - 600.0).abs() < EPS),
            other => panic!("unexpected coin {other}"),
        }
    }
}

#[tokio::test]
async fn test_summary_with_caller_snapshot() {
    let folio = setup();
    let admin = seed_admin(&folio);
    let client = seed_client(&folio, &admin, "john@test.com", "John Doe", 10000.0);
    open_trade(&folio, &admin, &client, "bitcoin", 42000.0, 0.1);

    let snapshot: PriceMap = [("bitcoin".to_string(), 45000.0)].into_iter().collect();
    let s = folio
        .portfolio_summary_with(&admin.id, &client.id, &snapshot)
        .unwrap();
    assert!((s.total_pnl - 300.0).abs() < EPS);
}

struct FailingPrices;

#[async_trait]
impl PriceSource for FailingPrices {
    fn name(&self) -> &str {
        "failing"
    }

    async fn fetch(&self, _coin_ids: &[String]) -> Result<PriceMap, PriceError> {
        Err(PriceError::Network("connection refused".into()))
    }

    async fn search(&self, _query: &str) -> Result<Vec<CoinInfo>, PriceError> {
        Err(PriceError::Network("connection refused".into()))
    }
}

#[tokio::test]
async fn test_fetch_failure_degrades_to_entry_valuation() {
    let folio = Clearfolio::with_providers(":memory:", Arc::new(FailingPrices)).unwrap();
    let admin = seed_admin(&folio);
    let client = seed_client(&folio, &admin, "john@test.com", "John Doe", 10000.0);
    open_trade(&folio, &admin, &client, "bitcoin", 42000.0, 0.1);

    let s = folio.portfolio_summary(&admin.id, &client.id).await.unwrap();
    assert_eq!(s.total_pnl, 0.0);
    assert!((s.current_balance - 10000.0).abs() < EPS);
}
