//! Shared test helpers.

use clearfolio::application::accounts::NewUser;
use clearfolio::application::trades::OpenTrade;
use clearfolio::domain::entities::trade::Trade;
use clearfolio::domain::entities::user::User;
use clearfolio::domain::values::trade_side::TradeSide;
use clearfolio::domain::values::user_role::UserRole;
use clearfolio::infrastructure::prices::fixed::FixedPrices;
use clearfolio::Clearfolio;
use std::sync::Arc;

pub fn setup() -> Clearfolio {
    setup_with_prices(&[])
}

pub fn setup_with_prices(pairs: &[(&str, f64)]) -> Clearfolio {
    Clearfolio::with_providers(":memory:", Arc::new(FixedPrices::from_pairs(pairs))).unwrap()
}

pub fn seed_admin(folio: &Clearfolio) -> User {
    folio
        .bootstrap_admin(
            "admin@advisory.test".into(),
            "Admin".into(),
            "letmein99".into(),
        )
        .unwrap()
}

pub fn seed_client(
    folio: &Clearfolio,
    admin: &User,
    email: &str,
    name: &str,
    deposit: f64,
) -> User {
    folio
        .user_add(
            &admin.id,
            NewUser {
                email: email.into(),
                name: name.into(),
                role: UserRole::Client,
                initial_deposit: deposit,
                password: "secret123".into(),
            },
        )
        .unwrap()
}

pub fn open_trade(
    folio: &Clearfolio,
    admin: &User,
    client: &User,
    coin_id: &str,
    entry: f64,
    qty: f64,
) -> Trade {
    folio
        .trade_open(
            &admin.id,
            OpenTrade {
                client_id: client.id.clone(),
                coin_id: coin_id.into(),
                coin_symbol: coin_id.to_uppercase(),
                side: TradeSide::Long,
                entry_price: entry,
                quantity: qty,
                take_profit: None,
                stop_loss: None,
                notes: None,
            },
        )
        .unwrap()
}
