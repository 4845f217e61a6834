mod common;

use clearfolio::domain::ports::trade_repository::TradeFilter;
use clearfolio::infrastructure::prices::fixed::FixedPrices;
use clearfolio::Clearfolio;
use common::{open_trade, seed_admin, seed_client};
use std::sync::Arc;

#[test]
fn test_state_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("clearfolio.db");
    let db_path = db_path.to_str().unwrap();

    let (admin_id, client_id) = {
        let folio =
            Clearfolio::with_providers(db_path, Arc::new(FixedPrices::empty())).unwrap();
        let admin = seed_admin(&folio);
        let client = seed_client(&folio, &admin, "john@test.com", "John Doe", 10000.0);
        open_trade(&folio, &admin, &client, "bitcoin", 42000.0, 0.1);
        folio
            .announce(&admin.id, "Welcome".into(), "Portal is live.".into())
            .unwrap();
        (admin.id, client.id)
    };

    let folio = Clearfolio::with_providers(db_path, Arc::new(FixedPrices::empty())).unwrap();

    let user = folio.login("john@test.com", "secret123").unwrap();
    assert_eq!(user.id, client_id);

    let trades = folio
        .trade_list(&admin_id, TradeFilter::default())
        .unwrap();
    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0].client_id, client_id);

    let announcements = folio.announcement_list(&admin_id).unwrap();
    assert_eq!(announcements.len(), 1);
    assert_eq!(announcements[0].title, "WELCOME");
}
