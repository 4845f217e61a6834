mod common;

use clearfolio::application::accounts::{NewUser, UserPatch};
use clearfolio::domain::error::DomainError;
use clearfolio::domain::values::user_role::UserRole;
use common::{open_trade, seed_admin, seed_client, setup};

#[test]
fn test_bootstrap_once() {
    let folio = setup();
    let admin = seed_admin(&folio);
    assert_eq!(admin.role, UserRole::Admin);

    let err = folio
        .bootstrap_admin("other@advisory.test".into(), "Other".into(), "letmein99".into())
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidInput(_)));
}

#[test]
fn test_login_round_trip() {
    let folio = setup();
    let admin = seed_admin(&folio);
    seed_client(&folio, &admin, "john@test.com", "John Doe", 10000.0);

    let user = folio.login("john@test.com", "secret123").unwrap();
    assert_eq!(user.name, "John Doe");
    assert_eq!(user.role, UserRole::Client);
}

#[test]
fn test_login_rejects_bad_credentials() {
    let folio = setup();
    let admin = seed_admin(&folio);
    seed_client(&folio, &admin, "john@test.com", "John Doe", 10000.0);

    // Wrong password and unknown email look identical to the caller.
    let wrong_pass = folio.login("john@test.com", "nope").unwrap_err();
    let unknown = folio.login("ghost@test.com", "secret123").unwrap_err();
    assert!(matches!(wrong_pass, DomainError::Forbidden(_)));
    assert!(matches!(unknown, DomainError::Forbidden(_)));
    assert_eq!(wrong_pass.to_string(), unknown.to_string());
}

#[test]
fn test_user_add_requires_admin() {
    let folio = setup();
    let admin = seed_admin(&folio);
    let client = seed_client(&folio, &admin, "john@test.com", "John Doe", 10000.0);

    let err = folio
        .user_add(
            &client.id,
            NewUser {
                email: "jane@test.com".into(),
                name: "Jane Roe".into(),
                role: UserRole::Client,
                initial_deposit: 0.0,
                password: "secret123".into(),
            },
        )
        .unwrap_err();
    assert!(matches!(err, DomainError::Forbidden(_)));
}

#[test]
fn test_user_add_validation() {
    let folio = setup();
    let admin = seed_admin(&folio);

    let base = NewUser {
        email: "jane@test.com".into(),
        name: "Jane Roe".into(),
        role: UserRole::Client,
        initial_deposit: 0.0,
        password: "secret123".into(),
    };

    let mut bad_email = base.clone();
    bad_email.email = "not-an-email".into();
    assert!(matches!(
        folio.user_add(&admin.id, bad_email).unwrap_err(),
        DomainError::InvalidInput(_)
    ));

    let mut short_pass = base.clone();
    short_pass.password = "abc".into();
    assert!(matches!(
        folio.user_add(&admin.id, short_pass).unwrap_err(),
        DomainError::InvalidInput(_)
    ));

    let mut negative_deposit = base.clone();
    negative_deposit.initial_deposit = -500.0;
    assert!(matches!(
        folio.user_add(&admin.id, negative_deposit).unwrap_err(),
        DomainError::InvalidInput(_)
    ));

    folio.user_add(&admin.id, base.clone()).unwrap();
    // Same email twice is rejected.
    assert!(matches!(
        folio.user_add(&admin.id, base).unwrap_err(),
        DomainError::InvalidInput(_)
    ));
}

#[test]
fn test_list_returns_clients_only() {
    let folio = setup();
    let admin = seed_admin(&folio);
    seed_client(&folio, &admin, "john@test.com", "John Doe", 10000.0);
    seed_client(&folio, &admin, "jane@test.com", "Jane Roe", 50000.0);

    let clients = folio.user_list(&admin.id).unwrap();
    assert_eq!(clients.len(), 2);
    assert!(clients.iter().all(|u| u.role == UserRole::Client));
    // Ordered by name.
    assert_eq!(clients[0].name, "Jane Roe");
}

#[test]
fn test_update_deposit() {
    let folio = setup();
    let admin = seed_admin(&folio);
    let client = seed_client(&folio, &admin, "john@test.com", "John Doe", 10000.0);

    let updated = folio
        .user_update(
            &admin.id,
            &client.id,
            UserPatch {
                initial_deposit: Some(25000.0),
                ..UserPatch::default()
            },
        )
        .unwrap();
    assert_eq!(updated.initial_deposit, 25000.0);

    let err = folio
        .user_update(
            &admin.id,
            &client.id,
            UserPatch {
                initial_deposit: Some(-1.0),
                ..UserPatch::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidInput(_)));
}

#[test]
fn test_client_views_only_own_account() {
    let folio = setup();
    let admin = seed_admin(&folio);
    let john = seed_client(&folio, &admin, "john@test.com", "John Doe", 10000.0);
    let jane = seed_client(&folio, &admin, "jane@test.com", "Jane Roe", 50000.0);

    assert!(folio.user_get(&john.id, &john.id).is_ok());
    assert!(matches!(
        folio.user_get(&john.id, &jane.id).unwrap_err(),
        DomainError::Forbidden(_)
    ));
    assert!(folio.user_get(&admin.id, &jane.id).is_ok());
}

#[test]
fn test_remove_user_cascades_trades() {
    let folio = setup();
    let admin = seed_admin(&folio);
    let client = seed_client(&folio, &admin, "john@test.com", "John Doe", 10000.0);
    let trade = open_trade(&folio, &admin, &client, "bitcoin", 42000.0, 0.1);

    folio.user_remove(&admin.id, &client.id).unwrap();
    assert!(matches!(
        folio.user_get(&admin.id, &client.id).unwrap_err(),
        DomainError::NotFound(_)
    ));
    assert!(matches!(
        folio.trade_get(&admin.id, &trade.id).unwrap_err(),
        DomainError::NotFound(_)
    ));
}
