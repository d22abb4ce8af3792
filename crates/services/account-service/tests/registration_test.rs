//! Registration workflow tests over the in-memory store.

mod support;

use account_service_lib::repository::{ProfileRepository, StoreCounts};
use account_service_lib::service::NewSuperuser;
use common::AppError;
use domain::{Caller, Role};

use support::{registration, Harness};

#[tokio::test]
async fn test_register_guest_end_to_end() {
    let harness = Harness::new();

    let session = harness.register("a@x.com", "p1", Role::Guest).await;
    assert_eq!(session.user.role, Role::Guest);
    assert_eq!(session.user.email, "a@x.com");
    assert!(!session.access.is_empty());
    assert!(!session.refresh.is_empty());

    let caller = harness.services.auth.authenticate(&session.access).await.unwrap();
    let view = harness.services.profiles.my_guest_profile(&caller).await.unwrap();
    assert_eq!(view.nationality, "");
    assert!(view.preferences.is_empty());
    assert_eq!(view.email, "a@x.com");
}

#[tokio::test]
async fn test_guest_gets_exactly_one_guest_profile() {
    let harness = Harness::new();
    harness.register("guest@x.com", "p1", Role::Guest).await;

    assert_eq!(
        harness.store.counts(),
        StoreCounts {
            accounts: 1,
            staff_profiles: 0,
            guest_profiles: 1,
        }
    );
}

#[tokio::test]
async fn test_every_staff_role_gets_exactly_one_staff_profile() {
    for (i, role) in [Role::Admin, Role::Manager, Role::Receptionist, Role::Housekeeping]
        .into_iter()
        .enumerate()
    {
        let harness = Harness::new();
        harness
            .register(&format!("staff{}@x.com", i), "p1", role)
            .await;

        assert_eq!(
            harness.store.counts(),
            StoreCounts {
                accounts: 1,
                staff_profiles: 1,
                guest_profiles: 0,
            },
            "role {}",
            role
        );
    }
}

#[tokio::test]
async fn test_receptionist_employee_id_and_placeholders() {
    let harness = Harness::new();
    harness.register("first@x.com", "p1", Role::Guest).await;
    let session = harness.register("desk@x.com", "p1", Role::Receptionist).await;

    let (profile, account) = harness
        .store
        .find_staff_by_account(session.user.id)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(profile.employee_id, format!("EMP{:06}", session.user.id));
    assert_eq!(profile.employee_id.len(), 9);
    assert!(profile.employee_id[3..].chars().all(|c| c.is_ascii_digit()));
    assert_eq!(profile.department, "Receptionist");
    assert_eq!(profile.position, "Receptionist");
    assert_eq!(profile.hire_date, account.date_joined.date_naive());
}

#[tokio::test]
async fn test_duplicate_email_is_validation_and_writes_nothing() {
    let harness = Harness::new();
    harness.register("dup@x.com", "p1", Role::Guest).await;
    let before = harness.store.counts();

    let err = harness
        .services
        .auth
        .register(registration("dup@x.com", "p2", "p2", Role::Receptionist))
        .await
        .unwrap_err();

    assert_eq!(err.field_name(), Some("email"));
    assert_eq!(err.user_message(), "An account with this email already exists");
    assert_eq!(harness.store.counts(), before);
}

#[tokio::test]
async fn test_duplicate_detected_after_domain_normalization() {
    let harness = Harness::new();
    harness.register("ann@example.com", "p1", Role::Guest).await;

    let err = harness
        .services
        .auth
        .register(registration("  ann@EXAMPLE.com ", "p1", "p1", Role::Guest))
        .await
        .unwrap_err();
    assert_eq!(err.field_name(), Some("email"));
}

#[tokio::test]
async fn test_password_mismatch_fails_before_any_row() {
    let harness = Harness::new();

    let err = harness
        .services
        .auth
        .register(registration("a@x.com", "a", "b", Role::Guest))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Field { ref field, .. } if field == "password_confirm"));
    assert_eq!(harness.store.counts(), StoreCounts::default());
}

#[tokio::test]
async fn test_empty_email_rejected() {
    let harness = Harness::new();

    let err = harness
        .services
        .auth
        .register(registration("   ", "p1", "p1", Role::Guest))
        .await
        .unwrap_err();

    assert_eq!(err.field_name(), Some("email"));
    assert_eq!(harness.store.counts(), StoreCounts::default());
}

#[tokio::test]
async fn test_failed_profile_insert_leaves_no_account() {
    let harness = Harness::new();
    harness.store.fail_profile_inserts(true);

    let result = harness
        .services
        .auth
        .register(registration("a@x.com", "p1", "p1", Role::Guest))
        .await;

    assert!(result.is_err());
    assert_eq!(harness.store.counts(), StoreCounts::default());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_duplicate_registration_has_one_winner() {
    let harness = Harness::new();

    let attempts = (0..8).map(|_| {
        let auth = harness.services.auth.clone();
        tokio::spawn(async move {
            auth.register(registration("race@x.com", "p1", "p1", Role::Housekeeping))
                .await
        })
    });
    let results: Vec<_> = futures::future::join_all(attempts)
        .await
        .into_iter()
        .map(|joined| joined.unwrap())
        .collect();

    let winners = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(winners, 1);
    for loser in results.iter().filter_map(|r| r.as_ref().err()) {
        assert_eq!(loser.field_name(), Some("email"));
    }

    assert_eq!(
        harness.store.counts(),
        StoreCounts {
            accounts: 1,
            staff_profiles: 1,
            guest_profiles: 0,
        }
    );
}

#[tokio::test]
async fn test_password_is_stored_hashed() {
    let harness = Harness::new();
    harness.register("a@x.com", "p1", Role::Guest).await;

    let (_, caller) = harness.caller("admin@x.com", Role::Admin).await;
    let accounts = harness.services.accounts.list_accounts(&caller).await.unwrap();
    for account in accounts {
        assert_ne!(account.password_hash, "p1");
        assert!(account.password_hash.starts_with("$argon2"));
    }
}

#[tokio::test]
async fn test_create_superuser() {
    let harness = Harness::new();

    let account = harness
        .services
        .auth
        .create_superuser(NewSuperuser {
            email: "root@hotel.test".to_string(),
            password: "s3cret".to_string(),
            first_name: "Root".to_string(),
            last_name: "Admin".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(account.role, Role::Admin);
    assert!(account.is_staff);
    assert!(account.is_superuser);
    assert_eq!(harness.store.counts().staff_profiles, 1);

    let session = harness.services.auth.login("root@hotel.test", "s3cret").await.unwrap();
    let caller = harness.services.auth.authenticate(&session.access).await.unwrap();
    assert!(matches!(caller, Caller::Authenticated(ref p) if p.role == Role::Admin));
}
