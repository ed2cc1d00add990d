/// Integration tests for the Identity & Access service
///
/// These run against an in-memory SQLite database with the real schema.

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use taskmate_core::auth::authorization::Caller;
use taskmate_core::db::migrations::run_migrations;
use taskmate_core::error::Error;
use taskmate_core::identity::{Identity, NewAccount};
use taskmate_core::models::user::{CreateUser, Role, User};

async fn test_pool() -> SqlitePool {
    // One connection: each in-memory SQLite connection is its own database
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    run_migrations(&pool).await.unwrap();
    pool
}

fn account(username: &str, email: &str, role: Option<&str>) -> NewAccount {
    NewAccount {
        username: username.to_string(),
        email: email.to_string(),
        password: "pw1".to_string(),
        role: role.map(|r| r.to_string()),
    }
}

#[tokio::test]
async fn test_register_defaults_to_member() {
    let identity = Identity::new(test_pool().await);

    let user = identity
        .register(account("alice", "a@x.com", None))
        .await
        .unwrap();

    assert_eq!(user.username, "alice");
    assert_eq!(user.email, "a@x.com");
    assert_eq!(user.role, Role::Member);
    assert_ne!(user.password_hash, "pw1");
    assert!(user.password_hash.starts_with("$argon2id$"));
}

#[tokio::test]
async fn test_register_admin_role() {
    let identity = Identity::new(test_pool().await);

    let user = identity
        .register(account("root", "root@x.com", Some("admin")))
        .await
        .unwrap();

    assert_eq!(user.role, Role::Admin);
}

#[tokio::test]
async fn test_register_rejects_unknown_role() {
    let identity = Identity::new(test_pool().await);

    let err = identity
        .register(account("eve", "e@x.com", Some("superuser")))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Validation(_)));
}

#[tokio::test]
async fn test_register_rejects_blank_fields() {
    let identity = Identity::new(test_pool().await);

    let err = identity
        .register(account("", "a@x.com", None))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    let err = identity
        .register(account("alice", "   ", None))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    let err = identity
        .register(NewAccount {
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            password: String::new(),
            role: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[tokio::test]
async fn test_duplicate_username_leaves_store_unchanged() {
    let pool = test_pool().await;
    let identity = Identity::new(pool.clone());

    identity
        .register(account("alice", "a@x.com", None))
        .await
        .unwrap();

    let err = identity
        .register(account("alice", "other@x.com", None))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::DuplicateUsername(ref name) if name == "alice"));
    assert_eq!(User::count(&pool).await.unwrap(), 1);
}

#[tokio::test]
async fn test_duplicate_email_rejected() {
    let pool = test_pool().await;
    let identity = Identity::new(pool.clone());

    identity
        .register(account("alice", "a@x.com", None))
        .await
        .unwrap();

    let err = identity
        .register(account("alice2", "a@x.com", None))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::DuplicateEmail(_)));
    assert_eq!(User::count(&pool).await.unwrap(), 1);
}

#[tokio::test]
async fn test_unique_violation_on_insert_maps_to_typed_duplicate() {
    // Two registrations can race past the existence pre-check; the
    // constraint violation on the insert itself must still come back as
    // a typed duplicate, not a raw database error. Driving the insert
    // directly exercises that path.
    let pool = test_pool().await;

    fn row(username: &str, email: &str) -> CreateUser {
        CreateUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$fake".to_string(),
            role: Role::Member,
        }
    }

    User::create(&pool, row("alice", "a@x.com")).await.unwrap();

    let err = User::create(&pool, row("alice", "other@x.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::DuplicateUsername(ref name) if name == "alice"));

    let err = User::create(&pool, row("alice2", "a@x.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::DuplicateEmail(ref email) if email == "a@x.com"));

    assert_eq!(User::count(&pool).await.unwrap(), 1);
}

#[tokio::test]
async fn test_authenticate_success() {
    let identity = Identity::new(test_pool().await);

    let registered = identity
        .register(account("alice", "a@x.com", None))
        .await
        .unwrap();

    let user = identity.authenticate("alice", "pw1").await.unwrap();
    assert_eq!(user.id, registered.id);
}

#[tokio::test]
async fn test_authenticate_wrong_password() {
    let identity = Identity::new(test_pool().await);

    identity
        .register(account("alice", "a@x.com", None))
        .await
        .unwrap();

    let err = identity.authenticate("alice", "wrong").await.unwrap_err();
    assert!(matches!(err, Error::InvalidCredentials));
}

#[tokio::test]
async fn test_authenticate_unknown_username_does_not_panic() {
    // Regression test: the credential check must be guarded behind
    // "user was found" and return a clean error for unknown usernames.
    let identity = Identity::new(test_pool().await);

    let err = identity.authenticate("nobody", "pw1").await.unwrap_err();
    assert!(matches!(err, Error::InvalidCredentials));
}

#[tokio::test]
async fn test_list_peers_excludes_caller() {
    let pool = test_pool().await;
    let identity = Identity::new(pool);

    let alice = identity
        .register(account("alice", "a@x.com", None))
        .await
        .unwrap();
    let bob = identity
        .register(account("bob", "b@x.com", None))
        .await
        .unwrap();
    identity
        .register(account("carol", "c@x.com", None))
        .await
        .unwrap();

    let caller = Caller::from(&alice);
    let peers = identity.list_peers(&caller).await.unwrap();
    let names: Vec<&str> = peers.iter().map(|u| u.username.as_str()).collect();

    assert_eq!(names, vec!["bob", "carol"]);
    assert!(peers.iter().all(|u| u.id != alice.id));
    assert!(peers.iter().any(|u| u.id == bob.id));
}

#[tokio::test]
async fn test_find_user() {
    let identity = Identity::new(test_pool().await);

    let alice = identity
        .register(account("alice", "a@x.com", None))
        .await
        .unwrap();

    let found = identity.find_user(alice.id).await.unwrap().unwrap();
    assert_eq!(found.username, "alice");

    assert!(identity.find_user(9999).await.unwrap().is_none());
}
