use uuid::Uuid;

use mindwell_auth::jwt::{issue_token, issue_token_with_ttl, validate_token};
use mindwell_auth::password::{hash_password, verify_password};
use mindwell_core::models::user::User;

const SECRET: &[u8] = b"test-secret";

fn test_user(anonymous: bool) -> User {
    let now = jiff::Timestamp::now();
    User {
        id: Uuid::new_v4(),
        email: if anonymous {
            None
        } else {
            Some("user@example.com".to_string())
        },
        password_hash: None,
        phone: None,
        anonymous_id: User::new_anonymous_id(),
        is_anonymous: anonymous,
        created_at: now,
        updated_at: now,
        deleted_at: None,
    }
}

#[test]
fn issued_token_round_trips() {
    let user = test_user(false);
    let token = issue_token(&user, SECRET).unwrap();

    let claims = validate_token(&token, SECRET).unwrap();
    assert_eq!(claims.sub, user.id);
    assert_eq!(claims.anonymous_id, user.anonymous_id);
    assert_eq!(claims.email.as_deref(), Some("user@example.com"));
    assert!(claims.exp > claims.iat);
}

#[test]
fn anonymous_token_carries_no_email() {
    let user = test_user(true);
    let token = issue_token(&user, SECRET).unwrap();

    let claims = validate_token(&token, SECRET).unwrap();
    assert_eq!(claims.email, None);
    assert!(claims.anonymous_id.starts_with("anon_"));
}

#[test]
fn expired_token_is_rejected() {
    let user = test_user(false);
    // Well past the default 60s validation leeway.
    let token = issue_token_with_ttl(&user, SECRET, -300).unwrap();

    let err = validate_token(&token, SECRET).unwrap_err();
    assert!(matches!(err, mindwell_auth::error::AuthError::TokenExpired));
}

#[test]
fn wrong_secret_is_rejected() {
    let user = test_user(false);
    let token = issue_token(&user, SECRET).unwrap();

    assert!(validate_token(&token, b"other-secret").is_err());
}

#[test]
fn garbage_token_is_rejected() {
    assert!(validate_token("not.a.token", SECRET).is_err());
}

#[test]
fn password_hash_verifies_and_rejects() {
    let hash = hash_password("hunter2-but-longer").unwrap();
    assert_ne!(hash, "hunter2-but-longer");

    assert!(verify_password("hunter2-but-longer", &hash).unwrap());
    assert!(!verify_password("wrong-password", &hash).unwrap());
}
