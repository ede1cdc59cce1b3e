//! Integration tests for CredStack authentication.
//!
//! These tests exercise several strategies against one shared in-memory
//! store, checking the cross-strategy properties that unit tests cannot:
//! identical failure behavior for inactive principals, and a full walk
//! across all five schemes for one account.

use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use credstack_auth::credentials::{Principal, StaticCredentialStore};
use credstack_auth::email::EMAIL_PASSWORD_SCHEMA;
use credstack_auth::schema::StaticSchemaValidator;

#[cfg(test)]
mod test_end_to_end;

/// Token secret used by every fixture.
pub const TOKEN_SECRET: &str = "mWkP6DBvKiwfjDkn0ZFv7tDMBZLx";

/// A store seeded with one principal (`a@b.com`, domain `example.com`)
/// holding one token.
#[must_use]
pub fn seeded_store(active: bool) -> (StaticCredentialStore, Arc<Principal>) {
    let mut store = StaticCredentialStore::new();
    let owner = store.add_principal("a@b.com", active);
    store.add_domain(&owner, "example.com");
    store.issue_token(&owner, TOKEN_SECRET);
    (store, owner)
}

/// Build a Basic `Authorization` header value.
#[must_use]
pub fn basic_header(username: &str, secret: &str) -> String {
    format!("Basic {}", BASE64.encode(format!("{username}:{secret}")))
}

/// A validator knowing the email-password schema and a `confirm-email`
/// action schema requiring only the code field.
#[must_use]
pub fn validator() -> StaticSchemaValidator {
    StaticSchemaValidator::new(vec![
        (
            EMAIL_PASSWORD_SCHEMA.to_owned(),
            vec!["email".to_owned(), "password".to_owned()],
        ),
        ("confirm-email".to_owned(), vec!["code".to_owned()]),
    ])
}
