//! Authentication against `username` and `password` URL parameters.
//!
//! This scheme exists for dynamic-DNS update clients, which can usually
//! send credentials only in the query string. The `password` parameter
//! carries an API token and is verified exactly like a bearer token. The
//! `username` parameter is required to be present but its value is never
//! checked — tokens are self-identifying, and the asymmetry with the Basic
//! scheme is long-standing observable behavior that clients depend on.
//! Changing it would alter who can authenticate with which query string.

use tracing::debug;

use crate::credentials::{Authenticated, CredentialStore, Token, find_active_token};
use crate::error::{AuthError, AuthResult};

/// Fixed literal for unknown-token and inactive-owner failures, as
/// expected by dynamic-DNS update clients.
const BADAUTH: &str = "badauth";

/// Verify credentials supplied as URL query parameters.
///
/// `query` is the raw (still percent-encoded) query string.
///
/// # Errors
///
/// Returns [`AuthError::MalformedCredentials`] naming the missing
/// parameter when `username` or `password` is absent — these messages
/// describe request shape, not credential validity — and
/// [`AuthError::InvalidCredentials`] with the fixed `badauth` literal when
/// the token is unknown or its owner inactive.
pub fn verify_url_params(
    store: &dyn CredentialStore,
    query: &str,
) -> AuthResult<Authenticated<Token>> {
    let mut username = None;
    let mut password = None;

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            "username" => username = Some(value.into_owned()),
            "password" => password = Some(value.into_owned()),
            _ => {}
        }
    }

    if username.is_none() {
        return Err(AuthError::MalformedCredentials(
            "No username URL parameter provided.".to_owned(),
        ));
    }

    let Some(password) = password else {
        return Err(AuthError::MalformedCredentials(
            "No password URL parameter provided.".to_owned(),
        ));
    };

    debug!(scheme = "url-param", "verifying token from query string");

    // The username value is intentionally ignored; see the module docs.
    find_active_token(store, &password, BADAUTH)
}
