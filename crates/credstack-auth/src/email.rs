//! Email/password payload authentication.
//!
//! The primary-credential scheme: the request body carries `email` and
//! `password` fields. This strategy's own job is narrow — validate the
//! payload shape, then hand both fields to the external
//! [`PrimaryCredentialVerifier`]. Schema violations propagate with
//! per-field detail; a credential mismatch surfaces whatever the verifier
//! raises, unmodified.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{Map, Value};
use subtle::ConstantTimeEq;
use tracing::{debug, warn};

use crate::credentials::{Authenticated, Principal};
use crate::error::{AuthError, AuthResult};
use crate::schema::SchemaValidator;

/// Schema identifier for the `{email, password}` payload.
pub const EMAIL_PASSWORD_SCHEMA: &str = "email-password";

/// Trait for verifying an account's primary credentials.
///
/// Implementations own password-hash comparison and whatever account state
/// checks apply; this crate never sees a stored password hash.
pub trait PrimaryCredentialVerifier: Send + Sync {
    /// Verify `email` and `password`, returning the matching principal.
    ///
    /// # Errors
    ///
    /// Returns whatever [`AuthError`] the implementation deems appropriate
    /// for a mismatch; callers propagate it untouched.
    fn verify_primary_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> AuthResult<Arc<Principal>>;
}

/// Verify an `{email, password}` request payload.
///
/// The primary-credential scheme yields no token object, so the credential
/// slot of the result is empty.
///
/// # Errors
///
/// Returns [`AuthError::Validation`] with per-field detail when the payload
/// violates the schema, or the verifier's own error on mismatch.
pub fn verify_email_password(
    validator: &dyn SchemaValidator,
    verifier: &dyn PrimaryCredentialVerifier,
    payload: &Map<String, Value>,
) -> AuthResult<Authenticated<()>> {
    let fields = validator.validate(EMAIL_PASSWORD_SCHEMA, payload)?;

    // The schema guarantees both fields are present, non-empty strings.
    let email = fields.get("email").and_then(Value::as_str).unwrap_or("");
    let password = fields.get("password").and_then(Value::as_str).unwrap_or("");

    debug!(scheme = "email-password", %email, "delegating to primary credential verifier");

    let principal = verifier.verify_primary_credentials(email, password)?;

    Ok(Authenticated {
        principal,
        credential: (),
    })
}

/// A simple in-memory verifier backed by a `HashMap` of plaintext accounts.
///
/// Suitable for testing and development environments only; production
/// callers implement [`PrimaryCredentialVerifier`] over their password-hash
/// store.
#[derive(Debug, Default)]
pub struct StaticPrimaryVerifier {
    accounts: HashMap<String, (String, Arc<Principal>)>,
}

/// The single message for unknown email and wrong password alike.
const INVALID_PRIMARY: &str = "Invalid username/password.";

impl StaticPrimaryVerifier {
    /// Create an empty verifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account with its plaintext password.
    pub fn add_account(&mut self, principal: &Arc<Principal>, password: &str) {
        self.accounts.insert(
            principal.email.clone(),
            (password.to_owned(), Arc::clone(principal)),
        );
    }
}

impl PrimaryCredentialVerifier for StaticPrimaryVerifier {
    fn verify_primary_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> AuthResult<Arc<Principal>> {
        let Some((stored, principal)) = self.accounts.get(email) else {
            warn!(scheme = "email-password", "unknown email");
            return Err(AuthError::InvalidCredentials(INVALID_PRIMARY));
        };

        if stored.as_bytes().ct_eq(password.as_bytes()).into() {
            Ok(Arc::clone(principal))
        } else {
            warn!(scheme = "email-password", %email, "password mismatch");
            Err(AuthError::InvalidCredentials(INVALID_PRIMARY))
        }
    }
}
