//! Credential store collaborator and the entities it serves.
//!
//! This module defines the [`CredentialStore`] trait through which every
//! token strategy reaches the durable store, along with a
//! [`StaticCredentialStore`] for testing and development use cases.
//!
//! The store is read-only from this crate's perspective: tokens are created
//! and revoked by account-management logic elsewhere, and a failed lookup is
//! terminal for the request — never retried.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;

use crate::digest::{TokenDigest, hash_token};
use crate::error::{AuthError, AuthResult};

/// The identity a request acts as once authentication succeeds.
///
/// Principals are referenced, not owned, by this crate. The active flag and
/// the registered domain set live behind [`CredentialStore`] so that both
/// can be consulted (and tested) independently of the token lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Stable identifier for the account.
    pub uuid: Uuid,
    /// Case-sensitive identity string.
    pub email: String,
}

/// A long-lived credential record.
///
/// Holds the digest of a secret, never the secret itself. Many tokens may
/// reference the same principal, hence the shared ownership; a token's
/// lifetime is independent of any request and ends only with explicit
/// revocation.
#[derive(Debug, Clone)]
pub struct Token {
    /// Digest of the token secret; the unique lookup key in the store.
    pub key: TokenDigest,
    /// The principal this token belongs to.
    pub owner: Arc<Principal>,
}

/// The success value every strategy returns: a fully authenticated
/// principal together with the credential object that proved it.
///
/// There is no partial form of this value. A strategy either produces it or
/// fails; no default or anonymous principal exists.
#[derive(Debug, Clone)]
pub struct Authenticated<C> {
    /// The authenticated identity.
    pub principal: Arc<Principal>,
    /// The credential that established the identity.
    pub credential: C,
}

/// Trait for looking up tokens and principal attributes.
///
/// Implementations may back this with a database, a directory service, or
/// any other durable store. Lookups must complete before a strategy
/// returns; this crate imposes nothing else on how they run.
pub trait CredentialStore: Send + Sync {
    /// Find the token record whose key equals `digest`, if any.
    fn find_token_by_digest(&self, digest: &TokenDigest) -> Option<Token>;

    /// The domain names registered to `principal`, lowercase.
    fn principal_domains(&self, principal: &Principal) -> HashSet<String>;

    /// Whether `principal` may authenticate at all.
    fn principal_active(&self, principal: &Principal) -> bool;
}

/// Hash `secret`, look it up, and reject inactive owners.
///
/// Shared by the strategies whose only check is the token itself. The
/// no-such-token and inactive-owner branches both return `invalid`, so a
/// caller cannot tell which one fired.
pub(crate) fn find_active_token(
    store: &dyn CredentialStore,
    secret: &str,
    invalid: &'static str,
) -> AuthResult<Authenticated<Token>> {
    let digest = hash_token(secret);

    let Some(token) = store.find_token_by_digest(&digest) else {
        warn!(%digest, "no token matches presented secret");
        return Err(AuthError::InvalidCredentials(invalid));
    };

    if !store.principal_active(&token.owner) {
        warn!(email = %token.owner.email, "token owner is inactive");
        return Err(AuthError::InvalidCredentials(invalid));
    }

    Ok(Authenticated {
        principal: Arc::clone(&token.owner),
        credential: token,
    })
}

/// A simple in-memory credential store backed by `HashMap`s.
///
/// Suitable for testing and development environments. For production use,
/// implement [`CredentialStore`] against a durable store.
///
/// # Examples
///
/// ```
/// use credstack_auth::credentials::StaticCredentialStore;
///
/// let mut store = StaticCredentialStore::new();
/// let owner = store.add_principal("a@example.com", true);
/// store.issue_token(&owner, "mWkP6DBvKiwfjDkn0ZFv7tDMBZLx");
/// ```
#[derive(Debug, Default)]
pub struct StaticCredentialStore {
    tokens: HashMap<TokenDigest, Token>,
    domains: HashMap<Uuid, HashSet<String>>,
    active: HashMap<Uuid, bool>,
}

impl StaticCredentialStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a principal with the given active flag.
    pub fn add_principal(&mut self, email: &str, active: bool) -> Arc<Principal> {
        let principal = Arc::new(Principal {
            uuid: Uuid::new_v4(),
            email: email.to_owned(),
        });
        self.active.insert(principal.uuid, active);
        principal
    }

    /// Issue a token for `owner` from a plaintext secret.
    ///
    /// Only the digest is retained; the secret is hashed and dropped here.
    pub fn issue_token(&mut self, owner: &Arc<Principal>, secret: &str) -> Token {
        let token = Token {
            key: hash_token(secret),
            owner: Arc::clone(owner),
        };
        self.tokens.insert(token.key.clone(), token.clone());
        token
    }

    /// Register a domain name for `principal`. Stored lowercase.
    pub fn add_domain(&mut self, principal: &Principal, name: &str) {
        self.domains
            .entry(principal.uuid)
            .or_default()
            .insert(name.to_lowercase());
    }

    /// Flip a principal's active flag.
    pub fn set_active(&mut self, principal: &Principal, active: bool) {
        self.active.insert(principal.uuid, active);
    }
}

impl CredentialStore for StaticCredentialStore {
    fn find_token_by_digest(&self, digest: &TokenDigest) -> Option<Token> {
        self.tokens.get(digest).cloned()
    }

    fn principal_domains(&self, principal: &Principal) -> HashSet<String> {
        self.domains
            .get(&principal.uuid)
            .cloned()
            .unwrap_or_default()
    }

    fn principal_active(&self, principal: &Principal) -> bool {
        self.active.get(&principal.uuid).copied().unwrap_or(false)
    }
}
