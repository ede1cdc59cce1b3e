//! Multi-scheme credential verification for CredStack API services.
//!
//! This crate is the security boundary of the API: given an incoming
//! request's credentials, it decides whether they identify a legitimate
//! principal and, if so, returns that principal together with the specific
//! credential object that proved it. Everything behind this layer trusts
//! whatever principal it produces.
//!
//! Five strategies are supported, each self-contained and selected by the
//! caller:
//!
//! - [`bearer`] - `Authorization: Token <secret>` header authentication
//! - [`basic`] - HTTP Basic where the password field carries an API token
//! - [`url_param`] - `username`/`password` URL query parameters (dyndns)
//! - [`email`] - `{email, password}` request payload, delegated to the
//!   primary-credential verifier
//! - [`action`] - verification codes that reconstruct one-time domain
//!   actions
//!
//! Token secrets are never stored: the store holds one-way digests derived
//! by [`digest::hash_token`], and lookups re-derive the digest from the
//! presented secret. Strategies are stateless and read-only; each attempt
//! is independent and safe to run in parallel.
//!
//! # Usage
//!
//! ```rust
//! use credstack_auth::bearer::verify_bearer;
//! use credstack_auth::credentials::StaticCredentialStore;
//!
//! let mut store = StaticCredentialStore::new();
//! let owner = store.add_principal("a@example.com", true);
//! store.issue_token(&owner, "mWkP6DBvKiwfjDkn0ZFv7tDMBZLx");
//!
//! let auth = verify_bearer(&store, "Token mWkP6DBvKiwfjDkn0ZFv7tDMBZLx").unwrap();
//! assert_eq!(auth.principal.email, "a@example.com");
//! ```
//!
//! # Modules
//!
//! - [`digest`] - One-way token digest derivation and comparison
//! - [`credentials`] - Credential store trait, entities, in-memory store
//! - [`schema`] - Schema-validation collaborator trait
//! - [`error`] - Authentication error taxonomy
//! - [`bearer`], [`basic`], [`url_param`], [`email`], [`action`] - The
//!   five strategies

pub mod action;
pub mod basic;
pub mod bearer;
pub mod credentials;
pub mod digest;
pub mod email;
pub mod error;
pub mod schema;
pub mod url_param;

pub use action::{
    ActionBuildError, ActionFactory, AuthenticatedAction, decode_and_validate_code,
    verify_action_code, verify_action_code_with,
};
pub use basic::verify_basic;
pub use bearer::verify_bearer;
pub use credentials::{Authenticated, CredentialStore, Principal, StaticCredentialStore, Token};
pub use digest::{TokenDigest, digests_match, hash_token};
pub use email::{PrimaryCredentialVerifier, StaticPrimaryVerifier, verify_email_password};
pub use error::{AuthError, AuthResult, FieldError, ValidationErrors};
pub use schema::{SchemaValidator, StaticSchemaValidator};
pub use url_param::verify_url_params;
