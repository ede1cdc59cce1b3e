//! Verification-code authentication.
//!
//! A verification code is a capability: combined with the request payload,
//! it reconstructs a one-time domain action (confirm an email address,
//! reset a password) bound to a principal. Authentication here means
//! answering one question — "is this code, in the context of this payload,
//! currently valid" — by validating the merged fields against the action's
//! schema and then asking the action factory to construct the action.
//! Construction failure *is* an authentication failure.
//!
//! Actions are transient: built fresh per request, never persisted. If an
//! action must be single-use, the collaborator that executes it enforces
//! that; this layer only establishes validity.

use std::sync::Arc;

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

use crate::credentials::{Authenticated, Principal};
use crate::error::{AuthError, AuthResult, ValidationErrors};
use crate::schema::SchemaValidator;

/// Name of the merged code field.
pub const CODE_FIELD: &str = "code";

/// A one-time domain action reconstructed from a verification code.
pub trait AuthenticatedAction {
    /// The principal this action operates on.
    fn principal(&self) -> Arc<Principal>;
}

/// Why an action could not be constructed from validated fields.
///
/// Factories decide which variant applies; by default all of them collapse
/// into [`AuthError::InvalidCode`], but call sites that need finer-grained
/// failure kinds can map them via [`verify_action_code_with`].
#[derive(Debug, Error)]
pub enum ActionBuildError {
    /// The code's embedded signature does not verify.
    #[error("code signature is invalid")]
    BadSignature,

    /// The code was valid once but its validity window has passed.
    #[error("code has expired")]
    Expired,

    /// The code does not decode to any known action state.
    #[error("code does not decode to a known action")]
    Undecodable,
}

/// Trait for constructing a domain action from validated fields.
///
/// The factory names the schema its payload must satisfy and owns the
/// signature/expiry checks embedded in the code. `build` is the single
/// boundary that must stay side-channel-aware if the code carries a
/// signature.
pub trait ActionFactory: Send + Sync {
    /// The action type this factory produces.
    type Action: AuthenticatedAction;

    /// Identifier of the schema the merged fields must satisfy.
    fn schema_id(&self) -> &str;

    /// Construct the action from validated fields.
    ///
    /// # Errors
    ///
    /// Returns an [`ActionBuildError`] when the fields do not denote a
    /// currently valid action.
    fn build(&self, fields: Map<String, Value>) -> Result<Self::Action, ActionBuildError>;
}

/// Merge the caller-supplied code into the payload and validate the result.
///
/// The code comes from the call site (a route parameter, typically) and
/// **overwrites** any same-named field in the payload. The ordering is a
/// security invariant: if the payload could win, a client could forge the
/// action's intended identity through the request body.
///
/// # Errors
///
/// Returns the validator's per-field errors verbatim.
pub fn decode_and_validate_code(
    validator: &dyn SchemaValidator,
    schema_id: &str,
    code: &str,
    payload: &Map<String, Value>,
) -> Result<Map<String, Value>, ValidationErrors> {
    let mut merged = payload.clone();
    merged.insert(CODE_FIELD.to_owned(), Value::String(code.to_owned()));
    validator.validate(schema_id, &merged)
}

/// Verify a verification code plus request payload.
///
/// Construction failure maps to the generic [`AuthError::InvalidCode`];
/// use [`verify_action_code_with`] to substitute a different failure kind.
///
/// # Errors
///
/// Returns [`AuthError::Validation`] when the merged fields violate the
/// factory's schema, or [`AuthError::InvalidCode`] when the action cannot
/// be constructed.
pub fn verify_action_code<F: ActionFactory>(
    validator: &dyn SchemaValidator,
    factory: &F,
    code: &str,
    payload: &Map<String, Value>,
) -> AuthResult<Authenticated<F::Action>> {
    verify_action_code_with(validator, factory, code, payload, |_| AuthError::InvalidCode)
}

/// [`verify_action_code`] with a caller-chosen mapping for construction
/// failures.
///
/// Call sites that need to distinguish, say, an expired code from one that
/// was never valid pass their own `on_invalid`; the default collapses
/// everything into [`AuthError::InvalidCode`].
///
/// # Errors
///
/// Returns [`AuthError::Validation`] for schema violations, or whatever
/// `on_invalid` produces for construction failures.
pub fn verify_action_code_with<F: ActionFactory>(
    validator: &dyn SchemaValidator,
    factory: &F,
    code: &str,
    payload: &Map<String, Value>,
    on_invalid: impl Fn(ActionBuildError) -> AuthError,
) -> AuthResult<Authenticated<F::Action>> {
    let fields = decode_and_validate_code(validator, factory.schema_id(), code, payload)?;

    debug!(schema_id = factory.schema_id(), "constructing authenticated action");

    let action = factory.build(fields).map_err(|err| {
        warn!(schema_id = factory.schema_id(), error = %err, "action construction rejected code");
        on_invalid(err)
    })?;

    Ok(Authenticated {
        principal: action.principal(),
        credential: action,
    })
}
