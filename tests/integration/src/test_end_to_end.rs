//! One account, all five strategies.

use std::collections::HashMap;
use std::sync::Arc;

use credstack_auth::action::{
    ActionBuildError, ActionFactory, AuthenticatedAction, CODE_FIELD, verify_action_code,
};
use credstack_auth::basic::verify_basic;
use credstack_auth::bearer::verify_bearer;
use credstack_auth::credentials::Principal;
use credstack_auth::email::{StaticPrimaryVerifier, verify_email_password};
use credstack_auth::url_param::verify_url_params;
use serde_json::{Map, Value};

use crate::{TOKEN_SECRET, basic_header, seeded_store, validator};

struct ConfirmEmail {
    user: Arc<Principal>,
}

impl AuthenticatedAction for ConfirmEmail {
    fn principal(&self) -> Arc<Principal> {
        Arc::clone(&self.user)
    }
}

struct ConfirmEmailFactory {
    known_codes: HashMap<String, Arc<Principal>>,
}

impl ActionFactory for ConfirmEmailFactory {
    type Action = ConfirmEmail;

    fn schema_id(&self) -> &str {
        "confirm-email"
    }

    fn build(&self, fields: Map<String, Value>) -> Result<ConfirmEmail, ActionBuildError> {
        fields
            .get(CODE_FIELD)
            .and_then(Value::as_str)
            .and_then(|code| self.known_codes.get(code))
            .map(|user| ConfirmEmail {
                user: Arc::clone(user),
            })
            .ok_or(ActionBuildError::BadSignature)
    }
}

#[test]
fn test_should_authenticate_same_account_under_all_five_strategies() {
    let (store, owner) = seeded_store(true);

    // Bearer.
    let auth = verify_bearer(&store, &format!("Token {TOKEN_SECRET}")).unwrap();
    assert_eq!(auth.principal, owner);

    // Basic, with each accepted username form.
    for username in ["", "a@b.com", "EXAMPLE.COM"] {
        let auth = verify_basic(&store, &basic_header(username, TOKEN_SECRET)).unwrap();
        assert_eq!(auth.principal, owner);
    }

    // URL parameters, username ignored.
    let auth =
        verify_url_params(&store, &format!("username=whoever&password={TOKEN_SECRET}")).unwrap();
    assert_eq!(auth.principal, owner);

    // Email/password payload.
    let mut verifier = StaticPrimaryVerifier::new();
    verifier.add_account(&owner, "hunter2");
    let mut payload = Map::new();
    payload.insert("email".to_owned(), Value::String("a@b.com".to_owned()));
    payload.insert("password".to_owned(), Value::String("hunter2".to_owned()));
    let auth = verify_email_password(&validator(), &verifier, &payload).unwrap();
    assert_eq!(auth.principal, owner);

    // Verification code.
    let factory = ConfirmEmailFactory {
        known_codes: HashMap::from([("good-code".to_owned(), Arc::clone(&owner))]),
    };
    let auth = verify_action_code(&validator(), &factory, "good-code", &Map::new()).unwrap();
    assert_eq!(auth.principal, owner);
}

#[test]
fn test_should_never_let_payload_code_shadow_route_code() {
    let (_, owner) = seeded_store(true);
    let factory = ConfirmEmailFactory {
        known_codes: HashMap::from([("route-code".to_owned(), Arc::clone(&owner))]),
    };

    // The body claims a valid code, but the route supplies a forged one:
    // authentication must fail.
    let mut payload = Map::new();
    payload.insert(CODE_FIELD.to_owned(), Value::String("route-code".to_owned()));
    assert!(verify_action_code(&validator(), &factory, "forged", &payload).is_err());

    // The body claims a forged code, but the route supplies the valid one:
    // authentication must succeed as the route intended.
    let mut payload = Map::new();
    payload.insert(CODE_FIELD.to_owned(), Value::String("forged".to_owned()));
    let auth = verify_action_code(&validator(), &factory, "route-code", &payload).unwrap();
    assert_eq!(auth.principal, owner);
}

#[test]
fn test_should_keep_token_strategies_interchangeable_for_same_secret() {
    let (store, owner) = seeded_store(true);

    let via_bearer = verify_bearer(&store, &format!("Token {TOKEN_SECRET}")).unwrap();
    let via_basic = verify_basic(&store, &basic_header("", TOKEN_SECRET)).unwrap();
    let via_params =
        verify_url_params(&store, &format!("username=x&password={TOKEN_SECRET}")).unwrap();

    assert_eq!(via_bearer.principal, owner);
    assert_eq!(via_basic.principal, owner);
    assert_eq!(via_params.principal, owner);
    assert_eq!(via_bearer.credential.key, via_basic.credential.key);
    assert_eq!(via_basic.credential.key, via_params.credential.key);
}
