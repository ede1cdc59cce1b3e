//! Schema-validation collaborator.
//!
//! Payload-driven strategies hand raw request fields to a
//! [`SchemaValidator`] before acting on them. Validation is someone else's
//! machinery; this crate only consumes its outcome: structured data or a
//! list of per-field errors that propagate to the caller untouched.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::error::{FieldError, ValidationErrors};

/// Trait for validating a raw field map against a named schema.
///
/// Implementations may wrap any validation machinery. The contract is
/// narrow: given a schema identifier and the raw fields, either return the
/// structured data or every field-level violation found.
pub trait SchemaValidator: Send + Sync {
    /// Validate `raw` against the schema named by `schema_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] describing each violated field.
    fn validate(
        &self,
        schema_id: &str,
        raw: &Map<String, Value>,
    ) -> Result<Map<String, Value>, ValidationErrors>;
}

/// A simple in-memory validator backed by a `HashMap` of schemas.
///
/// Each registered schema is a list of required, non-empty string fields.
/// Suitable for testing and development environments; production callers
/// plug in their real validation layer via [`SchemaValidator`].
///
/// # Examples
///
/// ```
/// use credstack_auth::schema::{SchemaValidator, StaticSchemaValidator};
/// use serde_json::{Map, Value};
///
/// let validator = StaticSchemaValidator::new(vec![(
///     "email-password".to_owned(),
///     vec!["email".to_owned(), "password".to_owned()],
/// )]);
///
/// let mut raw = Map::new();
/// raw.insert("email".to_owned(), Value::String("a@example.com".to_owned()));
/// raw.insert("password".to_owned(), Value::String("hunter2".to_owned()));
/// assert!(validator.validate("email-password", &raw).is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct StaticSchemaValidator {
    schemas: HashMap<String, Vec<String>>,
}

impl StaticSchemaValidator {
    /// Create a validator from (schema id, required string fields) pairs.
    pub fn new(schemas: impl IntoIterator<Item = (String, Vec<String>)>) -> Self {
        Self {
            schemas: schemas.into_iter().collect(),
        }
    }
}

impl SchemaValidator for StaticSchemaValidator {
    fn validate(
        &self,
        schema_id: &str,
        raw: &Map<String, Value>,
    ) -> Result<Map<String, Value>, ValidationErrors> {
        let Some(required) = self.schemas.get(schema_id) else {
            return Err(ValidationErrors::single(
                schema_id,
                "Unknown schema.".to_owned(),
            ));
        };

        let mut fields = Vec::new();
        let mut validated = Map::new();

        for name in required {
            match raw.get(name) {
                None => fields.push(FieldError {
                    field: name.clone(),
                    message: "This field is required.".to_owned(),
                }),
                Some(Value::String(s)) if s.is_empty() => fields.push(FieldError {
                    field: name.clone(),
                    message: "This field may not be blank.".to_owned(),
                }),
                Some(Value::String(s)) => {
                    validated.insert(name.clone(), Value::String(s.clone()));
                }
                Some(_) => fields.push(FieldError {
                    field: name.clone(),
                    message: "Not a valid string.".to_owned(),
                }),
            }
        }

        if fields.is_empty() {
            // Undeclared fields are dropped, not echoed back.
            Ok(validated)
        } else {
            Err(ValidationErrors { fields })
        }
    }
}
