//! Declarative request-body validation.
//!
//! Handlers declare the fields they require and the shapes they accept;
//! the validator rejects unparseable bodies, normalizes incoming key
//! casing, reports missing or mistyped fields by name in declaration
//! order, and hands the normalized object to serde. Unrecognized extra
//! fields pass through silently.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::ApiError;

/// Accepted shape for one required field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSpec {
    Str,
    Int,
    Bool,
    /// A plaintext password, or null to mean externally-authenticated.
    StrOrNull,
}

impl FieldSpec {
    /// serde_json keeps booleans and numbers disjoint, so a JSON `true`
    /// can never satisfy an integer field nor `1` a boolean one.
    fn matches(self, value: &Value) -> bool {
        match self {
            Self::Str => value.is_string(),
            Self::Int => value.is_i64() || value.is_u64(),
            Self::Bool => value.is_boolean(),
            Self::StrOrNull => value.is_string() || value.is_null(),
        }
    }

    const fn expected(self) -> &'static str {
        match self {
            Self::Str => "string",
            Self::Int => "integer",
            Self::Bool => "boolean",
            Self::StrOrNull => "string or null",
        }
    }
}

/// Required fields in declaration order, keyed by internal (snake_case)
/// name. Schemas are static data; an ill-formed one cannot be expressed.
pub struct Schema {
    fields: &'static [(&'static str, FieldSpec)],
}

impl Schema {
    #[must_use]
    pub const fn new(fields: &'static [(&'static str, FieldSpec)]) -> Self {
        Self { fields }
    }
}

/// Validates `body` against `schema` and deserializes the normalized
/// object into `T`.
pub fn validate<T: DeserializeOwned>(schema: &Schema, body: &[u8]) -> Result<T, ApiError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|_| ApiError::bad_request("Cannot decode json"))?;

    let Value::Object(raw) = value else {
        return Err(ApiError::bad_request("Cannot decode json"));
    };

    let normalized = underscore_keys(raw);

    for (name, spec) in schema.fields {
        let Some(value) = normalized.get(*name) else {
            return Err(ApiError::bad_request(format!("<{name}> should be provided")));
        };

        if !spec.matches(value) {
            return Err(ApiError::bad_request(format!(
                "<{name}> should be {}",
                spec.expected()
            )));
        }
    }

    serde_json::from_value(Value::Object(normalized))
        .map_err(|e| ApiError::internal(format!("Validated body failed to deserialize: {e}")))
}

/// Rewrites lowerCamelCase keys to the snake_case convention used
/// internally and in storage: `isExternalAccount` → `is_external_account`.
fn underscore_keys(map: Map<String, Value>) -> Map<String, Value> {
    map.into_iter()
        .map(|(key, value)| (underscore(&key), value))
        .collect()
}

fn underscore(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_uppercase() {
            out.push('_');
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize, Debug)]
    struct LoginBody {
        login: String,
        password: Option<String>,
    }

    const LOGIN_SCHEMA: Schema = Schema::new(&[
        ("login", FieldSpec::Str),
        ("password", FieldSpec::StrOrNull),
    ]);

    #[derive(Deserialize, Debug)]
    struct PolicyBody {
        length: i32,
        numbers: bool,
    }

    const POLICY_SCHEMA: Schema =
        Schema::new(&[("length", FieldSpec::Int), ("numbers", FieldSpec::Bool)]);

    fn error_message(err: ApiError) -> String {
        match err {
            ApiError::BadRequest(msg) => msg,
            other => panic!("expected BadRequest, got {other}"),
        }
    }

    #[test]
    fn underscores_camel_case_keys() {
        assert_eq!(underscore("isExternalAccount"), "is_external_account");
        assert_eq!(underscore("login"), "login");
        assert_eq!(underscore("oldPassword"), "old_password");
        assert_eq!(underscore("Login"), "_login");
    }

    #[test]
    fn accepts_camel_case_input() {
        #[derive(Deserialize)]
        struct Body {
            is_external_account: bool,
        }

        const SCHEMA: Schema = Schema::new(&[("is_external_account", FieldSpec::Bool)]);

        let body: Body = validate(&SCHEMA, br#"{"isExternalAccount": true}"#).unwrap();
        assert!(body.is_external_account);
    }

    #[test]
    fn rejects_unparseable_body() {
        let err = validate::<LoginBody>(&LOGIN_SCHEMA, b"not json").unwrap_err();
        assert_eq!(error_message(err), "Cannot decode json");

        let err = validate::<LoginBody>(&LOGIN_SCHEMA, b"[1, 2]").unwrap_err();
        assert_eq!(error_message(err), "Cannot decode json");
    }

    #[test]
    fn reports_missing_fields_in_declaration_order() {
        let err = validate::<LoginBody>(&LOGIN_SCHEMA, b"{}").unwrap_err();
        assert_eq!(error_message(err), "<login> should be provided");

        let err = validate::<LoginBody>(&LOGIN_SCHEMA, br#"{"login": "bob"}"#).unwrap_err();
        assert_eq!(error_message(err), "<password> should be provided");
    }

    #[test]
    fn null_satisfies_string_or_null_only() {
        let body: LoginBody =
            validate(&LOGIN_SCHEMA, br#"{"login": "bob", "password": null}"#).unwrap();
        assert_eq!(body.login, "bob");
        assert!(body.password.is_none());

        let err = validate::<LoginBody>(&LOGIN_SCHEMA, br#"{"login": null, "password": null}"#)
            .unwrap_err();
        assert_eq!(error_message(err), "<login> should be string");
    }

    #[test]
    fn booleans_and_integers_stay_disjoint() {
        let err =
            validate::<PolicyBody>(&POLICY_SCHEMA, br#"{"length": true, "numbers": true}"#)
                .unwrap_err();
        assert_eq!(error_message(err), "<length> should be integer");

        let err = validate::<PolicyBody>(&POLICY_SCHEMA, br#"{"length": 8, "numbers": 1}"#)
            .unwrap_err();
        assert_eq!(error_message(err), "<numbers> should be boolean");

        let body: PolicyBody =
            validate(&POLICY_SCHEMA, br#"{"length": 8, "numbers": true}"#).unwrap();
        assert_eq!(body.length, 8);
        assert!(body.numbers);
    }

    #[test]
    fn extra_fields_are_ignored() {
        let body: LoginBody = validate(
            &LOGIN_SCHEMA,
            br#"{"login": "bob", "password": "x", "color": "green"}"#,
        )
        .unwrap();
        assert_eq!(body.login, "bob");
        assert_eq!(body.password.as_deref(), Some("x"));
    }
}
