//! User row and create/update input

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::FromRow;

use super::ValidationError;

/// Basic `local@domain.tld` shape, no whitespace or extra `@`
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("invalid email regex"));

/// Persisted user, as returned by `SELECT *`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
}

/// Raw create/update body, before validation.
///
/// Built from the body's top-level object, so a field of any JSON type is accepted.
/// Falsy values (`null`, `false`, `0`, `""`) count as missing. Other scalars become
/// their text form (`123` is `"123"`), and nested arrays or objects their JSON text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct UserPayload {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl From<Map<String, Value>> for UserPayload {
    fn from(mut fields: Map<String, Value>) -> Self {
        Self {
            name: fields.remove("name").and_then(field_text),
            email: fields.remove("email").and_then(field_text),
        }
    }
}

fn field_text(value: Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(s) => Some(s),
        Value::Bool(true) => Some("true".to_owned()),
        Value::Number(n) => Some(n.to_string()),
        nested @ (Value::Array(_) | Value::Object(_)) => Some(nested.to_string()),
    }
}

/// Validated name/email pair, ready to bind into an INSERT or UPDATE
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    name: String,
    email: String,
}

impl NewUser {
    /// Validate a name/email pair.
    ///
    /// # Rules
    /// - Both must be non-empty (checked first)
    /// - Email must match `^[^\s@]+@[^\s@]+\.[^\s@]+$`
    ///
    /// # Example
    /// ```
    /// use pgusers_server::models::{NewUser, ValidationError};
    ///
    /// assert!(NewUser::new("Ada", "ada@example.com").is_ok());
    /// assert_eq!(NewUser::new("", "ada@example.com"), Err(ValidationError::MissingFields));
    /// assert_eq!(NewUser::new("Ada", "not-an-email"), Err(ValidationError::InvalidEmail));
    /// ```
    pub fn new(name: &str, email: &str) -> Result<Self, ValidationError> {
        if name.is_empty() || email.is_empty() {
            return Err(ValidationError::MissingFields);
        }

        if !EMAIL_RE.is_match(email) {
            return Err(ValidationError::InvalidEmail);
        }

        Ok(Self {
            name: name.to_owned(),
            email: email.to_owned(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

impl TryFrom<UserPayload> for NewUser {
    type Error = ValidationError;

    fn try_from(payload: UserPayload) -> Result<Self, Self::Error> {
        match (payload.name, payload.email) {
            (Some(name), Some(email)) => Self::new(&name, &email),
            _ => Err(ValidationError::MissingFields),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(name: Option<&str>, email: Option<&str>) -> UserPayload {
        UserPayload {
            name: name.map(str::to_owned),
            email: email.map(str::to_owned),
        }
    }

    #[test]
    fn accepts_basic_addresses() {
        assert!(NewUser::new("Ada", "ada@example.com").is_ok());
        assert!(NewUser::new("Grace", "grace.hopper@navy.mil.us").is_ok());
        assert!(NewUser::new("x", "a+tag@b.co").is_ok());
    }

    #[test]
    fn rejects_missing_fields() {
        let err = NewUser::try_from(payload(None, Some("ada@example.com"))).unwrap_err();
        assert_eq!(err, ValidationError::MissingFields);

        let err = NewUser::try_from(payload(Some("Ada"), None)).unwrap_err();
        assert_eq!(err, ValidationError::MissingFields);

        let err = NewUser::try_from(UserPayload::default()).unwrap_err();
        assert_eq!(err, ValidationError::MissingFields);
    }

    #[test]
    fn rejects_empty_fields() {
        assert_eq!(
            NewUser::new("", "ada@example.com").unwrap_err(),
            ValidationError::MissingFields
        );
        assert_eq!(NewUser::new("Ada", "").unwrap_err(), ValidationError::MissingFields);
    }

    #[test]
    fn missing_fields_checked_before_format() {
        // empty name with a bad email still reports the missing field
        assert_eq!(
            NewUser::new("", "not-an-email").unwrap_err(),
            ValidationError::MissingFields
        );
    }

    #[test]
    fn rejects_malformed_email() {
        for email in [
            "not-an-email",
            "ada@example",
            "@example.com",
            "ada@.com",
            "ada lovelace@example.com",
            "ada@@example.com",
            "ada@example.",
        ] {
            assert_eq!(
                NewUser::new("Ada", email).unwrap_err(),
                ValidationError::InvalidEmail,
                "{email} should be rejected"
            );
        }
    }

    #[test]
    fn payload_fields_take_any_json_type() {
        let parsed: UserPayload =
            serde_json::from_value(json!({"name": 123, "email": "n@example.com", "age": 3}))
                .unwrap();
        assert_eq!(parsed, payload(Some("123"), Some("n@example.com")));
        assert!(NewUser::try_from(parsed).is_ok());

        // a number is never a valid address
        let parsed: UserPayload =
            serde_json::from_value(json!({"name": "Bo", "email": 42})).unwrap();
        assert_eq!(parsed.email.as_deref(), Some("42"));
        assert_eq!(
            NewUser::try_from(parsed).unwrap_err(),
            ValidationError::InvalidEmail
        );

        let parsed: UserPayload =
            serde_json::from_value(json!({"name": true, "email": {"a": 1}})).unwrap();
        assert_eq!(parsed, payload(Some("true"), Some(r#"{"a":1}"#)));
    }

    #[test]
    fn falsy_payload_fields_are_missing() {
        for falsy in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
            let parsed: UserPayload =
                serde_json::from_value(json!({"name": falsy.clone(), "email": "a@b.co"})).unwrap();
            assert_eq!(parsed.name, None, "{falsy}");
            assert_eq!(
                NewUser::try_from(parsed).unwrap_err(),
                ValidationError::MissingFields
            );
        }
    }

    #[test]
    fn payload_is_never_read_positionally() {
        let result = serde_json::from_value::<UserPayload>(json!(["Arr", "arr@example.com"]));
        assert!(result.is_err());
    }

    #[test]
    fn user_serializes_flat() {
        let user = User {
            id: 1,
            name: "Ada".into(),
            email: "ada@example.com".into(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json, json!({"id": 1, "name": "Ada", "email": "ada@example.com"}));
    }
}
