//! Identity payload extractor
//!
//! Validates the provider's raw response and flattens it into a
//! [`RemoteIdentity`]. Two payload shapes are observed in the wild:
//!
//! - **Flat**: identity fields (`sub`, `email`, `confirmed_email`,
//!   `username`, `realname`) at the top level.
//! - **Nested**: the same fields under a `raw_info` object, with
//!   `confirmed_email` either inside `raw_info` or next to it.
//!
//! Shape handling is confined to [`ProviderPayload`]; a new provider shape is
//! one more variant here and nothing else changes.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;
use wikiauth_domain::{RemoteIdentity, Result, WikiAuthError};

/// Provider response, one variant per observed shape.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ProviderPayload {
    Nested {
        raw_info: RawInfo,
        #[serde(default, deserialize_with = "present")]
        confirmed_email: Option<Value>,
    },
    Flat(RawInfo),
}

#[derive(Debug, Deserialize)]
struct RawInfo {
    #[serde(default)]
    sub: Option<SubjectId>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default, deserialize_with = "present")]
    confirmed_email: Option<Value>,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    realname: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SubjectId {
    Text(String),
    Number(serde_json::Number),
}

impl SubjectId {
    fn into_string(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(number) => number.to_string(),
        }
    }
}

impl ProviderPayload {
    fn shape(&self) -> &'static str {
        match self {
            Self::Nested { .. } => "nested",
            Self::Flat(_) => "flat",
        }
    }

    /// Identity fields plus the verification flag, wherever it lives.
    fn into_parts(self) -> (RawInfo, Option<Value>) {
        match self {
            Self::Nested { mut raw_info, confirmed_email } => {
                let flag = raw_info.confirmed_email.take().or(confirmed_email);
                (raw_info, flag)
            }
            Self::Flat(mut raw_info) => {
                let flag = raw_info.confirmed_email.take();
                (raw_info, flag)
            }
        }
    }
}

/// Flatten a provider response into a [`RemoteIdentity`].
///
/// # Errors
/// Returns `WikiAuthError::MalformedPayload` if the response is not an
/// object of a known shape, if the subject identifier is absent or empty, or
/// if the email-verification flag is absent.
pub fn extract(provider_response: &Value) -> Result<RemoteIdentity> {
    let payload = ProviderPayload::deserialize(provider_response)
        .map_err(|e| WikiAuthError::MalformedPayload(format!("unrecognised payload: {e}")))?;

    let shape = payload.shape();
    let (info, flag) = payload.into_parts();

    let subject_id = info
        .sub
        .map(SubjectId::into_string)
        .filter(|sub| !sub.trim().is_empty())
        .ok_or_else(|| WikiAuthError::MalformedPayload("missing subject identifier".into()))?;

    let flag = flag.ok_or_else(|| {
        WikiAuthError::MalformedPayload("missing email verification flag".into())
    })?;

    debug!(shape, subject_id = %subject_id, "provider payload extracted");

    Ok(RemoteIdentity {
        subject_id,
        email: info.email.unwrap_or_default(),
        email_verified: is_truthy(&flag),
        display_name: non_empty(info.username),
        real_name: non_empty(info.realname).or_else(|| non_empty(info.name)),
    })
}

/// Provider truthiness of the verification flag.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Null => false,
        Value::String(text) => {
            let text = text.trim();
            !(text.is_empty() || text.eq_ignore_ascii_case("false") || text == "0")
        }
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Keeps an explicit `null` distinguishable from an absent key.
fn present<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn extracts_flat_payload() {
        let payload = json!({
            "sub": "42",
            "email": "a@x.org",
            "confirmed_email": true,
            "username": "Jane Doe",
            "realname": "Jane Q. Doe"
        });

        let identity = extract(&payload).expect("valid payload");
        assert_eq!(identity.subject_id, "42");
        assert_eq!(identity.email, "a@x.org");
        assert!(identity.email_verified);
        assert_eq!(identity.display_name.as_deref(), Some("Jane Doe"));
        assert_eq!(identity.real_name.as_deref(), Some("Jane Q. Doe"));
    }

    #[test]
    fn extracts_nested_payload_with_inner_flag() {
        let payload = json!({
            "raw_info": {
                "sub": 42,
                "email": "a@x.org",
                "confirmed_email": true,
                "username": "Jane Doe"
            }
        });

        let identity = extract(&payload).expect("valid payload");
        assert_eq!(identity.subject_id, "42");
        assert!(identity.email_verified);
        assert_eq!(identity.display_name.as_deref(), Some("Jane Doe"));
        assert_eq!(identity.real_name, None);
    }

    #[test]
    fn extracts_nested_payload_with_outer_flag() {
        let payload = json!({
            "confirmed_email": true,
            "raw_info": { "sub": "42", "email": "a@x.org" }
        });

        let identity = extract(&payload).expect("valid payload");
        assert!(identity.email_verified);
    }

    #[test]
    fn inner_flag_wins_over_outer_flag() {
        let payload = json!({
            "confirmed_email": true,
            "raw_info": { "sub": "42", "email": "a@x.org", "confirmed_email": false }
        });

        assert!(!extract(&payload).expect("valid payload").email_verified);
    }

    #[test]
    fn missing_subject_is_malformed() {
        let payload = json!({ "email": "a@x.org", "confirmed_email": true });
        assert!(matches!(extract(&payload), Err(WikiAuthError::MalformedPayload(_))));

        let payload = json!({ "sub": "  ", "confirmed_email": true });
        assert!(matches!(extract(&payload), Err(WikiAuthError::MalformedPayload(_))));
    }

    #[test]
    fn missing_verification_flag_is_malformed() {
        let payload = json!({ "raw_info": { "sub": "42", "email": "a@x.org" } });
        assert!(matches!(extract(&payload), Err(WikiAuthError::MalformedPayload(_))));
    }

    #[test]
    fn non_object_payload_is_malformed() {
        assert!(matches!(extract(&json!("nope")), Err(WikiAuthError::MalformedPayload(_))));
        assert!(matches!(extract(&Value::Null), Err(WikiAuthError::MalformedPayload(_))));
    }

    #[test]
    fn blank_flags_count_as_unverified() {
        for flag in [json!(false), json!(null), json!(""), json!("  "), json!("false"), json!(0)] {
            let payload = json!({ "sub": "42", "email": "a@x.org", "confirmed_email": flag });
            let identity = extract(&payload).expect("valid payload");
            assert!(!identity.email_verified, "flag {flag} should not verify");
        }
    }

    #[test]
    fn present_flags_count_as_verified() {
        for flag in [json!(true), json!("yes"), json!(1)] {
            let payload = json!({ "sub": "42", "email": "a@x.org", "confirmed_email": flag });
            assert!(extract(&payload).expect("valid payload").email_verified);
        }
    }

    #[test]
    fn missing_email_becomes_empty() {
        let payload = json!({ "sub": "42", "confirmed_email": false, "username": "" });
        let identity = extract(&payload).expect("valid payload");
        assert_eq!(identity.email, "");
        assert_eq!(identity.display_name, None);
    }

    #[test]
    fn real_name_falls_back_to_name() {
        let payload = json!({ "sub": "42", "confirmed_email": true, "name": "Jane" });
        assert_eq!(extract(&payload).expect("valid payload").real_name.as_deref(), Some("Jane"));
    }

    #[test]
    fn string_subject_is_kept_verbatim() {
        let payload = json!({ "sub": " 42", "confirmed_email": true });
        assert_eq!(extract(&payload).expect("valid payload").subject_id, " 42");

        let blank = json!({ "sub": "   ", "confirmed_email": true });
        assert!(matches!(extract(&blank), Err(WikiAuthError::MalformedPayload(_))));
    }
}
