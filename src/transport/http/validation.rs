//! Field validation for restaurant requests.
//!
//! Each field runs through a chain of rules (`is_string`, `not_empty`, ...).
//! A chain stops at its first failing rule, but every field is always
//! checked; the violations of all fields are collected and inspected once.

use crate::domain::restaurant::NewRestaurant;
use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::borrow::Cow;
use url::Host;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: &'static str,
    pub reason: &'static str,
}

impl FieldViolation {
    pub fn new(field: &'static str, reason: &'static str) -> Self {
        Self { field, reason }
    }
}

/// Collects violations across several field chains.
#[derive(Debug, Default)]
pub struct Validator {
    violations: Vec<FieldViolation>,
}

impl Validator {
    pub fn field<'a>(&'a mut self, field: &'static str, value: Option<&'a JsonValue>) -> FieldCheck<'a> {
        FieldCheck {
            field,
            value,
            state: CheckState::Running,
            sink: &mut self.violations,
        }
    }

    pub fn into_violations(self) -> Vec<FieldViolation> {
        self.violations
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CheckState {
    Running,
    /// Optional field whose key was missing.
    Skipped,
    Failed,
}

/// A rule chain over one field.
pub struct FieldCheck<'a> {
    field: &'static str,
    value: Option<&'a JsonValue>,
    state: CheckState,
    sink: &'a mut Vec<FieldViolation>,
}

impl<'a> FieldCheck<'a> {
    fn rule(mut self, reason: &'static str, ok: impl FnOnce(Option<&JsonValue>) -> bool) -> Self {
        if self.state == CheckState::Running && !ok(self.value) {
            self.sink.push(FieldViolation::new(self.field, reason));
            self.state = CheckState::Failed;
        }
        self
    }

    fn text(value: Option<&JsonValue>) -> Option<&str> {
        value.and_then(JsonValue::as_str)
    }

    /// A missing key skips the remaining rules. An explicit `null` does not.
    pub fn optional(mut self) -> Self {
        if self.state == CheckState::Running && self.value.is_none() {
            self.state = CheckState::Skipped;
        }
        self
    }

    pub fn is_string(self) -> Self {
        self.rule("must be a string", |v| matches!(v, Some(JsonValue::String(_))))
    }

    pub fn not_empty(self) -> Self {
        self.rule("must not be empty", |v| Self::text(v).is_some_and(|s| !s.is_empty()))
    }

    pub fn is_http_url(self) -> Self {
        self.rule("must be an http or https URL", |v| Self::text(v).is_some_and(is_http_url))
    }

    pub fn is_uuid(self) -> Self {
        self.rule("must be a UUID", |v| Self::text(v).is_some_and(|s| parse_uuid(s).is_some()))
    }

    /// The field's string value if every rule passed.
    pub fn into_string(self) -> Option<String> {
        match self.state {
            CheckState::Running => Self::text(self.value).map(str::to_owned),
            CheckState::Skipped | CheckState::Failed => None,
        }
    }
}

/// `http`/`https` URL check. The scheme may be omitted (`http` is assumed);
/// the host must be an IP literal or a dotted name ending in a real TLD.
pub fn is_http_url(raw: &str) -> bool {
    if raw.is_empty() || raw.chars().any(char::is_whitespace) {
        return false;
    }
    let candidate = if raw.contains("://") {
        Cow::Borrowed(raw)
    } else {
        Cow::Owned(format!("http://{}", raw))
    };
    match url::Url::parse(&candidate) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => match url.host() {
            Some(Host::Domain(domain)) => has_tld(domain),
            Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => true,
            None => false,
        },
        _ => false,
    }
}

fn has_tld(domain: &str) -> bool {
    let domain = domain.strip_suffix('.').unwrap_or(domain);
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        return false;
    }
    let Some(tld) = labels.last() else {
        return false;
    };
    tld.starts_with("xn--") || (tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()))
}

/// Accepts only the canonical hyphenated form (any version).
pub fn parse_uuid(raw: &str) -> Option<Uuid> {
    if raw.len() != 36 {
        return None;
    }
    Uuid::parse_str(raw).ok()
}

/// Unwraps the JSON extractor; malformed JSON counts as a body violation.
pub fn json_body(body: Result<Json<JsonValue>, JsonRejection>) -> Result<JsonValue, Vec<FieldViolation>> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "rejected request body");
            Err(vec![FieldViolation::new("body", "must be valid JSON")])
        }
    }
}

/// Validates `{ name, mapUrl, notes? }`.
pub fn restaurant_body(body: &JsonValue) -> Result<NewRestaurant, Vec<FieldViolation>> {
    let Some(obj) = body.as_object() else {
        return Err(vec![FieldViolation::new("body", "must be a JSON object")]);
    };

    let mut validator = Validator::default();
    let name = validator
        .field("name", obj.get("name"))
        .is_string()
        .not_empty()
        .into_string();
    let map_url = validator
        .field("mapUrl", obj.get("mapUrl"))
        .is_string()
        .is_http_url()
        .into_string();
    let notes = validator
        .field("notes", obj.get("notes"))
        .optional()
        .is_string()
        .into_string();

    let violations = validator.into_violations();
    match (name, map_url) {
        (Some(name), Some(map_url)) if violations.is_empty() => Ok(NewRestaurant {
            name,
            map_url,
            notes,
        }),
        _ => Err(violations),
    }
}

/// Validates the `:id` path segment.
pub fn restaurant_id(raw: &str) -> Result<Uuid, Vec<FieldViolation>> {
    let value = JsonValue::from(raw);
    let mut validator = Validator::default();
    let checked = validator.field("id", Some(&value)).is_string().is_uuid().into_string();
    match checked.as_deref().and_then(parse_uuid) {
        Some(id) => Ok(id),
        None => Err(validator.into_violations()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(violations: &[FieldViolation]) -> Vec<&'static str> {
        violations.iter().map(|v| v.field).collect()
    }

    #[test]
    fn accepts_minimal_body() {
        let input = restaurant_body(&json!({
            "name": "Prisma Cafe",
            "mapUrl": "https://example.com/cafe"
        }))
        .unwrap();

        assert_eq!(input.name, "Prisma Cafe");
        assert_eq!(input.map_url, "https://example.com/cafe");
        assert_eq!(input.notes, None);
    }

    #[test]
    fn null_notes_are_rejected() {
        let err = restaurant_body(&json!({
            "name": "a",
            "mapUrl": "http://example.com",
            "notes": null
        }))
        .unwrap_err();
        assert_eq!(err, vec![FieldViolation::new("notes", "must be a string")]);
    }

    #[test]
    fn keeps_notes_when_given() {
        let input = restaurant_body(&json!({
            "name": "a",
            "mapUrl": "http://example.com",
            "notes": "try the pho"
        }))
        .unwrap();
        assert_eq!(input.notes.as_deref(), Some("try the pho"));
    }

    #[test]
    fn collects_violations_from_every_field() {
        let err = restaurant_body(&json!({
            "name": "",
            "mapUrl": "ftp://example.com",
            "notes": 42
        }))
        .unwrap_err();

        assert_eq!(fields(&err), vec!["name", "mapUrl", "notes"]);
        assert_eq!(err[0].reason, "must not be empty");
    }

    #[test]
    fn missing_required_fields_fail_the_string_rule() {
        let err = restaurant_body(&json!({})).unwrap_err();
        assert_eq!(
            err,
            vec![
                FieldViolation::new("name", "must be a string"),
                FieldViolation::new("mapUrl", "must be a string"),
            ]
        );
    }

    #[test]
    fn non_object_body_is_rejected() {
        let err = restaurant_body(&json!(["name"])).unwrap_err();
        assert_eq!(fields(&err), vec!["body"]);
    }

    #[test]
    fn url_rule_allows_missing_scheme_but_needs_a_tld() {
        assert!(is_http_url("https://goo.gl/maps/abc"));
        assert!(is_http_url("www.example.com/cafe"));
        assert!(is_http_url("example.com:8080/x?y=1"));
        assert!(is_http_url("http://127.0.0.1:3000/map"));
        assert!(!is_http_url("http://localhost:8080"));
        assert!(!is_http_url("localhost"));
        assert!(!is_http_url("https://example.c0m"));
        assert!(!is_http_url("ftp://example.com"));
        assert!(!is_http_url("http://"));
        assert!(!is_http_url(" https://example.com"));
        assert!(!is_http_url("https://exa mple.com"));
    }

    #[test]
    fn id_must_be_hyphenated_uuid() {
        let id = Uuid::new_v4();
        assert_eq!(restaurant_id(&id.to_string()).unwrap(), id);

        assert!(restaurant_id("not-a-uuid").is_err());
        assert!(restaurant_id(&id.simple().to_string()).is_err());
        assert!(restaurant_id("").is_err());
        assert_eq!(fields(&restaurant_id("123").unwrap_err()), vec!["id"]);
    }
}
