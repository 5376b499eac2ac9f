//! Coach request bodies.
//!
//! Field names are matched ignoring ASCII case and underscores, so
//! `last_name`, `LastName` and `LASTNAME` all land on the same field. Keys that
//! match no coach field (including `id`) are dropped.

use chrono::{NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde_json::{Map, Value as JsonValue};
use thiserror::Error;

use coachdata_core::{CoachDetails, DomainError};

const COACH_FIELDS: [&str; 10] = [
    "name",
    "last_name",
    "date_of_birth",
    "beginning_date",
    "specialization",
    "country",
    "phone_number",
    "languages",
    "sex",
    "team_id",
];

const DATE_FIELDS: [&str; 2] = ["date_of_birth", "beginning_date"];

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("body is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("body must be a JSON object")]
    NotAnObject,

    #[error("field {0} given more than once")]
    DuplicateField(&'static str),

    #[error(transparent)]
    Invalid(#[from] DomainError),
}

/// Parse a create/replace body into coach details.
pub fn parse_coach_payload(body: &[u8]) -> Result<CoachDetails, PayloadError> {
    let value: JsonValue = serde_json::from_slice(body)?;
    let JsonValue::Object(raw) = value else {
        return Err(PayloadError::NotAnObject);
    };

    let normalized = normalize_keys(raw)?;
    let details: CoachDetails = serde_json::from_value(JsonValue::Object(normalized))?;
    details.validate()?;
    Ok(details)
}

fn fold_key(key: &str) -> String {
    key.chars()
        .filter(|c| *c != '_')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn canonical_field(key: &str) -> Option<&'static str> {
    let folded = fold_key(key);
    COACH_FIELDS.into_iter().find(|field| fold_key(field) == folded)
}

fn normalize_keys(raw: Map<String, JsonValue>) -> Result<Map<String, JsonValue>, PayloadError> {
    let mut out = Map::new();
    for (key, value) in raw {
        let Some(field) = canonical_field(&key) else {
            continue;
        };
        let value = if DATE_FIELDS.contains(&field) {
            normalize_datetime(value)
        } else {
            value
        };
        if out.insert(field.to_string(), value).is_some() {
            return Err(PayloadError::DuplicateField(field));
        }
    }
    Ok(out)
}

/// Accept offset-less timestamps and bare dates as UTC.
///
/// Anything that is not one of those is passed through untouched and left for
/// the RFC 3339 deserializer to accept or reject.
fn normalize_datetime(value: JsonValue) -> JsonValue {
    let JsonValue::String(raw) = &value else {
        return value;
    };
    let raw = raw.trim();

    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        });

    match naive {
        Some(naive) => JsonValue::String(
            Utc.from_utc_datetime(&naive)
                .to_rfc3339_opts(SecondsFormat::AutoSi, true),
        ),
        None => value,
    }
}
