use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{CoachId, DomainError, DomainResult};

/// Every attribute of a coach except its identifier.
///
/// This is what callers submit on create and replace; the store owns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoachDetails {
    pub name: String,
    pub last_name: String,
    pub date_of_birth: DateTime<Utc>,
    pub beginning_date: DateTime<Utc>,
    pub specialization: Option<String>,
    pub country: Option<String>,
    pub phone_number: String,
    pub languages: Option<String>,
    pub sex: Option<String>,
    pub team_id: Option<String>,
}

impl CoachDetails {
    /// Check required-field presence.
    ///
    /// `name`, `last_name` and `phone_number` must be non-blank. Dates are
    /// required by the type itself.
    pub fn validate(&self) -> DomainResult<()> {
        let required = [
            ("name", &self.name),
            ("last_name", &self.last_name),
            ("phone_number", &self.phone_number),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(DomainError::validation(format!("{field} must not be empty")));
            }
        }
        Ok(())
    }
}

/// A stored coach record: store-assigned id plus details.
///
/// Serialized flat, so the JSON object carries `id` next to the detail fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coach {
    pub id: CoachId,
    #[serde(flatten)]
    pub details: CoachDetails,
}

impl Coach {
    pub fn new(id: CoachId, details: CoachDetails) -> Self {
        Self { id, details }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn test_details() -> CoachDetails {
        CoachDetails {
            name: "Ana".to_string(),
            last_name: "Lee".to_string(),
            date_of_birth: Utc.with_ymd_and_hms(1990, 1, 1, 0, 0, 0).unwrap(),
            beginning_date: Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
            specialization: None,
            country: None,
            phone_number: "555-0100".to_string(),
            languages: None,
            sex: None,
            team_id: None,
        }
    }

    #[test]
    fn validate_accepts_required_fields() {
        assert!(test_details().validate().is_ok());
    }

    #[test]
    fn validate_rejects_blank_required_fields() {
        let mut details = test_details();
        details.last_name = "   ".to_string();

        let err = details.validate().unwrap_err();
        match err {
            DomainError::Validation(msg) => assert!(msg.contains("last_name")),
            _ => panic!("Expected Validation error for blank last_name"),
        }
    }

    #[test]
    fn coach_serializes_flat_with_snake_case_names() {
        let id: CoachId = "65a1f0c2e4b0a1b2c3d4e5f6".parse().unwrap();
        let mut details = test_details();
        details.country = Some("BR".to_string());
        let json = serde_json::to_value(Coach::new(id, details)).unwrap();

        assert_eq!(json["id"], "65a1f0c2e4b0a1b2c3d4e5f6");
        assert_eq!(json["last_name"], "Lee");
        assert_eq!(json["phone_number"], "555-0100");
        assert_eq!(json["country"], "BR");
        assert_eq!(json["date_of_birth"], "1990-01-01T00:00:00Z");
        assert!(json["team_id"].is_null());
        assert!(json.get("details").is_none());
    }
}
