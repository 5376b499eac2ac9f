//! BSON layout of a stored coach.
//!
//! Key names match the collection as it already exists in production,
//! including `begining_date` and `TeamID`.

use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use coachdata_core::{Coach, CoachDetails, CoachId};

use super::StoreError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoachDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub last_name: String,
    pub date_of_birth: bson::DateTime,
    #[serde(rename = "begining_date")]
    pub beginning_date: bson::DateTime,
    pub specialization: Option<String>,
    pub country: Option<String>,
    pub phone_number: String,
    pub languages: Option<String>,
    pub sex: Option<String>,
    #[serde(rename = "TeamID")]
    pub team_id: Option<ObjectId>,
}

impl CoachDocument {
    /// Build the document stored under `id`.
    ///
    /// Fails with `InvalidIdentifier` when `team_id` is not an ObjectId.
    pub fn from_details(id: CoachId, details: CoachDetails) -> Result<Self, StoreError> {
        let team_id = details
            .team_id
            .as_deref()
            .map(|raw| {
                ObjectId::parse_str(raw)
                    .map_err(|e| StoreError::InvalidIdentifier(format!("team_id: {e}")))
            })
            .transpose()?;

        Ok(Self {
            id: id.into(),
            name: details.name,
            last_name: details.last_name,
            date_of_birth: to_bson_datetime(details.date_of_birth),
            beginning_date: to_bson_datetime(details.beginning_date),
            specialization: details.specialization,
            country: details.country,
            phone_number: details.phone_number,
            languages: details.languages,
            sex: details.sex,
            team_id,
        })
    }

    pub fn into_coach(self) -> Result<Coach, StoreError> {
        let details = CoachDetails {
            name: self.name,
            last_name: self.last_name,
            date_of_birth: from_bson_datetime("date_of_birth", self.date_of_birth)?,
            beginning_date: from_bson_datetime("begining_date", self.beginning_date)?,
            specialization: self.specialization,
            country: self.country,
            phone_number: self.phone_number,
            languages: self.languages,
            sex: self.sex,
            team_id: self.team_id.map(|oid| oid.to_hex()),
        };
        Ok(Coach::new(CoachId::from_object_id(self.id), details))
    }
}

// BSON dates have millisecond precision.
fn to_bson_datetime(value: DateTime<Utc>) -> bson::DateTime {
    bson::DateTime::from_millis(value.timestamp_millis())
}

fn from_bson_datetime(field: &str, value: bson::DateTime) -> Result<DateTime<Utc>, StoreError> {
    DateTime::<Utc>::from_timestamp_millis(value.timestamp_millis())
        .ok_or_else(|| StoreError::Corrupt(format!("{field} out of range")))
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
            specialization: Some("Goalkeeping".to_string()),
            country: None,
            phone_number: "555-0100".to_string(),
            languages: Some("en,pt".to_string()),
            sex: None,
            team_id: Some("65a1f0c2e4b0a1b2c3d4e5f7".to_string()),
        }
    }

    #[test]
    fn uses_legacy_key_names() {
        let doc = CoachDocument::from_details(CoachId::new(), test_details()).unwrap();
        let bson_doc = bson::to_document(&doc).unwrap();

        assert!(bson_doc.get_object_id("_id").is_ok());
        assert!(bson_doc.get_datetime("begining_date").is_ok());
        assert!(bson_doc.get_object_id("TeamID").is_ok());
        assert!(!bson_doc.contains_key("beginning_date"));
        assert!(!bson_doc.contains_key("team_id"));
    }

    #[test]
    fn malformed_team_id_is_an_invalid_identifier() {
        let mut details = test_details();
        details.team_id = Some("team-7".to_string());

        match CoachDocument::from_details(CoachId::new(), details) {
            Err(StoreError::InvalidIdentifier(msg)) => assert!(msg.contains("team_id")),
            other => panic!("expected InvalidIdentifier, got {other:?}"),
        }
    }

    #[test]
    fn maps_back_to_the_same_coach() {
        let id = CoachId::new();
        let details = test_details();
        let coach = CoachDocument::from_details(id, details.clone())
            .unwrap()
            .into_coach()
            .unwrap();

        assert_eq!(coach.id, id);
        assert_eq!(coach.details, details);
    }

    #[test]
    fn missing_optional_keys_read_as_none() {
        let oid = ObjectId::new();
        let raw = bson::doc! {
            "_id": oid,
            "name": "Ana",
            "last_name": "Lee",
            "date_of_birth": bson::DateTime::from_millis(0),
            "begining_date": bson::DateTime::from_millis(0),
            "phone_number": "555-0100",
        };
        let doc: CoachDocument = bson::from_document(raw).unwrap();
        let coach = doc.into_coach().unwrap();

        assert_eq!(coach.id.to_hex(), oid.to_hex());
        assert!(coach.details.country.is_none());
        assert!(coach.details.team_id.is_none());
    }
}
