//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use bson::oid::ObjectId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DomainError;

/// Identifier of a coach record.
///
/// Backed by a MongoDB ObjectId. On the wire it is always the canonical
/// 24-character lowercase hex string, never the extended-JSON `{"$oid": ..}`
/// form.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CoachId(ObjectId);

impl CoachId {
    /// Create a new identifier (time-prefixed, process-unique).
    pub fn new() -> Self {
        Self(ObjectId::new())
    }

    pub fn from_object_id(oid: ObjectId) -> Self {
        Self(oid)
    }

    pub fn as_object_id(&self) -> &ObjectId {
        &self.0
    }

    /// Canonical hex form.
    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }
}

impl Default for CoachId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for CoachId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

impl From<ObjectId> for CoachId {
    fn from(value: ObjectId) -> Self {
        Self(value)
    }
}

impl From<CoachId> for ObjectId {
    fn from(value: CoachId) -> Self {
        value.0
    }
}

impl FromStr for CoachId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let oid = ObjectId::parse_str(s)
            .map_err(|e| DomainError::invalid_id(format!("CoachId: {e}")))?;
        Ok(Self(oid))
    }
}

impl Serialize for CoachId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_hex())
    }
}

impl<'de> Deserialize<'de> for CoachId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_canonical_hex() {
        let id: CoachId = "65a1f0c2e4b0a1b2c3d4e5f6".parse().unwrap();
        assert_eq!(id.to_string(), "65a1f0c2e4b0a1b2c3d4e5f6");
    }

    #[test]
    fn rejects_malformed_strings() {
        for bad in ["", "not-an-id", "65a1f0c2e4b0a1b2c3d4e5f", "zza1f0c2e4b0a1b2c3d4e5f6"] {
            match bad.parse::<CoachId>() {
                Err(DomainError::InvalidId(_)) => {}
                other => panic!("expected InvalidId for {bad:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn serializes_as_plain_string() {
        let id: CoachId = "65a1f0c2e4b0a1b2c3d4e5f6".parse().unwrap();
        let json = serde_json::to_value(id).unwrap();
        assert_eq!(json, serde_json::json!("65a1f0c2e4b0a1b2c3d4e5f6"));
    }

    #[test]
    fn new_ids_are_distinct() {
        assert_ne!(CoachId::new(), CoachId::new());
    }

    proptest! {
        /// Any 12 raw bytes survive hex formatting and parsing.
        #[test]
        fn hex_form_parses_back(bytes in prop::array::uniform12(any::<u8>())) {
            let id = CoachId::from_object_id(ObjectId::from_bytes(bytes));
            let parsed: CoachId = id.to_string().parse().unwrap();
            prop_assert_eq!(parsed, id);
        }
    }
}
