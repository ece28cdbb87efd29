//! Serde support for [`SnowflakeId`].
//!
//! IDs serialize as their raw `u64` so they stay compact and sortable in
//! JSON, databases, and message payloads; any `u64` deserializes back (every
//! bit pattern is structurally valid). [`DecomposedId`] derives the standard
//! struct representation.
//!
//! [`DecomposedId`]: crate::DecomposedId

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::SnowflakeId;

impl Serialize for SnowflakeId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_raw().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SnowflakeId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Self::from_raw)
    }
}

#[cfg(test)]
mod tests {
    use crate::{DecomposedId, SnowflakeId};

    #[test]
    fn id_serializes_as_the_raw_integer() {
        let id = SnowflakeId::from_parts(1_000, 2, 1);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, id.to_raw().to_string());

        let back: SnowflakeId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn decomposed_id_round_trips_as_a_struct() {
        let parts = SnowflakeId::from_parts(1_000, 2, 1).decompose();
        let json = serde_json::to_string(&parts).unwrap();
        let back: DecomposedId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, parts);
    }
}
