use core::fmt;

use crate::DEFAULT_EPOCH;

/// A packed 64-bit Snowflake ID.
///
/// Layout, most significant bits first:
///
/// ```text
///  Bit Index:  63             22 21           12 11             0
///              +----------------+--------------+---------------+
///  Field:      | timestamp (42) | node ID (10) | sequence (12) |
///              +----------------+--------------+---------------+
/// ```
///
/// The timestamp field holds milliseconds elapsed since the generator's
/// epoch. Because it occupies the high-order bits, numeric ordering of IDs is
/// generation ordering.
///
/// # Example
///
/// ```
/// use frostid::SnowflakeId;
///
/// let id = SnowflakeId::from_parts(1000, 2, 1);
/// assert_eq!(id.timestamp(), 1000);
/// assert_eq!(id.node_id(), 2);
/// assert_eq!(id.sequence(), 1);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SnowflakeId {
    id: u64,
}

impl SnowflakeId {
    /// Width of the timestamp field: every bit above the node ID.
    pub const TIMESTAMP_BITS: u32 = 64 - Self::NODE_ID_BITS - Self::SEQUENCE_BITS;

    /// Width of the node ID field.
    pub const NODE_ID_BITS: u32 = 10;

    /// Width of the sequence field.
    pub const SEQUENCE_BITS: u32 = 12;

    /// Bitmask for extracting the 42-bit timestamp field. Occupies bits 22
    /// through 63.
    pub const TIMESTAMP_MASK: u64 = (1 << Self::TIMESTAMP_BITS) - 1;

    /// Bitmask for extracting the 10-bit node ID field. Occupies bits 12
    /// through 21.
    pub const NODE_ID_MASK: u64 = (1 << Self::NODE_ID_BITS) - 1;

    /// Bitmask for extracting the 12-bit sequence field. Occupies bits 0
    /// through 11.
    pub const SEQUENCE_MASK: u64 = (1 << Self::SEQUENCE_BITS) - 1;

    /// Number of bits to shift the timestamp to its position (bit 22).
    pub const TIMESTAMP_SHIFT: u32 = Self::NODE_ID_BITS + Self::SEQUENCE_BITS;

    /// Number of bits to shift the node ID to its position (bit 12).
    pub const NODE_ID_SHIFT: u32 = Self::SEQUENCE_BITS;

    /// Constructs an ID from its three fields.
    ///
    /// `timestamp` is milliseconds since the encoding epoch, not an absolute
    /// wall-clock reading. Each field is masked to its width; debug builds
    /// assert that no field overflows.
    pub const fn from_parts(timestamp: u64, node_id: u64, sequence: u64) -> Self {
        debug_assert!(timestamp <= Self::TIMESTAMP_MASK, "timestamp overflow");
        debug_assert!(node_id <= Self::NODE_ID_MASK, "node_id overflow");
        debug_assert!(sequence <= Self::SEQUENCE_MASK, "sequence overflow");
        let timestamp = (timestamp & Self::TIMESTAMP_MASK) << Self::TIMESTAMP_SHIFT;
        let node_id = (node_id & Self::NODE_ID_MASK) << Self::NODE_ID_SHIFT;
        let sequence = sequence & Self::SEQUENCE_MASK;
        Self {
            id: timestamp | node_id | sequence,
        }
    }

    /// Extracts the timestamp field: milliseconds since the encoding epoch.
    pub const fn timestamp(&self) -> u64 {
        self.id >> Self::TIMESTAMP_SHIFT
    }

    /// Extracts the node ID field.
    pub const fn node_id(&self) -> u64 {
        (self.id >> Self::NODE_ID_SHIFT) & Self::NODE_ID_MASK
    }

    /// Extracts the sequence field.
    pub const fn sequence(&self) -> u64 {
        self.id & Self::SEQUENCE_MASK
    }

    /// Maximum encodable timestamp delta, in milliseconds (about 139 years).
    pub const fn max_timestamp() -> u64 {
        Self::TIMESTAMP_MASK
    }

    /// Maximum valid node ID (1023).
    pub const fn max_node_id() -> u64 {
        Self::NODE_ID_MASK
    }

    /// Maximum sequence value within one millisecond (4095).
    pub const fn max_sequence() -> u64 {
        Self::SEQUENCE_MASK
    }

    /// Returns the raw packed integer.
    pub const fn to_raw(&self) -> u64 {
        self.id
    }

    /// Reinterprets a raw integer as an ID.
    ///
    /// Every bit pattern is structurally decodable; the result is only
    /// meaningful if `raw` was produced by a compatible encoder.
    pub const fn from_raw(raw: u64) -> Self {
        Self { id: raw }
    }

    /// Splits the ID into its fields, reconstructing the absolute timestamp
    /// against [`DEFAULT_EPOCH`].
    ///
    /// IDs encoded with a custom epoch must use
    /// [`decompose_with_epoch`](Self::decompose_with_epoch) instead, or the
    /// reported timestamp will be shifted by the difference between the two
    /// epochs. Never fails.
    ///
    /// # Example
    ///
    /// ```
    /// use frostid::{DEFAULT_EPOCH, SnowflakeId};
    ///
    /// let id = SnowflakeId::from_parts(1000, 2, 1);
    /// let parts = id.decompose();
    /// assert_eq!(parts.timestamp, DEFAULT_EPOCH + 1000);
    /// assert_eq!(parts.node_id, 2);
    /// assert_eq!(parts.sequence, 1);
    /// assert_eq!(parts.epoch, DEFAULT_EPOCH);
    /// ```
    pub const fn decompose(&self) -> DecomposedId {
        self.decompose_with_epoch(DEFAULT_EPOCH)
    }

    /// Splits the ID into its fields, reconstructing the absolute timestamp
    /// against the given epoch (milliseconds since the Unix epoch).
    pub const fn decompose_with_epoch(&self, epoch: u64) -> DecomposedId {
        DecomposedId {
            timestamp: self.timestamp() + epoch,
            node_id: self.node_id(),
            sequence: self.sequence(),
            epoch,
        }
    }

    /// Returns the ID as a zero-padded 20-digit string.
    ///
    /// Padded strings sort lexicographically in the same order as the raw
    /// integers, which plain decimal rendering does not.
    pub fn to_padded_string(&self) -> String {
        format!("{:020}", self.id)
    }
}

impl From<u64> for SnowflakeId {
    fn from(raw: u64) -> Self {
        Self::from_raw(raw)
    }
}

impl From<SnowflakeId> for u64 {
    fn from(id: SnowflakeId) -> Self {
        id.to_raw()
    }
}

impl fmt::Display for SnowflakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl fmt::Debug for SnowflakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnowflakeId")
            .field("id", &self.id)
            .field("timestamp", &self.timestamp())
            .field("node_id", &self.node_id())
            .field("sequence", &self.sequence())
            .finish()
    }
}

/// The fields of a [`SnowflakeId`], unpacked.
///
/// `timestamp` is absolute milliseconds since the Unix epoch, reconstructed
/// against `epoch` (the epoch the decomposition was performed with).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DecomposedId {
    /// Emission time, in milliseconds since the Unix epoch.
    pub timestamp: u64,
    /// The generating node.
    pub node_id: u64,
    /// Position within the emission millisecond.
    pub sequence: u64,
    /// The epoch used to reconstruct `timestamp`.
    pub epoch: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_widths_partition_the_word() {
        assert_eq!(SnowflakeId::TIMESTAMP_BITS, 42);
        assert_eq!(SnowflakeId::NODE_ID_BITS, 10);
        assert_eq!(SnowflakeId::SEQUENCE_BITS, 12);
        assert_eq!(SnowflakeId::TIMESTAMP_SHIFT, 22);
        assert_eq!(SnowflakeId::NODE_ID_SHIFT, 12);
        assert_eq!(SnowflakeId::max_node_id(), 1023);
        assert_eq!(SnowflakeId::max_sequence(), 4095);
    }

    #[test]
    fn fields_round_trip_at_bounds() {
        let ts = SnowflakeId::max_timestamp();
        let node = SnowflakeId::max_node_id();
        let seq = SnowflakeId::max_sequence();

        let id = SnowflakeId::from_parts(ts, node, seq);
        assert_eq!(id.timestamp(), ts);
        assert_eq!(id.node_id(), node);
        assert_eq!(id.sequence(), seq);
        assert_eq!(id.to_raw(), u64::MAX);
    }

    #[test]
    fn packing_matches_the_reference_encoding() {
        // id = ((timestamp) << 22) | (node_id << 12) | sequence
        let id = SnowflakeId::from_parts(7, 5, 3);
        assert_eq!(id.to_raw(), (7 << 22) | (5 << 12) | 3);
    }

    #[test]
    fn raw_conversions_are_lossless() {
        let id = SnowflakeId::from_parts(123_456, 42, 99);
        assert_eq!(SnowflakeId::from_raw(id.to_raw()), id);
        assert_eq!(u64::from(SnowflakeId::from(id.to_raw())), id.to_raw());
    }

    #[test]
    fn decompose_uses_the_default_epoch() {
        let id = SnowflakeId::from_parts(1_000, 123, 7);
        let parts = id.decompose();
        assert_eq!(parts.timestamp, DEFAULT_EPOCH + 1_000);
        assert_eq!(parts.node_id, 123);
        assert_eq!(parts.sequence, 7);
        assert_eq!(parts.epoch, DEFAULT_EPOCH);
    }

    #[test]
    fn decompose_with_epoch_uses_the_given_origin() {
        let epoch = 1_700_000_000_000;
        let id = SnowflakeId::from_parts(5, 1, 0);
        let parts = id.decompose_with_epoch(epoch);
        assert_eq!(parts.timestamp, epoch + 5);
        assert_eq!(parts.epoch, epoch);
    }

    #[test]
    fn ordering_follows_timestamp_then_node_then_sequence() {
        let a = SnowflakeId::from_parts(1, 1023, 4095);
        let b = SnowflakeId::from_parts(2, 0, 0);
        assert!(a < b);

        let c = SnowflakeId::from_parts(2, 0, 1);
        assert!(b < c);
    }

    #[test]
    fn padded_string_sorts_like_the_raw_integer() {
        let small = SnowflakeId::from_parts(1, 0, 0);
        let large = SnowflakeId::from_parts(1_000_000, 0, 0);
        assert_eq!(small.to_padded_string().len(), 20);
        assert!(small.to_padded_string() < large.to_padded_string());
    }
}
