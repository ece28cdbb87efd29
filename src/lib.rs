//! Coordination-free, time-sortable 64-bit Snowflake IDs.
//!
//! `frostid` packs a millisecond timestamp, a node identifier, and a
//! per-millisecond sequence counter into a single sortable integer. Generators
//! on different nodes never coordinate: as long as every node is assigned a
//! distinct node ID, the IDs they emit are globally unique.
//!
//! # Bit layout
//!
//! ```text
//!  Bit Index:  63             22 21           12 11             0
//!              +----------------+--------------+---------------+
//!  Field:      | timestamp (42) | node ID (10) | sequence (12) |
//!              +----------------+--------------+---------------+
//!              |<---- MSB --------- 64 bits -------- LSB ----->|
//! ```
//!
//! The timestamp field counts milliseconds since a configurable epoch
//! (defaulting to [`DEFAULT_EPOCH`]) and occupies all high-order bits, so
//! comparing two IDs numerically compares their generation order.
//!
//! # Quick start
//!
//! ```
//! use frostid::{BasicSnowflakeGenerator, SystemClock};
//!
//! # fn main() -> frostid::Result<()> {
//! let generator = BasicSnowflakeGenerator::new(1, SystemClock)?;
//!
//! let id = generator.next_id()?;
//! let parts = id.decompose();
//! assert_eq!(parts.node_id, 1);
//! # Ok(())
//! # }
//! ```
//!
//! # Choosing a generator
//!
//! - [`BasicSnowflakeGenerator`]: single-threaded, fastest. Not `Sync`.
//! - [`LockSnowflakeGenerator`]: shares state behind a mutex. Fair across
//!   threads.
//! - [`AtomicSnowflakeGenerator`]: lock-free compare-and-swap. Highest
//!   multi-threaded throughput, no fairness guarantee.
//!
//! # Clock behavior
//!
//! Generators read the current time from a [`TimeSource`], normally
//! [`SystemClock`]. When the sequence space for the current millisecond is
//! exhausted (4096 IDs), [`SnowflakeGenerator::next_id`] busy-waits until the
//! clock ticks over; [`SnowflakeGenerator::poll_id`] instead reports
//! [`IdGenStatus::Pending`] so callers can yield or sleep. If the clock is
//! observed running backwards, generation fails with
//! [`Error::ClockMovedBackwards`] rather than risking a duplicate ID; the
//! caller decides whether to wait, retry, or abort.

mod error;
mod generator;
mod id;
#[cfg(feature = "serde")]
mod serde;
mod time;

pub use crate::error::*;
pub use crate::generator::*;
pub use crate::id::*;
pub use crate::time::*;
