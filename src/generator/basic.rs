use core::cell::Cell;
use core::cmp::Ordering;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    DEFAULT_EPOCH, Error, IdGenStatus, Result, SnowflakeGenerator, SnowflakeId, TimeSource,
    generator::validate_node_id,
};

/// A non-concurrent Snowflake ID generator for single-threaded use.
///
/// State lives in [`Cell`]s, so the generator is **not** [`Sync`]: the
/// compiler rejects unsynchronized sharing across threads instead of allowing
/// duplicate or out-of-order IDs at runtime.
///
/// ## Features
/// - ❌ Not thread-safe (and not shareable, by construction)
/// - ✅ Fastest flavor: no locking, no atomics
///
/// ## Recommended When
/// - One thread owns the generator outright
///
/// ## See Also
/// - [`LockSnowflakeGenerator`]
/// - [`AtomicSnowflakeGenerator`]
///
/// [`LockSnowflakeGenerator`]: crate::LockSnowflakeGenerator
/// [`AtomicSnowflakeGenerator`]: crate::AtomicSnowflakeGenerator
pub struct BasicSnowflakeGenerator<T>
where
    T: TimeSource,
{
    node_id: u64,
    epoch: u64,
    // Unix ms of the most recent emission. 0 is below any reachable
    // wall-clock reading, so the first call always lands in the
    // clock-advanced branch.
    last_millis: Cell<u64>,
    sequence: Cell<u64>,
    clock: T,
}

impl<T> BasicSnowflakeGenerator<T>
where
    T: TimeSource,
{
    /// Creates a generator for `node_id`, encoding timestamps against
    /// [`DEFAULT_EPOCH`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidNodeId`] if `node_id` exceeds
    /// [`SnowflakeId::max_node_id`]; no generator is produced.
    ///
    /// # Example
    ///
    /// ```
    /// use frostid::{BasicSnowflakeGenerator, SystemClock};
    ///
    /// # fn main() -> frostid::Result<()> {
    /// let generator = BasicSnowflakeGenerator::new(0, SystemClock)?;
    /// let id = generator.next_id()?;
    /// assert_eq!(id.node_id(), 0);
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(node_id: u64, clock: T) -> Result<Self> {
        Self::with_epoch(node_id, DEFAULT_EPOCH, clock)
    }

    /// Creates a generator encoding timestamps against a custom epoch, given
    /// in milliseconds since the Unix epoch.
    ///
    /// The epoch must not be later than any timestamp the clock will report;
    /// IDs are only meaningful for clock readings at or after the epoch.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidNodeId`] if `node_id` exceeds
    /// [`SnowflakeId::max_node_id`].
    pub fn with_epoch(node_id: u64, epoch: u64, clock: T) -> Result<Self> {
        Ok(Self {
            node_id: validate_node_id(node_id)?,
            epoch,
            last_millis: Cell::new(0),
            sequence: Cell::new(0),
            clock,
        })
    }

    /// Generates the next ID, busy-waiting while the current millisecond's
    /// sequence space is exhausted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ClockMovedBackwards`] if the clock reports a
    /// timestamp earlier than the last emission. State is left untouched; the
    /// caller decides whether to retry.
    pub fn next_id(&self) -> Result<SnowflakeId> {
        loop {
            match self.poll_id()? {
                IdGenStatus::Ready { id } => break Ok(id),
                IdGenStatus::Pending { .. } => core::hint::spin_loop(),
            }
        }
    }

    /// Attempts one non-blocking generation step.
    ///
    /// # Returns
    /// - `Ok(IdGenStatus::Ready { id })`: a new ID is available
    /// - `Ok(IdGenStatus::Pending { yield_for })`: milliseconds to wait
    ///   before polling again
    /// - `Err(e)`: the clock moved backwards
    ///
    /// # Errors
    ///
    /// Returns [`Error::ClockMovedBackwards`] if the clock reports a
    /// timestamp earlier than the last emission.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn poll_id(&self) -> Result<IdGenStatus> {
        let now = self.clock.current_millis();
        let last = self.last_millis.get();

        match now.cmp(&last) {
            Ordering::Greater => {
                self.last_millis.set(now);
                self.sequence.set(0);
                Ok(IdGenStatus::Ready {
                    id: self.encode(now, 0),
                })
            }
            Ordering::Equal => {
                let sequence = self.sequence.get() + 1;
                if sequence > SnowflakeId::max_sequence() {
                    return Ok(IdGenStatus::Pending { yield_for: 1 });
                }
                self.sequence.set(sequence);
                Ok(IdGenStatus::Ready {
                    id: self.encode(now, sequence),
                })
            }
            Ordering::Less => Err(Self::cold_clock_behind(last, now)),
        }
    }

    fn encode(&self, now: u64, sequence: u64) -> SnowflakeId {
        debug_assert!(now >= self.epoch, "clock reads before the configured epoch");
        SnowflakeId::from_parts(now - self.epoch, self.node_id, sequence)
    }

    #[cold]
    #[inline(never)]
    fn cold_clock_behind(last_millis: u64, now_millis: u64) -> Error {
        Error::ClockMovedBackwards {
            last_millis,
            now_millis,
        }
    }
}

impl<T> SnowflakeGenerator<T> for BasicSnowflakeGenerator<T>
where
    T: TimeSource,
{
    fn with_epoch(node_id: u64, epoch: u64, clock: T) -> Result<Self> {
        Self::with_epoch(node_id, epoch, clock)
    }

    fn next_id(&self) -> Result<SnowflakeId> {
        self.next_id()
    }

    fn poll_id(&self) -> Result<IdGenStatus> {
        self.poll_id()
    }
}
