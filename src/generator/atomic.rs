use core::cmp::Ordering as CmpOrdering;

use portable_atomic::{AtomicU64, Ordering};
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    DEFAULT_EPOCH, Error, IdGenStatus, Result, SnowflakeGenerator, SnowflakeId, TimeSource,
    generator::validate_node_id,
};

/// A lock-free Snowflake ID generator for multi-threaded use.
///
/// The mutable state is one [`AtomicU64`] holding
/// `last_millis << 12 | sequence`, updated with compare-and-swap. The node ID
/// and epoch are immutable and stay outside the atomic word, which leaves 52
/// bits for the timestamp: enough Unix milliseconds for the next hundred
/// thousand years.
///
/// ## Features
/// - ✅ Thread-safe
/// - ✅ Lock-free: highest multi-threaded throughput
///
/// ## Caveats
/// No fairness: under heavy contention a thread can lose the
/// compare-and-swap race repeatedly ([`IdGenStatus::Pending`] with
/// `yield_for: 0`). Clock samples are taken outside the state update, so a
/// thread whose sample is a millisecond staler than state committed by a
/// faster thread observes [`Error::ClockMovedBackwards`]; retrying on the
/// next sample recovers.
///
/// [`Error::ClockMovedBackwards`]: crate::Error::ClockMovedBackwards
///
/// ## Recommended When
/// - Several threads share one node ID and throughput matters most
///
/// ## See Also
/// - [`BasicSnowflakeGenerator`]
/// - [`LockSnowflakeGenerator`]
///
/// [`BasicSnowflakeGenerator`]: crate::BasicSnowflakeGenerator
/// [`LockSnowflakeGenerator`]: crate::LockSnowflakeGenerator
pub struct AtomicSnowflakeGenerator<T>
where
    T: TimeSource,
{
    node_id: u64,
    epoch: u64,
    state: AtomicU64,
    clock: T,
}

impl<T> AtomicSnowflakeGenerator<T>
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
    /// use frostid::{AtomicSnowflakeGenerator, SystemClock};
    ///
    /// # fn main() -> frostid::Result<()> {
    /// let generator = AtomicSnowflakeGenerator::new(0, SystemClock)?;
    /// let id = generator.next_id()?;
    /// assert_eq!(id.sequence(), 0);
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(node_id: u64, clock: T) -> Result<Self> {
        Self::with_epoch(node_id, DEFAULT_EPOCH, clock)
    }

    /// Creates a generator encoding timestamps against a custom epoch, given
    /// in milliseconds since the Unix epoch.
    ///
    /// The epoch must not be later than any timestamp the clock will report.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidNodeId`] if `node_id` exceeds
    /// [`SnowflakeId::max_node_id`].
    pub fn with_epoch(node_id: u64, epoch: u64, clock: T) -> Result<Self> {
        Ok(Self {
            node_id: validate_node_id(node_id)?,
            epoch,
            state: AtomicU64::new(0),
            clock,
        })
    }

    /// Generates the next ID, busy-waiting while the current millisecond's
    /// sequence space is exhausted or the compare-and-swap race is lost.
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
    /// - `Ok(IdGenStatus::Pending { yield_for: 1 })`: the sequence space for
    ///   this millisecond is exhausted
    /// - `Ok(IdGenStatus::Pending { yield_for: 0 })`: another thread won the
    ///   compare-and-swap race; retry immediately
    /// - `Err(e)`: the clock moved backwards
    ///
    /// # Errors
    ///
    /// Returns [`Error::ClockMovedBackwards`] if the clock reports a
    /// timestamp earlier than the last emission.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn poll_id(&self) -> Result<IdGenStatus> {
        let now = self.clock.current_millis();

        let current = self.state.load(Ordering::Relaxed);
        let last_millis = current >> SnowflakeId::SEQUENCE_BITS;
        let sequence = current & SnowflakeId::SEQUENCE_MASK;

        let next = match now.cmp(&last_millis) {
            CmpOrdering::Greater => now << SnowflakeId::SEQUENCE_BITS,
            CmpOrdering::Equal => {
                if sequence < SnowflakeId::max_sequence() {
                    current + 1
                } else {
                    return Ok(IdGenStatus::Pending { yield_for: 1 });
                }
            }
            CmpOrdering::Less => return Err(Self::cold_clock_behind(last_millis, now)),
        };

        if self
            .state
            .compare_exchange(current, next, Ordering::Relaxed, Ordering::Relaxed)
            .is_ok()
        {
            Ok(IdGenStatus::Ready {
                id: self.encode(next),
            })
        } else {
            // Lost the race to another thread. Retry immediately.
            Ok(IdGenStatus::Pending { yield_for: 0 })
        }
    }

    /// Unpacks a state word into an ID, shifting the timestamp onto this
    /// generator's epoch.
    fn encode(&self, state: u64) -> SnowflakeId {
        let now = state >> SnowflakeId::SEQUENCE_BITS;
        let sequence = state & SnowflakeId::SEQUENCE_MASK;
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

impl<T> SnowflakeGenerator<T> for AtomicSnowflakeGenerator<T>
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
