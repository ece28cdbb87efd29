use core::cmp::Ordering;
use std::sync::Arc;

use parking_lot::Mutex;
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    DEFAULT_EPOCH, Error, IdGenStatus, Result, SnowflakeGenerator, SnowflakeId, TimeSource,
    generator::validate_node_id,
};

/// Mutable generator state, guarded as one unit so a timestamp update and its
/// sequence reset are always observed together.
struct LockState {
    last_millis: u64,
    sequence: u64,
}

/// A lock-based Snowflake ID generator for multi-threaded use.
///
/// State sits behind an [`Arc<Mutex<_>>`]; cloning the generator yields a
/// handle to the **same** state, so clones stay collision-free with each
/// other. The mutex is a [`parking_lot::Mutex`], which does not poison.
///
/// ## Features
/// - ✅ Thread-safe
/// - ✅ Fair access under contention
///
/// ## Recommended When
/// - Several threads share one node ID
/// - Fairness matters more than raw throughput
///
/// ## See Also
/// - [`BasicSnowflakeGenerator`]
/// - [`AtomicSnowflakeGenerator`]
///
/// [`BasicSnowflakeGenerator`]: crate::BasicSnowflakeGenerator
/// [`AtomicSnowflakeGenerator`]: crate::AtomicSnowflakeGenerator
pub struct LockSnowflakeGenerator<T>
where
    T: TimeSource,
{
    node_id: u64,
    epoch: u64,
    state: Arc<Mutex<LockState>>,
    clock: T,
}

impl<T> Clone for LockSnowflakeGenerator<T>
where
    T: TimeSource + Clone,
{
    /// Returns a handle sharing this generator's state.
    fn clone(&self) -> Self {
        Self {
            node_id: self.node_id,
            epoch: self.epoch,
            state: Arc::clone(&self.state),
            clock: self.clock.clone(),
        }
    }
}

impl<T> LockSnowflakeGenerator<T>
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
    /// use frostid::{LockSnowflakeGenerator, SystemClock};
    ///
    /// # fn main() -> frostid::Result<()> {
    /// let generator = LockSnowflakeGenerator::new(7, SystemClock)?;
    ///
    /// let worker = generator.clone();
    /// let handle = std::thread::spawn(move || worker.next_id());
    ///
    /// let a = generator.next_id()?;
    /// let b = handle.join().expect("worker thread panicked")?;
    /// assert_ne!(a, b);
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
            state: Arc::new(Mutex::new(LockState {
                last_millis: 0,
                sequence: 0,
            })),
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
    /// The clock is sampled while holding the lock, so concurrent callers
    /// observe a consistent (timestamp, sequence) pair.
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
        let mut state = self.state.lock();
        let now = self.clock.current_millis();

        match now.cmp(&state.last_millis) {
            Ordering::Greater => {
                state.last_millis = now;
                state.sequence = 0;
                Ok(IdGenStatus::Ready {
                    id: self.encode(now, 0),
                })
            }
            Ordering::Equal => {
                let sequence = state.sequence + 1;
                if sequence > SnowflakeId::max_sequence() {
                    return Ok(IdGenStatus::Pending { yield_for: 1 });
                }
                state.sequence = sequence;
                Ok(IdGenStatus::Ready {
                    id: self.encode(now, sequence),
                })
            }
            Ordering::Less => Err(Self::cold_clock_behind(state.last_millis, now)),
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

impl<T> SnowflakeGenerator<T> for LockSnowflakeGenerator<T>
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
