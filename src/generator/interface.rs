use crate::{DEFAULT_EPOCH, IdGenStatus, Result, SnowflakeId, TimeSource};

/// A minimal interface for generating Snowflake IDs.
///
/// All generator flavors share the same construction and generation contract;
/// they differ only in how their mutable state (`last_millis`, `sequence`) is
/// guarded. See [`BasicSnowflakeGenerator`], [`LockSnowflakeGenerator`], and
/// [`AtomicSnowflakeGenerator`].
///
/// [`BasicSnowflakeGenerator`]: crate::BasicSnowflakeGenerator
/// [`LockSnowflakeGenerator`]: crate::LockSnowflakeGenerator
/// [`AtomicSnowflakeGenerator`]: crate::AtomicSnowflakeGenerator
pub trait SnowflakeGenerator<T>: Sized
where
    T: TimeSource,
{
    /// Creates a generator encoding timestamps against [`DEFAULT_EPOCH`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidNodeId`] if `node_id` exceeds
    /// [`SnowflakeId::max_node_id`].
    ///
    /// [`Error::InvalidNodeId`]: crate::Error::InvalidNodeId
    fn new(node_id: u64, clock: T) -> Result<Self> {
        Self::with_epoch(node_id, DEFAULT_EPOCH, clock)
    }

    /// Creates a generator encoding timestamps against a custom epoch, given
    /// in milliseconds since the Unix epoch.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidNodeId`] if `node_id` exceeds
    /// [`SnowflakeId::max_node_id`].
    ///
    /// [`Error::InvalidNodeId`]: crate::Error::InvalidNodeId
    fn with_epoch(node_id: u64, epoch: u64, clock: T) -> Result<Self>;

    /// Generates the next ID, busy-waiting if the sequence space for the
    /// current millisecond is exhausted.
    ///
    /// The wait spins on the clock and is bounded by the next millisecond
    /// tick in practice. Callers that need a different backoff strategy
    /// should drive [`Self::poll_id`] directly.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ClockMovedBackwards`] if the time source reports a
    /// timestamp earlier than the last emission. The call is not retried and
    /// generator state is unchanged.
    ///
    /// [`Error::ClockMovedBackwards`]: crate::Error::ClockMovedBackwards
    fn next_id(&self) -> Result<SnowflakeId>;

    /// Attempts one non-blocking generation step.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ClockMovedBackwards`] if the time source reports a
    /// timestamp earlier than the last emission.
    ///
    /// [`Error::ClockMovedBackwards`]: crate::Error::ClockMovedBackwards
    fn poll_id(&self) -> Result<IdGenStatus>;
}
