use crate::SnowflakeId;

/// The outcome of one non-blocking generation step.
///
/// [`SnowflakeGenerator::poll_id`] models the two non-error outcomes of ID
/// generation:
///
/// - [`IdGenStatus::Ready`]: a new ID was generated.
/// - [`IdGenStatus::Pending`]: the 4096-ID sequence space for the current
///   millisecond is exhausted; no ID can be produced until the clock advances.
///
/// `Pending` lets callers choose their own backoff (yield, sleep, or an async
/// timer) instead of the busy-wait built into
/// [`SnowflakeGenerator::next_id`].
///
/// # Example
///
/// ```
/// use frostid::{BasicSnowflakeGenerator, IdGenStatus, SystemClock};
///
/// # fn main() -> frostid::Result<()> {
/// let generator = BasicSnowflakeGenerator::new(0, SystemClock)?;
///
/// let id = loop {
///     match generator.poll_id()? {
///         IdGenStatus::Ready { id } => break id,
///         IdGenStatus::Pending { .. } => std::thread::yield_now(),
///     }
/// };
/// assert_eq!(id.node_id(), 0);
/// # Ok(())
/// # }
/// ```
///
/// [`SnowflakeGenerator::poll_id`]: crate::SnowflakeGenerator::poll_id
/// [`SnowflakeGenerator::next_id`]: crate::SnowflakeGenerator::next_id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdGenStatus {
    /// A unique ID was generated and is ready to use.
    Ready {
        /// The generated Snowflake ID.
        id: SnowflakeId,
    },
    /// The sequence is exhausted for the current millisecond tick.
    Pending {
        /// Milliseconds to wait before polling again. 0 means "retry
        /// immediately" (another thread won a compare-and-swap race).
        yield_for: u64,
    },
}
