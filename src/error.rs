/// A result type defaulting to the crate-wide [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All error variants that `frostid` can emit.
///
/// Both variants are fatal to the call that raised them; nothing is retried
/// internally and generator state is left untouched.
#[derive(Clone, Copy, thiserror::Error, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Error {
    /// The node ID passed at construction does not fit in the 10-bit node ID
    /// field. No generator is produced.
    #[error("node ID {node_id} is out of range 0..=1023")]
    InvalidNodeId { node_id: u64 },

    /// The time source reported a timestamp earlier than the last ID emission
    /// (e.g. an NTP correction or manual clock adjustment). The generator
    /// refuses to emit an ID rather than risk a collision; the caller decides
    /// whether to wait, retry, or abort.
    #[error("clock moved backwards: last emission at {last_millis} ms, now {now_millis} ms")]
    ClockMovedBackwards { last_millis: u64, now_millis: u64 },
}
