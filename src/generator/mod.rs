mod atomic;
mod basic;
mod interface;
mod lock;
mod status;

pub use atomic::*;
pub use basic::*;
pub use interface::*;
pub use lock::*;
pub use status::*;

use crate::{Error, Result, SnowflakeId};

/// Rejects node IDs that do not fit the 10-bit field.
pub(crate) fn validate_node_id(node_id: u64) -> Result<u64> {
    if node_id > SnowflakeId::max_node_id() {
        return Err(Error::InvalidNodeId { node_id });
    }
    Ok(node_id)
}
