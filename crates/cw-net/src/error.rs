//! Network-substrate error type.

use thiserror::Error;

use cw_core::{BaseStationId, CoreError, NodeId};

/// Errors produced by `cw-net`.
///
/// Packet loss is not an error; it is reported as [`Transit::Drop`].
///
/// [`Transit::Drop`]: crate::Transit::Drop
#[derive(Debug, Error)]
pub enum NetError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("{0} does not exist")]
    UnknownNode(NodeId),

    #[error("{station} does not exist ({count} configured)")]
    UnknownBaseStation { station: BaseStationId, count: u32 },

    #[error("{0} is not attached to any base station")]
    NotAttached(NodeId),

    #[error("{0} has no IPv4 address")]
    Unaddressed(NodeId),

    #[error("device address pool exhausted")]
    AddressPoolExhausted,
}

pub type NetResult<T> = Result<T, NetError>;
