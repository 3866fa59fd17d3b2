use cw_core::DeviceId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TelemetryError {
    /// A send was attempted before setup bound the device to a destination.
    #[error("{0} has no destination; connect it before starting")]
    NoDestination(DeviceId),
}

pub type TelemetryResult<T> = Result<T, TelemetryError>;
