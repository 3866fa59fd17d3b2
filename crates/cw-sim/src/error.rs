use thiserror::Error;

use cw_core::CoreError;
use cw_net::NetError;
use cw_schedule::ScheduleError;
use cw_telemetry::TelemetryError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),

    #[error("network error: {0}")]
    Net(#[from] NetError),

    #[error("scheduling error: {0}")]
    Schedule(#[from] ScheduleError),
}

pub type SimResult<T> = Result<T, SimError>;
