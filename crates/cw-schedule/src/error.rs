use cw_core::SimTime;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("cannot schedule at {at}: clock is already at {now}")]
    InPast { at: SimTime, now: SimTime },
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
