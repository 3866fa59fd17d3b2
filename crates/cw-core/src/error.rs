//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `From`.

use thiserror::Error;

use crate::DeviceId;

/// The top-level error type for `cw-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("{0} not found")]
    DeviceNotFound(DeviceId),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `cw-core`.
pub type CoreResult<T> = Result<T, CoreError>;
