//! Crate-wide error type.
//!
//! Each module owns its error enum; [`Error`] wraps them so callers mixing
//! several entry points can use `?` throughout. Resolution and matching have
//! no error path, so nothing here can come out of [`crate::style::resolve`].

use crate::config::ConfigError;
use crate::query::{BreakpointError, ConditionError, ParseError};
use crate::style::PercentError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Condition(#[from] ConditionError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Breakpoints(#[from] BreakpointError),
    #[error(transparent)]
    Percent(#[from] PercentError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
