use ddm_core::ParamError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("trial count must be at least 1")]
    EmptyRun,

    #[error("invalid parameters: {0}")]
    Param(#[from] ParamError),
}

pub type SimResult<T> = Result<T, SimError>;
