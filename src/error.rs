use thiserror::Error;

#[derive(Error, Debug)]
pub enum StokeError {
    #[error("launch failed: {0}")]
    LaunchFailed(String),

    #[error("GPU unavailable: {0}")]
    GpuUnavailable(String),

    #[error("bad nvidia-smi output: {0}")]
    GpuParse(String),

    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
