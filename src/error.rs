use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("unknown series `{0}`")]
    UnknownSeries(String),

    #[error("series `{0}` is already registered")]
    DuplicateSeries(String),

    #[error("unknown axis `{0}`")]
    UnknownAxis(String),

    #[error("rasterizer backend error: {0}")]
    Backend(String),
}
