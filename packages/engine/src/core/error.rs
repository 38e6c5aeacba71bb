use thiserror::Error;

#[derive(Debug, Error)]
pub enum BallpitError {
    #[error("missing canvas or mount target")]
    MissingCanvas,

    #[error("config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("palette needs at least two colors, got {0}")]
    PaletteTooShort(usize),

    #[error("browser API unavailable: {0}")]
    Browser(String),
}

pub type Result<T> = std::result::Result<T, BallpitError>;
