use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config file: {0}")]
    Config(#[from] toml::de::Error),

    #[error(transparent)]
    Color(#[from] ColorError),

    #[error("terminal too small ({cols}x{rows}), need at least {min_cols}x{min_rows}")]
    SurfaceTooSmall {
        cols: u16,
        rows: u16,
        min_cols: u16,
        min_rows: u16,
    },

    #[error("{0}")]
    InvalidArgument(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("unrecognized color syntax: {0:?}")]
    Syntax(String),

    #[error("color component out of range in {0:?}")]
    Range(String),
}

pub type Result<T> = std::result::Result<T, Error>;
