use thiserror::Error;

/// Errors raised by the raster surface
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("Cannot allocate a {width}x{height} surface")]
    Allocation { width: u32, height: u32 },

    #[error("Failed to encode snapshot: {0}")]
    SnapshotEncode(String),

    #[error("Failed to decode snapshot: {0}")]
    SnapshotDecode(String),

    #[error("Failed to encode export image: {0}")]
    ExportEncode(#[from] image::ImageError),
}

/// Result type for surface operations
pub type SurfaceResult<T> = Result<T, SurfaceError>;

/// Errors found while loading or validating the board configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Errors raised when handing an exported image to the file-save collaborator
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Browser download failed: {0}")]
    Browser(String),
}

/// Errors raised by the topic roulette
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouletteError {
    #[error("Enter at least one topic")]
    Empty,
}

/// Umbrella error for the board application
#[derive(Debug, Error)]
pub enum BoardError {
    #[error(transparent)]
    Surface(#[from] SurfaceError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Save(#[from] SaveError),

    #[error(transparent)]
    Roulette(#[from] RouletteError),
}

pub type BoardResult<T> = Result<T, BoardError>;
