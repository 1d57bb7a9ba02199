use std::path::PathBuf;

/// Errors that can occur while loading the world raster or building the collision field.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    #[error("failed to load raster '{0}': {1}")]
    ImageLoadFailed(PathBuf, String),

    #[error("raster must be square, got {width}x{height}")]
    NotSquare { width: u32, height: u32 },

    #[error("{layers} collision layers configured but raster only has {channels} channels")]
    MissingChannels { layers: usize, channels: usize },

    #[error("expected {expected} bytes of cell data, got {actual}")]
    DataLength { expected: usize, actual: usize },
}
