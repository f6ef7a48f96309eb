//! Failures that abort a render. Geometry and optics never fail, only the edges of
//! the pipeline do.

use std::path::PathBuf;

/// Errors that can occur when loading a scene description.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the scene file from disk.
    #[error("failed to read scene: {0}")]
    Read(#[source] std::io::Error),

    /// Failed to parse the JSON content.
    #[error("failed to parse scene: {0}")]
    Parse(#[source] serde_json::Error),

    /// Parsed, but describes a scene that cannot be rendered.
    #[error("invalid scene: {0}")]
    Invalid(String),
}

/// Encoder level failure while writing an output image.
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Exr(#[from] exr::error::Error),

    #[error("film of {width}x{height} pixels does not fit an image buffer")]
    Size { width: usize, height: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The planet texture could not be opened or decoded.
    #[error("err reading '{}': {source}", .path.display())]
    InputUnavailable {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The rendered image could not be created or encoded.
    #[error("could not write '{}': {source}", .path.display())]
    OutputUnwritable {
        path: PathBuf,
        #[source]
        source: OutputError,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to build the render thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
