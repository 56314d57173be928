/// Invocation parameters that can never drive the engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("pin count must be positive but got {0}")]
    PinCount(i64),

    #[error("candidates per round must be positive but got {0}")]
    Candidates(i64),

    #[error("selections per round must be positive but got {0}")]
    Selections(i64),

    #[error("selections per round ({selections}) cannot exceed candidates per round ({candidates})")]
    SelectionsExceedCandidates { selections: i64, candidates: i64 },

    #[error("maximum chord count must be positive but got {0}")]
    MaxChords(i64),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("unable to allocate {bytes} bytes for the {purpose}")]
    Resource { purpose: &'static str, bytes: usize },

    #[error("image is {width}x{height} but both sides must be at least 2 pixels")]
    ImageTooSmall { width: u32, height: u32 },

    #[error("pixel buffer holds {actual} samples but a {width}x{height} image needs {expected}")]
    PixelCount {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unable to serialize run data: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// An empty `Vec` with room for exactly `len` items, or `Error::Resource`.
pub fn reserve<T>(len: usize, purpose: &'static str) -> Result<Vec<T>> {
    let mut items = Vec::new();
    items.try_reserve_exact(len).map_err(|_| Error::Resource {
        purpose,
        bytes: len.saturating_mul(std::mem::size_of::<T>()),
    })?;
    Ok(items)
}
