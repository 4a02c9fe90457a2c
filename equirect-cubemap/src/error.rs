/// Error types for cube face conversion.
use crate::face::Face;
use crate::partition::Block;

#[derive(Debug)]
pub enum ConvertError {
    /// Bad face index, edge, parallelism or source dimensions. Raised before any work runs.
    InvalidArgument(String),
    /// Cancellation was observed between rows of a block.
    Cancelled,
    /// A work unit failed while filling its rows.
    WorkerFailed {
        block: Block,
        face: Face,
        message: String,
    },
    /// Output faces could not be allocated.
    ResourceExhausted(String),
    ThreadPool(rayon::ThreadPoolBuildError),
    Config(String),
}

impl From<rayon::ThreadPoolBuildError> for ConvertError {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        ConvertError::ThreadPool(err)
    }
}

impl From<serde_json::Error> for ConvertError {
    fn from(err: serde_json::Error) -> Self {
        ConvertError::Config(err.to_string())
    }
}

impl std::fmt::Display for ConvertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConvertError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            ConvertError::Cancelled => write!(f, "Conversion cancelled"),
            ConvertError::WorkerFailed {
                block,
                face,
                message,
            } => write!(
                f,
                "Worker for rows {}..{} failed on {} face: {}",
                block.start,
                block.end,
                face.name(),
                message
            ),
            ConvertError::ResourceExhausted(msg) => write!(f, "Resource exhausted: {}", msg),
            ConvertError::ThreadPool(e) => write!(f, "Thread pool error: {}", e),
            ConvertError::Config(msg) => write!(f, "Config error: {}", msg),
        }
    }
}

impl std::error::Error for ConvertError {}

impl ConvertError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ConvertError::Cancelled)
    }
}
