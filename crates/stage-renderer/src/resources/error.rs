use stage_core::ResourceId;
use thiserror::Error;

/// Failure while releasing a GPU or decoder resource.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DisposeError {
    #[error("resource {0} is not in the pool")]
    Missing(ResourceId),

    #[error("resource {0} was already disposed")]
    AlreadyDisposed(ResourceId),

    #[error("backend failed to release {id}: {reason}")]
    Backend { id: ResourceId, reason: String },
}
