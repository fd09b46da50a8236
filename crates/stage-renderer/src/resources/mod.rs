//! GPU resource management.

mod error;
mod lifecycle;
mod pool;
mod video;
mod watchdog;

pub use error::DisposeError;
pub use lifecycle::{CleanupReport, LifecycleConfig, ResourceLifecycleManager, VideoHandle};
pub use pool::{GpuResource, PoolStats, ResourceKind, ResourcePool};
pub use video::{VideoDecoder, VideoFrame};
pub use watchdog::{MemoryStatus, MemoryWatchdog, ResourceReport};
