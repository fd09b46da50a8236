//! Media Stage Renderer
//!
//! Backend-agnostic rendering support for the media stage.
//!
//! # Architecture
//!
//! - [`camera::OrbitCamera`] - Perspective camera, screen rays and projection
//! - [`picking`] - Ray intersection primitives
//! - [`gizmo::Gizmo`] - Translate/rotate/scale handle sets
//! - [`outline::SelectionOutline`] - Bounding-box edges of selected objects
//! - [`resources::ResourceLifecycleManager`] - Resource pool, video handles, disposal queue
//! - [`render_loop::RenderLoop`] - Fixed-cadence frame pacing
//! - [`render_list::RenderList`] - Cached draw items

pub mod camera;
pub mod gizmo;
pub mod outline;
pub mod picking;
pub mod render_list;
pub mod render_loop;
pub mod resources;

pub use camera::OrbitCamera;
pub use gizmo::{Gizmo, GizmoHandle, HandleShape, LineGeometry, Rgba, handle_scale};
pub use outline::SelectionOutline;
pub use picking::{Plane, Ray};
pub use render_list::{DrawItem, RenderList};
pub use render_loop::{FpsCounter, RenderLoop};
pub use resources::{
    CleanupReport, DisposeError, GpuResource, LifecycleConfig, MemoryStatus, MemoryWatchdog,
    PoolStats, ResourceKind, ResourceLifecycleManager, ResourcePool, ResourceReport,
    VideoDecoder, VideoFrame,
};
