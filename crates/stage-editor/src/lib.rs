//! Media Stage Editor
//!
//! Interaction logic layered over the scene store and the renderer
//! primitives. Everything here is headless; the frontend feeds it pointer
//! events and draws what it exposes.
//!
//! - [`SelectionManager`] - selected ids and their bounding-box outlines
//! - [`TransformGizmoEngine`] - single-object control vs. multi-selection gizmo
//! - [`DragInteractionController`] - hover/drag state machine
//! - [`ops`] - lock-aware translate/rotate/scale math
//! - [`Viewport`] - one mount of the render surface
//! - [`StageEditor`] - the facade the UI talks to

pub mod backend;
pub mod drag;
pub mod editor;
pub mod gizmo_engine;
pub mod ops;
pub mod selection;
pub mod settings;
pub mod viewport;

#[cfg(test)]
pub(crate) mod test_support;

pub use backend::{LoadError, LoadedImage, LoadedModel, LoadedVideo, MediaBackend};
pub use drag::{DragContext, DragInteractionController, DragSession, DragState};
pub use editor::{AlignMode, MissingMedia, PreviewMode, StageEditor};
pub use gizmo_engine::{GizmoAttachment, TransformGizmoEngine};
pub use selection::SelectionManager;
pub use settings::EditorSettings;
pub use viewport::Viewport;
