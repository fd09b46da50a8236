//! Media Stage Core Data Structures
//!
//! This crate contains the core data structures for scene editing:
//! - SceneStore: arena of scene nodes (media, groups, lights)
//! - SceneRoot: the per-mount attachment list of a render surface
//! - Transform / AxisLocks: per-axis transform state
//! - ImportRequest: grid placement of a batch of media

pub mod bounds;
pub mod error;
pub mod layout;
pub mod media;
pub mod scene;
pub mod snapshot;
pub mod types;

pub use bounds::*;
pub use error::*;
pub use layout::*;
pub use media::*;
pub use scene::*;
pub use snapshot::*;
pub use types::*;
