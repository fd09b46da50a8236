//! Scene store errors

use thiserror::Error;

use crate::scene::NodeId;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SceneError {
    #[error("a node with id `{0}` already exists")]
    DuplicateId(NodeId),

    #[error("node `{0}` not found")]
    NotFound(NodeId),

    #[error("grouping needs at least 2 media objects, got {0}")]
    GroupTooSmall(usize),

    #[error("node `{0}` cannot be grouped")]
    NotGroupable(NodeId),

    #[error("node `{0}` is not a group")]
    NotAGroup(NodeId),
}
