//! Bounding-box outlines drawn around selected objects

use stage_core::{BoundingBox, NodeId};

use crate::gizmo::{LineGeometry, Rgba};

/// Edge box around one selected object's world AABB.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionOutline {
    pub node: NodeId,
    pub bounds: BoundingBox,
    pub lines: LineGeometry,
    pub color: Rgba,
}

impl SelectionOutline {
    pub fn new(node: NodeId, bounds: BoundingBox) -> Self {
        let mut outline = Self {
            node,
            bounds: BoundingBox::empty(),
            lines: LineGeometry::new(),
            color: Rgba::SELECTION,
        };
        outline.update(bounds);
        outline
    }

    /// Rebuilds the edges if the bounds changed. Returns true on rebuild.
    pub fn update(&mut self, bounds: BoundingBox) -> bool {
        if bounds == self.bounds && !self.lines.is_empty() {
            return false;
        }
        self.bounds = bounds;
        self.lines = if bounds.is_empty() {
            LineGeometry::new()
        } else {
            LineGeometry::new().cuboid(bounds.min, bounds.max)
        };
        true
    }

    pub fn dispose(&mut self) {
        self.lines.clear();
    }
}
