//! Grid placement for batch imports

use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::media::MediaDescriptor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridOrientation {
    /// Items lie on the floor in rows along Z
    #[default]
    Horizontal,
    /// Items stand in a wall, rows stacked along Y
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaceDirection {
    #[default]
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

/// Batch import request `{items, orientation, faceDirection, spacing, columns}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRequest {
    pub items: Vec<MediaDescriptor>,
    #[serde(default)]
    pub orientation: GridOrientation,
    #[serde(default)]
    pub face_direction: FaceDirection,
    #[serde(default = "default_spacing")]
    pub spacing: f32,
    #[serde(default = "default_columns")]
    pub columns: usize,
}

fn default_spacing() -> f32 {
    3.0
}

fn default_columns() -> usize {
    4
}

/// Position and Euler rotation for one imported item
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub position: Vec3,
    pub rotation: Vec3,
}

impl ImportRequest {
    pub fn new(items: Vec<MediaDescriptor>) -> Self {
        Self {
            items,
            orientation: GridOrientation::default(),
            face_direction: FaceDirection::default(),
            spacing: default_spacing(),
            columns: default_columns(),
        }
    }

    /// One placement per item, in item order.
    pub fn grid_placements(&self) -> Vec<Placement> {
        let columns = self.columns.max(1);
        let rows = self.items.len().div_ceil(columns) as f32;
        let cols = columns as f32;

        (0..self.items.len())
            .map(|index| {
                let row = (index / columns) as f32;
                let col = (index % columns) as f32;
                let x = (col - cols / 2.0 + 0.5) * self.spacing;
                let mut rotation = Vec3::ZERO;

                let position = match self.orientation {
                    GridOrientation::Horizontal => {
                        let z = (row - rows / 2.0 + 0.5) * self.spacing;
                        let mut y = 0.1;
                        match self.face_direction {
                            FaceDirection::Forward => {}
                            FaceDirection::Backward => rotation.y = PI,
                            FaceDirection::Left => rotation.y = FRAC_PI_2,
                            FaceDirection::Right => rotation.y = -FRAC_PI_2,
                            FaceDirection::Up => {
                                rotation.x = -FRAC_PI_2;
                                y = 0.0;
                            }
                            FaceDirection::Down => {
                                rotation.x = FRAC_PI_2;
                                y = 0.0;
                            }
                        }
                        Vec3::new(x, y, z)
                    }
                    GridOrientation::Vertical => {
                        match self.face_direction {
                            FaceDirection::Backward => rotation.y = PI,
                            FaceDirection::Left => rotation.y = FRAC_PI_2,
                            FaceDirection::Right => rotation.y = -FRAC_PI_2,
                            // Walls cannot face up or down
                            _ => {}
                        }
                        Vec3::new(x, (row + 0.5) * self.spacing, 0.0)
                    }
                };

                Placement { position, rotation }
            })
            .collect()
    }
}
