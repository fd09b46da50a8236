//! Wireframe line geometry for gizmo handles and outlines

use std::f32::consts::TAU;

use glam::Vec3;

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    pub const WHITE: Rgba = Rgba::hex(0xffffff);
    pub const SELECTION: Rgba = Rgba::hex(0x00ff00);

    /// Opaque color from `0xRRGGBB`.
    pub const fn hex(rgb: u32) -> Self {
        Self([(rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8, 255])
    }

    pub const fn with_opacity(self, opacity: f32) -> Self {
        let [r, g, b, _] = self.0;
        Self([r, g, b, (opacity * 255.0) as u8])
    }

    pub fn r(&self) -> u8 {
        self.0[0]
    }

    pub fn g(&self) -> u8 {
        self.0[1]
    }

    pub fn b(&self) -> u8 {
        self.0[2]
    }

    pub fn a(&self) -> u8 {
        self.0[3]
    }
}

/// A list of line segments in some local space.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineGeometry {
    pub segments: Vec<[Vec3; 2]>,
}

impl LineGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(mut self, a: Vec3, b: Vec3) -> Self {
        self.segments.push([a, b]);
        self
    }

    /// Closed polyline through `points`.
    pub fn loop_through(mut self, points: &[Vec3]) -> Self {
        for (i, p) in points.iter().enumerate() {
            let next = points[(i + 1) % points.len()];
            self.segments.push([*p, next]);
        }
        self
    }

    /// Circle of `radius` around `center` in the plane with `normal`.
    pub fn circle(self, center: Vec3, normal: Vec3, radius: f32, segments: usize) -> Self {
        let (u, v) = normal.normalize_or(Vec3::Y).any_orthonormal_pair();
        let points: Vec<Vec3> = (0..segments.max(3))
            .map(|i| {
                let a = i as f32 / segments.max(3) as f32 * TAU;
                center + (u * a.cos() + v * a.sin()) * radius
            })
            .collect();
        self.loop_through(&points)
    }

    /// Cone outline with its base at `base` pointing along `dir`.
    pub fn cone(self, base: Vec3, dir: Vec3, radius: f32, height: f32) -> Self {
        let dir = dir.normalize_or(Vec3::Y);
        let tip = base + dir * height;
        let (u, v) = dir.any_orthonormal_pair();
        let rim: Vec<Vec3> = (0..8)
            .map(|i| {
                let a = i as f32 / 8.0 * TAU;
                base + (u * a.cos() + v * a.sin()) * radius
            })
            .collect();
        let mut geometry = self.loop_through(&rim);
        for p in &rim {
            geometry.segments.push([*p, tip]);
        }
        geometry
    }

    /// The 12 edges of an axis-aligned box.
    pub fn cuboid(mut self, min: Vec3, max: Vec3) -> Self {
        let c = [
            Vec3::new(min.x, min.y, min.z),
            Vec3::new(max.x, min.y, min.z),
            Vec3::new(max.x, max.y, min.z),
            Vec3::new(min.x, max.y, min.z),
            Vec3::new(min.x, min.y, max.z),
            Vec3::new(max.x, min.y, max.z),
            Vec3::new(max.x, max.y, max.z),
            Vec3::new(min.x, max.y, max.z),
        ];
        const EDGES: [(usize, usize); 12] = [
            (0, 1),
            (1, 2),
            (2, 3),
            (3, 0),
            (4, 5),
            (5, 6),
            (6, 7),
            (7, 4),
            (0, 4),
            (1, 5),
            (2, 6),
            (3, 7),
        ];
        for (a, b) in EDGES {
            self.segments.push([c[a], c[b]]);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn clear(&mut self) {
        self.segments.clear();
    }

    /// Segments scaled about the origin, then moved by `offset`.
    pub fn placed(&self, offset: Vec3, scale: f32) -> impl Iterator<Item = [Vec3; 2]> + '_ {
        self.segments
            .iter()
            .map(move |[a, b]| [*a * scale + offset, *b * scale + offset])
    }
}
