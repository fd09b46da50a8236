//! Ray casting against scene bounds and gizmo handle shapes

use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Always normalized
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or(Vec3::NEG_Z),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Infinite plane `normal · p = normal · point`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub point: Vec3,
    pub normal: Vec3,
}

impl Plane {
    pub fn new(point: Vec3, normal: Vec3) -> Self {
        Self {
            point,
            normal: normal.normalize_or(Vec3::Y),
        }
    }

    /// Intersection point with `ray`, `None` if parallel or behind the origin.
    pub fn intersect(&self, ray: &Ray) -> Option<Vec3> {
        let denom = self.normal.dot(ray.direction);
        if denom.abs() < 1e-6 {
            return None;
        }
        let t = (self.point - ray.origin).dot(self.normal) / denom;
        (t >= 0.0).then(|| ray.at(t))
    }
}

/// Ray-AABB (Axis-Aligned Bounding Box) intersection test
/// Returns the distance to intersection if hit, None otherwise
pub fn ray_aabb_intersection(ray: &Ray, bbox_min: Vec3, bbox_max: Vec3) -> Option<f32> {
    let inv_dir = ray.direction.recip();

    let t1 = (bbox_min - ray.origin) * inv_dir;
    let t2 = (bbox_max - ray.origin) * inv_dir;

    let tmin = t1.min(t2).max_element();
    let tmax = t1.max(t2).min_element();

    if tmax < 0.0 || tmin > tmax {
        return None;
    }

    Some(if tmin < 0.0 { tmax } else { tmin })
}

/// Ray-triangle intersection using Möller–Trumbore algorithm
/// Returns the distance to intersection if hit, None otherwise
pub fn ray_triangle_intersection(ray: &Ray, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<f32> {
    const EPSILON: f32 = 1e-6;

    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let h = ray.direction.cross(edge2);
    let a = edge1.dot(h);

    if a.abs() < EPSILON {
        return None; // Ray is parallel to triangle
    }

    let f = 1.0 / a;
    let s = ray.origin - v0;
    let u = f * s.dot(h);

    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray.direction.dot(q);

    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);

    if t > EPSILON { Some(t) } else { None }
}

pub fn ray_sphere_intersection(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let b = oc.dot(ray.direction);
    let c = oc.length_squared() - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let sqrt = disc.sqrt();
    let t = if -b - sqrt >= 0.0 { -b - sqrt } else { -b + sqrt };
    (t >= 0.0).then_some(t)
}

/// Closest approach between a ray and the segment `a..b`.
///
/// Returns `(distance, t_along_ray)`.
pub fn ray_segment_distance(ray: &Ray, a: Vec3, b: Vec3) -> (f32, f32) {
    let seg = b - a;
    let w0 = ray.origin - a;
    let aa = ray.direction.dot(ray.direction);
    let bb = ray.direction.dot(seg);
    let cc = seg.dot(seg);
    let dd = ray.direction.dot(w0);
    let ee = seg.dot(w0);
    let denom = aa * cc - bb * bb;

    let s = if denom.abs() < 1e-8 {
        if cc > 0.0 { ee / cc } else { 0.0 }
    } else {
        (aa * ee - bb * dd) / denom
    };
    let closest_seg = a + seg * s.clamp(0.0, 1.0);
    // Re-project onto the ray after clamping the segment parameter
    let t = (closest_seg - ray.origin).dot(ray.direction).max(0.0);

    (ray.at(t).distance(closest_seg), t)
}

/// Hit test against a capsule (segment with radius).
pub fn ray_capsule_intersection(ray: &Ray, a: Vec3, b: Vec3, radius: f32) -> Option<f32> {
    let (distance, t) = ray_segment_distance(ray, a, b);
    (distance <= radius).then_some(t)
}

/// Hit test against a torus ring lying in the plane with `normal`.
pub fn ray_ring_intersection(
    ray: &Ray,
    center: Vec3,
    normal: Vec3,
    radius: f32,
    tube: f32,
) -> Option<f32> {
    let plane = Plane::new(center, normal);
    if let Some(p) = plane.intersect(ray) {
        let d = (p - center).length();
        if (d - radius).abs() <= tube {
            return Some((p - ray.origin).length());
        }
    }

    // Edge-on rings: sample the circle and test each chord
    const SEGMENTS: usize = 64;
    let (u, v) = normal.normalize_or(Vec3::Y).any_orthonormal_pair();
    let mut best: Option<f32> = None;
    for i in 0..SEGMENTS {
        let a0 = i as f32 / SEGMENTS as f32 * std::f32::consts::TAU;
        let a1 = (i + 1) as f32 / SEGMENTS as f32 * std::f32::consts::TAU;
        let p0 = center + (u * a0.cos() + v * a0.sin()) * radius;
        let p1 = center + (u * a1.cos() + v * a1.sin()) * radius;
        if let Some(t) = ray_capsule_intersection(ray, p0, p1, tube)
            && best.is_none_or(|b| t < b)
        {
            best = Some(t);
        }
    }
    best
}
