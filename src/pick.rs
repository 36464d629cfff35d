//! Object picking and selection.
//!
//! Picking casts a ray through the scene graph and returns the closest
//! pickable box it hits. Each box is tested in its own local frame, where it
//! is axis aligned, so rotated and scaled meshes need no special handling.
//!
//! Rays come from two places: the desktop cursor (see
//! [`Camera::screen_ray`](crate::camera::Camera::screen_ray)) and the pointer
//! ray the XR runtime reports for each motion controller.

use cgmath::{InnerSpace, Point3, SquareMatrix, Vector3};

use crate::data_structures::{mesh::MeshId, scene_graph::SceneGraph};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Point3<f32>,
    /// Always unit length.
    pub direction: Vector3<f32>,
}

impl Ray {
    /// Returns `None` for a zero-length direction.
    pub fn new(origin: Point3<f32>, direction: Vector3<f32>) -> Option<Self> {
        let len = direction.magnitude();
        if len <= f32::EPSILON || !len.is_finite() {
            return None;
        }
        Some(Self {
            origin,
            direction: direction / len,
        })
    }

    pub fn at(&self, t: f32) -> Point3<f32> {
        self.origin + self.direction * t
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickInfo {
    pub mesh: MeshId,
    /// World-space hit point.
    pub point: Point3<f32>,
    /// Distance from the ray origin.
    pub distance: f32,
}

/// Finds the nearest pickable mesh hit by `ray`.
pub fn pick(graph: &SceneGraph, ray: &Ray) -> Option<PickInfo> {
    let mut best: Option<PickInfo> = None;
    for (mesh, boxed) in graph.meshes() {
        if !boxed.pickable {
            continue;
        }
        // A mesh whose world matrix can't be inverted is flat and can't be hit.
        let Some(inverse) = graph
            .world_matrix(mesh.node())
            .ok()
            .and_then(|world| world.invert())
        else {
            continue;
        };
        let origin = inverse * ray.origin.to_homogeneous();
        let direction = inverse * ray.direction.extend(0.0);
        let Some(t) = intersect_box(
            Point3::from_homogeneous(origin),
            direction.truncate(),
            boxed.size.half_extents(),
        ) else {
            continue;
        };
        if best.is_none_or(|b| t < b.distance) {
            best = Some(PickInfo {
                mesh,
                point: ray.at(t),
                distance: t,
            });
        }
    }
    best
}

/// Slab test against the box `[-half, half]`. Returns the entry distance, or
/// the exit distance when the origin lies inside the box.
fn intersect_box(origin: Point3<f32>, direction: Vector3<f32>, half: Vector3<f32>) -> Option<f32> {
    let mut t_min = f32::NEG_INFINITY;
    let mut t_max = f32::INFINITY;
    for axis in 0..3 {
        let (o, d, h) = (origin[axis], direction[axis], half[axis]);
        if d.abs() <= f32::EPSILON {
            if o < -h || o > h {
                return None;
            }
            continue;
        }
        let t1 = (-h - o) / d;
        let t2 = (h - o) / d;
        t_min = t_min.max(t1.min(t2));
        t_max = t_max.min(t1.max(t2));
        if t_min > t_max {
            return None;
        }
    }
    if t_max < 0.0 {
        return None;
    }
    Some(if t_min >= 0.0 { t_min } else { t_max })
}

