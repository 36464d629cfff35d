//! Box meshes, the only geometry the panel scene needs.

use cgmath::Vector3;

use crate::data_structures::scene_graph::NodeId;

/// Identity of a mesh. Every mesh is also a scene graph node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshId(pub(crate) NodeId);

impl MeshId {
    pub fn node(self) -> NodeId {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxSize {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl BoxSize {
    pub const fn new(width: f32, height: f32, depth: f32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    pub fn half_extents(&self) -> Vector3<f32> {
        Vector3::new(self.width * 0.5, self.height * 0.5, self.depth * 0.5)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BoxMesh {
    pub size: BoxSize,
    /// Name of a material in the scene's
    /// [`MaterialLibrary`](crate::data_structures::material::MaterialLibrary).
    pub material: Option<String>,
    pub pickable: bool,
}

impl BoxMesh {
    pub fn new(size: BoxSize) -> Self {
        Self {
            size,
            material: None,
            pickable: true,
        }
    }
}
