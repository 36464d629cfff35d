//! Scene graph and hierarchical scene organization.
//!
//! The graph is an arena of nodes. A node is either a bare transform (the
//! anchor of a game object or a controller grip) or a box mesh that can be
//! picked. Nodes reference their parent by [`NodeId`]; world transforms are
//! evaluated on demand by walking up the parent chain.
//!
//! There are two ways to change a parent, mirroring what scene scripts expect:
//!
//! - [`SceneGraph::attach`] keeps the local transform, so the node moves with
//!   its new parent's frame.
//! - [`SceneGraph::set_parent`] keeps the world transform and recomputes the
//!   local one, so the node stays where it is on screen.

use anyhow::{Context as _, bail, ensure};
use cgmath::{EuclideanSpace, Matrix4, Point3, SquareMatrix, Vector3};
use log::warn;

use crate::data_structures::{
    mesh::{BoxMesh, BoxSize, MeshId},
    transform::Transform,
};

/// Handle to a node in a [`SceneGraph`]. Handles are never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

#[derive(Clone, Debug)]
pub struct Node {
    pub name: String,
    pub local: Transform,
    /// Rotation and scaling happen around this point (in local space).
    pub pivot: Vector3<f32>,
    pub mesh: Option<BoxMesh>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    fn new(name: &str, mesh: Option<BoxMesh>) -> Self {
        Self {
            name: name.to_string(),
            local: Transform::new(),
            pivot: Vector3::new(0.0, 0.0, 0.0),
            mesh,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// `T(position) * T(pivot) * R * S * T(-pivot)`
    pub fn local_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.local.position + self.pivot)
            * Matrix4::from(self.local.rotation)
            * Matrix4::from_nonuniform_scale(
                self.local.scale.x,
                self.local.scale.y,
                self.local.scale.z,
            )
            * Matrix4::from_translation(-self.pivot)
    }

    /// Inverse of [`Node::local_matrix`] that leaves the pivot untouched.
    fn set_local_matrix(&mut self, m: Matrix4<f32>) {
        let decomposed = Transform::from_matrix(m);
        let linear = Matrix4::from(decomposed.rotation)
            * Matrix4::from_nonuniform_scale(
                decomposed.scale.x,
                decomposed.scale.y,
                decomposed.scale.z,
            );
        let pivot_offset = linear * self.pivot.extend(0.0);
        self.local = Transform {
            position: decomposed.position - self.pivot + pivot_offset.truncate(),
            ..decomposed
        };
    }
}

#[derive(Debug, Default)]
pub struct SceneGraph {
    nodes: Vec<Option<Node>>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty transform node at the world root.
    pub fn create_node(&mut self, name: &str) -> NodeId {
        self.insert(Node::new(name, None))
    }

    /// Creates a box mesh centred on its node origin, at the world root.
    pub fn create_box(&mut self, name: &str, size: BoxSize) -> MeshId {
        MeshId(self.insert(Node::new(name, Some(BoxMesh::new(size)))))
    }

    fn insert(&mut self, node: Node) -> NodeId {
        self.nodes.push(Some(node));
        NodeId(self.nodes.len() - 1)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    pub fn mesh(&self, id: MeshId) -> Option<&BoxMesh> {
        self.node(id.node()).and_then(|node| node.mesh.as_ref())
    }

    pub fn mesh_mut(&mut self, id: MeshId) -> Option<&mut BoxMesh> {
        self.node_mut(id.node()).and_then(|node| node.mesh.as_mut())
    }

    /// Mutates the local transform of a node; unknown nodes are reported and skipped.
    pub fn set_local_transform(&mut self, id: NodeId, mutation: impl FnOnce(&mut Transform)) {
        match self.node_mut(id) {
            Some(node) => mutation(&mut node.local),
            None => warn!("Tried to transform node {:?}, which is not part of the scene.", id),
        }
    }

    pub fn local_transform(&self, id: NodeId) -> Option<Transform> {
        self.node(id).map(|node| node.local)
    }

    /// All live mesh nodes, in creation order.
    pub fn meshes(&self) -> impl Iterator<Item = (MeshId, &BoxMesh)> + '_ {
        self.nodes.iter().enumerate().filter_map(|(idx, node)| {
            node.as_ref()
                .and_then(|node| node.mesh.as_ref())
                .map(|mesh| (MeshId(NodeId(idx)), mesh))
        })
    }

    pub fn len(&self) -> usize {
        self.nodes.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reparents `child` and keeps its local transform.
    pub fn attach(&mut self, child: NodeId, parent: Option<NodeId>) -> anyhow::Result<()> {
        self.check_reparent(child, parent)?;
        self.unlink(child);
        if let Some(parent_id) = parent {
            if let Some(parent_node) = self.node_mut(parent_id) {
                parent_node.children.push(child);
            }
        }
        if let Some(node) = self.node_mut(child) {
            node.parent = parent;
        }
        Ok(())
    }

    /// Reparents `child` and recomputes its local transform so that its world
    /// transform does not change.
    pub fn set_parent(&mut self, child: NodeId, parent: Option<NodeId>) -> anyhow::Result<()> {
        self.check_reparent(child, parent)?;
        let world = self.world_matrix(child)?;
        let parent_world = match parent {
            Some(parent_id) => self.world_matrix(parent_id)?,
            None => Matrix4::identity(),
        };
        let parent_inverse = parent_world
            .invert()
            .context("the new parent has a degenerate (non-invertible) transform")?;
        self.attach(child, parent)?;
        if let Some(node) = self.node_mut(child) {
            node.set_local_matrix(parent_inverse * world);
        }
        Ok(())
    }

    fn check_reparent(&self, child: NodeId, parent: Option<NodeId>) -> anyhow::Result<()> {
        ensure!(self.contains(child), "node {:?} is not part of the scene", child);
        let Some(parent) = parent else {
            return Ok(());
        };
        ensure!(self.contains(parent), "parent node {:?} is not part of the scene", parent);
        let mut cursor = Some(parent);
        while let Some(id) = cursor {
            if id == child {
                bail!("parenting {:?} under {:?} would create a cycle", child, parent);
            }
            cursor = self.node(id).and_then(Node::parent);
        }
        Ok(())
    }

    fn unlink(&mut self, child: NodeId) {
        let old_parent = self.node(child).and_then(Node::parent);
        if let Some(parent_node) = old_parent.and_then(|id| self.node_mut(id)) {
            parent_node.children.retain(|&c| c != child);
        }
    }

    /// Whether `node` lies in the subtree rooted at `ancestor` (a node is its own ancestor).
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cursor = Some(node);
        while let Some(id) = cursor {
            if id == ancestor {
                return true;
            }
            cursor = self.node(id).and_then(Node::parent);
        }
        false
    }

    pub fn world_matrix(&self, id: NodeId) -> anyhow::Result<Matrix4<f32>> {
        let mut node = self
            .node(id)
            .with_context(|| format!("node {:?} is not part of the scene", id))?;
        let mut world = node.local_matrix();
        while let Some(parent) = node.parent.and_then(|p| self.node(p)) {
            world = parent.local_matrix() * world;
            node = parent;
        }
        Ok(world)
    }

    pub fn world_transform(&self, id: NodeId) -> anyhow::Result<Transform> {
        self.world_matrix(id).map(Transform::from_matrix)
    }

    pub fn world_position(&self, id: NodeId) -> anyhow::Result<Point3<f32>> {
        let world = self.world_matrix(id)?;
        Ok(Point3::from_vec(world.w.truncate()))
    }

    /// Removes a node and its whole subtree. Returns the meshes that went away.
    pub fn remove(&mut self, id: NodeId) -> Vec<MeshId> {
        if !self.contains(id) {
            return Vec::new();
        }
        self.unlink(id);
        let mut removed = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.get_mut(current.0).and_then(Option::take) {
                if node.mesh.is_some() {
                    removed.push(MeshId(current));
                }
                stack.extend(node.children);
            }
        }
        removed
    }

    /// Removes every node. Slots stay allocated so old handles never alias new nodes.
    pub fn clear(&mut self) {
        self.nodes.iter_mut().for_each(|node| *node = None);
    }
}
