//! Collision mesh lookup.
//!
//! Picking yields meshes; game logic wants objects. The registry maps every
//! collision mesh to the object that registered it. It only indexes objects,
//! it never owns them, and entries are dropped together with their object.

use std::collections::HashMap;

use log::debug;

use crate::{data_structures::mesh::MeshId, objects::ObjectId};

#[derive(Debug, Default)]
pub struct CollisionRegistry {
    owners: HashMap<MeshId, ObjectId>,
    meshes: HashMap<ObjectId, Vec<MeshId>>,
}

impl CollisionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps `mesh` to `owner`. A mesh belongs to at most one object, so a
    /// previous owner loses the mesh.
    pub fn register(&mut self, mesh: MeshId, owner: ObjectId) {
        if let Some(previous) = self.owners.insert(mesh, owner) {
            if previous == owner {
                return;
            }
            debug!("Mesh {:?} moves from {:?} to {:?}", mesh, previous, owner);
            if let Some(list) = self.meshes.get_mut(&previous) {
                list.retain(|&m| m != mesh);
            }
        }
        self.meshes.entry(owner).or_default().push(mesh);
    }

    pub fn lookup(&self, mesh: MeshId) -> Option<ObjectId> {
        self.owners.get(&mesh).copied()
    }

    pub fn meshes_of(&self, owner: ObjectId) -> &[MeshId] {
        self.meshes.get(&owner).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn unregister_mesh(&mut self, mesh: MeshId) -> Option<ObjectId> {
        let owner = self.owners.remove(&mesh)?;
        if let Some(list) = self.meshes.get_mut(&owner) {
            list.retain(|&m| m != mesh);
        }
        Some(owner)
    }

    /// Drops every entry of `owner`; called when the object is destroyed.
    pub fn unregister_object(&mut self, owner: ObjectId) -> Vec<MeshId> {
        let meshes = self.meshes.remove(&owner).unwrap_or_default();
        for mesh in &meshes {
            self.owners.remove(mesh);
        }
        meshes
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    pub fn clear(&mut self) {
        self.owners.clear();
        self.meshes.clear();
    }
}
