use std::{any::Any, f32::consts::PI};

use anyhow::ensure;
use cgmath::{Rad, Vector3};

use crate::{
    context::SceneContext,
    data_structures::{
        material::METAL,
        mesh::{BoxSize, MeshId},
    },
    objects::{GameObject, ObjectBase, ObjectId},
};

pub const DEFAULT_WIDTH: u32 = 6;
pub const DEFAULT_HEIGHT: u32 = 4;

/// A tilted metal board with a grid of unit cells other objects snap into.
#[derive(Debug)]
pub struct Panel {
    base: ObjectBase,
    width: u32,
    height: u32,
    mesh: MeshId,
}

impl Panel {
    pub fn new(ctx: &mut SceneContext, id: ObjectId) -> anyhow::Result<Self> {
        Self::with_size(ctx, id, DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }

    pub fn with_size(
        ctx: &mut SceneContext,
        id: ObjectId,
        width: u32,
        height: u32,
    ) -> anyhow::Result<Self> {
        ensure!(
            width > 0 && height > 0,
            "a panel needs at least one cell, got {}x{}",
            width,
            height
        );
        let base = ObjectBase::new(ctx, id, "panel");
        ctx.graph.set_local_transform(base.node(), |local| {
            *local = local.with_euler(Rad(-PI / 6.0), Rad(PI), Rad(0.0));
        });

        let mesh = ctx
            .graph
            .create_box("panel", BoxSize::new(width as f32, height as f32, 0.4));
        ctx.graph.attach(mesh.node(), Some(base.node()))?;
        ctx.graph
            .set_local_transform(mesh.node(), |local| local.position.z = -0.2);
        let material = ctx.materials.resolve(METAL);
        if let Some(boxed) = ctx.graph.mesh_mut(mesh) {
            boxed.material = material;
        }
        base.register_collision_mesh(ctx, mesh);

        Ok(Self {
            base,
            width,
            height,
            mesh,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn mesh(&self) -> MeshId {
        self.mesh
    }

    /// Centre of cell `(row, col)` in panel space. Row 0 is the top row and
    /// column 0 the leftmost one as seen from the front.
    pub fn position_from_index(&self, row: u32, col: u32) -> anyhow::Result<Vector3<f32>> {
        ensure!(
            row < self.height && col < self.width,
            "cell ({}, {}) is outside the {}x{} panel",
            row,
            col,
            self.width,
            self.height
        );
        Ok(Vector3::new(
            self.width as f32 * 0.5 - col as f32 - 0.5,
            self.height as f32 * 0.5 - row as f32 - 0.5,
            0.0,
        ))
    }
}

impl GameObject for Panel {
    fn base(&self) -> &ObjectBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ObjectBase {
        &mut self.base
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
