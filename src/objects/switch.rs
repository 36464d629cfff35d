use std::{any::Any, f32::consts::FRAC_PI_4};

use cgmath::{Quaternion, Rad, Rotation3, Vector3};

use crate::{
    context::SceneContext,
    data_structures::{
        material::{BLACK_PLASTIC, METAL},
        mesh::{BoxSize, MeshId},
    },
    objects::{Activation, GameObject, ObjectBase, ObjectId},
};

/// A toggle switch. The lever tilts +45° when off and -45° when on.
#[derive(Debug)]
pub struct Switch {
    base: ObjectBase,
    value: u8,
    plate: MeshId,
    toggle: MeshId,
}

impl Switch {
    pub fn new(ctx: &mut SceneContext, id: ObjectId) -> anyhow::Result<Self> {
        let base = ObjectBase::new(ctx, id, "switch");

        let plate = ctx.graph.create_box("plate", BoxSize::new(0.5, 0.8, 0.2));
        let toggle = ctx.graph.create_box("toggle", BoxSize::new(0.2, 0.2, 0.5));
        ctx.graph.attach(plate.node(), Some(base.node()))?;
        ctx.graph.attach(toggle.node(), Some(base.node()))?;
        ctx.graph
            .set_local_transform(toggle.node(), |local| local.position.z = 0.2);
        // The lever pivots around its base on the plate.
        if let Some(node) = ctx.graph.node_mut(toggle.node()) {
            node.pivot = Vector3::new(0.0, 0.0, -0.2);
        }

        let metal = ctx.materials.resolve(METAL);
        let black = ctx.materials.resolve(BLACK_PLASTIC);
        if let Some(boxed) = ctx.graph.mesh_mut(plate) {
            boxed.material = metal;
        }
        if let Some(boxed) = ctx.graph.mesh_mut(toggle) {
            boxed.material = black;
        }
        base.register_collision_mesh(ctx, plate);
        base.register_collision_mesh(ctx, toggle);

        Ok(Self {
            base,
            value: 0,
            plate,
            toggle,
        })
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    pub fn is_on(&self) -> bool {
        self.value > 0
    }

    /// Lever tilt about the x axis.
    pub fn angle(&self) -> Rad<f32> {
        Rad(FRAC_PI_4 * (1.0 - 2.0 * self.value as f32))
    }

    pub fn plate(&self) -> MeshId {
        self.plate
    }

    pub fn toggle(&self) -> MeshId {
        self.toggle
    }
}

impl GameObject for Switch {
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

    fn update(&mut self, ctx: &mut SceneContext) {
        let rotation = Quaternion::from_angle_x(self.angle());
        ctx.graph
            .set_local_transform(self.toggle.node(), |local| local.rotation = rotation);
    }

    fn on_activate(&mut self, ctx: &mut SceneContext, activation: &Activation) {
        self.value = 1 - self.value;
        self.update(ctx);
        ctx.sounds.play("switch", Some(activation.point));
    }
}
