use std::any::Any;

use instant::Duration;
use log::debug;

use crate::{
    context::SceneContext,
    data_structures::{
        material::{METAL, RED_PLASTIC, RED_PLASTIC_LIT},
        mesh::{BoxSize, MeshId},
    },
    objects::{Activation, DeferredAction, DeferredTask, GameObject, ObjectBase, ObjectId},
    timer::TaskHandle,
};

pub const DEFAULT_RELEASE_DELAY: Duration = Duration::from_millis(500);

const PRESSED_Z: f32 = 0.1;
const RELEASED_Z: f32 = 0.2;

/// A momentary push button. Activating it lights the cap and pushes it in;
/// it springs back on its own after the release delay.
#[derive(Debug)]
pub struct Button {
    base: ObjectBase,
    value: u8,
    plate: MeshId,
    toggle: MeshId,
    release_delay: Duration,
    pending_reset: Option<TaskHandle>,
}

impl Button {
    pub fn new(
        ctx: &mut SceneContext,
        id: ObjectId,
        release_delay: Duration,
    ) -> anyhow::Result<Self> {
        let base = ObjectBase::new(ctx, id, "button");

        let plate = ctx.graph.create_box("plate", BoxSize::new(0.8, 0.8, 0.2));
        let toggle = ctx.graph.create_box("toggle", BoxSize::new(0.6, 0.6, 0.3));
        ctx.graph.attach(plate.node(), Some(base.node()))?;
        ctx.graph.attach(toggle.node(), Some(base.node()))?;
        let metal = ctx.materials.resolve(METAL);
        if let Some(boxed) = ctx.graph.mesh_mut(plate) {
            boxed.material = metal;
        }
        base.register_collision_mesh(ctx, plate);
        base.register_collision_mesh(ctx, toggle);

        Ok(Self {
            base,
            value: 0,
            plate,
            toggle,
            release_delay,
            pending_reset: None,
        })
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    pub fn is_pressed(&self) -> bool {
        self.value > 0
    }

    pub fn plate(&self) -> MeshId {
        self.plate
    }

    pub fn toggle(&self) -> MeshId {
        self.toggle
    }

    pub fn pending_reset(&self) -> Option<TaskHandle> {
        self.pending_reset
    }
}

impl GameObject for Button {
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
        let (material, z) = if self.value > 0 {
            (RED_PLASTIC_LIT, PRESSED_Z)
        } else {
            (RED_PLASTIC, RELEASED_Z)
        };
        let material = ctx.materials.resolve(material);
        if let Some(boxed) = ctx.graph.mesh_mut(self.toggle) {
            boxed.material = material;
        }
        ctx.graph
            .set_local_transform(self.toggle.node(), |local| local.position.z = z);
    }

    fn on_activate(&mut self, ctx: &mut SceneContext, activation: &Activation) {
        self.value = 1;
        // Pressing again restarts the release window.
        if let Some(previous) = self.pending_reset.take() {
            ctx.scheduler.cancel(previous);
        }
        self.pending_reset = Some(ctx.scheduler.schedule(
            self.release_delay,
            DeferredTask {
                owner: self.base.id(),
                action: DeferredAction::ButtonReset {
                    point: activation.point,
                },
            },
        ));
        self.update(ctx);
        ctx.sounds.play("buttonDown", Some(activation.point));
    }

    fn on_deferred(&mut self, ctx: &mut SceneContext, task: TaskHandle, action: DeferredAction) {
        let DeferredAction::ButtonReset { point } = action;
        if self.pending_reset != Some(task) {
            debug!("Ignoring stale reset {:?} for {:?}", task, self.base.id());
            return;
        }
        self.pending_reset = None;
        self.value = 0;
        self.update(ctx);
        ctx.sounds.play("buttonUp", Some(point));
    }
}
