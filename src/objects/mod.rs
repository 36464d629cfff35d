//! Interactive scene objects.
//!
//! Every object owns a transform node in the scene graph and shares the
//! grab/release behaviour of [`ObjectBase`]. Concrete objects implement
//! [`GameObject`] and override the hooks they care about:
//!
//! - [`Panel`](panel::Panel) lays out other objects on a grid
//! - [`Button`](button::Button) lights up while pressed and springs back
//! - [`Switch`](switch::Switch) flips between two positions
//!
//! The scene owns the objects and calls into them; objects only ever see the
//! [`SceneContext`] they are handed.

pub mod button;
pub mod panel;
pub mod switch;

use std::{any::Any, fmt::Debug};

use cgmath::Point3;
use log::{debug, warn};

use crate::{
    context::SceneContext,
    data_structures::{mesh::MeshId, scene_graph::NodeId},
    events::{SqueezeEvent, SqueezeListener, SubscriptionId},
    input::InputHandle,
    objects::panel::Panel,
    timer::TaskHandle,
};

/// Handle of an object owned by the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GrabState {
    Released,
    Grabbed {
        input: InputHandle,
        /// Release listener on the squeeze stream.
        subscription: SubscriptionId,
    },
}

/// Text label texture. The host draws `text` into a `width`×`height` texture.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Label {
    pub text: String,
    pub width: u32,
    pub height: u32,
}

/// A direct hit on one of an object's collision meshes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Activation {
    pub mesh: MeshId,
    /// World-space point where the activation happened. Sounds play here.
    pub point: Point3<f32>,
}

/// A controller closing its hand on an object.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grab {
    pub input: InputHandle,
    pub grip: NodeId,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeferredTask {
    pub owner: ObjectId,
    pub action: DeferredAction,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DeferredAction {
    /// Let a pressed button spring back.
    ButtonReset { point: Point3<f32> },
}

/// State every object has: its node, grab state and optional label.
#[derive(Debug)]
pub struct ObjectBase {
    id: ObjectId,
    node: NodeId,
    grab: GrabState,
    label: Option<Label>,
}

impl ObjectBase {
    pub fn new(ctx: &mut SceneContext, id: ObjectId, name: &str) -> Self {
        Self {
            id,
            node: ctx.graph.create_node(name),
            grab: GrabState::Released,
            label: None,
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn grab_state(&self) -> GrabState {
        self.grab
    }

    pub fn is_grabbed(&self) -> bool {
        matches!(self.grab, GrabState::Grabbed { .. })
    }

    pub fn grabbing_input(&self) -> Option<InputHandle> {
        match self.grab {
            GrabState::Grabbed { input, .. } => Some(input),
            GrabState::Released => None,
        }
    }

    /// Makes hits on `mesh` resolve to this object.
    pub fn register_collision_mesh(&self, ctx: &mut SceneContext, mesh: MeshId) {
        ctx.registry.register(mesh, self.id);
    }

    /// Puts this object into cell `(row, col)` of `panel`. The object follows
    /// the panel from then on.
    pub fn attach_to_panel(
        &self,
        ctx: &mut SceneContext,
        panel: &Panel,
        row: u32,
        col: u32,
    ) -> anyhow::Result<()> {
        let position = panel.position_from_index(row, col)?;
        ctx.graph.attach(self.node, Some(panel.base().node()))?;
        ctx.graph
            .set_local_transform(self.node, |local| local.position = position);
        Ok(())
    }

    pub fn set_label(&mut self, text: &str) {
        self.label = Some(Label {
            text: text.to_string(),
            width: 128,
            height: 64,
        });
    }

    pub fn label(&self) -> Option<&Label> {
        self.label.as_ref()
    }
}

/// Behaviour of a scene object. Only the accessors are required, every hook
/// defaults to doing nothing.
pub trait GameObject: Debug {
    fn base(&self) -> &ObjectBase;

    fn base_mut(&mut self) -> &mut ObjectBase;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Brings the visuals in line with the object's state.
    fn update(&mut self, _ctx: &mut SceneContext) {}

    /// Called when a pointer or trigger hits one of the object's collision meshes.
    fn on_activate(&mut self, _ctx: &mut SceneContext, _activation: &Activation) {}

    /// Called after the object was picked up and moved under the grip.
    fn on_grab(&mut self, _ctx: &mut SceneContext, _grab: &Grab) {}

    /// Called after the object was put back into the world.
    fn on_release(&mut self, _ctx: &mut SceneContext, _input: InputHandle) {}

    /// Called when a task the object scheduled comes due.
    fn on_deferred(
        &mut self,
        _ctx: &mut SceneContext,
        _task: TaskHandle,
        _action: DeferredAction,
    ) {
    }
}

/// Picks `object` up with the hand described by `grab`.
///
/// The object keeps its world pose and then follows the grip. Returns `false`
/// if it was already held, in which case the first grabber keeps it.
pub fn grab(object: &mut dyn GameObject, ctx: &mut SceneContext, grab: Grab) -> bool {
    let base = object.base();
    if let GrabState::Grabbed { input, .. } = base.grab {
        debug!(
            "{:?} is already held by {:?}, ignoring grab from {:?}",
            base.id, input, grab.input
        );
        return false;
    }
    if let Err(e) = ctx.graph.set_parent(base.node, Some(grab.grip)) {
        warn!("Unable to grab {:?}: {:#}", base.id, e);
        return false;
    }
    let subscription = ctx.squeeze.subscribe(SqueezeListener::Release(base.id));
    object.base_mut().grab = GrabState::Grabbed {
        input: grab.input,
        subscription,
    };
    object.on_grab(ctx, &grab);
    true
}

/// Drops `object` if `event` is its grabbing input letting go.
///
/// Events from any other input, and presses, leave the object alone.
pub fn release(object: &mut dyn GameObject, ctx: &mut SceneContext, event: &SqueezeEvent) -> bool {
    let GrabState::Grabbed {
        input,
        subscription,
    } = object.base().grab
    else {
        return false;
    };
    if event.input != input || event.pressed {
        return false;
    }
    ctx.squeeze.unsubscribe(subscription);
    object.base_mut().grab = GrabState::Released;
    let base = object.base();
    if let Err(e) = ctx.graph.set_parent(base.node, None) {
        warn!("Unable to put {:?} back into the world: {:#}", base.id, e);
    }
    object.on_release(ctx, input);
    true
}
