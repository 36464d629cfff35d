//! Motion-controller input binding.
//!
//! The XR runtime reports controllers and their components; this module keeps
//! track of them and turns raw component changes into scene input:
//!
//! - squeeze press/release transitions go to the context's squeeze stream
//! - the configured exit buttons (B and Y by default) yield [`InputAction::ExitXr`]
//! - trigger presses yield [`InputAction::Select`]
//!
//! Each controller gets a grip node in the scene graph so grabbed objects can
//! ride along with the hand, and an optional pointer ray used to find what the
//! controller points at.

use std::collections::BTreeMap;

use log::{debug, info, warn};

use crate::{
    context::SceneContext,
    data_structures::{scene_graph::NodeId, transform::Transform},
    events::SqueezeEvent,
    pick::Ray,
};

/// Identity of a connected input source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InputHandle(pub u32);

/// Component types of a WebXR gamepad mapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComponentKind {
    Trigger,
    Squeeze,
    Button,
    Thumbstick,
    Touchpad,
}

impl ComponentKind {
    pub fn from_webxr(kind: &str) -> Option<Self> {
        match kind {
            "trigger" => Some(Self::Trigger),
            "squeeze" => Some(Self::Squeeze),
            "button" => Some(Self::Button),
            "thumbstick" => Some(Self::Thumbstick),
            "touchpad" => Some(Self::Touchpad),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComponentDescriptor {
    pub id: String,
    pub kind: ComponentKind,
}

impl ComponentDescriptor {
    pub fn new(id: &str, kind: ComponentKind) -> Self {
        Self {
            id: id.to_string(),
            kind,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputAction {
    /// The trigger was pulled: activate whatever the controller points at.
    Select,
    /// Leave the immersive session.
    ExitXr,
}

#[derive(Debug)]
struct Component {
    kind: ComponentKind,
    pressed: bool,
}

#[derive(Debug)]
struct Controller {
    components: BTreeMap<String, Component>,
    squeeze: Option<String>,
    grip: NodeId,
    pointer: Option<Ray>,
}

impl Controller {
    fn is_squeezing(&self) -> bool {
        self.squeeze
            .as_ref()
            .and_then(|id| self.components.get(id))
            .is_some_and(|c| c.pressed)
    }
}

#[derive(Debug)]
pub struct XrInput {
    controllers: BTreeMap<InputHandle, Controller>,
    exit_buttons: Vec<String>,
}

impl XrInput {
    pub fn new(exit_buttons: Vec<String>) -> Self {
        Self {
            controllers: BTreeMap::new(),
            exit_buttons,
        }
    }

    /// Registers a controller and creates its grip node. Reconnecting a known
    /// handle keeps its grip node and replaces the component layout.
    pub fn controller_added(
        &mut self,
        ctx: &mut SceneContext,
        input: InputHandle,
        components: Vec<ComponentDescriptor>,
    ) -> NodeId {
        let grip = match self.controllers.get(&input) {
            Some(previous) => {
                warn!("Controller {:?} connected twice, replacing its components", input);
                if previous.is_squeezing() {
                    ctx.squeeze.publish(SqueezeEvent {
                        input,
                        pressed: false,
                    });
                }
                previous.grip
            }
            None => ctx.graph.create_node(&format!("grip-{}", input.0)),
        };
        let squeeze = components
            .iter()
            .find(|c| c.kind == ComponentKind::Squeeze)
            .map(|c| c.id.clone());
        if squeeze.is_none() {
            info!("Controller {:?} has no squeeze component, grabbing is disabled", input);
        }
        for id in &self.exit_buttons {
            if components.iter().any(|c| &c.id == id) {
                debug!("Controller {:?} binds {} to leave the session", input, id);
            }
        }
        let components = components
            .into_iter()
            .map(|c| {
                (
                    c.id,
                    Component {
                        kind: c.kind,
                        pressed: false,
                    },
                )
            })
            .collect();
        self.controllers.insert(
            input,
            Controller {
                components,
                squeeze,
                grip,
                pointer: None,
            },
        );
        grip
    }

    /// Forgets a controller and returns its grip node. A squeeze that is still
    /// held is published as released first, so nothing stays glued to a hand
    /// that is gone. The caller removes the grip once that release is delivered.
    pub fn controller_removed(
        &mut self,
        ctx: &mut SceneContext,
        input: InputHandle,
    ) -> Option<NodeId> {
        let controller = self.controllers.remove(&input)?;
        if controller.is_squeezing() {
            ctx.squeeze.publish(SqueezeEvent {
                input,
                pressed: false,
            });
        }
        Some(controller.grip)
    }

    /// Applies a component state change reported by the runtime.
    pub fn component_changed(
        &mut self,
        ctx: &mut SceneContext,
        input: InputHandle,
        component_id: &str,
        pressed: bool,
    ) -> Option<InputAction> {
        let Some(controller) = self.controllers.get_mut(&input) else {
            debug!("Ignoring component change of unknown controller {:?}", input);
            return None;
        };
        let Some(component) = controller.components.get_mut(component_id) else {
            debug!("Controller {:?} has no component {}", input, component_id);
            return None;
        };
        let changed = component.pressed != pressed;
        component.pressed = pressed;
        let kind = component.kind;
        if !changed {
            return None;
        }

        if controller.squeeze.as_deref() == Some(component_id) {
            ctx.squeeze.publish(SqueezeEvent { input, pressed });
        }
        if pressed && self.is_exit_button(component_id) {
            info!("{} pressed on {:?}, leaving the session", component_id, input);
            return Some(InputAction::ExitXr);
        }
        if pressed && kind == ComponentKind::Trigger {
            return Some(InputAction::Select);
        }
        None
    }

    fn is_exit_button(&self, component_id: &str) -> bool {
        self.exit_buttons.iter().any(|id| id == component_id)
    }

    pub fn set_grip_pose(&self, ctx: &mut SceneContext, input: InputHandle, pose: Transform) {
        match self.controllers.get(&input) {
            Some(controller) => ctx
                .graph
                .set_local_transform(controller.grip, |local| *local = pose),
            None => debug!("Ignoring grip pose of unknown controller {:?}", input),
        }
    }

    pub fn set_pointer_ray(&mut self, input: InputHandle, ray: Ray) {
        match self.controllers.get_mut(&input) {
            Some(controller) => controller.pointer = Some(ray),
            None => debug!("Ignoring pointer ray of unknown controller {:?}", input),
        }
    }

    pub fn grip(&self, input: InputHandle) -> Option<NodeId> {
        self.controllers.get(&input).map(|c| c.grip)
    }

    pub fn pointer_ray(&self, input: InputHandle) -> Option<Ray> {
        self.controllers.get(&input).and_then(|c| c.pointer)
    }

    pub fn is_pressed(&self, input: InputHandle, component_id: &str) -> bool {
        self.controllers
            .get(&input)
            .and_then(|c| c.components.get(component_id))
            .is_some_and(|c| c.pressed)
    }

    pub fn controllers(&self) -> impl Iterator<Item = InputHandle> + '_ {
        self.controllers.keys().copied()
    }

    pub fn clear(&mut self) {
        self.controllers.clear();
    }
}
