//! The control panel scene.
//!
//! [`ControlPanelScene`] builds the panel with its button and switch, owns the
//! objects and routes everything the host reports to them:
//!
//! 1. pointer clicks and trigger pulls are picked and activate the hit object
//! 2. controller input goes through [`XrInput`]; squeeze changes are drained
//!    from the squeeze stream right after the call that produced them
//! 3. `tick` advances the scene clock and fires due tasks, such as a button
//!    springing back
//!
//! Nothing happens in the background: every state change is the result of one
//! of these calls, which keeps the scene deterministic.

use anyhow::Context as _;
use cgmath::Point3;
use instant::Duration;
use log::{debug, info, warn};

use crate::{
    audio::AudioSink,
    camera::Camera,
    config::SceneConfig,
    context::SceneContext,
    data_structures::{
        material::MaterialLibrary, mesh::MeshId, scene_graph::NodeId, transform::Transform,
    },
    events::{SqueezeListener, SubscriptionId},
    input::{ComponentDescriptor, InputAction, InputHandle, XrInput},
    objects::{
        self, Activation, GameObject, GrabState, ObjectId, button::Button, panel::Panel,
        switch::Switch,
    },
    pick::{PickInfo, Ray, pick},
};

#[derive(Debug)]
pub struct ControlPanelScene {
    ctx: SceneContext,
    input: XrInput,
    camera: Camera,
    objects: Vec<Option<Box<dyn GameObject>>>,
    panel: ObjectId,
    button: ObjectId,
    switch: ObjectId,
    grab_listener: SubscriptionId,
}

impl ControlPanelScene {
    pub fn new(config: &SceneConfig, sink: Box<dyn AudioSink>) -> anyhow::Result<Self> {
        let mut ctx = SceneContext::new(sink);
        ctx.materials = MaterialLibrary::control_panel();
        for sound in &config.sounds {
            ctx.sounds
                .add(sound.clone())
                .with_context(|| format!("Unable to load sound {}", sound.url))?;
        }
        // Subscribed first so a press grabs before any release listener sees it.
        let grab_listener = ctx.squeeze.subscribe(SqueezeListener::Grab);

        let (width, height) = config.window_size;
        let mut scene = Self {
            ctx,
            input: XrInput::new(config.exit_buttons.clone()),
            camera: Camera::new(
                config.camera.eye,
                config.camera.target,
                config.camera.fovy,
                width,
                height,
            ),
            objects: Vec::new(),
            panel: ObjectId(0),
            button: ObjectId(0),
            switch: ObjectId(0),
            grab_listener,
        };

        scene.panel = scene.spawn(|ctx, id| {
            Panel::with_size(ctx, id, config.panel_width, config.panel_height)
        })?;
        let panel_node = scene.node_of(scene.panel)?;
        scene.ctx.graph.set_local_transform(panel_node, |local| {
            local.position = config.panel_position;
            *local = local.with_uniform_scale(config.panel_scale);
        });

        let delay = config.button_release_delay;
        scene.button = scene.spawn(|ctx, id| Button::new(ctx, id, delay))?;
        scene
            .attach_to_panel(scene.button, config.button_cell)
            .context("Unable to place the button")?;

        scene.switch = scene.spawn(Switch::new)?;
        scene
            .attach_to_panel(scene.switch, config.switch_cell)
            .context("Unable to place the switch")?;

        info!(
            "Control panel ready: {} objects, {} collision meshes",
            scene.objects.len(),
            scene.ctx.registry.len()
        );
        Ok(scene)
    }

    /// Builds an object with the next free id and brings its visuals up to date.
    pub fn spawn<T, F>(&mut self, build: F) -> anyhow::Result<ObjectId>
    where
        T: GameObject + 'static,
        F: FnOnce(&mut SceneContext, ObjectId) -> anyhow::Result<T>,
    {
        let id = ObjectId(self.objects.len());
        let mut object = build(&mut self.ctx, id)?;
        object.update(&mut self.ctx);
        self.objects.push(Some(Box::new(object)));
        Ok(id)
    }

    /// Puts `object` into a cell of the panel.
    pub fn attach_to_panel(
        &mut self,
        object: ObjectId,
        (row, col): (u32, u32),
    ) -> anyhow::Result<()> {
        let panel = self
            .objects
            .get(self.panel.0)
            .and_then(Option::as_ref)
            .and_then(|o| o.as_any().downcast_ref::<Panel>())
            .context("the scene has no panel")?;
        let object = self
            .objects
            .get(object.0)
            .and_then(Option::as_ref)
            .with_context(|| format!("{:?} is not part of the scene", object))?;
        object.base().attach_to_panel(&mut self.ctx, panel, row, col)
    }

    fn node_of(&self, id: ObjectId) -> anyhow::Result<NodeId> {
        self.object(id)
            .map(|o| o.base().node())
            .with_context(|| format!("{:?} is not part of the scene", id))
    }

    /// Destroys an object together with its nodes and collision entries.
    /// Objects sitting on it are put back into the world where they are.
    pub fn remove_object(&mut self, id: ObjectId) -> bool {
        let Some(object) = self.objects.get_mut(id.0).and_then(Option::take) else {
            return false;
        };
        let node = object.base().node();
        if let GrabState::Grabbed { subscription, .. } = object.base().grab_state() {
            self.ctx.squeeze.unsubscribe(subscription);
        }
        for other in self.objects.iter().flatten() {
            let other_node = other.base().node();
            if self.ctx.graph.is_ancestor(node, other_node) {
                if let Err(e) = self.ctx.graph.set_parent(other_node, None) {
                    warn!("Unable to detach {:?}: {:#}", other.base().id(), e);
                }
            }
        }
        self.ctx.registry.unregister_object(id);
        for mesh in self.ctx.graph.remove(node) {
            self.ctx.registry.unregister_mesh(mesh);
        }
        info!("Removed {:?}", id);
        true
    }

    /// Activates whatever is under the cursor at `(x, y)`.
    pub fn pointer_down(&mut self, x: f32, y: f32) -> Option<ObjectId> {
        let Some(ray) = self.camera.screen_ray(x, y) else {
            debug!("No pick ray through ({}, {})", x, y);
            return None;
        };
        self.activate_ray(ray)
    }

    pub fn activate_ray(&mut self, ray: Ray) -> Option<ObjectId> {
        let Some(hit) = pick(&self.ctx.graph, &ray) else {
            debug!("Pointer hit nothing");
            return None;
        };
        self.activate_mesh(hit.mesh, hit.point)
    }

    /// Activates the owner of `mesh`. Meshes no object registered are ignored.
    pub fn activate_mesh(&mut self, mesh: MeshId, point: Point3<f32>) -> Option<ObjectId> {
        let Some(owner) = self.ctx.registry.lookup(mesh) else {
            debug!("{:?} belongs to no object, dropping activation", mesh);
            return None;
        };
        let object = self.objects.get_mut(owner.0).and_then(Option::as_mut)?;
        object.on_activate(&mut self.ctx, &Activation { mesh, point });
        Some(owner)
    }

    pub fn controller_added(
        &mut self,
        input: InputHandle,
        components: Vec<ComponentDescriptor>,
    ) -> NodeId {
        info!("Controller {:?} connected", input);
        let grip = self.input.controller_added(&mut self.ctx, input, components);
        self.dispatch_squeeze();
        grip
    }

    /// Forgets a controller. Whatever it held is dropped where it is.
    pub fn controller_removed(&mut self, input: InputHandle) -> bool {
        let Some(grip) = self.input.controller_removed(&mut self.ctx, input) else {
            debug!("Unknown controller {:?} disconnected", input);
            return false;
        };
        self.dispatch_squeeze();
        let children = self
            .ctx
            .graph
            .node(grip)
            .map(|node| node.children().to_vec())
            .unwrap_or_default();
        for child in children {
            if let Err(e) = self.ctx.graph.set_parent(child, None) {
                warn!("Unable to drop {:?} from a lost controller: {:#}", child, e);
            }
        }
        self.ctx.graph.remove(grip);
        info!("Controller {:?} disconnected", input);
        true
    }

    /// Feeds a component change through the input layer. Trigger pulls are
    /// handled here; the action is returned so the host can leave the session.
    pub fn component_changed(
        &mut self,
        input: InputHandle,
        component_id: &str,
        pressed: bool,
    ) -> Option<InputAction> {
        let action = self
            .input
            .component_changed(&mut self.ctx, input, component_id, pressed);
        self.dispatch_squeeze();
        if action == Some(InputAction::Select) {
            match self.input.pointer_ray(input) {
                Some(ray) => {
                    self.activate_ray(ray);
                }
                None => debug!("Controller {:?} has no pointer ray yet", input),
            }
        }
        action
    }

    pub fn set_grip_pose(&mut self, input: InputHandle, pose: Transform) {
        self.input.set_grip_pose(&mut self.ctx, input, pose);
    }

    pub fn set_pointer_ray(&mut self, input: InputHandle, ray: Ray) {
        self.input.set_pointer_ray(input, ray);
    }

    pub fn mesh_under_pointer(&self, input: InputHandle) -> Option<PickInfo> {
        let ray = self.input.pointer_ray(input)?;
        pick(&self.ctx.graph, &ray)
    }

    fn dispatch_squeeze(&mut self) {
        while let Some(event) = self.ctx.squeeze.next_event() {
            for (_, listener) in self.ctx.squeeze.listeners() {
                match listener {
                    SqueezeListener::Grab if event.pressed => self.grab_under_pointer(event.input),
                    SqueezeListener::Grab => (),
                    SqueezeListener::Release(id) => {
                        if let Some(object) = self.objects.get_mut(id.0).and_then(Option::as_mut) {
                            objects::release(object.as_mut(), &mut self.ctx, &event);
                        }
                    }
                }
            }
        }
    }

    fn grab_under_pointer(&mut self, input: InputHandle) {
        let Some(hit) = self.mesh_under_pointer(input) else {
            return;
        };
        let Some(owner) = self.ctx.registry.lookup(hit.mesh) else {
            debug!("{:?} belongs to no object, nothing to grab", hit.mesh);
            return;
        };
        let Some(grip) = self.input.grip(input) else {
            return;
        };
        if let Some(object) = self.objects.get_mut(owner.0).and_then(Option::as_mut) {
            objects::grab(object.as_mut(), &mut self.ctx, objects::Grab { input, grip });
        }
    }

    /// Advances the scene clock by `dt` and runs every task that comes due.
    pub fn tick(&mut self, dt: Duration) {
        let until = self.ctx.scheduler.now().saturating_add(dt);
        while let Some((handle, task)) = self.ctx.scheduler.pop_due(until) {
            match self.objects.get_mut(task.owner.0).and_then(Option::as_mut) {
                Some(object) => object.on_deferred(&mut self.ctx, handle, task.action),
                None => debug!("Dropping {:?}, its owner is gone", task),
            }
        }
        self.ctx.scheduler.advance_to(until);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        debug!("Resizing viewport to {}x{}", width, height);
        self.camera.resize(width, height);
    }

    pub fn update_all(&mut self) {
        for object in self.objects.iter_mut().flatten() {
            object.update(&mut self.ctx);
        }
    }

    /// Drops every object and all shared state. Pending tasks never fire.
    pub fn teardown(&mut self) {
        info!("Tearing down the control panel scene");
        self.ctx.squeeze.unsubscribe(self.grab_listener);
        self.objects.clear();
        self.input.clear();
        self.ctx.clear();
    }

    pub fn now(&self) -> Duration {
        self.ctx.scheduler.now()
    }

    pub fn object(&self, id: ObjectId) -> Option<&dyn GameObject> {
        self.objects.get(id.0).and_then(Option::as_deref)
    }

    pub fn object_as<T: 'static>(&self, id: ObjectId) -> Option<&T> {
        self.object(id).and_then(|o| o.as_any().downcast_ref::<T>())
    }

    pub fn object_as_mut<T: 'static>(&mut self, id: ObjectId) -> Option<&mut T> {
        self.objects
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .and_then(|o| o.as_any_mut().downcast_mut::<T>())
    }

    pub fn objects(&self) -> impl Iterator<Item = &dyn GameObject> + '_ {
        self.objects.iter().flatten().map(|o| &**o)
    }

    pub fn panel_id(&self) -> ObjectId {
        self.panel
    }

    pub fn button_id(&self) -> ObjectId {
        self.button
    }

    pub fn switch_id(&self) -> ObjectId {
        self.switch
    }

    pub fn panel(&self) -> Option<&Panel> {
        self.object_as(self.panel)
    }

    pub fn button(&self) -> Option<&Button> {
        self.object_as(self.button)
    }

    pub fn switch(&self) -> Option<&Switch> {
        self.object_as(self.switch)
    }

    pub fn context(&self) -> &SceneContext {
        &self.ctx
    }

    pub fn input(&self) -> &XrInput {
        &self.input
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }
}
