#![allow(dead_code)]

use std::{cell::RefCell, rc::Rc};

use cgmath::{InnerSpace, MetricSpace, Point3, Vector3, Vector4};
use instant::Duration;
use xr_panel::{
    ControlPanelScene, SceneConfig,
    audio::{AudioSink, Sound},
    data_structures::{mesh::MeshId, scene_graph::NodeId},
    input::{ComponentDescriptor, ComponentKind, InputHandle},
    objects::GameObject,
    pick::Ray,
};

pub(crate) const LEFT: InputHandle = InputHandle(0);
pub(crate) const RIGHT: InputHandle = InputHandle(1);

pub(crate) const TRIGGER: &str = "xr-standard-trigger";
pub(crate) const SQUEEZE: &str = "xr-standard-squeeze";

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Played {
    pub(crate) name: String,
    pub(crate) position: Option<Point3<f32>>,
}

/// Audio sink that remembers every play request. Clones share the log.
#[derive(Clone, Debug, Default)]
pub(crate) struct RecordingSink(pub(crate) Rc<RefCell<Vec<Played>>>);

impl AudioSink for RecordingSink {
    fn play(&mut self, sound: &Sound, position: Option<Point3<f32>>) {
        self.0.borrow_mut().push(Played {
            name: sound.name.clone(),
            position,
        });
    }
}

impl RecordingSink {
    pub(crate) fn names(&self) -> Vec<String> {
        self.0.borrow().iter().map(|p| p.name.clone()).collect()
    }

    pub(crate) fn count(&self, name: &str) -> usize {
        self.0.borrow().iter().filter(|p| p.name == name).count()
    }

    pub(crate) fn last(&self) -> Option<Played> {
        self.0.borrow().last().cloned()
    }
}

pub(crate) fn scene() -> (ControlPanelScene, RecordingSink) {
    scene_with(SceneConfig::default())
}

pub(crate) fn scene_with(config: SceneConfig) -> (ControlPanelScene, RecordingSink) {
    let sink = RecordingSink::default();
    let scene = ControlPanelScene::new(&config, Box::new(sink.clone())).unwrap();
    (scene, sink)
}

pub(crate) fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

/// Component layout of a typical left (`x`/`y`) or right (`a`/`b`) controller.
pub(crate) fn standard_components(input: InputHandle) -> Vec<ComponentDescriptor> {
    let (lower, upper) = if input == LEFT {
        ("x-button", "y-button")
    } else {
        ("a-button", "b-button")
    };
    vec![
        ComponentDescriptor::new(TRIGGER, ComponentKind::Trigger),
        ComponentDescriptor::new(SQUEEZE, ComponentKind::Squeeze),
        ComponentDescriptor::new("xr-standard-thumbstick", ComponentKind::Thumbstick),
        ComponentDescriptor::new(lower, ComponentKind::Button),
        ComponentDescriptor::new(upper, ComponentKind::Button),
    ]
}

pub(crate) fn connect(scene: &mut ControlPanelScene, input: InputHandle) -> NodeId {
    scene.controller_added(input, standard_components(input))
}

/// World position of a node origin.
pub(crate) fn world_position(scene: &ControlPanelScene, node: NodeId) -> Point3<f32> {
    scene.context().graph.world_position(node).unwrap()
}

pub(crate) fn mesh_position(scene: &ControlPanelScene, mesh: MeshId) -> Point3<f32> {
    world_position(scene, mesh.node())
}

/// World direction the front of the panel faces.
pub(crate) fn panel_front(scene: &ControlPanelScene) -> Vector3<f32> {
    let node = scene.panel().unwrap().base().node();
    let world = scene.context().graph.world_matrix(node).unwrap();
    (world * Vector4::new(0.0, 0.0, 1.0, 0.0)).truncate().normalize()
}

/// World position of the centre of panel cell `(row, col)` on the panel surface.
pub(crate) fn panel_cell(scene: &ControlPanelScene, row: u32, col: u32) -> Point3<f32> {
    let panel = scene.panel().unwrap();
    let local = panel.position_from_index(row, col).unwrap();
    let world = scene.context().graph.world_matrix(panel.base().node()).unwrap();
    Point3::from_homogeneous(world * local.extend(1.0))
}

/// A ray hitting `target` head-on from one metre in front of the panel.
pub(crate) fn ray_at(scene: &ControlPanelScene, target: Point3<f32>) -> Ray {
    let front = panel_front(scene);
    Ray::new(target + front, -front).unwrap()
}

pub(crate) fn aim_at(scene: &mut ControlPanelScene, input: InputHandle, target: Point3<f32>) {
    let ray = ray_at(scene, target);
    scene.set_pointer_ray(input, ray);
}

pub(crate) fn assert_close(actual: Point3<f32>, expected: Point3<f32>) {
    assert!(
        actual.distance(expected) < 1e-4,
        "expected {:?}, got {:?}",
        expected,
        actual
    );
}
