use cgmath::Point3;
use xr_panel::{
    data_structures::{mesh::BoxSize, scene_graph::SceneGraph},
    objects::{GameObject, ObjectId},
    registry::CollisionRegistry,
};

use crate::common::test_utils::{assert_close, scene, world_position};

mod common;

#[test]
fn lookup_returns_the_registering_object() {
    let mut graph = SceneGraph::new();
    let mut registry = CollisionRegistry::new();
    let a = graph.create_box("a", BoxSize::new(1.0, 1.0, 1.0));
    let b = graph.create_box("b", BoxSize::new(1.0, 1.0, 1.0));
    let stray = graph.create_box("stray", BoxSize::new(1.0, 1.0, 1.0));

    registry.register(a, ObjectId(7));
    registry.register(b, ObjectId(7));
    assert_eq!(registry.lookup(a), Some(ObjectId(7)));
    assert_eq!(registry.lookup(b), Some(ObjectId(7)));
    assert_eq!(registry.lookup(stray), None);
    assert_eq!(registry.meshes_of(ObjectId(7)), &[a, b]);
}

#[test]
fn a_mesh_belongs_to_one_object() {
    let mut graph = SceneGraph::new();
    let mut registry = CollisionRegistry::new();
    let mesh = graph.create_box("shared", BoxSize::new(1.0, 1.0, 1.0));
    registry.register(mesh, ObjectId(1));
    registry.register(mesh, ObjectId(2));
    assert_eq!(registry.lookup(mesh), Some(ObjectId(2)));
    assert!(registry.meshes_of(ObjectId(1)).is_empty());
    assert_eq!(registry.len(), 1);
}

#[test]
fn entries_go_away_with_their_object() {
    let mut graph = SceneGraph::new();
    let mut registry = CollisionRegistry::new();
    let a = graph.create_box("a", BoxSize::new(1.0, 1.0, 1.0));
    let b = graph.create_box("b", BoxSize::new(1.0, 1.0, 1.0));
    registry.register(a, ObjectId(1));
    registry.register(b, ObjectId(2));

    assert_eq!(registry.unregister_object(ObjectId(1)), vec![a]);
    assert_eq!(registry.lookup(a), None);
    assert_eq!(registry.lookup(b), Some(ObjectId(2)));
    assert_eq!(registry.unregister_mesh(b), Some(ObjectId(2)));
    assert!(registry.is_empty());
}

#[test]
fn scene_registers_every_collision_mesh() {
    let (scene, _) = scene();
    let registry = &scene.context().registry;
    let button = scene.button().unwrap();
    let switch = scene.switch().unwrap();
    assert_eq!(registry.len(), 5);
    assert_eq!(registry.lookup(scene.panel().unwrap().mesh()), Some(scene.panel_id()));
    assert_eq!(registry.lookup(button.plate()), Some(scene.button_id()));
    assert_eq!(registry.lookup(button.toggle()), Some(scene.button_id()));
    assert_eq!(registry.lookup(switch.plate()), Some(scene.switch_id()));
    assert_eq!(registry.lookup(switch.toggle()), Some(scene.switch_id()));
}

#[test]
fn removing_an_object_clears_its_entries() {
    let (mut scene, sink) = scene();
    let toggle = scene.switch().unwrap().toggle();
    let id = scene.switch_id();
    assert!(scene.remove_object(id));
    assert!(!scene.remove_object(id));

    assert_eq!(scene.context().registry.lookup(toggle), None);
    assert!(scene.context().registry.meshes_of(id).is_empty());
    assert!(scene.context().graph.mesh(toggle).is_none());
    assert_eq!(scene.activate_mesh(toggle, Point3::new(0.0, 0.0, 0.0)), None);
    assert!(sink.names().is_empty());
}

#[test]
fn removing_the_panel_leaves_its_children_in_place() {
    let (mut scene, _) = scene();
    let button = scene.button().unwrap().base().node();
    let before = world_position(&scene, button);
    let panel_mesh = scene.panel().unwrap().mesh();

    assert!(scene.remove_object(scene.panel_id()));
    assert_eq!(scene.context().registry.lookup(panel_mesh), None);
    assert_eq!(scene.context().graph.node(button).unwrap().parent(), None);
    assert_close(world_position(&scene, button), before);
    assert_eq!(scene.context().registry.len(), 4);
}

#[test]
fn teardown_empties_the_context() {
    let (mut scene, _) = scene();
    scene.teardown();
    assert!(scene.context().registry.is_empty());
    assert!(scene.context().graph.is_empty());
    assert_eq!(scene.context().squeeze.listener_count(), 0);
    assert_eq!(scene.objects().count(), 0);
    assert!(scene.button().is_none());
}
