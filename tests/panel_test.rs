use cgmath::{Point3, Vector3};
use xr_panel::{
    SceneConfig,
    audio::LogSink,
    context::SceneContext,
    data_structures::material::{MaterialLibrary, METAL},
    objects::{GameObject, ObjectId, panel::Panel},
};

use crate::common::test_utils::{assert_close, scene, scene_with, world_position};

mod common;

fn panel() -> (SceneContext, Panel) {
    let mut ctx = SceneContext::new(Box::new(LogSink));
    ctx.materials = MaterialLibrary::control_panel();
    let panel = Panel::new(&mut ctx, ObjectId(0)).unwrap();
    (ctx, panel)
}

#[test]
fn top_left_cell_of_the_default_panel() {
    let (_, panel) = panel();
    assert_eq!((panel.width(), panel.height()), (6, 4));
    assert_eq!(panel.position_from_index(0, 0).unwrap(), Vector3::new(2.5, 1.5, 0.0));
    assert_eq!(panel.position_from_index(3, 5).unwrap(), Vector3::new(-2.5, -1.5, 0.0));
}

#[test]
fn cells_are_distinct_and_monotonic() {
    let (_, panel) = panel();
    let mut seen = Vec::new();
    for row in 0..panel.height() {
        for col in 0..panel.width() {
            let cell = panel.position_from_index(row, col).unwrap();
            assert!(!seen.contains(&cell));
            if col > 0 {
                let left = panel.position_from_index(row, col - 1).unwrap();
                assert!(cell.x < left.x);
                assert_eq!(cell.y, left.y);
            }
            if row > 0 {
                let above = panel.position_from_index(row - 1, col).unwrap();
                assert!(cell.y < above.y);
                assert_eq!(cell.x, above.x);
            }
            seen.push(cell);
        }
    }
    assert_eq!(seen.len(), 24);
}

#[test]
fn cells_outside_the_grid_are_rejected() {
    let (_, panel) = panel();
    assert!(panel.position_from_index(4, 0).is_err());
    assert!(panel.position_from_index(0, 6).is_err());
}

#[test]
fn empty_panels_are_rejected() {
    let mut ctx = SceneContext::new(Box::new(LogSink));
    assert!(Panel::with_size(&mut ctx, ObjectId(0), 0, 4).is_err());
}

#[test]
fn board_is_metal_and_registered() {
    let (ctx, panel) = panel();
    let board = ctx.graph.mesh(panel.mesh()).unwrap();
    assert_eq!(board.material.as_deref(), Some(METAL));
    assert_eq!((board.size.width, board.size.height, board.size.depth), (6.0, 4.0, 0.4));
    assert_eq!(ctx.graph.local_transform(panel.mesh().node()).unwrap().position.z, -0.2);
    assert_eq!(ctx.registry.lookup(panel.mesh()), Some(panel.base().id()));
}

#[test]
fn button_and_switch_sit_in_their_cells() {
    let (scene, _) = scene();
    let graph = &scene.context().graph;
    let panel_node = scene.panel().unwrap().base().node();
    let button = scene.button().unwrap().base().node();
    let switch = scene.switch().unwrap().base().node();
    assert_eq!(graph.node(button).unwrap().parent(), Some(panel_node));
    assert_eq!(graph.local_transform(button).unwrap().position, Vector3::new(0.5, -0.5, 0.0));
    assert_eq!(graph.local_transform(switch).unwrap().position, Vector3::new(-0.5, -0.5, 0.0));

    // Scaled by 1/8, tilted back by 30 degrees and turned around.
    let expected = Point3::new(
        -0.0625,
        1.25 - 0.0625 * (std::f32::consts::PI / 6.0).cos(),
        1.0 - 0.03125,
    );
    assert_close(world_position(&scene, button), expected);
}

#[test]
fn panel_sits_where_configured() {
    let (scene, _) = scene();
    let node = scene.panel().unwrap().base().node();
    assert_close(world_position(&scene, node), Point3::new(0.0, 1.25, 1.0));
    let local = scene.context().graph.local_transform(node).unwrap();
    assert_eq!(local.scale, Vector3::new(0.125, 0.125, 0.125));
}

#[test]
fn misplaced_objects_fail_scene_setup() {
    let config = SceneConfig {
        switch_cell: (4, 0),
        ..SceneConfig::default()
    };
    let sink = common::test_utils::RecordingSink::default();
    assert!(xr_panel::ControlPanelScene::new(&config, Box::new(sink)).is_err());
    let (scene, _) = scene_with(SceneConfig {
        panel_width: 8,
        ..SceneConfig::default()
    });
    assert_eq!(scene.panel().unwrap().width(), 8);
}
