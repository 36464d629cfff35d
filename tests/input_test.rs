use xr_panel::{
    audio::LogSink,
    context::SceneContext,
    events::SqueezeEvent,
    input::{ComponentDescriptor, ComponentKind, InputAction, XrInput},
};

use crate::common::test_utils::{LEFT, RIGHT, SQUEEZE, TRIGGER, connect, scene, standard_components};

mod common;

fn input() -> (SceneContext, XrInput) {
    let ctx = SceneContext::new(Box::new(LogSink));
    let input = XrInput::new(vec!["b-button".to_string(), "y-button".to_string()]);
    (ctx, input)
}

fn drain(ctx: &mut SceneContext) -> Vec<SqueezeEvent> {
    std::iter::from_fn(|| ctx.squeeze.next_event()).collect()
}

#[test]
fn squeeze_changes_are_published_once() {
    let (mut ctx, mut input) = input();
    input.controller_added(&mut ctx, LEFT, standard_components(LEFT));

    input.component_changed(&mut ctx, LEFT, SQUEEZE, true);
    input.component_changed(&mut ctx, LEFT, SQUEEZE, true);
    input.component_changed(&mut ctx, LEFT, SQUEEZE, false);
    assert_eq!(
        drain(&mut ctx),
        vec![
            SqueezeEvent { input: LEFT, pressed: true },
            SqueezeEvent { input: LEFT, pressed: false },
        ]
    );
    assert!(!input.is_pressed(LEFT, SQUEEZE));
}

#[test]
fn b_and_y_leave_the_session() {
    let (mut ctx, mut input) = input();
    input.controller_added(&mut ctx, LEFT, standard_components(LEFT));
    input.controller_added(&mut ctx, RIGHT, standard_components(RIGHT));

    assert_eq!(
        input.component_changed(&mut ctx, LEFT, "y-button", true),
        Some(InputAction::ExitXr)
    );
    assert_eq!(
        input.component_changed(&mut ctx, RIGHT, "b-button", true),
        Some(InputAction::ExitXr)
    );
    assert_eq!(input.component_changed(&mut ctx, RIGHT, "b-button", false), None);
    assert_eq!(input.component_changed(&mut ctx, RIGHT, "a-button", true), None);
    assert_eq!(input.component_changed(&mut ctx, LEFT, "x-button", true), None);
    assert!(drain(&mut ctx).is_empty());
}

#[test]
fn trigger_presses_select() {
    let (mut ctx, mut input) = input();
    input.controller_added(&mut ctx, LEFT, standard_components(LEFT));
    assert_eq!(
        input.component_changed(&mut ctx, LEFT, TRIGGER, true),
        Some(InputAction::Select)
    );
    assert_eq!(input.component_changed(&mut ctx, LEFT, TRIGGER, false), None);
}

#[test]
fn missing_components_are_skipped() {
    let (mut ctx, mut input) = input();
    let bare = vec![ComponentDescriptor::new(TRIGGER, ComponentKind::Trigger)];
    input.controller_added(&mut ctx, LEFT, bare);

    assert_eq!(input.component_changed(&mut ctx, LEFT, SQUEEZE, true), None);
    assert_eq!(input.component_changed(&mut ctx, LEFT, "y-button", true), None);
    assert_eq!(input.component_changed(&mut ctx, RIGHT, TRIGGER, true), None);
    assert!(drain(&mut ctx).is_empty());
}

#[test]
fn webxr_component_types_map_to_kinds() {
    assert_eq!(ComponentKind::from_webxr("squeeze"), Some(ComponentKind::Squeeze));
    assert_eq!(ComponentKind::from_webxr("trigger"), Some(ComponentKind::Trigger));
    assert_eq!(ComponentKind::from_webxr("button"), Some(ComponentKind::Button));
    assert_eq!(ComponentKind::from_webxr("thumbstick"), Some(ComponentKind::Thumbstick));
    assert_eq!(ComponentKind::from_webxr("touchpad"), Some(ComponentKind::Touchpad));
    assert_eq!(ComponentKind::from_webxr("dial"), None);
}

#[test]
fn removing_a_squeezing_controller_publishes_a_release() {
    let (mut ctx, mut input) = input();
    let grip = input.controller_added(&mut ctx, LEFT, standard_components(LEFT));
    input.component_changed(&mut ctx, LEFT, SQUEEZE, true);
    drain(&mut ctx);

    assert_eq!(input.controller_removed(&mut ctx, LEFT), Some(grip));
    assert_eq!(drain(&mut ctx), vec![SqueezeEvent { input: LEFT, pressed: false }]);
    assert_eq!(input.controller_removed(&mut ctx, LEFT), None);
    assert_eq!(input.controllers().count(), 0);
}

#[test]
fn reconnecting_keeps_the_grip() {
    let (mut ctx, mut input) = input();
    let grip = input.controller_added(&mut ctx, LEFT, standard_components(LEFT));
    input.component_changed(&mut ctx, LEFT, SQUEEZE, true);
    drain(&mut ctx);

    assert_eq!(input.controller_added(&mut ctx, LEFT, standard_components(LEFT)), grip);
    assert_eq!(drain(&mut ctx), vec![SqueezeEvent { input: LEFT, pressed: false }]);
    assert!(!input.is_pressed(LEFT, SQUEEZE));
    assert_eq!(ctx.graph.len(), 1);
}

#[test]
fn scene_reports_exit_to_the_host() {
    let (mut scene, _) = scene();
    connect(&mut scene, RIGHT);
    assert_eq!(
        scene.component_changed(RIGHT, "b-button", true),
        Some(InputAction::ExitXr)
    );
    assert!(!scene.controller_removed(LEFT));
    assert!(scene.controller_removed(RIGHT));
    assert!(scene.input().grip(RIGHT).is_none());
}
