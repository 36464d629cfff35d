//! Browser bridge.
//!
//! The page owns the WebXR session and the render loop; it forwards frames,
//! clicks and controller data to a [`WebApp`] and leaves the session when
//! `component_changed` asks for it.

use std::collections::{HashMap, hash_map::Entry};

use cgmath::{Point3, Quaternion, Vector3};
use instant::Duration;
use wasm_bindgen::{JsCast, prelude::*};
use web_sys::{HtmlAudioElement, HtmlCanvasElement};

use crate::{
    audio::{AudioSink, Sound},
    config::SceneConfig,
    data_structures::transform::Transform,
    input::{ComponentDescriptor, ComponentKind, InputAction, InputHandle},
    pick::Ray,
    scene::ControlPanelScene,
};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_log::init_with_level(log::Level::Info).map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(())
}

fn to_js(e: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{:#}", e))
}

/// Plays sounds through `<audio>` elements, created on first use.
#[derive(Default)]
struct HtmlAudioSink {
    elements: HashMap<String, HtmlAudioElement>,
}

impl AudioSink for HtmlAudioSink {
    fn play(&mut self, sound: &Sound, _position: Option<Point3<f32>>) {
        let element = match self.elements.entry(sound.name.clone()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => match HtmlAudioElement::new_with_src(&sound.url) {
                Ok(element) => entry.insert(element),
                Err(e) => {
                    log::error!("Unable to load sound {}: {:?}", sound.url, e);
                    return;
                }
            },
        };
        element.set_current_time(0.0);
        if let Err(e) = element.play() {
            log::error!("Unable to play sound {}: {:?}", sound.name, e);
        }
    }
}

#[wasm_bindgen]
pub struct WebApp {
    scene: ControlPanelScene,
    canvas: HtmlCanvasElement,
    last_frame: Option<f64>,
}

#[wasm_bindgen]
impl WebApp {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: Option<String>) -> Result<WebApp, JsValue> {
        let mut config = SceneConfig::default();
        if let Some(id) = canvas_id {
            config.canvas_id = id;
        }
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| JsValue::from_str("no document to render into"))?;
        let canvas = document
            .get_element_by_id(&config.canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element with id {}", config.canvas_id)))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| JsValue::from_str(&format!("{} is not a canvas", config.canvas_id)))?;
        config.window_size = (canvas.width(), canvas.height());

        let scene = ControlPanelScene::new(&config, Box::new(HtmlAudioSink::default()))
            .map_err(to_js)?;
        Ok(WebApp {
            scene,
            canvas,
            last_frame: None,
        })
    }

    /// Advances the scene to the animation frame timestamp `time_ms`.
    pub fn frame(&mut self, time_ms: f64) {
        let dt = self
            .last_frame
            .map_or(0.0, |last| (time_ms - last).max(0.0));
        self.last_frame = Some(time_ms);
        match Duration::try_from_secs_f64(dt / 1000.0) {
            Ok(dt) => self.scene.tick(dt),
            Err(e) => log::warn!("Dropping frame at {}: {}", time_ms, e),
        }
    }

    /// Matches the canvas buffer to its displayed size.
    pub fn resize(&mut self) {
        let width = self.canvas.client_width().max(0) as u32;
        let height = self.canvas.client_height().max(0) as u32;
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.scene.resize(width, height);
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) -> bool {
        self.scene.pointer_down(x, y).is_some()
    }

    /// `ids` and `kinds` are the motion controller's component ids and their
    /// WebXR component types. Components of unknown type are skipped.
    pub fn controller_added(&mut self, input: u32, ids: Vec<String>, kinds: Vec<String>) {
        let components = ids
            .into_iter()
            .zip(kinds)
            .filter_map(|(id, kind)| match ComponentKind::from_webxr(&kind) {
                Some(kind) => Some(ComponentDescriptor { id, kind }),
                None => {
                    log::debug!("Skipping component {} of unknown type {}", id, kind);
                    None
                }
            })
            .collect();
        self.scene.controller_added(InputHandle(input), components);
    }

    pub fn controller_removed(&mut self, input: u32) -> bool {
        self.scene.controller_removed(InputHandle(input))
    }

    /// Returns `true` when the page should leave the immersive session.
    pub fn component_changed(&mut self, input: u32, component_id: &str, pressed: bool) -> bool {
        self.scene.component_changed(InputHandle(input), component_id, pressed)
            == Some(InputAction::ExitXr)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn set_grip_pose(
        &mut self,
        input: u32,
        x: f32,
        y: f32,
        z: f32,
        qx: f32,
        qy: f32,
        qz: f32,
        qw: f32,
    ) {
        let pose = Transform {
            position: Vector3::new(x, y, z),
            rotation: Quaternion::new(qw, qx, qy, qz),
            ..Transform::new()
        };
        self.scene.set_grip_pose(InputHandle(input), pose);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn set_pointer_ray(
        &mut self,
        input: u32,
        x: f32,
        y: f32,
        z: f32,
        dx: f32,
        dy: f32,
        dz: f32,
    ) {
        match Ray::new(Point3::new(x, y, z), Vector3::new(dx, dy, dz)) {
            Some(ray) => self.scene.set_pointer_ray(InputHandle(input), ray),
            None => log::debug!("Ignoring degenerate pointer ray of {}", input),
        }
    }

    pub fn teardown(&mut self) {
        self.scene.teardown();
    }
}
