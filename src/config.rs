//! Scene and runner settings.
//!
//! Everything here has a sensible default that reproduces the stock control
//! panel; hosts override single fields before building the scene.

use instant::Duration;

use cgmath::{Deg, Point3, Rad, Vector3};

use crate::{audio::Sound, objects::button::DEFAULT_RELEASE_DELAY};

#[derive(Clone, Debug, PartialEq)]
pub struct CameraConfig {
    pub eye: Point3<f32>,
    pub target: Point3<f32>,
    pub fovy: Rad<f32>,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: Point3::new(0.0, 1.6, -0.5),
            target: Point3::new(0.0, 1.25, 1.0),
            fovy: Deg(45.0).into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub panel_position: Vector3<f32>,
    pub panel_scale: f32,
    pub panel_width: u32,
    pub panel_height: u32,
    /// Grid cell `(row, col)` of the button.
    pub button_cell: (u32, u32),
    /// Grid cell `(row, col)` of the switch.
    pub switch_cell: (u32, u32),
    pub button_release_delay: Duration,
    /// Controller components that leave the immersive session.
    pub exit_buttons: Vec<String>,
    pub sounds: Vec<Sound>,
    pub camera: CameraConfig,
    pub window_title: String,
    pub window_size: (u32, u32),
    /// Element id of the canvas the browser build renders into.
    pub canvas_id: String,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            panel_position: Vector3::new(0.0, 1.25, 1.0),
            panel_scale: 0.125,
            panel_width: 6,
            panel_height: 4,
            button_cell: (2, 2),
            switch_cell: (2, 3),
            button_release_delay: DEFAULT_RELEASE_DELAY,
            exit_buttons: vec!["b-button".to_string(), "y-button".to_string()],
            sounds: vec![
                Sound::spatial("switch", "audio/switch.mp3"),
                Sound::spatial("buttonDown", "audio/button_down.mp3"),
                Sound::spatial("buttonUp", "audio/button_up.mp3"),
            ],
            camera: CameraConfig::default(),
            window_title: "xr-panel".to_string(),
            window_size: (1280, 720),
            canvas_id: "renderCanvas".to_string(),
        }
    }
}
