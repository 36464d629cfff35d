//! xr-panel
//!
//! A virtual control panel for WebXR: a tilted metal board with a push button
//! and a toggle switch that can be pressed with a pointer or a controller
//! trigger, and grabbed and carried around with the squeeze button. The crate
//! holds the scene logic; drawing, audio mixing and the XR session belong to
//! the host, which talks to the scene through plain calls.
//!
//! High-level modules
//! - `audio`: named sounds and the host audio sink
//! - `camera`: desktop perspective camera and cursor pick rays
//! - `config`: scene and runner settings
//! - `context`: state shared by all scene objects
//! - `data_structures`: transforms, scene graph, meshes and materials
//! - `events`: squeeze event stream
//! - `flow`: native `winit` application loop
//! - `input`: motion controller binding
//! - `objects`: panel, button and switch
//! - `pick`: CPU ray picking
//! - `registry`: collision mesh to object lookup
//! - `scene`: the control panel scene and its event routing
//! - `timer`: cancelable tasks on the scene clock
//! - `web`: `wasm-bindgen` bridge for the browser
//!

pub mod audio;
pub mod camera;
pub mod config;
pub mod context;
pub mod data_structures;
pub mod events;
#[cfg(not(target_arch = "wasm32"))]
pub mod flow;
pub mod input;
pub mod objects;
pub mod pick;
pub mod registry;
pub mod scene;
pub mod timer;
#[cfg(target_arch = "wasm32")]
pub mod web;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::*;
pub use config::SceneConfig;
pub use scene::ControlPanelScene;
