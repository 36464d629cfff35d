use log::info;

use crate::{
    audio::{AudioSink, SoundBank},
    data_structures::{material::MaterialLibrary, scene_graph::SceneGraph},
    events::SqueezeStream,
    objects::DeferredTask,
    registry::CollisionRegistry,
    timer::Scheduler,
};

/// Everything scene objects share, passed to them explicitly.
///
/// The context is created together with its scene and cleared on teardown.
/// It owns the scene graph, the collision registry and the squeeze event
/// stream, so no object ever reaches for global state.
#[derive(Debug)]
pub struct SceneContext {
    pub graph: SceneGraph,
    pub materials: MaterialLibrary,
    pub sounds: SoundBank,
    pub registry: CollisionRegistry,
    pub squeeze: SqueezeStream,
    pub scheduler: Scheduler<DeferredTask>,
}

impl SceneContext {
    pub fn new(sink: Box<dyn AudioSink>) -> Self {
        Self {
            graph: SceneGraph::new(),
            materials: MaterialLibrary::new(),
            sounds: SoundBank::new(sink),
            registry: CollisionRegistry::new(),
            squeeze: SqueezeStream::new(),
            scheduler: Scheduler::new(),
        }
    }

    /// Drops all scene state. Pending tasks are cancelled, not fired.
    pub fn clear(&mut self) {
        info!(
            "Clearing scene context: {} nodes, {} collision meshes, {} pending tasks",
            self.graph.len(),
            self.registry.len(),
            self.scheduler.pending()
        );
        self.scheduler.clear();
        self.squeeze.clear();
        self.registry.clear();
        self.graph.clear();
        self.sounds.clear();
        self.materials.clear();
    }
}
