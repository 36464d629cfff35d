//! Scene data structures: transforms, meshes, materials and the scene graph.
//!
//! - `transform` holds position, rotation and scale of a node
//! - `mesh` defines the box meshes objects are built from
//! - `material` holds named surface colours
//! - `scene_graph` enables hierarchical scene organization

pub mod material;
pub mod mesh;
pub mod scene_graph;
pub mod transform;
