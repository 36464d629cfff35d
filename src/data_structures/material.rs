//! Named surface materials.
//!
//! Materials are plain colour data looked up by name, the way scene scripts
//! refer to them. Shading is the host renderer's business.

use std::collections::HashMap;

use log::warn;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color3 {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color3 {
    pub const BLACK: Color3 = Color3::new(0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub name: String,
    pub diffuse: Color3,
    pub emissive: Color3,
}

impl Material {
    pub fn new(name: &str, diffuse: Color3) -> Self {
        Self {
            name: name.to_string(),
            diffuse,
            emissive: Color3::BLACK,
        }
    }

    pub fn with_emissive(mut self, emissive: Color3) -> Self {
        self.emissive = emissive;
        self
    }
}

pub const METAL: &str = "metal";
pub const BLACK_PLASTIC: &str = "blackPlastic";
pub const RED_PLASTIC: &str = "redPlastic";
pub const RED_PLASTIC_LIT: &str = "redPlasticLit";

#[derive(Debug, Default)]
pub struct MaterialLibrary {
    materials: HashMap<String, Material>,
}

impl MaterialLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// The four materials the control panel is built from.
    pub fn control_panel() -> Self {
        let red = Color3::new(0.5, 0.0, 0.0);
        let mut library = Self::new();
        library.insert(Material::new(METAL, Color3::new(0.5, 0.5, 0.5)));
        library.insert(Material::new(BLACK_PLASTIC, Color3::new(0.1, 0.1, 0.1)));
        library.insert(Material::new(RED_PLASTIC, red));
        library.insert(
            Material::new(RED_PLASTIC_LIT, red).with_emissive(Color3::new(0.5, 0.0, 0.0)),
        );
        library
    }

    /// Adds a material, replacing any previous one with the same name.
    pub fn insert(&mut self, material: Material) -> Option<Material> {
        self.materials.insert(material.name.clone(), material)
    }

    pub fn get(&self, name: &str) -> Option<&Material> {
        self.materials.get(name)
    }

    /// Returns the name back if the material exists, so it can be assigned to a mesh.
    pub fn resolve(&self, name: &str) -> Option<String> {
        if self.materials.contains_key(name) {
            Some(name.to_string())
        } else {
            warn!("Material {} is not part of the scene", name);
            None
        }
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn clear(&mut self) {
        self.materials.clear();
    }
}
