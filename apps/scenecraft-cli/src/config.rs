//! YAML scene descriptions.

use anyhow::{Context, Result};
use scenecraft_script::ObjectSpec;
use serde::Deserialize;
use std::path::Path;

fn default_output() -> String {
    "render".into()
}

/// A scene script: cleanup, materials to create, objects to place, and the
/// export name.
#[derive(Debug, Clone, Deserialize)]
pub struct SceneFile {
    /// Hex world background color. Cleanup and the color are applied together.
    #[serde(default)]
    pub world_color: Option<String>,
    /// Object type names to delete before building.
    #[serde(default)]
    pub delete_objects: Vec<String>,
    /// Materials that survive cleanup.
    #[serde(default)]
    pub keep_materials: Vec<String>,
    #[serde(default)]
    pub materials: Vec<MaterialEntry>,
    #[serde(default)]
    pub objects: Vec<ObjectEntry>,
    /// Export file stem; `.png` is appended.
    #[serde(default = "default_output")]
    pub output: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MaterialEntry {
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObjectEntry {
    #[serde(flatten)]
    pub spec: ObjectSpec,
    /// Extra material with this hex base color.
    #[serde(default)]
    pub color: Option<String>,
    /// `[min, max]` per-axis random scale, applied after placement.
    #[serde(default)]
    pub random_scale: Option<[f32; 2]>,
    /// Extra material with a color picked from this list.
    #[serde(default)]
    pub palette: Vec<String>,
}

impl SceneFile {
    pub fn from_yaml(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).context("invalid scene file")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading scene file {}", path.display()))?;
        Self::from_yaml(&text).with_context(|| format!("parsing {}", path.display()))
    }
}
