use glam::Vec3;
use scenecraft_common::{LinearRgba, ObjectId, Transform};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Primitive shapes a host can generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum PrimitiveKind {
    Cube,
    /// UV sphere.
    Sphere,
    Cylinder,
    Cone,
    Torus,
    Plane,
    /// Curve primitive.
    Ellipse,
    /// Curve primitive.
    Circle,
}

impl PrimitiveKind {
    pub const ALL: [Self; 8] = [
        Self::Cube,
        Self::Sphere,
        Self::Cylinder,
        Self::Cone,
        Self::Torus,
        Self::Plane,
        Self::Ellipse,
        Self::Circle,
    ];

    /// Base name the host gives new objects of this kind.
    pub fn name(self) -> &'static str {
        match self {
            Self::Cube => "Cube",
            Self::Sphere => "Sphere",
            Self::Cylinder => "Cylinder",
            Self::Cone => "Cone",
            Self::Torus => "Torus",
            Self::Plane => "Plane",
            Self::Ellipse => "Ellipse",
            Self::Circle => "Circle",
        }
    }

    /// Case-insensitive lookup. Unknown names fall back to a cube.
    pub fn parse_or_cube(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(name.trim()))
            .unwrap_or_else(|| {
                tracing::warn!(name, "unknown primitive kind, using Cube");
                Self::Cube
            })
    }
}

impl From<String> for PrimitiveKind {
    fn from(s: String) -> Self {
        Self::parse_or_cube(&s)
    }
}

impl From<&str> for PrimitiveKind {
    fn from(s: &str) -> Self {
        Self::parse_or_cube(s)
    }
}

impl std::fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors from host operations.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("object {0:?} not found")]
    ObjectNotFound(ObjectId),
    #[error("material {0:?} not found")]
    MaterialNotFound(String),
    #[error("material slot {slot} out of range for object {id:?} ({len} slots)")]
    SlotOutOfRange { id: ObjectId, slot: usize, len: usize },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Object model exposed by a 3D content-creation host.
///
/// Scripts hold an explicit `&mut impl SceneHost` and explicit [`ObjectId`]
/// handles. Nothing here depends on a "current" object or scene.
pub trait SceneHost {
    /// Generate a primitive at the origin and return its handle.
    fn create_primitive(&mut self, kind: PrimitiveKind) -> ObjectId;

    /// All objects in the scene, in a stable order.
    fn objects(&self) -> Vec<ObjectId>;

    fn object_name(&self, id: ObjectId) -> Result<String, HostError>;

    fn transform(&self, id: ObjectId) -> Result<Transform, HostError>;

    fn set_scale(&mut self, id: ObjectId, scale: Vec3) -> Result<(), HostError>;

    fn set_position(&mut self, id: ObjectId, position: Vec3) -> Result<(), HostError>;

    /// Set rotation from XYZ Euler angles in radians.
    fn set_rotation(&mut self, id: ObjectId, euler: Vec3) -> Result<(), HostError>;

    fn remove_object(&mut self, id: ObjectId) -> Result<(), HostError>;

    /// Names of all materials, in a stable order.
    fn materials(&self) -> Vec<String>;

    fn has_material(&self, name: &str) -> bool;

    /// Create a material with a base color. If `name` is taken the host picks
    /// the next free `name.NNN`; the actual name is returned.
    fn create_material(&mut self, name: &str, base_color: LinearRgba) -> String;

    fn material_color(&self, name: &str) -> Result<LinearRgba, HostError>;

    /// Remove a material after clearing it from every object that uses it.
    fn remove_material(&mut self, name: &str) -> Result<(), HostError>;

    /// Material slots of an object, slot 0 first.
    fn object_materials(&self, id: ObjectId) -> Result<Vec<String>, HostError>;

    fn append_material(&mut self, id: ObjectId, name: &str) -> Result<(), HostError>;

    fn replace_material(&mut self, id: ObjectId, slot: usize, name: &str)
    -> Result<(), HostError>;

    fn world_color(&self) -> LinearRgba;

    fn set_world_color(&mut self, color: LinearRgba);

    /// Write the current render target to an image file.
    fn export_render(&self, path: &Path) -> Result<(), HostError>;
}
