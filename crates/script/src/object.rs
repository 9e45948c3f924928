use crate::error::ScriptError;
use crate::rng::ScriptRng;
use glam::Vec3;
use scenecraft_common::{ObjectId, hex_to_linear_rgba};
use scenecraft_host::{HostError, PrimitiveKind, SceneHost};
use serde::{Deserialize, Serialize};

/// Name given to materials created from a bare color.
const COLOR_MATERIAL_NAME: &str = "Material";

/// Everything needed to create and place one object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectSpec {
    pub kind: PrimitiveKind,
    /// Name of a material that already exists in the host.
    pub material: String,
    #[serde(default = "unit_size")]
    pub size: [f32; 3],
    /// Ground-plane x and y.
    #[serde(default)]
    pub position: [f32; 2],
    /// Extra height above the resting position.
    #[serde(default)]
    pub z_offset: Option<f32>,
    /// XYZ Euler angles in radians.
    #[serde(default)]
    pub rotation: [f32; 3],
}

fn unit_size() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

impl ObjectSpec {
    pub fn new(kind: PrimitiveKind, material: impl Into<String>) -> Self {
        Self {
            kind,
            material: material.into(),
            size: unit_size(),
            position: [0.0, 0.0],
            z_offset: None,
            rotation: [0.0, 0.0, 0.0],
        }
    }
}

/// Handle-based convenience API for one host object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneObject {
    id: ObjectId,
    kind: PrimitiveKind,
}

impl SceneObject {
    /// Create the primitive, then apply material, scale, position and
    /// rotation in that order.
    ///
    /// The material is checked before anything is created; if a later step
    /// fails the new object is removed again.
    pub fn spawn<H: SceneHost + ?Sized>(
        host: &mut H,
        spec: &ObjectSpec,
    ) -> Result<Self, ScriptError> {
        if !host.has_material(&spec.material) {
            return Err(HostError::MaterialNotFound(spec.material.clone()).into());
        }
        let id = host.create_primitive(spec.kind);
        let obj = Self {
            id,
            kind: spec.kind,
        };
        if let Err(e) = obj.apply_settings(host, spec) {
            host.remove_object(id)?;
            return Err(e);
        }
        tracing::info!(
            id = %id.short(),
            kind = %spec.kind,
            material = %spec.material,
            "spawned object"
        );
        Ok(obj)
    }

    fn apply_settings<H: SceneHost + ?Sized>(
        &self,
        host: &mut H,
        spec: &ObjectSpec,
    ) -> Result<(), ScriptError> {
        self.set_material(host, &spec.material)?;
        let [sx, sy, sz] = spec.size;
        self.set_scale(host, sx, sy, sz)?;
        let [x, y] = spec.position;
        self.set_position(host, x, y, spec.z_offset)?;
        let [rx, ry, rz] = spec.rotation;
        self.set_rotation(host, rx, ry, rz)
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn kind(&self) -> PrimitiveKind {
        self.kind
    }

    pub fn set_scale<H: SceneHost + ?Sized>(
        &self,
        host: &mut H,
        x: f32,
        y: f32,
        z: f32,
    ) -> Result<(), ScriptError> {
        host.set_scale(self.id, Vec3::new(x, y, z))?;
        Ok(())
    }

    /// Place the object so it rests on the ground plane.
    ///
    /// Host primitives span -1..1 on each axis, so the half-height is the z
    /// scale. The final z is `scale.z + z_offset` (offset defaults to 0).
    pub fn set_position<H: SceneHost + ?Sized>(
        &self,
        host: &mut H,
        x: f32,
        y: f32,
        z_offset: Option<f32>,
    ) -> Result<(), ScriptError> {
        let scale_z = host.transform(self.id)?.scale.z;
        let z = scale_z + z_offset.unwrap_or(0.0);
        host.set_position(self.id, Vec3::new(x, y, z))?;
        Ok(())
    }

    /// XYZ Euler angles in radians.
    pub fn set_rotation<H: SceneHost + ?Sized>(
        &self,
        host: &mut H,
        x: f32,
        y: f32,
        z: f32,
    ) -> Result<(), ScriptError> {
        host.set_rotation(self.id, Vec3::new(x, y, z))?;
        Ok(())
    }

    /// Draw each axis scale independently from `[min, max]`. NaN bounds are
    /// rejected along with inverted ones.
    pub fn set_random_scale<H: SceneHost + ?Sized>(
        &self,
        host: &mut H,
        rng: &mut ScriptRng,
        min: f32,
        max: f32,
    ) -> Result<Vec3, ScriptError> {
        if !(min <= max) {
            return Err(ScriptError::InvalidRange { min, max });
        }
        let scale = Vec3::new(
            rng.uniform(min, max),
            rng.uniform(min, max),
            rng.uniform(min, max),
        );
        host.set_scale(self.id, scale)?;
        Ok(scale)
    }

    /// Put an existing material in slot 0, or append it if the object has no
    /// slots yet.
    pub fn set_material<H: SceneHost + ?Sized>(
        &self,
        host: &mut H,
        name: &str,
    ) -> Result<(), ScriptError> {
        if host.object_materials(self.id)?.is_empty() {
            host.append_material(self.id, name)?;
        } else {
            host.replace_material(self.id, 0, name)?;
        }
        Ok(())
    }

    /// Create a new material with the given hex base color and append it.
    /// Returns the name the host gave the material.
    pub fn set_color<H: SceneHost + ?Sized>(
        &self,
        host: &mut H,
        hex: &str,
    ) -> Result<String, ScriptError> {
        let color = hex_to_linear_rgba(hex)?;
        let name = host.create_material(COLOR_MATERIAL_NAME, color);
        host.append_material(self.id, &name)?;
        Ok(name)
    }

    /// [`set_color`](Self::set_color) with a color picked from `colors`.
    pub fn set_random_color_from_list<H, S>(
        &self,
        host: &mut H,
        rng: &mut ScriptRng,
        colors: &[S],
    ) -> Result<String, ScriptError>
    where
        H: SceneHost + ?Sized,
        S: AsRef<str>,
    {
        let pick = rng.choose(colors).ok_or(ScriptError::EmptyPalette)?;
        self.set_color(host, pick.as_ref())
    }
}
