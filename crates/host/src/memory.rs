use crate::host::{HostError, PrimitiveKind, SceneHost};
use crate::renderer::{Renderer, TextRenderer};
use glam::Vec3;
use scenecraft_common::{LinearRgba, ObjectId, Transform};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Background color of a fresh host world.
const DEFAULT_WORLD_COLOR: LinearRgba = LinearRgba::opaque(0.051, 0.051, 0.051);

/// A record produced by every mutation to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HostEvent {
    ObjectCreated {
        id: ObjectId,
        kind: PrimitiveKind,
        name: String,
    },
    /// Carries the removed object's name.
    ObjectRemoved { id: ObjectId, name: String },
    TransformUpdated {
        id: ObjectId,
        old: Transform,
        new: Transform,
    },
    MaterialCreated { name: String, base_color: LinearRgba },
    MaterialRemoved { name: String, users: usize },
    MaterialAssigned {
        id: ObjectId,
        slot: usize,
        name: String,
    },
    WorldColorSet { old: LinearRgba, new: LinearRgba },
}

/// Per-object data stored in the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectData {
    pub name: String,
    pub kind: PrimitiveKind,
    pub transform: Transform,
    /// Creation sequence number; object listings follow it.
    #[serde(default)]
    pub order: u64,
    /// Material slots, slot 0 first.
    pub materials: Vec<String>,
}

/// Per-material data stored in the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialData {
    pub base_color: LinearRgba,
}

/// In-process scene host.
///
/// Stands in for the content-creation application: names objects the way the
/// application does (`Cube`, `Cube.001`), keeps materials by unique name and
/// logs every mutation. Objects are listed in creation order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryHost {
    objects: BTreeMap<ObjectId, ObjectData>,
    materials: BTreeMap<String, MaterialData>,
    world_color: LinearRgba,
    #[serde(default)]
    next_order: u64,
    /// Append-only log of all mutations.
    #[serde(skip)]
    event_log: Vec<HostEvent>,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self {
            objects: BTreeMap::new(),
            materials: BTreeMap::new(),
            world_color: DEFAULT_WORLD_COLOR,
            next_order: 0,
            event_log: Vec::new(),
        }
    }
}

impl MemoryHost {
    /// Create an empty host with the default world color.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    pub fn get(&self, id: ObjectId) -> Option<&ObjectData> {
        self.objects.get(&id)
    }

    /// Find an object by its exact name.
    pub fn find_by_name(&self, name: &str) -> Option<ObjectId> {
        self.objects
            .iter()
            .find(|(_, data)| data.name == name)
            .map(|(id, _)| *id)
    }

    /// Read-only access to the event log.
    pub fn events(&self) -> &[HostEvent] {
        &self.event_log
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<HostEvent> {
        std::mem::take(&mut self.event_log)
    }

    /// Save the host state to a JSON file. The event log is not saved.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), HostError> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load host state from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, HostError> {
        let file = std::fs::File::open(path)?;
        let host: Self = serde_json::from_reader(file)?;
        Ok(host)
    }

    fn object_mut(&mut self, id: ObjectId) -> Result<&mut ObjectData, HostError> {
        self.objects.get_mut(&id).ok_or(HostError::ObjectNotFound(id))
    }

    fn update_transform(
        &mut self,
        id: ObjectId,
        edit: impl FnOnce(&mut Transform),
    ) -> Result<(), HostError> {
        let data = self.object_mut(id)?;
        let old = data.transform;
        edit(&mut data.transform);
        let new = data.transform;
        self.event_log
            .push(HostEvent::TransformUpdated { id, old, new });
        Ok(())
    }

    fn require_material(&self, name: &str) -> Result<(), HostError> {
        if self.materials.contains_key(name) {
            Ok(())
        } else {
            Err(HostError::MaterialNotFound(name.to_string()))
        }
    }

    fn unique_object_name(&self, base: &str) -> String {
        unique_name(base, |n| self.objects.values().any(|o| o.name == n))
    }
}

/// `base`, or the first `base.NNN` for which `taken` is false.
fn unique_name(base: &str, taken: impl Fn(&str) -> bool) -> String {
    if !taken(base) {
        return base.to_string();
    }
    (1u32..)
        .map(|n| format!("{base}.{n:03}"))
        .find(|candidate| !taken(candidate))
        .unwrap_or_else(|| base.to_string())
}

impl SceneHost for MemoryHost {
    fn create_primitive(&mut self, kind: PrimitiveKind) -> ObjectId {
        let id = ObjectId::new();
        let name = self.unique_object_name(kind.name());
        let order = self.next_order;
        self.next_order += 1;
        tracing::debug!(id = %id.short(), %kind, %name, "create primitive");
        self.objects.insert(
            id,
            ObjectData {
                name: name.clone(),
                kind,
                transform: Transform::default(),
                order,
                materials: Vec::new(),
            },
        );
        self.event_log
            .push(HostEvent::ObjectCreated { id, kind, name });
        id
    }

    /// Objects in creation order.
    fn objects(&self) -> Vec<ObjectId> {
        let mut ordered: Vec<(u64, ObjectId)> = self
            .objects
            .iter()
            .map(|(id, data)| (data.order, *id))
            .collect();
        ordered.sort_unstable();
        ordered.into_iter().map(|(_, id)| id).collect()
    }

    fn object_name(&self, id: ObjectId) -> Result<String, HostError> {
        self.get(id)
            .map(|data| data.name.clone())
            .ok_or(HostError::ObjectNotFound(id))
    }

    fn transform(&self, id: ObjectId) -> Result<Transform, HostError> {
        self.get(id)
            .map(|data| data.transform)
            .ok_or(HostError::ObjectNotFound(id))
    }

    fn set_scale(&mut self, id: ObjectId, scale: Vec3) -> Result<(), HostError> {
        self.update_transform(id, |t| t.scale = scale)
    }

    fn set_position(&mut self, id: ObjectId, position: Vec3) -> Result<(), HostError> {
        self.update_transform(id, |t| t.position = position)
    }

    fn set_rotation(&mut self, id: ObjectId, euler: Vec3) -> Result<(), HostError> {
        self.update_transform(id, |t| t.rotation = Transform::rotation_from_euler(euler))
    }

    fn remove_object(&mut self, id: ObjectId) -> Result<(), HostError> {
        let data = self
            .objects
            .remove(&id)
            .ok_or(HostError::ObjectNotFound(id))?;
        tracing::debug!(id = %id.short(), name = %data.name, "remove object");
        self.event_log.push(HostEvent::ObjectRemoved {
            id,
            name: data.name,
        });
        Ok(())
    }

    fn materials(&self) -> Vec<String> {
        self.materials.keys().cloned().collect()
    }

    fn has_material(&self, name: &str) -> bool {
        self.materials.contains_key(name)
    }

    fn create_material(&mut self, name: &str, base_color: LinearRgba) -> String {
        let name = unique_name(name, |n| self.materials.contains_key(n));
        tracing::debug!(%name, color = %base_color, "create material");
        self.materials
            .insert(name.clone(), MaterialData { base_color });
        self.event_log.push(HostEvent::MaterialCreated {
            name: name.clone(),
            base_color,
        });
        name
    }

    fn material_color(&self, name: &str) -> Result<LinearRgba, HostError> {
        self.materials
            .get(name)
            .map(|m| m.base_color)
            .ok_or_else(|| HostError::MaterialNotFound(name.to_string()))
    }

    fn remove_material(&mut self, name: &str) -> Result<(), HostError> {
        self.materials
            .remove(name)
            .ok_or_else(|| HostError::MaterialNotFound(name.to_string()))?;
        let mut users = 0;
        for data in self.objects.values_mut() {
            let before = data.materials.len();
            data.materials.retain(|m| m != name);
            if data.materials.len() != before {
                users += 1;
            }
        }
        tracing::debug!(%name, users, "remove material");
        self.event_log.push(HostEvent::MaterialRemoved {
            name: name.to_string(),
            users,
        });
        Ok(())
    }

    fn object_materials(&self, id: ObjectId) -> Result<Vec<String>, HostError> {
        self.get(id)
            .map(|data| data.materials.clone())
            .ok_or(HostError::ObjectNotFound(id))
    }

    fn append_material(&mut self, id: ObjectId, name: &str) -> Result<(), HostError> {
        self.require_material(name)?;
        let data = self.object_mut(id)?;
        data.materials.push(name.to_string());
        let slot = data.materials.len() - 1;
        self.event_log.push(HostEvent::MaterialAssigned {
            id,
            slot,
            name: name.to_string(),
        });
        Ok(())
    }

    fn replace_material(
        &mut self,
        id: ObjectId,
        slot: usize,
        name: &str,
    ) -> Result<(), HostError> {
        self.require_material(name)?;
        let data = self.object_mut(id)?;
        let len = data.materials.len();
        let entry = data
            .materials
            .get_mut(slot)
            .ok_or(HostError::SlotOutOfRange { id, slot, len })?;
        *entry = name.to_string();
        self.event_log.push(HostEvent::MaterialAssigned {
            id,
            slot,
            name: name.to_string(),
        });
        Ok(())
    }

    fn world_color(&self) -> LinearRgba {
        self.world_color
    }

    fn set_world_color(&mut self, color: LinearRgba) {
        let old = self.world_color;
        self.world_color = color;
        self.event_log
            .push(HostEvent::WorldColorSet { old, new: color });
    }

    /// The memory host has no rasterizer; the "image" is the text render.
    fn export_render(&self, path: &Path) -> Result<(), HostError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let frame = TextRenderer::new().render(self);
        std::fs::write(path, frame)?;
        tracing::info!(path = %path.display(), objects = self.objects.len(), "exported render");
        Ok(())
    }
}
