use crate::host::SceneHost;
use std::fmt::Write;

/// Produces a frame from host state. Renderers never mutate the host.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame of the host's current scene.
    fn render(&self, host: &dyn SceneHost) -> Self::Output;
}

/// Human-readable dump of the scene: world color, materials, and every object
/// with its transform and material slots.
#[derive(Debug, Default)]
pub struct TextRenderer;

impl TextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for TextRenderer {
    type Output = String;

    fn render(&self, host: &dyn SceneHost) -> String {
        let objects = host.objects();
        let materials = host.materials();
        let mut out = String::new();

        let _ = writeln!(
            out,
            "=== Scene (objects={}, materials={}) ===",
            objects.len(),
            materials.len()
        );
        let _ = writeln!(out, "World: {}", host.world_color());

        for name in &materials {
            if let Ok(color) = host.material_color(name) {
                let _ = writeln!(out, "  material {name} base={color}");
            }
        }

        for id in objects {
            let (Ok(name), Ok(t)) = (host.object_name(id), host.transform(id)) else {
                continue;
            };
            let p = t.position;
            let s = t.scale;
            let r = t.euler();
            let slots = host.object_materials(id).unwrap_or_default();
            let _ = writeln!(
                out,
                "  [{}] {name} pos=({:.2}, {:.2}, {:.2}) rot=({:.2}, {:.2}, {:.2}) scale=({:.2}, {:.2}, {:.2}) materials=[{}]",
                id.short(),
                p.x,
                p.y,
                p.z,
                r.x,
                r.y,
                r.z,
                s.x,
                s.y,
                s.z,
                slots.join(", ")
            );
        }

        out
    }
}
