use crate::error::ScriptError;
use scenecraft_common::{LinearRgba, hex_to_linear_rgba};
use scenecraft_host::SceneHost;
use std::path::{Path, PathBuf};

/// Scene-wide operations: cleanup, world color, export.
pub struct Scene;

/// What [`Scene::setup`] changed.
#[derive(Debug, Clone, PartialEq)]
pub struct SetupReport {
    pub objects_removed: usize,
    pub materials_removed: usize,
    pub world_color: LinearRgba,
}

impl std::fmt::Display for SetupReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "removed {} objects, {} materials; world color {}",
            self.objects_removed, self.materials_removed, self.world_color
        )
    }
}

impl Scene {
    /// Remove every object whose name starts with one of the capitalized type
    /// names (`cube` matches `Cube`, `Cube.001`). Empty type names are ignored.
    pub fn delete_all_objects_of_type<H, S>(
        host: &mut H,
        kinds: &[S],
    ) -> Result<usize, ScriptError>
    where
        H: SceneHost + ?Sized,
        S: AsRef<str>,
    {
        let prefixes: Vec<String> = kinds
            .iter()
            .map(|k| capitalize(k.as_ref()))
            .filter(|p| !p.is_empty())
            .collect();
        if prefixes.is_empty() {
            return Ok(0);
        }

        let mut removed = 0;
        for id in host.objects() {
            let name = host.object_name(id)?;
            if prefixes.iter().any(|p| name.starts_with(p.as_str())) {
                host.remove_object(id)?;
                removed += 1;
            }
        }
        tracing::info!(removed, types = ?prefixes, "deleted objects by type");
        Ok(removed)
    }

    /// Remove every material not named in `keep`, clearing its users first.
    pub fn delete_all_materials_except<H, S>(
        host: &mut H,
        keep: &[S],
    ) -> Result<usize, ScriptError>
    where
        H: SceneHost + ?Sized,
        S: AsRef<str>,
    {
        let mut removed = 0;
        for name in host.materials() {
            if keep.iter().any(|k| k.as_ref() == name) {
                continue;
            }
            host.remove_material(&name)?;
            removed += 1;
        }
        tracing::info!(removed, kept = keep.len(), "pruned materials");
        Ok(removed)
    }

    /// Set the world background from a hex color.
    pub fn set_world_color<H: SceneHost + ?Sized>(
        host: &mut H,
        hex: &str,
    ) -> Result<LinearRgba, ScriptError> {
        let color = hex_to_linear_rgba(hex)?;
        host.set_world_color(color);
        tracing::debug!(%hex, %color, "world color set");
        Ok(color)
    }

    /// Prepare a scene for a fresh script run: delete objects by type, prune
    /// materials and set the world color.
    ///
    /// The world color is validated first so a bad color leaves the scene
    /// untouched.
    pub fn setup<H, S, T>(
        host: &mut H,
        del_objs: &[S],
        keep_materials: &[T],
        world_color: &str,
    ) -> Result<SetupReport, ScriptError>
    where
        H: SceneHost + ?Sized,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        hex_to_linear_rgba(world_color)?;
        let objects_removed = Self::delete_all_objects_of_type(host, del_objs)?;
        let materials_removed = Self::delete_all_materials_except(host, keep_materials)?;
        let world_color = Self::set_world_color(host, world_color)?;
        Ok(SetupReport {
            objects_removed,
            materials_removed,
            world_color,
        })
    }

    /// Export the current render to `<dir>/<file_stem>.png`.
    pub fn save_as_png<H: SceneHost + ?Sized>(
        host: &H,
        dir: &Path,
        file_stem: &str,
    ) -> Result<PathBuf, ScriptError> {
        let path = dir.join(format!("{file_stem}.png"));
        host.export_render(&path)?;
        Ok(path)
    }
}

/// First character uppercase, the rest lowercase.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
