use crate::config::SceneFile;
use anyhow::{Context, Result};
use scenecraft_common::hex_to_linear_rgba;
use scenecraft_host::SceneHost;
use scenecraft_script::{Scene, SceneObject, ScriptRng};
use std::path::{Path, PathBuf};

/// Outcome of running one scene file.
#[derive(Debug)]
pub struct BuildSummary {
    pub objects_removed: usize,
    pub materials_removed: usize,
    pub objects_spawned: usize,
    pub render_path: PathBuf,
}

/// Run a scene file against a host and export the render into `out_dir`.
pub fn build_scene<H: SceneHost + ?Sized>(
    host: &mut H,
    scene: &SceneFile,
    rng: &mut ScriptRng,
    out_dir: &Path,
) -> Result<BuildSummary> {
    let (objects_removed, materials_removed) = match &scene.world_color {
        Some(color) => {
            let report = Scene::setup(host, &scene.delete_objects, &scene.keep_materials, color)
                .context("scene setup")?;
            tracing::info!(%report, "setup complete");
            (report.objects_removed, report.materials_removed)
        }
        None => (
            Scene::delete_all_objects_of_type(host, &scene.delete_objects)?,
            Scene::delete_all_materials_except(host, &scene.keep_materials)?,
        ),
    };

    for entry in &scene.materials {
        let color = hex_to_linear_rgba(&entry.color)
            .with_context(|| format!("material {}", entry.name))?;
        let name = host.create_material(&entry.name, color);
        if name != entry.name {
            tracing::warn!(requested = %entry.name, %name, "material name taken, host renamed it");
        }
    }

    for (i, entry) in scene.objects.iter().enumerate() {
        let obj = SceneObject::spawn(host, &entry.spec)
            .with_context(|| format!("object #{i} ({})", entry.spec.kind))?;
        if let Some([min, max]) = entry.random_scale {
            obj.set_random_scale(host, rng, min, max)?;
            // Re-seat on the ground with the new height.
            let [x, y] = entry.spec.position;
            obj.set_position(host, x, y, entry.spec.z_offset)?;
        }
        if let Some(hex) = &entry.color {
            obj.set_color(host, hex)
                .with_context(|| format!("object #{i} color"))?;
        }
        if !entry.palette.is_empty() {
            obj.set_random_color_from_list(host, rng, &entry.palette)
                .with_context(|| format!("object #{i} palette"))?;
        }
    }

    let render_path = Scene::save_as_png(host, out_dir, &scene.output)?;
    Ok(BuildSummary {
        objects_removed,
        materials_removed,
        objects_spawned: scene.objects.len(),
        render_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenecraft_common::LinearRgba;
    use scenecraft_host::MemoryHost;

    const SCENE: &str = r##"
world_color: "#FFFFFF"
delete_objects: [cube]
keep_materials: [Ground]
materials:
  - name: Ground
    color: "#808080"
objects:
  - kind: Plane
    material: Ground
    size: [5, 5, 0.1]
  - kind: Cube
    material: Ground
    random_scale: [1, 2]
    palette: ["#FF0000", "#0000FF"]
output: test
"##;

    fn run(seed: u64, host: &mut MemoryHost, dir: &Path) -> BuildSummary {
        let scene = SceneFile::from_yaml(SCENE).unwrap();
        let mut rng = ScriptRng::with_seed(seed);
        build_scene(host, &scene, &mut rng, dir).unwrap()
    }

    #[test]
    fn builds_and_exports() {
        let dir = tempfile::tempdir().unwrap();
        let mut host = MemoryHost::new();
        let summary = run(1, &mut host, dir.path());

        assert_eq!(summary.objects_spawned, 2);
        assert_eq!(summary.render_path, dir.path().join("test.png"));
        assert!(summary.render_path.exists());
        assert_eq!(host.object_count(), 2);
        assert_eq!(host.world_color(), LinearRgba::WHITE);
    }

    #[test]
    fn randomly_scaled_object_rests_on_ground() {
        let dir = tempfile::tempdir().unwrap();
        let mut host = MemoryHost::new();
        run(3, &mut host, dir.path());

        let cube = host.find_by_name("Cube").unwrap();
        let t = host.transform(cube).unwrap();
        assert_eq!(t.position.z, t.scale.z);
        assert!((1.0..=2.0).contains(&t.scale.z));
    }

    #[test]
    fn rerun_cleans_previous_build() {
        let dir = tempfile::tempdir().unwrap();
        let mut host = MemoryHost::new();
        run(1, &mut host, dir.path());
        let summary = run(1, &mut host, dir.path());

        // The earlier cube and its palette material are cleaned up; the plane
        // is not in the delete list and stays.
        assert_eq!(summary.objects_removed, 1);
        assert_eq!(summary.materials_removed, 1);
        assert_eq!(host.object_count(), 3);
        assert!(host.find_by_name("Cube").is_some());
        assert!(host.find_by_name("Plane.001").is_some());
        // Ground already existed, so the redeclared one was renamed.
        assert!(host.has_material("Ground.001"));
    }

    #[test]
    fn same_seed_same_scene() {
        let dir = tempfile::tempdir().unwrap();
        let mut a = MemoryHost::new();
        let mut b = MemoryHost::new();
        run(9, &mut a, dir.path());
        run(9, &mut b, dir.path());

        let scale = |h: &MemoryHost| h.transform(h.find_by_name("Cube").unwrap()).unwrap().scale;
        assert_eq!(scale(&a), scale(&b));
        assert_eq!(
            a.material_color("Material").unwrap(),
            b.material_color("Material").unwrap()
        );
    }

    #[test]
    fn bad_material_color_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let scene =
            SceneFile::from_yaml("materials:\n  - name: Broken\n    color: \"#12\"\n").unwrap();
        let mut host = MemoryHost::new();
        let err = build_scene(&mut host, &scene, &mut ScriptRng::with_seed(0), dir.path())
            .unwrap_err();
        assert!(format!("{err:#}").contains("material Broken"));
    }
}
