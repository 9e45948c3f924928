mod config;
mod runner;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::SceneFile;
use scenecraft_common::{GAMMA, hex_to_linear_rgba};
use scenecraft_host::{MemoryHost, SceneHost};
use scenecraft_script::ScriptRng;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "scenecraft", about = "Script primitive scenes and convert colors")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version info
    Info,
    /// Convert hex colors to gamma-decoded linear RGBA
    Color {
        /// Hex colors, with or without a leading '#'
        #[arg(required = true)]
        colors: Vec<String>,
    },
    /// Run a YAML scene file and export the render
    Build {
        /// Scene description file
        scene: PathBuf,
        /// Directory the render is written to
        #[arg(short, long, default_value = "./renders")]
        out: PathBuf,
        /// Seed for random scales and palette picks
        #[arg(short, long, default_value = "42")]
        seed: u64,
        /// Host state file: loaded if present, saved after the build
        #[arg(long)]
        state: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("scenecraft v{}", env!("CARGO_PKG_VERSION"));
            println!("gamma: {GAMMA}");
        }
        Commands::Color { colors } => {
            let mut failed = 0usize;
            for hex in &colors {
                match hex_to_linear_rgba(hex) {
                    Ok(c) => println!("{hex}\t{c}"),
                    Err(e) => {
                        eprintln!("{e}");
                        failed += 1;
                    }
                }
            }
            if failed > 0 {
                anyhow::bail!("{failed} of {} colors could not be parsed", colors.len());
            }
        }
        Commands::Build {
            scene,
            out,
            seed,
            state,
        } => {
            let scene_file = SceneFile::load(&scene)?;
            let mut host = match &state {
                Some(path) if path.exists() => MemoryHost::load(path)
                    .with_context(|| format!("loading host state {}", path.display()))?,
                _ => MemoryHost::new(),
            };
            let mut rng = ScriptRng::with_seed(seed);

            let summary = runner::build_scene(&mut host, &scene_file, &mut rng, &out)?;
            println!(
                "Removed: {} objects, {} materials",
                summary.objects_removed, summary.materials_removed
            );
            println!(
                "Spawned: {} objects ({} in scene, {} materials)",
                summary.objects_spawned,
                host.objects().len(),
                host.materials().len()
            );
            println!("Render: {}", summary.render_path.display());

            if let Some(path) = &state {
                host.save(path)
                    .with_context(|| format!("saving host state {}", path.display()))?;
                tracing::info!(path = %path.display(), "host state saved");
            }
        }
    }

    Ok(())
}
