use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use winit::dpi::LogicalSize;

use reel_engine::device::GpuInit;
use reel_engine::logging::{init_logging, LoggingConfig};
use reel_engine::window::{Runtime, RuntimeConfig};
use reel_reload::{SceneArtifact, SceneLoader, SceneSlot};

mod app;

use app::HostApp;

/// Scene loaded when no argument is given.
const DEFAULT_SCENE: &str = "scene-starfield";

/// Usage: `reel [scene]`
///
/// `scene` is either a scene crate name (resolved to the cdylib cargo builds
/// next to this binary) or an explicit path to a module artifact. Rebuild the
/// scene crate while the host runs and the new build is picked up on the next
/// frame.
fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let artifact = resolve_artifact(std::env::args().nth(1))?;
    log::info!("watching scene artifact {}", artifact.library().display());

    let staging_dir = artifact
        .library()
        .parent()
        .map(|dir| dir.join("staging"))
        .unwrap_or_else(|| PathBuf::from("staging"));
    let slot = SceneSlot::new(SceneLoader::new(staging_dir), artifact);

    let config = RuntimeConfig {
        title: "reel".to_string(),
        initial_size: LogicalSize::new(800.0, 600.0),
    };

    Runtime::run(config, GpuInit::default(), HostApp::new(slot))
}

fn resolve_artifact(arg: Option<String>) -> Result<SceneArtifact> {
    match arg {
        // Anything that looks like a file path is taken verbatim.
        Some(s) if s.contains('/') || s.contains('\\') || Path::new(&s).extension().is_some() => {
            Ok(SceneArtifact::new(s))
        }
        Some(name) => Ok(SceneArtifact::for_crate(&artifact_dir()?, &name)),
        None => Ok(SceneArtifact::for_crate(&artifact_dir()?, DEFAULT_SCENE)),
    }
}

/// Scene cdylibs land in the same target directory as the host binary.
fn artifact_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("cannot locate host executable")?;
    exe.parent()
        .map(Path::to_path_buf)
        .context("host executable has no parent directory")
}
