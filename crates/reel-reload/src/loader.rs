use std::fs;
use std::path::{Path, PathBuf};

use crate::artifact::SceneArtifact;
use crate::error::LoadError;
use crate::module::{Scene, SceneModule};
use crate::slot::ActiveScene;

/// Produces scenes for the slot. The slot drives it in two phases so a bad
/// artifact is caught before the running scene is torn down:
/// - [`resolve`](Self::resolve) stages, loads, and resolves the new module
///   without touching any running scene and without calling `init`
/// - [`start`](Self::start) calls `init`; the slot only invokes it after the
///   previous scene has been destroyed and its module unloaded
pub trait ModuleLoader {
    type Module;
    type Scene: ActiveScene;

    fn resolve(&mut self, artifact: &SceneArtifact) -> Result<Self::Module, LoadError>;
    fn start(&mut self, module: Self::Module) -> Self::Scene;
}

/// The dylib loader.
///
/// Loads every module from a *staging copy*, never from the artifact itself:
/// the running process keeping the artifact mapped would otherwise contend
/// with the next `cargo build` writing to the same path. Staged copies carry
/// a monotonically increasing generation suffix; superseded generations are
/// swept on the next load rather than synchronously on unload.
pub struct SceneLoader {
    staging_dir: PathBuf,
    generation: u64,
}

impl SceneLoader {
    pub fn new(staging_dir: impl Into<PathBuf>) -> Self {
        Self { staging_dir: staging_dir.into(), generation: 0 }
    }

    pub fn staging_dir(&self) -> &Path {
        &self.staging_dir
    }

    /// Best-effort removal of staged copies from earlier generations (and
    /// earlier runs). The previous module may still be mapped at this point
    /// (it is unloaded only once the replacement resolves); unlinking a
    /// mapped file is fine on unix, and where it is refused (Windows) the
    /// file is simply skipped and retried on a later sweep.
    fn sweep(&self, stem: &str) {
        let Ok(entries) = fs::read_dir(&self.staging_dir) else { return };
        let prefix = format!("{stem}.");
        for entry in entries.flatten() {
            let name = entry.file_name();
            if name.to_string_lossy().starts_with(&prefix) {
                if let Err(err) = fs::remove_file(entry.path()) {
                    log::debug!("stale staging copy {:?} not removed: {err}", name);
                }
            }
        }
    }

    /// Copies `source` next to its future staged siblings, under the current
    /// generation suffix.
    fn stage(&self, source: &Path) -> Result<PathBuf, LoadError> {
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "scene".to_string());
        let ext = source
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();

        let staged = self
            .staging_dir
            .join(format!("{stem}.{}{ext}", self.generation));

        fs::copy(source, &staged)
            .map_err(|source| LoadError::StagingIo { path: staged.clone(), source })?;
        Ok(staged)
    }
}

impl ModuleLoader for SceneLoader {
    type Module = SceneModule;
    type Scene = Scene;

    fn resolve(&mut self, artifact: &SceneArtifact) -> Result<SceneModule, LoadError> {
        // Record the *source* mtime up front; this also rejects an absent
        // artifact before anything is copied or torn down.
        let mtime = artifact.source_mtime().map_err(|source| LoadError::ArtifactMissing {
            path: artifact.library().to_owned(),
            source,
        })?;

        fs::create_dir_all(&self.staging_dir).map_err(|source| LoadError::StagingIo {
            path: self.staging_dir.clone(),
            source,
        })?;

        self.sweep(&artifact.file_stem());
        self.generation += 1;

        let staged = self.stage(artifact.library())?;
        if let Some(debug_info) = artifact.debug_info() {
            if debug_info.exists() {
                self.stage(debug_info)?;
            }
        }

        // SAFETY: the staged file is a scene cdylib from this workspace,
        // built against the same contract crate.
        let module = unsafe { SceneModule::load(&staged, mtime) }?;
        log::info!(
            "loaded scene module {} (staged as {})",
            artifact.library().display(),
            staged.display()
        );
        Ok(module)
    }

    fn start(&mut self, module: SceneModule) -> Scene {
        Scene::start(module)
    }
}
