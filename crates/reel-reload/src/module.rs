use std::ffi::c_void;
use std::path::Path;
use std::time::SystemTime;

use libloading::Library;
use reel_scene::{GetSceneFns, RawFrame, SceneFns, SCENE_ENTRY_POINT};

use crate::error::LoadError;
use crate::slot::ActiveScene;

/// An owned, loaded scene module.
///
/// Holds the mapped library, the entry table resolved from it, and the mtime
/// of the source artifact it was built from. The table's function pointers
/// point into the mapped library, so they must never outlive it; this type
/// is the only place they are stored, and it keeps the library alive.
pub struct SceneModule {
    fns: SceneFns,
    loaded_mtime: SystemTime,
    library: Option<Library>,
}

impl SceneModule {
    /// Loads the library at `staged` and resolves the entry table.
    ///
    /// # Safety
    /// Loading a library runs arbitrary code, and the resolved symbol is
    /// trusted to match [`GetSceneFns`]. The caller must only pass artifacts
    /// built against this workspace's scene contract.
    pub(crate) unsafe fn load(
        staged: &Path,
        loaded_mtime: SystemTime,
    ) -> Result<Self, LoadError> {
        let failure = |source| LoadError::LoadFailure { path: staged.to_owned(), source };

        let library = unsafe { Library::new(staged) }.map_err(failure)?;
        let entry = unsafe { library.get::<GetSceneFns>(SCENE_ENTRY_POINT) }.map_err(failure)?;
        let fns = unsafe { entry() };

        Ok(Self { fns, loaded_mtime, library: Some(library) })
    }

    /// Source-artifact mtime recorded at load time.
    pub fn loaded_mtime(&self) -> SystemTime {
        self.loaded_mtime
    }

    fn fns(&self) -> &SceneFns {
        &self.fns
    }
}

impl Drop for SceneModule {
    fn drop(&mut self) {
        if let Some(library) = self.library.take() {
            // A failed unload is logged and otherwise ignored; it must never
            // keep the host from swapping scenes or exiting.
            match library.close() {
                Ok(()) => log::debug!("scene module unloaded"),
                Err(err) => log::warn!("failed to unload scene module: {err}"),
            }
        }
    }
}

/// A running scene: a loaded module paired with the opaque state its `init`
/// produced.
///
/// The state handle is never dereferenced here; it is only passed back to the
/// module that issued it. Dropping the scene calls `destroy` exactly once and
/// then unloads the module, in that order.
pub struct Scene {
    state: *mut c_void,
    module: SceneModule,
}

impl Scene {
    /// Calls the module's `init` and takes ownership of the result.
    pub(crate) fn start(module: SceneModule) -> Self {
        let state = unsafe { (module.fns().init)() };
        if state.is_null() {
            log::warn!("scene init returned no state; updates will be skipped");
        }
        Self { state, module }
    }
}

impl ActiveScene for Scene {
    fn update(&mut self, frame: &RawFrame, delta_time: f32) {
        if self.state.is_null() {
            return;
        }
        unsafe { (self.module.fns().update)(self.state, frame, delta_time) };
    }

    fn loaded_mtime(&self) -> SystemTime {
        self.module.loaded_mtime()
    }
}

impl Drop for Scene {
    fn drop(&mut self) {
        // Destroy the state while the module that owns its layout is still
        // mapped; the module itself unloads right after (field drop order).
        if !self.state.is_null() {
            unsafe { (self.module.fns().destroy)(self.state) };
            self.state = std::ptr::null_mut();
        }
    }
}
