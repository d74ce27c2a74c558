use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Location of a compiled scene module on disk.
///
/// The pair is supplied by the caller, not discovered: the host knows which
/// scene crate it is running. `debug_info` is the companion file some
/// platforms keep next to the library (`.pdb` on Windows); it is staged
/// alongside the library so the debugger keeps working on the staged copy.
#[derive(Debug, Clone)]
pub struct SceneArtifact {
    library: PathBuf,
    debug_info: Option<PathBuf>,
}

impl SceneArtifact {
    /// An artifact at an explicit library path.
    ///
    /// On Windows a sibling `.pdb` is assumed; elsewhere there is no
    /// companion file.
    pub fn new(library: impl Into<PathBuf>) -> Self {
        let library = library.into();
        let debug_info = if cfg!(target_os = "windows") {
            Some(library.with_extension("pdb"))
        } else {
            None
        };
        Self { library, debug_info }
    }

    /// The artifact `cargo` produces for a cdylib crate named `crate_name`
    /// inside `target_dir`.
    pub fn for_crate(target_dir: &Path, crate_name: &str) -> Self {
        let lib_name = crate_name.replace('-', "_");
        let file_name = if cfg!(target_os = "windows") {
            format!("{lib_name}.dll")
        } else if cfg!(target_os = "macos") {
            format!("lib{lib_name}.dylib")
        } else {
            format!("lib{lib_name}.so")
        };
        Self::new(target_dir.join(file_name))
    }

    pub fn library(&self) -> &Path {
        &self.library
    }

    pub fn debug_info(&self) -> Option<&Path> {
        self.debug_info.as_deref()
    }

    /// Library file name without its extension; staging copies are named
    /// after this.
    pub fn file_stem(&self) -> String {
        self.library
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "scene".to_string())
    }

    /// Modification time of the *source* artifact.
    ///
    /// This is what gets recorded at load time and compared by the monitor;
    /// the staging copy's mtime is meaningless (it is the copy time).
    pub fn source_mtime(&self) -> io::Result<SystemTime> {
        std::fs::metadata(&self.library)?.modified()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_names_map_to_platform_artifacts() {
        let artifact = SceneArtifact::for_crate(Path::new("/tmp/target"), "scene-starfield");
        let name = artifact.library().file_name().unwrap().to_string_lossy();
        if cfg!(target_os = "windows") {
            assert_eq!(name, "scene_starfield.dll");
        } else if cfg!(target_os = "macos") {
            assert_eq!(name, "libscene_starfield.dylib");
        } else {
            assert_eq!(name, "libscene_starfield.so");
        }
    }

    #[test]
    fn debug_info_only_on_windows() {
        let artifact = SceneArtifact::new("/tmp/target/libscene_snake.so");
        assert_eq!(artifact.debug_info().is_some(), cfg!(target_os = "windows"));
    }

    #[test]
    fn missing_artifact_reports_io_error() {
        let artifact = SceneArtifact::new("/nonexistent/never/libscene.so");
        assert!(artifact.source_mtime().is_err());
    }

    #[test]
    fn existing_artifact_reports_mtime() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("libscene_demo.so");
        std::fs::write(&path, b"not a real library").unwrap();

        let artifact = SceneArtifact::new(&path);
        assert!(artifact.source_mtime().is_ok());
        assert_eq!(artifact.file_stem(), "libscene_demo");
    }
}
