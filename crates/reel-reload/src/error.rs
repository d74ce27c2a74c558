use std::fmt;
use std::io;
use std::path::PathBuf;

/// A failed load or reload attempt.
///
/// Every variant is recoverable: the slot keeps whatever scene it had (or
/// none) and polling continues. Build artifacts are routinely absent or
/// half-written while `cargo` is mid-rebuild, so none of these abort the
/// host.
#[derive(Debug)]
pub enum LoadError {
    /// The source artifact could not be stat'ed (absent, permissions).
    ArtifactMissing { path: PathBuf, source: io::Error },
    /// Copying the artifact into the staging directory failed.
    StagingIo { path: PathBuf, source: io::Error },
    /// The staged library failed to load, or did not export the entry table.
    LoadFailure { path: PathBuf, source: libloading::Error },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::ArtifactMissing { path, source } => {
                write!(f, "scene artifact missing at {}: {}", path.display(), source)
            }
            LoadError::StagingIo { path, source } => {
                write!(f, "staging copy to {} failed: {}", path.display(), source)
            }
            LoadError::LoadFailure { path, source } => {
                write!(f, "failed to load scene module {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::ArtifactMissing { source, .. } => Some(source),
            LoadError::StagingIo { source, .. } => Some(source),
            LoadError::LoadFailure { source, .. } => Some(source),
        }
    }
}
