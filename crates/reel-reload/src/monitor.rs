//! The once-per-frame staleness poll.
//!
//! A single `fs::metadata` query per frame; a strictly newer mtime is
//! necessary and sufficient to trigger a reload attempt. No content hashing:
//! a `touch` without a content change costs one harmless extra reload.

use std::time::SystemTime;

use crate::artifact::SceneArtifact;

/// Returns the artifact's current mtime if it is strictly newer than `since`.
///
/// A failed stat reports "unchanged": the artifact being briefly absent is
/// the normal mid-rebuild situation, not an error.
pub fn modified_since(artifact: &SceneArtifact, since: SystemTime) -> Option<SystemTime> {
    match artifact.source_mtime() {
        Ok(mtime) if mtime > since => Some(mtime),
        Ok(_) => None,
        Err(err) => {
            log::debug!(
                "reload poll: cannot stat {}: {err}",
                artifact.library().display()
            );
            None
        }
    }
}

/// Boolean form of [`modified_since`].
pub fn changed(artifact: &SceneArtifact, since: SystemTime) -> bool {
    modified_since(artifact, since).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact_in(dir: &std::path::Path) -> SceneArtifact {
        let path = dir.join("libscene_probe.so");
        std::fs::write(&path, b"bytes").unwrap();
        SceneArtifact::new(path)
    }

    #[test]
    fn newer_mtime_reports_changed() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = artifact_in(dir.path());

        assert!(changed(&artifact, SystemTime::UNIX_EPOCH));
        let reported = modified_since(&artifact, SystemTime::UNIX_EPOCH).unwrap();
        assert_eq!(reported, artifact.source_mtime().unwrap());
    }

    #[test]
    fn unchanged_mtime_is_idempotent_under_repeated_polls() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = artifact_in(dir.path());
        let recorded = artifact.source_mtime().unwrap();

        for _ in 0..10 {
            assert!(!changed(&artifact, recorded));
        }
    }

    #[test]
    fn missing_artifact_reports_unchanged() {
        let artifact = SceneArtifact::new("/nonexistent/libscene_gone.so");
        assert!(!changed(&artifact, SystemTime::UNIX_EPOCH));
    }
}
