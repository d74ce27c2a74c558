//! Scene hot-reload subsystem.
//!
//! Lets the host load a scene from a `cdylib`, detect when the artifact is
//! rebuilt on disk, and swap in the new build without restarting the process
//! or losing the window/GPU context.
//!
//! Pieces, leaf-first:
//! - [`SceneArtifact`]: where the compiled module (and its debug-info
//!   companion, on platforms that have one) lives, plus its mtime
//! - [`SceneModule`]: an owned, loaded library with the resolved entry table
//! - [`SceneLoader`]: copy-to-staging loader (a concurrent `cargo build`
//!   must never contend with the file the process has mapped)
//! - [`monitor`]: the once-per-frame mtime poll
//! - [`SceneSlot`]: the host-facing state machine driving
//!   load/check/update/destroy in strict sequence
//!
//! Everything here runs on the host loop's single thread; no operation
//! overlaps another, and a reload runs to completion before the next
//! `update`.

mod artifact;
mod error;
mod loader;
pub mod monitor;
mod module;
mod slot;

pub use artifact::SceneArtifact;
pub use error::LoadError;
pub use loader::{ModuleLoader, SceneLoader};
pub use module::{Scene, SceneModule};
pub use slot::{ActiveScene, SceneSlot};
