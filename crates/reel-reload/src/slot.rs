use std::time::SystemTime;

use reel_scene::RawFrame;

use crate::artifact::SceneArtifact;
use crate::loader::ModuleLoader;
use crate::monitor;

/// A scene the slot can drive.
///
/// The production implementation is [`crate::Scene`] (a loaded module plus
/// its opaque state); tests substitute an in-process fake, which keeps the
/// real type erasure confined to the dylib adapter.
pub trait ActiveScene {
    fn update(&mut self, frame: &RawFrame, delta_time: f32);

    /// Source-artifact mtime recorded when this scene's module was loaded.
    fn loaded_mtime(&self) -> SystemTime;
}

/// Owner of the (at most one) active scene.
///
/// Drives the lifecycle in strict sequence, once per frame:
/// empty slot → retry the load; live scene + newer artifact → destroy, swap,
/// init. A failed attempt never aborts anything: the slot keeps whatever it
/// had and keeps polling, because failing loads are routine while a rebuild
/// is in flight.
pub struct SceneSlot<L: ModuleLoader> {
    loader: L,
    artifact: SceneArtifact,
    scene: Option<L::Scene>,
    /// Newest artifact mtime the monitor has reported. Prevents a change
    /// whose swap failed from re-firing every frame; the next rebuild bumps
    /// the mtime again and retriggers.
    last_seen: Option<SystemTime>,
}

impl<L: ModuleLoader> SceneSlot<L> {
    /// A slot with nothing loaded. Call [`poll`](Self::poll) each frame; the
    /// first call performs the initial load.
    pub fn new(loader: L, artifact: SceneArtifact) -> Self {
        Self { loader, artifact, scene: None, last_seen: None }
    }

    pub fn artifact(&self) -> &SceneArtifact {
        &self.artifact
    }

    pub fn has_scene(&self) -> bool {
        self.scene.is_some()
    }

    /// Once-per-frame lifecycle step. Must run before this frame's
    /// [`update`](Self::update).
    pub fn poll(&mut self) {
        let Some(scene) = self.scene.as_ref() else {
            // Nothing live (first frame, or a previous attempt failed):
            // retry unconditionally. A failed attempt costs one stat.
            self.try_swap("load");
            return;
        };

        let since = self.last_seen.unwrap_or_else(|| scene.loaded_mtime());
        if let Some(mtime) = monitor::modified_since(&self.artifact, since) {
            log::info!(
                "scene artifact changed, reloading {}",
                self.artifact.library().display()
            );
            self.last_seen = Some(mtime);
            self.try_swap("reload");
        }
    }

    /// Dispatches the frame to the live scene, if any.
    pub fn update(&mut self, frame: &RawFrame, delta_time: f32) {
        if let Some(scene) = self.scene.as_mut() {
            scene.update(frame, delta_time);
        }
    }

    fn try_swap(&mut self, what: &str) {
        // Resolve the replacement module before touching the running scene:
        // a broken or half-written artifact must leave it untouched.
        let module = match self.loader.resolve(&self.artifact) {
            Ok(module) => module,
            Err(err) => {
                log::warn!("scene {what} failed: {err}");
                return;
            }
        };

        // Destroy the old state and unload its module first; only then does
        // the new module's `init` run. Two initialized scenes never coexist.
        self.scene = None;

        let scene = self.loader.start(module);
        self.last_seen = Some(scene.loaded_mtime());
        self.scene = Some(scene);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::io;
    use std::rc::Rc;
    use std::time::SystemTime;

    use reel_scene::{CommandBuffer, FrameInput};

    use super::*;
    use crate::error::LoadError;

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Init(u32),
        Update(u32),
        Destroy(u32),
    }

    struct FakeModule {
        id: u32,
        mtime: SystemTime,
    }

    struct FakeScene {
        id: u32,
        mtime: SystemTime,
        events: Rc<RefCell<Vec<Event>>>,
    }

    impl ActiveScene for FakeScene {
        fn update(&mut self, _frame: &RawFrame, _dt: f32) {
            self.events.borrow_mut().push(Event::Update(self.id));
        }

        fn loaded_mtime(&self) -> SystemTime {
            self.mtime
        }
    }

    impl Drop for FakeScene {
        fn drop(&mut self) {
            self.events.borrow_mut().push(Event::Destroy(self.id));
        }
    }

    /// Scripted loader: each `resolve` consumes the next outcome. `Ok(mtime)`
    /// produces a module whose scene reports that mtime.
    struct FakeLoader {
        events: Rc<RefCell<Vec<Event>>>,
        outcomes: VecDeque<Result<SystemTime, ()>>,
        next_id: u32,
        resolves: u32,
    }

    impl FakeLoader {
        fn new(events: Rc<RefCell<Vec<Event>>>) -> Self {
            Self { events, outcomes: VecDeque::new(), next_id: 0, resolves: 0 }
        }

        fn then_ok(mut self, mtime: SystemTime) -> Self {
            self.outcomes.push_back(Ok(mtime));
            self
        }

        fn then_fail(mut self) -> Self {
            self.outcomes.push_back(Err(()));
            self
        }
    }

    impl ModuleLoader for FakeLoader {
        type Module = FakeModule;
        type Scene = FakeScene;

        fn resolve(&mut self, artifact: &SceneArtifact) -> Result<FakeModule, LoadError> {
            self.resolves += 1;
            match self.outcomes.pop_front().unwrap_or(Err(())) {
                Ok(mtime) => {
                    self.next_id += 1;
                    Ok(FakeModule { id: self.next_id, mtime })
                }
                Err(()) => Err(LoadError::ArtifactMissing {
                    path: artifact.library().to_owned(),
                    source: io::Error::new(io::ErrorKind::NotFound, "scripted failure"),
                }),
            }
        }

        fn start(&mut self, module: FakeModule) -> FakeScene {
            self.events.borrow_mut().push(Event::Init(module.id));
            FakeScene { id: module.id, mtime: module.mtime, events: Rc::clone(&self.events) }
        }
    }

    /// An artifact whose backing file exists, so the monitor has something to
    /// stat. Returns the tempdir too, keeping the file alive.
    fn real_artifact() -> (tempfile::TempDir, SceneArtifact) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("libscene_fake.so");
        std::fs::write(&path, b"bytes").unwrap();
        (dir, SceneArtifact::new(path))
    }

    fn drive_frame<L: ModuleLoader>(slot: &mut SceneSlot<L>) {
        slot.poll();
        let mut buffer = CommandBuffer::new();
        let raw = buffer.raw_frame(FrameInput::default());
        slot.update(&raw, 1.0 / 60.0);
    }

    // ── init/destroy pairing ──────────────────────────────────────────────

    #[test]
    fn every_load_pairs_one_init_with_one_destroy_in_order() {
        let (_dir, artifact) = real_artifact();
        let events = Rc::new(RefCell::new(Vec::new()));

        // First load records an ancient mtime so the next poll sees the real
        // file as newer and triggers exactly one reload; the reload records
        // the real mtime so polling settles.
        let loader = FakeLoader::new(Rc::clone(&events))
            .then_ok(SystemTime::UNIX_EPOCH)
            .then_ok(artifact.source_mtime().unwrap());
        let mut slot = SceneSlot::new(loader, artifact);

        drive_frame(&mut slot); // load + update scene 1
        drive_frame(&mut slot); // reload (destroy 1, init 2) + update scene 2
        drive_frame(&mut slot); // steady state
        drop(slot); // shutdown destroys scene 2

        assert_eq!(
            *events.borrow(),
            vec![
                Event::Init(1),
                Event::Update(1),
                Event::Destroy(1),
                Event::Init(2),
                Event::Update(2),
                Event::Update(2),
                Event::Destroy(2),
            ]
        );
    }

    #[test]
    fn no_update_reaches_a_stale_scene_after_a_detected_change() {
        let (_dir, artifact) = real_artifact();
        let events = Rc::new(RefCell::new(Vec::new()));

        let loader = FakeLoader::new(Rc::clone(&events))
            .then_ok(SystemTime::UNIX_EPOCH)
            .then_ok(artifact.source_mtime().unwrap());
        let mut slot = SceneSlot::new(loader, artifact);

        drive_frame(&mut slot);
        drive_frame(&mut slot);

        // Scene 1 must not receive an update after its destroy.
        let events = events.borrow();
        let destroy_1 = events.iter().position(|e| *e == Event::Destroy(1)).unwrap();
        assert!(events[destroy_1..].iter().all(|e| *e != Event::Update(1)));
    }

    // ── monitor interaction ───────────────────────────────────────────────

    #[test]
    fn unchanged_artifact_never_triggers_a_reload() {
        let (_dir, artifact) = real_artifact();
        let events = Rc::new(RefCell::new(Vec::new()));

        // Loaded mtime matches the file on disk: nothing to do.
        let loader =
            FakeLoader::new(Rc::clone(&events)).then_ok(artifact.source_mtime().unwrap());
        let mut slot = SceneSlot::new(loader, artifact);

        for _ in 0..5 {
            drive_frame(&mut slot);
        }

        let inits = events.borrow().iter().filter(|e| matches!(e, Event::Init(_))).count();
        assert_eq!(inits, 1);
    }

    #[test]
    fn a_change_is_acted_on_once_even_when_the_swap_fails() {
        let (_dir, artifact) = real_artifact();
        let events = Rc::new(RefCell::new(Vec::new()));

        // Initial load, then one failed swap attempt; the same mtime change
        // must not trigger further resolves.
        let loader = FakeLoader::new(Rc::clone(&events))
            .then_ok(SystemTime::UNIX_EPOCH)
            .then_fail();
        let mut slot = SceneSlot::new(loader, artifact);

        for _ in 0..5 {
            drive_frame(&mut slot);
        }

        assert_eq!(slot.loader.resolves, 2); // initial load + one swap attempt
    }

    // ── failure handling ──────────────────────────────────────────────────

    #[test]
    fn failed_swap_keeps_the_previous_scene_running() {
        let (_dir, artifact) = real_artifact();
        let events = Rc::new(RefCell::new(Vec::new()));

        let loader = FakeLoader::new(Rc::clone(&events))
            .then_ok(SystemTime::UNIX_EPOCH)
            .then_fail();
        let mut slot = SceneSlot::new(loader, artifact);

        drive_frame(&mut slot); // load scene 1
        drive_frame(&mut slot); // change detected, swap fails
        drive_frame(&mut slot); // scene 1 still updating

        assert!(slot.has_scene());
        assert_eq!(
            *events.borrow(),
            vec![
                Event::Init(1),
                Event::Update(1),
                Event::Update(1),
                Event::Update(1),
            ]
        );
    }

    #[test]
    fn missing_artifact_at_startup_retries_every_frame_without_updates() {
        let (_dir, artifact) = real_artifact();
        let events = Rc::new(RefCell::new(Vec::new()));

        let loader = FakeLoader::new(Rc::clone(&events))
            .then_fail()
            .then_fail()
            .then_ok(artifact.source_mtime().unwrap());
        let mut slot = SceneSlot::new(loader, artifact);

        drive_frame(&mut slot); // attempt 1 fails; zero updates
        assert!(!slot.has_scene());
        drive_frame(&mut slot); // attempt 2 fails
        assert!(events.borrow().is_empty());

        drive_frame(&mut slot); // attempt 3 succeeds
        assert!(slot.has_scene());
        assert_eq!(*events.borrow(), vec![Event::Init(1), Event::Update(1)]);
    }
}
