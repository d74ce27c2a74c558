//! The scene trait and the one adapter where type erasure happens.
//!
//! A scene module crosses a real ABI boundary, so *some* erasure to
//! `*mut c_void` is unavoidable; [`export_scene!`] is the single place it is
//! allowed to live. Scene crates implement [`SceneBehavior`] on an owned
//! state type and never write `unsafe` themselves.

use crate::frame::Frame;

/// Behavior contract implemented by every scene.
///
/// All scene state must live inside `Self`. A module-level static would
/// survive in the *old* module's memory across a reload and dangle once that
/// module is unloaded.
pub trait SceneBehavior: Sized {
    /// Builds the scene's initial state. Called exactly once per module load.
    fn init() -> Self;

    /// Advances the scene by `dt` seconds and records this frame's drawing
    /// into `frame`.
    fn update(&mut self, frame: &mut Frame<'_>, dt: f32);
}

/// Exports a [`SceneBehavior`] implementation as the module entry point.
///
/// Expands to the `get_scene_functions` symbol the loader resolves, plus the
/// three `extern "C"` shims backing the returned table:
/// - `init` boxes a fresh `Self` and leaks it as the opaque state handle
/// - `update` reborrows the handle and dispatches to the trait
/// - `destroy` reconstitutes the box, running `Drop`
///
/// Invoke once, at the scene crate root:
///
/// ```ignore
/// struct MyScene { /* ... */ }
///
/// impl reel_scene::SceneBehavior for MyScene { /* ... */ }
///
/// reel_scene::export_scene!(MyScene);
/// ```
#[macro_export]
macro_rules! export_scene {
    ($scene:ty) => {
        #[unsafe(no_mangle)]
        pub unsafe extern "C" fn get_scene_functions() -> $crate::SceneFns {
            unsafe extern "C" fn scene_init() -> *mut ::core::ffi::c_void {
                let state: ::std::boxed::Box<$scene> =
                    ::std::boxed::Box::new(<$scene as $crate::SceneBehavior>::init());
                ::std::boxed::Box::into_raw(state) as *mut ::core::ffi::c_void
            }

            unsafe extern "C" fn scene_update(
                state: *mut ::core::ffi::c_void,
                frame: *const $crate::RawFrame,
                delta_time: f32,
            ) {
                if state.is_null() || frame.is_null() {
                    return;
                }
                let state = unsafe { &mut *(state as *mut $scene) };
                let raw = unsafe { &*frame };
                let mut frame = unsafe { $crate::Frame::from_raw(raw) };
                <$scene as $crate::SceneBehavior>::update(state, &mut frame, delta_time);
            }

            unsafe extern "C" fn scene_destroy(state: *mut ::core::ffi::c_void) {
                if state.is_null() {
                    return;
                }
                drop(unsafe { ::std::boxed::Box::from_raw(state as *mut $scene) });
            }

            $crate::SceneFns {
                init: scene_init,
                update: scene_update,
                destroy: scene_destroy,
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use crate::{Color, CommandBuffer, Frame, FrameInput, SceneBehavior};

    thread_local! {
        static LIVE: Cell<u32> = const { Cell::new(0) };
        static UPDATES: Cell<u32> = const { Cell::new(0) };
    }

    struct Probe;

    impl SceneBehavior for Probe {
        fn init() -> Self {
            LIVE.with(|l| l.set(l.get() + 1));
            Probe
        }

        fn update(&mut self, frame: &mut Frame<'_>, _dt: f32) {
            UPDATES.with(|u| u.set(u.get() + 1));
            frame.clear(Color::BLACK);
        }
    }

    impl Drop for Probe {
        fn drop(&mut self) {
            LIVE.with(|l| l.set(l.get() - 1));
        }
    }

    crate::export_scene!(Probe);

    #[test]
    fn generated_table_drives_the_full_lifecycle() {
        let fns = unsafe { get_scene_functions() };

        let state = unsafe { (fns.init)() };
        assert!(!state.is_null());
        assert_eq!(LIVE.with(Cell::get), 1);

        let mut buffer = CommandBuffer::new();
        let raw = buffer.raw_frame(FrameInput::default());
        unsafe { (fns.update)(state, &raw, 1.0 / 60.0) };
        assert_eq!(UPDATES.with(Cell::get), 1);
        assert_eq!(buffer.commands().len(), 1);

        unsafe { (fns.destroy)(state) };
        assert_eq!(LIVE.with(Cell::get), 0);
    }

    #[test]
    fn shims_tolerate_null_arguments() {
        let fns = unsafe { get_scene_functions() };
        unsafe { (fns.update)(core::ptr::null_mut(), core::ptr::null(), 0.0) };
        unsafe { (fns.destroy)(core::ptr::null_mut()) };
    }
}
