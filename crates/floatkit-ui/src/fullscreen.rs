//! Fullscreen detection from the host's system UI state.

/// Receives fullscreen transitions.
pub trait FullscreenListener {
    fn on_fullscreen_changed(&mut self, is_fullscreen: bool);
}

/// What the host knows about the system bars after a layout pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SystemUiSnapshot {
    pub system_ui_visible: bool,
    /// Top of the visible window frame in screen pixels.
    pub visible_frame_top: f32,
}

impl SystemUiSnapshot {
    /// Hidden system UI, or a visible frame reaching the top edge, means
    /// another app went fullscreen.
    pub fn is_fullscreen(&self) -> bool {
        !self.system_ui_visible || self.visible_frame_top == 0.0
    }
}

/// Turns layout and system UI callbacks into fullscreen transitions,
/// forwarding only changes.
#[derive(Debug, Default)]
pub struct FullscreenObserver {
    last: Option<bool>,
}

impl FullscreenObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_fullscreen(&self) -> Option<bool> {
        self.last
    }

    /// Records `snapshot` and notifies `listener` when the fullscreen flag
    /// differs from the last one seen. The first snapshot always notifies.
    pub fn observe<L: FullscreenListener + ?Sized>(
        &mut self,
        snapshot: SystemUiSnapshot,
        listener: &mut L,
    ) -> bool {
        let fullscreen = snapshot.is_fullscreen();
        if self.last == Some(fullscreen) {
            return false;
        }
        log::debug!("fullscreen {:?} -> {fullscreen}", self.last);
        self.last = Some(fullscreen);
        listener.on_fullscreen_changed(fullscreen);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<bool>);

    impl FullscreenListener for Recorder {
        fn on_fullscreen_changed(&mut self, is_fullscreen: bool) {
            self.0.push(is_fullscreen);
        }
    }

    fn snapshot(system_ui_visible: bool, visible_frame_top: f32) -> SystemUiSnapshot {
        SystemUiSnapshot {
            system_ui_visible,
            visible_frame_top,
        }
    }

    #[test]
    fn fullscreen_when_system_ui_hidden_or_frame_at_top() {
        assert!(snapshot(false, 24.0).is_fullscreen());
        assert!(snapshot(true, 0.0).is_fullscreen());
        assert!(!snapshot(true, 24.0).is_fullscreen());
    }

    #[test]
    fn observer_forwards_only_changes() {
        let mut observer = FullscreenObserver::new();
        let mut recorder = Recorder::default();

        assert!(observer.observe(snapshot(true, 24.0), &mut recorder));
        assert!(!observer.observe(snapshot(true, 24.0), &mut recorder));
        assert!(observer.observe(snapshot(false, 24.0), &mut recorder));
        assert!(!observer.observe(snapshot(true, 0.0), &mut recorder));
        assert!(observer.observe(snapshot(true, 48.0), &mut recorder));

        assert_eq!(recorder.0, vec![false, true, false]);
        assert_eq!(observer.is_fullscreen(), Some(false));
    }
}
