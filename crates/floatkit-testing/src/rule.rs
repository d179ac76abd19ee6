use floatkit_core::{Clock, ManualClock};
use floatkit_foundation::{PointerEvent, PointerPhase, SessionId};
use floatkit_geometry::{Point, ScreenMetrics, Size};
use floatkit_ui::{ElementId, ElementSpec, FloatingEvent, FloatingManager, ManagerConfig};

use crate::RecordingHost;

/// Headless harness driving a [`FloatingManager`] on a manual clock.
///
/// Time only moves through [`advance_by`](Self::advance_by), which stops at
/// every due tick on the way so animations see the same frame cadence they
/// would on a real event loop.
pub struct FloatingTestRule {
    manager: FloatingManager<RecordingHost, ManualClock>,
    clock: ManualClock,
}

impl FloatingTestRule {
    pub fn new(metrics: ScreenMetrics) -> Self {
        Self::with_config(metrics, ManagerConfig::new())
    }

    pub fn with_config(metrics: ScreenMetrics, config: ManagerConfig) -> Self {
        let clock = ManualClock::new(1_000);
        let manager = FloatingManager::new(RecordingHost::new(), clock.clone(), metrics, config)
            .expect("test metrics must be valid");
        Self { manager, clock }
    }

    pub fn manager(&self) -> &FloatingManager<RecordingHost, ManualClock> {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut FloatingManager<RecordingHost, ManualClock> {
        &mut self.manager
    }

    pub fn host(&self) -> &RecordingHost {
        self.manager.host()
    }

    pub fn host_mut(&mut self) -> &mut RecordingHost {
        self.manager.host_mut()
    }

    pub fn now(&self) -> u64 {
        self.clock.now_millis()
    }

    pub fn events(&mut self) -> Vec<FloatingEvent> {
        self.manager.drain_events()
    }

    pub fn add_element(&mut self, size: Size) -> ElementId {
        self.add_element_with(ElementSpec::new(size))
    }

    pub fn add_element_with(&mut self, spec: ElementSpec) -> ElementId {
        self.manager
            .add_element(spec)
            .expect("element must fit the test screen")
    }

    pub fn position(&self, id: ElementId) -> Point {
        self.manager
            .element(id)
            .map(|element| element.position())
            .unwrap_or_else(|| panic!("element {id} is not attached"))
    }

    /// Runs whatever is due right now.
    pub fn pump(&mut self) -> usize {
        self.manager.run_due_ticks()
    }

    /// Moves time forward by `millis`, running every tick that falls due.
    pub fn advance_by(&mut self, millis: u64) {
        let target = self.now() + millis;
        self.pump();
        while let Some(due) = self.manager.next_tick_due() {
            if due > target {
                break;
            }
            self.clock.set(due.max(self.now()));
            self.pump();
        }
        self.clock.set(target);
        self.pump();
    }

    /// Advances frame by frame until nothing is scheduled. Panics after
    /// `limit_millis` of simulated time.
    pub fn run_until_idle(&mut self, limit_millis: u64) {
        let deadline = self.now() + limit_millis;
        self.pump();
        while let Some(due) = self.manager.next_tick_due() {
            if due > deadline {
                panic!("still animating after {limit_millis}ms");
            }
            self.clock.set(due.max(self.now()));
            self.pump();
        }
    }

    /// Presses at `screen` and returns the new session id.
    pub fn press(&mut self, id: ElementId, screen: Point) -> SessionId {
        let origin = self.position(id);
        let local = Point::new(screen.x - origin.x, screen.y - origin.y);
        let event = PointerEvent::down(screen, local, self.now());
        self.manager.on_pointer_event(id, event);
        self.pump();
        event.session
    }

    pub fn move_to(&mut self, id: ElementId, session: SessionId, screen: Point) {
        self.send(id, PointerPhase::Move, session, screen);
    }

    pub fn release(&mut self, id: ElementId, session: SessionId, screen: Point) {
        self.send(id, PointerPhase::Up, session, screen);
    }

    pub fn cancel(&mut self, id: ElementId, session: SessionId, screen: Point) {
        self.send(id, PointerPhase::Cancel, session, screen);
    }

    fn send(&mut self, id: ElementId, phase: PointerPhase, session: SessionId, screen: Point) {
        let event = PointerEvent::follow(phase, screen, self.now(), session);
        self.manager.on_pointer_event(id, event);
        self.pump();
    }

    /// Drags from `from` to `to` in `steps` moves one frame apart.
    pub fn drag(&mut self, id: ElementId, session: SessionId, from: Point, to: Point, steps: u32) {
        let steps = steps.max(1);
        for step in 1..=steps {
            let t = step as f32 / steps as f32;
            let point = Point::new(from.x + (to.x - from.x) * t, from.y + (to.y - from.y) * t);
            self.advance_by(floatkit_core::FRAME_INTERVAL_MILLIS);
            self.move_to(id, session, point);
        }
    }
}
