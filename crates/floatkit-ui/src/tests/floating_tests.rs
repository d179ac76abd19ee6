use super::*;
use crate::test_support::{metrics, TestHost};
use floatkit_core::FRAME_INTERVAL_MILLIS;

struct Rig {
    element: FloatingElement,
    scheduler: AnimationScheduler,
    host: TestHost,
    now: u64,
    session: SessionId,
}

impl Rig {
    fn new(width: f32, height: f32, size: Size) -> Self {
        Self::with_metrics(metrics(width, height), size)
    }

    fn with_metrics(metrics: ScreenMetrics, size: Size) -> Self {
        let element = FloatingElement::new(
            ElementId(1),
            ElementSpec::new(size),
            metrics,
            FloatingConfig::default(),
        )
        .unwrap();
        Self {
            element,
            scheduler: AnimationScheduler::new(),
            host: TestHost::default(),
            now: 1_000,
            session: 0,
        }
    }

    fn down(&mut self, screen: Point) -> bool {
        let origin = self.element.position();
        let local = Point::new(screen.x - origin.x, screen.y - origin.y);
        let event = PointerEvent::down(screen, local, self.now);
        self.session = event.session;
        self.element
            .pointer_down(&event, self.now, &mut self.scheduler, &mut self.host)
    }

    fn drag(&mut self, screen: Point) -> MoveOutcome {
        let event = PointerEvent::follow(PointerPhase::Move, screen, self.now, self.session);
        self.element.pointer_move(&event)
    }

    fn release(&mut self, phase: PointerPhase, screen: Point) -> ReleaseOutcome {
        let event = PointerEvent::follow(phase, screen, self.now, self.session);
        self.element
            .pointer_release(&event, self.now, &mut self.scheduler, &mut self.host)
    }

    fn up(&mut self, screen: Point) -> ReleaseOutcome {
        self.release(PointerPhase::Up, screen)
    }

    fn advance(&mut self, millis: u64) {
        let target = self.now + millis;
        while let Some(due) = self.scheduler.next_due() {
            if due > target {
                break;
            }
            self.now = due.max(self.now);
            while let Some(tick) = self.scheduler.pop_due(self.now) {
                self.element
                    .on_tick(tick, self.now, &mut self.scheduler, &mut self.host);
            }
        }
        self.now = target;
    }

    fn channel(&self) -> AnimationChannel {
        AnimationChannel::Element(self.element.id())
    }
}

#[test]
fn new_element_rests_in_top_left_corner() {
    let rig = Rig::new(400.0, 800.0, Size::new(50.0, 50.0));
    assert_eq!(rig.element.position(), Point::new(0.0, 0.0));
    assert_eq!(rig.element.state(), ElementState::Normal);
    assert!(!rig.element.is_on_right());

    let with_status_bar = ScreenMetrics::new(400.0, 800.0, 1.0, 24.0).unwrap();
    let rig = Rig::with_metrics(with_status_bar, Size::new(50.0, 50.0));
    assert_eq!(rig.element.position(), Point::new(0.0, 24.0));
}

#[test]
fn release_left_of_midline_snaps_left() {
    let mut rig = Rig::new(400.0, 800.0, Size::ZERO);
    assert!(rig.down(Point::ZERO));
    rig.advance(100);
    assert_eq!(rig.drag(Point::new(50.0, 400.0)), MoveOutcome::Accepted);
    rig.advance(FRAME_INTERVAL_MILLIS);
    assert_eq!(rig.element.position(), Point::new(50.0, 400.0));

    rig.advance(100);
    assert_eq!(rig.up(Point::new(50.0, 400.0)), ReleaseOutcome::Settling);
    rig.advance(1_000);

    assert_eq!(rig.element.position(), Point::new(0.0, 400.0));
    assert!(!rig.element.is_on_right());
    assert!(!rig.element.is_settling());
    assert!(rig.scheduler.is_idle());
}

#[test]
fn release_right_of_midline_snaps_right() {
    let mut rig = Rig::new(400.0, 800.0, Size::ZERO);
    rig.down(Point::ZERO);
    rig.advance(100);
    rig.drag(Point::new(350.0, 400.0));
    rig.advance(100);
    assert_eq!(rig.up(Point::new(350.0, 400.0)), ReleaseOutcome::Settling);
    rig.advance(1_000);

    assert_eq!(rig.element.position(), Point::new(400.0, 400.0));
    assert!(rig.element.is_on_right());
}

#[test]
fn fast_fling_crosses_midline_and_overshoots() {
    let mut rig = Rig::new(400.0, 800.0, Size::ZERO);
    rig.down(Point::ZERO);
    for x in [60.0, 90.0, 120.0, 150.0] {
        rig.advance(10);
        rig.drag(Point::new(x, 400.0));
    }
    rig.advance(10);
    assert_eq!(rig.up(Point::new(150.0, 400.0)), ReleaseOutcome::Settling);
    rig.host.positions.clear();
    rig.advance(1_000);

    assert_eq!(rig.element.position(), Point::new(400.0, 400.0));
    let furthest = rig.host.positions.iter().map(|(_, x, _)| *x).max().unwrap();
    assert!(furthest > 400, "expected overshoot past the edge, got {furthest}");
}

#[test]
fn tracked_target_uses_movement_limits_and_rest_uses_position_limits() {
    let mut rig = Rig::new(400.0, 600.0, Size::new(100.0, 100.0));
    let limits = rig.element.limits();
    assert_eq!(limits.position_rect(), Rect::from_ltrb(0.0, 0.0, 300.0, 500.0));
    assert_eq!(rig.element.position(), Point::ZERO);

    rig.down(Point::ZERO);
    rig.advance(100);
    rig.drag(Point::new(400.0, 600.0));
    rig.advance(FRAME_INTERVAL_MILLIS);
    assert_eq!(rig.element.position(), Point::new(400.0, 600.0));

    rig.advance(100);
    rig.drag(Point::new(900.0, 900.0));
    rig.advance(FRAME_INTERVAL_MILLIS);
    assert_eq!(rig.element.position(), Point::new(500.0, 700.0));

    rig.advance(100);
    rig.up(Point::new(900.0, 900.0));
    rig.advance(1_000);
    assert_eq!(rig.element.position(), Point::new(300.0, 500.0));
}

#[test]
fn pointer_down_cancels_running_edge_snap() {
    let mut rig = Rig::new(400.0, 800.0, Size::ZERO);
    rig.down(Point::ZERO);
    rig.advance(100);
    rig.drag(Point::new(300.0, 400.0));
    rig.advance(100);
    rig.up(Point::new(300.0, 400.0));
    rig.advance(50);
    assert!(rig.scheduler.is_running(rig.channel(), AnimationCode::EdgeSnap));

    let paused = rig.element.position();
    assert!(rig.down(paused));
    assert!(!rig.scheduler.is_running(rig.channel(), AnimationCode::EdgeSnap));
    assert!(rig.scheduler.is_running(rig.channel(), AnimationCode::Track));
    assert!(!rig.element.is_settling());

    rig.advance(600);
    assert_eq!(rig.element.position(), paused);
}

#[test]
fn tap_performs_click_without_motion() {
    let mut rig = Rig::new(400.0, 800.0, Size::new(50.0, 50.0));
    rig.down(Point::new(10.0, 10.0));
    assert!(!rig.element.is_move_accepted());
    assert_eq!(rig.host.element_scales.last(), Some(&(ElementId(1), 0.9)));

    rig.advance(50);
    assert_eq!(rig.drag(Point::new(13.0, 12.0)), MoveOutcome::BelowThreshold);
    assert_eq!(rig.up(Point::new(13.0, 12.0)), ReleaseOutcome::Tap);

    assert_eq!(rig.host.clicks, vec![ElementId(1)]);
    assert_eq!(rig.host.element_scales.last(), Some(&(ElementId(1), 1.0)));
    assert_eq!(rig.element.position(), Point::ZERO);
    assert!(rig.scheduler.is_idle());
}

#[test]
fn cancel_before_threshold_is_not_a_click() {
    let mut rig = Rig::new(400.0, 800.0, Size::new(50.0, 50.0));
    rig.down(Point::new(10.0, 10.0));
    assert_eq!(
        rig.release(PointerPhase::Cancel, Point::new(10.0, 10.0)),
        ReleaseOutcome::Cancelled
    );
    assert!(rig.host.clicks.is_empty());
}

#[test]
fn move_threshold_scales_with_density() {
    let dense = ScreenMetrics::new(400.0, 800.0, 2.0, 0.0).unwrap();
    let mut rig = Rig::with_metrics(dense, Size::new(50.0, 50.0));
    rig.down(Point::new(10.0, 10.0));
    assert_eq!(rig.drag(Point::new(25.0, 10.0)), MoveOutcome::BelowThreshold);
    assert_eq!(rig.drag(Point::new(26.0, 10.0)), MoveOutcome::Accepted);
    // Once accepted, small moves keep tracking.
    assert_eq!(rig.drag(Point::new(10.0, 10.0)), MoveOutcome::Accepted);
}

#[test]
fn samples_from_another_session_are_ignored() {
    let mut rig = Rig::new(400.0, 800.0, Size::new(50.0, 50.0));
    rig.down(Point::new(10.0, 10.0));
    let stale = rig.session + 1;

    let moved = PointerEvent::follow(PointerPhase::Move, Point::new(200.0, 200.0), rig.now, stale);
    assert_eq!(rig.element.pointer_move(&moved), MoveOutcome::Ignored);

    let up = PointerEvent::follow(PointerPhase::Up, Point::new(200.0, 200.0), rig.now, stale);
    let outcome = rig
        .element
        .pointer_release(&up, rig.now, &mut rig.scheduler, &mut rig.host);
    assert_eq!(outcome, ReleaseOutcome::Ignored);
    assert!(rig.element.has_session());
    assert!(!rig.element.is_move_accepted());
}

#[test]
fn hover_eases_onto_icon_center() {
    let mut rig = Rig::new(400.0, 800.0, Size::new(50.0, 50.0));
    rig.down(Point::new(25.0, 25.0));
    rig.advance(100);
    rig.drag(Point::new(125.0, 425.0));
    rig.advance(FRAME_INTERVAL_MILLIS);
    assert_eq!(rig.element.position(), Point::new(100.0, 400.0));

    assert!(rig.element.hover(Point::new(200.0, 700.0)));
    assert!(!rig.element.hover(Point::new(200.0, 700.0)));
    assert_eq!(rig.element.state(), ElementState::Intersecting);

    rig.advance(100);
    let midway = rig.element.position();
    assert_ne!(midway, Point::new(100.0, 400.0));
    assert_ne!(midway, Point::new(175.0, 675.0));

    rig.advance(300);
    assert_eq!(rig.element.position(), Point::new(175.0, 675.0));

    assert!(rig.element.unhover());
    assert_eq!(rig.element.state(), ElementState::Normal);
    rig.advance(400);
    assert_eq!(rig.element.position(), Point::new(100.0, 400.0));
}

#[test]
fn finishing_is_terminal() {
    let mut rig = Rig::new(400.0, 800.0, Size::new(50.0, 50.0));
    rig.down(Point::new(25.0, 25.0));
    rig.advance(100);
    rig.drag(Point::new(125.0, 425.0));
    rig.element.hover(Point::new(200.0, 700.0));

    assert!(rig.element.finish(&mut rig.scheduler, &mut rig.host));
    assert_eq!(rig.element.state(), ElementState::Finishing);
    assert!(!rig.element.is_visible());
    assert_eq!(rig.host.visibility.last(), Some(&(ElementId(1), false)));
    assert!(rig.scheduler.is_idle());

    assert!(!rig.element.finish(&mut rig.scheduler, &mut rig.host));
    assert!(!rig.element.unhover());
    assert!(!rig.element.hover(Point::ZERO));
    assert!(!rig.down(Point::new(25.0, 25.0)));
    assert_eq!(rig.element.state(), ElementState::Finishing);
}

#[test]
fn hiding_mid_drag_settles_to_edge() {
    let mut rig = Rig::new(400.0, 800.0, Size::new(50.0, 50.0));
    rig.down(Point::new(25.0, 25.0));
    rig.advance(100);
    rig.drag(Point::new(325.0, 425.0));
    rig.advance(FRAME_INTERVAL_MILLIS);
    assert_eq!(rig.element.position(), Point::new(300.0, 400.0));

    rig.element
        .set_visible(false, &mut rig.scheduler, &mut rig.host);
    assert_eq!(rig.element.position(), Point::new(350.0, 400.0));
    assert!(!rig.element.has_session());
    assert!(rig.scheduler.is_idle());
    assert_eq!(rig.host.visibility.last(), Some(&(ElementId(1), false)));
    assert_eq!(rig.host.element_scales.last(), Some(&(ElementId(1), 1.0)));
}

#[test]
fn screen_change_rescales_rest_position() {
    let mut rig = Rig::new(400.0, 800.0, Size::new(50.0, 50.0));
    rig.down(Point::new(25.0, 25.0));
    rig.advance(100);
    rig.drag(Point::new(25.0, 775.0));
    rig.advance(400);
    rig.up(Point::new(25.0, 775.0));
    rig.advance(1_000);
    assert_eq!(rig.element.position(), Point::new(0.0, 750.0));

    rig.element
        .on_screen_changed(metrics(800.0, 400.0), &mut rig.scheduler, &mut rig.host)
        .unwrap();
    assert_eq!(rig.element.position(), Point::new(0.0, 350.0));
    assert_eq!(
        rig.element.limits().position_rect(),
        Rect::from_ltrb(0.0, 0.0, 750.0, 350.0)
    );
    assert_eq!(rig.host.last_position(ElementId(1)), Some((0, 350)));
}

#[test]
fn degenerate_screen_keeps_previous_limits() {
    let mut rig = Rig::new(400.0, 800.0, Size::new(50.0, 50.0));
    let before = rig.element.limits();
    let broken = ScreenMetrics {
        width: 0.0,
        height: 800.0,
        density: 1.0,
        status_bar_inset: 0.0,
    };
    let result = rig
        .element
        .on_screen_changed(broken, &mut rig.scheduler, &mut rig.host);
    assert!(matches!(result, Err(GeometryError::DegenerateScreen { .. })));
    assert_eq!(rig.element.limits(), before);
    assert_eq!(rig.element.position(), Point::ZERO);
}
