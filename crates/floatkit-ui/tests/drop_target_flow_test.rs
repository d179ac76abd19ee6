//! Drop target lifecycle as seen from the host: opening on drag, hovering,
//! dropping, and the fullscreen and display-mode overrides.

use floatkit_foundation::SessionId;
use floatkit_testing::prelude::*;
use floatkit_ui::{
    DropTargetAnimation, DropTargetState, FullscreenObserver, HostError, Surface,
    SystemUiSnapshot,
};

const ELEMENT: Size = Size {
    width: 50.0,
    height: 50.0,
};

fn rule_with(config: ManagerConfig) -> FloatingTestRule {
    let metrics = ScreenMetrics::new(400.0, 800.0, 1.0, 0.0).unwrap();
    let mut rule = FloatingTestRule::with_config(metrics, config);
    rule.manager_mut().set_fixed_icon_size(Size::new(60.0, 60.0));
    rule
}

fn rule() -> FloatingTestRule {
    rule_with(ManagerConfig::new())
}

fn state_event(element: ElementId, state: ElementState) -> FloatingEvent {
    FloatingEvent::ElementStateChanged { element, state }
}

fn started(animation: DropTargetAnimation) -> FloatingEvent {
    FloatingEvent::DropTargetAnimationStarted(animation)
}

fn ended(animation: DropTargetAnimation) -> FloatingEvent {
    FloatingEvent::DropTargetAnimationEnded(animation)
}

/// Drags from the resting corner down onto the still hidden icon.
fn drag_onto_target(rule: &mut FloatingTestRule, id: ElementId) -> SessionId {
    let session = rule.press(id, Point::new(25.0, 25.0));
    rule.drag(id, session, Point::new(25.0, 25.0), Point::new(200.0, 815.0), 5);
    session
}

#[test]
fn drop_removes_element_after_close() {
    let mut rule = rule();
    let id = rule.add_element(ELEMENT);
    let session = drag_onto_target(&mut rule, id);
    assert_eq!(
        rule.manager().element(id).unwrap().state(),
        ElementState::Intersecting
    );

    rule.release(id, session, Point::new(200.0, 815.0));
    assert_eq!(rule.host().last_visibility(id), Some(false));
    rule.run_until_idle(1_000);

    assert_eq!(
        rule.events(),
        vec![
            started(DropTargetAnimation::Open),
            state_event(id, ElementState::Intersecting),
            state_event(id, ElementState::Finishing),
            started(DropTargetAnimation::Close),
            ended(DropTargetAnimation::Close),
            FloatingEvent::SessionFinished(id),
            FloatingEvent::AllElementsRemoved,
        ]
    );
    assert_eq!(rule.host().vibrations(), 1);
    assert_eq!(rule.host().removals(), vec![id]);
    assert_eq!(rule.host().clicks(id), 0);
    assert_eq!(rule.manager().element_count(), 0);
    assert_eq!(rule.host().last_opacity(), Some(0.0));
}

#[test]
fn hovering_element_eases_onto_icon() {
    let mut rule = rule();
    let id = rule.add_element(ELEMENT);
    let _session = drag_onto_target(&mut rule, id);
    rule.advance_by(600);

    // Centred on the icon as it was at the last pointer move, while it was
    // still hidden at (200, 830).
    assert_eq!(rule.position(id), Point::new(175.0, 805.0));
}

#[test]
fn leaving_the_target_resumes_following_the_pointer() {
    let mut rule = rule();
    let id = rule.add_element(ELEMENT);
    let session = drag_onto_target(&mut rule, id);
    rule.drag(id, session, Point::new(200.0, 815.0), Point::new(200.0, 425.0), 3);
    rule.advance_by(400);

    assert_eq!(rule.position(id), Point::new(175.0, 400.0));
    let events = rule.events();
    assert!(events.ends_with(&[state_event(id, ElementState::Normal)]));

    rule.release(id, session, Point::new(200.0, 425.0));
    rule.run_until_idle(2_000);
    assert_eq!(rule.manager().element_count(), 1);
    assert_eq!(rule.host().removals(), Vec::<ElementId>::new());
}

#[test]
fn failing_vibrator_does_not_stop_the_drop() {
    let mut rule = rule();
    rule.host_mut().fail_vibrate(HostError::Unavailable("vibrator"));
    let id = rule.add_element(ELEMENT);
    let session = drag_onto_target(&mut rule, id);
    rule.release(id, session, Point::new(200.0, 815.0));
    rule.run_until_idle(1_000);
    assert_eq!(rule.host().vibrations(), 1);
    assert_eq!(rule.host().removals(), vec![id]);
}

#[test]
fn long_press_opens_target_after_timeout() {
    let mut rule = rule();
    let id = rule.add_element(ELEMENT);
    let session = rule.press(id, Point::new(25.0, 25.0));

    rule.advance_by(499);
    assert!(rule.events().is_empty());
    assert_eq!(rule.manager().drop_target().state(), DropTargetState::Idle);

    rule.advance_by(1);
    assert_eq!(rule.events(), vec![started(DropTargetAnimation::Open)]);
    rule.advance_by(100);
    assert!(rule.host().last_opacity().unwrap() > 0.4);

    rule.release(id, session, Point::new(25.0, 25.0));
    rule.run_until_idle(1_000);
    assert_eq!(
        rule.events(),
        vec![
            started(DropTargetAnimation::Close),
            ended(DropTargetAnimation::Close),
        ]
    );
    assert!(rule.manager().element(id).unwrap().is_draggable());
}

#[test]
fn elements_ignore_presses_while_target_closes() {
    let mut rule = rule();
    let first = rule.add_element(ELEMENT);
    let second = rule.add_element(ELEMENT);
    let session = rule.press(first, Point::new(25.0, 25.0));
    rule.advance_by(600);
    rule.release(first, session, Point::new(25.0, 25.0));
    rule.advance_by(17);

    rule.press(second, Point::new(25.0, 25.0));
    assert!(!rule.manager().element(second).unwrap().has_session());

    rule.run_until_idle(1_000);
    rule.press(second, Point::new(25.0, 25.0));
    assert!(rule.manager().element(second).unwrap().has_session());
}

#[test]
fn fullscreen_hides_and_restores_elements() {
    let mut rule = rule();
    let id = rule.add_element(ELEMENT);
    let mut observer = FullscreenObserver::new();
    let windowed = SystemUiSnapshot {
        system_ui_visible: true,
        visible_frame_top: 24.0,
    };
    let fullscreen = SystemUiSnapshot {
        system_ui_visible: false,
        visible_frame_top: 24.0,
    };

    assert!(observer.observe(windowed, rule.manager_mut()));
    assert_eq!(
        rule.events(),
        vec![
            started(DropTargetAnimation::ForceClose),
            ended(DropTargetAnimation::ForceClose),
        ]
    );

    assert!(observer.observe(fullscreen, rule.manager_mut()));
    assert_eq!(rule.host().last_visibility(id), Some(false));
    assert!(rule.events().is_empty());
    assert!(!observer.observe(fullscreen, rule.manager_mut()));

    assert!(observer.observe(windowed, rule.manager_mut()));
    assert_eq!(rule.host().last_visibility(id), Some(true));
    assert_eq!(
        rule.manager().drop_target().state(),
        DropTargetState::ForceClosed
    );
}

#[test]
fn fullscreen_mid_hover_drops_the_element() {
    let mut rule = rule();
    let id = rule.add_element(ELEMENT);
    let session = drag_onto_target(&mut rule, id);
    rule.events();

    rule.manager_mut().on_fullscreen_changed(true);
    assert_eq!(
        rule.events(),
        vec![
            state_event(id, ElementState::Finishing),
            started(DropTargetAnimation::ForceClose),
            ended(DropTargetAnimation::ForceClose),
            FloatingEvent::SessionFinished(id),
            FloatingEvent::AllElementsRemoved,
        ]
    );

    // The interrupted gesture's release no longer reaches anything.
    rule.release(id, session, Point::new(200.0, 815.0));
    assert!(rule.events().is_empty());
    assert!(rule.manager().is_idle());
}

#[test]
fn hide_always_keeps_elements_hidden() {
    let mut rule = rule_with(ManagerConfig::new().with_display_mode(DisplayMode::HideAlways));
    let id = rule.add_element(ELEMENT);
    assert_eq!(rule.host().last_visibility(id), Some(false));

    rule.press(id, Point::new(25.0, 25.0));
    assert!(!rule.manager().element(id).unwrap().has_session());
    rule.manager_mut().on_fullscreen_changed(false);
    assert!(!rule.manager().element(id).unwrap().is_visible());

    rule.manager_mut().set_display_mode(DisplayMode::ShowAlways);
    assert_eq!(rule.host().last_visibility(id), Some(true));
}

#[test]
fn detached_drop_target_stops_opening() {
    let mut rule = rule();
    let id = rule.add_element(ELEMENT);
    rule.host_mut().detach(Surface::DropTarget);

    let session = rule.press(id, Point::new(25.0, 25.0));
    rule.advance_by(600);
    assert!(rule.events().is_empty());
    assert_eq!(rule.host().last_opacity(), Some(0.0));

    rule.release(id, session, Point::new(25.0, 25.0));
    rule.run_until_idle(100);
    assert!(rule.events().is_empty());
}

#[test]
fn action_icon_grows_under_hovering_element() {
    let mut rule = rule();
    rule.manager_mut()
        .set_action_icon_size(Some(Size::new(40.0, 40.0)));
    let id = rule.add_element_with(ElementSpec::new(Size::new(60.0, 60.0)));
    assert!(rule.manager().drop_target().has_action_icon());

    let session = rule.press(id, Point::new(30.0, 30.0));
    rule.drag(id, session, Point::new(30.0, 30.0), Point::new(200.0, 815.0), 5);
    assert_eq!(
        rule.manager().element(id).unwrap().state(),
        ElementState::Intersecting
    );
    rule.advance_by(300);
    assert!((rule.manager().drop_target().scale() - 1.5).abs() < 1e-3);
    let peak = rule
        .host()
        .calls()
        .iter()
        .filter_map(|call| match call {
            HostCall::Scale { sx, .. } => Some(*sx),
            _ => None,
        })
        .fold(f32::MIN, f32::max);
    assert!(peak > 1.5);
}
