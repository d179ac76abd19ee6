//! Replays a scripted session against a host that only logs what it is
//! asked to draw, stepping a manual clock one frame at a time.
//!
//! Usage: `bubble-demo [WIDTHxHEIGHT[@DENSITY]]`, defaulting to a
//! 1080x1920 screen at density 3.

use anyhow::{bail, Context, Result};
use floatkit_core::{Clock, ManualClock, FRAME_INTERVAL_MILLIS};
use floatkit_foundation::{PointerEvent, PointerPhase, SessionId};
use floatkit_geometry::{Point, ScreenMetrics, Size};
use floatkit_ui::constants::SHAPE_RECTANGLE;
use floatkit_ui::{
    ElementId, ElementSpec, FloatingEvent, FloatingHost, FloatingManager, FullscreenObserver,
    HostError, ManagerConfig, Surface, SystemUiSnapshot,
};

/// Host that renders nothing.
struct LogHost;

impl FloatingHost for LogHost {
    fn apply_position(&mut self, element: ElementId, x: i32, y: i32) {
        log::debug!("{element} at ({x}, {y})");
    }

    fn apply_element_scale(&mut self, element: ElementId, scale: f32) {
        log::debug!("{element} scaled to {scale}");
    }

    fn set_element_visible(&mut self, element: ElementId, visible: bool) {
        log::info!("{element} {}", if visible { "shown" } else { "hidden" });
    }

    fn perform_click(&mut self, element: ElementId) {
        log::info!("{element} clicked");
    }

    fn remove_element(&mut self, element: ElementId) {
        log::info!("{element} removed from window");
    }

    fn apply_opacity(&mut self, alpha: f32) {
        log::trace!("drop target alpha {alpha:.2}");
    }

    fn apply_translation(&mut self, dx: f32, dy: f32) {
        log::trace!("drop target offset ({dx:.1}, {dy:.1})");
    }

    fn apply_scale(&mut self, sx: f32, _sy: f32) {
        log::trace!("drop target scale {sx:.2}");
    }

    fn vibrate(&mut self, millis: u64) -> Result<(), HostError> {
        log::info!("bzz ({millis}ms)");
        Ok(())
    }

    fn is_attached(&self, _surface: Surface) -> bool {
        true
    }
}

type Manager = FloatingManager<LogHost, ManualClock>;

enum Step {
    /// Press the centre of the element wherever it is.
    Press(ElementId),
    /// Move to the press point plus an offset.
    MoveBy(Point),
    /// Move onto the drop target icon.
    MoveToTarget,
    Release,
    Fullscreen(bool),
}

struct Cue {
    at_millis: u64,
    step: Step,
}

fn cue(at_millis: u64, step: Step) -> Cue {
    Cue { at_millis, step }
}

fn script(metrics: &ScreenMetrics, flung: ElementId, dropped: ElementId) -> Vec<Cue> {
    let mut cues = vec![cue(300, Step::Press(flung)), cue(380, Step::Release)];

    // A flick down and across the midline.
    cues.push(cue(1_000, Step::Press(flung)));
    for i in 1..=6 {
        let t = i as f32 / 6.0;
        let offset = Point::new(metrics.width * 0.6 * t, metrics.height * 0.4 * t);
        cues.push(cue(1_000 + i * 17, Step::MoveBy(offset)));
    }
    cues.push(cue(1_110, Step::Release));

    cues.push(cue(2_000, Step::Fullscreen(true)));
    cues.push(cue(2_600, Step::Fullscreen(false)));

    // Slow drag onto the drop target and let go.
    cues.push(cue(3_000, Step::Press(dropped)));
    for i in 1..=10 {
        let offset = Point::new(metrics.dp(4.0) * i as f32, metrics.dp(3.0) * i as f32);
        cues.push(cue(3_000 + i * 50, Step::MoveBy(offset)));
    }
    cues.push(cue(3_700, Step::MoveToTarget));
    cues.push(cue(3_800, Step::MoveToTarget));
    cues.push(cue(4_200, Step::Release));
    cues
}

fn parse_screen(arg: Option<String>) -> Result<ScreenMetrics> {
    let Some(arg) = arg else {
        return Ok(ScreenMetrics::new(1080.0, 1920.0, 3.0, 72.0)?);
    };
    let (extent, density) = match arg.split_once('@') {
        Some((extent, density)) => (
            extent,
            density
                .parse::<f32>()
                .with_context(|| format!("bad density in {arg:?}"))?,
        ),
        None => (arg.as_str(), 1.0),
    };
    let Some((width, height)) = extent.split_once('x') else {
        bail!("expected WIDTHxHEIGHT[@DENSITY], got {arg:?}");
    };
    let width = width.parse().with_context(|| format!("bad width in {arg:?}"))?;
    let height = height.parse().with_context(|| format!("bad height in {arg:?}"))?;
    let inset = 24.0 * density;
    ScreenMetrics::new(width, height, density, inset).with_context(|| format!("unusable screen {arg:?}"))
}

/// Steps the clock frame by frame up to `deadline`.
fn run_until(manager: &mut Manager, clock: &ManualClock, deadline: u64) {
    loop {
        manager.run_due_ticks();
        report(manager);
        let now = clock.now_millis();
        if now >= deadline {
            return;
        }
        clock.advance(FRAME_INTERVAL_MILLIS.min(deadline - now));
    }
}

fn report(manager: &mut Manager) {
    for event in manager.drain_events() {
        match event {
            FloatingEvent::ElementStateChanged { element, state } => {
                log::info!("{element} is now {state:?}")
            }
            FloatingEvent::DropTargetAnimationStarted(animation) => {
                log::info!("drop target {animation:?} started")
            }
            FloatingEvent::DropTargetAnimationEnded(animation) => {
                log::info!("drop target {animation:?} ended")
            }
            FloatingEvent::SessionFinished(element) => log::info!("{element} dropped"),
            FloatingEvent::AllElementsRemoved => log::info!("no bubbles left"),
        }
    }
}

struct Gesture {
    element: ElementId,
    session: SessionId,
    origin: Point,
    last: Point,
}

fn main() -> Result<()> {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let metrics = parse_screen(std::env::args().nth(1))?;
    log::info!(
        "screen {}x{} at density {}",
        metrics.width,
        metrics.height,
        metrics.density
    );

    let clock = ManualClock::new(0);
    let mut manager = FloatingManager::new(LogHost, clock.clone(), metrics, ManagerConfig::new())
        .context("creating floating manager")?;
    manager.set_fixed_icon_size(Size::new(metrics.dp(56.0), metrics.dp(56.0)));
    manager.set_action_icon_size(Some(Size::new(metrics.dp(40.0), metrics.dp(40.0))));
    let bubble_size = Size::new(metrics.dp(56.0), metrics.dp(56.0));
    let flung = manager
        .add_element(ElementSpec::new(bubble_size))
        .context("adding first bubble")?;
    let dropped = manager
        .add_element(ElementSpec::new(bubble_size).with_shape(SHAPE_RECTANGLE))
        .context("adding second bubble")?;

    let mut observer = FullscreenObserver::new();
    let windowed = SystemUiSnapshot {
        system_ui_visible: true,
        visible_frame_top: metrics.status_bar_inset,
    };
    observer.observe(windowed, &mut manager);

    let mut gesture: Option<Gesture> = None;
    for Cue { at_millis, step } in script(&metrics, flung, dropped) {
        run_until(&mut manager, &clock, at_millis);
        let now = clock.now_millis();
        match step {
            Step::Press(element) => {
                let Some(position) = manager.element(element).map(|e| e.position()) else {
                    log::warn!("{element} is gone, skipping press");
                    continue;
                };
                let local = Point::new(bubble_size.width / 2.0, bubble_size.height / 2.0);
                let screen = Point::new(position.x + local.x, position.y + local.y);
                let event = PointerEvent::down(screen, local, now);
                manager.on_pointer_event(element, event);
                gesture = Some(Gesture {
                    element,
                    session: event.session,
                    origin: screen,
                    last: screen,
                });
            }
            Step::MoveBy(offset) => {
                if let Some(gesture) = gesture.as_mut() {
                    let screen = Point::new(gesture.origin.x + offset.x, gesture.origin.y + offset.y);
                    gesture.last = screen;
                    let event = PointerEvent::follow(PointerPhase::Move, screen, now, gesture.session);
                    manager.on_pointer_event(gesture.element, event);
                }
            }
            Step::MoveToTarget => {
                if let Some(gesture) = gesture.as_mut() {
                    let screen = manager.drop_target().icon_center();
                    gesture.last = screen;
                    let event = PointerEvent::follow(PointerPhase::Move, screen, now, gesture.session);
                    manager.on_pointer_event(gesture.element, event);
                }
            }
            Step::Release => {
                if let Some(gesture) = gesture.take() {
                    let event =
                        PointerEvent::follow(PointerPhase::Up, gesture.last, now, gesture.session);
                    manager.on_pointer_event(gesture.element, event);
                }
            }
            Step::Fullscreen(fullscreen) => {
                let snapshot = SystemUiSnapshot {
                    system_ui_visible: !fullscreen,
                    ..windowed
                };
                observer.observe(snapshot, &mut manager);
            }
        }
        report(&mut manager);
    }

    run_until(&mut manager, &clock, clock.now_millis() + 2_000);
    if !manager.is_idle() {
        log::warn!("still animating after the script ended");
    }
    for element in manager.elements() {
        log::info!("{} rests at {:?}", element.id(), element.position());
    }
    manager.remove_all_elements();
    report(&mut manager);
    Ok(())
}
