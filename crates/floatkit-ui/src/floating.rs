//! Drag motion for one floating element.
//!
//! The element follows the pointer through a per-frame tracking loop while a
//! pointer is down, then settles to the nearer horizontal edge with an
//! overshooting animation. While it hovers the drop target the loop eases it
//! towards the target icon instead of the pointer.

use floatkit_animation::{snap_curve, AnimationSpec, Easing, Lerp};
use floatkit_core::TickKind;
use floatkit_foundation::{PointerEvent, PointerPhase, SessionId, VelocityTracker};
use floatkit_geometry::{GeometryError, Point, PositionLimits, Rect, ScreenMetrics, Size};

use crate::config::FloatingConfig;
use crate::constants::{SCALE_NORMAL, SHAPE_CIRCLE};
use crate::schedule::{AnimationChannel, AnimationCode, AnimationScheduler, AnimationTick};
use crate::{ElementId, ElementState, FloatingHost};

/// Extent and collision shape of an element, supplied when it is added.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElementSpec {
    pub size: Size,
    /// Collision shape factor, see [`SHAPE_CIRCLE`] and
    /// [`crate::constants::SHAPE_RECTANGLE`].
    pub shape: f32,
    /// How far the element may overhang the left and right edges at rest.
    pub over_margin: f32,
}

impl ElementSpec {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            shape: SHAPE_CIRCLE,
            over_margin: 0.0,
        }
    }

    pub fn with_shape(mut self, shape: f32) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_over_margin(mut self, over_margin: f32) -> Self {
        self.over_margin = over_margin;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// No session, or the sample belongs to another one.
    Ignored,
    BelowThreshold,
    Accepted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReleaseOutcome {
    Ignored,
    Tap,
    /// Cancelled before the move threshold was crossed.
    Cancelled,
    /// Released mid-drag; an edge snap is running.
    Settling,
    /// Released over the drop target.
    Dropped,
}

struct DragSession {
    id: SessionId,
    down: Point,
    last: Point,
    local: Point,
    move_accepted: bool,
    velocity: VelocityTracker,
}

impl DragSession {
    fn element_origin(&self) -> Point {
        Point::new(self.last.x - self.local.x, self.last.y - self.local.y)
    }
}

struct Tracking {
    start: Point,
    /// `None` until the first state change of the session: the element then
    /// follows its target one-to-one.
    start_time: Option<u64>,
    restart: bool,
    touch_target: Point,
    hover_center: Point,
}

impl Tracking {
    fn new() -> Self {
        Self {
            start: Point::ZERO,
            start_time: None,
            restart: false,
            touch_target: Point::ZERO,
            hover_center: Point::ZERO,
        }
    }
}

struct EdgeSnap {
    from: Point,
    to: Point,
    spec: AnimationSpec,
    start_time: Option<u64>,
}

pub struct FloatingElement {
    id: ElementId,
    spec: ElementSpec,
    config: FloatingConfig,
    metrics: ScreenMetrics,
    limits: PositionLimits,
    position: Point,
    state: ElementState,
    draggable: bool,
    visible: bool,
    on_right: bool,
    session: Option<DragSession>,
    tracking: Tracking,
    edge_snap: Option<EdgeSnap>,
}

impl FloatingElement {
    /// Places the element at the top-left resting corner, just below the
    /// status bar.
    pub fn new(
        id: ElementId,
        spec: ElementSpec,
        metrics: ScreenMetrics,
        config: FloatingConfig,
    ) -> Result<Self, GeometryError> {
        let limits = PositionLimits::compute(&metrics, spec.size, spec.over_margin)?;
        let rest = limits.position_rect();
        Ok(Self {
            id,
            spec,
            config,
            metrics,
            limits,
            position: Point::new(rest.left(), rest.top()).trunc(),
            state: ElementState::Normal,
            draggable: true,
            visible: true,
            on_right: false,
            session: None,
            tracking: Tracking::new(),
            edge_snap: None,
        })
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn spec(&self) -> ElementSpec {
        self.spec
    }

    pub fn size(&self) -> Size {
        self.spec.size
    }

    pub fn state(&self) -> ElementState {
        self.state
    }

    /// Rendered window origin, truncated to whole pixels.
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn limits(&self) -> PositionLimits {
        self.limits
    }

    pub fn is_draggable(&self) -> bool {
        self.draggable
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_on_right(&self) -> bool {
        self.on_right
    }

    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    pub fn is_move_accepted(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.move_accepted)
    }

    pub fn is_settling(&self) -> bool {
        self.edge_snap.is_some()
    }

    /// Where the pointer says the element is, ignoring motion lag.
    pub fn touch_rect(&self) -> Rect {
        let origin = self
            .session
            .as_ref()
            .map(DragSession::element_origin)
            .unwrap_or(self.position);
        Rect::from_origin_size(origin.trunc(), self.spec.size)
    }

    fn channel(&self) -> AnimationChannel {
        AnimationChannel::Element(self.id)
    }

    pub(crate) fn set_draggable(&mut self, draggable: bool) {
        self.draggable = draggable;
    }

    pub(crate) fn render<H: FloatingHost + ?Sized>(&self, host: &mut H) {
        host.apply_position(self.id, self.position.x as i32, self.position.y as i32);
    }

    fn move_to<H: FloatingHost + ?Sized>(&mut self, position: Point, host: &mut H) {
        let position = position.trunc();
        if position != self.position {
            self.position = position;
            self.render(host);
        }
    }

    /// Starts a session. Returns `false` when the element does not take
    /// pointer input right now.
    pub(crate) fn pointer_down<H: FloatingHost + ?Sized>(
        &mut self,
        event: &PointerEvent,
        now: u64,
        scheduler: &mut AnimationScheduler,
        host: &mut H,
    ) -> bool {
        if !self.draggable || !self.visible || self.state == ElementState::Finishing {
            return false;
        }
        scheduler.cancel(self.channel());
        self.edge_snap = None;
        self.state = ElementState::Normal;

        let mut velocity = VelocityTracker::with_horizon(self.config.velocity_horizon_millis);
        velocity.add_movement(event.timestamp, event.screen);
        let session = DragSession {
            id: event.session,
            down: event.screen,
            last: event.screen,
            local: event.local,
            move_accepted: false,
            velocity,
        };
        self.tracking = Tracking::new();
        self.tracking.touch_target = session.element_origin();
        self.session = Some(session);

        host.apply_element_scale(self.id, self.config.pressed_scale);
        scheduler.start(self.channel(), AnimationCode::Track, now);
        log::trace!("element {} down at {:?}", self.id, event.screen);
        true
    }

    pub(crate) fn pointer_move(&mut self, event: &PointerEvent) -> MoveOutcome {
        let threshold = self.metrics.dp(self.config.move_threshold_dp);
        let Some(session) = self.session.as_mut().filter(|s| s.id == event.session) else {
            return MoveOutcome::Ignored;
        };
        session.last = event.screen;
        let dx = (event.screen.x - session.down.x).abs();
        let dy = (event.screen.y - session.down.y).abs();
        if !session.move_accepted && dx < threshold && dy < threshold {
            return MoveOutcome::BelowThreshold;
        }
        session.move_accepted = true;
        session.velocity.add_movement(event.timestamp, event.screen);
        self.tracking.touch_target = session.element_origin();
        MoveOutcome::Accepted
    }

    /// Ends the session. Edge snapping starts here; dropping onto the target
    /// is left to the caller.
    pub(crate) fn pointer_release<H: FloatingHost + ?Sized>(
        &mut self,
        event: &PointerEvent,
        now: u64,
        scheduler: &mut AnimationScheduler,
        host: &mut H,
    ) -> ReleaseOutcome {
        if self.session.as_ref().map(|s| s.id) != Some(event.session) {
            return ReleaseOutcome::Ignored;
        }
        let Some(mut session) = self.session.take() else {
            return ReleaseOutcome::Ignored;
        };
        scheduler.cancel(self.channel());
        host.apply_element_scale(self.id, SCALE_NORMAL);

        if !session.move_accepted {
            if event.phase == PointerPhase::Up {
                host.perform_click(self.id);
                return ReleaseOutcome::Tap;
            }
            return ReleaseOutcome::Cancelled;
        }

        session.last = event.screen;
        session.velocity.add_movement(event.timestamp, event.screen);
        match self.state {
            ElementState::Intersecting => ReleaseOutcome::Dropped,
            ElementState::Finishing => ReleaseOutcome::Ignored,
            ElementState::Normal => {
                let velocity = session.velocity.velocity();
                self.start_edge_snap(velocity.x, now, scheduler);
                ReleaseOutcome::Settling
            }
        }
    }

    fn start_edge_snap(&mut self, velocity_x: f32, now: u64, scheduler: &mut AnimationScheduler) {
        let current = self.position;
        let midline = ((self.metrics.width - self.spec.size.width) / 2.0).trunc();
        let projected = (velocity_x * self.config.side_change_horizon_secs).trunc();

        let mut on_right = self.on_right;
        if on_right {
            if current.x < midline || current.x + projected < midline {
                on_right = false;
            }
        } else if current.x > midline || current.x + projected > midline {
            on_right = true;
        }
        self.on_right = on_right;

        let rest = self.limits.position_rect();
        let goal_x = if on_right { rest.right() } else { rest.left() };
        let goal = self.limits.clamp_rest(Point::new(goal_x, current.y)).trunc();
        let tension = self.config.edge_snap_tension(velocity_x);
        log::debug!(
            "element {} snapping to {} edge (vx {velocity_x:.0}, tension {tension:.2})",
            self.id,
            if on_right { "right" } else { "left" }
        );

        self.edge_snap = Some(EdgeSnap {
            from: current,
            to: goal,
            spec: AnimationSpec::tween(
                self.config.edge_snap_duration_millis,
                Easing::overshoot(tension),
            ),
            start_time: None,
        });
        scheduler.start(self.channel(), AnimationCode::EdgeSnap, now);
    }

    /// Jumps to the nearer edge without animating.
    pub(crate) fn settle_to_edge<H: FloatingHost + ?Sized>(&mut self, host: &mut H) {
        let current = self.position;
        let midline = ((self.metrics.width - self.spec.size.width) / 2.0).trunc();
        self.on_right = current.x > midline;
        let rest = self.limits.position_rect();
        let goal_x = if self.on_right { rest.right() } else { rest.left() };
        let goal = self.limits.clamp_rest(Point::new(goal_x, current.y));
        self.move_to(goal, host);
    }

    fn change_state(&mut self, state: ElementState) -> bool {
        if self.state == state || self.state == ElementState::Finishing {
            return false;
        }
        log::debug!("element {} {:?} -> {:?}", self.id, self.state, state);
        self.state = state;
        self.tracking.restart = true;
        true
    }

    /// Starts easing towards `icon_center`. Returns whether the state changed.
    pub(crate) fn hover(&mut self, icon_center: Point) -> bool {
        self.tracking.hover_center = icon_center;
        self.change_state(ElementState::Intersecting)
    }

    pub(crate) fn unhover(&mut self) -> bool {
        self.change_state(ElementState::Normal)
    }

    /// Enters the terminal state: motion stops and the element is hidden
    /// until the manager removes it.
    pub(crate) fn finish<H: FloatingHost + ?Sized>(
        &mut self,
        scheduler: &mut AnimationScheduler,
        host: &mut H,
    ) -> bool {
        if self.state == ElementState::Finishing {
            return false;
        }
        log::debug!("element {} {:?} -> Finishing", self.id, self.state);
        self.state = ElementState::Finishing;
        scheduler.cancel(self.channel());
        self.session = None;
        self.edge_snap = None;
        host.apply_element_scale(self.id, SCALE_NORMAL);
        self.set_visible(false, scheduler, host);
        true
    }

    pub(crate) fn set_visible<H: FloatingHost + ?Sized>(
        &mut self,
        visible: bool,
        scheduler: &mut AnimationScheduler,
        host: &mut H,
    ) {
        if !visible {
            let was_dragging = self.is_move_accepted() || self.edge_snap.is_some();
            scheduler.cancel(self.channel());
            self.edge_snap = None;
            if self.session.take().is_some() {
                host.apply_element_scale(self.id, SCALE_NORMAL);
            }
            if was_dragging && self.state != ElementState::Finishing {
                self.settle_to_edge(host);
            }
        }
        if self.visible != visible {
            self.visible = visible;
            host.set_element_visible(self.id, visible);
        }
    }

    /// Drops any session and pending motion.
    pub(crate) fn detach(&mut self, scheduler: &mut AnimationScheduler) {
        scheduler.cancel(self.channel());
        self.session = None;
        self.edge_snap = None;
    }

    /// Re-lays the element out for new metrics without animating.
    ///
    /// On error the previous limits stay in force.
    pub(crate) fn on_screen_changed<H: FloatingHost + ?Sized>(
        &mut self,
        metrics: ScreenMetrics,
        scheduler: &mut AnimationScheduler,
        host: &mut H,
    ) -> Result<(), GeometryError> {
        let limits = PositionLimits::compute(&metrics, self.spec.size, self.spec.over_margin)?;
        let was_snapping = self.edge_snap.take().is_some();
        if was_snapping {
            scheduler.cancel(self.channel());
        }

        let resized = !self.metrics.same_extent(&metrics);
        let old_rest = self.limits.position_rect();
        self.metrics = metrics;
        self.limits = limits;

        if resized {
            let rest = limits.position_rect();
            let midline = ((metrics.width - self.spec.size.width) / 2.0).trunc();
            self.on_right = self.position.x > midline;
            let x = if self.on_right { rest.right() } else { rest.left() };
            let y = if old_rest.height > 0.0 {
                let offset = self.position.y - old_rest.top();
                (offset * rest.height / old_rest.height + 0.5).trunc() + rest.top()
            } else {
                self.position.y
            };
            let goal = limits.clamp_rest(Point::new(x, y));
            self.move_to(goal, host);
        } else if was_snapping {
            self.settle_to_edge(host);
        }
        Ok(())
    }

    pub(crate) fn on_tick<H: FloatingHost + ?Sized>(
        &mut self,
        tick: AnimationTick,
        now: u64,
        scheduler: &mut AnimationScheduler,
        host: &mut H,
    ) {
        match tick.run.code {
            AnimationCode::Track => self.track(tick, now, scheduler, host),
            AnimationCode::EdgeSnap => self.step_edge_snap(tick, now, scheduler, host),
            other => log::trace!("element {} ignores {other:?} tick", self.id),
        }
    }

    fn track<H: FloatingHost + ?Sized>(
        &mut self,
        tick: AnimationTick,
        now: u64,
        scheduler: &mut AnimationScheduler,
        host: &mut H,
    ) {
        let target = match self.state {
            ElementState::Normal => self.limits.clamp_in_flight(self.tracking.touch_target.trunc()),
            ElementState::Intersecting => Point::new(
                self.tracking.hover_center.x - self.spec.size.width / 2.0,
                self.tracking.hover_center.y - self.spec.size.height / 2.0,
            ),
            ElementState::Finishing => {
                scheduler.finish(tick.key, tick.run);
                return;
            }
        };

        if tick.kind == TickKind::First || self.tracking.restart {
            self.tracking.start = self.position;
            self.tracking.start_time = self.tracking.restart.then_some(now);
            self.tracking.restart = false;
        }
        let rate = match self.tracking.start_time {
            Some(start) => {
                let capture = self.config.capture_duration_millis.max(1) as f32;
                (now.saturating_sub(start) as f32 / capture).min(1.0)
            }
            None => 1.0,
        };
        let fraction = snap_curve(rate);
        let start = self.tracking.start;
        let next = Point::new(
            start.x.lerp(&target.x, fraction),
            start.y.lerp(&target.y, fraction),
        );
        self.move_to(next, host);
        scheduler.schedule(tick.key, tick.run, now + self.config.frame_interval_millis);
    }

    fn step_edge_snap<H: FloatingHost + ?Sized>(
        &mut self,
        tick: AnimationTick,
        now: u64,
        scheduler: &mut AnimationScheduler,
        host: &mut H,
    ) {
        let Some(snap) = self.edge_snap.as_mut() else {
            scheduler.finish(tick.key, tick.run);
            return;
        };
        let started = *snap.start_time.get_or_insert(now);
        let elapsed = now.saturating_sub(started);
        if snap.spec.is_finished(elapsed) {
            let goal = self.limits.clamp_rest(snap.to);
            self.edge_snap = None;
            scheduler.finish(tick.key, tick.run);
            self.move_to(goal, host);
            log::trace!("element {} settled at {:?}", self.id, self.position);
            return;
        }
        let next = Point::new(
            snap.spec.value_at(&snap.from.x, &snap.to.x, elapsed),
            snap.spec.value_at(&snap.from.y, &snap.to.y, elapsed),
        );
        self.move_to(next, host);
        scheduler.schedule(tick.key, tick.run, now + self.config.frame_interval_millis);
    }
}

#[cfg(test)]
#[path = "tests/floating_tests.rs"]
mod tests;
