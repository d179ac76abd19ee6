//! The trash target that rises from the bottom edge during a drag.
//!
//! Translations are relative to the icon's rest slot, centred horizontally
//! and aligned to the bottom edge, with positive `dy` pointing down. The
//! hidden position is one icon-root height below the slot.

use floatkit_animation::{AnimationSpec, Easing};
use floatkit_core::TickKind;
use floatkit_geometry::{Point, Rect, ScreenMetrics, Size};
use smallvec::SmallVec;

use crate::config::DropTargetConfig;
use crate::constants::SCALE_NORMAL;
use crate::schedule::{AnimationChannel, AnimationCode, AnimationScheduler, AnimationTick};
use crate::{DropTargetAnimation, FloatingEvent, FloatingHost};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DropTargetState {
    /// Hidden with nothing running.
    #[default]
    Idle,
    Opening,
    Closing,
    /// Reset instantly; stays here until the next open.
    ForceClosed,
}

struct MotionRun {
    start_time: u64,
    start_alpha: f32,
    start_y: f32,
}

struct ScaleRun {
    from: f32,
    to: f32,
    spec: AnimationSpec,
    start_time: Option<u64>,
}

pub struct DropTarget {
    config: DropTargetConfig,
    metrics: ScreenMetrics,
    state: DropTargetState,
    alpha: f32,
    translation: Point,
    scale: f32,
    fixed_icon: Size,
    action_icon: Option<Size>,
    padding: f32,
    max_scale: f32,
    /// Bounds of the icon translation while open.
    limit: Rect,
    sticky_range: f32,
    tracked: Point,
    tracked_size: Size,
    motion: Option<MotionRun>,
    pending_open_due: Option<u64>,
    scale_run: Option<ScaleRun>,
}

impl DropTarget {
    pub fn new(metrics: ScreenMetrics, config: DropTargetConfig) -> Self {
        let mut target = Self {
            config,
            metrics,
            state: DropTargetState::Idle,
            alpha: 0.0,
            translation: Point::ZERO,
            scale: SCALE_NORMAL,
            fixed_icon: Size::ZERO,
            action_icon: None,
            padding: 0.0,
            max_scale: SCALE_NORMAL,
            limit: Rect::default(),
            sticky_range: 0.0,
            tracked: Point::ZERO,
            tracked_size: Size::ZERO,
            motion: None,
            pending_open_due: None,
            scale_run: None,
        };
        target.relayout();
        target.translation.y = target.hidden_y();
        target
    }

    pub fn state(&self) -> DropTargetState {
        self.state
    }

    pub fn is_opening(&self) -> bool {
        self.state == DropTargetState::Opening
    }

    /// Whether any part of the target is visible or a run has taken it over.
    pub fn is_shown(&self) -> bool {
        matches!(self.state, DropTargetState::Opening | DropTargetState::Closing)
            || self.alpha > 0.0
            || self.translation.y < self.hidden_y()
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn translation(&self) -> Point {
        self.translation
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn max_scale(&self) -> f32 {
        self.max_scale
    }

    pub fn padding(&self) -> f32 {
        self.padding
    }

    pub fn has_action_icon(&self) -> bool {
        self.action_icon.is_some()
    }

    /// Translation bounds while open; `bottom` is the hidden offset.
    pub fn limit_rect(&self) -> Rect {
        self.limit
    }

    pub fn sticky_range(&self) -> f32 {
        self.sticky_range
    }

    pub(crate) fn set_fixed_icon_size(&mut self, size: Size) {
        self.fixed_icon = size;
        self.relayout();
    }

    /// Installs the icon that scales up on hover; `None` disables hover
    /// scaling.
    pub(crate) fn set_action_icon_size(&mut self, size: Option<Size>) {
        self.action_icon = size.filter(|s| !s.is_empty());
        if self.action_icon.is_none() {
            self.padding = 0.0;
            self.max_scale = SCALE_NORMAL;
        }
        self.relayout();
    }

    /// Sizes the hover scale so the action icon grows to cover `element`.
    pub(crate) fn configure_for_element(&mut self, element: Size, shape: f32) {
        let Some(icon) = self.action_icon else {
            return;
        };
        let max_scale = (element.width / icon.width).max(element.height / icon.height) * shape;
        self.max_scale = max_scale;
        self.padding = ((max_scale - 1.0) * icon.width / 2.0 + 0.5).trunc().max(0.0);
        self.relayout();
        log::trace!("drop target max scale {max_scale:.3}, padding {}", self.padding);
    }

    fn root_size(&self) -> Size {
        match self.action_icon {
            Some(icon) => Size::new(
                (icon.width + self.padding * 2.0).max(self.fixed_icon.width),
                (icon.height + self.padding * 2.0).max(self.fixed_icon.height),
            ),
            None => self.fixed_icon,
        }
    }

    fn content_size(&self) -> Size {
        self.action_icon.unwrap_or(self.fixed_icon)
    }

    fn hidden_y(&self) -> f32 {
        self.root_size().height
    }

    fn relayout(&mut self) {
        let root = self.root_size();
        let background = self.metrics.dp(self.config.background_height_dp);
        let offset_x = self.metrics.dp(self.config.move_limit_offset_x_dp);
        let top = (root.height - background) / 2.0 - self.metrics.dp(self.config.move_limit_top_offset_dp);
        self.limit = Rect::from_ltrb(-offset_x, top, offset_x, root.height);
        self.sticky_range = background * self.config.sticky_range_ratio;
        if matches!(self.state, DropTargetState::Idle | DropTargetState::ForceClosed) {
            self.translation.y = self.hidden_y();
        }
    }

    /// Screen rect of the visible icon, ignoring scale.
    pub fn icon_rect(&self) -> Rect {
        let root = self.root_size();
        let content = self.content_size();
        let x = (self.metrics.width - root.width) / 2.0 + self.translation.x;
        let y = self.metrics.height - root.height + self.translation.y;
        Rect::new(
            x + (root.width - content.width) / 2.0,
            y + (root.height - content.height) / 2.0,
            content.width,
            content.height,
        )
    }

    pub fn icon_center(&self) -> Point {
        self.icon_rect().center()
    }

    /// Capture area: the icon widened on both sides, raised at the top and
    /// reaching below the bottom edge of the screen.
    pub fn hit_rect(&self) -> Rect {
        let icon = self.icon_rect();
        let horizontal = self.metrics.dp(self.config.capture_horizontal_dp);
        let vertical = self.metrics.dp(self.config.capture_vertical_dp);
        Rect::from_ltrb(
            icon.left() - horizontal,
            icon.top() - vertical,
            icon.right() + horizontal,
            self.metrics.height + self.root_size().height,
        )
    }

    /// Records the dragged element the icon leans towards.
    pub(crate) fn update_target(&mut self, origin: Point, size: Size) {
        self.tracked = origin;
        self.tracked_size = size;
    }

    pub(crate) fn on_screen_changed<H: FloatingHost + ?Sized>(
        &mut self,
        metrics: ScreenMetrics,
        host: &mut H,
    ) {
        self.metrics = metrics;
        self.relayout();
        self.render(host);
    }

    /// Queues an open to start after `delay_millis`, replacing any run.
    pub(crate) fn request_open(
        &mut self,
        now: u64,
        delay_millis: u64,
        scheduler: &mut AnimationScheduler,
    ) {
        let due = now + delay_millis;
        self.pending_open_due = Some(due);
        scheduler.start(AnimationChannel::DropTargetMotion, AnimationCode::Open, due);
    }

    /// Opens on the next tick unless an open is already running or due.
    pub(crate) fn open_now(&mut self, now: u64, scheduler: &mut AnimationScheduler) {
        if self.is_opening() || self.pending_open_due.is_some_and(|due| due <= now) {
            return;
        }
        self.request_open(now, 0, scheduler);
    }

    /// Drops an open that has not started yet. Returns whether one was
    /// pending.
    pub(crate) fn cancel_pending_open(&mut self, scheduler: &mut AnimationScheduler) -> bool {
        if self.pending_open_due.take().is_none() {
            return false;
        }
        scheduler.cancel(AnimationChannel::DropTargetMotion);
        true
    }

    pub(crate) fn close(&mut self, now: u64, scheduler: &mut AnimationScheduler) {
        self.pending_open_due = None;
        scheduler.start(AnimationChannel::DropTargetMotion, AnimationCode::Close, now);
    }

    /// Hides everything at once. Returns `false` when already force-closed.
    pub(crate) fn force_close<H: FloatingHost + ?Sized>(
        &mut self,
        scheduler: &mut AnimationScheduler,
        host: &mut H,
    ) -> bool {
        if self.state == DropTargetState::ForceClosed {
            return false;
        }
        log::debug!("drop target {:?} -> ForceClosed", self.state);
        self.stop(scheduler);
        self.state = DropTargetState::ForceClosed;
        self.alpha = 0.0;
        self.translation.y = self.hidden_y();
        self.scale = SCALE_NORMAL;
        self.render(host);
        host.apply_scale(self.scale, self.scale);
        true
    }

    /// Returns to the initial hidden layout without notifying anyone.
    pub(crate) fn reset<H: FloatingHost + ?Sized>(
        &mut self,
        scheduler: &mut AnimationScheduler,
        host: &mut H,
    ) {
        self.stop(scheduler);
        self.state = DropTargetState::Idle;
        self.alpha = 0.0;
        self.translation = Point::new(0.0, self.hidden_y());
        self.scale = SCALE_NORMAL;
        self.render(host);
        host.apply_scale(self.scale, self.scale);
    }

    fn stop(&mut self, scheduler: &mut AnimationScheduler) {
        scheduler.cancel(AnimationChannel::DropTargetMotion);
        scheduler.cancel(AnimationChannel::DropTargetScale);
        self.motion = None;
        self.scale_run = None;
        self.pending_open_due = None;
    }

    /// Animates the action icon towards its hover or rest scale.
    pub(crate) fn set_hovered(&mut self, hovered: bool, now: u64, scheduler: &mut AnimationScheduler) {
        if self.action_icon.is_none() {
            return;
        }
        let (to, code) = if hovered {
            (self.max_scale, AnimationCode::ScaleUp)
        } else {
            (SCALE_NORMAL, AnimationCode::ScaleDown)
        };
        self.scale_run = Some(ScaleRun {
            from: self.scale,
            to,
            spec: AnimationSpec::tween(
                self.config.scale_duration_millis,
                Easing::overshoot(self.config.scale_overshoot_tension),
            ),
            start_time: None,
        });
        scheduler.start(AnimationChannel::DropTargetScale, code, now);
    }

    fn render<H: FloatingHost + ?Sized>(&self, host: &mut H) {
        host.apply_opacity(self.alpha);
        host.apply_translation(self.translation.x, self.translation.y);
    }

    /// Advances the open or close run, returning lifecycle notifications
    /// for a run that started or ended on this tick.
    pub(crate) fn on_motion_tick<H: FloatingHost + ?Sized>(
        &mut self,
        tick: AnimationTick,
        now: u64,
        scheduler: &mut AnimationScheduler,
        host: &mut H,
    ) -> SmallVec<[FloatingEvent; 2]> {
        let mut notices = SmallVec::new();
        if tick.kind == TickKind::First || self.motion.is_none() {
            let (state, animation) = match tick.run.code {
                AnimationCode::Open => (DropTargetState::Opening, DropTargetAnimation::Open),
                AnimationCode::Close => (DropTargetState::Closing, DropTargetAnimation::Close),
                other => {
                    log::trace!("drop target ignores {other:?} motion tick");
                    scheduler.finish(tick.key, tick.run);
                    return notices;
                }
            };
            log::debug!("drop target {:?} -> {state:?}", self.state);
            self.motion = Some(MotionRun {
                start_time: now,
                start_alpha: self.alpha,
                start_y: self.translation.y,
            });
            self.pending_open_due = None;
            self.state = state;
            notices.push(FloatingEvent::DropTargetAnimationStarted(animation));
        }
        let Some((start_time, start_alpha, start_y)) = self
            .motion
            .as_ref()
            .map(|run| (run.start_time, run.start_alpha, run.start_y))
        else {
            return notices;
        };
        let elapsed = now.saturating_sub(start_time);

        let done = match tick.run.code {
            AnimationCode::Open => {
                self.step_open(elapsed, start_alpha);
                false
            }
            _ => self.step_close(elapsed, start_alpha, start_y),
        };
        self.render(host);

        if done {
            log::debug!("drop target Closing -> Idle");
            self.state = DropTargetState::Idle;
            self.motion = None;
            scheduler.finish(tick.key, tick.run);
            notices.push(FloatingEvent::DropTargetAnimationEnded(DropTargetAnimation::Close));
        } else {
            scheduler.schedule(tick.key, tick.run, now + self.config.frame_interval_millis);
        }
        notices
    }

    fn step_open(&mut self, elapsed: u64, start_alpha: f32) {
        if self.alpha < 1.0 {
            let rate = AnimationSpec::linear(self.config.background_duration_millis)
                .linear_progress(elapsed);
            self.alpha = (start_alpha + rate).min(1.0);
        }
        if elapsed < self.config.open_delay_millis {
            return;
        }

        let screen = self.metrics;
        let limit = self.limit;
        let tracked_w = self.tracked_size.width;
        let tracked_h = self.tracked_size.height;

        let x_share = (self.tracked.x + tracked_w) / (screen.width + tracked_w);
        self.translation.x = x_share * limit.width + limit.left();

        let y_rate = (2.0 * (screen.height - self.tracked.y) / (screen.height + tracked_h)).clamp(0.0, 1.0);
        let sticky = self.sticky_range * y_rate + limit.height - self.sticky_range;
        let rise = AnimationSpec::tween(
            self.config.open_duration_millis,
            Easing::overshoot(self.config.open_overshoot_tension),
        )
        .with_delay(self.config.open_delay_millis);
        self.translation.y = limit.bottom() - sticky * rise.progress(elapsed);
    }

    /// Returns `true` once both ramps are complete.
    fn step_close(&mut self, elapsed: u64, start_alpha: f32, start_y: f32) -> bool {
        let alpha_rate = AnimationSpec::linear(self.config.background_duration_millis)
            .linear_progress(elapsed);
        self.alpha = (start_alpha - alpha_rate).max(0.0);
        let move_rate =
            AnimationSpec::linear(self.config.close_duration_millis).linear_progress(elapsed);
        let hidden = self.hidden_y();
        if alpha_rate < 1.0 || move_rate < 1.0 {
            self.translation.y = start_y + (hidden - start_y) * move_rate;
            false
        } else {
            self.translation.y = hidden;
            true
        }
    }

    pub(crate) fn on_scale_tick<H: FloatingHost + ?Sized>(
        &mut self,
        tick: AnimationTick,
        now: u64,
        scheduler: &mut AnimationScheduler,
        host: &mut H,
    ) {
        let Some(run) = self.scale_run.as_mut() else {
            scheduler.finish(tick.key, tick.run);
            return;
        };
        let started = *run.start_time.get_or_insert(now);
        let elapsed = now.saturating_sub(started);
        if run.spec.is_finished(elapsed) {
            self.scale = run.to;
            self.scale_run = None;
            scheduler.finish(tick.key, tick.run);
        } else {
            self.scale = run.spec.value_at(&run.from, &run.to, elapsed);
            scheduler.schedule(tick.key, tick.run, now + self.config.frame_interval_millis);
        }
        host.apply_scale(self.scale, self.scale);
    }
}

#[cfg(test)]
#[path = "tests/drop_target_tests.rs"]
mod tests;
