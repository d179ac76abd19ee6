//! Coordinates the floating elements with the drop target.

use floatkit_core::Clock;
use floatkit_foundation::{PointerEvent, PointerPhase};
use floatkit_geometry::{GeometryError, Rect, ScreenMetrics, Size};
use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::config::{DisplayMode, ManagerConfig};
use crate::drop_target::DropTarget;
use crate::floating::{ElementSpec, FloatingElement, MoveOutcome, ReleaseOutcome};
use crate::fullscreen::FullscreenListener;
use crate::schedule::{AnimationChannel, AnimationScheduler};
use crate::{DropTargetAnimation, ElementId, ElementState, FloatingEvent, FloatingHost, Surface};

/// Owns every floating element and the single drop target, routes pointer
/// input between them and runs their animation ticks.
///
/// Nothing here blocks. The host feeds pointer events, calls
/// [`run_due_ticks`](Self::run_due_ticks) whenever
/// [`next_tick_due`](Self::next_tick_due) has passed, and drains
/// notifications with [`drain_events`](Self::drain_events).
pub struct FloatingManager<H, C> {
    host: H,
    clock: C,
    config: ManagerConfig,
    metrics: ScreenMetrics,
    scheduler: AnimationScheduler,
    elements: IndexMap<ElementId, FloatingElement>,
    drop_target: DropTarget,
    next_id: u64,
    /// Element of the current or most recent session.
    target: Option<ElementId>,
    gesture_active: bool,
    display_mode: DisplayMode,
    fullscreen: bool,
    events: Vec<FloatingEvent>,
}

impl<H, C> FloatingManager<H, C>
where
    H: FloatingHost,
    C: Clock,
{
    pub fn new(
        mut host: H,
        clock: C,
        metrics: ScreenMetrics,
        config: ManagerConfig,
    ) -> Result<Self, GeometryError> {
        metrics.validate()?;
        let mut scheduler = AnimationScheduler::new();
        let mut drop_target = DropTarget::new(metrics, config.drop_target);
        drop_target.reset(&mut scheduler, &mut host);
        Ok(Self {
            host,
            clock,
            config,
            metrics,
            scheduler,
            elements: IndexMap::new(),
            drop_target,
            next_id: 1,
            target: None,
            gesture_active: false,
            display_mode: config.display_mode,
            fullscreen: false,
            events: Vec::new(),
        })
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn metrics(&self) -> ScreenMetrics {
        self.metrics
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    pub fn element(&self, id: ElementId) -> Option<&FloatingElement> {
        self.elements.get(&id)
    }

    /// Elements in the order they were added.
    pub fn elements(&self) -> impl Iterator<Item = &FloatingElement> {
        self.elements.values()
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn drop_target(&self) -> &DropTarget {
        &self.drop_target
    }

    pub fn target_element(&self) -> Option<ElementId> {
        self.target
    }

    pub fn set_fixed_icon_size(&mut self, size: Size) {
        self.drop_target.set_fixed_icon_size(size);
    }

    /// `None` removes the hover icon, which also disables hover scaling.
    pub fn set_action_icon_size(&mut self, size: Option<Size>) {
        self.drop_target.set_action_icon_size(size);
        if let Some(element) = self.elements.values().last() {
            let spec = element.spec();
            self.drop_target.configure_for_element(spec.size, spec.shape);
        }
    }

    fn now(&self) -> u64 {
        self.clock.now_millis()
    }

    fn elements_visible(&self) -> bool {
        match self.display_mode {
            DisplayMode::ShowAlways => true,
            DisplayMode::HideAlways => false,
            DisplayMode::HideOnFullscreen => !self.fullscreen,
        }
    }

    fn emit(&mut self, event: FloatingEvent) {
        log::trace!("event {event:?}");
        self.events.push(event);
    }

    fn emit_state(&mut self, element: ElementId, state: ElementState) {
        self.emit(FloatingEvent::ElementStateChanged { element, state });
    }

    pub fn drain_events(&mut self) -> Vec<FloatingEvent> {
        std::mem::take(&mut self.events)
    }

    /// Attaches a new element resting at the bottom-left corner.
    pub fn add_element(&mut self, spec: ElementSpec) -> Result<ElementId, GeometryError> {
        let id = ElementId(self.next_id);
        let mut element = FloatingElement::new(id, spec, self.metrics, self.config.floating)?;
        self.next_id += 1;

        self.drop_target.configure_for_element(spec.size, spec.shape);
        element.render(&mut self.host);
        if !self.elements_visible() {
            element.set_visible(false, &mut self.scheduler, &mut self.host);
        }
        if self.target.is_none() {
            self.target = Some(id);
        }
        log::debug!("added element {id} at {:?}", element.position());
        self.elements.insert(id, element);
        Ok(id)
    }

    /// Detaches one element without notifying.
    pub fn remove_element(&mut self, id: ElementId) -> bool {
        let Some(mut element) = self.elements.shift_remove(&id) else {
            return false;
        };
        element.detach(&mut self.scheduler);
        self.host.remove_element(id);
        if self.target == Some(id) {
            self.target = None;
            if std::mem::take(&mut self.gesture_active) {
                self.end_drop_target_session(false);
            }
        }
        log::debug!("removed element {id}");
        true
    }

    /// Tears down every element and resets the drop target at once.
    pub fn remove_all_elements(&mut self) {
        let removed = !self.elements.is_empty();
        for (id, mut element) in self.elements.drain(..) {
            element.detach(&mut self.scheduler);
            self.host.remove_element(id);
        }
        self.drop_target.reset(&mut self.scheduler, &mut self.host);
        self.target = None;
        self.gesture_active = false;
        if removed {
            log::debug!("removed all elements");
            self.emit(FloatingEvent::AllElementsRemoved);
        }
    }

    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        log::debug!("display mode {:?} -> {mode:?}", self.display_mode);
        self.display_mode = mode;
        match mode {
            DisplayMode::ShowAlways | DisplayMode::HideOnFullscreen => {
                self.set_all_visible(self.elements_visible())
            }
            DisplayMode::HideAlways => {
                self.set_all_visible(false);
                self.force_close_drop_target();
            }
        }
    }

    fn set_all_visible(&mut self, visible: bool) {
        for element in self.elements.values_mut() {
            element.set_visible(visible, &mut self.scheduler, &mut self.host);
        }
    }

    /// Re-lays everything out for new metrics.
    ///
    /// Degenerate metrics are rejected and the previous layout stays. An
    /// element that no longer fits keeps its previous limits.
    pub fn on_screen_changed(&mut self, metrics: ScreenMetrics) -> Result<(), GeometryError> {
        if let Err(err) = metrics.validate() {
            log::warn!("ignoring screen change: {err}");
            return Err(err);
        }
        for element in self.elements.values_mut() {
            if let Err(err) = element.on_screen_changed(metrics, &mut self.scheduler, &mut self.host)
            {
                log::warn!("element {} keeps its limits: {err}", element.id());
            }
        }
        self.drop_target.on_screen_changed(metrics, &mut self.host);
        self.metrics = metrics;
        Ok(())
    }

    /// Hides or restores elements when a fullscreen app comes and goes.
    /// Only acts in [`DisplayMode::HideOnFullscreen`].
    pub fn on_fullscreen_changed(&mut self, is_fullscreen: bool) {
        self.fullscreen = is_fullscreen;
        if self.display_mode != DisplayMode::HideOnFullscreen {
            return;
        }
        self.gesture_active = false;
        let state = self
            .target
            .and_then(|id| self.elements.get(&id))
            .map(FloatingElement::state)
            .unwrap_or_default();
        log::debug!("fullscreen {is_fullscreen} with target {state:?}");
        match state {
            ElementState::Normal => {
                self.set_all_visible(!is_fullscreen);
                self.force_close_drop_target();
            }
            ElementState::Intersecting => {
                if let Some(id) = self.target {
                    self.finish_element(id);
                }
                self.force_close_drop_target();
            }
            ElementState::Finishing => {}
        }
    }

    pub fn on_pointer_event(&mut self, id: ElementId, event: PointerEvent) {
        let now = self.now();
        match event.phase {
            PointerPhase::Down => self.on_pointer_down(id, &event, now),
            PointerPhase::Move => self.on_pointer_move(id, &event, now),
            PointerPhase::Up | PointerPhase::Cancel => self.on_pointer_release(id, &event, now),
        }
    }

    fn on_pointer_down(&mut self, id: ElementId, event: &PointerEvent, now: u64) {
        let Some(element) = self.elements.get_mut(&id) else {
            return;
        };
        let previous = element.state();
        if !element.pointer_down(event, now, &mut self.scheduler, &mut self.host) {
            log::trace!("element {id} ignores pointer down");
            return;
        }
        let (position, size) = (element.position(), element.size());
        if previous != ElementState::Normal {
            self.emit_state(id, ElementState::Normal);
        }
        self.target = Some(id);
        self.gesture_active = true;
        self.drop_target.update_target(position, size);
        self.drop_target
            .request_open(now, self.config.long_press_timeout_millis, &mut self.scheduler);
    }

    fn on_pointer_move(&mut self, id: ElementId, event: &PointerEvent, now: u64) {
        let Some(element) = self.elements.get_mut(&id) else {
            return;
        };
        if element.pointer_move(event) != MoveOutcome::Accepted {
            return;
        }
        if !self.gesture_active || self.target != Some(id) {
            return;
        }
        let hit = self.drop_target.hit_rect();
        self.update_hover(id, hit, now);

        let Some(element) = self.elements.get(&id) else {
            return;
        };
        let reference = match element.state() {
            ElementState::Intersecting => element.touch_rect().origin(),
            _ => element.position(),
        };
        self.drop_target.update_target(reference, element.size());
        self.drop_target.open_now(now, &mut self.scheduler);
    }

    /// Tests the element against `hit` and applies any hover transition.
    fn update_hover(&mut self, id: ElementId, hit: Rect, now: u64) {
        let icon_center = self.drop_target.icon_center();
        let Some(element) = self.elements.get_mut(&id) else {
            return;
        };
        let was_hovering = element.state() == ElementState::Intersecting;
        let intersecting = element.touch_rect().intersects(&hit);

        if intersecting {
            element.hover(icon_center);
            if !was_hovering {
                if let Err(err) = self.host.vibrate(self.config.vibrate_millis) {
                    log::debug!("vibrate failed: {err}");
                }
                self.drop_target.set_hovered(true, now, &mut self.scheduler);
                self.emit_state(id, ElementState::Intersecting);
            }
        } else if was_hovering {
            element.unhover();
            self.drop_target.set_hovered(false, now, &mut self.scheduler);
            self.emit_state(id, ElementState::Normal);
        }
    }

    fn on_pointer_release(&mut self, id: ElementId, event: &PointerEvent, now: u64) {
        let Some(element) = self.elements.get_mut(&id) else {
            return;
        };
        let outcome = element.pointer_release(event, now, &mut self.scheduler, &mut self.host);
        if outcome == ReleaseOutcome::Ignored {
            return;
        }
        if !self.gesture_active || self.target != Some(id) {
            return;
        }
        self.gesture_active = false;

        let dropped = outcome == ReleaseOutcome::Dropped;
        if dropped {
            self.finish_element(id);
            self.drop_target.set_hovered(false, now, &mut self.scheduler);
        }
        self.end_drop_target_session(dropped);
    }

    /// Closes the drop target after a gesture. If it never made it on
    /// screen, anything dropped is removed at once instead.
    fn end_drop_target_session(&mut self, dropped: bool) {
        self.drop_target.cancel_pending_open(&mut self.scheduler);
        if !self.drop_target.is_shown() {
            if dropped {
                self.remove_finished_elements();
            }
            return;
        }
        let now = self.now();
        self.drop_target.close(now, &mut self.scheduler);
        // Presses landing before the first close frame must not reopen it.
        self.set_all_draggable(false);
    }

    fn set_all_draggable(&mut self, draggable: bool) {
        for element in self.elements.values_mut() {
            element.set_draggable(draggable);
        }
    }

    fn finish_element(&mut self, id: ElementId) {
        let Some(element) = self.elements.get_mut(&id) else {
            return;
        };
        if element.finish(&mut self.scheduler, &mut self.host) {
            self.emit_state(id, ElementState::Finishing);
        }
    }

    fn force_close_drop_target(&mut self) {
        if self.drop_target.force_close(&mut self.scheduler, &mut self.host) {
            self.on_drop_target_started(DropTargetAnimation::ForceClose);
            self.on_drop_target_ended(DropTargetAnimation::ForceClose);
        } else {
            self.remove_finished_elements();
        }
    }

    fn on_drop_target_started(&mut self, animation: DropTargetAnimation) {
        self.emit(FloatingEvent::DropTargetAnimationStarted(animation));
        if matches!(animation, DropTargetAnimation::Close | DropTargetAnimation::ForceClose) {
            self.set_all_draggable(false);
        }
    }

    fn on_drop_target_ended(&mut self, animation: DropTargetAnimation) {
        self.emit(FloatingEvent::DropTargetAnimationEnded(animation));
        self.remove_finished_elements();
        self.set_all_draggable(true);
    }

    fn remove_finished_elements(&mut self) {
        let finished: SmallVec<[ElementId; 4]> = self
            .elements
            .values()
            .filter(|e| e.state() == ElementState::Finishing)
            .map(FloatingElement::id)
            .collect();
        if finished.is_empty() {
            return;
        }
        for id in finished {
            if let Some(mut element) = self.elements.shift_remove(&id) {
                element.detach(&mut self.scheduler);
                self.host.remove_element(id);
            }
            if self.target == Some(id) {
                self.target = None;
            }
            log::debug!("session finished for element {id}");
            self.emit(FloatingEvent::SessionFinished(id));
        }
        if self.elements.is_empty() {
            self.emit(FloatingEvent::AllElementsRemoved);
        }
    }

    fn is_live(&self, surface: Surface) -> bool {
        let registered = match surface {
            Surface::Element(id) => self.elements.contains_key(&id),
            Surface::DropTarget => true,
        };
        registered && self.host.is_attached(surface)
    }

    /// Runs every tick due by now. Returns how many ran.
    pub fn run_due_ticks(&mut self) -> usize {
        let mut ran = 0;
        loop {
            let now = self.now();
            let Some(tick) = self.scheduler.pop_due(now) else {
                break;
            };
            let surface = tick.key.surface();
            if !self.is_live(surface) {
                log::trace!("dropping ticks for detached {surface:?}");
                match surface {
                    Surface::Element(_) => {
                        self.scheduler.cancel(tick.key);
                    }
                    Surface::DropTarget => {
                        self.scheduler.cancel(AnimationChannel::DropTargetMotion);
                        self.scheduler.cancel(AnimationChannel::DropTargetScale);
                        // No close will end, so nothing may wait on one.
                        self.remove_finished_elements();
                        self.set_all_draggable(true);
                    }
                }
                continue;
            }

            match tick.key {
                AnimationChannel::Element(id) => {
                    if let Some(element) = self.elements.get_mut(&id) {
                        element.on_tick(tick, now, &mut self.scheduler, &mut self.host);
                    }
                }
                AnimationChannel::DropTargetMotion => {
                    let notices =
                        self.drop_target
                            .on_motion_tick(tick, now, &mut self.scheduler, &mut self.host);
                    for notice in notices {
                        match notice {
                            FloatingEvent::DropTargetAnimationStarted(animation) => {
                                self.on_drop_target_started(animation)
                            }
                            FloatingEvent::DropTargetAnimationEnded(animation) => {
                                self.on_drop_target_ended(animation)
                            }
                            other => self.emit(other),
                        }
                    }
                }
                AnimationChannel::DropTargetScale => {
                    self.drop_target
                        .on_scale_tick(tick, now, &mut self.scheduler, &mut self.host);
                }
            }
            ran += 1;
        }
        ran
    }

    pub fn next_tick_due(&self) -> Option<u64> {
        self.scheduler.next_due()
    }

    pub fn is_idle(&self) -> bool {
        self.scheduler.is_idle()
    }
}

impl<H, C> FullscreenListener for FloatingManager<H, C>
where
    H: FloatingHost,
    C: Clock,
{
    fn on_fullscreen_changed(&mut self, is_fullscreen: bool) {
        FloatingManager::on_fullscreen_changed(self, is_fullscreen);
    }
}

#[cfg(test)]
#[path = "tests/manager_tests.rs"]
mod tests;
