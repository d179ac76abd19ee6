//! A host that records every call instead of drawing.

use std::collections::HashSet;

use floatkit_ui::{ElementId, FloatingHost, HostError, Surface};

#[derive(Clone, Debug, PartialEq)]
pub enum HostCall {
    Position { element: ElementId, x: i32, y: i32 },
    ElementScale { element: ElementId, scale: f32 },
    ElementVisible { element: ElementId, visible: bool },
    Click(ElementId),
    Remove(ElementId),
    Opacity(f32),
    Translation { dx: f32, dy: f32 },
    Scale { sx: f32, sy: f32 },
    Vibrate(u64),
}

#[derive(Default)]
pub struct RecordingHost {
    calls: Vec<HostCall>,
    detached: HashSet<Surface>,
    vibrate_error: Option<HostError>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<HostCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// Makes `surface` report as detached from now on.
    pub fn detach(&mut self, surface: Surface) {
        self.detached.insert(surface);
    }

    /// Makes every later `vibrate` fail with `error`.
    pub fn fail_vibrate(&mut self, error: HostError) {
        self.vibrate_error = Some(error);
    }

    pub fn positions(&self, element: ElementId) -> Vec<(i32, i32)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                HostCall::Position { element: e, x, y } if *e == element => Some((*x, *y)),
                _ => None,
            })
            .collect()
    }

    pub fn last_position(&self, element: ElementId) -> Option<(i32, i32)> {
        self.positions(element).last().copied()
    }

    pub fn vibrations(&self) -> usize {
        self.count(|call| matches!(call, HostCall::Vibrate(_)))
    }

    pub fn clicks(&self, element: ElementId) -> usize {
        self.count(|call| *call == HostCall::Click(element))
    }

    pub fn removals(&self) -> Vec<ElementId> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                HostCall::Remove(id) => Some(*id),
                _ => None,
            })
            .collect()
    }

    pub fn last_element_scale(&self, element: ElementId) -> Option<f32> {
        self.calls.iter().rev().find_map(|call| match call {
            HostCall::ElementScale { element: e, scale } if *e == element => Some(*scale),
            _ => None,
        })
    }

    pub fn last_visibility(&self, element: ElementId) -> Option<bool> {
        self.calls.iter().rev().find_map(|call| match call {
            HostCall::ElementVisible { element: e, visible } if *e == element => Some(*visible),
            _ => None,
        })
    }

    pub fn last_opacity(&self) -> Option<f32> {
        self.calls.iter().rev().find_map(|call| match call {
            HostCall::Opacity(alpha) => Some(*alpha),
            _ => None,
        })
    }

    pub fn last_translation(&self) -> Option<(f32, f32)> {
        self.calls.iter().rev().find_map(|call| match call {
            HostCall::Translation { dx, dy } => Some((*dx, *dy)),
            _ => None,
        })
    }

    pub fn last_scale(&self) -> Option<(f32, f32)> {
        self.calls.iter().rev().find_map(|call| match call {
            HostCall::Scale { sx, sy } => Some((*sx, *sy)),
            _ => None,
        })
    }

    fn count(&self, predicate: impl Fn(&HostCall) -> bool) -> usize {
        self.calls.iter().filter(|call| predicate(call)).count()
    }
}

impl FloatingHost for RecordingHost {
    fn apply_position(&mut self, element: ElementId, x: i32, y: i32) {
        self.calls.push(HostCall::Position { element, x, y });
    }

    fn apply_element_scale(&mut self, element: ElementId, scale: f32) {
        self.calls.push(HostCall::ElementScale { element, scale });
    }

    fn set_element_visible(&mut self, element: ElementId, visible: bool) {
        self.calls.push(HostCall::ElementVisible { element, visible });
    }

    fn perform_click(&mut self, element: ElementId) {
        self.calls.push(HostCall::Click(element));
    }

    fn remove_element(&mut self, element: ElementId) {
        self.calls.push(HostCall::Remove(element));
    }

    fn apply_opacity(&mut self, alpha: f32) {
        self.calls.push(HostCall::Opacity(alpha));
    }

    fn apply_translation(&mut self, dx: f32, dy: f32) {
        self.calls.push(HostCall::Translation { dx, dy });
    }

    fn apply_scale(&mut self, sx: f32, sy: f32) {
        self.calls.push(HostCall::Scale { sx, sy });
    }

    fn vibrate(&mut self, millis: u64) -> Result<(), HostError> {
        self.calls.push(HostCall::Vibrate(millis));
        match &self.vibrate_error {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn is_attached(&self, surface: Surface) -> bool {
        !self.detached.contains(&surface)
    }
}
