use floatkit_geometry::ScreenMetrics;

use crate::{ElementId, FloatingHost, HostError, Surface};

/// Minimal in-crate host; integration tests use `floatkit-testing` instead.
#[derive(Default)]
pub(crate) struct TestHost {
    pub positions: Vec<(ElementId, i32, i32)>,
    pub element_scales: Vec<(ElementId, f32)>,
    pub visibility: Vec<(ElementId, bool)>,
    pub clicks: Vec<ElementId>,
    pub removed: Vec<ElementId>,
    pub opacity: Vec<f32>,
    pub translations: Vec<(f32, f32)>,
    pub scales: Vec<f32>,
    pub vibrations: Vec<u64>,
    pub detached: Vec<Surface>,
}

impl TestHost {
    pub fn last_position(&self, element: ElementId) -> Option<(i32, i32)> {
        self.positions
            .iter()
            .rev()
            .find(|(id, _, _)| *id == element)
            .map(|(_, x, y)| (*x, *y))
    }
}

impl FloatingHost for TestHost {
    fn apply_position(&mut self, element: ElementId, x: i32, y: i32) {
        self.positions.push((element, x, y));
    }

    fn apply_element_scale(&mut self, element: ElementId, scale: f32) {
        self.element_scales.push((element, scale));
    }

    fn set_element_visible(&mut self, element: ElementId, visible: bool) {
        self.visibility.push((element, visible));
    }

    fn perform_click(&mut self, element: ElementId) {
        self.clicks.push(element);
    }

    fn remove_element(&mut self, element: ElementId) {
        self.removed.push(element);
    }

    fn apply_opacity(&mut self, alpha: f32) {
        self.opacity.push(alpha);
    }

    fn apply_translation(&mut self, dx: f32, dy: f32) {
        self.translations.push((dx, dy));
    }

    fn apply_scale(&mut self, sx: f32, _sy: f32) {
        self.scales.push(sx);
    }

    fn vibrate(&mut self, millis: u64) -> Result<(), HostError> {
        self.vibrations.push(millis);
        Err(HostError::Unavailable("vibrator"))
    }

    fn is_attached(&self, surface: Surface) -> bool {
        !self.detached.contains(&surface)
    }
}

pub(crate) fn metrics(width: f32, height: f32) -> ScreenMetrics {
    ScreenMetrics::new(width, height, 1.0, 0.0).unwrap()
}
