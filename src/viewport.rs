//! Pan and zoom state for the preview pane.
//!
//! Pointer coordinates are client pixels. Dragging moves the pan offset by
//! the pointer delta since the previous event; the wheel adjusts zoom
//! linearly and clamps it.

use crate::config::PreviewConfig;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    zoom: f64,
    pan: Point,
    /// Last pointer position while a drag is in progress.
    drag_start: Option<Point>,
    initial_zoom: f64,
    min_zoom: f64,
    max_zoom: f64,
    wheel_sensitivity: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::from_valid(&PreviewConfig::default())
    }
}

impl Viewport {
    /// Build a viewport, rejecting a config whose zoom bounds are unusable.
    pub fn try_new(config: &PreviewConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    /// `config` must already have passed [`PreviewConfig::validate`].
    pub(crate) fn from_valid(config: &PreviewConfig) -> Self {
        Self {
            zoom: config.initial_zoom,
            pan: Point::default(),
            drag_start: None,
            initial_zoom: config.initial_zoom,
            min_zoom: config.min_zoom,
            max_zoom: config.max_zoom,
            wheel_sensitivity: config.wheel_sensitivity,
        }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn pan(&self) -> Point {
        self.pan
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_start.is_some()
    }

    /// Apply a wheel event. Positive `delta_y` (scroll down) zooms out.
    /// Non-finite deltas are ignored.
    pub fn wheel(&mut self, delta_y: f64) {
        if !delta_y.is_finite() {
            return;
        }
        let delta = -delta_y * self.wheel_sensitivity;
        self.zoom = (self.zoom + delta).clamp(self.min_zoom, self.max_zoom);
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.drag_start = Some(Point::new(x, y));
    }

    /// Move the pointer; pans only while a drag is in progress.
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        let Some(start) = self.drag_start else {
            return;
        };
        self.pan.x += x - start.x;
        self.pan.y += y - start.y;
        self.drag_start = Some(Point::new(x, y));
    }

    pub fn pointer_up(&mut self) {
        self.drag_start = None;
    }

    /// Leaving the pane ends a drag just like releasing the button.
    pub fn pointer_leave(&mut self) {
        self.drag_start = None;
    }

    pub fn reset(&mut self) {
        self.zoom = self.initial_zoom;
        self.pan = Point::default();
        self.drag_start = None;
    }

    /// CSS `transform` value for the diagram container.
    pub fn css_transform(&self) -> String {
        format!(
            "translate({}px, {}px) scale({})",
            self.pan.x, self.pan.y, self.zoom
        )
    }
}
