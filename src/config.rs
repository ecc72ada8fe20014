//! Configuration for the live preview.

use std::time::Duration;

use crate::error::{Error, Result};

/// Tunables for the viewport and the source highlight.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewConfig {
    /// Zoom factor after a reset.
    pub initial_zoom: f64,
    /// Lower zoom clamp.
    pub min_zoom: f64,
    /// Upper zoom clamp.
    pub max_zoom: f64,
    /// Zoom change per unit of wheel delta (scrolling down zooms out).
    pub wheel_sensitivity: f64,
    /// How long a clicked element's source line stays highlighted.
    pub highlight_duration: Duration,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            initial_zoom: 1.0,
            min_zoom: 0.1,
            max_zoom: 5.0,
            wheel_sensitivity: 0.01,
            highlight_duration: Duration::from_millis(2000),
        }
    }
}

impl PreviewConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject settings that would make the zoom clamp meaningless.
    pub fn validate(&self) -> Result<()> {
        if !(self.min_zoom > 0.0 && self.min_zoom.is_finite()) {
            return Err(Error::Config(format!(
                "min_zoom must be a positive number, got {}",
                self.min_zoom
            )));
        }
        if !(self.max_zoom >= self.min_zoom && self.max_zoom.is_finite()) {
            return Err(Error::Config(format!(
                "max_zoom ({}) must be at least min_zoom ({})",
                self.max_zoom, self.min_zoom
            )));
        }
        if !(self.min_zoom..=self.max_zoom).contains(&self.initial_zoom) {
            return Err(Error::Config(format!(
                "initial_zoom ({}) must lie within {}..={}",
                self.initial_zoom, self.min_zoom, self.max_zoom
            )));
        }
        if !self.wheel_sensitivity.is_finite() {
            return Err(Error::Config("wheel_sensitivity must be finite".to_string()));
        }
        Ok(())
    }
}
