//! Live editing session: current source, its line map, the viewport and the
//! transient source highlight.
//!
//! The line map is an immutable snapshot. Every edit builds a fresh one and
//! swaps it in; readers holding the previous `Arc` keep a consistent view.

use std::sync::Arc;
use std::time::Duration;

use crate::config::PreviewConfig;
use crate::error::Result;
use crate::line_map::LineMap;
use crate::preview::{DiagramRenderer, Preview, render_preview};
use crate::resolve::resolve;
use crate::viewport::Viewport;

/// A highlighted source line and the time (ms) at which it expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlight {
    pub line: usize,
    pub expires_at_ms: u64,
}

#[derive(Debug, Clone)]
pub struct LiveSession {
    source: String,
    line_map: Arc<LineMap>,
    highlight: Option<Highlight>,
    highlight_duration: Duration,
    viewport: Viewport,
}

impl Default for LiveSession {
    fn default() -> Self {
        Self::from_valid(&PreviewConfig::default())
    }
}

impl LiveSession {
    /// Start an empty session; fails if `config` does not validate.
    pub fn try_new(config: &PreviewConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    fn from_valid(config: &PreviewConfig) -> Self {
        Self {
            source: String::new(),
            line_map: Arc::new(LineMap::default()),
            highlight: None,
            highlight_duration: config.highlight_duration,
            viewport: Viewport::from_valid(config),
        }
    }

    /// Replace the source text and rebuild the line map.
    ///
    /// Any highlight is dropped since it refers to the old text.
    pub fn set_source(&mut self, text: impl Into<String>) {
        self.source = text.into();
        self.line_map = Arc::new(LineMap::from_source(&self.source));
        self.highlight = None;
        tracing::debug!(
            lines = self.line_count(),
            ids = self.line_map.len(),
            "rebuilt line map"
        );
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Number of source lines as the editor gutter shows them.
    pub fn line_count(&self) -> usize {
        self.source.split('\n').count()
    }

    /// Snapshot of the current line map.
    pub fn line_map(&self) -> Arc<LineMap> {
        Arc::clone(&self.line_map)
    }

    /// Resolve a clicked element and, on success, highlight its line until
    /// `now_ms + highlight_duration`. An unresolved click leaves the current
    /// highlight as it was.
    pub fn activate_element(&mut self, element_id: &str, now_ms: u64) -> Option<usize> {
        let line = resolve(element_id, &self.line_map)?;
        let duration_ms = u64::try_from(self.highlight_duration.as_millis()).unwrap_or(u64::MAX);
        self.highlight = Some(Highlight {
            line,
            expires_at_ms: now_ms.saturating_add(duration_ms),
        });
        Some(line)
    }

    /// The highlighted line at `now_ms`, clearing it once expired.
    pub fn highlighted_line(&mut self, now_ms: u64) -> Option<usize> {
        match self.highlight {
            Some(h) if now_ms < h.expires_at_ms => Some(h.line),
            Some(_) => {
                self.highlight = None;
                None
            }
            None => None,
        }
    }

    pub fn clear_highlight(&mut self) {
        self.highlight = None;
    }

    /// Render the current source through the external engine.
    pub fn render<R>(&self, renderer: &R) -> Preview
    where
        R: DiagramRenderer + ?Sized,
    {
        render_preview(renderer, &self.source)
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }
}
