//! Boundary to the external diagram engine.
//!
//! The engine is opaque: source text in, SVG markup out. Whatever it does
//! wrong (an error or a panic) becomes a static inline error message and
//! never reaches the mapper or the resolver.

use std::panic::{self, AssertUnwindSafe};

use crate::annotate::{ClickableElement, annotate};
use crate::error::RenderError;

/// Inline markup shown in place of a diagram the engine could not render.
pub const ERROR_HTML: &str = r#"<div style="color: red; padding: 1rem;">Error rendering diagram</div>"#;

/// Trait for diagram engines.
pub trait DiagramRenderer {
    /// Render Mermaid source to SVG markup.
    fn render(&self, source: &str) -> Result<String, RenderError>;
}

impl<F> DiagramRenderer for F
where
    F: Fn(&str) -> Result<String, RenderError>,
{
    fn render(&self, source: &str) -> Result<String, RenderError> {
        self(source)
    }
}

/// What the preview pane should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    Diagram {
        svg: String,
        elements: Vec<ClickableElement>,
    },
    Error {
        message: String,
    },
}

impl Preview {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// Markup to inject into the preview pane.
    pub fn to_html(&self) -> String {
        match self {
            Self::Diagram { svg, .. } => svg.clone(),
            Self::Error { .. } => ERROR_HTML.to_string(),
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "renderer panicked".to_string()
    }
}

/// Render `source` through `renderer` and annotate the result.
///
/// Markup the annotator cannot parse is shown as-is, without clickable
/// elements.
pub fn render_preview<R>(renderer: &R, source: &str) -> Preview
where
    R: DiagramRenderer + ?Sized,
{
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| renderer.render(source)));
    let svg = match outcome {
        Ok(Ok(svg)) => svg,
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "failed to render diagram");
            return Preview::Error { message: e.message };
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            tracing::warn!(%message, "diagram renderer panicked");
            return Preview::Error { message };
        }
    };

    match annotate(&svg) {
        Ok(annotated) => Preview::Diagram {
            svg: annotated.svg,
            elements: annotated.elements,
        },
        Err(e) => {
            tracing::warn!(error = %e, "showing rendered markup without annotations");
            Preview::Diagram {
                svg,
                elements: Vec::new(),
            }
        }
    }
}
