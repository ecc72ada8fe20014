//! mermaid-sourcemap — map rendered Mermaid diagram elements back to the
//! source lines that declared them.
//!
//! Backs a live editor/preview: the source is scanned into an
//! identifier→line map on every edit, and a click on a rendered element is
//! resolved to a best-guess line for highlighting. The diagram engine itself
//! is an external collaborator reached through [`preview::DiagramRenderer`].
//!
//! Modules:
//!   line_map   // source text → identifier→line snapshot
//!   resolve    // element id → line, cascade of heuristics
//!   annotate   // give engine SVG resolvable, clickable element ids
//!   preview    // engine boundary; failures become an inline error
//!   viewport   // pan/zoom arithmetic
//!   session    // live editing state tying the above together

pub mod annotate;
pub mod config;
pub mod error;
pub mod line_map;
pub mod preview;
pub mod resolve;
pub mod session;
pub mod viewport;

#[cfg(feature = "wasm")]
mod wasm;

pub use config::PreviewConfig;
pub use error::{Error, RenderError, Result};
pub use line_map::{LineMap, build_mapping};
pub use resolve::{Resolution, Strategy, resolve, resolve_detailed};
pub use session::LiveSession;

/// Resolve `element_id` against freshly mapped `src`.
///
/// Convenience for one-shot lookups; a live editor should keep a
/// [`LiveSession`] instead of rebuilding the map per click.
pub fn line_for_element(src: &str, element_id: &str) -> Option<usize> {
    resolve(element_id, &LineMap::from_source(src))
}
