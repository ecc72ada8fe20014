//! Markup annotator — makes engine output clickable and resolvable.
//!
//! The engine's SVG is parsed read-only and the changes are spliced into the
//! original text at byte offsets taken from the parse, so markup we do not
//! touch survives byte-for-byte.
//!
//! Nodes and clusters without an id get `node-<label>` when their label is a
//! bare identifier; edge groups without an id get `edge-<from>-<to>` derived
//! from their path id. Both forms are understood by [`crate::resolve`].

use std::sync::LazyLock;

use regex::Regex;
use roxmltree::{Document, Node, ParsingOptions};

use crate::error::Result;

const CLICKABLE_ATTR: &str = "data-clickable";
const STYLE_MARKER: &str = "data-sourcemap";
const TITLE_TEXT: &str = "Click to highlight source code";

const CLICKABLE_CSS: &str = "\
text, path, circle, rect, polygon, ellipse, line, polyline { user-select: none; }
g[id]:hover { cursor: pointer; }
.node:hover, .cluster:hover, .edgePath:hover { filter: brightness(0.95); }
[data-clickable] { cursor: pointer; }
[data-clickable]:hover { filter: brightness(0.9); stroke-width: 1.2; }";

static BARE_IDENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("bare identifier pattern"));

static EDGE_PATH_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:L-)?([A-Za-z0-9_]+(?:-[A-Za-z0-9_]+)+?)(?:-\d+)?$")
        .expect("edge path id pattern")
});

// ─── Types ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Node,
    Cluster,
    Edge,
    Label,
}

/// An interactive element found in the rendered markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickableElement {
    /// Element id after annotation; `None` when none could be derived.
    pub id: Option<String>,
    pub kind: ElementKind,
}

/// Annotated markup plus the interactive elements it contains, in
/// document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotated {
    pub svg: String,
    pub elements: Vec<ClickableElement>,
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn has_class(node: Node<'_, '_>, token: &str) -> bool {
    node.attribute("class")
        .unwrap_or_default()
        .split_whitespace()
        .any(|t| t == token)
}

fn classify(node: Node<'_, '_>) -> Option<ElementKind> {
    if !node.is_element() {
        return None;
    }
    let is_group = node.tag_name().name() == "g";
    if is_group && has_class(node, "node") {
        Some(ElementKind::Node)
    } else if is_group && has_class(node, "cluster") {
        Some(ElementKind::Cluster)
    } else if is_group && has_class(node, "edgePath") {
        Some(ElementKind::Edge)
    } else if has_class(node, "edgeLabel") || has_class(node, "nodeLabel") {
        Some(ElementKind::Label)
    } else {
        None
    }
}

fn text_content(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}

/// `node-<label>` for a node whose first `<text>` is a bare identifier.
fn derive_node_id(node: Node<'_, '_>) -> Option<String> {
    let text = node
        .descendants()
        .find(|n| n.is_element() && n.tag_name().name() == "text")?;
    let label = text_content(text);
    let label = label.trim();
    BARE_IDENT_RE
        .is_match(label)
        .then(|| format!("node-{label}"))
}

/// `edge-<from>-<to>` from the first `<path>` id such as `L-A-B-0`.
///
/// Endpoints may contain hyphens, so the pair is kept whole and split by the
/// resolver.
fn derive_edge_id(node: Node<'_, '_>) -> Option<String> {
    let path_id = node
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "path")
        .find_map(|n| n.attribute("id"))?;
    let caps = EDGE_PATH_ID_RE.captures(path_id)?;
    Some(format!("edge-{}", &caps[1]))
}

/// Byte offset just past the element's tag name in its start tag.
fn after_tag_name(svg: &str, node: Node<'_, '_>) -> usize {
    let start = node.range().start + 1;
    svg[start..]
        .find(|c: char| c.is_whitespace() || c == '>' || c == '/')
        .map_or(start, |off| start + off)
}

/// Byte offset of the element's closing tag, or `None` if self-closing.
fn closing_tag(svg: &str, node: Node<'_, '_>) -> Option<usize> {
    let range = node.range();
    let raw = &svg[range.clone()];
    if raw.ends_with("/>") {
        return None;
    }
    raw.rfind("</").map(|off| range.start + off)
}

fn splice(svg: &str, mut edits: Vec<(usize, String)>) -> String {
    edits.sort_by_key(|(pos, _)| *pos);
    let extra: usize = edits.iter().map(|(_, s)| s.len()).sum();
    let mut out = String::with_capacity(svg.len() + extra);
    let mut cursor = 0;
    for (pos, text) in &edits {
        out.push_str(&svg[cursor..*pos]);
        out.push_str(text);
        cursor = *pos;
    }
    out.push_str(&svg[cursor..]);
    out
}

// ─── Public API ──────────────────────────────────────────────────────────────

/// Annotate engine output so that its elements can be clicked and resolved.
///
/// Already-annotated elements are left alone, so running this twice is the
/// same as running it once.
pub fn annotate(svg: &str) -> Result<Annotated> {
    let mut options = ParsingOptions::default();
    options.allow_dtd = true;
    let doc = Document::parse_with_options(svg, options)?;

    let mut edits: Vec<(usize, String)> = Vec::new();
    let mut elements = Vec::new();

    for node in doc.descendants() {
        let Some(kind) = classify(node) else {
            continue;
        };

        let existing = node.attribute("id").map(str::to_owned);
        let derived = match (&existing, kind) {
            (Some(_), _) => None,
            (None, ElementKind::Node | ElementKind::Cluster) => derive_node_id(node),
            (None, ElementKind::Edge) => derive_edge_id(node),
            (None, ElementKind::Label) => None,
        };
        elements.push(ClickableElement {
            id: existing.or_else(|| derived.clone()),
            kind,
        });

        if node.has_attribute(CLICKABLE_ATTR) {
            continue;
        }

        let mut attrs = String::new();
        if let Some(id) = &derived {
            tracing::debug!(id, ?kind, "derived element id");
            attrs.push_str(&format!(r#" id="{id}""#));
        }
        attrs.push_str(&format!(r#" {CLICKABLE_ATTR}="true""#));
        edits.push((after_tag_name(svg, node), attrs));

        if kind != ElementKind::Label {
            if let Some(pos) = closing_tag(svg, node) {
                edits.push((pos, format!("<title>{TITLE_TEXT}</title>")));
            }
        }
    }

    let root = doc.root_element();
    let styled = root.descendants().any(|n| {
        n.is_element() && n.tag_name().name() == "style" && n.has_attribute(STYLE_MARKER)
    });
    if !styled {
        if let Some(pos) = closing_tag(svg, root) {
            edits.push((
                pos,
                format!(r#"<style {STYLE_MARKER}="clickable">{CLICKABLE_CSS}</style>"#),
            ));
        }
    }

    tracing::debug!(
        elements = elements.len(),
        edits = edits.len(),
        "annotated rendered markup"
    );

    Ok(Annotated {
        svg: splice(svg, edits),
        elements,
    })
}
