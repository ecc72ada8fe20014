//! Element resolver — maps a rendered element id back to a source line.
//!
//! The rendering engine's element ids are not a stable contract, so the
//! resolver walks an ordered list of increasingly loose matchers and returns
//! the first hit. A wrong line is preferred over no highlight at all.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::line_map::LineMap;

static EXACT_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^A-Za-z0-9_-])(?:flowchart-|graph-|diagram-)?([A-Za-z0-9_-]+?)(?:-\d+)?$")
        .expect("exact id pattern")
});

static NODE_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bnode-([A-Za-z0-9_-]+)").expect("node prefix pattern"));

static EDGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bedge-([A-Za-z0-9_-]+)").expect("edge pattern"));

// ─── Strategy ────────────────────────────────────────────────────────────────

/// Which matcher produced a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// `[flowchart-|graph-|diagram-]<id>[-<n>]`
    ExactId,
    /// A mapped id occurs anywhere in the element id.
    Substring,
    /// `node-<id>`
    NodePrefix,
    /// `edge-<source>-<target>`
    EdgeEndpoints,
    /// A mapped id occurs between word boundaries.
    WordBoundary,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ExactId => "exact-id",
            Self::Substring => "substring",
            Self::NodePrefix => "node-prefix",
            Self::EdgeEndpoints => "edge-endpoints",
            Self::WordBoundary => "word-boundary",
        };
        f.write_str(name)
    }
}

/// A successful lookup: the line, the node id it came from, and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub line: usize,
    pub node_id: String,
    pub strategy: Strategy,
}

type Matcher = fn(&str, &LineMap) -> Option<(String, usize)>;

/// Matchers in cascade order.
const MATCHERS: &[(Strategy, Matcher)] = &[
    (Strategy::ExactId, match_exact_id),
    (Strategy::Substring, match_substring),
    (Strategy::NodePrefix, match_node_prefix),
    (Strategy::EdgeEndpoints, match_edge_endpoints),
    (Strategy::WordBoundary, match_word_boundary),
];

// ─── Matchers ────────────────────────────────────────────────────────────────

fn lookup(map: &LineMap, id: &str) -> Option<(String, usize)> {
    map.get(id).map(|line| (id.to_string(), line))
}

fn match_exact_id(element_id: &str, map: &LineMap) -> Option<(String, usize)> {
    let caps = EXACT_ID_RE.captures(element_id)?;
    let candidate = caps.get(1)?.as_str();
    tracing::debug!(element_id, candidate, "exact-id candidate");
    lookup(map, candidate)
}

fn match_substring(element_id: &str, map: &LineMap) -> Option<(String, usize)> {
    map.iter()
        .find(|(id, _)| element_id.contains(id))
        .map(|(id, line)| (id.to_string(), line))
}

fn match_node_prefix(element_id: &str, map: &LineMap) -> Option<(String, usize)> {
    let caps = NODE_PREFIX_RE.captures(element_id)?;
    lookup(map, caps.get(1)?.as_str())
}

/// Split `a-b` at each hyphen in turn; identifiers may themselves contain
/// hyphens so there is no single right split.
fn endpoint_splits(pair: &str) -> impl Iterator<Item = (&str, &str)> {
    pair.match_indices('-')
        .map(move |(i, _)| (&pair[..i], &pair[i + 1..]))
        .filter(|(source, target)| !source.is_empty() && !target.is_empty())
}

fn match_edge_endpoints(element_id: &str, map: &LineMap) -> Option<(String, usize)> {
    let caps = EDGE_RE.captures(element_id)?;
    let pair = caps.get(1)?.as_str();
    endpoint_splits(pair)
        .find_map(|(source, _)| lookup(map, source))
        .or_else(|| endpoint_splits(pair).find_map(|(_, target)| lookup(map, target)))
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Same test as `\b<id>\b`: word-ness must change at both ends of the match.
fn bounded_match(haystack: &str, id: &str) -> bool {
    let (Some(first), Some(last)) = (id.chars().next(), id.chars().next_back()) else {
        return false;
    };
    haystack.match_indices(id).any(|(start, _)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + id.len()..].chars().next();
        before.is_some_and(is_word_char) != is_word_char(first)
            && after.is_some_and(is_word_char) != is_word_char(last)
    })
}

fn match_word_boundary(element_id: &str, map: &LineMap) -> Option<(String, usize)> {
    map.iter()
        .find(|(id, _)| bounded_match(element_id, id))
        .map(|(id, line)| (id.to_string(), line))
}

// ─── Public API ──────────────────────────────────────────────────────────────

/// Resolve `element_id` and report which matcher succeeded.
pub fn resolve_detailed(element_id: &str, map: &LineMap) -> Option<Resolution> {
    for (strategy, matcher) in MATCHERS {
        if let Some((node_id, line)) = matcher(element_id, map) {
            tracing::debug!(element_id, %strategy, node_id, line, "resolved element");
            return Some(Resolution {
                line,
                node_id,
                strategy: *strategy,
            });
        }
    }
    tracing::debug!(element_id, "no mapping found for element");
    None
}

/// Resolve `element_id` to a 1-based source line, or `None` if no
/// heuristic matched.
pub fn resolve(element_id: &str, map: &LineMap) -> Option<usize> {
    resolve_detailed(element_id, map).map(|r| r.line)
}
