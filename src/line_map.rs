//! Line mapper — scans Mermaid source and records where each node id lives.
//!
//! This is a line-oriented heuristic, not a parser: it recognises flowchart
//! node definitions (`A[Start]`) and relationships (`A --> B`) and silently
//! ignores everything else. The map is rebuilt from scratch on every edit.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

/// Identifier syntax: word characters, with single hyphens allowed between
/// them so that `A-->B` never yields `A--`.
const IDENT: &str = r"[A-Za-z0-9_]+(?:-[A-Za-z0-9_]+)*";

/// Link tokens: `-->`, `---`, `->`, `==>`, `===`, `-.->`, `-.-`, `..->`,
/// each optionally opened with `<` for bidirectional links.
const ARROW: &str = r"<?(?:-{2,}>?|={2,}>?|-+>|-?\.+-+>?)";

static NODE_DEF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^({IDENT})[\[{{(>]")).expect("node definition pattern")
});

static RELATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^({IDENT})\s*{ARROW}")).expect("relationship pattern")
});

static TARGET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"{ARROW}\s*(?:\|[^|]*\|\s*)?({IDENT})")).expect("target pattern")
});

// ─── Per-line classification ─────────────────────────────────────────────────

/// What a single source line contributes to the map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineMatch<'a> {
    /// Blank line or `%%` comment.
    Skip,
    /// `id[...]`, `id{...}`, `id(...)` or `id>...]`.
    Node(&'a str),
    /// `source --> target`, possibly chained or with `|label|` text.
    Relation { source: &'a str, targets: Vec<&'a str> },
    /// Anything the heuristic does not recognise.
    Unrecognised,
}

/// Classify one line of Mermaid source. First matching rule wins.
pub fn scan_line(line: &str) -> LineMatch<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with("%%") {
        return LineMatch::Skip;
    }

    if let Some(caps) = NODE_DEF_RE.captures(trimmed) {
        if let Some(id) = caps.get(1) {
            return LineMatch::Node(id.as_str());
        }
    }

    if let Some(caps) = RELATION_RE.captures(trimmed) {
        if let Some(source) = caps.get(1) {
            let rest = &trimmed[source.end()..];
            let targets = TARGET_RE
                .captures_iter(rest)
                .filter_map(|c| c.get(1))
                .map(|m| m.as_str())
                .collect();
            return LineMatch::Relation {
                source: source.as_str(),
                targets,
            };
        }
    }

    LineMatch::Unrecognised
}

// ─── LineMap ─────────────────────────────────────────────────────────────────

/// Immutable snapshot mapping node identifiers to 1-based source lines.
///
/// When an identifier appears on several lines the last one wins, but the
/// key keeps the position of its first insertion, so iteration order is
/// "first seen" order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineMap {
    entries: IndexMap<String, usize>,
}

impl LineMap {
    /// Build a map from an ordered sequence of source lines.
    pub fn build<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = Self::default();
        for (index, line) in lines.into_iter().enumerate() {
            let line_no = index + 1;
            match scan_line(line.as_ref()) {
                LineMatch::Skip => {}
                LineMatch::Node(id) => {
                    tracing::trace!(line = line_no, id, "node definition");
                    map.record(id, line_no);
                }
                LineMatch::Relation { source, targets } => {
                    tracing::trace!(line = line_no, source, ?targets, "relationship");
                    map.record(source, line_no);
                    for target in targets {
                        map.record(target, line_no);
                    }
                }
                LineMatch::Unrecognised => {
                    tracing::trace!(line = line_no, "unrecognised line");
                }
            }
        }
        map
    }

    /// Build a map from newline-delimited source text.
    pub fn from_source(src: &str) -> Self {
        Self::build(src.split('\n'))
    }

    fn record(&mut self, id: &str, line: usize) {
        if let Some(existing) = self.entries.get_mut(id) {
            *existing = line;
        } else {
            self.entries.insert(id.to_string(), line);
        }
    }

    /// Line number recorded for `id`, if any.
    pub fn get(&self, id: &str) -> Option<usize> {
        self.entries.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Entries in iteration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Free-function form of [`LineMap::build`].
pub fn build_mapping<I, S>(lines: I) -> LineMap
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    LineMap::build(lines)
}
