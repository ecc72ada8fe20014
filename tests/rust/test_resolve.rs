use mermaid_sourcemap::{LineMap, Strategy, line_for_element, resolve, resolve_detailed};

fn ab_map() -> LineMap {
    LineMap::from_source("A[Start]\nB{Is it?}")
}

#[test]
fn test_flowchart_prefix_and_counter() {
    assert_eq!(resolve("flowchart-A-3", &ab_map()), Some(1));
    let r = resolve_detailed("flowchart-B-12", &ab_map()).unwrap();
    assert_eq!(r.line, 2);
    assert_eq!(r.node_id, "B");
    assert_eq!(r.strategy, Strategy::ExactId);
}

#[test]
fn test_other_known_prefixes() {
    assert_eq!(resolve("graph-B", &ab_map()), Some(2));
    assert_eq!(resolve("diagram-A-0", &ab_map()), Some(1));
    assert_eq!(resolve("B", &ab_map()), Some(2));
}

#[test]
fn test_hyphenated_id_with_counter() {
    let map = LineMap::from_source("x[one]\nmy-node[two]");
    let r = resolve_detailed("flowchart-my-node-7", &map).unwrap();
    assert_eq!(r.line, 2);
    assert_eq!(r.strategy, Strategy::ExactId);
}

#[test]
fn test_edge_source_fallback() {
    let map = LineMap::from_source("A[Start]");
    assert_eq!(resolve("edge-A-B", &map), Some(1));
}

#[test]
fn test_substring_first_in_iteration_order() {
    let map = LineMap::from_source("Left[l]\nRight[r]");
    let r = resolve_detailed("L-Right-Left-0", &map).unwrap();
    assert_eq!(r.node_id, "Left");
    assert_eq!(r.line, 1);
    assert_eq!(r.strategy, Strategy::Substring);
}

#[test]
fn test_unresolved() {
    assert_eq!(resolve("flowchart-Zed-4", &ab_map()), None);
    assert_eq!(resolve("", &ab_map()), None);
    assert_eq!(resolve("flowchart-A-3", &LineMap::default()), None);
}

#[test]
fn test_resolution_is_pure() {
    let map = ab_map();
    let before = map.clone();
    let first = resolve_detailed("flowchart-A-3", &map);
    let second = resolve_detailed("flowchart-A-3", &map);
    assert_eq!(first, second);
    assert_eq!(map, before);
}

#[test]
fn test_line_for_element_one_shot() {
    let src = "flowchart TD\n  A --> B\n  B --> C[Done]";
    assert_eq!(line_for_element(src, "flowchart-C-2"), Some(3));
    assert_eq!(line_for_element(src, "flowchart-Q-2"), None);
}

#[test]
fn test_strategy_display() {
    assert_eq!(Strategy::ExactId.to_string(), "exact-id");
    assert_eq!(Strategy::EdgeEndpoints.to_string(), "edge-endpoints");
}
