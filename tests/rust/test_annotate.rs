use mermaid_sourcemap::{Error, LineMap, resolve_detailed};
use mermaid_sourcemap::annotate::{ClickableElement, ElementKind, annotate};

const SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg"><g class="root"><g class="edgePath"><path id="L-A-B-0" d="M0,0"/></g><g class="node default" id="flowchart-A-0"><rect/><text>Start</text></g><g class="node"><text><tspan>B</tspan></text></g><g class="cluster"><text>Two words</text></g><g class="edgeLabel"><text>Yes</text></g></g></svg>"#;

#[test]
fn test_elements_in_document_order() {
    let a = annotate(SVG).unwrap();
    assert_eq!(
        a.elements,
        vec![
            ClickableElement {
                id: Some("edge-A-B".into()),
                kind: ElementKind::Edge
            },
            ClickableElement {
                id: Some("flowchart-A-0".into()),
                kind: ElementKind::Node
            },
            ClickableElement {
                id: Some("node-B".into()),
                kind: ElementKind::Node
            },
            ClickableElement {
                id: None,
                kind: ElementKind::Cluster
            },
            ClickableElement {
                id: None,
                kind: ElementKind::Label
            },
        ]
    );
}

#[test]
fn test_derived_ids_written_into_markup() {
    let a = annotate(SVG).unwrap();
    assert!(a.svg.contains(r#"<g id="edge-A-B" data-clickable="true" class="edgePath">"#));
    assert!(a.svg.contains(r#"<g id="node-B" data-clickable="true" class="node">"#));
    assert!(a.svg.contains(r#"<g data-clickable="true" class="node default" id="flowchart-A-0">"#));
    assert!(a.svg.contains(r#"<g data-clickable="true" class="edgeLabel"><text>Yes</text></g>"#));
}

#[test]
fn test_titles_and_style_appended() {
    let a = annotate(SVG).unwrap();
    assert_eq!(a.svg.matches("<title>Click to highlight source code</title>").count(), 4);
    assert!(a.svg.contains("<title>Click to highlight source code</title></g><g data-clickable"));
    assert!(a.svg.ends_with("</style></svg>"));
    assert_eq!(a.svg.matches("<style").count(), 1);
}

#[test]
fn test_untouched_markup_preserved() {
    let svg = r#"<svg><defs><marker id="m"/></defs><!-- c --><rect x="1"/></svg>"#;
    let a = annotate(svg).unwrap();
    assert!(a.elements.is_empty());
    assert!(a.svg.starts_with(r#"<svg><defs><marker id="m"/></defs><!-- c --><rect x="1"/><style"#));
}

#[test]
fn test_annotate_is_idempotent() {
    let once = annotate(SVG).unwrap();
    let twice = annotate(&once.svg).unwrap();
    assert_eq!(once.svg, twice.svg);
    assert_eq!(once.elements, twice.elements);
}

#[test]
fn test_malformed_markup_is_error() {
    let err = annotate("<svg><g></svg>").unwrap_err();
    assert!(matches!(err, Error::Markup(_)));
}

#[test]
fn test_unrecognised_edge_path_id() {
    let svg = r#"<svg><g class="edgePath"><path id="L_A_B_0"/></g></svg>"#;
    let a = annotate(svg).unwrap();
    assert_eq!(a.elements[0].id, None);
    assert!(!a.svg.contains("id=\"edge-"));
}

#[test]
fn test_hyphenated_edge_endpoints() {
    let svg = r#"<svg><g class="edgePath"><path id="L-my-node-other-0"/></g></svg>"#;
    let a = annotate(svg).unwrap();
    let id = a.elements[0].id.as_deref().unwrap();
    assert_eq!(id, "edge-my-node-other");

    let map = LineMap::from_source("graph TD\n  other[x]\n  my-node --> other");
    let r = resolve_detailed(id, &map).unwrap();
    assert_eq!(r.node_id, "other");
    assert_eq!(r.line, 3);
}

#[test]
fn test_style_keeps_hover_rules() {
    let a = annotate(SVG).unwrap();
    assert!(a.svg.contains(".node:hover, .cluster:hover, .edgePath:hover { filter: brightness(0.95); }"));
    assert!(a.svg.contains("stroke-width: 1.2;"));
}
