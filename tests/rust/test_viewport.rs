use mermaid_sourcemap::{Error, PreviewConfig};
use mermaid_sourcemap::viewport::{Point, Viewport};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_initial_state() {
    let v = Viewport::default();
    assert_eq!(v.zoom(), 1.0);
    assert_eq!(v.pan(), Point::new(0.0, 0.0));
    assert!(!v.is_dragging());
}

#[test]
fn test_wheel_zooms_and_clamps() {
    let mut v = Viewport::default();
    v.wheel(-50.0);
    assert!(approx(v.zoom(), 1.5));
    v.wheel(10.0);
    assert!(approx(v.zoom(), 1.4));
    v.wheel(100.0);
    assert!(approx(v.zoom(), 0.4));
    v.wheel(100.0);
    assert!(approx(v.zoom(), 0.1));
    v.wheel(-10_000.0);
    assert!(approx(v.zoom(), 5.0));
}

#[test]
fn test_drag_pans_by_pointer_delta() {
    let mut v = Viewport::default();
    v.pointer_down(10.0, 10.0);
    assert!(v.is_dragging());
    v.pointer_move(15.0, 20.0);
    assert_eq!(v.pan(), Point::new(5.0, 10.0));
    v.pointer_move(12.0, 20.0);
    assert_eq!(v.pan(), Point::new(2.0, 10.0));
    v.pointer_up();
    v.pointer_move(100.0, 100.0);
    assert_eq!(v.pan(), Point::new(2.0, 10.0));
}

#[test]
fn test_pointer_leave_ends_drag() {
    let mut v = Viewport::default();
    v.pointer_down(0.0, 0.0);
    v.pointer_leave();
    assert!(!v.is_dragging());
    v.pointer_move(5.0, 5.0);
    assert_eq!(v.pan(), Point::default());
}

#[test]
fn test_reset_uses_configured_zoom() {
    let config = PreviewConfig {
        initial_zoom: 2.0,
        ..PreviewConfig::default()
    };
    let mut v = Viewport::try_new(&config).unwrap();
    v.wheel(50.0);
    v.pointer_down(0.0, 0.0);
    v.pointer_move(3.0, 4.0);
    v.reset();
    assert_eq!(v.zoom(), 2.0);
    assert_eq!(v.pan(), Point::default());
    assert!(!v.is_dragging());
}

#[test]
fn test_inverted_zoom_bounds_rejected() {
    let config = PreviewConfig {
        min_zoom: 5.0,
        max_zoom: 1.0,
        initial_zoom: 2.0,
        ..PreviewConfig::default()
    };
    let err = Viewport::try_new(&config).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn test_non_finite_wheel_delta_ignored() {
    let mut v = Viewport::default();
    v.wheel(f64::NAN);
    v.wheel(f64::INFINITY);
    assert_eq!(v.zoom(), 1.0);
    v.wheel(-10.0);
    assert!(approx(v.zoom(), 1.1));
}

#[test]
fn test_css_transform() {
    let mut v = Viewport::default();
    v.pointer_down(0.0, 0.0);
    v.pointer_move(12.5, -3.0);
    assert_eq!(v.css_transform(), "translate(12.5px, -3px) scale(1)");
}

#[test]
fn test_config_validation() {
    assert!(PreviewConfig::default().validate().is_ok());
    let bad = PreviewConfig {
        min_zoom: 0.0,
        ..PreviewConfig::default()
    };
    assert!(bad.validate().is_err());
    let inverted = PreviewConfig {
        min_zoom: 3.0,
        max_zoom: 2.0,
        ..PreviewConfig::default()
    };
    assert!(inverted.validate().is_err());
    let outside = PreviewConfig {
        initial_zoom: 9.0,
        ..PreviewConfig::default()
    };
    assert!(outside.validate().is_err());
}
