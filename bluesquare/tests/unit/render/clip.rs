use kurbo::{PathEl, Shape};

use super::*;

#[test]
fn centered_icon_geometry_for_600() {
    let c = ClipRegion::centered_icon(600);
    assert_eq!(c.side, 150.0);
    assert_eq!(c.offset, Point::new(225.0, 225.0));
    assert_eq!(c.radius, 15.0);
    assert_eq!(c.bounds(), Rect::new(225.0, 225.0, 375.0, 375.0));
}

#[test]
fn path_is_closed_loop_of_lines_and_quads() {
    let path = ClipRegion::centered_icon(600).to_path();
    let els = path.elements();
    assert_eq!(els.len(), 10);
    assert!(matches!(els[0], PathEl::MoveTo(p) if p == Point::new(240.0, 225.0)));
    for (i, el) in els[1..9].iter().enumerate() {
        if i % 2 == 0 {
            assert!(matches!(el, PathEl::LineTo(_)), "element {i} should be a line");
        } else {
            assert!(matches!(el, PathEl::QuadTo(_, _)), "element {i} should be a quad");
        }
    }
    assert!(matches!(els[8], PathEl::QuadTo(_, end) if end == Point::new(240.0, 225.0)));
    assert!(matches!(els[9], PathEl::ClosePath));
}

#[test]
fn corners_are_cut_but_edges_are_inside() {
    let path = ClipRegion::centered_icon(600).to_path();
    assert!(path.contains(Point::new(300.0, 300.0)));
    assert!(path.contains(Point::new(300.0, 226.0)));
    assert!(path.contains(Point::new(226.0, 300.0)));
    assert!(!path.contains(Point::new(226.0, 226.0)));
    assert!(!path.contains(Point::new(374.0, 374.0)));
    assert!(!path.contains(Point::new(224.0, 300.0)));
}

#[test]
fn bounding_box_matches_square() {
    let c = ClipRegion::centered_icon(600);
    let bb = c.to_path().bounding_box();
    assert!((bb.x0 - 225.0).abs() < 1e-9);
    assert!((bb.y1 - 375.0).abs() < 1e-9);
}

#[test]
fn centered_in_uses_short_edge() {
    let c = ClipRegion::centered_in(800, 400);
    assert_eq!(c.side, 100.0);
    assert_eq!(c.offset, Point::new(350.0, 150.0));
    assert_eq!(c.radius, 10.0);
}
