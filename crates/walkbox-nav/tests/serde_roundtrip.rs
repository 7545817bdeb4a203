#![cfg(feature = "serde")]

use walkbox_nav::{NavGraph, NavPath, Polygon, Vec2};

#[test]
fn polygons_roundtrip_via_serde_and_rebuild_identically() {
    let polygons = vec![
        Polygon::new(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
        ]),
        Polygon::new(vec![
            Vec2::new(10.0, 0.0),
            Vec2::new(20.0, 0.0),
            Vec2::new(15.0, 8.0),
        ]),
    ];

    let json = serde_json::to_string(&polygons).expect("serialize polygons");
    // Polygons serialize as bare point lists.
    assert!(json.starts_with("[[{\"x\":0.0,\"y\":0.0}"));
    let decoded: Vec<Polygon> = serde_json::from_str(&json).expect("deserialize polygons");
    assert_eq!(decoded, polygons);

    let mut a = NavGraph::new(polygons).expect("graph");
    let mut b = NavGraph::new(decoded).expect("graph");
    assert_eq!(a, b);

    let start = Vec2::new(1.0, 1.0);
    let goal = Vec2::new(15.0, 2.0);
    let p1 = a.find_path(start, goal).expect("path");
    let p2 = b.find_path(start, goal).expect("path");
    assert_eq!(p1, p2);

    let path_json = serde_json::to_string(&p1).expect("serialize path");
    let back: NavPath = serde_json::from_str(&path_json).expect("deserialize path");
    assert_eq!(back, p1);
}
