use proptest::prelude::*;
use walkbox_nav::{project_onto_segment, NavGraph, Polygon, Vec2};

fn rect(x0: f32, y0: f32, w: f32, h: f32) -> Polygon {
    Polygon::new(vec![
        Vec2::new(x0, y0),
        Vec2::new(x0 + w, y0),
        Vec2::new(x0 + w, y0 + h),
        Vec2::new(x0, y0 + h),
    ])
}

/// Regular convex polygon around `(cx, cy)`.
fn convex(cx: f32, cy: f32, radius: f32, sides: usize) -> Polygon {
    let points = (0..sides)
        .map(|i| {
            let a = i as f32 / sides as f32 * std::f32::consts::TAU;
            Vec2::new(cx + radius * a.cos(), cy + radius * a.sin())
        })
        .collect();
    Polygon::new(points)
}

fn point_in(range: core::ops::Range<f32>) -> impl Strategy<Value = Vec2> {
    (range.clone(), range).prop_map(|(x, y)| Vec2::new(x, y))
}

proptest! {
    #[test]
    fn points_inside_one_convex_box_walk_straight(
        sides in 3usize..9,
        a in point_in(-0.5..0.5),
        b in point_in(-0.5..0.5),
    ) {
        // The inscribed circle of a regular polygon with circumradius 10 has radius >= 5, so
        // both points are strictly inside.
        let mut graph = NavGraph::new(vec![convex(0.0, 0.0, 10.0, sides)]).unwrap();
        let path = graph.find_path(a * 6.0, b * 6.0).unwrap();
        prop_assert_eq!(path.points, vec![a * 6.0, b * 6.0]);
    }

    #[test]
    fn path_queries_never_leak_query_nodes(
        start in point_in(-10.0..40.0),
        goal in point_in(-10.0..40.0),
    ) {
        let mut graph = NavGraph::new(vec![
            rect(0.0, 0.0, 10.0, 10.0),
            rect(10.0, 0.0, 10.0, 10.0),
            rect(10.0, 10.0, 10.0, 20.0),
        ])
        .unwrap();
        let before = graph.clone();
        let _ = graph.find_path(start, goal);
        prop_assert_eq!(graph, before);
    }

    #[test]
    fn rebuild_depends_only_on_polygons(
        w in 1.0f32..20.0,
        h in 1.0f32..20.0,
        dx in -5.0f32..5.0,
    ) {
        let polygons = vec![rect(0.0, 0.0, w, h), rect(w, dx, w, h)];
        let fresh = NavGraph::new(polygons.clone()).unwrap();

        let mut reused = NavGraph::new(vec![rect(-50.0, -50.0, 3.0, 3.0)]).unwrap();
        reused.set_polygons(polygons).unwrap();
        reused.rebuild();
        prop_assert_eq!(reused, fresh);
    }

    #[test]
    fn projection_is_the_closest_point_on_the_segment(
        p in point_in(-20.0..20.0),
        a in point_in(-10.0..10.0),
        b in point_in(-10.0..10.0),
    ) {
        prop_assume!(a.distance(b) > 0.1);
        let ab = b - a;
        let u = (p - a).dot(ab) / ab.length_squared();
        match project_onto_segment(p, a, b) {
            None => prop_assert!(!(0.0..=1.0).contains(&u)),
            Some(proj) => {
                prop_assert!((0.0..=1.0).contains(&proj.u));
                // No sampled point on the segment is closer than the projection.
                for i in 0..=32 {
                    let q = a.lerp(b, i as f32 / 32.0);
                    prop_assert!(proj.distance_squared <= p.distance_squared(q) + 1e-3);
                }
                // The offset is perpendicular to the segment.
                let offset = p - proj.point;
                prop_assert!(offset.dot(ab).abs() <= 1e-2 * (1.0 + ab.length() * offset.length()));
            }
        }
    }
}
