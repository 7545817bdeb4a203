use criterion::{black_box, criterion_group, criterion_main, Criterion};
use walkbox_nav::{NavGraph, NavGraphQuery, NavPath, Polygon, Vec2};

fn box_grid(width: usize, height: usize, cell: f32) -> Vec<Polygon> {
    let mut polygons = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let x0 = x as f32 * cell;
            let y0 = y as f32 * cell;
            let x1 = (x + 1) as f32 * cell;
            let y1 = (y + 1) as f32 * cell;

            polygons.push(Polygon::new(vec![
                Vec2::new(x0, y0),
                Vec2::new(x1, y0),
                Vec2::new(x1, y1),
                Vec2::new(x0, y1),
            ]));
        }
    }
    polygons
}

fn bench_nav_graph(c: &mut Criterion) {
    let polygons = box_grid(16, 16, 10.0);
    let mut graph = NavGraph::new(polygons.clone()).expect("graph");
    let start = Vec2::new(1.0, 1.0);
    let goal = Vec2::new(159.0, 159.0);

    let mut group = c.benchmark_group("walkbox-nav/graph");

    group.bench_function("rebuild", |b| {
        let mut g = NavGraph::default();
        b.iter(|| {
            g.set_polygons(polygons.clone()).expect("valid");
            black_box(g.mesh_node_count());
        })
    });

    group.bench_function("find_path_alloc", |b| {
        b.iter(|| {
            let path = graph.find_path(start, goal).expect("path");
            black_box(path.points.len());
        })
    });

    let mut query = NavGraphQuery::default();
    let mut out = NavPath::new(Vec::new());
    group.bench_function("find_path_into_reuse", |b| {
        b.iter(|| {
            graph
                .find_path_into(start, goal, &mut query, &mut out)
                .expect("path");
            black_box(out.points.len());
        })
    });

    group.bench_function("shortcut", |b| {
        b.iter(|| {
            let path = graph
                .find_path(Vec2::new(1.0, 1.0), Vec2::new(9.0, 9.0))
                .expect("path");
            black_box(path.points.len());
        })
    });

    group.finish();
}

criterion_group!(benches, bench_nav_graph);
criterion_main!(benches);
