use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use railmap_core::geom::point;
use railmap_core::{City, Color, Connection, Map, TrackStyle};
use railmap_render::svg::{SvgRenderOptions, render_scene_svg};
use railmap_render::{SceneOptions, build_scene, layout_cells};
use std::hint::black_box;

fn grid_map(side: usize) -> Map {
    let mut map = Map::new();
    for row in 0..side {
        for col in 0..side {
            let name = format!("C{row}-{col}");
            let pos = point(10.0 + col as f64 * 60.0, 10.0 + row as f64 * 45.0);
            map.add_city(City::new(name, pos))
                .expect("grid city names are unique");
        }
    }
    for row in 0..side {
        for col in 0..side {
            let here = format!("C{row}-{col}");
            if col + 1 < side {
                let length = 1 + ((row + col) % 4) as i64;
                map.add_connection(Connection::new(
                    here.clone(),
                    format!("C{row}-{}", col + 1),
                    length,
                    Color::ALL[(row + col) % Color::ALL.len()],
                ));
            }
            if row + 1 < side {
                map.add_connection(
                    Connection::new(here, format!("C{}-{col}", row + 1), 2, Color::Red)
                        .with_secondary(Color::Blue),
                );
            }
        }
    }
    map.validate().expect("grid map is valid");
    map
}

fn bench_layout_cells(c: &mut Criterion) {
    let style = TrackStyle::default();
    let mut group = c.benchmark_group("layout_cells");
    for length in [1_i64, 6, 32] {
        group.bench_function(format!("single/{length}"), |b| {
            b.iter(|| {
                layout_cells(
                    black_box(length),
                    point(0.0, 0.0),
                    point(300.0, 120.0),
                    Color::Grey,
                    None,
                    &style,
                )
            })
        });
        group.bench_function(format!("dual/{length}"), |b| {
            b.iter(|| {
                layout_cells(
                    black_box(length),
                    point(0.0, 0.0),
                    point(300.0, 120.0),
                    Color::Grey,
                    Some(Color::White),
                    &style,
                )
            })
        });
    }
    group.finish();
}

fn bench_scene_to_svg(c: &mut Criterion) {
    let options = SceneOptions::default();
    let svg_options = SvgRenderOptions::default();
    let mut group = c.benchmark_group("scene_to_svg");
    for side in [4_usize, 16] {
        let map = grid_map(side);
        group.bench_function(format!("grid/{side}x{side}"), |b| {
            b.iter_batched(
                || &map,
                |map| {
                    let scene = build_scene(map, &options).unwrap();
                    render_scene_svg(&scene, &svg_options)
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_layout_cells, bench_scene_to_svg);
criterion_main!(benches);
