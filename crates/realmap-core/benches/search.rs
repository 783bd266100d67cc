use criterion::{criterion_group, criterion_main, Criterion};
use realmap_core::{Feature, GeoStore, Geometry, LayerKind, SearchIndex};
use std::hint::black_box;

fn synthetic(n: u32) -> Vec<Feature> {
    (0..n)
        .map(|id| Feature {
            id,
            name: format!("Keep of House {id:05} at the Winter Crossing"),
            kind: LayerKind::Location,
            geometry: Geometry::Point([0.0, 0.0]),
            summary: String::new(),
            url: String::new(),
        })
        .collect()
}

fn bench_search(c: &mut Criterion) {
    let store = GeoStore::load().expect("bundled dataset");
    let mut bundled = SearchIndex::new();
    for kind in LayerKind::ALL {
        bundled.add_features(store.features(kind), kind);
    }

    let features = synthetic(10_000);
    let mut large = SearchIndex::new();
    large.add_features(&features, LayerKind::Location);

    c.bench_function("search bundled 'winter'", |b| {
        b.iter(|| bundled.search(black_box("winter")))
    });
    c.bench_function("search 10k prefix", |b| b.iter(|| large.search(black_box("keep of house 09"))));
    c.bench_function("search 10k substring", |b| b.iter(|| large.search(black_box("crossing"))));
    c.bench_function("index 10k", |b| {
        b.iter(|| {
            let mut idx = SearchIndex::new();
            idx.add_features(black_box(&features), LayerKind::Location);
            idx
        })
    });
}

criterion_group!(benches, bench_search);
criterion_main!(benches);
