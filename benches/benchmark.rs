use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};

use linked_places::gazetteer::FeatureCollection;
use linked_places::loads;
use linked_places::vocab::AatMatcher;
use serde_json::json;

fn document(features: usize) -> String {
    let features: Vec<_> = (0..features)
        .map(|n| {
            json!({
                "type": "Feature",
                "@id": format!("https://pleiades.stoa.org/places/{n}"),
                "properties": {
                    "title": format!("Place {n}"),
                    "ccodes": ["IT"],
                    "fclasses": ["P"]
                },
                "geometry": { "type": "Point", "coordinates": [12.48, 41.89] },
                "types": [ { "id": format!("t{n}"), "label": "settlement@en" } ]
            })
        })
        .collect();
    json!({ "type": "FeatureCollection", "features": features }).to_string()
}

fn matcher() -> AatMatcher {
    AatMatcher::from_table(&json!({
        "300008347": [
            { "text": "inhabited places", "lang": "en" },
            { "text": "settlement", "lang": "en" }
        ],
        "300386853": [ { "text": "rivers", "lang": "en" } ]
    }))
    .unwrap()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    for size in [1, 100, 1000] {
        let doc = document(size);
        c.bench_function(&format!("parse {size}"), |b| {
            b.iter(|| loads(black_box(&doc)))
        });
    }

    let matcher = matcher();
    for size in [1, 100, 1000] {
        let collection: FeatureCollection = loads(&document(size)).unwrap();
        c.bench_function(&format!("augment {size}"), |b| {
            b.iter_batched(
                || collection.clone(),
                |mut collection| collection.augment(&matcher).unwrap(),
                BatchSize::SmallInput,
            )
        });
    }

    let collection = loads(&document(1000)).unwrap();
    c.bench_function("serialize 1k", |b| b.iter(|| collection.asdict()));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
