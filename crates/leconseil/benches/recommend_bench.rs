use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lecatalogue::{Catalog, CatalogItem};
use leconseil::{Query, RecommendationEngine, TestType};

const TOPICS: &[&str] = &[
    "java", "python", "sql", "leadership", "personality", "verbal", "numerical", "sales",
    "cognitive", "communication", "javascript", "management",
];

fn build_catalog(size: usize) -> Catalog {
    let items = (0..size)
        .map(|i| {
            let a = TOPICS[i % TOPICS.len()];
            let b = TOPICS[(i * 7 + 3) % TOPICS.len()];
            let name = format!("{} {} assessment {}", a, b, i);
            let description = lecatalogue::describe(&name);
            CatalogItem::new(name, format!("https://example.com/view/item-{}", i), description)
        })
        .collect();
    Catalog::new(items).expect("bench catalog")
}

fn bench_build(c: &mut Criterion) {
    let catalog = build_catalog(500);
    c.bench_function("engine_build_500", |b| {
        b.iter(|| RecommendationEngine::new(black_box(catalog.clone())).expect("engine"))
    });
}

fn bench_recommend(c: &mut Criterion) {
    let engine = RecommendationEngine::new(build_catalog(500)).expect("engine");
    let query = Query::new("Java developer with strong communication and numerical skills")
        .with_preferences([TestType::PersonalityBehavior]);

    c.bench_function("recommend_k10_500", |b| {
        b.iter(|| engine.recommend(black_box(&query), 10))
    });
}

criterion_group!(benches, bench_build, bench_recommend);
criterion_main!(benches);
