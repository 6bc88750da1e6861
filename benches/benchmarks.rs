use content_store::{CollectionName, CollectionService, DocumentStore};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::json;
use std::hint::black_box;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

fn bench_path(name: &str, size: usize) -> PathBuf {
    std::env::temp_dir().join(format!("content_store_bench_{}_{}.json", name, size))
}

// Service over a document already holding `size` team members.
fn seeded(name: &str, size: usize) -> (PathBuf, CollectionService) {
    let path = bench_path(name, size);
    let _ = std::fs::remove_file(&path);
    let store = DocumentStore::builder(&path).pretty(false).build().unwrap();
    store
        .mutate(|mut doc| {
            for i in 0..size {
                let fields = json!({ "name": format!("member {i}"), "position": "Engineer" });
                if let serde_json::Value::Object(map) = fields {
                    doc.team.insert(map);
                }
            }
            doc
        })
        .unwrap();
    (path, CollectionService::new(Arc::new(store)))
}

fn bench_create(c: &mut Criterion) {
    let mut group = c.benchmark_group("create");
    group.sample_size(50);
    group.measurement_time(Duration::from_secs(8));
    for size in [10, 100, 1000] {
        group.bench_with_input(BenchmarkId::new("team", size), &size, |b, &size| {
            let (path, svc) = seeded("create", size);
            b.iter(|| {
                let e = svc
                    .create(CollectionName::Team, json!({ "name": "new" }))
                    .unwrap();
                svc.delete(CollectionName::Team, e.id).unwrap();
            });
            let _ = std::fs::remove_file(&path);
        });
    }
}

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("update");
    group.sample_size(50);
    for size in [100, 1000] {
        group.bench_with_input(BenchmarkId::new("team", size), &size, |b, &size| {
            let (path, svc) = seeded("update", size);
            let id = (size / 2) as u64;
            b.iter(|| {
                svc.update(CollectionName::Team, id, json!({ "name": "renamed" }))
                    .unwrap();
            });
            let _ = std::fs::remove_file(&path);
        });
    }
}

fn bench_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("list");
    for size in [100, 1000, 10_000] {
        group.bench_with_input(BenchmarkId::new("team", size), &size, |b, &size| {
            let (path, svc) = seeded("list", size);
            b.iter(|| black_box(svc.list(CollectionName::Team)));
            let _ = std::fs::remove_file(&path);
        });
    }
}

fn bench_open(c: &mut Criterion) {
    let mut group = c.benchmark_group("open");
    for size in [100, 1000, 10_000] {
        group.bench_with_input(BenchmarkId::new("team", size), &size, |b, &size| {
            let (path, _svc) = seeded("open", size);
            b.iter(|| black_box(DocumentStore::open(&path).unwrap()));
            let _ = std::fs::remove_file(&path);
        });
    }
}

criterion_group!(benches, bench_create, bench_update, bench_list, bench_open);
criterion_main!(benches);
