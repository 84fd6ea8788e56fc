//! # Core Cache Benchmarks
//!
//! | Area | Operation |
//! |------|-----------|
//! | shared-types | named-value set serialise / parse |
//! | cc-01 | item freeze and size estimate |
//! | cc-02 | scope validation and lookup |
//! | cc-04 | item save and query |

use cc_01_item_model::CommonItem;
use cc_02_scope_registry::{validate_scope_name, ScopeManager, ScopeRegistry};
use cc_04_item_store::{InMemoryItemStore, ItemQuery, ItemStore, ItemStoreConfig};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use shared_types::{ItemKind, NamedValueSet};

fn sample_set(size: usize) -> NamedValueSet {
    let mut set = NamedValueSet::new();
    for i in 0..size {
        set.set(&format!("name{i}"), format!("value|{i}=x"));
        set.set(&format!("count{i}"), i as i64);
    }
    set
}

fn bench_named_values(c: &mut Criterion) {
    let mut group = c.benchmark_group("shared-types-named-values");
    for size in [4, 32, 256] {
        let set = sample_set(size);
        let text = set.serialise();
        group.throughput(Throughput::Elements((size * 2) as u64));
        group.bench_with_input(BenchmarkId::new("serialise", size), &set, |b, set| {
            b.iter(|| black_box(set.serialise()))
        });
        group.bench_with_input(BenchmarkId::new("parse", size), &text, |b, text| {
            b.iter(|| black_box(NamedValueSet::parse(text).is_ok()))
        });
    }
    group.finish();
}

fn bench_item_freeze(c: &mut Criterion) {
    let payload = vec![7u8; 4096];
    c.bench_function("cc-01-freeze", |b| {
        b.iter(|| {
            let mut item = CommonItem::new(ItemKind::Object, false, "Bench.Item", Some("Test"));
            item.set_app_prop("Currency", "AUD").ok();
            item.set_y_data(Some(payload.clone())).ok();
            item.freeze().ok();
            black_box(item.estimated_size_in_bytes(false))
        })
    });
}

fn bench_scopes(c: &mut Criterion) {
    let scopes = ScopeManager::new();
    let names: Vec<String> = (0..100).map(|i| format!("Desk{i}.Curves")).collect();
    for name in &names {
        scopes.add_scope(name).ok();
    }
    let mut group = c.benchmark_group("cc-02-scopes");
    group.bench_function("validate", |b| {
        b.iter(|| black_box(validate_scope_name("Orion.Market.Curves").is_ok()))
    });
    group.bench_function("exists", |b| {
        b.iter(|| black_box(scopes.exists("desk57.curves").ok()))
    });
    group.finish();
}

fn bench_store(c: &mut Criterion) {
    let mut group = c.benchmark_group("cc-04-item-store");
    let store = InMemoryItemStore::new(ItemStoreConfig::default());
    let mut counter = 0u64;
    group.bench_function("save", |b| {
        b.iter(|| {
            counter += 1;
            let mut item =
                CommonItem::new(ItemKind::Object, false, &format!("item{}", counter % 1000), None);
            item.set_y_data(Some(counter.to_le_bytes().to_vec())).ok();
            black_box(store.save_item(item).is_ok())
        })
    });

    let query = ItemQuery::all().of_kind(ItemKind::Object).after_usn(500);
    group.bench_function("query", |b| {
        b.iter(|| black_box(store.load_items(&query).map(|items| items.len())))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_named_values,
    bench_item_freeze,
    bench_scopes,
    bench_store
);
criterion_main!(benches);
