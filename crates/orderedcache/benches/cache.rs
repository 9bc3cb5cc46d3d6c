use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use orderedcache::{LruCache, SharedCache};

fn bench_lru_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("lru_get");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("get_hit_1k", |b| {
        let mut cache = LruCache::new(1_000);
        for i in 0..1_000u64 {
            cache.put(i, vec![b'x'; 64]);
        }

        let mut counter = 0u64;
        b.iter(|| {
            black_box(cache.get(&(counter % 1_000)));
            counter += 1;
        });
    });

    group.finish();
}

fn bench_shared_mixed(c: &mut Criterion) {
    let mut group = c.benchmark_group("shared_mixed");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("50_read_50_write", |b| {
        let cache = SharedCache::new(1_000);
        let data = vec![b'x'; 1024];

        for i in 0..100u64 {
            cache.put(i, data.clone());
        }

        let mut counter = 0u64;
        b.iter(|| {
            if counter.is_multiple_of(2) {
                black_box(cache.get(&(counter % 100)));
            } else {
                black_box(cache.put(counter, data.clone()));
            }
            counter += 1;
        });
    });

    group.finish();
}

fn bench_eviction(c: &mut Criterion) {
    let mut group = c.benchmark_group("eviction");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("put_evicting_small_cache", |b| {
        let mut cache = LruCache::new(10);
        let mut counter = 0u64;
        b.iter(|| {
            black_box(cache.put(counter, counter));
            counter += 1;
        });
    });

    group.finish();
}

criterion_group!(benches, bench_lru_get, bench_shared_mixed, bench_eviction);
criterion_main!(benches);
