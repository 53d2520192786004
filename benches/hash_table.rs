use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use bufcore::{ExtendibleHashTable, FrameId, PageId, PageTable};

fn benchmark_extendible_hash_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("ExtendibleHashTable");

    // Inserting into a fresh table pays for every split and doubling.
    for &bucket_capacity in &[2usize, 16, 64] {
        group.bench_with_input(
            BenchmarkId::new("insert_10k", bucket_capacity),
            &bucket_capacity,
            |b, &cap| {
                b.iter_batched(
                    || ExtendibleHashTable::<u64, u64>::new(cap),
                    |table| {
                        for key in 0..10_000u64 {
                            table.insert(key, key);
                        }
                        table
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }

    group.bench_function("find_hit_10k", |b| {
        let table = ExtendibleHashTable::<u64, u64>::new(16);
        for key in 0..10_000u64 {
            table.insert(key, key);
        }
        let mut key = 0u64;
        b.iter(|| {
            key = (key + 7) % 10_000;
            black_box(table.find(&key))
        });
    });

    group.bench_function("page_table_churn", |b| {
        let page_table = PageTable::new(4);
        let mut page = 0u32;
        b.iter(|| {
            page_table.insert(PageId::new(page), FrameId::new(page as usize % 128));
            if page >= 128 {
                page_table.remove(&PageId::new(page - 128));
            }
            page = page.wrapping_add(1);
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_extendible_hash_table);
criterion_main!(benches);
