use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use vitrum_core::table::{HandleAllocator, Table};

#[derive(Debug, Clone, Copy, Default)]
struct Payload([f32; 4]);

fn bench_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("Handle Table");

    group.bench_function("Create/Destroy churn (10k)", |b| {
        let mut table: Table<Payload> = Table::new();
        b.iter(|| {
            let handles: Vec<u32> = (0..10_000)
                .map(|_| table.create(Payload::default()).unwrap_or_default())
                .collect();
            for handle in handles {
                table.destroy(handle);
            }
        });
    });

    // Setup 10,000 live entries with every other one destroyed.
    let mut table: Table<Payload, u64> =
        Table::with_allocator(HandleAllocator::with_min_free_indices(0));
    let mut handles = Vec::new();
    for i in 0..10_000 {
        let handle = table
            .create(Payload([i as f32; 4]))
            .expect("bench table has room");
        if i % 2 == 0 {
            handles.push(handle);
        } else {
            table.destroy(handle);
        }
    }

    group.bench_function("Checked lookup (5k live)", |b| {
        b.iter(|| {
            let mut sum = 0.0;
            for handle in &handles {
                if let Ok(payload) = table.get(*handle) {
                    sum += payload.0[0];
                }
            }
            black_box(sum);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_table);
criterion_main!(benches);
