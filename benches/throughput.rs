use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use fasthash64::{family::FAMILIES, fnv1a64_index, xxhash64_index};
use nanorand::{Rng, WyRand};
use std::hint::black_box;

// Spans every FarmHash length branch plus a couple of bulk sizes.
const LENGTHS: &[usize] = &[4, 16, 32, 64, 96, 256, 1024, 16 * 1024];

fn bench_bytes(c: &mut Criterion) {
    let mut data = vec![0u8; *LENGTHS.iter().max().unwrap()];
    WyRand::new_seed(42).fill_bytes(&mut data);

    for family in FAMILIES {
        let mut group = c.benchmark_group(family.name);
        for &len in LENGTHS {
            group.throughput(Throughput::Bytes(len as u64));
            group.bench_with_input(BenchmarkId::from_parameter(len), &data[..len], |b, s| {
                b.iter(|| (family.hash)(black_box(s)));
            });
        }
        group.finish();
    }
}

fn bench_index(c: &mut Criterion) {
    c.bench_function("XXH64 index", |b| {
        b.iter(|| xxhash64_index(black_box(0x0123456789abcdef), black_box(7)));
    });
    c.bench_function("FNV1a (64-bit) index", |b| {
        b.iter(|| fnv1a64_index(black_box(0x0123456789abcdef)));
    });
}

criterion_group!(benches, bench_bytes, bench_index);
criterion_main!(benches);
