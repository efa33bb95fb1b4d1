#![allow(clippy::cast_possible_truncation)]
#![allow(missing_docs)]

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput};
use wirepack_benchmark::{Batch, create_batch};
use wirepack_serialize::{Reader, Writer, decode_exact, encode, encoded_len};

#[global_allocator]
static ALLOC: mimalloc::MiMalloc = mimalloc::MiMalloc;

const BATCH_SIZES: [u64; 3] = [16, 256, 4096];

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    for len in BATCH_SIZES {
        let batch = create_batch(len);
        let bytes = encoded_len(&batch).unwrap() as u64;
        group.throughput(Throughput::Bytes(bytes));

        group.bench_with_input(BenchmarkId::new("batch", len), &batch, |b, batch| {
            b.iter(|| encode(black_box(batch)).unwrap());
        });
        group.bench_with_input(
            BenchmarkId::new("encoded_len", len),
            &batch,
            |b, batch| b.iter(|| encoded_len(black_box(batch)).unwrap()),
        );
    }

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for len in BATCH_SIZES {
        let bytes = encode(&create_batch(len)).unwrap();
        group.throughput(Throughput::Bytes(bytes.len() as u64));

        group.bench_with_input(BenchmarkId::new("batch", len), &bytes, |b, bytes| {
            b.iter(|| decode_exact::<Batch>(black_box(bytes)).unwrap());
        });
    }

    group.finish();
}

fn bench_stream(c: &mut Criterion) {
    let mut group = c.benchmark_group("stream");
    let scalars: Vec<u64> = (0..4096).collect();

    group.throughput(Throughput::Elements(scalars.len() as u64));
    group.bench_function("write_scalars", |b| {
        b.iter(|| {
            let mut writer = Writer::with_capacity(scalars.len() * 8);
            for value in &scalars {
                writer.write(black_box(value)).unwrap();
            }
            writer.into_inner()
        });
    });

    let mut writer = Writer::new();
    for value in &scalars {
        writer.write(value).unwrap();
    }
    let bytes = writer.into_inner();

    group.bench_function("read_scalars", |b| {
        b.iter(|| {
            let mut reader = Reader::new(black_box(&bytes));
            let mut sum = 0u64;
            while !reader.is_exhausted() {
                sum = sum.wrapping_add(reader.read::<u64>().unwrap());
            }
            sum
        });
    });

    group.finish();
}

criterion::criterion_group!(benches, bench_encode, bench_decode, bench_stream);
criterion::criterion_main!(benches);
