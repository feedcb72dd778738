use bentok::{Decoder, Encoder, SliceSink, Status};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn sample_message(n_entries: usize) -> Vec<u8> {
    let mut out = Vec::new();
    let mut enc = Encoder::new(&mut out);
    enc.begin_dict().unwrap();
    for i in 0..n_entries {
        let key = format!("key_{}", i);
        enc.push_str(&key).unwrap();
        enc.push_int(i as i32 - 8).unwrap();
    }
    enc.end_dict().unwrap();
    out
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for n_entries in [1, 8, 16].iter() {
        let wire = sample_message(*n_entries);
        group.throughput(Throughput::Bytes(wire.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("byte_at_a_time", n_entries),
            &wire,
            |b, wire| {
                let mut buffer = vec![0u8; 1024];
                b.iter(|| {
                    let mut decoder = Decoder::new(&mut buffer).unwrap();
                    let mut status = Status::Incomplete;
                    for byte in wire {
                        status = decoder.process(black_box(*byte)).unwrap();
                    }
                    black_box(status)
                });
            },
        );
    }
    group.finish();
}

fn bench_token_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("token_walk");

    for n_entries in [8, 16].iter() {
        let wire = sample_message(*n_entries);
        let mut buffer = vec![0u8; 1024];
        let mut decoder = Decoder::new(&mut buffer).unwrap();
        for byte in &wire {
            decoder.process(*byte).unwrap();
        }

        group.throughput(Throughput::Elements(*n_entries as u64 * 2));
        group.bench_function(BenchmarkId::new("iterate", n_entries), |b| {
            b.iter(|| {
                let count = decoder.tokens().unwrap().count();
                black_box(count)
            });
        });
    }
    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    for n_entries in [1, 8, 16].iter() {
        group.throughput(Throughput::Elements(*n_entries as u64));
        group.bench_with_input(
            BenchmarkId::new("dict_entries", n_entries),
            n_entries,
            |b, &n_entries| {
                let mut out = vec![0u8; 1024];
                b.iter(|| {
                    let mut sink = SliceSink::new(&mut out);
                    let mut enc = Encoder::new(&mut sink);
                    enc.begin_dict().unwrap();
                    for i in 0..n_entries {
                        enc.push_bytes(b"key").unwrap();
                        enc.push_int(i as i32).unwrap();
                    }
                    enc.end_dict().unwrap();
                    black_box(sink.len())
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_decode, bench_token_walk, bench_encode);
criterion_main!(benches);
