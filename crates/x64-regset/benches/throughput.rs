//! Performance benchmarks for `x64_regset`.
//!
//! Measures:
//! - Single insert / membership latency
//! - Memory-operand insertion
//! - Canonical text writing
//! - Text reading (KB/s of source text)
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use x64_regset::catalog::*;
use x64_regset::{Mem, RegSet};

// ─── Set Operations ──────────────────────────────────────────────────────────

fn bench_set_ops(c: &mut Criterion) {
    let mut group = c.benchmark_group("set_ops");

    group.bench_function("insert_contains", |b| {
        b.iter(|| {
            let mut s = RegSet::empty();
            s += black_box(RAX);
            s += black_box(EFLAGS_IOPL);
            s.contains(black_box(EAX))
        })
    });

    group.bench_function("insert_mem_addr32", |b| {
        let m = Mem::base(RBX).with_index(R12, 8).with_addr32();
        b.iter(|| {
            let mut s = RegSet::empty();
            s += black_box(&m);
            s
        })
    });

    group.bench_function("union_intersection", |b| {
        let caller = RegSet::linux_caller_save();
        let callee = RegSet::linux_callee_save();
        b.iter(|| (black_box(caller) | black_box(callee)) & black_box(caller))
    });

    group.finish();
}

// ─── Text ────────────────────────────────────────────────────────────────────

fn bench_text(c: &mut Criterion) {
    let mut group = c.benchmark_group("text");

    let universe = RegSet::universe();
    group.bench_function("write_universe", |b| {
        b.iter(|| black_box(universe).to_string())
    });

    let text = universe.to_string();
    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_function("read_universe", |b| {
        b.iter(|| black_box(text.as_str()).parse::<RegSet>().unwrap())
    });

    let small = "{ %rax %ecx %al %ah %ymm0 %xmm3 %zf }";
    group.throughput(Throughput::Bytes(small.len() as u64));
    group.bench_function("read_small", |b| {
        b.iter(|| black_box(small).parse::<RegSet>().unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_set_ops, bench_text);
criterion_main!(benches);
