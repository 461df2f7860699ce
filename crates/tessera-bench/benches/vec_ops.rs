//! Criterion micro-benchmarks for the fixed-capacity vector, shared spans
//! and dual arithmetic.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use tessera_dual::Dual;
use tessera_span::SharedSpan;
use tessera_vec::StaticVec;

/// Benchmark: push 256 values then drain with pop.
fn bench_static_vec_push_pop(c: &mut Criterion) {
    c.bench_function("static_vec_push_pop_256", |b| {
        b.iter(|| {
            let mut v = StaticVec::<u32, 256>::new();
            for i in 0..256 {
                v.push(black_box(i)).unwrap();
            }
            let mut sum = 0u32;
            while let Some(x) = v.pop() {
                sum = sum.wrapping_add(x);
            }
            black_box(sum);
        });
    });
}

/// Benchmark: insert at the front of a half-full vector, then remove it.
fn bench_static_vec_front_insert(c: &mut Criterion) {
    let mut v: StaticVec<u64, 128> = StaticVec::from_fn(64, |i| i as u64).unwrap();

    c.bench_function("static_vec_front_insert_64", |b| {
        b.iter(|| {
            v.insert(0, black_box(7)).unwrap();
            black_box(v.remove(0).unwrap());
        });
    });
}

/// Benchmark: narrow a shared span repeatedly.
fn bench_span_subspan(c: &mut Criterion) {
    let span: SharedSpan<f32> = (0..4096).map(|i| i as f32).collect();

    c.bench_function("span_subspan_chain", |b| {
        b.iter(|| {
            let mut view = span.clone();
            while view.len() > 1 {
                view = view.subspan(1, view.len() / 2);
            }
            black_box(view.len());
        });
    });
}

/// Benchmark: derivative of a short polynomial-trig expression.
fn bench_dual_expression(c: &mut Criterion) {
    c.bench_function("dual_expression", |b| {
        b.iter(|| {
            let x = Dual::variable(black_box(0.7_f64));
            let y = (x * x + 3.0 * x).sin() * x.exp() / (x + 1.0).sqrt();
            black_box(y.epsilon());
        });
    });
}

criterion_group!(
    benches,
    bench_static_vec_push_pop,
    bench_static_vec_front_insert,
    bench_span_subspan,
    bench_dual_expression
);
criterion_main!(benches);
