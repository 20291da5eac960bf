// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Benchmarks for the vector operation wrappers.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use vxe::{vec_add, vec_mul, vec_sl, vec_slo, vec_sra, Float32x4, Int16x8, Int32x4};

const LEN: usize = 4096;

fn bench_float_ops(c: &mut Criterion) {
    let mut group = c.benchmark_group("float32x4");
    let a: Vec<Float32x4> = (0..LEN)
        .map(|i| Float32x4::new([i as f32, 1.0, 2.0, 3.0]))
        .collect();
    let b = Float32x4::splat(1.5);

    group.bench_function("vec_add", |bench| {
        bench.iter(|| a.iter().fold(Float32x4::default(), |acc, &v| vec_add(acc, black_box(v))));
    });
    group.bench_function("vec_mul", |bench| {
        bench.iter(|| a.iter().map(|&v| vec_mul(black_box(v), b)).last());
    });
    group.finish();
}

fn bench_integer_shifts(c: &mut Criterion) {
    let mut group = c.benchmark_group("integer_shifts");
    let words: Vec<Int32x4> = (0..LEN as i32).map(|i| Int32x4::new([i, -i, i * 3, 7])).collect();
    let halves: Vec<Int16x8> = (0..LEN as i16).map(Int16x8::splat).collect();

    group.bench_function("vec_sl_int32x4", |bench| {
        let counts = Int32x4::new([1, 5, 31, 33]);
        bench.iter(|| words.iter().map(|&v| vec_sl(black_box(v), counts)).last());
    });
    group.bench_function("vec_sra_int16x8", |bench| {
        let counts = Int16x8::splat(3);
        bench.iter(|| halves.iter().map(|&v| vec_sra(black_box(v), counts)).last());
    });
    group.bench_function("vec_slo_int32x4", |bench| {
        bench.iter(|| words.iter().map(|&v| vec_slo(black_box(v), 5)).last());
    });
    group.finish();
}

criterion_group!(benches, bench_float_ops, bench_integer_shifts);
criterion_main!(benches);
