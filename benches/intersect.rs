// Copyright 2026 the Kurbo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks of curve intersection and stitching.

// Run with `RUSTFLAGS="--cfg nightly" cargo +nightly bench`.
#![cfg(nightly)]
#![feature(test)]
extern crate test;
use test::{black_box, Bencher};

use std::sync::Arc;

use bezclip::{clip_paths, find_intersections, Clipper, CubicBez, CubicPath, StitchOptions};

#[bench]
fn bench_two_crossings(b: &mut Bencher) {
    let c1 = CubicBez::new((0.0, 0.0), (0.5, 1.0), (0.5, 1.0), (1.0, 0.0));
    let c2 = CubicBez::new((0.0, 1.0), (0.5, 0.0), (0.5, 0.0), (1.0, 1.0));
    b.iter(|| find_intersections(black_box(&c1), black_box(&c2), 1e-9));
}

#[bench]
fn bench_nine_crossings(b: &mut Bencher) {
    let c1 = CubicBez::new((0.2, 0.0), (0.5, 3.0), (0.5, -2.0), (0.8, 1.0));
    let c2 = CubicBez::new((0.0, 0.0), (2.5, 0.5), (-1.5, 0.5), (1.0, 0.0));
    b.iter(|| find_intersections(black_box(&c1), black_box(&c2), 1e-9));
}

#[bench]
fn bench_tangent(b: &mut Bencher) {
    let arch = CubicBez::new((0.0, 0.0), (1.0 / 3.0, 4.0 / 3.0), (2.0 / 3.0, 4.0 / 3.0), (1.0, 0.0));
    let roof = CubicBez::from_line((-0.5, 1.0), (1.5, 1.0));
    b.iter(|| find_intersections(black_box(&arch), black_box(&roof), 1e-9));
}

#[bench]
fn bench_miss(b: &mut Bencher) {
    let c1 = CubicBez::new((0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0));
    let c2 = CubicBez::new((0.0, 0.9), (0.3, 1.5), (0.7, 1.5), (1.0, 0.9));
    b.iter(|| find_intersections(black_box(&c1), black_box(&c2), 1e-9));
}

#[bench]
fn bench_circle_lens(b: &mut Bencher) {
    let a = Arc::new(CubicPath::circle((0.0, 0.0), 1.0));
    let c = Arc::new(CubicPath::circle((1.0, 0.0), 1.0));
    let clipper = Clipper::default();
    let options = StitchOptions::default();
    b.iter(|| clip_paths(black_box(&a), black_box(&c), &clipper, &options));
}
