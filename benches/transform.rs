use criterion::{criterion_group, criterion_main, Criterion};
use eeiors::algebra::leontief_inverse;
use eeiors::data::SupplyUseSystem;
use eeiors::{AnalysisOptions, SutTransform};
use nalgebra::{DMatrix, DVector};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::hint::black_box;

const SECTORS: usize = 120;

/// Seeded system with a diagonally dominant make table so that the implied
/// coefficient matrix keeps its spectral radius well below one.
fn bench_sut(seed: u64) -> SupplyUseSystem {
    let mut rng = SmallRng::seed_from_u64(seed);
    let n = SECTORS;

    let make = DMatrix::from_fn(n, n, |i, j| {
        let noise = rng.gen_range(0.0..1.0);
        if i == j {
            50.0 + noise
        } else {
            noise
        }
    });
    let use_table = DMatrix::from_fn(n, n, |_, _| rng.gen_range(0.0..0.5));
    let final_demand = DMatrix::from_fn(n, 4, |_, _| rng.gen_range(0.0..20.0));
    let industry_output = DVector::from_fn(n, |_, _| rng.gen_range(50.0..150.0));
    let product_output = DVector::from_fn(n, |_, _| rng.gen_range(100.0..200.0));
    let primary_inputs = DMatrix::from_fn(9, n, |_, _| rng.gen_range(0.0..5.0));

    SupplyUseSystem::builder(make, use_table)
        .final_demand(final_demand)
        .industry_output(industry_output)
        .product_output(product_output)
        .primary_inputs(primary_inputs)
        .build()
        .expect("valid benchmark system")
}

fn bench_transforms(c: &mut Criterion) {
    let sut = bench_sut(1234);
    let options = AnalysisOptions::default();

    c.bench_function("technical_coefficient_120", |b| {
        b.iter(|| SutTransform::technical_coefficient(black_box(&sut), &options).unwrap())
    });
    c.bench_function("market_share_120", |b| {
        b.iter(|| SutTransform::market_share(black_box(&sut)).unwrap())
    });
}

fn bench_leontief(c: &mut Criterion) {
    let sut = bench_sut(99);
    let transform = SutTransform::market_share(&sut).unwrap();
    let coefficients = transform.coefficients().clone();

    c.bench_function("leontief_inverse_120", |b| {
        b.iter(|| leontief_inverse(black_box(&coefficients)).unwrap())
    });
}

criterion_group!(benches, bench_transforms, bench_leontief);
criterion_main!(benches);
