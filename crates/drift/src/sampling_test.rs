use rand::SeedableRng;
use rand_chacha::ChaChaRng;
use units::Length;

use crate::sampling::{rng_from_seed, sample_disk, DiskSampler};

#[test]
fn sample_disk_stays_inside_radius() {
    let mut rng = ChaChaRng::seed_from_u64(42);
    let radius = 0.5 / 3.0;

    for _ in 0..10_000 {
        let p = sample_disk(&mut rng, radius);
        assert!(
            p.radius_squared() <= radius * radius,
            "Point ({}, {}) lies outside radius {}",
            p.x,
            p.y,
            radius
        );
    }
}

#[test]
fn sample_disk_is_uniform_by_area() {
    let mut rng = ChaChaRng::seed_from_u64(42);
    let n = 40_000;

    // Inner disk of half the radius holds a quarter of the area
    let inside_half = (0..n)
        .map(|_| sample_disk(&mut rng, 1.0))
        .filter(|p| p.radius_squared() < 0.25)
        .count();
    let fraction = inside_half as f64 / n as f64;

    assert!(
        (fraction - 0.25).abs() < 0.01,
        "Fraction inside r/2 was {}, expected ~0.25",
        fraction
    );
}

#[test]
fn sample_disk_is_centred() {
    let mut rng = ChaChaRng::seed_from_u64(7);
    let n = 20_000;
    let (sx, sy) = (0..n)
        .map(|_| sample_disk(&mut rng, 2.0))
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));

    assert!((sx / n as f64).abs() < 0.03, "Mean x {} not near 0", sx / n as f64);
    assert!((sy / n as f64).abs() < 0.03, "Mean y {} not near 0", sy / n as f64);
}

#[test]
fn degenerate_radius_returns_origin() {
    let mut rng = ChaChaRng::seed_from_u64(1);

    for radius in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let p = sample_disk(&mut rng, radius);
        assert_eq!(p.x, 0.0, "radius {}", radius);
        assert_eq!(p.y, 0.0, "radius {}", radius);
    }
}

#[test]
fn disk_sampler_offsets_by_centre() {
    let sampler = DiskSampler::new(Length::from_mm(1.0))
        .with_center(Length::from_cm(2.0), Length::from_cm(-1.0));
    let mut rng = ChaChaRng::seed_from_u64(3);

    for _ in 0..1000 {
        let p = sampler.sample(&mut rng);
        let dx = p.x - 2.0;
        let dy = p.y + 1.0;
        assert!(dx * dx + dy * dy <= 0.01 + 1e-12);
    }
}

#[test]
fn same_seed_same_sequence() {
    let sampler = DiskSampler::new(Length::from_cm(1.0));
    let mut a = rng_from_seed(99, 0);
    let mut b = rng_from_seed(99, 0);

    for _ in 0..100 {
        assert_eq!(sampler.sample(&mut a), sampler.sample(&mut b));
    }
}

#[test]
fn streams_are_independent() {
    let sampler = DiskSampler::new(Length::from_cm(1.0));
    let mut a = rng_from_seed(99, 0);
    let mut b = rng_from_seed(99, 1);

    let first_a: Vec<_> = (0..10).map(|_| sampler.sample(&mut a)).collect();
    let first_b: Vec<_> = (0..10).map(|_| sampler.sample(&mut b)).collect();
    assert_ne!(first_a, first_b);
}
