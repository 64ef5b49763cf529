use approx::assert_relative_eq;

use crate::error::ConfigError;
use crate::histogram::Histogram;

#[test]
fn rejects_invalid_binning() {
    assert!(matches!(
        Histogram::new(0, 0.0, 1.0),
        Err(ConfigError::InvalidHistogram { n_bins: 0, .. })
    ));
    assert!(Histogram::new(10, 1.0, 1.0).is_err());
    assert!(Histogram::new(10, 2.0, 1.0).is_err());
    assert!(Histogram::new(10, f64::NAN, 1.0).is_err());
    assert!(Histogram::new(10, 0.0, f64::INFINITY).is_err());
}

#[test]
fn bins_are_half_open() {
    let mut h = Histogram::new(100, 0.0, 1.0).unwrap();

    assert!(h.fill(0.0));
    assert!(h.fill(0.5));
    assert_eq!(h.count(0), Some(1));
    assert_eq!(h.count(50), Some(1));

    // The high edge belongs to no bin
    assert!(!h.fill(1.0));
    assert_eq!(h.entries(), 2);
    assert_eq!(h.overflow(), 1);
}

#[test]
fn out_of_range_values_are_never_clamped() {
    let mut h = Histogram::new(10, 0.0, 1.0).unwrap();

    assert!(!h.fill(-0.01));
    assert!(!h.fill(1.5));
    assert!(!h.fill(f64::NAN));

    assert_eq!(h.entries(), 0);
    assert_eq!(h.count(0), Some(0));
    assert_eq!(h.count(9), Some(0));
    assert_eq!(h.underflow(), 1);
    assert_eq!(h.overflow(), 1);
}

#[test]
fn value_just_below_high_edge_lands_in_last_bin() {
    let mut h = Histogram::new(3, 0.0, 0.3).unwrap();
    let just_below = f64::from_bits(0.3f64.to_bits() - 1);

    assert!(h.fill(just_below));
    assert_eq!(h.count(2), Some(1));
}

/// Largest double strictly below `x` (finite `x` only).
fn next_below(x: f64) -> f64 {
    if x > 0.0 {
        f64::from_bits(x.to_bits() - 1)
    } else if x < 0.0 {
        f64::from_bits(x.to_bits() + 1)
    } else {
        -f64::from_bits(1)
    }
}

#[test]
fn reported_low_edge_lands_in_its_own_bin() {
    for (n_bins, low, high) in [(100, 0.0, 1.0), (50, 0.0, 1.0), (100, 0.0, 20.0), (7, -0.3, 1.1)] {
        let mut h = Histogram::new(n_bins, low, high).unwrap();
        let edges: Vec<(f64, f64)> = h.bins().map(|b| (b.low, b.high)).collect();
        for &(bin_low, _) in &edges {
            assert!(h.fill(bin_low));
        }
        for (i, &(bin_low, bin_high)) in edges.iter().enumerate() {
            assert_eq!(h.count(i), Some(1), "bin {i} of {n_bins} over [{low}, {high})");
            assert_eq!(h.bin_index(bin_low), Some(i));
            // Just below the upper edge still belongs to this bin
            let below_high = next_below(bin_high);
            if below_high >= bin_low {
                assert_eq!(h.bin_index(below_high), Some(i));
            }
        }
    }
}

#[test]
fn bin_edges_and_centres() {
    let h = Histogram::new(50, 0.0, 1.0).unwrap();
    let bin = h.bin(10).unwrap();

    assert_relative_eq!(bin.low, 0.2, epsilon = 1e-12);
    assert_relative_eq!(bin.high, 0.22, epsilon = 1e-12);
    assert_relative_eq!(bin.center(), 0.21, epsilon = 1e-12);
    assert!(h.bin(50).is_none());
    assert_eq!(h.bins().count(), 50);
}

#[test]
fn mean_std_and_peak() {
    let mut h = Histogram::new(10, 0.0, 10.0).unwrap();
    assert!(h.mean().is_none());
    assert!(h.peak().is_none());

    for v in [2.5, 2.5, 2.5, 7.5] {
        h.fill(v);
    }

    assert_relative_eq!(h.mean().unwrap(), 3.75);
    assert_relative_eq!(h.std_dev().unwrap(), (4.6875f64).sqrt(), epsilon = 1e-12);
    let peak = h.peak().unwrap();
    assert_eq!(peak.count, 3);
    assert_relative_eq!(peak.low, 2.0);
}

#[test]
fn merge_sums_bins_and_counters() {
    let mut a = Histogram::new(4, 0.0, 4.0).unwrap();
    let mut b = Histogram::new(4, 0.0, 4.0).unwrap();
    a.fill(0.5);
    a.fill(5.0);
    b.fill(0.5);
    b.fill(3.5);
    b.fill(-1.0);

    a.merge(&b).unwrap();
    assert_eq!(a.counts(), &[2, 0, 0, 1]);
    assert_eq!(a.overflow(), 1);
    assert_eq!(a.underflow(), 1);
}

#[test]
fn merge_rejects_different_binning() {
    let mut a = Histogram::new(4, 0.0, 4.0).unwrap();
    a.fill(1.0);
    let b = Histogram::new(5, 0.0, 4.0).unwrap();

    assert_eq!(a.merge(&b), Err(ConfigError::MismatchedHistograms));
    assert_eq!(a.entries(), 1);
}

#[test]
fn reset_keeps_binning() {
    let mut h = Histogram::new(4, 0.0, 4.0).unwrap();
    h.fill(1.0);
    h.fill(10.0);
    h.reset();

    assert_eq!(h.entries(), 0);
    assert_eq!(h.overflow(), 0);
    assert_eq!(h.n_bins(), 4);
    assert!(h.mean().is_none());
}
