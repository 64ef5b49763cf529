//! Integration tests for complete runs with the analytic collaborators.
//!
//! These exercise the preset scenarios end to end: sampling, transport,
//! clustering, aggregation, signal readout and the parallel merge.

use drift::config::{self, Scenario};
use drift::physics::{scenario_collaborators, DriftGap, UniformFieldDrift};
use drift::{run_parallel, EventLoop, NoTracks, SpeedUnit};

#[test]
fn argon_cathode_drift_peaks_at_drift_velocity() {
    let config = config::argon_cathode_drift().with_seed(2024);
    let (mut transport, mut tracks) =
        scenario_collaborators(Scenario::ArgonCathodeDrift, 2024, 0);

    let mut run = EventLoop::new(config).unwrap();
    run.run(&mut transport, &mut tracks);
    let output = run.finish();

    println!("\n{}", drift::report::summary(&output));

    assert_eq!(output.unit, SpeedUnit::MmPerNs);
    assert_eq!(output.summary.events, 10);
    assert_eq!(output.summary.transport_failures, 0);
    assert_eq!(output.histogram.entries(), 10);

    // 3.2 cm/us = 0.032 mm/ns; diffusion only lengthens the straight path a little
    let mean = output.histogram.mean().unwrap();
    assert!(
        (mean - 0.032).abs() < 0.002,
        "Mean drift speed {} mm/ns, expected ~0.032",
        mean
    );
}

#[test]
fn xenon_tracks_fill_histogram_from_every_cluster_electron() {
    let config = config::xenon_track_drift().with_seed(9);
    let (mut transport, mut tracks) = scenario_collaborators(Scenario::XenonTrackDrift, 9, 0);

    let mut run = EventLoop::new(config).unwrap();
    run.run(&mut transport, &mut tracks);
    let output = run.finish();
    let s = output.summary;

    println!("\n{}", drift::report::summary(&output));

    assert_eq!(s.events, 150);
    assert!(s.clusters > 150, "Only {} clusters", s.clusters);
    // One transport per cluster electron, so at least one per cluster
    assert!(s.transport_calls >= s.clusters);
    assert_eq!(s.statuses.total(), s.transport_calls);
    assert_eq!(s.recorded + s.skipped(), s.transport_calls);
    assert!(s.statuses.attached > 0, "Expected some attachment in xenon");

    // 0.25 cm/us drift velocity
    let peak = output.histogram.peak().unwrap();
    assert!(
        peak.low < 0.3 && peak.high > 0.2,
        "Peak bin [{}, {}) cm/us",
        peak.low,
        peak.high
    );
}

#[test]
fn silicon_strip_collects_one_charge_per_pair() {
    let config = config::silicon_strip_signal().with_seed(1);
    let (mut transport, mut tracks) = scenario_collaborators(Scenario::SiliconStripSignal, 1, 0);

    let mut run = EventLoop::new(config).unwrap();
    run.run(&mut transport, &mut tracks);
    let output = run.finish();
    let s = output.summary;

    println!("\n{}", drift::report::summary(&output));

    assert!(s.clusters > 0);
    assert_eq!(s.transport_failures, 0);
    // Electron and hole of a pair together induce one elementary charge
    let pairs = (s.transport_calls / 2) as f64;
    let strip = output.sensor.signal("strip").unwrap();
    let collected = -strip.integral();
    assert!(
        (collected - pairs).abs() < 1e-6 * pairs,
        "Collected {} e for {} pairs",
        collected,
        pairs
    );
    assert!(strip.values().iter().all(|v| *v <= 0.0));
}

#[test]
fn parallel_preset_run_matches_event_count() {
    let config = config::xenon_track_drift().with_seed(77).with_threads(3);

    let output = run_parallel(config, |worker, seed| {
        scenario_collaborators(Scenario::XenonTrackDrift, seed, worker)
    })
    .unwrap();

    assert_eq!(output.summary.events, 150);
    assert_eq!(output.seed, 77);
    assert_eq!(
        output.summary.recorded,
        output.histogram.entries(),
        "Every recorded speed must be in the histogram"
    );
}

#[test]
fn parallel_single_particle_with_custom_collaborators() {
    let config = config::argon_cathode_drift().with_seed(5).with_threads(2);
    let config = drift::RunConfig {
        n_events: 40,
        ..config
    };

    let output = run_parallel(config, |worker, seed| {
        (
            UniformFieldDrift::for_worker(DriftGap::argon_chamber(), seed, worker),
            NoTracks,
        )
    })
    .unwrap();

    assert_eq!(output.summary.events, 40);
    assert_eq!(output.histogram.entries(), 40);
}
