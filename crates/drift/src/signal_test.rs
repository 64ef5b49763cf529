use approx::assert_relative_eq;
use units::Time;

use crate::error::ConfigError;
use crate::signal::{SignalSensor, TimeBinnedSignal, TimeWindow};

fn window() -> TimeWindow {
    TimeWindow::new(Time::zero(), Time::from_ns(1.0), 10)
}

#[test]
fn time_window_validation() {
    assert!(window().validate().is_ok());
    assert!(matches!(
        TimeWindow::new(Time::zero(), Time::from_ns(1.0), 0).validate(),
        Err(ConfigError::InvalidTimeWindow { n_bins: 0, .. })
    ));
    assert!(TimeWindow::new(Time::zero(), Time::zero(), 10).validate().is_err());
    assert!(TimeWindow::new(Time::zero(), Time::from_ns(-0.1), 10).validate().is_err());
    assert!(TimeWindow::new(Time::from_ns(f64::NAN), Time::from_ns(1.0), 10)
        .validate()
        .is_err());
}

#[test]
fn spanning_window_covers_range() {
    let w = TimeWindow::spanning(Time::zero(), Time::from_ns(10.0), 1000);
    assert_eq!(w.n_bins, 1000);
    assert_relative_eq!(w.t_step.to_ns(), 0.01);
    assert_relative_eq!(w.t_max().to_ns(), 10.0, epsilon = 1e-9);
}

#[test]
fn add_accumulates_instead_of_overwriting() {
    let mut s = TimeBinnedSignal::new(window()).unwrap();

    assert!(s.add(Time::from_ns(2.5), 1.0));
    assert!(s.add(Time::from_ns(2.9), 0.5));
    assert!(!s.add(Time::from_ns(10.0), 1.0));
    assert!(!s.add(Time::from_ns(-0.1), 1.0));

    assert_relative_eq!(s.values()[2], 1.5);
    assert_relative_eq!(s.values().iter().sum::<f64>(), 1.5);
}

#[test]
fn add_current_spreads_over_overlapped_bins() {
    let mut s = TimeBinnedSignal::new(window()).unwrap();
    s.add_current(Time::from_ns(1.5), Time::from_ns(3.5), 2.0);

    assert_relative_eq!(s.values()[0], 0.0);
    assert_relative_eq!(s.values()[1], 1.0);
    assert_relative_eq!(s.values()[2], 2.0);
    assert_relative_eq!(s.values()[3], 1.0);
    assert_relative_eq!(s.values()[4], 0.0);
    // Charge = current x duration
    assert_relative_eq!(s.integral(), 4.0);
}

#[test]
fn add_current_is_clipped_to_window() {
    let mut s = TimeBinnedSignal::new(window()).unwrap();
    s.add_current(Time::from_ns(8.0), Time::from_ns(15.0), -1.0);

    assert_relative_eq!(s.integral(), -2.0);
    assert_relative_eq!(s.values()[9], -1.0);

    s.add_current(Time::from_ns(20.0), Time::from_ns(30.0), 5.0);
    assert_relative_eq!(s.integral(), -2.0);
}

#[test]
fn add_current_accepts_reversed_interval() {
    let mut a = TimeBinnedSignal::new(window()).unwrap();
    let mut b = TimeBinnedSignal::new(window()).unwrap();
    a.add_current(Time::from_ns(1.2), Time::from_ns(4.7), 1.0);
    b.add_current(Time::from_ns(4.7), Time::from_ns(1.2), 1.0);

    assert_eq!(a, b);
}

#[test]
fn peak_reports_largest_magnitude() {
    let mut s = TimeBinnedSignal::new(window()).unwrap();
    assert!(s.peak().is_none());

    s.add(Time::from_ns(1.0), 0.5);
    s.add(Time::from_ns(6.0), -2.0);
    let (t, v) = s.peak().unwrap();
    assert_relative_eq!(t.to_ns(), 6.0);
    assert_relative_eq!(v, -2.0);
}

#[test]
fn bins_report_edges() {
    let s = TimeBinnedSignal::new(TimeWindow::new(Time::from_ns(5.0), Time::from_ns(0.5), 4)).unwrap();
    let edges: Vec<(f64, f64)> = s.bins().map(|(a, b, _)| (a.to_ns(), b.to_ns())).collect();

    assert_eq!(edges, vec![(5.0, 5.5), (5.5, 6.0), (6.0, 6.5), (6.5, 7.0)]);
}

#[test]
fn sensor_requires_window_before_electrodes() {
    let mut sensor = SignalSensor::new();
    assert_eq!(
        sensor.add_electrode("strip"),
        Err(ConfigError::ElectrodesWithoutTimeWindow)
    );
    assert!(!sensor.has_electrodes());

    sensor.set_time_window(window()).unwrap();
    sensor.add_electrode("strip").unwrap();
    sensor.add_electrode("anode").unwrap();
    assert_eq!(sensor.electrodes().collect::<Vec<_>>(), vec!["anode", "strip"]);
}

#[test]
fn sensor_window_is_fixed_once_configured() {
    let mut sensor = SignalSensor::new();
    sensor.set_time_window(window()).unwrap();
    sensor.add_electrode("strip").unwrap();
    sensor.signal_mut("strip").unwrap().add(Time::from_ns(1.0), 3.0);

    let wider = TimeWindow::new(Time::zero(), Time::from_ns(0.5), 40);
    assert_eq!(
        sensor.set_time_window(wider),
        Err(ConfigError::TimeWindowAlreadySet)
    );
    // Same window again is still a reconfiguration
    assert_eq!(
        sensor.set_time_window(window()),
        Err(ConfigError::TimeWindowAlreadySet)
    );
    assert_eq!(sensor.time_window(), Some(&window()));
    let strip = sensor.signal("strip").unwrap();
    assert_eq!(strip.n_bins(), window().n_bins);
    assert_relative_eq!(strip.integral(), 3.0);
}

#[test]
fn rejected_window_leaves_sensor_unconfigured() {
    let mut sensor = SignalSensor::new();
    let bad = TimeWindow::new(Time::zero(), Time::zero(), 10);
    assert!(sensor.set_time_window(bad).is_err());
    assert!(sensor.time_window().is_none());
    sensor.set_time_window(window()).unwrap();
    assert_eq!(sensor.time_window(), Some(&window()));
}

#[test]
fn sensor_merge_sums_matching_electrodes() {
    let mut a = SignalSensor::new();
    a.set_time_window(window()).unwrap();
    a.add_electrode("strip").unwrap();
    let mut b = a.empty_like();

    a.signal_mut("strip").unwrap().add(Time::from_ns(3.0), 1.0);
    b.signal_mut("strip").unwrap().add(Time::from_ns(3.0), 2.0);
    a.merge(&b).unwrap();

    assert_relative_eq!(a.signal("strip").unwrap().values()[3], 3.0);
}

#[test]
fn sensor_merge_rejects_other_electrodes() {
    let mut a = SignalSensor::new();
    a.set_time_window(window()).unwrap();
    a.add_electrode("strip").unwrap();
    let mut b = a.empty_like();
    b.add_electrode("backplane").unwrap();

    assert!(!a.is_compatible(&b));
    assert_eq!(a.merge(&b), Err(ConfigError::MismatchedSignals));
}
