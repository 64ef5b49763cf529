//! Seams to the physics engine.
//!
//! The driver never solves fields or integrates drift lines itself. It asks a
//! [`Transport`] to move one carrier and a [`TrackGenerator`] to enumerate
//! ionization clusters. Anything implementing these traits can be plugged in:
//! a full field-map integrator, the analytic models in
//! [`crate::physics`], or scripted fakes for tests.

use nalgebra::Vector3;
use units::Energy;

use crate::event::{Carrier, Cluster, Endpoint, StartCondition};
use crate::signal::SignalSensor;

/// Moves one charge carrier from its start to wherever it terminates.
///
/// Implementations keep per-call scratch state, so one instance must not be
/// driven from two threads at once; parallel runs build one per worker.
pub trait Transport {
    /// Transport `carrier` released at `start`.
    ///
    /// Induced current must be *added* to every electrode in
    /// `sensor.electrodes()`, at the times the carrier moves. A sensor
    /// without electrodes means no signal is wanted.
    ///
    /// Failures are reported through [`crate::EndpointStatus::Failed`],
    /// never by panicking.
    fn transport(
        &mut self,
        carrier: Carrier,
        start: &StartCondition,
        sensor: &mut SignalSensor,
    ) -> Endpoint;
}

/// Produces the ionization clusters of one primary track at a time.
pub trait TrackGenerator {
    /// Start a new primary; any clusters left from the previous track are
    /// discarded.
    fn new_track(&mut self, start: &StartCondition, direction: Vector3<f64>, energy: Energy);

    /// Next cluster along the current track, `None` once the track is
    /// exhausted. The sequence is finite and cannot be restarted.
    fn next_cluster(&mut self) -> Option<Cluster>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn transport(
        &mut self,
        carrier: Carrier,
        start: &StartCondition,
        sensor: &mut SignalSensor,
    ) -> Endpoint {
        (**self).transport(carrier, start, sensor)
    }
}

impl<G: TrackGenerator + ?Sized> TrackGenerator for &mut G {
    fn new_track(&mut self, start: &StartCondition, direction: Vector3<f64>, energy: Energy) {
        (**self).new_track(start, direction, energy)
    }

    fn next_cluster(&mut self) -> Option<Cluster> {
        (**self).next_cluster()
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn transport(
        &mut self,
        carrier: Carrier,
        start: &StartCondition,
        sensor: &mut SignalSensor,
    ) -> Endpoint {
        (**self).transport(carrier, start, sensor)
    }
}

impl<G: TrackGenerator + ?Sized> TrackGenerator for Box<G> {
    fn new_track(&mut self, start: &StartCondition, direction: Vector3<f64>, energy: Energy) {
        (**self).new_track(start, direction, energy)
    }

    fn next_cluster(&mut self) -> Option<Cluster> {
        (**self).next_cluster()
    }
}

/// Track generator for single-particle runs, where no clusters are needed.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTracks;

impl TrackGenerator for NoTracks {
    fn new_track(&mut self, _start: &StartCondition, _direction: Vector3<f64>, _energy: Energy) {}

    fn next_cluster(&mut self) -> Option<Cluster> {
        None
    }
}
