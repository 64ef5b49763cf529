//! Deterministic collaborators that replay a script.
//!
//! Useful for checking the driver's bookkeeping: every endpoint and cluster
//! is known in advance, and every call is remembered.

use std::collections::VecDeque;

use nalgebra::Vector3;
use units::{Energy, Time};

use crate::collaborators::{TrackGenerator, Transport};
use crate::event::{Carrier, Cluster, Endpoint, EndpointStatus, StartCondition};
use crate::signal::SignalSensor;

/// One scripted transport result, relative to the start condition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptedStep {
    /// Endpoint minus start position (cm)
    pub displacement: Vector3<f64>,
    pub elapsed: Time,
    pub status: EndpointStatus,
    /// Current added to every electrode while the carrier moves
    pub current: f64,
}

impl ScriptedStep {
    pub fn normal(displacement: Vector3<f64>, elapsed: Time) -> Self {
        Self {
            displacement,
            elapsed,
            status: EndpointStatus::Normal,
            current: 0.0,
        }
    }

    pub fn failed() -> Self {
        Self {
            displacement: Vector3::zeros(),
            elapsed: Time::zero(),
            status: EndpointStatus::Failed,
            current: 0.0,
        }
    }

    pub fn with_status(mut self, status: EndpointStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_current(mut self, current: f64) -> Self {
        self.current = current;
        self
    }
}

/// Transport that cycles through a fixed list of steps.
#[derive(Debug, Clone, Default)]
pub struct ScriptedTransport {
    steps: Vec<ScriptedStep>,
    next: usize,
    calls: Vec<(Carrier, StartCondition)>,
}

impl ScriptedTransport {
    /// Every call returns `step`.
    pub fn constant(step: ScriptedStep) -> Self {
        Self::sequence(vec![step])
    }

    /// Calls return the steps in order, wrapping around at the end. An empty
    /// script fails every call.
    pub fn sequence(steps: Vec<ScriptedStep>) -> Self {
        Self {
            steps,
            next: 0,
            calls: Vec::new(),
        }
    }

    /// Carrier and start condition of every call so far.
    pub fn calls(&self) -> &[(Carrier, StartCondition)] {
        &self.calls
    }

    pub fn call_count(&self) -> usize {
        self.calls.len()
    }
}

impl Transport for ScriptedTransport {
    fn transport(
        &mut self,
        carrier: Carrier,
        start: &StartCondition,
        sensor: &mut SignalSensor,
    ) -> Endpoint {
        self.calls.push((carrier, *start));
        if self.steps.is_empty() {
            return Endpoint::failed(start);
        }
        let step = self.steps[self.next % self.steps.len()];
        self.next += 1;

        if step.status.is_failure() {
            return Endpoint::failed(start);
        }

        let end_time = start.time + step.elapsed;
        if step.current != 0.0 {
            let names: Vec<String> = sensor.electrodes().map(str::to_string).collect();
            for name in names {
                if let Some(signal) = sensor.signal_mut(&name) {
                    signal.add_current(start.time, end_time, step.current);
                }
            }
        }

        Endpoint::new(start.position + step.displacement, end_time, step.status)
    }
}

/// Cluster layout relative to the start of a track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterTemplate {
    pub offset: Vector3<f64>,
    pub delay: Time,
    pub n_electrons: u32,
}

impl ClusterTemplate {
    pub fn new(offset: Vector3<f64>, delay: Time, n_electrons: u32) -> Self {
        Self {
            offset,
            delay,
            n_electrons,
        }
    }
}

/// Track generator that emits the same clusters for every primary.
#[derive(Debug, Clone, Default)]
pub struct ScriptedTrack {
    templates: Vec<ClusterTemplate>,
    pending: VecDeque<Cluster>,
    tracks: Vec<StartCondition>,
    emitted: usize,
}

impl ScriptedTrack {
    pub fn new(templates: Vec<ClusterTemplate>) -> Self {
        Self {
            templates,
            ..Self::default()
        }
    }

    /// Start conditions of every track begun so far, with their primary.
    pub fn tracks(&self) -> &[StartCondition] {
        &self.tracks
    }

    pub fn clusters_emitted(&self) -> usize {
        self.emitted
    }
}

impl TrackGenerator for ScriptedTrack {
    fn new_track(&mut self, start: &StartCondition, direction: Vector3<f64>, energy: Energy) {
        self.tracks.push(start.with_primary(direction, energy));
        self.pending = self
            .templates
            .iter()
            .map(|t| Cluster {
                position: start.position + t.offset,
                time: start.time + t.delay,
                n_electrons: t.n_electrons,
                energy: Energy::zero(),
                energy_fluctuation: Energy::zero(),
            })
            .collect();
    }

    fn next_cluster(&mut self) -> Option<Cluster> {
        let cluster = self.pending.pop_front()?;
        self.emitted += 1;
        Some(cluster)
    }
}
