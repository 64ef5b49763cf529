//! Per-invocation data: sampled points, start conditions, clusters and
//! endpoints.
//!
//! None of these outlive the iteration that created them. They are plain
//! `Copy` values handed between the sampler, the collaborators and the
//! aggregator.

use std::fmt;

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use units::{Energy, Length, Time};

/// A point drawn from the emission footprint (cm).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplePoint {
    pub x: f64,
    pub y: f64,
}

impl SamplePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared distance from the origin (cm²).
    pub fn radius_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }
}

/// Where and when a transport invocation begins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StartCondition {
    /// Position in cm
    pub position: Point3<f64>,
    pub time: Time,
    /// Unit direction of the primary, when one is defined
    pub direction: Option<Vector3<f64>>,
    /// Kinetic energy of the primary, when one is defined
    pub energy: Option<Energy>,
}

impl StartCondition {
    /// A carrier at rest at `position`, released at `time`.
    pub fn at(position: Point3<f64>, time: Time) -> Self {
        Self {
            position,
            time,
            direction: None,
            energy: None,
        }
    }

    /// Lift a footprint sample to 3D at a fixed height and release time.
    pub fn from_sample(sample: SamplePoint, z0: Length, t0: Time) -> Self {
        Self::at(Point3::new(sample.x, sample.y, z0.to_cm()), t0)
    }

    pub fn with_primary(mut self, direction: Vector3<f64>, energy: Energy) -> Self {
        self.direction = Some(direction);
        self.energy = Some(energy);
        self
    }
}

/// An ionization deposit along a primary track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cluster {
    pub position: Point3<f64>,
    pub time: Time,
    pub n_electrons: u32,
    /// Energy deposited in the cluster
    pub energy: Energy,
    /// Spread of the deposited energy reported by the track generator
    pub energy_fluctuation: Energy,
}

impl Cluster {
    /// Start condition for carriers released by this cluster.
    pub fn start_condition(&self) -> StartCondition {
        StartCondition::at(self.position, self.time)
    }
}

/// How a transport computation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointStatus {
    /// Reached an electrode or the end of the drift region
    Normal,
    /// Left the active area through a boundary
    LeftDriftArea,
    /// Captured by an electronegative admixture
    Attached,
    /// The computation could not be carried out
    Failed,
}

impl EndpointStatus {
    pub const ALL: [EndpointStatus; 4] = [
        EndpointStatus::Normal,
        EndpointStatus::LeftDriftArea,
        EndpointStatus::Attached,
        EndpointStatus::Failed,
    ];

    pub fn is_failure(&self) -> bool {
        matches!(self, EndpointStatus::Failed)
    }
}

impl fmt::Display for EndpointStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EndpointStatus::Normal => "normal",
            EndpointStatus::LeftDriftArea => "left drift area",
            EndpointStatus::Attached => "attached",
            EndpointStatus::Failed => "failed",
        };
        write!(f, "{}", name)
    }
}

/// Final position and time of one transported carrier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Endpoint {
    pub position: Point3<f64>,
    pub time: Time,
    pub status: EndpointStatus,
}

impl Endpoint {
    pub fn new(position: Point3<f64>, time: Time, status: EndpointStatus) -> Self {
        Self {
            position,
            time,
            status,
        }
    }

    /// A failed computation; position and time are those of the start.
    pub fn failed(start: &StartCondition) -> Self {
        Self::new(start.position, start.time, EndpointStatus::Failed)
    }
}

/// Charge carrier species handed to the transport collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Carrier {
    Electron,
    Hole,
    Ion,
    Positron,
}

impl Carrier {
    /// Charge in units of the elementary charge.
    pub fn charge(&self) -> f64 {
        match self {
            Carrier::Electron => -1.0,
            Carrier::Hole | Carrier::Ion | Carrier::Positron => 1.0,
        }
    }

    pub fn is_negative(&self) -> bool {
        self.charge() < 0.0
    }
}

impl fmt::Display for Carrier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Carrier::Electron => "electron",
            Carrier::Hole => "hole",
            Carrier::Ion => "ion",
            Carrier::Positron => "positron",
        };
        write!(f, "{}", name)
    }
}
