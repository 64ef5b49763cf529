//! Drift in a uniform field between two parallel planes.
//!
//! Negative carriers move toward the anode plane, positive carriers toward
//! the cathode plane, at constant speed along z. Transverse diffusion
//! spreads the endpoint by σ = D·√L. Electrons may attach on the way, with
//! an exponentially distributed attachment length.
//!
//! The readout electrode is treated as the whole anode plane, whose
//! weighting field is uniform, `E_w = 1/gap`. By Shockley–Ramo the induced
//! current `i = −q v·E_w` is constant while the carrier moves.

use nalgebra::Point3;
use rand::Rng;
use rand_chacha::ChaChaRng;
use rand_distr::{Exp1, StandardNormal};
use serde::{Deserialize, Serialize};
use units::{Length, Velocity};

use crate::collaborators::Transport;
use crate::event::{Carrier, Endpoint, EndpointStatus, StartCondition};
use crate::sampling::rng_from_seed;
use crate::signal::SignalSensor;

/// Geometry and transport properties of a parallel-plate drift gap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftGap {
    /// z of the plane negative carriers drift to
    pub anode_z: Length,
    /// z of the plane positive carriers drift to
    pub cathode_z: Length,
    /// Radius of the active area around the z axis
    pub radius: Length,
    pub electron_velocity: Velocity,
    /// Drift velocity of holes, ions and positrons
    pub positive_velocity: Velocity,
    /// Transverse diffusion coefficient (√cm)
    pub diffusion: f64,
    /// Electron attachment coefficient (1/cm)
    pub attachment: f64,
    /// Name under which the anode's induced current is recorded
    pub electrode: String,
}

impl DriftGap {
    /// Argon chamber: anode at z = 0, cathode at 4.6 cm, 3 cm active radius.
    pub fn argon_chamber() -> Self {
        Self {
            anode_z: Length::zero(),
            cathode_z: Length::from_cm(4.6),
            radius: Length::from_cm(3.0),
            electron_velocity: Velocity::from_cm_per_us(3.2),
            positive_velocity: Velocity::from_cm_per_us(0.004),
            diffusion: 0.02,
            attachment: 0.0,
            electrode: "anode".to_string(),
        }
    }

    /// Same chamber filled with xenon: slower electrons, some attachment.
    pub fn xenon_chamber() -> Self {
        Self {
            electron_velocity: Velocity::from_cm_per_us(0.25),
            positive_velocity: Velocity::from_cm_per_us(0.0015),
            diffusion: 0.035,
            attachment: 0.05,
            ..Self::argon_chamber()
        }
    }

    /// 100 µm planar silicon sensor read out on the strip side at z = d.
    pub fn silicon_sensor() -> Self {
        Self {
            anode_z: Length::from_um(100.0),
            cathode_z: Length::zero(),
            radius: Length::from_mm(1.0),
            electron_velocity: Velocity::from_cm_per_us(10.0),
            positive_velocity: Velocity::from_cm_per_us(4.0),
            diffusion: 0.003,
            attachment: 0.0,
            electrode: "strip".to_string(),
        }
    }

    /// Plate separation (always positive).
    pub fn gap(&self) -> Length {
        (self.anode_z - self.cathode_z).abs()
    }

    pub fn contains(&self, position: &Point3<f64>) -> bool {
        let lo = self.anode_z.min(self.cathode_z).to_cm();
        let hi = self.anode_z.max(self.cathode_z).to_cm();
        let r = self.radius.to_cm();
        position.z >= lo && position.z <= hi && position.x.hypot(position.y) <= r
    }

    /// Target plane and speed for a carrier species.
    fn destination(&self, carrier: Carrier) -> (Length, Velocity) {
        if carrier.is_negative() {
            (self.anode_z, self.electron_velocity)
        } else {
            (self.cathode_z, self.positive_velocity)
        }
    }
}

#[derive(Debug, Clone)]
pub struct UniformFieldDrift {
    gap: DriftGap,
    rng: ChaChaRng,
}

impl UniformFieldDrift {
    pub fn new(gap: DriftGap, seed: u64) -> Self {
        Self {
            gap,
            rng: rng_from_seed(seed, 0),
        }
    }

    /// Independent instance for one worker of a parallel run.
    pub fn for_worker(gap: DriftGap, seed: u64, worker: usize) -> Self {
        Self {
            gap,
            rng: rng_from_seed(seed, worker as u64),
        }
    }

    pub fn gap(&self) -> &DriftGap {
        &self.gap
    }
}

impl Transport for UniformFieldDrift {
    fn transport(
        &mut self,
        carrier: Carrier,
        start: &StartCondition,
        sensor: &mut SignalSensor,
    ) -> Endpoint {
        if !self.gap.contains(&start.position) {
            return Endpoint::failed(start);
        }

        let (target_z, speed) = self.gap.destination(carrier);
        let to_target = target_z.to_cm() - start.position.z;
        let direction = to_target.signum();
        let mut path = to_target.abs();
        let mut status = EndpointStatus::Normal;

        if carrier == Carrier::Electron && self.gap.attachment > 0.0 {
            let e: f64 = self.rng.sample(Exp1);
            let attachment_length = e / self.gap.attachment;
            if attachment_length < path {
                path = attachment_length;
                status = EndpointStatus::Attached;
            }
        }

        let sigma = self.gap.diffusion * path.sqrt();
        let dx: f64 = self.rng.sample::<f64, _>(StandardNormal) * sigma;
        let dy: f64 = self.rng.sample::<f64, _>(StandardNormal) * sigma;
        let end = Point3::new(
            start.position.x + dx,
            start.position.y + dy,
            start.position.z + direction * path,
        );
        let end_time = start.time + speed.time_to_cover(Length::from_cm(path));

        if status == EndpointStatus::Normal && end.x.hypot(end.y) > self.gap.radius.to_cm() {
            status = EndpointStatus::LeftDriftArea;
        }

        let gap = self.gap.gap().to_cm();
        if gap > 0.0 && path > 0.0 {
            if let Some(signal) = sensor.signal_mut(&self.gap.electrode) {
                // E_w points from anode to cathode with magnitude 1/gap
                let anode_to_cathode = (self.gap.cathode_z - self.gap.anode_z).to_cm().signum();
                let v_along_ew = direction * anode_to_cathode * speed.to_cm_per_ns();
                let current = -carrier.charge() * v_along_ew / gap;
                signal.add_current(start.time, end_time, current);
            }
        }

        Endpoint::new(end, end_time, status)
    }
}
