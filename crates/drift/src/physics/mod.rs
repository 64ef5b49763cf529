//! Reference collaborators.
//!
//! Analytic stand-ins for the field solver, drift-line integrator and
//! primary-ionization generator. They are simple enough to reason about in
//! tests and let the driver run end-to-end without a field map:
//!
//! - [`UniformFieldDrift`]: parallel-plate gap with constant drift
//!   velocities, transverse diffusion, attachment and Shockley–Ramo signals
//! - [`StraightTrack`]: clusters along a straight primary with exponential
//!   spacing and Poisson electron counts
//! - [`ScriptedTransport`] / [`ScriptedTrack`]: replay fixed endpoints and
//!   clusters and remember every call

mod scripted;
mod straight_track;
mod uniform_field;

pub use scripted::{ClusterTemplate, ScriptedStep, ScriptedTrack, ScriptedTransport};
pub use straight_track::StraightTrack;
pub use uniform_field::{DriftGap, UniformFieldDrift};

use crate::config::Scenario;

/// Transport and track generator matching a preset scenario.
///
/// The collaborators draw from seeds derived from the run seed, so they never
/// replay the sampler's random sequence.
pub fn scenario_collaborators(
    scenario: Scenario,
    seed: u64,
    worker: usize,
) -> (UniformFieldDrift, StraightTrack) {
    let transport_seed = seed.wrapping_add(1);
    let track_seed = seed.wrapping_add(2);
    let (gap, track) = match scenario {
        Scenario::ArgonCathodeDrift => (
            DriftGap::argon_chamber(),
            StraightTrack::argon_gas(track_seed),
        ),
        Scenario::XenonTrackDrift => (
            DriftGap::xenon_chamber(),
            StraightTrack::xenon_gas(track_seed),
        ),
        Scenario::SiliconStripSignal => (
            DriftGap::silicon_sensor(),
            StraightTrack::silicon(track_seed),
        ),
    };
    (
        UniformFieldDrift::for_worker(gap, transport_seed, worker),
        track.on_stream(track_seed, worker),
    )
}
