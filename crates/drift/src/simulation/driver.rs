//! Sequential event loop.

use nalgebra::Vector3;
use rand_chacha::ChaChaRng;
use units::Energy;
use uuid::Uuid;

use super::{RecordedSample, RunOutput, RunSummary};
use crate::aggregator::{RecordOutcome, SpeedAggregator};
use crate::collaborators::{Transport, TrackGenerator};
use crate::config::{Mode, RunConfig};
use crate::error::ConfigError;
use crate::event::{Carrier, StartCondition};
use crate::histogram::Histogram;
use crate::sampling::rng_from_seed;
use crate::signal::SignalSensor;

/// Run identity for a configured or freshly drawn seed.
///
/// A fixed seed maps to a fixed v5 id; otherwise a random v4 id is drawn
/// and the seed is taken from its first 8 bytes, so the run can be replayed.
pub(crate) fn resolve_identity(seed: Option<u64>) -> (Uuid, u64) {
    match seed {
        Some(seed) => (
            Uuid::new_v5(&Uuid::NAMESPACE_OID, &seed.to_le_bytes()),
            seed,
        ),
        None => {
            let id = Uuid::new_v4();
            (id, id.as_u64_pair().0)
        }
    }
}

/// Drives one Monte Carlo run against a set of collaborators.
///
/// The histogram and the sensor's time window are fixed when the loop is
/// built and accumulate over every call to [`EventLoop::run`].
///
/// # Example
/// ```
/// use drift::physics::{DriftGap, UniformFieldDrift};
/// use drift::{EventLoop, NoTracks, config};
///
/// let config = config::argon_cathode_drift().with_seed(7);
/// let mut transport = UniformFieldDrift::new(DriftGap::argon_chamber(), 7);
///
/// let mut run = EventLoop::new(config).unwrap();
/// run.run(&mut transport, &mut NoTracks);
/// let output = run.finish();
///
/// assert_eq!(output.summary.events, 10);
/// ```
pub struct EventLoop {
    config: RunConfig,
    run_id: Uuid,
    seed: u64,
    rng: ChaChaRng,
    aggregator: SpeedAggregator,
    sensor: SignalSensor,
    /// Receives one invocation's current before it is folded into `sensor`
    scratch: SignalSensor,
    summary: RunSummary,
    samples: Vec<RecordedSample>,
    next_event: u64,
}

impl EventLoop {
    /// Validate `config` and set up the histogram, sensor and random source.
    ///
    /// # Errors
    /// Any [`ConfigError`] from [`RunConfig::validate`]; nothing has run yet.
    pub fn new(config: RunConfig) -> Result<Self, ConfigError> {
        let (run_id, seed) = resolve_identity(config.seed);
        Self::for_worker(config, run_id, seed, 0, 0)
    }

    /// Loop for one worker of a partitioned run.
    ///
    /// Workers share the run id and seed but draw from their own random
    /// stream, and number their events from `first_event`.
    pub fn for_worker(
        config: RunConfig,
        run_id: Uuid,
        seed: u64,
        stream: u64,
        first_event: u64,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let aggregator = SpeedAggregator::new(&config.histogram)?;
        let mut sensor = SignalSensor::new();
        if let Some(window) = config.time_window {
            sensor.set_time_window(window)?;
        }
        for electrode in &config.electrodes {
            sensor.add_electrode(electrode.clone())?;
        }
        let scratch = sensor.empty_like();

        log::info!(
            "Run {} (seed {}, stream {}): {} events, {:?}",
            run_id,
            seed,
            stream,
            config.n_events,
            config.mode
        );

        Ok(Self {
            config,
            run_id,
            seed,
            rng: rng_from_seed(seed, stream),
            aggregator,
            sensor,
            scratch,
            summary: RunSummary::default(),
            samples: Vec::new(),
            next_event: first_event,
        })
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    pub fn histogram(&self) -> &Histogram {
        self.aggregator.histogram()
    }

    pub fn sensor(&self) -> &SignalSensor {
        &self.sensor
    }

    pub fn samples(&self) -> &[RecordedSample] {
        &self.samples
    }

    /// Process `n_events` events in the configured mode.
    ///
    /// `tracks` is only consulted in [`Mode::Clustered`]; single-particle
    /// runs can pass [`crate::NoTracks`].
    pub fn run<T, G>(&mut self, transport: &mut T, tracks: &mut G)
    where
        T: Transport + ?Sized,
        G: TrackGenerator + ?Sized,
    {
        match self.config.mode {
            Mode::SingleParticle => self.run_single_particle(transport),
            Mode::Clustered {
                direction,
                energy,
                drift_each_electron,
            } => self.run_tracks(transport, tracks, direction, energy, drift_each_electron),
        }
    }

    /// One transport invocation per carrier at each sampled start.
    pub fn run_single_particle<T: Transport + ?Sized>(&mut self, transport: &mut T) {
        let carriers = self.config.carriers.clone();

        for _ in 0..self.config.n_events {
            let event = self.begin_event();
            let start = self.sample_start();
            log::debug!("Event {}: start {:?}", event, start.position);

            for &carrier in &carriers {
                self.transport_carrier(transport, carrier, &start, event, None);
            }
        }

        self.log_completion();
    }

    fn run_tracks<T, G>(
        &mut self,
        transport: &mut T,
        tracks: &mut G,
        direction: Vector3<f64>,
        energy: Energy,
        drift_each_electron: bool,
    ) where
        T: Transport + ?Sized,
        G: TrackGenerator + ?Sized,
    {
        let carriers = self.config.carriers.clone();
        let direction = direction.normalize();

        for _ in 0..self.config.n_events {
            let event = self.begin_event();
            let start = self.sample_start().with_primary(direction, energy);
            log::debug!("Event {}: track from {:?}", event, start.position);

            tracks.new_track(&start, direction, energy);

            let mut cluster_index = 0;
            while let Some(cluster) = tracks.next_cluster() {
                self.summary.clusters += 1;
                let origin = cluster.start_condition();
                let repeats = if drift_each_electron {
                    cluster.n_electrons
                } else {
                    1
                };

                for _ in 0..repeats {
                    for &carrier in &carriers {
                        self.transport_carrier(
                            transport,
                            carrier,
                            &origin,
                            event,
                            Some(cluster_index),
                        );
                    }
                }
                cluster_index += 1;
            }
        }

        self.log_completion();
    }

    fn begin_event(&mut self) -> u64 {
        let event = self.next_event;
        self.next_event += 1;
        self.summary.events += 1;
        event
    }

    fn sample_start(&mut self) -> StartCondition {
        let point = self.config.source.sample(&mut self.rng);
        StartCondition::from_sample(point, self.config.start_z, self.config.start_t)
    }

    fn transport_carrier<T: Transport + ?Sized>(
        &mut self,
        transport: &mut T,
        carrier: Carrier,
        start: &StartCondition,
        event: u64,
        cluster: Option<u64>,
    ) {
        self.scratch.clear();
        let end = transport.transport(carrier, start, &mut self.scratch);
        self.summary.transport_calls += 1;
        self.summary.statuses.add(end.status);

        if end.status.is_failure() {
            self.summary.transport_failures += 1;
            log::debug!(
                "Event {}: {} transport from {:?} failed, skipped",
                event,
                carrier,
                start.position
            );
            return;
        }

        if self.sensor.has_electrodes() {
            if let Err(e) = self.sensor.merge(&self.scratch) {
                log::warn!("Event {}: signal contribution dropped: {}", event, e);
                self.scratch = self.sensor.empty_like();
            }
        }

        let outcome = self.aggregator.record(start, &end);
        let in_range = matches!(outcome, RecordOutcome::Recorded(_));
        match outcome {
            RecordOutcome::Recorded(_) => self.summary.recorded += 1,
            RecordOutcome::NonPositiveElapsed => self.summary.non_positive_elapsed += 1,
            RecordOutcome::OutOfRange(_) => self.summary.out_of_range += 1,
        }
        log::debug!(
            "Event {}: {} ended at {:?}, t = {} ns, {} -> {:?}",
            event,
            carrier,
            end.position,
            end.time.to_ns(),
            end.status,
            outcome
        );

        if self.config.keep_samples {
            self.samples.push(RecordedSample {
                event,
                cluster,
                carrier,
                status: end.status,
                speed: outcome.speed(),
                in_range,
            });
        }
    }

    fn log_completion(&self) {
        let s = &self.summary;
        log::info!(
            "Run {}: {} events, {} transports, {} recorded, {} skipped",
            self.run_id,
            s.events,
            s.transport_calls,
            s.recorded,
            s.skipped()
        );
        if s.transport_failures > 0 {
            log::warn!(
                "Run {}: {} of {} transport invocations failed",
                self.run_id,
                s.transport_failures,
                s.transport_calls
            );
        }
    }

    /// Stop the run and hand over its accumulated state.
    pub fn finish(self) -> RunOutput {
        RunOutput {
            run_id: self.run_id,
            seed: self.seed,
            unit: self.aggregator.unit(),
            summary: self.summary,
            histogram: self.aggregator.into_histogram(),
            sensor: self.sensor,
            samples: self.samples,
        }
    }
}
