//! Worker-partitioned runs.
//!
//! Events are split into contiguous blocks, one per worker. Every worker owns
//! its collaborators and a distinct random stream of the run's seed, so the
//! result depends only on the seed and the worker count, not on scheduling.
//! Partial outputs are merged by element-wise summation once all workers
//! are done.

use rayon::prelude::*;

use super::driver::resolve_identity;
use super::{EventLoop, RunOutput};
use crate::collaborators::{Transport, TrackGenerator};
use crate::config::RunConfig;
use crate::error::ConfigError;

/// Split `n_events` into `workers` contiguous blocks of `(first_event, count)`.
///
/// Block sizes differ by at most one; earlier blocks take the remainder.
pub fn partition_events(n_events: usize, workers: usize) -> Vec<(u64, usize)> {
    let workers = workers.max(1);
    let base = n_events / workers;
    let remainder = n_events % workers;

    let mut first = 0u64;
    (0..workers)
        .map(|w| {
            let count = base + usize::from(w < remainder);
            let block = (first, count);
            first += count as u64;
            block
        })
        .collect()
}

/// Run `config` split over `config.threads` workers (rayon's thread count
/// when unset).
///
/// `factory(worker, seed)` is called once inside each worker to build that
/// worker's transport and track generator; `seed` is the run's seed, drawn
/// at random when the configuration has none.
///
/// # Errors
/// Configuration errors only, reported before any worker starts.
pub fn run_parallel<F, T, G>(config: RunConfig, factory: F) -> Result<RunOutput, ConfigError>
where
    F: Fn(usize, u64) -> (T, G) + Sync,
    T: Transport,
    G: TrackGenerator,
{
    config.validate()?;

    let workers = config.threads.unwrap_or_else(rayon::current_num_threads).max(1);
    let (run_id, seed) = resolve_identity(config.seed);
    let blocks = partition_events(config.n_events, workers);

    log::info!(
        "Run {}: {} events over {} workers",
        run_id,
        config.n_events,
        workers
    );

    let partials: Vec<Result<RunOutput, ConfigError>> = blocks
        .into_par_iter()
        .enumerate()
        .map(|(worker, (first_event, count))| {
            let mut worker_config = config.clone();
            worker_config.n_events = count;

            let mut event_loop =
                EventLoop::for_worker(worker_config, run_id, seed, worker as u64, first_event)?;
            let (mut transport, mut tracks) = factory(worker, seed);
            event_loop.run(&mut transport, &mut tracks);
            Ok(event_loop.finish())
        })
        .collect();

    let mut partials = partials.into_iter();
    let mut output = match partials.next() {
        Some(first) => first?,
        None => return Err(ConfigError::InvalidThreadCount),
    };
    for partial in partials {
        output.merge(&partial?)?;
    }

    Ok(output)
}
