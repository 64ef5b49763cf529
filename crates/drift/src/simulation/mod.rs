//! Monte Carlo run driver.
//!
//! Orchestrates sampling, transport and aggregation for a configured number
//! of events.
//!
//! # Event sequence
//!
//! Each event proceeds in this order:
//! 1. Draw a point on the emission footprint
//! 2. Lift it to a start condition at the configured height and time
//! 3. Single-particle mode: transport each configured carrier once.
//!    Clustered mode: start a primary track and, for every cluster in
//!    emission order, transport each configured carrier
//! 4. Route each (start, endpoint) pair to the speed aggregator and, unless
//!    the transport failed, fold its induced current into the run's sensor
//!
//! # Failure policy
//!
//! A failed invocation is skipped and counted; the run always completes.
//! Only configuration errors, raised before the first event, abort.
//!
//! # Parallel runs
//!
//! [`run_parallel`] splits the events over workers, each with its own
//! collaborators and random stream, and merges the partial outputs.

mod driver;
mod parallel;
mod state;

pub use driver::EventLoop;
pub use parallel::{partition_events, run_parallel};
pub use state::{RecordedSample, RunOutput, RunSummary, StatusTally};
