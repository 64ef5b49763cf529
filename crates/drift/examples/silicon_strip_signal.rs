//! Induced current on a silicon strip from one minimum-ionizing pion.
//!
//! A straight track crosses a 100 µm planar sensor along the field axis.
//! Every electron/hole pair is drifted to its electrode and the current on
//! the strip is binned over 10 ns. The speed histogram and the signal are
//! written next to the binary as CSV.
//!
//! Run with: cargo run --example silicon_strip_signal

use drift::config::{self, Scenario};
use drift::physics::scenario_collaborators;
use drift::report::{self, write_histogram_csv, write_signal_csv, write_to_file};
use drift::EventLoop;

fn main() -> Result<(), drift::DriftError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = config::silicon_strip_signal().with_seed(180);
    let (mut transport, mut tracks) = scenario_collaborators(Scenario::SiliconStripSignal, 180, 0);

    let mut run = EventLoop::new(config)?;
    run.run(&mut transport, &mut tracks);
    let output = run.finish();

    println!("{}", report::summary(&output));

    if let Some(strip) = output.sensor.signal("strip") {
        println!("First nanoseconds of the strip current [e/ns]:");
        for (t_start, _, value) in strip.bins().step_by(50).take(6) {
            println!("  t = {:>5.2} ns  {:>10.3}", t_start.to_ns(), value);
        }
    }

    write_to_file("silicon_speed.csv", |w| write_histogram_csv(&output, w))?;
    write_to_file("silicon_signal.csv", |w| write_signal_csv(&output, w))?;

    Ok(())
}
