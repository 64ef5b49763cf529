//! Read-only views of a finished run: text summary, CSV tables and JSON.
//!
//! The tables are stable and flat so they can be plotted with any tool:
//! histogram as bin edges plus counts, signals as time offsets plus values.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::DriftError;
use crate::simulation::RunOutput;

/// Width of the longest bar in the text histogram.
const BAR_WIDTH: usize = 50;

#[derive(Debug, Serialize)]
struct HistogramRow {
    low: f64,
    high: f64,
    count: u64,
}

#[derive(Debug, Serialize)]
struct SignalRow<'a> {
    electrode: &'a str,
    t_start_ns: f64,
    t_end_ns: f64,
    value: f64,
}

#[derive(Debug, Serialize)]
struct SampleRow {
    event: u64,
    cluster: Option<u64>,
    carrier: String,
    status: String,
    speed: Option<f64>,
    in_range: bool,
}

/// Human-readable run report.
pub fn summary(output: &RunOutput) -> String {
    let s = &output.summary;
    let h = &output.histogram;
    let mut text = String::new();

    text.push_str(&format!("Run {} (seed {})\n", output.run_id, output.seed));
    text.push_str(&format!(
        "  events: {}  clusters: {}  transports: {}\n",
        s.events, s.clusters, s.transport_calls
    ));
    text.push_str(&format!(
        "  recorded: {}  skipped: {} (failed {}, non-positive time {}, out of range {})\n",
        s.recorded,
        s.skipped(),
        s.transport_failures,
        s.non_positive_elapsed,
        s.out_of_range
    ));
    text.push_str(&format!(
        "  endpoints: normal {}, left drift area {}, attached {}, failed {}\n",
        s.statuses.normal, s.statuses.left_drift_area, s.statuses.attached, s.statuses.failed
    ));

    text.push_str(&format!(
        "Drift speed [{}]: {} bins over [{}, {})\n",
        output.unit,
        h.n_bins(),
        h.low_edge(),
        h.high_edge()
    ));
    match (h.mean(), h.std_dev()) {
        (Some(mean), Some(std)) => text.push_str(&format!(
            "  entries: {}  mean: {:.4}  std dev: {:.4}\n",
            h.entries(),
            mean,
            std
        )),
        _ => text.push_str("  entries: 0\n"),
    }
    if let Some(peak) = h.peak() {
        let max = peak.count.max(1) as f64;
        for bin in h.bins().filter(|b| b.count > 0) {
            let len = ((bin.count as f64 / max) * BAR_WIDTH as f64).ceil() as usize;
            text.push_str(&format!(
                "  [{:>10.4}, {:>10.4}) {:>8} {}\n",
                bin.low,
                bin.high,
                bin.count,
                "#".repeat(len)
            ));
        }
    }

    for (name, signal) in output.sensor.signals() {
        text.push_str(&format!("Signal '{}': integral {:.4e}", name, signal.integral()));
        if let Some((t, value)) = signal.peak() {
            text.push_str(&format!(", peak {:.4e} at {:.4} ns", value, t.to_ns()));
        }
        text.push('\n');
    }

    text
}

/// Bin edges and counts, one row per bin.
pub fn write_histogram_csv<W: Write>(output: &RunOutput, writer: W) -> Result<(), DriftError> {
    let mut csv = csv::Writer::from_writer(writer);
    for bin in output.histogram.bins() {
        csv.serialize(HistogramRow {
            low: bin.low,
            high: bin.high,
            count: bin.count,
        })?;
    }
    csv.flush()?;
    Ok(())
}

/// Time-binned signal of every electrode, one row per (electrode, bin).
pub fn write_signal_csv<W: Write>(output: &RunOutput, writer: W) -> Result<(), DriftError> {
    let mut csv = csv::Writer::from_writer(writer);
    for (electrode, signal) in output.sensor.signals() {
        for (t_start, t_end, value) in signal.bins() {
            csv.serialize(SignalRow {
                electrode,
                t_start_ns: t_start.to_ns(),
                t_end_ns: t_end.to_ns(),
                value,
            })?;
        }
    }
    csv.flush()?;
    Ok(())
}

/// Kept samples in emission order.
pub fn write_samples_csv<W: Write>(output: &RunOutput, writer: W) -> Result<(), DriftError> {
    let mut csv = csv::Writer::from_writer(writer);
    for sample in &output.samples {
        csv.serialize(SampleRow {
            event: sample.event,
            cluster: sample.cluster,
            carrier: sample.carrier.to_string(),
            status: sample.status.to_string(),
            speed: sample.speed,
            in_range: sample.in_range,
        })?;
    }
    csv.flush()?;
    Ok(())
}

/// The whole output as pretty-printed JSON.
pub fn write_output_json<W: Write>(output: &RunOutput, writer: W) -> Result<(), DriftError> {
    serde_json::to_writer_pretty(writer, output)?;
    Ok(())
}

/// Create `path` and hand a buffered writer for it to `write`.
pub fn write_to_file<P, F>(path: P, write: F) -> Result<(), DriftError>
where
    P: AsRef<Path>,
    F: FnOnce(&mut BufWriter<File>) -> Result<(), DriftError>,
{
    let path = path.as_ref();
    let mut file = BufWriter::new(File::create(path)?);
    write(&mut file)?;
    file.flush()?;
    log::info!("Wrote {}", path.display());
    Ok(())
}
