//! Queue evolution chart rendering
//!
//! Renders a simulated queue trace to a PNG line chart. Only compiled with
//! the `chart` feature enabled.

use anyhow::{Context, Result};
use plotters::prelude::*;

use crate::signal::QueueTrace;

/// Render both approach queues over time to a PNG at `path`.
pub fn render_queue_chart(trace: &QueueTrace, path: &str) -> Result<()> {
    let samples = trace.samples();
    let last = trace
        .final_sample()
        .context("cannot chart an empty queue trace")?;

    let (peak1, peak2) = trace.max_queues();
    let y_max = (peak1.max(peak2) * 1.1).max(1.0);

    let backend = BitMapBackend::new(path, (1200, 400));
    let root = backend.into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Queue Evolution", ("sans-serif", 20))
        .margin(40)
        .x_label_area_size(40)
        .y_label_area_size(40)
        .build_cartesian_2d(0.0..last.time, 0.0..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Time (seconds)")
        .y_desc("Queue Length (vehicles)")
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            samples.iter().map(|s| (s.time, s.q1)),
            &BLUE,
        ))?
        .label("Approach 1 Queue")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    chart
        .draw_series(LineSeries::new(
            samples.iter().map(|s| (s.time, s.q2)),
            &RED,
        ))?
        .label("Approach 2 Queue")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()
        .with_context(|| format!("failed to write chart to {}", path))?;

    Ok(())
}
