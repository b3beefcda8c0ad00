// The binary only reaches part of the library surface
#[allow(dead_code)]
mod signal;

#[cfg(feature = "chart")]
mod chart;

use anyhow::Result;
use clap::Parser;
use log::info;
use ordered_float::OrderedFloat;

use signal::{
    DelayEstimate, GreenSplit, SignalError, SignalIntersection, TimingPlan, DEFAULT_CYCLE_LENGTH,
    DEFAULT_LOST_TIME, DEFAULT_NUM_CYCLES,
};

/// Cycle lengths covered by the sensitivity sweep
const SWEEP_CYCLE_LENGTHS: [f64; 5] = [60.0, 75.0, 90.0, 105.0, 120.0];

#[derive(Parser)]
#[command(name = "signal_timing")]
#[command(about = "Webster signal timing optimizer with queue simulation")]
struct Cli {
    /// Arrival rate for approach 1 in vehicles per second
    #[arg(long, default_value_t = 0.2)]
    arrival1: f64,

    /// Arrival rate for approach 2 in vehicles per second
    #[arg(long, default_value_t = 0.15)]
    arrival2: f64,

    /// Saturation flow for approach 1 in vehicles per second
    #[arg(long, default_value_t = 0.5)]
    saturation1: f64,

    /// Saturation flow for approach 2 in vehicles per second
    #[arg(long, default_value_t = 0.5)]
    saturation2: f64,

    /// Lost time per cycle in seconds
    #[arg(long, default_value_t = DEFAULT_LOST_TIME)]
    lost_time: f64,

    /// Cycle length in seconds
    #[arg(long, default_value_t = DEFAULT_CYCLE_LENGTH)]
    cycle: f64,

    /// Number of cycles to run in the queue simulation
    #[arg(long, default_value_t = DEFAULT_NUM_CYCLES)]
    sim_cycles: u32,

    /// Also run a sensitivity sweep over standard cycle lengths
    #[arg(long)]
    sweep: bool,

    /// Write a queue evolution chart to this PNG path
    #[cfg(feature = "chart")]
    #[arg(long)]
    chart: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let intersection = SignalIntersection::new(
        [cli.arrival1, cli.arrival2],
        [cli.saturation1, cli.saturation2],
        cli.lost_time,
    )?;

    run_analysis(&intersection, &cli)?;

    if cli.sweep {
        run_sweep(&intersection);
    }

    Ok(())
}

/// Optimize the given intersection, print the timing report, and simulate
/// queue evolution at the optimum.
fn run_analysis(intersection: &SignalIntersection, cli: &Cli) -> Result<()> {
    println!(
        "Two-phase intersection: arrivals [{}, {}] veh/s, saturation flows [{}, {}] veh/s, lost time {:.0}s",
        cli.arrival1, cli.arrival2, cli.saturation1, cli.saturation2, cli.lost_time
    );

    info!("optimizing green split for cycle length {:.1}s", cli.cycle);
    let plan = match intersection.optimize_timing(cli.cycle) {
        Ok(plan) => plan,
        Err(SignalError::Infeasible { cycle_length }) => {
            println!(
                "No stable green split exists for cycle length {:.0}s: demand is too close to capacity.",
                cycle_length
            );
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    println!();
    println!("Optimal Green Times:");
    println!("  Approach 1: {:.1} seconds", plan.g1);
    println!("  Approach 2: {:.1} seconds", plan.g2);
    println!(
        "  Total System Delay: {:.2} vehicle-seconds per cycle",
        plan.total_delay
    );

    print_equal_split_comparison(intersection, cli.cycle, &plan);
    print_traffic_analysis(intersection, cli.cycle, &plan);
    run_queue_simulation(intersection, cli, &plan)?;

    Ok(())
}

/// How much the optimized split improves on a naive even division of the
/// available green.
fn print_equal_split_comparison(
    intersection: &SignalIntersection,
    cycle_length: f64,
    plan: &TimingPlan,
) {
    let equal = GreenSplit::equal(cycle_length, intersection.lost_time());
    let equal_delay = intersection.total_delay(equal, cycle_length);

    println!();
    println!("Equal Split Comparison:");
    println!("  Equal green times: {:.1} seconds each", equal.g1);
    if equal_delay.is_finite() {
        let improvement = (equal_delay - plan.total_delay) / equal_delay * 100.0;
        println!(
            "  Equal split delay: {:.2} vehicle-seconds per cycle",
            equal_delay
        );
        println!("  Improvement: {:.1}%", improvement);
    } else {
        println!("  Equal split is unstable for this demand");
    }
}

fn print_traffic_analysis(
    intersection: &SignalIntersection,
    cycle_length: f64,
    plan: &TimingPlan,
) {
    if let DelayEstimate::Stable { d1, d2, x1, x2 } =
        intersection.evaluate(plan.split(), cycle_length)
    {
        println!();
        println!("Traffic Analysis:");
        println!("  Saturation ratios: {:.3}, {:.3}", x1, x2);
        println!("  Average delays: {:.1}s, {:.1}s per vehicle", d1, d2);
    }
}

fn run_queue_simulation(
    intersection: &SignalIntersection,
    cli: &Cli,
    plan: &TimingPlan,
) -> Result<()> {
    let trace = intersection.simulate_queues(plan.split(), cli.cycle, cli.sim_cycles);
    let (peak1, peak2) = trace.max_queues();

    println!();
    println!("Queue Simulation ({} cycles):", cli.sim_cycles);
    println!("  Peak queues: {:.1} / {:.1} vehicles", peak1, peak2);
    if let Some(last) = trace.final_sample() {
        println!(
            "  Final queues: {:.1} / {:.1} vehicles at t={:.1}s",
            last.q1, last.q2, last.time
        );
    }

    #[cfg(feature = "chart")]
    if let Some(path) = &cli.chart {
        chart::render_queue_chart(&trace, path)?;
        println!("  Queue chart saved to {}", path);
    }

    Ok(())
}

/// Optimize across the standard range of cycle lengths and report the best.
fn run_sweep(intersection: &SignalIntersection) {
    println!();
    println!("Sensitivity Analysis:");

    let mut results: Vec<(f64, TimingPlan)> = Vec::new();
    for &cycle_length in &SWEEP_CYCLE_LENGTHS {
        match intersection.optimize_timing(cycle_length) {
            Ok(plan) => {
                println!(
                    "  Cycle {:.0}s: g1={:.1}s, g2={:.1}s, delay={:.1}",
                    cycle_length, plan.g1, plan.g2, plan.total_delay
                );
                results.push((cycle_length, plan));
            }
            Err(SignalError::Infeasible { .. }) => {
                println!("  Cycle {:.0}s: infeasible", cycle_length);
            }
            Err(e) => {
                println!("  Cycle {:.0}s: {}", cycle_length, e);
            }
        }
    }

    let best = results
        .iter()
        .min_by_key(|(_, plan)| OrderedFloat(plan.total_delay));
    if let Some((cycle_length, plan)) = best {
        println!(
            "  Best cycle length: {:.0}s (delay {:.1})",
            cycle_length, plan.total_delay
        );
    } else {
        println!("  No feasible cycle length in the sweep range");
    }
}
