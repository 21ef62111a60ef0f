//! Ω Sweep: Hysteresis Area Across the Stability Factor
//!
//! Runs the default stress ramp for a grid of Ω values, one independent
//! seeded episode per point, and tabulates area, jumps and label.
//! Pass `--json` to print the successful points as JSON instead.

use std::env;

use tgc_dynamics::{omega_sweep, EpisodeConfig, Result, SweepSummary};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let json = env::args().any(|a| a == "--json");

    let base = EpisodeConfig::default()
        .with_drive_range(-4.0, 4.0)
        .with_steps(400);
    let omegas: Vec<f64> = (0..=16).map(|i| i as f64 * 0.25).collect();

    let points = omega_sweep(&base, &omegas);

    if json {
        let summaries: Vec<SweepSummary<'_>> = points.iter().filter_map(|p| p.summary()).collect();
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    println!("═══════════════════════════════════════════════════════════════");
    println!("  Ω Sweep: Loop Area vs Stability Factor");
    println!("═══════════════════════════════════════════════════════════════\n");

    println!(
        "  {:>5}  {:>6}  {:>9}  {:>5}  {:>6}  {}",
        "Ω", "seed", "A", "jumps", "shifts", "label"
    );
    println!("  ─────────────────────────────────────────────────────");

    for point in &points {
        match &point.outcome {
            Ok(m) => println!(
                "  {:>5.2}  {:>6}  {:>9.4}  {:>5}  {:>6}  {}",
                point.omega,
                point.seed,
                m.area,
                m.jump_count(),
                m.regime_shifts.len(),
                m.classification
            ),
            Err(e) => println!("  {:>5.2}  {:>6}  failed: {}", point.omega, point.seed, e),
        }
    }

    println!("\n═══════════════════════════════════════════════════════════════");
    println!("  Sweep Complete");
    println!("═══════════════════════════════════════════════════════════════");
    Ok(())
}
