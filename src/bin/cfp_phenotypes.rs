//! Catastrophe-Forcing Protocol: Three Phenotypes Under a Stress Ramp
//!
//! Runs three agents that differ only in their stability factor Ω
//! through the same up-down drive ramp and compares their hysteresis.
//!
//! ## Protocol
//!
//! 1. Ramp E from -4 to 4 and back over 400 steps
//! 2. Record x, β, action and reward each step
//! 3. Integrate the (E, β) loop and detect jumps and regime shifts
//! 4. Classify each agent
//!
//! With a path argument, runs that JSON configuration instead and
//! prints its metrics as JSON on stdout.

use std::env;

use tgc_dynamics::{
    analyze,
    run_episode,
    manifold,
    EpisodeConfig,
    Result,
};

fn main() -> Result<()> {
    // Logging to stderr so stdout stays clean for JSON output
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    if let Some(path) = env::args().nth(1) {
        let config = EpisodeConfig::from_path(&path)?;
        let trajectory = run_episode(config)?;
        let metrics = analyze(&trajectory)?;
        println!("{}", serde_json::to_string_pretty(&metrics)?);
        return Ok(());
    }

    println!("═══════════════════════════════════════════════════════════════");
    println!("  CFP: Hysteresis Across the Stability Factor Ω");
    println!("═══════════════════════════════════════════════════════════════\n");

    let agents = [
        ("Agent A (shallow)", 0.5),
        ("Agent B (moderate)", 1.5),
        ("Agent C (deep)", 3.0),
    ];

    let base = EpisodeConfig::default()
        .with_drive_range(-4.0, 4.0)
        .with_steps(400);

    println!("Protocol:");
    println!("  E: {:.1} → {:.1} → {:.1}", base.e_min, base.e_max, base.e_min);
    println!("  steps = {}, dt = {}, noise σ = {}", base.n_steps, base.dt, base.noise_std);
    println!("  seed = {}", base.seed);
    println!();

    for (name, omega) in agents {
        let config = base.clone().with_omega(omega);
        let threshold = config.effective_jump_threshold();
        let trajectory = run_episode(config)?;
        let metrics = analyze(&trajectory)?;

        println!("{}: Ω = {:.1}", name, omega);
        match manifold::critical_drive(omega) {
            Some(e_crit) => println!("  E_crit = ±{:.3}", e_crit),
            None => println!("  E_crit: none (monostable)"),
        }
        println!("  Loop area A    = {:.4} (signed {:+.4})", metrics.area, metrics.signed_area);
        println!("  Jumps (>{:.2})  = {}", threshold, metrics.jump_count());
        println!("  Regime shifts  = {}", metrics.regime_shifts.len());
        for shift in &metrics.regime_shifts {
            println!(
                "    step {:3} (onset {:3}), E = {:+.3}, C = {:.2}",
                shift.step,
                shift.onset_step,
                trajectory.records()[shift.step].drive,
                shift.cusum
            );
        }
        println!(
            "  Explore = {:.1}%, switch rate = {:.3}, H(actions) = {:.3}",
            100.0 * metrics.behavior.explore_fraction,
            metrics.behavior.switch_rate,
            metrics.behavior.action_entropy
        );
        println!("  Warnings       = {}", trajectory.warnings().len());
        println!("  Phenotype      = {}", metrics.classification);
        println!();
    }

    println!("═══════════════════════════════════════════════════════════════");
    println!("  Analysis Complete");
    println!("═══════════════════════════════════════════════════════════════");
    Ok(())
}
