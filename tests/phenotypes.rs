//! End-to-end checks: configuration → episode → hysteresis metrics.

use tgc_dynamics::{
    analyze,
    detect_jumps,
    loop_area,
    manifold,
    run_episode,
    Action,
    EpisodeConfig,
    EpisodeStatus,
    IntegrationScheme,
    PhenotypeLabel,
    SimulationError,
    Trajectory,
    TrajectoryRecord,
};

fn stress_sweep(omega: f64) -> EpisodeConfig {
    EpisodeConfig::default()
        .with_omega(omega)
        .with_drive_range(-2.0, 2.0)
        .with_steps(200)
        .with_dt(0.01)
        .with_noise(0.05)
        .with_seed(42)
}

#[test]
fn shallow_manifold_classifies_adhd_like() {
    let trajectory = run_episode(stress_sweep(0.2)).unwrap();
    let metrics = analyze(&trajectory).unwrap();

    assert_eq!(metrics.classification, PhenotypeLabel::AdhdLike);
    assert!(metrics.area < 1.0);
}

#[test]
fn deep_manifold_classifies_asd_like() {
    let trajectory = run_episode(stress_sweep(4.0)).unwrap();
    let metrics = analyze(&trajectory).unwrap();

    assert_eq!(metrics.classification, PhenotypeLabel::AsdLike);
    assert!(metrics.jump_events.is_empty());
}

#[test]
fn high_omega_loop_exceeds_low_omega_loop() {
    let full_sweep = |omega| {
        EpisodeConfig::default()
            .with_omega(omega)
            .with_drive_range(-5.0, 5.0)
            .with_steps(400)
    };

    let deep = run_episode(full_sweep(3.0)).unwrap();
    let shallow = run_episode(full_sweep(0.1)).unwrap();

    let a_deep = loop_area(&deep).unwrap();
    let a_shallow = loop_area(&shallow).unwrap();
    assert!(a_deep > 0.0);
    assert!(a_deep > a_shallow, "A(Ω=3) = {} vs A(Ω=0.1) = {}", a_deep, a_shallow);
}

#[test]
fn adiabatic_sweep_jumps_once_per_fold() {
    let config = EpisodeConfig::default()
        .with_omega(3.0)
        .with_drive_range(-5.0, 5.0)
        .with_steps(400)
        .with_integration(IntegrationScheme::Adiabatic);
    let trajectory = run_episode(config).unwrap();
    let metrics = analyze(&trajectory).unwrap();

    let e_crit = manifold::critical_drive(3.0).unwrap();
    assert_eq!(metrics.jump_count(), 2);
    assert_eq!(metrics.regime_shifts.len(), 2);

    // Up-sweep leaves the lower branch past +E_crit, down-sweep the upper past -E_crit
    let up = metrics.jump_events[0];
    let down = metrics.jump_events[1];
    assert!(up.delta_x > 0.0 && down.delta_x < 0.0);
    assert!(trajectory.records()[up.step].drive > e_crit);
    assert!(trajectory.records()[down.step].drive < -e_crit);
}

#[test]
fn flat_manifold_never_shifts_regime() {
    for noise in [0.0, 0.05] {
        let config = EpisodeConfig::default()
            .with_omega(0.0)
            .with_drive_range(-5.0, 5.0)
            .with_steps(400)
            .with_noise(noise);
        let metrics = analyze(&run_episode(config).unwrap()).unwrap();
        assert!(metrics.regime_shifts.is_empty(), "σ = {}: {:?}", noise, metrics.regime_shifts);
    }
}

#[test]
fn euler_maruyama_sweep_shifts_once_per_fold() {
    let config = EpisodeConfig::default()
        .with_omega(3.0)
        .with_drive_range(-5.0, 5.0)
        .with_steps(1000)
        .with_noise(0.05);
    let trajectory = run_episode(config).unwrap();
    let metrics = analyze(&trajectory).unwrap();
    let e_crit = manifold::critical_drive(3.0).unwrap();

    assert_eq!(metrics.regime_shifts.len(), 2, "{:?}", metrics.regime_shifts);
    let up = metrics.regime_shifts[0];
    let down = metrics.regime_shifts[1];
    assert!(up.to_upper && !down.to_upper);
    assert!(trajectory.records()[up.step].drive > e_crit);
    assert!(trajectory.records()[down.step].drive < -e_crit);
    assert!(up.onset_step <= up.step && down.onset_step <= down.step);
}

#[test]
fn sweep_inside_bistable_region_keeps_its_basin() {
    let config = EpisodeConfig::default()
        .with_omega(3.0)
        .with_drive_range(-1.0, 1.0)
        .with_steps(400);
    let metrics = analyze(&run_episode(config).unwrap()).unwrap();
    assert!(metrics.regime_shifts.is_empty());
    assert!(metrics.jump_events.is_empty());
}

#[test]
fn same_seed_reproduces_trajectory_bytes() {
    let config = EpisodeConfig::default().with_omega(2.0).with_seed(1234);

    let a = serde_json::to_string(&run_episode(config.clone()).unwrap()).unwrap();
    let b = serde_json::to_string(&run_episode(config).unwrap()).unwrap();
    assert_eq!(a, b);

    let other = serde_json::to_string(
        &run_episode(EpisodeConfig::default().with_omega(2.0).with_seed(1235)).unwrap(),
    )
    .unwrap();
    assert_ne!(a, other);
}

#[test]
fn zero_omega_is_never_bistable() {
    for i in 0..=40 {
        let e = -2.0 + i as f64 * 0.1;
        assert!(!manifold::is_bistable(0.0, e));
    }

    let trajectory = run_episode(EpisodeConfig::default().with_omega(0.0)).unwrap();
    assert!(trajectory.warnings().is_empty());
    // A single equilibrium leaves β neutral everywhere
    assert!(trajectory.records().iter().all(|r| r.beta == 0.5));
}

fn synthetic(xs: &[f64]) -> Trajectory {
    let records = xs
        .iter()
        .enumerate()
        .map(|(step, &x)| TrajectoryRecord {
            step,
            time: (step + 1) as f64 * 0.01,
            omega: 1.0,
            drive: 0.0,
            x,
            beta: 0.5,
            action: Action::Exploit,
            reward: 1.0,
            prediction_error: 0.0,
        })
        .collect();
    Trajectory::from_records(EpisodeConfig::default(), records)
}

#[test]
fn engineered_jump_is_reported_once() {
    let mut xs = vec![0.0; 10];
    xs.extend(vec![10.0; 10]);
    let jumps = detect_jumps(&synthetic(&xs), 1.0).unwrap();

    assert_eq!(jumps.len(), 1);
    assert_eq!(jumps[0].step, 10);
    assert_eq!(jumps[0].delta_x, 10.0);

    let linear: Vec<f64> = (0..50).map(|i| i as f64 * 0.1).collect();
    assert!(detect_jumps(&synthetic(&linear), 1.0).unwrap().is_empty());
}

#[test]
fn failed_episode_cannot_be_analyzed() {
    let config = EpisodeConfig::default()
        .with_omega(1.0)
        .with_drive_range(-50.0, 50.0)
        .with_dt(5.0)
        .with_steps(100);

    let err = run_episode(config).unwrap_err();
    let partial = err.partial_trajectory().unwrap();
    assert_eq!(partial.status(), EpisodeStatus::Failed);
    assert!(matches!(analyze(partial), Err(SimulationError::InvalidTrajectory(_))));
}

#[test]
fn config_round_trips_through_json() {
    let config = stress_sweep(4.0).with_integration(IntegrationScheme::Adiabatic);
    let json = serde_json::to_string(&config).unwrap();
    let back = EpisodeConfig::from_json_str(&json).unwrap();
    assert_eq!(back, config);
}
