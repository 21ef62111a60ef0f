//! Episode runner: Initialized → Running → Completed | Failed.
//!
//! Per step:
//! 1. take E from the forcing protocol
//! 2. integrate x one step
//! 3. read out β, sample an action, collect reward and PE
//! 4. append the record
//! 5. feed PE back into the forcing (MDP-coupled mode only)
//!
//! Steps are strictly sequential. All randomness comes from the
//! episode's own seeded stream, drawn in a fixed order (integrator
//! noise, action, payoff), so a seed fully determines the trace.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, error, info, warn};

use super::trajectory::{EpisodeStatus, Trajectory, TrajectoryRecord};
use crate::config::EpisodeConfig;
use crate::error::{DegenerateManifoldWarning, Result, SimulationError};
use crate::forcing::ForcingProtocol;
use crate::policy::DecisionPolicy;
use crate::systems::{
    Bifurcating, Controllable, CuspAgent, DynamicalSystem, StateIntegrator,
};

/// Adjacent equilibria closer than this trigger a degenerate-manifold warning
pub const DEGENERATE_SEPARATION: f64 = 1e-4;

/// One trial from configuration to terminal state
pub struct Episode {
    config: EpisodeConfig,
    agent: CuspAgent,
    forcing: ForcingProtocol,
    policy: DecisionPolicy,
    rng: StdRng,
    trajectory: Trajectory,
}

impl Episode {
    /// Validate `config` and set up an `Initialized` episode
    pub fn new(config: EpisodeConfig) -> Result<Self> {
        config.validate()?;

        let forcing = ForcingProtocol::from_config(&config);
        let integrator = StateIntegrator::new(config.dt, config.noise_std)
            .with_scheme(config.integration);
        let agent = CuspAgent::new(
            config.omega,
            forcing.drive(0),
            integrator,
            config.initial_branch,
        );
        let policy = DecisionPolicy::new(config.link_gain, config.baseline_decay);
        let rng = StdRng::seed_from_u64(config.seed);
        let trajectory = Trajectory::new(config.clone());

        Ok(Self {
            config,
            agent,
            forcing,
            policy,
            rng,
            trajectory,
        })
    }

    pub fn status(&self) -> EpisodeStatus {
        self.trajectory.status()
    }

    pub fn agent(&self) -> &CuspAgent {
        &self.agent
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    /// Run every step to completion.
    ///
    /// A non-finite state aborts with `NumericalDivergence`, carrying the
    /// partial trajectory marked `Failed`.
    pub fn run(mut self) -> Result<Trajectory> {
        self.trajectory.set_status(EpisodeStatus::Running);
        debug!(
            omega = self.config.omega,
            mode = ?self.forcing.mode(),
            critical_drive = ?self.agent.critical_parameter(),
            bifurcation = self.agent.bifurcation_type(),
            n_steps = self.config.n_steps,
            seed = self.config.seed,
            "episode started"
        );

        if self.config.warmup_steps > 0 {
            self.agent.run(self.config.warmup_steps, &mut self.rng);
            let x = self.agent.position();
            if !x.is_finite() {
                return Err(self.fail(0, x));
            }
            self.agent.reset_time();
        }

        for step in 0..self.config.n_steps {
            if let Err(value) = self.advance(step) {
                return Err(self.fail(step, value));
            }
        }

        self.trajectory.set_status(EpisodeStatus::Completed);
        info!(
            omega = self.config.omega,
            steps = self.trajectory.len(),
            warnings = self.trajectory.warnings().len(),
            "episode completed"
        );
        Ok(self.trajectory)
    }

    /// One step of the protocol; `Err` carries the non-finite state
    fn advance(&mut self, step: usize) -> std::result::Result<(), f64> {
        let drive = self.forcing.drive(step);
        self.agent.set_parameter(drive);
        self.agent.step(&mut self.rng);

        let x = self.agent.position();
        if !x.is_finite() {
            return Err(x);
        }

        let roots = self.agent.equilibria();
        self.check_separation(step, drive, &roots);
        let low = roots.first().copied().unwrap_or(x);
        let high = roots.last().copied().unwrap_or(x);

        let distribution = self.policy.action_distribution(x, low, high);
        let action = self.policy.select_action(&distribution, &mut self.rng);
        let signal = self.policy.reward(action, &self.config.environment, &mut self.rng);

        self.trajectory.push(TrajectoryRecord {
            step,
            time: self.agent.time(),
            omega: self.config.omega,
            drive,
            x,
            beta: distribution.beta(),
            action,
            reward: signal.reward,
            prediction_error: signal.prediction_error,
        });

        self.forcing.feedback(signal.prediction_error);
        Ok(())
    }

    fn check_separation(&mut self, step: usize, drive: f64, roots: &[f64]) {
        if roots.len() < 3 {
            return;
        }

        let separation = roots
            .windows(2)
            .map(|w| w[1] - w[0])
            .fold(f64::INFINITY, f64::min);

        if separation < DEGENERATE_SEPARATION {
            let warning = DegenerateManifoldWarning {
                step,
                omega: self.config.omega,
                drive,
                separation,
            };
            warn!(
                step,
                omega = warning.omega,
                drive,
                separation,
                "equilibrium separation collapsed near fold"
            );
            self.trajectory.warn(warning);
        }
    }

    fn fail(mut self, step: usize, value: f64) -> SimulationError {
        self.trajectory.set_status(EpisodeStatus::Failed);
        error!(
            step,
            value,
            omega = self.config.omega,
            dt = self.config.dt,
            recorded = self.trajectory.len(),
            "numerical divergence, episode aborted"
        );
        SimulationError::NumericalDivergence {
            step,
            value,
            trajectory: Box::new(self.trajectory),
        }
    }
}

/// Run one episode from configuration
pub fn run_episode(config: EpisodeConfig) -> Result<Trajectory> {
    Episode::new(config)?.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forcing::ForcingMode;
    use crate::systems::IntegrationScheme;

    #[test]
    fn test_episode_lifecycle() {
        let episode = Episode::new(EpisodeConfig::default().with_steps(50)).unwrap();
        assert_eq!(episode.status(), EpisodeStatus::Initialized);
        assert!(episode.trajectory().is_empty());

        let trajectory = episode.run().unwrap();
        assert_eq!(trajectory.status(), EpisodeStatus::Completed);
        assert_eq!(trajectory.len(), 50);
        for (i, r) in trajectory.records().iter().enumerate() {
            assert_eq!(r.step, i);
            assert!(r.beta > 0.0 && r.beta < 1.0);
        }
    }

    #[test]
    fn test_invalid_config_rejected_before_run() {
        let result = Episode::new(EpisodeConfig::default().with_dt(-0.01));
        assert!(matches!(
            result,
            Err(SimulationError::InvalidParameter { name: "dt", .. })
        ));
    }

    #[test]
    fn test_divergence_preserves_partial_trajectory() {
        // dt far beyond the explicit stability limit
        let config = EpisodeConfig::default()
            .with_omega(1.0)
            .with_drive_range(-50.0, 50.0)
            .with_dt(5.0)
            .with_steps(100);

        match run_episode(config) {
            Err(SimulationError::NumericalDivergence { step, value, trajectory }) => {
                assert!(!value.is_finite());
                assert_eq!(trajectory.status(), EpisodeStatus::Failed);
                assert_eq!(trajectory.len(), step);
                assert!(trajectory.records().iter().all(|r| r.x.is_finite()));
            }
            other => panic!("expected divergence, got {:?}", other.map(|t| t.len())),
        }
    }

    #[test]
    fn test_scripted_drive_follows_ramp() {
        let config = EpisodeConfig::default().with_drive_range(-2.0, 2.0).with_steps(20);
        let trajectory = run_episode(config).unwrap();
        let drives = trajectory.drive_series();
        assert_eq!(drives[0], -2.0);
        assert_eq!(drives[9], 2.0);
        assert_eq!(drives[19], -2.0);
    }

    #[test]
    fn test_mdp_coupled_drive_stays_clipped() {
        let config = EpisodeConfig::default()
            .with_forcing_mode(ForcingMode::MdpCoupled)
            .with_reward_learning_rate(0.5)
            .with_drive_range(-1.0, 1.0)
            .with_steps(300);
        let trajectory = run_episode(config).unwrap();

        assert_eq!(trajectory.records()[0].drive, -1.0);
        assert!(trajectory
            .records()
            .iter()
            .all(|r| r.drive >= -1.0 && r.drive <= 1.0));
        // Positive early prediction errors push the drive off its floor
        assert!(trajectory.records().iter().any(|r| r.drive > -1.0));
    }

    #[test]
    fn test_fold_endpoint_emits_warning() {
        // Ramp endpoints land exactly on ±E_crit for Ω = 3
        let config = EpisodeConfig::default()
            .with_omega(3.0)
            .with_drive_range(-2.0, 2.0)
            .with_steps(40);
        let trajectory = run_episode(config).unwrap();
        assert_eq!(trajectory.status(), EpisodeStatus::Completed);
        assert!(!trajectory.warnings().is_empty());
        assert!(trajectory.warnings().iter().all(|w| w.separation < DEGENERATE_SEPARATION));
    }

    #[test]
    fn test_warmup_does_not_shift_clock() {
        let config = EpisodeConfig::default()
            .with_integration(IntegrationScheme::EulerMaruyama)
            .with_warmup(100)
            .with_steps(10);
        let trajectory = run_episode(config).unwrap();
        assert!((trajectory.records()[0].time - 0.01).abs() < 1e-12);
    }
}
