//! Cusp Potential: Closed-Form Equilibria and Fold Geometry
//!
//! Everything here is a pure function of (x, Ω, E). Roots come from
//! Cardano's formula (trigonometric form in the three-root regime),
//! followed by one Newton polish where the slope is not degenerate.

use std::f64::consts::PI;

/// Slope below which a Newton polish would amplify error (near a double root)
const POLISH_MIN_SLOPE: f64 = 1e-8;

/// Potentials closer than this count as a tie in [`global_minimum`]
const POTENTIAL_TIE: f64 = 1e-12;

/// Cusp potential V(x) = x⁴/4 − Ωx²/2 − Ex
pub fn potential(x: f64, omega: f64, drive: f64) -> f64 {
    x.powi(4) / 4.0 - omega * x * x / 2.0 - drive * x
}

/// Drift term −dV/dx = −(x³ − Ωx − E)
pub fn force(x: f64, omega: f64, drive: f64) -> f64 {
    -(x.powi(3) - omega * x - drive)
}

/// d(force)/dx = Ω − 3x²
///
/// Negative at a stable equilibrium, positive at the saddle.
pub fn force_derivative(x: f64, omega: f64) -> f64 {
    omega - 3.0 * x * x
}

/// Δ = (E/2)² − (Ω/3)³
pub fn discriminant(omega: f64, drive: f64) -> f64 {
    (drive / 2.0).powi(2) - (omega / 3.0).powi(3)
}

/// Three real equilibria (two minima + saddle)?
///
/// Ω ≤ 0 has no fold and is always monostable.
pub fn is_bistable(omega: f64, drive: f64) -> bool {
    omega > 0.0 && discriminant(omega, drive) <= 0.0
}

/// Fold drive |E_crit| = √(4Ω³/27), or `None` when Ω ≤ 0
pub fn critical_drive(omega: f64) -> Option<f64> {
    if omega > 0.0 {
        Some((4.0 * omega.powi(3) / 27.0).sqrt())
    } else {
        None
    }
}

/// Bifurcation set (−E_crit, +E_crit) for a given Ω
pub fn bifurcation_set(omega: f64) -> Option<(f64, f64)> {
    critical_drive(omega).map(|e| (-e, e))
}

/// Distance between the two minima at E = 0, i.e. 2√Ω
pub fn basin_separation(omega: f64) -> f64 {
    if omega > 0.0 {
        2.0 * omega.sqrt()
    } else {
        0.0
    }
}

/// Boundary between the lower and upper basins, or `None` when Ω ≤ 0.
///
/// Inside the bistable region this is the saddle. Past a fold the saddle
/// has merged with the vanished minimum, and the boundary stays at that
/// fold point x = ∓√(Ω/3), the bottleneck a state must pass to change
/// branch. The result is continuous in E.
pub fn separatrix(omega: f64, drive: f64) -> Option<f64> {
    if omega <= 0.0 {
        return None;
    }
    if is_bistable(omega, drive) {
        if let Some(&saddle) = equilibria(omega, drive).get(1) {
            return Some(saddle);
        }
    }

    let fold = (omega / 3.0).sqrt();
    Some(if drive > 0.0 { -fold } else { fold })
}

/// Real roots of x³ − Ωx − E = 0, sorted ascending.
///
/// Returns one root in the monostable region and three in the bistable
/// region. At Δ = 0 two of the three coincide.
pub fn equilibria(omega: f64, drive: f64) -> Vec<f64> {
    if is_bistable(omega, drive) {
        let mut roots = three_roots(omega, drive);
        roots.sort_by(|a, b| a.total_cmp(b));
        roots.to_vec()
    } else {
        vec![single_root(omega, drive)]
    }
}

/// Equilibria that are local minima of V (3x² − Ω > 0)
pub fn stable_equilibria(omega: f64, drive: f64) -> Vec<f64> {
    equilibria(omega, drive)
        .into_iter()
        .filter(|&x| force_derivative(x, omega) < 0.0)
        .collect()
}

/// Stable equilibrium with the lowest potential.
///
/// Ties (E = 0 in the bistable region) resolve to the upper branch.
/// Falls back to all equilibria if none is strictly stable (Ω = 0, E = 0).
pub fn global_minimum(omega: f64, drive: f64) -> f64 {
    let mut candidates = stable_equilibria(omega, drive);
    if candidates.is_empty() {
        candidates = equilibria(omega, drive);
    }

    let mut best = candidates[0];
    let mut best_v = potential(best, omega, drive);
    for &x in &candidates[1..] {
        let v = potential(x, omega, drive);
        if v <= best_v + POTENTIAL_TIE {
            best = x;
            best_v = v.min(best_v);
        }
    }
    best
}

/// Trigonometric Cardano solution, valid for Ω > 0 and Δ ≤ 0
fn three_roots(omega: f64, drive: f64) -> [f64; 3] {
    let amplitude = 2.0 * (omega / 3.0).sqrt();
    let arg = (3.0 * drive / (2.0 * omega)) * (3.0 / omega).sqrt();
    let phi = arg.clamp(-1.0, 1.0).acos() / 3.0;

    let mut roots = [0.0; 3];
    for (k, root) in roots.iter_mut().enumerate() {
        let x = amplitude * (phi - 2.0 * PI * k as f64 / 3.0).cos();
        *root = polish(x, omega, drive);
    }
    roots
}

/// Real Cardano root for Δ ≥ 0 (or any drive when Ω ≤ 0).
///
/// Takes the cube root of the larger-magnitude term and recovers the
/// other through uv = Ω/3, avoiding cancellation.
fn single_root(omega: f64, drive: f64) -> f64 {
    let delta = discriminant(omega, drive).max(0.0);
    let sign = if drive < 0.0 { -1.0 } else { 1.0 };
    let u = sign * (drive.abs() / 2.0 + delta.sqrt()).cbrt();

    if u == 0.0 {
        return 0.0;
    }

    polish(u + omega / (3.0 * u), omega, drive)
}

fn polish(x: f64, omega: f64, drive: f64) -> f64 {
    let slope = 3.0 * x * x - omega;
    if slope.abs() > POLISH_MIN_SLOPE {
        x - (x.powi(3) - omega * x - drive) / slope
    } else {
        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn residual(x: f64, omega: f64, drive: f64) -> f64 {
        x.powi(3) - omega * x - drive
    }

    #[test]
    fn test_force_is_negative_gradient() {
        let (omega, drive) = (1.3, 0.4);
        let h = 1e-6;
        for &x in &[-2.0, -0.5, 0.0, 0.7, 1.9] {
            let numeric =
                -(potential(x + h, omega, drive) - potential(x - h, omega, drive)) / (2.0 * h);
            assert!((numeric - force(x, omega, drive)).abs() < 1e-6);
        }
    }

    #[test]
    fn test_monostable_single_root() {
        let omega = 1.0;
        for &drive in &[-5.0, -1.0, 0.5, 2.0, 40.0] {
            assert!(drive * drive > 4.0 * omega * omega * omega / 27.0);
            let roots = equilibria(omega, drive);
            assert_eq!(roots.len(), 1, "E = {}", drive);
            assert!(residual(roots[0], omega, drive).abs() < 1e-9);
            assert!(!is_bistable(omega, drive));
        }
    }

    #[test]
    fn test_bistable_three_roots_ordered() {
        let omega = 3.0;
        for &drive in &[-1.5, -0.3, 0.0, 0.8, 1.9] {
            let roots = equilibria(omega, drive);
            assert_eq!(roots.len(), 3, "E = {}", drive);
            assert!(roots[0] < roots[1] && roots[1] < roots[2]);
            for &r in &roots {
                assert!(residual(r, omega, drive).abs() < 1e-9);
            }
            // Outer roots stable, middle root unstable
            assert!(force_derivative(roots[0], omega) < 0.0);
            assert!(force_derivative(roots[1], omega) > 0.0);
            assert!(force_derivative(roots[2], omega) < 0.0);
            assert_eq!(stable_equilibria(omega, drive).len(), 2);
        }
    }

    #[test]
    fn test_symmetric_roots_at_zero_drive() {
        let omega = 4.0;
        let roots = equilibria(omega, 0.0);
        assert!((roots[0] + 2.0).abs() < 1e-12);
        assert!(roots[1].abs() < 1e-12);
        assert!((roots[2] - 2.0).abs() < 1e-12);
        assert_eq!(basin_separation(omega), 4.0);
    }

    #[test]
    fn test_bifurcation_boundary() {
        let omega = 3.0;
        let e_crit = critical_drive(omega).unwrap();
        assert!((e_crit - 2.0).abs() < 1e-12);
        assert!(discriminant(omega, e_crit).abs() < 1e-12);
        assert!(discriminant(omega, -e_crit).abs() < 1e-12);

        assert!(is_bistable(omega, e_crit * (1.0 - 1e-9)));
        assert!(!is_bistable(omega, e_crit * (1.0 + 1e-9)));

        let (lo, hi) = bifurcation_set(omega).unwrap();
        assert_eq!(lo, -hi);
    }

    #[test]
    fn test_separatrix_continuous_across_fold() {
        let omega = 3.0;
        let e_crit = critical_drive(omega).unwrap();
        let fold = 1.0;

        assert!(separatrix(omega, 0.0).unwrap().abs() < 1e-12);
        assert_eq!(separatrix(omega, 4.0), Some(-fold));
        assert_eq!(separatrix(omega, -4.0), Some(fold));

        let inside = separatrix(omega, e_crit * (1.0 - 1e-9)).unwrap();
        assert!((inside + fold).abs() < 1e-3);
        let inside = separatrix(omega, -e_crit * (1.0 - 1e-9)).unwrap();
        assert!((inside - fold).abs() < 1e-3);

        assert_eq!(separatrix(0.0, 1.0), None);
    }

    #[test]
    fn test_zero_omega_never_bistable() {
        for i in -200..=200 {
            let drive = i as f64 * 0.05;
            assert!(!is_bistable(0.0, drive), "E = {}", drive);
            let roots = equilibria(0.0, drive);
            assert_eq!(roots.len(), 1);
            assert!(residual(roots[0], 0.0, drive).abs() < 1e-9);
        }
        assert_eq!(critical_drive(0.0), None);
        assert_eq!(basin_separation(0.0), 0.0);
    }

    #[test]
    fn test_negative_omega_monostable() {
        let roots = equilibria(-2.0, 0.0);
        assert_eq!(roots.len(), 1);
        assert!(roots[0].abs() < 1e-12);
        let roots = equilibria(-2.0, 3.0);
        assert_eq!(roots.len(), 1);
        assert!(residual(roots[0], -2.0, 3.0).abs() < 1e-9);
        assert!(!is_bistable(-2.0, 0.0));
    }

    #[test]
    fn test_global_minimum_branch() {
        let omega = 3.0;
        let lower = global_minimum(omega, -1.0);
        let upper = global_minimum(omega, 1.0);
        assert!(lower < 0.0 && upper > 0.0);
        // Tie at E = 0 resolves upward
        assert!((global_minimum(omega, 0.0) - 3.0_f64.sqrt()).abs() < 1e-9);
        // Degenerate cusp point still yields a state
        assert_eq!(global_minimum(0.0, 0.0), 0.0);
    }
}
