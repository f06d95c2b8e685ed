//! Adaptive Dormand–Prince 5(4) integration of the collapse system.
//!
//! An explicit embedded Runge–Kutta pair with proportional step control,
//! cubic-Hermite dense output onto a uniform sample grid, and a terminal
//! evaporation event located by bisection inside the accepted step. The
//! independent variable ℓ decreases, so steps are negative throughout.

use nalgebra::Vector2;
use thiserror::Error;
use units::Time;

use crate::ode::CollapseOde;

/// Dormand–Prince 5(4) Butcher tableau.
const C: [f64; 6] = [1.0 / 5.0, 3.0 / 10.0, 4.0 / 5.0, 8.0 / 9.0, 1.0, 1.0];

const A: [[f64; 6]; 6] = [
    [1.0 / 5.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    [3.0 / 40.0, 9.0 / 40.0, 0.0, 0.0, 0.0, 0.0],
    [44.0 / 45.0, -56.0 / 15.0, 32.0 / 9.0, 0.0, 0.0, 0.0],
    [
        19372.0 / 6561.0,
        -25360.0 / 2187.0,
        64448.0 / 6561.0,
        -212.0 / 729.0,
        0.0,
        0.0,
    ],
    [
        9017.0 / 3168.0,
        -355.0 / 33.0,
        46732.0 / 5247.0,
        49.0 / 176.0,
        -5103.0 / 18656.0,
        0.0,
    ],
    [
        35.0 / 384.0,
        0.0,
        500.0 / 1113.0,
        125.0 / 192.0,
        -2187.0 / 6784.0,
        11.0 / 84.0,
    ],
];

/// 5th-order weights (the last row of `A`; FSAL).
const B5: [f64; 7] = [
    35.0 / 384.0,
    0.0,
    500.0 / 1113.0,
    125.0 / 192.0,
    -2187.0 / 6784.0,
    11.0 / 84.0,
    0.0,
];

/// Embedded 4th-order weights for the error estimate.
const B4: [f64; 7] = [
    5179.0 / 57600.0,
    0.0,
    7571.0 / 16695.0,
    393.0 / 640.0,
    -92097.0 / 339200.0,
    187.0 / 2100.0,
    1.0 / 40.0,
];

/// Tolerances and limits for one integration.
#[derive(Debug, Clone)]
pub struct SolverOptions {
    /// Relative error tolerance per step.
    pub rtol: f64,
    /// Absolute error tolerance per step.
    pub atol: f64,
    /// Accepted-step budget before the solve is declared stuck.
    pub max_steps: usize,
    /// Size of the uniform dense-output grid over [ℓ_f, ℓ_end].
    pub n_samples: usize,
}

impl Default for SolverOptions {
    /// Tolerances sized for six-plus significant digits in the terminal
    /// state over spans of ~150 in ℓ.
    fn default() -> Self {
        Self {
            rtol: 1.0e-10,
            atol: 1.0e-12,
            max_steps: 100_000,
            n_samples: 10_000,
        }
    }
}

/// One dense-output sample.
#[derive(Debug, Clone, Copy)]
pub struct Sample {
    /// Log-density coordinate.
    pub l: f64,
    /// State (b, t) at `l`.
    pub state: Vector2<f64>,
}

/// Result of one integration of the collapse system.
#[derive(Debug, Clone)]
pub struct Solution {
    /// Dense-output samples, monotone in ℓ (decreasing). Truncated at
    /// the event location when the event fires.
    pub samples: Vec<Sample>,
    /// Final ℓ reached: ℓ_end, or the event location.
    pub terminal_l: f64,
    /// State at `terminal_l`.
    pub terminal_state: Vector2<f64>,
    /// Whether the evaporation event terminated the solve early.
    pub event_fired: bool,
    /// Accepted steps taken.
    pub steps: usize,
}

impl Solution {
    /// Proper time elapsed between formation and the terminal state.
    pub fn elapsed(&self) -> Time {
        Time::from_inverse_gev(self.terminal_state[1])
    }
}

/// Numerical failure inside one solve.
#[derive(Debug, Error, PartialEq)]
pub enum IntegrationError {
    /// The state or error estimate stopped being finite and step
    /// reduction did not recover it.
    #[error("state became non-finite near ln rho = {l}")]
    NonFiniteState { l: f64 },
    /// Step control drove the step below resolvable size, typically a
    /// pole of the right-hand side.
    #[error("step size underflow near ln rho = {l}")]
    StepSizeUnderflow { l: f64 },
    /// The accepted-step budget ran out before reaching the target.
    #[error("integration exceeded {max_steps} steps")]
    StepLimitExceeded { max_steps: usize },
}

/// Integrate `ode` from `l_start` down to `l_end` starting at `y0`.
///
/// The evaporation event is always armed; in the relativistic regime its
/// margin is constant and it never fires.
///
/// # Arguments
///
/// * `ode` - System right-hand side and event margin
/// * `l_start` - Formation log-density ℓ_f
/// * `l_end` - Reference-epoch log-density ℓ_end (must be < `l_start`)
/// * `y0` - Initial state, (1, 0) at formation
/// * `opts` - Tolerances and limits
pub fn integrate(
    ode: &CollapseOde,
    l_start: f64,
    l_end: f64,
    y0: Vector2<f64>,
    opts: &SolverOptions,
) -> Result<Solution, IntegrationError> {
    let span = l_end - l_start;
    debug_assert!(span < 0.0, "log-density must decrease");

    let mut l = l_start;
    let mut y = y0;
    let mut k1 = ode.rhs(l, &y);
    let mut h = span / 1.0e4;
    let mut steps = 0usize;

    // Uniform dense-output grid, filled as accepted steps pass over it.
    let n = opts.n_samples.max(2);
    let sample_l = |i: usize| l_start + span * (i as f64) / ((n - 1) as f64);
    let mut samples = Vec::with_capacity(n);
    samples.push(Sample { l: l_start, state: y0 });
    let mut next_sample = 1usize;

    loop {
        if steps >= opts.max_steps {
            return Err(IntegrationError::StepLimitExceeded {
                max_steps: opts.max_steps,
            });
        }
        // Do not overshoot the target.
        let mut reaches_end = false;
        if (l + h) <= l_end {
            h = l_end - l;
            reaches_end = true;
        }
        if h.abs() < f64::EPSILON * l.abs().max(1.0) {
            if reaches_end {
                // Within rounding of the target: accept the state as is.
                if next_sample < n {
                    samples.push(Sample { l, state: y });
                }
                return Ok(Solution {
                    samples,
                    terminal_l: l,
                    terminal_state: y,
                    event_fired: false,
                    steps,
                });
            }
            return Err(IntegrationError::StepSizeUnderflow { l });
        }

        // Stages k2..k6 plus the 5th-order combination.
        let mut k = [k1, Vector2::zeros(), Vector2::zeros(), Vector2::zeros(),
            Vector2::zeros(), Vector2::zeros(), Vector2::zeros()];
        for s in 0..6 {
            let mut yi = y;
            for (j, kj) in k.iter().enumerate().take(s + 1) {
                yi += kj * (h * A[s][j]);
            }
            if s < 5 {
                k[s + 1] = ode.rhs(l + C[s] * h, &yi);
            } else {
                // Row 6 of A equals the 5th-order weights: yi is y_new.
                let y_new = yi;
                k[6] = ode.rhs(l + h, &y_new);

                let mut err = Vector2::zeros();
                for j in 0..7 {
                    err += k[j] * (h * (B5[j] - B4[j]));
                }

                if !(y_new[0].is_finite() && y_new[1].is_finite() && err[0].is_finite()
                    && err[1].is_finite())
                {
                    // Reject and retry shorter; underflow check above
                    // converts a persistent failure into an error.
                    h *= 0.5;
                    if h.abs() < f64::EPSILON * l.abs().max(1.0) {
                        return Err(IntegrationError::NonFiniteState { l });
                    }
                    break;
                }

                let err_norm = {
                    let mut acc = 0.0;
                    for i in 0..2 {
                        let scale = opts.atol + opts.rtol * y[i].abs().max(y_new[i].abs());
                        let e = err[i] / scale;
                        acc += e * e;
                    }
                    (acc / 2.0).sqrt()
                };

                if err_norm <= 1.0 {
                    steps += 1;
                    let k_end = k[6];

                    // Terminal event: bracketed sign change of the margin.
                    if ode.evaporation_margin(&y) > 0.0
                        && ode.evaporation_margin(&y_new) <= 0.0
                    {
                        let theta = locate_event(ode, &y, &y_new, &k1, &k_end, h);
                        let l_event = l + theta * h;
                        let y_event = hermite(theta, &y, &y_new, &k1, &k_end, h);
                        fill_samples(
                            &mut samples, &mut next_sample, n, &sample_l,
                            l, l_event, &y, &y_new, &k1, &k_end, h,
                        );
                        samples.push(Sample { l: l_event, state: y_event });
                        return Ok(Solution {
                            samples,
                            terminal_l: l_event,
                            terminal_state: y_event,
                            event_fired: true,
                            steps,
                        });
                    }

                    fill_samples(
                        &mut samples, &mut next_sample, n, &sample_l,
                        l, l + h, &y, &y_new, &k1, &k_end, h,
                    );

                    l += h;
                    y = y_new;
                    k1 = k_end;

                    if reaches_end || l <= l_end {
                        if next_sample < n {
                            // Final grid point can miss the fill by one
                            // ulp of the clamped last step.
                            samples.push(Sample { l, state: y });
                        }
                        return Ok(Solution {
                            samples,
                            terminal_l: l,
                            terminal_state: y,
                            event_fired: false,
                            steps,
                        });
                    }

                    let grow = if err_norm == 0.0 {
                        5.0
                    } else {
                        (0.9 * err_norm.powf(-0.2)).clamp(0.2, 5.0)
                    };
                    h *= grow;
                } else {
                    // Rejected: shrink only.
                    h *= (0.9 * err_norm.powf(-0.2)).clamp(0.2, 1.0);
                }
            }
        }
    }
}

/// Cubic-Hermite interpolant over one accepted step.
fn hermite(
    theta: f64,
    y0: &Vector2<f64>,
    y1: &Vector2<f64>,
    f0: &Vector2<f64>,
    f1: &Vector2<f64>,
    h: f64,
) -> Vector2<f64> {
    let t2 = theta * theta;
    let t3 = t2 * theta;
    y0 * (2.0 * t3 - 3.0 * t2 + 1.0)
        + f0 * (h * (t3 - 2.0 * t2 + theta))
        + y1 * (-2.0 * t3 + 3.0 * t2)
        + f1 * (h * (t3 - t2))
}

/// Bisect the step fraction at which the evaporation margin crosses zero.
fn locate_event(
    ode: &CollapseOde,
    y0: &Vector2<f64>,
    y1: &Vector2<f64>,
    f0: &Vector2<f64>,
    f1: &Vector2<f64>,
    h: f64,
) -> f64 {
    let mut lo = 0.0_f64; // margin > 0
    let mut hi = 1.0_f64; // margin <= 0
    for _ in 0..80 {
        let mid = 0.5 * (lo + hi);
        let margin = ode.evaporation_margin(&hermite(mid, y0, y1, f0, f1, h));
        if margin > 0.0 {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    0.5 * (lo + hi)
}

/// Record every dense-grid point the step [l_from, l_to] passed over.
#[allow(clippy::too_many_arguments)]
fn fill_samples(
    samples: &mut Vec<Sample>,
    next_sample: &mut usize,
    n: usize,
    sample_l: &dyn Fn(usize) -> f64,
    l_from: f64,
    l_to: f64,
    y0: &Vector2<f64>,
    y1: &Vector2<f64>,
    f0: &Vector2<f64>,
    f1: &Vector2<f64>,
    h: f64,
) {
    while *next_sample < n {
        let s = sample_l(*next_sample);
        // ℓ decreases: the step covers grid points in (l_to, l_from].
        if s < l_to {
            break;
        }
        let theta = (s - l_from) / h;
        samples.push(Sample {
            l: s,
            state: hermite(theta, y0, y1, f0, f1, h),
        });
        *next_sample += 1;
    }
}
