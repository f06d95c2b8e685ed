mod tests {
    use approx::assert_relative_eq;
    use nalgebra::Vector2;
    use units::Mass;

    use cosmo::constants::{PLANCK_MASS_GEV, RHO_REFERENCE};
    use cosmo::formation::rho_f;

    use crate::ode::{CollapseOde, Regime};
    use crate::solver::{integrate, IntegrationError, SolverOptions};

    const W_RAD: f64 = 1.0 / 3.0;

    fn formation_log_density(mass_g: f64) -> f64 {
        rho_f(Mass::from_grams(mass_g), W_RAD).unwrap().ln()
    }

    /// With beta = 0 the patch is pure radiation and the system has the
    /// closed form b = (rho_f/rho)^{1/4},
    /// t = (sqrt(3) M_pl / 2)(rho^{-1/2} - rho_f^{-1/2}).
    #[test]
    fn matches_pure_radiation_closed_form() {
        let l_f = formation_log_density(1.0e15);
        let l_end = RHO_REFERENCE.ln();
        let ode = CollapseOde::new(Mass::from_grams(1.0e15), 0.0, Regime::Full);

        let sol = integrate(&ode, l_f, l_end, Vector2::new(1.0, 0.0), &SolverOptions::default())
            .unwrap();

        let rho_form = l_f.exp();
        let expected_b = (rho_form / RHO_REFERENCE).powf(0.25);
        let expected_t = 3.0_f64.sqrt() * PLANCK_MASS_GEV / 2.0
            * (RHO_REFERENCE.powf(-0.5) - rho_form.powf(-0.5));

        assert!(!sol.event_fired);
        assert_relative_eq!(sol.terminal_state[0], expected_b, max_relative = 1e-6);
        assert_relative_eq!(sol.terminal_state[1], expected_t, max_relative = 1e-6);

        // The reference epoch sits a fraction of a second after the end
        // of inflation on a laboratory clock
        let seconds = sol.elapsed().to_seconds();
        assert!(seconds > 1.0e-3 && seconds < 1.0);
    }

    #[test]
    fn repeated_solves_are_identical() {
        let l_f = formation_log_density(5.0e12);
        let l_end = RHO_REFERENCE.ln();
        let ode = CollapseOde::new(Mass::from_grams(5.0e12), 1.2e-21, Regime::Full);
        let opts = SolverOptions::default();

        let first = integrate(&ode, l_f, l_end, Vector2::new(1.0, 0.0), &opts).unwrap();
        let second = integrate(&ode, l_f, l_end, Vector2::new(1.0, 0.0), &opts).unwrap();

        // No hidden state: bit-for-bit identical terminal values
        assert_eq!(first.terminal_state, second.terminal_state);
        assert_eq!(first.terminal_l, second.terminal_l);
        assert_eq!(first.steps, second.steps);
    }

    #[test]
    fn dense_samples_cover_the_interval_monotonically() {
        let l_f = formation_log_density(1.0e13);
        let l_end = RHO_REFERENCE.ln();
        let ode = CollapseOde::new(Mass::from_grams(1.0e13), 1.0e-21, Regime::Full);
        let opts = SolverOptions {
            n_samples: 1_000,
            ..SolverOptions::default()
        };

        let sol = integrate(&ode, l_f, l_end, Vector2::new(1.0, 0.0), &opts).unwrap();

        assert_eq!(sol.samples.len(), 1_000);
        assert_eq!(sol.samples[0].l, l_f);
        assert_eq!(sol.samples[0].state, Vector2::new(1.0, 0.0));
        for pair in sol.samples.windows(2) {
            assert!(pair[0].l > pair[1].l);
        }
        // Scale factor ratio only grows as density drops
        assert!(sol.terminal_state[0] > 1.0);
    }

    #[test]
    fn evaporation_event_terminates_small_masses_early() {
        // A 1e8 g black hole evaporates well before the reference epoch
        let l_f = formation_log_density(1.0e8);
        let l_end = RHO_REFERENCE.ln();
        let ode = CollapseOde::new(Mass::from_grams(1.0e8), 1.0e-21, Regime::Full);

        let sol = integrate(&ode, l_f, l_end, Vector2::new(1.0, 0.0), &SolverOptions::default())
            .unwrap();

        assert!(sol.event_fired);
        assert!(sol.terminal_l > l_end);
        // The located state sits on the event surface, up to the dense
        // interpolation error of the elapsed time
        assert_relative_eq!(
            ode.evaporation_margin(&sol.terminal_state),
            0.0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn relativistic_regime_never_fires_the_event() {
        let l_f = formation_log_density(1.0e8);
        let l_end = RHO_REFERENCE.ln();
        let ode = CollapseOde::new(Mass::from_grams(1.0e8), 1.0e-21, Regime::Relativistic);

        let sol = integrate(&ode, l_f, l_end, Vector2::new(1.0, 0.0), &SolverOptions::default())
            .unwrap();

        assert!(!sol.event_fired);
        assert_relative_eq!(sol.terminal_l, l_end, max_relative = 1e-12);
    }

    #[test]
    fn exhausted_step_budget_is_an_error() {
        let l_f = formation_log_density(1.0e13);
        let l_end = RHO_REFERENCE.ln();
        let ode = CollapseOde::new(Mass::from_grams(1.0e13), 1.0e-21, Regime::Full);
        let opts = SolverOptions {
            max_steps: 5,
            ..SolverOptions::default()
        };

        let result = integrate(&ode, l_f, l_end, Vector2::new(1.0, 0.0), &opts);
        assert_eq!(
            result.unwrap_err(),
            IntegrationError::StepLimitExceeded { max_steps: 5 }
        );
    }
}
