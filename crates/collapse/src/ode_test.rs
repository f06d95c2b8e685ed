mod tests {
    use approx::assert_relative_eq;
    use nalgebra::Vector2;
    use units::{Mass, PLANCK_MASS_G};

    use cosmo::constants::{PLANCK_MASS_GEV, PLANCK_TIME};

    use crate::ode::{CollapseOde, Regime};

    #[test]
    fn lifetime_scales_with_mass_cubed() {
        let ode = CollapseOde::new(Mass::from_grams(1.0e12), 1.0e-21, Regime::Full);
        let ratio = 1.0e12 / PLANCK_MASS_G;
        assert_relative_eq!(ode.lifetime(), PLANCK_TIME * ratio.powi(3));

        // Doubling the mass multiplies the lifetime by 8
        let doubled = CollapseOde::new(Mass::from_grams(2.0e12), 1.0e-21, Regime::Full);
        assert_relative_eq!(doubled.lifetime() / ode.lifetime(), 8.0, max_relative = 1e-12);
    }

    #[test]
    fn beta_zero_gives_pure_radiation_derivatives() {
        let ode = CollapseOde::new(Mass::from_grams(1.0e15), 0.0, Regime::Full);
        let y = Vector2::new(3.0, 1.0e10);
        let l = 12.0;

        let dy = ode.rhs(l, &y);
        // Om_0 = 0: db/dl = -b/4
        assert_relative_eq!(dy[0], -3.0 / 4.0);
        // dt/dl = sqrt(3) M_pl / (-4 rho^{1/2})
        let expected = 3.0_f64.sqrt() * PLANCK_MASS_GEV / (-4.0 * (0.5 * l).exp());
        assert_relative_eq!(dy[1], expected);
    }

    #[test]
    fn relativistic_regime_freezes_the_clock() {
        let ode = CollapseOde::new(Mass::from_grams(1.0e8), 1.0e-20, Regime::Relativistic);
        let y = Vector2::new(5.0e3, 0.0);

        assert_eq!(ode.rhs(20.0, &y)[1], 0.0);
        assert_relative_eq!(
            ode.omega_pbh(&y),
            1.0e-20 * 5.0e3 * (PLANCK_MASS_G / 1.0e8),
            max_relative = 1e-12
        );
    }

    #[test]
    fn full_regime_carries_mass_loss_factor() {
        let ode = CollapseOde::new(Mass::from_grams(1.0e10), 2.0e-21, Regime::Full);
        // Seven eighths of the lifetime elapsed: remaining fraction 1/2
        let y = Vector2::new(10.0, ode.lifetime() * 7.0 / 8.0);
        assert_relative_eq!(ode.omega_pbh(&y), 2.0e-21 * 10.0 * 0.5, max_relative = 1e-12);
    }

    #[test]
    fn evaporation_margin_crosses_zero_at_planck_remnant() {
        let ode = CollapseOde::new(Mass::from_grams(1.0e8), 1.0e-21, Regime::Full);
        let ratio = PLANCK_MASS_G / 1.0e8;

        let fresh = Vector2::new(1.0, 0.0);
        assert!(ode.evaporation_margin(&fresh) > 0.0);

        let at_remnant = Vector2::new(1.0, ode.lifetime() * (1.0 - ratio.powi(3)));
        assert_relative_eq!(ode.evaporation_margin(&at_remnant), 0.0, epsilon = 1e-12);

        let past = Vector2::new(1.0, ode.lifetime());
        assert!(ode.evaporation_margin(&past) < 0.0);
    }
}
