mod tests {
    use units::Mass;

    use collapse::SolverOptions;

    use crate::bound::Bound;
    use crate::grid::build_grid;
    use crate::pipeline::bound_curve;

    const W_RAD: f64 = 1.0 / 3.0;

    /// Spot-check grid spanning every constraint regime, in grams.
    const SPOT_MASSES: [f64; 5] = [1.0e10, 1.0e12, 1.0e14, 5.0e14, 1.0e16];

    fn spot_grid() -> Vec<Mass> {
        SPOT_MASSES.iter().map(|&m| Mass::from_grams(m)).collect()
    }

    #[test]
    fn masses_route_to_exactly_the_covering_constraints() {
        let grid = spot_grid();
        let curve = bound_curve(&grid, W_RAD, &SolverOptions::default()).unwrap();

        // Constraint order: dm-halo, bbn, self-destruction,
        // cmb-annihilation, grb, reionization, lsp-relic.
        let expected: [&[usize]; 5] = [
            &[6],       // 1e10 g: LSP only
            &[2],       // 1e12 g: self-destruction only
            &[3, 4],    // 1e14 g: CMB annihilation + GRB falling branch
            &[0, 4],    // 5e14 g: DM halo + GRB rising branch
            &[0, 4, 5], // 1e16 g: DM halo + GRB + reionization
        ];

        for (i, applicable) in expected.iter().enumerate() {
            for (c, result) in curve.constraints.iter().enumerate() {
                let should_apply = applicable.contains(&c);
                assert_eq!(
                    result.betas[i].is_applicable(),
                    should_apply,
                    "constraint {} at mass {} g",
                    result.name,
                    SPOT_MASSES[i]
                );
            }
        }
    }

    #[test]
    fn envelope_is_the_elementwise_minimum() {
        let grid = spot_grid();
        let curve = bound_curve(&grid, W_RAD, &SolverOptions::default()).unwrap();

        for i in 0..grid.len() {
            let expected = curve
                .constraints
                .iter()
                .fold(Bound::NotApplicable, |acc, r| acc.min(r.betas[i]));
            assert_eq!(curve.envelope[i], expected);
        }
        // Every spot mass is covered by at least one constraint
        assert!(curve.envelope.iter().all(Bound::is_applicable));
    }

    #[test]
    fn full_grid_pass_completes_with_aligned_output() {
        let grid = build_grid(0.5).unwrap();
        let curve = bound_curve(&grid, W_RAD, &SolverOptions::default()).unwrap();

        assert_eq!(curve.envelope.len(), grid.len());
        for result in &curve.constraints {
            assert_eq!(result.betas.len(), grid.len());
            assert_eq!(result.omegas.len(), grid.len());
        }

        // The envelope never exceeds any single constraint where both apply
        for (i, env) in curve.envelope.iter().enumerate() {
            if let Some(env_value) = env.value() {
                assert!(env_value > 0.0);
                for result in &curve.constraints {
                    if let Some(value) = result.betas[i].value() {
                        assert!(env_value <= value);
                    }
                }
            }
        }

        // The tabulated nucleosynthesis region integrates successfully:
        // every in-window BBN mass reports a relic abundance.
        let bbn = curve
            .constraints
            .iter()
            .find(|r| r.name == "bbn")
            .unwrap();
        let applicable_betas = bbn.betas.iter().filter(|b| b.is_applicable()).count();
        let applicable_omegas = bbn.omegas.iter().filter(|b| b.is_applicable()).count();
        assert!(applicable_betas >= 77);
        assert_eq!(applicable_betas, applicable_omegas);
    }
}
