mod tests {
    use approx::assert_relative_eq;

    use crate::energy_density::EnergyDensity;

    #[test]
    fn test_log_round_trip() {
        let rho = EnergyDensity::from_gev4(1.78e63);
        let back = EnergyDensity::from_ln_gev4(rho.ln());
        assert_relative_eq!(back.to_gev4(), rho.to_gev4(), max_relative = 1e-12);
    }

    #[test]
    fn test_density_ratio() {
        let formation = EnergyDensity::from_gev4(1.0e48);
        let reference = EnergyDensity::from_gev4(1.0e-8);
        assert_relative_eq!(formation / reference, 1.0e56);
        assert_relative_eq!((formation * 2.0).to_gev4(), 2.0e48);
        assert_relative_eq!((formation / 2.0).to_gev4(), 0.5e48);
    }
}
