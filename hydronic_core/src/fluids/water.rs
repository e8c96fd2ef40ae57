//! Saturated liquid water properties, 32°F - 220°F.
//!
//! Specific gravity is referenced to water at its maximum density (39.2°F,
//! 62.43 lb/ft³), so the 140°F row reads 61.38 / 62.43 = 0.983.

use super::{row, FluidRow};

/// Water properties in ascending temperature order:
/// temperature (°F), density (lb/ft³), viscosity (cP), SG, cp (Btu/lb·°F)
pub const WATER: &[FluidRow] = &[
    row(32.0, 62.42, 1.790, 1.000, 1.009),
    row(40.0, 62.43, 1.540, 1.000, 1.005),
    row(50.0, 62.41, 1.310, 1.000, 1.002),
    row(60.0, 62.37, 1.120, 0.999, 1.000),
    row(70.0, 62.30, 0.980, 0.998, 0.999),
    row(80.0, 62.22, 0.860, 0.997, 0.998),
    row(90.0, 62.11, 0.765, 0.995, 0.998),
    row(100.0, 62.00, 0.682, 0.993, 0.998),
    row(110.0, 61.86, 0.616, 0.991, 0.999),
    row(120.0, 61.71, 0.560, 0.988, 0.999),
    row(130.0, 61.55, 0.511, 0.986, 1.000),
    row(140.0, 61.38, 0.470, 0.983, 1.001),
    row(150.0, 61.20, 0.433, 0.980, 1.002),
    row(160.0, 61.00, 0.401, 0.977, 1.003),
    row(170.0, 60.80, 0.372, 0.974, 1.004),
    row(180.0, 60.58, 0.347, 0.970, 1.005),
    row(190.0, 60.36, 0.325, 0.967, 1.006),
    row(200.0, 60.12, 0.305, 0.963, 1.007),
    row(210.0, 59.88, 0.287, 0.959, 1.009),
    row(220.0, 59.63, 0.271, 0.955, 1.011),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_ascending() {
        assert!(WATER.windows(2).all(|w| w[0].temp_f < w[1].temp_f));
    }

    #[test]
    fn test_viscosity_falls_with_temperature() {
        assert!(WATER.windows(2).all(|w| w[0].props.viscosity_cp > w[1].props.viscosity_cp));
    }
}
