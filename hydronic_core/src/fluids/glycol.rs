//! Propylene and ethylene glycol solution properties.
//!
//! One temperature table per concentration (% by volume). The 0% entries point
//! at the water table so concentration blends start from plain water. Lower concentrations start at warmer temperatures because
//! the solution would freeze below them.

use super::water::WATER;
use super::{row, ConcentrationTable, FluidRow};

/// Propylene glycol tables, ascending by concentration
pub const PROPYLENE_GLYCOL: &[ConcentrationTable] = &[
    ConcentrationTable { concentration_pct: 0.0, rows: WATER },
    ConcentrationTable { concentration_pct: 20.0, rows: PROPYLENE_20 },
    ConcentrationTable { concentration_pct: 30.0, rows: PROPYLENE_30 },
    ConcentrationTable { concentration_pct: 40.0, rows: PROPYLENE_40 },
    ConcentrationTable { concentration_pct: 50.0, rows: PROPYLENE_50 },
    ConcentrationTable { concentration_pct: 60.0, rows: PROPYLENE_60 },
];

/// Ethylene glycol tables, ascending by concentration
pub const ETHYLENE_GLYCOL: &[ConcentrationTable] = &[
    ConcentrationTable { concentration_pct: 0.0, rows: WATER },
    ConcentrationTable { concentration_pct: 20.0, rows: ETHYLENE_20 },
    ConcentrationTable { concentration_pct: 30.0, rows: ETHYLENE_30 },
    ConcentrationTable { concentration_pct: 40.0, rows: ETHYLENE_40 },
    ConcentrationTable { concentration_pct: 50.0, rows: ETHYLENE_50 },
    ConcentrationTable { concentration_pct: 60.0, rows: ETHYLENE_60 },
];

// Propylene glycol: temperature (°F), density (lb/ft³), viscosity (cP), SG, cp (Btu/lb·°F)

const PROPYLENE_20: &[FluidRow] = &[
    row(20.0, 63.76, 3.99, 1.021, 0.946),
    row(40.0, 63.56, 2.88, 1.018, 0.952),
    row(60.0, 63.34, 2.14, 1.015, 0.958),
    row(80.0, 63.10, 1.62, 1.011, 0.964),
    row(100.0, 62.85, 1.25, 1.007, 0.970),
    row(120.0, 62.58, 0.980, 1.002, 0.976),
    row(140.0, 62.30, 0.790, 0.998, 0.982),
    row(160.0, 62.00, 0.640, 0.993, 0.988),
    row(180.0, 61.68, 0.520, 0.988, 0.994),
    row(200.0, 61.35, 0.440, 0.983, 1.000),
];

const PROPYLENE_30: &[FluidRow] = &[
    row(0.0, 64.66, 9.70, 1.036, 0.910),
    row(20.0, 64.43, 6.63, 1.032, 0.918),
    row(40.0, 64.19, 4.67, 1.028, 0.926),
    row(60.0, 63.93, 3.38, 1.024, 0.934),
    row(80.0, 63.65, 2.51, 1.020, 0.942),
    row(100.0, 63.36, 1.90, 1.015, 0.950),
    row(120.0, 63.05, 1.47, 1.010, 0.958),
    row(140.0, 62.73, 1.15, 1.005, 0.966),
    row(160.0, 62.39, 0.920, 0.999, 0.974),
    row(180.0, 62.03, 0.740, 0.994, 0.982),
    row(200.0, 61.66, 0.610, 0.988, 0.990),
];

const PROPYLENE_40: &[FluidRow] = &[
    row(0.0, 65.28, 14.90, 1.046, 0.880),
    row(20.0, 65.01, 9.92, 1.041, 0.888),
    row(40.0, 64.73, 6.82, 1.037, 0.896),
    row(60.0, 64.43, 4.82, 1.032, 0.904),
    row(80.0, 64.11, 3.50, 1.027, 0.912),
    row(100.0, 63.78, 2.60, 1.022, 0.920),
    row(120.0, 63.43, 1.97, 1.016, 0.928),
    row(140.0, 63.07, 1.52, 1.010, 0.936),
    row(160.0, 62.69, 1.19, 1.004, 0.944),
    row(180.0, 62.29, 0.950, 0.998, 0.952),
    row(200.0, 61.88, 0.770, 0.991, 0.960),
];

const PROPYLENE_50: &[FluidRow] = &[
    row(0.0, 65.85, 24.50, 1.055, 0.830),
    row(20.0, 65.54, 15.90, 1.050, 0.840),
    row(40.0, 65.22, 10.60, 1.045, 0.850),
    row(60.0, 64.88, 7.35, 1.039, 0.860),
    row(80.0, 64.52, 5.22, 1.033, 0.870),
    row(100.0, 64.15, 3.80, 1.028, 0.880),
    row(120.0, 63.76, 2.83, 1.021, 0.890),
    row(140.0, 63.36, 2.15, 1.015, 0.900),
    row(160.0, 62.94, 1.66, 1.008, 0.910),
    row(180.0, 62.50, 1.30, 1.001, 0.920),
    row(200.0, 62.05, 1.04, 0.994, 0.930),
];

const PROPYLENE_60: &[FluidRow] = &[
    row(0.0, 66.35, 41.30, 1.063, 0.780),
    row(20.0, 66.00, 26.00, 1.057, 0.790),
    row(40.0, 65.64, 17.00, 1.051, 0.800),
    row(60.0, 65.26, 11.50, 1.045, 0.810),
    row(80.0, 64.86, 7.99, 1.039, 0.820),
    row(100.0, 64.45, 5.70, 1.032, 0.830),
    row(120.0, 64.02, 4.16, 1.025, 0.840),
    row(140.0, 63.58, 3.11, 1.018, 0.850),
    row(160.0, 63.12, 2.36, 1.011, 0.860),
    row(180.0, 62.64, 1.83, 1.003, 0.870),
    row(200.0, 62.15, 1.43, 0.996, 0.880),
];

// Ethylene glycol: temperature (°F), density (lb/ft³), viscosity (cP), SG, cp (Btu/lb·°F)

const ETHYLENE_20: &[FluidRow] = &[
    row(20.0, 64.21, 3.16, 1.029, 0.906),
    row(40.0, 64.01, 2.32, 1.025, 0.912),
    row(60.0, 63.79, 1.75, 1.022, 0.918),
    row(80.0, 63.55, 1.34, 1.018, 0.924),
    row(100.0, 63.30, 1.05, 1.014, 0.930),
    row(120.0, 63.03, 0.840, 1.010, 0.936),
    row(140.0, 62.75, 0.680, 1.005, 0.942),
    row(160.0, 62.45, 0.550, 1.000, 0.948),
    row(180.0, 62.13, 0.460, 0.995, 0.954),
    row(200.0, 61.80, 0.390, 0.990, 0.960),
];

const ETHYLENE_30: &[FluidRow] = &[
    row(0.0, 65.30, 6.36, 1.046, 0.850),
    row(20.0, 65.07, 4.47, 1.042, 0.858),
    row(40.0, 64.83, 3.23, 1.038, 0.866),
    row(60.0, 64.57, 2.39, 1.034, 0.874),
    row(80.0, 64.29, 1.81, 1.030, 0.882),
    row(100.0, 64.00, 1.40, 1.025, 0.890),
    row(120.0, 63.69, 1.10, 1.020, 0.898),
    row(140.0, 63.37, 0.880, 1.015, 0.906),
    row(160.0, 63.03, 0.710, 1.010, 0.914),
    row(180.0, 62.67, 0.590, 1.004, 0.922),
    row(200.0, 62.30, 0.490, 0.998, 0.930),
];

const ETHYLENE_40: &[FluidRow] = &[
    row(0.0, 66.20, 9.09, 1.060, 0.810),
    row(20.0, 65.93, 6.27, 1.056, 0.818),
    row(40.0, 65.65, 4.45, 1.052, 0.826),
    row(60.0, 65.35, 3.25, 1.047, 0.834),
    row(80.0, 65.03, 2.43, 1.042, 0.842),
    row(100.0, 64.70, 1.85, 1.036, 0.850),
    row(120.0, 64.35, 1.44, 1.031, 0.858),
    row(140.0, 63.99, 1.14, 1.025, 0.866),
    row(160.0, 63.61, 0.910, 1.019, 0.874),
    row(180.0, 63.21, 0.740, 1.012, 0.882),
    row(200.0, 62.80, 0.610, 1.006, 0.890),
];

const ETHYLENE_50: &[FluidRow] = &[
    row(0.0, 67.05, 13.30, 1.074, 0.750),
    row(20.0, 66.74, 8.99, 1.069, 0.760),
    row(40.0, 66.42, 6.28, 1.064, 0.770),
    row(60.0, 66.08, 4.51, 1.058, 0.780),
    row(80.0, 65.72, 3.32, 1.053, 0.790),
    row(100.0, 65.35, 2.50, 1.047, 0.800),
    row(120.0, 64.96, 1.92, 1.041, 0.810),
    row(140.0, 64.56, 1.50, 1.034, 0.820),
    row(160.0, 64.14, 1.19, 1.027, 0.830),
    row(180.0, 63.70, 0.960, 1.020, 0.840),
    row(200.0, 63.25, 0.780, 1.013, 0.850),
];

const ETHYLENE_60: &[FluidRow] = &[
    row(0.0, 67.85, 19.50, 1.087, 0.700),
    row(20.0, 67.50, 13.00, 1.081, 0.710),
    row(40.0, 67.14, 8.92, 1.075, 0.720),
    row(60.0, 66.76, 6.31, 1.069, 0.730),
    row(80.0, 66.36, 4.58, 1.063, 0.740),
    row(100.0, 65.95, 3.40, 1.056, 0.750),
    row(120.0, 65.52, 2.58, 1.049, 0.760),
    row(140.0, 65.08, 1.99, 1.042, 0.770),
    row(160.0, 64.62, 1.56, 1.035, 0.780),
    row(180.0, 64.14, 1.25, 1.027, 0.790),
    row(200.0, 63.65, 1.01, 1.020, 0.800),
];
