//! # Fluid Property Model
//!
//! Density, viscosity, specific gravity and specific heat for the heat-transfer
//! fluids used in hydronic loops, looked up from tabulated data.
//!
//! ## Supported Fluids
//!
//! - **Water**: one table keyed by temperature (32°F - 220°F)
//! - **Propylene glycol** / **Ethylene glycol**: one temperature table per
//!   concentration (0, 20, 30, 40, 50, 60 % by volume)
//!
//! ## Interpolation Rules
//!
//! - Linear between the two bracketing rows (`ninterp`), no extrapolation
//! - Inputs outside a table are clamped to the nearest endpoint
//! - Glycol is resolved in two stages: temperature inside each of the two
//!   bracketing concentration tables, then linear by concentration
//! - Exact table keys return the tabulated row unchanged
//!
//! ## Example
//!
//! ```rust
//! use hydronic_core::fluids::{properties, FluidType};
//!
//! let water = properties(FluidType::Water, 0.0, 140.0).unwrap();
//! assert_eq!(water.density_lb_ft3, 61.38);
//! assert_eq!(water.viscosity_cp, 0.470);
//!
//! let pg = properties(FluidType::PropyleneGlycol, 30.0, 100.0).unwrap();
//! assert_eq!(pg.specific_gravity, 1.015);
//! ```

pub mod glycol;
pub mod water;

use ndarray::Array1;
use ninterp::interpolator::Extrapolate;
use ninterp::prelude::{Interp1DOwned, Interpolator};
use ninterp::strategy::Linear;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Lowest glycol concentration in the tables (% by volume)
pub const MIN_GLYCOL_CONCENTRATION_PCT: f64 = 0.0;

/// Highest glycol concentration in the tables (% by volume)
pub const MAX_GLYCOL_CONCENTRATION_PCT: f64 = 60.0;

/// Heat-transfer fluid circulating in the loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FluidType {
    /// Plain water
    #[default]
    Water,
    /// Propylene glycol / water solution
    PropyleneGlycol,
    /// Ethylene glycol / water solution
    EthyleneGlycol,
}

impl FluidType {
    /// All fluid types for UI selection
    pub const ALL: [FluidType; 3] = [
        FluidType::Water,
        FluidType::PropyleneGlycol,
        FluidType::EthyleneGlycol,
    ];

    /// True for the glycol solutions, where concentration matters
    pub fn is_glycol(&self) -> bool {
        !matches!(self, FluidType::Water)
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.to_lowercase().replace([' ', '-'], "_").as_str() {
            "water" | "h2o" => Ok(FluidType::Water),
            "propylene_glycol" | "propylene" | "pg" => Ok(FluidType::PropyleneGlycol),
            "ethylene_glycol" | "ethylene" | "eg" => Ok(FluidType::EthyleneGlycol),
            _ => Err(CalcError::invalid_input(
                "fluid_type",
                s,
                "Expected water, propylene_glycol or ethylene_glycol",
            )),
        }
    }

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            FluidType::Water => "Water",
            FluidType::PropyleneGlycol => "Propylene Glycol",
            FluidType::EthyleneGlycol => "Ethylene Glycol",
        }
    }
}

impl std::fmt::Display for FluidType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Thermophysical properties of the loop fluid at one state.
///
/// Always derived from (fluid type, concentration, temperature); never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FluidProperties {
    /// Density (lb/ft³)
    pub density_lb_ft3: f64,
    /// Dynamic viscosity (cP)
    pub viscosity_cp: f64,
    /// Specific gravity relative to water at 39°F
    pub specific_gravity: f64,
    /// Specific heat (Btu/lb·°F)
    pub specific_heat_btu_lb_f: f64,
}

impl FluidProperties {
    /// Blend two property sets; `t = 0` returns `self`, `t = 1` returns `other`
    pub fn lerp(&self, other: &FluidProperties, t: f64) -> FluidProperties {
        let mix = |a: f64, b: f64| a + (b - a) * t;
        FluidProperties {
            density_lb_ft3: mix(self.density_lb_ft3, other.density_lb_ft3),
            viscosity_cp: mix(self.viscosity_cp, other.viscosity_cp),
            specific_gravity: mix(self.specific_gravity, other.specific_gravity),
            specific_heat_btu_lb_f: mix(self.specific_heat_btu_lb_f, other.specific_heat_btu_lb_f),
        }
    }
}

/// One tabulated temperature row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FluidRow {
    /// Fluid temperature (°F)
    pub temp_f: f64,
    /// Properties at that temperature
    pub props: FluidProperties,
}

/// Compact constructor used by the data tables
pub(crate) const fn row(
    temp_f: f64,
    density_lb_ft3: f64,
    viscosity_cp: f64,
    specific_gravity: f64,
    specific_heat_btu_lb_f: f64,
) -> FluidRow {
    FluidRow {
        temp_f,
        props: FluidProperties {
            density_lb_ft3,
            viscosity_cp,
            specific_gravity,
            specific_heat_btu_lb_f,
        },
    }
}

/// A temperature table for one glycol concentration
#[derive(Debug, Clone, Copy)]
pub struct ConcentrationTable {
    /// Glycol concentration (% by volume)
    pub concentration_pct: f64,
    /// Rows in ascending temperature order
    pub rows: &'static [FluidRow],
}

/// Where a concentration falls between the tabulated concentrations
enum Bracket<'a, T> {
    Exact(&'a T),
    Between(&'a T, &'a T, f64),
}

/// Locate `key` in `items` (ascending by `key_of`), clamping at both ends.
///
/// `items` must be non-empty; every table in this module is.
fn bracket<T>(items: &[T], key: f64, key_of: impl Fn(&T) -> f64) -> Bracket<'_, T> {
    let first = &items[0];
    let last = &items[items.len() - 1];
    // NaN also lands on the lower bound
    if !(key > key_of(first)) {
        return Bracket::Exact(first);
    }
    if key >= key_of(last) {
        return Bracket::Exact(last);
    }

    let upper = items.partition_point(|item| key_of(item) < key);
    let hi = &items[upper];
    if key_of(hi) == key {
        return Bracket::Exact(hi);
    }
    let lo = &items[upper - 1];
    let t = (key - key_of(lo)) / (key_of(hi) - key_of(lo));
    Bracket::Between(lo, hi, t)
}

/// Interpolate one property column over temperature, clamped to the table ends
fn interpolate_column(
    temps: &Array1<f64>,
    rows: &[FluidRow],
    temp_f: f64,
    value_of: fn(&FluidProperties) -> f64,
) -> CalcResult<f64> {
    let values: Array1<f64> = rows.iter().map(|r| value_of(&r.props)).collect();
    let interp: Interp1DOwned<f64, Linear> =
        Interp1DOwned::new(temps.clone(), values, Linear, Extrapolate::Clamp)
            .map_err(|e| CalcError::internal(format!("invalid fluid table: {e}")))?;
    interp
        .interpolate(&[temp_f])
        .map_err(|e| CalcError::internal(format!("fluid interpolation at {temp_f}°F failed: {e}")))
}

/// Interpolate a single temperature table.
///
/// # Errors
///
/// [`CalcError::Internal`] if the table is empty or its temperatures are not
/// strictly ascending.
pub fn interpolate_by_temperature(rows: &[FluidRow], temp_f: f64) -> CalcResult<FluidProperties> {
    // NaN lands on the coldest row; out-of-range keys land on an end row
    let (Some(first), Some(last)) = (rows.first(), rows.last()) else {
        return Err(CalcError::internal("empty fluid table"));
    };
    let temp_f = if temp_f.is_nan() {
        first.temp_f
    } else {
        temp_f.max(first.temp_f).min(last.temp_f)
    };
    if let Some(exact) = rows.iter().find(|r| r.temp_f == temp_f) {
        return Ok(exact.props);
    }

    let temps: Array1<f64> = rows.iter().map(|r| r.temp_f).collect();
    Ok(FluidProperties {
        density_lb_ft3: interpolate_column(&temps, rows, temp_f, |p| p.density_lb_ft3)?,
        viscosity_cp: interpolate_column(&temps, rows, temp_f, |p| p.viscosity_cp)?,
        specific_gravity: interpolate_column(&temps, rows, temp_f, |p| p.specific_gravity)?,
        specific_heat_btu_lb_f: interpolate_column(&temps, rows, temp_f, |p| p.specific_heat_btu_lb_f)?,
    })
}

/// Two-stage glycol lookup: temperature within each bracketing
/// concentration table, then linear by concentration.
pub fn interpolate_by_concentration(
    tables: &[ConcentrationTable],
    concentration_pct: f64,
    temp_f: f64,
) -> CalcResult<FluidProperties> {
    let concentration = clamp_concentration(concentration_pct);
    match bracket(tables, concentration, |t| t.concentration_pct) {
        Bracket::Exact(table) => interpolate_by_temperature(table.rows, temp_f),
        Bracket::Between(lo, hi, t) => {
            let lo_props = interpolate_by_temperature(lo.rows, temp_f)?;
            let hi_props = interpolate_by_temperature(hi.rows, temp_f)?;
            Ok(lo_props.lerp(&hi_props, t))
        }
    }
}

/// Clamp a glycol concentration to the tabulated range
pub fn clamp_concentration(concentration_pct: f64) -> f64 {
    if concentration_pct.is_nan() {
        return MIN_GLYCOL_CONCENTRATION_PCT;
    }
    concentration_pct.clamp(MIN_GLYCOL_CONCENTRATION_PCT, MAX_GLYCOL_CONCENTRATION_PCT)
}

/// Fluid properties for a fluid, glycol concentration (%) and temperature (°F).
///
/// Concentration is ignored for water. Out-of-range inputs are clamped.
///
/// # Errors
///
/// [`CalcError::Internal`] only if a built-in table is malformed.
pub fn properties(fluid_type: FluidType, concentration_pct: f64, temp_f: f64) -> CalcResult<FluidProperties> {
    match fluid_type {
        FluidType::Water => interpolate_by_temperature(water::WATER, temp_f),
        FluidType::PropyleneGlycol => {
            interpolate_by_concentration(glycol::PROPYLENE_GLYCOL, concentration_pct, temp_f)
        }
        FluidType::EthyleneGlycol => {
            interpolate_by_concentration(glycol::ETHYLENE_GLYCOL, concentration_pct, temp_f)
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn within(value: f64, a: f64, b: f64) -> bool {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        value >= lo - 1e-9 && value <= hi + 1e-9
    }

    proptest! {
        #[test]
        fn water_stays_between_bracketing_rows(temp in 32.0_f64..220.0) {
            let upper = water::WATER.partition_point(|r| r.temp_f < temp).min(water::WATER.len() - 1);
            let hi = water::WATER[upper];
            let lo = water::WATER[upper.saturating_sub(1)];
            let p = properties(FluidType::Water, 0.0, temp).unwrap();
            prop_assert!(within(p.density_lb_ft3, lo.props.density_lb_ft3, hi.props.density_lb_ft3));
            prop_assert!(within(p.viscosity_cp, lo.props.viscosity_cp, hi.props.viscosity_cp));
        }

        #[test]
        fn glycol_lookup_is_finite_for_any_input(
            conc in -100.0_f64..200.0,
            temp in -200.0_f64..500.0,
        ) {
            for fluid in FluidType::ALL {
                let p = properties(fluid, conc, temp).unwrap();
                prop_assert!(p.density_lb_ft3.is_finite() && p.density_lb_ft3 > 0.0);
                prop_assert!(p.viscosity_cp.is_finite() && p.viscosity_cp > 0.0);
                prop_assert!(p.specific_gravity.is_finite() && p.specific_gravity > 0.0);
            }
        }
    }
}
