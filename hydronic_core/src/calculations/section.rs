//! # Section Hydraulics
//!
//! Solves one pipe section on its own: velocity, Reynolds number, friction
//! factor, straight-pipe friction, and the losses through its fittings.
//!
//! ## Method
//!
//! ```text
//! V  = Q / (448.831 × A)                         ft/s   (Q in GPM, A in ft²)
//! Re = ρ V D / μ                                         (μ: cP → lb/ft·s)
//! f  = 64 / Re                                           Re < 2300
//! 1/√f = -2 log10(ε/3.7D + 2.51 / (Re √f))               Colebrook-White otherwise
//! hf = f (L/D) V² / 2g                           ft
//! ```
//!
//! Colebrook-White is solved by fixed-point iteration on 1/√f, seeded with the
//! Swamee-Jain explicit approximation. It usually settles in 3-4 passes.
//!
//! Fittings are summed per instance (unit loss × quantity):
//! - L/D: Darcy-Weisbach over `L/D × ID / 12` ft of equivalent pipe
//! - Cv: `(Q/Cv)² × SG` psi × 2.31 ft/psi
//! - Manual: the entered drop, or zero with a warning when none was entered
//!
//! Zero or negative flow returns all-zero hydraulics (no division by zero, no
//! velocity warning). Volume is still reported since it is pure geometry.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use uuid::Uuid;

use crate::errors::{ensure_finite, CalcResult};
use crate::fittings::{
    cv_head_loss_ft, equivalent_length_ft, find_fitting, FittingStatus, MethodKind,
    ResistanceMethod, ResolvedCv,
};
use crate::fluids::FluidProperties;
use crate::model::{FittingInput, PipeSection};
use crate::pipes::{PipeDimensions, PipeMaterial};
use crate::units::{GPM_PER_CFS, GRAVITY_FT_S2, LB_PER_FT_S_PER_CP};
use crate::warnings::{check_fitting, check_velocity, Warning};

/// Reynolds number below which flow is treated as laminar
pub const LAMINAR_REYNOLDS_LIMIT: f64 = 2300.0;

const COLEBROOK_MAX_ITERATIONS: usize = 50;
const COLEBROOK_TOLERANCE: f64 = 1e-10;

/// Flow regime of a section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowRegime {
    NoFlow,
    Laminar,
    Turbulent,
}

/// Loss through one fitting line item (all instances of it)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittingLoss {
    pub fitting_id: Uuid,
    pub fitting_type: String,
    pub method: MethodKind,
    pub quantity: u32,
    /// Loss through a single instance (ft)
    pub unit_loss_ft: f64,
    /// `unit_loss_ft × quantity` (ft)
    pub total_loss_ft: f64,
    pub status: FittingStatus,
}

/// Results for one pipe section.
///
/// ## JSON Example
///
/// ```json
/// {
///   "section_id": "…",
///   "label": "Main supply",
///   "flow_gpm": 40.0,
///   "velocity_fps": 3.82,
///   "reynolds": 168000.0,
///   "flow_regime": "turbulent",
///   "friction_factor": 0.0215,
///   "pipe_friction_ft": 2.43,
///   "fittings_loss_ft": 3.10,
///   "total_loss_ft": 5.53,
///   "volume_gal": 17.4
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionCalculation {
    pub section_id: Uuid,
    pub label: String,
    pub sort_order: i32,

    // === Inputs echoed for exporters ===
    pub flow_gpm: f64,
    pub material: PipeMaterial,
    pub nominal_size: String,
    pub length_ft: f64,
    pub inner_diameter_in: f64,

    // === Hydraulics ===
    /// Mean velocity (ft/s)
    pub velocity_fps: f64,
    /// Reynolds number
    pub reynolds: f64,
    pub flow_regime: FlowRegime,
    /// ε/D
    pub relative_roughness: f64,
    /// Darcy friction factor
    pub friction_factor: f64,

    // === Losses ===
    /// Straight-pipe friction loss (ft)
    pub pipe_friction_ft: f64,
    /// Total equivalent length of L/D fittings (ft)
    pub equivalent_length_ft: f64,
    /// Sum of all fitting, valve and device losses (ft)
    pub fittings_loss_ft: f64,
    /// `pipe_friction_ft + fittings_loss_ft` (ft)
    pub total_loss_ft: f64,
    /// Pipe friction per 100 ft of pipe
    pub friction_rate_ft_per_100ft: f64,

    /// Fluid volume in the section (gal)
    pub volume_gal: f64,

    pub fittings: Vec<FittingLoss>,
    pub warnings: Vec<Warning>,
}

/// Mean velocity (ft/s) from flow (GPM) and flow area (ft²)
pub fn velocity_fps(flow_gpm: f64, area_ft2: f64) -> f64 {
    flow_gpm / (GPM_PER_CFS * area_ft2)
}

/// Reynolds number from density (lb/ft³), velocity (ft/s), diameter (ft)
/// and dynamic viscosity (cP)
pub fn reynolds_number(density_lb_ft3: f64, velocity_fps: f64, diameter_ft: f64, viscosity_cp: f64) -> f64 {
    density_lb_ft3 * velocity_fps * diameter_ft / (viscosity_cp * LB_PER_FT_S_PER_CP)
}

/// Swamee-Jain explicit approximation of Colebrook-White
pub fn swamee_jain(reynolds: f64, relative_roughness: f64) -> f64 {
    let a = relative_roughness / 3.7;
    let b = 5.74 / reynolds.powf(0.9);
    0.25 / (a + b).log10().powi(2)
}

/// Colebrook-White friction factor by fixed-point iteration on 1/√f
pub fn colebrook_white(reynolds: f64, relative_roughness: f64) -> f64 {
    let a = relative_roughness / 3.7;
    let b = 2.51 / reynolds;
    let mut x = 1.0 / swamee_jain(reynolds, relative_roughness).sqrt();

    for iteration in 0..COLEBROOK_MAX_ITERATIONS {
        let next = -2.0 * (a + b * x).log10();
        if (next - x).abs() < COLEBROOK_TOLERANCE {
            trace!(iteration, reynolds, "colebrook converged");
            return 1.0 / (next * next);
        }
        x = next;
    }
    1.0 / (x * x)
}

/// Darcy friction factor for any Reynolds number; zero when there is no flow
pub fn friction_factor(reynolds: f64, relative_roughness: f64) -> f64 {
    if reynolds <= 0.0 {
        0.0
    } else if reynolds < LAMINAR_REYNOLDS_LIMIT {
        64.0 / reynolds
    } else {
        colebrook_white(reynolds, relative_roughness)
    }
}

/// Darcy-Weisbach head loss (ft): `f × (L/D) × V² / 2g`
pub fn darcy_head_loss_ft(friction_factor: f64, length_ft: f64, diameter_ft: f64, velocity_fps: f64) -> f64 {
    friction_factor * (length_ft / diameter_ft) * velocity_fps.powi(2) / (2.0 * GRAVITY_FT_S2)
}

/// Hydraulic state shared by the fitting losses of one section
struct FlowState {
    flowing: bool,
    flow_gpm: f64,
    velocity_fps: f64,
    friction_factor: f64,
    diameter_ft: f64,
    specific_gravity: f64,
}

/// Loss through one fitting line item plus any warning it raises
fn fitting_loss(
    section: &PipeSection,
    fitting: &FittingInput,
    dims: &PipeDimensions,
    state: &FlowState,
) -> CalcResult<(FittingLoss, f64, Option<Warning>)> {
    let spec = find_fitting(&fitting.fitting_type)?;
    let mut equivalent_length = 0.0;

    let (unit_loss_ft, status) = match spec.method {
        ResistanceMethod::LengthRatio { ratio } => {
            equivalent_length = equivalent_length_ft(ratio, dims.inner_diameter_in);
            let loss = darcy_head_loss_ft(
                state.friction_factor,
                equivalent_length,
                state.diameter_ft,
                state.velocity_fps,
            );
            (loss, FittingStatus::Verified)
        }
        ResistanceMethod::FlowCoefficient(rating) => {
            let resolved = ResolvedCv::resolve(&rating, fitting.cv, &section.nominal_size);
            let loss = match resolved.value() {
                Some(cv) if state.flowing => cv_head_loss_ft(state.flow_gpm, cv, state.specific_gravity),
                _ => 0.0,
            };
            (loss, resolved.status())
        }
        ResistanceMethod::ManualDrop => match fitting.manual_drop_ft {
            Some(drop_ft) if state.flowing => (drop_ft, FittingStatus::Verified),
            Some(_) => (0.0, FittingStatus::Verified),
            None => (0.0, FittingStatus::MissingValue),
        },
    };

    let quantity = f64::from(fitting.quantity);
    let warning = check_fitting(
        section.id,
        fitting.id,
        spec.name,
        status,
        spec.method.kind() == MethodKind::ManualDrop,
    );

    let loss = FittingLoss {
        fitting_id: fitting.id,
        fitting_type: fitting.fitting_type.clone(),
        method: spec.method.kind(),
        quantity: fitting.quantity,
        unit_loss_ft: ensure_finite("fitting loss", unit_loss_ft)?,
        total_loss_ft: unit_loss_ft * quantity,
        status,
    };
    Ok((loss, equivalent_length * quantity, warning))
}

/// Solve one section for the given fluid and pipe geometry.
///
/// # Arguments
///
/// * `section` - Pipe run with its fittings
/// * `fluid` - Fluid properties at the system temperature
/// * `dims` - Geometry of the section's (material, size)
/// * `max_velocity_fps` - Velocity limit for the loop type
///
/// # Errors
///
/// [`crate::errors::CalcError::FittingNotFound`] for an unknown fitting type,
/// [`crate::errors::CalcError::NonFinite`] if any result is NaN or infinite.
///
/// # Example
///
/// ```rust
/// use hydronic_core::calculations::section::solve_section;
/// use hydronic_core::fluids::{properties, FluidType};
/// use hydronic_core::model::{FittingInput, PipeSection};
/// use hydronic_core::pipes::{dimensions, PipeMaterial};
/// use uuid::Uuid;
///
/// let section = PipeSection::new(Uuid::new_v4(), "S-1", 20.0, PipeMaterial::SteelSch40, "1-1/2", 100.0)
///     .with_fitting(FittingInput::new("elbow_90_standard", 4));
/// let fluid = properties(FluidType::Water, 0.0, 180.0).unwrap();
/// let dims = dimensions(section.material, &section.nominal_size).unwrap();
///
/// let calc = solve_section(&section, &fluid, &dims, 8.0).unwrap();
/// assert!(calc.velocity_fps > 3.0 && calc.velocity_fps < 3.3);
/// assert!(calc.total_loss_ft > calc.pipe_friction_ft);
/// ```
pub fn solve_section(
    section: &PipeSection,
    fluid: &FluidProperties,
    dims: &PipeDimensions,
    max_velocity_fps: f64,
) -> CalcResult<SectionCalculation> {
    let diameter_ft = dims.inner_diameter_ft();
    let flowing = section.flow_gpm > 0.0;

    let (velocity, reynolds, regime) = if flowing {
        let v = velocity_fps(section.flow_gpm, dims.area_ft2());
        let re = reynolds_number(fluid.density_lb_ft3, v, diameter_ft, fluid.viscosity_cp);
        let regime = if re < LAMINAR_REYNOLDS_LIMIT {
            FlowRegime::Laminar
        } else {
            FlowRegime::Turbulent
        };
        (v, re, regime)
    } else {
        (0.0, 0.0, FlowRegime::NoFlow)
    };

    let relative_roughness = dims.relative_roughness();
    let f = ensure_finite("friction factor", friction_factor(reynolds, relative_roughness))?;
    let pipe_friction_ft = ensure_finite(
        "pipe friction",
        darcy_head_loss_ft(f, section.length_ft, diameter_ft, velocity),
    )?;

    let state = FlowState {
        flowing,
        flow_gpm: section.flow_gpm,
        velocity_fps: velocity,
        friction_factor: f,
        diameter_ft,
        specific_gravity: fluid.specific_gravity,
    };

    let mut warnings: Vec<Warning> =
        check_velocity(section.id, &section.label, velocity, max_velocity_fps)
            .into_iter()
            .collect();
    let mut fittings = Vec::with_capacity(section.fittings.len());
    let mut equivalent_length = 0.0;
    let mut fittings_loss_ft = 0.0;

    for fitting in &section.fittings {
        let (loss, eq_len, warning) = fitting_loss(section, fitting, dims, &state)?;
        fittings_loss_ft += loss.total_loss_ft;
        equivalent_length += eq_len;
        warnings.extend(warning);
        fittings.push(loss);
    }
    let fittings_loss_ft = ensure_finite("fittings loss", fittings_loss_ft)?;

    let friction_rate = if section.length_ft > 0.0 {
        pipe_friction_ft / section.length_ft * 100.0
    } else {
        0.0
    };
    let total_loss_ft = pipe_friction_ft + fittings_loss_ft;

    debug!(
        section = %section.label,
        flow_gpm = section.flow_gpm,
        velocity_fps = velocity,
        reynolds,
        friction_factor = f,
        pipe_friction_ft,
        fittings_loss_ft,
        "solved section"
    );

    Ok(SectionCalculation {
        section_id: section.id,
        label: section.label.clone(),
        sort_order: section.sort_order,
        flow_gpm: section.flow_gpm,
        material: section.material,
        nominal_size: section.nominal_size.clone(),
        length_ft: section.length_ft,
        inner_diameter_in: dims.inner_diameter_in,
        velocity_fps: ensure_finite("velocity", velocity)?,
        reynolds: ensure_finite("reynolds number", reynolds)?,
        flow_regime: regime,
        relative_roughness,
        friction_factor: f,
        pipe_friction_ft,
        equivalent_length_ft: equivalent_length,
        fittings_loss_ft,
        total_loss_ft,
        friction_rate_ft_per_100ft: friction_rate,
        volume_gal: section.length_ft * dims.volume_gal_per_ft,
        fittings,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fluids::{properties, FluidType};
    use crate::model::CvValue;
    use crate::pipes::dimensions;
    use crate::warnings::WarningCode;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn water_180() -> FluidProperties {
        properties(FluidType::Water, 0.0, 180.0).unwrap()
    }

    fn section(flow_gpm: f64, size: &str, length_ft: f64) -> PipeSection {
        PipeSection::new(Uuid::new_v4(), "S-1", flow_gpm, PipeMaterial::SteelSch40, size, length_ft)
    }

    fn solve(section: &PipeSection) -> SectionCalculation {
        let dims = dimensions(section.material, &section.nominal_size).unwrap();
        solve_section(section, &water_180(), &dims, 8.0).unwrap()
    }

    #[test]
    fn test_velocity_from_flow() {
        // 1 ft³/s through 1 ft² is 1 ft/s
        assert_relative_eq!(velocity_fps(448.831, 1.0), 1.0, epsilon = 1e-12);
        let dims = dimensions(PipeMaterial::SteelSch40, "2").unwrap();
        // 40 GPM in 2" Sch 40 is about 3.82 ft/s
        assert_relative_eq!(velocity_fps(40.0, dims.area_ft2()), 3.824, epsilon = 1e-3);
    }

    #[test]
    fn test_reynolds_number() {
        // Water at 60°F, 1 ft/s, 1 ft diameter: Re ≈ 62.37 / (1.12 × 6.72e-4) ≈ 82,900
        let re = reynolds_number(62.37, 1.0, 1.0, 1.12);
        assert_relative_eq!(re, 82_872.0, max_relative = 1e-3);
    }

    #[test]
    fn test_laminar_friction_factor() {
        assert_eq!(friction_factor(1000.0, 0.001), 0.064);
        assert_eq!(friction_factor(0.0, 0.001), 0.0);
    }

    #[test]
    fn test_colebrook_reference_points() {
        // Smooth pipe, Re = 1e5: f ≈ 0.0180 (Moody)
        assert_relative_eq!(colebrook_white(1.0e5, 0.0), 0.01799, max_relative = 5e-3);
        // ε/D = 1e-3, Re = 1e6: f ≈ 0.0199
        assert_relative_eq!(colebrook_white(1.0e6, 1.0e-3), 0.01994, max_relative = 5e-3);
    }

    #[test]
    fn test_colebrook_satisfies_equation() {
        let (re, rr) = (2.5e5, 2.0e-4);
        let f = colebrook_white(re, rr);
        let lhs = 1.0 / f.sqrt();
        let rhs = -2.0 * (rr / 3.7 + 2.51 / (re * f.sqrt())).log10();
        assert_abs_diff_eq!(lhs, rhs, epsilon = 1e-8);
    }

    #[test]
    fn test_zero_flow_is_all_zero() {
        let s = section(0.0, "1", 50.0)
            .with_fitting(FittingInput::new("elbow_90_standard", 2))
            .with_fitting(FittingInput::new("strainer_y", 1))
            .with_fitting(FittingInput::new("coil", 1).with_manual_drop(6.0));
        let calc = solve(&s);

        assert_eq!(calc.velocity_fps, 0.0);
        assert_eq!(calc.reynolds, 0.0);
        assert_eq!(calc.friction_factor, 0.0);
        assert_eq!(calc.pipe_friction_ft, 0.0);
        assert_eq!(calc.fittings_loss_ft, 0.0);
        assert_eq!(calc.total_loss_ft, 0.0);
        assert_eq!(calc.flow_regime, FlowRegime::NoFlow);
        assert!(calc.warnings.iter().all(|w| w.code != WarningCode::HighVelocity));
        // Geometry still counts
        assert!(calc.volume_gal > 0.0);
    }

    #[test]
    fn test_negative_flow_is_degenerate() {
        let calc = solve(&section(-15.0, "1", 50.0));
        assert_eq!(calc.velocity_fps, 0.0);
        assert_eq!(calc.total_loss_ft, 0.0);
        assert!(calc.warnings.is_empty());
    }

    #[test]
    fn test_length_ratio_fitting_loss() {
        let plain = solve(&section(30.0, "1", 0.0));
        let with_elbow = solve(&section(30.0, "1", 0.0).with_fitting(FittingInput::new("elbow_90_standard", 1)));

        assert_relative_eq!(with_elbow.equivalent_length_ft, 2.6225, epsilon = 1e-9);
        // An elbow loses the same as 2.6225 ft of 1" pipe
        let expected = darcy_head_loss_ft(
            with_elbow.friction_factor,
            2.6225,
            1.049 / 12.0,
            with_elbow.velocity_fps,
        );
        assert_relative_eq!(with_elbow.fittings_loss_ft, expected, epsilon = 1e-9);
        assert_eq!(plain.fittings_loss_ft, 0.0);
    }

    #[test]
    fn test_quantity_multiplies_loss() {
        let one = solve(&section(30.0, "1", 10.0).with_fitting(FittingInput::new("tee_branch", 1)));
        let three = solve(&section(30.0, "1", 10.0).with_fitting(FittingInput::new("tee_branch", 3)));
        assert_relative_eq!(three.fittings_loss_ft, 3.0 * one.fittings_loss_ft, epsilon = 1e-12);
        assert_eq!(three.fittings[0].unit_loss_ft, one.fittings[0].unit_loss_ft);
    }

    #[test]
    fn test_cv_fitting_loss() {
        let s = section(100.0, "3", 0.0).with_fitting(FittingInput::new("control_valve", 1).with_cv(100.0));
        let dims = dimensions(s.material, &s.nominal_size).unwrap();
        let mut fluid = water_180();
        fluid.specific_gravity = 1.0;
        let calc = solve_section(&s, &fluid, &dims, 8.0).unwrap();
        assert_eq!(calc.fittings_loss_ft, 2.31);
        assert_eq!(calc.fittings[0].status, FittingStatus::Verified);
        assert!(calc.warnings.is_empty());
    }

    #[test]
    fn test_default_cv_is_flagged() {
        let calc = solve(&section(40.0, "2", 20.0).with_fitting(FittingInput::new("strainer_y", 1)));
        assert_eq!(calc.fittings[0].status, FittingStatus::DefaultCv);
        assert!(calc.fittings_loss_ft > 0.0);
        assert!(calc.warnings.iter().any(|w| w.code == WarningCode::DefaultCv));
    }

    #[test]
    fn test_prefilled_cv_stays_unverified() {
        let mut valve = FittingInput::new("balancing_valve", 1);
        valve.cv = Some(CvValue { value: 34.0, source: crate::model::ValueSource::CatalogDefault });
        let calc = solve(&section(40.0, "2", 20.0).with_fitting(valve));
        assert_eq!(calc.fittings[0].status, FittingStatus::DefaultCv);
    }

    #[test]
    fn test_missing_values_count_as_zero() {
        let s = section(40.0, "2", 20.0)
            .with_fitting(FittingInput::new("control_valve", 1))
            .with_fitting(FittingInput::new("coil", 1))
            .with_fitting(FittingInput::new("balancing_valve", 1));
        let calc = solve(&s);

        // Balancing valve has a 2" Cv, the others contribute nothing
        let balancing = cv_head_loss_ft(40.0, 34.0, water_180().specific_gravity);
        assert_relative_eq!(calc.fittings_loss_ft, balancing, epsilon = 1e-12);

        let codes: Vec<WarningCode> = calc.warnings.iter().map(|w| w.code).collect();
        assert!(codes.contains(&WarningCode::MissingCv));
        assert!(codes.contains(&WarningCode::MissingManualDrop));
    }

    #[test]
    fn test_manual_drop_added_directly() {
        let calc = solve(&section(40.0, "2", 0.0).with_fitting(FittingInput::new("heat_exchanger", 2).with_manual_drop(7.5)));
        assert_eq!(calc.fittings_loss_ft, 15.0);
    }

    #[test]
    fn test_high_velocity_warning() {
        // 60 GPM in 1" Sch 40 is about 22 ft/s
        let calc = solve(&section(60.0, "1", 10.0));
        assert!(calc.velocity_fps > 8.0);
        assert_eq!(calc.warnings[0].code, WarningCode::HighVelocity);
    }

    #[test]
    fn test_unknown_fitting_is_an_error() {
        let s = section(10.0, "1", 10.0).with_fitting(FittingInput::new("mystery_box", 1));
        let dims = dimensions(s.material, &s.nominal_size).unwrap();
        let err = solve_section(&s, &water_180(), &dims, 8.0).unwrap_err();
        assert_eq!(err.error_code(), "FITTING_NOT_FOUND");
    }

    #[test]
    fn test_laminar_section() {
        // Very low flow of cold 60% glycol in a large pipe stays laminar
        let s = section(2.0, "4", 100.0);
        let dims = dimensions(s.material, &s.nominal_size).unwrap();
        let glycol = properties(FluidType::PropyleneGlycol, 60.0, 20.0).unwrap();
        let calc = solve_section(&s, &glycol, &dims, 8.0).unwrap();
        assert_eq!(calc.flow_regime, FlowRegime::Laminar);
        assert_relative_eq!(calc.friction_factor, 64.0 / calc.reynolds, epsilon = 1e-12);
    }

    #[test]
    fn test_volume() {
        let calc = solve(&section(10.0, "1", 100.0));
        let dims = dimensions(PipeMaterial::SteelSch40, "1").unwrap();
        assert_relative_eq!(calc.volume_gal, 100.0 * dims.volume_gal_per_ft, epsilon = 1e-12);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn swamee_jain_tracks_colebrook(
            reynolds in 4_000.0_f64..1.0e7,
            relative_roughness in 1.0e-6_f64..1.0e-2,
        ) {
            let exact = colebrook_white(reynolds, relative_roughness);
            let approx = swamee_jain(reynolds, relative_roughness);
            prop_assert!(((approx - exact) / exact).abs() < 0.03);
        }

        #[test]
        fn friction_factor_is_positive_and_finite(
            reynolds in 1.0_f64..1.0e8,
            relative_roughness in 0.0_f64..0.05,
        ) {
            let f = friction_factor(reynolds, relative_roughness);
            prop_assert!(f.is_finite() && f > 0.0);
        }
    }
}
