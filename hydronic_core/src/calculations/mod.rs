//! # Hydraulic Calculations
//!
//! The engine proper. A calculation follows the same pattern as every other
//! module in this crate:
//!
//! - Inputs are plain serde types ([`HydronicSystem`], [`PipeSection`])
//! - Results are plain serde types ([`SystemResult`], [`SectionCalculation`])
//! - `calculate(...) -> Result<SystemResult, CalcError>` is a pure function
//!
//! ## Pipeline
//!
//! ```text
//! HydronicSystem ──► fluid properties (type, concentration, temperature)
//!        │
//! PipeSection[] ──► sort by sort_order ──► pipe geometry ──► solve_section
//!                                                               │
//!                                             aggregate ◄───────┘
//!                                                │
//!                                           SystemResult (+ warnings)
//! ```
//!
//! The calculation is a pure function of its inputs: running it twice on the
//! same data gives identical results, and nothing is mutated.
//!
//! ## Available Modules
//!
//! - [`section`] - per-section velocity, friction factor and losses
//! - [`system`] - head totals, safety margin, pump BHP

pub mod section;
pub mod system;

use tracing::debug;

use crate::errors::{CalcError, CalcResult};
use crate::fluids;
use crate::model::{HydronicSystem, PipeSection};
use crate::pipes;
use crate::settings::DesignSettings;

// Re-export commonly used types
pub use section::{solve_section, FittingLoss, FlowRegime, SectionCalculation};
pub use system::{aggregate, calculate_pump_bhp, head_to_psi, SystemResult};

/// Calculate a system with the default [`DesignSettings`].
///
/// # Example
///
/// ```rust
/// use hydronic_core::calculations::calculate;
/// use hydronic_core::model::{FittingInput, HydronicSystem, PipeSection};
/// use hydronic_core::pipes::PipeMaterial;
///
/// let mut system = HydronicSystem::new("HHW-1", 180.0);
/// system.safety_factor = 0.1;
///
/// let sections = vec![
///     PipeSection::new(system.id, "Supply", 40.0, PipeMaterial::SteelSch40, "2", 150.0)
///         .with_fitting(FittingInput::new("elbow_90_standard", 6))
///         .with_fitting(FittingInput::new("gate_valve", 2)),
///     PipeSection::new(system.id, "Coil", 40.0, PipeMaterial::SteelSch40, "2", 10.0)
///         .with_fitting(FittingInput::new("coil", 1).with_manual_drop(8.0))
///         .with_sort_order(1),
/// ];
///
/// let result = calculate(&system, &sections).unwrap();
/// assert_eq!(result.sections.len(), 2);
/// assert!(result.total_pump_head_ft > result.calculated_head_ft);
/// assert!(result.pump_bhp > 0.0);
/// ```
pub fn calculate(system: &HydronicSystem, sections: &[PipeSection]) -> CalcResult<SystemResult> {
    calculate_with_settings(system, sections, &DesignSettings::default())
}

/// Calculate a system against explicit design settings.
///
/// # Errors
///
/// - [`CalcError::InvalidInput`] for invalid settings, a non-finite input, a
///   negative length or static head, or a section that belongs to another system
/// - [`CalcError::PipeSizeNotFound`] for a size not catalogued for its material
/// - [`CalcError::FittingNotFound`] for an unknown fitting type
/// - [`CalcError::NonFinite`] if a result comes out NaN or infinite
/// - [`CalcError::Internal`] if a built-in fluid table cannot be interpolated
pub fn calculate_with_settings(
    system: &HydronicSystem,
    sections: &[PipeSection],
    settings: &DesignSettings,
) -> CalcResult<SystemResult> {
    settings.validate()?;
    system.validate()?;

    let fluid = fluids::properties(
        system.fluid_type,
        system.effective_concentration_pct(),
        system.fluid_temp_f,
    )?;
    debug!(
        system = %system.label,
        fluid = %system.fluid_type,
        temp_f = system.fluid_temp_f,
        density = fluid.density_lb_ft3,
        viscosity_cp = fluid.viscosity_cp,
        "resolved fluid properties"
    );

    // Stable sort keeps input order for equal sort_order values
    let mut ordered: Vec<&PipeSection> = sections.iter().collect();
    ordered.sort_by_key(|s| s.sort_order);

    let max_velocity = settings.max_velocity_fps(system.loop_type);
    let solved = ordered
        .into_iter()
        .map(|section| {
            if section.system_id != system.id {
                return Err(CalcError::invalid_input(
                    "system_id",
                    section.system_id.to_string(),
                    format!("Section '{}' does not belong to system '{}'", section.label, system.label),
                ));
            }
            section.validate()?;
            let dims = pipes::dimensions(section.material, &section.nominal_size)?;
            section::solve_section(section, &fluid, &dims, max_velocity)
        })
        .collect::<CalcResult<Vec<_>>>()?;

    system::aggregate(system, fluid, solved, settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fluids::FluidType;
    use crate::model::{FittingInput, LoopType};
    use crate::pipes::PipeMaterial;
    use crate::warnings::WarningCode;
    use approx::assert_relative_eq;
    use uuid::Uuid;

    fn system() -> HydronicSystem {
        HydronicSystem::new("HHW-1", 180.0)
    }

    #[test]
    fn test_results_follow_sort_order() {
        let sys = system();
        let sections = vec![
            PipeSection::new(sys.id, "C", 10.0, PipeMaterial::CopperTypeL, "1", 20.0).with_sort_order(2),
            PipeSection::new(sys.id, "A", 10.0, PipeMaterial::CopperTypeL, "1", 20.0).with_sort_order(0),
            PipeSection::new(sys.id, "B1", 10.0, PipeMaterial::CopperTypeL, "1", 20.0).with_sort_order(1),
            PipeSection::new(sys.id, "B2", 10.0, PipeMaterial::CopperTypeL, "1", 20.0).with_sort_order(1),
        ];
        let result = calculate(&sys, &sections).unwrap();
        let labels: Vec<&str> = result.sections.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, ["A", "B1", "B2", "C"]);
    }

    #[test]
    fn test_foreign_section_rejected() {
        let sys = system();
        let stray = PipeSection::new(Uuid::new_v4(), "Stray", 10.0, PipeMaterial::SteelSch40, "1", 10.0);
        let err = calculate(&sys, &[stray]).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_unknown_size_rejected() {
        let sys = system();
        let bad = PipeSection::new(sys.id, "S", 10.0, PipeMaterial::SteelSch40, "1.5", 10.0);
        let err = calculate(&sys, &[bad]).unwrap_err();
        assert_eq!(err.error_code(), "PIPE_SIZE_NOT_FOUND");
    }

    #[test]
    fn test_negative_static_head_rejected() {
        let mut sys = system();
        sys.loop_type = LoopType::Open;
        sys.static_head_ft = -50.0;
        let section = PipeSection::new(sys.id, "S", 50.0, PipeMaterial::SteelSch40, "2", 10.0);
        let err = calculate(&sys, &[section]).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let sys = system();
        let settings = DesignSettings {
            pump_efficiency: 1.5,
            ..DesignSettings::default()
        };
        assert!(calculate_with_settings(&sys, &[], &settings).is_err());
    }

    #[test]
    fn test_open_loop_velocity_limit() {
        let mut sys = system();
        // ~7 ft/s in 2" steel: fine on a closed loop, high on an open one
        let section = PipeSection::new(sys.id, "S", 73.0, PipeMaterial::SteelSch40, "2", 10.0);
        let closed = calculate(&sys, std::slice::from_ref(&section)).unwrap();
        assert!(closed.warnings.iter().all(|w| w.code != WarningCode::HighVelocity));

        sys.loop_type = LoopType::Open;
        let open = calculate(&sys, &[section]).unwrap();
        assert!(open.warnings.iter().any(|w| w.code == WarningCode::HighVelocity));
    }

    #[test]
    fn test_glycol_raises_losses() {
        let water = system();
        let mut glycol = water.clone();
        glycol.fluid_type = FluidType::PropyleneGlycol;
        glycol.glycol_concentration_pct = 40.0;

        let section = PipeSection::new(water.id, "S", 30.0, PipeMaterial::SteelSch40, "1-1/2", 100.0)
            .with_fitting(FittingInput::new("strainer_y", 1));
        let w = calculate(&water, std::slice::from_ref(&section)).unwrap();
        let g = calculate(&glycol, &[section]).unwrap();

        assert!(g.sections[0].reynolds < w.sections[0].reynolds);
        assert!(g.total_pipe_friction_ft > w.total_pipe_friction_ft);
        // Cv drop scales with specific gravity
        assert!(g.total_fittings_loss_ft > w.total_fittings_loss_ft);
        assert_eq!(g.glycol_concentration_pct, 40.0);
    }

    #[test]
    fn test_totals_match_sections() {
        let sys = system();
        let sections = vec![
            PipeSection::new(sys.id, "A", 50.0, PipeMaterial::SteelSch40, "2", 120.0)
                .with_fitting(FittingInput::new("tee_branch", 2)),
            PipeSection::new(sys.id, "B", 20.0, PipeMaterial::Pex, "1", 60.0)
                .with_fitting(FittingInput::new("zone_valve", 1)),
        ];
        let r = calculate(&sys, &sections).unwrap();
        let pipe: f64 = r.sections.iter().map(|s| s.pipe_friction_ft).sum();
        let fittings: f64 = r.sections.iter().map(|s| s.fittings_loss_ft).sum();
        assert_relative_eq!(r.calculated_head_ft, pipe + fittings, epsilon = 1e-12);
        assert_eq!(r.max_flow_gpm, 50.0);
    }

    #[test]
    fn test_calculation_is_idempotent() {
        let sys = system();
        let sections = vec![PipeSection::new(sys.id, "A", 35.0, PipeMaterial::CopperTypeM, "1-1/2", 80.0)
            .with_fitting(FittingInput::new("balancing_valve", 1))];
        let first = serde_json::to_string(&calculate(&sys, &sections).unwrap()).unwrap();
        let second = serde_json::to_string(&calculate(&sys, &sections).unwrap()).unwrap();
        assert_eq!(first, second);
    }
}
