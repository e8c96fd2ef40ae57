//! # System Aggregation
//!
//! Rolls solved sections up into pump selection values.
//!
//! ```text
//! calculated head = Σ pipe friction + Σ fitting losses + static head (open loops)
//! safety margin   = calculated head × safety factor
//! pump head       = calculated head + safety margin                     ft
//! pump head       = pump head × SG / 2.31                               psi
//! BHP             = GPM × H × SG / (3960 × η)
//! ```
//!
//! Pump flow is the largest section flow, which is the flow through the pump
//! for a simple series loop.

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::calculations::section::SectionCalculation;
use crate::errors::{ensure_finite, CalcResult};
use crate::fluids::{FluidProperties, FluidType};
use crate::model::{HydronicSystem, LoopType};
use crate::settings::DesignSettings;
use crate::units::{FeetOfHead, GPM_FT_PER_HP};
use crate::warnings::{check_system, Warning};

/// Pump sizing result for one hydronic system.
///
/// ## JSON Example
///
/// ```json
/// {
///   "system_id": "…",
///   "label": "HHW-1",
///   "total_pipe_friction_ft": 12.4,
///   "total_fittings_loss_ft": 18.9,
///   "static_head_ft": 0.0,
///   "calculated_head_ft": 31.3,
///   "safety_factor": 0.1,
///   "safety_factor_ft": 3.13,
///   "total_pump_head_ft": 34.43,
///   "max_flow_gpm": 120.0,
///   "pump_bhp": 1.47
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemResult {
    pub system_id: Uuid,
    pub label: String,
    pub loop_type: LoopType,

    // === Fluid ===
    pub fluid_type: FluidType,
    /// Concentration actually used for properties (%)
    pub glycol_concentration_pct: f64,
    pub fluid_temp_f: f64,
    pub fluid: FluidProperties,

    // === Head ===
    /// Σ straight-pipe friction (ft)
    pub total_pipe_friction_ft: f64,
    /// Σ fitting, valve and device losses (ft)
    pub total_fittings_loss_ft: f64,
    /// Static head counted toward the pump (ft); zero on closed loops
    pub static_head_ft: f64,
    /// Friction + fittings + static (ft)
    pub calculated_head_ft: f64,
    /// Effective safety factor (0.0 - 0.5)
    pub safety_factor: f64,
    /// Margin added by the safety factor (ft)
    pub safety_factor_ft: f64,
    /// Design pump head (ft)
    pub total_pump_head_ft: f64,
    /// Design pump head (psi)
    pub pump_head_psi: f64,

    // === Flow and volume ===
    /// Largest section flow (GPM)
    pub max_flow_gpm: f64,
    /// Fluid volume in all sections (gal)
    pub total_system_volume_gal: f64,
    /// Developed pipe length (ft)
    pub total_pipe_length_ft: f64,
    /// Pipe friction per 100 ft of pipe carrying flow
    pub friction_rate_ft_per_100ft: f64,

    // === Pump ===
    /// Efficiency assumed for BHP
    pub pump_efficiency: f64,
    /// Estimated brake horsepower
    pub pump_bhp: f64,

    pub sections: Vec<SectionCalculation>,
    /// Section warnings in section order, then system warnings
    pub warnings: Vec<Warning>,
}

/// Convert feet of head of a fluid to psi
pub fn head_to_psi(head_ft: f64, specific_gravity: f64) -> f64 {
    FeetOfHead(head_ft).to_psi(specific_gravity).0
}

/// Brake horsepower: `GPM × H × SG / (3960 × η)`
///
/// # Example
///
/// ```rust
/// use hydronic_core::calculations::system::calculate_pump_bhp;
///
/// // 396 GPM against 100 ft of water at 100 % efficiency is 10 hp
/// assert_eq!(calculate_pump_bhp(396.0, 100.0, 1.0, 1.0), 10.0);
/// ```
pub fn calculate_pump_bhp(flow_gpm: f64, head_ft: f64, specific_gravity: f64, efficiency: f64) -> f64 {
    flow_gpm * head_ft * specific_gravity / (GPM_FT_PER_HP * efficiency)
}

/// Aggregate solved sections into a [`SystemResult`].
///
/// Sections must already be in report order.
pub fn aggregate(
    system: &HydronicSystem,
    fluid: FluidProperties,
    sections: Vec<SectionCalculation>,
    settings: &DesignSettings,
) -> CalcResult<SystemResult> {
    let total_pipe_friction_ft: f64 = sections.iter().map(|s| s.pipe_friction_ft).sum();
    let total_fittings_loss_ft: f64 = sections.iter().map(|s| s.fittings_loss_ft).sum();
    let total_system_volume_gal: f64 = sections.iter().map(|s| s.volume_gal).sum();
    let total_pipe_length_ft: f64 = sections.iter().map(|s| s.length_ft).sum();
    let flowing_length_ft: f64 = sections
        .iter()
        .filter(|s| s.flow_gpm > 0.0)
        .map(|s| s.length_ft)
        .sum();
    let max_flow_gpm = sections.iter().map(|s| s.flow_gpm).fold(0.0, f64::max);

    let static_head_ft = system.effective_static_head_ft();
    let calculated_head_ft =
        ensure_finite("calculated head", total_pipe_friction_ft + total_fittings_loss_ft + static_head_ft)?;
    let safety_factor = system.effective_safety_factor();
    let safety_factor_ft = calculated_head_ft * safety_factor;
    let total_pump_head_ft = calculated_head_ft + safety_factor_ft;

    let friction_rate_ft_per_100ft = if flowing_length_ft > 0.0 {
        total_pipe_friction_ft / flowing_length_ft * 100.0
    } else {
        0.0
    };

    let pump_head_psi = head_to_psi(total_pump_head_ft, fluid.specific_gravity);
    let pump_bhp = ensure_finite(
        "pump bhp",
        calculate_pump_bhp(
            max_flow_gpm,
            total_pump_head_ft,
            fluid.specific_gravity,
            settings.pump_efficiency,
        ),
    )?;

    let mut warnings: Vec<Warning> = sections
        .iter()
        .flat_map(|s| s.warnings.iter().cloned())
        .collect();
    warnings.extend(check_system(system, &sections, friction_rate_ft_per_100ft, settings));

    debug!(
        system = %system.label,
        sections = sections.len(),
        calculated_head_ft,
        total_pump_head_ft,
        max_flow_gpm,
        warnings = warnings.len(),
        "aggregated system"
    );

    Ok(SystemResult {
        system_id: system.id,
        label: system.label.clone(),
        loop_type: system.loop_type,
        fluid_type: system.fluid_type,
        glycol_concentration_pct: system.effective_concentration_pct(),
        fluid_temp_f: system.fluid_temp_f,
        fluid,
        total_pipe_friction_ft,
        total_fittings_loss_ft,
        static_head_ft,
        calculated_head_ft,
        safety_factor,
        safety_factor_ft,
        total_pump_head_ft,
        pump_head_psi,
        max_flow_gpm,
        total_system_volume_gal,
        total_pipe_length_ft,
        friction_rate_ft_per_100ft,
        pump_efficiency: settings.pump_efficiency,
        pump_bhp,
        sections,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::section::FlowRegime;
    use crate::fluids::properties;
    use crate::pipes::PipeMaterial;
    use approx::assert_relative_eq;

    fn fake_section(flow_gpm: f64, length_ft: f64, pipe_ft: f64, fittings_ft: f64) -> SectionCalculation {
        SectionCalculation {
            section_id: Uuid::new_v4(),
            label: "S".to_string(),
            sort_order: 0,
            flow_gpm,
            material: PipeMaterial::SteelSch40,
            nominal_size: "2".to_string(),
            length_ft,
            inner_diameter_in: 2.067,
            velocity_fps: 3.0,
            reynolds: 100_000.0,
            flow_regime: FlowRegime::Turbulent,
            relative_roughness: 8.7e-4,
            friction_factor: 0.02,
            pipe_friction_ft: pipe_ft,
            equivalent_length_ft: 0.0,
            fittings_loss_ft: fittings_ft,
            total_loss_ft: pipe_ft + fittings_ft,
            friction_rate_ft_per_100ft: 0.0,
            volume_gal: length_ft * 0.1743,
            fittings: Vec::new(),
            warnings: Vec::new(),
        }
    }

    fn water() -> FluidProperties {
        properties(FluidType::Water, 0.0, 60.0).unwrap()
    }

    #[test]
    fn test_pump_head_identities() {
        let mut system = HydronicSystem::new("HHW", 180.0);
        system.safety_factor = 0.15;
        let sections = vec![fake_section(40.0, 100.0, 2.5, 4.0), fake_section(25.0, 50.0, 1.5, 2.0)];

        let result = aggregate(&system, water(), sections, &DesignSettings::default()).unwrap();
        assert_relative_eq!(result.total_pipe_friction_ft, 4.0);
        assert_relative_eq!(result.total_fittings_loss_ft, 6.0);
        assert_relative_eq!(result.calculated_head_ft, 10.0);
        assert_relative_eq!(result.safety_factor_ft, 1.5);
        assert_relative_eq!(result.total_pump_head_ft, 11.5);
        assert_eq!(result.max_flow_gpm, 40.0);
        assert_relative_eq!(result.total_pipe_length_ft, 150.0);
        assert_relative_eq!(result.friction_rate_ft_per_100ft, 4.0 / 150.0 * 100.0);
    }

    #[test]
    fn test_static_head_open_vs_closed() {
        let mut system = HydronicSystem::new("CW", 85.0);
        system.static_head_ft = 20.0;
        let closed = aggregate(&system, water(), vec![fake_section(100.0, 100.0, 3.0, 2.0)], &DesignSettings::default())
            .unwrap();
        assert_eq!(closed.static_head_ft, 0.0);
        assert_relative_eq!(closed.calculated_head_ft, 5.0);

        system.loop_type = LoopType::Open;
        let open = aggregate(&system, water(), vec![fake_section(100.0, 100.0, 3.0, 2.0)], &DesignSettings::default())
            .unwrap();
        assert_eq!(open.static_head_ft, 20.0);
        assert_relative_eq!(open.calculated_head_ft, 25.0);
    }

    #[test]
    fn test_empty_system() {
        let system = HydronicSystem::new("Empty", 180.0);
        let result = aggregate(&system, water(), Vec::new(), &DesignSettings::default()).unwrap();
        assert_eq!(result.total_pump_head_ft, 0.0);
        assert_eq!(result.max_flow_gpm, 0.0);
        assert_eq!(result.pump_bhp, 0.0);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_bhp_and_psi() {
        assert_relative_eq!(calculate_pump_bhp(100.0, 50.0, 1.0, 0.70), 5000.0 / 2772.0, epsilon = 1e-12);
        assert_relative_eq!(head_to_psi(23.1, 1.0), 10.0, epsilon = 1e-12);
        // Heavier fluid, same head, more pressure
        assert!(head_to_psi(23.1, 1.05) > 10.0);
    }

    #[test]
    fn test_efficiency_from_settings() {
        let system = HydronicSystem::new("HHW", 180.0);
        let settings = DesignSettings {
            pump_efficiency: 0.5,
            ..DesignSettings::default()
        };
        let fluid = water();
        let sg = fluid.specific_gravity;
        let result = aggregate(&system, fluid, vec![fake_section(50.0, 100.0, 3.0, 0.0)], &settings).unwrap();
        assert_eq!(result.pump_efficiency, 0.5);
        assert_relative_eq!(result.pump_bhp, 50.0 * 3.0 * sg / (3960.0 * 0.5), epsilon = 1e-12);
    }

    #[test]
    fn test_friction_band_warnings() {
        let system = HydronicSystem::new("HHW", 180.0);
        // 10 ft over 100 ft is well above 4 ft/100 ft
        let high = aggregate(&system, water(), vec![fake_section(40.0, 100.0, 10.0, 0.0)], &DesignSettings::default())
            .unwrap();
        assert!(high.warnings.iter().any(|w| w.code == crate::warnings::WarningCode::FrictionRateHigh));

        let low = aggregate(&system, water(), vec![fake_section(40.0, 100.0, 0.2, 0.0)], &DesignSettings::default())
            .unwrap();
        assert!(low.warnings.iter().any(|w| w.code == crate::warnings::WarningCode::FrictionRateLow));

        let ok = aggregate(&system, water(), vec![fake_section(40.0, 100.0, 2.5, 0.0)], &DesignSettings::default())
            .unwrap();
        assert!(ok.warnings.is_empty());
    }

    #[test]
    fn test_idle_sections_do_not_dilute_friction_rate() {
        let system = HydronicSystem::new("HHW", 180.0);
        let sections = vec![fake_section(40.0, 100.0, 2.5, 0.0), fake_section(0.0, 400.0, 0.0, 0.0)];
        let result = aggregate(&system, water(), sections, &DesignSettings::default()).unwrap();

        assert_relative_eq!(result.total_pipe_length_ft, 500.0);
        assert_relative_eq!(result.friction_rate_ft_per_100ft, 2.5);
        assert!(result.warnings.is_empty());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::calculations::section::FlowRegime;
    use crate::fluids::properties;
    use crate::pipes::PipeMaterial;
    use proptest::prelude::*;

    fn section(flow_gpm: f64, pipe_ft: f64, fittings_ft: f64) -> SectionCalculation {
        SectionCalculation {
            section_id: Uuid::nil(),
            label: String::new(),
            sort_order: 0,
            flow_gpm,
            material: PipeMaterial::CopperTypeL,
            nominal_size: "1".to_string(),
            length_ft: 50.0,
            inner_diameter_in: 1.025,
            velocity_fps: 1.0,
            reynolds: 10_000.0,
            flow_regime: FlowRegime::Turbulent,
            relative_roughness: 1e-5,
            friction_factor: 0.03,
            pipe_friction_ft: pipe_ft,
            equivalent_length_ft: 0.0,
            fittings_loss_ft: fittings_ft,
            total_loss_ft: pipe_ft + fittings_ft,
            friction_rate_ft_per_100ft: pipe_ft * 2.0,
            volume_gal: 2.0,
            fittings: Vec::new(),
            warnings: Vec::new(),
        }
    }

    proptest! {
        #[test]
        fn pump_head_is_calculated_plus_margin(
            losses in prop::collection::vec((0.0_f64..500.0, 0.0_f64..20.0, 0.0_f64..20.0), 0..8),
            safety_factor in -1.0_f64..2.0,
            static_head in 0.0_f64..200.0,
            open in any::<bool>(),
        ) {
            let mut system = HydronicSystem::new("P", 60.0);
            system.safety_factor = safety_factor;
            system.static_head_ft = static_head;
            system.loop_type = if open { LoopType::Open } else { LoopType::Closed };

            let sections = losses.iter().map(|&(q, p, f)| section(q, p, f)).collect();
            let r = aggregate(&system, properties(FluidType::Water, 0.0, 60.0).unwrap(), sections, &DesignSettings::default()).unwrap();

            prop_assert!((0.0..=0.5).contains(&r.safety_factor));
            prop_assert!((r.total_pump_head_ft - (r.calculated_head_ft + r.safety_factor_ft)).abs() < 1e-9);
            prop_assert!((r.safety_factor_ft - r.calculated_head_ft * r.safety_factor).abs() < 1e-9);
            if !open {
                prop_assert_eq!(r.static_head_ft, 0.0);
            }
            prop_assert!(r.max_flow_gpm >= 0.0);
        }
    }
}
