//! # Hydronic System Data Model
//!
//! The plain data the engine consumes. A [`HydronicSystem`] describes the loop
//! and its fluid; [`PipeSection`]s are the ordered pipe runs, each owning the
//! [`FittingInput`]s installed in it.
//!
//! ```text
//! HydronicSystem (loop type, fluid, temperature, static head, safety factor)
//! └── PipeSection (flow, material, size, length, sort order)   [system_id]
//!     └── FittingInput (catalog id, quantity, Cv / manual drop overrides)
//! ```
//!
//! Sections are hydraulically independent: each section's loss is computed on
//! its own and summed. Sort order only fixes the order results come back in.
//!
//! ## Raw vs. effective values
//!
//! Stored fields are kept exactly as entered. The engine reads them through the
//! `effective_*` accessors, which clamp glycol concentration to 0-60 % and the
//! safety factor to 0-0.5, and which drop the static head on closed loops. A
//! closed system may therefore keep a populated `static_head_ft` in storage
//! without it ever reaching the pump head.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "id": "6f1c4c52-5d0e-4c8b-a1f7-1b2d9a3c0e11",
//!   "label": "HHW-1",
//!   "loop_type": "closed",
//!   "fluid_type": "propylene_glycol",
//!   "glycol_concentration_pct": 30.0,
//!   "fluid_temp_f": 180.0,
//!   "static_head_ft": 0.0,
//!   "safety_factor": 0.1
//! }
//! ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{require_finite, CalcError, CalcResult};
use crate::fluids::{clamp_concentration, FluidType};
use crate::pipes::PipeMaterial;

/// Smallest allowed safety factor
pub const MIN_SAFETY_FACTOR: f64 = 0.0;

/// Largest allowed safety factor (50 % margin)
pub const MAX_SAFETY_FACTOR: f64 = 0.5;

/// Closed (sealed, pressurized) or open (vented, e.g. cooling tower) loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopType {
    #[default]
    Closed,
    Open,
}

impl LoopType {
    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            LoopType::Closed => "Closed Loop",
            LoopType::Open => "Open Loop",
        }
    }
}

impl std::fmt::Display for LoopType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A pumped hydronic loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HydronicSystem {
    pub id: Uuid,

    /// User label (e.g., "CHW-1", "Heating Hot Water")
    pub label: String,

    pub loop_type: LoopType,

    pub fluid_type: FluidType,

    /// Glycol concentration (% by volume); ignored for water
    #[serde(default)]
    pub glycol_concentration_pct: f64,

    /// Design fluid temperature (°F)
    pub fluid_temp_f: f64,

    /// Static lift for open loops (ft). Stored as entered; see
    /// [`HydronicSystem::effective_static_head_ft`].
    #[serde(default)]
    pub static_head_ft: f64,

    /// Design margin applied to the calculated head (0.0 - 0.5)
    #[serde(default)]
    pub safety_factor: f64,
}

impl HydronicSystem {
    /// Create a closed water loop at the given temperature with no margin.
    pub fn new(label: impl Into<String>, fluid_temp_f: f64) -> Self {
        HydronicSystem {
            id: Uuid::new_v4(),
            label: label.into(),
            loop_type: LoopType::Closed,
            fluid_type: FluidType::Water,
            glycol_concentration_pct: 0.0,
            fluid_temp_f,
            static_head_ft: 0.0,
            safety_factor: 0.0,
        }
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_finite("fluid_temp_f", self.fluid_temp_f)?;
        require_finite("glycol_concentration_pct", self.glycol_concentration_pct)?;
        require_finite("static_head_ft", self.static_head_ft)?;
        require_finite("safety_factor", self.safety_factor)?;
        if self.static_head_ft < 0.0 {
            return Err(CalcError::invalid_input(
                "static_head_ft",
                self.static_head_ft.to_string(),
                "Static head cannot be negative",
            ));
        }
        Ok(())
    }

    /// Glycol concentration used for property lookup: 0 for water,
    /// otherwise clamped to the tabulated 0-60 % range.
    pub fn effective_concentration_pct(&self) -> f64 {
        if self.fluid_type.is_glycol() {
            clamp_concentration(self.glycol_concentration_pct)
        } else {
            0.0
        }
    }

    /// Safety factor clamped to 0.0 - 0.5
    pub fn effective_safety_factor(&self) -> f64 {
        self.safety_factor.clamp(MIN_SAFETY_FACTOR, MAX_SAFETY_FACTOR)
    }

    /// Static head that actually counts toward pump head: the stored value on
    /// an open loop, zero on a closed loop.
    pub fn effective_static_head_ft(&self) -> f64 {
        match self.loop_type {
            LoopType::Open => self.static_head_ft,
            LoopType::Closed => 0.0,
        }
    }
}

/// Whether a Cv came from the catalog or was typed in by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueSource {
    /// Pre-filled from a catalog default; informational until verified
    #[default]
    CatalogDefault,
    /// Entered (and so verified) by the user
    UserEntered,
}

/// A flow coefficient carried on a fitting instance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CvValue {
    pub value: f64,
    #[serde(default)]
    pub source: ValueSource,
}

impl CvValue {
    /// A Cv entered by the user
    pub fn entered(value: f64) -> Self {
        CvValue {
            value,
            source: ValueSource::UserEntered,
        }
    }
}

/// A fitting, valve or device installed in a pipe section.
///
/// Overrides that don't apply to the catalog entry's method are ignored
/// (e.g. a `manual_drop_ft` on an elbow).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittingInput {
    pub id: Uuid,

    /// Catalog id (see [`crate::fittings::fitting_catalog`])
    pub fitting_type: String,

    /// Number of identical fittings
    #[serde(default = "default_quantity")]
    pub quantity: u32,

    /// Cv override for flow-coefficient entries
    #[serde(default)]
    pub cv: Option<CvValue>,

    /// Fixed head loss for manual-drop entries (ft)
    #[serde(default)]
    pub manual_drop_ft: Option<f64>,
}

fn default_quantity() -> u32 {
    1
}

impl FittingInput {
    /// A catalog fitting with no overrides
    pub fn new(fitting_type: impl Into<String>, quantity: u32) -> Self {
        FittingInput {
            id: Uuid::new_v4(),
            fitting_type: fitting_type.into(),
            quantity,
            cv: None,
            manual_drop_ft: None,
        }
    }

    /// Set a user-entered Cv
    pub fn with_cv(mut self, cv: f64) -> Self {
        self.cv = Some(CvValue::entered(cv));
        self
    }

    /// Set a manual head loss (ft)
    pub fn with_manual_drop(mut self, drop_ft: f64) -> Self {
        self.manual_drop_ft = Some(drop_ft);
        self
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if let Some(cv) = &self.cv {
            require_finite("cv", cv.value)?;
            if cv.value <= 0.0 {
                return Err(CalcError::invalid_input(
                    "cv",
                    cv.value.to_string(),
                    "Cv must be positive",
                ));
            }
        }
        if let Some(drop_ft) = self.manual_drop_ft {
            require_finite("manual_drop_ft", drop_ft)?;
            if drop_ft < 0.0 {
                return Err(CalcError::invalid_input(
                    "manual_drop_ft",
                    drop_ft.to_string(),
                    "Pressure drop cannot be negative",
                ));
            }
        }
        Ok(())
    }
}

/// A straight pipe run with its fittings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipeSection {
    pub id: Uuid,

    /// Owning system
    pub system_id: Uuid,

    /// User label (e.g., "Main supply", "Riser R-2")
    #[serde(default)]
    pub label: String,

    /// Design flow (GPM). Zero or negative means no flow.
    pub flow_gpm: f64,

    pub material: PipeMaterial,

    /// Nominal size, exactly as catalogued (e.g., "1-1/4")
    pub nominal_size: String,

    /// Developed length of straight pipe (ft)
    pub length_ft: f64,

    /// Position in the network traversal
    #[serde(default)]
    pub sort_order: i32,

    #[serde(default)]
    pub fittings: Vec<FittingInput>,
}

impl PipeSection {
    /// Create an empty section belonging to `system_id`
    pub fn new(
        system_id: Uuid,
        label: impl Into<String>,
        flow_gpm: f64,
        material: PipeMaterial,
        nominal_size: impl Into<String>,
        length_ft: f64,
    ) -> Self {
        PipeSection {
            id: Uuid::new_v4(),
            system_id,
            label: label.into(),
            flow_gpm,
            material,
            nominal_size: nominal_size.into(),
            length_ft,
            sort_order: 0,
            fittings: Vec::new(),
        }
    }

    /// Add a fitting (builder style)
    pub fn with_fitting(mut self, fitting: FittingInput) -> Self {
        self.fittings.push(fitting);
        self
    }

    /// Set the sort order (builder style)
    pub fn with_sort_order(mut self, sort_order: i32) -> Self {
        self.sort_order = sort_order;
        self
    }

    /// Validate input parameters, including every fitting.
    pub fn validate(&self) -> CalcResult<()> {
        require_finite("flow_gpm", self.flow_gpm)?;
        require_finite("length_ft", self.length_ft)?;
        if self.length_ft < 0.0 {
            return Err(CalcError::invalid_input(
                "length_ft",
                self.length_ft.to_string(),
                "Length cannot be negative",
            ));
        }
        self.fittings.iter().try_for_each(FittingInput::validate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_values_are_clamped() {
        let mut system = HydronicSystem::new("CHW-1", 45.0);
        system.fluid_type = FluidType::PropyleneGlycol;
        system.glycol_concentration_pct = 75.0;
        system.safety_factor = 0.9;
        assert_eq!(system.effective_concentration_pct(), 60.0);
        assert_eq!(system.effective_safety_factor(), 0.5);

        system.safety_factor = -0.2;
        assert_eq!(system.effective_safety_factor(), 0.0);
    }

    #[test]
    fn test_water_has_no_concentration() {
        let mut system = HydronicSystem::new("HHW", 180.0);
        system.glycol_concentration_pct = 40.0;
        assert_eq!(system.effective_concentration_pct(), 0.0);
    }

    #[test]
    fn test_static_head_only_on_open_loops() {
        let mut system = HydronicSystem::new("CW", 85.0);
        system.static_head_ft = 12.0;
        assert_eq!(system.effective_static_head_ft(), 0.0);
        // Raw value is preserved
        assert_eq!(system.static_head_ft, 12.0);

        system.loop_type = LoopType::Open;
        assert_eq!(system.effective_static_head_ft(), 12.0);
    }

    #[test]
    fn test_system_rejects_negative_static_head() {
        let mut system = HydronicSystem::new("CW", 85.0);
        system.loop_type = LoopType::Open;
        system.static_head_ft = 0.0;
        assert!(system.validate().is_ok());

        system.static_head_ft = -50.0;
        let err = system.validate().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        // Rejected on closed loops too, even though it would not be used
        system.loop_type = LoopType::Closed;
        assert!(system.validate().is_err());
    }

    #[test]
    fn test_section_validation() {
        let system = HydronicSystem::new("HHW", 180.0);
        let section = PipeSection::new(system.id, "S-1", 10.0, PipeMaterial::SteelSch40, "1", 50.0);
        assert!(section.validate().is_ok());

        let mut negative = section.clone();
        negative.length_ft = -1.0;
        assert!(negative.validate().is_err());

        let mut nan_flow = section.clone();
        nan_flow.flow_gpm = f64::NAN;
        assert!(nan_flow.validate().is_err());

        // Negative flow is a degenerate case, not an error
        let mut reversed = section;
        reversed.flow_gpm = -5.0;
        assert!(reversed.validate().is_ok());
    }

    #[test]
    fn test_fitting_validation() {
        assert!(FittingInput::new("control_valve", 1).with_cv(0.0).validate().is_err());
        assert!(FittingInput::new("coil", 1).with_manual_drop(-3.0).validate().is_err());
        assert!(FittingInput::new("coil", 1).with_manual_drop(8.5).validate().is_ok());
    }

    #[test]
    fn test_section_json_defaults() {
        let json = r#"{
            "id": "00000000-0000-0000-0000-000000000001",
            "system_id": "00000000-0000-0000-0000-000000000002",
            "flow_gpm": 25.0,
            "material": "copper_type_l",
            "nominal_size": "1-1/4",
            "length_ft": 80.0,
            "fittings": [
                { "id": "00000000-0000-0000-0000-000000000003", "fitting_type": "balancing_valve",
                  "cv": { "value": 13.5 } }
            ]
        }"#;
        let section: PipeSection = serde_json::from_str(json).unwrap();
        assert_eq!(section.sort_order, 0);
        assert_eq!(section.fittings[0].quantity, 1);
        assert_eq!(section.fittings[0].cv.unwrap().source, ValueSource::CatalogDefault);
    }
}
