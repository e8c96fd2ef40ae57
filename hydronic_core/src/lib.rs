//! # hydronic_core - Hydronic Pressure Drop and Pump Head Engine
//!
//! `hydronic_core` computes the pump head a closed or open hydronic loop needs:
//! fluid properties, per-section velocity and friction, fitting and device
//! losses, and a pump duty point with design warnings. All inputs and outputs
//! are JSON-serializable, so results can be handed straight to a UI, an
//! exporter or an LLM tool call.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Warnings, not failures**: Missing Cv values and high velocities are
//!   reported alongside the result instead of aborting it
//!
//! ## Quick Start
//!
//! ```rust
//! use hydronic_core::calculations::calculate;
//! use hydronic_core::fluids::FluidType;
//! use hydronic_core::model::{FittingInput, HydronicSystem, PipeSection};
//! use hydronic_core::pipes::PipeMaterial;
//!
//! let mut system = HydronicSystem::new("CHW-1", 44.0);
//! system.fluid_type = FluidType::PropyleneGlycol;
//! system.glycol_concentration_pct = 30.0;
//! system.safety_factor = 0.10;
//!
//! let section = PipeSection::new(system.id, "Main", 80.0, PipeMaterial::SteelSch40, "2-1/2", 250.0)
//!     .with_fitting(FittingInput::new("elbow_90_standard", 6))
//!     .with_fitting(FittingInput::new("butterfly_valve", 2))
//!     .with_fitting(FittingInput::new("chiller", 1).with_manual_drop(14.0));
//!
//! let result = calculate(&system, &[section]).unwrap();
//! println!("{:.1} GPM @ {:.1} ft", result.max_flow_gpm, result.total_pump_head_ft);
//!
//! // Serialize for storage or transmission
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! assert!(json.contains("total_pump_head_ft"));
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Section solver and system aggregation
//! - [`fluids`] - Water and glycol property tables
//! - [`pipes`] - Pipe materials, sizes and roughness
//! - [`fittings`] - Fitting, valve and equipment resistance catalog
//! - [`model`] - Systems, sections and fitting instances
//! - [`warnings`] - Design warnings
//! - [`settings`] - Velocity limits, friction band, pump efficiency
//! - [`project`] - Project container
//! - [`units`] - Type-safe unit wrappers and conversion constants
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod errors;
pub mod fittings;
pub mod fluids;
pub mod model;
pub mod pipes;
pub mod project;
pub mod settings;
pub mod units;
pub mod warnings;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate, calculate_with_settings, SectionCalculation, SystemResult};
pub use errors::{CalcError, CalcResult};
pub use project::{Project, ProjectMetadata};
pub use settings::DesignSettings;
pub use warnings::{Warning, WarningCode};
