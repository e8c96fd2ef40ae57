//! # Unit Types and Conversion Constants
//!
//! Lightweight newtype wrappers plus the handful of conversion constants the
//! hydraulics use. Everything is US customary, matching how hydronic systems
//! are drawn and scheduled in the US:
//! - Flow: gallons per minute (GPM)
//! - Length: feet (ft), inches (in)
//! - Head: feet of water column (ft)
//! - Pressure: pounds per square inch (psi)
//! - Viscosity: centipoise (cP)
//!
//! ## Example
//!
//! ```rust
//! use hydronic_core::units::{Feet, FeetOfHead, Inches};
//!
//! let id: Feet = Inches(12.0).into();
//! assert_eq!(id.0, 1.0);
//!
//! let psi = FeetOfHead(23.1).to_psi(1.0);
//! assert!((psi.0 - 10.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// Conversion Constants
// ============================================================================

/// Standard gravity (ft/s²)
pub const GRAVITY_FT_S2: f64 = 32.174;

/// GPM per ft³/s
pub const GPM_PER_CFS: f64 = 448.831;

/// Feet of water per psi
pub const FT_HEAD_PER_PSI: f64 = 2.31;

/// Cubic inches per US gallon
pub const IN3_PER_GALLON: f64 = 231.0;

/// Square inches per square foot
pub const IN2_PER_FT2: f64 = 144.0;

/// lb/(ft·s) per centipoise
pub const LB_PER_FT_S_PER_CP: f64 = 6.719_689_75e-4;

/// GPM·ft per water horsepower (at SG 1.0)
pub const GPM_FT_PER_HP: f64 = 3960.0;

// ============================================================================
// Length Units
// ============================================================================

/// Length in feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feet(pub f64);

/// Length in inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inches(pub f64);

impl From<Feet> for Inches {
    fn from(ft: Feet) -> Self {
        Inches(ft.0 * 12.0)
    }
}

impl From<Inches> for Feet {
    fn from(inches: Inches) -> Self {
        Feet(inches.0 / 12.0)
    }
}

// ============================================================================
// Head / Pressure Units
// ============================================================================

/// Head in feet of water column
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeetOfHead(pub f64);

/// Pressure in pounds per square inch (psi)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Psi(pub f64);

impl FeetOfHead {
    /// Pressure exerted by this head of a fluid with the given specific gravity
    pub fn to_psi(self, specific_gravity: f64) -> Psi {
        Psi(self.0 * specific_gravity / FT_HEAD_PER_PSI)
    }
}

impl Psi {
    /// Feet of water equivalent to this pressure.
    ///
    /// Device pressure drops (Cv method) are quoted this way, without a
    /// specific gravity correction.
    pub fn to_feet_of_water(self) -> FeetOfHead {
        FeetOfHead(self.0 * FT_HEAD_PER_PSI)
    }
}
