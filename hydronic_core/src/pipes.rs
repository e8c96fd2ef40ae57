//! # Pipe Geometry Catalog
//!
//! Internal diameters and absolute roughness for the pipe materials used in
//! hydronic work, keyed by nominal size string (`"1/2"`, `"1-1/4"`, `"6"`...).
//!
//! Lookup is exact-match only. There is no interpolation between sizes, and an
//! unknown (material, size) pair is an error, not a silent default.
//!
//! ## Example
//!
//! ```rust
//! use hydronic_core::pipes::{dimensions, available_sizes, PipeMaterial};
//!
//! let dims = dimensions(PipeMaterial::SteelSch40, "1").unwrap();
//! assert_eq!(dims.inner_diameter_in, 1.049);
//!
//! let sizes = available_sizes(PipeMaterial::CopperTypeL);
//! assert_eq!(sizes.first(), Some(&"1/2"));
//!
//! assert!(dimensions(PipeMaterial::Pex, "10").is_err());
//! ```

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::{Feet, Inches, IN2_PER_FT2, IN3_PER_GALLON};

/// Pipe material / wall schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipeMaterial {
    /// Black or galvanized steel, Schedule 40
    #[default]
    SteelSch40,
    /// Steel, Schedule 80
    SteelSch80,
    /// Copper tube, Type L
    CopperTypeL,
    /// Copper tube, Type M
    CopperTypeM,
    /// PEX tubing, SDR 9
    Pex,
    /// PVC, Schedule 40
    PvcSch40,
}

/// Absolute roughness of commercial steel (ft)
const STEEL_ROUGHNESS_FT: f64 = 0.00015;
/// Absolute roughness of drawn copper tube (ft)
const COPPER_ROUGHNESS_FT: f64 = 0.000005;
/// Absolute roughness of PEX (ft)
const PEX_ROUGHNESS_FT: f64 = 0.000007;
/// Absolute roughness of PVC (ft)
const PVC_ROUGHNESS_FT: f64 = 0.000005;

/// Nominal size and internal diameter (in)
type SizeRow = (&'static str, f64);

const STEEL_SCH40: &[SizeRow] = &[
    ("1/2", 0.622),
    ("3/4", 0.824),
    ("1", 1.049),
    ("1-1/4", 1.380),
    ("1-1/2", 1.610),
    ("2", 2.067),
    ("2-1/2", 2.469),
    ("3", 3.068),
    ("4", 4.026),
    ("5", 5.047),
    ("6", 6.065),
    ("8", 7.981),
    ("10", 10.020),
    ("12", 11.938),
];

const STEEL_SCH80: &[SizeRow] = &[
    ("1/2", 0.546),
    ("3/4", 0.742),
    ("1", 0.957),
    ("1-1/4", 1.278),
    ("1-1/2", 1.500),
    ("2", 1.939),
    ("2-1/2", 2.323),
    ("3", 2.900),
    ("4", 3.826),
    ("5", 4.813),
    ("6", 5.761),
    ("8", 7.625),
    ("10", 9.562),
    ("12", 11.374),
];

const COPPER_TYPE_L: &[SizeRow] = &[
    ("1/2", 0.545),
    ("3/4", 0.785),
    ("1", 1.025),
    ("1-1/4", 1.265),
    ("1-1/2", 1.505),
    ("2", 1.985),
    ("2-1/2", 2.465),
    ("3", 2.945),
    ("4", 3.905),
    ("5", 4.875),
    ("6", 5.845),
];

const COPPER_TYPE_M: &[SizeRow] = &[
    ("1/2", 0.569),
    ("3/4", 0.811),
    ("1", 1.055),
    ("1-1/4", 1.291),
    ("1-1/2", 1.527),
    ("2", 2.009),
    ("2-1/2", 2.495),
    ("3", 2.981),
    ("4", 3.935),
    ("5", 4.907),
    ("6", 5.881),
];

const PEX_SDR9: &[SizeRow] = &[
    ("1/2", 0.475),
    ("3/4", 0.671),
    ("1", 0.862),
    ("1-1/4", 1.054),
    ("1-1/2", 1.244),
    ("2", 1.629),
];

const PVC_SCH40: &[SizeRow] = &[
    ("1/2", 0.602),
    ("3/4", 0.804),
    ("1", 1.029),
    ("1-1/4", 1.360),
    ("1-1/2", 1.590),
    ("2", 2.047),
    ("2-1/2", 2.445),
    ("3", 3.042),
    ("4", 3.998),
    ("6", 6.031),
    ("8", 7.942),
];

impl PipeMaterial {
    /// All pipe materials for UI selection
    pub const ALL: [PipeMaterial; 6] = [
        PipeMaterial::SteelSch40,
        PipeMaterial::SteelSch80,
        PipeMaterial::CopperTypeL,
        PipeMaterial::CopperTypeM,
        PipeMaterial::Pex,
        PipeMaterial::PvcSch40,
    ];

    /// Machine-readable code (matches the serde representation)
    pub fn code(&self) -> &'static str {
        match self {
            PipeMaterial::SteelSch40 => "steel_sch40",
            PipeMaterial::SteelSch80 => "steel_sch80",
            PipeMaterial::CopperTypeL => "copper_type_l",
            PipeMaterial::CopperTypeM => "copper_type_m",
            PipeMaterial::Pex => "pex",
            PipeMaterial::PvcSch40 => "pvc_sch40",
        }
    }

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            PipeMaterial::SteelSch40 => "Steel Sch. 40",
            PipeMaterial::SteelSch80 => "Steel Sch. 80",
            PipeMaterial::CopperTypeL => "Copper Type L",
            PipeMaterial::CopperTypeM => "Copper Type M",
            PipeMaterial::Pex => "PEX (SDR 9)",
            PipeMaterial::PvcSch40 => "PVC Sch. 40",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        let normalized = s.to_lowercase().replace([' ', '-', '.'], "_");
        PipeMaterial::ALL
            .into_iter()
            .find(|m| m.code() == normalized)
            .ok_or_else(|| {
                CalcError::invalid_input("material", s, "Unknown pipe material")
            })
    }

    /// Absolute roughness (ft)
    pub fn roughness_ft(&self) -> f64 {
        match self {
            PipeMaterial::SteelSch40 | PipeMaterial::SteelSch80 => STEEL_ROUGHNESS_FT,
            PipeMaterial::CopperTypeL | PipeMaterial::CopperTypeM => COPPER_ROUGHNESS_FT,
            PipeMaterial::Pex => PEX_ROUGHNESS_FT,
            PipeMaterial::PvcSch40 => PVC_ROUGHNESS_FT,
        }
    }

    fn size_table(&self) -> &'static [SizeRow] {
        match self {
            PipeMaterial::SteelSch40 => STEEL_SCH40,
            PipeMaterial::SteelSch80 => STEEL_SCH80,
            PipeMaterial::CopperTypeL => COPPER_TYPE_L,
            PipeMaterial::CopperTypeM => COPPER_TYPE_M,
            PipeMaterial::Pex => PEX_SDR9,
            PipeMaterial::PvcSch40 => PVC_SCH40,
        }
    }
}

impl std::fmt::Display for PipeMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Internal geometry of one pipe size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipeDimensions {
    /// Internal diameter (in)
    pub inner_diameter_in: f64,
    /// Absolute roughness (ft)
    pub roughness_ft: f64,
    /// Internal cross-sectional area (in²)
    pub area_in2: f64,
    /// Water content per foot of pipe (gal/ft)
    pub volume_gal_per_ft: f64,
}

impl PipeDimensions {
    /// Build dimensions from an internal diameter
    pub fn from_inner_diameter(inner_diameter_in: f64, roughness_ft: f64) -> Self {
        let area_in2 = PI * inner_diameter_in.powi(2) / 4.0;
        PipeDimensions {
            inner_diameter_in,
            roughness_ft,
            area_in2,
            volume_gal_per_ft: area_in2 * 12.0 / IN3_PER_GALLON,
        }
    }

    /// Internal diameter (ft)
    pub fn inner_diameter_ft(&self) -> f64 {
        Feet::from(Inches(self.inner_diameter_in)).0
    }

    /// Internal cross-sectional area (ft²)
    pub fn area_ft2(&self) -> f64 {
        self.area_in2 / IN2_PER_FT2
    }

    /// Relative roughness ε/D (dimensionless)
    pub fn relative_roughness(&self) -> f64 {
        self.roughness_ft / self.inner_diameter_ft()
    }
}

/// Geometry for a (material, nominal size) pair.
///
/// # Errors
///
/// [`CalcError::PipeSizeNotFound`] if the size is not catalogued for the material.
pub fn dimensions(material: PipeMaterial, nominal_size: &str) -> CalcResult<PipeDimensions> {
    material
        .size_table()
        .iter()
        .find(|(size, _)| *size == nominal_size)
        .map(|&(_, id_in)| PipeDimensions::from_inner_diameter(id_in, material.roughness_ft()))
        .ok_or_else(|| CalcError::pipe_size_not_found(material.code(), nominal_size))
}

/// Nominal sizes catalogued for a material, smallest first
pub fn available_sizes(material: PipeMaterial) -> Vec<&'static str> {
    material.size_table().iter().map(|(size, _)| *size).collect()
}
