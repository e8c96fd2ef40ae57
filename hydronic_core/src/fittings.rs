//! # Fitting Resistance Catalog
//!
//! Static catalog of pipe fittings, valves, devices and equipment. Every entry
//! carries exactly one resistance method:
//!
//! | Method           | Catalog data                       | Loss                              |
//! |------------------|------------------------------------|-----------------------------------|
//! | Length ratio     | L/D                                | Darcy-Weisbach on L/D × ID / 12   |
//! | Flow coefficient | fixed Cv, Cv by pipe size, or none | ΔP = (Q/Cv)² × SG psi, × 2.31 ft  |
//! | Manual drop      | none                               | caller-supplied head loss (ft)    |
//!
//! Cv-by-size tables are keyed by the *exact* nominal size string. A miss
//! falls back to the entry's default Cv if it has one; otherwise the user has
//! to enter a value. There is no nearest-size fallback.
//!
//! ## Example
//!
//! ```rust
//! use hydronic_core::fittings::{find_fitting, ResistanceMethod};
//!
//! let elbow = find_fitting("elbow_90_standard").unwrap();
//! assert!(matches!(elbow.method, ResistanceMethod::LengthRatio { ratio } if ratio == 30.0));
//!
//! let strainer = find_fitting("strainer_y").unwrap();
//! if let ResistanceMethod::FlowCoefficient(rating) = &strainer.method {
//!     assert_eq!(rating.lookup("2"), Some(65.0));
//!     assert_eq!(rating.lookup("2.5"), None);
//! }
//! ```

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::model::{CvValue, ValueSource};
use crate::units::Psi;

/// Broad grouping for pick lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FittingCategory {
    /// Elbows, tees and other pipe fittings
    Fitting,
    /// Isolation, check and balancing valves
    Valve,
    /// In-line devices (strainers, separators, control valves)
    Device,
    /// Coils, exchangers, chillers, boilers
    Equipment,
}

/// Source of a flow coefficient in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CvRating {
    /// A single default Cv for every size
    Fixed { cv: f64 },
    /// Cv keyed by exact nominal pipe size, with an optional default for misses
    BySize {
        table: &'static [(&'static str, f64)],
        fallback: Option<f64>,
    },
    /// No catalog value; the user must supply the Cv
    UserSupplied,
}

impl CvRating {
    /// Catalog Cv for a nominal pipe size, or `None` when the user must supply one
    pub fn lookup(&self, nominal_size: &str) -> Option<f64> {
        match self {
            CvRating::Fixed { cv } => Some(*cv),
            CvRating::BySize { table, fallback } => table
                .iter()
                .find(|(size, _)| *size == nominal_size)
                .map(|&(_, cv)| cv)
                .or(*fallback),
            CvRating::UserSupplied => None,
        }
    }
}

/// How an entry resists flow. Exactly one method per entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum ResistanceMethod {
    /// Equivalent length expressed as a multiple of pipe diameters
    LengthRatio { ratio: f64 },
    /// Valve/device flow coefficient
    FlowCoefficient(CvRating),
    /// Fixed head loss entered by the user (ft)
    ManualDrop,
}

impl ResistanceMethod {
    /// The method tag without its data
    pub fn kind(&self) -> MethodKind {
        match self {
            ResistanceMethod::LengthRatio { .. } => MethodKind::LengthRatio,
            ResistanceMethod::FlowCoefficient(_) => MethodKind::FlowCoefficient,
            ResistanceMethod::ManualDrop => MethodKind::ManualDrop,
        }
    }
}

/// Resistance method tag, as reported in results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodKind {
    LengthRatio,
    FlowCoefficient,
    ManualDrop,
}

/// One catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FittingSpec {
    /// Stable id referenced by [`crate::model::FittingInput::fitting_type`]
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    pub category: FittingCategory,
    pub method: ResistanceMethod,
}

const fn length_ratio(
    id: &'static str,
    name: &'static str,
    category: FittingCategory,
    ratio: f64,
) -> FittingSpec {
    FittingSpec {
        id,
        name,
        category,
        method: ResistanceMethod::LengthRatio { ratio },
    }
}

const fn flow_coefficient(
    id: &'static str,
    name: &'static str,
    category: FittingCategory,
    rating: CvRating,
) -> FittingSpec {
    FittingSpec {
        id,
        name,
        category,
        method: ResistanceMethod::FlowCoefficient(rating),
    }
}

const fn manual_drop(id: &'static str, name: &'static str) -> FittingSpec {
    FittingSpec {
        id,
        name,
        category: FittingCategory::Equipment,
        method: ResistanceMethod::ManualDrop,
    }
}

const STRAINER_CV: &[(&str, f64)] = &[
    ("1/2", 5.5),
    ("3/4", 10.0),
    ("1", 17.0),
    ("1-1/4", 30.0),
    ("1-1/2", 40.0),
    ("2", 65.0),
    ("2-1/2", 95.0),
    ("3", 150.0),
    ("4", 260.0),
    ("6", 590.0),
];

const BALANCING_VALVE_CV: &[(&str, f64)] = &[
    ("1/2", 1.8),
    ("3/4", 4.2),
    ("1", 7.6),
    ("1-1/4", 13.5),
    ("1-1/2", 20.0),
    ("2", 34.0),
    ("2-1/2", 62.0),
    ("3", 95.0),
    ("4", 170.0),
];

const TRIPLE_DUTY_VALVE_CV: &[(&str, f64)] = &[
    ("2", 46.0),
    ("2-1/2", 75.0),
    ("3", 110.0),
    ("4", 190.0),
    ("5", 300.0),
    ("6", 420.0),
    ("8", 740.0),
];

const AIR_SEPARATOR_CV: &[(&str, f64)] = &[
    ("2", 110.0),
    ("2-1/2", 170.0),
    ("3", 260.0),
    ("4", 450.0),
    ("6", 1000.0),
    ("8", 1800.0),
];

const SUCTION_DIFFUSER_CV: &[(&str, f64)] = &[
    ("2", 70.0),
    ("3", 160.0),
    ("4", 280.0),
    ("6", 640.0),
];

/// L/D ratios per Crane TP-410; Cv values are typical manufacturer data.
static FITTING_CATALOG: &[FittingSpec] = &[
    length_ratio("elbow_90_standard", "90° Elbow (Standard)", FittingCategory::Fitting, 30.0),
    length_ratio("elbow_90_long_radius", "90° Elbow (Long Radius)", FittingCategory::Fitting, 20.0),
    length_ratio("elbow_45", "45° Elbow", FittingCategory::Fitting, 16.0),
    length_ratio("tee_run", "Tee (Flow Through Run)", FittingCategory::Fitting, 20.0),
    length_ratio("tee_branch", "Tee (Flow Through Branch)", FittingCategory::Fitting, 60.0),
    length_ratio("gate_valve", "Gate Valve", FittingCategory::Valve, 8.0),
    length_ratio("ball_valve", "Ball Valve (Full Port)", FittingCategory::Valve, 3.0),
    length_ratio("butterfly_valve", "Butterfly Valve", FittingCategory::Valve, 45.0),
    length_ratio("globe_valve", "Globe Valve", FittingCategory::Valve, 340.0),
    length_ratio("angle_valve", "Angle Valve", FittingCategory::Valve, 150.0),
    length_ratio("swing_check_valve", "Swing Check Valve", FittingCategory::Valve, 100.0),
    flow_coefficient(
        "balancing_valve",
        "Balancing Valve",
        FittingCategory::Valve,
        CvRating::BySize { table: BALANCING_VALVE_CV, fallback: None },
    ),
    flow_coefficient(
        "triple_duty_valve",
        "Triple Duty Valve",
        FittingCategory::Valve,
        CvRating::BySize { table: TRIPLE_DUTY_VALVE_CV, fallback: None },
    ),
    flow_coefficient(
        "zone_valve",
        "Zone Valve (2-Way)",
        FittingCategory::Valve,
        CvRating::Fixed { cv: 3.5 },
    ),
    flow_coefficient(
        "strainer_y",
        "Y-Strainer",
        FittingCategory::Device,
        CvRating::BySize { table: STRAINER_CV, fallback: None },
    ),
    flow_coefficient(
        "air_separator",
        "Air Separator",
        FittingCategory::Device,
        CvRating::BySize { table: AIR_SEPARATOR_CV, fallback: None },
    ),
    flow_coefficient(
        "suction_diffuser",
        "Suction Diffuser",
        FittingCategory::Device,
        CvRating::BySize { table: SUCTION_DIFFUSER_CV, fallback: Some(150.0) },
    ),
    flow_coefficient(
        "control_valve",
        "Control Valve",
        FittingCategory::Device,
        CvRating::UserSupplied,
    ),
    manual_drop("coil", "Coil"),
    manual_drop("heat_exchanger", "Heat Exchanger"),
    manual_drop("chiller", "Chiller (Evaporator)"),
    manual_drop("boiler", "Boiler"),
    manual_drop("terminal_unit", "Terminal Unit"),
];

static CATALOG_INDEX: Lazy<HashMap<&'static str, &'static FittingSpec>> =
    Lazy::new(|| FITTING_CATALOG.iter().map(|spec| (spec.id, spec)).collect());

/// Every catalog entry, in pick-list order
pub fn fitting_catalog() -> &'static [FittingSpec] {
    FITTING_CATALOG
}

/// Look up a catalog entry by id.
///
/// # Errors
///
/// [`CalcError::FittingNotFound`] for an id that is not in the catalog.
pub fn find_fitting(id: &str) -> CalcResult<&'static FittingSpec> {
    CATALOG_INDEX
        .get(id)
        .copied()
        .ok_or_else(|| CalcError::fitting_not_found(id))
}

/// Equivalent straight-pipe length (ft) of an L/D fitting: `L/D × ID / 12`
pub fn equivalent_length_ft(ratio: f64, inner_diameter_in: f64) -> f64 {
    ratio * inner_diameter_in / 12.0
}

/// Pressure drop across a Cv-rated device (psi): `(Q / Cv)² × SG`
pub fn cv_pressure_drop_psi(flow_gpm: f64, cv: f64, specific_gravity: f64) -> f64 {
    (flow_gpm / cv).powi(2) * specific_gravity
}

/// Cv pressure drop expressed in feet of water
pub fn cv_head_loss_ft(flow_gpm: f64, cv: f64, specific_gravity: f64) -> f64 {
    Psi(cv_pressure_drop_psi(flow_gpm, cv, specific_gravity))
        .to_feet_of_water()
        .0
}

/// Confidence in the value behind a fitting's loss
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FittingStatus {
    /// L/D from the catalog, or a value the user entered
    #[default]
    Verified,
    /// Cv taken from a catalog default; informational only
    DefaultCv,
    /// Required Cv or manual drop not supplied; counted as zero loss
    MissingValue,
}

/// The Cv a fitting instance will use
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResolvedCv {
    Entered(f64),
    CatalogDefault(f64),
    Missing,
}

impl ResolvedCv {
    /// Resolve a fitting's Cv from its override and the catalog rating.
    ///
    /// An override flagged as a catalog default stays unverified even though
    /// the instance carries a number.
    pub fn resolve(rating: &CvRating, entered: Option<CvValue>, nominal_size: &str) -> Self {
        match entered {
            Some(CvValue { value, source: ValueSource::UserEntered }) => ResolvedCv::Entered(value),
            Some(CvValue { value, source: ValueSource::CatalogDefault }) => {
                ResolvedCv::CatalogDefault(value)
            }
            None => rating
                .lookup(nominal_size)
                .map_or(ResolvedCv::Missing, ResolvedCv::CatalogDefault),
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            ResolvedCv::Entered(cv) | ResolvedCv::CatalogDefault(cv) => Some(*cv),
            ResolvedCv::Missing => None,
        }
    }

    pub fn status(&self) -> FittingStatus {
        match self {
            ResolvedCv::Entered(_) => FittingStatus::Verified,
            ResolvedCv::CatalogDefault(_) => FittingStatus::DefaultCv,
            ResolvedCv::Missing => FittingStatus::MissingValue,
        }
    }
}
