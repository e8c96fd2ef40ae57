//! # Design Warnings
//!
//! Diagnostics attached to section and system results. Warnings never stop a
//! calculation: a fitting with no Cv still yields a result (zero loss for that
//! fitting), it is just flagged.
//!
//! ## Checks
//!
//! | Code                         | Level   | Raised when                                      |
//! |------------------------------|---------|--------------------------------------------------|
//! | `high_velocity`              | warning | section velocity above the loop-type limit       |
//! | `default_cv`                 | info    | a fitting uses an unverified catalog-default Cv   |
//! | `missing_cv`                 | warning | a Cv-rated device has no Cv at all               |
//! | `missing_manual_drop`        | warning | equipment has no entered pressure drop           |
//! | `static_head_on_closed_loop` | info    | static head stored on a closed loop (ignored)     |
//! | `friction_rate_high` / `_low`| warning | system friction rate outside the design band      |
//! | `unverified_inputs`          | warning | system summary of default / missing values        |

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::calculations::SectionCalculation;
use crate::fittings::FittingStatus;
use crate::model::{HydronicSystem, LoopType};
use crate::settings::DesignSettings;

/// How much attention a warning needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
}

/// Machine-readable warning kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningCode {
    HighVelocity,
    DefaultCv,
    MissingCv,
    MissingManualDrop,
    StaticHeadOnClosedLoop,
    FrictionRateHigh,
    FrictionRateLow,
    UnverifiedInputs,
}

impl WarningCode {
    /// Default severity for this kind
    pub fn severity(&self) -> Severity {
        match self {
            WarningCode::DefaultCv | WarningCode::StaticHeadOnClosedLoop => Severity::Info,
            _ => Severity::Warning,
        }
    }
}

/// A diagnostic message tied to a system, section or fitting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warning {
    pub code: WarningCode,
    pub severity: Severity,
    /// Section the warning refers to, if any
    pub section_id: Option<Uuid>,
    /// Fitting the warning refers to, if any
    pub fitting_id: Option<Uuid>,
    pub message: String,
}

impl Warning {
    fn new(code: WarningCode, message: String) -> Self {
        debug!(?code, %message, "design warning");
        Warning {
            code,
            severity: code.severity(),
            section_id: None,
            fitting_id: None,
            message,
        }
    }

    fn on_section(mut self, section_id: Uuid) -> Self {
        self.section_id = Some(section_id);
        self
    }

    fn on_fitting(mut self, fitting_id: Uuid) -> Self {
        self.fitting_id = Some(fitting_id);
        self
    }
}

/// Flag a section whose velocity exceeds the loop-type limit.
///
/// Never fires for a no-flow section.
pub fn check_velocity(
    section_id: Uuid,
    label: &str,
    velocity_fps: f64,
    max_velocity_fps: f64,
) -> Option<Warning> {
    (velocity_fps > max_velocity_fps).then(|| {
        Warning::new(
            WarningCode::HighVelocity,
            format!(
                "{label}: velocity {velocity_fps:.2} ft/s exceeds the {max_velocity_fps:.1} ft/s limit"
            ),
        )
        .on_section(section_id)
    })
}

/// Flag a fitting whose loss rests on a default or missing value.
pub fn check_fitting(
    section_id: Uuid,
    fitting_id: Uuid,
    fitting_name: &str,
    status: FittingStatus,
    is_manual_drop: bool,
) -> Option<Warning> {
    let (code, message) = match status {
        FittingStatus::Verified => return None,
        FittingStatus::DefaultCv => (
            WarningCode::DefaultCv,
            format!("{fitting_name}: using catalog default Cv; verify against the submittal"),
        ),
        FittingStatus::MissingValue if is_manual_drop => (
            WarningCode::MissingManualDrop,
            format!("{fitting_name}: no pressure drop entered; counted as 0 ft"),
        ),
        FittingStatus::MissingValue => (
            WarningCode::MissingCv,
            format!("{fitting_name}: no Cv available for this size; counted as 0 ft"),
        ),
    };
    Some(
        Warning::new(code, message)
            .on_section(section_id)
            .on_fitting(fitting_id),
    )
}

/// System-level checks run after aggregation.
pub fn check_system(
    system: &HydronicSystem,
    sections: &[SectionCalculation],
    friction_rate_ft_per_100ft: f64,
    settings: &DesignSettings,
) -> Vec<Warning> {
    let mut warnings = Vec::new();

    if system.loop_type == LoopType::Closed && system.static_head_ft != 0.0 {
        warnings.push(Warning::new(
            WarningCode::StaticHeadOnClosedLoop,
            format!(
                "Static head of {:.1} ft is ignored on a closed loop",
                system.static_head_ft
            ),
        ));
    }

    let flowing = sections.iter().any(|s| s.flow_gpm > 0.0 && s.length_ft > 0.0);
    if flowing {
        if friction_rate_ft_per_100ft > settings.max_friction_rate_ft_per_100ft {
            warnings.push(Warning::new(
                WarningCode::FrictionRateHigh,
                format!(
                    "Friction rate {friction_rate_ft_per_100ft:.2} ft/100 ft is above the {:.1} ft/100 ft design band",
                    settings.max_friction_rate_ft_per_100ft
                ),
            ));
        } else if friction_rate_ft_per_100ft < settings.min_friction_rate_ft_per_100ft {
            warnings.push(Warning::new(
                WarningCode::FrictionRateLow,
                format!(
                    "Friction rate {friction_rate_ft_per_100ft:.2} ft/100 ft is below the {:.1} ft/100 ft design band; piping may be oversized",
                    settings.min_friction_rate_ft_per_100ft
                ),
            ));
        }
    }

    let count = |status: FittingStatus| {
        sections
            .iter()
            .filter(|s| s.fittings.iter().any(|f| f.status == status))
            .count()
    };
    let defaulted = count(FittingStatus::DefaultCv);
    let missing = count(FittingStatus::MissingValue);
    if defaulted + missing > 0 {
        warnings.push(Warning::new(
            WarningCode::UnverifiedInputs,
            format!(
                "{defaulted} section(s) rely on default Cv values and {missing} section(s) are missing required inputs"
            ),
        ));
    }

    warnings
}
