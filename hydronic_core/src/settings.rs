//! # Design Settings
//!
//! Policy values the engine checks results against. Nothing here changes the
//! hydraulics; it only decides which warnings fire and which pump efficiency
//! the BHP estimate assumes.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "closed_loop_max_velocity_fps": 8.0,
//!   "open_loop_max_velocity_fps": 6.0,
//!   "min_friction_rate_ft_per_100ft": 1.0,
//!   "max_friction_rate_ft_per_100ft": 4.0,
//!   "pump_efficiency": 0.7
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::model::LoopType;

/// Pump efficiency assumed for the brake horsepower estimate.
///
/// 70 % is a typical wire-to-water figure for mid-size end-suction and
/// in-line circulators at their best efficiency point.
pub const DEFAULT_PUMP_EFFICIENCY: f64 = 0.70;

/// Velocity limits and design bands used by the warning checks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignSettings {
    /// Velocity above which a closed-loop section is flagged (ft/s)
    pub closed_loop_max_velocity_fps: f64,

    /// Velocity above which an open-loop section is flagged (ft/s)
    pub open_loop_max_velocity_fps: f64,

    /// Lower edge of the typical friction-rate band (ft per 100 ft)
    pub min_friction_rate_ft_per_100ft: f64,

    /// Upper edge of the typical friction-rate band (ft per 100 ft)
    pub max_friction_rate_ft_per_100ft: f64,

    /// Pump efficiency for BHP (0 < η ≤ 1)
    pub pump_efficiency: f64,
}

impl Default for DesignSettings {
    fn default() -> Self {
        DesignSettings {
            closed_loop_max_velocity_fps: 8.0,
            open_loop_max_velocity_fps: 6.0,
            min_friction_rate_ft_per_100ft: 1.0,
            max_friction_rate_ft_per_100ft: 4.0,
            pump_efficiency: DEFAULT_PUMP_EFFICIENCY,
        }
    }
}

impl DesignSettings {
    /// Velocity limit for a loop type (ft/s)
    pub fn max_velocity_fps(&self, loop_type: LoopType) -> f64 {
        match loop_type {
            LoopType::Closed => self.closed_loop_max_velocity_fps,
            LoopType::Open => self.open_loop_max_velocity_fps,
        }
    }

    /// Validate settings.
    pub fn validate(&self) -> CalcResult<()> {
        let positive = [
            ("closed_loop_max_velocity_fps", self.closed_loop_max_velocity_fps),
            ("open_loop_max_velocity_fps", self.open_loop_max_velocity_fps),
            ("max_friction_rate_ft_per_100ft", self.max_friction_rate_ft_per_100ft),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(CalcError::invalid_input(field, value.to_string(), "Must be positive"));
            }
        }

        let min_rate = self.min_friction_rate_ft_per_100ft;
        if !(0.0..=self.max_friction_rate_ft_per_100ft).contains(&min_rate) {
            return Err(CalcError::invalid_input(
                "min_friction_rate_ft_per_100ft",
                min_rate.to_string(),
                "Must be between 0 and the maximum friction rate",
            ));
        }

        if !(self.pump_efficiency > 0.0 && self.pump_efficiency <= 1.0) {
            return Err(CalcError::invalid_input(
                "pump_efficiency",
                self.pump_efficiency.to_string(),
                "Efficiency must be in (0, 1]",
            ));
        }
        Ok(())
    }
}
