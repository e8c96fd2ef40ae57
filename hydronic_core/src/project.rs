//! # Project Data Structures
//!
//! The `Project` struct is the root container for hydronic systems and their
//! pipe sections. It serializes to human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── meta: ProjectMetadata (version, engineer, job info, timestamps)
//! ├── settings: DesignSettings (velocity limits, friction band, pump efficiency)
//! ├── systems: HashMap<Uuid, HydronicSystem>
//! └── sections: HashMap<Uuid, PipeSection> (each owns its fittings)
//! ```
//!
//! Results are never stored. [`Project::calculate_system`] recomputes from the
//! current data every time it is called.
//!
//! ## Example
//!
//! ```rust
//! use hydronic_core::model::{HydronicSystem, PipeSection};
//! use hydronic_core::pipes::PipeMaterial;
//! use hydronic_core::project::Project;
//!
//! let mut project = Project::new("Jane Engineer", "25-042", "ACME Corp");
//! let system_id = project.add_system(HydronicSystem::new("CHW-1", 44.0));
//! project
//!     .add_section(PipeSection::new(system_id, "Main", 120.0, PipeMaterial::SteelSch40, "3", 200.0))
//!     .unwrap();
//!
//! let result = project.calculate_system(&system_id).unwrap();
//! assert!(result.total_pump_head_ft > 0.0);
//!
//! let json = serde_json::to_string_pretty(&project).unwrap();
//! assert!(json.contains("CHW-1"));
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::calculations::{calculate_with_settings, SystemResult};
use crate::errors::{CalcError, CalcResult};
use crate::model::{HydronicSystem, PipeSection};
use crate::settings::DesignSettings;

/// Current schema version for project files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root project container.
///
/// Systems and sections are stored in flat UUID-keyed maps; a section points
/// at its system through `system_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Project metadata (version, engineer, job info)
    pub meta: ProjectMetadata,

    /// Design policy applied to every system in the project
    #[serde(default)]
    pub settings: DesignSettings,

    #[serde(default)]
    pub systems: HashMap<Uuid, HydronicSystem>,

    #[serde(default)]
    pub sections: HashMap<Uuid, PipeSection>,
}

impl Project {
    /// Create a new empty project.
    ///
    /// # Arguments
    ///
    /// * `engineer` - Name of the responsible engineer
    /// * `job_id` - Job/project number (e.g., "25-001")
    /// * `client` - Client name
    pub fn new(engineer: impl Into<String>, job_id: impl Into<String>, client: impl Into<String>) -> Self {
        let now = Utc::now();
        Project {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                engineer: engineer.into(),
                job_id: job_id.into(),
                client: client.into(),
                created: now,
                modified: now,
            },
            settings: DesignSettings::default(),
            systems: HashMap::new(),
            sections: HashMap::new(),
        }
    }

    /// Add (or replace) a system. Returns its id.
    pub fn add_system(&mut self, system: HydronicSystem) -> Uuid {
        let id = system.id;
        self.systems.insert(id, system);
        self.touch();
        id
    }

    /// Add (or replace) a section. Returns its id.
    ///
    /// # Errors
    ///
    /// [`CalcError::SystemNotFound`] if the section's system is not in the project.
    pub fn add_section(&mut self, section: PipeSection) -> CalcResult<Uuid> {
        if !self.systems.contains_key(&section.system_id) {
            return Err(CalcError::system_not_found(section.system_id));
        }
        let id = section.id;
        self.sections.insert(id, section);
        self.touch();
        Ok(id)
    }

    /// Remove a system together with all of its sections (and so their fittings).
    ///
    /// Returns the removed system if it existed.
    pub fn remove_system(&mut self, id: &Uuid) -> Option<HydronicSystem> {
        let system = self.systems.remove(id)?;
        let before = self.sections.len();
        self.sections.retain(|_, section| section.system_id != *id);
        debug!(
            system = %system.label,
            removed_sections = before - self.sections.len(),
            "removed system"
        );
        self.touch();
        Some(system)
    }

    /// Remove a section by UUID.
    pub fn remove_section(&mut self, id: &Uuid) -> Option<PipeSection> {
        let section = self.sections.remove(id);
        if section.is_some() {
            self.touch();
        }
        section
    }

    /// Get a system by UUID.
    pub fn get_system(&self, id: &Uuid) -> Option<&HydronicSystem> {
        self.systems.get(id)
    }

    /// Get a section by UUID.
    pub fn get_section(&self, id: &Uuid) -> Option<&PipeSection> {
        self.sections.get(id)
    }

    /// Get a mutable reference to a section by UUID.
    ///
    /// Marks the project as modified when the section exists.
    pub fn get_section_mut(&mut self, id: &Uuid) -> Option<&mut PipeSection> {
        if self.sections.contains_key(id) {
            self.meta.modified = Utc::now();
            self.sections.get_mut(id)
        } else {
            None
        }
    }

    /// Sections belonging to a system, in sort order.
    ///
    /// Ties are broken by label, then id, so the order is stable across
    /// HashMap iteration orders.
    pub fn sections_for(&self, system_id: &Uuid) -> Vec<&PipeSection> {
        let mut sections: Vec<&PipeSection> = self
            .sections
            .values()
            .filter(|s| s.system_id == *system_id)
            .collect();
        sections.sort_by(|a, b| {
            a.sort_order
                .cmp(&b.sort_order)
                .then_with(|| a.label.cmp(&b.label))
                .then_with(|| a.id.cmp(&b.id))
        });
        sections
    }

    /// Systems sorted by label, for reports.
    pub fn systems_sorted(&self) -> Vec<&HydronicSystem> {
        let mut systems: Vec<&HydronicSystem> = self.systems.values().collect();
        systems.sort_by(|a, b| a.label.cmp(&b.label).then_with(|| a.id.cmp(&b.id)));
        systems
    }

    /// Recalculate one system from the current project data.
    ///
    /// # Errors
    ///
    /// [`CalcError::SystemNotFound`] for an unknown id, otherwise anything
    /// [`calculate_with_settings`] returns.
    pub fn calculate_system(&self, system_id: &Uuid) -> CalcResult<SystemResult> {
        let system = self
            .systems
            .get(system_id)
            .ok_or_else(|| CalcError::system_not_found(system_id))?;
        let sections: Vec<PipeSection> = self.sections_for(system_id).into_iter().cloned().collect();
        calculate_with_settings(system, &sections, &self.settings)
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }
}

impl Default for Project {
    fn default() -> Self {
        Project::new("", "", "")
    }
}

/// Project metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Name of the responsible engineer
    pub engineer: String,

    /// Job/project number
    pub job_id: String,

    /// Client name
    pub client: String,

    /// When the project was created
    pub created: DateTime<Utc>,

    /// When the project was last modified
    pub modified: DateTime<Utc>,
}
