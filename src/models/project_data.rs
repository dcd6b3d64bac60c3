use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::projection::MAX_CAPACITY_MW;

/// Validated parameters of a photovoltaic project.
///
/// Built only through [`ProjectInput::validate`], so every instance has a
/// non-empty name, location and start date and a finite, non-negative capacity.
/// The start date is kept as entered; it is not parsed as a calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectData {
    pub project_name: String,
    pub location: String,
    /// Installed capacity in megawatts.
    pub installed_capacity: f64,
    pub start_date: String,
}

/// A submitted project as held by the application state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    #[serde(flatten)]
    pub project: ProjectData,
    pub submitted_at: DateTime<Utc>,
}

impl Submission {
    pub fn new(project: ProjectData) -> Self {
        Self {
            project,
            submitted_at: Utc::now(),
        }
    }
}

/// Raw form values for a project, before validation.
///
/// HTML forms post every field as text, JSON clients usually send the capacity
/// as a number; both are accepted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInput {
    #[serde(default)]
    pub project_name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub installed_capacity: Option<CapacityValue>,
    #[serde(default)]
    pub start_date: String,
}

/// Installed capacity as it arrives from a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CapacityValue {
    Number(f64),
    Text(String),
}

impl CapacityValue {
    /// The value as it should appear when the form is shown again.
    pub fn display(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

/// A form field of [`ProjectInput`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    ProjectName,
    Location,
    InstalledCapacity,
    StartDate,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProjectName => "projectName",
            Self::Location => "location",
            Self::InstalledCapacity => "installedCapacity",
            Self::StartDate => "startDate",
        }
    }
}

/// A single invalid field with the message shown next to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

/// All invalid fields of a rejected submission, in form order.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("{} invalid field(s)", .errors.len())]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// Message for the given field, if it was rejected.
    pub fn message_for(&self, field: Field) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

impl ProjectInput {
    /// Check presence and non-negativity, producing the submitted [`ProjectData`].
    pub fn validate(&self) -> Result<ProjectData, ValidationErrors> {
        let mut errors = Vec::new();

        let project_name = self.project_name.trim();
        if project_name.is_empty() {
            errors.push(field_error(Field::ProjectName, "Project name is required"));
        }

        let location = self.location.trim();
        if location.is_empty() {
            errors.push(field_error(Field::Location, "Location is required"));
        }

        let installed_capacity = match parse_capacity(self.installed_capacity.as_ref()) {
            Ok(capacity) => capacity,
            Err(message) => {
                errors.push(field_error(Field::InstalledCapacity, message));
                0.0
            }
        };

        let start_date = self.start_date.trim();
        if start_date.is_empty() {
            errors.push(field_error(Field::StartDate, "Start date is required"));
        }

        if !errors.is_empty() {
            return Err(ValidationErrors { errors });
        }

        Ok(ProjectData {
            project_name: project_name.to_string(),
            location: location.to_string(),
            installed_capacity,
            start_date: start_date.to_string(),
        })
    }
}

fn field_error(field: Field, message: &str) -> FieldError {
    FieldError {
        field,
        message: message.to_string(),
    }
}

/// Parse and range-check an installed capacity in megawatts.
pub fn parse_capacity(value: Option<&CapacityValue>) -> Result<f64, &'static str> {
    let capacity = match value {
        None => return Err("Installed capacity is required"),
        Some(CapacityValue::Number(n)) => *n,
        Some(CapacityValue::Text(s)) => {
            let s = s.trim();
            if s.is_empty() {
                return Err("Installed capacity is required");
            }
            s.parse::<f64>()
                .map_err(|_| "Installed capacity must be a number")?
        }
    };

    if !capacity.is_finite() {
        return Err("Installed capacity must be a number");
    }
    if capacity < 0.0 {
        return Err("Installed capacity must be zero or greater");
    }
    if capacity > MAX_CAPACITY_MW {
        return Err("Installed capacity must be at most 1,000,000 MW");
    }
    Ok(capacity)
}
