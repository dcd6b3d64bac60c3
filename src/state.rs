//! Application state shared by every request.

use std::sync::{Arc, RwLock};

use crate::config::Config;
use crate::models::{self, KeyIndicators, ProjectData, ProjectionRow, Submission};
use crate::report::OutlineStore;

/// Owner of the submitted project and the report outline.
///
/// Cloning is cheap; clones share the same project and outline.
#[derive(Clone)]
pub struct AppState {
    submission: Arc<RwLock<Option<Submission>>>,
    outline: OutlineStore,
}

/// Projection rows and headline figures for one project.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Projections {
    pub rows: Vec<ProjectionRow>,
    pub indicators: KeyIndicators,
}

impl Projections {
    pub fn for_project(project: &ProjectData) -> Self {
        Self {
            rows: models::project(project.installed_capacity),
            indicators: KeyIndicators::for_capacity(project.installed_capacity),
        }
    }
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            submission: Arc::new(RwLock::new(None)),
            outline: OutlineStore::new(config.expansion_delay),
        }
    }

    pub fn outline(&self) -> &OutlineStore {
        &self.outline
    }

    pub fn submission(&self) -> Option<Submission> {
        self.submission
            .read()
            .expect("submission lock poisoned")
            .clone()
    }

    pub fn project(&self) -> Option<ProjectData> {
        self.submission().map(|s| s.project)
    }

    /// Replace the current project. The outline is left as it is.
    pub fn submit(&self, project: ProjectData) -> Submission {
        let submission = Submission::new(project);
        tracing::info!(
            project = %submission.project.project_name,
            capacity_mw = submission.project.installed_capacity,
            "Project submitted"
        );
        *self.submission.write().expect("submission lock poisoned") = Some(submission.clone());
        submission
    }

    pub fn projections(&self) -> Option<Projections> {
        self.project().as_ref().map(Projections::for_project)
    }
}
