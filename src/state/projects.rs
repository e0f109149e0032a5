//! Dashboard project listing split into joined and available groups.

#[cfg(test)]
#[path = "projects_test.rs"]
mod projects_test;

use serde::Serialize;

use crate::net::types::Project;

/// Projects grouped the way the dashboard shows them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ProjectBoard {
    pub joined: Vec<Project>,
    pub available: Vec<Project>,
}

impl ProjectBoard {
    /// Partition `projects` by membership, keeping backend order in each group.
    #[must_use]
    pub fn from_projects(projects: Vec<Project>) -> Self {
        let (joined, available) = projects.into_iter().partition(|p| p.is_joined);
        Self { joined, available }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.joined.is_empty() && self.available.is_empty()
    }

    /// Find a project in either group by code.
    #[must_use]
    pub fn find(&self, project_code: &str) -> Option<&Project> {
        self.joined
            .iter()
            .chain(&self.available)
            .find(|p| p.project_code.eq_ignore_ascii_case(project_code))
    }
}
