use std::{convert::Infallible, future::Future};

use crate::{ProjectRecord, UserRecord};

/// Source of the projects that are currently open for matching.
pub trait ProjectDirectory: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    fn list_open_projects(
        &self,
    ) -> impl Future<Output = Result<Vec<ProjectRecord>, Self::Error>> + Send;
}

/// Source of users together with their skill profiles.
pub trait UserDirectory: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    fn list_users_with_skills(
        &self,
    ) -> impl Future<Output = Result<Vec<UserRecord>, Self::Error>> + Send;
}

/// Anything a directory hands back that can be skipped by id.
pub trait DirectoryRecord {
    fn record_id(&self) -> i64;
}

impl DirectoryRecord for ProjectRecord {
    fn record_id(&self) -> i64 {
        self.id
    }
}

impl DirectoryRecord for UserRecord {
    fn record_id(&self) -> i64 {
        self.id
    }
}

/// Fixed snapshot of projects and users, kept in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    pub projects: Vec<ProjectRecord>,
    pub users: Vec<UserRecord>,
}

impl InMemoryDirectory {
    pub fn new(projects: Vec<ProjectRecord>, users: Vec<UserRecord>) -> Self {
        Self { projects, users }
    }
}

impl ProjectDirectory for InMemoryDirectory {
    type Error = Infallible;

    async fn list_open_projects(&self) -> Result<Vec<ProjectRecord>, Self::Error> {
        Ok(self.projects.clone())
    }
}

impl UserDirectory for InMemoryDirectory {
    type Error = Infallible;

    async fn list_users_with_skills(&self) -> Result<Vec<UserRecord>, Self::Error> {
        Ok(self.users.clone())
    }
}
