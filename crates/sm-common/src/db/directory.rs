//! Read-only Postgres implementation of the project and user directories.
//!
//! Expected tables:
//! - `projects (id BIGINT, status TEXT)`
//! - `project_skills (id BIGINT, project_id BIGINT, name TEXT, level TEXT, years_of_experience DOUBLE PRECISION)`
//! - `users (id BIGINT)`
//! - `user_skills (id BIGINT, user_id BIGINT, name TEXT, level TEXT, years_of_experience DOUBLE PRECISION)`
//!
//! `level` is read as text and validated by the matching engine, so a bad value
//! skips one record instead of failing the query.

use deadpool_postgres::PoolError;
use tokio_postgres::{Error as PgError, Row};
use tracing::instrument;

use super::{util::timed_query_cached, PgPool};
use crate::{
    directory::{ProjectDirectory, UserDirectory},
    ProjectRecord, SkillRecord, UserRecord,
};

const OPEN_PROJECTS_QUERY: &str = "SELECT \
        p.id AS owner_id, \
        s.name, \
        s.level, \
        s.years_of_experience \
    FROM projects p \
    LEFT JOIN project_skills s ON s.project_id = p.id \
    WHERE p.status = 'open' \
    ORDER BY p.id, s.id";

const USERS_WITH_SKILLS_QUERY: &str = "SELECT \
        u.id AS owner_id, \
        s.name, \
        s.level, \
        s.years_of_experience \
    FROM users u \
    LEFT JOIN user_skills s ON s.user_id = u.id \
    ORDER BY u.id, s.id";

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("failed to get postgres connection: {0}")]
    Pool(#[from] PoolError),
    #[error("postgres error: {0}")]
    Postgres(#[from] PgError),
    #[error("failed to map skill row: {0}")]
    Mapping(String),
}

#[derive(Clone)]
pub struct PgDirectory {
    pool: PgPool,
}

impl PgDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_grouped(
        &self,
        query: &str,
        label: &str,
    ) -> Result<Vec<(i64, Vec<SkillRecord>)>, DirectoryError> {
        let client = self.pool.get().await?;
        let rows = timed_query_cached(&client, query, &[], label).await?;
        let rows = rows
            .iter()
            .map(SkillRow::from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(group_skill_rows(rows))
    }
}

impl ProjectDirectory for PgDirectory {
    type Error = DirectoryError;

    #[instrument(skip(self))]
    async fn list_open_projects(&self) -> Result<Vec<ProjectRecord>, Self::Error> {
        let grouped = self
            .fetch_grouped(OPEN_PROJECTS_QUERY, "list_open_projects")
            .await?;

        Ok(grouped
            .into_iter()
            .map(|(id, required_skills)| ProjectRecord {
                id,
                required_skills,
            })
            .collect())
    }
}

impl UserDirectory for PgDirectory {
    type Error = DirectoryError;

    #[instrument(skip(self))]
    async fn list_users_with_skills(&self) -> Result<Vec<UserRecord>, Self::Error> {
        let grouped = self
            .fetch_grouped(USERS_WITH_SKILLS_QUERY, "list_users_with_skills")
            .await?;

        Ok(grouped
            .into_iter()
            .map(|(id, skills)| UserRecord { id, skills })
            .collect())
    }
}

/// One row of an owner LEFT JOIN skills query. Skill columns are NULL when the
/// owner has no skills.
#[derive(Debug, Clone, PartialEq)]
struct SkillRow {
    owner_id: i64,
    name: Option<String>,
    level: Option<String>,
    years_of_experience: Option<f64>,
}

impl SkillRow {
    fn from_row(row: &Row) -> Result<Self, DirectoryError> {
        let mapping = |err: PgError| DirectoryError::Mapping(err.to_string());

        Ok(Self {
            owner_id: row.try_get("owner_id").map_err(mapping)?,
            name: row.try_get("name").map_err(mapping)?,
            level: row.try_get("level").map_err(mapping)?,
            years_of_experience: row.try_get("years_of_experience").map_err(mapping)?,
        })
    }

    fn into_skill(self) -> Option<SkillRecord> {
        let name = self.name?;
        Some(SkillRecord {
            name,
            level: self.level.unwrap_or_default(),
            // NULL years become NaN and are rejected during validation
            years_of_experience: self.years_of_experience.unwrap_or(f64::NAN),
        })
    }
}

/// Fold rows ordered by owner id into one skill list per owner, keeping the
/// owners in query order.
fn group_skill_rows(rows: Vec<SkillRow>) -> Vec<(i64, Vec<SkillRecord>)> {
    let mut grouped: Vec<(i64, Vec<SkillRecord>)> = Vec::new();

    for row in rows {
        let owner_id = row.owner_id;
        let skill = row.into_skill();

        match grouped.last_mut() {
            Some((last_id, skills)) if *last_id == owner_id => skills.extend(skill),
            _ => grouped.push((owner_id, skill.into_iter().collect())),
        }
    }

    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Project, ValidationError};

    fn row(owner_id: i64, skill: Option<(&str, &str, f64)>) -> SkillRow {
        SkillRow {
            owner_id,
            name: skill.map(|(name, _, _)| name.to_string()),
            level: skill.map(|(_, level, _)| level.to_string()),
            years_of_experience: skill.map(|(_, _, years)| years),
        }
    }

    #[test]
    fn groups_rows_per_owner_in_order() {
        let grouped = group_skill_rows(vec![
            row(3, Some(("Rust", "EXPERT", 4.0))),
            row(3, Some(("SQL", "BEGINNER", 1.0))),
            row(7, None),
            row(9, Some(("React", "ADVANCED", 2.0))),
        ]);

        assert_eq!(grouped.len(), 3);
        assert_eq!(grouped[0].0, 3);
        assert_eq!(grouped[0].1.len(), 2);
        assert_eq!(grouped[0].1[1].name, "SQL");
        assert_eq!(grouped[1], (7, vec![]));
        assert_eq!(grouped[2].1[0].level, "ADVANCED");
    }

    #[test]
    fn null_skill_columns_become_invalid_records() {
        let grouped = group_skill_rows(vec![SkillRow {
            owner_id: 1,
            name: Some("Go".into()),
            level: None,
            years_of_experience: None,
        }]);

        let record = ProjectRecord {
            id: grouped[0].0,
            required_skills: grouped[0].1.clone(),
        };
        let err = Project::try_from(record).unwrap_err();
        assert_eq!(err, ValidationError::UnknownProficiency(String::new()));
    }

    #[test]
    fn empty_result_set_yields_no_owners() {
        assert!(group_skill_rows(vec![]).is_empty());
    }
}
