//! Storage accessor: the single seam between handlers/seeding and the database.
//!
//! `AppState` holds an `Arc<dyn PortfolioStore>`. The production backend is
//! `PgPortfolioStore`; tests run against an in-memory store.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::portfolio::{
    Education, Experience, NewEducation, NewExperience, NewProfile, NewProject, NewSkill,
    Profile, Project, Skill,
};

#[derive(Debug, Error)]
pub enum StoreError {
    /// The singleton constraint rejected a second profile row.
    #[error("a profile already exists")]
    ProfileExists,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Read and create operations for every portfolio entity.
///
/// List operations return rows ordered by id. Create operations return the
/// record as persisted, including its assigned id. There is no update or
/// delete: records are append-only.
#[async_trait]
pub trait PortfolioStore: Send + Sync {
    /// Returns the first profile row, or `None` on an empty database.
    async fn get_profile(&self) -> Result<Option<Profile>, StoreError>;

    async fn list_experiences(&self) -> Result<Vec<Experience>, StoreError>;

    async fn list_education(&self) -> Result<Vec<Education>, StoreError>;

    async fn list_skills(&self) -> Result<Vec<Skill>, StoreError>;

    async fn list_projects(&self) -> Result<Vec<Project>, StoreError>;

    /// Fails with `StoreError::ProfileExists` if a profile is already stored.
    async fn create_profile(&self, profile: &NewProfile) -> Result<Profile, StoreError>;

    async fn create_experience(&self, experience: &NewExperience)
        -> Result<Experience, StoreError>;

    async fn create_education(&self, education: &NewEducation) -> Result<Education, StoreError>;

    async fn create_skill(&self, skill: &NewSkill) -> Result<Skill, StoreError>;

    async fn create_project(&self, project: &NewProject) -> Result<Project, StoreError>;
}
