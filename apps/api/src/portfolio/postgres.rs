use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{PgPool, Row};

use crate::models::portfolio::{
    Education, Experience, NewEducation, NewExperience, NewProfile, NewProject, NewSkill,
    Profile, Project, Skill, SocialLinks,
};
use crate::portfolio::store::{PortfolioStore, StoreError};

const PROFILE_COLUMNS: &str = "id, name, headline, about, location, social_links";
const EXPERIENCE_COLUMNS: &str = "id, title, company, duration, location, description, skills";
const EDUCATION_COLUMNS: &str = "id, school, degree, duration, description";
const SKILL_COLUMNS: &str = "id, category, items";
const PROJECT_COLUMNS: &str = "id, title, description, tech_stack, github_link, link";

/// `PortfolioStore` backed by a shared PostgreSQL pool.
#[derive(Clone)]
pub struct PgPortfolioStore {
    pool: PgPool,
}

impl PgPortfolioStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_profile(row: PgRow) -> Result<Profile, sqlx::Error> {
        let Json(social_links): Json<SocialLinks> = row.try_get("social_links")?;
        Ok(Profile {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            headline: row.try_get("headline")?,
            about: row.try_get("about")?,
            location: row.try_get("location")?,
            social_links,
        })
    }
}

/// Maps a unique violation on the profile singleton column to `ProfileExists`.
fn profile_insert_error(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => StoreError::ProfileExists,
        other => StoreError::Database(other),
    }
}

#[async_trait]
impl PortfolioStore for PgPortfolioStore {
    async fn get_profile(&self) -> Result<Option<Profile>, StoreError> {
        let row = sqlx::query(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profile ORDER BY id LIMIT 1"
        ))
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Self::row_to_profile).transpose()?)
    }

    async fn list_experiences(&self) -> Result<Vec<Experience>, StoreError> {
        Ok(sqlx::query_as::<_, Experience>(&format!(
            "SELECT {EXPERIENCE_COLUMNS} FROM experiences ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?)
    }

    async fn list_education(&self) -> Result<Vec<Education>, StoreError> {
        Ok(sqlx::query_as::<_, Education>(&format!(
            "SELECT {EDUCATION_COLUMNS} FROM education ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?)
    }

    async fn list_skills(&self) -> Result<Vec<Skill>, StoreError> {
        Ok(sqlx::query_as::<_, Skill>(&format!(
            "SELECT {SKILL_COLUMNS} FROM skills ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?)
    }

    async fn list_projects(&self) -> Result<Vec<Project>, StoreError> {
        Ok(sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?)
    }

    async fn create_profile(&self, profile: &NewProfile) -> Result<Profile, StoreError> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO profile (name, headline, about, location, social_links)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {PROFILE_COLUMNS}
            "#
        ))
        .bind(&profile.name)
        .bind(&profile.headline)
        .bind(&profile.about)
        .bind(&profile.location)
        .bind(Json(&profile.social_links))
        .fetch_one(&self.pool)
        .await
        .map_err(profile_insert_error)?;

        Ok(Self::row_to_profile(row)?)
    }

    async fn create_experience(
        &self,
        experience: &NewExperience,
    ) -> Result<Experience, StoreError> {
        Ok(sqlx::query_as::<_, Experience>(&format!(
            r#"
            INSERT INTO experiences (title, company, duration, location, description, skills)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {EXPERIENCE_COLUMNS}
            "#
        ))
        .bind(&experience.title)
        .bind(&experience.company)
        .bind(&experience.duration)
        .bind(&experience.location)
        .bind(&experience.description)
        .bind(&experience.skills)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn create_education(&self, education: &NewEducation) -> Result<Education, StoreError> {
        Ok(sqlx::query_as::<_, Education>(&format!(
            r#"
            INSERT INTO education (school, degree, duration, description)
            VALUES ($1, $2, $3, $4)
            RETURNING {EDUCATION_COLUMNS}
            "#
        ))
        .bind(&education.school)
        .bind(&education.degree)
        .bind(&education.duration)
        .bind(&education.description)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn create_skill(&self, skill: &NewSkill) -> Result<Skill, StoreError> {
        Ok(sqlx::query_as::<_, Skill>(&format!(
            "INSERT INTO skills (category, items) VALUES ($1, $2) RETURNING {SKILL_COLUMNS}"
        ))
        .bind(&skill.category)
        .bind(&skill.items)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn create_project(&self, project: &NewProject) -> Result<Project, StoreError> {
        Ok(sqlx::query_as::<_, Project>(&format!(
            r#"
            INSERT INTO projects (title, description, tech_stack, github_link, link)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {PROJECT_COLUMNS}
            "#
        ))
        .bind(&project.title)
        .bind(&project.description)
        .bind(&project.tech_stack)
        .bind(&project.github_link)
        .bind(&project.link)
        .fetch_one(&self.pool)
        .await?)
    }
}
