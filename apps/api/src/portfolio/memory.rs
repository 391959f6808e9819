//! In-memory `PortfolioStore` used by router and seed tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::models::portfolio::{
    Education, Experience, NewEducation, NewExperience, NewProfile, NewProject, NewSkill,
    Profile, Project, Skill,
};
use crate::portfolio::store::{PortfolioStore, StoreError};

#[derive(Default)]
struct Tables {
    next_id: i32,
    profiles: Vec<Profile>,
    experiences: Vec<Experience>,
    education: Vec<Education>,
    skills: Vec<Skill>,
    projects: Vec<Project>,
}

impl Tables {
    fn assign_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    failing: bool,
    /// Inserted right after the first empty profile check, as a concurrently
    /// starting instance would.
    racing_profile: Mutex<Option<NewProfile>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every operation fails like an unreachable database.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn profile_count(&self) -> usize {
        self.tables.lock().expect("store lock poisoned").profiles.len()
    }

    /// A store where another writer inserts `profile` between the caller's
    /// existence check and its own insert.
    pub fn racing(profile: NewProfile) -> Self {
        Self {
            racing_profile: Mutex::new(Some(profile)),
            ..Self::default()
        }
    }

    fn with_tables<T>(&self, f: impl FnOnce(&mut Tables) -> T) -> Result<T, StoreError> {
        if self.failing {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        let mut tables = self.tables.lock().expect("store lock poisoned");
        Ok(f(&mut tables))
    }
}

fn insert_profile(tables: &mut Tables, profile: &NewProfile) -> Profile {
    let record = Profile {
        id: tables.assign_id(),
        name: profile.name.clone(),
        headline: profile.headline.clone(),
        about: profile.about.clone(),
        location: profile.location.clone(),
        social_links: profile.social_links.clone(),
    };
    tables.profiles.push(record.clone());
    record
}

#[async_trait]
impl PortfolioStore for MemoryStore {
    async fn get_profile(&self) -> Result<Option<Profile>, StoreError> {
        let seen = self.with_tables(|t| t.profiles.first().cloned())?;
        if seen.is_none() {
            let racing = self.racing_profile.lock().expect("store lock poisoned").take();
            if let Some(profile) = racing {
                self.with_tables(|t| insert_profile(t, &profile))?;
            }
        }
        Ok(seen)
    }

    async fn list_experiences(&self) -> Result<Vec<Experience>, StoreError> {
        self.with_tables(|t| t.experiences.clone())
    }

    async fn list_education(&self) -> Result<Vec<Education>, StoreError> {
        self.with_tables(|t| t.education.clone())
    }

    async fn list_skills(&self) -> Result<Vec<Skill>, StoreError> {
        self.with_tables(|t| t.skills.clone())
    }

    async fn list_projects(&self) -> Result<Vec<Project>, StoreError> {
        self.with_tables(|t| t.projects.clone())
    }

    async fn create_profile(&self, profile: &NewProfile) -> Result<Profile, StoreError> {
        self.with_tables(|t| {
            if !t.profiles.is_empty() {
                return Err(StoreError::ProfileExists);
            }
            Ok(insert_profile(t, profile))
        })?
    }

    async fn create_experience(
        &self,
        experience: &NewExperience,
    ) -> Result<Experience, StoreError> {
        self.with_tables(|t| {
            let record = Experience {
                id: t.assign_id(),
                title: experience.title.clone(),
                company: experience.company.clone(),
                duration: experience.duration.clone(),
                location: experience.location.clone(),
                description: experience.description.clone(),
                skills: experience.skills.clone(),
            };
            t.experiences.push(record.clone());
            record
        })
    }

    async fn create_education(&self, education: &NewEducation) -> Result<Education, StoreError> {
        self.with_tables(|t| {
            let record = Education {
                id: t.assign_id(),
                school: education.school.clone(),
                degree: education.degree.clone(),
                duration: education.duration.clone(),
                description: education.description.clone(),
            };
            t.education.push(record.clone());
            record
        })
    }

    async fn create_skill(&self, skill: &NewSkill) -> Result<Skill, StoreError> {
        self.with_tables(|t| {
            let record = Skill {
                id: t.assign_id(),
                category: skill.category.clone(),
                items: skill.items.clone(),
            };
            t.skills.push(record.clone());
            record
        })
    }

    async fn create_project(&self, project: &NewProject) -> Result<Project, StoreError> {
        self.with_tables(|t| {
            let record = Project {
                id: t.assign_id(),
                title: project.title.clone(),
                description: project.description.clone(),
                tech_stack: project.tech_stack.clone(),
                github_link: project.github_link.clone(),
                link: project.link.clone(),
            };
            t.projects.push(record.clone());
            record
        })
    }
}
