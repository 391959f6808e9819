//! Seed routine. Populates an empty database with the portfolio dataset.
//!
//! The dataset is data, not code: `seed/portfolio.json` is embedded at build
//! time and can be replaced at runtime with `SEED_PATH`. Seeding is guarded by
//! the profile singleton: if a profile exists the routine does nothing.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tracing::{info, warn};

use crate::models::portfolio::{NewEducation, NewExperience, NewProfile, NewProject, NewSkill};
use crate::portfolio::store::{PortfolioStore, StoreError};

const EMBEDDED_SEED: &str = include_str!("../../seed/portfolio.json");

/// The only dataset layout this build understands.
pub const SEED_FORMAT_VERSION: u32 = 1;

/// A complete portfolio dataset, inserted in field order.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedData {
    pub version: u32,
    pub profile: NewProfile,
    #[serde(default)]
    pub experiences: Vec<NewExperience>,
    #[serde(default)]
    pub education: Vec<NewEducation>,
    #[serde(default)]
    pub skills: Vec<NewSkill>,
    #[serde(default)]
    pub projects: Vec<NewProject>,
}

impl SeedData {
    /// The dataset compiled into the binary.
    pub fn embedded() -> Result<Self> {
        Self::parse(EMBEDDED_SEED).context("embedded seed dataset is invalid")
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read seed file {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("invalid seed file {}", path.display()))
    }

    /// Loads `path` if given, otherwise the embedded dataset.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_path(path),
            None => Self::embedded(),
        }
    }

    fn parse(raw: &str) -> Result<Self> {
        let data: SeedData = serde_json::from_str(raw)?;
        data.validate()?;
        Ok(data)
    }

    fn validate(&self) -> Result<()> {
        if self.version != SEED_FORMAT_VERSION {
            bail!(
                "unsupported seed format version {} (expected {SEED_FORMAT_VERSION})",
                self.version
            );
        }
        if self.profile.name.trim().is_empty() {
            bail!("profile name must not be empty");
        }
        if let Some(exp) = self.experiences.iter().find(|e| e.skills.is_empty()) {
            bail!("experience '{}' at {} has no skills", exp.title, exp.company);
        }
        if let Some(group) = self.skills.iter().find(|s| s.items.is_empty()) {
            bail!("skill group '{}' has no items", group.category);
        }
        Ok(())
    }
}

/// Rows inserted by one seeding run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub profiles: usize,
    pub experiences: usize,
    pub education: usize,
    pub skills: usize,
    pub projects: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    AlreadySeeded,
    Seeded(SeedSummary),
}

/// Inserts `data` unless a profile already exists.
///
/// Order: profile, experiences, education, skills, projects. A profile insert
/// rejected by the singleton constraint (another instance won the race) is
/// treated as already seeded.
pub async fn seed_if_empty(
    store: &dyn PortfolioStore,
    data: &SeedData,
) -> Result<SeedOutcome, StoreError> {
    if store.get_profile().await?.is_some() {
        info!("Profile present, skipping seed");
        return Ok(SeedOutcome::AlreadySeeded);
    }

    info!("Seeding database...");

    match store.create_profile(&data.profile).await {
        Ok(_) => {}
        Err(StoreError::ProfileExists) => {
            warn!("Profile was created concurrently, skipping seed");
            return Ok(SeedOutcome::AlreadySeeded);
        }
        Err(e) => return Err(e),
    }

    let mut summary = SeedSummary {
        profiles: 1,
        ..SeedSummary::default()
    };

    for experience in &data.experiences {
        store.create_experience(experience).await?;
        summary.experiences += 1;
    }
    for education in &data.education {
        store.create_education(education).await?;
        summary.education += 1;
    }
    for skill in &data.skills {
        store.create_skill(skill).await?;
        summary.skills += 1;
    }
    for project in &data.projects {
        store.create_project(project).await?;
        summary.projects += 1;
    }

    info!(
        profiles = summary.profiles,
        experiences = summary.experiences,
        education = summary.education,
        skills = summary.skills,
        projects = summary.projects,
        "Seeding complete"
    );
    Ok(SeedOutcome::Seeded(summary))
}
