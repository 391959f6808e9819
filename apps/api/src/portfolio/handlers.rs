use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::models::portfolio::{Education, Experience, Profile, Project, Skill};
use crate::state::AppState;

/// GET /api/profile
pub async fn handle_get_profile(State(state): State<AppState>) -> Result<Json<Profile>, AppError> {
    let profile = state
        .store
        .get_profile()
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;
    Ok(Json(profile))
}

/// GET /api/experiences
pub async fn handle_list_experiences(
    State(state): State<AppState>,
) -> Result<Json<Vec<Experience>>, AppError> {
    Ok(Json(state.store.list_experiences().await?))
}

/// GET /api/education
pub async fn handle_list_education(
    State(state): State<AppState>,
) -> Result<Json<Vec<Education>>, AppError> {
    Ok(Json(state.store.list_education().await?))
}

/// GET /api/projects
pub async fn handle_list_projects(
    State(state): State<AppState>,
) -> Result<Json<Vec<Project>>, AppError> {
    Ok(Json(state.store.list_projects().await?))
}

/// GET /api/skills
pub async fn handle_list_skills(
    State(state): State<AppState>,
) -> Result<Json<Vec<Skill>>, AppError> {
    Ok(Json(state.store.list_skills().await?))
}
