pub mod cors;
pub mod health;

use axum::{
    handler::Handler,
    routing::{get, MethodRouter},
    Router,
};

use crate::errors::AppError;
use crate::portfolio::handlers;
use crate::routes::cors::CorsPolicy;
use crate::state::AppState;

async fn method_not_allowed() -> Result<(), AppError> {
    Err(AppError::MethodNotAllowed)
}

/// GET (and HEAD) to `handler`, anything else 405. OPTIONS never reaches the
/// method router: the CORS layer answers it with an empty 200.
fn read_only<H, T>(handler: H) -> MethodRouter<AppState>
where
    H: Handler<T, AppState>,
    T: 'static,
{
    get(handler).fallback(method_not_allowed)
}

pub fn build_router(state: AppState, cors: &CorsPolicy) -> Router {
    let api = Router::new()
        .route("/profile", read_only(handlers::handle_get_profile))
        .route("/experiences", read_only(handlers::handle_list_experiences))
        .route("/education", read_only(handlers::handle_list_education))
        .route("/projects", read_only(handlers::handle_list_projects))
        .route("/skills", read_only(handlers::handle_list_skills));
    let api = cors.apply(api);

    Router::new()
        .route("/health", get(health::health_handler))
        .nest("/api", api)
        .with_state(state)
}
