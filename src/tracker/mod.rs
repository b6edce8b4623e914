//! The flat CRUD surfaces: owned records with a status enum and some
//! nested JSONB, no cross-entity invariants beyond foreign keys.

use crate::state::AppState;
use axum::Router;

pub mod companies;
pub mod forum;
pub mod interviews;
pub mod mentorship;
pub mod projects;
pub mod resources;
pub mod resumes;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(projects::routes())
        .merge(companies::routes())
        .merge(resumes::routes())
        .merge(interviews::routes())
        .merge(resources::routes())
        .merge(mentorship::routes())
        .merge(forum::routes())
}
