use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/habits", post(handlers::create_habit))
        .route("/habits/new", get(handlers::new_habit))
        .route("/habits/:id", get(handlers::habit_page))
        .route(
            "/habits/:id/edit",
            get(handlers::edit_page).post(handlers::update_habit),
        )
        .route("/habits/:id/delete", post(handlers::delete_habit))
        .route("/habits/:id/track", post(handlers::track_habit))
        .route("/habits/:id/untrack", post(handlers::untrack_habit))
        .route(
            "/api/habits",
            get(handlers::api_list).post(handlers::api_create),
        )
        .route(
            "/api/habits/:id",
            get(handlers::api_get)
                .patch(handlers::api_update)
                .delete(handlers::api_delete),
        )
        .route("/api/habits/:id/stats", get(handlers::api_stats))
        .route("/api/habits/:id/heatmap", get(handlers::api_heatmap))
        .route("/api/habits/:id/track", post(handlers::api_track))
        .route("/api/habits/:id/untrack", post(handlers::api_untrack))
        .route("/api/preview", get(handlers::api_preview))
        .with_state(state)
}
