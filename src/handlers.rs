use crate::client::ClientError;
use crate::errors::AppError;
use crate::forms::{
    CreateHabitRequest, EditForm, HabitForm, Toast, ToastQuery, TrackForm, TrackRequestBody,
    UpdateHabitRequest, WindowQuery, random_color,
};
use crate::heatmap::grid::Window;
use crate::heatmap::{HeatmapView, build_view};
use crate::models::{ExtendedHabit, Habit, date_key, parse_date_key};
use crate::sample::is_preview_id;
use crate::state::AppState;
use crate::ui::{render_edit_form, render_habit_page, render_index, render_new_form};
use axum::{
    Form, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use chrono::{Local, NaiveDate};
use tracing::{info, warn};

pub async fn index(State(state): State<AppState>, Query(query): Query<ToastQuery>) -> Html<String> {
    let mut toast = query.toast();
    let habits = match state.extended_habits().await {
        Ok(habits) => habits,
        Err(err) => {
            warn!("failed to load habits: {err}");
            toast = Some(toast_for(&err));
            Vec::new()
        }
    };
    Html(render_index(
        &habits,
        today(),
        toast,
        state.client.is_authenticated(),
    ))
}

pub async fn new_habit(
    State(state): State<AppState>,
    Query(mut form): Query<HabitForm>,
    Query(query): Query<ToastQuery>,
) -> Result<Html<String>, AppError> {
    if form.color.trim().is_empty() {
        form.color = random_color().hex().to_string();
    }
    let view = preview_view(&state, &form)?;
    Ok(Html(render_new_form(&form, &view, query.toast())))
}

pub async fn create_habit(
    State(state): State<AppState>,
    Form(form): Form<HabitForm>,
) -> Result<Response, AppError> {
    let new_habit = match form.validate() {
        Ok(new_habit) => new_habit,
        Err(toast) => {
            let view = preview_view(&state, &form)?;
            let page = render_new_form(&form, &view, Some(toast));
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(page)).into_response());
        }
    };

    let habit = match state.client.create(&new_habit.payload).await {
        Ok(habit) => habit,
        Err(err) => {
            warn!("failed to create habit: {err}");
            return Ok(Redirect::to(&toast_for(&err).redirect_to("/habits/new")).into_response());
        }
    };
    state.invalidate().await;
    state
        .update_preferences(&habit.id, habit.kind, new_habit.overlay)
        .await?;
    info!(id = %habit.id, "habit created");

    Ok(Redirect::to(&Toast::Created.redirect_to("/")).into_response())
}

pub async fn habit_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(window): Query<WindowQuery>,
    Query(query): Query<ToastQuery>,
) -> Result<Html<String>, AppError> {
    let extended = load_extended(&state, &id).await?;
    let window = parse_window(&window);
    let view = build_view(&extended, window, today(), state.theme)?;
    Ok(Html(render_habit_page(&extended, &view, window, query.toast())))
}

pub async fn edit_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ToastQuery>,
) -> Result<Html<String>, AppError> {
    let extended = load_extended(&state, &id).await?;
    Ok(Html(render_edit_form(&extended, query.toast())))
}

pub async fn update_habit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<EditForm>,
) -> Result<Redirect, AppError> {
    reject_preview(&id)?;
    let edit_path = format!("/habits/{id}/edit");
    let (update, changes) = match form.validate() {
        Ok(valid) => valid,
        Err(toast) => return Ok(Redirect::to(&toast.redirect_to(&edit_path))),
    };

    let habit = match state.client.update(&id, &update).await {
        Ok(habit) => habit,
        Err(err) => {
            warn!(%id, "failed to update habit: {err}");
            return Ok(Redirect::to(&toast_for(&err).redirect_to(&edit_path)));
        }
    };
    state.invalidate().await;
    state.update_preferences(&id, habit.kind, changes).await?;
    info!(%id, "habit updated");

    Ok(Redirect::to(&Toast::Updated.redirect_to(&format!("/habits/{id}"))))
}

pub async fn delete_habit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    reject_preview(&id)?;
    if let Err(err) = state.client.delete(&id).await {
        warn!(%id, "failed to delete habit: {err}");
        return Ok(Redirect::to(&toast_for(&err).redirect_to("/")));
    }
    state.invalidate().await;
    state.clear_preferences(&id).await?;
    info!(%id, "habit deleted");

    Ok(Redirect::to(&Toast::Deleted.redirect_to("/")))
}

pub async fn track_habit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<TrackForm>,
) -> Result<Redirect, AppError> {
    track_form(&state, &id, &form.date, true).await
}

pub async fn untrack_habit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<TrackForm>,
) -> Result<Redirect, AppError> {
    track_form(&state, &id, &form.date, false).await
}

async fn track_form(
    state: &AppState,
    id: &str,
    date: &str,
    track: bool,
) -> Result<Redirect, AppError> {
    reject_preview(id)?;
    let Some(date) = normalize_date(date) else {
        return Ok(Redirect::to(&Toast::InvalidDate.redirect_to("/")));
    };
    if let Err(err) = apply_tracking(state, id, &date, track).await {
        warn!(%id, %date, "failed to change tracking: {err}");
        return Ok(Redirect::to(&toast_for(&err).redirect_to("/")));
    }
    Ok(Redirect::to("/"))
}

pub async fn api_list(State(state): State<AppState>) -> Result<Json<Vec<ExtendedHabit>>, AppError> {
    Ok(Json(state.extended_habits().await?))
}

pub async fn api_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ExtendedHabit>, AppError> {
    Ok(Json(load_extended(&state, &id).await?))
}

pub async fn api_stats(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    reject_preview(&id)?;
    Ok(Json(state.client.get_stats(&id).await?))
}

pub async fn api_heatmap(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(window): Query<WindowQuery>,
) -> Result<Json<HeatmapView>, AppError> {
    let extended = load_extended(&state, &id).await?;
    let view = build_view(&extended, parse_window(&window), today(), state.theme)?;
    Ok(Json(view))
}

pub async fn api_preview(
    State(state): State<AppState>,
    Query(form): Query<HabitForm>,
) -> Result<Json<HeatmapView>, AppError> {
    Ok(Json(preview_view(&state, &form)?))
}

pub async fn api_create(
    State(state): State<AppState>,
    Json(payload): Json<CreateHabitRequest>,
) -> Result<(StatusCode, Json<ExtendedHabit>), AppError> {
    let new_habit = payload.validate()?;
    let habit = state.client.create(&new_habit.payload).await?;
    state.invalidate().await;
    state
        .update_preferences(&habit.id, habit.kind, new_habit.overlay)
        .await?;
    info!(id = %habit.id, "habit created");

    Ok((StatusCode::CREATED, Json(state.extend(habit).await)))
}

pub async fn api_update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateHabitRequest>,
) -> Result<Json<ExtendedHabit>, AppError> {
    reject_preview(&id)?;
    let (update, changes) = payload.validate()?;
    let habit: Habit = if update.name.is_none() && update.color.is_none() {
        state.client.get(&id).await?
    } else {
        state.client.update(&id, &update).await?
    };
    state.invalidate().await;
    state.update_preferences(&id, habit.kind, changes).await?;
    info!(%id, "habit updated");

    Ok(Json(state.extend(habit).await))
}

pub async fn api_delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    reject_preview(&id)?;
    state.client.delete(&id).await?;
    state.invalidate().await;
    state.clear_preferences(&id).await?;
    info!(%id, "habit deleted");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn api_track(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<TrackRequestBody>,
) -> Result<Json<ExtendedHabit>, AppError> {
    api_tracking(&state, &id, &body.date, true).await
}

pub async fn api_untrack(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<TrackRequestBody>,
) -> Result<Json<ExtendedHabit>, AppError> {
    api_tracking(&state, &id, &body.date, false).await
}

async fn api_tracking(
    state: &AppState,
    id: &str,
    date: &str,
    track: bool,
) -> Result<Json<ExtendedHabit>, AppError> {
    reject_preview(id)?;
    let date = normalize_date(date).ok_or(Toast::InvalidDate)?;
    let habit = apply_tracking(state, id, &date, track).await?;
    Ok(Json(state.extend(habit).await))
}

async fn apply_tracking(
    state: &AppState,
    id: &str,
    date: &str,
    track: bool,
) -> Result<Habit, ClientError> {
    let result = if track {
        state.client.track(id, date).await
    } else {
        state.client.untrack(id, date).await
    };
    state.invalidate().await;
    result
}

async fn load_extended(state: &AppState, id: &str) -> Result<ExtendedHabit, AppError> {
    if is_preview_id(id) {
        return Err(AppError::not_found("preview habits are not stored"));
    }
    Ok(state.extended_habit(id).await?)
}

fn preview_view(state: &AppState, form: &HabitForm) -> Result<HeatmapView, AppError> {
    let preview = form.preview();
    Ok(build_view(&preview, Window::default(), today(), state.theme)?)
}

fn reject_preview(id: &str) -> Result<(), AppError> {
    if is_preview_id(id) {
        return Err(AppError::bad_request("preview habits cannot be modified"));
    }
    Ok(())
}

fn parse_window(query: &WindowQuery) -> Window {
    query
        .window
        .as_deref()
        .and_then(Window::parse)
        .unwrap_or_default()
}

/// Accepts `YYYY-MM-DD` only and returns it in canonical form.
fn normalize_date(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.len() != 10 {
        return None;
    }
    parse_date_key(raw).map(date_key)
}

fn toast_for(err: &ClientError) -> Toast {
    match err {
        ClientError::NotAuthenticated => Toast::NotAuthenticated,
        ClientError::Status { .. } | ClientError::Http(_) => Toast::ServiceError,
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
