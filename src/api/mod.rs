use axum::Json;
use axum::extract::Path;
use axum::routing::{delete, post};
use axum::{Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;

use crate::error::AppError;
use crate::models::{Student, StudentFields};
use crate::notify::Notification;
use crate::services::{Draft, DraftMode, MutationOutcome, RosterViewModel};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DraftView {
    pub mode: DraftMode,
    pub fields: StudentFields,
}

impl From<&Draft> for DraftView {
    fn from(draft: &Draft) -> Self {
        Self {
            mode: draft.mode(),
            fields: draft.fields.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RosterView {
    pub students: Vec<Student>,
    pub draft: DraftView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<MutationOutcome>,
    pub notifications: Vec<Notification>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/roster", get(show_roster))
        .route("/roster/reload", post(reload_roster))
        .route("/students/{id}", get(show_student).delete(remove_student))
        .route("/draft", delete(reset_draft).put(fill_draft))
        .route("/draft/edit/{id}", post(begin_edit))
        .route("/draft/submit", post(submit_draft))
        .with_state(state)
}

fn render(state: &AppState, vm: &RosterViewModel, outcome: Option<MutationOutcome>) -> Json<RosterView> {
    Json(RosterView {
        students: vm.roster().to_vec(),
        draft: DraftView::from(vm.draft()),
        outcome,
        notifications: state.notifications.drain(),
    })
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    sqlx::query("select 1").execute(&state.db).await?;
    Ok(StatusCode::OK)
}

async fn show_roster(State(state): State<AppState>) -> Json<RosterView> {
    let vm = state.roster.lock().await;
    render(&state, &vm, None)
}

async fn reload_roster(State(state): State<AppState>) -> Result<Json<RosterView>, AppError> {
    let mut vm = state.roster.lock().await;
    vm.load_roster().await?;
    Ok(render(&state, &vm, None))
}

async fn show_student(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Student>, AppError> {
    let store = state.roster.lock().await.store().clone();
    let student = store.find_by_id(id).await?.ok_or(AppError::NotFound)?;
    Ok(Json(student))
}

async fn remove_student(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Json<RosterView> {
    let mut vm = state.roster.lock().await;
    let outcome = vm.remove_student(id).await;
    render(&state, &vm, Some(outcome))
}

async fn reset_draft(State(state): State<AppState>) -> Json<RosterView> {
    let mut vm = state.roster.lock().await;
    vm.reset_draft();
    render(&state, &vm, None)
}

async fn fill_draft(
    State(state): State<AppState>,
    Json(fields): Json<StudentFields>,
) -> Json<RosterView> {
    let mut vm = state.roster.lock().await;
    vm.fill_draft(fields);
    render(&state, &vm, None)
}

async fn begin_edit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<RosterView>, AppError> {
    let mut vm = state.roster.lock().await;
    vm.begin_edit_by_id(id)?;
    Ok(render(&state, &vm, None))
}

async fn submit_draft(State(state): State<AppState>) -> Json<RosterView> {
    let mut vm = state.roster.lock().await;
    let outcome = vm.submit().await;
    render(&state, &vm, Some(outcome))
}
