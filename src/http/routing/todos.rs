use axum::extract::{rejection::{JsonRejection, PathRejection}, Path, State};
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};

use crate::application::todo_service::TodoService;
use crate::domain::todo::{CreateTodo, TodoId, TodoItem, UpdateTodo};
use crate::http::types::ApiError;

#[derive(Clone)]
pub struct AppState<S: TodoService> { pub service: S }

pub fn router<S: TodoService + Clone + Send + Sync + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route("/api/todos", get(list_todos::<S>).post(create_todo::<S>))
        .route(
            "/api/todos/:id",
            get(get_todo::<S>).patch(toggle_todo::<S>).put(update_todo::<S>).delete(delete_todo::<S>),
        )
        .with_state(state)
}

type ApiResult<T> = Result<T, ApiError>;

async fn list_todos<S: TodoService>(State(state): State<AppState<S>>) -> Json<Vec<TodoItem>> {
    Json(state.service.list().await)
}

async fn create_todo<S: TodoService>(
    State(state): State<AppState<S>>,
    payload: Result<Json<CreateTodo>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<TodoItem>)> {
    let Json(input) = payload?;
    let todo = state.service.create(input).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn get_todo<S: TodoService>(State(state): State<AppState<S>>, id: Result<Path<String>, PathRejection>) -> ApiResult<Json<TodoItem>> {
    let id = parse_id(id)?;
    Ok(Json(state.service.get(id).await?))
}

async fn toggle_todo<S: TodoService>(State(state): State<AppState<S>>, id: Result<Path<String>, PathRejection>) -> ApiResult<Json<TodoItem>> {
    let id = parse_id(id)?;
    Ok(Json(state.service.toggle(id).await?))
}

async fn update_todo<S: TodoService>(
    State(state): State<AppState<S>>,
    id: Result<Path<String>, PathRejection>,
    payload: Result<Json<UpdateTodo>, JsonRejection>,
) -> ApiResult<Json<TodoItem>> {
    // A malformed id wins over a bad body.
    let id = parse_id(id)?;
    let Json(input) = payload?;
    Ok(Json(state.service.update(id, input).await?))
}

async fn delete_todo<S: TodoService>(State(state): State<AppState<S>>, id: Result<Path<String>, PathRejection>) -> ApiResult<Json<TodoItem>> {
    let id = parse_id(id)?;
    Ok(Json(state.service.remove(id).await?))
}

/// Ids that are not positive integers can never exist, so they are 404s.
/// That includes segments that do not even decode to UTF-8.
fn parse_id(raw: Result<Path<String>, PathRejection>) -> ApiResult<TodoId> {
    raw.ok()
        .and_then(|Path(id)| TodoId::parse(&id))
        .ok_or_else(|| ApiError::new(StatusCode::NOT_FOUND, "Todo not found"))
}
