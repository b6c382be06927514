use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
};
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};

use crate::{
    db::{dao::TodoChanges, entities::todo},
    middleware::AuthUser,
    response::ApiResult,
    services::{PageRequest, ServiceContext, TodoPage, TodoService},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTodoRequest {
    pub title: String,
    pub description: String,
    pub completed: bool,
}

#[derive(Debug, Serialize)]
pub struct TodoResponse {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub created_at: DateTimeWithTimeZone,
    pub user_id: i64,
}

#[derive(Debug, Serialize)]
pub struct PaginatedTodosResponse {
    pub page_number: u64,
    pub todos: Vec<TodoResponse>,
}

impl From<todo::Model> for TodoResponse {
    fn from(model: todo::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            completed: model.completed,
            created_at: model.created_at,
            user_id: model.user_id,
        }
    }
}

impl From<TodoPage> for PaginatedTodosResponse {
    fn from(page: TodoPage) -> Self {
        Self {
            page_number: page.page_number,
            todos: page.todos.into_iter().map(TodoResponse::from).collect(),
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/todo", get(list_todos).post(create_todo))
        .route("/todo/{id}", put(update_todo).delete(delete_todo))
        .with_state(state)
}

fn todo_service(state: &AppState) -> TodoService {
    ServiceContext::from_state(state).todo()
}

async fn list_todos(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<PaginatedTodosResponse>> {
    let page = PageRequest::new(query.limit, query.offset, &state.config.todo)?;
    let search = query.search.unwrap_or_default();
    let page = todo_service(&state).list(user_id, &search, page).await?;
    Ok(Json(page.into()))
}

async fn create_todo(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<CreateTodoRequest>,
) -> ApiResult<(StatusCode, Json<TodoResponse>)> {
    let created = todo_service(&state)
        .create(user_id, &body.title, &body.description)
        .await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

async fn update_todo(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i64>,
    Json(body): Json<UpdateTodoRequest>,
) -> ApiResult<StatusCode> {
    let changes = TodoChanges {
        title: body.title,
        description: body.description,
        completed: body.completed,
    };
    todo_service(&state).update(user_id, id, changes).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_todo(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    todo_service(&state).delete(user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
