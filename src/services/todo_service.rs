use crate::{
    config::TodoConfig,
    db::dao::{TodoChanges, TodoDao},
    db::entities::todo,
    error::AppError,
};

/// Largest offset Postgres accepts as a bigint `OFFSET`.
pub const MAX_OFFSET: u64 = i64::MAX as u64;

/// A validated `limit`/`offset` window over one user's todos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    limit: u64,
    offset: u64,
}

impl PageRequest {
    pub fn new(limit: Option<u64>, offset: Option<u64>, cfg: &TodoConfig) -> Result<Self, AppError> {
        let limit = limit.unwrap_or(cfg.default_limit);
        if limit == 0 || limit > cfg.max_limit {
            return Err(AppError::bad_request(format!(
                "limit must be between 1 and {}",
                cfg.max_limit
            )));
        }

        let offset = offset.unwrap_or(0);
        if offset > MAX_OFFSET {
            return Err(AppError::bad_request(format!(
                "offset must be between 0 and {MAX_OFFSET}"
            )));
        }

        Ok(Self { limit, offset })
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// One-based page that contains `offset`.
    pub fn page_number(&self) -> u64 {
        // offset <= MAX_OFFSET and limit >= 1, so the quotient leaves room for + 1
        self.offset / self.limit + 1
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TodoPage {
    pub page_number: u64,
    pub todos: Vec<todo::Model>,
}

#[derive(Clone)]
pub struct TodoService {
    todo_dao: TodoDao,
}

impl TodoService {
    pub fn new(todo_dao: TodoDao) -> Self {
        Self { todo_dao }
    }

    #[tracing::instrument(skip(self), fields(limit = page.limit(), offset = page.offset()))]
    pub async fn list(
        &self,
        user_id: i64,
        search: &str,
        page: PageRequest,
    ) -> Result<TodoPage, AppError> {
        require_user(user_id)?;

        let todos = self
            .todo_dao
            .list_for_user(user_id, search, page.limit(), page.offset())
            .await?;

        Ok(TodoPage {
            page_number: page.page_number(),
            todos,
        })
    }

    #[tracing::instrument(skip(self, description))]
    pub async fn create(
        &self,
        user_id: i64,
        title: &str,
        description: &str,
    ) -> Result<todo::Model, AppError> {
        require_user(user_id)?;
        if title.is_empty() || description.is_empty() {
            return Err(AppError::bad_request("Title and description are required"));
        }

        let created = self
            .todo_dao
            .create_for_user(user_id, title, description)
            .await?;
        tracing::info!(todo_id = created.id, "todo created");
        Ok(created)
    }

    #[tracing::instrument(skip(self, changes), fields(completed = changes.completed))]
    pub async fn update(
        &self,
        user_id: i64,
        todo_id: i64,
        changes: TodoChanges,
    ) -> Result<todo::Model, AppError> {
        require_user(user_id)?;
        let id = require_todo_id(todo_id)?;
        let not_found = || {
            AppError::not_found(format!(
                "Todo with id : {todo_id} does not exist or you do not have permission to update it"
            ))
        };
        let Some(id) = id else {
            return Err(not_found());
        };

        if changes.title.is_empty() || changes.description.is_empty() {
            return match self.todo_dao.find_owned(id, user_id).await? {
                Some(_) => Err(AppError::bad_request(
                    "Title and description cannot be empty",
                )),
                None => Err(not_found()),
            };
        }

        let updated = self
            .todo_dao
            .update_owned(id, user_id, changes)
            .await?
            .ok_or_else(not_found)?;
        tracing::info!("todo updated");
        Ok(updated)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, user_id: i64, todo_id: i64) -> Result<(), AppError> {
        require_user(user_id)?;
        let not_found = || AppError::not_found(format!("todo with id: {todo_id} not found"));
        let Some(id) = require_todo_id(todo_id)? else {
            return Err(not_found());
        };

        if !self.todo_dao.delete_owned(id, user_id).await? {
            return Err(not_found());
        }
        tracing::info!("todo deleted");
        Ok(())
    }
}

fn require_user(user_id: i64) -> Result<(), AppError> {
    if user_id <= 0 {
        return Err(AppError::unauthorized("User Id is required"));
    }
    Ok(())
}

/// `None` means the id is positive but cannot name a stored row.
fn require_todo_id(todo_id: i64) -> Result<Option<i32>, AppError> {
    if todo_id <= 0 {
        return Err(AppError::bad_request("Invalid todo ID"));
    }
    Ok(i32::try_from(todo_id).ok())
}
