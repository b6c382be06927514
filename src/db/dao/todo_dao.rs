use sea_orm::sea_query::{Expr, ExprTrait, LikeExpr};
use sea_orm::{ColumnTrait, Condition, DatabaseConnection, Order, Set};

use super::{DaoBase, DaoResult};
use crate::db::entities::prelude::Todo;
use crate::db::entities::todo;

const LIKE_ESCAPE: char = '\\';

#[derive(Clone)]
pub struct TodoDao {
    db: DatabaseConnection,
}

impl DaoBase for TodoDao {
    type Entity = Todo;

    fn from_db(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

/// Full replacement of the mutable columns of a todo.
#[derive(Debug, Clone)]
pub struct TodoChanges {
    pub title: String,
    pub description: String,
    pub completed: bool,
}

pub fn owned_by(user_id: i64) -> Condition {
    Condition::all().add(todo::Column::UserId.eq(user_id))
}

pub fn owned_todo(todo_id: i32, user_id: i64) -> Condition {
    owned_by(user_id).add(todo::Column::Id.eq(todo_id))
}

/// Case-sensitive substring match on the title. The search term is matched
/// literally: `%`, `_` and the escape character itself are escaped.
pub fn title_contains(user_id: i64, search: &str) -> Condition {
    let condition = owned_by(user_id);
    if search.is_empty() {
        return condition;
    }
    condition.add(
        Expr::col(todo::Column::Title)
            .like(LikeExpr::new(like_pattern(search)).escape(LIKE_ESCAPE)),
    )
}

fn like_pattern(search: &str) -> String {
    let mut pattern = String::with_capacity(search.len() + 2);
    pattern.push('%');
    for ch in search.chars() {
        if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

impl TodoDao {
    pub async fn list_for_user(
        &self,
        user_id: i64,
        search: &str,
        limit: u64,
        offset: u64,
    ) -> DaoResult<Vec<todo::Model>> {
        self.find_window(
            limit,
            offset,
            (todo::Column::Id, Order::Asc),
            title_contains(user_id, search),
        )
        .await
    }

    pub async fn create_for_user(
        &self,
        user_id: i64,
        title: &str,
        description: &str,
    ) -> DaoResult<todo::Model> {
        let model = todo::ActiveModel {
            user_id: Set(user_id),
            title: Set(title.to_string()),
            description: Set(description.to_string()),
            completed: Set(false),
            ..Default::default()
        };
        self.create(model).await
    }

    pub async fn find_owned(&self, todo_id: i32, user_id: i64) -> DaoResult<Option<todo::Model>> {
        self.find_one(owned_todo(todo_id, user_id)).await
    }

    pub async fn update_owned(
        &self,
        todo_id: i32,
        user_id: i64,
        changes: TodoChanges,
    ) -> DaoResult<Option<todo::Model>> {
        let TodoChanges {
            title,
            description,
            completed,
        } = changes;
        let rows = self
            .update_where(owned_todo(todo_id, user_id), move |active| {
                active.title = Set(title);
                active.description = Set(description);
                active.completed = Set(completed);
            })
            .await?;
        Ok(rows.into_iter().next())
    }

    pub async fn delete_owned(&self, todo_id: i32, user_id: i64) -> DaoResult<bool> {
        let affected = self.delete_where(owned_todo(todo_id, user_id)).await?;
        Ok(affected > 0)
    }
}
