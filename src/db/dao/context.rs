use sea_orm::DatabaseConnection;

use super::{DaoBase, TodoDao};

/// Hands out DAOs that share one pooled connection handle.
#[derive(Clone)]
pub struct DaoContext {
    db: DatabaseConnection,
}

impl DaoContext {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    pub fn todo(&self) -> TodoDao {
        DaoBase::new(&self.db)
    }
}
