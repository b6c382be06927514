use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, Condition, DatabaseConnection, EntityTrait, FromQueryResult,
    IntoActiveModel, Order, QueryFilter, QueryOrder, QuerySelect,
};

use super::base_traits::TimestampedActiveModel;
use super::error::{DaoLayerError, DaoResult};

/// Shared query plumbing for entity DAOs.
///
/// Every read and write takes an explicit [`Condition`] so callers decide the
/// row scope (ownership filters live with the entity DAO, not here). Mutations
/// are issued as a single filtered statement.
#[async_trait::async_trait]
pub trait DaoBase: Clone + Send + Sync + Sized
where
    <Self::Entity as EntityTrait>::Model:
        FromQueryResult + IntoActiveModel<<Self::Entity as EntityTrait>::ActiveModel> + Send + Sync,
    <Self::Entity as EntityTrait>::ActiveModel: ActiveModelTrait<Entity = Self::Entity>
        + TimestampedActiveModel
        + Default
        + Send,
{
    type Entity: EntityTrait + Send + Sync;
    const MAX_WINDOW: u64 = 100;

    fn from_db(db: DatabaseConnection) -> Self;

    fn new(db: &DatabaseConnection) -> Self {
        Self::from_db(db.clone())
    }

    fn db(&self) -> &DatabaseConnection;

    async fn create(
        &self,
        data: impl IntoActiveModel<<Self::Entity as EntityTrait>::ActiveModel> + Send,
    ) -> DaoResult<<Self::Entity as EntityTrait>::Model> {
        let now = Utc::now().fixed_offset();
        let mut active = data.into_active_model();
        active.set_created_at(now);
        active.set_updated_at(now);
        Ok(active.insert(self.db()).await?)
    }

    async fn find_one(
        &self,
        condition: Condition,
    ) -> DaoResult<Option<<Self::Entity as EntityTrait>::Model>> {
        Ok(Self::Entity::find()
            .filter(condition)
            .one(self.db())
            .await?)
    }

    async fn find_window(
        &self,
        limit: u64,
        offset: u64,
        order: (<Self::Entity as EntityTrait>::Column, Order),
        condition: Condition,
    ) -> DaoResult<Vec<<Self::Entity as EntityTrait>::Model>> {
        if limit == 0 || limit > Self::MAX_WINDOW {
            return Err(DaoLayerError::InvalidWindow { limit, offset });
        }

        let (column, order) = order;
        Ok(Self::Entity::find()
            .filter(condition)
            .order_by(column, order)
            .limit(limit)
            .offset(offset)
            .all(self.db())
            .await?)
    }

    /// Applies `apply` to every row matching `condition` and returns the rows
    /// as they are after the write. An empty result means nothing matched.
    async fn update_where<F>(
        &self,
        condition: Condition,
        apply: F,
    ) -> DaoResult<Vec<<Self::Entity as EntityTrait>::Model>>
    where
        F: for<'a> FnOnce(&'a mut <Self::Entity as EntityTrait>::ActiveModel) + Send,
    {
        let mut active = <<Self::Entity as EntityTrait>::ActiveModel as ActiveModelTrait>::default();
        apply(&mut active);
        active.set_updated_at(Utc::now().fixed_offset());

        Ok(Self::Entity::update_many()
            .set(active)
            .filter(condition)
            .exec_with_returning(self.db())
            .await?)
    }

    async fn delete_where(&self, condition: Condition) -> DaoResult<u64> {
        let result = Self::Entity::delete_many()
            .filter(condition)
            .exec(self.db())
            .await?;
        Ok(result.rows_affected)
    }
}
