use sea_orm::DbErr;

#[derive(Debug, thiserror::Error)]
pub enum DaoLayerError {
    #[error("Database error: {0}")]
    Db(#[from] DbErr),
    #[error("Invalid window: limit={limit} offset={offset}")]
    InvalidWindow { limit: u64, offset: u64 },
}

pub type DaoResult<T> = Result<T, DaoLayerError>;
