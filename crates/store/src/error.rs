use acfruit_core::error::CoreError;
use acfruit_db::PersistenceError;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}
