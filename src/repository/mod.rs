use std::boxed::Box;
use std::result::Result as DefaultResult;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{AppError, AppErrorCode};
use crate::model::{DishModel, OrderModel};
use crate::AppDataStoreContext;

mod in_mem;
// make the concrete in-memory repos visible for testing purpose
pub use in_mem::dish::DishInMemRepo;
pub use in_mem::order::OrderInMemRepo;

// repository instances may be used across awaits, the futures created by
// app callers have to be movable between worker threads, hence the `Send`
// and `Sync` super-traits
#[async_trait]
pub trait AbstDishRepo: Sync + Send {
    /// all stored dishes in insertion order
    async fn fetch_all(&self) -> DefaultResult<Vec<DishModel>, AppError>;
    async fn fetch(&self, id: &str) -> DefaultResult<Option<DishModel>, AppError>;
    async fn save(&self, item: DishModel) -> DefaultResult<(), AppError>;
    async fn all_ids(&self) -> DefaultResult<Vec<String>, AppError>;
    // the dish collection never shrinks, there is no delete operation
}

#[async_trait]
pub trait AbsOrderRepo: Sync + Send {
    async fn fetch_all(&self) -> DefaultResult<Vec<OrderModel>, AppError>;
    async fn fetch(&self, id: &str) -> DefaultResult<Option<OrderModel>, AppError>;
    async fn save(&self, item: OrderModel) -> DefaultResult<(), AppError>;
    /// removing an absent order is a tolerated no-op, not an error
    async fn delete(&self, id: &str) -> DefaultResult<(), AppError>;
    async fn all_ids(&self) -> DefaultResult<Vec<String>, AppError>;
}

pub async fn app_repo_dish(
    ds: Arc<AppDataStoreContext>,
) -> DefaultResult<Box<dyn AbstDishRepo>, AppError> {
    if let Some(m) = ds.in_mem.as_ref() {
        let obj = DishInMemRepo::new(m.clone()).await?;
        Ok(Box::new(obj))
    } else {
        Err(AppError {
            code: AppErrorCode::MissingDataStore,
            detail: Some("in-mem".to_string()),
        })
    }
}

pub async fn app_repo_order(
    ds: Arc<AppDataStoreContext>,
) -> DefaultResult<Box<dyn AbsOrderRepo>, AppError> {
    if let Some(m) = ds.in_mem.as_ref() {
        let obj = OrderInMemRepo::new(m.clone()).await?;
        Ok(Box::new(obj))
    } else {
        Err(AppError {
            code: AppErrorCode::MissingDataStore,
            detail: Some("in-mem".to_string()),
        })
    }
}
