pub(crate) mod in_mem;

use std::sync::Arc;

use eatery::error::AppErrorCode;
use eatery::repository::{app_repo_dish, app_repo_order};
use eatery::AppDataStoreContext;

#[tokio::test]
async fn repo_factory_error_without_datastore() {
    let ds = Arc::new(AppDataStoreContext { in_mem: None });
    let result = app_repo_dish(ds.clone()).await;
    assert_eq!(result.err().unwrap().code, AppErrorCode::MissingDataStore);
    let result = app_repo_order(ds).await;
    assert_eq!(result.err().unwrap().code, AppErrorCode::MissingDataStore);
}
