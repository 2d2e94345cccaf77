mod order;

use std::boxed::Box;
use std::sync::Arc;

use eatery::datastore::{AbstInMemoryDStore, AppInMemoryDStore};
use eatery::{AppDataStoreContext, AppInMemoryDbCfg};

pub(crate) fn in_mem_ds_ctx_setup(max_items: u32) -> Arc<AppDataStoreContext> {
    let d = AppInMemoryDbCfg {
        alias: "utest".to_string(),
        max_items,
    };
    let obj: Box<dyn AbstInMemoryDStore> = Box::new(AppInMemoryDStore::new(&d));
    Arc::new(AppDataStoreContext {
        in_mem: Some(Arc::new(obj)),
    })
}
