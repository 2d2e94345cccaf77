use std::collections::HashMap;
use std::result::Result as DefaultResult;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::config::AppInMemoryDbCfg;
use crate::error::{AppError, AppErrorCode};

// a table keeps rows of string-encoded columns, each row addressed
// by its primary-key string
pub type AppInMemFetchedSingleRow = Vec<String>;
pub type AppInMemFetchedSingleTable = HashMap<String, AppInMemFetchedSingleRow>;
pub type AppInMemFetchedData = HashMap<String, AppInMemFetchedSingleTable>;
pub type AppInMemUpdateData = AppInMemFetchedData;
// table label to the list of primary keys within that table
pub type AppInMemFetchKeys = HashMap<String, Vec<String>>;
pub type AppInMemDeleteInfo = AppInMemFetchKeys;

pub trait AbsDStoreFilterKeyOp: Send + Sync {
    fn filter(&self, k: &String, v: &Vec<String>) -> bool;
}

#[async_trait]
pub trait AbstInMemoryDStore: Send + Sync {
    async fn create_table(&self, label: &str) -> DefaultResult<(), AppError>;
    async fn fetch(&self, info: AppInMemFetchKeys) -> DefaultResult<AppInMemFetchedData, AppError>;
    async fn filter_keys(
        &self,
        table: String,
        op: &dyn AbsDStoreFilterKeyOp,
    ) -> DefaultResult<Vec<String>, AppError>;
    async fn save(&self, data: AppInMemUpdateData) -> DefaultResult<usize, AppError>;
    async fn delete(&self, info: AppInMemDeleteInfo) -> DefaultResult<usize, AppError>;
}

// all tables of this datastore share one async mutex, request handlers
// run on a multi-threaded runtime so every access has to be serialized
pub struct AppInMemoryDStore {
    max_items_per_table: u32,
    tables: Mutex<AppInMemFetchedData>,
}

impl AppInMemoryDStore {
    pub fn new(cfg: &AppInMemoryDbCfg) -> Self {
        Self {
            max_items_per_table: cfg.max_items,
            tables: Mutex::new(HashMap::new()),
        }
    }

    fn table_missing_error(label: &str) -> AppError {
        AppError {
            code: AppErrorCode::DataTableNotExist,
            detail: Some(label.to_string()),
        }
    }
}

#[async_trait]
impl AbstInMemoryDStore for AppInMemoryDStore {
    async fn create_table(&self, label: &str) -> DefaultResult<(), AppError> {
        let mut guard = self.tables.lock().await;
        if !guard.contains_key(label) {
            guard.insert(label.to_string(), HashMap::new());
        }
        Ok(())
    }

    async fn fetch(&self, info: AppInMemFetchKeys) -> DefaultResult<AppInMemFetchedData, AppError> {
        let guard = self.tables.lock().await;
        let mut out = HashMap::new();
        for (label, keys) in info {
            let table = guard
                .get(label.as_str())
                .ok_or_else(|| Self::table_missing_error(label.as_str()))?;
            let rows = keys
                .into_iter()
                .filter_map(|k| table.get(k.as_str()).map(|row| (k, row.clone())))
                .collect::<AppInMemFetchedSingleTable>();
            out.insert(label, rows);
        }
        Ok(out)
    } // end of fn fetch

    async fn filter_keys(
        &self,
        table: String,
        op: &dyn AbsDStoreFilterKeyOp,
    ) -> DefaultResult<Vec<String>, AppError> {
        let guard = self.tables.lock().await;
        let t = guard
            .get(table.as_str())
            .ok_or_else(|| Self::table_missing_error(table.as_str()))?;
        let keys = t
            .iter()
            .filter(|(k, v)| op.filter(k, v))
            .map(|(k, _v)| k.clone())
            .collect();
        Ok(keys)
    }

    async fn save(&self, data: AppInMemUpdateData) -> DefaultResult<usize, AppError> {
        let mut guard = self.tables.lock().await;
        for label in data.keys() {
            if !guard.contains_key(label.as_str()) {
                return Err(Self::table_missing_error(label.as_str()));
            }
        }
        // verify the capacity of all involved tables before any row is
        // written, a rejected save must not leave partial rows behind
        for (label, rows) in data.iter() {
            let table = guard.get(label.as_str()).unwrap();
            let num_new = rows
                .keys()
                .filter(|k| !table.contains_key(k.as_str()))
                .count();
            if (table.len() + num_new) > (self.max_items_per_table as usize) {
                return Err(AppError {
                    code: AppErrorCode::ExceedingMaxLimit,
                    detail: Some(format!(
                        "table:{}, limit:{}",
                        label, self.max_items_per_table
                    )),
                });
            }
        }
        let mut num_saved = 0usize;
        for (label, rows) in data {
            let table = guard.get_mut(label.as_str()).unwrap();
            num_saved += rows.len();
            table.extend(rows);
        }
        Ok(num_saved)
    } // end of fn save

    async fn delete(&self, info: AppInMemDeleteInfo) -> DefaultResult<usize, AppError> {
        let mut guard = self.tables.lock().await;
        let mut num_deleted = 0usize;
        for (label, keys) in info {
            let table = guard
                .get_mut(label.as_str())
                .ok_or_else(|| Self::table_missing_error(label.as_str()))?;
            // absent keys are skipped silently, delete is tolerated as no-op
            num_deleted += keys
                .into_iter()
                .filter(|k| table.remove(k.as_str()).is_some())
                .count();
        }
        Ok(num_deleted)
    }
} // end of impl AppInMemoryDStore
