use std::boxed::Box;
use std::collections::HashMap;
use std::result::Result as DefaultResult;
use std::sync::Arc;

use async_trait::async_trait;

use crate::adapter::datastore::{
    AbsDStoreFilterKeyOp, AbstInMemoryDStore, AppInMemFetchedSingleRow, AppInMemUpdateData,
};
use crate::error::{AppError, AppErrorCode};
use crate::model::DishModel;
use crate::repository::AbstDishRepo;

use super::sort_keys_numerically;

const TABLE_LABEL: &str = "dish";

enum InMemColIdx {
    Name,
    Description,
    Price,
    ImageUrl,
    TotNumColumns,
}

impl From<InMemColIdx> for usize {
    fn from(value: InMemColIdx) -> usize {
        match value {
            InMemColIdx::Name => 0,
            InMemColIdx::Description => 1,
            InMemColIdx::Price => 2,
            InMemColIdx::ImageUrl => 3,
            InMemColIdx::TotNumColumns => 4,
        }
    }
}

struct AcceptAllKeysOp;
impl AbsDStoreFilterKeyOp for AcceptAllKeysOp {
    fn filter(&self, _k: &String, _v: &Vec<String>) -> bool {
        true
    }
}

pub struct DishInMemRepo {
    datastore: Arc<Box<dyn AbstInMemoryDStore>>,
}

impl DishInMemRepo {
    pub async fn new(m: Arc<Box<dyn AbstInMemoryDStore>>) -> DefaultResult<Self, AppError> {
        m.create_table(TABLE_LABEL).await?;
        Ok(Self { datastore: m })
    }

    fn to_row(item: &DishModel) -> AppInMemFetchedSingleRow {
        let mut row = vec![String::new(); InMemColIdx::TotNumColumns.into()];
        let _ = std::mem::replace(&mut row[usize::from(InMemColIdx::Name)], item.name.clone());
        let _ = std::mem::replace(
            &mut row[usize::from(InMemColIdx::Description)],
            item.description.clone(),
        );
        let _ = std::mem::replace(
            &mut row[usize::from(InMemColIdx::Price)],
            item.price.to_string(),
        );
        let _ = std::mem::replace(
            &mut row[usize::from(InMemColIdx::ImageUrl)],
            item.image_url.clone(),
        );
        row
    }

    fn from_row(id_: String, row: AppInMemFetchedSingleRow) -> DefaultResult<DishModel, AppError> {
        let price = row
            .get::<usize>(InMemColIdx::Price.into())
            .and_then(|v| v.parse::<i64>().ok())
            .ok_or(AppError {
                code: AppErrorCode::DataCorruption,
                detail: Some(format!("dish-row-price, id:{id_}")),
            })?;
        let fetch_col = |idx: InMemColIdx| row.get::<usize>(idx.into()).cloned().unwrap_or_default();
        Ok(DishModel {
            id_,
            name: fetch_col(InMemColIdx::Name),
            description: fetch_col(InMemColIdx::Description),
            price,
            image_url: fetch_col(InMemColIdx::ImageUrl),
        })
    }
} // end of impl DishInMemRepo

#[async_trait]
impl AbstDishRepo for DishInMemRepo {
    async fn fetch_all(&self) -> DefaultResult<Vec<DishModel>, AppError> {
        let ids = self.all_ids().await?;
        let info = HashMap::from([(TABLE_LABEL.to_string(), ids.clone())]);
        let mut data = self.datastore.fetch(info).await?;
        let mut rows = data.remove(TABLE_LABEL).unwrap_or_default();
        ids.into_iter()
            .filter_map(|id_| rows.remove(id_.as_str()).map(|row| (id_, row)))
            .map(|(id_, row)| Self::from_row(id_, row))
            .collect()
    }

    async fn fetch(&self, id: &str) -> DefaultResult<Option<DishModel>, AppError> {
        let info = HashMap::from([(TABLE_LABEL.to_string(), vec![id.to_string()])]);
        let mut data = self.datastore.fetch(info).await?;
        let mut rows = data.remove(TABLE_LABEL).unwrap_or_default();
        rows.remove(id)
            .map(|row| Self::from_row(id.to_string(), row))
            .transpose()
    }

    async fn save(&self, item: DishModel) -> DefaultResult<(), AppError> {
        let rows = HashMap::from([(item.id_.clone(), Self::to_row(&item))]);
        let data: AppInMemUpdateData = HashMap::from([(TABLE_LABEL.to_string(), rows)]);
        let _num_saved = self.datastore.save(data).await?;
        Ok(())
    }

    async fn all_ids(&self) -> DefaultResult<Vec<String>, AppError> {
        let op = AcceptAllKeysOp;
        let keys = self
            .datastore
            .filter_keys(TABLE_LABEL.to_string(), &op)
            .await?;
        Ok(sort_keys_numerically(keys))
    }
} // end of impl AbstDishRepo
