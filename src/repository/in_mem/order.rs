use std::boxed::Box;
use std::collections::HashMap;
use std::result::Result as DefaultResult;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::DateTime;

use crate::adapter::datastore::{
    AbsDStoreFilterKeyOp, AbstInMemoryDStore, AppInMemDeleteInfo, AppInMemFetchedSingleRow,
    AppInMemUpdateData,
};
use crate::error::{AppError, AppErrorCode};
use crate::model::{OrderLineModel, OrderModel, OrderStatus};
use crate::repository::AbsOrderRepo;

use super::sort_keys_numerically;

mod _order_toplvl {
    pub(super) const TABLE_LABEL: &str = "order_toplvl";

    pub(super) enum InMemColIdx {
        DeliverTo,
        MobileNumber,
        Status,
        CreateTime,
        TotNumColumns,
    }

    impl From<InMemColIdx> for usize {
        fn from(value: InMemColIdx) -> usize {
            match value {
                InMemColIdx::DeliverTo => 0,
                InMemColIdx::MobileNumber => 1,
                InMemColIdx::Status => 2,
                InMemColIdx::CreateTime => 3,
                InMemColIdx::TotNumColumns => 4,
            }
        }
    }
}

mod _order_line {
    pub(super) const TABLE_LABEL: &str = "order_line";

    pub(super) enum InMemColIdx {
        DishId,
        Name,
        Description,
        ImageUrl,
        Price,
        Quantity,
        TotNumColumns,
    }

    impl From<InMemColIdx> for usize {
        fn from(value: InMemColIdx) -> usize {
            match value {
                InMemColIdx::DishId => 0,
                InMemColIdx::Name => 1,
                InMemColIdx::Description => 2,
                InMemColIdx::ImageUrl => 3,
                InMemColIdx::Price => 4,
                InMemColIdx::Quantity => 5,
                InMemColIdx::TotNumColumns => 6,
            }
        }
    }

    // line rows are keyed by the owning order then the zero-based
    // position within that order
    pub(super) fn row_key(oid: &str, seq: usize) -> String {
        format!("{oid}-{seq}")
    }

    pub(super) fn seq_from_key(key: &str) -> usize {
        key.rsplit('-')
            .next()
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(usize::MAX)
    }
}

struct AcceptAllKeysOp;
impl AbsDStoreFilterKeyOp for AcceptAllKeysOp {
    fn filter(&self, _k: &String, _v: &Vec<String>) -> bool {
        true
    }
}

struct LinesOfOrderOp {
    prefix: String,
}
impl LinesOfOrderOp {
    fn new(oid: &str) -> Self {
        Self {
            prefix: format!("{oid}-"),
        }
    }
}
impl AbsDStoreFilterKeyOp for LinesOfOrderOp {
    fn filter(&self, k: &String, _v: &Vec<String>) -> bool {
        k.starts_with(self.prefix.as_str())
    }
}

pub struct OrderInMemRepo {
    datastore: Arc<Box<dyn AbstInMemoryDStore>>,
}

impl OrderInMemRepo {
    pub async fn new(m: Arc<Box<dyn AbstInMemoryDStore>>) -> DefaultResult<Self, AppError> {
        m.create_table(_order_toplvl::TABLE_LABEL).await?;
        m.create_table(_order_line::TABLE_LABEL).await?;
        Ok(Self { datastore: m })
    }

    fn toplvl_to_row(item: &OrderModel) -> AppInMemFetchedSingleRow {
        use _order_toplvl::InMemColIdx;
        let mut row = vec![String::new(); InMemColIdx::TotNumColumns.into()];
        let _ = std::mem::replace(
            &mut row[usize::from(InMemColIdx::DeliverTo)],
            item.deliver_to.clone(),
        );
        let _ = std::mem::replace(
            &mut row[usize::from(InMemColIdx::MobileNumber)],
            item.mobile_number.clone(),
        );
        let _ = std::mem::replace(
            &mut row[usize::from(InMemColIdx::Status)],
            item.status.to_string(),
        );
        let _ = std::mem::replace(
            &mut row[usize::from(InMemColIdx::CreateTime)],
            item.create_time.to_rfc3339(),
        );
        row
    }

    fn line_to_row(line: &OrderLineModel) -> AppInMemFetchedSingleRow {
        use _order_line::InMemColIdx;
        let mut row = vec![String::new(); InMemColIdx::TotNumColumns.into()];
        let _ = std::mem::replace(
            &mut row[usize::from(InMemColIdx::DishId)],
            line.dish_id.clone().unwrap_or_default(),
        );
        let _ = std::mem::replace(&mut row[usize::from(InMemColIdx::Name)], line.name.clone());
        let _ = std::mem::replace(
            &mut row[usize::from(InMemColIdx::Description)],
            line.description.clone(),
        );
        let _ = std::mem::replace(
            &mut row[usize::from(InMemColIdx::ImageUrl)],
            line.image_url.clone(),
        );
        let _ = std::mem::replace(
            &mut row[usize::from(InMemColIdx::Price)],
            line.price.to_string(),
        );
        let _ = std::mem::replace(
            &mut row[usize::from(InMemColIdx::Quantity)],
            line.quantity.to_string(),
        );
        row
    }

    fn toplvl_from_row(
        id_: String,
        row: AppInMemFetchedSingleRow,
        lines: Vec<OrderLineModel>,
    ) -> DefaultResult<OrderModel, AppError> {
        use _order_toplvl::InMemColIdx;
        let corrupt = |col: &str| AppError {
            code: AppErrorCode::DataCorruption,
            detail: Some(format!("order-row-{col}, id:{id_}")),
        };
        let status = row
            .get::<usize>(InMemColIdx::Status.into())
            .and_then(|v| v.parse::<OrderStatus>().ok())
            .ok_or_else(|| corrupt("status"))?;
        let create_time = row
            .get::<usize>(InMemColIdx::CreateTime.into())
            .and_then(|v| DateTime::parse_from_rfc3339(v.as_str()).ok())
            .ok_or_else(|| corrupt("ctime"))?;
        let fetch_col = |idx: InMemColIdx| row.get::<usize>(idx.into()).cloned().unwrap_or_default();
        Ok(OrderModel {
            deliver_to: fetch_col(InMemColIdx::DeliverTo),
            mobile_number: fetch_col(InMemColIdx::MobileNumber),
            id_,
            status,
            lines,
            create_time,
        })
    } // end of fn toplvl_from_row

    fn line_from_row(
        oid: &str,
        row: AppInMemFetchedSingleRow,
    ) -> DefaultResult<OrderLineModel, AppError> {
        use _order_line::InMemColIdx;
        let corrupt = |col: &str| AppError {
            code: AppErrorCode::DataCorruption,
            detail: Some(format!("order-line-{col}, oid:{oid}")),
        };
        let price = row
            .get::<usize>(InMemColIdx::Price.into())
            .and_then(|v| v.parse::<i64>().ok())
            .ok_or_else(|| corrupt("price"))?;
        let quantity = row
            .get::<usize>(InMemColIdx::Quantity.into())
            .and_then(|v| v.parse::<u32>().ok())
            .ok_or_else(|| corrupt("quantity"))?;
        let fetch_col = |idx: InMemColIdx| row.get::<usize>(idx.into()).cloned().unwrap_or_default();
        let dish_id = Some(fetch_col(InMemColIdx::DishId)).filter(|v| !v.is_empty());
        Ok(OrderLineModel {
            dish_id,
            name: fetch_col(InMemColIdx::Name),
            description: fetch_col(InMemColIdx::Description),
            image_url: fetch_col(InMemColIdx::ImageUrl),
            price,
            quantity,
        })
    } // end of fn line_from_row

    async fn fetch_lines(&self, oid: &str) -> DefaultResult<Vec<OrderLineModel>, AppError> {
        let op = LinesOfOrderOp::new(oid);
        let mut keys = self
            .datastore
            .filter_keys(_order_line::TABLE_LABEL.to_string(), &op)
            .await?;
        keys.sort_by_key(|k| _order_line::seq_from_key(k.as_str()));
        let info = HashMap::from([(_order_line::TABLE_LABEL.to_string(), keys.clone())]);
        let mut data = self.datastore.fetch(info).await?;
        let mut rows = data.remove(_order_line::TABLE_LABEL).unwrap_or_default();
        keys.into_iter()
            .filter_map(|k| rows.remove(k.as_str()))
            .map(|row| Self::line_from_row(oid, row))
            .collect()
    }

    async fn stale_line_keys(&self, oid: &str) -> DefaultResult<Vec<String>, AppError> {
        let op = LinesOfOrderOp::new(oid);
        self.datastore
            .filter_keys(_order_line::TABLE_LABEL.to_string(), &op)
            .await
    }
} // end of impl OrderInMemRepo

#[async_trait]
impl AbsOrderRepo for OrderInMemRepo {
    async fn fetch_all(&self) -> DefaultResult<Vec<OrderModel>, AppError> {
        let ids = self.all_ids().await?;
        let mut out = Vec::with_capacity(ids.len());
        for id_ in ids {
            if let Some(o) = self.fetch(id_.as_str()).await? {
                out.push(o);
            }
        }
        Ok(out)
    }

    async fn fetch(&self, id: &str) -> DefaultResult<Option<OrderModel>, AppError> {
        let info = HashMap::from([(_order_toplvl::TABLE_LABEL.to_string(), vec![id.to_string()])]);
        let mut data = self.datastore.fetch(info).await?;
        let mut rows = data.remove(_order_toplvl::TABLE_LABEL).unwrap_or_default();
        let toplvl = match rows.remove(id) {
            Some(row) => row,
            None => return Ok(None),
        };
        let lines = self.fetch_lines(id).await?;
        Self::toplvl_from_row(id.to_string(), toplvl, lines).map(Some)
    }

    async fn save(&self, item: OrderModel) -> DefaultResult<(), AppError> {
        let prev_keys = self.stale_line_keys(item.id_.as_str()).await?;
        let toplvl_rows = HashMap::from([(item.id_.clone(), Self::toplvl_to_row(&item))]);
        let line_rows = item
            .lines
            .iter()
            .enumerate()
            .map(|(seq, line)| {
                (
                    _order_line::row_key(item.id_.as_str(), seq),
                    Self::line_to_row(line),
                )
            })
            .collect::<HashMap<String, AppInMemFetchedSingleRow>>();
        // rows of the previous version not overwritten by this one, an
        // edit may shrink the number of lines
        let stale = prev_keys
            .into_iter()
            .filter(|k| !line_rows.contains_key(k.as_str()))
            .collect::<Vec<_>>();
        let data: AppInMemUpdateData = HashMap::from([
            (_order_toplvl::TABLE_LABEL.to_string(), toplvl_rows),
            (_order_line::TABLE_LABEL.to_string(), line_rows),
        ]);
        // save first, a rejected write has to leave the stored version
        // untouched, the prune below only runs once it succeeded
        let _num_saved = self.datastore.save(data).await?;
        if !stale.is_empty() {
            let info: AppInMemDeleteInfo =
                HashMap::from([(_order_line::TABLE_LABEL.to_string(), stale)]);
            let _num = self.datastore.delete(info).await?;
        }
        Ok(())
    } // end of fn save

    async fn delete(&self, id: &str) -> DefaultResult<(), AppError> {
        let line_keys = self.stale_line_keys(id).await?;
        let info: AppInMemDeleteInfo = HashMap::from([
            (_order_toplvl::TABLE_LABEL.to_string(), vec![id.to_string()]),
            (_order_line::TABLE_LABEL.to_string(), line_keys),
        ]);
        let _num = self.datastore.delete(info).await?;
        Ok(())
    }

    async fn all_ids(&self) -> DefaultResult<Vec<String>, AppError> {
        let op = AcceptAllKeysOp;
        let keys = self
            .datastore
            .filter_keys(_order_toplvl::TABLE_LABEL.to_string(), &op)
            .await?;
        Ok(sort_keys_numerically(keys))
    }
} // end of impl AbsOrderRepo
