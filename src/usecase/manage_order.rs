use std::boxed::Box;
use std::result::Result as DefaultResult;

use chrono::Local as LocalTime;

use crate::api::web::dto::OrderReqDto;
use crate::error::{AppError, AppErrorCode};
use crate::model::{check_id_matches_route, next_numeric_id, OrderModel};
use crate::repository::AbsOrderRepo;

fn order_not_found(route_id: &str) -> AppError {
    AppError {
        code: AppErrorCode::RecordNotExist,
        detail: Some(format!("Order does not exist: {route_id}.")),
    }
}

pub struct CreateOrderUseCase {
    pub repo: Box<dyn AbsOrderRepo>,
}

impl CreateOrderUseCase {
    pub async fn execute(self, data: OrderReqDto) -> DefaultResult<OrderModel, AppError> {
        let new_id = next_numeric_id(self.repo.all_ids().await?);
        let time_now = LocalTime::now().fixed_offset();
        let saved = OrderModel::try_create(new_id, data, time_now)?;
        self.repo.save(saved.clone()).await?;
        Ok(saved)
    }
}

pub struct EditOrderUseCase {
    pub repo: Box<dyn AbsOrderRepo>,
}

impl EditOrderUseCase {
    pub async fn execute(
        self,
        route_id: String,
        data: OrderReqDto,
    ) -> DefaultResult<OrderModel, AppError> {
        let stored = self
            .repo
            .fetch(route_id.as_str())
            .await?
            .ok_or_else(|| order_not_found(route_id.as_str()))?;
        check_id_matches_route("Order", data.id.as_deref(), route_id.as_str())?;
        let updated = stored.try_replace(data)?;
        self.repo.save(updated.clone()).await?;
        Ok(updated)
    }
}

pub struct RetrieveOrderUseCase {
    pub repo: Box<dyn AbsOrderRepo>,
}

impl RetrieveOrderUseCase {
    pub async fn execute(self, route_id: String) -> DefaultResult<OrderModel, AppError> {
        self.repo
            .fetch(route_id.as_str())
            .await?
            .ok_or_else(|| order_not_found(route_id.as_str()))
    }
}

pub struct DiscardOrderUseCase {
    pub repo: Box<dyn AbsOrderRepo>,
}

impl DiscardOrderUseCase {
    pub async fn execute(self, route_id: String) -> DefaultResult<(), AppError> {
        let stored = self
            .repo
            .fetch(route_id.as_str())
            .await?
            .ok_or_else(|| order_not_found(route_id.as_str()))?;
        stored.check_deletable()?;
        self.repo.delete(route_id.as_str()).await
    }
}

pub struct ListOrdersUseCase {
    pub repo: Box<dyn AbsOrderRepo>,
}

impl ListOrdersUseCase {
    pub async fn execute(self) -> DefaultResult<Vec<OrderModel>, AppError> {
        self.repo.fetch_all().await
    }
}
