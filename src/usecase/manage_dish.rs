use std::boxed::Box;
use std::result::Result as DefaultResult;

use crate::api::web::dto::DishReqDto;
use crate::error::{AppError, AppErrorCode};
use crate::model::{check_id_matches_route, next_numeric_id, DishModel};
use crate::repository::AbstDishRepo;

pub struct CreateDishUseCase {
    pub repo: Box<dyn AbstDishRepo>,
}

impl CreateDishUseCase {
    pub async fn execute(self, data: DishReqDto) -> DefaultResult<DishModel, AppError> {
        let new_id = next_numeric_id(self.repo.all_ids().await?);
        let saved = DishModel::try_create(new_id, data)?;
        self.repo.save(saved.clone()).await?;
        Ok(saved)
    }
}

pub struct EditDishUseCase {
    pub repo: Box<dyn AbstDishRepo>,
}

impl EditDishUseCase {
    pub async fn execute(
        self,
        route_id: String,
        data: DishReqDto,
    ) -> DefaultResult<DishModel, AppError> {
        let stored = self
            .repo
            .fetch(route_id.as_str())
            .await?
            .ok_or(AppError {
                code: AppErrorCode::RecordNotExist,
                detail: Some(format!("Dish does not exist: {route_id}.")),
            })?;
        check_id_matches_route("Dish", data.id.as_deref(), route_id.as_str())?;
        let updated = stored.try_replace(data)?;
        self.repo.save(updated.clone()).await?;
        Ok(updated)
    }
}

pub struct RetrieveDishUseCase {
    pub repo: Box<dyn AbstDishRepo>,
}

impl RetrieveDishUseCase {
    pub async fn execute(self, route_id: String) -> DefaultResult<DishModel, AppError> {
        self.repo.fetch(route_id.as_str()).await?.ok_or(AppError {
            code: AppErrorCode::RecordNotExist,
            detail: Some(format!("Dish does not exist: {route_id}.")),
        })
    }
}

pub struct ListDishesUseCase {
    pub repo: Box<dyn AbstDishRepo>,
}

impl ListDishesUseCase {
    pub async fn execute(self) -> DefaultResult<Vec<DishModel>, AppError> {
        self.repo.fetch_all().await
    }
}
