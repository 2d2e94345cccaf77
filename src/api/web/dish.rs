use axum::debug_handler;
use axum::extract::{
    Json as ExtractJson, Path as ExtractPath, State as ExtractState,
};
use axum::http::StatusCode as HttpStatusCode;
use axum::response::IntoResponse;

use crate::api::web::dto::{DishReqDto, DishRespDto};
use crate::logging::{app_log_event, AppLogLevel};
use crate::repository::app_repo_dish;
use crate::usecase::{CreateDishUseCase, EditDishUseCase, ListDishesUseCase, RetrieveDishUseCase};
use crate::AppSharedState;

use super::{render_error, render_success};

#[debug_handler(state = AppSharedState)]
pub(super) async fn create_handler(
    ExtractState(appstate): ExtractState<AppSharedState>,
    ExtractJson(req_body): ExtractJson<DishReqDto>,
) -> impl IntoResponse {
    let log_ctx = appstate.log_context().clone();
    let result = match app_repo_dish(appstate.datastore()).await {
        Ok(repo) => {
            let uc = CreateDishUseCase { repo };
            uc.execute(req_body).await
        }
        Err(e) => Err(e),
    };
    match result {
        Ok(saved) => render_success(HttpStatusCode::CREATED, DishRespDto::from(saved)),
        Err(e) => {
            app_log_event!(log_ctx, AppLogLevel::WARNING, "{e}");
            render_error(&e)
        }
    }
} // end of fn create_handler

#[debug_handler(state = AppSharedState)]
pub(super) async fn edit_handler(
    ExtractPath(dish_id): ExtractPath<String>,
    ExtractState(appstate): ExtractState<AppSharedState>,
    ExtractJson(req_body): ExtractJson<DishReqDto>,
) -> impl IntoResponse {
    let log_ctx = appstate.log_context().clone();
    let result = match app_repo_dish(appstate.datastore()).await {
        Ok(repo) => {
            let uc = EditDishUseCase { repo };
            uc.execute(dish_id, req_body).await
        }
        Err(e) => Err(e),
    };
    match result {
        Ok(updated) => render_success(HttpStatusCode::OK, DishRespDto::from(updated)),
        Err(e) => {
            app_log_event!(log_ctx, AppLogLevel::WARNING, "{e}");
            render_error(&e)
        }
    }
} // end of fn edit_handler

#[debug_handler(state = AppSharedState)]
pub(super) async fn retrieve_handler(
    ExtractPath(dish_id): ExtractPath<String>,
    ExtractState(appstate): ExtractState<AppSharedState>,
) -> impl IntoResponse {
    let log_ctx = appstate.log_context().clone();
    let result = match app_repo_dish(appstate.datastore()).await {
        Ok(repo) => {
            let uc = RetrieveDishUseCase { repo };
            uc.execute(dish_id).await
        }
        Err(e) => Err(e),
    };
    match result {
        Ok(found) => render_success(HttpStatusCode::OK, DishRespDto::from(found)),
        Err(e) => {
            app_log_event!(log_ctx, AppLogLevel::DEBUG, "{e}");
            render_error(&e)
        }
    }
}

#[debug_handler(state = AppSharedState)]
pub(super) async fn list_handler(
    ExtractState(appstate): ExtractState<AppSharedState>,
) -> impl IntoResponse {
    let log_ctx = appstate.log_context().clone();
    let result = match app_repo_dish(appstate.datastore()).await {
        Ok(repo) => {
            let uc = ListDishesUseCase { repo };
            uc.execute().await
        }
        Err(e) => Err(e),
    };
    match result {
        Ok(items) => {
            let resp = items
                .into_iter()
                .map(DishRespDto::from)
                .collect::<Vec<_>>();
            render_success(HttpStatusCode::OK, resp)
        }
        Err(e) => {
            app_log_event!(log_ctx, AppLogLevel::ERROR, "{e}");
            render_error(&e)
        }
    }
}
