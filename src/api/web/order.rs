use axum::debug_handler;
use axum::extract::{
    Json as ExtractJson, Path as ExtractPath, State as ExtractState,
};
use axum::http::StatusCode as HttpStatusCode;
use axum::response::IntoResponse;

use crate::api::web::dto::{OrderReqDto, OrderRespDto};
use crate::logging::{app_log_event, AppLogLevel};
use crate::repository::app_repo_order;
use crate::usecase::{
    CreateOrderUseCase, DiscardOrderUseCase, EditOrderUseCase, ListOrdersUseCase,
    RetrieveOrderUseCase,
};
use crate::AppSharedState;

use super::{render_error, render_success, resp_header_map};

#[debug_handler(state = AppSharedState)]
pub(super) async fn create_handler(
    ExtractState(appstate): ExtractState<AppSharedState>,
    ExtractJson(req_body): ExtractJson<OrderReqDto>,
) -> impl IntoResponse {
    let log_ctx = appstate.log_context().clone();
    let result = match app_repo_order(appstate.datastore()).await {
        Ok(repo) => {
            let uc = CreateOrderUseCase { repo };
            uc.execute(req_body).await
        }
        Err(e) => Err(e),
    };
    match result {
        Ok(saved) => render_success(HttpStatusCode::CREATED, OrderRespDto::from(saved)),
        Err(e) => {
            app_log_event!(log_ctx, AppLogLevel::WARNING, "{e}");
            render_error(&e)
        }
    }
} // end of fn create_handler

#[debug_handler(state = AppSharedState)]
pub(super) async fn edit_handler(
    ExtractPath(order_id): ExtractPath<String>,
    ExtractState(appstate): ExtractState<AppSharedState>,
    ExtractJson(req_body): ExtractJson<OrderReqDto>,
) -> impl IntoResponse {
    let log_ctx = appstate.log_context().clone();
    let result = match app_repo_order(appstate.datastore()).await {
        Ok(repo) => {
            let uc = EditOrderUseCase { repo };
            uc.execute(order_id, req_body).await
        }
        Err(e) => Err(e),
    };
    match result {
        Ok(updated) => render_success(HttpStatusCode::OK, OrderRespDto::from(updated)),
        Err(e) => {
            app_log_event!(log_ctx, AppLogLevel::WARNING, "{e}");
            render_error(&e)
        }
    }
} // end of fn edit_handler

#[debug_handler(state = AppSharedState)]
pub(super) async fn retrieve_handler(
    ExtractPath(order_id): ExtractPath<String>,
    ExtractState(appstate): ExtractState<AppSharedState>,
) -> impl IntoResponse {
    let log_ctx = appstate.log_context().clone();
    let result = match app_repo_order(appstate.datastore()).await {
        Ok(repo) => {
            let uc = RetrieveOrderUseCase { repo };
            uc.execute(order_id).await
        }
        Err(e) => Err(e),
    };
    match result {
        Ok(found) => render_success(HttpStatusCode::OK, OrderRespDto::from(found)),
        Err(e) => {
            app_log_event!(log_ctx, AppLogLevel::DEBUG, "{e}");
            render_error(&e)
        }
    }
}

#[debug_handler(state = AppSharedState)]
pub(super) async fn discard_handler(
    ExtractPath(order_id): ExtractPath<String>,
    ExtractState(appstate): ExtractState<AppSharedState>,
) -> impl IntoResponse {
    let log_ctx = appstate.log_context().clone();
    let result = match app_repo_order(appstate.datastore()).await {
        Ok(repo) => {
            let uc = DiscardOrderUseCase { repo };
            uc.execute(order_id).await
        }
        Err(e) => Err(e),
    };
    match result {
        // a completed removal carries no response body at all
        Ok(()) => (HttpStatusCode::NO_CONTENT, resp_header_map(), String::new()),
        Err(e) => {
            app_log_event!(log_ctx, AppLogLevel::WARNING, "{e}");
            render_error(&e)
        }
    }
}

#[debug_handler(state = AppSharedState)]
pub(super) async fn list_handler(
    ExtractState(appstate): ExtractState<AppSharedState>,
) -> impl IntoResponse {
    let log_ctx = appstate.log_context().clone();
    let result = match app_repo_order(appstate.datastore()).await {
        Ok(repo) => {
            let uc = ListOrdersUseCase { repo };
            uc.execute().await
        }
        Err(e) => Err(e),
    };
    match result {
        Ok(items) => {
            let resp = items
                .into_iter()
                .map(OrderRespDto::from)
                .collect::<Vec<_>>();
            render_success(HttpStatusCode::OK, resp)
        }
        Err(e) => {
            app_log_event!(log_ctx, AppLogLevel::ERROR, "{e}");
            render_error(&e)
        }
    }
}
