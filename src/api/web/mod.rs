use std::collections::HashMap;

use axum::http::{
    header as HttpHeader, HeaderMap as HttpHeaderMap, HeaderValue as HttpHeaderValue,
    StatusCode as HttpStatusCode,
};
use axum::routing::{get, MethodRouter};
use serde::Serialize;

use crate::constant::api::web as WebConst;
use crate::constant::HTTP_CONTENT_TYPE_JSON;
use crate::error::{AppError, AppErrorCode};
use crate::{AppSharedState, WebApiHdlrLabel};

mod dish;
pub mod dto;
mod order;

use dto::{ErrorRespDto, SingleRespDto};

pub type ApiRouteType = MethodRouter<AppSharedState>;
pub type ApiRouteTableType = HashMap<WebApiHdlrLabel, ApiRouteType>;

pub fn route_table() -> ApiRouteTableType {
    let mut out: ApiRouteTableType = HashMap::new();
    out.insert(
        WebConst::MANAGE_DISHES,
        get(dish::list_handler).post(dish::create_handler),
    );
    out.insert(
        WebConst::ACCESS_EXISTING_DISH,
        get(dish::retrieve_handler).put(dish::edit_handler),
    );
    out.insert(
        WebConst::MANAGE_ORDERS,
        get(order::list_handler).post(order::create_handler),
    );
    out.insert(
        WebConst::ACCESS_EXISTING_ORDER,
        get(order::retrieve_handler)
            .put(order::edit_handler)
            .delete(order::discard_handler),
    );
    out
}

fn resp_header_map() -> HttpHeaderMap {
    let mut hdr_map = HttpHeaderMap::new();
    if let Ok(ctype) = HttpHeaderValue::from_str(HTTP_CONTENT_TYPE_JSON) {
        hdr_map.insert(HttpHeader::CONTENT_TYPE, ctype);
    }
    hdr_map
}

// every successful response wraps its payload in a `data` object,
// failures carry a single `error` message instead
fn render_success<T: Serialize>(
    status: HttpStatusCode,
    value: T,
) -> (HttpStatusCode, HttpHeaderMap, String) {
    let body = SingleRespDto { data: value };
    let serialized = serde_json::to_string(&body)
        .unwrap_or_else(|_e| r#"{"error":"internal error"}"#.to_string());
    (status, resp_header_map(), serialized)
}

fn render_error(e: &AppError) -> (HttpStatusCode, HttpHeaderMap, String) {
    let status = match &e.code {
        AppErrorCode::InvalidInput
        | AppErrorCode::EmptyInputData
        | AppErrorCode::ExceedingMaxLimit => HttpStatusCode::BAD_REQUEST,
        AppErrorCode::RecordNotExist => HttpStatusCode::NOT_FOUND,
        _others => HttpStatusCode::INTERNAL_SERVER_ERROR,
    };
    let message = if status == HttpStatusCode::INTERNAL_SERVER_ERROR {
        "internal error".to_string()
    } else {
        e.detail.clone().unwrap_or_else(|| format!("{:?}", e.code))
    };
    let body = ErrorRespDto { error: message };
    let serialized =
        serde_json::to_string(&body).unwrap_or_else(|_e| r#"{"error":"internal error"}"#.to_string());
    (status, resp_header_map(), serialized)
}
