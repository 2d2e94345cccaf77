use std::io::ErrorKind;

use axum::body::Body as AxumBody;
use axum::http::{Request, StatusCode as HttpStatusCode};
use serde_json::{json, Value as JsnValue};
use tower::ServiceExt;

use eatery::api::web::route_table;
use eatery::error::AppErrorCode;
use eatery::network::{app_web_service, middleware, net_listener, WebServiceRoute};

use crate::{ut_setup_share_state, EXAMPLE_REL_PATH};

fn ut_web_service_setup() -> WebServiceRoute {
    let shr_state = ut_setup_share_state();
    let cfg = shr_state.config().clone();
    let rtable = route_table();
    let (service, num_applied) = app_web_service(&cfg.api_server.listen, rtable, shr_state);
    assert_eq!(num_applied, 4);
    service
}

fn ut_req(method: &str, uri: &str, body: Option<JsnValue>) -> Request<AxumBody> {
    let body = match body {
        Some(v) => AxumBody::from(v.to_string()),
        None => AxumBody::empty(),
    };
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body)
        .unwrap()
}

async fn ut_resp_body(resp: axum::response::Response) -> JsnValue {
    let raw = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice::<JsnValue>(&raw).unwrap()
}

#[test]
fn route_table_covers_all_endpoints() {
    let rtable = route_table();
    assert_eq!(rtable.len(), 4);
    for label in [
        "manage_dishes",
        "access_existing_dish",
        "manage_orders",
        "access_existing_order",
    ] {
        assert!(rtable.contains_key(label));
    }
}

#[tokio::test]
async fn dish_endpoints_full_flow() {
    let service = ut_web_service_setup();
    let new_dish = json!({
        "name": "mushroom risotto", "description": "creamy arborio rice",
        "price": 1250, "image_url": "https://img.example.com/risotto.png"
    });
    let req = ut_req("POST", "/1.0.1/dishes", Some(new_dish));
    let resp = service.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), HttpStatusCode::CREATED);
    let body = ut_resp_body(resp).await;
    assert_eq!(body["data"]["id"].as_str().unwrap(), "1");
    assert_eq!(body["data"]["price"].as_i64().unwrap(), 1250);

    let req = ut_req("GET", "/1.0.1/dishes", None);
    let resp = service.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), HttpStatusCode::OK);
    let body = ut_resp_body(resp).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let req = ut_req("GET", "/1.0.1/dishes/1", None);
    let resp = service.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), HttpStatusCode::OK);

    let edit = json!({
        "id": "9", "name": "mushroom risotto", "description": "creamy arborio rice",
        "price": 1250, "image_url": "https://img.example.com/risotto.png"
    });
    let req = ut_req("PUT", "/1.0.1/dishes/1", Some(edit));
    let resp = service.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), HttpStatusCode::BAD_REQUEST);
    let body = ut_resp_body(resp).await;
    assert_eq!(
        body["error"].as_str().unwrap(),
        "Dish id does not match route id. Dish: 9, Route: 1."
    );

    let req = ut_req("GET", "/1.0.1/dishes/55", None);
    let resp = service.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), HttpStatusCode::NOT_FOUND);
    let body = ut_resp_body(resp).await;
    assert_eq!(body["error"].as_str().unwrap(), "Dish does not exist: 55.");
} // end of fn dish_endpoints_full_flow

#[tokio::test]
async fn dish_create_error_bad_price() {
    let service = ut_web_service_setup();
    let new_dish = json!({
        "name": "gyoza", "description": "pan fried",
        "price": "420", "image_url": "https://img.example.com/gyoza.png"
    });
    let req = ut_req("POST", "/1.0.1/dishes", Some(new_dish));
    let resp = service.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), HttpStatusCode::BAD_REQUEST);
    let body = ut_resp_body(resp).await;
    assert_eq!(
        body["error"].as_str().unwrap(),
        "Dish must have a price that is an integer greater than 0"
    );
}

#[tokio::test]
async fn order_endpoints_full_flow() {
    let service = ut_web_service_setup();
    let new_order = json!({
        "deliverTo": "04 Station Road", "mobileNumber": "0912-345-678",
        "dishes": [
            {"id": "3", "name": "pad thai", "description": "rice noodles",
             "price": 880, "quantity": 2}
        ]
    });
    let req = ut_req("POST", "/1.0.1/orders", Some(new_order.clone()));
    let resp = service.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), HttpStatusCode::CREATED);
    let body = ut_resp_body(resp).await;
    assert_eq!(body["data"]["id"].as_str().unwrap(), "1");
    assert_eq!(body["data"]["status"].as_str().unwrap(), "pending");
    assert_eq!(body["data"]["dishes"][0]["quantity"].as_u64().unwrap(), 2);

    let mut edit = new_order.clone();
    edit["status"] = json!("delivered");
    let req = ut_req("PUT", "/1.0.1/orders/1", Some(edit));
    let resp = service.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), HttpStatusCode::OK);

    // delivered orders accept no further change
    let mut edit = new_order.clone();
    edit["status"] = json!("pending");
    let req = ut_req("PUT", "/1.0.1/orders/1", Some(edit));
    let resp = service.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), HttpStatusCode::BAD_REQUEST);
    let body = ut_resp_body(resp).await;
    assert_eq!(
        body["error"].as_str().unwrap(),
        "A delivered order cannot be changed"
    );

    let req = ut_req("DELETE", "/1.0.1/orders/1", None);
    let resp = service.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), HttpStatusCode::BAD_REQUEST);

    let req = ut_req("POST", "/1.0.1/orders", Some(new_order));
    let resp = service.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), HttpStatusCode::CREATED);
    let req = ut_req("DELETE", "/1.0.1/orders/2", None);
    let resp = service.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), HttpStatusCode::NO_CONTENT);
    let req = ut_req("GET", "/1.0.1/orders/2", None);
    let resp = service.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), HttpStatusCode::NOT_FOUND);
} // end of fn order_endpoints_full_flow

#[tokio::test]
async fn order_create_error_no_dishes() {
    let service = ut_web_service_setup();
    let new_order = json!({
        "deliverTo": "04 Station Road", "mobileNumber": "0912-345-678",
        "dishes": []
    });
    let req = ut_req("POST", "/1.0.1/orders", Some(new_order));
    let resp = service.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), HttpStatusCode::BAD_REQUEST);
    let body = ut_resp_body(resp).await;
    assert_eq!(body["error"].as_str().unwrap(), "Order must include a dish");
}

#[test]
fn middleware_cors_ok() {
    let basepath = env!("CARGO_MANIFEST_DIR").to_string();
    let cfg_path = basepath + EXAMPLE_REL_PATH + "cors_ok.json";
    let result = middleware::cors(cfg_path);
    assert!(result.is_ok());
}

#[test]
fn middleware_cors_error_cfg() {
    let basepath = env!("CARGO_MANIFEST_DIR").to_string();
    let cfg_path = basepath + EXAMPLE_REL_PATH + "cors_invalid_header.json";
    let result = middleware::cors(cfg_path);
    let e = result.err().unwrap();
    assert_eq!(e.code, AppErrorCode::InvalidInput);
}

#[tokio::test]
async fn net_listener_error_bad_host() {
    let result = net_listener("nonexist.org.12345".to_string(), 0).await;
    let e = result.err().unwrap();
    assert_eq!(e.code, AppErrorCode::IOerror(ErrorKind::AddrNotAvailable));
}
