use serde_json::json;

use eatery::api::web::dto::DishReqDto;
use eatery::error::AppErrorCode;
use eatery::model::DishModel;

fn ut_dish_req(price: serde_json::Value) -> DishReqDto {
    DishReqDto {
        id: None,
        name: Some("mushroom risotto".to_string()),
        description: Some("creamy arborio rice".to_string()),
        price: Some(price),
        image_url: Some("https://img.example.com/risotto.png".to_string()),
    }
}

#[test]
fn create_ok() {
    let result = DishModel::try_create("1".to_string(), ut_dish_req(json!(1250)));
    let m = result.unwrap();
    assert_eq!(m.id_.as_str(), "1");
    assert_eq!(m.name.as_str(), "mushroom risotto");
    assert_eq!(m.price, 1250);
}

#[test]
fn create_error_missing_name() {
    let mut req = ut_dish_req(json!(1250));
    req.name = None;
    let result = DishModel::try_create("1".to_string(), req);
    let e = result.err().unwrap();
    assert_eq!(e.code, AppErrorCode::InvalidInput);
    assert_eq!(e.detail.unwrap().as_str(), "Dish must include a name");
}

#[test]
fn create_error_empty_description() {
    let mut req = ut_dish_req(json!(1250));
    req.description = Some(String::new());
    let result = DishModel::try_create("1".to_string(), req);
    let e = result.err().unwrap();
    assert_eq!(e.detail.unwrap().as_str(), "Dish must include a description");
}

#[test]
fn create_error_price_absent_reported_as_missing() {
    let mut req = ut_dish_req(json!(1250));
    req.price = None;
    let result = DishModel::try_create("1".to_string(), req);
    let e = result.err().unwrap();
    assert_eq!(e.detail.unwrap().as_str(), "Dish must include a price");
}

#[test]
fn create_error_price_zero_reported_as_missing() {
    // zero counts as an absent value, it never reaches the range rule
    let result = DishModel::try_create("1".to_string(), ut_dish_req(json!(0)));
    let e = result.err().unwrap();
    assert_eq!(e.detail.unwrap().as_str(), "Dish must include a price");
}

#[test]
fn create_error_price_negative() {
    let result = DishModel::try_create("1".to_string(), ut_dish_req(json!(-4)));
    let e = result.err().unwrap();
    assert_eq!(
        e.detail.unwrap().as_str(),
        "Dish must have a price that is an integer greater than 0"
    );
}

#[test]
fn create_error_price_not_integer() {
    for bad in [json!(10.5), json!("1250"), json!([1250])] {
        let result = DishModel::try_create("1".to_string(), ut_dish_req(bad));
        let e = result.err().unwrap();
        assert_eq!(e.code, AppErrorCode::InvalidInput);
        assert_eq!(
            e.detail.unwrap().as_str(),
            "Dish must have a price that is an integer greater than 0"
        );
    }
}

#[test]
fn replace_keeps_identity() {
    let saved = DishModel::try_create("7".to_string(), ut_dish_req(json!(1250))).unwrap();
    let mut req = ut_dish_req(json!(990));
    req.id = Some("ignored".to_string());
    req.name = Some("spring roll".to_string());
    let updated = saved.try_replace(req).unwrap();
    assert_eq!(updated.id_.as_str(), "7");
    assert_eq!(updated.name.as_str(), "spring roll");
    assert_eq!(updated.price, 990);
}
