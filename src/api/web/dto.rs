use serde::{Deserialize, Serialize};
use serde_json::Value as JsnValue;

use crate::model::{DishModel, OrderLineModel, OrderModel};

// numeric fields stay raw JSON values on the inbound side, the validation
// chain owns the integer / range rules and reports them with its own
// messages instead of a deserializer rejection

#[derive(Deserialize, Serialize)]
pub struct DishReqDto {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<JsnValue>,
    pub image_url: Option<String>,
}

#[derive(Deserialize, Serialize)]
pub struct OrderLineReqDto {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub price: Option<JsnValue>,
    pub quantity: Option<JsnValue>,
}

#[derive(Deserialize, Serialize)]
pub struct OrderReqDto {
    pub id: Option<String>,
    #[serde(rename = "deliverTo")]
    pub deliver_to: Option<String>,
    #[serde(rename = "mobileNumber")]
    pub mobile_number: Option<String>,
    pub status: Option<String>,
    pub dishes: Option<Vec<OrderLineReqDto>>,
}

#[derive(Deserialize, Serialize)]
pub struct DishRespDto {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub image_url: String,
}

impl From<DishModel> for DishRespDto {
    fn from(value: DishModel) -> Self {
        Self {
            id: value.id_,
            name: value.name,
            description: value.description,
            price: value.price,
            image_url: value.image_url,
        }
    }
}

#[derive(Deserialize, Serialize)]
pub struct OrderLineRespDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub price: i64,
    pub quantity: u32,
}

impl From<OrderLineModel> for OrderLineRespDto {
    fn from(value: OrderLineModel) -> Self {
        Self {
            id: value.dish_id,
            name: value.name,
            description: value.description,
            image_url: value.image_url,
            price: value.price,
            quantity: value.quantity,
        }
    }
}

#[derive(Deserialize, Serialize)]
pub struct OrderRespDto {
    pub id: String,
    #[serde(rename = "deliverTo")]
    pub deliver_to: String,
    #[serde(rename = "mobileNumber")]
    pub mobile_number: String,
    pub status: String,
    pub dishes: Vec<OrderLineRespDto>,
}

impl From<OrderModel> for OrderRespDto {
    fn from(value: OrderModel) -> Self {
        Self {
            id: value.id_,
            deliver_to: value.deliver_to,
            mobile_number: value.mobile_number,
            status: value.status.to_string(),
            dishes: value.lines.into_iter().map(OrderLineRespDto::from).collect(),
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct SingleRespDto<T> {
    pub data: T,
}

#[derive(Serialize, Deserialize)]
pub struct ErrorRespDto {
    pub error: String,
}
