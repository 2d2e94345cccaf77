use std::result::Result as DefaultResult;

use serde_json::Value as JsnValue;

use crate::api::web::dto::DishReqDto;
use crate::error::{AppError, AppErrorCode};

use super::{require_field, require_field_jsn};

#[derive(Debug, Clone, PartialEq)]
pub struct DishModel {
    pub id_: String,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub image_url: String,
}

impl DishModel {
    pub fn try_create(new_id: String, data: DishReqDto) -> DefaultResult<Self, AppError> {
        let (name, description, price, image_url) = Self::validate_fields(data)?;
        Ok(Self {
            id_: new_id,
            name,
            description,
            price,
            image_url,
        })
    }

    /// full-field replacement, the identity never comes from the payload
    pub fn try_replace(self, data: DishReqDto) -> DefaultResult<Self, AppError> {
        let (name, description, price, image_url) = Self::validate_fields(data)?;
        Ok(Self {
            id_: self.id_,
            name,
            description,
            price,
            image_url,
        })
    }

    // presence of all mutable fields first, then the price range rule,
    // the first failed check wins
    fn validate_fields(
        data: DishReqDto,
    ) -> DefaultResult<(String, String, i64, String), AppError> {
        let name = require_field("Dish", "name", data.name.as_deref())?.to_string();
        let description =
            require_field("Dish", "description", data.description.as_deref())?.to_string();
        let price_raw = require_field_jsn("Dish", "price", data.price.as_ref())?;
        let image_url = require_field("Dish", "image_url", data.image_url.as_deref())?.to_string();
        let price = Self::validate_price(price_raw)?;
        Ok((name, description, price, image_url))
    }

    fn validate_price(given: &JsnValue) -> DefaultResult<i64, AppError> {
        given.as_i64().filter(|p| *p > 0).ok_or(AppError {
            code: AppErrorCode::InvalidInput,
            detail: Some(
                "Dish must have a price that is an integer greater than 0".to_string(),
            ),
        })
    }
} // end of impl DishModel
