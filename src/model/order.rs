use std::fmt::{Display, Formatter, Result as FmtResult};
use std::result::Result as DefaultResult;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset};
use serde_json::Value as JsnValue;

use crate::api::web::dto::{OrderLineReqDto, OrderReqDto};
use crate::constant::hard_limit;
use crate::error::{AppError, AppErrorCode};

use super::require_field;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Preparing,
    OutForDelivery,
    Delivered,
}

impl FromStr for OrderStatus {
    type Err = AppError;
    fn from_str(s: &str) -> DefaultResult<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "preparing" => Ok(Self::Preparing),
            "out-for-delivery" => Ok(Self::OutForDelivery),
            "delivered" => Ok(Self::Delivered),
            _others => Err(AppError {
                code: AppErrorCode::InvalidInput,
                detail: Some("Order status invalid".to_string()),
            }),
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let label = match self {
            Self::Pending => "pending",
            Self::Preparing => "preparing",
            Self::OutForDelivery => "out-for-delivery",
            Self::Delivered => "delivered",
        };
        write!(f, "{label}")
    }
}

impl OrderStatus {
    // once delivered there is no outgoing transition any more
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered)
    }

    pub fn allows_delete(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

/// one ordered dish, the fields are value copies taken from the request,
/// they keep no reference into the dish collection
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLineModel {
    pub dish_id: Option<String>,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub price: i64,
    pub quantity: u32,
}

impl OrderLineModel {
    fn try_from_req(seq: usize, d: OrderLineReqDto) -> DefaultResult<Self, AppError> {
        let label = d.id.clone().unwrap_or_else(|| seq.to_string());
        let quantity = d
            .quantity
            .as_ref()
            .and_then(JsnValue::as_u64)
            .filter(|q| *q >= 1)
            .ok_or(AppError {
                code: AppErrorCode::InvalidInput,
                detail: Some(format!(
                    "Dish {label} must have a quantity that is an integer greater than 0"
                )),
            })? as u32;
        Ok(Self {
            dish_id: d.id,
            name: d.name.unwrap_or_default(),
            description: d.description.unwrap_or_default(),
            image_url: d.image_url.unwrap_or_default(),
            price: d.price.as_ref().and_then(JsnValue::as_i64).unwrap_or(0),
            quantity,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderModel {
    pub id_: String,
    pub deliver_to: String,
    pub mobile_number: String,
    pub status: OrderStatus,
    pub lines: Vec<OrderLineModel>,
    pub create_time: DateTime<FixedOffset>,
}

impl OrderModel {
    pub fn try_create(
        new_id: String,
        data: OrderReqDto,
        time: DateTime<FixedOffset>,
    ) -> DefaultResult<Self, AppError> {
        let deliver_to = require_field("Order", "deliverTo", data.deliver_to.as_deref())?.to_string();
        let mobile_number =
            require_field("Order", "mobileNumber", data.mobile_number.as_deref())?.to_string();
        let lines = Self::validate_lines(data.dishes)?;
        let status = Self::status_at_creation(data.status.as_deref())?;
        Ok(Self {
            id_: new_id,
            deliver_to,
            mobile_number,
            status,
            lines,
            create_time: time,
        })
    } // end of fn try_create

    // the boundary layer does not force clients to send an initial status,
    // a new order starts from `pending` unless the payload carries a valid
    // status explicitly
    fn status_at_creation(raw: Option<&str>) -> DefaultResult<OrderStatus, AppError> {
        match raw {
            None => Ok(OrderStatus::Pending),
            Some(s) if s.is_empty() => Ok(OrderStatus::Pending),
            Some(s) => s.parse(),
        }
    }

    /// full-field replacement, blocked entirely once the order reached its
    /// terminal status, identity and creation time never change
    pub fn try_replace(self, data: OrderReqDto) -> DefaultResult<Self, AppError> {
        if self.status.is_terminal() {
            return Err(AppError {
                code: AppErrorCode::InvalidInput,
                detail: Some("A delivered order cannot be changed".to_string()),
            });
        }
        let deliver_to = require_field("Order", "deliverTo", data.deliver_to.as_deref())?.to_string();
        let mobile_number =
            require_field("Order", "mobileNumber", data.mobile_number.as_deref())?.to_string();
        let status = require_field("Order", "status", data.status.as_deref())?.parse()?;
        let lines = Self::validate_lines(data.dishes)?;
        Ok(Self {
            id_: self.id_,
            deliver_to,
            mobile_number,
            status,
            lines,
            create_time: self.create_time,
        })
    } // end of fn try_replace

    pub fn check_deletable(&self) -> DefaultResult<(), AppError> {
        if self.status.allows_delete() {
            Ok(())
        } else {
            Err(AppError {
                code: AppErrorCode::InvalidInput,
                detail: Some("An order cannot be deleted unless it is pending.".to_string()),
            })
        }
    }

    fn validate_lines(
        data: Option<Vec<OrderLineReqDto>>,
    ) -> DefaultResult<Vec<OrderLineModel>, AppError> {
        let given = data.unwrap_or_default();
        if given.is_empty() {
            return Err(AppError {
                code: AppErrorCode::InvalidInput,
                detail: Some("Order must include a dish".to_string()),
            });
        }
        if given.len() > hard_limit::MAX_ORDER_LINES_PER_REQUEST {
            return Err(AppError {
                code: AppErrorCode::ExceedingMaxLimit,
                detail: Some(format!(
                    "Order exceeds the limit of {} dishes per request",
                    hard_limit::MAX_ORDER_LINES_PER_REQUEST
                )),
            });
        }
        given
            .into_iter()
            .enumerate()
            .map(|(seq, d)| OrderLineModel::try_from_req(seq, d))
            .collect()
    } // end of fn validate_lines
} // end of impl OrderModel
