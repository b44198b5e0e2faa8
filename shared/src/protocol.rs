use crate::{DepositStatus, FulfillmentStatus, PaymentStatus, RentalDate, User};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// A trait that defines the request-response relationship and metadata for a
/// fixed-path API endpoint.
///
/// Endpoints addressed by id (`/selection/:id` and friends) are built from the
/// helpers in [`paths`] instead.
pub trait ApiRequest: Serialize {
    /// The `data` payload returned by this request.
    type Response: DeserializeOwned;
    /// The URL path.
    const PATH: &'static str;
    /// The HTTP method.
    const METHOD: HttpMethod;
}

// =========================================================
// Response envelope
// =========================================================

/// Every successful response is wrapped as `{ data, message? }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Non-2xx responses carry `{ message }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

// =========================================================
// Auth
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl ApiRequest for LoginRequest {
    type Response = AuthPayload;
    const PATH: &'static str = "/auth/login";
    const METHOD: HttpMethod = HttpMethod::Post;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl ApiRequest for RegisterRequest {
    // Registration only starts the OTP flow; the payload is informational.
    type Response = serde_json::Value;
    const PATH: &'static str = "/auth/register";
    const METHOD: HttpMethod = HttpMethod::Post;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub otp: String,
}

impl ApiRequest for VerifyOtpRequest {
    type Response = AuthPayload;
    const PATH: &'static str = "/auth/verify-otp";
    const METHOD: HttpMethod = HttpMethod::Post;
}

/// Token + user returned by login and OTP verification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthPayload {
    pub token: String,
    pub user: User,
}

// =========================================================
// Orders
// =========================================================

/// One line of `POST /order`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItemPayload {
    pub selection_id: String,
    pub deposit: f64,
    pub pay: f64,
    #[serde(rename = "selectedTopSize")]
    pub top_size: Option<String>,
    #[serde(rename = "selectedBottomSize")]
    pub bottom_size: Option<String>,
    #[serde(rename = "selectedColor")]
    pub color: Option<String>,
    pub deliver_date: RentalDate,
    pub receive_date: RentalDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub items: Vec<OrderItemPayload>,
    #[serde(default)]
    pub notes: String,
}

impl ApiRequest for CreateOrderRequest {
    type Response = serde_json::Value;
    const PATH: &'static str = "/order";
    const METHOD: HttpMethod = HttpMethod::Post;
}

/// Body of `POST /booking`: a single item an admin books for a customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    pub user_id: String,
    #[serde(flatten)]
    pub item: OrderItemPayload,
}

impl ApiRequest for CreateBookingRequest {
    type Response = serde_json::Value;
    const PATH: &'static str = "/booking";
    const METHOD: HttpMethod = HttpMethod::Post;
}

/// Body of `PUT /selection-order/:id/status`; exactly one axis is set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusUpdateRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<FulfillmentStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deposit_status: Option<DepositStatus>,
}

/// Body of `PUT /selection-order/:id`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderItemEdit {
    #[serde(rename = "selectedTopSize")]
    pub top_size: Option<String>,
    #[serde(rename = "selectedBottomSize")]
    pub bottom_size: Option<String>,
    #[serde(rename = "selectedColor")]
    pub color: Option<String>,
    pub deliver_date: Option<RentalDate>,
    pub receive_date: Option<RentalDate>,
}

// =========================================================
// Upload
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub url: String,
}

pub const UPLOAD_PATH: &str = "/upload";
pub const UPLOAD_FIELD: &str = "file";

// =========================================================
// Paths
// =========================================================

pub mod paths {
    pub const USERS: &str = "/user/users";
    pub const SELECTIONS: &str = "/selection";
    pub const CATEGORIES: &str = "/category";
    pub const BANNERS: &str = "/banner";
    pub const ORDERS: &str = "/order";
    pub const MY_ORDERS: &str = "/order/my";

    pub fn selection(id: &str) -> String {
        format!("{SELECTIONS}/{id}")
    }

    pub fn category(id: &str) -> String {
        format!("{CATEGORIES}/{id}")
    }

    pub fn banner(id: &str) -> String {
        format!("{BANNERS}/{id}")
    }

    pub fn order(id: &str) -> String {
        format!("{ORDERS}/{id}")
    }

    pub fn order_item(id: &str) -> String {
        format!("/selection-order/{id}")
    }

    pub fn order_item_status(id: &str) -> String {
        format!("/selection-order/{id}/status")
    }

    pub fn availability(selection_id: &str) -> String {
        format!("/selection-order/availability/{selection_id}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_update_serializes_only_the_changed_axis() {
        let body = StatusUpdateRequest {
            payment_status: Some(PaymentStatus::Completed),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({ "payment_status": "completed" })
        );
    }

    #[test]
    fn order_item_payload_uses_wire_names() {
        let item = OrderItemPayload {
            selection_id: "s1".into(),
            deposit: 500.0,
            pay: 1000.0,
            top_size: Some("M".into()),
            bottom_size: None,
            color: None,
            deliver_date: RentalDate::from_ymd(2024, 5, 10).unwrap(),
            receive_date: RentalDate::from_ymd(2024, 5, 12).unwrap(),
        };
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["selectedTopSize"], "M");
        assert_eq!(value["deliver_date"], "2024-05-10");
        assert!(value["selectedColor"].is_null());
    }
}
