use serde::{Deserialize, Serialize};

pub mod date;
pub mod protocol;
pub mod serde_helper;

pub use date::{DateRange, RentalDate};

use serde_helper::{
    empty_as_none, lenient_amount, lenient_date, lenient_optional_amount, lenient_price,
    null_as_default,
};

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const HEADER_AUTHORIZATION: &str = "Authorization";

/// 本地持久化使用的键名，与线上已存在的浏览器数据保持兼容
pub const STORAGE_CART_KEY: &str = "selection_cart";
pub const STORAGE_TOKEN_KEY: &str = "token";
pub const STORAGE_USER_KEY: &str = "user";

pub const PLACEHOLDER_PHOTO: &str = "https://via.placeholder.com/600x800";

// =========================================================
// 用户与权限 (Users & Permissions)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

/// 路由与操作所需的能力
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    PlaceOrder,
    ViewOwnOrders,
    ManageCatalog,
    ManageBookings,
}

impl Role {
    pub fn permits(self, permission: Permission) -> bool {
        match permission {
            Permission::PlaceOrder | Permission::ViewOwnOrders => true,
            Permission::ManageCatalog | Permission::ManageBookings => self == Role::Admin,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: Role,
}

// =========================================================
// 商品目录 (Catalog)
// =========================================================

/// 变体维度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantAxis {
    TopSize,
    BottomSize,
    Color,
}

impl VariantAxis {
    pub const ALL: [VariantAxis; 3] = [Self::TopSize, Self::BottomSize, Self::Color];

    pub fn label(&self) -> &'static str {
        match self {
            VariantAxis::TopSize => "Top Size",
            VariantAxis::BottomSize => "Bottom Size",
            VariantAxis::Color => "Color",
        }
    }
}

/// 可租赁的商品 ("Selection")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    pub name: String,
    #[serde(
        rename = "SKU",
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub sku: Option<String>,
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: i64,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<String>,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub photos: Vec<String>,
    /// 旧数据的单图字段
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub photo: Option<String>,
    #[serde(rename = "topSizes", default, deserialize_with = "null_as_default")]
    pub top_sizes: Vec<String>,
    #[serde(rename = "bottomSizes", default, deserialize_with = "null_as_default")]
    pub bottom_sizes: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub colors: Vec<String>,
}

impl Selection {
    /// 该维度的可选值，空表示无需选择
    pub fn options(&self, axis: VariantAxis) -> &[String] {
        match axis {
            VariantAxis::TopSize => &self.top_sizes,
            VariantAxis::BottomSize => &self.bottom_sizes,
            VariantAxis::Color => &self.colors,
        }
    }

    pub fn offers(&self, axis: VariantAxis) -> bool {
        !self.options(axis).is_empty()
    }

    /// 首图：优先 photos[0]，其次旧的 photo 字段
    pub fn primary_photo(&self) -> Option<&str> {
        self.photos
            .iter()
            .map(String::as_str)
            .find(|p| !p.trim().is_empty())
            .or(self.photo.as_deref())
    }

    /// 全部图片；没有 photos 时退回单图
    pub fn gallery(&self) -> Vec<&str> {
        let photos: Vec<&str> = self
            .photos
            .iter()
            .map(String::as_str)
            .filter(|p| !p.trim().is_empty())
            .collect();
        if photos.is_empty() {
            self.photo.as_deref().into_iter().collect()
        } else {
            photos
        }
    }
}

/// 后台新建/编辑商品的请求体
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionDraft {
    pub name: String,
    #[serde(rename = "SKU", default)]
    pub sku: String,
    pub price: i64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(rename = "topSizes", default)]
    pub top_sizes: Vec<String>,
    #[serde(rename = "bottomSizes", default)]
    pub bottom_sizes: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
}

impl From<&Selection> for SelectionDraft {
    fn from(s: &Selection) -> Self {
        Self {
            name: s.name.clone(),
            sku: s.sku.clone().unwrap_or_default(),
            price: s.price,
            category: s.category.clone().unwrap_or_default(),
            description: s.description.clone().unwrap_or_default(),
            photos: s.gallery().into_iter().map(str::to_string).collect(),
            top_sizes: s.top_sizes.clone(),
            bottom_sizes: s.bottom_sizes.clone(),
            colors: s.colors.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub image: Option<String>,
    #[serde(rename = "isFeatured", default)]
    pub is_featured: bool,
    #[serde(rename = "isActive", default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryDraft {
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(rename = "isFeatured", default)]
    pub is_featured: bool,
}

impl From<&Category> for CategoryDraft {
    fn from(c: &Category) -> Self {
        Self {
            name: c.name.clone(),
            image: c.image.clone().unwrap_or_default(),
            is_featured: c.is_featured,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Banner {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub image: String,
    #[serde(rename = "isActive", default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BannerDraft {
    #[serde(default)]
    pub title: String,
    pub image: String,
    #[serde(rename = "isActive")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

// =========================================================
// 订单 (Orders)
// =========================================================

/// 履约状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FulfillmentStatus {
    #[default]
    Pending,
    Confirmed,
    Delivered,
    Received,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl FulfillmentStatus {
    pub const ALL: [FulfillmentStatus; 5] = [
        Self::Pending,
        Self::Confirmed,
        Self::Delivered,
        Self::Received,
        Self::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Delivered => "delivered",
            Self::Received => "received",
            Self::Cancelled => "cancelled",
            Self::Unknown => "unknown",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::Delivered => "Delivered",
            Self::Received => "Received",
            Self::Cancelled => "Cancelled",
            Self::Unknown => "Unknown",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == s)
    }
}

/// 付款状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Completed,
    #[serde(other)]
    Unknown,
}

impl PaymentStatus {
    pub const ALL: [PaymentStatus; 2] = [Self::Pending, Self::Completed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Unknown => "unknown",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Completed => "Completed",
            Self::Unknown => "Unknown",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == s)
    }
}

/// 押金状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DepositStatus {
    #[default]
    Pending,
    Received,
    Returned,
    #[serde(other)]
    Unknown,
}

impl DepositStatus {
    pub const ALL: [DepositStatus; 3] = [Self::Pending, Self::Received, Self::Returned];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Received => "received",
            Self::Returned => "returned",
            Self::Unknown => "unknown",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Received => "Received",
            Self::Returned => "Returned",
            Self::Unknown => "Unknown",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == s)
    }
}

/// 订单下单人：可能被服务端 populate 成对象，也可能只是 id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserRef {
    Id(String),
    Populated(User),
}

impl UserRef {
    pub fn name(&self) -> Option<&str> {
        match self {
            UserRef::Populated(u) => Some(u.name.as_str()),
            UserRef::Id(_) => None,
        }
    }

    pub fn email(&self) -> Option<&str> {
        match self {
            UserRef::Populated(u) => Some(u.email.as_str()),
            UserRef::Id(_) => None,
        }
    }
}

/// 订单项引用的商品：populate 后为对象，否则为 id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SelectionRef {
    Id(String),
    Populated(Box<Selection>),
}

impl SelectionRef {
    pub fn id(&self) -> &str {
        match self {
            SelectionRef::Id(id) => id,
            SelectionRef::Populated(s) => &s.id,
        }
    }

    pub fn selection(&self) -> Option<&Selection> {
        match self {
            SelectionRef::Populated(s) => Some(s),
            SelectionRef::Id(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(rename = "user_id", default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserRef>,
    #[serde(default)]
    pub status: FulfillmentStatus,
    #[serde(default)]
    pub items_count: u32,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub total_amount: f64,
    #[serde(default, deserialize_with = "lenient_optional_amount")]
    pub total_deposit: Option<f64>,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Order {
    /// 订单号短码：id 末 6 位大写
    pub fn short_code(&self) -> String {
        let chars: Vec<char> = self.id.chars().collect();
        let start = chars.len().saturating_sub(6);
        chars[start..].iter().collect::<String>().to_uppercase()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(rename = "selection_id")]
    pub selection: SelectionRef,
    #[serde(rename = "selectedTopSize", default, deserialize_with = "empty_as_none")]
    pub top_size: Option<String>,
    #[serde(rename = "selectedBottomSize", default, deserialize_with = "empty_as_none")]
    pub bottom_size: Option<String>,
    #[serde(rename = "selectedColor", default, deserialize_with = "empty_as_none")]
    pub color: Option<String>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub deliver_date: Option<RentalDate>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub receive_date: Option<RentalDate>,
    #[serde(default)]
    pub status: FulfillmentStatus,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub deposit_status: DepositStatus,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub deposit: f64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub pay: f64,
}

/// `GET /order/:id` 的响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDetail {
    pub order: Order,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<OrderItem>,
}

/// 已被预订的时间段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityWindow {
    #[serde(alias = "deliver_date", alias = "startDate")]
    pub from: RentalDate,
    #[serde(alias = "receive_date", alias = "endDate")]
    pub to: RentalDate,
}

impl AvailabilityWindow {
    pub fn range(&self) -> DateRange {
        DateRange::new(self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_tolerates_sparse_admin_data() {
        let json = r#"{
            "_id": "s1",
            "name": "Lehenga",
            "SKU": "",
            "price": "4500",
            "photos": null,
            "photo": "http://localhost:5000/uploads/a.jpg",
            "topSizes": ["S", "M"],
            "bottomSizes": null
        }"#;
        let s: Selection = serde_json::from_str(json).unwrap();
        assert_eq!(s.price, 4500);
        assert!(s.sku.is_none());
        assert!(s.offers(VariantAxis::TopSize));
        assert!(!s.offers(VariantAxis::BottomSize));
        assert!(!s.offers(VariantAxis::Color));
        assert_eq!(s.primary_photo(), Some("http://localhost:5000/uploads/a.jpg"));
        assert_eq!(s.gallery().len(), 1);
    }

    #[test]
    fn order_item_accepts_populated_or_bare_selection() {
        let bare = r#"{"_id": "oi1", "selection_id": "s1", "status": "confirmed"}"#;
        let item: OrderItem = serde_json::from_str(bare).unwrap();
        assert_eq!(item.selection.id(), "s1");
        assert_eq!(item.status, FulfillmentStatus::Confirmed);
        assert_eq!(item.payment_status, PaymentStatus::Pending);

        let populated = r#"{
            "_id": "oi2",
            "selection_id": {"_id": "s2", "name": "Sherwani", "price": 3000},
            "deposit_status": "returned",
            "deliver_date": "2024-05-10T00:00:00.000Z"
        }"#;
        let item: OrderItem = serde_json::from_str(populated).unwrap();
        assert_eq!(item.selection.id(), "s2");
        assert_eq!(item.selection.selection().unwrap().name, "Sherwani");
        assert_eq!(item.deposit_status, DepositStatus::Returned);
        assert_eq!(item.deliver_date, RentalDate::from_ymd(2024, 5, 10));
    }

    #[test]
    fn unknown_status_does_not_fail_the_order() {
        let json = r#"{"_id": "abcdef123456", "status": "completed", "total_amount": 3000}"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.status, FulfillmentStatus::Unknown);
        assert_eq!(order.short_code(), "123456");
        assert!(order.total_deposit.is_none());
    }

    #[test]
    fn roles_map_to_permissions() {
        assert!(Role::User.permits(Permission::PlaceOrder));
        assert!(!Role::User.permits(Permission::ManageCatalog));
        assert!(Role::Admin.permits(Permission::ManageBookings));
    }

    #[test]
    fn availability_window_accepts_booking_field_names() {
        let json = r#"{"deliver_date": "2024-05-10", "receive_date": "2024-05-15"}"#;
        let w: AvailabilityWindow = serde_json::from_str(json).unwrap();
        assert_eq!(w.from, RentalDate::from_ymd(2024, 5, 10).unwrap());
        assert_eq!(w.to, RentalDate::from_ymd(2024, 5, 15).unwrap());
    }
}
